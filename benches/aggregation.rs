use criterion::{black_box, criterion_group, criterion_main, Criterion};

use vibe::annotations::{Disease, DiseaseId, Gene, GeneId, PubmedEvidence, Source};
use vibe::prioritize::{Prioritizer, Strategy};
use vibe::{GeneDiseaseCollection, GeneDiseaseCombination};

struct Row {
    gene: Gene,
    disease: Disease,
    score: f64,
    source: usize,
    evidence: Option<PubmedEvidence>,
}

fn rows(n: u32) -> Vec<Row> {
    (0..n)
        .map(|i| {
            let gene = i % 500;
            Row {
                gene: Gene::new(GeneId::from(gene), &format!("G{gene}"), "")
                    .with_dsi(f64::from(gene % 17) / 17.0),
                disease: Disease::new(DiseaseId::from(i % 300), ""),
                score: f64::from(i % 100) / 100.0,
                source: (i % 3) as usize,
                evidence: (i % 2 == 0).then(|| {
                    PubmedEvidence::try_new(&format!("http://identifiers.org/pubmed/{}", i % 1000), None)
                        .unwrap()
                }),
            }
        })
        .collect()
}

fn aggregate(rows: &[Row], sources: &[Source]) -> GeneDiseaseCollection {
    let mut collection = GeneDiseaseCollection::new();
    for row in rows {
        let combination = collection.get_or_insert(GeneDiseaseCombination::new(
            row.gene.clone(),
            row.disease.clone(),
            Some(row.score),
        ));
        match &row.evidence {
            Some(evidence) => combination.add_with_evidence(&sources[row.source], evidence.clone()),
            None => combination.add(&sources[row.source]),
        }
    }
    collection
}

fn aggregation_benchmark(c: &mut Criterion) {
    let sources: Vec<Source> = ["BEFREE", "CTD_human", "ORPHANET"]
        .iter()
        .map(|name| Source::try_from(format!("http://rdf.disgenet.org/v6.0.0/void/{name}").as_str()).unwrap())
        .collect();
    let rows = rows(20_000);

    c.bench_function("aggregate 20000 rows", |b| {
        b.iter(|| aggregate(black_box(&rows), &sources).len())
    });

    let collection = aggregate(&rows, &sources);
    c.bench_function("prioritize score-max", |b| {
        b.iter(|| Strategy::ScoreMax.prioritize(black_box(&collection)).len())
    });
    c.bench_function("prioritize dsi-max", |b| {
        b.iter(|| Strategy::DsiMax.prioritize(black_box(&collection)).len())
    });
}

criterion_group!(benches, aggregation_benchmark);
criterion_main!(benches);
