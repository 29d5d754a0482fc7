use criterion::{black_box, criterion_group, criterion_main, Criterion};

use vibe::{OntologyAlgorithm, OntologyExpander, Phenotype, PhenotypeGraph};

/// A balanced tree with `depth` levels, each term has `width` children
fn tree(depth: u32, width: u32) -> PhenotypeGraph {
    let mut graph = PhenotypeGraph::default();
    let mut level = vec![1u32];
    let mut next_id = 2u32;
    for _ in 1..depth {
        let mut next_level = Vec::with_capacity(level.len() * width as usize);
        for parent in level {
            for _ in 0..width {
                graph.add_parent(parent, next_id);
                next_level.push(next_id);
                next_id += 1;
            }
        }
        level = next_level;
    }
    graph
}

fn expansion_benchmark(c: &mut Criterion) {
    let graph = tree(8, 4);
    let seeds: Vec<Phenotype> = [2u32, 7, 30, 130].into_iter().map(Phenotype::from).collect();

    c.bench_function("expand children", |b| {
        let expander = OntologyExpander::new(&graph, OntologyAlgorithm::Children);
        b.iter(|| expander.expand(black_box(seeds.iter().copied())).len())
    });

    c.bench_function("expand distance 3", |b| {
        let expander = OntologyExpander::new(&graph, OntologyAlgorithm::Distance(3));
        b.iter(|| expander.expand(black_box(seeds.iter().copied())).len())
    });
}

criterion_group!(benches, expansion_benchmark);
criterion_main!(benches);
