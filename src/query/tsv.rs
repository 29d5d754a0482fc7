use std::collections::HashSet;
use std::fs::File;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{debug, error};

use crate::annotations::{DiseaseId, GeneId, Source};
use crate::ontology::PhenotypeGroup;
use crate::query::{AssociationRow, Associations, QueryRunner};
use crate::{Phenotype, VibeError, VibeResult};

const SOURCES: &str = "sources.tsv";
const PDAS: &str = "pdas.tsv";
const GDAS: &str = "gdas.tsv";

#[derive(Debug, Deserialize)]
struct SourceRecord {
    source: String,
}

#[derive(Debug, Deserialize)]
struct PdaRecord {
    phenotype: String,
    disease: String,
}

#[derive(Debug, Deserialize)]
struct GdaLink {
    gene_id: String,
    disease_id: String,
}

/// A dataset stored as tab-separated files in one directory
///
/// The directory contains:
///
/// - `sources.tsv`: the source catalog, one column `source` with the URI
///   of each source
/// - `pdas.tsv`: phenotype-disease associations, columns `phenotype` and
///   `disease` with prefixed ids (`hp:0000001`, `umls:C0000001`)
/// - `gdas.tsv`: gene-disease associations, one [`AssociationRow`] per line
///
/// Associations are looked up in two phases. First the diseases of the
/// phenotypes and the genes of those diseases are determined, then every
/// gene-disease association of those genes is returned.
#[derive(Debug, Clone)]
pub struct TsvDataset {
    dir: PathBuf,
}

impl TsvDataset {
    /// Opens the dataset in `dir`
    ///
    /// # Errors
    ///
    /// [`VibeError::CannotOpenFile`] if `dir` is missing one of the data files
    pub fn open<P: AsRef<Path>>(dir: P) -> VibeResult<Self> {
        let dir = dir.as_ref().to_path_buf();
        for name in [SOURCES, PDAS, GDAS] {
            let path = dir.join(name);
            if !path.is_file() {
                error!("Dataset file {} is missing", path.display());
                return Err(VibeError::CannotOpenFile(path.display().to_string()));
            }
        }
        Ok(Self { dir })
    }

    /// The dataset directory
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn reader(&self, name: &str) -> VibeResult<csv::Reader<File>> {
        let path = self.dir.join(name);
        let file = File::open(&path).map_err(|_| {
            error!("Unable to open {}", path.display());
            VibeError::CannotOpenFile(path.display().to_string())
        })?;
        Ok(csv::ReaderBuilder::new()
            .delimiter(b'\t')
            .has_headers(true)
            .from_reader(file))
    }

    fn records<T: DeserializeOwned>(&self, name: &str) -> VibeResult<Vec<T>> {
        let mut rdr = self.reader(name)?;
        let mut records = Vec::new();
        for result in rdr.deserialize() {
            records.push(result?);
        }
        Ok(records)
    }

    /// Returns the diseases associated to any of the `phenotypes`
    fn diseases(&self, phenotypes: &PhenotypeGroup) -> VibeResult<HashSet<DiseaseId>> {
        let mut diseases = HashSet::new();
        for record in self.records::<PdaRecord>(PDAS)? {
            let phenotype = Phenotype::try_from(record.phenotype.as_str())?;
            if phenotypes.contains(&phenotype) {
                diseases.insert(DiseaseId::try_from(record.disease.as_str())?);
            }
        }
        Ok(diseases)
    }

    /// Returns the genes associated to any of the `diseases`
    fn genes(&self, diseases: &HashSet<DiseaseId>) -> VibeResult<HashSet<GeneId>> {
        let mut genes = HashSet::new();
        for link in self.records::<GdaLink>(GDAS)? {
            if diseases.contains(&DiseaseId::try_from(link.disease_id.as_str())?) {
                genes.insert(GeneId::try_from(link.gene_id.as_str())?);
            }
        }
        Ok(genes)
    }
}

impl QueryRunner for TsvDataset {
    fn sources(&self) -> VibeResult<Vec<Source>> {
        self.records::<SourceRecord>(SOURCES)?
            .iter()
            .map(|record| Source::try_from(record.source.as_str()))
            .collect()
    }

    fn associations(&self, phenotypes: &PhenotypeGroup) -> VibeResult<Associations> {
        let diseases = self.diseases(phenotypes)?;
        let genes = self.genes(&diseases)?;
        debug!(
            "{} phenotypes are associated to {} diseases and {} genes",
            phenotypes.len(),
            diseases.len(),
            genes.len()
        );

        let rows = self
            .reader(GDAS)?
            .into_deserialize::<AssociationRow>()
            .filter_map(move |result| match result {
                Ok(row) => match GeneId::try_from(row.gene_id.as_str()) {
                    Ok(id) if genes.contains(&id) => Some(Ok(row)),
                    Ok(_) => None,
                    Err(err) => Some(Err(err)),
                },
                Err(err) => Some(Err(VibeError::from(err))),
            });
        Ok(Box::new(rows))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::fs;

    const GDA_HEADER: &str = "gene\tgene_id\tgene_title\tgene_symbol\tdsi\tdpi\tdisease\tdisease_id\tdisease_title\tscore\tsource\tevidence\tevidence_year";

    fn gda(gene: u32, disease: &str, evidence: &str, year: &str) -> String {
        format!(
            "http://identifiers.org/ncbigene/{gene}\tncbigene:{gene}\tgene {gene}\tG{gene}\t0.5\t\t\
            http://linkedlifedata.com/resource/umls/id/{disease}\tumls:{disease}\tdisease {disease}\t0.3\t\
            http://rdf.disgenet.org/v6.0.0/void/BEFREE\t{evidence}\t{year}"
        )
    }

    fn dataset(dir: &Path) -> TsvDataset {
        fs::write(
            dir.join(SOURCES),
            "source\nhttp://rdf.disgenet.org/v6.0.0/void/BEFREE\nhttp://rdf.disgenet.org/v6.0.0/void/ORPHANET\n",
        )
        .unwrap();
        fs::write(
            dir.join(PDAS),
            "phenotype\tdisease\nhp:0000001\tumls:C0000001\nhp:0000002\tumls:C0000002\n",
        )
        .unwrap();
        let gdas = [
            GDA_HEADER.to_string(),
            gda(1, "C0000001", "http://identifiers.org/pubmed/1", "2001"),
            gda(2, "C0000002", "", ""),
            gda(1, "C0000003", "", ""),
            gda(3, "C0000003", "", ""),
        ]
        .join("\n");
        fs::write(dir.join(GDAS), gdas + "\n").unwrap();
        TsvDataset::open(dir).unwrap()
    }

    #[test]
    fn read_sources() {
        let dir = tempfile::tempdir().unwrap();
        let sources = dataset(dir.path()).sources().unwrap();
        let names: Vec<&str> = sources.iter().map(Source::name).collect();
        assert_eq!(names, ["BEFREE", "ORPHANET"]);
    }

    #[test]
    fn two_phase_lookup() {
        let dir = tempfile::tempdir().unwrap();
        let data = dataset(dir.path());
        let phenotypes: PhenotypeGroup = [Phenotype::from(1u32)].into_iter().collect();

        let rows: Vec<AssociationRow> = data
            .associations(&phenotypes)
            .unwrap()
            .collect::<VibeResult<_>>()
            .unwrap();

        // gene 1 via C0000001, and its association with C0000003 as well
        assert_eq!(rows.len(), 2);
        assert!(rows.iter().all(|row| row.gene_id == "ncbigene:1"));
        assert_eq!(rows[0].evidence.as_deref(), Some("http://identifiers.org/pubmed/1"));
        assert_eq!(rows[0].evidence_year, Some(2001));
        assert_eq!(rows[0].dpi, None);
        assert_eq!(rows[1].evidence, None);
        assert_eq!(rows[1].evidence_year, None);
    }

    #[test]
    fn no_matching_phenotype() {
        let dir = tempfile::tempdir().unwrap();
        let data = dataset(dir.path());
        let phenotypes: PhenotypeGroup = [Phenotype::from(9u32)].into_iter().collect();
        assert_eq!(data.associations(&phenotypes).unwrap().count(), 0);
    }

    #[test]
    fn missing_file() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            TsvDataset::open(dir.path()),
            Err(VibeError::CannotOpenFile(_))
        ));
    }
}
