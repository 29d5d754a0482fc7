//! Access to the gene-disease-phenotype association data
//!
//! A [`QueryRunner`] provides the catalog of evidence sources and streams
//! the raw [`AssociationRow`]s of a set of phenotypes. [`TsvDataset`] is the
//! implementation backed by a directory of tab-separated files.

use serde::Deserialize;
use tracing::error;

use crate::annotations::{Disease, DiseaseId, Gene, GeneId, PubmedEvidence, Source};
use crate::ontology::PhenotypeGroup;
use crate::{VibeError, VibeResult};

mod tsv;

pub use tsv::TsvDataset;

/// Iterator of [`AssociationRow`]s
///
/// Every call to `next` may block on I/O.
pub type Associations = Box<dyn Iterator<Item = VibeResult<AssociationRow>>>;

/// The data source of a retrieval run
pub trait QueryRunner {
    /// Returns the catalog of all evidence sources of the dataset
    ///
    /// # Errors
    ///
    /// The catalog cannot be read or contains an invalid source URI
    fn sources(&self) -> VibeResult<Vec<Source>>;

    /// Returns all gene-disease associations of genes that are associated
    /// to any of the `phenotypes`
    ///
    /// # Errors
    ///
    /// The dataset cannot be read. Errors in individual rows are reported
    /// by the returned iterator.
    fn associations(&self, phenotypes: &PhenotypeGroup) -> VibeResult<Associations>;
}

/// One raw gene-disease association
///
/// Identifiers are kept in their textual form, use the accessor methods
/// to convert them into validated values.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AssociationRow {
    /// URI of the gene
    pub gene: String,
    /// Prefixed id of the gene, e.g. `ncbigene:1`
    pub gene_id: String,
    pub gene_title: String,
    pub gene_symbol: String,
    /// Disease Specificity Index
    pub dsi: Option<f64>,
    /// Disease Pleiotropy Index
    pub dpi: Option<f64>,
    /// URI of the disease
    pub disease: String,
    /// Prefixed id of the disease, e.g. `umls:C0000001`
    pub disease_id: String,
    pub disease_title: String,
    /// Gene-disease association score
    pub score: Option<f64>,
    /// URI of the source that reported the association
    pub source: String,
    /// PubMed URI of the citation
    pub evidence: Option<String>,
    pub evidence_year: Option<u16>,
}

impl AssociationRow {
    /// Returns the [`Gene`] of the association
    ///
    /// # Errors
    ///
    /// The gene id is invalid or does not match the gene URI, or the DSI
    /// or DPI is not a finite number
    pub fn gene(&self) -> VibeResult<Gene> {
        let id = GeneId::try_from(self.gene_id.as_str())?;
        if GeneId::from_uri(&self.gene)? != id {
            error!("Gene {} does not match {}", self.gene_id, self.gene);
            return Err(VibeError::InvalidInput(format!(
                "gene id {} does not match {}",
                self.gene_id, self.gene
            )));
        }
        let mut gene = Gene::new(id, &self.gene_symbol, &self.gene_title);
        if let Some(dsi) = finite("dsi", self.dsi)? {
            gene = gene.with_dsi(dsi);
        }
        if let Some(dpi) = finite("dpi", self.dpi)? {
            gene = gene.with_dpi(dpi);
        }
        Ok(gene)
    }

    /// Returns the score of the association, if the row has one
    ///
    /// # Errors
    ///
    /// The score is `NaN` or infinite
    pub fn score(&self) -> VibeResult<Option<f64>> {
        finite("score", self.score)
    }

    /// Returns the [`Disease`] of the association
    ///
    /// # Errors
    ///
    /// The disease id is invalid or does not match the disease URI
    pub fn disease(&self) -> VibeResult<Disease> {
        let id = DiseaseId::try_from(self.disease_id.as_str())?;
        if DiseaseId::from_uri(&self.disease)? != id {
            error!("Disease {} does not match {}", self.disease_id, self.disease);
            return Err(VibeError::InvalidInput(format!(
                "disease id {} does not match {}",
                self.disease_id, self.disease
            )));
        }
        Ok(Disease::new(id, &self.disease_title))
    }

    /// Returns the reporting [`Source`]
    ///
    /// The returned source is not checked against any catalog.
    pub fn source(&self) -> VibeResult<Source> {
        Source::try_from(self.source.as_str())
    }

    /// Returns the citation, if the row has one
    pub fn evidence(&self) -> VibeResult<Option<PubmedEvidence>> {
        self.evidence
            .as_deref()
            .map(|uri| PubmedEvidence::try_new(uri, self.evidence_year))
            .transpose()
    }
}

fn finite(column: &str, value: Option<f64>) -> VibeResult<Option<f64>> {
    match value {
        Some(value) if !value.is_finite() => {
            error!("Invalid {} value {}", column, value);
            Err(VibeError::InvalidInput(format!("{column} is not a number: {value}")))
        }
        _ => Ok(value),
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::PrefixedId;

    fn sample_row() -> AssociationRow {
        AssociationRow {
            gene: "http://identifiers.org/ncbigene/2".to_string(),
            gene_id: "ncbigene:2".to_string(),
            gene_title: "alpha-2-macroglobulin".to_string(),
            gene_symbol: "A2M".to_string(),
            dsi: Some(0.529),
            dpi: None,
            disease: "http://linkedlifedata.com/resource/umls/id/C0002395".to_string(),
            disease_id: "umls:C0002395".to_string(),
            disease_title: "Alzheimer's Disease".to_string(),
            score: Some(0.4),
            source: "http://rdf.disgenet.org/v6.0.0/void/BEFREE".to_string(),
            evidence: Some("http://identifiers.org/pubmed/10441572".to_string()),
            evidence_year: Some(1999),
        }
    }

    #[test]
    fn typed_values() {
        let row = sample_row();
        let gene = row.gene().unwrap();
        assert_eq!(gene.id().as_u32(), 2);
        assert_eq!(gene.symbol(), "A2M");
        assert_eq!(gene.dsi(), Some(0.529));
        assert_eq!(gene.dpi(), None);

        let disease = row.disease().unwrap();
        assert_eq!(disease.id().code(), "C0002395");
        assert_eq!(disease.name(), "Alzheimer's Disease");

        assert_eq!(row.source().unwrap().name(), "BEFREE");
        let evidence = row.evidence().unwrap().unwrap();
        assert_eq!(evidence.pubmed_id(), "10441572");
        assert_eq!(evidence.year(), Some(1999));
    }

    #[test]
    fn without_evidence() {
        let mut row = sample_row();
        row.evidence = None;
        assert!(row.evidence().unwrap().is_none());
    }

    #[test]
    fn mismatching_uri() {
        let mut row = sample_row();
        row.gene = "http://identifiers.org/ncbigene/3".to_string();
        assert!(matches!(row.gene(), Err(VibeError::InvalidInput(_))));

        let mut row = sample_row();
        row.disease = "http://purl.obolibrary.org/obo/HP_0002395".to_string();
        assert!(matches!(row.disease(), Err(VibeError::InvalidUri(_))));
    }

    #[test]
    fn non_finite_values() {
        let mut row = sample_row();
        row.score = Some(f64::NAN);
        assert!(matches!(row.score(), Err(VibeError::InvalidInput(_))));
        assert!(row.gene().is_ok());

        let mut row = sample_row();
        row.dsi = Some(f64::INFINITY);
        assert!(matches!(row.gene(), Err(VibeError::InvalidInput(_))));

        let mut row = sample_row();
        row.dpi = Some(f64::NAN);
        assert!(matches!(row.gene(), Err(VibeError::InvalidInput(_))));

        assert_eq!(sample_row().score().unwrap(), Some(0.4));
        row.score = None;
        assert_eq!(row.score().unwrap(), None);
    }
}
