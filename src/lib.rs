//! `vibe` retrieves gene-disease associations for a set of phenotypes and
//! prioritizes the genes
//!
//! The crate is organized as a linear pipeline:
//!
//! 1. The seed [`Phenotype`]s are expanded via the phenotype ontology
//!    ([`ontology::OntologyExpander`]).
//! 2. A [`query::QueryRunner`] streams raw association rows for the
//!    expanded phenotypes.
//! 3. The rows are folded into a [`GeneDiseaseCollection`] of unique
//!    gene-disease pairs ([`retriever::GenesForPhenotypeRetriever`]).
//! 4. The genes are ranked by a [`prioritize::Strategy`].
//!
//! # Examples
//!
//! ```
//! use vibe::annotations::{Disease, DiseaseId, Gene, GeneId, PubmedEvidence, Source};
//! use vibe::{GeneDiseaseCollection, GeneDiseaseCombination};
//! use vibe::prioritize::{Prioritizer, Strategy};
//!
//! let source = Source::try_from("http://rdf.disgenet.org/v6.0.0/void/ORPHANET").unwrap();
//! let gene = Gene::new(GeneId::from(1u32), "A1BG", "alpha-1-B glycoprotein");
//! let disease = Disease::new(DiseaseId::try_from("umls:C0123456").unwrap(), "Some disease");
//!
//! let mut collection = GeneDiseaseCollection::default();
//! let combination = collection
//!     .get_or_insert(GeneDiseaseCombination::new(gene, disease, Some(0.4)));
//! combination.add(&source);
//!
//! let ranking = Strategy::default().prioritize(&collection);
//! assert_eq!(ranking[0].symbol(), "A1BG");
//! ```
use thiserror::Error;

pub mod aggregate;
pub mod annotations;
pub mod ontology;
pub mod options;
pub mod output;
pub mod parser;
pub mod pipeline;
pub mod prioritize;
pub mod query;
pub mod retriever;

pub use aggregate::{GeneDiseaseCollection, GeneDiseaseCombination};
pub use annotations::{Phenotype, PrefixedId};
pub use ontology::{OntologyAlgorithm, OntologyExpander, OntologyGraph, PhenotypeGraph};

/// Main Error type for this crate
#[derive(Error, Debug)]
pub enum VibeError {
    /// A textual identifier does not follow the `<prefix>:<code>` rule
    #[error("invalid identifier format: {0}")]
    InvalidFormat(String),
    /// A URI does not belong to the expected namespace or cannot be parsed
    #[error("invalid URI: {0}")]
    InvalidUri(String),
    /// One or several configuration settings are missing or invalid
    #[error("invalid configuration:\n{}", .0.join("\n"))]
    Config(Vec<String>),
    /// An association row references a source that is not in the source catalog
    #[error("unknown source {0}: the dataset might be corrupt")]
    UnknownSource(String),
    /// The gene-disease combination is already part of the collection
    #[error("gene-disease combination {0} is already present")]
    DuplicateCombination(String),
    /// Failed to open or read a file
    #[error("unable to open file {0}")]
    CannotOpenFile(String),
    /// Failed to create or write an output file
    #[error("unable to write file {0}")]
    CannotWriteFile(String),
    /// Failed to parse a line of input data
    #[error("invalid data: {0}")]
    InvalidInput(String),
}

impl From<csv::Error> for VibeError {
    fn from(err: csv::Error) -> Self {
        VibeError::InvalidInput(err.to_string())
    }
}

/// Shortcut for `Result<T, VibeError>`
pub type VibeResult<T> = Result<T, VibeError>;
