//! Aggregation of raw gene-disease association records
//!
//! Association records arrive one by one and can refer to the same gene-disease
//! pair many times, e.g. once per source and citation. They are folded into
//! unique [`GeneDiseaseCombination`]s that are owned by a [`GeneDiseaseCollection`].

mod collection;
mod combination;

pub use collection::GeneDiseaseCollection;
pub use combination::{CombinationKey, EvidenceSet, GeneDiseaseCombination};
