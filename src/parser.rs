//! Parsing the phenotype ontology master data

/// Module to parse `hp.obo` files into a [`PhenotypeGraph`](`crate::PhenotypeGraph`)
pub mod hp_obo;
