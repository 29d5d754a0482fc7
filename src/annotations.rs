//! Genes, diseases, phenotypes and the provenance of their associations
//!
//! This module contains the value types of the crate:
//! - [`Gene`]s, [`Disease`]s and [`Phenotype`]s are identified by a prefixed
//!   identifier (e.g. `umls:C0123456`) that maps 1:1 onto a canonical URI.
//! - [`Source`]s are the datasets that report gene-disease associations.
//! - [`PubmedEvidence`] is a literature citation supporting a source's claim.
//!
//! All prefixed identifiers share the same validation rules, see [`PrefixedId`].

mod disease;
mod evidence;
mod gene;
mod namespace;
mod phenotype;
mod source;

use core::fmt::Debug;
use core::hash::Hash;
use std::fmt::Display;

pub use disease::{Disease, DiseaseId};
pub use evidence::PubmedEvidence;
pub use gene::{Gene, GeneId};
pub use phenotype::Phenotype;
pub use source::Source;

/// All identifiers with a `<prefix>:<code>` textual form and a canonical URI
///
/// The textual form accepts the prefix either fully lowercase or fully
/// uppercase (`umls:` or `UMLS:`), every other casing fails with
/// [`VibeError::InvalidFormat`](`crate::VibeError::InvalidFormat`).
///
/// Constructing from a URI requires the exact namespace of the identifier,
/// otherwise it fails with [`VibeError::InvalidUri`](`crate::VibeError::InvalidUri`).
///
/// Both forms of the same identifier compare equal, hash identically and
/// sort by the numeric value of the code.
pub trait PrefixedId:
    Clone + Copy + Debug + Hash + PartialEq + PartialOrd + Eq + Ord + Display + for<'a> TryFrom<&'a str>
{
    /// Returns the raw code without prefix, e.g. `C0123456`
    fn code(&self) -> String;

    /// Returns the canonical `prefix:code` form, e.g. `umls:C0123456`
    fn formatted_id(&self) -> String;

    /// Returns the canonical namespace URI
    fn uri(&self) -> String;

    /// Returns the integer representation of the code
    fn as_u32(&self) -> u32;
}
