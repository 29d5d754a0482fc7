use std::fmt::{Debug, Display};

use crate::annotations::namespace::Namespace;
use crate::annotations::PrefixedId;
use crate::{VibeError, VibeResult};

const HPO: Namespace = Namespace::new("hp", "http://purl.obolibrary.org/obo/HP_", "", Some(7));

/// A term of the Human Phenotype Ontology, e.g. `hp:0000118`
///
/// The phenotype only holds its identifier, all relations to other terms
/// are provided by an [`OntologyGraph`](`crate::OntologyGraph`).
///
/// # Examples
///
/// ```
/// use vibe::{Phenotype, PrefixedId};
///
/// let term = Phenotype::try_from("HP:0000118").unwrap();
/// assert_eq!(term.formatted_id(), "hp:0000118");
/// assert_eq!(term.uri(), "http://purl.obolibrary.org/obo/HP_0000118");
/// assert_eq!(term, Phenotype::from(118u32));
/// ```
#[derive(Copy, Clone, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Phenotype {
    inner: u32,
}

impl Phenotype {
    /// Constructs a [`Phenotype`] from its canonical PURL
    ///
    /// # Errors
    ///
    /// [`VibeError::InvalidUri`] if the URI is not an HPO term PURL
    pub fn from_uri(uri: &str) -> VibeResult<Self> {
        Ok(Phenotype {
            inner: HPO.parse_uri(uri)?,
        })
    }
}

impl PrefixedId for Phenotype {
    fn code(&self) -> String {
        HPO.code(self.inner)
    }

    fn formatted_id(&self) -> String {
        HPO.formatted_id(self.inner)
    }

    fn uri(&self) -> String {
        HPO.uri(self.inner)
    }

    fn as_u32(&self) -> u32 {
        self.inner
    }
}

impl TryFrom<&str> for Phenotype {
    type Error = VibeError;
    fn try_from(value: &str) -> VibeResult<Self> {
        Ok(Phenotype {
            inner: HPO.parse_id(value)?,
        })
    }
}

impl From<u32> for Phenotype {
    fn from(inner: u32) -> Self {
        Self { inner }
    }
}

impl Debug for Phenotype {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Phenotype({})", self)
    }
}

impl Display for Phenotype {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.formatted_id())
    }
}
