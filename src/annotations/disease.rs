use std::fmt::Display;
use std::hash::Hash;

use crate::annotations::namespace::Namespace;
use crate::annotations::PrefixedId;
use crate::{VibeError, VibeResult};

const UMLS: Namespace = Namespace::new(
    "umls",
    "http://linkedlifedata.com/resource/umls/id/",
    "C",
    Some(7),
);

/// A unique identifier for a [`Disease`], the UMLS concept unique identifier
///
/// # Examples
///
/// ```
/// use vibe::annotations::DiseaseId;
/// use vibe::PrefixedId;
///
/// let id = DiseaseId::try_from("UMLS:C0123456").unwrap();
/// assert_eq!(id.code(), "C0123456");
/// assert_eq!(id.formatted_id(), "umls:C0123456");
/// assert_eq!(id.uri(), "http://linkedlifedata.com/resource/umls/id/C0123456");
///
/// let from_uri = DiseaseId::from_uri("http://linkedlifedata.com/resource/umls/id/C0123456").unwrap();
/// assert_eq!(id, from_uri);
/// ```
#[derive(Clone, Copy, Default, Debug, Hash, PartialEq, PartialOrd, Eq, Ord)]
pub struct DiseaseId {
    inner: u32,
}

impl DiseaseId {
    /// Constructs a [`DiseaseId`] from its canonical URI
    ///
    /// # Errors
    ///
    /// [`VibeError::InvalidUri`] if the URI is not a UMLS concept URI
    pub fn from_uri(uri: &str) -> VibeResult<Self> {
        Ok(DiseaseId {
            inner: UMLS.parse_uri(uri)?,
        })
    }
}

impl PrefixedId for DiseaseId {
    fn code(&self) -> String {
        UMLS.code(self.inner)
    }

    fn formatted_id(&self) -> String {
        UMLS.formatted_id(self.inner)
    }

    fn uri(&self) -> String {
        UMLS.uri(self.inner)
    }

    fn as_u32(&self) -> u32 {
        self.inner
    }
}

impl TryFrom<&str> for DiseaseId {
    type Error = VibeError;
    /// Parses `umls:C0123456` or `UMLS:C0123456`
    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Ok(DiseaseId {
            inner: UMLS.parse_id(value)?,
        })
    }
}

impl From<u32> for DiseaseId {
    fn from(inner: u32) -> Self {
        DiseaseId { inner }
    }
}

impl Display for DiseaseId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.formatted_id())
    }
}

/// A single disease
///
/// A disease has a unique [`DiseaseId`] and a name. Equality, hashing and
/// ordering only consider the id.
#[derive(Default, Debug, Clone)]
pub struct Disease {
    id: DiseaseId,
    name: String,
}

impl Disease {
    /// Initializes a new Disease
    pub fn new(id: DiseaseId, name: &str) -> Disease {
        Disease {
            id,
            name: name.to_string(),
        }
    }

    /// The unique [`DiseaseId`] of the disease
    pub fn id(&self) -> &DiseaseId {
        &self.id
    }

    /// The name of the disease
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl PartialEq for Disease {
    fn eq(&self, other: &Disease) -> bool {
        self.id == other.id
    }
}
impl Eq for Disease {}

impl Hash for Disease {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl PartialOrd for Disease {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Disease {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.id.cmp(&other.id)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    const URI: &str = "http://linkedlifedata.com/resource/umls/id/C0123456";

    fn assert_valid(id: DiseaseId) {
        assert_eq!(id.code(), "C0123456");
        assert_eq!(id.formatted_id(), "umls:C0123456");
        assert_eq!(id.uri(), URI);
    }

    #[test]
    fn lowercase_prefix() {
        assert_valid(DiseaseId::try_from("umls:C0123456").unwrap());
    }

    #[test]
    fn uppercase_prefix() {
        assert_valid(DiseaseId::try_from("UMLS:C0123456").unwrap());
    }

    #[test]
    fn single_uppercase_letter_in_prefix() {
        assert!(matches!(
            DiseaseId::try_from("Umls:C0123456"),
            Err(VibeError::InvalidFormat(_))
        ));
        assert!(matches!(
            DiseaseId::try_from("uMls:C0123456"),
            Err(VibeError::InvalidFormat(_))
        ));
    }

    #[test]
    fn invalid_prefix() {
        assert!(matches!(
            DiseaseId::try_from("ulms:C0123456"),
            Err(VibeError::InvalidFormat(_))
        ));
    }

    #[test]
    fn missing_prefix() {
        assert!(matches!(
            DiseaseId::try_from("C0123456"),
            Err(VibeError::InvalidFormat(_))
        ));
    }

    #[test]
    fn uri_as_id() {
        assert!(matches!(
            DiseaseId::try_from(URI),
            Err(VibeError::InvalidFormat(_))
        ));
    }

    #[test]
    fn valid_uri() {
        assert_valid(DiseaseId::from_uri(URI).unwrap());
    }

    #[test]
    fn invalid_uri() {
        assert!(matches!(
            DiseaseId::from_uri("http://linkedlifedata.com/resource/umls/C0123456"),
            Err(VibeError::InvalidUri(_))
        ));
    }

    #[test]
    fn sort_numerically() {
        let mut diseases: Vec<Disease> = ["umls:C0000020", "umls:C0000003", "umls:C0000008", "umls:C0000001"]
            .iter()
            .map(|id| Disease::new(DiseaseId::try_from(*id).unwrap(), ""))
            .collect();
        diseases.sort();

        let ids: Vec<String> = diseases.iter().map(|d| d.id().code()).collect();
        assert_eq!(ids, ["C0000001", "C0000003", "C0000008", "C0000020"]);
    }

    #[test]
    fn id_and_uri_are_equal() {
        let from_id = Disease::new(DiseaseId::try_from("umls:C0123456").unwrap(), "a");
        let from_uri = Disease::new(DiseaseId::from_uri(URI).unwrap(), "b");
        assert_eq!(from_id, from_uri);

        let other = Disease::new(DiseaseId::try_from("umls:C9874565").unwrap(), "a");
        assert_ne!(from_id, other);
    }
}
