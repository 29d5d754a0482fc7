use std::cmp::Ordering;
use std::fmt::Display;
use std::hash::Hash;

use url::Url;

use crate::annotations::source::{parse_uri, trailing_segment};
use crate::VibeResult;

/// A literature citation supporting a gene-disease association
///
/// The URI is the identifier of the citation, the publication year is
/// descriptive metadata. Equality and hashing therefore only consider the
/// URI; use [`PubmedEvidence::all_fields_eq`] to also compare the year.
///
/// # Examples
///
/// ```
/// use vibe::annotations::PubmedEvidence;
///
/// let a = PubmedEvidence::try_new("http://identifiers.org/pubmed/1", Some(2000)).unwrap();
/// let b = PubmedEvidence::try_new("http://identifiers.org/pubmed/1", Some(2020)).unwrap();
///
/// assert_eq!(a, b);
/// assert!(!a.all_fields_eq(&b));
/// assert_eq!(a.pubmed_id(), "1");
/// ```
#[derive(Clone, Debug)]
pub struct PubmedEvidence {
    uri: Url,
    year: Option<u16>,
}

impl PubmedEvidence {
    /// Constructs a new `PubmedEvidence`
    pub fn new(uri: Url, year: Option<u16>) -> Self {
        Self { uri, year }
    }

    /// Constructs a new `PubmedEvidence` from a URI string
    ///
    /// # Errors
    ///
    /// [`VibeError::InvalidUri`](`crate::VibeError::InvalidUri`) if `uri` is not a valid URI
    pub fn try_new(uri: &str, year: Option<u16>) -> VibeResult<Self> {
        Ok(Self::new(parse_uri(uri)?, year))
    }

    /// The URI of the citation
    pub fn uri(&self) -> &Url {
        &self.uri
    }

    /// The publication year, if known
    pub fn year(&self) -> Option<u16> {
        self.year
    }

    /// The PubMed identifier, the trailing segment of the URI
    pub fn pubmed_id(&self) -> &str {
        trailing_segment(&self.uri)
    }

    /// Compares URI **and** publication year
    pub fn all_fields_eq(&self, other: &PubmedEvidence) -> bool {
        self == other && self.year == other.year
    }

    /// Orders citations by the numeric value of their PubMed id
    ///
    /// Ids that are not numeric sort after all numeric ids, in lexical order.
    pub fn cmp_pubmed_id(&self, other: &PubmedEvidence) -> Ordering {
        let a = self.pubmed_id();
        let b = other.pubmed_id();
        match (a.parse::<u64>(), b.parse::<u64>()) {
            (Ok(x), Ok(y)) => x.cmp(&y).then_with(|| a.cmp(b)),
            (Ok(_), Err(_)) => Ordering::Less,
            (Err(_), Ok(_)) => Ordering::Greater,
            (Err(_), Err(_)) => a.cmp(b),
        }
    }
}

impl PartialEq for PubmedEvidence {
    fn eq(&self, other: &PubmedEvidence) -> bool {
        self.uri == other.uri
    }
}
impl Eq for PubmedEvidence {}

impl Hash for PubmedEvidence {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.uri.hash(state);
    }
}

impl Display for PubmedEvidence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.year {
            Some(year) => write!(f, "{} ({})", self.uri, year),
            None => write!(f, "{}", self.uri),
        }
    }
}
