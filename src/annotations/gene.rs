use std::fmt::Display;
use std::hash::Hash;

use crate::annotations::namespace::Namespace;
use crate::annotations::PrefixedId;
use crate::{VibeError, VibeResult};

const NCBI_GENE: Namespace =
    Namespace::new("ncbigene", "http://identifiers.org/ncbigene/", "", None);

/// A unique identifier for a [`Gene`], the NCBI Gene ID
///
/// # Examples
///
/// ```
/// use vibe::annotations::GeneId;
/// use vibe::PrefixedId;
///
/// let id = GeneId::try_from("ncbigene:1312").unwrap();
/// assert_eq!(id.as_u32(), 1312);
/// assert_eq!(id.uri(), "http://identifiers.org/ncbigene/1312");
/// ```
#[derive(Clone, Copy, Default, Debug, Hash, PartialEq, PartialOrd, Eq, Ord)]
pub struct GeneId {
    inner: u32,
}

impl GeneId {
    /// Constructs a [`GeneId`] from its canonical URI
    ///
    /// # Errors
    ///
    /// [`VibeError::InvalidUri`] if the URI is not an NCBI gene URI
    pub fn from_uri(uri: &str) -> VibeResult<Self> {
        Ok(GeneId {
            inner: NCBI_GENE.parse_uri(uri)?,
        })
    }
}

impl PrefixedId for GeneId {
    fn code(&self) -> String {
        NCBI_GENE.code(self.inner)
    }

    fn formatted_id(&self) -> String {
        NCBI_GENE.formatted_id(self.inner)
    }

    fn uri(&self) -> String {
        NCBI_GENE.uri(self.inner)
    }

    fn as_u32(&self) -> u32 {
        self.inner
    }
}

impl TryFrom<&str> for GeneId {
    type Error = VibeError;
    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Ok(GeneId {
            inner: NCBI_GENE.parse_id(value)?,
        })
    }
}

impl From<u32> for GeneId {
    fn from(inner: u32) -> Self {
        GeneId { inner }
    }
}

impl Display for GeneId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.formatted_id())
    }
}

/// A single gene
///
/// A gene has a unique [`GeneId`], a symbol, a name and optionally the
/// precomputed Disease Specificity Index (DSI) and Disease Pleiotropy
/// Index (DPI). Equality, hashing and ordering only consider the id.
#[derive(Default, Debug, Clone)]
pub struct Gene {
    id: GeneId,
    symbol: String,
    name: String,
    dsi: Option<f64>,
    dpi: Option<f64>,
}

impl Gene {
    /// Initializes a new Gene without DSI and DPI
    pub fn new(id: GeneId, symbol: &str, name: &str) -> Gene {
        Gene {
            id,
            symbol: symbol.to_string(),
            name: name.to_string(),
            dsi: None,
            dpi: None,
        }
    }

    /// Returns the gene with the given Disease Specificity Index
    #[must_use]
    pub fn with_dsi(mut self, dsi: f64) -> Gene {
        self.dsi = Some(dsi);
        self
    }

    /// Returns the gene with the given Disease Pleiotropy Index
    #[must_use]
    pub fn with_dpi(mut self, dpi: f64) -> Gene {
        self.dpi = Some(dpi);
        self
    }

    /// The unique [`GeneId`] of the gene
    pub fn id(&self) -> &GeneId {
        &self.id
    }

    /// The gene symbol, e.g. `A1BG`
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// The full name of the gene
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The Disease Specificity Index, if known
    pub fn dsi(&self) -> Option<f64> {
        self.dsi
    }

    /// The Disease Pleiotropy Index, if known
    pub fn dpi(&self) -> Option<f64> {
        self.dpi
    }
}

impl PartialEq for Gene {
    fn eq(&self, other: &Gene) -> bool {
        self.id == other.id
    }
}
impl Eq for Gene {}

impl Hash for Gene {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl PartialOrd for Gene {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Gene {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.id.cmp(&other.id)
    }
}
