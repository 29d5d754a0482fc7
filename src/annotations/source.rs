use std::fmt::Display;

use tracing::debug;
use url::Url;

use crate::{VibeError, VibeResult};

/// A dataset that reports gene-disease associations
///
/// Sources are identified by their URI only, e.g.
/// `http://rdf.disgenet.org/v6.0.0/void/ORPHANET`
#[derive(Clone, Debug, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct Source {
    uri: Url,
}

impl Source {
    /// Constructs a new `Source`
    pub fn new(uri: Url) -> Self {
        Self { uri }
    }

    /// The URI of the source
    pub fn uri(&self) -> &Url {
        &self.uri
    }

    /// A short name of the source, the trailing segment of the URI
    ///
    /// # Examples
    ///
    /// ```
    /// use vibe::annotations::Source;
    ///
    /// let source = Source::try_from("http://rdf.disgenet.org/v6.0.0/void/ORPHANET").unwrap();
    /// assert_eq!(source.name(), "ORPHANET");
    /// ```
    pub fn name(&self) -> &str {
        trailing_segment(&self.uri)
    }
}

impl TryFrom<&str> for Source {
    type Error = VibeError;
    fn try_from(value: &str) -> VibeResult<Self> {
        Ok(Self::new(parse_uri(value)?))
    }
}

impl Display for Source {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.uri)
    }
}

/// Parses an absolute URI
pub(crate) fn parse_uri(value: &str) -> VibeResult<Url> {
    Url::parse(value).map_err(|err| {
        debug!("Unable to parse URI {}: {}", value, err);
        VibeError::InvalidUri(value.to_string())
    })
}

/// Returns the last non-empty path segment, or the full URI if there is none
pub(crate) fn trailing_segment(uri: &Url) -> &str {
    uri.path_segments()
        .and_then(|segments| segments.filter(|s| !s.is_empty()).last())
        .unwrap_or_else(|| uri.as_str())
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn equality_by_uri() {
        let a = Source::try_from("http://rdf.disgenet.org/v6.0.0/void/ORPHANET").unwrap();
        let b = Source::try_from("http://rdf.disgenet.org/v6.0.0/void/ORPHANET").unwrap();
        let c = Source::try_from("http://rdf.disgenet.org/v6.0.0/void/BEFREE").unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert!(c < a);
    }

    #[test]
    fn invalid_uri() {
        assert!(matches!(
            Source::try_from("ORPHANET"),
            Err(VibeError::InvalidUri(_))
        ));
    }

    #[test]
    fn name_with_trailing_slash() {
        let source = Source::try_from("http://rdf.disgenet.org/v6.0.0/void/CTD_human/").unwrap();
        assert_eq!(source.name(), "CTD_human");
    }
}
