use tracing::debug;

use crate::{VibeError, VibeResult};

/// The textual prefix and URI namespace of one kind of identifier
///
/// Codes consist of an optional fixed letter prefix followed by digits,
/// e.g. `C0123456` for UMLS or `0000118` for HPO. If `width` is set, the
/// digits must have exactly that length, otherwise leading zeros are rejected
/// so that every code has a single textual form.
#[derive(Debug)]
pub(crate) struct Namespace {
    prefix: &'static str,
    uri: &'static str,
    code_prefix: &'static str,
    width: Option<usize>,
}

impl Namespace {
    pub(crate) const fn new(
        prefix: &'static str,
        uri: &'static str,
        code_prefix: &'static str,
        width: Option<usize>,
    ) -> Self {
        Self {
            prefix,
            uri,
            code_prefix,
            width,
        }
    }

    /// Parses `<prefix>:<code>` and returns the numeric value of the code
    ///
    /// # Errors
    ///
    /// [`VibeError::InvalidFormat`] if the prefix is missing, mixed-case or
    /// wrong, or if the code is malformed
    pub(crate) fn parse_id(&self, value: &str) -> VibeResult<u32> {
        let Some((prefix, code)) = value.split_once(':') else {
            debug!("Identifier {} has no prefix", value);
            return Err(VibeError::InvalidFormat(value.to_string()));
        };
        if prefix != self.prefix && prefix != self.prefix.to_uppercase() {
            debug!("Identifier {} must start with {}:", value, self.prefix);
            return Err(VibeError::InvalidFormat(value.to_string()));
        }
        self.parse_code(code)
            .ok_or_else(|| VibeError::InvalidFormat(value.to_string()))
    }

    /// Parses a namespace URI and returns the numeric value of the code
    ///
    /// # Errors
    ///
    /// [`VibeError::InvalidUri`] if the URI is outside of the namespace or
    /// its trailing segment is not a valid code
    pub(crate) fn parse_uri(&self, uri: &str) -> VibeResult<u32> {
        uri.strip_prefix(self.uri)
            .and_then(|code| self.parse_code(code))
            .ok_or_else(|| {
                debug!("URI {} is not part of {}", uri, self.uri);
                VibeError::InvalidUri(uri.to_string())
            })
    }

    fn parse_code(&self, code: &str) -> Option<u32> {
        let digits = code.strip_prefix(self.code_prefix)?;
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        match self.width {
            Some(width) if digits.len() != width => return None,
            None if digits.len() > 1 && digits.starts_with('0') => return None,
            _ => (),
        }
        digits.parse::<u32>().ok()
    }

    pub(crate) fn code(&self, value: u32) -> String {
        match self.width {
            Some(width) => format!("{}{:0width$}", self.code_prefix, value, width = width),
            None => format!("{}{}", self.code_prefix, value),
        }
    }

    pub(crate) fn formatted_id(&self, value: u32) -> String {
        format!("{}:{}", self.prefix, self.code(value))
    }

    pub(crate) fn uri(&self, value: u32) -> String {
        format!("{}{}", self.uri, self.code(value))
    }
}
