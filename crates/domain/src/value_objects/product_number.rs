//! Product number value object.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// A stock-keeping product code (e.g. `SW10002`).
///
/// Product numbers are opaque to this system; the only invariant is that a
/// stored one is non-blank. Surrounding whitespace is trimmed on parse.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductNumber(String);

impl ProductNumber {
    /// Parse a raw product code, trimming whitespace.
    ///
    /// Returns a validation error when the trimmed code is empty.
    pub fn parse(raw: impl Into<String>) -> Result<Self, DomainError> {
        let trimmed = raw.into().trim().to_string();
        if trimmed.is_empty() {
            return Err(DomainError::validation("product number cannot be empty"));
        }
        Ok(Self(trimmed))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for ProductNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for ProductNumber {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
