//! Basket line mode flag.

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Mode flag on a basket line.
///
/// Removed lines stay in storage (stored as mode 1) but are excluded from
/// every quantity sum and listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LineMode {
    Active,
    Removed,
}

impl LineMode {
    /// The integer stored in the basket table.
    pub fn as_i64(self) -> i64 {
        match self {
            Self::Active => 0,
            Self::Removed => 1,
        }
    }

    /// Parse the stored integer back into a mode.
    pub fn from_i64(value: i64) -> Result<Self, DomainError> {
        match value {
            0 => Ok(Self::Active),
            1 => Ok(Self::Removed),
            other => Err(DomainError::parse(format!("unknown line mode: {other}"))),
        }
    }

    /// Whether this line counts toward held quantity.
    pub fn is_counted(self) -> bool {
        matches!(self, Self::Active)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_roundtrip() {
        for mode in [LineMode::Active, LineMode::Removed] {
            assert_eq!(LineMode::from_i64(mode.as_i64()).expect("valid mode"), mode);
        }
    }

    #[test]
    fn test_unknown_mode_rejected() {
        assert!(LineMode::from_i64(7).is_err());
    }

    #[test]
    fn test_only_active_lines_count() {
        assert!(LineMode::Active.is_counted());
        assert!(!LineMode::Removed.is_counted());
    }
}
