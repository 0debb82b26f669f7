//! Basket line entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::BasketLineId;
use crate::value_objects::{LineMode, ProductNumber};

/// One product position in a session's basket.
///
/// A session holds at most one active line per product number; adding the
/// same product again increments the existing line instead of creating a
/// second one. Removal flips the mode flag rather than deleting the row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BasketLine {
    pub id: BasketLineId,
    pub session_key: String,
    pub product_number: ProductNumber,
    pub quantity: i64,
    pub mode: LineMode,
    pub added_at: DateTime<Utc>,
}

impl BasketLine {
    /// Create a new active line. Quantity is clamped to a minimum of 1.
    pub fn new(
        session_key: impl Into<String>,
        product_number: ProductNumber,
        quantity: i64,
        added_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: BasketLineId::new(),
            session_key: session_key.into(),
            product_number,
            quantity: quantity.max(1),
            mode: LineMode::Active,
            added_at,
        }
    }

    /// Add more units to this line. The increment is clamped to a minimum of 1.
    pub fn increment(&mut self, quantity: i64) {
        self.quantity += quantity.max(1);
    }

    /// Whether this line counts toward the session's held quantity.
    pub fn is_counted(&self) -> bool {
        self.mode.is_counted()
    }
}
