//! Stock availability decision policy.
//!
//! Pure functions: given the live stock figure and the quantity a buyer is
//! asking for (including what the basket already holds), decide whether the
//! add-to-basket action may proceed and which notice, if any, to show.
//! Fetching the inputs is the engine's job; nothing in here performs I/O.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One availability check request.
///
/// Built per call and discarded with the decision; nothing here is persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StockQuery {
    /// Opaque product code (e.g. `SW10002`). May be empty, in which case the
    /// check denies with [`ShortageNotice::ProductNotFound`] before any
    /// lookup happens.
    pub product_number: String,
    /// Units the buyer wants to add. Values below 1 are treated as 1.
    pub requested_quantity: i64,
    /// Basket scope of the caller. Empty means no held quantity is counted.
    pub session_key: String,
}

impl StockQuery {
    pub fn new(
        product_number: impl Into<String>,
        requested_quantity: i64,
        session_key: impl Into<String>,
    ) -> Self {
        Self {
            product_number: product_number.into(),
            requested_quantity,
            session_key: session_key.into(),
        }
    }
}

/// The notice shown to the buyer when an add-to-basket action is denied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShortageNotice {
    /// The product could not be identified (empty product code).
    ProductNotFound,
    /// Live stock is gone and the product is not restocked.
    OutOfStock,
    /// Live stock exists but is below the wanted quantity.
    InsufficientStock { in_stock: i64, requested: i64 },
}

impl fmt::Display for ShortageNotice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ProductNotFound => write!(f, "Product could not be found."),
            Self::OutOfStock => write!(
                f,
                "Unfortunately we can not deliver the desired product in sufficient quantity."
            ),
            Self::InsufficientStock {
                in_stock,
                requested,
            } => write!(
                f,
                "Unfortunately we can not deliver the desired product in sufficient quantity. \
                 (only {in_stock} of {requested} in stock)."
            ),
        }
    }
}

/// Outcome of one availability check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockDecision {
    pub allowed: bool,
    pub notice: Option<ShortageNotice>,
}

impl StockDecision {
    /// The add-to-basket action may proceed.
    pub fn allow() -> Self {
        Self {
            allowed: true,
            notice: None,
        }
    }

    /// The add-to-basket action is vetoed with the given notice.
    pub fn deny(notice: ShortageNotice) -> Self {
        Self {
            allowed: false,
            notice: Some(notice),
        }
    }

    /// Rendered notice text, if any.
    pub fn message(&self) -> Option<String> {
        self.notice.map(|n| n.to_string())
    }
}

/// Quantity the buyer effectively wants: the request (minimum 1) plus what
/// the basket already holds.
pub fn effective_quantity(requested: i64, held: i64) -> i64 {
    requested.max(1) + held
}

/// Decide availability from the live stock figure.
///
/// `last_known_stock` is a restock hint from the product record: a nonzero
/// value marks a product that will not be replenished once live stock runs
/// out. Current feeds never supply it, so callers pass `None` and the
/// out-of-stock branch stays dormant.
///
/// Evaluation order matters: the hard out-of-stock case wins over the
/// quantity comparison.
pub fn assess(live_stock: i64, last_known_stock: Option<i64>, effective: i64) -> StockDecision {
    if live_stock <= 0 && last_known_stock.is_some_and(|s| s != 0) {
        return StockDecision::deny(ShortageNotice::OutOfStock);
    }

    if live_stock < effective {
        return StockDecision::deny(ShortageNotice::InsufficientStock {
            in_stock: live_stock,
            requested: effective,
        });
    }

    StockDecision::allow()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_effective_quantity_clamps_request() {
        assert_eq!(effective_quantity(-2, 0), 1);
        assert_eq!(effective_quantity(0, 0), 1);
        assert_eq!(effective_quantity(1, 0), 1);
        assert_eq!(effective_quantity(3, 0), 3);
    }

    #[test]
    fn test_effective_quantity_adds_held() {
        assert_eq!(effective_quantity(3, 2), 5);
        assert_eq!(effective_quantity(0, 4), 5);
        assert_eq!(effective_quantity(-1, 4), 5);
    }

    #[test]
    fn test_sufficient_stock_allows() {
        let decision = assess(5, None, 2);
        assert!(decision.allowed);
        assert!(decision.message().is_none());
    }

    #[test]
    fn test_exact_stock_allows() {
        let decision = assess(5, None, 5);
        assert!(decision.allowed);
        assert!(decision.notice.is_none());
    }

    #[test]
    fn test_insufficient_stock_denies_with_both_figures() {
        let decision = assess(4, None, 5);
        assert!(!decision.allowed);
        let message = decision.message().expect("notice expected");
        assert!(message.contains('4'));
        assert!(message.contains('5'));
    }

    #[test]
    fn test_zero_stock_without_restock_hint_falls_through_to_shortage() {
        let decision = assess(0, None, 1);
        assert_eq!(
            decision.notice,
            Some(ShortageNotice::InsufficientStock {
                in_stock: 0,
                requested: 1
            })
        );
    }

    #[test]
    fn test_zero_stock_with_restock_hint_is_out_of_stock() {
        let decision = assess(0, Some(3), 1);
        assert!(!decision.allowed);
        assert_eq!(decision.notice, Some(ShortageNotice::OutOfStock));
    }

    #[test]
    fn test_negative_stock_with_zero_hint_is_shortage_not_out_of_stock() {
        let decision = assess(-1, Some(0), 2);
        assert_eq!(
            decision.notice,
            Some(ShortageNotice::InsufficientStock {
                in_stock: -1,
                requested: 2
            })
        );
    }

    #[test]
    fn test_notice_texts() {
        assert_eq!(
            ShortageNotice::ProductNotFound.to_string(),
            "Product could not be found."
        );
        assert_eq!(
            ShortageNotice::OutOfStock.to_string(),
            "Unfortunately we can not deliver the desired product in sufficient quantity."
        );
        let rendered = ShortageNotice::InsufficientStock {
            in_stock: 4,
            requested: 5,
        }
        .to_string();
        assert!(rendered.ends_with("(only 4 of 5 in stock)."));
    }
}
