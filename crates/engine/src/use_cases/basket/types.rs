//! Shared types for basket use cases.

use stockgate_domain::{BasketLine, StockDecision};

/// Result of an add-to-basket attempt.
#[derive(Debug, Clone)]
pub struct AddItemOutcome {
    /// Whether a line was written.
    pub added: bool,
    /// The inserted or incremented line, when one was written.
    pub line: Option<BasketLine>,
    /// The availability decision that was applied.
    pub decision: StockDecision,
}

impl AddItemOutcome {
    /// Rendered notice for the response surface, if any.
    pub fn message(&self) -> Option<String> {
        self.decision.message()
    }
}
