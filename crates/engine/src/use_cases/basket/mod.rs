//! Basket use cases.
//!
//! Availability checking and the basket edits that apply its decisions.

mod add_item;
mod check_availability;
mod error;
mod types;

pub use add_item::AddItem;
pub use check_availability::CheckAvailability;
pub use error::BasketError;
pub use types::AddItemOutcome;

use std::sync::Arc;

use stockgate_domain::{BasketLine, BasketLineId};

use crate::infrastructure::ports::{BasketRepo, RepoError};

/// Container for basket use cases.
pub struct BasketUseCases {
    pub check: Arc<CheckAvailability>,
    pub add: Arc<AddItem>,
    pub ops: Arc<BasketOps>,
}

impl BasketUseCases {
    pub fn new(check: Arc<CheckAvailability>, add: Arc<AddItem>, ops: Arc<BasketOps>) -> Self {
        Self { check, add, ops }
    }
}

/// Thin basket operations with no orchestration of their own.
pub struct BasketOps {
    basket: Arc<dyn BasketRepo>,
}

impl BasketOps {
    pub fn new(basket: Arc<dyn BasketRepo>) -> Self {
        Self { basket }
    }

    /// Active lines of a session, oldest first.
    pub async fn list_lines(&self, session_key: &str) -> Result<Vec<BasketLine>, RepoError> {
        self.basket.list_lines(session_key).await
    }

    /// Flip a line to removed. It stops counting toward held quantity.
    pub async fn remove_line(
        &self,
        session_key: &str,
        id: BasketLineId,
    ) -> Result<(), RepoError> {
        self.basket.mark_removed(session_key, id).await
    }
}
