//! Add item use case.
//!
//! Runs the availability check and explicitly applies its decision: write a
//! basket line when allowed, hand back the notice when not.

use std::sync::Arc;

use stockgate_domain::availability::StockQuery;
use stockgate_domain::common::none_if_empty;
use stockgate_domain::{BasketLine, DomainError, ProductNumber};

use crate::infrastructure::ports::{BasketRepo, ClockPort};

use super::check_availability::CheckAvailability;
use super::error::BasketError;
use super::types::AddItemOutcome;

/// Add item use case.
///
/// Orchestrates: input validation, availability check, line insert or
/// increment. A session holds one active line per product, so re-adding a
/// product grows the existing line.
pub struct AddItem {
    check: Arc<CheckAvailability>,
    basket: Arc<dyn BasketRepo>,
    clock: Arc<dyn ClockPort>,
}

impl AddItem {
    pub fn new(
        check: Arc<CheckAvailability>,
        basket: Arc<dyn BasketRepo>,
        clock: Arc<dyn ClockPort>,
    ) -> Self {
        Self {
            check,
            basket,
            clock,
        }
    }

    /// Execute the add-to-basket flow.
    ///
    /// # Returns
    /// * `Ok(outcome)` - the applied decision; `outcome.added` tells whether
    ///   a line was written
    /// * `Err(BasketError)` - invalid input or a storage failure on the
    ///   write path
    pub async fn execute(
        &self,
        session_key: &str,
        product_number: &str,
        quantity: i64,
    ) -> Result<AddItemOutcome, BasketError> {
        let product = ProductNumber::parse(product_number)?;
        let session_key = none_if_empty(session_key.trim())
            .ok_or_else(|| DomainError::validation("session key cannot be empty"))?;

        let query = StockQuery::new(product.as_str(), quantity, session_key);
        let decision = self.check.execute(&query).await;

        if !decision.allowed {
            return Ok(AddItemOutcome {
                added: false,
                line: None,
                decision,
            });
        }

        let line = match self.basket.find_active_line(&product, session_key).await? {
            Some(mut line) => {
                line.increment(quantity);
                self.basket.set_quantity(line.id, line.quantity).await?;
                line
            }
            None => {
                let line = BasketLine::new(session_key, product, quantity, self.clock.now());
                self.basket.insert_line(&line).await?;
                line
            }
        };

        tracing::info!(
            line_id = %line.id,
            product_number = %line.product_number,
            quantity = line.quantity,
            "Added product to basket"
        );

        Ok(AddItemOutcome {
            added: true,
            line: Some(line),
            decision,
        })
    }
}
