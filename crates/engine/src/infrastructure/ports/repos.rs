//! Repository port traits for basket storage.

use async_trait::async_trait;
use stockgate_domain::{BasketLine, BasketLineId, ProductNumber};

use super::error::RepoError;

/// Storage for basket lines.
///
/// Removed lines (mode flag) stay in storage but are invisible to every
/// method here except the raw insert/update primitives.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BasketRepo: Send + Sync {
    /// Sum of active-line quantities for this product in this session.
    /// Returns 0 when nothing matches.
    async fn held_quantity(
        &self,
        product_number: &str,
        session_key: &str,
    ) -> Result<i64, RepoError>;

    /// The active line for (session, product), if one exists.
    async fn find_active_line(
        &self,
        product_number: &ProductNumber,
        session_key: &str,
    ) -> Result<Option<BasketLine>, RepoError>;

    /// Insert a new line.
    async fn insert_line(&self, line: &BasketLine) -> Result<(), RepoError>;

    /// Overwrite the quantity of an existing line.
    async fn set_quantity(&self, id: BasketLineId, quantity: i64) -> Result<(), RepoError>;

    /// All active lines of a session, oldest first.
    async fn list_lines(&self, session_key: &str) -> Result<Vec<BasketLine>, RepoError>;

    /// Flip a line to removed. Errors with NotFound when no active line has
    /// this id in this session.
    async fn mark_removed(&self, session_key: &str, id: BasketLineId) -> Result<(), RepoError>;
}
