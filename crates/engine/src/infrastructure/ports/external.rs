//! External service port traits (live stock feed, failure log).

use async_trait::async_trait;

use super::error::StockFeedError;

// =============================================================================
// Live Stock Feed
// =============================================================================

/// Port for the remote live-stock endpoint.
///
/// One call per availability check, no retries. Any transport or format
/// problem is an error here; deciding what a failure means (fail open) is
/// the caller's business.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StockFeedPort: Send + Sync {
    /// Current stock count for the product. May be zero or negative.
    async fn fetch_live_stock(&self, product_number: &str) -> Result<i64, StockFeedError>;
}

// =============================================================================
// Critical Failure Log
// =============================================================================

/// Operator-facing log surface for stock feed failures.
///
/// Called once per field (request target, response body, product number) so
/// tests can assert exactly what reaches operators. Feed failures are the
/// only events that go through this port; everything else uses `tracing`
/// directly.
#[cfg_attr(test, mockall::automock)]
pub trait FailureLogPort: Send + Sync {
    fn critical(&self, entry: &str);
}
