//! Port traits for infrastructure boundaries.
//!
//! These are the ONLY abstractions in the engine. Everything else is concrete types.
//! Ports exist for:
//! - Basket storage (could swap SQLite -> Postgres)
//! - The live stock feed (could swap HTTP -> message bus)
//! - The critical-failure log surface (recorded per field, injectable for tests)
//! - Clock (for testing)

mod error;
mod external;
mod repos;
mod testing;

// =============================================================================
// Repository Ports
// =============================================================================
pub use repos::BasketRepo;

// =============================================================================
// External Service Ports
// =============================================================================
pub use external::{FailureLogPort, StockFeedPort};

// =============================================================================
// Test-Only Mocks (only available during test builds)
// =============================================================================
#[cfg(test)]
pub use external::{MockFailureLogPort, MockStockFeedPort};

#[cfg(test)]
pub use repos::MockBasketRepo;

#[cfg(test)]
pub use testing::MockClockPort;

// =============================================================================
// Testing Ports
// =============================================================================
pub use testing::ClockPort;

// =============================================================================
// Error Types
// =============================================================================
pub use error::{RepoError, StockFeedError};
