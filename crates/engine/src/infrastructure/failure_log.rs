//! Critical-failure log backed by `tracing`.

use crate::infrastructure::ports::FailureLogPort;

/// Emits one error-level event per logged field.
pub struct TracingFailureLog;

impl TracingFailureLog {
    pub fn new() -> Self {
        Self
    }
}

impl Default for TracingFailureLog {
    fn default() -> Self {
        Self::new()
    }
}

impl FailureLogPort for TracingFailureLog {
    fn critical(&self, entry: &str) {
        tracing::error!(%entry, "stock feed critical failure");
    }
}
