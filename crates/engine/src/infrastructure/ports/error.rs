//! Error types for port operations.

/// Repository operation errors with context for debugging.
#[derive(Debug, thiserror::Error)]
pub enum RepoError {
    /// Entity not found - includes entity type and ID for actionable error messages.
    #[error("{entity_type} not found: {id}")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },

    /// Database operation failed - includes operation name for tracing.
    #[error("Database error in {operation}: {message}")]
    Database {
        operation: &'static str,
        message: String,
    },

    /// Serialization/deserialization failed.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl RepoError {
    /// Create a NotFound error with entity type and ID context.
    pub fn not_found(entity_type: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            entity_type,
            id: id.to_string(),
        }
    }

    /// Create a Database error with operation context.
    pub fn database(operation: &'static str, message: impl ToString) -> Self {
        Self::Database {
            operation,
            message: message.to_string(),
        }
    }

    /// Create a Serialization error.
    pub fn serialization(message: impl ToString) -> Self {
        Self::Serialization(message.to_string())
    }

    /// Check if this is a NotFound error.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// Errors from the live stock feed.
///
/// Both variants keep the request target (and the body where one was read)
/// so the fail-open path can log them field by field.
#[derive(Debug, Clone, thiserror::Error)]
pub enum StockFeedError {
    #[error("stock feed request to {url} failed: {message}")]
    Transport { url: String, message: String },

    #[error("stock feed at {url} returned a non-numeric body: {body:?}")]
    MalformedBody { url: String, body: String },
}

impl StockFeedError {
    /// The request target that failed.
    pub fn target(&self) -> &str {
        match self {
            Self::Transport { url, .. } | Self::MalformedBody { url, .. } => url,
        }
    }

    /// The response body, where one was read before the failure.
    pub fn body(&self) -> Option<&str> {
        match self {
            Self::Transport { .. } => None,
            Self::MalformedBody { body, .. } => Some(body),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transport_error_has_target_but_no_body() {
        let err = StockFeedError::Transport {
            url: "http://stock.example/SW10002".into(),
            message: "connection refused".into(),
        };
        assert_eq!(err.target(), "http://stock.example/SW10002");
        assert!(err.body().is_none());
    }

    #[test]
    fn test_malformed_body_error_keeps_body() {
        let err = StockFeedError::MalformedBody {
            url: "http://stock.example/SW10002".into(),
            body: "<html>maintenance</html>".into(),
        };
        assert_eq!(err.body(), Some("<html>maintenance</html>"));
    }

    #[test]
    fn test_repo_not_found_helper() {
        let err = RepoError::not_found("BasketLine", "abc");
        assert!(err.is_not_found());
        assert!(err.to_string().contains("BasketLine"));
    }
}
