//! Basket operation errors.

use crate::infrastructure::ports::RepoError;
use stockgate_domain::DomainError;

/// Errors that can occur during basket operations.
///
/// Stock feed failures never show up here: the availability check fails open
/// and always yields a decision.
#[derive(Debug, thiserror::Error)]
pub enum BasketError {
    #[error("Validation error: {0}")]
    Validation(#[from] DomainError),
    #[error("Repository error: {0}")]
    Repo(#[from] RepoError),
}
