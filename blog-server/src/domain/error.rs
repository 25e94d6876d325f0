use thiserror::Error;

#[derive(Debug, Error)]
pub(crate) enum DomainError {
    #[error("validation failed for '{field}': {message}")]
    Validation {
        field: &'static str,
        message: &'static str,
    },

    #[error("invalid post id: {0}")]
    InvalidId(String),

    #[error("resource not found: {0}")]
    NotFound(String),

    #[error("unexpected domain error: {0}")]
    Unexpected(String),
}
