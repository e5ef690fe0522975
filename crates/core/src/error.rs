//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Keep this focused on deterministic, business/domain failures. Every
/// variant carries a short human-readable string for logging/display;
/// callers map these onto their own transport-level responses.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// The actor lacks the role required for the requested mutation.
    /// Terminal for the call; never retried, never downgraded to partial
    /// success.
    #[error("forbidden: {0}")]
    Forbidden(String),

    /// A referenced entity (user, tenant record) does not exist. Absent
    /// *configuration* is not an error and falls back to defaults instead.
    #[error("not found: {0}")]
    NotFound(String),

    /// A value failed validation (e.g. malformed input, duplicate entry).
    #[error("validation failed: {0}")]
    Validation(String),

    /// An identifier was invalid (e.g. parse failure).
    #[error("invalid identifier: {0}")]
    InvalidId(String),
}

impl DomainError {
    pub fn forbidden(msg: impl Into<String>) -> Self {
        Self::Forbidden(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }

    /// Whether this error is an authorization rejection.
    pub fn is_forbidden(&self) -> bool {
        matches!(self, Self::Forbidden(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn forbidden_carries_its_message() {
        let err = DomainError::forbidden("only administrators can update permissions");
        assert!(err.is_forbidden());
        assert_eq!(
            err.to_string(),
            "forbidden: only administrators can update permissions"
        );
    }

    #[test]
    fn not_found_is_not_forbidden() {
        let err = DomainError::not_found("user does not exist in tenant");
        assert!(!err.is_forbidden());
        assert!(err.to_string().starts_with("not found:"));
    }
}
