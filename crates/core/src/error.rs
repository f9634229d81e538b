//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Keep this focused on deterministic business failures (bad identifiers,
/// bad prices, blocked removals). File and serialization failures belong to
/// the storage layer.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// An identifier was invalid (negative, duplicated, or mismatched).
    #[error("invalid identifier: {0}")]
    InvalidId(String),

    /// A price or order total was invalid (e.g. negative).
    #[error("invalid price: {0}")]
    InvalidPrice(String),

    /// A removal was refused because a live order still depends on the target.
    #[error("dependency exists: {0}")]
    DependencyExists(String),

    /// A value failed validation (e.g. zero order quantity).
    #[error("validation failed: {0}")]
    Validation(String),
}

impl DomainError {
    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }

    pub fn invalid_price(msg: impl Into<String>) -> Self {
        Self::InvalidPrice(msg.into())
    }

    pub fn dependency_exists(msg: impl Into<String>) -> Self {
        Self::DependencyExists(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Whether this error belongs to the invalid-identifier family.
    ///
    /// Dependency-blocked removals are reported as an identifier problem to
    /// callers that only distinguish ids from prices.
    pub fn is_invalid_id(&self) -> bool {
        matches!(self, Self::InvalidId(_) | Self::DependencyExists(_))
    }

    pub fn is_invalid_price(&self) -> bool {
        matches!(self, Self::InvalidPrice(_))
    }
}
