use thiserror::Error;

use matamazon_core::DomainError;

/// Failures surfaced by the catalog store and its file exports.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("catalog io failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to serialize orders: {0}")]
    Json(#[from] serde_json::Error),
}

impl CatalogError {
    /// The domain error, if this failure came from a business rule.
    pub fn as_domain(&self) -> Option<&DomainError> {
        match self {
            CatalogError::Domain(e) => Some(e),
            _ => None,
        }
    }
}
