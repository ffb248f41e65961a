//! # Catalog Error Types
//!
//! Error types for catalog and review operations.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  serde_json::Error / ValidationError / CoreError                       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  CatalogError (this module) ← Adds context and categorization          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ApiError (storefront) ← Serialized for the UI                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use flickd_core::{CoreError, ValidationError};
use thiserror::Error;

/// Catalog operation errors.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Seed data could not be parsed or is inconsistent.
    ///
    /// ## When This Occurs
    /// - Embedded JSON does not match the product/review schema
    /// - Two products share an id
    /// - A review or summary points at a product that does not exist
    #[error("Invalid seed data: {0}")]
    Seed(String),

    /// Entity not found in the catalog.
    ///
    /// ## When This Occurs
    /// - Product id not in the catalog
    /// - Review id not in the review store
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// Submitted input failed validation.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Business rule failure from flickd-core.
    #[error(transparent)]
    Core(CoreError),
}

impl CatalogError {
    /// Creates a NotFound error for a given entity type and ID.
    pub fn not_found(entity: impl Into<String>, id: impl ToString) -> Self {
        CatalogError::NotFound {
            entity: entity.into(),
            id: id.to_string(),
        }
    }
}

impl From<serde_json::Error> for CatalogError {
    fn from(err: serde_json::Error) -> Self {
        CatalogError::Seed(err.to_string())
    }
}

/// Unwraps core validation failures so callers see a single Validation kind.
impl From<CoreError> for CatalogError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Validation(v) => CatalogError::Validation(v),
            other => CatalogError::Core(other),
        }
    }
}

/// Result type for catalog operations.
pub type CatalogResult<T> = Result<T, CatalogError>;
