//! # API Error Type
//!
//! Unified error type for storefront commands.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in Flickd                                 │
//! │                                                                         │
//! │  Command Function  ──►  Result<T, ApiError>                             │
//! │                                                                         │
//! │  CoreError::InvalidReference ─────────────► PAYMENT_ERROR               │
//! │  CoreError::EmptyCart ────────────────────► CART_ERROR                  │
//! │  CatalogError::NotFound ──────────────────► NOT_FOUND                   │
//! │  ValidationError (any layer) ─────────────► VALIDATION_ERROR            │
//! │  AuthError::InvalidCredentials ───────────► UNAUTHORIZED                │
//! │  Seed / hashing failures ─────────────────► INTERNAL (logged, generic)  │
//! │                                                                         │
//! │  UI receives:                                                          │
//! │  { "code": "PAYMENT_ERROR", "message": "Invalid payment method: pm-9" } │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use flickd_catalog::CatalogError;
use flickd_core::{CoreError, ValidationError};
use serde::Serialize;

use crate::state::{AuthError, ConfigError};

/// API error returned from storefront commands.
///
/// ## Serialization
/// ```json
/// {
///   "code": "NOT_FOUND",
///   "message": "Product not found: 42"
/// }
/// ```
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Resource not found (404)
    NotFound,

    /// Input validation failed (400)
    ValidationError,

    /// Business logic error (422)
    BusinessLogic,

    /// Internal error (500)
    Internal,

    /// Cart operation failed
    CartError,

    /// Checkout referenced a payment method or address that does not exist
    PaymentError,

    /// Not signed in, or bad credentials
    Unauthorized,

    /// Bad configuration value at startup
    ConfigError,
}

/// Result alias for command functions.
pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    /// Creates a not found error.
    pub fn not_found(resource: &str, id: &str) -> Self {
        ApiError::new(
            ErrorCode::NotFound,
            format!("{} not found: {}", resource, id),
        )
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Internal, message)
    }

    /// Creates a cart error.
    pub fn cart(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::CartError, message)
    }

    /// Creates an unauthorized error.
    pub fn unauthorized(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Unauthorized, message)
    }
}

/// Converts core errors to API errors.
impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::InvalidReference { .. } => {
                ApiError::new(ErrorCode::PaymentError, err.to_string())
            }
            CoreError::EmptyCart => ApiError::cart("Cart is empty"),
            CoreError::InvalidStatusTransition { .. } => {
                ApiError::new(ErrorCode::BusinessLogic, err.to_string())
            }
            CoreError::InvalidVariant { .. } => ApiError::validation(err.to_string()),
            CoreError::Validation(e) => ApiError::validation(e.to_string()),
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::validation(err.to_string())
    }
}

/// Converts catalog errors to API errors.
impl From<CatalogError> for ApiError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::NotFound { entity, id } => ApiError::not_found(&entity, &id),
            CatalogError::Validation(e) => ApiError::validation(e.to_string()),
            CatalogError::Core(e) => ApiError::from(e),
            CatalogError::Seed(e) => {
                // Log the actual error but return a generic message
                tracing::error!("Catalog seed data invalid: {}", e);
                ApiError::internal("Catalog is unavailable")
            }
        }
    }
}

/// Converts auth errors to API errors.
impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::InvalidCredentials | AuthError::NotSignedIn => {
                ApiError::unauthorized(err.to_string())
            }
            AuthError::Validation(e) => ApiError::validation(e.to_string()),
            AuthError::Hashing(e) => {
                tracing::error!("Password hashing failed: {}", e);
                ApiError::internal("Could not process credentials")
            }
        }
    }
}

impl From<ConfigError> for ApiError {
    fn from(err: ConfigError) -> Self {
        ApiError::new(ErrorCode::ConfigError, err.to_string())
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_reference_is_payment_error() {
        let err = ApiError::from(CoreError::unknown_payment_method("pm-9"));
        assert_eq!(err.code, ErrorCode::PaymentError);
        assert_eq!(err.message, "Invalid payment method: pm-9");
    }

    #[test]
    fn test_serialized_shape() {
        let err = ApiError::from(CoreError::EmptyCart);
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["code"], "CART_ERROR");
        assert_eq!(json["message"], "Cart is empty");
    }

    #[test]
    fn test_catalog_errors() {
        let err = ApiError::from(CatalogError::not_found("Review", "r-1"));
        assert_eq!(err.code, ErrorCode::NotFound);
        assert_eq!(err.message, "Review not found: r-1");

        let err = ApiError::from(CatalogError::Seed("bad json".to_string()));
        assert_eq!(err.code, ErrorCode::Internal);
        assert!(!err.message.contains("bad json"));
    }

    #[test]
    fn test_auth_errors() {
        assert_eq!(
            ApiError::from(AuthError::InvalidCredentials).code,
            ErrorCode::Unauthorized
        );
        let err = ApiError::from(AuthError::Validation(ValidationError::Required {
            field: "email".to_string(),
        }));
        assert_eq!(err.code, ErrorCode::ValidationError);
    }

    #[test]
    fn test_display() {
        let err = ApiError::not_found("Product", "42");
        assert_eq!(err.to_string(), "[NotFound] Product not found: 42");
    }
}
