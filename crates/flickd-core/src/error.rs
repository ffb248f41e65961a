//! # Error Types
//!
//! Domain-specific error types for flickd-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  flickd-core errors (this file)                                        │
//! │  ├── CoreError        - Business rule failures                         │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  flickd-catalog errors (separate crate)                                │
//! │  └── CatalogError     - Reference data failures                        │
//! │                                                                         │
//! │  storefront errors (in app)                                            │
//! │  └── ApiError         - What the UI sees (serialized)                  │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → ApiError → UI                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
///
/// Cart operations never fail; these come from checkout, order status
/// changes and opt-in validation.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Checkout referenced a payment method or shipping address that does
    /// not exist in the account book.
    ///
    /// ## User Workflow
    /// ```text
    /// Checkout (payment: "pm-9", address: "1")
    ///      │
    ///      ▼
    /// Lookup payment method "pm-9" → missing
    ///      │
    ///      ▼
    /// InvalidReference { kind: "payment method", id: "pm-9" }
    ///      │
    ///      ▼
    /// No order is created, cart is untouched
    /// ```
    #[error("Invalid {kind}: {id}")]
    InvalidReference { kind: String, id: String },

    /// Checkout was attempted with no lines.
    #[error("Cart is empty")]
    EmptyCart,

    /// Order status can only move forward one step at a time.
    #[error("Order {order_id} cannot move from {from} to {to}")]
    InvalidStatusTransition {
        order_id: String,
        from: String,
        to: String,
    },

    /// Selected size/color is not offered for the product.
    #[error("{field} '{value}' is not available for product {product_id}")]
    InvalidVariant {
        product_id: u32,
        field: String,
        value: String,
    },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

impl CoreError {
    /// Shorthand for an unknown payment method id.
    pub fn unknown_payment_method(id: &str) -> Self {
        CoreError::InvalidReference {
            kind: "payment method".to_string(),
            id: id.to_string(),
        }
    }

    /// Shorthand for an unknown shipping address id.
    pub fn unknown_shipping_address(id: &str) -> Self {
        CoreError::InvalidReference {
            kind: "shipping address".to_string(),
            id: id.to_string(),
        }
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when user input doesn't meet requirements.
/// Used for early validation before business logic runs.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too short.
    #[error("{field} must be at least {min} characters")]
    TooShort { field: String, min: usize },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Invalid format (e.g., malformed email).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Value is not in allowed set.
    #[error("{field} must be one of: {allowed:?}")]
    NotAllowed { field: String, allowed: Vec<String> },

    /// Duplicate value (e.g., email already registered).
    #[error("{field} '{value}' already exists")]
    Duplicate { field: String, value: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_reference_message() {
        let err = CoreError::unknown_payment_method("pm-404");
        assert_eq!(err.to_string(), "Invalid payment method: pm-404");

        let err = CoreError::unknown_shipping_address("addr-9");
        assert_eq!(err.to_string(), "Invalid shipping address: addr-9");
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "email".to_string(),
        };
        assert_eq!(err.to_string(), "email is required");

        let err = ValidationError::TooShort {
            field: "password".to_string(),
            min: 8,
        };
        assert_eq!(err.to_string(), "password must be at least 8 characters");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Required {
            field: "title".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
