//! # Validation Module
//!
//! Input validation for account forms, reviews and variant selection.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: UI forms                                                     │
//! │  ├── Required fields, star picker                                      │
//! │  └── Immediate user feedback                                           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Storefront command                                           │
//! │  ├── Type validation (deserialization)                                 │
//! │  └── THIS MODULE: Business rule validation                             │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: State objects                                                │
//! │  ├── Duplicate email check                                             │
//! │  └── Reference lookups (payment method, address, product)              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use flickd_core::validation::{validate_email, validate_rating};
//!
//! assert!(validate_email("sarah@example.com").is_ok());
//! assert!(validate_rating(6).is_err());
//! ```

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::types::Product;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Minimum password length for new accounts.
pub const MIN_PASSWORD_LEN: usize = 8;

// =============================================================================
// Account Validators
// =============================================================================

/// Validates a display name.
///
/// ## Rules
/// - Must not be empty
/// - At most 100 characters
pub fn validate_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if name.chars().count() > 100 {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: 100,
        });
    }

    Ok(())
}

/// Validates an email address.
///
/// ## Rules
/// - Must not be empty
/// - Exactly one `@` with something on both sides
/// - Domain part contains a dot that is neither first nor last
/// - No whitespace
///
/// ## Example
/// ```rust
/// use flickd_core::validation::validate_email;
///
/// assert!(validate_email("sarah@example.com").is_ok());
/// assert!(validate_email("sarah@localhost").is_err());
/// assert!(validate_email("").is_err());
/// ```
pub fn validate_email(email: &str) -> ValidationResult<()> {
    let email = email.trim();

    if email.is_empty() {
        return Err(ValidationError::Required {
            field: "email".to_string(),
        });
    }

    let invalid = |reason: &str| ValidationError::InvalidFormat {
        field: "email".to_string(),
        reason: reason.to_string(),
    };

    if email.chars().any(char::is_whitespace) {
        return Err(invalid("must not contain spaces"));
    }

    let (local, domain) = email
        .split_once('@')
        .ok_or_else(|| invalid("must contain @"))?;

    if local.is_empty() || domain.contains('@') {
        return Err(invalid("must be of the form name@domain"));
    }

    match domain.find('.') {
        Some(pos) if pos > 0 && !domain.ends_with('.') => Ok(()),
        _ => Err(invalid("domain must contain a dot")),
    }
}

/// Validates a new password.
///
/// ## Rules
/// - At least [`MIN_PASSWORD_LEN`] characters
pub fn validate_password(password: &str) -> ValidationResult<()> {
    if password.is_empty() {
        return Err(ValidationError::Required {
            field: "password".to_string(),
        });
    }

    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(ValidationError::TooShort {
            field: "password".to_string(),
            min: MIN_PASSWORD_LEN,
        });
    }

    Ok(())
}

// =============================================================================
// Review Validators
// =============================================================================

/// Validates a star rating.
///
/// ## Rules
/// - Between 1 and 5 inclusive
pub fn validate_rating(rating: u8) -> ValidationResult<()> {
    if !(1..=5).contains(&rating) {
        return Err(ValidationError::OutOfRange {
            field: "rating".to_string(),
            min: 1,
            max: 5,
        });
    }

    Ok(())
}

/// Validates a review headline.
///
/// ## Rules
/// - Must not be empty
/// - At most 120 characters
pub fn validate_review_title(title: &str) -> ValidationResult<()> {
    let title = title.trim();

    if title.is_empty() {
        return Err(ValidationError::Required {
            field: "title".to_string(),
        });
    }

    if title.chars().count() > 120 {
        return Err(ValidationError::TooLong {
            field: "title".to_string(),
            max: 120,
        });
    }

    Ok(())
}

/// Validates a review body.
///
/// ## Rules
/// - Must not be empty
/// - At most 2000 characters
pub fn validate_review_comment(comment: &str) -> ValidationResult<()> {
    let comment = comment.trim();

    if comment.is_empty() {
        return Err(ValidationError::Required {
            field: "comment".to_string(),
        });
    }

    if comment.chars().count() > 2000 {
        return Err(ValidationError::TooLong {
            field: "comment".to_string(),
            max: 2000,
        });
    }

    Ok(())
}

// =============================================================================
// Variant Validators
// =============================================================================

/// Checks that a size/color selection is one the product is offered in.
///
/// The cart itself accepts any selection; the storefront calls this only
/// when strict variant checking is switched on.
///
/// ## User Workflow
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  Product Detail: Add to Bag                                            │
/// │                                                                         │
/// │  Shopper picks size "XL", color "Pink"                                 │
/// │       │                                                                 │
/// │       ▼                                                                 │
/// │  validate_variant(product, "XL", "Pink") ← THIS FUNCTION               │
/// │       │                                                                 │
/// │       ├── "XL" not in sizes?  → InvalidVariant { field: "size" }       │
/// │       ├── "Pink" not in colors? → InvalidVariant { field: "color" }    │
/// │       │                                                                 │
/// │       └── OK → Cart::add_line                                          │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub fn validate_variant(product: &Product, size: &str, color: &str) -> CoreResult<()> {
    if !product.offers_size(size) {
        return Err(CoreError::InvalidVariant {
            product_id: product.id,
            field: "size".to_string(),
            value: size.to_string(),
        });
    }

    if !product.offers_color(color) {
        return Err(CoreError::InvalidVariant {
            product_id: product.id,
            field: "color".to_string(),
            value: color.to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart::tests::test_product;

    #[test]
    fn test_validate_name() {
        assert!(validate_name("Sarah Johnson").is_ok());
        assert!(validate_name("").is_err());
        assert!(validate_name("   ").is_err());
        assert!(validate_name(&"A".repeat(101)).is_err());
    }

    #[test]
    fn test_validate_email() {
        assert!(validate_email("sarah@example.com").is_ok());
        assert!(validate_email("  sarah@flickd.co  ").is_ok());

        assert!(validate_email("").is_err());
        assert!(validate_email("sarah").is_err());
        assert!(validate_email("@example.com").is_err());
        assert!(validate_email("sarah@example").is_err());
        assert!(validate_email("sarah@.com").is_err());
        assert!(validate_email("sarah@example.").is_err());
        assert!(validate_email("sa rah@example.com").is_err());
        assert!(validate_email("a@b@example.com").is_err());
    }

    #[test]
    fn test_validate_password() {
        assert!(validate_password("hunter22").is_ok());
        assert!(matches!(
            validate_password("short"),
            Err(ValidationError::TooShort { min: 8, .. })
        ));
        assert!(matches!(
            validate_password(""),
            Err(ValidationError::Required { .. })
        ));
    }

    #[test]
    fn test_validate_rating() {
        for rating in 1..=5 {
            assert!(validate_rating(rating).is_ok());
        }
        assert!(validate_rating(0).is_err());
        assert!(validate_rating(6).is_err());
    }

    #[test]
    fn test_validate_review_text() {
        assert!(validate_review_title("Runs small").is_ok());
        assert!(validate_review_title(" ").is_err());
        assert!(validate_review_title(&"x".repeat(121)).is_err());

        assert!(validate_review_comment("Size up one.").is_ok());
        assert!(validate_review_comment("").is_err());
        assert!(validate_review_comment(&"x".repeat(2001)).is_err());
    }

    #[test]
    fn test_validate_variant() {
        let product = test_product(1, 2000);

        assert!(validate_variant(&product, "M", "Pink").is_ok());
        assert!(matches!(
            validate_variant(&product, "XL", "Pink"),
            Err(CoreError::InvalidVariant { ref field, .. }) if field == "size"
        ));
        assert!(matches!(
            validate_variant(&product, "M", "Green"),
            Err(CoreError::InvalidVariant { ref field, .. }) if field == "color"
        ));
    }
}
