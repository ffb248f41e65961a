//! # Account Commands
//!
//! Saved payment methods and shipping addresses used at checkout.

use flickd_core::{
    PaymentMethod, PaymentMethodDraft, PaymentMethodKind, ShippingAddress, ShippingAddressDraft,
    ValidationError,
};
use tracing::{debug, info};

use crate::error::ApiResult;
use crate::state::PaymentState;

/// Saved payment methods, in the order they were added.
pub fn list_payment_methods(payments: &PaymentState) -> Vec<PaymentMethod> {
    debug!("list_payment_methods command");
    payments.with_book(|book| book.payment_methods().to_vec())
}

/// Saved shipping addresses, in the order they were added.
pub fn list_shipping_addresses(payments: &PaymentState) -> Vec<ShippingAddress> {
    debug!("list_shipping_addresses command");
    payments.with_book(|book| book.shipping_addresses().to_vec())
}

/// Saves a payment method.
///
/// ## Validation
/// Cards need a 4-digit `last4` and, if given, an expiry month in 1..=12.
/// Wallet kinds carry no card details.
pub fn add_payment_method(
    payments: &PaymentState,
    draft: PaymentMethodDraft,
) -> ApiResult<PaymentMethod> {
    debug!(kind = ?draft.kind, is_default = draft.is_default, "add_payment_method command");

    if draft.kind == PaymentMethodKind::Card {
        validate_last4(draft.last4.as_deref())?;
        if let Some(month) = draft.expiry_month {
            if !(1..=12).contains(&month) {
                return Err(ValidationError::OutOfRange {
                    field: "expiryMonth".to_string(),
                    min: 1,
                    max: 12,
                }
                .into());
            }
        }
    }

    let method = payments.with_book_mut(|book| book.add_payment_method(draft).clone());
    info!(payment_method_id = %method.id, "Payment method saved");
    Ok(method)
}

/// Saves a shipping address. Every field except `is_default` is required.
pub fn add_shipping_address(
    payments: &PaymentState,
    draft: ShippingAddressDraft,
) -> ApiResult<ShippingAddress> {
    debug!(is_default = draft.is_default, "add_shipping_address command");

    for (field, value) in [
        ("name", &draft.name),
        ("street", &draft.street),
        ("city", &draft.city),
        ("state", &draft.state),
        ("zipCode", &draft.zip_code),
        ("country", &draft.country),
    ] {
        if value.trim().is_empty() {
            return Err(ValidationError::Required {
                field: field.to_string(),
            }
            .into());
        }
    }

    let address = payments.with_book_mut(|book| book.add_shipping_address(draft).clone());
    info!(shipping_address_id = %address.id, "Shipping address saved");
    Ok(address)
}

fn validate_last4(last4: Option<&str>) -> Result<(), ValidationError> {
    let Some(last4) = last4 else {
        return Err(ValidationError::Required {
            field: "last4".to_string(),
        });
    };
    if last4.len() != 4 || !last4.chars().all(|c| c.is_ascii_digit()) {
        return Err(ValidationError::InvalidFormat {
            field: "last4".to_string(),
            reason: "must be 4 digits".to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use flickd_core::{OrderProcessor, PricingPolicy};

    fn payments() -> PaymentState {
        PaymentState::seeded(OrderProcessor::new(PricingPolicy::default()))
    }

    fn card(last4: &str, is_default: bool) -> PaymentMethodDraft {
        PaymentMethodDraft {
            kind: PaymentMethodKind::Card,
            last4: Some(last4.to_string()),
            brand: Some("mastercard".to_string()),
            expiry_month: Some(3),
            expiry_year: Some(2028),
            is_default,
        }
    }

    fn address(name: &str) -> ShippingAddressDraft {
        ShippingAddressDraft {
            name: name.to_string(),
            street: "9 Mercer St".to_string(),
            city: "New York".to_string(),
            state: "NY".to_string(),
            zip_code: "10013".to_string(),
            country: "US".to_string(),
            is_default: false,
        }
    }

    #[test]
    fn test_seeded_book() {
        let payments = payments();
        assert_eq!(list_payment_methods(&payments).len(), 1);
        assert_eq!(list_shipping_addresses(&payments)[0].name, "Sarah Johnson");
    }

    #[test]
    fn test_add_default_card() {
        let payments = payments();
        let method = add_payment_method(&payments, card("5555", true)).unwrap();

        assert!(method.id.starts_with("pm-"));
        let methods = list_payment_methods(&payments);
        assert_eq!(methods.len(), 2);
        assert_eq!(methods.iter().filter(|m| m.is_default).count(), 1);
        assert!(methods[1].is_default);
    }

    #[test]
    fn test_card_validation() {
        let payments = payments();

        let err = add_payment_method(&payments, card("55a5", false)).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);

        let mut draft = card("5555", false);
        draft.expiry_month = Some(13);
        assert!(add_payment_method(&payments, draft).is_err());

        let mut draft = card("5555", false);
        draft.last4 = None;
        assert!(add_payment_method(&payments, draft).is_err());

        assert_eq!(list_payment_methods(&payments).len(), 1);
    }

    #[test]
    fn test_wallet_needs_no_card_details() {
        let payments = payments();
        let draft = PaymentMethodDraft {
            kind: PaymentMethodKind::Paypal,
            last4: None,
            brand: None,
            expiry_month: None,
            expiry_year: None,
            is_default: false,
        };
        let method = add_payment_method(&payments, draft).unwrap();
        assert_eq!(method.label(), "paypal");
    }

    #[test]
    fn test_add_address() {
        let payments = payments();
        let saved = add_shipping_address(&payments, address("Maya Chen")).unwrap();
        assert!(saved.id.starts_with("addr-"));
        assert_eq!(list_shipping_addresses(&payments).len(), 2);

        let err = add_shipping_address(&payments, address("  ")).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert_eq!(err.message, "name is required");
    }
}
