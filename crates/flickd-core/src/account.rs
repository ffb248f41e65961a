//! # Account Book
//!
//! Saved payment methods and shipping addresses that checkout resolves ids
//! against.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::types::{
    PaymentMethod, PaymentMethodDraft, PaymentMethodKind, ShippingAddress, ShippingAddressDraft,
};

/// Payment methods and shipping addresses, in the order they were added.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountBook {
    payment_methods: Vec<PaymentMethod>,
    shipping_addresses: Vec<ShippingAddress>,
}

impl AccountBook {
    /// An empty book.
    pub fn new() -> Self {
        AccountBook::default()
    }

    /// The demo account: a default Visa ending 4242 and a default New York
    /// address, both with id `"1"`.
    pub fn seeded() -> Self {
        AccountBook {
            payment_methods: vec![PaymentMethod {
                id: "1".to_string(),
                kind: PaymentMethodKind::Card,
                last4: Some("4242".to_string()),
                brand: Some("visa".to_string()),
                expiry_month: Some(12),
                expiry_year: Some(2025),
                is_default: true,
            }],
            shipping_addresses: vec![ShippingAddress {
                id: "1".to_string(),
                name: "Sarah Johnson".to_string(),
                street: "123 Fashion Ave".to_string(),
                city: "New York".to_string(),
                state: "NY".to_string(),
                zip_code: "10001".to_string(),
                country: "US".to_string(),
                is_default: true,
            }],
        }
    }

    pub fn payment_methods(&self) -> &[PaymentMethod] {
        &self.payment_methods
    }

    pub fn shipping_addresses(&self) -> &[ShippingAddress] {
        &self.shipping_addresses
    }

    pub fn payment_method(&self, id: &str) -> Option<&PaymentMethod> {
        self.payment_methods.iter().find(|pm| pm.id == id)
    }

    pub fn shipping_address(&self, id: &str) -> Option<&ShippingAddress> {
        self.shipping_addresses.iter().find(|a| a.id == id)
    }

    /// The method flagged default, falling back to the first one saved.
    pub fn default_payment_method(&self) -> Option<&PaymentMethod> {
        self.payment_methods
            .iter()
            .find(|pm| pm.is_default)
            .or_else(|| self.payment_methods.first())
    }

    /// The address flagged default, falling back to the first one saved.
    pub fn default_shipping_address(&self) -> Option<&ShippingAddress> {
        self.shipping_addresses
            .iter()
            .find(|a| a.is_default)
            .or_else(|| self.shipping_addresses.first())
    }

    /// Saves a payment method under a new `pm-<uuid>` id.
    ///
    /// A draft marked default takes the default flag from the others.
    pub fn add_payment_method(&mut self, draft: PaymentMethodDraft) -> &PaymentMethod {
        let method = draft.with_id(format!("pm-{}", Uuid::new_v4()));
        if method.is_default {
            self.payment_methods.iter_mut().for_each(|pm| pm.is_default = false);
        }
        self.payment_methods.push(method);
        &self.payment_methods[self.payment_methods.len() - 1]
    }

    /// Saves an address under a new `addr-<uuid>` id.
    ///
    /// A draft marked default takes the default flag from the others.
    pub fn add_shipping_address(&mut self, draft: ShippingAddressDraft) -> &ShippingAddress {
        let address = draft.with_id(format!("addr-{}", Uuid::new_v4()));
        if address.is_default {
            self.shipping_addresses.iter_mut().for_each(|a| a.is_default = false);
        }
        self.shipping_addresses.push(address);
        &self.shipping_addresses[self.shipping_addresses.len() - 1]
    }
}
