//! # Orders
//!
//! Order pricing and the order processor that turns a cart snapshot into an
//! immutable [`Order`].
//!
//! ## Checkout Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         checkout()                                      │
//! │                                                                         │
//! │  lines + payment_method_id + shipping_address_id                        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  AccountBook lookup ── missing? ──► CoreError::InvalidReference         │
//! │       │                             (no order, nothing changes)         │
//! │       ▼                                                                 │
//! │  subtotal = Σ price × qty                                               │
//! │  tax      = subtotal × 8%          (rounded half up to the cent)        │
//! │  shipping = subtotal > $100 ? $0 : $9.99                                │
//! │  total    = subtotal + tax + shipping                                   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Order { id: "order-<uuid>", status: Confirmed, … }                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;
use uuid::Uuid;

use crate::account::AccountBook;
use crate::cart::CartLine;
use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::{PaymentMethod, ShippingAddress, TaxRate};

/// Sales tax applied at checkout: 8%.
pub const DEFAULT_TAX_RATE_BPS: u32 = 800;

/// Orders with a subtotal strictly above this ship free: $100.00.
pub const DEFAULT_FREE_SHIPPING_THRESHOLD_CENTS: i64 = 10_000;

/// Flat shipping charge below the threshold: $9.99.
pub const DEFAULT_FLAT_SHIPPING_CENTS: i64 = 999;

// =============================================================================
// Pricing
// =============================================================================

/// Tax and shipping rules applied at checkout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct PricingPolicy {
    pub tax_rate: TaxRate,
    /// Subtotals strictly greater than this ship free.
    pub free_shipping_threshold: Money,
    pub flat_shipping: Money,
}

impl Default for PricingPolicy {
    fn default() -> Self {
        PricingPolicy {
            tax_rate: TaxRate::from_bps(DEFAULT_TAX_RATE_BPS),
            free_shipping_threshold: Money::from_cents(DEFAULT_FREE_SHIPPING_THRESHOLD_CENTS),
            flat_shipping: Money::from_cents(DEFAULT_FLAT_SHIPPING_CENTS),
        }
    }
}

impl PricingPolicy {
    /// Shipping charge for a given subtotal.
    pub fn shipping_for(&self, subtotal: Money) -> Money {
        if subtotal > self.free_shipping_threshold {
            Money::zero()
        } else {
            self.flat_shipping
        }
    }

    /// Prices a subtotal.
    pub fn price_subtotal(&self, subtotal: Money) -> OrderTotals {
        let tax = subtotal.calculate_tax(self.tax_rate);
        let shipping = self.shipping_for(subtotal);
        OrderTotals {
            subtotal,
            tax,
            shipping,
            total: subtotal + tax + shipping,
        }
    }

    /// Prices a set of lines. Also used by the checkout summary before an
    /// order exists.
    pub fn price_lines(&self, lines: &[CartLine]) -> OrderTotals {
        self.price_subtotal(lines.iter().map(CartLine::line_total).sum())
    }
}

/// Computed order amounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct OrderTotals {
    pub subtotal: Money,
    pub tax: Money,
    pub shipping: Money,
    pub total: Money,
}

// =============================================================================
// Order Status
// =============================================================================

/// Lifecycle of an order. Moves forward one step at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    Pending,
    Confirmed,
    Shipped,
    Delivered,
}

impl OrderStatus {
    /// The status that follows this one, `None` once delivered.
    pub const fn next(self) -> Option<OrderStatus> {
        match self {
            OrderStatus::Pending => Some(OrderStatus::Confirmed),
            OrderStatus::Confirmed => Some(OrderStatus::Shipped),
            OrderStatus::Shipped => Some(OrderStatus::Delivered),
            OrderStatus::Delivered => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Confirmed => "confirmed",
            OrderStatus::Shipped => "shipped",
            OrderStatus::Delivered => "delivered",
        }
    }
}

impl Default for OrderStatus {
    fn default() -> Self {
        OrderStatus::Pending
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Order
// =============================================================================

/// A placed order.
///
/// Lines, amounts, address and payment method are a snapshot taken at
/// checkout and have no setters; only the status moves, via
/// [`Order::advance_to`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Order {
    id: String,
    items: Vec<CartLine>,
    subtotal: Money,
    tax: Money,
    shipping: Money,
    total: Money,
    status: OrderStatus,
    #[ts(as = "String")]
    created_at: DateTime<Utc>,
    #[ts(as = "String")]
    updated_at: DateTime<Utc>,
    shipping_address: ShippingAddress,
    payment_method: PaymentMethod,
}

impl Order {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn items(&self) -> &[CartLine] {
        &self.items
    }

    pub fn subtotal(&self) -> Money {
        self.subtotal
    }

    pub fn tax(&self) -> Money {
        self.tax
    }

    pub fn shipping(&self) -> Money {
        self.shipping
    }

    pub fn total(&self) -> Money {
        self.total
    }

    pub fn totals(&self) -> OrderTotals {
        OrderTotals {
            subtotal: self.subtotal,
            tax: self.tax,
            shipping: self.shipping,
            total: self.total,
        }
    }

    pub fn status(&self) -> OrderStatus {
        self.status
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    pub fn shipping_address(&self) -> &ShippingAddress {
        &self.shipping_address
    }

    pub fn payment_method(&self) -> &PaymentMethod {
        &self.payment_method
    }

    /// Σ quantity over the order's lines.
    pub fn item_count(&self) -> i64 {
        self.items.iter().map(|l| l.quantity).sum()
    }

    /// Moves the order to `next`, which must be the immediate successor of
    /// the current status.
    pub fn advance_to(&mut self, next: OrderStatus, at: DateTime<Utc>) -> CoreResult<()> {
        if self.status.next() != Some(next) {
            return Err(CoreError::InvalidStatusTransition {
                order_id: self.id.clone(),
                from: self.status.to_string(),
                to: next.to_string(),
            });
        }
        self.status = next;
        self.updated_at = at;
        Ok(())
    }
}

// =============================================================================
// Order Processor
// =============================================================================

/// Prices cart snapshots and produces orders.
#[derive(Debug, Clone, Copy, Default)]
pub struct OrderProcessor {
    policy: PricingPolicy,
}

impl OrderProcessor {
    pub fn new(policy: PricingPolicy) -> Self {
        OrderProcessor { policy }
    }

    pub fn policy(&self) -> &PricingPolicy {
        &self.policy
    }

    /// Places an order with a fresh `order-<uuid>` id, stamped now.
    ///
    /// ## Errors
    /// [`CoreError::InvalidReference`] if either id is not in `book`.
    pub fn checkout(
        &self,
        lines: &[CartLine],
        book: &AccountBook,
        payment_method_id: &str,
        shipping_address_id: &str,
    ) -> CoreResult<Order> {
        self.checkout_at(
            lines,
            book,
            payment_method_id,
            shipping_address_id,
            format!("order-{}", Uuid::new_v4()),
            Utc::now(),
        )
    }

    /// Deterministic form of [`OrderProcessor::checkout`] with the id and
    /// timestamp supplied by the caller.
    pub fn checkout_at(
        &self,
        lines: &[CartLine],
        book: &AccountBook,
        payment_method_id: &str,
        shipping_address_id: &str,
        order_id: String,
        at: DateTime<Utc>,
    ) -> CoreResult<Order> {
        let payment_method = book
            .payment_method(payment_method_id)
            .ok_or_else(|| CoreError::unknown_payment_method(payment_method_id))?;
        let shipping_address = book
            .shipping_address(shipping_address_id)
            .ok_or_else(|| CoreError::unknown_shipping_address(shipping_address_id))?;

        let totals = self.policy.price_lines(lines);

        Ok(Order {
            id: order_id,
            items: lines.to_vec(),
            subtotal: totals.subtotal,
            tax: totals.tax,
            shipping: totals.shipping,
            total: totals.total,
            status: OrderStatus::Confirmed,
            created_at: at,
            updated_at: at,
            shipping_address: shipping_address.clone(),
            payment_method: payment_method.clone(),
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart::tests::test_product;
    use crate::cart::Cart;

    fn cart_with_subtotal(cents: i64) -> Cart {
        let mut cart = Cart::new();
        cart.add_line(&test_product(1, cents), "M", "Pink", 1);
        cart
    }

    #[test]
    fn test_free_shipping_above_threshold() {
        let processor = OrderProcessor::default();
        let cart = cart_with_subtotal(12000);

        let order = processor
            .checkout(cart.lines(), &AccountBook::seeded(), "1", "1")
            .unwrap();

        assert_eq!(order.subtotal(), Money::from_cents(12000));
        assert_eq!(order.shipping(), Money::zero());
        assert_eq!(order.tax(), Money::from_cents(960));
        assert_eq!(order.total(), Money::from_cents(12960));
        assert_eq!(order.status(), OrderStatus::Confirmed);
        assert!(order.id().starts_with("order-"));
    }

    #[test]
    fn test_flat_shipping_below_threshold() {
        let processor = OrderProcessor::default();
        let cart = cart_with_subtotal(8000);

        let order = processor
            .checkout(cart.lines(), &AccountBook::seeded(), "1", "1")
            .unwrap();

        assert_eq!(order.shipping(), Money::from_cents(999));
        assert_eq!(order.tax(), Money::from_cents(640));
        assert_eq!(order.total(), Money::from_cents(8000 + 640 + 999));
    }

    #[test]
    fn test_threshold_is_exclusive() {
        let totals = PricingPolicy::default().price_subtotal(Money::from_cents(10_000));
        assert_eq!(totals.shipping, Money::from_cents(999));

        let totals = PricingPolicy::default().price_subtotal(Money::from_cents(10_001));
        assert_eq!(totals.shipping, Money::zero());
    }

    #[test]
    fn test_unknown_payment_method_is_invalid_reference() {
        let processor = OrderProcessor::default();
        let cart = cart_with_subtotal(5000);

        let result = processor.checkout(cart.lines(), &AccountBook::seeded(), "pm-missing", "1");

        match result {
            Err(CoreError::InvalidReference { kind, id }) => {
                assert_eq!(kind, "payment method");
                assert_eq!(id, "pm-missing");
            }
            other => panic!("expected InvalidReference, got {:?}", other),
        }
    }

    #[test]
    fn test_unknown_address_is_invalid_reference() {
        let processor = OrderProcessor::default();
        let cart = cart_with_subtotal(5000);

        let result = processor.checkout(cart.lines(), &AccountBook::seeded(), "1", "addr-x");
        assert!(matches!(result, Err(CoreError::InvalidReference { .. })));
    }

    #[test]
    fn test_order_snapshots_lines() {
        let processor = OrderProcessor::default();
        let mut cart = Cart::new();
        cart.add_line(&test_product(1, 2000), "M", "Pink", 2);
        cart.add_line(&test_product(2, 1500), "S", "White", 1);

        let at = Utc::now();
        let order = processor
            .checkout_at(cart.lines(), &AccountBook::seeded(), "1", "1", "order-1".into(), at)
            .unwrap();
        cart.clear();

        assert_eq!(order.items().len(), 2);
        assert_eq!(order.item_count(), 3);
        assert_eq!(order.subtotal(), Money::from_cents(5500));
        assert_eq!(order.created_at(), at);
        assert_eq!(order.payment_method().last4.as_deref(), Some("4242"));
        assert_eq!(order.shipping_address().city, "New York");
    }

    #[test]
    fn test_status_moves_forward_one_step() {
        let processor = OrderProcessor::default();
        let cart = cart_with_subtotal(5000);
        let mut order = processor
            .checkout(cart.lines(), &AccountBook::seeded(), "1", "1")
            .unwrap();

        assert!(order.advance_to(OrderStatus::Delivered, Utc::now()).is_err());
        assert!(order.advance_to(OrderStatus::Pending, Utc::now()).is_err());

        order.advance_to(OrderStatus::Shipped, Utc::now()).unwrap();
        order.advance_to(OrderStatus::Delivered, Utc::now()).unwrap();
        assert_eq!(order.status(), OrderStatus::Delivered);
        assert_eq!(OrderStatus::Delivered.next(), None);
    }

    #[test]
    fn test_status_serializes_lowercase() {
        let json = serde_json::to_string(&OrderStatus::Confirmed).unwrap();
        assert_eq!(json, "\"confirmed\"");
    }
}
