//! # Checkout Commands
//!
//! Order quote, order placement and order history.
//!
//! ## Checkout Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Checkout Flow                                        │
//! │                                                                         │
//! │  1. Cart Review ──► get_checkout_summary()                              │
//! │                     subtotal / tax / shipping ("FREE" over $100) / total│
//! │                                                                         │
//! │  2. Shipping ─────► list_shipping_addresses()      (account.rs)         │
//! │                                                                         │
//! │  3. Payment ──────► list_payment_methods()         (account.rs)         │
//! │                                                                         │
//! │  4. Pay ──────────► checkout(payment_id, address_id)                    │
//! │                     │                                                   │
//! │                     ├── empty bag ──────────────► CART_ERROR            │
//! │                     ├── sleep(checkout_delay)                           │
//! │                     ├── unknown card/address ───► PAYMENT_ERROR         │
//! │                     │                             bag untouched         │
//! │                     └── ok ──► record order, take ordered lines out of  │
//! │                                the bag, OrderResponse                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use flickd_core::{CartLine, CoreError, Order, OrderStatus, OrderTotals};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::{ApiError, ApiResult};
use crate::state::{CartState, PaymentState, StoreConfig};

/// Order summary shown before paying.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutSummary {
    pub items: Vec<CartLine>,
    pub item_count: i64,
    pub totals: OrderTotals,
    pub free_shipping: bool,
    pub subtotal_display: String,
    pub tax_display: String,
    /// `"FREE"` when shipping is waived
    pub shipping_display: String,
    pub total_display: String,
}

/// Confirmation returned after a successful checkout.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderResponse {
    pub order_id: String,
    pub status: OrderStatus,
    pub store_name: String,
    pub timestamp: String,
    pub item_count: i64,
    pub totals: OrderTotals,
    pub total_display: String,
    pub payment_method: String,
    pub ship_to: String,
}

impl OrderResponse {
    fn new(order: &Order, config: &StoreConfig) -> Self {
        OrderResponse {
            order_id: order.id().to_string(),
            status: order.status(),
            store_name: config.store_name.clone(),
            timestamp: order.created_at().to_rfc3339(),
            item_count: order.item_count(),
            totals: order.totals(),
            total_display: config.format_currency(order.total().cents()),
            payment_method: order.payment_method().label(),
            ship_to: order.shipping_address().one_line(),
        }
    }
}

/// Prices the current bag without placing an order.
pub fn get_checkout_summary(
    config: &StoreConfig,
    cart: &CartState,
    payments: &PaymentState,
) -> CheckoutSummary {
    debug!("get_checkout_summary command");

    let (items, item_count) = cart.with_cart(|c| (c.lines().to_vec(), c.total_items()));
    let totals = payments.processor().policy().price_lines(&items);
    let free_shipping = totals.shipping.is_zero();

    CheckoutSummary {
        items,
        item_count,
        totals,
        free_shipping,
        subtotal_display: config.format_currency(totals.subtotal.cents()),
        tax_display: config.format_currency(totals.tax.cents()),
        shipping_display: if free_shipping {
            "FREE".to_string()
        } else {
            config.format_currency(totals.shipping.cents())
        },
        total_display: config.format_currency(totals.total.cents()),
    }
}

/// Places an order for everything in the bag.
///
/// ## Arguments
/// * `payment_method_id` - Saved card id; `None` uses the default card
/// * `shipping_address_id` - Saved address id; `None` uses the default address
///
/// ## Behavior
/// - Waits `checkout_delay` before resolving (simulated payment round trip)
/// - On success the order is recorded and the ordered quantities are taken
///   out of the bag. Anything added during the delay stays in the bag.
/// - On failure nothing changes
///
/// ## Errors
/// - `CART_ERROR` if the bag is empty
/// - `PAYMENT_ERROR` if the card or address id is unknown
pub async fn checkout(
    config: &StoreConfig,
    cart: &CartState,
    payments: &PaymentState,
    payment_method_id: Option<String>,
    shipping_address_id: Option<String>,
) -> ApiResult<OrderResponse> {
    debug!(
        payment_method_id = ?payment_method_id,
        shipping_address_id = ?shipping_address_id,
        "checkout command"
    );

    let lines = cart.with_cart(|c| c.lines().to_vec());
    if lines.is_empty() {
        return Err(CoreError::EmptyCart.into());
    }

    let (payment_method_id, shipping_address_id) = payments.with_book(|book| {
        (
            payment_method_id.unwrap_or_else(|| {
                book.default_payment_method()
                    .map(|m| m.id.clone())
                    .unwrap_or_default()
            }),
            shipping_address_id.unwrap_or_else(|| {
                book.default_shipping_address()
                    .map(|a| a.id.clone())
                    .unwrap_or_default()
            }),
        )
    });

    tokio::time::sleep(config.checkout_delay()).await;

    let result = payments.with_book(|book| {
        payments
            .processor()
            .checkout(&lines, book, &payment_method_id, &shipping_address_id)
    });

    let order = match result {
        Ok(order) => order,
        Err(e) => {
            warn!(
                payment_method_id = %payment_method_id,
                shipping_address_id = %shipping_address_id,
                error = %e,
                "Checkout rejected"
            );
            return Err(e.into());
        }
    };

    let response = OrderResponse::new(&order, config);
    payments.record_order(order);
    cart.with_cart_mut(|c| c.remove_ordered(&lines));

    info!(
        order_id = %response.order_id,
        total = %response.totals.total,
        items = response.item_count,
        "Order placed"
    );

    Ok(response)
}

/// Order history, newest first.
pub fn get_orders(payments: &PaymentState) -> Vec<Order> {
    debug!("get_orders command");
    payments.orders()
}

/// A single past order.
pub fn get_order(payments: &PaymentState, order_id: String) -> ApiResult<Order> {
    debug!(order_id = %order_id, "get_order command");
    payments
        .order(&order_id)
        .ok_or_else(|| ApiError::not_found("Order", &order_id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::cart::add_to_cart;
    use crate::error::ErrorCode;
    use flickd_catalog::Catalog;
    use flickd_core::{Money, OrderProcessor};

    struct Fixture {
        catalog: Catalog,
        config: StoreConfig,
        cart: CartState,
        payments: PaymentState,
    }

    fn fixture() -> Fixture {
        let config = StoreConfig::default().without_delays();
        let processor = OrderProcessor::new(config.pricing_policy());
        Fixture {
            catalog: Catalog::embedded().unwrap(),
            cart: CartState::new(),
            payments: PaymentState::seeded(processor),
            config,
        }
    }

    impl Fixture {
        fn add(&self, id: u32, size: &str, color: &str, qty: i64) {
            add_to_cart(
                &self.catalog,
                &self.config,
                &self.cart,
                id,
                size.to_string(),
                color.to_string(),
                Some(qty),
            )
            .unwrap();
        }
    }

    #[test]
    fn test_summary_under_threshold() {
        let f = fixture();
        // Essential Cotton Tee, $29.00
        f.add(2, "S", "White", 1);

        let summary = get_checkout_summary(&f.config, &f.cart, &f.payments);
        assert_eq!(summary.totals.subtotal, Money::from_cents(2900));
        assert_eq!(summary.totals.tax, Money::from_cents(232));
        assert_eq!(summary.totals.shipping, Money::from_cents(999));
        assert_eq!(summary.totals.total, Money::from_cents(4131));
        assert!(!summary.free_shipping);
        assert_eq!(summary.shipping_display, "$9.99");
        assert_eq!(summary.total_display, "$41.31");
    }

    #[test]
    fn test_summary_free_shipping() {
        let f = fixture();
        // Floral Wrap Midi Dress x2, $178.00
        f.add(1, "M", "Pink", 2);

        let summary = get_checkout_summary(&f.config, &f.cart, &f.payments);
        assert_eq!(summary.totals.subtotal, Money::from_cents(17800));
        assert_eq!(summary.totals.tax, Money::from_cents(1424));
        assert!(summary.free_shipping);
        assert_eq!(summary.shipping_display, "FREE");
        assert_eq!(summary.totals.total, Money::from_cents(19224));
    }

    #[tokio::test]
    async fn test_checkout_places_order_and_clears_cart() {
        let f = fixture();
        f.add(1, "M", "Pink", 1);
        f.add(2, "S", "White", 2);

        let response = checkout(
            &f.config,
            &f.cart,
            &f.payments,
            Some("1".to_string()),
            Some("1".to_string()),
        )
        .await
        .unwrap();

        assert!(response.order_id.starts_with("order-"));
        assert_eq!(response.status, OrderStatus::Confirmed);
        assert_eq!(response.item_count, 3);
        // 8900 + 2 * 2900 = 14700, over the threshold
        assert_eq!(response.totals.subtotal, Money::from_cents(14700));
        assert_eq!(response.totals.shipping, Money::zero());
        assert_eq!(response.ship_to, "123 Fashion Ave, New York, NY 10001, US");

        assert!(f.cart.with_cart(|c| c.is_empty()));
        let orders = get_orders(&f.payments);
        assert_eq!(orders.len(), 1);
        assert_eq!(orders[0].id(), response.order_id);
        assert!(get_order(&f.payments, response.order_id).is_ok());
    }

    #[tokio::test]
    async fn test_checkout_uses_defaults() {
        let f = fixture();
        f.add(2, "S", "White", 1);

        let response = checkout(&f.config, &f.cart, &f.payments, None, None)
            .await
            .unwrap();
        assert_eq!(response.payment_method, "visa •••• 4242");
    }

    #[tokio::test]
    async fn test_unknown_payment_method_keeps_cart() {
        let f = fixture();
        f.add(2, "S", "White", 1);

        let err = checkout(
            &f.config,
            &f.cart,
            &f.payments,
            Some("pm-missing".to_string()),
            Some("1".to_string()),
        )
        .await
        .unwrap_err();

        assert_eq!(err.code, ErrorCode::PaymentError);
        assert_eq!(err.message, "Invalid payment method: pm-missing");
        assert_eq!(f.cart.with_cart(|c| c.total_items()), 1);
        assert!(get_orders(&f.payments).is_empty());
    }

    #[tokio::test]
    async fn test_unknown_address_rejected() {
        let f = fixture();
        f.add(2, "S", "White", 1);

        let err = checkout(
            &f.config,
            &f.cart,
            &f.payments,
            Some("1".to_string()),
            Some("addr-missing".to_string()),
        )
        .await
        .unwrap_err();
        assert_eq!(err.code, ErrorCode::PaymentError);
        assert!(err.message.contains("shipping address"));
    }

    #[tokio::test]
    async fn test_empty_cart_rejected() {
        let f = fixture();
        let err = checkout(&f.config, &f.cart, &f.payments, None, None)
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::CartError);
    }

    #[tokio::test]
    async fn test_orders_newest_first() {
        let f = fixture();
        f.add(2, "S", "White", 1);
        let first = checkout(&f.config, &f.cart, &f.payments, None, None)
            .await
            .unwrap();
        f.add(1, "M", "Pink", 1);
        let second = checkout(&f.config, &f.cart, &f.payments, None, None)
            .await
            .unwrap();

        let orders = get_orders(&f.payments);
        assert_eq!(orders[0].id(), second.order_id);
        assert_eq!(orders[1].id(), first.order_id);
    }

    #[tokio::test]
    async fn test_lines_added_during_checkout_stay_in_bag() {
        let mut f = fixture();
        f.config.checkout_delay_ms = 200;
        f.add(2, "S", "White", 1);

        let task = {
            let (config, cart, payments) =
                (f.config.clone(), f.cart.clone(), f.payments.clone());
            tokio::spawn(async move { checkout(&config, &cart, &payments, None, None).await })
        };

        tokio::time::sleep(std::time::Duration::from_millis(50)).await;
        f.add(1, "M", "Pink", 1);

        let response = task.await.unwrap().unwrap();
        assert_eq!(response.item_count, 1);
        assert_eq!(response.totals.subtotal, Money::from_cents(2900));

        let remaining = f.cart.with_cart(|c| c.lines().to_vec());
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].product.id, 1);
        assert_eq!(remaining[0].quantity, 1);
    }

    #[test]
    fn test_unknown_order_not_found() {
        let f = fixture();
        let err = get_order(&f.payments, "order-nope".to_string()).unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
    }
}
