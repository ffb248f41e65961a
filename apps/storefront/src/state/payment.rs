//! # Payment State
//!
//! Saved payment methods and addresses, the order processor, and the order
//! history.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  PaymentState                                                           │
//! │  ├── book:      Arc<Mutex<AccountBook>>   cards + addresses             │
//! │  ├── orders:    Arc<Mutex<Vec<Order>>>    newest first                  │
//! │  └── processor: OrderProcessor            pricing from StoreConfig      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::{Arc, Mutex, PoisonError};

use flickd_core::{AccountBook, Order, OrderProcessor};

#[derive(Debug, Clone)]
pub struct PaymentState {
    book: Arc<Mutex<AccountBook>>,
    orders: Arc<Mutex<Vec<Order>>>,
    processor: OrderProcessor,
}

impl PaymentState {
    /// Starts from the given book with no orders.
    pub fn new(book: AccountBook, processor: OrderProcessor) -> Self {
        PaymentState {
            book: Arc::new(Mutex::new(book)),
            orders: Arc::new(Mutex::new(Vec::new())),
            processor,
        }
    }

    /// The demo account's card and address.
    pub fn seeded(processor: OrderProcessor) -> Self {
        PaymentState::new(AccountBook::seeded(), processor)
    }

    pub fn processor(&self) -> &OrderProcessor {
        &self.processor
    }

    pub fn with_book<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&AccountBook) -> R,
    {
        let book = self.book.lock().unwrap_or_else(PoisonError::into_inner);
        f(&book)
    }

    pub fn with_book_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut AccountBook) -> R,
    {
        let mut book = self.book.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut book)
    }

    /// Adds an order to the front of the history.
    pub fn record_order(&self, order: Order) {
        let mut orders = self.orders.lock().unwrap_or_else(PoisonError::into_inner);
        orders.insert(0, order);
    }

    /// Order history, newest first.
    pub fn orders(&self) -> Vec<Order> {
        self.orders
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn order(&self, order_id: &str) -> Option<Order> {
        self.orders
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .find(|o| o.id() == order_id)
            .cloned()
    }
}
