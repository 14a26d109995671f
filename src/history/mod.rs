//! Append-only order history.
//!
//! Stores are fail-soft: a missing or corrupt record loads as an empty
//! list and a failed write is logged, never returned to the checkout.

mod error;
mod file;

pub use error::HistoryError;
pub use file::FileOrderHistory;

use crate::order::Order;
use parking_lot::RwLock;

/// Persisted list of completed orders, most recent first.
pub trait OrderHistoryStore: Send + Sync {
    /// Read the persisted list, replacing whatever is held in memory.
    fn load(&self) -> Vec<Order>;

    /// Prepend `order` and persist the full list.
    fn append(&self, order: Order);

    fn list(&self) -> Vec<Order>;
}

/// History that lives only as long as the process.
#[derive(Debug, Default)]
pub struct InMemoryOrderHistory {
    orders: RwLock<Vec<Order>>,
}

impl InMemoryOrderHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_orders(orders: Vec<Order>) -> Self {
        Self {
            orders: RwLock::new(orders),
        }
    }
}

impl OrderHistoryStore for InMemoryOrderHistory {
    fn load(&self) -> Vec<Order> {
        self.orders.read().clone()
    }

    fn append(&self, order: Order) {
        self.orders.write().insert(0, order);
    }

    fn list(&self) -> Vec<Order> {
        self.orders.read().clone()
    }
}
