//! The shopping cart: one entry per product, in first-added order.

use crate::catalog::Product;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// A cart shared between the shopper and the checkout.
pub type SharedCart = Arc<parking_lot::Mutex<Cart>>;

/// A product with the quantity in the cart. The quantity is never zero
/// while the item is in a cart.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    #[serde(flatten)]
    pub product: Product,
    pub quantity: u32,
}

impl CartItem {
    pub fn line_total(&self) -> Decimal {
        self.product.price * Decimal::from(self.quantity)
    }
}

/// What the UI should do after a cart mutation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[must_use]
pub enum CartSignal {
    ShowCart,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shared() -> SharedCart {
        Arc::new(parking_lot::Mutex::new(Self::new()))
    }

    /// Add one unit of `product`, merging with an existing entry.
    pub fn add(&mut self, product: &Product) -> CartSignal {
        match self.items.iter_mut().find(|i| i.product.id == product.id) {
            Some(item) => item.quantity = item.quantity.saturating_add(1),
            None => self.items.push(CartItem {
                product: product.clone(),
                quantity: 1,
            }),
        }
        CartSignal::ShowCart
    }

    /// Shift the quantity of `id` by `delta`, flooring at zero. An item
    /// that reaches zero is removed. Unknown ids are ignored.
    pub fn update_quantity(&mut self, id: &str, delta: i64) {
        let Some(pos) = self.items.iter().position(|i| i.product.id == id) else {
            return;
        };

        let next = i64::from(self.items[pos].quantity)
            .saturating_add(delta)
            .max(0);
        match u32::try_from(next) {
            Ok(0) => {
                self.items.remove(pos);
            }
            Ok(quantity) => self.items[pos].quantity = quantity,
            Err(_) => self.items[pos].quantity = u32::MAX,
        }
    }

    pub fn remove(&mut self, id: &str) {
        self.items.retain(|i| i.product.id != id);
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Sum of price times quantity, recomputed on every call.
    pub fn total(&self) -> Decimal {
        self.items.iter().map(CartItem::line_total).sum()
    }

    /// Number of units across all items.
    pub fn item_count(&self) -> u32 {
        self.items
            .iter()
            .fold(0u32, |acc, i| acc.saturating_add(i.quantity))
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    pub fn get(&self, id: &str) -> Option<&CartItem> {
        self.items.iter().find(|i| i.product.id == id)
    }
}
