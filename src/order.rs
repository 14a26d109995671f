//! Completed checkouts.

use crate::cart::CartItem;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderStatus {
    Completed,
    Pending,
    Failed,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DeliveryMethod {
    #[default]
    Delivery,
    Collection,
}

impl fmt::Display for DeliveryMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Delivery => f.write_str("Delivery"),
            Self::Collection => f.write_str("Collection"),
        }
    }
}

/// The immutable record of one successful checkout.
///
/// `items` is a snapshot of the cart at completion, and
/// `total == sum(price * quantity) + shipping_cost` always holds for orders
/// built by [`Order::new`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: Uuid,
    #[serde(rename = "date")]
    pub created_at: DateTime<Utc>,
    pub items: Vec<CartItem>,
    pub total: Decimal,
    pub transaction_ref: String,
    pub payment_method: String,
    pub status: OrderStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_phone: Option<String>,
    pub delivery_method: DeliveryMethod,
    /// Zone name, only for deliveries
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delivery_zone: Option<String>,
    pub shipping_cost: Decimal,
}

/// Everything an order needs besides the cart snapshot.
#[derive(Clone, Debug)]
pub struct OrderDraft {
    pub transaction_ref: String,
    pub payment_method: String,
    pub customer_email: Option<String>,
    pub customer_phone: Option<String>,
    pub delivery_method: DeliveryMethod,
    pub delivery_zone: Option<String>,
    pub shipping_cost: Decimal,
}

impl Order {
    /// Build a completed order; the total is derived from `items`.
    ///
    /// Collection orders never carry a zone or a shipping charge, whatever
    /// the draft says.
    pub fn new(items: Vec<CartItem>, draft: OrderDraft) -> Self {
        let (delivery_zone, shipping_cost) = match draft.delivery_method {
            DeliveryMethod::Delivery => (draft.delivery_zone, draft.shipping_cost),
            DeliveryMethod::Collection => (None, Decimal::ZERO),
        };
        let subtotal: Decimal = items.iter().map(CartItem::line_total).sum();

        Self {
            id: Uuid::now_v7(),
            created_at: Utc::now(),
            items,
            total: subtotal + shipping_cost,
            transaction_ref: draft.transaction_ref,
            payment_method: draft.payment_method,
            status: OrderStatus::Completed,
            customer_email: draft.customer_email,
            customer_phone: draft.customer_phone,
            delivery_method: draft.delivery_method,
            delivery_zone,
            shipping_cost,
        }
    }

    pub fn subtotal(&self) -> Decimal {
        self.total - self.shipping_cost
    }

    pub fn item_count(&self) -> u32 {
        self.items
            .iter()
            .fold(0u32, |acc, i| acc.saturating_add(i.quantity))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart::Cart;
    use crate::catalog::Catalog;
    use rust_decimal_macros::dec;

    fn draft(method: DeliveryMethod) -> OrderDraft {
        OrderDraft {
            transaction_ref: "TFC-123456".into(),
            payment_method: "Airtel Mobile Money".into(),
            customer_email: Some("mwila@example.com".into()),
            customer_phone: Some("0977123456".into()),
            delivery_method: method,
            delivery_zone: Some("Lusaka Central (CBD, Rhodes Park)".into()),
            shipping_cost: dec!(45),
        }
    }

    fn honey_cart() -> Cart {
        let mut cart = Cart::new();
        let _ = cart.add(Catalog::builtin().product("1").unwrap());
        cart
    }

    #[test]
    fn delivery_total_includes_shipping() {
        let order = Order::new(honey_cart().items().to_vec(), draft(DeliveryMethod::Delivery));
        assert_eq!(order.total, dec!(195));
        assert_eq!(order.subtotal(), dec!(150));
        assert_eq!(order.status, OrderStatus::Completed);
        assert_eq!(order.item_count(), 1);
    }

    #[test]
    fn collection_drops_zone_and_shipping() {
        let order = Order::new(honey_cart().items().to_vec(), draft(DeliveryMethod::Collection));
        assert_eq!(order.total, dec!(150));
        assert_eq!(order.shipping_cost, Decimal::ZERO);
        assert!(order.delivery_zone.is_none());
    }

    #[test]
    fn snapshot_is_independent_of_cart() {
        let mut cart = honey_cart();
        let order = Order::new(cart.items().to_vec(), draft(DeliveryMethod::Delivery));
        cart.update_quantity("1", 4);
        cart.clear();
        assert_eq!(order.items[0].quantity, 1);
    }

    #[test]
    fn json_matches_persisted_layout() {
        let order = Order::new(honey_cart().items().to_vec(), draft(DeliveryMethod::Delivery));
        let json = serde_json::to_value(&order).unwrap();

        assert!(json.get("date").is_some());
        assert_eq!(json["transactionRef"], "TFC-123456");
        assert_eq!(json["deliveryMethod"], "Delivery");
        assert_eq!(json["status"], "Completed");
        assert_eq!(json["items"][0]["quantity"], 1);

        let back: Order = serde_json::from_value(json).unwrap();
        assert_eq!(back.id, order.id);
        assert_eq!(back.total, order.total);
    }
}
