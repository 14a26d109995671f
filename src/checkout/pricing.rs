//! Order totals. Always derived from the live cart; nothing is cached.

use crate::cart::Cart;
use crate::catalog::DeliveryZone;
use crate::order::DeliveryMethod;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Delivery choice as entered on the form.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeliverySelection {
    Delivery { zone_id: String },
    Collection,
}

impl DeliverySelection {
    pub fn method(&self) -> DeliveryMethod {
        match self {
            Self::Delivery { .. } => DeliveryMethod::Delivery,
            Self::Collection => DeliveryMethod::Collection,
        }
    }
}

/// Delivery choice resolved against the catalog.
#[derive(Clone, Debug, PartialEq)]
pub enum Fulfilment {
    Delivery { zone: DeliveryZone, address: String },
    Collection,
}

impl Fulfilment {
    pub fn method(&self) -> DeliveryMethod {
        match self {
            Self::Delivery { .. } => DeliveryMethod::Delivery,
            Self::Collection => DeliveryMethod::Collection,
        }
    }

    pub fn zone(&self) -> Option<&DeliveryZone> {
        match self {
            Self::Delivery { zone, .. } => Some(zone),
            Self::Collection => None,
        }
    }

    pub fn shipping_cost(&self) -> Decimal {
        self.zone().map_or(Decimal::ZERO, |z| z.price)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Quote {
    pub subtotal: Decimal,
    pub shipping_cost: Decimal,
    pub total: Decimal,
}

impl Quote {
    pub fn new(subtotal: Decimal, shipping_cost: Decimal) -> Self {
        Self {
            subtotal,
            shipping_cost,
            total: subtotal + shipping_cost,
        }
    }
}

/// Price `cart` for delivery to `zone`, or for collection when `zone` is
/// `None`.
pub fn quote(cart: &Cart, zone: Option<&DeliveryZone>) -> Quote {
    Quote::new(cart.total(), zone.map_or(Decimal::ZERO, |z| z.price))
}
