//! Products, vendors, categories and delivery zones.
//!
//! The catalog is immutable once built. Vendors are embedded by value in
//! every product; [`Catalog::vendors`] derives the distinct set.

mod data;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub use data::{CURRENCY, PICKUP_ADDRESS};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vendor {
    pub id: String,
    pub name: String,
    pub location: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Story about the artisan behind the vendor
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub story: Option<String>,
}

/// The fixed set of shelf categories.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Pantry,
    Oils,
    Preserves,
    Health,
    Bakery,
    Beverages,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::Pantry,
        Category::Oils,
        Category::Preserves,
        Category::Health,
        Category::Bakery,
        Category::Beverages,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Pantry => "Pantry",
            Category::Oils => "Oils",
            Category::Preserves => "Preserves",
            Category::Health => "Health",
            Category::Bakery => "Bakery",
            Category::Beverages => "Beverages",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown category '{0}'")]
pub struct UnknownCategory(pub String);

impl FromStr for Category {
    type Err = UnknownCategory;

    /// Case-sensitive: "pantry" is not a category.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| UnknownCategory(s.to_string()))
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub name: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    pub price: Decimal,
    pub category: Category,
    pub image: String,
    pub vendor: Vendor,
    pub tags: Vec<String>,
}

/// A delivery region with a flat price.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DeliveryZone {
    pub id: String,
    pub name: String,
    pub price: Decimal,
    /// Well-known places in the zone, offered as address suggestions
    #[serde(default)]
    pub landmarks: Vec<String>,
}

impl DeliveryZone {
    /// Landmarks containing `partial`, case-insensitively. All of them when
    /// `partial` is blank.
    pub fn address_suggestions(&self, partial: &str) -> Vec<&str> {
        let needle = partial.trim().to_lowercase();
        self.landmarks
            .iter()
            .filter(|l| needle.is_empty() || l.to_lowercase().contains(&needle))
            .map(String::as_str)
            .collect()
    }
}

#[derive(Clone, Debug, Default)]
pub struct Catalog {
    products: Vec<Product>,
    zones: Vec<DeliveryZone>,
}

impl Catalog {
    pub fn new(products: Vec<Product>, zones: Vec<DeliveryZone>) -> Self {
        Self { products, zones }
    }

    /// The storefront's own product list and delivery zones.
    pub fn builtin() -> Self {
        Self::new(data::products(), data::delivery_zones())
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn product(&self, id: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    pub fn zones(&self) -> &[DeliveryZone] {
        &self.zones
    }

    pub fn zone(&self, id: &str) -> Option<&DeliveryZone> {
        self.zones.iter().find(|z| z.id == id)
    }

    /// The zone preselected at checkout.
    pub fn default_zone(&self) -> Option<&DeliveryZone> {
        self.zones.first()
    }

    /// Address suggestions for `zone_id`; empty for an unknown zone.
    pub fn address_suggestions(&self, zone_id: &str, partial: &str) -> Vec<&str> {
        self.zone(zone_id)
            .map(|z| z.address_suggestions(partial))
            .unwrap_or_default()
    }

    /// Distinct vendors by id, in order of first appearance.
    ///
    /// When two products embed different records under the same vendor id,
    /// the record from the later product wins.
    pub fn vendors(&self) -> Vec<Vendor> {
        let mut vendors: Vec<Vendor> = Vec::new();
        for product in &self.products {
            match vendors.iter_mut().find(|v| v.id == product.vendor.id) {
                Some(seen) => *seen = product.vendor.clone(),
                None => vendors.push(product.vendor.clone()),
            }
        }
        vendors
    }

    /// Categories that have at least one product, in `Category::ALL` order.
    pub fn categories(&self) -> Vec<Category> {
        Category::ALL
            .into_iter()
            .filter(|c| self.products.iter().any(|p| p.category == *c))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn vendor(id: &str, name: &str, story: Option<&str>) -> Vendor {
        Vendor {
            id: id.into(),
            name: name.into(),
            location: "Lusaka, Zambia".into(),
            email: None,
            story: story.map(Into::into),
        }
    }

    fn product(id: &str, vendor: Vendor) -> Product {
        Product {
            id: id.into(),
            name: format!("Item {id}"),
            description: String::new(),
            details: None,
            price: dec!(10),
            category: Category::Pantry,
            image: String::new(),
            vendor,
            tags: vec![],
        }
    }

    #[test]
    fn builtin_catalog_shape() {
        let catalog = Catalog::builtin();
        assert_eq!(catalog.products().len(), 8);
        assert_eq!(catalog.zones().len(), 4);
        assert_eq!(catalog.categories(), Category::ALL.to_vec());
        assert_eq!(catalog.default_zone().map(|z| z.price), Some(dec!(45)));
        assert_eq!(
            catalog.product("1").map(|p| p.name.as_str()),
            Some("Wild Zambezi Honey")
        );
    }

    #[test]
    fn vendors_dedupe_in_first_appearance_order() {
        let catalog = Catalog::builtin();
        let ids: Vec<_> = catalog.vendors().into_iter().map(|v| v.id).collect();
        assert_eq!(ids, vec!["v1", "v2"]);
    }

    #[test]
    fn later_vendor_record_wins() {
        let catalog = Catalog::new(
            vec![
                product("a", vendor("v1", "Collective", None)),
                product("b", vendor("v2", "Spices", None)),
                product("c", vendor("v1", "Collective", Some("Since 2019"))),
            ],
            vec![],
        );

        let vendors = catalog.vendors();
        assert_eq!(vendors.len(), 2);
        assert_eq!(vendors[0].id, "v1");
        assert_eq!(vendors[0].story.as_deref(), Some("Since 2019"));
        assert_eq!(vendors[1].id, "v2");
    }

    #[test]
    fn suggestions_filter_case_insensitively() {
        let catalog = Catalog::builtin();
        assert_eq!(
            catalog.address_suggestions("zone_1", "MALL"),
            vec!["Manda Hill Mall"]
        );
        assert_eq!(catalog.address_suggestions("zone_4", "").len(), 5);
        assert!(catalog.address_suggestions("zone_9", "mall").is_empty());
    }

    #[test]
    fn category_parsing_is_exact() {
        assert_eq!("Oils".parse::<Category>(), Ok(Category::Oils));
        assert!("oils".parse::<Category>().is_err());
        assert!("All".parse::<Category>().is_err());
    }

    #[test]
    fn product_json_uses_storefront_field_names() {
        let catalog = Catalog::builtin();
        let json = serde_json::to_value(&catalog.products()[0]).unwrap();
        assert_eq!(json["category"], "Pantry");
        assert_eq!(json["vendor"]["id"], "v1");
        assert!(json.get("details").is_none());
    }
}
