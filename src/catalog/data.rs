use super::{Category, DeliveryZone, Product, Vendor};
use rust_decimal_macros::dec;

pub const CURRENCY: &str = "ZMW";

/// Where collection orders are picked up, and the dispatch pickup point.
pub const PICKUP_ADDRESS: &str = "The Food Collective HQ, 45 Leopards Hill Road, Lusaka";

fn collective() -> Vendor {
    Vendor {
        id: "v1".into(),
        name: "The Food Collective".into(),
        location: "Lusaka, Zambia".into(),
        email: None,
        story: None,
    }
}

fn mama_tembo() -> Vendor {
    Vendor {
        id: "v2".into(),
        name: "Mama Tembo's Spices".into(),
        location: "Livingstone, Zambia".into(),
        email: None,
        story: None,
    }
}

fn picsum(id: u32) -> String {
    format!("https://picsum.photos/id/{id}/800/800")
}

fn tags(list: &[&str]) -> Vec<String> {
    list.iter().map(|t| t.to_string()).collect()
}

pub(super) fn products() -> Vec<Product> {
    vec![
        Product {
            id: "1".into(),
            name: "Wild Zambezi Honey".into(),
            description: "Pure, organic honey harvested from the Miombo woodlands. Dark, rich, and full of antioxidants.".into(),
            details: None,
            price: dec!(150),
            category: Category::Pantry,
            image: picsum(312),
            vendor: collective(),
            tags: tags(&["organic", "honey", "breakfast"]),
        },
        Product {
            id: "2".into(),
            name: "Moringa Infused Oil".into(),
            description: "Cold-pressed olive oil infused with locally grown Moringa leaves. A nutritional powerhouse for your salads.".into(),
            details: None,
            price: dec!(220),
            category: Category::Oils,
            image: picsum(292),
            vendor: collective(),
            tags: tags(&["oil", "health", "cooking"]),
        },
        Product {
            id: "3".into(),
            name: "Spicy Mango Chutney".into(),
            description: "A perfect blend of sweet ripe mangoes and fiery Zambian bird's eye chillies. Handmade in small batches.".into(),
            details: None,
            price: dec!(85),
            category: Category::Preserves,
            image: picsum(102),
            vendor: mama_tembo(),
            tags: tags(&["spicy", "condiment", "vegan"]),
        },
        Product {
            id: "4".into(),
            name: "Baobab Fruit Powder".into(),
            description: "Superfruit powder rich in Vitamin C and fiber. Add to smoothies or porridge for a tangy citrus boost.".into(),
            details: None,
            price: dec!(120),
            category: Category::Health,
            image: picsum(514),
            vendor: collective(),
            tags: tags(&["superfood", "powder", "baking"]),
        },
        Product {
            id: "5".into(),
            name: "Artisanal Sourdough".into(),
            description: "Slow-fermented rustic loaf with a crispy crust and chewy interior. Baked fresh daily.".into(),
            details: None,
            price: dec!(60),
            category: Category::Bakery,
            image: picsum(999),
            vendor: collective(),
            tags: tags(&["bread", "fresh", "bakery"]),
        },
        Product {
            id: "6".into(),
            name: "Livingstone Roast Coffee".into(),
            description: "Single-origin Arabica beans roasted to perfection. Notes of dark chocolate and citrus.".into(),
            details: None,
            price: dec!(180),
            category: Category::Beverages,
            image: picsum(425),
            vendor: mama_tembo(),
            tags: tags(&["coffee", "drinks", "morning"]),
        },
        Product {
            id: "7".into(),
            name: "Marula Nut Butter".into(),
            description: "Creamy, nutty spread made from wild-harvested Marula nuts. A rare delicacy.".into(),
            details: None,
            price: dec!(250),
            category: Category::Pantry,
            image: picsum(835),
            vendor: collective(),
            tags: tags(&["spread", "nuts", "breakfast"]),
        },
        Product {
            id: "8".into(),
            name: "Dried Hibiscus Flowers".into(),
            description: "Premium dried hibiscus for making refreshing Sindambi tea. Tart and colorful.".into(),
            details: None,
            price: dec!(90),
            category: Category::Beverages,
            image: picsum(113),
            vendor: collective(),
            tags: tags(&["tea", "dried", "flower"]),
        },
    ]
}

fn zone(id: &str, name: &str, price: rust_decimal::Decimal, landmarks: &[&str]) -> DeliveryZone {
    DeliveryZone {
        id: id.into(),
        name: name.into(),
        price,
        landmarks: tags(landmarks),
    }
}

pub(super) fn delivery_zones() -> Vec<DeliveryZone> {
    vec![
        zone(
            "zone_1",
            "Lusaka Central (CBD, Rhodes Park)",
            dec!(45),
            &[
                "Manda Hill Mall",
                "Levy Junction",
                "Cairo Road",
                "Rhodes Park School",
                "Addis Ababa Drive",
                "Fairview Hospital",
            ],
        ),
        zone(
            "zone_2",
            "Inner Suburbs (Woodlands, Kabulonga)",
            dec!(60),
            &[
                "Woodlands Shopping Mall",
                "Kabulonga Centro",
                "Lewanika Mall",
                "Crossroads Shopping Centre",
                "Ibex Hill",
                "State House Area",
            ],
        ),
        zone(
            "zone_3",
            "Outer Suburbs (Makeni, Avondale)",
            dec!(95),
            &[
                "Twin Palm Mall",
                "Avondale Shopping Centre",
                "Makeni Mall",
                "Cosmopolitan Mall",
                "Chalala",
                "Chelston",
            ],
        ),
        zone(
            "zone_4",
            "Outskirts (Chilanga, Chongwe)",
            dec!(150),
            &[
                "Chilanga Golf Club",
                "Sandy's Creations",
                "Garden City Mall",
                "KKIA Airport",
                "Chongwe Town",
            ],
        ),
    ]
}
