//! Property-based tests for search, the cart and pricing.
//!
//! These tests use proptest to check that the invariants hold across
//! many randomly generated queries and cart histories.

use artisan_storefront::cart::Cart;
use artisan_storefront::catalog::{Catalog, Category, Product};
use artisan_storefront::checkout::quote;
use artisan_storefront::search::{filter, CategoryFilter, VendorFilter};
use proptest::prelude::*;
use proptest::sample::{select, subsequence, Index};
use rust_decimal::Decimal;
use std::collections::BTreeMap;

fn is_subsequence(needle: &str, haystack: &str) -> bool {
    let mut rest = haystack.chars();
    needle.chars().all(|c| rest.any(|h| h == c))
}

fn searchable_fields(product: &Product) -> Vec<String> {
    vec![
        product.name.to_lowercase(),
        product.description.to_lowercase(),
        product.vendor.name.to_lowercase(),
        product.tags.join(" ").to_lowercase(),
    ]
}

fn ids(found: &[&Product]) -> Vec<String> {
    found.iter().map(|p| p.id.clone()).collect()
}

prop_compose! {
    fn category_filter()(pick in prop::option::of(select(Category::ALL.to_vec()))) -> CategoryFilter {
        pick.map_or(CategoryFilter::All, CategoryFilter::Only)
    }
}

prop_compose! {
    fn vendor_filter()(pick in prop::option::of(select(vec!["v1", "v2", "v9"]))) -> VendorFilter {
        VendorFilter::from(pick)
    }
}

#[derive(Clone, Debug)]
enum CartOp {
    Add(&'static str),
    Shift(&'static str, i64),
    Remove(&'static str),
}

fn cart_op() -> impl Strategy<Value = CartOp> {
    let id = select(vec!["1", "2", "3", "4", "5", "6", "7", "8", "42"]);
    prop_oneof![
        3 => id.clone().prop_map(CartOp::Add),
        2 => (id.clone(), -3i64..=3).prop_map(|(id, delta)| CartOp::Shift(id, delta)),
        1 => id.prop_map(CartOp::Remove),
    ]
}

proptest! {
    #[test]
    fn results_keep_catalog_order(
        query in "\\PC{0,12}",
        category in category_filter(),
        vendor in vendor_filter(),
    ) {
        let catalog = Catalog::builtin();
        let found = filter(catalog.products(), &query, &category, &vendor);

        let positions: Vec<usize> = found
            .iter()
            .map(|p| catalog.products().iter().position(|c| c.id == p.id).unwrap())
            .collect();
        prop_assert!(positions.windows(2).all(|w| w[0] < w[1]));

        for product in &found {
            if let CategoryFilter::Only(c) = &category {
                prop_assert_eq!(product.category, *c);
            }
            if let VendorFilter::Only(id) = &vendor {
                prop_assert_eq!(&product.vendor.id, id);
            }
        }
    }

    #[test]
    fn blank_query_excludes_nothing(
        blank in "[ \t]{0,6}",
        category in category_filter(),
        vendor in vendor_filter(),
    ) {
        let catalog = Catalog::builtin();
        let unfiltered = filter(catalog.products(), "", &category, &vendor);
        let found = filter(catalog.products(), &blank, &category, &vendor);
        prop_assert_eq!(ids(&found), ids(&unfiltered));
    }

    #[test]
    fn name_substring_always_matches(
        pick in 0..8usize,
        start in any::<Index>(),
        len in 1..12usize,
        upper in any::<bool>(),
    ) {
        let catalog = Catalog::builtin();
        let product = &catalog.products()[pick];
        let chars: Vec<char> = product.name.chars().collect();
        let from = start.index(chars.len());
        let to = (from + len).min(chars.len());
        let mut query: String = chars[from..to].iter().collect();
        if upper {
            query = query.to_uppercase();
        }
        prop_assume!(!query.trim().is_empty());

        let found = filter(catalog.products(), &query, &CategoryFilter::All, &VendorFilter::All);
        prop_assert!(found.iter().any(|p| p.id == product.id), "{query:?} missed {}", product.name);
    }

    #[test]
    fn scattered_name_letters_match(
        pick in 0..8usize,
        mask in prop::collection::vec(any::<bool>(), 40),
    ) {
        let catalog = Catalog::builtin();
        let product = &catalog.products()[pick];
        let query: String = product
            .name
            .chars()
            .zip(mask.iter().cycle())
            .filter(|(_, keep)| **keep)
            .map(|(c, _)| c)
            .collect();
        prop_assume!(!query.trim().is_empty());

        let found = filter(catalog.products(), &query, &CategoryFilter::All, &VendorFilter::All);
        prop_assert!(found.iter().any(|p| p.id == product.id), "{query:?} missed {}", product.name);
    }

    #[test]
    fn tag_letters_match(pick in 0..8usize, letters in subsequence((0..40).collect::<Vec<usize>>(), 1..5)) {
        let catalog = Catalog::builtin();
        let product = &catalog.products()[pick];
        let tags: Vec<char> = product.tags.join(" ").chars().collect();
        let query: String = letters
            .into_iter()
            .filter(|i| *i < tags.len())
            .map(|i| tags[i])
            .collect();
        prop_assume!(!query.trim().is_empty());

        let found = filter(catalog.products(), &query, &CategoryFilter::All, &VendorFilter::All);
        prop_assert!(found.iter().any(|p| p.id == product.id));
    }

    #[test]
    fn regex_metacharacters_match_literally(query in "[.*+?()\\[\\]{}|^$\\\\']{1,6}") {
        let catalog = Catalog::builtin();
        let found = filter(catalog.products(), &query, &CategoryFilter::All, &VendorFilter::All);

        let needle = query.trim().to_lowercase();
        for product in &found {
            prop_assert!(
                searchable_fields(product).iter().any(|f| is_subsequence(&needle, f)),
                "{query:?} matched {} without its characters",
                product.name
            );
        }
        for product in catalog.products() {
            if searchable_fields(product).iter().any(|f| is_subsequence(&needle, f)) {
                prop_assert!(found.iter().any(|p| p.id == product.id));
            }
        }
    }

    #[test]
    fn cart_tracks_quantities(ops in prop::collection::vec(cart_op(), 0..40)) {
        let catalog = Catalog::builtin();
        let mut cart = Cart::new();
        let mut model: BTreeMap<&str, i64> = BTreeMap::new();

        for op in &ops {
            match *op {
                CartOp::Add(id) => {
                    if let Some(product) = catalog.product(id) {
                        let _ = cart.add(product);
                        *model.entry(id).or_insert(0) += 1;
                    }
                }
                CartOp::Shift(id, delta) => {
                    cart.update_quantity(id, delta);
                    if let Some(qty) = model.get_mut(id) {
                        *qty = (*qty + delta).max(0);
                        if *qty == 0 {
                            model.remove(id);
                        }
                    }
                }
                CartOp::Remove(id) => {
                    cart.remove(id);
                    model.remove(id);
                }
            }
        }

        prop_assert_eq!(cart.items().len(), model.len());
        for item in cart.items() {
            prop_assert!(item.quantity > 0);
            prop_assert_eq!(Some(&i64::from(item.quantity)), model.get(item.product.id.as_str()));
        }

        let expected: Decimal = cart.items().iter().map(|i| i.product.price * Decimal::from(i.quantity)).sum();
        prop_assert_eq!(cart.total(), expected);
        prop_assert_eq!(cart.is_empty(), model.is_empty());
    }

    #[test]
    fn adding_twice_merges(pick in 0..8usize) {
        let catalog = Catalog::builtin();
        let product = &catalog.products()[pick];
        let mut cart = Cart::new();
        let _ = cart.add(product);
        let _ = cart.add(product);

        prop_assert_eq!(cart.items().len(), 1);
        prop_assert_eq!(cart.items()[0].quantity, 2);
        prop_assert_eq!(cart.total(), product.price * Decimal::from(2));
    }

    #[test]
    fn quote_adds_shipping_to_subtotal(
        picks in prop::collection::vec(0..8usize, 1..10),
        zone in prop::option::of(0..4usize),
    ) {
        let catalog = Catalog::builtin();
        let mut cart = Cart::new();
        for pick in picks {
            let _ = cart.add(&catalog.products()[pick]);
        }
        let zone = zone.map(|z| &catalog.zones()[z]);

        let q = quote(&cart, zone);
        prop_assert_eq!(q.subtotal, cart.total());
        prop_assert_eq!(q.total, q.subtotal + q.shipping_cost);
        match zone {
            Some(z) => prop_assert_eq!(q.shipping_cost, z.price),
            None => prop_assert_eq!(q.shipping_cost, Decimal::ZERO),
        }
    }
}
