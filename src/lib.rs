//! Artisan storefront: catalog search, cart and a mobile-money checkout.
//!
//! The checkout is a small state machine built on Stillwater's "pure core,
//! imperative shell" split. Steps, guards and history are plain values
//! (`core`); the timed gateway round-trips are effects run against an
//! environment (`effects`), so tests can swap the clock and the
//! collaborators.
//!
//! # Modules
//!
//! - **catalog**: products, vendors, categories and delivery zones
//! - **search**: category/vendor filters plus exact and fuzzy text matching
//! - **cart**: one entry per product, quantities never zero
//! - **checkout**: form validation, pricing and the payment simulation
//! - **history**: append-only order history, file backed or in memory
//! - **notify**: best-effort order and dispatch notifications
//!
//! # Example
//!
//! ```rust
//! use artisan_storefront::catalog::Catalog;
//! use artisan_storefront::cart::Cart;
//! use artisan_storefront::checkout::quote;
//! use artisan_storefront::search::{filter, CategoryFilter, VendorFilter};
//! use rust_decimal_macros::dec;
//!
//! let catalog = Catalog::builtin();
//! let found = filter(catalog.products(), "hny", &CategoryFilter::All, &VendorFilter::All);
//! assert_eq!(found[0].name, "Wild Zambezi Honey");
//!
//! let mut cart = Cart::new();
//! let _ = cart.add(found[0]);
//! let q = quote(&cart, catalog.zone("zone_1"));
//! assert_eq!(q.total, dec!(195));
//! ```

pub mod builder;
pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod config;
pub mod core;
pub mod effects;
pub mod history;
pub mod notify;
pub mod order;
pub mod search;
