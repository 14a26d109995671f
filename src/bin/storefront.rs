//! Walks one shopper through the storefront: search, cart, checkout.
//!
//! Uses the real gateway timings, so a run takes about ten seconds.
//! `RUST_LOG=debug` shows every machine transition.

use artisan_storefront::cart::Cart;
use artisan_storefront::catalog::{Catalog, CURRENCY};
use artisan_storefront::checkout::{
    CheckoutForm, CheckoutServices, CheckoutSession, CheckoutStep, DeliverySelection,
    MobileMoneyProvider, Submission, TokioScheduler,
};
use artisan_storefront::config::StorefrontConfig;
use artisan_storefront::history::{FileOrderHistory, OrderHistoryStore};
use artisan_storefront::notify::{self, HttpNotifier};
use artisan_storefront::search::{filter, CategoryFilter, VendorFilter};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

fn init_logging() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging();
    let config = StorefrontConfig::default();
    info!(backend = %config.backend_url, "starting storefront");

    let history = Arc::new(FileOrderHistory::new(&config.history_path));
    let past = history.load();
    info!(orders = past.len(), "order history ready");

    let notifier = Arc::new(HttpNotifier::new(&config.backend_url)?);
    notify::spawn_warm_up(notifier.clone());

    let catalog = Arc::new(Catalog::builtin());
    let breakfast = filter(
        catalog.products(),
        "breakfast",
        &CategoryFilter::All,
        &VendorFilter::All,
    );
    for product in &breakfast {
        info!(product = %product.name, price = %product.price, currency = CURRENCY, "search hit");
    }

    let cart = Cart::shared();
    {
        let mut cart = cart.lock();
        for product in &breakfast {
            let _ = cart.add(product);
        }
        cart.update_quantity("1", 1);
        info!(items = cart.item_count(), total = %cart.total(), "cart filled");
    }

    let session = CheckoutSession::new(CheckoutServices {
        catalog: Arc::clone(&catalog),
        cart,
        history: history.clone(),
        notifier,
        scheduler: Arc::new(TokioScheduler),
        timings: config.timings,
    })?;
    session.open()?;

    let form = CheckoutForm {
        full_name: "Mwila Banda".into(),
        email: "mwila@example.com".into(),
        phone: "0977123456".into(),
        provider: MobileMoneyProvider::Mtn,
        delivery: DeliverySelection::Delivery {
            zone_id: "zone_2".into(),
        },
        address: catalog
            .address_suggestions("zone_2", "mall")
            .first()
            .map(|s| s.to_string())
            .unwrap_or_default(),
        ..CheckoutForm::new(&catalog)
    };

    match session.submit(&form) {
        Submission::Accepted { reference, quote } => {
            info!(%reference, total = %quote.total, currency = CURRENCY, "approve the prompt on your phone")
        }
        Submission::Rejected(violations) => {
            for violation in violations.iter() {
                warn!(%violation, "form incomplete");
            }
            return Ok(());
        }
        Submission::Ignored(reason) => {
            warn!(?reason, "submission ignored");
            return Ok(());
        }
    }

    let mut steps = session.watch_step();
    steps.wait_for(|s| *s == CheckoutStep::Success).await?;

    if let Some(order) = session.last_order() {
        info!(
            order_id = %order.id,
            total = %order.total,
            zone = order.delivery_zone.as_deref().unwrap_or("-"),
            "thank you for your order"
        );
    }
    info!(orders = history.list().len(), "order history updated");

    // Let the background notification calls finish logging.
    tokio::time::sleep(Duration::from_secs(2)).await;
    Ok(())
}
