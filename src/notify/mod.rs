//! Best-effort calls to the order-processing and dispatch services.
//!
//! Nothing here can affect a checkout. [`fire_and_forget`] spawns each call
//! on its own task and only logs the outcome.

mod error;
mod http;

pub use error::NotifyError;
pub use http::HttpNotifier;

use crate::order::Order;
use async_trait::async_trait;
use serde::Serialize;
use std::sync::Arc;
use tracing::{info, warn, Instrument};

#[derive(Clone, Debug, Serialize)]
pub struct CustomerDetails {
    pub name: String,
    pub email: String,
    pub phone: String,
    /// Street address and zone, deliveries only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

/// Body of `POST {backend}/api/create-order`.
#[derive(Clone, Debug, Serialize)]
pub struct OrderNotification {
    pub order: Order,
    pub customer: CustomerDetails,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DispatchRequest {
    pub transaction_ref: String,
    pub pickup_address: String,
    pub dropoff_address: String,
    pub customer_phone: String,
    pub item_count: u32,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DispatchReceipt {
    pub tracking_id: String,
}

#[async_trait]
pub trait Notifier: Send + Sync {
    /// Order confirmation for the customer and the store.
    async fn notify_order(&self, notification: &OrderNotification) -> Result<(), NotifyError>;

    /// Ask a delivery partner to collect the order.
    async fn dispatch_delivery(&self, request: &DispatchRequest) -> Result<DispatchReceipt, NotifyError>;

    /// Wake the backend; the answer is irrelevant.
    async fn warm_up(&self) -> Result<(), NotifyError>;
}

/// Spawn the order notification and, for deliveries, the dispatch request.
///
/// The two calls run independently and are never awaited by the caller.
pub fn fire_and_forget(
    notifier: Arc<dyn Notifier>,
    notification: OrderNotification,
    dispatch: Option<DispatchRequest>,
) {
    let reference = notification.order.transaction_ref.clone();

    if let Some(request) = dispatch {
        let notifier = Arc::clone(&notifier);
        tokio::spawn(
            async move {
                match notifier.dispatch_delivery(&request).await {
                    Ok(receipt) => info!(tracking_id = %receipt.tracking_id, "dispatch requested"),
                    Err(err) => warn!(error = %err, "dispatch request failed"),
                }
            }
            .in_current_span(),
        );
    }

    tokio::spawn(
        async move {
            match notifier.notify_order(&notification).await {
                Ok(()) => info!(%reference, "order notification sent"),
                Err(err) => warn!(%reference, error = %err, "order notification failed"),
            }
        }
        .in_current_span(),
    );
}

/// Ping the backend once in the background.
pub fn spawn_warm_up(notifier: Arc<dyn Notifier>) {
    tokio::spawn(
        async move {
            match notifier.warm_up().await {
                Ok(()) => info!("backend warm-up sent"),
                Err(err) => info!(error = %err, "backend warm-up failed"),
            }
        }
        .in_current_span(),
    );
}
