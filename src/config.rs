//! Storefront settings.
//!
//! The backend URL is fixed at build time (`TFC_BACKEND_URL`); nothing here
//! is read from the environment at runtime.

use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_BACKEND_URL: &str = "https://tfc-backend-4eo9.onrender.com";

/// Name of the persisted order-history record.
pub const HISTORY_RECORD: &str = "tfc_orders";

/// Backend base URL baked into this build.
pub fn backend_url() -> &'static str {
    option_env!("TFC_BACKEND_URL").unwrap_or(DEFAULT_BACKEND_URL)
}

/// Simulated gateway round-trips, one per timed checkout step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GatewayTimings {
    /// Provider acknowledges the payment request
    pub initiation: Duration,
    /// Customer approves the prompt on their phone
    pub authorization: Duration,
    /// Provider settles and a rider is assigned
    pub settlement: Duration,
}

impl Default for GatewayTimings {
    fn default() -> Self {
        Self {
            initiation: Duration::from_secs(2),
            authorization: Duration::from_secs(5),
            settlement: Duration::from_secs(3),
        }
    }
}

impl GatewayTimings {
    pub fn total(&self) -> Duration {
        self.initiation + self.authorization + self.settlement
    }
}

#[derive(Clone, Debug)]
pub struct StorefrontConfig {
    pub backend_url: String,
    pub timings: GatewayTimings,
    pub history_path: PathBuf,
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            backend_url: backend_url().to_string(),
            timings: GatewayTimings::default(),
            history_path: PathBuf::from(format!("{HISTORY_RECORD}.json")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_timings_sum_to_ten_seconds() {
        assert_eq!(GatewayTimings::default().total(), Duration::from_secs(10));
    }

    #[test]
    fn history_lives_in_named_record() {
        let config = StorefrontConfig::default();
        assert_eq!(config.history_path, PathBuf::from("tfc_orders.json"));
        assert!(config.backend_url.starts_with("http"));
    }
}
