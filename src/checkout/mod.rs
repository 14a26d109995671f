//! Checkout: delivery selection, pricing and the simulated mobile-money
//! payment that turns a cart into an order.

mod form;
mod gateway;
mod pricing;
mod provider;
mod reference;
mod scheduler;
mod session;
mod step;

pub use form::{CheckoutForm, FormViolation, ValidatedForm, Violations};
pub use gateway::{payment_machine, GatewayEnv, PaymentMachine, WALLET_GUARD};
pub use pricing::{quote, DeliverySelection, Fulfilment, Quote};
pub use provider::{mask_msisdn, minor_units, GatewayCall, GatewayStage, MobileMoneyProvider};
pub use reference::ReferenceGenerator;
pub use scheduler::{Scheduler, TokioScheduler};
pub use session::{CheckoutServices, CheckoutSession, IgnoreReason, Submission};
pub use step::CheckoutStep;

use crate::builder::BuildError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CheckoutError {
    #[error("Cannot open checkout with an empty cart")]
    EmptyCart,

    #[error("Unknown delivery zone '{0}'")]
    UnknownZone(String),

    #[error("Checkout state machine is misconfigured: {0}")]
    Build(#[from] BuildError),
}
