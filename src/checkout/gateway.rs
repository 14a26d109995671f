//! The simulated mobile-money protocol as a transition table.
//!
//! `Form -> Initiating` is fired by a valid submission and refused when
//! the wallet number has no digits to charge. The three later edges are
//! timed: each runs one gateway round-trip through the [`Scheduler`] and
//! resolves to the next step.

use super::provider::{mask_msisdn, minor_units, GatewayStage, MobileMoneyProvider};
use super::scheduler::Scheduler;
use super::step::CheckoutStep;
use crate::builder::{BuildError, StateMachineBuilder, TransitionBuilder};
use crate::config::GatewayTimings;
use crate::effects::{StateMachine, TransitionError};
use rust_decimal::Decimal;
use std::sync::Arc;
use std::time::Duration;
use stillwater::effect::BoxedEffect;
use stillwater::prelude::*;
use tracing::info;

/// Everything one payment attempt's stages need.
#[derive(Clone)]
pub struct GatewayEnv {
    pub scheduler: Arc<dyn Scheduler>,
    pub timings: GatewayTimings,
    pub provider: MobileMoneyProvider,
    pub reference: String,
    /// Amount in minor units
    pub amount: Decimal,
    /// Masked wallet number, safe to log
    pub wallet: String,
}

impl GatewayEnv {
    pub fn new(
        scheduler: Arc<dyn Scheduler>,
        timings: GatewayTimings,
        provider: MobileMoneyProvider,
        reference: String,
        total: Decimal,
        phone: &str,
    ) -> Self {
        Self {
            scheduler,
            timings,
            provider,
            reference,
            amount: minor_units(total),
            wallet: mask_msisdn(phone),
        }
    }

    fn send(&self, stage: Option<GatewayStage>) {
        let Some(stage) = stage else { return };
        for call in self.provider.calls(stage) {
            info!(
                reference = %self.reference,
                provider = self.provider.label(),
                endpoint = call.endpoint,
                product_id = ?call.product_id,
                amount = %self.amount,
                wallet = %self.wallet,
                "gateway call"
            );
        }
    }
}

pub type PaymentMachine = StateMachine<CheckoutStep, GatewayEnv>;

/// Label of the guard on `Form -> Initiating`.
pub const WALLET_GUARD: &str = "wallet number present";

/// One round-trip: call the gateway for `before`, wait, call it for
/// `after`, land on `to`.
fn round_trip(
    to: CheckoutStep,
    wait: fn(&GatewayTimings) -> Duration,
    before: Option<GatewayStage>,
    after: Option<GatewayStage>,
) -> BoxedEffect<CheckoutStep, TransitionError, GatewayEnv> {
    from_async(move |env: &GatewayEnv| {
        let env = env.clone();
        async move {
            env.send(before);
            env.scheduler.delay(wait(&env.timings)).await;
            env.send(after);
            Ok::<_, TransitionError>(to)
        }
    })
    .boxed()
}

/// The checkout's transition table, sitting in `Form`.
pub fn payment_machine() -> Result<PaymentMachine, BuildError> {
    StateMachineBuilder::new()
        .initial(CheckoutStep::Form)
        .transition(
            TransitionBuilder::new()
                .from(CheckoutStep::Form)
                .to(CheckoutStep::Initiating)
                .when(WALLET_GUARD, |env: &GatewayEnv| !env.wallet.is_empty())
                .on_event(),
        )?
        .transition(
            TransitionBuilder::new()
                .from(CheckoutStep::Initiating)
                .to(CheckoutStep::PendingAuthorization)
                .action(|| {
                    round_trip(
                        CheckoutStep::PendingAuthorization,
                        |t| t.initiation,
                        Some(GatewayStage::Initiation),
                        Some(GatewayStage::Authorization),
                    )
                }),
        )?
        .transition(
            TransitionBuilder::new()
                .from(CheckoutStep::PendingAuthorization)
                .to(CheckoutStep::Processing)
                .action(|| {
                    round_trip(
                        CheckoutStep::Processing,
                        |t| t.authorization,
                        None,
                        Some(GatewayStage::Settlement),
                    )
                }),
        )?
        .transition(
            TransitionBuilder::new()
                .from(CheckoutStep::Processing)
                .to(CheckoutStep::Success)
                .action(|| {
                    round_trip(
                        CheckoutStep::Success,
                        |t| t.settlement,
                        None,
                        None,
                    )
                }),
        )?
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checkout::scheduler::TokioScheduler;
    use crate::core::State;
    use rust_decimal_macros::dec;
    use tokio::time::Instant;

    fn env() -> GatewayEnv {
        GatewayEnv::new(
            Arc::new(TokioScheduler),
            GatewayTimings::default(),
            MobileMoneyProvider::Mtn,
            "TFC-000042".into(),
            dec!(195),
            "0977123456",
        )
    }

    #[test]
    fn env_masks_wallet_and_scales_amount() {
        let env = env();
        assert_eq!(env.wallet, "******3456");
        assert_eq!(env.amount, dec!(19500));
    }

    #[tokio::test(start_paused = true)]
    async fn stages_take_configured_time() {
        let mut machine = payment_machine().unwrap();
        let env = env();
        let start = Instant::now();

        machine.fire(&CheckoutStep::Initiating, &env).unwrap();
        while !machine.is_final() {
            machine.run_step(&env).await.unwrap();
        }

        let elapsed = start.elapsed();
        assert!(elapsed >= Duration::from_secs(10) && elapsed < Duration::from_secs(11));
        let path: Vec<_> = machine
            .history()
            .get_path()
            .into_iter()
            .map(|s| s.name().to_string())
            .collect();
        assert_eq!(
            path,
            vec!["Form", "Initiating", "PendingAuthorization", "Processing", "Success"]
        );
    }

    #[test]
    fn form_cannot_skip_ahead() {
        let mut machine = payment_machine().unwrap();
        for step in [
            CheckoutStep::PendingAuthorization,
            CheckoutStep::Processing,
            CheckoutStep::Success,
        ] {
            assert!(machine.fire(&step, &env()).is_err());
        }
        assert_eq!(machine.current_state(), &CheckoutStep::Form);
    }

    #[test]
    fn wallet_without_digits_blocks_initiation() {
        let mut machine = payment_machine().unwrap();
        let no_wallet = GatewayEnv::new(
            Arc::new(TokioScheduler),
            GatewayTimings::default(),
            MobileMoneyProvider::Airtel,
            "TFC-000043".into(),
            dec!(150),
            "n/a",
        );

        let err = machine.fire(&CheckoutStep::Initiating, &no_wallet).unwrap_err();
        assert_eq!(
            err,
            TransitionError::GuardBlocked {
                from: "Form".into(),
                to: "Initiating".into(),
                guard: WALLET_GUARD,
            }
        );
        assert_eq!(machine.current_state(), &CheckoutStep::Form);
        assert!(machine.history().transitions().is_empty());
    }
}
