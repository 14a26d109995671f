//! One checkout dialog: form entry, the simulated payment and the order it
//! produces.
//!
//! The session owns a [`PaymentMachine`] behind a mutex. A valid submission
//! prices the cart, keeps that snapshot as the attempt's items, fires
//! `Form -> Initiating` and spawns a driver task that runs the timed stages
//! one by one, taking the lock only to fetch the next stage and to apply
//! its outcome. Closing the dialog resets the machine, which bumps its
//! attempt number; a stage that completes after that is rejected as stale
//! and has no effect.
//!
//! The order is built from the snapshot, so it always matches the amount
//! sent to the gateway even if the cart changes while the payment runs.

use super::form::{CheckoutForm, FormViolation, ValidatedForm, Violations};
use super::gateway::{payment_machine, GatewayEnv, PaymentMachine};
use super::pricing::{self, DeliverySelection, Quote};
use super::reference::ReferenceGenerator;
use super::scheduler::Scheduler;
use super::step::CheckoutStep;
use super::CheckoutError;
use crate::cart::{CartItem, SharedCart};
use crate::catalog::{Catalog, PICKUP_ADDRESS};
use crate::config::GatewayTimings;
use crate::core::State;
use crate::effects::{PendingStep, TransitionError};
use crate::history::OrderHistoryStore;
use crate::notify::{self, CustomerDetails, DispatchRequest, Notifier, OrderNotification};
use crate::order::{Order, OrderDraft};
use parking_lot::Mutex;
use std::sync::Arc;
use stillwater::effect::Effect;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info, info_span, warn, Instrument};

/// Collaborators injected into a session.
#[derive(Clone)]
pub struct CheckoutServices {
    pub catalog: Arc<Catalog>,
    pub cart: SharedCart,
    pub history: Arc<dyn OrderHistoryStore>,
    pub notifier: Arc<dyn Notifier>,
    pub scheduler: Arc<dyn Scheduler>,
    pub timings: GatewayTimings,
}

/// Outcome of pressing "pay".
#[derive(Clone, Debug, PartialEq)]
pub enum Submission {
    /// The payment simulation started under `reference`.
    Accepted { reference: String, quote: Quote },
    /// The form is incomplete; nothing changed.
    Rejected(Violations),
    /// The press was dropped; nothing changed.
    Ignored(IgnoreReason),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IgnoreReason {
    Closed,
    InFlight,
    Completed,
    EmptyCart,
}

struct Attempt {
    reference: String,
    form: ValidatedForm,
    /// Cart contents priced at submission
    items: Vec<CartItem>,
}

/// What a successful attempt leaves to do once the lock is released.
struct Completion {
    order: Order,
    notification: OrderNotification,
    dispatch: Option<DispatchRequest>,
}

struct SessionState {
    machine: PaymentMachine,
    open: bool,
    attempt: Option<Attempt>,
    references: ReferenceGenerator,
    last_order: Option<Order>,
    driver: Option<JoinHandle<()>>,
}

struct Inner {
    services: CheckoutServices,
    state: Mutex<SessionState>,
    step: watch::Sender<CheckoutStep>,
}

/// Cheap to clone; clones share the same session.
#[derive(Clone)]
pub struct CheckoutSession {
    inner: Arc<Inner>,
}

impl CheckoutSession {
    pub fn new(services: CheckoutServices) -> Result<Self, CheckoutError> {
        let machine = payment_machine()?;
        let (step, _) = watch::channel(CheckoutStep::Form);

        Ok(Self {
            inner: Arc::new(Inner {
                services,
                state: Mutex::new(SessionState {
                    machine,
                    open: false,
                    attempt: None,
                    references: ReferenceGenerator::new(),
                    last_order: None,
                    driver: None,
                }),
                step,
            }),
        })
    }

    /// Open the dialog at `Form`, discarding any earlier attempt.
    ///
    /// # Errors
    ///
    /// [`CheckoutError::EmptyCart`] when there is nothing to buy; the
    /// session is left as it was.
    pub fn open(&self) -> Result<(), CheckoutError> {
        let mut state = self.inner.state.lock();
        if self.inner.services.cart.lock().is_empty() {
            return Err(CheckoutError::EmptyCart);
        }
        self.inner.restart(&mut state);
        state.open = true;
        debug!("checkout opened");
        Ok(())
    }

    /// Close the dialog. Anywhere short of `Success` this cancels the
    /// attempt: no order is created and the cart is left alone.
    pub fn close(&self) {
        let mut state = self.inner.state.lock();
        state.open = false;

        let step = *state.machine.current_state();
        if step == CheckoutStep::Success {
            return;
        }
        if let Some(attempt) = &state.attempt {
            info!(reference = %attempt.reference, step = step.name(), "checkout cancelled");
        }
        self.inner.restart(&mut state);
    }

    /// Validate `form` and start the payment simulation.
    ///
    /// Spawns the driver on the current Tokio runtime.
    pub fn submit(&self, form: &CheckoutForm) -> Submission {
        let mut state = self.inner.state.lock();
        if !state.open {
            return Submission::Ignored(IgnoreReason::Closed);
        }
        match state.machine.current_state() {
            CheckoutStep::Form => {}
            CheckoutStep::Success => return Submission::Ignored(IgnoreReason::Completed),
            step => {
                debug!(step = step.name(), "duplicate submission ignored");
                return Submission::Ignored(IgnoreReason::InFlight);
            }
        }

        let validated = match form.validate(&self.inner.services.catalog) {
            Validation::Success(validated) => validated,
            Validation::Failure(violations) => {
                debug!(violations = violations.len(), "checkout form rejected");
                return Submission::Rejected(violations);
            }
        };

        let (quote, items) = {
            let cart = self.inner.services.cart.lock();
            if cart.is_empty() {
                return Submission::Ignored(IgnoreReason::EmptyCart);
            }
            (
                pricing::quote(&cart, validated.fulfilment.zone()),
                cart.items().to_vec(),
            )
        };

        let reference = state.references.issue();
        let env = GatewayEnv::new(
            Arc::clone(&self.inner.services.scheduler),
            self.inner.services.timings,
            validated.provider,
            reference.clone(),
            quote.total,
            &validated.phone,
        );

        match state.machine.fire(&CheckoutStep::Initiating, &env) {
            Ok(()) => {}
            Err(TransitionError::GuardBlocked { guard, .. }) => {
                debug!(guard, "checkout start refused");
                return Submission::Rejected(NonEmptyVec::singleton(FormViolation::InvalidPhone));
            }
            Err(err) => {
                warn!(error = %err, "checkout could not start");
                return Submission::Ignored(IgnoreReason::InFlight);
            }
        }

        let attempts = state.references.issued();
        let span = info_span!("checkout", reference = %reference);
        span.in_scope(|| {
            info!(
                attempts,
                provider = validated.provider.label(),
                method = %validated.fulfilment.method(),
                subtotal = %quote.subtotal,
                shipping = %quote.shipping_cost,
                total = %quote.total,
                "payment initiated"
            );
        });
        self.inner.step.send_replace(CheckoutStep::Initiating);

        let run = state.machine.attempt();
        state.attempt = Some(Attempt {
            reference: reference.clone(),
            form: validated,
            items,
        });
        state.driver = Some(tokio::spawn(
            Arc::clone(&self.inner).drive(env, run).instrument(span),
        ));

        Submission::Accepted { reference, quote }
    }

    /// Price the live cart for `selection`.
    pub fn quote(&self, selection: &DeliverySelection) -> Result<Quote, CheckoutError> {
        let zone = match selection {
            DeliverySelection::Delivery { zone_id } => Some(
                self.inner
                    .services
                    .catalog
                    .zone(zone_id)
                    .ok_or_else(|| CheckoutError::UnknownZone(zone_id.clone()))?,
            ),
            DeliverySelection::Collection => None,
        };
        Ok(pricing::quote(&self.inner.services.cart.lock(), zone))
    }

    pub fn step(&self) -> CheckoutStep {
        *self.inner.state.lock().machine.current_state()
    }

    /// Receiver that sees every step change.
    pub fn watch_step(&self) -> watch::Receiver<CheckoutStep> {
        self.inner.step.subscribe()
    }

    pub fn is_open(&self) -> bool {
        self.inner.state.lock().open
    }

    /// Reference of the attempt in progress or just completed.
    pub fn transaction_ref(&self) -> Option<String> {
        self.inner
            .state
            .lock()
            .attempt
            .as_ref()
            .map(|a| a.reference.clone())
    }

    /// Steps visited by the current attempt, starting at `Form`.
    pub fn path(&self) -> Vec<CheckoutStep> {
        let state = self.inner.state.lock();
        let path: Vec<CheckoutStep> = state
            .machine
            .history()
            .get_path()
            .into_iter()
            .copied()
            .collect();
        if path.is_empty() {
            vec![*state.machine.current_state()]
        } else {
            path
        }
    }

    pub fn last_order(&self) -> Option<Order> {
        self.inner.state.lock().last_order.clone()
    }

    pub fn cart(&self) -> SharedCart {
        Arc::clone(&self.inner.services.cart)
    }
}

impl Inner {
    fn restart(&self, state: &mut SessionState) {
        if let Some(driver) = state.driver.take() {
            driver.abort();
        }
        state.machine.reset();
        state.attempt = None;
        self.step.send_replace(CheckoutStep::Form);
    }

    /// Run the timed stages of attempt `run` until `Success`.
    async fn drive(self: Arc<Self>, env: GatewayEnv, run: u64) {
        loop {
            let PendingStep { ticket, effect } = {
                let state = self.state.lock();
                if state.machine.attempt() != run || state.machine.is_final() {
                    return;
                }
                match state.machine.next_action(&env) {
                    Ok(pending) => pending,
                    Err(err) => {
                        warn!(error = %err, "no gateway stage to run");
                        return;
                    }
                }
            };

            let outcome = match effect.run(&env).await {
                Ok(outcome) => outcome,
                Err(err) => {
                    warn!(error = %err, "gateway stage failed");
                    return;
                }
            };

            let completed = {
                let mut state = self.state.lock();
                match state.machine.apply(&ticket, outcome) {
                    Ok(()) => {}
                    Err(TransitionError::Stale { .. }) => {
                        debug!(step = outcome.name(), "stale gateway callback discarded");
                        return;
                    }
                    Err(err) => {
                        warn!(error = %err, "gateway stage rejected");
                        return;
                    }
                }
                info!(from = ticket.from.name(), to = outcome.name(), "checkout step");

                if outcome != CheckoutStep::Success {
                    self.step.send_replace(outcome);
                    continue;
                }
                self.complete(&mut state)
            };

            if let Some(Completion {
                order,
                notification,
                dispatch,
            }) = completed
            {
                self.services.history.append(order);
                notify::fire_and_forget(Arc::clone(&self.services.notifier), notification, dispatch);
            }

            // A reopen while the order was being saved has already moved
            // the dialog back to `Form`.
            let state = self.state.lock();
            if state.machine.attempt() == run {
                self.step.send_replace(CheckoutStep::Success);
            }
            return;
        }
    }

    /// Turn the priced snapshot into an order and empty the cart. The
    /// caller persists the order after releasing the lock.
    fn complete(&self, state: &mut SessionState) -> Option<Completion> {
        state.driver = None;
        let elapsed = state.machine.history().duration();
        let Some(attempt) = state.attempt.as_ref() else {
            warn!("checkout reached success without an attempt");
            return None;
        };
        let form = &attempt.form;

        let order = Order::new(
            attempt.items.clone(),
            OrderDraft {
                transaction_ref: attempt.reference.clone(),
                payment_method: form.provider.payment_method(),
                customer_email: Some(form.email.clone()),
                customer_phone: Some(form.phone.clone()),
                delivery_method: form.fulfilment.method(),
                delivery_zone: form.fulfilment.zone().map(|z| z.name.clone()),
                shipping_cost: form.fulfilment.shipping_cost(),
            },
        );
        info!(
            order_id = %order.id,
            total = %order.total,
            items = order.item_count(),
            elapsed_ms = elapsed.map_or(0, |d| u64::try_from(d.as_millis()).unwrap_or(u64::MAX)),
            "order completed"
        );

        self.services.cart.lock().clear();

        let dropoff = form.dropoff();
        let dispatch = dropoff.clone().map(|dropoff_address| DispatchRequest {
            transaction_ref: attempt.reference.clone(),
            pickup_address: PICKUP_ADDRESS.to_string(),
            dropoff_address,
            customer_phone: form.phone.clone(),
            item_count: order.item_count(),
        });
        let notification = OrderNotification {
            order: order.clone(),
            customer: CustomerDetails {
                name: form.full_name.clone(),
                email: form.email.clone(),
                phone: form.phone.clone(),
                address: dropoff,
            },
        };

        state.last_order = Some(order.clone());
        Some(Completion {
            order,
            notification,
            dispatch,
        })
    }
}
