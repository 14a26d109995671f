//! The imperative shell around the pure core.
//!
//! Timed transitions carry a Stillwater effect that runs against an
//! environment (`Env`) and resolves to the next state. The machine never
//! runs an effect while it holds itself: callers take a [`PendingStep`],
//! run it, and hand the ticket back to [`StateMachine::apply`]. That split
//! lets a cancelled run be told apart from the live one by its attempt
//! number.

mod machine;
mod transition;

pub use machine::{PendingStep, StateMachine, StepTicket};
pub use transition::{Transition, TransitionAction, TransitionError, Trigger};
