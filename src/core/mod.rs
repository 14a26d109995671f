//! State machine building blocks with no side effects:
//! - the `State` trait
//! - `Guard` predicates
//! - immutable transition history

mod guard;
mod history;
mod state;

pub use guard::Guard;
pub use history::{StateHistory, StateTransition};
pub use state::State;
