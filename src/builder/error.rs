//! Errors raised while assembling a transition table.

use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum BuildError {
    #[error("Initial state not specified. Call .initial(state) before .build()")]
    MissingInitialState,

    #[error("No transitions defined. Add at least one transition")]
    NoTransitions,

    #[error("Transition source state not specified. Call .from(state)")]
    MissingFromState,

    #[error("Transition target state not specified. Call .to(state)")]
    MissingToState,

    #[error("Transition trigger not specified. Call .on_event() or .action(factory)")]
    MissingTrigger,

    #[error("Duplicate transition from '{from}' to '{to}'")]
    DuplicateTransition { from: String, to: String },
}
