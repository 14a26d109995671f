//! Fluent construction of a single [`Transition`].

use crate::builder::error::BuildError;
use crate::core::{Guard, State};
use crate::effects::{Transition, TransitionError, Trigger};
use std::sync::Arc;
use stillwater::effect::BoxedEffect;

pub struct TransitionBuilder<S: State, Env> {
    from: Option<S>,
    to: Option<S>,
    guard: Option<Guard<Env>>,
    trigger: Option<Trigger<S, Env>>,
}

impl<S: State + 'static, Env> TransitionBuilder<S, Env> {
    pub fn new() -> Self {
        Self {
            from: None,
            to: None,
            guard: None,
            trigger: None,
        }
    }

    /// Source state (required).
    pub fn from(mut self, state: S) -> Self {
        self.from = Some(state);
        self
    }

    /// Target state (required).
    pub fn to(mut self, state: S) -> Self {
        self.to = Some(state);
        self
    }

    pub fn guard(mut self, guard: Guard<Env>) -> Self {
        self.guard = Some(guard);
        self
    }

    /// Guard the transition with a labelled closure over the environment.
    pub fn when<F>(mut self, label: &'static str, predicate: F) -> Self
    where
        F: Fn(&Env) -> bool + Send + Sync + 'static,
    {
        self.guard(Guard::new(label, predicate))
    }

    /// The transition is fired by the owner through `StateMachine::fire`.
    pub fn on_event(mut self) -> Self {
        self.trigger = Some(Trigger::Event);
        self
    }

    /// The transition runs `factory`'s effect and advances when it resolves.
    pub fn action<F>(mut self, factory: F) -> Self
    where
        F: Fn() -> BoxedEffect<S, TransitionError, Env> + Send + Sync + 'static,
    {
        self.trigger = Some(Trigger::Timed(Arc::new(factory)));
        self
    }

    pub fn build(self) -> Result<Transition<S, Env>, BuildError> {
        let from = self.from.ok_or(BuildError::MissingFromState)?;
        let to = self.to.ok_or(BuildError::MissingToState)?;
        let trigger = self.trigger.ok_or(BuildError::MissingTrigger)?;

        Ok(Transition {
            from,
            to,
            guard: self.guard,
            trigger,
        })
    }
}

impl<S: State + 'static, Env> Default for TransitionBuilder<S, Env> {
    fn default() -> Self {
        Self::new()
    }
}
