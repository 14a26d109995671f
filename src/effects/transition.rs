//! Transition definitions and their effectful actions.

use crate::core::{Guard, State};
use std::sync::Arc;
use stillwater::effect::BoxedEffect;

/// Errors raised while moving a machine between states.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TransitionError {
    #[error("No transition available from state '{from}'")]
    NoTransition { from: String },

    #[error("No transition from '{from}' to '{to}'")]
    NotAllowed { from: String, to: String },

    #[error("Guard '{guard}' blocked transition from '{from}' to '{to}'")]
    GuardBlocked {
        from: String,
        to: String,
        guard: &'static str,
    },

    #[error("Action for '{from}' produced '{actual}', expected '{expected}'")]
    UnexpectedTarget {
        from: String,
        expected: String,
        actual: String,
    },

    #[error("Machine moved on: expected to be in '{expected}', found '{actual}'")]
    Stale { expected: String, actual: String },
}

/// Factory producing a fresh effect each time a timed transition runs.
/// The effect resolves to the state the machine should enter.
pub type TransitionAction<S, Env> =
    Arc<dyn Fn() -> BoxedEffect<S, TransitionError, Env> + Send + Sync>;

/// What makes a transition happen.
pub enum Trigger<S: State, Env> {
    /// Fired synchronously by the owner in response to an input event.
    Event,
    /// Runs an effect (typically a delay plus a simulated remote call)
    /// and advances when it resolves.
    Timed(TransitionAction<S, Env>),
}

impl<S: State, Env> Clone for Trigger<S, Env> {
    fn clone(&self) -> Self {
        match self {
            Self::Event => Self::Event,
            Self::Timed(action) => Self::Timed(Arc::clone(action)),
        }
    }
}

/// An edge in the transition table.
///
/// The guard sees the environment the transition would run against, so an
/// edge can be refused on what the owner is about to do rather than on
/// the state alone.
pub struct Transition<S: State, Env> {
    pub from: S,
    pub to: S,
    pub guard: Option<Guard<Env>>,
    pub trigger: Trigger<S, Env>,
}

impl<S: State, Env> Transition<S, Env> {
    /// Source matches and the guard, if any, allows it.
    pub fn can_execute(&self, current: &S, env: &Env) -> bool {
        if *current != self.from {
            return false;
        }
        self.guard.as_ref().is_none_or(|g| g.check(env))
    }

    pub fn is_timed(&self) -> bool {
        matches!(self.trigger, Trigger::Timed(_))
    }
}

impl<S: State, Env> Clone for Transition<S, Env> {
    fn clone(&self) -> Self {
        Self {
            from: self.from.clone(),
            to: self.to.clone(),
            guard: self.guard.clone(),
            trigger: self.trigger.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};
    use stillwater::prelude::*;

    #[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
    enum Kettle {
        Cold,
        Heating,
        Boiled,
    }

    impl State for Kettle {
        fn name(&self) -> &str {
            match self {
                Self::Cold => "Cold",
                Self::Heating => "Heating",
                Self::Boiled => "Boiled",
            }
        }

        fn is_final(&self) -> bool {
            matches!(self, Self::Boiled)
        }
    }

    #[derive(Clone)]
    struct Water {
        litres: u32,
    }

    #[test]
    fn can_execute_matches_source_state() {
        let transition: Transition<Kettle, ()> = Transition {
            from: Kettle::Cold,
            to: Kettle::Heating,
            guard: None,
            trigger: Trigger::Event,
        };

        assert!(transition.can_execute(&Kettle::Cold, &()));
        assert!(!transition.can_execute(&Kettle::Heating, &()));
        assert!(!transition.is_timed());
    }

    #[test]
    fn can_execute_respects_guard() {
        let transition: Transition<Kettle, Water> = Transition {
            from: Kettle::Heating,
            to: Kettle::Boiled,
            guard: Some(Guard::new("has water", |w: &Water| w.litres > 0)),
            trigger: Trigger::Timed(Arc::new(|| pure::<_, TransitionError, Water>(Kettle::Boiled).boxed())),
        };

        assert!(!transition.can_execute(&Kettle::Heating, &Water { litres: 0 }));
        assert!(transition.can_execute(&Kettle::Heating, &Water { litres: 1 }));
        assert!(transition.is_timed());
    }

    #[test]
    fn clone_keeps_trigger_kind() {
        let transition: Transition<Kettle, ()> = Transition {
            from: Kettle::Heating,
            to: Kettle::Boiled,
            guard: None,
            trigger: Trigger::Timed(Arc::new(|| pure::<_, TransitionError, ()>(Kettle::Boiled).boxed())),
        };

        let copy = transition.clone();
        assert!(copy.is_timed());
        assert_eq!(copy.to, Kettle::Boiled);
    }

    #[test]
    fn errors_render_state_names() {
        let err = TransitionError::GuardBlocked {
            from: "Cold".into(),
            to: "Boiled".into(),
            guard: "must heat first",
        };
        assert_eq!(
            err.to_string(),
            "Guard 'must heat first' blocked transition from 'Cold' to 'Boiled'"
        );
    }
}
