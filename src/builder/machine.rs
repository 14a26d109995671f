//! Fluent construction of a [`StateMachine`].

use crate::builder::error::BuildError;
use crate::builder::transition::TransitionBuilder;
use crate::core::State;
use crate::effects::{StateMachine, Transition};

pub struct StateMachineBuilder<S: State + 'static, Env: Clone + Send + Sync + 'static> {
    initial: Option<S>,
    transitions: Vec<Transition<S, Env>>,
}

impl<S: State + 'static, Env: Clone + Send + Sync + 'static> StateMachineBuilder<S, Env> {
    pub fn new() -> Self {
        Self {
            initial: None,
            transitions: Vec::new(),
        }
    }

    /// Initial state (required). `StateMachine::reset` returns here.
    pub fn initial(mut self, state: S) -> Self {
        self.initial = Some(state);
        self
    }

    /// Add a transition from a builder, surfacing its validation error.
    pub fn transition(mut self, builder: TransitionBuilder<S, Env>) -> Result<Self, BuildError> {
        self.transitions.push(builder.build()?);
        Ok(self)
    }

    pub fn add_transition(mut self, transition: Transition<S, Env>) -> Self {
        self.transitions.push(transition);
        self
    }

    /// Build the machine.
    ///
    /// A table with two edges between the same pair of states is rejected;
    /// `fire` would otherwise pick whichever came first.
    pub fn build(self) -> Result<StateMachine<S, Env>, BuildError> {
        let initial = self.initial.ok_or(BuildError::MissingInitialState)?;

        if self.transitions.is_empty() {
            return Err(BuildError::NoTransitions);
        }

        for (i, t) in self.transitions.iter().enumerate() {
            let duplicate = self.transitions[..i]
                .iter()
                .any(|earlier| earlier.from == t.from && earlier.to == t.to);
            if duplicate {
                return Err(BuildError::DuplicateTransition {
                    from: t.from.name().to_string(),
                    to: t.to.name().to_string(),
                });
            }
        }

        let mut machine = StateMachine::new(initial);
        for transition in self.transitions {
            machine.add_transition(transition);
        }
        Ok(machine)
    }
}

impl<S: State + 'static, Env: Clone + Send + Sync + 'static> Default
    for StateMachineBuilder<S, Env>
{
    fn default() -> Self {
        Self::new()
    }
}
