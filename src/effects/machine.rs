//! State machine that executes event-driven and timed transitions.

use crate::core::{Guard, State, StateHistory, StateTransition};
use crate::effects::transition::{Transition, TransitionError, Trigger};
use chrono::Utc;
use stillwater::effect::{BoxedEffect, Effect};
use tracing::debug;

/// Identifies which edge a pending effect belongs to.
#[derive(Clone, Debug, PartialEq)]
pub struct StepTicket<S: State> {
    pub from: S,
    pub to: S,
    pub attempt: u64,
}

/// A timed transition ready to run outside the machine.
///
/// Produced by [`StateMachine::next_action`]. Running the effect does not
/// touch the machine, so the owner can release any lock around the machine
/// while the effect is pending and hand the ticket to
/// [`StateMachine::apply`] afterwards.
pub struct PendingStep<S: State, Env> {
    pub ticket: StepTicket<S>,
    pub effect: BoxedEffect<S, TransitionError, Env>,
}

/// State machine with a fixed transition table.
///
/// `attempt` identifies the current run. Every [`reset`](Self::reset) bumps
/// it, so a [`StepTicket`] issued before the reset is rejected by
/// [`apply`](Self::apply) as stale.
pub struct StateMachine<S: State + 'static, Env: Clone + Send + Sync + 'static> {
    initial: S,
    current: S,
    transitions: Vec<Transition<S, Env>>,
    history: StateHistory<S>,
    attempt: u64,
}

impl<S: State + 'static, Env: Clone + Send + Sync + 'static> StateMachine<S, Env> {
    /// Create a machine sitting in `initial`.
    pub fn new(initial: S) -> Self {
        Self {
            current: initial.clone(),
            initial,
            transitions: Vec::new(),
            history: StateHistory::new(),
            attempt: 0,
        }
    }

    pub fn add_transition(&mut self, transition: Transition<S, Env>) {
        self.transitions.push(transition);
    }

    pub fn current_state(&self) -> &S {
        &self.current
    }

    pub fn initial_state(&self) -> &S {
        &self.initial
    }

    pub fn is_final(&self) -> bool {
        self.current.is_final()
    }

    pub fn history(&self) -> &StateHistory<S> {
        &self.history
    }

    pub fn attempt(&self) -> u64 {
        self.attempt
    }

    /// Return to the initial state, drop the history and start a new attempt.
    ///
    /// Returns the new attempt number.
    pub fn reset(&mut self) -> u64 {
        self.current = self.initial.clone();
        self.history = StateHistory::new();
        self.attempt += 1;
        self.attempt
    }

    /// Fire an event-driven transition from the current state to `to`.
    ///
    /// The edge's guard is checked against `env`, the environment the
    /// following timed stages will run with.
    pub fn fire(&mut self, to: &S, env: &Env) -> Result<(), TransitionError> {
        let transition = self
            .transitions
            .iter()
            .find(|t| t.from == self.current && t.to == *to && !t.is_timed())
            .ok_or_else(|| TransitionError::NotAllowed {
                from: self.current.name().to_string(),
                to: to.name().to_string(),
            })?;

        check_guard(transition.guard.as_ref(), env, &self.current, to)?;

        let from = self.current.clone();
        self.record(from, to.clone());
        Ok(())
    }

    /// Hand out the effect of the timed transition leaving the current state.
    pub fn next_action(&self, env: &Env) -> Result<PendingStep<S, Env>, TransitionError> {
        let transition = self
            .transitions
            .iter()
            .filter(|t| t.is_timed())
            .find(|t| t.can_execute(&self.current, env))
            .ok_or_else(|| TransitionError::NoTransition {
                from: self.current.name().to_string(),
            })?;

        let Trigger::Timed(action) = &transition.trigger else {
            return Err(TransitionError::NoTransition {
                from: self.current.name().to_string(),
            });
        };

        Ok(PendingStep {
            ticket: StepTicket {
                from: transition.from.clone(),
                to: transition.to.clone(),
                attempt: self.attempt,
            },
            effect: action(),
        })
    }

    /// Apply the outcome of a timed transition.
    ///
    /// Rejects tickets from an earlier attempt, tickets whose source is no
    /// longer the current state, and outcomes that disagree with the table.
    pub fn apply(&mut self, ticket: &StepTicket<S>, outcome: S) -> Result<(), TransitionError> {
        if ticket.attempt != self.attempt || ticket.from != self.current {
            return Err(TransitionError::Stale {
                expected: ticket.from.name().to_string(),
                actual: self.current.name().to_string(),
            });
        }
        if outcome != ticket.to {
            return Err(TransitionError::UnexpectedTarget {
                from: ticket.from.name().to_string(),
                expected: ticket.to.name().to_string(),
                actual: outcome.name().to_string(),
            });
        }
        self.record(ticket.from.clone(), outcome);
        Ok(())
    }

    /// Run the next timed transition to completion and apply it.
    ///
    /// Convenience for single-owner use; the machine is borrowed for the
    /// whole duration of the effect.
    pub async fn run_step(&mut self, env: &Env) -> Result<S, TransitionError> {
        let PendingStep { ticket, effect } = self.next_action(env)?;
        let outcome = effect.run(env).await?;
        self.apply(&ticket, outcome.clone())?;
        Ok(outcome)
    }

    fn record(&mut self, from: S, to: S) {
        debug!(from = from.name(), to = to.name(), attempt = self.attempt, "transition applied");
        self.history = self.history.record(StateTransition {
            from,
            to: to.clone(),
            timestamp: Utc::now(),
            attempt: self.attempt,
        });
        self.current = to;
    }
}

fn check_guard<S: State, Env>(
    guard: Option<&Guard<Env>>,
    env: &Env,
    from: &S,
    to: &S,
) -> Result<(), TransitionError> {
    match guard {
        Some(g) if !g.check(env) => Err(TransitionError::GuardBlocked {
            from: from.name().to_string(),
            to: to.name().to_string(),
            guard: g.label(),
        }),
        _ => Ok(()),
    }
}
