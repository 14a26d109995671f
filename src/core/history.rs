//! Timestamped record of the transitions a machine has taken.
//!
//! History values are immutable: `record` returns a new history and leaves
//! the original untouched, so a snapshot handed to a caller never changes
//! underneath it.

use super::state::State;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// One move from `from` to `to`.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct StateTransition<S: State> {
    /// The state being left
    pub from: S,
    /// The state being entered
    pub to: S,
    /// When the move was applied
    pub timestamp: DateTime<Utc>,
    /// Which run of the machine produced the move (a checkout attempt number)
    pub attempt: u64,
}

/// Ordered history of state transitions.
///
/// # Example
///
/// ```rust
/// use artisan_storefront::checkout::CheckoutStep;
/// use artisan_storefront::core::{StateHistory, StateTransition};
/// use chrono::Utc;
///
/// let history = StateHistory::new().record(StateTransition {
///     from: CheckoutStep::Form,
///     to: CheckoutStep::Initiating,
///     timestamp: Utc::now(),
///     attempt: 1,
/// });
///
/// assert_eq!(
///     history.get_path(),
///     vec![&CheckoutStep::Form, &CheckoutStep::Initiating]
/// );
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct StateHistory<S: State> {
    transitions: Vec<StateTransition<S>>,
}

impl<S: State> Default for StateHistory<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: State> StateHistory<S> {
    /// Create an empty history.
    pub fn new() -> Self {
        Self {
            transitions: Vec::new(),
        }
    }

    /// Return a new history with `transition` appended.
    pub fn record(&self, transition: StateTransition<S>) -> Self {
        let mut transitions = self.transitions.clone();
        transitions.push(transition);
        Self { transitions }
    }

    /// States visited in order: the first `from`, then every `to`.
    pub fn get_path(&self) -> Vec<&S> {
        let mut path = Vec::with_capacity(self.transitions.len() + 1);
        if let Some(first) = self.transitions.first() {
            path.push(&first.from);
        }
        for transition in &self.transitions {
            path.push(&transition.to);
        }
        path
    }

    /// Time between the first and last recorded transition.
    ///
    /// `None` when nothing has been recorded.
    pub fn duration(&self) -> Option<Duration> {
        let first = self.transitions.first()?;
        let last = self.transitions.last()?;
        last.timestamp
            .signed_duration_since(first.timestamp)
            .to_std()
            .ok()
    }

    /// Most recent transition, if any.
    pub fn last(&self) -> Option<&StateTransition<S>> {
        self.transitions.last()
    }

    /// All transitions in the order they were recorded.
    pub fn transitions(&self) -> &[StateTransition<S>] {
        &self.transitions
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
    enum Light {
        Red,
        Green,
        Amber,
    }

    impl State for Light {
        fn name(&self) -> &str {
            match self {
                Self::Red => "Red",
                Self::Green => "Green",
                Self::Amber => "Amber",
            }
        }
    }

    fn hop(from: Light, to: Light, timestamp: DateTime<Utc>) -> StateTransition<Light> {
        StateTransition {
            from,
            to,
            timestamp,
            attempt: 1,
        }
    }

    #[test]
    fn new_history_is_empty() {
        let history: StateHistory<Light> = StateHistory::new();
        assert!(history.transitions().is_empty());
        assert!(history.get_path().is_empty());
        assert!(history.duration().is_none());
        assert!(history.last().is_none());
    }

    #[test]
    fn record_leaves_original_untouched() {
        let history = StateHistory::new();
        let next = history.record(hop(Light::Red, Light::Green, Utc::now()));

        assert_eq!(history.transitions().len(), 0);
        assert_eq!(next.transitions().len(), 1);
    }

    #[test]
    fn path_follows_recorded_order() {
        let now = Utc::now();
        let history = StateHistory::new()
            .record(hop(Light::Red, Light::Green, now))
            .record(hop(Light::Green, Light::Amber, now))
            .record(hop(Light::Amber, Light::Red, now));

        assert_eq!(
            history.get_path(),
            vec![&Light::Red, &Light::Green, &Light::Amber, &Light::Red]
        );
        assert_eq!(history.last().map(|t| &t.to), Some(&Light::Red));
    }

    #[test]
    fn duration_spans_first_to_last() {
        let start = Utc::now();
        let history = StateHistory::new()
            .record(hop(Light::Red, Light::Green, start))
            .record(hop(
                Light::Green,
                Light::Amber,
                start + chrono::Duration::seconds(7),
            ));

        assert_eq!(history.duration(), Some(Duration::from_secs(7)));
    }

    #[test]
    fn single_transition_has_zero_duration() {
        let history = StateHistory::new().record(hop(Light::Red, Light::Green, Utc::now()));
        assert_eq!(history.duration(), Some(Duration::ZERO));
    }

    #[test]
    fn history_survives_json() {
        let history = StateHistory::new().record(hop(Light::Red, Light::Green, Utc::now()));

        let json = serde_json::to_string(&history).unwrap();
        let back: StateHistory<Light> = serde_json::from_str(&json).unwrap();

        assert_eq!(back.get_path(), vec![&Light::Red, &Light::Green]);
    }
}
