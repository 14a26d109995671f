//! Transaction references for payment attempts.

use rand::Rng;
use std::collections::{HashSet, VecDeque};

const PREFIX: &str = "TFC";
const SPACE: u32 = 1_000_000;
const MAX_DRAWS: usize = 32;
/// How many recent references are checked for collisions.
const RECENT: usize = 1_024;

/// Issues `TFC-nnnnnn` transaction references.
///
/// A reference never repeats any of the last [`RECENT`] issued by the same
/// generator; older ones are forgotten so a long-lived session stays small.
#[derive(Debug, Default)]
pub struct ReferenceGenerator {
    seen: HashSet<String>,
    order: VecDeque<String>,
    issued: u64,
}

impl ReferenceGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn issue(&mut self) -> String {
        let mut rng = rand::rng();
        let mut drawn = None;
        for _ in 0..MAX_DRAWS {
            let candidate = format!("{PREFIX}-{:06}", rng.random_range(0..SPACE));
            if !self.seen.contains(&candidate) {
                drawn = Some(candidate);
                break;
            }
        }

        // Space is crowded; widen with a sequence suffix.
        let reference = drawn.unwrap_or_else(|| {
            format!("{PREFIX}-{:06}-{}", rng.random_range(0..SPACE), self.issued)
        });

        self.remember(reference.clone());
        self.issued += 1;
        reference
    }

    /// References issued over the generator's lifetime.
    pub fn issued(&self) -> u64 {
        self.issued
    }

    fn remember(&mut self, reference: String) {
        if self.order.len() == RECENT {
            if let Some(oldest) = self.order.pop_front() {
                self.seen.remove(&oldest);
            }
        }
        self.seen.insert(reference.clone());
        self.order.push_back(reference);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn references_have_prefix_and_six_digits() {
        let reference = ReferenceGenerator::new().issue();
        let (prefix, digits) = reference.split_once('-').unwrap();
        assert_eq!(prefix, "TFC");
        assert_eq!(digits.len(), 6);
        assert!(digits.chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn recent_references_are_unique() {
        let mut generator = ReferenceGenerator::new();
        let refs: HashSet<_> = (0..RECENT).map(|_| generator.issue()).collect();
        assert_eq!(refs.len(), RECENT);
        assert_eq!(generator.issued(), RECENT as u64);
    }

    #[test]
    fn memory_is_bounded() {
        let mut generator = ReferenceGenerator::new();
        for _ in 0..RECENT + 50 {
            let _ = generator.issue();
        }
        assert_eq!(generator.seen.len(), RECENT);
        assert_eq!(generator.order.len(), RECENT);
        assert_eq!(generator.issued(), (RECENT + 50) as u64);
    }
}
