//! Pure predicates that gate transitions and submissions.

use std::fmt;
use std::sync::Arc;

/// A named, pure predicate over `T`.
///
/// Guards are checked before a transition fires. They are cheap to clone so
/// a transition table can be copied without re-boxing its predicates.
///
/// # Example
///
/// ```rust
/// use artisan_storefront::core::Guard;
///
/// let has_phone = Guard::new("phone present", |phone: &String| !phone.trim().is_empty());
///
/// assert!(has_phone.check(&"971234567".to_string()));
/// assert!(!has_phone.check(&"   ".to_string()));
/// assert_eq!(has_phone.label(), "phone present");
/// ```
pub struct Guard<T: ?Sized> {
    label: &'static str,
    predicate: Arc<dyn Fn(&T) -> bool + Send + Sync>,
}

impl<T: ?Sized> Guard<T> {
    /// Create a guard from a pure predicate.
    pub fn new<F>(label: &'static str, predicate: F) -> Self
    where
        F: Fn(&T) -> bool + Send + Sync + 'static,
    {
        Guard {
            label,
            predicate: Arc::new(predicate),
        }
    }

    /// Evaluate the predicate.
    pub fn check(&self, value: &T) -> bool {
        (self.predicate)(value)
    }

    /// Short description used when a guard blocks something.
    pub fn label(&self) -> &'static str {
        self.label
    }
}

impl<T: ?Sized> Clone for Guard<T> {
    fn clone(&self) -> Self {
        Self {
            label: self.label,
            predicate: Arc::clone(&self.predicate),
        }
    }
}

impl<T: ?Sized> fmt::Debug for Guard<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Guard").field("label", &self.label).finish()
    }
}
