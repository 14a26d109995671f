//! The `State` trait shared by every state machine in the crate.
//!
//! States are plain values. Inspecting them never has side effects, which
//! keeps the checkout flow testable without a runtime.

use serde::{Deserialize, Serialize};
use std::fmt::Debug;

/// Trait for state machine states.
///
/// # Example
///
/// ```rust
/// use artisan_storefront::core::State;
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
/// enum Parcel {
///     Packed,
///     InTransit,
///     Delivered,
///     Lost,
/// }
///
/// impl State for Parcel {
///     fn name(&self) -> &str {
///         match self {
///             Self::Packed => "Packed",
///             Self::InTransit => "InTransit",
///             Self::Delivered => "Delivered",
///             Self::Lost => "Lost",
///         }
///     }
///
///     fn is_final(&self) -> bool {
///         matches!(self, Self::Delivered | Self::Lost)
///     }
/// }
///
/// assert!(Parcel::Delivered.is_final());
/// assert!(!Parcel::InTransit.is_final());
/// ```
pub trait State:
    Clone + PartialEq + Debug + Serialize + for<'de> Deserialize<'de> + Send + Sync
{
    /// Name used in logs and diagnostics.
    fn name(&self) -> &str;

    /// Whether the machine stops here. Defaults to `false`.
    fn is_final(&self) -> bool {
        false
    }
}
