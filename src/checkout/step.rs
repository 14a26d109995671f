use crate::state_enum;

state_enum! {
    /// Where a checkout attempt stands. Steps only move forward; an
    /// external reset returns to `Form`.
    #[derive(Default)]
    pub enum CheckoutStep {
        #[default]
        Form,
        Initiating,
        PendingAuthorization,
        Processing,
        Success,
    }
    final: [Success]
}

impl CheckoutStep {
    /// A payment is being simulated and the form is locked.
    pub fn is_in_flight(&self) -> bool {
        matches!(
            self,
            Self::Initiating | Self::PendingAuthorization | Self::Processing
        )
    }
}
