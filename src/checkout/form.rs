//! The checkout form and its validation.
//!
//! Every missing field is reported in one pass: checks are independent
//! `Validation`s folded together, so a customer who left three fields
//! empty hears about all three.

use super::pricing::{DeliverySelection, Fulfilment};
use super::provider::MobileMoneyProvider;
use crate::catalog::Catalog;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;
use thiserror::Error;

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum FormViolation {
    #[error("a mobile money number is required")]
    MissingPhone,

    #[error("the mobile money number has no digits")]
    InvalidPhone,

    #[error("full name is required")]
    MissingName,

    #[error("email is required")]
    MissingEmail,

    #[error("a delivery address is required")]
    MissingAddress,

    #[error("unknown delivery zone '{0}'")]
    UnknownZone(String),
}

pub type Violations = NonEmptyVec<FormViolation>;

/// What the customer typed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CheckoutForm {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub provider: MobileMoneyProvider,
    pub delivery: DeliverySelection,
    /// Free-text street address; ignored for collection
    pub address: String,
}

impl CheckoutForm {
    /// Blank form with the catalog's first zone preselected.
    pub fn new(catalog: &Catalog) -> Self {
        let delivery = catalog
            .default_zone()
            .map_or(DeliverySelection::Collection, |z| DeliverySelection::Delivery {
                zone_id: z.id.clone(),
            });
        Self {
            full_name: String::new(),
            email: String::new(),
            phone: String::new(),
            provider: MobileMoneyProvider::default(),
            delivery,
            address: String::new(),
        }
    }

    pub fn validate(&self, catalog: &Catalog) -> Validation<ValidatedForm, Violations> {
        let checks = vec![
            required(&self.phone, FormViolation::MissingPhone),
            required(&self.full_name, FormViolation::MissingName),
            required(&self.email, FormViolation::MissingEmail),
        ];

        Validation::all_vec(checks)
            .and(self.fulfilment(catalog))
            .map(|(_, fulfilment)| ValidatedForm {
                full_name: self.full_name.trim().to_string(),
                email: self.email.trim().to_string(),
                phone: self.phone.trim().to_string(),
                provider: self.provider,
                fulfilment,
            })
    }

    fn fulfilment(&self, catalog: &Catalog) -> Validation<Fulfilment, Violations> {
        let DeliverySelection::Delivery { zone_id } = &self.delivery else {
            return Validation::success(Fulfilment::Collection);
        };

        let zone = match catalog.zone(zone_id) {
            Some(zone) => Validation::success(zone.clone()),
            None => Validation::fail(FormViolation::UnknownZone(zone_id.clone())),
        };
        let address = required(&self.address, FormViolation::MissingAddress)
            .map(|()| self.address.trim().to_string());

        zone.and(address)
            .map(|(zone, address)| Fulfilment::Delivery { zone, address })
    }
}

fn required(value: &str, violation: FormViolation) -> Validation<(), Violations> {
    if value.trim().is_empty() {
        Validation::fail(violation)
    } else {
        Validation::success(())
    }
}

/// A form that passed validation, with the zone resolved.
#[derive(Clone, Debug, PartialEq)]
pub struct ValidatedForm {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub provider: MobileMoneyProvider,
    pub fulfilment: Fulfilment,
}

impl ValidatedForm {
    /// Street address plus zone, for deliveries.
    pub fn dropoff(&self) -> Option<String> {
        match &self.fulfilment {
            Fulfilment::Delivery { zone, address } => Some(format!("{address}, {}", zone.name)),
            Fulfilment::Collection => None,
        }
    }
}
