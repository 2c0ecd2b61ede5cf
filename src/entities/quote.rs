use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::entities::{Provider, Route};
use crate::pricing::Estimate;

/// A computed offer for one provider over one route. Never persisted as-is;
/// the user confirms one and it becomes a [`crate::entities::Booking`].
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Quote {
    pub provider_id: Uuid,
    pub provider_name: String,
    pub provider_logo: String,
    pub origin: String,
    pub destination: String,
    pub price: Decimal,
    pub wait_time: i32,
    pub multiplier: Decimal,
}

impl Quote {
    pub fn new(provider: &Provider, route: &Route, estimate: Estimate) -> Self {
        Self {
            provider_id: provider.id,
            provider_name: provider.name.clone(),
            provider_logo: provider.logo.clone(),
            origin: route.origin.clone(),
            destination: route.destination.clone(),
            price: estimate.price,
            wait_time: estimate.wait_time,
            multiplier: estimate.multiplier,
        }
    }
}
