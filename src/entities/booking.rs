use chrono::{DateTime, Utc};
use oso::PolarClass;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::entities::Provider;
use crate::pricing::Estimate;

/// A confirmed quote, owned by the user who confirmed it. The price,
/// wait time and multiplier are the record of what was quoted; they are
/// never recomputed on read. `created_at` is set once and survives edits.
#[derive(Clone, Debug, Serialize, Deserialize, PolarClass)]
pub struct Booking {
    #[polar(attribute)]
    pub id: Uuid,
    #[polar(attribute)]
    pub user_id: Uuid,
    pub route_id: Option<Uuid>,
    pub origin: String,
    pub destination: String,
    pub provider_id: Option<Uuid>,
    pub provider_name: String,
    pub price: Decimal,
    pub wait_time: i32,
    pub multiplier: Decimal,
    pub created_at: DateTime<Utc>,
}

impl Booking {
    pub fn new(
        user_id: Uuid,
        route_id: Option<Uuid>,
        origin: String,
        destination: String,
        provider: &Provider,
        price: Decimal,
        wait_time: i32,
        multiplier: Decimal,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            route_id,
            origin,
            destination,
            provider_id: Some(provider.id),
            provider_name: provider.name.clone(),
            price,
            wait_time,
            multiplier,
            created_at: Utc::now(),
        }
    }

    /// Whether the booking already names this exact ordered pair,
    /// case-insensitively.
    pub fn matches_pair(&self, origin: &str, destination: &str) -> bool {
        self.origin.to_lowercase() == origin.to_lowercase()
            && self.destination.to_lowercase() == destination.to_lowercase()
    }

    pub fn reprice(&mut self, provider: &Provider, estimate: Estimate) {
        self.provider_id = Some(provider.id);
        self.provider_name = provider.name.clone();
        self.price = estimate.price;
        self.wait_time = estimate.wait_time;
        self.multiplier = estimate.multiplier;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_pair_is_ordered_and_case_insensitive() {
        let booking = Booking {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            route_id: None,
            origin: "Airport".into(),
            destination: "Downtown".into(),
            provider_id: None,
            provider_name: "FastCab".into(),
            price: Decimal::new(300000, 2),
            wait_time: 5,
            multiplier: Decimal::ONE,
            created_at: Utc::now(),
        };

        assert!(booking.matches_pair("airport", "DOWNTOWN"));
        // a reversed pair is the same physical route but not the same pair
        assert!(!booking.matches_pair("Downtown", "Airport"));
    }
}
