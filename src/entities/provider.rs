use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Provider {
    pub id: Uuid,
    pub name: String,
    pub logo: String,
    pub base_fare: Decimal,
    pub cost_per_km: Decimal,
    pub policy: PricingPolicy,
    pub booking_link: String,
}

/// How a provider prices a ride. `Randomized` draws a fresh multiplier and
/// wait time per quote; `Fixed` is the legacy per-minute parameter set with
/// constant multiplier and wait.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "name", rename_all = "snake_case")]
pub enum PricingPolicy {
    Randomized {
        max_multiplier: Decimal,
    },
    Fixed {
        cost_per_min: Decimal,
        multiplier: Decimal,
        wait_time: i32,
    },
}

impl Provider {
    pub fn new(
        name: String,
        logo: String,
        base_fare: Decimal,
        cost_per_km: Decimal,
        policy: PricingPolicy,
        booking_link: String,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            logo,
            base_fare,
            cost_per_km,
            policy,
            booking_link,
        }
    }
}
