use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::auth::User;
use crate::entities::{Booking, PricingPolicy, Provider, Quote, Route};
use crate::error::Error;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct NewProvider {
    pub name: String,
    #[serde(default = "default_logo")]
    pub logo: String,
    pub base_fare: Decimal,
    pub cost_per_km: Decimal,
    pub policy: PricingPolicy,
    #[serde(default = "default_booking_link")]
    pub booking_link: String,
}

fn default_logo() -> String {
    "logos/default.png".into()
}

fn default_booking_link() -> String {
    "https://www.google.com".into()
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct NewRoute {
    pub origin: String,
    pub destination: String,
    pub distance_km: Decimal,
    pub time_min: i32,
}

/// The numbers the user already saw and confirmed. Persisted verbatim;
/// see DESIGN.md for the trust model.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ConfirmedQuote {
    pub origin: String,
    pub destination: String,
    pub price: Decimal,
    pub wait_time: i32,
    pub multiplier: Decimal,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BookingUpdate {
    pub origin: String,
    pub destination: String,
    pub provider_id: Uuid,
}

#[async_trait]
pub trait RouteAPI {
    async fn resolve_route(
        &self,
        user: User,
        origin: String,
        destination: String,
    ) -> Result<Option<Route>, Error>;

    async fn resolve_or_create_route(
        &self,
        user: User,
        origin: String,
        destination: String,
        distance_km: Decimal,
        time_min: i32,
    ) -> Result<Route, Error>;

    async fn create_route(&self, user: User, params: NewRoute) -> Result<Route, Error>;

    async fn list_locations(&self, user: User) -> Result<Vec<String>, Error>;
}

#[async_trait]
pub trait ProviderAPI {
    async fn create_provider(&self, user: User, params: NewProvider) -> Result<Provider, Error>;

    async fn find_provider(&self, user: User, id: Uuid) -> Result<Provider, Error>;

    async fn list_providers(&self, user: User) -> Result<Vec<Provider>, Error>;
}

#[async_trait]
pub trait QuoteAPI {
    async fn quote_route(
        &self,
        user: User,
        origin: String,
        destination: String,
    ) -> Result<Vec<Quote>, Error>;
}

#[async_trait]
pub trait BookingAPI {
    async fn create_booking(
        &self,
        user: User,
        provider_id: Uuid,
        quote: ConfirmedQuote,
    ) -> Result<Booking, Error>;

    async fn find_booking(&self, user: User, id: Uuid) -> Result<Booking, Error>;

    async fn list_bookings(&self, user: User) -> Result<Vec<Booking>, Error>;

    async fn update_booking(
        &self,
        user: User,
        id: Uuid,
        params: BookingUpdate,
    ) -> Result<Booking, Error>;

    async fn delete_booking(&self, user: User, id: Uuid) -> Result<(), Error>;
}

pub trait API: RouteAPI + ProviderAPI + QuoteAPI + BookingAPI {}
