use super::Engine;

use async_trait::async_trait;
use futures::TryStreamExt;
use rust_decimal::Decimal;
use sqlx::{types::Json, Executor, Row};
use uuid::Uuid;

use crate::{
    api::{BookingAPI, BookingUpdate, ConfirmedQuote, ProviderAPI, RouteAPI},
    auth::User,
    entities::{Booking, Route},
    error::{invalid_input_error, not_found_error, validation_error, Error},
    pricing,
};

impl Engine {
    async fn fetch_booking(&self, id: Uuid) -> Result<Booking, Error> {
        let mut conn = self.pool.acquire().await?;

        let maybe_result = conn
            .fetch_optional(sqlx::query("SELECT data FROM bookings WHERE id = $1").bind(&id))
            .await?;

        let result = maybe_result.ok_or_else(|| not_found_error())?;
        let Json(booking) = result.try_get("data")?;

        Ok(booking)
    }

    async fn fetch_booking_route(&self, booking: &Booking) -> Result<Option<Route>, Error> {
        let id = match booking.route_id {
            Some(id) => id,
            None => return Ok(None),
        };

        let mut conn = self.pool.acquire().await?;

        let maybe_result = conn
            .fetch_optional(sqlx::query("SELECT data FROM routes WHERE id = $1").bind(&id))
            .await?;

        match maybe_result {
            Some(row) => {
                let Json(route) = row.try_get("data")?;
                Ok(Some(route))
            }
            None => Ok(None),
        }
    }

    async fn store_booking(&self, booking: &Booking) -> Result<(), Error> {
        let mut conn = self.pool.acquire().await?;

        conn.execute(
            sqlx::query("UPDATE bookings SET data = $2 WHERE id = $1")
                .bind(&booking.id)
                .bind(Json(booking)),
        )
        .await?;

        Ok(())
    }

    // a stranger's booking id must behave exactly like a missing id
    fn authorize_owner(&self, user: &User, action: &str, booking: &Booking) -> Result<(), Error> {
        if self
            .authorizor
            .is_allowed(user.clone(), action, booking.clone())?
        {
            return Ok(());
        }

        Err(not_found_error())
    }
}

#[async_trait]
impl BookingAPI for Engine {
    #[tracing::instrument(skip(self))]
    async fn create_booking(
        &self,
        user: User,
        provider_id: Uuid,
        quote: ConfirmedQuote,
    ) -> Result<Booking, Error> {
        if quote.price < Decimal::ZERO || quote.wait_time < 0 || quote.multiplier <= Decimal::ZERO
        {
            return Err(invalid_input_error());
        }

        let provider = self.find_provider(user.clone(), provider_id).await?;
        let route = self
            .resolve_route(user.clone(), quote.origin.clone(), quote.destination.clone())
            .await?;

        let booking = Booking::new(
            user.id,
            route.map(|r| r.id),
            quote.origin,
            quote.destination,
            &provider,
            quote.price,
            quote.wait_time,
            quote.multiplier,
        );

        let mut conn = self.pool.acquire().await?;
        conn.execute(
            sqlx::query(
                "INSERT INTO bookings (id, user_id, created_at, data) VALUES ($1, $2, $3, $4)",
            )
            .bind(&booking.id)
            .bind(&booking.user_id)
            .bind(&booking.created_at)
            .bind(Json(&booking)),
        )
        .await?;

        Ok(booking)
    }

    #[tracing::instrument(skip(self))]
    async fn find_booking(&self, user: User, id: Uuid) -> Result<Booking, Error> {
        let booking = self.fetch_booking(id).await?;
        self.authorize_owner(&user, "read", &booking)?;

        Ok(booking)
    }

    #[tracing::instrument(skip(self))]
    async fn list_bookings(&self, user: User) -> Result<Vec<Booking>, Error> {
        let mut conn = self.pool.acquire().await?;

        let mut rows = conn.fetch(
            sqlx::query("SELECT data FROM bookings WHERE user_id = $1 ORDER BY created_at DESC")
                .bind(&user.id),
        );

        let mut bookings = Vec::new();
        while let Some(row) = rows.try_next().await? {
            let Json(booking) = row.try_get("data")?;
            bookings.push(booking);
        }

        Ok(bookings)
    }

    #[tracing::instrument(skip(self))]
    async fn update_booking(
        &self,
        user: User,
        id: Uuid,
        params: BookingUpdate,
    ) -> Result<Booking, Error> {
        let origin = params.origin.trim().to_string();
        let destination = params.destination.trim().to_string();

        if origin.is_empty() || destination.is_empty() {
            return Err(validation_error("origin and destination are required"));
        }
        if origin.to_lowercase() == destination.to_lowercase() {
            return Err(validation_error("origin and destination cannot be the same"));
        }

        let mut booking = self.fetch_booking(id).await?;
        self.authorize_owner(&user, "update", &booking)?;

        let provider = self.find_provider(user.clone(), params.provider_id).await?;
        let current_route = self.fetch_booking_route(&booking).await?;

        let same_route = match &current_route {
            Some(route) => route.connects(&origin, &destination),
            None => booking.matches_pair(&origin, &destination),
        };

        if !same_route {
            // placeholder distance/time carried over from the previous route,
            // not a fresh geocode
            let (distance_km, time_min) = match &current_route {
                Some(route) => (route.distance_km, route.time_min),
                None => (Decimal::ZERO, 0),
            };

            let route = self
                .resolve_or_create_route(
                    user.clone(),
                    origin.clone(),
                    destination.clone(),
                    distance_km,
                    time_min,
                )
                .await?;

            let estimate = pricing::estimate(&provider, &route)?;
            booking.route_id = Some(route.id);
            booking.origin = origin;
            booking.destination = destination;
            booking.reprice(&provider, estimate);
        } else {
            if booking.provider_id != Some(provider.id) {
                let route = current_route.ok_or_else(|| invalid_input_error())?;
                let estimate = pricing::estimate(&provider, &route)?;
                booking.reprice(&provider, estimate);
            }

            // same physical route, possibly queried the other way round;
            // only the displayed direction moves
            booking.origin = origin;
            booking.destination = destination;
        }

        self.store_booking(&booking).await?;

        Ok(booking)
    }

    #[tracing::instrument(skip(self))]
    async fn delete_booking(&self, user: User, id: Uuid) -> Result<(), Error> {
        let booking = self.fetch_booking(id).await?;
        self.authorize_owner(&user, "delete", &booking)?;

        let mut conn = self.pool.acquire().await?;
        conn.execute(sqlx::query("DELETE FROM bookings WHERE id = $1").bind(&booking.id))
            .await?;

        Ok(())
    }
}
