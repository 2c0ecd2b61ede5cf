use super::Engine;

use std::collections::BTreeSet;

use async_trait::async_trait;
use futures::TryStreamExt;
use rust_decimal::Decimal;
use sqlx::{types::Json, Executor, Row};

use crate::{
    api::{NewRoute, RouteAPI},
    auth::{Platform, User},
    entities::Route,
    error::{invalid_input_error, unexpected_error, Error},
};

#[async_trait]
impl RouteAPI for Engine {
    #[tracing::instrument(skip(self))]
    async fn resolve_route(
        &self,
        _user: User,
        origin: String,
        destination: String,
    ) -> Result<Option<Route>, Error> {
        let mut conn = self.pool.acquire().await?;

        // exact pair first, then the reversed pair; first match wins
        let direct = conn
            .fetch_optional(
                sqlx::query(
                    "SELECT data FROM routes WHERE LOWER(origin) = LOWER($1) AND LOWER(destination) = LOWER($2)",
                )
                .bind(&origin)
                .bind(&destination),
            )
            .await?;

        let row = match direct {
            Some(row) => Some(row),
            None => {
                conn.fetch_optional(
                    sqlx::query(
                        "SELECT data FROM routes WHERE LOWER(origin) = LOWER($2) AND LOWER(destination) = LOWER($1)",
                    )
                    .bind(&origin)
                    .bind(&destination),
                )
                .await?
            }
        };

        match row {
            Some(row) => {
                let Json(route) = row.try_get("data")?;
                Ok(Some(route))
            }
            None => Ok(None),
        }
    }

    #[tracing::instrument(skip(self))]
    async fn resolve_or_create_route(
        &self,
        user: User,
        origin: String,
        destination: String,
        distance_km: Decimal,
        time_min: i32,
    ) -> Result<Route, Error> {
        if let Some(route) = self
            .resolve_route(user.clone(), origin.clone(), destination.clone())
            .await?
        {
            return Ok(route);
        }

        if distance_km <= Decimal::ZERO {
            return Err(invalid_input_error());
        }

        let route = Route::new(
            origin.clone(),
            destination.clone(),
            distance_km,
            time_min,
            Some(user.id),
        );

        let mut conn = self.pool.acquire().await?;
        let result = conn
            .execute(
                sqlx::query(
                    "INSERT INTO routes (id, origin, destination, data) VALUES ($1, $2, $3, $4) ON CONFLICT (LOWER(origin), LOWER(destination)) DO NOTHING",
                )
                .bind(&route.id)
                .bind(&route.origin)
                .bind(&route.destination)
                .bind(Json(&route)),
            )
            .await?;

        if result.rows_affected() == 1 {
            return Ok(route);
        }

        // lost the insert race; the winner's row is there now
        self.resolve_route(user, origin, destination)
            .await?
            .ok_or_else(|| unexpected_error())
    }

    #[tracing::instrument(skip(self))]
    async fn create_route(&self, user: User, params: NewRoute) -> Result<Route, Error> {
        self.authorize(user, "create_route", Platform::default())?;

        let origin = params.origin.trim().to_string();
        let destination = params.destination.trim().to_string();

        if origin.is_empty() || destination.is_empty() {
            return Err(invalid_input_error());
        }
        if origin.to_lowercase() == destination.to_lowercase() {
            return Err(invalid_input_error());
        }
        if params.distance_km <= Decimal::ZERO || params.time_min <= 0 {
            return Err(invalid_input_error());
        }

        let route = Route::new(origin, destination, params.distance_km, params.time_min, None);

        let mut conn = self.pool.acquire().await?;
        let result = conn
            .execute(
                sqlx::query(
                    "INSERT INTO routes (id, origin, destination, data) VALUES ($1, $2, $3, $4) ON CONFLICT (LOWER(origin), LOWER(destination)) DO NOTHING",
                )
                .bind(&route.id)
                .bind(&route.origin)
                .bind(&route.destination)
                .bind(Json(&route)),
            )
            .await?;

        if result.rows_affected() == 0 {
            return Err(invalid_input_error());
        }

        Ok(route)
    }

    #[tracing::instrument(skip(self))]
    async fn list_locations(&self, _user: User) -> Result<Vec<String>, Error> {
        let mut conn = self.pool.acquire().await?;

        let mut rows = conn.fetch(sqlx::query("SELECT origin, destination FROM routes"));

        let mut locations = BTreeSet::new();
        while let Some(row) = rows.try_next().await? {
            locations.insert(row.try_get::<String, _>("origin")?);
            locations.insert(row.try_get::<String, _>("destination")?);
        }

        Ok(locations.into_iter().collect())
    }
}
