use super::Engine;

use async_trait::async_trait;
use futures::TryStreamExt;
use sqlx::{types::Json, Executor, Row};
use uuid::Uuid;

use crate::{
    api::{NewProvider, ProviderAPI},
    auth::{Platform, User},
    entities::Provider,
    error::{invalid_input_error, not_found_error, validation_error, Error},
};

#[async_trait]
impl ProviderAPI for Engine {
    #[tracing::instrument(skip(self))]
    async fn create_provider(&self, user: User, params: NewProvider) -> Result<Provider, Error> {
        self.authorize(user, "create_provider", Platform::default())?;

        let name = params.name.trim().to_string();
        if name.is_empty() {
            return Err(invalid_input_error());
        }

        let provider = Provider::new(
            name,
            params.logo,
            params.base_fare,
            params.cost_per_km,
            params.policy,
            params.booking_link,
        );

        let mut conn = self.pool.acquire().await?;
        let result = conn
            .execute(
                sqlx::query(
                    "INSERT INTO providers (id, name, data) VALUES ($1, $2, $3) ON CONFLICT (name) DO NOTHING",
                )
                .bind(&provider.id)
                .bind(&provider.name)
                .bind(Json(&provider)),
            )
            .await?;

        if result.rows_affected() == 0 {
            return Err(validation_error("provider name already registered"));
        }

        Ok(provider)
    }

    #[tracing::instrument(skip(self))]
    async fn find_provider(&self, _user: User, id: Uuid) -> Result<Provider, Error> {
        let mut conn = self.pool.acquire().await?;

        let maybe_result = conn
            .fetch_optional(sqlx::query("SELECT data FROM providers WHERE id = $1").bind(&id))
            .await?;

        let result = maybe_result.ok_or_else(|| not_found_error())?;
        let Json(provider) = result.try_get("data")?;

        Ok(provider)
    }

    #[tracing::instrument(skip(self))]
    async fn list_providers(&self, _user: User) -> Result<Vec<Provider>, Error> {
        let mut conn = self.pool.acquire().await?;

        let mut rows = conn.fetch(sqlx::query("SELECT data FROM providers ORDER BY name"));

        let mut providers = Vec::new();
        while let Some(row) = rows.try_next().await? {
            let Json(provider) = row.try_get("data")?;
            providers.push(provider);
        }

        Ok(providers)
    }
}
