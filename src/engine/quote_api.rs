use super::Engine;

use async_trait::async_trait;

use crate::{
    api::{ProviderAPI, QuoteAPI, RouteAPI},
    auth::User,
    entities::Quote,
    error::{validation_error, Error},
    pricing,
};

#[async_trait]
impl QuoteAPI for Engine {
    #[tracing::instrument(skip(self))]
    async fn quote_route(
        &self,
        user: User,
        origin: String,
        destination: String,
    ) -> Result<Vec<Quote>, Error> {
        let origin = origin.trim().to_string();
        let destination = destination.trim().to_string();

        if origin.is_empty() || destination.is_empty() {
            return Err(validation_error("origin and destination are required"));
        }
        if origin.to_lowercase() == destination.to_lowercase() {
            return Err(validation_error("origin and destination cannot be the same"));
        }

        let route = match self
            .resolve_route(user.clone(), origin, destination)
            .await?
        {
            Some(route) => route,
            // an unknown pair means zero quotes, not a fault
            None => return Ok(vec![]),
        };

        let providers = self.list_providers(user).await?;

        Ok(pricing::quote_providers(&providers, &route))
    }
}
