mod booking_api;
mod provider_api;
mod quote_api;
mod route_api;

use oso::Oso;
use sqlx::{Executor, Pool, Postgres};

use crate::{
    api::API,
    auth::authorizor,
    error::{unauthorized_error, Error},
};

type Database = Postgres;

pub struct Engine {
    pool: Pool<Database>,
    authorizor: Oso,
}

impl Engine {
    #[tracing::instrument(name = "Engine::new", skip_all)]
    pub async fn new(pool: Pool<Database>) -> Result<Self, Error> {
        // provider registry
        pool.execute(
            "CREATE TABLE IF NOT EXISTS providers (id UUID PRIMARY KEY, name VARCHAR NOT NULL UNIQUE, data JSONB NOT NULL)",
        )
        .await?;

        // route directory; the expression index closes the get-or-create race
        pool.execute(
            "CREATE TABLE IF NOT EXISTS routes (id UUID PRIMARY KEY, origin VARCHAR NOT NULL, destination VARCHAR NOT NULL, data JSONB NOT NULL)",
        )
        .await?;
        pool.execute(
            "CREATE UNIQUE INDEX IF NOT EXISTS routes_pair_key ON routes (LOWER(origin), LOWER(destination))",
        )
        .await?;

        // confirmed quotes
        pool.execute(
            "CREATE TABLE IF NOT EXISTS bookings (id UUID PRIMARY KEY, user_id UUID NOT NULL, created_at TIMESTAMPTZ NOT NULL, data JSONB NOT NULL)",
        )
        .await?;

        Ok(Self {
            pool,
            authorizor: authorizor::new(),
        })
    }
}

impl Engine {
    pub fn authorize<Actor, Action, Resource>(
        &self,
        actor: Actor,
        action: Action,
        resource: Resource,
    ) -> Result<(), Error>
    where
        Actor: oso::ToPolar,
        Action: oso::ToPolar,
        Resource: oso::ToPolar,
    {
        if self.authorizor.is_allowed(actor, action, resource)? {
            return Ok(());
        }

        Err(unauthorized_error())
    }
}

impl API for Engine {}
