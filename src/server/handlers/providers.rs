use axum::extract::{Extension, Json};

use crate::api::NewProvider;
use crate::auth::User;
use crate::entities::Provider;
use crate::error::Error;
use crate::server::DynAPI;

pub async fn create(
    Extension(api): Extension<DynAPI>,
    Extension(user): Extension<User>,
    Json(params): Json<NewProvider>,
) -> Result<Json<Provider>, Error> {
    let provider = api.create_provider(user, params).await?;

    Ok(provider.into())
}

pub async fn list(
    Extension(api): Extension<DynAPI>,
    Extension(user): Extension<User>,
) -> Result<Json<Vec<Provider>>, Error> {
    let providers = api.list_providers(user).await?;

    Ok(providers.into())
}
