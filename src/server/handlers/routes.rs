use axum::extract::{Extension, Json};

use crate::api::NewRoute;
use crate::auth::User;
use crate::entities::Route;
use crate::error::Error;
use crate::server::DynAPI;

pub async fn create(
    Extension(api): Extension<DynAPI>,
    Extension(user): Extension<User>,
    Json(params): Json<NewRoute>,
) -> Result<Json<Route>, Error> {
    let route = api.create_route(user, params).await?;

    Ok(route.into())
}
