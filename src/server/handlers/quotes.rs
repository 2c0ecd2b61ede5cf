use axum::extract::{Extension, Form, Json, Query};
use serde::{Deserialize, Serialize};

use crate::auth::User;
use crate::entities::Quote;
use crate::error::Error;
use crate::server::DynAPI;

#[derive(Serialize, Deserialize)]
pub struct QuoteParams {
    origin: String,
    destination: String,
}

#[derive(Serialize, Deserialize)]
pub struct HomeParams {
    origin: Option<String>,
    destination: Option<String>,
}

#[derive(Serialize)]
pub struct HomeView {
    locations: Vec<String>,
    quotes: Option<Vec<Quote>>,
}

// GET /: the quote form bootstrap. When both query parameters are present
// (coming back from an edit) the quotes are computed as well.
pub async fn home(
    Extension(api): Extension<DynAPI>,
    Extension(user): Extension<User>,
    Query(params): Query<HomeParams>,
) -> Result<Json<HomeView>, Error> {
    let locations = api.list_locations(user.clone()).await?;

    let quotes = match (params.origin, params.destination) {
        (Some(origin), Some(destination)) => {
            Some(api.quote_route(user, origin, destination).await?)
        }
        _ => None,
    };

    Ok(Json(HomeView { locations, quotes }))
}

pub async fn create(
    Extension(api): Extension<DynAPI>,
    Extension(user): Extension<User>,
    Form(params): Form<QuoteParams>,
) -> Result<Json<Vec<Quote>>, Error> {
    let quotes = api
        .quote_route(user, params.origin, params.destination)
        .await?;

    Ok(quotes.into())
}
