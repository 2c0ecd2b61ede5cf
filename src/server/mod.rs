mod handlers;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    extract::Extension,
    routing::{get, post},
    Router,
};

use crate::server::handlers::{bookings, providers, quotes, routes};
use crate::{api::API, auth::User};

type DynAPI = Arc<dyn API + Send + Sync>;

pub async fn serve<T: API + Sync + Send + 'static>(api: T, addr: SocketAddr) {
    let api = Arc::new(api) as DynAPI;

    let app = Router::new()
        .route("/", get(quotes::home).post(quotes::create))
        .route("/redirect/:provider_id", post(bookings::confirm))
        .route("/my-quotes", get(bookings::list))
        .route("/quotes/:id/edit", get(bookings::find).post(bookings::update))
        .route("/quotes/:id/delete", post(bookings::delete))
        .route("/providers", get(providers::list).post(providers::create))
        .route("/routes", post(routes::create))
        .layer(Extension(api))
        // stand-in identity; the authentication collaborator replaces this
        // layer in a real deployment
        .layer(Extension(User::new_system_user()));

    tracing::info!("listening on {}", addr);

    axum::Server::bind(&addr)
        .serve(app.into_make_service())
        .await
        .unwrap();
}
