pub mod cli;
pub mod config;
pub mod error;
pub mod form;
pub mod proxy;
pub mod routes;
pub mod rsa;

use axum::Router;
use axum::http::{HeaderName, HeaderValue};
use tower_http::set_header::SetResponseHeaderLayer;

/// Build the cipher API router.
pub fn build_app() -> Router {
    Router::new()
        .merge(routes::api_routes())
        .route("/health", axum::routing::get(health))
        .layer(SetResponseHeaderLayer::overriding(
            HeaderName::from_static("x-content-type-options"),
            HeaderValue::from_static("nosniff"),
        ))
}

async fn health() -> &'static str {
    "ok"
}
