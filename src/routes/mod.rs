pub mod cipher;

use axum::Router;
use axum::routing::get;

pub fn api_routes() -> Router {
    Router::new()
        .route("/keygen", get(cipher::keygen))
        .route("/encrypt", get(cipher::encrypt))
        .route("/decrypt", get(cipher::decrypt))
}
