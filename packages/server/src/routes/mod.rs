use axum::{Router, routing::get};
use utoipa_axum::{router::OpenApiRouter, routes};

use crate::handlers;
use crate::state::AppState;

/// JSON endpoints, documented through OpenAPI. Mounted under `/api`.
pub fn api_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new().routes(routes!(handlers::api::lookup_qrx))
}

/// Server-rendered pages.
pub fn page_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::home::home))
        .route("/qrx/{id}", get(handlers::qrx::qrx_page))
        .route("/get-app", get(handlers::get_app::get_app))
}
