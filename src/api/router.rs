//! HTTP router. Every route lives under `/api/`.

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::api::endpoints;
use crate::api::types::ApiContext;

/// Photos arrive base64-encoded inside JSON.
pub const MAX_BODY_BYTES: usize = 12 * 1024 * 1024;

pub fn api_router(ctx: ApiContext) -> Router {
    let api = Router::new()
        .route("/health", get(endpoints::health::check))
        .route("/analyze-anemia", post(endpoints::analysis::anemia))
        .route("/analyze-bp", post(endpoints::analysis::blood_pressure))
        .route("/analyze-diabetes", post(endpoints::analysis::diabetes))
        .route("/analyze-infection", post(endpoints::analysis::infection))
        .route("/analyze-nutrition", post(endpoints::analysis::nutrition))
        .route("/analyze-symptoms", post(endpoints::symptoms::analyze))
        .route(
            "/logs",
            get(endpoints::logs::list)
                .post(endpoints::logs::append)
                .delete(endpoints::logs::clear),
        )
        .with_state(ctx);

    Router::new()
        .nest("/api", api)
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
