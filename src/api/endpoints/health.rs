//! Health check endpoint.

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::api::types::ApiContext;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub vision_model: Option<String>,
    pub text_model: Option<String>,
}

/// `GET /api/health`: liveness plus the configured models.
pub async fn check(State(ctx): State<ApiContext>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: crate::config::APP_VERSION,
        vision_model: ctx.analyzer.vision_model(),
        text_model: ctx.analyzer.text_model(),
    })
}
