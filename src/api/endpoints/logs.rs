//! Health log endpoints.
//!
//! - `GET /api/logs`: every entry in append order
//! - `POST /api/logs`: append one entry
//! - `DELETE /api/logs`: remove everything

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;

use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::db::{self, HealthLogEntry, NewHealthLog};

#[derive(Serialize)]
pub struct LogsResponse {
    pub logs: Vec<HealthLogEntry>,
}

#[derive(Serialize)]
pub struct ClearResponse {
    pub removed: usize,
}

pub async fn list(State(ctx): State<ApiContext>) -> Result<Json<LogsResponse>, ApiError> {
    let conn = ctx.lock_db()?;
    let logs = db::list_logs(&conn)?;
    Ok(Json(LogsResponse { logs }))
}

pub async fn append(
    State(ctx): State<ApiContext>,
    Json(log): Json<NewHealthLog>,
) -> Result<(StatusCode, Json<HealthLogEntry>), ApiError> {
    if log.result.trim().is_empty() {
        return Err(ApiError::BadRequest("result is required".into()));
    }
    let conn = ctx.lock_db()?;
    let entry = db::append_log(&conn, log)?;
    Ok((StatusCode::CREATED, Json(entry)))
}

pub async fn clear(State(ctx): State<ApiContext>) -> Result<Json<ClearResponse>, ApiError> {
    let conn = ctx.lock_db()?;
    let removed = db::clear_logs(&conn)?;
    Ok(Json(ClearResponse { removed }))
}
