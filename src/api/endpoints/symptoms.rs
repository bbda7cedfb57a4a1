//! `POST /api/analyze-symptoms`: symptom checker over tags and free text.

use axum::extract::State;
use axum::Json;
use serde::Deserialize;

use crate::api::error::ApiError;
use crate::api::types::{run_blocking, sanitize_description, sanitize_tags, AnalysisResponse, ApiContext};
use crate::models::{Language, SymptomAnalysis};

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SymptomRequest {
    pub symptoms: Vec<String>,
    pub description: String,
    pub language: Option<String>,
}

pub async fn analyze(
    State(ctx): State<ApiContext>,
    Json(req): Json<SymptomRequest>,
) -> Result<Json<AnalysisResponse<SymptomAnalysis>>, ApiError> {
    let selected = sanitize_tags(req.symptoms);
    let description = sanitize_description(&req.description);
    if selected.is_empty() && description.is_empty() {
        return Err(ApiError::BadRequest(
            "Select a symptom or describe how you feel".into(),
        ));
    }
    let language = req
        .language
        .as_deref()
        .map(Language::preference)
        .unwrap_or(Language::En);

    let analyzer = ctx.analyzer.clone();
    let analysis =
        run_blocking(move || analyzer.analyze_symptoms(&selected, &description, language)).await?;
    Ok(Json(ctx.finish_symptoms(analysis, language)))
}
