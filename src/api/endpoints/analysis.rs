//! Photo analysis endpoints.
//!
//! - `POST /api/analyze-anemia`
//! - `POST /api/analyze-bp`
//! - `POST /api/analyze-diabetes` (`mode`: `reading` or `meal`)
//! - `POST /api/analyze-infection` (image optional)
//! - `POST /api/analyze-nutrition`

use axum::extract::State;
use axum::Json;
use serde::Deserialize;

use crate::api::error::ApiError;
use crate::api::types::{
    optional_image, required_image, sanitize_tags, AnalysisResponse, ApiContext,
};
use crate::models::{DomainResult, Language};

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ImageRequest {
    pub image_data: Option<String>,
    pub language: Option<String>,
    pub save: bool,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ImageWithSymptomsRequest {
    pub image_data: Option<String>,
    pub symptoms: Vec<String>,
    pub language: Option<String>,
    pub save: bool,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DiabetesRequest {
    pub image_data: Option<String>,
    pub mode: Option<String>,
    pub language: Option<String>,
    pub save: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DiabetesMode {
    Reading,
    Meal,
}

impl DiabetesMode {
    fn parse(mode: Option<&str>) -> Result<Self, ApiError> {
        match mode.map(|m| m.trim().to_lowercase()).as_deref() {
            None | Some("") | Some("reading") => Ok(DiabetesMode::Reading),
            Some("meal") => Ok(DiabetesMode::Meal),
            Some(other) => Err(ApiError::BadRequest(format!(
                "mode must be 'reading' or 'meal', got '{other}'"
            ))),
        }
    }
}

fn language_of(tag: Option<&str>) -> Language {
    tag.map(Language::preference).unwrap_or(Language::En)
}

type DomainResponse = Result<Json<AnalysisResponse<DomainResult>>, ApiError>;

/// `POST /api/analyze-anemia`: pallor score from an eyelid photo.
pub async fn anemia(State(ctx): State<ApiContext>, Json(req): Json<ImageRequest>) -> DomainResponse {
    let image = required_image(req.image_data.as_deref())?;
    let language = language_of(req.language.as_deref());

    let response = ctx
        .run_domain(language, req.save, move |a| a.analyze_anemia(&image, language))
        .await?;
    Ok(Json(response))
}

/// `POST /api/analyze-bp`: monitor photo plus reported symptoms.
pub async fn blood_pressure(
    State(ctx): State<ApiContext>,
    Json(req): Json<ImageWithSymptomsRequest>,
) -> DomainResponse {
    let image = required_image(req.image_data.as_deref())?;
    let symptoms = sanitize_tags(req.symptoms);
    let language = language_of(req.language.as_deref());

    let response = ctx
        .run_domain(language, req.save, move |a| {
            a.analyze_blood_pressure(&image, &symptoms, language)
        })
        .await?;
    Ok(Json(response))
}

/// `POST /api/analyze-diabetes`: glucometer reading or meal photo.
pub async fn diabetes(State(ctx): State<ApiContext>, Json(req): Json<DiabetesRequest>) -> DomainResponse {
    let mode = DiabetesMode::parse(req.mode.as_deref())?;
    let image = required_image(req.image_data.as_deref())?;
    let language = language_of(req.language.as_deref());

    let response = ctx
        .run_domain(language, req.save, move |a| match mode {
            DiabetesMode::Reading => a.analyze_glucose(&image, language),
            DiabetesMode::Meal => a.analyze_meal_glycemic(&image, language),
        })
        .await?;
    Ok(Json(response))
}

/// `POST /api/analyze-infection`: wound photo and/or symptom tags.
pub async fn infection(
    State(ctx): State<ApiContext>,
    Json(req): Json<ImageWithSymptomsRequest>,
) -> DomainResponse {
    let image = optional_image(req.image_data.as_deref())?;
    let symptoms = sanitize_tags(req.symptoms);
    if image.is_none() && symptoms.is_empty() {
        return Err(ApiError::BadRequest(
            "Provide imageData or at least one symptom".into(),
        ));
    }
    let language = language_of(req.language.as_deref());

    let response = ctx
        .run_domain(language, req.save, move |a| {
            a.analyze_infection(image.as_ref(), &symptoms, language)
        })
        .await?;
    Ok(Json(response))
}

/// `POST /api/analyze-nutrition`: meal photo against daily targets.
pub async fn nutrition(State(ctx): State<ApiContext>, Json(req): Json<ImageRequest>) -> DomainResponse {
    let image = required_image(req.image_data.as_deref())?;
    let language = language_of(req.language.as_deref());

    let response = ctx
        .run_domain(language, req.save, move |a| a.analyze_nutrition(&image, language))
        .await?;
    Ok(Json(response))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn diabetes_mode_defaults_to_reading() {
        assert_eq!(DiabetesMode::parse(None).unwrap(), DiabetesMode::Reading);
        assert_eq!(DiabetesMode::parse(Some(" Meal ")).unwrap(), DiabetesMode::Meal);
        assert!(DiabetesMode::parse(Some("snack")).is_err());
    }

    #[test]
    fn language_defaults_to_english() {
        assert_eq!(language_of(None), Language::En);
        assert_eq!(language_of(Some("bn")), Language::Bn);
        assert_eq!(language_of(Some("fr")), Language::En);
    }

    #[test]
    fn request_fields_are_optional() {
        let req: ImageWithSymptomsRequest = serde_json::from_str("{}").unwrap();
        assert!(req.image_data.is_none());
        assert!(req.symptoms.is_empty());
        assert!(!req.save);
    }
}
