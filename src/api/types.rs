//! Shared state, response envelope and input sanitising for the API layer.

use std::sync::{Arc, Mutex, MutexGuard};

use rusqlite::Connection;
use serde::Serialize;

use crate::api::error::ApiError;
use crate::db::{self, HealthLogEntry, NewHealthLog};
use crate::models::{DomainResult, Language, ResultSource, SymptomAnalysis};
use crate::pipeline::llm::ImageData;
use crate::pipeline::{Analysis, HealthAnalyzer};
use crate::speech::{SpeechSink, Utterance};

/// Longest free-text symptom description accepted, in characters.
pub const MAX_DESCRIPTION_CHARS: usize = 1000;

// ═══════════════════════════════════════════════════════════
// API context: shared state for the router
// ═══════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct ApiContext {
    pub analyzer: Arc<HealthAnalyzer>,
    pub db: Arc<Mutex<Connection>>,
    pub speech: Arc<dyn SpeechSink>,
}

impl ApiContext {
    pub fn new(analyzer: Arc<HealthAnalyzer>, conn: Connection, speech: Arc<dyn SpeechSink>) -> Self {
        Self {
            analyzer,
            db: Arc::new(Mutex::new(conn)),
            speech,
        }
    }

    pub fn lock_db(&self) -> Result<MutexGuard<'_, Connection>, ApiError> {
        self.db
            .lock()
            .map_err(|_| ApiError::Internal("database lock poisoned".into()))
    }

    /// Build the utterance for `message` and pass it to the speech sink.
    pub fn speak(&self, message: &str, language: Language) -> Utterance {
        let utterance = Utterance::for_language(message, language);
        self.speech.speak(&utterance);
        utterance
    }

    /// Run a domain analysis on the blocking pool and wrap it in the response
    /// envelope. With `save` set, the health log append runs on the same task.
    pub async fn run_domain<F>(
        &self,
        language: Language,
        save: bool,
        work: F,
    ) -> Result<AnalysisResponse<DomainResult>, ApiError>
    where
        F: FnOnce(&HealthAnalyzer) -> Analysis<DomainResult> + Send + 'static,
    {
        let ctx = self.clone();
        let (analysis, log_entry) = run_blocking(move || -> Result<_, ApiError> {
            let analysis = work(ctx.analyzer.as_ref());
            let log_entry = if save {
                ctx.save_result(&analysis.result, language)?
            } else {
                None
            };
            Ok((analysis, log_entry))
        })
        .await??;

        let utterance = self.speak(analysis.result.message().in_language(language), language);
        Ok(AnalysisResponse::new(analysis, utterance, log_entry))
    }

    /// Append `result` to the health log. Blocks on the database lock.
    pub fn save_result(
        &self,
        result: &DomainResult,
        language: Language,
    ) -> Result<Option<HealthLogEntry>, ApiError> {
        let Some(log) = NewHealthLog::from_result(result, language)? else {
            return Ok(None);
        };
        let conn = self.lock_db()?;
        Ok(Some(db::append_log(&conn, log)?))
    }

    pub fn finish_symptoms(
        &self,
        analysis: Analysis<SymptomAnalysis>,
        language: Language,
    ) -> AnalysisResponse<SymptomAnalysis> {
        let utterance = self.speak(analysis.result.message.in_language(language), language);
        AnalysisResponse::new(analysis, utterance, None)
    }
}

// ═══════════════════════════════════════════════════════════
// Response envelope
// ═══════════════════════════════════════════════════════════

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResponse<T> {
    pub success: bool,
    pub data: T,
    pub source: ResultSource,
    pub fallback_used: bool,
    pub utterance: Utterance,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_entry: Option<HealthLogEntry>,
}

impl<T> AnalysisResponse<T> {
    fn new(analysis: Analysis<T>, utterance: Utterance, log_entry: Option<HealthLogEntry>) -> Self {
        let fallback_used = analysis.fallback_used();
        Self {
            success: true,
            data: analysis.result,
            source: analysis.source,
            fallback_used,
            utterance,
            log_entry,
        }
    }
}

// ═══════════════════════════════════════════════════════════
// Input sanitising
// ═══════════════════════════════════════════════════════════

/// Trimmed, non-empty tags in request order.
pub fn sanitize_tags(tags: Vec<String>) -> Vec<String> {
    tags.into_iter()
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .collect()
}

/// Trimmed description, cut to [`MAX_DESCRIPTION_CHARS`].
pub fn sanitize_description(description: &str) -> String {
    description.trim().chars().take(MAX_DESCRIPTION_CHARS).collect()
}

pub fn optional_image(image_data: Option<&str>) -> Result<Option<ImageData>, ApiError> {
    match image_data.map(str::trim).filter(|s| !s.is_empty()) {
        Some(data) => Ok(Some(ImageData::from_data_url(data)?)),
        None => Ok(None),
    }
}

pub fn required_image(image_data: Option<&str>) -> Result<ImageData, ApiError> {
    optional_image(image_data)?.ok_or_else(|| ApiError::BadRequest("imageData is required".into()))
}

/// Run a blocking analysis off the async executor.
pub async fn run_blocking<T, F>(work: F) -> Result<T, ApiError>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    Ok(tokio::task::spawn_blocking(work).await?)
}
