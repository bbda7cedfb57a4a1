pub mod gemini;
pub mod groq;
pub mod mock;
pub mod prompts;

pub use gemini::*;
pub use groq::*;
pub use mock::*;
pub use prompts::Prompt;

use std::sync::Arc;

use base64::Engine as _;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ModelError {
    #[error("{provider} is not reachable at {url}")]
    Connection { provider: &'static str, url: String },

    #[error("{provider} request timed out after {secs}s")]
    Timeout { provider: &'static str, secs: u64 },

    #[error("{provider} returned error (status {status}): {body}")]
    Http {
        provider: &'static str,
        status: u16,
        body: String,
    },

    #[error("{provider} returned an empty response")]
    EmptyResponse { provider: &'static str },

    #[error("HTTP client error: {0}")]
    HttpClient(String),

    #[error("Response parsing error: {0}")]
    ResponseParsing(String),

    #[error("Invalid image data: {0}")]
    InvalidImage(String),

    #[error("All {provider} models failed, last error: {last}")]
    AllModelsFailed { provider: &'static str, last: String },

    #[error("No {0} models configured")]
    NoModels(&'static str),
}

/// Map a reqwest send failure the same way for every provider. The request
/// URL is stripped from the message.
pub(crate) fn send_error(
    provider: &'static str,
    base_url: &str,
    timeout_secs: u64,
    e: reqwest::Error,
) -> ModelError {
    if e.is_connect() {
        ModelError::Connection {
            provider,
            url: base_url.to_string(),
        }
    } else if e.is_timeout() {
        ModelError::Timeout {
            provider,
            secs: timeout_secs,
        }
    } else {
        ModelError::HttpClient(e.without_url().to_string())
    }
}

/// An image passed through to a vision model, base64 payload plus MIME type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageData {
    pub mime_type: String,
    pub base64: String,
}

impl ImageData {
    /// Accept either a `data:<mime>;base64,<payload>` URL or a bare base64
    /// payload (assumed JPEG). The payload must decode.
    pub fn from_data_url(input: &str) -> Result<Self, ModelError> {
        let input = input.trim();
        let (mime_type, payload) = match input.strip_prefix("data:") {
            Some(rest) => {
                let (header, payload) = rest
                    .split_once(',')
                    .ok_or_else(|| ModelError::InvalidImage("data URL has no payload".into()))?;
                let mime = header.split(';').next().unwrap_or_default().trim();
                let mime = if mime.is_empty() { "image/jpeg" } else { mime };
                (mime.to_string(), payload)
            }
            None => ("image/jpeg".to_string(), input),
        };

        let payload: String = payload.chars().filter(|c| !c.is_whitespace()).collect();
        if payload.is_empty() {
            return Err(ModelError::InvalidImage("empty payload".into()));
        }
        base64::engine::general_purpose::STANDARD
            .decode(&payload)
            .map_err(|e| ModelError::InvalidImage(e.to_string()))?;

        Ok(Self {
            mime_type,
            base64: payload,
        })
    }

    pub fn data_url(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, self.base64)
    }
}

/// A hosted model provider.
///
/// Calls are blocking; async callers wrap them in `spawn_blocking`.
pub trait ModelClient: Send + Sync {
    fn provider(&self) -> &'static str;

    fn generate(
        &self,
        model: &str,
        prompt: &Prompt,
        image: Option<&ImageData>,
    ) -> Result<String, ModelError>;
}

/// A provider plus its models in preference order.
#[derive(Clone)]
pub struct ModelRoute {
    client: Arc<dyn ModelClient>,
    models: Vec<String>,
}

impl ModelRoute {
    pub fn new(client: Arc<dyn ModelClient>, models: Vec<String>) -> Self {
        let models = models
            .into_iter()
            .map(|m| m.trim().to_string())
            .filter(|m| !m.is_empty())
            .collect();
        Self { client, models }
    }

    pub fn provider(&self) -> &'static str {
        self.client.provider()
    }

    pub fn primary_model(&self) -> Option<&str> {
        self.models.first().map(String::as_str)
    }

    /// Try each model once, in order. First non-empty answer wins.
    pub fn generate(&self, prompt: &Prompt, image: Option<&ImageData>) -> Result<String, ModelError> {
        let provider = self.client.provider();
        let mut last: Option<ModelError> = None;

        for model in &self.models {
            tracing::debug!(provider, model = %model, "Calling model");
            match self.client.generate(model, prompt, image) {
                Ok(text) if !text.trim().is_empty() => {
                    tracing::info!(provider, model = %model, "Model answered");
                    return Ok(text);
                }
                Ok(_) => {
                    tracing::warn!(provider, model = %model, "Model returned empty text");
                    last = Some(ModelError::EmptyResponse { provider });
                }
                Err(e) => {
                    tracing::warn!(provider, model = %model, error = %e, "Model call failed");
                    last = Some(e);
                }
            }
        }

        match last {
            Some(e) => Err(ModelError::AllModelsFailed {
                provider,
                last: e.to_string(),
            }),
            None => Err(ModelError::NoModels(provider)),
        }
    }
}
