use std::collections::HashSet;
use std::sync::Mutex;

use super::{ImageData, ModelClient, ModelError, Prompt};

/// Mock model client for testing. Returns a fixed answer, optionally
/// failing for named models, and records what it was asked.
pub struct MockModelClient {
    response: Option<String>,
    failing_models: HashSet<String>,
    calls: Mutex<Vec<String>>,
    prompts: Mutex<Vec<Prompt>>,
}

impl MockModelClient {
    pub fn new(response: &str) -> Self {
        Self {
            response: Some(response.to_string()),
            failing_models: HashSet::new(),
            calls: Mutex::new(Vec::new()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// Every call fails with an HTTP 503.
    pub fn failing() -> Self {
        Self {
            response: None,
            ..Self::new("")
        }
    }

    pub fn fail_model(mut self, model: &str) -> Self {
        self.failing_models.insert(model.to_string());
        self
    }

    /// Models called so far, in order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    pub fn last_prompt(&self) -> Option<Prompt> {
        self.prompts.lock().ok().and_then(|p| p.last().cloned())
    }
}

impl ModelClient for MockModelClient {
    fn provider(&self) -> &'static str {
        "mock"
    }

    fn generate(
        &self,
        model: &str,
        prompt: &Prompt,
        _image: Option<&ImageData>,
    ) -> Result<String, ModelError> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(model.to_string());
        }
        if let Ok(mut prompts) = self.prompts.lock() {
            prompts.push(prompt.clone());
        }

        match &self.response {
            Some(text) if !self.failing_models.contains(model) => Ok(text.clone()),
            _ => Err(ModelError::Http {
                provider: "mock",
                status: 503,
                body: "unavailable".into(),
            }),
        }
    }
}
