use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use thiserror::Error;

use crate::pipeline::llm::{GeminiClient, GroqClient, ModelError, ModelRoute};
use crate::pipeline::{FallbackGenerator, FallbackMode, HealthAnalyzer};

/// Application-level constants
pub const APP_NAME: &str = "Momota";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";
pub const DEFAULT_GROQ_PRIMARY: &str = "llama-3.1-70b-versatile";
pub const DEFAULT_GROQ_FALLBACK: &str = "mixtral-8x7b-32768";
pub const DEFAULT_GEMINI_PRIMARY: &str = "gemini-2.0-flash-exp";
pub const DEFAULT_GEMINI_FALLBACK: &str = "gemini-1.5-flash";
pub const DEFAULT_MODEL_TIMEOUT_SECS: u64 = 30;

const DB_FILE_NAME: &str = "momota.db";

/// Log filter used when `RUST_LOG` is not set.
pub fn default_log_filter() -> &'static str {
    "momota_lib=info,tower_http=info,warn"
}

/// Get the application data directory
/// ~/Momota/ on all platforms; the working directory if there is no home.
pub fn app_data_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_NAME)
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid bind address '{0}'")]
    InvalidBindAddr(String),

    #[error("Invalid value for {key}: '{value}'")]
    InvalidValue { key: &'static str, value: String },
}

/// A hosted provider's credentials and model preference list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderConfig {
    pub api_key: String,
    pub models: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub data_dir: PathBuf,
    /// Text model for the symptom checker.
    pub groq: Option<ProviderConfig>,
    /// Vision model for photo analyses.
    pub gemini: Option<ProviderConfig>,
    pub fallback_mode: FallbackMode,
    pub fallback_seed: Option<u64>,
    pub model_timeout_secs: u64,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load from any key lookup. Blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let bind_raw = get("MOMOTA_BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = bind_raw
            .parse()
            .map_err(|_| ConfigError::InvalidBindAddr(bind_raw.clone()))?;

        let data_dir = get("MOMOTA_DATA_DIR").map(PathBuf::from).unwrap_or_else(app_data_dir);

        let groq = get("GROQ_API_KEY").map(|api_key| ProviderConfig {
            api_key,
            models: vec![
                get("GROQ_MODEL_PRIMARY").unwrap_or_else(|| DEFAULT_GROQ_PRIMARY.into()),
                get("GROQ_MODEL_FALLBACK").unwrap_or_else(|| DEFAULT_GROQ_FALLBACK.into()),
            ],
        });

        let gemini = get("GEMINI_API_KEY").map(|api_key| ProviderConfig {
            api_key,
            models: vec![
                get("GEMINI_MODEL_PRIMARY").unwrap_or_else(|| DEFAULT_GEMINI_PRIMARY.into()),
                get("GEMINI_MODEL_FALLBACK").unwrap_or_else(|| DEFAULT_GEMINI_FALLBACK.into()),
            ],
        });

        let fallback_mode = match get("MOMOTA_FALLBACK_MODE") {
            Some(v) => v.parse().map_err(|_| ConfigError::InvalidValue {
                key: "MOMOTA_FALLBACK_MODE",
                value: v.clone(),
            })?,
            None => FallbackMode::Fixed,
        };

        let fallback_seed = get("MOMOTA_FALLBACK_SEED")
            .map(|v| {
                v.parse::<u64>().map_err(|_| ConfigError::InvalidValue {
                    key: "MOMOTA_FALLBACK_SEED",
                    value: v.clone(),
                })
            })
            .transpose()?;

        let model_timeout_secs = get("MOMOTA_MODEL_TIMEOUT_SECS")
            .map(|v| {
                v.parse::<u64>().map_err(|_| ConfigError::InvalidValue {
                    key: "MOMOTA_MODEL_TIMEOUT_SECS",
                    value: v.clone(),
                })
            })
            .transpose()?
            .unwrap_or(DEFAULT_MODEL_TIMEOUT_SECS);

        Ok(Self {
            bind_addr,
            data_dir,
            groq,
            gemini,
            fallback_mode,
            fallback_seed,
            model_timeout_secs,
        })
    }

    pub fn database_path(&self) -> PathBuf {
        self.data_dir.join(DB_FILE_NAME)
    }

    /// Build the analyzer: Gemini answers photo analyses, Groq the symptom
    /// checker. A provider without a key leaves its route empty.
    pub fn build_analyzer(&self) -> Result<HealthAnalyzer, ModelError> {
        let vision = match &self.gemini {
            Some(p) => {
                let client = GeminiClient::hosted(&p.api_key, self.model_timeout_secs)?;
                Some(ModelRoute::new(Arc::new(client), p.models.clone()))
            }
            None => None,
        };
        let text = match &self.groq {
            Some(p) => {
                let client = GroqClient::hosted(&p.api_key, self.model_timeout_secs)?;
                Some(ModelRoute::new(Arc::new(client), p.models.clone()))
            }
            None => None,
        };

        if vision.is_none() {
            tracing::warn!("GEMINI_API_KEY not set, photo analyses will use fallback results");
        }
        if text.is_none() {
            tracing::warn!("GROQ_API_KEY not set, symptom checker will use rules only");
        }

        Ok(HealthAnalyzer::new(
            vision,
            text,
            FallbackGenerator::new(self.fallback_mode, self.fallback_seed),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(pairs: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn app_data_dir_ends_with_app_name() {
        assert!(app_data_dir().ends_with("Momota"));
    }

    #[test]
    fn app_version_matches_cargo() {
        assert_eq!(APP_VERSION, "0.1.0");
    }

    #[test]
    fn defaults_without_environment() {
        let config = load(&[]).unwrap();
        assert_eq!(config.bind_addr.to_string(), DEFAULT_BIND_ADDR);
        assert!(config.groq.is_none());
        assert!(config.gemini.is_none());
        assert_eq!(config.fallback_mode, FallbackMode::Fixed);
        assert_eq!(config.fallback_seed, None);
        assert_eq!(config.model_timeout_secs, DEFAULT_MODEL_TIMEOUT_SECS);
        assert!(config.database_path().ends_with("momota.db"));
    }

    #[test]
    fn provider_keys_enable_routes_with_default_models() {
        let config = load(&[("GROQ_API_KEY", "gk"), ("GEMINI_API_KEY", "mk"), ("GEMINI_MODEL_PRIMARY", "gemini-x")])
            .unwrap();
        let groq = config.groq.unwrap();
        assert_eq!(groq.api_key, "gk");
        assert_eq!(groq.models, vec![DEFAULT_GROQ_PRIMARY, DEFAULT_GROQ_FALLBACK]);
        let gemini = config.gemini.unwrap();
        assert_eq!(gemini.models[0], "gemini-x");
        assert_eq!(gemini.models[1], DEFAULT_GEMINI_FALLBACK);
    }

    #[test]
    fn blank_key_counts_as_absent() {
        let config = load(&[("GROQ_API_KEY", "   ")]).unwrap();
        assert!(config.groq.is_none());
    }

    #[test]
    fn sampled_mode_with_seed() {
        let config = load(&[("MOMOTA_FALLBACK_MODE", "sampled"), ("MOMOTA_FALLBACK_SEED", "7")]).unwrap();
        assert_eq!(config.fallback_mode, FallbackMode::Sampled);
        assert_eq!(config.fallback_seed, Some(7));
    }

    #[test]
    fn bad_numbers_are_errors() {
        assert!(matches!(
            load(&[("MOMOTA_FALLBACK_SEED", "seven")]),
            Err(ConfigError::InvalidValue { key: "MOMOTA_FALLBACK_SEED", .. })
        ));
        assert!(matches!(
            load(&[("MOMOTA_MODEL_TIMEOUT_SECS", "-1")]),
            Err(ConfigError::InvalidValue { .. })
        ));
        assert!(matches!(
            load(&[("MOMOTA_BIND_ADDR", "not an addr")]),
            Err(ConfigError::InvalidBindAddr(_))
        ));
        assert!(load(&[("MOMOTA_FALLBACK_MODE", "random")]).is_err());
    }

    #[test]
    fn analyzer_routes_follow_keys() {
        let offline = load(&[]).unwrap().build_analyzer().unwrap();
        assert!(offline.vision_model().is_none());
        assert!(offline.text_model().is_none());

        let online = load(&[("GROQ_API_KEY", "gk"), ("GEMINI_API_KEY", "mk")])
            .unwrap()
            .build_analyzer()
            .unwrap();
        assert_eq!(
            online.vision_model().as_deref(),
            Some("gemini/gemini-2.0-flash-exp")
        );
        assert_eq!(
            online.text_model().as_deref(),
            Some("groq/llama-3.1-70b-versatile")
        );
    }

    #[test]
    fn data_dir_override() {
        let config = load(&[("MOMOTA_DATA_DIR", "/tmp/momota-test")]).unwrap();
        assert_eq!(config.database_path(), PathBuf::from("/tmp/momota-test/momota.db"));
    }
}
