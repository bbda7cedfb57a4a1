pub mod symptoms; // Natural-language symptom checker
pub mod domains; // Threshold tables per health domain
pub mod response; // Model answer parsing and validation
pub mod llm; // Hosted model providers and prompts
pub mod fallback;
pub mod analyzer;

pub use analyzer::{Analysis, HealthAnalyzer};
pub use fallback::{FallbackGenerator, FallbackMode};
