//! Natural-language symptom checker: language detection, tag extraction,
//! severity and urgency classification, and the checkbox/free-text merge.

pub mod combined;
pub mod extractor;
pub mod guidance;
pub mod keywords;
pub mod language;
pub mod severity;
pub mod urgency;

pub use combined::analyze_symptoms_combined;
pub use extractor::{extract_symptoms, union_tags};
pub use language::detect_language;
pub use severity::classify_severity;
pub use urgency::{classify_tags_only, classify_urgency, has_urgent_tag};
