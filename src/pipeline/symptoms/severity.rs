use crate::models::Severity;

use super::keywords::{contains_any, MODERATE_BN, MODERATE_EN, SEVERE_BN, SEVERE_EN};

/// Map free text to a severity. Severe cues win over moderate ones when
/// both appear; text with neither is mild.
pub fn classify_severity(text: &str) -> Severity {
    if contains_any(text, SEVERE_EN) || contains_any(text, SEVERE_BN) {
        Severity::Severe
    } else if contains_any(text, MODERATE_EN) || contains_any(text, MODERATE_BN) {
        Severity::Moderate
    } else {
        Severity::Mild
    }
}
