//! Triage policy for the symptom checker.
//!
//! Decision order, first match wins:
//! 1. urgent keyword in the text
//! 2. any urgent tag, plus the text-only urgent categories for tags that
//!    were extracted from the description
//! 3. severe severity
//! 4. three or more tags, or moderate severity, gives consult
//! 5. otherwise monitor
//!
//! Urgent signals are evaluated before any count threshold, so a short tag
//! list can never mask them.

use crate::models::{Severity, Urgency};

use super::keywords::{contains_any, URGENT_BN, URGENT_EN, URGENT_TAGS, URGENT_TEXT_TAGS};

/// Tag count at which the checker asks the user to consult a provider.
pub const CONSULT_TAG_COUNT: usize = 3;

/// `tags` is every tag in play; `text_tags` is the subset extracted from `text`.
pub fn classify_urgency(
    tags: &[String],
    text_tags: &[String],
    severity: Severity,
    text: &str,
) -> Urgency {
    if has_urgent_keyword(text) || has_urgent_text_tag(text_tags) {
        return Urgency::Urgent;
    }
    classify_tags_only(tags, severity)
}

/// Steps 2–5 of the policy, for callers that have no free text.
pub fn classify_tags_only(tags: &[String], severity: Severity) -> Urgency {
    if has_urgent_tag(tags) || severity == Severity::Severe {
        Urgency::Urgent
    } else if tags.len() >= CONSULT_TAG_COUNT || severity == Severity::Moderate {
        Urgency::Consult
    } else {
        Urgency::Monitor
    }
}

pub fn has_urgent_keyword(text: &str) -> bool {
    contains_any(text, URGENT_EN) || contains_any(text, URGENT_BN)
}

/// True if any checkbox tag is in the urgent set.
pub fn has_urgent_tag(tags: &[String]) -> bool {
    tags.iter().any(|t| URGENT_TAGS.contains(&t.as_str()))
}

/// True if a category extracted from free text is urgent on its own.
pub fn has_urgent_text_tag(text_tags: &[String]) -> bool {
    text_tags.iter().any(|t| URGENT_TEXT_TAGS.contains(&t.as_str()))
}
