//! Merge checkbox selections with a free-text description into one
//! symptom-checker result.

use crate::models::{Language, Severity, SymptomAnalysis, Urgency};

use super::extractor::{extract_symptoms, union_tags};
use super::guidance;
use super::language::detect_language;
use super::severity::classify_severity;
use super::urgency::{classify_tags_only, classify_urgency, CONSULT_TAG_COUNT};

/// Confidence reported for purely rule-based assessments.
pub const RULES_CONFIDENCE: f32 = 0.6;

/// Combine selected tags with a description.
///
/// An empty description falls back to tag-only triage. Otherwise the text is
/// run through detection, extraction, severity and urgency, and the final
/// urgency is urgent when either the selected-tag count or the text analysis
/// says so. Risk always follows the final urgency.
pub fn analyze_symptoms_combined(selected: &[String], description: &str) -> SymptomAnalysis {
    let selected = union_tags(selected, &[]);

    if description.trim().is_empty() {
        let urgency = classify_tags_only(&selected, Severity::Mild);
        return SymptomAnalysis {
            possible_conditions: guidance::possible_conditions(&selected),
            extracted_symptoms: selected,
            severity: Severity::Mild,
            urgency,
            risk_level: urgency.risk_level(),
            recommendations: guidance::recommendations_for(urgency),
            message: guidance::checkbox_only_message(),
            language: Language::Mixed,
            confidence: RULES_CONFIDENCE,
            ai_generated: false,
        };
    }

    let language = detect_language(description);
    let text_tags = extract_symptoms(description, language, &[]);
    let tags = union_tags(&selected, &text_tags);
    let severity = classify_severity(description);
    let text_urgency = classify_urgency(&tags, &text_tags, severity, description);

    let urgency = if selected.len() >= CONSULT_TAG_COUNT || text_urgency == Urgency::Urgent {
        Urgency::Urgent
    } else {
        text_urgency
    };

    tracing::debug!(
        language = language.as_str(),
        tags = tags.len(),
        severity = severity.as_str(),
        urgency = urgency.as_str(),
        "Combined symptom analysis"
    );

    SymptomAnalysis {
        possible_conditions: guidance::possible_conditions(&tags),
        extracted_symptoms: tags,
        severity,
        urgency,
        risk_level: urgency.risk_level(),
        recommendations: guidance::recommendations_for(urgency),
        message: guidance::message_for(urgency),
        language,
        confidence: RULES_CONFIDENCE,
        ai_generated: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RiskLevel;

    fn tags(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn fully_empty_input_is_monitor_low() {
        let result = analyze_symptoms_combined(&[], "");
        assert_eq!(result.urgency, Urgency::Monitor);
        assert_eq!(result.risk_level, RiskLevel::Low);
        assert!(result.extracted_symptoms.is_empty());
        assert!(result.message.is_complete());
        assert!(result.recommendations.is_complete());
    }

    #[test]
    fn empty_description_uses_tag_only_triage() {
        let result = analyze_symptoms_combined(&tags(&["fever", "pain", "nausea"]), "   ");
        assert_eq!(result.urgency, Urgency::Consult);
        assert_eq!(result.risk_level, RiskLevel::Medium);
        assert_eq!(result.language, Language::Mixed);
        assert_eq!(result.message.en, "Assessment based on selected symptoms.");
    }

    #[test]
    fn empty_description_with_urgent_tag_is_urgent() {
        let result = analyze_symptoms_combined(&tags(&["high-fever"]), "");
        assert_eq!(result.urgency, Urgency::Urgent);
        assert_eq!(result.risk_level, RiskLevel::High);
    }

    #[test]
    fn description_tags_are_unioned_with_selection() {
        let result = analyze_symptoms_combined(&tags(&["swelling"]), "I feel dizzy");
        assert_eq!(result.extracted_symptoms, tags(&["swelling", "dizziness"]));
        assert_eq!(result.language, Language::En);
    }

    #[test]
    fn three_selected_tags_force_urgent_with_text() {
        let result =
            analyze_symptoms_combined(&tags(&["fatigue", "nausea", "swelling"]), "a bit tired");
        assert_eq!(result.urgency, Urgency::Urgent);
        assert_eq!(result.risk_level, RiskLevel::High);
    }

    #[test]
    fn urgent_text_is_never_downgraded() {
        let result = analyze_symptoms_combined(&[], "there is heavy bleeding since morning");
        assert_eq!(result.urgency, Urgency::Urgent);
        assert!(result.extracted_symptoms.contains(&"bleeding".to_string()));
    }

    #[test]
    fn breathing_in_text_is_urgent() {
        let result = analyze_symptoms_combined(&[], "I have trouble breathing");
        assert_eq!(result.urgency, Urgency::Urgent);
        assert_eq!(result.extracted_symptoms, tags(&["breathing"]));
    }

    #[test]
    fn selected_breathing_tag_does_not_escalate() {
        let result = analyze_symptoms_combined(&tags(&["breathing"]), "a bit tired");
        assert_eq!(result.urgency, Urgency::Monitor);
        assert_eq!(result.risk_level, RiskLevel::Low);
    }

    #[test]
    fn bengali_description_is_detected() {
        let result = analyze_symptoms_combined(&[], "আমার মাঝারি বমি হচ্ছে");
        assert_eq!(result.language, Language::Bn);
        assert_eq!(result.severity, Severity::Moderate);
        assert_eq!(result.urgency, Urgency::Consult);
    }

    #[test]
    fn risk_always_follows_urgency() {
        let inputs = [
            (tags(&[]), "mild nausea"),
            (tags(&["fever"]), "uncomfortable"),
            (tags(&["bleeding"]), ""),
            (tags(&[]), "unbearable pain"),
        ];
        for (selected, text) in inputs {
            let result = analyze_symptoms_combined(&selected, text);
            assert_eq!(result.risk_level, result.urgency.risk_level());
        }
    }
}
