//! Symptom-checker answers from the text model.

use crate::models::{BilingualList, BilingualText, Severity, SymptomAnalysis, Urgency};
use crate::pipeline::symptoms::{analyze_symptoms_combined, guidance};

use super::labels::{Label, LabeledResponse};

/// Confidence for a labeled model answer.
pub const AI_CONFIDENCE: f32 = 0.9;
/// Confidence when the model answered without labels and its prose was
/// folded into the rule-based analysis instead.
pub const ENHANCED_CONFIDENCE: f32 = 0.7;

/// Merge a text-model answer with the rule-based combined analysis.
///
/// Rules always run. The model's URGENCY and SEVERITY may raise the rule
/// result, never lower it, and risk follows the final urgency. Model prose
/// fills the message and recommendations only when the model's own URGENCY
/// matches the final one.
pub fn parse_symptom_response(raw: &str, selected: &[String], description: &str) -> SymptomAnalysis {
    let labels = LabeledResponse::scan(raw);

    let recognised = [
        Label::Urgency,
        Label::Severity,
        Label::AssessmentEn,
        Label::AssessmentBn,
        Label::RecommendationsEn,
        Label::RecommendationsBn,
    ]
    .into_iter()
    .any(|l| labels.has(l));

    if !recognised {
        tracing::warn!("Symptom response had no labels, using enhanced analysis");
        return enhanced_analysis(selected, description, raw);
    }

    let mut analysis = analyze_symptoms_combined(selected, description);

    let asserted_urgency = labels.text(Label::Urgency).and_then(|u| Urgency::from_label(&u));
    let asserted_severity = labels.text(Label::Severity).and_then(|s| Severity::from_label(&s));
    let urgency = asserted_urgency.map_or(analysis.urgency, |u| u.max(analysis.urgency));
    let severity = asserted_severity.map_or(analysis.severity, |s| s.max(analysis.severity));

    if urgency != analysis.urgency {
        tracing::debug!(
            rules = analysis.urgency.as_str(),
            model = urgency.as_str(),
            "Model raised symptom urgency"
        );
        analysis.message = guidance::message_for(urgency);
        analysis.recommendations = guidance::recommendations_for(urgency);
    }

    // Prose written for a lower urgency than the final one would understate it.
    if asserted_urgency == Some(urgency) {
        analysis.message = BilingualText::new(
            labels.text(Label::AssessmentEn).unwrap_or_default(),
            labels.text(Label::AssessmentBn).unwrap_or_default(),
        )
        .or_else(analysis.message);
        analysis.recommendations = BilingualList {
            en: labels.list(Label::RecommendationsEn),
            bn: labels.list(Label::RecommendationsBn),
        }
        .or_else(analysis.recommendations);
    } else {
        tracing::warn!(
            final_urgency = urgency.as_str(),
            asserted = asserted_urgency.map_or("none", |u| u.as_str()),
            "Discarding symptom prose that does not match the final urgency"
        );
    }

    analysis.urgency = urgency;
    analysis.severity = severity;
    analysis.risk_level = urgency.risk_level();
    analysis.confidence = AI_CONFIDENCE;
    analysis.ai_generated = true;
    analysis
}

/// Rule-based analysis over the description plus the model's free text.
pub fn enhanced_analysis(selected: &[String], description: &str, model_text: &str) -> SymptomAnalysis {
    let combined = format!("{description}\n{model_text}");
    let mut analysis = analyze_symptoms_combined(selected, &combined);
    analysis.confidence = ENHANCED_CONFIDENCE;
    analysis.ai_generated = true;
    analysis
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RiskLevel;

    fn tags(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn model_can_raise_urgency() {
        let raw = "URGENCY: URGENT\nSEVERITY: SEVERE\nASSESSMENT_EN: Go to hospital now.";
        let result = parse_symptom_response(raw, &[], "mild nausea");
        assert_eq!(result.urgency, Urgency::Urgent);
        assert_eq!(result.risk_level, RiskLevel::High);
        assert_eq!(result.severity, Severity::Severe);
        assert_eq!(result.message.en, "Go to hospital now.");
        assert!(result.message.is_complete());
        assert!(result.ai_generated);
        assert_eq!(result.confidence, AI_CONFIDENCE);
    }

    #[test]
    fn model_cannot_lower_urgency() {
        let raw = "URGENCY: MONITOR\nSEVERITY: MILD\nASSESSMENT_EN: Nothing to worry about.\nRECOMMENDATIONS_EN: Rest at home";
        let result = parse_symptom_response(raw, &[], "heavy bleeding since morning");
        assert_eq!(result.urgency, Urgency::Urgent);
        assert_eq!(result.risk_level, RiskLevel::High);
        assert_eq!(result.message, guidance::message_for(Urgency::Urgent));
        assert_eq!(result.recommendations, guidance::recommendations_for(Urgency::Urgent));
        assert_ne!(result.message.en, "Nothing to worry about.");
    }

    #[test]
    fn prose_without_urgency_label_is_not_used() {
        let raw = "SEVERITY: MILD\nASSESSMENT_EN: All fine.\nRECOMMENDATIONS_EN: Relax";
        let result = parse_symptom_response(raw, &[], "I have heavy bleeding");
        assert_eq!(result.urgency, Urgency::Urgent);
        assert_eq!(result.message, guidance::message_for(Urgency::Urgent));
        assert!(!result.recommendations.en.contains(&"Relax".to_string()));
    }

    #[test]
    fn model_recommendations_fill_missing_side_from_rules() {
        let raw = "URGENCY: CONSULT\nRECOMMENDATIONS_EN: Call your doctor, Rest";
        let result = parse_symptom_response(raw, &tags(&["fever"]), "feeling unwell");
        assert_eq!(result.recommendations.en, vec!["Call your doctor", "Rest"]);
        assert!(!result.recommendations.bn.is_empty());
    }

    #[test]
    fn unlabeled_answer_uses_enhanced_analysis() {
        let raw = "It sounds like you might have some bleeding, please see someone.";
        let result = parse_symptom_response(raw, &[], "I feel strange");
        assert_eq!(result.confidence, ENHANCED_CONFIDENCE);
        assert!(result.extracted_symptoms.contains(&"bleeding".to_string()));
        assert_eq!(result.risk_level, result.urgency.risk_level());
    }
}
