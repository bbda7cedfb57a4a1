//! Health analysis service: model call, parse and validate, or fallback.
//!
//! Every operation returns a result. Model and parse failures are logged and
//! answered from the fallback generator or the rule-based symptom checker.

use serde::Serialize;

use crate::models::{Domain, DomainResult, GlucoseBasis, Language, ResultSource, SymptomAnalysis};
use crate::pipeline::domains::infection;
use crate::pipeline::fallback::FallbackGenerator;
use crate::pipeline::llm::{prompts, ImageData, ModelRoute, Prompt};
use crate::pipeline::response::{parse_and_validate, parse_symptom_response, ParseContext};
use crate::pipeline::symptoms::analyze_symptoms_combined;

/// A result plus where it came from.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Analysis<T> {
    pub result: T,
    pub source: ResultSource,
}

impl<T> Analysis<T> {
    pub fn fallback_used(&self) -> bool {
        self.source == ResultSource::Fallback
    }
}

pub struct HealthAnalyzer {
    vision: Option<ModelRoute>,
    text: Option<ModelRoute>,
    fallback: FallbackGenerator,
}

impl HealthAnalyzer {
    pub fn new(vision: Option<ModelRoute>, text: Option<ModelRoute>, fallback: FallbackGenerator) -> Self {
        Self {
            vision,
            text,
            fallback,
        }
    }

    /// No models configured; everything comes from rules and fallback.
    pub fn offline(fallback: FallbackGenerator) -> Self {
        Self::new(None, None, fallback)
    }

    /// `provider/model` of the primary vision model, if any.
    pub fn vision_model(&self) -> Option<String> {
        describe(self.vision.as_ref())
    }

    pub fn text_model(&self) -> Option<String> {
        describe(self.text.as_ref())
    }

    pub fn analyze_anemia(&self, image: &ImageData, language: Language) -> Analysis<DomainResult> {
        self.analyze_image(
            Domain::Anemia,
            prompts::anemia(language),
            image,
            &ParseContext::default(),
        )
    }

    pub fn analyze_blood_pressure(
        &self,
        image: &ImageData,
        symptoms: &[String],
        language: Language,
    ) -> Analysis<DomainResult> {
        self.analyze_image(
            Domain::BloodPressure,
            prompts::blood_pressure(symptoms, language),
            image,
            &ParseContext::with_symptoms(symptoms.to_vec()),
        )
    }

    pub fn analyze_glucose(&self, image: &ImageData, language: Language) -> Analysis<DomainResult> {
        self.analyze_image(
            Domain::Diabetes,
            prompts::glucose_reading(language),
            image,
            &ParseContext::for_basis(GlucoseBasis::Reading),
        )
    }

    pub fn analyze_meal_glycemic(&self, image: &ImageData, language: Language) -> Analysis<DomainResult> {
        self.analyze_image(
            Domain::Diabetes,
            prompts::meal_glycemic(language),
            image,
            &ParseContext::for_basis(GlucoseBasis::Meal),
        )
    }

    /// Without an image, triage runs on the reported tags alone.
    pub fn analyze_infection(
        &self,
        image: Option<&ImageData>,
        symptoms: &[String],
        language: Language,
    ) -> Analysis<DomainResult> {
        let ctx = ParseContext::with_symptoms(symptoms.to_vec());
        match image {
            Some(image) => self.analyze_image(
                Domain::Infection,
                prompts::infection(symptoms, language),
                image,
                &ctx,
            ),
            None => {
                let result = DomainResult::Infection(infection::assess(symptoms));
                log_result(&result, ResultSource::Rules);
                Analysis {
                    result,
                    source: ResultSource::Rules,
                }
            }
        }
    }

    pub fn analyze_nutrition(&self, image: &ImageData, language: Language) -> Analysis<DomainResult> {
        self.analyze_image(
            Domain::Nutrition,
            prompts::nutrition(language),
            image,
            &ParseContext::default(),
        )
    }

    pub fn analyze_symptoms(
        &self,
        selected: &[String],
        description: &str,
        language: Language,
    ) -> Analysis<SymptomAnalysis> {
        let Some(route) = &self.text else {
            tracing::debug!("No text model configured, using rule-based symptom analysis");
            return Analysis {
                result: analyze_symptoms_combined(selected, description),
                source: ResultSource::Fallback,
            };
        };

        let prompt = prompts::symptoms(selected, description, language);
        match route.generate(&prompt, None) {
            Ok(raw) => {
                let result = parse_symptom_response(&raw, selected, description);
                tracing::info!(
                    provider = route.provider(),
                    urgency = result.urgency.as_str(),
                    risk = result.risk_level.as_str(),
                    "Symptom analysis complete"
                );
                Analysis {
                    result,
                    source: ResultSource::Model,
                }
            }
            Err(e) => {
                tracing::warn!(
                    provider = route.provider(),
                    error = %e,
                    "Symptom model failed, using rule-based analysis"
                );
                Analysis {
                    result: analyze_symptoms_combined(selected, description),
                    source: ResultSource::Fallback,
                }
            }
        }
    }

    fn analyze_image(
        &self,
        domain: Domain,
        prompt: Prompt,
        image: &ImageData,
        ctx: &ParseContext,
    ) -> Analysis<DomainResult> {
        let Some(route) = &self.vision else {
            tracing::debug!(domain = domain.as_str(), "No vision model configured");
            return self.fall_back(domain, ctx);
        };

        let raw = match route.generate(&prompt, Some(image)) {
            Ok(raw) => raw,
            Err(e) => {
                tracing::warn!(
                    domain = domain.as_str(),
                    provider = route.provider(),
                    error = %e,
                    "Vision model failed, using fallback"
                );
                return self.fall_back(domain, ctx);
            }
        };

        match parse_and_validate(domain, &raw, ctx) {
            Ok(result) => {
                log_result(&result, ResultSource::Model);
                Analysis {
                    result,
                    source: ResultSource::Model,
                }
            }
            Err(e) => {
                tracing::warn!(domain = domain.as_str(), error = %e, "Unusable model answer, using fallback");
                self.fall_back(domain, ctx)
            }
        }
    }

    fn fall_back(&self, domain: Domain, ctx: &ParseContext) -> Analysis<DomainResult> {
        let result = self.fallback.generate(domain, ctx);
        log_result(&result, ResultSource::Fallback);
        Analysis {
            result,
            source: ResultSource::Fallback,
        }
    }
}

fn describe(route: Option<&ModelRoute>) -> Option<String> {
    let route = route?;
    Some(format!("{}/{}", route.provider(), route.primary_model()?))
}

fn log_result(result: &DomainResult, source: ResultSource) {
    tracing::info!(
        domain = result.domain().as_str(),
        risk = result.risk_level().as_str(),
        retake = result.is_retake(),
        source = source.as_str(),
        "Analysis complete"
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::models::{RetakeReason, RiskLevel, Urgency};
    use crate::pipeline::fallback::FallbackMode;
    use crate::pipeline::llm::MockModelClient;

    fn image() -> ImageData {
        ImageData::from_data_url("data:image/jpeg;base64,aGVsbG8=").unwrap()
    }

    fn with_vision(client: Arc<MockModelClient>) -> HealthAnalyzer {
        HealthAnalyzer::new(
            Some(ModelRoute::new(client, vec!["primary".into(), "secondary".into()])),
            None,
            FallbackGenerator::new(FallbackMode::Fixed, None),
        )
    }

    fn with_text(client: Arc<MockModelClient>) -> HealthAnalyzer {
        HealthAnalyzer::new(
            None,
            Some(ModelRoute::new(client, vec!["chat".into()])),
            FallbackGenerator::new(FallbackMode::Fixed, None),
        )
    }

    #[test]
    fn offline_analyzer_uses_fallback() {
        let analyzer = HealthAnalyzer::offline(FallbackGenerator::new(FallbackMode::Fixed, None));
        let analysis = analyzer.analyze_anemia(&image(), Language::En);
        assert!(analysis.fallback_used());
        assert_eq!(analysis.result.source(), ResultSource::Fallback);
        assert!(analyzer.vision_model().is_none());
    }

    #[test]
    fn model_answer_is_rederived() {
        let client = Arc::new(MockModelClient::new("SYSTOLIC: 145\nDIASTOLIC: 85\nRISK_LEVEL: LOW"));
        let analyzer = with_vision(client.clone());
        let analysis = analyzer.analyze_blood_pressure(&image(), &[], Language::En);
        assert_eq!(analysis.source, ResultSource::Model);
        assert_eq!(analysis.result.risk_level(), RiskLevel::High);
        assert_eq!(analyzer.vision_model().as_deref(), Some("mock/primary"));
    }

    #[test]
    fn bp_prompt_carries_symptoms() {
        let client = Arc::new(MockModelClient::new("SYSTOLIC: 120\nDIASTOLIC: 80"));
        let analyzer = with_vision(client.clone());
        analyzer.analyze_blood_pressure(&image(), &["headache".into()], Language::En);
        assert!(client.last_prompt().unwrap().user.contains("headache"));
    }

    #[test]
    fn unclear_image_is_a_model_retake() {
        let client = Arc::new(MockModelClient::new("IMAGE_NOT_CLEAR"));
        let analysis = with_vision(client).analyze_glucose(&image(), Language::Bn);
        let DomainResult::Retake(r) = &analysis.result else {
            panic!("expected retake");
        };
        assert_eq!(r.reason, RetakeReason::ImageNotClear);
        assert_eq!(analysis.source, ResultSource::Model);
    }

    #[test]
    fn failing_models_fall_back() {
        let client = Arc::new(MockModelClient::failing());
        let analysis = with_vision(client.clone()).analyze_nutrition(&image(), Language::En);
        assert!(analysis.fallback_used());
        assert_eq!(client.calls(), vec!["primary", "secondary"]);
    }

    #[test]
    fn unparseable_answer_falls_back() {
        let client = Arc::new(MockModelClient::new("Looks fine to me."));
        let analysis = with_vision(client).analyze_anemia(&image(), Language::En);
        assert!(analysis.fallback_used());
        assert_eq!(analysis.result.risk_level(), RiskLevel::Low);
    }

    #[test]
    fn meal_glycemic_uses_meal_table() {
        let client = Arc::new(MockModelClient::new("GLYCEMIC_LOAD: 30\nGLUCOSE_LEVEL: 135"));
        let analysis = with_vision(client).analyze_meal_glycemic(&image(), Language::En);
        let DomainResult::Diabetes(r) = &analysis.result else {
            panic!("expected diabetes result");
        };
        assert_eq!(r.basis, GlucoseBasis::Meal);
        assert_eq!(r.risk_level, RiskLevel::Medium);
    }

    #[test]
    fn infection_without_image_skips_model() {
        let client = Arc::new(MockModelClient::new("URGENCY: URGENT"));
        let analyzer = with_vision(client.clone());
        let analysis = analyzer.analyze_infection(None, &["fever".into(), "pain".into()], Language::En);
        assert_eq!(analysis.source, ResultSource::Rules);
        assert_eq!(analysis.result.risk_level(), RiskLevel::Medium);
        assert!(client.calls().is_empty());
    }

    #[test]
    fn symptoms_without_text_model_use_rules() {
        let analyzer = HealthAnalyzer::offline(FallbackGenerator::new(FallbackMode::Fixed, None));
        let analysis = analyzer.analyze_symptoms(&[], "severe bleeding", Language::En);
        assert!(analysis.fallback_used());
        assert_eq!(analysis.result.urgency, Urgency::Urgent);
        assert!(!analysis.result.ai_generated);
    }

    #[test]
    fn symptom_model_answer_is_ai_generated() {
        let client = Arc::new(MockModelClient::new("URGENCY: CONSULT\nSEVERITY: MODERATE"));
        let analysis = with_text(client).analyze_symptoms(&[], "a little tired", Language::En);
        assert_eq!(analysis.source, ResultSource::Model);
        assert!(analysis.result.ai_generated);
        assert_eq!(analysis.result.urgency, Urgency::Consult);
    }

    #[test]
    fn symptom_model_failure_uses_rules() {
        let analysis = with_text(Arc::new(MockModelClient::failing())).analyze_symptoms(
            &["fever".into()],
            "",
            Language::En,
        );
        assert!(analysis.fallback_used());
        assert_eq!(analysis.result.urgency, Urgency::Monitor);
    }
}
