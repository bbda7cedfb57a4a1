//! Typed analysis results, one variant per health domain.
//!
//! Every result is built fresh per call and never mutated afterwards.
//! `risk_level` is always derived by the owning domain module from the
//! numeric fields stored alongside it.

use serde::{Deserialize, Serialize};

use super::bilingual::{BilingualList, BilingualText};
use super::enums::{
    Domain, Language, Nutrient, ResultSource, RetakeReason, RiskLevel, Severity, Urgency,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnemiaResult {
    pub pallor_level: u8,
    pub iron_deficiency: bool,
    pub risk_level: RiskLevel,
    pub message: BilingualText,
    pub recommendations: BilingualList,
    pub source: ResultSource,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BloodPressureResult {
    pub systolic: u16,
    pub diastolic: u16,
    pub preeclampsia_risk: bool,
    pub symptoms: Vec<String>,
    pub risk_level: RiskLevel,
    pub message: BilingualText,
    pub recommendations: BilingualList,
    pub source: ResultSource,
}

/// What a diabetes result was computed from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GlucoseBasis {
    /// A glucose meter reading; risk follows the mg/dL table.
    Reading,
    /// A meal photo; risk follows the glycemic-load table and the glucose
    /// level is a post-meal prediction.
    Meal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiabetesResult {
    pub basis: GlucoseBasis,
    pub glucose_level: u16,
    pub glycemic_load: u16,
    pub prediction: BilingualText,
    pub risk_level: RiskLevel,
    pub message: BilingualText,
    pub recommendations: BilingualList,
    pub source: ResultSource,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InfectionResult {
    pub urgency: Urgency,
    pub risk_level: RiskLevel,
    pub severity_score: usize,
    pub possible_conditions: Vec<String>,
    pub symptoms: Vec<String>,
    pub message: BilingualText,
    pub recommendations: BilingualList,
    pub source: ResultSource,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NutritionResult {
    pub iron: f64,
    pub protein: f64,
    pub calcium: f64,
    pub calories: f64,
    pub missing: Vec<Nutrient>,
    pub risk_level: RiskLevel,
    pub message: BilingualText,
    pub recommendations: BilingualList,
    pub source: ResultSource,
}

/// "Please retake" outcome: the input could not be read or the reading
/// was physically implausible. Carries no numeric fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RetakeResult {
    pub domain: Domain,
    pub reason: RetakeReason,
    pub risk_level: RiskLevel,
    pub message: BilingualText,
    pub recommendations: BilingualList,
    pub source: ResultSource,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum DomainResult {
    Anemia(AnemiaResult),
    BloodPressure(BloodPressureResult),
    Diabetes(DiabetesResult),
    Infection(InfectionResult),
    Nutrition(NutritionResult),
    Retake(RetakeResult),
}

impl DomainResult {
    pub fn domain(&self) -> Domain {
        match self {
            DomainResult::Anemia(_) => Domain::Anemia,
            DomainResult::BloodPressure(_) => Domain::BloodPressure,
            DomainResult::Diabetes(_) => Domain::Diabetes,
            DomainResult::Infection(_) => Domain::Infection,
            DomainResult::Nutrition(_) => Domain::Nutrition,
            DomainResult::Retake(r) => r.domain,
        }
    }

    pub fn risk_level(&self) -> RiskLevel {
        match self {
            DomainResult::Anemia(r) => r.risk_level,
            DomainResult::BloodPressure(r) => r.risk_level,
            DomainResult::Diabetes(r) => r.risk_level,
            DomainResult::Infection(r) => r.risk_level,
            DomainResult::Nutrition(r) => r.risk_level,
            DomainResult::Retake(r) => r.risk_level,
        }
    }

    pub fn message(&self) -> &BilingualText {
        match self {
            DomainResult::Anemia(r) => &r.message,
            DomainResult::BloodPressure(r) => &r.message,
            DomainResult::Diabetes(r) => &r.message,
            DomainResult::Infection(r) => &r.message,
            DomainResult::Nutrition(r) => &r.message,
            DomainResult::Retake(r) => &r.message,
        }
    }

    pub fn recommendations(&self) -> &BilingualList {
        match self {
            DomainResult::Anemia(r) => &r.recommendations,
            DomainResult::BloodPressure(r) => &r.recommendations,
            DomainResult::Diabetes(r) => &r.recommendations,
            DomainResult::Infection(r) => &r.recommendations,
            DomainResult::Nutrition(r) => &r.recommendations,
            DomainResult::Retake(r) => &r.recommendations,
        }
    }

    pub fn source(&self) -> ResultSource {
        match self {
            DomainResult::Anemia(r) => r.source,
            DomainResult::BloodPressure(r) => r.source,
            DomainResult::Diabetes(r) => r.source,
            DomainResult::Infection(r) => r.source,
            DomainResult::Nutrition(r) => r.source,
            DomainResult::Retake(r) => r.source,
        }
    }

    /// Re-tag where this result came from.
    pub fn with_source(mut self, source: ResultSource) -> Self {
        match &mut self {
            DomainResult::Anemia(r) => r.source = source,
            DomainResult::BloodPressure(r) => r.source = source,
            DomainResult::Diabetes(r) => r.source = source,
            DomainResult::Infection(r) => r.source = source,
            DomainResult::Nutrition(r) => r.source = source,
            DomainResult::Retake(r) => r.source = source,
        }
        self
    }

    pub fn is_retake(&self) -> bool {
        matches!(self, DomainResult::Retake(_))
    }
}

/// Outcome of the natural-language symptom checker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SymptomAnalysis {
    pub extracted_symptoms: Vec<String>,
    pub severity: Severity,
    pub urgency: Urgency,
    pub risk_level: RiskLevel,
    pub possible_conditions: Vec<String>,
    pub recommendations: BilingualList,
    pub message: BilingualText,
    pub language: Language,
    pub confidence: f32,
    pub ai_generated: bool,
}
