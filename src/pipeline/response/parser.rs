//! Turn a model's labeled-line answer into a typed `DomainResult`.
//!
//! Numbers are taken from the text; everything derived from them (risk
//! level, iron deficiency, preeclampsia, glucose band, missing nutrients,
//! infection urgency) is recomputed by the domain tables. Asserted labels
//! for those values are read only to decide whether the model's prose can
//! be shown alongside the recomputed result.

use crate::models::{
    BilingualList, BilingualText, Domain, DomainResult, GlucoseBasis, ResultSource,
    RetakeReason, RiskLevel, Urgency,
};
use crate::pipeline::domains::{anemia, blood_pressure, glucose, infection, nutrition, retake};
use crate::pipeline::symptoms::union_tags;

use super::labels::{Label, LabeledResponse};
use super::ResponseError;

/// Caller-side facts the model response cannot supply.
#[derive(Debug, Clone, Default)]
pub struct ParseContext {
    /// Symptoms reported by the user (BP preeclampsia count, infection tags).
    pub symptoms: Vec<String>,
    /// Which diabetes table applies.
    pub basis: Option<GlucoseBasis>,
}

impl ParseContext {
    pub fn with_symptoms(symptoms: Vec<String>) -> Self {
        Self {
            symptoms,
            basis: None,
        }
    }

    pub fn for_basis(basis: GlucoseBasis) -> Self {
        Self {
            symptoms: Vec::new(),
            basis: Some(basis),
        }
    }
}

/// Single entry point from raw model text to a validated result.
///
/// The `IMAGE_NOT_CLEAR` sentinel short-circuits to a retake result.
/// Implausible numbers produce a retake result. Missing primary numbers
/// and unlabeled prose are errors so the caller can fall back.
pub fn parse_and_validate(
    domain: Domain,
    raw: &str,
    ctx: &ParseContext,
) -> Result<DomainResult, ResponseError> {
    let labels = LabeledResponse::scan(raw);

    if labels.image_not_clear() {
        tracing::info!(domain = domain.as_str(), "Model could not read the image");
        return Ok(DomainResult::Retake(retake(domain, RetakeReason::ImageNotClear)));
    }
    if labels.is_empty() {
        return Err(ResponseError::Unlabeled { domain });
    }

    let result = match domain {
        Domain::Anemia => parse_anemia(&labels)?,
        Domain::BloodPressure => parse_blood_pressure(&labels, ctx)?,
        Domain::Diabetes => parse_diabetes(&labels, ctx)?,
        Domain::Infection => parse_infection(&labels, ctx)?,
        Domain::Nutrition => parse_nutrition(&labels)?,
    };

    Ok(result.with_source(ResultSource::Model))
}

// ── Per-domain extraction ──────────────────────────────────

fn parse_anemia(labels: &LabeledResponse) -> Result<DomainResult, ResponseError> {
    let score = require(labels, Label::PallorLevel, Domain::Anemia)?;
    let mut result = anemia::assess(anemia::AnemiaReading::from_score(score));

    if let Some(prose) = ModelProse::take(labels, result.risk_level, Domain::Anemia) {
        result.message = prose.message.or_else(result.message);
        result.recommendations = prose.recommendations.or_else(result.recommendations);
    }
    Ok(DomainResult::Anemia(result))
}

fn parse_blood_pressure(
    labels: &LabeledResponse,
    ctx: &ParseContext,
) -> Result<DomainResult, ResponseError> {
    let systolic = require(labels, Label::Systolic, Domain::BloodPressure)?;
    let diastolic = require(labels, Label::Diastolic, Domain::BloodPressure)?;

    let Some(reading) = blood_pressure::BpReading::plausible(systolic, diastolic) else {
        tracing::warn!(systolic, diastolic, "Implausible BP reading from model");
        return Ok(implausible(Domain::BloodPressure));
    };

    let mut result = blood_pressure::assess(reading, &ctx.symptoms);
    if let Some(prose) = ModelProse::take(labels, result.risk_level, Domain::BloodPressure) {
        result.message = prose.message.or_else(result.message);
        result.recommendations = prose.recommendations.or_else(result.recommendations);
    }
    Ok(DomainResult::BloodPressure(result))
}

fn parse_diabetes(
    labels: &LabeledResponse,
    ctx: &ParseContext,
) -> Result<DomainResult, ResponseError> {
    let basis = ctx.basis.unwrap_or(GlucoseBasis::Reading);
    let mut result = match basis {
        GlucoseBasis::Reading => {
            let level = require(labels, Label::GlucoseLevel, Domain::Diabetes)?;
            let load = labels.number(Label::GlycemicLoad);
            let Some(reading) = glucose::GlucoseReading::plausible(level, load) else {
                tracing::warn!(level, "Implausible glucose reading from model");
                return Ok(implausible(Domain::Diabetes));
            };
            glucose::assess_reading(reading)
        }
        GlucoseBasis::Meal => {
            let load = require(labels, Label::GlycemicLoad, Domain::Diabetes)?;
            let predicted = require(labels, Label::GlucoseLevel, Domain::Diabetes)?;
            let Some(reading) = glucose::GlucoseReading::plausible(predicted, Some(load)) else {
                tracing::warn!(predicted, "Implausible predicted glucose from model");
                return Ok(implausible(Domain::Diabetes));
            };
            glucose::assess_meal(glucose::MealEstimate {
                glycemic_load: reading.glycemic_load,
                predicted_glucose: reading.glucose_level,
            })
        }
    };

    if let Some(prose) = ModelProse::take(labels, result.risk_level, Domain::Diabetes) {
        result.message = prose.message.or_else(result.message);
        result.recommendations = prose.recommendations.or_else(result.recommendations);
    }
    Ok(DomainResult::Diabetes(result))
}

fn parse_infection(
    labels: &LabeledResponse,
    ctx: &ParseContext,
) -> Result<DomainResult, ResponseError> {
    if !labels.has(Label::Symptoms) && !labels.has(Label::Conditions) && !labels.has(Label::Urgency)
    {
        return Err(ResponseError::MissingField {
            domain: Domain::Infection,
            field: "SYMPTOMS",
        });
    }

    let visible: Vec<String> = labels
        .list(Label::Symptoms)
        .iter()
        .map(|s| infection::normalize_tag(s))
        .filter(|s| !s.is_empty())
        .collect();
    let tags = union_tags(&ctx.symptoms, &visible);
    let mut result = infection::assess(&tags);

    let asserted_urgency = labels.text(Label::Urgency).and_then(|u| Urgency::from_label(&u));
    let urgency_agrees = asserted_urgency.map_or(true, |u| u == result.urgency);

    if urgency_agrees {
        if let Some(prose) = ModelProse::take(labels, result.risk_level, Domain::Infection) {
            result.message = prose.message.or_else(result.message);
            result.recommendations = prose.recommendations.or_else(result.recommendations);
            let conditions = labels.list(Label::Conditions);
            if !conditions.is_empty() {
                result.possible_conditions = conditions;
            }
        }
    } else {
        tracing::warn!(
            asserted = ?asserted_urgency,
            derived = result.urgency.as_str(),
            "Model urgency disagrees with triage table; discarding model prose"
        );
    }
    Ok(DomainResult::Infection(result))
}

fn parse_nutrition(labels: &LabeledResponse) -> Result<DomainResult, ResponseError> {
    let iron = require(labels, Label::IronMg, Domain::Nutrition)?;
    let protein = require(labels, Label::ProteinG, Domain::Nutrition)?;
    let calcium = require(labels, Label::CalciumMg, Domain::Nutrition)?;
    let calories = labels.number(Label::Calories).unwrap_or(0.0);

    let Some(meal) = nutrition::MealNutrients::plausible(iron, protein, calcium, calories) else {
        tracing::warn!(iron, protein, calcium, calories, "Implausible nutrient values from model");
        return Ok(implausible(Domain::Nutrition));
    };

    let mut result = nutrition::assess(meal);
    if let Some(prose) = ModelProse::take(labels, result.risk_level, Domain::Nutrition) {
        result.message = prose.message.or_else(result.message);
        result.recommendations = prose.recommendations.or_else(result.recommendations);
    }
    Ok(DomainResult::Nutrition(result))
}

// ── Internal ───────────────────────────────────────────────

fn require(labels: &LabeledResponse, label: Label, domain: Domain) -> Result<f64, ResponseError> {
    labels.number(label).ok_or(ResponseError::MissingField {
        domain,
        field: label_name(label),
    })
}

fn label_name(label: Label) -> &'static str {
    match label {
        Label::PallorLevel => "PALLOR_LEVEL",
        Label::Systolic => "SYSTOLIC",
        Label::Diastolic => "DIASTOLIC",
        Label::GlucoseLevel => "GLUCOSE_LEVEL",
        Label::GlycemicLoad => "GLYCEMIC_LOAD",
        Label::IronMg => "IRON_MG",
        Label::ProteinG => "PROTEIN_G",
        Label::CalciumMg => "CALCIUM_MG",
        _ => "FIELD",
    }
}

fn implausible(domain: Domain) -> DomainResult {
    DomainResult::Retake(retake(domain, RetakeReason::ImplausibleReading))
}

/// Model-written message and advice, possibly one-sided.
struct ModelProse {
    message: BilingualText,
    recommendations: BilingualList,
}

impl ModelProse {
    /// Collect prose unless the response asserted a risk level that the
    /// threshold table contradicts.
    fn take(labels: &LabeledResponse, derived: RiskLevel, domain: Domain) -> Option<Self> {
        let asserted = labels.text(Label::RiskLevel).and_then(|r| RiskLevel::from_label(&r));
        if let Some(asserted) = asserted {
            if asserted != derived {
                tracing::warn!(
                    domain = domain.as_str(),
                    asserted = asserted.as_str(),
                    derived = derived.as_str(),
                    "Model risk label disagrees with threshold table; discarding model prose"
                );
                return None;
            }
        }

        Some(Self {
            message: BilingualText::new(
                labels.text(Label::AssessmentEn).unwrap_or_default(),
                labels.text(Label::AssessmentBn).unwrap_or_default(),
            ),
            recommendations: BilingualList {
                en: labels.list(Label::RecommendationsEn),
                bn: labels.list(Label::RecommendationsBn),
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Nutrient;

    fn parse(domain: Domain, raw: &str) -> DomainResult {
        parse_and_validate(domain, raw, &ParseContext::default()).unwrap()
    }

    #[test]
    fn asserted_risk_never_changes_derived_risk() {
        let cases = [
            (Domain::Anemia, "PALLOR_LEVEL: 65"),
            (Domain::BloodPressure, "SYSTOLIC: 132\nDIASTOLIC: 70"),
            (Domain::Diabetes, "GLUCOSE_LEVEL: 150"),
            (Domain::Infection, "SYMPTOMS: redness, swelling"),
            (Domain::Nutrition, "IRON_MG: 8\nPROTEIN_G: 30\nCALCIUM_MG: 300"),
        ];
        for (domain, numbers) in cases {
            let mut risks = Vec::new();
            for asserted in ["LOW", "MEDIUM", "HIGH"] {
                let raw = format!("{numbers}\nRISK_LEVEL: {asserted}");
                risks.push(parse(domain, &raw).risk_level());
            }
            assert!(risks.windows(2).all(|w| w[0] == w[1]), "{domain:?}: {risks:?}");
        }
    }

    #[test]
    fn anemia_rederives_flags_from_pallor() {
        let raw = "PALLOR_LEVEL: 65\nRISK_LEVEL: LOW\nIRON_DEFICIENCY: NO";
        let DomainResult::Anemia(r) = parse(Domain::Anemia, raw) else {
            panic!("expected anemia result");
        };
        assert_eq!(r.risk_level, RiskLevel::High);
        assert!(r.iron_deficiency);
        assert_eq!(r.source, ResultSource::Model);
    }

    #[test]
    fn bp_uses_context_symptoms_for_preeclampsia() {
        let ctx = ParseContext::with_symptoms(vec!["headache".into(), "swelling".into()]);
        let raw = "SYSTOLIC: 118\nDIASTOLIC: 76\nPREECLAMPSIA_RISK: NO";
        let DomainResult::BloodPressure(r) =
            parse_and_validate(Domain::BloodPressure, raw, &ctx).unwrap()
        else {
            panic!("expected bp result");
        };
        assert!(r.preeclampsia_risk);
        assert_eq!(r.risk_level, RiskLevel::Low);
    }

    #[test]
    fn bp_out_of_range_becomes_retake() {
        let result = parse(Domain::BloodPressure, "SYSTOLIC: 300\nDIASTOLIC: 80");
        let DomainResult::Retake(r) = result else {
            panic!("expected retake");
        };
        assert_eq!(r.reason, RetakeReason::ImplausibleReading);
        assert_eq!(r.domain, Domain::BloodPressure);
    }

    #[test]
    fn sentinel_short_circuits_before_numbers() {
        let result = parse(Domain::BloodPressure, "IMAGE_NOT_CLEAR\nSYSTOLIC: 500");
        let DomainResult::Retake(r) = result else {
            panic!("expected retake");
        };
        assert_eq!(r.reason, RetakeReason::ImageNotClear);
    }

    #[test]
    fn unlabeled_prose_is_an_error() {
        let err = parse_and_validate(
            Domain::Anemia,
            "Your nails look healthy to me!",
            &ParseContext::default(),
        )
        .unwrap_err();
        assert!(matches!(err, ResponseError::Unlabeled { .. }));
    }

    #[test]
    fn missing_primary_number_is_an_error() {
        let err = parse_and_validate(
            Domain::BloodPressure,
            "SYSTOLIC: 120\nRISK_LEVEL: LOW",
            &ParseContext::default(),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            ResponseError::MissingField {
                field: "DIASTOLIC",
                ..
            }
        ));
    }

    #[test]
    fn consistent_model_prose_is_kept_and_gaps_filled() {
        let raw = "GLUCOSE_LEVEL: 100\nRISK_LEVEL: LOW\nASSESSMENT_EN: Your sugar looks fine.\nRECOMMENDATIONS_EN: Keep walking, Eat fibre";
        let DomainResult::Diabetes(r) = parse(Domain::Diabetes, raw) else {
            panic!("expected diabetes result");
        };
        assert_eq!(r.message.en, "Your sugar looks fine.");
        assert!(r.message.bn.contains("100 mg/dL"));
        assert_eq!(r.recommendations.en, vec!["Keep walking", "Eat fibre"]);
        assert!(!r.recommendations.bn.is_empty());
    }

    #[test]
    fn contradicted_model_prose_is_discarded() {
        let raw = "GLUCOSE_LEVEL: 180\nRISK_LEVEL: LOW\nASSESSMENT_EN: All normal, nothing to worry about.";
        let DomainResult::Diabetes(r) = parse(Domain::Diabetes, raw) else {
            panic!("expected diabetes result");
        };
        assert_eq!(r.risk_level, RiskLevel::High);
        assert!(r.message.en.contains("High blood sugar"));
    }

    #[test]
    fn meal_basis_uses_glycemic_load_table() {
        let ctx = ParseContext::for_basis(GlucoseBasis::Meal);
        let raw = "GLYCEMIC_LOAD: 45\nGLUCOSE_LEVEL: 150";
        let DomainResult::Diabetes(r) = parse_and_validate(Domain::Diabetes, raw, &ctx).unwrap()
        else {
            panic!("expected diabetes result");
        };
        assert_eq!(r.basis, GlucoseBasis::Meal);
        assert_eq!(r.risk_level, RiskLevel::High);
    }

    #[test]
    fn infection_merges_visible_and_reported_symptoms() {
        let ctx = ParseContext::with_symptoms(vec!["fever".into()]);
        let raw = "URGENCY: MONITOR\nSYMPTOMS: Redness, High Fever\nCONDITIONS: Skin rash";
        let DomainResult::Infection(r) = parse_and_validate(Domain::Infection, raw, &ctx).unwrap()
        else {
            panic!("expected infection result");
        };
        assert_eq!(r.symptoms, vec!["fever", "redness", "high-fever"]);
        assert_eq!(r.urgency, Urgency::Urgent);
        assert_eq!(r.possible_conditions[0], "Severe infection");
    }

    #[test]
    fn infection_keeps_model_conditions_when_consistent() {
        let raw = "URGENCY: MONITOR\nRISK_LEVEL: LOW\nSYMPTOMS: redness\nCONDITIONS: Heat rash, Insect bite";
        let DomainResult::Infection(r) = parse(Domain::Infection, raw) else {
            panic!("expected infection result");
        };
        assert_eq!(r.possible_conditions, vec!["Heat rash", "Insect bite"]);
    }

    #[test]
    fn nutrition_recomputes_missing_list() {
        let raw = "IRON: 15\nPROTEIN: 25\nCALCIUM: 500\nCALORIES: 600\nMISSING: iron, folate";
        let DomainResult::Nutrition(r) = parse(Domain::Nutrition, raw) else {
            panic!("expected nutrition result");
        };
        assert!(r.missing.is_empty());
        assert_eq!(r.risk_level, RiskLevel::Low);

        let raw = "IRON_MG: 9\nPROTEIN_G: 40\nCALCIUM_MG: 700";
        let DomainResult::Nutrition(r) = parse(Domain::Nutrition, raw) else {
            panic!("expected nutrition result");
        };
        assert_eq!(r.missing, vec![Nutrient::Iron]);
        assert_eq!(r.calories, 0.0);
    }

    #[test]
    fn every_parsed_result_has_complete_text() {
        let raws = [
            (Domain::Anemia, "PALLOR_LEVEL: 10"),
            (Domain::BloodPressure, "SYSTOLIC: 150\nDIASTOLIC: 95"),
            (Domain::Diabetes, "GLUCOSE_LEVEL: 65"),
            (Domain::Infection, "SYMPTOMS: itching"),
            (Domain::Nutrition, "IRON: 5\nPROTEIN: 5\nCALCIUM: 5"),
        ];
        for (domain, raw) in raws {
            let result = parse(domain, raw);
            assert!(result.message().is_complete(), "{domain:?}");
            assert!(result.recommendations().is_complete(), "{domain:?}");
        }
    }
}
