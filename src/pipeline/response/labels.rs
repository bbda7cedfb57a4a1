//! Line scanner for the `LABEL: value` response protocol.
//!
//! Tolerates markdown bold, bullets, bracketed values, mixed case labels,
//! Bengali digits, and values that wrap onto following lines. Unknown
//! `Word:` prefixes are treated as continuation text, not new labels.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;

/// Marker a model emits when it cannot read the photo.
pub const IMAGE_NOT_CLEAR: &str = "IMAGE_NOT_CLEAR";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Label {
    PallorLevel,
    RiskLevel,
    IronDeficiency,
    IronMg,
    ProteinG,
    CalciumMg,
    Calories,
    MissingNutrients,
    Systolic,
    Diastolic,
    PreeclampsiaRisk,
    GlucoseLevel,
    Prediction,
    GlycemicLoad,
    Urgency,
    Severity,
    Conditions,
    Symptoms,
    AssessmentEn,
    AssessmentBn,
    RecommendationsEn,
    RecommendationsBn,
}

impl Label {
    /// Canonical label for a normalised name (uppercase, underscores).
    /// Accepts the aliases used by both prompt dialects.
    fn from_name(name: &str) -> Option<Label> {
        let label = match name {
            "PALLOR_LEVEL" | "PALLOR" => Label::PallorLevel,
            "RISK_LEVEL" | "RISK" => Label::RiskLevel,
            "IRON_DEFICIENCY" => Label::IronDeficiency,
            "IRON" | "IRON_MG" => Label::IronMg,
            "PROTEIN" | "PROTEIN_G" => Label::ProteinG,
            "CALCIUM" | "CALCIUM_MG" => Label::CalciumMg,
            "CALORIES" => Label::Calories,
            "MISSING" | "MISSING_NUTRIENTS" => Label::MissingNutrients,
            "SYSTOLIC" => Label::Systolic,
            "DIASTOLIC" => Label::Diastolic,
            "PREECLAMPSIA_RISK" => Label::PreeclampsiaRisk,
            "GLUCOSE_LEVEL" | "GLUCOSE" => Label::GlucoseLevel,
            "PREDICTION" => Label::Prediction,
            "GLYCEMIC_LOAD" => Label::GlycemicLoad,
            "URGENCY" | "URGENT" => Label::Urgency,
            "SEVERITY" => Label::Severity,
            "CONDITIONS" | "POSSIBLE_CONDITIONS" => Label::Conditions,
            "SYMPTOMS" => Label::Symptoms,
            "ASSESSMENT_EN" | "ASSESSMENT" => Label::AssessmentEn,
            "ASSESSMENT_BN" => Label::AssessmentBn,
            "RECOMMENDATIONS_EN" | "RECOMMENDATIONS" => Label::RecommendationsEn,
            "RECOMMENDATIONS_BN" => Label::RecommendationsBn,
            _ => return None,
        };
        Some(label)
    }
}

/// `[bullet] [**] Name [**] : [**] value`
static LABEL_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(?:[-*•]\s+)?\**\s*([A-Za-z][A-Za-z_ ]{1,30}?)\s*\**\s*:\s*\**\s*(.*?)\s*$")
        .expect("Invalid label line pattern")
});

static NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"-?\d+(?:\.\d+)?").expect("Invalid number pattern"));

/// Leading list markers: `-`, `*`, `•`, `1.`, `2)`.
static LIST_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*(?:[-*•]|\d+[.)])\s*").expect("Invalid list marker pattern"));

/// Labeled fields scanned from one model response.
#[derive(Debug, Default, Clone)]
pub struct LabeledResponse {
    fields: HashMap<Label, String>,
    image_not_clear: bool,
}

impl LabeledResponse {
    pub fn scan(raw: &str) -> Self {
        let mut fields: HashMap<Label, String> = HashMap::new();
        let mut current: Option<Label> = None;

        for line in raw.lines() {
            if let Some((label, value)) = match_label(line) {
                if fields.contains_key(&label) {
                    // First occurrence wins; drop the repeat and its continuation.
                    current = None;
                } else {
                    fields.insert(label, clean_value(value));
                    current = Some(label);
                }
                continue;
            }

            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }
            if let Some(label) = current {
                if let Some(existing) = fields.get_mut(&label) {
                    if !existing.is_empty() {
                        existing.push('\n');
                    }
                    existing.push_str(&clean_value(trimmed));
                }
            }
        }

        Self {
            fields,
            image_not_clear: raw.to_uppercase().contains(IMAGE_NOT_CLEAR),
        }
    }

    pub fn image_not_clear(&self) -> bool {
        self.image_not_clear
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn has(&self, label: Label) -> bool {
        self.fields.contains_key(&label)
    }

    /// Non-empty text value, continuation lines joined with spaces.
    pub fn text(&self, label: Label) -> Option<String> {
        let value = self.fields.get(&label)?;
        let joined = value.lines().map(str::trim).collect::<Vec<_>>().join(" ");
        let joined = joined.trim();
        (!joined.is_empty()).then(|| joined.to_string())
    }

    /// First number in the value. Bengali digits are accepted.
    pub fn number(&self, label: Label) -> Option<f64> {
        let value = ascii_digits(self.fields.get(&label)?);
        NUMBER.find(&value)?.as_str().parse().ok()
    }

    /// Yes/no style flag.
    pub fn flag(&self, label: Label) -> Option<bool> {
        let value = self.fields.get(&label)?.trim().to_lowercase();
        if value.starts_with("yes") || value.starts_with("true") || value.starts_with("হ্যাঁ") {
            Some(true)
        } else if value.starts_with("no") || value.starts_with("false") || value.starts_with("না") {
            Some(false)
        } else {
            None
        }
    }

    /// Items split on commas, semicolons and line breaks, list markers
    /// stripped. `none` / `n/a` placeholders are dropped.
    pub fn list(&self, label: Label) -> Vec<String> {
        let Some(value) = self.fields.get(&label) else {
            return Vec::new();
        };
        value
            .split(['\n', ',', ';', '،'])
            .map(|item| LIST_MARKER.replace(item, "").trim().trim_end_matches('.').trim().to_string())
            .filter(|item| !item.is_empty())
            .filter(|item| {
                let lower = item.to_lowercase();
                lower != "none" && lower != "n/a" && lower != "none provided"
            })
            .collect()
    }
}

fn match_label(line: &str) -> Option<(Label, &str)> {
    let caps = LABEL_LINE.captures(line)?;
    let name = caps.get(1)?.as_str().trim().to_uppercase().replace(' ', "_");
    let label = Label::from_name(&name)?;
    Some((label, caps.get(2).map_or("", |m| m.as_str())))
}

/// Strip wrapping brackets, quotes and stray bold markers.
fn clean_value(value: &str) -> String {
    value
        .trim()
        .trim_matches('*')
        .trim()
        .trim_start_matches('[')
        .trim_end_matches(']')
        .trim_matches('"')
        .trim()
        .to_string()
}

fn ascii_digits(value: &str) -> String {
    value
        .chars()
        .map(|c| match c {
            '০'..='৯' => char::from(b'0' + (c as u32 - '০' as u32) as u8),
            _ => c,
        })
        .collect()
}
