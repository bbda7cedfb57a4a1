//! Prompt builders, one per analysis.
//!
//! Every prompt asks for the labeled-line format read by
//! `pipeline::response`. Image prompts include the `IMAGE_NOT_CLEAR`
//! sentinel instruction.

use crate::models::Language;
use crate::pipeline::response::IMAGE_NOT_CLEAR;

/// System and user message for one model call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    pub system: String,
    pub user: String,
}

const PERSONA: &str = "You are a health assistant for pregnant women in Bangladesh. \
Speak directly to the mother as \"you\" (Bengali: \"আপনি\"). You are not a doctor: never \
diagnose, and always recommend consulting a healthcare provider. Be supportive and \
culturally sensitive. Keep English and Bengali text on separate lines and never mix \
languages within one line.";

const PROSE_FORMAT: &str = "ASSESSMENT_EN: [assessment in English only]
ASSESSMENT_BN: [assessment in Bengali only]
RECOMMENDATIONS_EN: [comma-separated recommendations in English only]
RECOMMENDATIONS_BN: [comma-separated recommendations in Bengali only]";

fn image_system(task: &str) -> String {
    format!(
        "{PERSONA}\n\n{task}\n\nFirst check that the image clearly shows what is asked. \
If it is blurry, dark, or shows something else, reply with only {IMAGE_NOT_CLEAR} \
and do not guess numbers."
    )
}

fn image_user(format_lines: &str, extra: &str, language: Language) -> String {
    let mut user = String::new();
    if !extra.is_empty() {
        user.push_str(extra);
        user.push_str("\n\n");
    }
    user.push_str("Reply in exactly this format, one label per line:\n");
    user.push_str(format_lines);
    user.push('\n');
    user.push_str(PROSE_FORMAT);
    user.push_str(&format!(
        "\n\nIf the image is not clear, reply only with: {IMAGE_NOT_CLEAR}\n\nPreferred language: {}",
        language.as_str()
    ));
    user
}

fn symptom_list(symptoms: &[String]) -> String {
    if symptoms.is_empty() {
        "None provided".to_string()
    } else {
        symptoms.join(", ")
    }
}

pub fn anemia(language: Language) -> Prompt {
    Prompt {
        system: image_system(
            "Look at the photo of nail beds, lips or inner eyelids for pallor that may \
suggest anemia or iron deficiency during pregnancy.",
        ),
        user: image_user(
            "PALLOR_LEVEL: [0-100, how pale the tissue looks]\n\
RISK_LEVEL: [LOW/MEDIUM/HIGH]\n\
IRON_DEFICIENCY: [YES/NO]",
            "",
            language,
        ),
    }
}

pub fn blood_pressure(symptoms: &[String], language: Language) -> Prompt {
    Prompt {
        system: image_system(
            "Read the systolic and diastolic numbers from the photo of a blood pressure \
monitor display. Consider pregnancy hypertension and preeclampsia.",
        ),
        user: image_user(
            "SYSTOLIC: [exact number shown]\n\
DIASTOLIC: [exact number shown]\n\
RISK_LEVEL: [LOW/MEDIUM/HIGH]\n\
PREECLAMPSIA_RISK: [YES/NO]",
            &format!("Reported symptoms: {}", symptom_list(symptoms)),
            language,
        ),
    }
}

pub fn glucose_reading(language: Language) -> Prompt {
    Prompt {
        system: image_system(
            "Read the blood glucose value in mg/dL from the photo of a glucose meter \
display. Consider gestational diabetes targets.",
        ),
        user: image_user(
            "GLUCOSE_LEVEL: [number in mg/dL]\n\
RISK_LEVEL: [LOW/MEDIUM/HIGH]\n\
PREDICTION: [short outlook]",
            "",
            language,
        ),
    }
}

pub fn meal_glycemic(language: Language) -> Prompt {
    Prompt {
        system: image_system(
            "Estimate the glycemic load of the meal in the photo and the blood glucose \
expected one to two hours after eating it, for a mother managing gestational diabetes.",
        ),
        user: image_user(
            "GLYCEMIC_LOAD: [0-100]\n\
GLUCOSE_LEVEL: [predicted mg/dL after the meal]\n\
RISK_LEVEL: [LOW/MEDIUM/HIGH]",
            "",
            language,
        ),
    }
}

pub fn infection(symptoms: &[String], language: Language) -> Prompt {
    Prompt {
        system: image_system(
            "Look at the photo of skin or eyes for signs of infection: redness, swelling, \
discharge, rashes or lesions. Many skin changes are normal in pregnancy.",
        ),
        user: image_user(
            "URGENCY: [MONITOR/URGENT]\n\
RISK_LEVEL: [LOW/MEDIUM/HIGH]\n\
SYMPTOMS: [comma-separated visible symptoms]\n\
CONDITIONS: [comma-separated possible conditions]",
            &format!("Reported symptoms: {}", symptom_list(symptoms)),
            language,
        ),
    }
}

pub fn nutrition(language: Language) -> Prompt {
    Prompt {
        system: image_system(
            "Estimate the iron, protein, calcium and calories in the meal in the photo, \
with South Asian dishes in mind.",
        ),
        user: image_user(
            "IRON_MG: [number in mg]\n\
PROTEIN_G: [number in g]\n\
CALCIUM_MG: [number in mg]\n\
CALORIES: [number]\n\
RISK_LEVEL: [LOW/MEDIUM/HIGH]\n\
MISSING_NUTRIENTS: [comma-separated, or NONE]",
            "",
            language,
        ),
    }
}

pub fn symptoms(selected: &[String], description: &str, language: Language) -> Prompt {
    let system = format!(
        "{PERSONA}\n\n\
Always recommend immediate care for heavy bleeding, severe abdominal pain, severe headache \
with vision changes, difficulty breathing, high fever, severe persistent vomiting or signs \
of preeclampsia.\n\n\
Reply in exactly this format, one label per line:\n\
URGENCY: [URGENT/CONSULT/MONITOR]\n\
SEVERITY: [MILD/MODERATE/SEVERE]\n\
{PROSE_FORMAT}\n\n\
Recommendations should be specific and actionable, with timelines where they help."
    );

    let selected_line = if selected.is_empty() {
        "No specific symptoms selected".to_string()
    } else {
        format!("Selected symptoms: {}", selected.join(", "))
    };

    Prompt {
        system,
        user: format!(
            "{selected_line}\n\nMy description: \"{description}\"\n\nPreferred language: {}",
            language.as_str()
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn image_prompts_carry_sentinel_and_prose_labels() {
        for prompt in [
            anemia(Language::En),
            blood_pressure(&[], Language::En),
            glucose_reading(Language::Bn),
            meal_glycemic(Language::En),
            infection(&[], Language::En),
            nutrition(Language::Bn),
        ] {
            assert!(prompt.system.contains(IMAGE_NOT_CLEAR));
            assert!(prompt.user.contains(IMAGE_NOT_CLEAR));
            assert!(prompt.user.contains("ASSESSMENT_BN:"));
            assert!(prompt.user.contains("RECOMMENDATIONS_EN:"));
        }
    }

    #[test]
    fn bp_prompt_lists_reported_symptoms() {
        let p = blood_pressure(&["headache".into(), "swelling".into()], Language::En);
        assert!(p.user.contains("Reported symptoms: headache, swelling"));
        let p = blood_pressure(&[], Language::En);
        assert!(p.user.contains("Reported symptoms: None provided"));
    }

    #[test]
    fn symptom_prompt_embeds_description_and_language() {
        let p = symptoms(&["fever".into()], "hot since morning", Language::Bn);
        assert!(p.user.contains("Selected symptoms: fever"));
        assert!(p.user.contains("\"hot since morning\""));
        assert!(p.user.ends_with("Preferred language: bn"));
        assert!(p.system.contains("URGENCY: [URGENT/CONSULT/MONITOR]"));
    }
}
