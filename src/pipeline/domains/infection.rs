//! Infection triage from symptom tags.
//!
//! Two urgency buckets only: monitor or urgent. The tag count doubles as the
//! severity score.

use crate::models::{BilingualList, BilingualText, InfectionResult, ResultSource, RiskLevel, Urgency};
use crate::pipeline::symptoms::{has_urgent_tag, union_tags};

/// Tag count that escalates to urgent even without an urgent tag.
pub const URGENT_TAG_COUNT: usize = 4;
/// Tag count that raises risk to medium.
pub const MEDIUM_TAG_COUNT: usize = 2;

pub fn triage(tags: &[String]) -> (Urgency, RiskLevel) {
    if has_urgent_tag(tags) || tags.len() >= URGENT_TAG_COUNT {
        (Urgency::Urgent, RiskLevel::High)
    } else if tags.len() >= MEDIUM_TAG_COUNT {
        (Urgency::Monitor, RiskLevel::Medium)
    } else {
        (Urgency::Monitor, RiskLevel::Low)
    }
}

/// Canonicalise a free-form symptom name: `"High Fever"` becomes `high-fever`.
pub fn normalize_tag(raw: &str) -> String {
    raw.split_whitespace()
        .map(|w| w.trim_matches(|c: char| !c.is_alphanumeric() && c != '-'))
        .filter(|w| !w.is_empty())
        .collect::<Vec<_>>()
        .join("-")
        .to_lowercase()
}

pub fn assess(tags: &[String]) -> InfectionResult {
    let tags = union_tags(tags, &[]);
    let (urgency, risk_level) = triage(&tags);
    InfectionResult {
        urgency,
        risk_level,
        severity_score: tags.len(),
        possible_conditions: conditions_for(risk_level),
        symptoms: tags,
        message: message_for(urgency, risk_level),
        recommendations: recommendations_for(urgency, risk_level),
        source: ResultSource::Rules,
    }
}

pub fn conditions_for(risk: RiskLevel) -> Vec<String> {
    let names: &[&str] = match risk {
        RiskLevel::High => &[
            "Severe infection",
            "Urinary tract infection",
            "Preterm labor risk",
        ],
        RiskLevel::Medium => &["Mild infection", "Common cold", "Urinary discomfort"],
        RiskLevel::Low => &["Minor symptoms", "Normal pregnancy discomfort"],
    };
    names.iter().map(|s| s.to_string()).collect()
}

pub fn message_for(urgency: Urgency, risk: RiskLevel) -> BilingualText {
    match (urgency, risk) {
        (Urgency::Urgent, _) | (_, RiskLevel::High) => BilingualText::new(
            "URGENT: These symptoms require immediate medical attention. Please seek care now.",
            "জরুরি: এই লক্ষণগুলির জন্য অবিলম্বে চিকিৎসা প্রয়োজন। অনুগ্রহ করে এখনই যত্ন নিন।",
        ),
        (_, RiskLevel::Medium) => BilingualText::new(
            "Monitor these symptoms closely. Contact your doctor if they worsen or persist.",
            "এই লক্ষণগুলি ঘনিষ্ঠভাবে পর্যবেক্ষণ করুন। খারাপ হলে বা অব্যাহত থাকলে আপনার ডাক্তারের সাথে যোগাযোগ করুন।",
        ),
        (_, RiskLevel::Low) => BilingualText::new(
            "These symptoms appear mild. Continue monitoring and maintain regular checkups.",
            "এই লক্ষণগুলি হালকা বলে মনে হচ্ছে। পর্যবেক্ষণ চালিয়ে যান এবং নিয়মিত চেকআপ বজায় রাখুন।",
        ),
    }
}

pub fn recommendations_for(urgency: Urgency, risk: RiskLevel) -> BilingualList {
    match (urgency, risk) {
        (Urgency::Urgent, _) | (_, RiskLevel::High) => BilingualList::from_static(
            &[
                "Seek immediate medical attention",
                "Go to emergency room or call doctor",
                "Do not delay treatment",
                "Bring someone with you",
                "Note all symptoms and their duration",
            ],
            &[
                "অবিলম্বে চিকিৎসা সহায়তা নিন",
                "জরুরি কক্ষে যান বা ডাক্তারকে কল করুন",
                "চিকিৎসা বিলম্বিত করবেন না",
                "কাউকে সাথে নিয়ে যান",
                "সমস্ত লক্ষণ এবং তাদের সময়কাল নোট করুন",
            ],
        ),
        (_, RiskLevel::Medium) => BilingualList::from_static(
            &[
                "Monitor symptoms for 24 hours",
                "Rest and stay hydrated",
                "Take temperature regularly",
                "Call doctor if symptoms worsen",
                "Avoid self-medication",
            ],
            &[
                "২৪ ঘন্টার জন্য লক্ষণ পর্যবেক্ষণ করুন",
                "বিশ্রাম নিন এবং হাইড্রেটেড থাকুন",
                "নিয়মিত তাপমাত্রা নিন",
                "লক্ষণ খারাপ হলে ডাক্তারের পরামর্শ নিন",
                "স্ব-ঔষধ এড়িয়ে চলুন",
            ],
        ),
        (_, RiskLevel::Low) => BilingualList::from_static(
            &[
                "Continue normal activities",
                "Stay hydrated and rest",
                "Monitor for any changes",
                "Maintain good hygiene",
                "Regular prenatal checkups",
            ],
            &[
                "স্বাভাবিক কার্যক্রম চালিয়ে যান",
                "হাইড্রেটেড থাকুন এবং বিশ্রাম নিন",
                "যেকোনো পরিবর্তনের জন্য পর্যবেক্ষণ করুন",
                "ভালো স্বাস্থ্যবিধি বজায় রাখুন",
                "নিয়মিত প্রসবপূর্ব চেকআপ",
            ],
        ),
    }
}
