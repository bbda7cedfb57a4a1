//! Anemia screening from a pallor score (0–100) estimated on nail beds,
//! lips or inner eyelids.

use rand::Rng;

use crate::models::{AnemiaResult, BilingualList, BilingualText, ResultSource, RiskLevel};

/// Pallor at or above this is medium risk.
pub const PALLOR_MEDIUM: u8 = 30;
/// Pallor at or above this is high risk.
pub const PALLOR_HIGH: u8 = 60;
/// Pallor strictly above this flags likely iron deficiency.
pub const IRON_DEFICIENCY_ABOVE: u8 = 50;
pub const PALLOR_MAX: u8 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnemiaReading {
    pub pallor_level: u8,
}

impl AnemiaReading {
    /// Build from an externally supplied score, clamped into 0–100.
    pub fn from_score(score: f64) -> Self {
        let clamped = score.round().clamp(0.0, PALLOR_MAX as f64);
        Self {
            pallor_level: clamped as u8,
        }
    }
}

pub fn classify(reading: &AnemiaReading) -> RiskLevel {
    if reading.pallor_level < PALLOR_MEDIUM {
        RiskLevel::Low
    } else if reading.pallor_level < PALLOR_HIGH {
        RiskLevel::Medium
    } else {
        RiskLevel::High
    }
}

pub fn iron_deficiency(reading: &AnemiaReading) -> bool {
    reading.pallor_level > IRON_DEFICIENCY_ABOVE
}

pub fn assess(reading: AnemiaReading) -> AnemiaResult {
    let risk_level = classify(&reading);
    AnemiaResult {
        pallor_level: reading.pallor_level,
        iron_deficiency: iron_deficiency(&reading),
        risk_level,
        message: message_for(&reading, risk_level),
        recommendations: recommendations_for(risk_level),
        source: ResultSource::Rules,
    }
}

/// Mock reading across the full 0–99 pallor band.
pub fn sample<R: Rng + ?Sized>(rng: &mut R) -> AnemiaReading {
    AnemiaReading {
        pallor_level: rng.gen_range(0..100),
    }
}

/// Fallback band, 20–79. Narrower than the mock band.
pub fn sample_fallback<R: Rng + ?Sized>(rng: &mut R) -> AnemiaReading {
    AnemiaReading {
        pallor_level: rng.gen_range(20..80),
    }
}

pub fn message_for(reading: &AnemiaReading, risk: RiskLevel) -> BilingualText {
    let p = reading.pallor_level;
    match risk {
        RiskLevel::High => BilingualText::new(
            format!("High risk of anemia detected (pallor score {p}/100). Please consult a healthcare provider immediately."),
            format!("রক্তস্বল্পতার উচ্চ ঝুঁকি সনাক্ত হয়েছে (ফ্যাকাশে স্কোর {p}/100)। অনুগ্রহ করে অবিলম্বে স্বাস্থ্যসেবা প্রদানকারীর পরামর্শ নিন।"),
        ),
        RiskLevel::Medium => BilingualText::new(
            format!("Moderate anemia risk (pallor score {p}/100). Increase iron-rich foods in your diet."),
            format!("মাঝারি রক্তস্বল্পতার ঝুঁকি (ফ্যাকাশে স্কোর {p}/100)। আপনার খাদ্যতালিকায় আয়রন সমৃদ্ধ খাবার বাড়ান।"),
        ),
        RiskLevel::Low => BilingualText::new(
            format!("Low anemia risk (pallor score {p}/100). Continue maintaining a healthy diet."),
            format!("কম রক্তস্বল্পতার ঝুঁকি (ফ্যাকাশে স্কোর {p}/100)। স্বাস্থ্যকর খাদ্য বজায় রাখুন।"),
        ),
    }
}

pub fn recommendations_for(risk: RiskLevel) -> BilingualList {
    match risk {
        RiskLevel::High => BilingualList::from_static(
            &[
                "Consult a doctor immediately",
                "Eat iron-rich foods: spinach, lentils, fish",
                "Take iron supplements as prescribed",
                "Avoid tea/coffee with meals",
            ],
            &[
                "অবিলম্বে ডাক্তারের পরামর্শ নিন",
                "আয়রন সমৃদ্ধ খাবার খান: পালং শাক, ডাল, মাছ",
                "নির্দেশিত আয়রন সাপ্লিমেন্ট নিন",
                "খাবারের সাথে চা/কফি এড়িয়ে চলুন",
            ],
        ),
        RiskLevel::Medium => BilingualList::from_static(
            &[
                "Increase iron intake",
                "Eat green vegetables daily",
                "Include fish and eggs",
                "Monitor symptoms",
            ],
            &[
                "আয়রন গ্রহণ বাড়ান",
                "প্রতিদিন সবুজ শাকসবজি খান",
                "মাছ এবং ডিম অন্তর্ভুক্ত করুন",
                "লক্ষণ পর্যবেক্ষণ করুন",
            ],
        ),
        RiskLevel::Low => BilingualList::from_static(
            &["Maintain balanced diet", "Regular checkups", "Stay hydrated"],
            &["সুষম খাদ্য বজায় রাখুন", "নিয়মিত চেকআপ", "হাইড্রেটেড থাকুন"],
        ),
    }
}
