//! Blood pressure and preeclampsia screening.
//!
//! One threshold table serves the mock analyzer, the fallback generator and
//! the model-response validator.

use std::ops::RangeInclusive;

use rand::Rng;

use crate::models::{BilingualList, BilingualText, BloodPressureResult, ResultSource, RiskLevel};

pub const SYSTOLIC_HIGH: u16 = 140;
pub const DIASTOLIC_HIGH: u16 = 90;
pub const SYSTOLIC_MEDIUM: u16 = 130;
/// Canonical diastolic cutoff for medium risk.
pub const BP_MEDIUM_DIASTOLIC: u16 = 85;
/// Reported symptoms at or above this count flag preeclampsia on their own.
pub const PREECLAMPSIA_SYMPTOM_COUNT: usize = 2;

pub const SYSTOLIC_PLAUSIBLE: RangeInclusive<u16> = 50..=250;
pub const DIASTOLIC_PLAUSIBLE: RangeInclusive<u16> = 30..=150;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BpReading {
    pub systolic: u16,
    pub diastolic: u16,
}

impl BpReading {
    /// Validate an externally supplied pair. `None` when either value falls
    /// outside the physically plausible range.
    pub fn plausible(systolic: f64, diastolic: f64) -> Option<Self> {
        let systolic = to_u16(systolic)?;
        let diastolic = to_u16(diastolic)?;
        if SYSTOLIC_PLAUSIBLE.contains(&systolic) && DIASTOLIC_PLAUSIBLE.contains(&diastolic) {
            Some(Self {
                systolic,
                diastolic,
            })
        } else {
            None
        }
    }
}

fn to_u16(value: f64) -> Option<u16> {
    let rounded = value.round();
    if rounded.is_finite() && (0.0..=u16::MAX as f64).contains(&rounded) {
        Some(rounded as u16)
    } else {
        None
    }
}

pub fn crosses_high(reading: &BpReading) -> bool {
    reading.systolic >= SYSTOLIC_HIGH || reading.diastolic >= DIASTOLIC_HIGH
}

pub fn classify(reading: &BpReading) -> RiskLevel {
    if crosses_high(reading) {
        RiskLevel::High
    } else if reading.systolic >= SYSTOLIC_MEDIUM || reading.diastolic >= BP_MEDIUM_DIASTOLIC {
        RiskLevel::Medium
    } else {
        RiskLevel::Low
    }
}

pub fn preeclampsia_risk(reading: &BpReading, symptoms: &[String]) -> bool {
    crosses_high(reading) || symptoms.len() >= PREECLAMPSIA_SYMPTOM_COUNT
}

pub fn assess(reading: BpReading, symptoms: &[String]) -> BloodPressureResult {
    let risk_level = classify(&reading);
    let preeclampsia = preeclampsia_risk(&reading, symptoms);
    let mut recommendations = recommendations_for(risk_level);
    if preeclampsia && risk_level != RiskLevel::High {
        recommendations.en.insert(
            0,
            "Tell your doctor today about your headache, vision or swelling symptoms".into(),
        );
        recommendations.bn.insert(
            0,
            "আপনার মাথাব্যথা, দৃষ্টি বা ফোলার লক্ষণ সম্পর্কে আজই ডাক্তারকে জানান".into(),
        );
    }

    BloodPressureResult {
        systolic: reading.systolic,
        diastolic: reading.diastolic,
        preeclampsia_risk: preeclampsia,
        symptoms: symptoms.to_vec(),
        risk_level,
        message: message_for(&reading, risk_level, preeclampsia),
        recommendations,
        source: ResultSource::Rules,
    }
}

/// Mock reading: systolic 100–159, diastolic 60–99.
pub fn sample<R: Rng + ?Sized>(rng: &mut R) -> BpReading {
    BpReading {
        systolic: rng.gen_range(100..160),
        diastolic: rng.gen_range(60..100),
    }
}

pub fn message_for(reading: &BpReading, risk: RiskLevel, preeclampsia: bool) -> BilingualText {
    let (s, d) = (reading.systolic, reading.diastolic);
    match (risk, preeclampsia) {
        (RiskLevel::High, _) => BilingualText::new(
            format!("High BP detected ({s}/{d}). Preeclampsia risk present. Call your doctor immediately."),
            format!("উচ্চ রক্তচাপ সনাক্ত হয়েছে ({s}/{d})। প্রিক্ল্যাম্পসিয়ার ঝুঁকি রয়েছে। এখনই আপনার ডাক্তারকে কল করুন।"),
        ),
        (_, true) => BilingualText::new(
            format!("Your BP is {s}/{d}, but the symptoms you reported can be early signs of preeclampsia. Contact your doctor today."),
            format!("আপনার রক্তচাপ {s}/{d}, তবে আপনার জানানো লক্ষণগুলো প্রিক্ল্যাম্পসিয়ার প্রাথমিক লক্ষণ হতে পারে। আজই আপনার ডাক্তারের সাথে যোগাযোগ করুন।"),
        ),
        (RiskLevel::Medium, false) => BilingualText::new(
            format!("BP is elevated ({s}/{d}). Monitor closely and reduce salt intake."),
            format!("রক্তচাপ বৃদ্ধি পেয়েছে ({s}/{d})। ঘনিষ্ঠভাবে পর্যবেক্ষণ করুন এবং লবণ গ্রহণ কমান।"),
        ),
        (RiskLevel::Low, false) => BilingualText::new(
            format!("BP is normal ({s}/{d}). Continue healthy habits."),
            format!("রক্তচাপ সাধারণ ({s}/{d})। স্বাস্থ্যকর অভ্যাস চালিয়ে যান।"),
        ),
    }
}

pub fn recommendations_for(risk: RiskLevel) -> BilingualList {
    match risk {
        RiskLevel::High => BilingualList::from_static(
            &[
                "Seek immediate medical attention",
                "Monitor BP twice daily",
                "Reduce salt intake",
                "Rest and avoid stress",
                "Watch for severe headaches or vision changes",
            ],
            &[
                "অবিলম্বে চিকিৎসা সহায়তা নিন",
                "দিনে দুবার রক্তচাপ পর্যবেক্ষণ করুন",
                "লবণ গ্রহণ কমান",
                "বিশ্রাম নিন এবং চাপ এড়িয়ে চলুন",
                "তীব্র মাথাব্যথা বা দৃষ্টি পরিবর্তনের জন্য সতর্ক থাকুন",
            ],
        ),
        RiskLevel::Medium => BilingualList::from_static(
            &[
                "Monitor BP daily",
                "Limit salt and caffeine",
                "Get adequate rest",
                "Consult doctor if symptoms worsen",
            ],
            &[
                "প্রতিদিন রক্তচাপ পর্যবেক্ষণ করুন",
                "লবণ এবং ক্যাফেইন সীমিত করুন",
                "পর্যাপ্ত বিশ্রাম নিন",
                "লক্ষণ খারাপ হলে ডাক্তারের পরামর্শ নিন",
            ],
        ),
        RiskLevel::Low => BilingualList::from_static(
            &[
                "Continue regular checkups",
                "Maintain healthy diet",
                "Stay active",
                "Monitor weekly",
            ],
            &[
                "নিয়মিত চেকআপ চালিয়ে যান",
                "স্বাস্থ্যকর খাদ্য বজায় রাখুন",
                "সক্রিয় থাকুন",
                "সাপ্তাহিক পর্যবেক্ষণ করুন",
            ],
        ),
    }
}
