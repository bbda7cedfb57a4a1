//! Gestational glucose: single meter readings and meal glycemic load.

use std::ops::RangeInclusive;

use rand::Rng;

use crate::models::{
    BilingualList, BilingualText, DiabetesResult, GlucoseBasis, ResultSource, RiskLevel,
};

/// Strictly below this is hypoglycemic.
pub const HYPOGLYCEMIA_BELOW: u16 = 70;
/// Strictly above this is hyperglycemic.
pub const HYPERGLYCEMIA_ABOVE: u16 = 140;
/// Strictly above this is elevated.
pub const ELEVATED_ABOVE: u16 = 120;

/// Glycemic load strictly above this is high.
pub const LOAD_HIGH_ABOVE: u16 = 40;
/// Glycemic load strictly above this is medium.
pub const LOAD_MEDIUM_ABOVE: u16 = 25;

pub const GLUCOSE_PLAUSIBLE: RangeInclusive<u16> = 20..=600;
pub const LOAD_MAX: u16 = 100;

/// Which side of the reading table a value fell on. Routes advice even when
/// two bands share a risk level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GlucoseBand {
    Hypoglycemic,
    Normal,
    Elevated,
    Hyperglycemic,
}

impl GlucoseBand {
    pub fn of(glucose: u16) -> Self {
        if glucose < HYPOGLYCEMIA_BELOW {
            GlucoseBand::Hypoglycemic
        } else if glucose > HYPERGLYCEMIA_ABOVE {
            GlucoseBand::Hyperglycemic
        } else if glucose > ELEVATED_ABOVE {
            GlucoseBand::Elevated
        } else {
            GlucoseBand::Normal
        }
    }

    pub fn risk_level(&self) -> RiskLevel {
        match self {
            GlucoseBand::Hypoglycemic | GlucoseBand::Hyperglycemic => RiskLevel::High,
            GlucoseBand::Elevated => RiskLevel::Medium,
            GlucoseBand::Normal => RiskLevel::Low,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GlucoseReading {
    pub glucose_level: u16,
    /// Informational only; does not affect reading risk.
    pub glycemic_load: u16,
}

impl GlucoseReading {
    /// Validate a model-extracted reading. `None` when outside 20–600 mg/dL.
    pub fn plausible(glucose: f64, glycemic_load: Option<f64>) -> Option<Self> {
        let rounded = glucose.round();
        if !rounded.is_finite() {
            return None;
        }
        let lo = *GLUCOSE_PLAUSIBLE.start() as f64;
        let hi = *GLUCOSE_PLAUSIBLE.end() as f64;
        if !(lo..=hi).contains(&rounded) {
            return None;
        }
        Some(Self {
            glucose_level: rounded as u16,
            glycemic_load: clamp_load(glycemic_load.unwrap_or(0.0)),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MealEstimate {
    pub glycemic_load: u16,
    pub predicted_glucose: u16,
}

pub fn clamp_load(load: f64) -> u16 {
    if load.is_finite() {
        load.round().clamp(0.0, LOAD_MAX as f64) as u16
    } else {
        0
    }
}

pub fn classify_reading(reading: &GlucoseReading) -> RiskLevel {
    GlucoseBand::of(reading.glucose_level).risk_level()
}

pub fn classify_load(load: u16) -> RiskLevel {
    if load > LOAD_HIGH_ABOVE {
        RiskLevel::High
    } else if load > LOAD_MEDIUM_ABOVE {
        RiskLevel::Medium
    } else {
        RiskLevel::Low
    }
}

pub fn assess_reading(reading: GlucoseReading) -> DiabetesResult {
    let band = GlucoseBand::of(reading.glucose_level);
    let g = reading.glucose_level;
    DiabetesResult {
        basis: GlucoseBasis::Reading,
        glucose_level: g,
        glycemic_load: reading.glycemic_load,
        prediction: prediction_for(band),
        risk_level: band.risk_level(),
        message: reading_message(g, band),
        recommendations: reading_recommendations(band),
        source: ResultSource::Rules,
    }
}

pub fn assess_meal(estimate: MealEstimate) -> DiabetesResult {
    let risk_level = classify_load(estimate.glycemic_load);
    let p = estimate.predicted_glucose;
    DiabetesResult {
        basis: GlucoseBasis::Meal,
        glucose_level: p,
        glycemic_load: estimate.glycemic_load,
        prediction: BilingualText::new(
            format!("Predicted glucose: {p} mg/dL"),
            format!("আনুমানিক গ্লুকোজ: {p} mg/dL"),
        ),
        risk_level,
        message: meal_message(estimate.glycemic_load, risk_level),
        recommendations: meal_recommendations(risk_level),
        source: ResultSource::Rules,
    }
}

/// Mock meter reading: glucose 70–169 mg/dL, load 10–39.
pub fn sample_reading<R: Rng + ?Sized>(rng: &mut R) -> GlucoseReading {
    GlucoseReading {
        glucose_level: rng.gen_range(70..170),
        glycemic_load: rng.gen_range(10..40),
    }
}

/// Mock meal: load 10–59, predicted glucose 100–159 mg/dL.
pub fn sample_meal<R: Rng + ?Sized>(rng: &mut R) -> MealEstimate {
    MealEstimate {
        glycemic_load: rng.gen_range(10..60),
        predicted_glucose: rng.gen_range(100..160),
    }
}

fn prediction_for(band: GlucoseBand) -> BilingualText {
    match band {
        GlucoseBand::Hypoglycemic => BilingualText::new(
            "Low blood sugar - risk of hypoglycemia",
            "নিম্ন রক্তে শর্করা - হাইপোগ্লাইসেমিয়ার ঝুঁকি",
        ),
        GlucoseBand::Hyperglycemic => BilingualText::new(
            "High blood sugar - risk of hyperglycemia",
            "উচ্চ রক্তে শর্করা - হাইপারগ্লাইসেমিয়ার ঝুঁকি",
        ),
        GlucoseBand::Elevated => BilingualText::new(
            "Slightly elevated - monitor closely",
            "সামান্য বৃদ্ধি - ঘনিষ্ঠভাবে পর্যবেক্ষণ করুন",
        ),
        GlucoseBand::Normal => BilingualText::new("Normal range", "স্বাভাবিক সীমা"),
    }
}

pub fn reading_message(g: u16, band: GlucoseBand) -> BilingualText {
    match band {
        GlucoseBand::Hypoglycemic => BilingualText::new(
            format!("Low blood sugar detected ({g} mg/dL). Eat something sweet immediately."),
            format!("নিম্ন রক্তে শর্করা সনাক্ত হয়েছে ({g} mg/dL)। অবিলম্বে মিষ্টি কিছু খান।"),
        ),
        GlucoseBand::Hyperglycemic => BilingualText::new(
            format!("High blood sugar detected ({g} mg/dL). Reduce carbs and monitor closely."),
            format!("উচ্চ রক্তে শর্করা সনাক্ত হয়েছে ({g} mg/dL)। কার্বোহাইড্রেট কমান এবং ঘনিষ্ঠভাবে পর্যবেক্ষণ করুন।"),
        ),
        GlucoseBand::Elevated => BilingualText::new(
            format!("Blood sugar slightly elevated ({g} mg/dL). Watch your diet."),
            format!("রক্তে শর্করা সামান্য বৃদ্ধি পেয়েছে ({g} mg/dL)। আপনার খাদ্য দেখুন।"),
        ),
        GlucoseBand::Normal => BilingualText::new(
            format!("Blood sugar is normal ({g} mg/dL). Keep up the good work!"),
            format!("রক্তে শর্করা স্বাভাবিক ({g} mg/dL)। ভালো কাজ চালিয়ে যান!"),
        ),
    }
}

pub fn reading_recommendations(band: GlucoseBand) -> BilingualList {
    match band {
        GlucoseBand::Hyperglycemic => BilingualList::from_static(
            &[
                "Reduce carbohydrate intake immediately",
                "Avoid rice, bread, and sweets",
                "Drink plenty of water",
                "Contact your doctor if levels stay high",
                "Monitor glucose every 2-3 hours",
            ],
            &[
                "অবিলম্বে কার্বোহাইড্রেট গ্রহণ কমান",
                "ভাত, রুটি এবং মিষ্টি এড়িয়ে চলুন",
                "প্রচুর পানি পান করুন",
                "মাত্রা উচ্চ থাকলে আপনার ডাক্তারের সাথে যোগাযোগ করুন",
                "প্রতি ২-৩ ঘন্টায় গ্লুকোজ পর্যবেক্ষণ করুন",
            ],
        ),
        GlucoseBand::Hypoglycemic => BilingualList::from_static(
            &[
                "Eat something sweet immediately (juice, candy)",
                "Rest and recheck in 15 minutes",
                "Keep emergency snacks nearby",
                "Inform someone about your condition",
            ],
            &[
                "অবিলম্বে মিষ্টি কিছু খান (জুস, ক্যান্ডি)",
                "বিশ্রাম নিন এবং ১৫ মিনিটে পুনরায় পরীক্ষা করুন",
                "জরুরি স্ন্যাকস কাছে রাখুন",
                "আপনার অবস্থা সম্পর্কে কাউকে জানান",
            ],
        ),
        GlucoseBand::Elevated => BilingualList::from_static(
            &[
                "Reduce portion sizes",
                "Choose whole grains over white rice",
                "Add more vegetables to meals",
                "Monitor after meals",
            ],
            &[
                "অংশের আকার কমান",
                "সাদা চালের পরিবর্তে পুরো শস্য বেছে নিন",
                "খাবারে আরও শাকসবজি যোগ করুন",
                "খাবারের পরে পর্যবেক্ষণ করুন",
            ],
        ),
        GlucoseBand::Normal => BilingualList::from_static(
            &[
                "Maintain current diet",
                "Regular monitoring",
                "Stay active",
                "Balanced meals",
            ],
            &[
                "বর্তমান খাদ্য বজায় রাখুন",
                "নিয়মিত পর্যবেক্ষণ",
                "সক্রিয় থাকুন",
                "সুষম খাবার",
            ],
        ),
    }
}

pub fn meal_message(load: u16, risk: RiskLevel) -> BilingualText {
    match risk {
        RiskLevel::High => BilingualText::new(
            format!("High glycemic load ({load}). This meal may cause blood sugar spike. Reduce rice portion."),
            format!("উচ্চ গ্লাইসেমিক লোড ({load})। এই খাবার রক্তে শর্করা বৃদ্ধি ঘটাতে পারে। চাল কম খান।"),
        ),
        RiskLevel::Medium => BilingualText::new(
            format!("Moderate glycemic load ({load}). Balanced meal, but watch portions."),
            format!("মাঝারি গ্লাইসেমিক লোড ({load})। সুষম খাবার, তবে অংশ দেখুন।"),
        ),
        RiskLevel::Low => BilingualText::new(
            format!("Low glycemic load ({load}). Excellent choice for blood sugar control!"),
            format!("কম গ্লাইসেমিক লোড ({load})। রক্তে শর্করা নিয়ন্ত্রণের জন্য চমৎকার পছন্দ!"),
        ),
    }
}

pub fn meal_recommendations(risk: RiskLevel) -> BilingualList {
    match risk {
        RiskLevel::High => BilingualList::from_static(
            &[
                "This meal has high sugar impact",
                "Reduce rice/bread portion by half",
                "Add more protein and vegetables",
                "Expect blood sugar spike in 1-2 hours",
            ],
            &[
                "এই খাবারে উচ্চ চিনির প্রভাব রয়েছে",
                "ভাত/রুটির অংশ অর্ধেক কমান",
                "আরও প্রোটিন এবং শাকসবজি যোগ করুন",
                "১-২ ঘন্টায় রক্তে শর্করা বৃদ্ধির আশা করুন",
            ],
        ),
        RiskLevel::Medium => BilingualList::from_static(
            &[
                "Moderate glycemic load",
                "Add vegetables to balance",
                "Monitor after eating",
                "Good protein content",
            ],
            &[
                "মাঝারি গ্লাইসেমিক লোড",
                "ভারসাম্যের জন্য শাকসবজি যোগ করুন",
                "খাওয়ার পরে পর্যবেক্ষণ করুন",
                "ভালো প্রোটিন সামগ্রী",
            ],
        ),
        RiskLevel::Low => BilingualList::from_static(
            &[
                "Low glycemic impact",
                "Well-balanced meal",
                "Good for blood sugar control",
            ],
            &[
                "কম গ্লাইসেমিক প্রভাব",
                "সুষম খাবার",
                "রক্তে শর্করা নিয়ন্ত্রণের জন্য ভালো",
            ],
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn reading(g: u16) -> GlucoseReading {
        GlucoseReading {
            glucose_level: g,
            glycemic_load: 15,
        }
    }

    #[test]
    fn seventy_is_not_hypoglycemic() {
        assert_eq!(GlucoseBand::of(70), GlucoseBand::Normal);
        assert_eq!(classify_reading(&reading(70)), RiskLevel::Low);
        assert_eq!(GlucoseBand::of(69), GlucoseBand::Hypoglycemic);
    }

    #[test]
    fn reading_table_boundaries() {
        assert_eq!(classify_reading(&reading(120)), RiskLevel::Low);
        assert_eq!(classify_reading(&reading(121)), RiskLevel::Medium);
        assert_eq!(classify_reading(&reading(140)), RiskLevel::Medium);
        assert_eq!(classify_reading(&reading(141)), RiskLevel::High);
        assert_eq!(classify_reading(&reading(55)), RiskLevel::High);
    }

    #[test]
    fn both_high_bands_route_to_different_advice() {
        let low = assess_reading(reading(60));
        let high = assess_reading(reading(180));
        assert_eq!(low.risk_level, high.risk_level);
        assert_ne!(low.recommendations, high.recommendations);
        assert!(low.message.en.contains("60 mg/dL"));
        assert!(high.message.en.contains("180 mg/dL"));
    }

    #[test]
    fn glycemic_load_table_boundaries() {
        assert_eq!(classify_load(25), RiskLevel::Low);
        assert_eq!(classify_load(26), RiskLevel::Medium);
        assert_eq!(classify_load(40), RiskLevel::Medium);
        assert_eq!(classify_load(41), RiskLevel::High);
    }

    #[test]
    fn meal_result_carries_prediction() {
        let result = assess_meal(MealEstimate {
            glycemic_load: 45,
            predicted_glucose: 150,
        });
        assert_eq!(result.basis, GlucoseBasis::Meal);
        assert_eq!(result.risk_level, RiskLevel::High);
        assert_eq!(result.glucose_level, 150);
        assert_eq!(result.prediction.en, "Predicted glucose: 150 mg/dL");
    }

    #[test]
    fn implausible_glucose_is_rejected() {
        assert!(GlucoseReading::plausible(19.0, None).is_none());
        assert!(GlucoseReading::plausible(601.0, None).is_none());
        let ok = GlucoseReading::plausible(95.4, Some(250.0)).unwrap();
        assert_eq!(ok.glucose_level, 95);
        assert_eq!(ok.glycemic_load, LOAD_MAX);
    }

    #[test]
    fn seeded_samples_stay_in_band() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..100 {
            let r = sample_reading(&mut rng);
            assert!((70..170).contains(&r.glucose_level));
            let m = sample_meal(&mut rng);
            assert!((10..60).contains(&m.glycemic_load));
            assert!((100..160).contains(&m.predicted_glucose));
        }
    }
}
