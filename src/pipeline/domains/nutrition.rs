//! Meal nutrition gaps against per-meal sufficiency floors.

use rand::Rng;

use crate::models::{BilingualList, BilingualText, Nutrient, NutritionResult, ResultSource, RiskLevel};

pub const IRON_FLOOR_MG: f64 = 15.0;
pub const PROTEIN_FLOOR_G: f64 = 25.0;
pub const CALCIUM_FLOOR_MG: f64 = 500.0;

pub const IRON_MAX_MG: f64 = 200.0;
pub const PROTEIN_MAX_G: f64 = 300.0;
pub const CALCIUM_MAX_MG: f64 = 5000.0;
pub const CALORIES_MAX: f64 = 10000.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MealNutrients {
    pub iron: f64,
    pub protein: f64,
    pub calcium: f64,
    pub calories: f64,
}

impl MealNutrients {
    /// Validate model-extracted values: finite, non-negative, within one-meal
    /// ceilings.
    pub fn plausible(iron: f64, protein: f64, calcium: f64, calories: f64) -> Option<Self> {
        let ok = |v: f64, max: f64| v.is_finite() && (0.0..=max).contains(&v);
        if ok(iron, IRON_MAX_MG)
            && ok(protein, PROTEIN_MAX_G)
            && ok(calcium, CALCIUM_MAX_MG)
            && ok(calories, CALORIES_MAX)
        {
            Some(Self {
                iron,
                protein,
                calcium,
                calories,
            })
        } else {
            None
        }
    }
}

/// Nutrients below their floor, in fixed iron/protein/calcium order.
/// A value exactly at the floor is sufficient.
pub fn missing_nutrients(meal: &MealNutrients) -> Vec<Nutrient> {
    let mut missing = Vec::new();
    if meal.iron < IRON_FLOOR_MG {
        missing.push(Nutrient::Iron);
    }
    if meal.protein < PROTEIN_FLOOR_G {
        missing.push(Nutrient::Protein);
    }
    if meal.calcium < CALCIUM_FLOOR_MG {
        missing.push(Nutrient::Calcium);
    }
    missing
}

pub fn classify_missing(count: usize) -> RiskLevel {
    match count {
        0 => RiskLevel::Low,
        1 => RiskLevel::Medium,
        _ => RiskLevel::High,
    }
}

pub fn classify(meal: &MealNutrients) -> RiskLevel {
    classify_missing(missing_nutrients(meal).len())
}

pub fn assess(meal: MealNutrients) -> NutritionResult {
    let missing = missing_nutrients(&meal);
    let risk_level = classify_missing(missing.len());
    NutritionResult {
        iron: meal.iron,
        protein: meal.protein,
        calcium: meal.calcium,
        calories: meal.calories,
        message: message_for(&missing),
        recommendations: recommendations_for(risk_level),
        missing,
        risk_level,
        source: ResultSource::Rules,
    }
}

/// Mock meal: iron 5–24, protein 10–49, calcium 200–999, calories 300–899.
pub fn sample<R: Rng + ?Sized>(rng: &mut R) -> MealNutrients {
    MealNutrients {
        iron: rng.gen_range(5..25) as f64,
        protein: rng.gen_range(10..50) as f64,
        calcium: rng.gen_range(200..1000) as f64,
        calories: rng.gen_range(300..900) as f64,
    }
}

pub fn message_for(missing: &[Nutrient]) -> BilingualText {
    match missing {
        [] => BilingualText::new("Well-balanced nutritious meal!", "সুষম পুষ্টিকর খাবার!"),
        [only] => BilingualText::new(
            format!("Good meal, but could use more {}.", only.as_str()),
            format!("ভালো খাবার, তবে আরও {} প্রয়োজন।", only.bn_name()),
        ),
        several => {
            let en = several.iter().map(|n| n.as_str()).collect::<Vec<_>>().join(", ");
            let bn = several.iter().map(|n| n.bn_name()).collect::<Vec<_>>().join(", ");
            BilingualText::new(
                format!("Meal is lacking {en}. Add more nutrient-rich foods."),
                format!("খাবারে {bn} এর অভাব রয়েছে। আরও পুষ্টি সমৃদ্ধ খাবার যোগ করুন।"),
            )
        }
    }
}

pub fn recommendations_for(risk: RiskLevel) -> BilingualList {
    match risk {
        RiskLevel::High => BilingualList::from_static(
            &[
                "Add more protein: fish, eggs, lentils",
                "Include leafy greens for iron",
                "Add dairy or fortified foods for calcium",
                "Eat small frequent meals",
            ],
            &[
                "আরও প্রোটিন যোগ করুন: মাছ, ডিম, ডাল",
                "আয়রনের জন্য পাতাযুক্ত শাক অন্তর্ভুক্ত করুন",
                "ক্যালসিয়ামের জন্য দুগ্ধজাত বা সুরক্ষিত খাবার যোগ করুন",
                "ছোট ঘন ঘন খাবার খান",
            ],
        ),
        RiskLevel::Medium => BilingualList::from_static(
            &[
                "Add one iron-rich food",
                "Include protein in every meal",
                "Drink milk or eat yogurt",
            ],
            &[
                "একটি আয়রন সমৃদ্ধ খাবার যোগ করুন",
                "প্রতিটি খাবারে প্রোটিন অন্তর্ভুক্ত করুন",
                "দুধ পান করুন বা দই খান",
            ],
        ),
        RiskLevel::Low => BilingualList::from_static(
            &["Well-balanced meal", "Continue eating variety", "Stay consistent"],
            &["সুষম খাবার", "বৈচিত্র্যময় খাবার খেতে থাকুন", "সামঞ্জস্যপূর্ণ থাকুন"],
        ),
    }
}
