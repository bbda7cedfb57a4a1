//! Results used when no model is configured or a model answer is unusable.
//!
//! Fallback values still go through the domain tables, so a fallback result
//! obeys the same invariants as a model-derived one.

use std::sync::Mutex;

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::models::{Domain, DomainResult, GlucoseBasis, ResultSource};
use crate::pipeline::domains::{anemia, blood_pressure, glucose, infection, nutrition};
use crate::pipeline::response::ParseContext;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FallbackMode {
    /// Neutral readings that never alarm.
    Fixed,
    /// Seeded pseudo-random readings from the mock bands.
    Sampled,
}

impl FallbackMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            FallbackMode::Fixed => "fixed",
            FallbackMode::Sampled => "sampled",
        }
    }
}

impl std::str::FromStr for FallbackMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "fixed" => Ok(FallbackMode::Fixed),
            "sampled" | "mock" => Ok(FallbackMode::Sampled),
            other => Err(format!("unknown fallback mode '{other}'")),
        }
    }
}

const FIXED_PALLOR: f64 = 25.0;
const FIXED_SYSTOLIC: u16 = 120;
const FIXED_DIASTOLIC: u16 = 80;
const FIXED_GLUCOSE: u16 = 100;
const FIXED_GLYCEMIC_LOAD: u16 = 20;
const FIXED_PREDICTED_GLUCOSE: u16 = 110;
const FIXED_CALORIES: f64 = 450.0;

pub struct FallbackGenerator {
    mode: FallbackMode,
    rng: Mutex<StdRng>,
}

impl FallbackGenerator {
    /// `seed` makes sampled output reproducible; `None` seeds from entropy.
    pub fn new(mode: FallbackMode, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            mode,
            rng: Mutex::new(rng),
        }
    }

    pub fn mode(&self) -> FallbackMode {
        self.mode
    }

    /// A result for `domain` tagged with the fallback source. Never fails.
    pub fn generate(&self, domain: Domain, ctx: &ParseContext) -> DomainResult {
        let result = match domain {
            Domain::Anemia => DomainResult::Anemia(anemia::assess(self.anemia_reading())),
            Domain::BloodPressure => {
                DomainResult::BloodPressure(blood_pressure::assess(self.bp_reading(), &ctx.symptoms))
            }
            Domain::Diabetes => match ctx.basis.unwrap_or(GlucoseBasis::Reading) {
                GlucoseBasis::Reading => {
                    DomainResult::Diabetes(glucose::assess_reading(self.glucose_reading()))
                }
                GlucoseBasis::Meal => DomainResult::Diabetes(glucose::assess_meal(self.meal_estimate())),
            },
            // Triage needs no reading; the reported tags are the whole input.
            Domain::Infection => DomainResult::Infection(infection::assess(&ctx.symptoms)),
            Domain::Nutrition => DomainResult::Nutrition(nutrition::assess(self.meal_nutrients())),
        };

        tracing::debug!(
            domain = domain.as_str(),
            mode = self.mode.as_str(),
            risk = result.risk_level().as_str(),
            "Generated fallback result"
        );
        result.with_source(ResultSource::Fallback)
    }

    fn with_rng<T>(&self, f: impl FnOnce(&mut StdRng) -> T) -> T {
        let mut rng = self.rng.lock().unwrap_or_else(|e| e.into_inner());
        f(&mut rng)
    }

    fn anemia_reading(&self) -> anemia::AnemiaReading {
        match self.mode {
            FallbackMode::Fixed => anemia::AnemiaReading::from_score(FIXED_PALLOR),
            FallbackMode::Sampled => self.with_rng(|rng| anemia::sample_fallback(rng)),
        }
    }

    fn bp_reading(&self) -> blood_pressure::BpReading {
        match self.mode {
            FallbackMode::Fixed => blood_pressure::BpReading {
                systolic: FIXED_SYSTOLIC,
                diastolic: FIXED_DIASTOLIC,
            },
            FallbackMode::Sampled => self.with_rng(|rng| blood_pressure::sample(rng)),
        }
    }

    fn glucose_reading(&self) -> glucose::GlucoseReading {
        match self.mode {
            FallbackMode::Fixed => glucose::GlucoseReading {
                glucose_level: FIXED_GLUCOSE,
                glycemic_load: FIXED_GLYCEMIC_LOAD,
            },
            FallbackMode::Sampled => self.with_rng(|rng| glucose::sample_reading(rng)),
        }
    }

    fn meal_estimate(&self) -> glucose::MealEstimate {
        match self.mode {
            FallbackMode::Fixed => glucose::MealEstimate {
                glycemic_load: FIXED_GLYCEMIC_LOAD,
                predicted_glucose: FIXED_PREDICTED_GLUCOSE,
            },
            FallbackMode::Sampled => self.with_rng(|rng| glucose::sample_meal(rng)),
        }
    }

    fn meal_nutrients(&self) -> nutrition::MealNutrients {
        match self.mode {
            FallbackMode::Fixed => nutrition::MealNutrients {
                iron: nutrition::IRON_FLOOR_MG,
                protein: nutrition::PROTEIN_FLOOR_G,
                calcium: nutrition::CALCIUM_FLOOR_MG,
                calories: FIXED_CALORIES,
            },
            FallbackMode::Sampled => self.with_rng(|rng| nutrition::sample(rng)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RiskLevel;

    const DOMAINS: [Domain; 5] = [
        Domain::Anemia,
        Domain::BloodPressure,
        Domain::Diabetes,
        Domain::Infection,
        Domain::Nutrition,
    ];

    #[test]
    fn fixed_mode_is_neutral_for_every_domain() {
        let generator = FallbackGenerator::new(FallbackMode::Fixed, None);
        for domain in DOMAINS {
            let result = generator.generate(domain, &ParseContext::default());
            assert_eq!(result.risk_level(), RiskLevel::Low, "{domain:?}");
            assert_eq!(result.source(), ResultSource::Fallback);
            assert_eq!(result.domain(), domain);
            assert!(result.message().is_complete());
        }
    }

    #[test]
    fn fixed_meal_basis_uses_glycemic_load() {
        let generator = FallbackGenerator::new(FallbackMode::Fixed, None);
        let DomainResult::Diabetes(r) =
            generator.generate(Domain::Diabetes, &ParseContext::for_basis(GlucoseBasis::Meal))
        else {
            panic!("expected diabetes result");
        };
        assert_eq!(r.basis, GlucoseBasis::Meal);
        assert_eq!(r.glycemic_load, FIXED_GLYCEMIC_LOAD);
        assert_eq!(r.glucose_level, FIXED_PREDICTED_GLUCOSE);
    }

    #[test]
    fn fallback_bp_still_counts_reported_symptoms() {
        let generator = FallbackGenerator::new(FallbackMode::Fixed, None);
        let ctx = ParseContext::with_symptoms(vec!["headache".into(), "vision".into()]);
        let DomainResult::BloodPressure(r) = generator.generate(Domain::BloodPressure, &ctx) else {
            panic!("expected bp result");
        };
        assert!(r.preeclampsia_risk);
    }

    #[test]
    fn same_seed_gives_same_sequence() {
        let a = FallbackGenerator::new(FallbackMode::Sampled, Some(42));
        let b = FallbackGenerator::new(FallbackMode::Sampled, Some(42));
        for domain in DOMAINS {
            for _ in 0..5 {
                let ctx = ParseContext::default();
                assert_eq!(a.generate(domain, &ctx), b.generate(domain, &ctx));
            }
        }
    }

    #[test]
    fn sampled_results_respect_tables() {
        let generator = FallbackGenerator::new(FallbackMode::Sampled, Some(9));
        for _ in 0..50 {
            let DomainResult::Anemia(r) = generator.generate(Domain::Anemia, &ParseContext::default())
            else {
                panic!("expected anemia result");
            };
            assert!((20..80).contains(&r.pallor_level));
            let reading = anemia::AnemiaReading::from_score(r.pallor_level as f64);
            assert_eq!(r.risk_level, anemia::classify(&reading));
        }
    }

    #[test]
    fn parses_mode_names() {
        assert_eq!("fixed".parse::<FallbackMode>(), Ok(FallbackMode::Fixed));
        assert_eq!("Sampled".parse::<FallbackMode>(), Ok(FallbackMode::Sampled));
        assert_eq!("mock".parse::<FallbackMode>(), Ok(FallbackMode::Sampled));
        assert!("random".parse::<FallbackMode>().is_err());
    }
}
