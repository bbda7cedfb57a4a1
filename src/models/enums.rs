use crate::db::DatabaseError;
use serde::{Deserialize, Serialize};

/// Macro to generate enum with as_str + std::str::FromStr pattern.
/// Variants are declared in ascending order so the derived `Ord` is meaningful.
macro_rules! str_enum {
    ($name:ident { $($variant:ident => $s:literal),+ $(,)? }) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub enum $name {
            $(#[serde(rename = $s)] $variant),+
        }

        impl $name {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $s),+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = DatabaseError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($s => Ok(Self::$variant)),+,
                    _ => Err(DatabaseError::InvalidEnum {
                        field: stringify!($name).into(),
                        value: s.into(),
                    }),
                }
            }
        }
    };
}

str_enum!(RiskLevel {
    Low => "low",
    Medium => "medium",
    High => "high",
});

str_enum!(Urgency {
    Monitor => "monitor",
    Consult => "consult",
    Urgent => "urgent",
});

str_enum!(Severity {
    Mild => "mild",
    Moderate => "moderate",
    Severe => "severe",
});

str_enum!(Language {
    En => "en",
    Bn => "bn",
    Mixed => "mixed",
});

str_enum!(Domain {
    Anemia => "anemia",
    BloodPressure => "bp",
    Diabetes => "diabetes",
    Infection => "infection",
    Nutrition => "nutrition",
});

str_enum!(Nutrient {
    Iron => "iron",
    Protein => "protein",
    Calcium => "calcium",
});

str_enum!(RetakeReason {
    ImageNotClear => "image_not_clear",
    ImplausibleReading => "implausible_reading",
});

str_enum!(ResultSource {
    Rules => "rules",
    Model => "model",
    Fallback => "fallback",
});

impl Urgency {
    /// Risk implied by a triage bucket: urgent is always high, monitor never is.
    pub fn risk_level(&self) -> RiskLevel {
        match self {
            Urgency::Urgent => RiskLevel::High,
            Urgency::Consult => RiskLevel::Medium,
            Urgency::Monitor => RiskLevel::Low,
        }
    }
}

impl Nutrient {
    /// Display name on the Bengali side of a message.
    pub fn bn_name(&self) -> &'static str {
        match self {
            Nutrient::Iron => "আয়রন",
            Nutrient::Protein => "প্রোটিন",
            Nutrient::Calcium => "ক্যালসিয়াম",
        }
    }
}

impl Language {
    /// Map a client-supplied preference to a display language.
    /// Anything that is not Bengali renders in English.
    pub fn preference(tag: &str) -> Language {
        match tag.trim().to_lowercase().as_str() {
            "bn" | "bn-bd" | "bengali" | "bangla" => Language::Bn,
            _ => Language::En,
        }
    }
}

impl RiskLevel {
    /// Parse a model-asserted risk label (`LOW`, `Medium`, `high risk`).
    pub fn from_label(value: &str) -> Option<RiskLevel> {
        let lower = value.trim().to_lowercase();
        if lower.starts_with("high") {
            Some(RiskLevel::High)
        } else if lower.starts_with("medium") || lower.starts_with("moderate") {
            Some(RiskLevel::Medium)
        } else if lower.starts_with("low") {
            Some(RiskLevel::Low)
        } else {
            None
        }
    }
}

impl Urgency {
    pub fn from_label(value: &str) -> Option<Urgency> {
        let lower = value.trim().to_lowercase();
        if lower.starts_with("urgent") {
            Some(Urgency::Urgent)
        } else if lower.starts_with("consult") {
            Some(Urgency::Consult)
        } else if lower.starts_with("monitor") {
            Some(Urgency::Monitor)
        } else {
            None
        }
    }
}

impl Severity {
    pub fn from_label(value: &str) -> Option<Severity> {
        let lower = value.trim().to_lowercase();
        if lower.starts_with("severe") {
            Some(Severity::Severe)
        } else if lower.starts_with("moderate") {
            Some(Severity::Moderate)
        } else if lower.starts_with("mild") {
            Some(Severity::Mild)
        } else {
            None
        }
    }
}
