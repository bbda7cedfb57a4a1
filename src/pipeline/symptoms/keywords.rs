//! Bilingual keyword tables for symptom, severity and urgency detection.
//!
//! Pure data. Matching is case-insensitive substring containment, so every
//! English entry is stored lowercase.

/// One canonical symptom category and its surface forms.
pub struct SymptomCategory {
    pub tag: &'static str,
    pub en: &'static [&'static str],
    pub bn: &'static [&'static str],
}

pub const SYMPTOM_CATEGORIES: &[SymptomCategory] = &[
    SymptomCategory {
        tag: "fever",
        en: &["fever", "temperature", "hot", "burning up", "feverish"],
        bn: &["জ্বর", "তাপমাত্রা", "গরম"],
    },
    SymptomCategory {
        tag: "pain",
        en: &["pain", "ache", "hurt", "sore", "tender", "cramp"],
        bn: &["ব্যথা", "যন্ত্রণা", "কষ্ট"],
    },
    SymptomCategory {
        tag: "bleeding",
        en: &["bleeding", "blood", "spotting", "hemorrhage"],
        bn: &["রক্তপাত", "রক্ত", "রক্তক্ষরণ"],
    },
    SymptomCategory {
        tag: "nausea",
        en: &["nausea", "vomit", "sick", "queasy", "throw up", "morning sickness"],
        bn: &["বমি", "গা গুলিয়ে"],
    },
    SymptomCategory {
        tag: "headache",
        en: &["headache", "head pain", "migraine"],
        bn: &["মাথাব্যথা", "মাথা ব্যথা", "মাথার যন্ত্রণা"],
    },
    SymptomCategory {
        tag: "dizziness",
        en: &["dizzy", "faint", "lightheaded", "spinning"],
        bn: &["মাথা ঘোরা", "চক্কর", "অজ্ঞান"],
    },
    SymptomCategory {
        tag: "breathing",
        en: &["breathing", "breathe", "breath", "shortness", "suffocation"],
        bn: &["শ্বাস", "শ্বাসকষ্ট", "দম"],
    },
    SymptomCategory {
        tag: "discharge",
        en: &["discharge", "fluid", "leak", "secretion"],
        bn: &["স্রাব", "নিঃসরণ", "ক্ষরণ"],
    },
    SymptomCategory {
        tag: "swelling",
        en: &["swelling", "swollen", "puffy", "edema"],
        bn: &["ফোলা", "ফুলে"],
    },
    SymptomCategory {
        tag: "fatigue",
        en: &["tired", "fatigue", "exhausted"],
        bn: &["ক্লান্ত", "দুর্বল"],
    },
];

pub const SEVERE_EN: &[&str] = &[
    "severe",
    "intense",
    "extreme",
    "unbearable",
    "terrible",
    "very bad",
    "worst",
];
pub const SEVERE_BN: &[&str] = &["তীব্র", "অসহ্য", "খুব", "ভীষণ", "প্রচণ্ড", "অত্যধিক"];

pub const MODERATE_EN: &[&str] = &[
    "moderate",
    "medium",
    "noticeable",
    "bothering",
    "uncomfortable",
];
pub const MODERATE_BN: &[&str] = &["মাঝারি", "মোটামুটি", "অস্বস্তিকর", "বিরক্তিকর"];

pub const URGENT_EN: &[&str] = &[
    "emergency",
    "urgent",
    "immediate",
    "sudden",
    "sharp",
    "can't",
    "cannot",
    "unable",
    "heavy bleeding",
];
pub const URGENT_BN: &[&str] = &[
    "জরুরি",
    "তাৎক্ষণিক",
    "হঠাৎ",
    "তীক্ষ্ণ",
    "পারছি না",
    "অক্ষম",
    "ভারী রক্তপাত",
];

/// Checkbox tags that always escalate to urgent.
pub const URGENT_TAGS: &[&str] = &["bleeding", "severe-pain", "high-fever", "difficulty-breathing"];

/// Text-extracted categories that escalate like their checkbox equivalents.
/// `breathing` stands in for `difficulty-breathing` when it comes from free text.
pub const URGENT_TEXT_TAGS: &[&str] = &["breathing"];

/// True if `text` contains any of `needles`, ignoring ASCII/Unicode case.
pub fn contains_any(text: &str, needles: &[&str]) -> bool {
    let lower = text.to_lowercase();
    needles.iter().any(|n| lower.contains(n))
}
