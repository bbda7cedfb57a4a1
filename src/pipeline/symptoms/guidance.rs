//! Bilingual advice for symptom-checker results, keyed by urgency.

use crate::models::{BilingualList, BilingualText, Urgency};

pub fn message_for(urgency: Urgency) -> BilingualText {
    match urgency {
        Urgency::Urgent => BilingualText::new(
            "Based on your description, you need immediate medical attention. Please seek care right away.",
            "আপনার বর্ণনার ভিত্তিতে, আপনার অবিলম্বে চিকিৎসা প্রয়োজন। অনুগ্রহ করে এখনই চিকিৎসা নিন।",
        ),
        Urgency::Consult => BilingualText::new(
            "Your symptoms suggest you should consult with your healthcare provider soon.",
            "আপনার লক্ষণগুলো বলছে যে আপনার শীঘ্রই স্বাস্থ্যসেবা প্রদানকারীর পরামর্শ নেওয়া উচিত।",
        ),
        Urgency::Monitor => BilingualText::new(
            "Your symptoms appear manageable. Continue monitoring and maintain regular checkups.",
            "আপনার লক্ষণগুলো নিয়ন্ত্রণযোগ্য বলে মনে হচ্ছে। পর্যবেক্ষণ চালিয়ে যান এবং নিয়মিত চেকআপ রাখুন।",
        ),
    }
}

/// Message used when the assessment rests on checkboxes alone.
pub fn checkbox_only_message() -> BilingualText {
    BilingualText::new(
        "Assessment based on selected symptoms.",
        "নির্বাচিত লক্ষণের ভিত্তিতে মূল্যায়ন।",
    )
}

pub fn recommendations_for(urgency: Urgency) -> BilingualList {
    match urgency {
        Urgency::Urgent => BilingualList::from_static(
            &[
                "Seek immediate medical attention",
                "Go to the nearest emergency room",
                "Call your doctor or emergency services",
                "Do not delay treatment",
                "Have someone accompany you",
            ],
            &[
                "অবিলম্বে চিকিৎসা সহায়তা নিন",
                "নিকটতম জরুরি বিভাগে যান",
                "আপনার ডাক্তার বা জরুরি সেবায় কল করুন",
                "চিকিৎসা বিলম্বিত করবেন না",
                "কাউকে সাথে নিয়ে যান",
            ],
        ),
        Urgency::Consult => BilingualList::from_static(
            &[
                "Contact your healthcare provider today",
                "Schedule an appointment within 24-48 hours",
                "Monitor symptoms closely",
                "Rest and stay hydrated",
                "Keep a symptom diary",
            ],
            &[
                "আজই আপনার স্বাস্থ্যসেবা প্রদানকারীর সাথে যোগাযোগ করুন",
                "২৪-৪৮ ঘন্টার মধ্যে অ্যাপয়েন্টমেন্ট নিন",
                "লক্ষণগুলো ঘনিষ্ঠভাবে পর্যবেক্ষণ করুন",
                "বিশ্রাম নিন এবং হাইড্রেটেড থাকুন",
                "লক্ষণের ডায়েরি রাখুন",
            ],
        ),
        Urgency::Monitor => BilingualList::from_static(
            &[
                "Continue monitoring symptoms",
                "Rest and maintain good hydration",
                "Eat nutritious meals",
                "Contact doctor if symptoms worsen",
                "Maintain regular prenatal checkups",
            ],
            &[
                "লক্ষণগুলো পর্যবেক্ষণ চালিয়ে যান",
                "বিশ্রাম নিন এবং পর্যাপ্ত পানি পান করুন",
                "পুষ্টিকর খাবার খান",
                "লক্ষণ খারাপ হলে ডাক্তারের সাথে যোগাযোগ করুন",
                "নিয়মিত প্রসবপূর্ব চেকআপ বজায় রাখুন",
            ],
        ),
    }
}

/// Co-occurrence table of symptom tags to conditions worth mentioning to a
/// provider. Never a diagnosis.
pub fn possible_conditions(tags: &[String]) -> Vec<String> {
    let has = |tag: &str| tags.iter().any(|t| t == tag);
    let mut conditions = Vec::new();

    if has("fever") && has("pain") {
        conditions.push("Infection".to_string());
        conditions.push("Urinary tract infection".to_string());
    }
    if has("bleeding") {
        conditions.push("Pregnancy complications".to_string());
        conditions.push("Placental issues".to_string());
    }
    if has("headache") && has("dizziness") {
        conditions.push("Preeclampsia".to_string());
        conditions.push("High blood pressure".to_string());
    }
    if has("headache") && has("swelling") && !conditions.iter().any(|c| c == "Preeclampsia") {
        conditions.push("Preeclampsia".to_string());
    }

    if conditions.is_empty() {
        conditions.push("General pregnancy discomfort".to_string());
        conditions.push("Common symptoms".to_string());
    }
    conditions
}
