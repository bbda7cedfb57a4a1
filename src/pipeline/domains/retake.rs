use crate::models::{
    BilingualList, BilingualText, Domain, ResultSource, RetakeReason, RetakeResult, RiskLevel,
};

/// "Please retake" result for a domain. Carries low risk and no numerics.
pub fn retake(domain: Domain, reason: RetakeReason) -> RetakeResult {
    RetakeResult {
        domain,
        reason,
        risk_level: RiskLevel::Low,
        message: message_for(domain, reason),
        recommendations: recommendations_for(domain),
        source: ResultSource::Model,
    }
}

fn subject(domain: Domain) -> (&'static str, &'static str) {
    match domain {
        Domain::Anemia => ("your nails, lips or inner eyelids", "আপনার নখ, ঠোঁট বা চোখের ভেতরের পাতা"),
        Domain::BloodPressure => ("your BP monitor display", "আপনার BP মনিটর ডিসপ্লে"),
        Domain::Diabetes => ("your glucose meter display", "আপনার গ্লুকোজ মিটারের ডিসপ্লে"),
        Domain::Infection => ("the affected area", "আক্রান্ত স্থান"),
        Domain::Nutrition => ("your meal", "আপনার খাবার"),
    }
}

fn message_for(domain: Domain, reason: RetakeReason) -> BilingualText {
    match (domain, reason) {
        (Domain::BloodPressure, RetakeReason::ImageNotClear) => BilingualText::new(
            "I couldn't clearly see the BP numbers in your image. Please upload a clearer photo of your BP monitor display.",
            "আমি আপনার ছবিতে BP নম্বরগুলো স্পষ্ট দেখতে পাচ্ছি না। অনুগ্রহ করে আপনার BP মনিটর ডিসপ্লের আরও পরিষ্কার ছবি আপলোড করুন।",
        ),
        (Domain::BloodPressure, RetakeReason::ImplausibleReading) => BilingualText::new(
            "The BP reading in your image is not clear. Please upload a clearer photo of your BP monitor.",
            "আপনার ছবিতে BP রিডিং স্পষ্ট নয়। অনুগ্রহ করে আপনার BP মনিটরের আরও পরিষ্কার ছবি আপলোড করুন।",
        ),
        (_, RetakeReason::ImageNotClear) => {
            let (en, bn) = subject(domain);
            BilingualText::new(
                format!("I couldn't see {en} clearly in your photo. Please take a clearer photo and try again."),
                format!("আপনার ছবিতে {bn} স্পষ্ট দেখা যাচ্ছে না। অনুগ্রহ করে আরও পরিষ্কার ছবি তুলে আবার চেষ্টা করুন।"),
            )
        }
        (_, RetakeReason::ImplausibleReading) => {
            let (en, bn) = subject(domain);
            BilingualText::new(
                format!("The reading from {en} doesn't look right. Please retake the photo so it can be read correctly."),
                format!("{bn} থেকে পাওয়া রিডিং সঠিক মনে হচ্ছে না। অনুগ্রহ করে আবার ছবি তুলুন।"),
            )
        }
    }
}

fn recommendations_for(domain: Domain) -> BilingualList {
    let (en, bn) = subject(domain);
    BilingualList {
        en: vec![
            format!("Take a clearer photo of {en}"),
            "Ensure good lighting".into(),
            "Hold the camera steady and close".into(),
            "Try again with a clear image".into(),
        ],
        bn: vec![
            format!("{bn} এর আরও পরিষ্কার ছবি তুলুন"),
            "ভালো আলো নিশ্চিত করুন".into(),
            "ক্যামেরা স্থির ও কাছে রাখুন".into(),
            "পরিষ্কার ছবি দিয়ে আবার চেষ্টা করুন".into(),
        ],
    }
}
