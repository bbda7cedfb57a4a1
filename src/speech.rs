//! Spoken feedback for results.
//!
//! The server never plays audio itself. It builds an [`Utterance`] for the
//! client's speech engine and hands a copy to a [`SpeechSink`].

use serde::Serialize;

use crate::models::Language;

pub const SPEECH_RATE: f32 = 0.9;
pub const SPEECH_PITCH: f32 = 1.0;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Utterance {
    pub text: String,
    /// BCP 47 locale for the voice.
    pub lang: &'static str,
    pub rate: f32,
    pub pitch: f32,
}

impl Utterance {
    /// Bengali voice for `Bn`, English for everything else.
    pub fn for_language(text: impl Into<String>, language: Language) -> Self {
        let lang = match language {
            Language::Bn => "bn-BD",
            _ => "en-US",
        };
        Self {
            text: text.into(),
            lang,
            rate: SPEECH_RATE,
            pitch: SPEECH_PITCH,
        }
    }
}

pub trait SpeechSink: Send + Sync {
    fn speak(&self, utterance: &Utterance);
}

/// Records utterances in the log.
pub struct TracingSpeechSink;

impl SpeechSink for TracingSpeechSink {
    fn speak(&self, utterance: &Utterance) {
        tracing::debug!(
            lang = utterance.lang,
            chars = utterance.text.chars().count(),
            "Speak"
        );
    }
}
