use serde::{Deserialize, Serialize};

use super::enums::Language;

/// A user-facing sentence in English and Bengali.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BilingualText {
    pub en: String,
    pub bn: String,
}

impl BilingualText {
    pub fn new(en: impl Into<String>, bn: impl Into<String>) -> Self {
        Self {
            en: en.into(),
            bn: bn.into(),
        }
    }

    /// Fill whichever side is blank from `default`, so neither side is ever empty.
    pub fn or_else(self, default: BilingualText) -> Self {
        Self {
            en: if self.en.trim().is_empty() { default.en } else { self.en },
            bn: if self.bn.trim().is_empty() { default.bn } else { self.bn },
        }
    }

    pub fn in_language(&self, lang: Language) -> &str {
        match lang {
            Language::Bn => &self.bn,
            Language::En | Language::Mixed => &self.en,
        }
    }

    pub fn is_complete(&self) -> bool {
        !self.en.trim().is_empty() && !self.bn.trim().is_empty()
    }
}

/// A list of recommendations in both languages. The sides need not be the
/// same length; each must be non-empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BilingualList {
    pub en: Vec<String>,
    pub bn: Vec<String>,
}

impl BilingualList {
    pub fn from_static(en: &[&str], bn: &[&str]) -> Self {
        Self {
            en: en.iter().map(|s| s.to_string()).collect(),
            bn: bn.iter().map(|s| s.to_string()).collect(),
        }
    }

    pub fn or_else(self, default: BilingualList) -> Self {
        Self {
            en: if self.en.is_empty() { default.en } else { self.en },
            bn: if self.bn.is_empty() { default.bn } else { self.bn },
        }
    }

    pub fn in_language(&self, lang: Language) -> &[String] {
        match lang {
            Language::Bn => &self.bn,
            Language::En | Language::Mixed => &self.en,
        }
    }

    pub fn is_complete(&self) -> bool {
        !self.en.is_empty() && !self.bn.is_empty()
    }
}
