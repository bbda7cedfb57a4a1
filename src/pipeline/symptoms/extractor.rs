use crate::models::Language;

use super::keywords::{contains_any, SYMPTOM_CATEGORIES};

/// Scan `text` for known symptom surface forms and merge the matches into
/// `selected`.
///
/// Selected tags keep their relative order and come first; newly found
/// categories follow in table order. The output never drops a selected tag
/// and never repeats one. `Mixed` checks both vocabularies.
pub fn extract_symptoms(text: &str, hint: Language, selected: &[String]) -> Vec<String> {
    let mut tags: Vec<String> = Vec::with_capacity(selected.len() + 4);
    for tag in selected {
        push_unique(&mut tags, tag);
    }

    if text.trim().is_empty() {
        return tags;
    }

    for category in SYMPTOM_CATEGORIES {
        let matched = match hint {
            Language::En => contains_any(text, category.en),
            Language::Bn => contains_any(text, category.bn),
            Language::Mixed => {
                contains_any(text, category.en) || contains_any(text, category.bn)
            }
        };
        if matched {
            push_unique(&mut tags, category.tag);
        }
    }

    tags
}

/// Append `tag` unless already present. Preserves insertion order.
pub fn push_unique(tags: &mut Vec<String>, tag: &str) {
    if !tags.iter().any(|t| t == tag) {
        tags.push(tag.to_string());
    }
}

/// Order-preserving set union of two tag lists.
pub fn union_tags(first: &[String], second: &[String]) -> Vec<String> {
    let mut tags = Vec::with_capacity(first.len() + second.len());
    for tag in first.iter().chain(second) {
        push_unique(&mut tags, tag);
    }
    tags
}
