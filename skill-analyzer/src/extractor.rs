use std::collections::BTreeSet;

use crate::vocabulary::Vocabulary;

/// Detect the canonical skills mentioned in `text`.
///
/// Matching is a case-insensitive substring test without word boundaries, so
/// the variant `go` also matches inside `going`. An absent or empty text yields
/// no skills.
pub fn extract_skills(text: Option<&str>, vocabulary: &Vocabulary) -> BTreeSet<String> {
    let text = match text {
        Some(text) if !text.is_empty() => text.to_lowercase(),
        _ => return BTreeSet::new(),
    };
    vocabulary
        .iter()
        .filter(|skill| skill.variants.iter().any(|v| text.contains(v.as_str())))
        .map(|skill| skill.name.clone())
        .collect()
}
