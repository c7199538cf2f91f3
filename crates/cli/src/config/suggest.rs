// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Rule id suggestions for config validation.

use crate::rules::RULE_IDS;

/// Suggest a rule id for a typo.
pub fn suggest_rule_id(unknown: &str) -> Option<&'static str> {
    // Empty strings can't be typos
    if unknown.is_empty() {
        return None;
    }

    let normalized = unknown.trim().to_ascii_lowercase().replace('_', "-");
    if let Some(&id) = RULE_IDS.iter().find(|&&id| id == normalized) {
        return Some(id);
    }

    // Common shorthands and variations
    let suggestion = match normalized.as_str() {
        "flat" | "flat-examples" | "conditional-title" => Some("flat-example"),
        "nested-context" | "nested-contexts" | "single-context" | "flatten" => {
            Some("single-level-context")
        }
        "subject" | "named-subject" | "anonymous-subject" => Some("unnamed-subject"),
        "mutation" | "mutating-before" | "let-mutation" => Some("context-mutation"),
        "change" | "change-matcher" | "prefer-change" => Some("prefer-change-matcher"),
        _ => None,
    };

    if suggestion.is_some() {
        return suggestion;
    }

    // Try prefix matching (require at least 3 chars to avoid false positives)
    if normalized.len() >= 3 {
        for &id in RULE_IDS {
            if id.starts_with(&normalized) || normalized.starts_with(id) {
                return Some(id);
            }
        }
    }

    // Closest id within a small edit distance
    RULE_IDS
        .iter()
        .map(|&id| (edit_distance(&normalized, id), id))
        .filter(|&(distance, _)| distance <= MAX_TYPO_DISTANCE)
        .min_by_key(|&(distance, _)| distance)
        .map(|(_, id)| id)
}

/// Largest edit distance still treated as a typo.
const MAX_TYPO_DISTANCE: usize = 2;

/// Levenshtein distance over chars.
fn edit_distance(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    let mut previous: Vec<usize> = (0..=b.len()).collect();
    let mut current = vec![0; b.len() + 1];

    for (i, &ca) in a.iter().enumerate() {
        current[0] = i + 1;
        for (j, &cb) in b.iter().enumerate() {
            let cost = usize::from(ca != cb);
            current[j + 1] = (previous[j + 1] + 1)
                .min(current[j] + 1)
                .min(previous[j] + cost);
        }
        std::mem::swap(&mut previous, &mut current);
    }

    previous[b.len()]
}

/// Error message for an unknown rule id.
pub fn unknown_rule_message(id: &str) -> String {
    match suggest_rule_id(id) {
        Some(suggested) => format!("unknown rule `{id}`. Did you mean `{suggested}`?"),
        None => format!(
            "unknown rule `{id}`\n  Valid rules: {}",
            RULE_IDS.join(", ")
        ),
    }
}

#[cfg(test)]
#[path = "suggest_tests.rs"]
mod tests;
