//! Helper functions and utilities
//!
//! Small string helpers shared by concepts and recipes.

/// Normalize a free-form name: trimmed, inner whitespace collapsed
pub fn normalize_name(input: &str) -> String {
    input.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Join response messages in call order, skipping empty ones
pub fn join_messages<I, S>(messages: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    messages
        .into_iter()
        .filter(|m| !m.as_ref().is_empty())
        .map(|m| m.as_ref().to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Compare two place names ignoring case and surrounding whitespace
pub fn same_place(a: &str, b: &str) -> bool {
    normalize_name(a).to_lowercase() == normalize_name(b).to_lowercase()
}
