//! Boolean fuzzy matching for quick action titles.

/// Returns true if `pattern` is a case-insensitive substring of `candidate`,
/// or its characters appear in `candidate` in order.
///
/// An empty pattern matches everything.
pub fn fuzzy_match(candidate: &str, pattern: &str) -> bool {
    if pattern.is_empty() {
        return true;
    }

    let candidate = candidate.to_lowercase();
    let pattern = pattern.to_lowercase();

    if candidate.contains(&pattern) {
        return true;
    }

    let mut chars = candidate.chars();
    pattern.chars().all(|p| chars.any(|c| c == p))
}
