/// Shown when nothing more specific can be said about a match.
pub(crate) const FALLBACK_REASON: &str = "Recommended based on your quiz answers";

/// Qualitative message for a normalized score, if it clears the lowest band.
pub(crate) fn band(normalized: f64) -> Option<&'static str> {
    if normalized > 0.8 {
        Some("Perfect match for your preferences")
    } else if normalized > 0.6 {
        Some("Great match for your taste")
    } else if normalized > 0.4 {
        Some("Good option based on your choices")
    } else {
        None
    }
}

/// Band message first, then the per-axis reasons in the order given.
pub(crate) fn compose(normalized: f64, axis_reasons: Vec<String>) -> Vec<String> {
    let mut reasons = Vec::with_capacity(axis_reasons.len() + 1);
    reasons.extend(band(normalized).map(str::to_string));
    reasons.extend(axis_reasons);

    if reasons.is_empty() {
        reasons.push(FALLBACK_REASON.to_string());
    }
    reasons
}
