//! String normalization shared by every lookup.

/// Returns the normalized form of a value: surrounding whitespace trimmed,
/// then lower-cased.
///
/// All matching is done on normalized forms. Display fields keep the text
/// as it was read.
///
/// # Examples
///
/// ```
/// use drug_types::normalize;
///
/// assert_eq!(normalize("  Liver Disease "), "liver disease");
/// assert_eq!(normalize(""), "");
/// ```
pub fn normalize(value: &str) -> String {
    value.trim().to_lowercase()
}

/// Returns true if a cell carries no usable value: empty after trimming,
/// or the literal `false` some exports write for blank cells.
pub fn is_placeholder(value: &str) -> bool {
    let trimmed = value.trim();
    trimmed.is_empty() || trimmed.eq_ignore_ascii_case("false")
}
