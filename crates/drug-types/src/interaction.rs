//! Pairwise drug interaction type.
//!
//! This module provides the `InteractionRecord` struct representing a row
//! from the interactions dataset.

use crate::normalize;

/// A pairwise interaction between two drugs.
///
/// Represents a row of the interactions dataset
/// (`Drug 1`, `Drug 2`, `Interaction Description`). Both drug names are
/// stored in normalized form; the pair is unordered for lookup purposes.
///
/// # Examples
///
/// ```
/// use drug_types::InteractionRecord;
///
/// let record = InteractionRecord::new("Warfarin", "Aspirin", "Increased bleeding risk");
///
/// assert!(record.matches_pair("warfarin", "aspirin"));
/// assert!(record.matches_pair("aspirin", "warfarin"));
/// assert!(!record.matches_pair("warfarin", "ibuprofen"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct InteractionRecord {
    /// First drug name (normalized).
    pub drug_a: String,
    /// Second drug name (normalized).
    pub drug_b: String,
    /// Free-text description of the interaction, as read.
    pub description: String,
}

impl InteractionRecord {
    /// Creates a record, normalizing both drug names.
    pub fn new(drug_a: &str, drug_b: &str, description: impl Into<String>) -> Self {
        Self {
            drug_a: normalize(drug_a),
            drug_b: normalize(drug_b),
            description: description.into(),
        }
    }

    /// Returns true if this record describes the unordered pair `{x, y}`.
    ///
    /// Both arguments must already be normalized.
    pub fn matches_pair(&self, x: &str, y: &str) -> bool {
        (self.drug_a == x && self.drug_b == y) || (self.drug_a == y && self.drug_b == x)
    }

    /// Returns the non-empty drug names of this record.
    pub fn drug_names(&self) -> impl Iterator<Item = &str> {
        [self.drug_a.as_str(), self.drug_b.as_str()]
            .into_iter()
            .filter(|name| !name.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_normalizes_names() {
        let record = InteractionRecord::new("  Warfarin ", "ASPIRIN", "Avoid");
        assert_eq!(record.drug_a, "warfarin");
        assert_eq!(record.drug_b, "aspirin");
        assert_eq!(record.description, "Avoid");
    }

    #[test]
    fn test_matches_pair_is_unordered() {
        let record = InteractionRecord::new("druga", "drugb", "Avoid combination");
        assert!(record.matches_pair("druga", "drugb"));
        assert!(record.matches_pair("drugb", "druga"));
        assert!(!record.matches_pair("druga", "druga"));
    }

    #[test]
    fn test_drug_names_skips_empty() {
        let record = InteractionRecord::new("druga", "", "Avoid");
        let names: Vec<&str> = record.drug_names().collect();
        assert_eq!(names, vec!["druga"]);
    }
}
