//! Contraindication record type.
//!
//! This module provides the `ContraindicationRecord` struct and the term
//! splitting used to build the contraindication vocabulary.

use crate::{is_placeholder, normalize, ContraindicationSummary};

/// Minimum number of characters a contraindication term needs to be kept.
const MIN_TERM_CHARS: usize = 3;

/// A row of the contraindications dataset.
///
/// All fields are kept as read. `contraindications` is free text holding
/// comma or semicolon separated terms.
///
/// # Examples
///
/// ```
/// use drug_types::ContraindicationRecord;
///
/// let record = ContraindicationRecord {
///     drug_name: "DrugX".to_string(),
///     contraindications: "Pregnancy, liver disease; HF".to_string(),
///     ..Default::default()
/// };
///
/// let terms: Vec<String> = record.terms().collect();
/// assert_eq!(terms, vec!["pregnancy", "liver disease"]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ContraindicationRecord {
    /// Drug name, as read.
    pub drug_name: String,
    /// Manufacturer, as read.
    pub manufacturer: String,
    /// Indications text.
    pub indications: String,
    /// Side effects text.
    pub side_effects: String,
    /// Warnings text.
    pub warnings: String,
    /// Raw contraindications text.
    pub contraindications: String,
}

impl ContraindicationRecord {
    /// Splits the raw contraindications text into normalized terms.
    ///
    /// Pieces are separated by `,` or `;`, then normalized. Pieces shorter
    /// than three characters and the literal `false` are dropped.
    pub fn terms(&self) -> impl Iterator<Item = String> + '_ {
        self.contraindications
            .split([',', ';'])
            .filter(|piece| !is_placeholder(piece))
            .map(normalize)
            .filter(|term| term.chars().count() >= MIN_TERM_CHARS)
    }

    /// Projects the fields returned by contraindication search.
    pub fn summary(&self) -> ContraindicationSummary {
        ContraindicationSummary {
            drug_name: self.drug_name.clone(),
            manufacturer: self.manufacturer.clone(),
            indications: self.indications.clone(),
            side_effects: self.side_effects.clone(),
            warnings: self.warnings.clone(),
        }
    }
}
