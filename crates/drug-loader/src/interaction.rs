//! Interactions dataset parser.
//!
//! Parses `drug-data.csv` (`Drug 1`, `Drug 2`, `Interaction Description`).

use drug_types::InteractionRecord;

use crate::parser::{Row, TabularRecord};

/// Expected columns in the interactions file.
const INTERACTION_COLUMNS: &[&str] = &["Drug 1", "Drug 2", "Interaction Description"];

impl TabularRecord for InteractionRecord {
    const COLUMNS: &'static [&'static str] = INTERACTION_COLUMNS;

    /// Every non-blank row is kept; missing fields become empty strings.
    fn from_row(row: &Row<'_>) -> Option<Self> {
        Some(InteractionRecord::new(
            row.get("Drug 1"),
            row.get("Drug 2"),
            row.get("Interaction Description"),
        ))
    }
}
