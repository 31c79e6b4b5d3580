//! Drug type catalog parser.
//!
//! Parses `Drugs-Type.csv` (`Type`, `Brand-Name`, `GenericName`, `Manufacturer`).

use drug_types::{normalize, DrugRecord};

use crate::parser::{Row, TabularRecord};

/// Expected columns in the type catalog file.
const CATALOG_COLUMNS: &[&str] = &["Type", "Brand-Name", "GenericName", "Manufacturer"];

impl TabularRecord for DrugRecord {
    const COLUMNS: &'static [&'static str] = CATALOG_COLUMNS;

    /// Rows without a type are skipped.
    fn from_row(row: &Row<'_>) -> Option<Self> {
        let drug_type = normalize(row.get("Type"));
        if drug_type.is_empty() {
            return None;
        }

        Some(DrugRecord {
            drug_type,
            brand_name: row.get("Brand-Name").to_string(),
            generic_name: row.get("GenericName").to_string(),
            manufacturer: row.get("Manufacturer").to_string(),
        })
    }
}
