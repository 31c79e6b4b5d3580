//! Drug type catalog entry.

use crate::{normalize, DrugSummary};

/// A drug from the type catalog (`Type`, `Brand-Name`, `GenericName`,
/// `Manufacturer`).
///
/// The type is stored normalized and acts as the grouping key. Brand name,
/// generic name and manufacturer keep their original casing for display.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct DrugRecord {
    /// Therapeutic type (normalized).
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    pub drug_type: String,
    /// Brand name, as read.
    pub brand_name: String,
    /// Generic name, as read.
    pub generic_name: String,
    /// Manufacturer, as read.
    pub manufacturer: String,
}

impl DrugRecord {
    /// Creates a record, normalizing the type.
    pub fn new(
        drug_type: &str,
        brand_name: impl Into<String>,
        generic_name: impl Into<String>,
        manufacturer: impl Into<String>,
    ) -> Self {
        Self {
            drug_type: normalize(drug_type),
            brand_name: brand_name.into(),
            generic_name: generic_name.into(),
            manufacturer: manufacturer.into(),
        }
    }

    /// Projects the display fields returned by type browsing.
    pub fn summary(&self) -> DrugSummary {
        DrugSummary {
            brand_name: self.brand_name.clone(),
            generic_name: self.generic_name.clone(),
            manufacturer: self.manufacturer.clone(),
        }
    }
}
