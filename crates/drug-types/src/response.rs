//! Query result projections.
//!
//! These are the shapes handed back to callers. With the `serde` feature
//! they serialize to the JSON consumed by the client UI.

/// An interaction found for a pair of requested drugs.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InteractionMatch {
    /// The requested pair, normalized, in request order.
    pub drugs: [String; 2],
    /// Interaction description of the first matching record.
    pub description: String,
}

/// Distinct filter values available for one drug type.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct FilterOptions {
    /// Sorted distinct brand names.
    pub brand_names: Vec<String>,
    /// Sorted distinct generic names.
    pub generic_names: Vec<String>,
    /// Sorted distinct manufacturers.
    pub manufacturers: Vec<String>,
}

impl FilterOptions {
    /// Returns true if no filter values are present.
    pub fn is_empty(&self) -> bool {
        self.brand_names.is_empty() && self.generic_names.is_empty() && self.manufacturers.is_empty()
    }
}

/// Display projection of a catalog drug.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct DrugSummary {
    /// Brand name, original casing.
    pub brand_name: String,
    /// Generic name, original casing.
    pub generic_name: String,
    /// Manufacturer, original casing.
    pub manufacturer: String,
}

/// One page of drugs of a given type.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct DrugPage {
    /// Drugs on this page.
    pub drugs: Vec<DrugSummary>,
    /// Number of drugs matching the type and filters, across all pages.
    pub total_matches: usize,
    /// The requested page (1-indexed), echoed back even when out of range.
    pub current_page: i64,
    /// Fixed page size.
    pub page_size: usize,
}

/// Projection returned by contraindication search.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ContraindicationSummary {
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
}
