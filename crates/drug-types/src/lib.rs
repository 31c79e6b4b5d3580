//! # drug-types
//!
//! Type definitions for the drug lookup datasets.
//!
//! This crate provides the records parsed from the three tabular inputs
//! (pairwise interactions, the drug type catalog, and contraindications)
//! together with the projections returned by lookup queries.
//!
//! ## Features
//!
//! - `serde` (default): Enables serialization/deserialization support via serde.
//!   Field names match the JSON shapes consumed by the client UI.
//!
//! ## Usage
//!
//! ```rust
//! use drug_types::{normalize, InteractionRecord};
//!
//! let record = InteractionRecord::new(" Warfarin ", "ASPIRIN", "Increased bleeding risk");
//!
//! assert_eq!(record.drug_a, "warfarin");
//! assert!(record.matches_pair("aspirin", "warfarin"));
//! assert_eq!(normalize("  Ibuprofen "), "ibuprofen");
//! ```

#![warn(missing_docs)]

mod contraindication;
mod drug;
mod interaction;
mod normalize;
mod response;

// Re-export all public types at crate root
pub use contraindication::ContraindicationRecord;
pub use drug::DrugRecord;
pub use interaction::InteractionRecord;
pub use normalize::{is_placeholder, normalize};
pub use response::{ContraindicationSummary, DrugPage, DrugSummary, FilterOptions, InteractionMatch};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_types_are_exported() {
        let _ = InteractionRecord::new("a", "b", "c");
        let _ = DrugRecord::default();
        let _ = ContraindicationRecord::default();
        let _ = FilterOptions::default();
        let _ = DrugPage::default();
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serde_roundtrip() {
        let record = DrugRecord::new("Analgesic", "Tylenol", "Acetaminophen", "McNeil");

        let json = serde_json::to_string(&record).unwrap();
        let parsed: DrugRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(record, parsed);
    }
}
