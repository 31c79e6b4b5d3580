//! Read-only lookup indices derived from loaded records.
//!
//! Each dataset gets its own index, built from that dataset's records
//! alone. Distinct values are accumulated into hash sets while scanning and
//! sorted exactly once when the build finishes. Nothing is written after
//! `build` returns.

use std::collections::{HashMap, HashSet};

use drug_types::{
    is_placeholder, normalize, ContraindicationRecord, DrugRecord, FilterOptions,
    InteractionRecord,
};

use crate::parser::TabularRecord;
use crate::types::DatasetKind;

/// An index built from the records of a single dataset.
///
/// `Default` is the empty index, which is what queries see before the
/// dataset has loaded or after its load failed.
pub trait DatasetIndex: Default + Send + Sync + 'static {
    /// Record type parsed from the dataset file.
    type Record: TabularRecord + Send;

    /// Which dataset this index is built from.
    const KIND: DatasetKind;

    /// Builds the index, taking ownership of the records.
    fn build(records: Vec<Self::Record>) -> Self;

    /// Number of records held.
    fn record_count(&self) -> usize;
}

/// Converts an accumulated set into a sorted, distinct sequence.
fn into_sorted(set: HashSet<String>) -> Vec<String> {
    let mut values: Vec<String> = set.into_iter().collect();
    values.sort_unstable();
    values
}

// ═══════════════════════════════════════════════════════════════════════════
// INTERACTIONS
// ═══════════════════════════════════════════════════════════════════════════

/// Interaction records plus the sorted drug name vocabulary.
#[derive(Debug, Clone, Default)]
pub struct InteractionIndex {
    pub(crate) records: Vec<InteractionRecord>,
    /// Distinct normalized names from both drug columns, sorted.
    pub(crate) drug_names: Vec<String>,
}

impl InteractionIndex {
    /// Returns the records in source order.
    pub fn records(&self) -> &[InteractionRecord] {
        &self.records
    }

    /// Returns the sorted, distinct drug names.
    pub fn drug_names(&self) -> &[String] {
        &self.drug_names
    }
}

impl DatasetIndex for InteractionIndex {
    type Record = InteractionRecord;
    const KIND: DatasetKind = DatasetKind::Interactions;

    fn build(records: Vec<InteractionRecord>) -> Self {
        let names: HashSet<String> = records
            .iter()
            .flat_map(|record| record.drug_names())
            .map(str::to_string)
            .collect();

        Self {
            records,
            drug_names: into_sorted(names),
        }
    }

    fn record_count(&self) -> usize {
        self.records.len()
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// TYPE CATALOG
// ═══════════════════════════════════════════════════════════════════════════

/// Filter values collected for one type while building.
#[derive(Default)]
struct FilterSets {
    brand_names: HashSet<String>,
    generic_names: HashSet<String>,
    manufacturers: HashSet<String>,
}

impl FilterSets {
    fn add(set: &mut HashSet<String>, value: &str) {
        if !is_placeholder(value) {
            set.insert(value.trim().to_string());
        }
    }

    fn into_options(self) -> FilterOptions {
        FilterOptions {
            brand_names: into_sorted(self.brand_names),
            generic_names: into_sorted(self.generic_names),
            manufacturers: into_sorted(self.manufacturers),
        }
    }
}

/// Catalog records plus per-type filter options.
#[derive(Debug, Clone, Default)]
pub struct CatalogIndex {
    pub(crate) records: Vec<DrugRecord>,
    /// Filter options keyed by normalized type.
    pub(crate) filters: HashMap<String, FilterOptions>,
}

impl CatalogIndex {
    /// Returns the records in source order.
    pub fn records(&self) -> &[DrugRecord] {
        &self.records
    }

    /// Returns the filter options for a normalized type, if present.
    pub fn filters_for(&self, drug_type: &str) -> Option<&FilterOptions> {
        self.filters.get(drug_type)
    }

    /// Returns the distinct types, sorted.
    pub fn types(&self) -> Vec<&str> {
        let mut types: Vec<&str> = self.filters.keys().map(String::as_str).collect();
        types.sort_unstable();
        types
    }
}

impl DatasetIndex for CatalogIndex {
    type Record = DrugRecord;
    const KIND: DatasetKind = DatasetKind::DrugTypes;

    fn build(records: Vec<DrugRecord>) -> Self {
        let mut sets: HashMap<String, FilterSets> = HashMap::new();

        for record in records.iter().filter(|r| !r.drug_type.is_empty()) {
            let group = sets.entry(record.drug_type.clone()).or_default();
            FilterSets::add(&mut group.brand_names, &record.brand_name);
            FilterSets::add(&mut group.generic_names, &record.generic_name);
            FilterSets::add(&mut group.manufacturers, &record.manufacturer);
        }

        let filters = sets
            .into_iter()
            .map(|(drug_type, group)| (drug_type, group.into_options()))
            .collect();

        Self { records, filters }
    }

    fn record_count(&self) -> usize {
        self.records.len()
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// CONTRAINDICATIONS
// ═══════════════════════════════════════════════════════════════════════════

/// Normalized match keys for one contraindication record.
#[derive(Debug, Clone, Default)]
pub(crate) struct ContraindicationKeys {
    /// Normalized drug name.
    pub(crate) drug_name: String,
    /// Lower-cased raw contraindications text.
    pub(crate) text: String,
}

/// Contraindication records plus the sorted term vocabulary.
#[derive(Debug, Clone, Default)]
pub struct ContraindicationIndex {
    pub(crate) records: Vec<ContraindicationRecord>,
    /// Match keys, parallel to `records`.
    pub(crate) keys: Vec<ContraindicationKeys>,
    /// Distinct contraindication terms, sorted.
    pub(crate) terms: Vec<String>,
}

impl ContraindicationIndex {
    /// Returns the records in source order.
    pub fn records(&self) -> &[ContraindicationRecord] {
        &self.records
    }

    /// Returns the sorted, distinct contraindication terms.
    pub fn terms(&self) -> &[String] {
        &self.terms
    }
}

impl DatasetIndex for ContraindicationIndex {
    type Record = ContraindicationRecord;
    const KIND: DatasetKind = DatasetKind::Contraindications;

    fn build(records: Vec<ContraindicationRecord>) -> Self {
        let mut terms = HashSet::new();
        let mut keys = Vec::with_capacity(records.len());

        for record in &records {
            terms.extend(record.terms());
            keys.push(ContraindicationKeys {
                drug_name: normalize(&record.drug_name),
                text: record.contraindications.to_lowercase(),
            });
        }

        Self {
            records,
            keys,
            terms: into_sorted(terms),
        }
    }

    fn record_count(&self) -> usize {
        self.records.len()
    }
}
