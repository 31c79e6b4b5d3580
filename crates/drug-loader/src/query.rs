//! Query engine over the built indices.
//!
//! Every operation is a pure read: no query mutates an index, so any number
//! of queries may run concurrently against the same store. Matching is done
//! on normalized forms; display fields come back with their original casing.
//!
//! Lookups are linear scans over the records plus prefix scans over the
//! sorted vocabularies. [`DrugQueries`] is the contract callers program
//! against, so the structures behind it can change without touching them.

use drug_types::{
    normalize, ContraindicationSummary, DrugPage, FilterOptions, InteractionMatch,
};
use thiserror::Error;

use crate::index::{CatalogIndex, ContraindicationIndex, InteractionIndex};

/// Number of drugs per page when browsing by type.
pub const PAGE_SIZE: usize = 20;

/// Maximum number of entries returned by autocomplete queries.
pub const SUGGESTION_LIMIT: usize = 10;

/// Minimum length of the contraindication term for a full search.
pub const MIN_CONTRA_SEARCH_CHARS: usize = 3;

/// Minimum length of a drug name for a full contraindication search.
pub const MIN_DRUG_NAME_CHARS: usize = 2;

/// Minimum length of suggestion terms.
pub const MIN_SUGGESTION_CHARS: usize = 2;

/// Invalid input rejected by a query.
///
/// The rendered messages are what clients see.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QueryError {
    /// No drug list was supplied.
    #[error("No drugs provided.")]
    NoDrugs,

    /// Fewer than two drugs were supplied.
    #[error("Please provide at least two drugs.")]
    TooFewDrugs {
        /// Number of drugs supplied.
        found: usize,
    },

    /// The drug type was missing or blank.
    #[error("No drug type provided.")]
    MissingType,
}

/// Parameters for browsing the catalog by type.
///
/// Optional filters that are `None` or blank match everything.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrowseQuery {
    /// Drug type (required).
    pub drug_type: String,
    /// Exact brand name filter.
    pub brand_name: Option<String>,
    /// Exact generic name filter.
    pub generic_name: Option<String>,
    /// Exact manufacturer filter.
    pub manufacturer: Option<String>,
    /// 1-indexed page.
    pub page: i64,
}

impl BrowseQuery {
    /// Creates a query for the first page of a type with no filters.
    pub fn new(drug_type: impl Into<String>) -> Self {
        Self {
            drug_type: drug_type.into(),
            brand_name: None,
            generic_name: None,
            manufacturer: None,
            page: 1,
        }
    }

    /// Sets the page.
    pub fn page(mut self, page: i64) -> Self {
        self.page = page;
        self
    }

    /// Sets the brand name filter.
    pub fn brand_name(mut self, brand_name: impl Into<String>) -> Self {
        self.brand_name = Some(brand_name.into());
        self
    }

    /// Sets the generic name filter.
    pub fn generic_name(mut self, generic_name: impl Into<String>) -> Self {
        self.generic_name = Some(generic_name.into());
        self
    }

    /// Sets the manufacturer filter.
    pub fn manufacturer(mut self, manufacturer: impl Into<String>) -> Self {
        self.manufacturer = Some(manufacturer.into());
        self
    }
}

/// The read operations served to clients.
pub trait DrugQueries {
    /// Up to [`SUGGESTION_LIMIT`] interaction drug names starting with
    /// `term`, sorted. An empty term yields nothing.
    fn search_drug_names(&self, term: &str) -> Vec<String>;

    /// Looks up every unordered pair of the given drugs and returns the
    /// first recorded interaction for each pair that has one.
    ///
    /// # Errors
    /// [`QueryError::TooFewDrugs`] if fewer than two names are given.
    fn check_interactions(&self, drugs: &[String]) -> Result<Vec<InteractionMatch>, QueryError>;

    /// Distinct brand names, generic names and manufacturers for a type.
    /// Unknown types yield three empty lists.
    fn filter_options(&self, drug_type: &str) -> FilterOptions;

    /// One page of catalog drugs of a type, optionally filtered.
    ///
    /// # Errors
    /// [`QueryError::MissingType`] if the type is blank.
    fn browse_by_type(&self, query: &BrowseQuery) -> Result<DrugPage, QueryError>;

    /// Records of `drug_name` whose contraindications mention `contra_term`.
    fn search_contraindications(
        &self,
        contra_term: &str,
        drug_name: &str,
    ) -> Vec<ContraindicationSummary>;

    /// Up to [`SUGGESTION_LIMIT`] contraindication terms starting with `term`.
    fn suggest_contraindication_terms(&self, term: &str) -> Vec<String>;

    /// Up to [`SUGGESTION_LIMIT`] distinct drug names starting with
    /// `drug_term` whose contraindications mention `contra_term`, sorted.
    fn suggest_drugs_by_contraindication(&self, contra_term: &str, drug_term: &str)
        -> Vec<String>;
}

/// Returns up to `limit` entries of a sorted sequence that start with `prefix`.
fn prefix_matches(sorted: &[String], prefix: &str, limit: usize) -> Vec<String> {
    let start = sorted.partition_point(|value| value.as_str() < prefix);
    sorted[start..]
        .iter()
        .take_while(|value| value.starts_with(prefix))
        .take(limit)
        .cloned()
        .collect()
}

/// Returns the normalized term if it has at least `min_chars` characters.
fn normalized_at_least(term: &str, min_chars: usize) -> Option<String> {
    let normalized = normalize(term);
    (normalized.chars().count() >= min_chars).then_some(normalized)
}

/// Matches a stored field against a normalized filter; blank filters match.
fn filter_matches(value: &str, filter: Option<&str>) -> bool {
    match filter {
        Some(filter) if !filter.is_empty() => normalize(value) == filter,
        _ => true,
    }
}

impl InteractionIndex {
    /// See [`DrugQueries::search_drug_names`].
    pub fn search_drug_names(&self, term: &str) -> Vec<String> {
        let term = normalize(term);
        if term.is_empty() {
            return Vec::new();
        }
        prefix_matches(&self.drug_names, &term, SUGGESTION_LIMIT)
    }

    /// See [`DrugQueries::check_interactions`].
    pub fn check_interactions(
        &self,
        drugs: &[String],
    ) -> Result<Vec<InteractionMatch>, QueryError> {
        if drugs.len() < 2 {
            return Err(QueryError::TooFewDrugs { found: drugs.len() });
        }

        let drugs: Vec<String> = drugs.iter().map(|d| normalize(d)).collect();
        let mut found = Vec::new();

        for (i, drug_a) in drugs.iter().enumerate() {
            for drug_b in &drugs[i + 1..] {
                // First match in source order wins
                let hit = self
                    .records
                    .iter()
                    .find(|record| record.matches_pair(drug_a, drug_b));

                if let Some(record) = hit {
                    found.push(InteractionMatch {
                        drugs: [drug_a.clone(), drug_b.clone()],
                        description: record.description.clone(),
                    });
                }
            }
        }

        Ok(found)
    }
}

impl CatalogIndex {
    /// See [`DrugQueries::filter_options`].
    pub fn filter_options(&self, drug_type: &str) -> FilterOptions {
        self.filters_for(&normalize(drug_type))
            .cloned()
            .unwrap_or_default()
    }

    /// See [`DrugQueries::browse_by_type`].
    pub fn browse_by_type(&self, query: &BrowseQuery) -> Result<DrugPage, QueryError> {
        let drug_type = normalize(&query.drug_type);
        if drug_type.is_empty() {
            return Err(QueryError::MissingType);
        }

        let brand_name = query.brand_name.as_deref().map(normalize);
        let generic_name = query.generic_name.as_deref().map(normalize);
        let manufacturer = query.manufacturer.as_deref().map(normalize);

        let matches: Vec<_> = self
            .records
            .iter()
            .filter(|drug| {
                drug.drug_type == drug_type
                    && filter_matches(&drug.brand_name, brand_name.as_deref())
                    && filter_matches(&drug.generic_name, generic_name.as_deref())
                    && filter_matches(&drug.manufacturer, manufacturer.as_deref())
            })
            .collect();

        let drugs = match usize::try_from(query.page) {
            Ok(page) if page >= 1 => matches
                .iter()
                .skip((page - 1).saturating_mul(PAGE_SIZE))
                .take(PAGE_SIZE)
                .map(|drug| drug.summary())
                .collect(),
            _ => Vec::new(),
        };

        Ok(DrugPage {
            drugs,
            total_matches: matches.len(),
            current_page: query.page,
            page_size: PAGE_SIZE,
        })
    }
}

impl ContraindicationIndex {
    /// See [`DrugQueries::search_contraindications`].
    pub fn search_contraindications(
        &self,
        contra_term: &str,
        drug_name: &str,
    ) -> Vec<ContraindicationSummary> {
        let (Some(contra_term), Some(drug_name)) = (
            normalized_at_least(contra_term, MIN_CONTRA_SEARCH_CHARS),
            normalized_at_least(drug_name, MIN_DRUG_NAME_CHARS),
        ) else {
            return Vec::new();
        };

        self.records
            .iter()
            .zip(&self.keys)
            .filter(|(_, keys)| keys.drug_name == drug_name && keys.text.contains(&contra_term))
            .map(|(record, _)| record.summary())
            .collect()
    }

    /// See [`DrugQueries::suggest_contraindication_terms`].
    pub fn suggest_contraindication_terms(&self, term: &str) -> Vec<String> {
        match normalized_at_least(term, MIN_SUGGESTION_CHARS) {
            Some(term) => prefix_matches(&self.terms, &term, SUGGESTION_LIMIT),
            None => Vec::new(),
        }
    }

    /// See [`DrugQueries::suggest_drugs_by_contraindication`].
    pub fn suggest_drugs_by_contraindication(
        &self,
        contra_term: &str,
        drug_term: &str,
    ) -> Vec<String> {
        let (Some(contra_term), Some(drug_term)) = (
            normalized_at_least(contra_term, MIN_SUGGESTION_CHARS),
            normalized_at_least(drug_term, MIN_SUGGESTION_CHARS),
        ) else {
            return Vec::new();
        };

        let mut names: Vec<&str> = self
            .records
            .iter()
            .zip(&self.keys)
            .filter(|(_, keys)| {
                keys.drug_name.starts_with(&drug_term) && keys.text.contains(&contra_term)
            })
            .map(|(record, _)| record.drug_name.as_str())
            .collect();

        names.sort_unstable();
        names.dedup();
        names
            .into_iter()
            .take(SUGGESTION_LIMIT)
            .map(str::to_string)
            .collect()
    }
}
