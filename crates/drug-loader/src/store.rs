//! In-memory drug data store.
//!
//! Bundles the three per-dataset indices. A store is built once by loading
//! all three datasets and is read-only afterwards.
//!
//! ```ignore
//! let files = discover_dataset_files("./data")?;
//! let (store, report) = DrugStore::load_all_parallel(&files);
//! assert!(report.is_complete());
//!
//! let page = store.browse_by_type(&BrowseQuery::new("analgesic").page(2))?;
//! ```

use std::path::Path;

use drug_types::{ContraindicationSummary, DrugPage, FilterOptions, InteractionMatch};

use crate::index::{CatalogIndex, ContraindicationIndex, DatasetIndex, InteractionIndex};
use crate::loader::load_index;
use crate::query::{BrowseQuery, DrugQueries, QueryError};
use crate::types::{DatasetFiles, DatasetStatus, LoadReport};

/// Immutable bundle of the interaction, catalog and contraindication indices.
///
/// A dataset that failed to load is present as an empty index.
#[derive(Clone, Default)]
pub struct DrugStore {
    interactions: InteractionIndex,
    catalog: CatalogIndex,
    contraindications: ContraindicationIndex,
}

impl std::fmt::Debug for DrugStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DrugStore")
            .field("interactions", &self.interactions.record_count())
            .field("drug_names", &self.interactions.drug_names().len())
            .field("catalog", &self.catalog.record_count())
            .field("drug_types", &self.catalog.types().len())
            .field("contraindications", &self.contraindications.record_count())
            .field("contraindication_terms", &self.contraindications.terms().len())
            .finish()
    }
}

/// Loads one dataset, degrading a failure to an empty index.
fn load_or_empty<I: DatasetIndex>(path: &Path) -> (I, DatasetStatus) {
    match load_index::<I, _>(path) {
        Ok((index, stats)) => (index, DatasetStatus::Loaded { stats }),
        Err(e) => (
            I::default(),
            DatasetStatus::Failed {
                error: e.to_string(),
            },
        ),
    }
}

impl DrugStore {
    /// Creates a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Assembles a store from already-built indices.
    pub fn from_parts(
        interactions: InteractionIndex,
        catalog: CatalogIndex,
        contraindications: ContraindicationIndex,
    ) -> Self {
        Self {
            interactions,
            catalog,
            contraindications,
        }
    }

    /// Loads the three datasets one after another.
    ///
    /// A dataset that cannot be read is left empty and reported as failed;
    /// the other datasets still load.
    pub fn load_all(files: &DatasetFiles) -> (Self, LoadReport) {
        let (interactions, interactions_status) =
            load_or_empty::<InteractionIndex>(&files.interactions);
        let (catalog, catalog_status) = load_or_empty::<CatalogIndex>(&files.drug_types);
        let (contraindications, contra_status) =
            load_or_empty::<ContraindicationIndex>(&files.contraindications);

        (
            Self::from_parts(interactions, catalog, contraindications),
            LoadReport {
                interactions: interactions_status,
                drug_types: catalog_status,
                contraindications: contra_status,
            },
        )
    }

    /// Loads the three datasets concurrently (each dataset on its own task).
    ///
    /// Returns once all three loads have finished. Failure handling is the
    /// same as [`DrugStore::load_all`].
    #[cfg(feature = "parallel")]
    pub fn load_all_parallel(files: &DatasetFiles) -> (Self, LoadReport) {
        let ((interactions, catalog), contraindications) = rayon::join(
            || {
                rayon::join(
                    || load_or_empty::<InteractionIndex>(&files.interactions),
                    || load_or_empty::<CatalogIndex>(&files.drug_types),
                )
            },
            || load_or_empty::<ContraindicationIndex>(&files.contraindications),
        );

        (
            Self::from_parts(interactions.0, catalog.0, contraindications.0),
            LoadReport {
                interactions: interactions.1,
                drug_types: catalog.1,
                contraindications: contraindications.1,
            },
        )
    }

    /// Returns the interaction index.
    pub fn interactions(&self) -> &InteractionIndex {
        &self.interactions
    }

    /// Returns the type catalog index.
    pub fn catalog(&self) -> &CatalogIndex {
        &self.catalog
    }

    /// Returns the contraindication index.
    pub fn contraindications(&self) -> &ContraindicationIndex {
        &self.contraindications
    }
}

impl DrugQueries for DrugStore {
    fn search_drug_names(&self, term: &str) -> Vec<String> {
        self.interactions.search_drug_names(term)
    }

    fn check_interactions(&self, drugs: &[String]) -> Result<Vec<InteractionMatch>, QueryError> {
        self.interactions.check_interactions(drugs)
    }

    fn filter_options(&self, drug_type: &str) -> FilterOptions {
        self.catalog.filter_options(drug_type)
    }

    fn browse_by_type(&self, query: &BrowseQuery) -> Result<DrugPage, QueryError> {
        self.catalog.browse_by_type(query)
    }

    fn search_contraindications(
        &self,
        contra_term: &str,
        drug_name: &str,
    ) -> Vec<ContraindicationSummary> {
        self.contraindications
            .search_contraindications(contra_term, drug_name)
    }

    fn suggest_contraindication_terms(&self, term: &str) -> Vec<String> {
        self.contraindications.suggest_contraindication_terms(term)
    }

    fn suggest_drugs_by_contraindication(
        &self,
        contra_term: &str,
        drug_term: &str,
    ) -> Vec<String> {
        self.contraindications
            .suggest_drugs_by_contraindication(contra_term, drug_term)
    }
}
