//! Shared server state.
//!
//! Each dataset lives in a write-once slot filled by its loader task. Until
//! a slot is filled, queries see an empty index, so requests arriving before
//! startup completes are answered from whatever has loaded so far. Slots are
//! never written again, so reads take no locks.

use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, OnceLock};

use drug_loader::{
    load_index, BrowseQuery, CatalogIndex, ContraindicationIndex, DatasetFiles, DatasetIndex,
    DatasetKind, DatasetStatus, DrugQueries, InteractionIndex, LoadReport, LoadResult,
    ParseStats, QueryError,
};
use drug_types::{ContraindicationSummary, DrugPage, FilterOptions, InteractionMatch};
use tokio::task::JoinHandle;

/// A write-once holder for one dataset's index and load status.
///
/// Index and status are published together, so readers never see one
/// without the other.
pub(crate) struct LoadSlot<I> {
    outcome: OnceLock<(Option<I>, DatasetStatus)>,
    empty: I,
}

impl<I: Default> Default for LoadSlot<I> {
    fn default() -> Self {
        Self {
            outcome: OnceLock::new(),
            empty: I::default(),
        }
    }
}

impl<I: DatasetIndex> LoadSlot<I> {
    /// Returns the loaded index, or an empty one if not loaded.
    pub(crate) fn current(&self) -> &I {
        self.outcome
            .get()
            .and_then(|(index, _)| index.as_ref())
            .unwrap_or(&self.empty)
    }

    /// Returns the load status.
    pub(crate) fn status(&self) -> DatasetStatus {
        self.outcome
            .get()
            .map(|(_, status)| status.clone())
            .unwrap_or_default()
    }
}

#[derive(Default)]
pub(crate) struct ServerState {
    interactions: LoadSlot<InteractionIndex>,
    catalog: LoadSlot<CatalogIndex>,
    contraindications: LoadSlot<ContraindicationIndex>,
    /// Number of datasets whose load has finished, successfully or not.
    finished: AtomicUsize,
}

/// Index types the server holds a slot for.
pub(crate) trait ServedIndex: DatasetIndex {
    fn slot(state: &ServerState) -> &LoadSlot<Self>;

    /// One-line description of the derived structures, for the load log.
    fn describe(&self) -> String;
}

impl ServedIndex for InteractionIndex {
    fn slot(state: &ServerState) -> &LoadSlot<Self> {
        &state.interactions
    }

    fn describe(&self) -> String {
        format!("{} unique drug names", self.drug_names().len())
    }
}

impl ServedIndex for CatalogIndex {
    fn slot(state: &ServerState) -> &LoadSlot<Self> {
        &state.catalog
    }

    fn describe(&self) -> String {
        format!("filter data for {} types", self.types().len())
    }
}

impl ServedIndex for ContraindicationIndex {
    fn slot(state: &ServerState) -> &LoadSlot<Self> {
        &state.contraindications
    }

    fn describe(&self) -> String {
        format!("{} unique contraindication terms", self.terms().len())
    }
}

/// Drug lookup server state, cheap to clone and shared by all handlers.
#[derive(Clone, Default)]
pub struct DrugServer {
    state: Arc<ServerState>,
}

impl std::fmt::Debug for DrugServer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DrugServer")
            .field("ready", &self.is_ready())
            .field("load_report", &self.load_report())
            .finish()
    }
}

impl DrugServer {
    /// Creates a server with no data loaded.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true once all three dataset loads have finished.
    pub fn is_ready(&self) -> bool {
        self.state.finished.load(Ordering::Acquire) >= DatasetKind::ALL.len()
    }

    /// Returns the per-dataset load status.
    pub fn load_report(&self) -> LoadReport {
        LoadReport {
            interactions: self.state.interactions.status(),
            drug_types: self.state.catalog.status(),
            contraindications: self.state.contraindications.status(),
        }
    }

    /// Returns the number of records currently served for a dataset.
    pub fn record_count(&self, kind: DatasetKind) -> usize {
        match kind {
            DatasetKind::Interactions => self.state.interactions.current().record_count(),
            DatasetKind::DrugTypes => self.state.catalog.current().record_count(),
            DatasetKind::Contraindications => {
                self.state.contraindications.current().record_count()
            }
        }
    }

    /// Starts loading all three datasets, each on its own blocking task.
    ///
    /// Returns immediately; the server answers queries while loads run.
    /// Await the handles to wait for readiness.
    pub fn spawn_loaders(&self, files: &DatasetFiles) -> Vec<JoinHandle<()>> {
        vec![
            self.spawn_loader::<InteractionIndex>(files.interactions.clone()),
            self.spawn_loader::<CatalogIndex>(files.drug_types.clone()),
            self.spawn_loader::<ContraindicationIndex>(files.contraindications.clone()),
        ]
    }

    fn spawn_loader<I: ServedIndex>(&self, path: PathBuf) -> JoinHandle<()> {
        let server = self.clone();
        tokio::task::spawn_blocking(move || {
            tracing::info!("Loading {} from {}", I::KIND, path.display());
            let result = load_index::<I, _>(&path);
            server.finish_load(result);
        })
    }

    /// Records the outcome of one dataset load.
    ///
    /// The first outcome per dataset wins; later ones are ignored.
    pub(crate) fn finish_load<I: ServedIndex>(&self, result: LoadResult<(I, ParseStats)>) {
        let slot = I::slot(&self.state);

        let outcome = match result {
            Ok((index, stats)) => {
                tracing::info!(
                    "{} successfully loaded. {} records found ({} skipped) in {} ms, {}",
                    I::KIND,
                    index.record_count(),
                    stats.skipped_rows,
                    stats.parse_time_ms,
                    index.describe()
                );
                if stats.error_count > 0 {
                    tracing::warn!(
                        "{}: {} unreadable rows were dropped",
                        I::KIND,
                        stats.error_count
                    );
                }
                (Some(index), DatasetStatus::Loaded { stats })
            }
            Err(e) => {
                tracing::warn!("Could not load {}: {}", I::KIND, e);
                let status = DatasetStatus::Failed {
                    error: e.to_string(),
                };
                (None, status)
            }
        };

        if slot.outcome.set(outcome).is_err() {
            tracing::warn!("{} already finished loading, ignoring second outcome", I::KIND);
            return;
        }

        let finished = self.state.finished.fetch_add(1, Ordering::AcqRel) + 1;
        if finished == DatasetKind::ALL.len() {
            let failures = self.load_report().failures().len();
            if failures == 0 {
                tracing::info!("All datasets loaded. Server is ready");
            } else {
                tracing::warn!(
                    "All dataset loads finished, {} of {} unavailable. Server is partially ready",
                    failures,
                    DatasetKind::ALL.len()
                );
            }
        }
    }
}

impl DrugQueries for DrugServer {
    fn search_drug_names(&self, term: &str) -> Vec<String> {
        self.state.interactions.current().search_drug_names(term)
    }

    fn check_interactions(&self, drugs: &[String]) -> Result<Vec<InteractionMatch>, QueryError> {
        self.state.interactions.current().check_interactions(drugs)
    }

    fn filter_options(&self, drug_type: &str) -> FilterOptions {
        self.state.catalog.current().filter_options(drug_type)
    }

    fn browse_by_type(&self, query: &BrowseQuery) -> Result<DrugPage, QueryError> {
        self.state.catalog.current().browse_by_type(query)
    }

    fn search_contraindications(
        &self,
        contra_term: &str,
        drug_name: &str,
    ) -> Vec<ContraindicationSummary> {
        self.state
            .contraindications
            .current()
            .search_contraindications(contra_term, drug_name)
    }

    fn suggest_contraindication_terms(&self, term: &str) -> Vec<String> {
        self.state
            .contraindications
            .current()
            .suggest_contraindication_terms(term)
    }

    fn suggest_drugs_by_contraindication(
        &self,
        contra_term: &str,
        drug_term: &str,
    ) -> Vec<String> {
        self.state
            .contraindications
            .current()
            .suggest_drugs_by_contraindication(contra_term, drug_term)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use drug_loader::LoadError;
    use drug_types::InteractionRecord;

    fn interactions() -> InteractionIndex {
        InteractionIndex::build(vec![InteractionRecord::new(
            "Warfarin",
            "Aspirin",
            "Increased bleeding risk",
        )])
    }

    fn missing(path: &str) -> LoadError {
        LoadError::FileNotFound {
            path: path.to_string(),
        }
    }

    #[test]
    fn test_new_server_is_empty_and_pending() {
        let server = DrugServer::new();

        assert!(!server.is_ready());
        assert_eq!(server.load_report(), LoadReport::default());
        assert!(server.search_drug_names("war").is_empty());
        assert!(server.filter_options("analgesic").is_empty());
    }

    #[test]
    fn test_partial_load_serves_loaded_dataset() {
        let server = DrugServer::new();
        server.finish_load(Ok((interactions(), ParseStats::default())));

        assert!(!server.is_ready());
        assert_eq!(server.search_drug_names("war"), vec!["warfarin"]);
        assert_eq!(server.record_count(DatasetKind::Interactions), 1);
        assert_eq!(server.load_report().drug_types, DatasetStatus::Pending);
    }

    #[test]
    fn test_ready_after_all_loads_finish() {
        let server = DrugServer::new();
        server.finish_load(Ok((interactions(), ParseStats::default())));
        server.finish_load::<CatalogIndex>(Err(missing("Drugs-Type.csv")));
        assert!(!server.is_ready());
        server.finish_load(Ok((ContraindicationIndex::default(), ParseStats::default())));

        assert!(server.is_ready());
        let report = server.load_report();
        assert!(report.is_complete());
        assert_eq!(report.failures().len(), 1);
        assert_eq!(report.drug_types.state(), "failed");
    }

    #[test]
    fn test_second_outcome_is_ignored() {
        let server = DrugServer::new();
        server.finish_load(Ok((interactions(), ParseStats::default())));
        server.finish_load::<InteractionIndex>(Err(missing("drug-data.csv")));
        server.finish_load(Ok((InteractionIndex::default(), ParseStats::default())));

        assert_eq!(server.state.finished.load(Ordering::Acquire), 1);
        assert_eq!(server.load_report().interactions.state(), "loaded");
        assert_eq!(server.record_count(DatasetKind::Interactions), 1);
    }

    #[test]
    fn test_status_and_index_published_together() {
        let server = DrugServer::new();
        let slot = InteractionIndex::slot(&server.state);
        assert_eq!(slot.status(), DatasetStatus::Pending);
        assert_eq!(slot.current().record_count(), 0);

        server.finish_load(Ok((interactions(), ParseStats::default())));
        assert_eq!(slot.status().state(), "loaded");
        assert_eq!(slot.current().record_count(), 1);

        let failed = CatalogIndex::slot(&server.state);
        server.finish_load::<CatalogIndex>(Err(missing("Drugs-Type.csv")));
        assert_eq!(failed.status().state(), "failed");
        assert_eq!(failed.current().record_count(), 0);
    }

    #[tokio::test]
    async fn test_spawn_loaders_from_fixtures() {
        let dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .join("../drug-loader/tests/fixtures/partial");
        let server = DrugServer::new();

        for handle in server.spawn_loaders(&DatasetFiles::in_directory(&dir)) {
            handle.await.unwrap();
        }

        assert!(server.is_ready());
        assert_eq!(server.load_report().interactions.state(), "loaded");
        assert_eq!(server.load_report().contraindications.state(), "failed");
        assert_eq!(server.search_drug_names("asp"), vec!["aspirin"]);
    }
}
