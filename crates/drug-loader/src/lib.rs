//! # drug-loader
//!
//! Loads the three drug datasets (interactions, type catalog,
//! contraindications) from CSV, builds read-only lookup indices, and answers
//! autocomplete, filter and join-style queries against them.
//!
//! ```ignore
//! use drug_loader::{discover_dataset_files, DrugQueries, DrugStore};
//!
//! let files = discover_dataset_files("./data")?;
//! let (store, report) = DrugStore::load_all_parallel(&files);
//! for (kind, error) in report.failures() {
//!     eprintln!("{kind} unavailable: {error}");
//! }
//!
//! let names = store.search_drug_names("war");
//! ```

#![warn(missing_docs)]

mod catalog;
mod contraindication;
mod index;
mod interaction;
mod loader;
mod parser;
mod query;
mod store;
mod types;

pub use index::{CatalogIndex, ContraindicationIndex, DatasetIndex, InteractionIndex};
pub use loader::{discover_dataset_files, load_index};
pub use parser::{DatasetParser, FileParser, Row, TabularRecord};
pub use query::{
    BrowseQuery, DrugQueries, QueryError, MIN_CONTRA_SEARCH_CHARS, MIN_DRUG_NAME_CHARS,
    MIN_SUGGESTION_CHARS, PAGE_SIZE, SUGGESTION_LIMIT,
};
pub use store::DrugStore;
pub use types::{
    DatasetFiles, DatasetKind, DatasetStatus, LoadError, LoadReport, LoadResult, ParseStats,
};

// Re-export drug-types for convenience
pub use drug_types;
