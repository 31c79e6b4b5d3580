//! Loader-specific types: errors, dataset descriptors, and load reporting.

use std::fmt;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Errors that can occur while loading a dataset.
#[derive(Error, Debug)]
pub enum LoadError {
    /// I/O error reading a dataset file.
    #[error("IO error reading dataset: {0}")]
    Io(#[from] std::io::Error),

    /// CSV parsing error.
    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    /// File not found.
    #[error("File not found: {path}")]
    FileNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Directory not found.
    #[error("Directory not found: {path}")]
    DirectoryNotFound {
        /// The path that was not found.
        path: String,
    },
}

/// Result type for loader operations.
pub type LoadResult<T> = Result<T, LoadError>;

/// The three datasets the service is built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DatasetKind {
    /// Pairwise drug interactions.
    Interactions,
    /// Drug type catalog (type, brand, generic, manufacturer).
    DrugTypes,
    /// Contraindication records.
    Contraindications,
}

impl DatasetKind {
    /// All dataset kinds, in load order.
    pub const ALL: [DatasetKind; 3] = [
        DatasetKind::Interactions,
        DatasetKind::DrugTypes,
        DatasetKind::Contraindications,
    ];

    /// Default file name of this dataset inside a data directory.
    pub fn default_file_name(self) -> &'static str {
        match self {
            DatasetKind::Interactions => "drug-data.csv",
            DatasetKind::DrugTypes => "Drugs-Type.csv",
            DatasetKind::Contraindications => "drug-contraindication.csv",
        }
    }

    /// Short label used in logs and reports.
    pub fn label(self) -> &'static str {
        match self {
            DatasetKind::Interactions => "interactions",
            DatasetKind::DrugTypes => "drug types",
            DatasetKind::Contraindications => "contraindications",
        }
    }
}

impl fmt::Display for DatasetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Paths of the three dataset files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetFiles {
    /// Interactions CSV (`Drug 1`, `Drug 2`, `Interaction Description`).
    pub interactions: PathBuf,
    /// Type catalog CSV (`Type`, `Brand-Name`, `GenericName`, `Manufacturer`).
    pub drug_types: PathBuf,
    /// Contraindications CSV.
    pub contraindications: PathBuf,
}

impl DatasetFiles {
    /// Uses the default file names inside `dir`.
    pub fn in_directory<P: AsRef<Path>>(dir: P) -> Self {
        let dir = dir.as_ref();
        Self {
            interactions: dir.join(DatasetKind::Interactions.default_file_name()),
            drug_types: dir.join(DatasetKind::DrugTypes.default_file_name()),
            contraindications: dir.join(DatasetKind::Contraindications.default_file_name()),
        }
    }

    /// Returns the path for one dataset.
    pub fn path(&self, kind: DatasetKind) -> &Path {
        match kind {
            DatasetKind::Interactions => &self.interactions,
            DatasetKind::DrugTypes => &self.drug_types,
            DatasetKind::Contraindications => &self.contraindications,
        }
    }

    /// Returns a mutable reference to the path for one dataset.
    pub fn path_mut(&mut self, kind: DatasetKind) -> &mut PathBuf {
        match kind {
            DatasetKind::Interactions => &mut self.interactions,
            DatasetKind::DrugTypes => &mut self.drug_types,
            DatasetKind::Contraindications => &mut self.contraindications,
        }
    }

    /// Returns the datasets whose file does not exist.
    pub fn missing_files(&self) -> Vec<DatasetKind> {
        DatasetKind::ALL
            .into_iter()
            .filter(|kind| !self.path(*kind).exists())
            .collect()
    }
}

/// Statistics from parsing one dataset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseStats {
    /// Data rows read from the file (header excluded).
    pub total_rows: usize,
    /// Rows turned into records.
    pub loaded_rows: usize,
    /// Rows skipped (blank, or missing a required field).
    pub skipped_rows: usize,
    /// Rows the CSV reader could not decode.
    pub error_count: usize,
    /// Time taken to parse in milliseconds.
    pub parse_time_ms: u64,
}

/// Load state of a single dataset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum DatasetStatus {
    /// Load has not finished yet.
    #[default]
    Pending,
    /// Load finished and the index was built.
    Loaded {
        /// Parse statistics.
        stats: ParseStats,
    },
    /// Load failed; the dataset is served as empty.
    Failed {
        /// Rendered load error.
        error: String,
    },
}

impl DatasetStatus {
    /// Returns true once the load has finished, successfully or not.
    pub fn is_finished(&self) -> bool {
        !matches!(self, DatasetStatus::Pending)
    }

    /// Short state name: `pending`, `loaded` or `failed`.
    pub fn state(&self) -> &'static str {
        match self {
            DatasetStatus::Pending => "pending",
            DatasetStatus::Loaded { .. } => "loaded",
            DatasetStatus::Failed { .. } => "failed",
        }
    }
}

/// Outcome of loading all three datasets.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    /// Interactions dataset status.
    pub interactions: DatasetStatus,
    /// Type catalog status.
    pub drug_types: DatasetStatus,
    /// Contraindications status.
    pub contraindications: DatasetStatus,
}

impl LoadReport {
    /// Returns the status of one dataset.
    pub fn status(&self, kind: DatasetKind) -> &DatasetStatus {
        match kind {
            DatasetKind::Interactions => &self.interactions,
            DatasetKind::DrugTypes => &self.drug_types,
            DatasetKind::Contraindications => &self.contraindications,
        }
    }

    /// Returns a mutable reference to the status of one dataset.
    pub fn status_mut(&mut self, kind: DatasetKind) -> &mut DatasetStatus {
        match kind {
            DatasetKind::Interactions => &mut self.interactions,
            DatasetKind::DrugTypes => &mut self.drug_types,
            DatasetKind::Contraindications => &mut self.contraindications,
        }
    }

    /// Returns true once every dataset has finished loading.
    pub fn is_complete(&self) -> bool {
        DatasetKind::ALL
            .into_iter()
            .all(|kind| self.status(kind).is_finished())
    }

    /// Returns the datasets that failed to load with their errors.
    pub fn failures(&self) -> Vec<(DatasetKind, &str)> {
        DatasetKind::ALL
            .into_iter()
            .filter_map(|kind| match self.status(kind) {
                DatasetStatus::Failed { error } => Some((kind, error.as_str())),
                _ => None,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dataset_files_in_directory() {
        let files = DatasetFiles::in_directory("/data");
        assert_eq!(files.interactions, PathBuf::from("/data/drug-data.csv"));
        assert_eq!(files.drug_types, PathBuf::from("/data/Drugs-Type.csv"));
        assert_eq!(
            files.contraindications,
            PathBuf::from("/data/drug-contraindication.csv")
        );
    }

    #[test]
    fn test_dataset_files_missing() {
        let files = DatasetFiles::in_directory("/definitely/not/here");
        assert_eq!(files.missing_files(), DatasetKind::ALL.to_vec());
    }

    #[test]
    fn test_dataset_status_state() {
        assert_eq!(DatasetStatus::Pending.state(), "pending");
        assert!(!DatasetStatus::Pending.is_finished());

        let failed = DatasetStatus::Failed {
            error: "boom".to_string(),
        };
        assert_eq!(failed.state(), "failed");
        assert!(failed.is_finished());
    }

    #[test]
    fn test_load_report_completion() {
        let mut report = LoadReport::default();
        assert!(!report.is_complete());

        report.interactions = DatasetStatus::Loaded {
            stats: ParseStats::default(),
        };
        report.drug_types = DatasetStatus::Loaded {
            stats: ParseStats::default(),
        };
        assert!(!report.is_complete());

        *report.status_mut(DatasetKind::Contraindications) = DatasetStatus::Failed {
            error: "File not found: x.csv".to_string(),
        };
        assert!(report.is_complete());
        assert_eq!(
            report.failures(),
            vec![(DatasetKind::Contraindications, "File not found: x.csv")]
        );
    }
}
