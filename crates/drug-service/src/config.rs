//! Service configuration read from environment variables.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;

use drug_loader::{discover_dataset_files, DatasetFiles, DatasetKind};

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_DATA_PATH: &str = ".";

/// Runtime configuration of the drug lookup server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    /// Directory holding the dataset files (`DRUG_DATA_PATH`).
    pub data_path: PathBuf,
    /// Per-dataset file overrides (`DRUG_INTERACTIONS_FILE`,
    /// `DRUG_TYPES_FILE`, `DRUG_CONTRAINDICATIONS_FILE`).
    pub interactions_file: Option<PathBuf>,
    /// Type catalog file override.
    pub drug_types_file: Option<PathBuf>,
    /// Contraindications file override.
    pub contraindications_file: Option<PathBuf>,
    /// Address to listen on (`DRUG_BIND_ADDR`, `PORT`).
    pub listen_addr: SocketAddr,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from(DEFAULT_DATA_PATH),
            interactions_file: None,
            drug_types_file: None,
            contraindications_file: None,
            listen_addr: SocketAddr::new(IpAddr::V4(Ipv4Addr::UNSPECIFIED), DEFAULT_PORT),
        }
    }
}

impl ServiceConfig {
    /// Reads the configuration from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads the configuration through `lookup`; unset or unparsable
    /// values fall back to their defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let path = |key: &str| lookup(key).filter(|v| !v.is_empty()).map(PathBuf::from);

        let ip = lookup("DRUG_BIND_ADDR")
            .and_then(|v| v.parse::<IpAddr>().ok())
            .unwrap_or(defaults.listen_addr.ip());
        let port = lookup("PORT")
            .and_then(|v| v.parse::<u16>().ok())
            .unwrap_or(DEFAULT_PORT);

        Self {
            data_path: path("DRUG_DATA_PATH").unwrap_or(defaults.data_path),
            interactions_file: path("DRUG_INTERACTIONS_FILE"),
            drug_types_file: path("DRUG_TYPES_FILE"),
            contraindications_file: path("DRUG_CONTRAINDICATIONS_FILE"),
            listen_addr: SocketAddr::new(ip, port),
        }
    }

    /// Resolves the three dataset paths.
    ///
    /// Files are discovered in the data directory, then explicit overrides
    /// are applied. A missing data directory is not an error here: the
    /// default paths are kept and each dataset reports its own failure when
    /// loaded.
    pub fn dataset_files(&self) -> DatasetFiles {
        let mut files = discover_dataset_files(&self.data_path)
            .unwrap_or_else(|_| DatasetFiles::in_directory(&self.data_path));

        let overrides = [
            (DatasetKind::Interactions, &self.interactions_file),
            (DatasetKind::DrugTypes, &self.drug_types_file),
            (DatasetKind::Contraindications, &self.contraindications_file),
        ];
        for (kind, path) in overrides {
            if let Some(path) = path {
                *files.path_mut(kind) = path.clone();
            }
        }

        files
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> ServiceConfig {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ServiceConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]);
        assert_eq!(config, ServiceConfig::default());
        assert_eq!(config.listen_addr.port(), 3000);
        assert_eq!(config.data_path, PathBuf::from("."));
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("DRUG_DATA_PATH", "/srv/data"),
            ("DRUG_BIND_ADDR", "127.0.0.1"),
            ("PORT", "8080"),
            ("DRUG_TYPES_FILE", "/tmp/types.csv"),
        ]);

        assert_eq!(config.data_path, PathBuf::from("/srv/data"));
        assert_eq!(config.listen_addr, "127.0.0.1:8080".parse().unwrap());
        assert_eq!(config.drug_types_file, Some(PathBuf::from("/tmp/types.csv")));
        assert_eq!(config.interactions_file, None);
    }

    #[test]
    fn test_invalid_values_fall_back() {
        let config = config_from(&[("PORT", "not-a-port"), ("DRUG_BIND_ADDR", "nowhere")]);
        assert_eq!(config.listen_addr, ServiceConfig::default().listen_addr);
    }

    #[test]
    fn test_dataset_files_with_override() {
        let config = config_from(&[
            ("DRUG_DATA_PATH", "/no/such/dir"),
            ("DRUG_CONTRAINDICATIONS_FILE", "/elsewhere/contra.csv"),
        ]);

        let files = config.dataset_files();
        assert_eq!(files.interactions, PathBuf::from("/no/such/dir/drug-data.csv"));
        assert_eq!(files.contraindications, PathBuf::from("/elsewhere/contra.csv"));
    }
}
