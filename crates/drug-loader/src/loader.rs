//! Dataset file discovery and loading utilities.

use std::fs;
use std::path::Path;

use crate::index::DatasetIndex;
use crate::parser::FileParser;
use crate::types::{DatasetFiles, DatasetKind, LoadError, LoadResult, ParseStats};

/// Discovers the dataset files in a data directory.
///
/// Each dataset's default file name is matched case-insensitively against
/// the directory entries, so `drugs-type.csv` is found for `Drugs-Type.csv`.
/// A dataset with no matching entry keeps its default path; loading it
/// later reports the missing file for that dataset only.
pub fn discover_dataset_files<P: AsRef<Path>>(path: P) -> LoadResult<DatasetFiles> {
    let path = path.as_ref();

    if !path.is_dir() {
        return Err(LoadError::DirectoryNotFound {
            path: path.display().to_string(),
        });
    }

    let mut files = DatasetFiles::in_directory(path);

    for entry in fs::read_dir(path)? {
        let entry = entry?;
        let filename = entry.file_name();
        let filename_str = filename.to_string_lossy();

        if let Some(kind) = DatasetKind::ALL
            .into_iter()
            .find(|kind| filename_str.eq_ignore_ascii_case(kind.default_file_name()))
        {
            // An exact-case match always wins over a case-insensitive one
            if !files.path(kind).exists() || filename_str == kind.default_file_name() {
                *files.path_mut(kind) = entry.path();
            }
        }
    }

    Ok(files)
}

/// Loads one dataset file and builds its index.
///
/// # Errors
/// Returns an error if the file is missing, cannot be opened, or its header
/// cannot be read. Undecodable rows are skipped and counted instead.
pub fn load_index<I: DatasetIndex, P: AsRef<Path>>(path: P) -> LoadResult<(I, ParseStats)> {
    let parser = FileParser::<I::Record>::from_path(path)?;
    let (records, stats) = parser.parse_all();
    Ok((I::build(records), stats))
}
