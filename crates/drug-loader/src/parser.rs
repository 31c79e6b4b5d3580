//! Generic dataset parser.
//!
//! Provides a streaming parser for the comma-delimited dataset files.
//! Columns are resolved by header name, so column order does not matter
//! and a column missing from the header reads as empty. Bytes that are not
//! valid UTF-8 are decoded lossily, so such rows are kept rather than dropped.

use std::fs::File;
use std::io::{BufReader, Read};
use std::marker::PhantomData;
use std::path::Path;
use std::time::Instant;

use csv::{ByteRecord, Reader, ReaderBuilder, StringRecord};

use crate::types::{LoadError, LoadResult, ParseStats};

/// Trait for types that can be parsed from a dataset row.
///
/// Implement this trait for custom dataset record types.
pub trait TabularRecord: Sized {
    /// Header names this record reads, case-sensitive.
    const COLUMNS: &'static [&'static str];

    /// Builds a record from a row, or `None` to skip the row.
    fn from_row(row: &Row<'_>) -> Option<Self>;
}

/// A single data row with its fields addressable by column name.
pub struct Row<'a> {
    record: &'a StringRecord,
    columns: &'static [&'static str],
    positions: &'a [Option<usize>],
}

impl<'a> Row<'a> {
    /// Returns the field under `column`, or `""` if the column is absent
    /// from the header, the row is short, or `column` is not one of the
    /// record's declared columns.
    pub fn get(&self, column: &str) -> &'a str {
        self.columns
            .iter()
            .position(|c| *c == column)
            .and_then(|i| self.positions[i])
            .and_then(|pos| self.record.get(pos))
            .unwrap_or("")
    }
}

/// A streaming parser for dataset files.
///
/// Reads the file record-by-record; blank rows are skipped and rows the
/// record type rejects are counted as skipped.
pub struct DatasetParser<R: Read, T: TabularRecord> {
    reader: Reader<R>,
    positions: Vec<Option<usize>>,
    stats: ParseStats,
    _marker: PhantomData<T>,
}

/// A parser reading from a buffered file.
pub type FileParser<T> = DatasetParser<BufReader<File>, T>;

impl<T: TabularRecord> FileParser<T> {
    /// Creates a new parser from a file path.
    ///
    /// # Errors
    /// Returns an error if the file does not exist, cannot be opened, or
    /// its header row cannot be read.
    pub fn from_path<P: AsRef<Path>>(path: P) -> LoadResult<Self> {
        let path = path.as_ref();

        if !path.is_file() {
            return Err(LoadError::FileNotFound {
                path: path.display().to_string(),
            });
        }

        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }
}

impl<R: Read, T: TabularRecord> DatasetParser<R, T> {
    /// Creates a new parser from a reader.
    pub fn from_reader(reader: R) -> LoadResult<Self> {
        let mut csv_reader = ReaderBuilder::new()
            .delimiter(b',')
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::None)
            .from_reader(reader);

        let positions = Self::resolve_columns(&mut csv_reader)?;

        Ok(Self {
            reader: csv_reader,
            positions,
            stats: ParseStats::default(),
            _marker: PhantomData,
        })
    }

    /// Maps each declared column to its position in the header.
    fn resolve_columns(reader: &mut Reader<R>) -> LoadResult<Vec<Option<usize>>> {
        let headers = StringRecord::from_byte_record_lossy(reader.byte_headers()?.clone());

        Ok(T::COLUMNS
            .iter()
            .map(|column| {
                headers.iter().position(|found| {
                    // Handle UTF-8 BOM at start of file
                    found.trim_start_matches('\u{feff}').trim() == *column
                })
            })
            .collect())
    }

    /// Returns the declared columns that are missing from the header.
    pub fn missing_columns(&self) -> Vec<&'static str> {
        T::COLUMNS
            .iter()
            .zip(&self.positions)
            .filter(|(_, pos)| pos.is_none())
            .map(|(column, _)| *column)
            .collect()
    }

    /// Returns the statistics accumulated so far.
    pub fn stats(&self) -> &ParseStats {
        &self.stats
    }

    /// Parses all rows into a Vec in source order.
    ///
    /// Rows the CSV reader cannot decode are counted in
    /// [`ParseStats::error_count`] and skipped.
    pub fn parse_all(mut self) -> (Vec<T>, ParseStats) {
        let start = Instant::now();
        let mut results = Vec::new();
        let mut errors = 0;

        for record in self.by_ref() {
            match record {
                Ok(record) => results.push(record),
                Err(_) => errors += 1,
            }
        }

        self.stats.error_count += errors;
        self.stats.parse_time_ms = start.elapsed().as_millis() as u64;
        (results, self.stats)
    }
}

impl<R: Read, T: TabularRecord> Iterator for DatasetParser<R, T> {
    type Item = LoadResult<T>;

    fn next(&mut self) -> Option<Self::Item> {
        let mut raw = ByteRecord::new();
        loop {
            match self.reader.read_byte_record(&mut raw) {
                Ok(true) => {
                    self.stats.total_rows += 1;
                    let record = StringRecord::from_byte_record_lossy(std::mem::take(&mut raw));

                    // Skip empty records
                    if record.iter().all(|f| f.trim().is_empty()) {
                        self.stats.skipped_rows += 1;
                        continue;
                    }

                    let row = Row {
                        record: &record,
                        columns: T::COLUMNS,
                        positions: &self.positions,
                    };

                    match T::from_row(&row) {
                        Some(parsed) => {
                            self.stats.loaded_rows += 1;
                            return Some(Ok(parsed));
                        }
                        None => {
                            self.stats.skipped_rows += 1;
                            continue;
                        }
                    }
                }
                Ok(false) => return None, // End of file
                Err(e) => {
                    self.stats.total_rows += 1;
                    return Some(Err(e.into()));
                }
            }
        }
    }
}
