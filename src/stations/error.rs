use polars::error::PolarsError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StationDataError {
    #[error("Failed to read station metadata file '{0}'")]
    MetadataRead(PathBuf, #[source] std::io::Error),

    #[error("Malformed metadata line {line} in '{path}': expected exactly one '='")]
    MalformedMetadataLine { path: PathBuf, line: usize },

    #[error("Metadata file '{path}' has only {lines} line(s); need a site name, three location lines and the column labels")]
    MetadataTooShort { path: PathBuf, lines: usize },

    #[error("I/O error reading station data file '{0}'")]
    CsvReadIo(PathBuf, #[source] std::io::Error),

    #[error("Parsing error reading station data file '{0}'")]
    CsvReadPolars(PathBuf, #[source] PolarsError),

    #[error("Station data file '{path}' has {found} columns but the metadata lists {expected}")]
    ColumnCountMismatch {
        path: PathBuf,
        expected: usize,
        found: usize,
    },

    #[error("Missing time-component column(s) {missing} in '{path}'")]
    MissingTimeFields { path: PathBuf, missing: String },

    #[error("Row {row} of '{path}' does not form a valid calendar timestamp")]
    InvalidTimestamp { path: PathBuf, row: usize },

    #[error("I/O error writing '{0}'")]
    CsvWriteIo(PathBuf, #[source] std::io::Error),

    #[error("Failed processing DataFrame: {0}")]
    DataFrameProcessing(#[from] PolarsError),
}
