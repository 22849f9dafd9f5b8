/// Data layer: core types and loading.
///
/// Architecture:
/// ```text
///  .xlsx / .csv
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → VehicleDataset
///   └──────────┘
///        │
///        ▼
///   ┌───────────────┐
///   │ VehicleDataset │  raw table + coerced numeric columns
///   └───────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │ analysis  │  pure view computations → AnalysisReport
///   └──────────┘
/// ```
pub mod loader;
pub mod model;

use thiserror::Error;

/// Why an uploaded file could not become a dataset. Any of these aborts
/// the whole session's analysis.
#[derive(Debug, Error)]
pub enum FormatError {
    #[error("unsupported file extension: .{0}")]
    UnsupportedExtension(String),
    #[error("failed to read spreadsheet: {0}")]
    Spreadsheet(#[from] calamine::Error),
    #[error("failed to read CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("file is too large ({size_mb} MB, limit {limit_mb} MB)")]
    TooLarge { size_mb: u64, limit_mb: u64 },
    #[error("file contains no data")]
    Empty,
    #[error("required column '{0}' is missing")]
    MissingColumn(&'static str),
}
