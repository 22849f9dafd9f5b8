use std::path::Path;

use calamine::{open_workbook_auto, Data, Reader};

use super::model::{CellValue, VehicleDataset};
use super::FormatError;

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Uploads past this size are rejected outright instead of being parsed.
const MAX_FILE_BYTES: u64 = 256 * 1024 * 1024;

/// Load an EV dataset from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.xlsx` / `.xlsm` / `.xls` – Excel workbook, first worksheet,
///   header in the first row (the upload format of record)
/// * `.csv` – plain-text spreadsheet with a header row
pub fn load_file(path: &Path) -> Result<VehicleDataset, FormatError> {
    if let Ok(meta) = std::fs::metadata(path) {
        if meta.len() > MAX_FILE_BYTES {
            return Err(FormatError::TooLarge {
                size_mb: meta.len() >> 20,
                limit_mb: MAX_FILE_BYTES >> 20,
            });
        }
    }

    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "xlsx" | "xlsm" | "xls" => load_excel(path),
        "csv" => load_csv(path),
        other => Err(FormatError::UnsupportedExtension(other.to_string())),
    }
}

// ---------------------------------------------------------------------------
// Excel loader
// ---------------------------------------------------------------------------

fn load_excel(path: &Path) -> Result<VehicleDataset, FormatError> {
    let mut workbook = open_workbook_auto(path)?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or(FormatError::Empty)??;

    let mut rows = range.rows();
    let header = rows.next().ok_or(FormatError::Empty)?;
    let columns: Vec<String> = header.iter().map(|c| c.to_string().trim().to_string()).collect();

    let table: Vec<Vec<CellValue>> = rows
        .map(|row| row.iter().map(excel_cell).collect())
        .collect();

    VehicleDataset::from_table(columns, table)
}

fn excel_cell(cell: &Data) -> CellValue {
    match cell {
        Data::Empty => CellValue::Empty,
        Data::String(s) if s.trim().is_empty() => CellValue::Empty,
        Data::String(s) => CellValue::Text(s.clone()),
        Data::Float(v) => CellValue::Number(*v),
        Data::Int(i) => CellValue::Number(*i as f64),
        Data::Bool(b) => CellValue::Bool(*b),
        // Serial date; the raw number is all the numeric coercion needs.
        Data::DateTime(dt) => CellValue::Number(dt.as_f64()),
        Data::DateTimeIso(s) | Data::DurationIso(s) => CellValue::Text(s.clone()),
        Data::Error(_) => CellValue::Empty,
    }
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// CSV layout: header row with column names, one vehicle per record.
/// Records shorter than the header are padded with missing cells.
fn load_csv(path: &Path) -> Result<VehicleDataset, FormatError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_path(path)?;

    let columns: Vec<String> = reader
        .headers()?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    let mut table = Vec::new();
    for result in reader.records() {
        let record = result?;
        let mut row: Vec<CellValue> = record.iter().map(CellValue::from_text).collect();
        row.resize(columns.len(), CellValue::Empty);
        table.push(row);
    }

    VehicleDataset::from_table(columns, table)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::Builder;

    use super::*;
    use crate::data::model::{CategoryColumn, NumericColumn};

    fn write_csv(content: &str) -> tempfile::NamedTempFile {
        let mut file = Builder::new()
            .suffix(".csv")
            .tempfile()
            .expect("create temp file");
        file.write_all(content.as_bytes()).expect("write csv");
        file
    }

    const HEADER: &str = "Make,Electric Vehicle Type,Electric Range,Base MSRP,Model Year,Clean Alternative Fuel Vehicle (CAFV) Eligibility";

    #[test]
    fn csv_round_trip_preserves_shape() {
        let file = write_csv(&format!(
            "{HEADER}\n\
             Tesla,Battery Electric Vehicle (BEV),250,69900,2020,Eligible\n\
             Tesla,Battery Electric Vehicle (BEV),260,79900,2021,Eligible\n\
             Nissan,Battery Electric Vehicle (BEV),150,0,2019,Eligible\n"
        ));

        let ds = load_file(file.path()).expect("load csv");
        assert_eq!(ds.n_rows(), 3);
        assert_eq!(ds.n_cols(), 6);

        let ranges: Vec<Option<f64>> = ds.numbers(NumericColumn::ElectricRange).collect();
        assert_eq!(ranges, vec![Some(250.0), Some(260.0), Some(150.0)]);
    }

    #[test]
    fn dirty_numeric_cells_become_missing() {
        let file = write_csv(&format!(
            "{HEADER}\n\
             Tesla,Battery Electric Vehicle (BEV),N/A,,2020,Eligible\n\
             Kia,Plug-in Hybrid Electric Vehicle (PHEV),32,unknown,not a year,Not eligible\n"
        ));

        let ds = load_file(file.path()).expect("load csv");
        assert_eq!(ds.missing_count(NumericColumn::ElectricRange), 1);
        assert_eq!(ds.missing_count(NumericColumn::BaseMsrp), 2);
        assert_eq!(ds.missing_count(NumericColumn::ModelYear), 1);
    }

    #[test]
    fn ragged_records_are_padded() {
        let file = write_csv(&format!(
            "{HEADER}\n\
             Tesla,Battery Electric Vehicle (BEV),250\n"
        ));

        let ds = load_file(file.path()).expect("load csv");
        assert_eq!(ds.n_cols(), 6);
        assert_eq!(ds.rows[0].len(), 6);
        assert_eq!(ds.labels(CategoryColumn::CafvEligibility).next(), Some(None));
    }

    #[test]
    fn missing_required_column_fails() {
        let file = write_csv("Make,Model Year\nTesla,2020\n");
        match load_file(file.path()) {
            Err(FormatError::MissingColumn(_)) => {}
            other => panic!("expected MissingColumn, got {other:?}"),
        }
    }

    #[test]
    fn unknown_extension_is_rejected() {
        match load_file(Path::new("vehicles.pdf")) {
            Err(FormatError::UnsupportedExtension(ext)) => assert_eq!(ext, "pdf"),
            other => panic!("expected UnsupportedExtension, got {other:?}"),
        }
    }
}
