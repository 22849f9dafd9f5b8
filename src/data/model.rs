use std::fmt;

use super::FormatError;

// ---------------------------------------------------------------------------
// Column names and category labels
// ---------------------------------------------------------------------------

pub const COL_MAKE: &str = "Make";
pub const COL_VEHICLE_TYPE: &str = "Electric Vehicle Type";
pub const COL_ELECTRIC_RANGE: &str = "Electric Range";
pub const COL_BASE_MSRP: &str = "Base MSRP";
pub const COL_MODEL_YEAR: &str = "Model Year";
pub const COL_CAFV: &str = "Clean Alternative Fuel Vehicle (CAFV) Eligibility";

pub const BEV_LABEL: &str = "Battery Electric Vehicle (BEV)";
pub const PHEV_LABEL: &str = "Plug-in Hybrid Electric Vehicle (PHEV)";

/// The three columns that are coerced to numbers at ingestion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumericColumn {
    ElectricRange,
    BaseMsrp,
    ModelYear,
}

impl NumericColumn {
    pub const ALL: [NumericColumn; 3] = [
        NumericColumn::ElectricRange,
        NumericColumn::BaseMsrp,
        NumericColumn::ModelYear,
    ];

    pub fn name(self) -> &'static str {
        match self {
            NumericColumn::ElectricRange => COL_ELECTRIC_RANGE,
            NumericColumn::BaseMsrp => COL_BASE_MSRP,
            NumericColumn::ModelYear => COL_MODEL_YEAR,
        }
    }
}

/// The categorical columns the views group or count by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryColumn {
    Make,
    VehicleType,
    CafvEligibility,
}

impl CategoryColumn {
    pub fn name(self) -> &'static str {
        match self {
            CategoryColumn::Make => COL_MAKE,
            CategoryColumn::VehicleType => COL_VEHICLE_TYPE,
            CategoryColumn::CafvEligibility => COL_CAFV,
        }
    }
}

// ---------------------------------------------------------------------------
// CellValue – a single cell of the source table
// ---------------------------------------------------------------------------

/// A dynamically-typed table cell. `Empty` is the missing marker: every
/// aggregation excludes it rather than treating it as zero.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Text(String),
    Number(f64),
    Bool(bool),
    Empty,
}

impl CellValue {
    /// Guess the type of a raw text cell (CSV input).
    pub fn from_text(s: &str) -> CellValue {
        let s = s.trim();
        if s.is_empty() {
            return CellValue::Empty;
        }
        if let Ok(v) = s.parse::<f64>() {
            if v.is_finite() {
                return CellValue::Number(v);
            }
        }
        if s == "true" || s == "false" {
            return CellValue::Bool(s == "true");
        }
        CellValue::Text(s.to_string())
    }

    /// The value as a number, if it is one.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Number(v) => Some(*v),
            _ => None,
        }
    }

    /// Lenient numeric coercion: anything not representable as a finite
    /// number becomes `Empty`, never an error.
    pub fn coerce_numeric(self) -> CellValue {
        match self {
            CellValue::Number(v) if v.is_finite() => CellValue::Number(v),
            CellValue::Text(s) => match s.trim().parse::<f64>() {
                Ok(v) if v.is_finite() => CellValue::Number(v),
                _ => CellValue::Empty,
            },
            CellValue::Bool(b) => CellValue::Number(if b { 1.0 } else { 0.0 }),
            _ => CellValue::Empty,
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Text(s) => write!(f, "{s}"),
            // Integral values print without a fractional part so model
            // years read as "2021", not "2021.0".
            CellValue::Number(v) if v.fract() == 0.0 && v.abs() < 1e15 => {
                write!(f, "{}", *v as i64)
            }
            CellValue::Number(v) => write!(f, "{v}"),
            CellValue::Bool(b) => write!(f, "{b}"),
            CellValue::Empty => Ok(()),
        }
    }
}

// ---------------------------------------------------------------------------
// VehicleDataset – the complete loaded table
// ---------------------------------------------------------------------------

/// The full parsed table with resolved indices for the six analysis
/// columns. Immutable after construction: every view is a pure function
/// of it.
#[derive(Debug, Clone)]
pub struct VehicleDataset {
    /// All source column names, in file order.
    pub columns: Vec<String>,
    /// All rows, rectangular (short rows padded with `Empty`).
    pub rows: Vec<Vec<CellValue>>,
    /// Indices of [`NumericColumn::ALL`], in that order.
    numeric_idx: [usize; 3],
    /// Indices of Make, Vehicle Type, CAFV Eligibility, in that order.
    category_idx: [usize; 3],
}

impl VehicleDataset {
    /// Build the dataset from a raw header + rows table.
    ///
    /// Verifies the six required columns are present by exact name, pads
    /// ragged rows, and coerces the three numeric columns cell-by-cell.
    pub fn from_table(
        columns: Vec<String>,
        mut rows: Vec<Vec<CellValue>>,
    ) -> Result<Self, FormatError> {
        let find = |name: &'static str| {
            columns
                .iter()
                .position(|c| c == name)
                .ok_or(FormatError::MissingColumn(name))
        };

        let category_idx = [find(COL_MAKE)?, find(COL_VEHICLE_TYPE)?, find(COL_CAFV)?];
        let numeric_idx = [
            find(COL_ELECTRIC_RANGE)?,
            find(COL_BASE_MSRP)?,
            find(COL_MODEL_YEAR)?,
        ];

        for row in &mut rows {
            if row.len() < columns.len() {
                row.resize(columns.len(), CellValue::Empty);
            }
            for &i in &numeric_idx {
                let cell = std::mem::replace(&mut row[i], CellValue::Empty);
                row[i] = cell.coerce_numeric();
            }
        }

        Ok(VehicleDataset {
            columns,
            rows,
            numeric_idx,
            category_idx,
        })
    }

    pub fn n_rows(&self) -> usize {
        self.rows.len()
    }

    pub fn n_cols(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    fn numeric_index(&self, col: NumericColumn) -> usize {
        match col {
            NumericColumn::ElectricRange => self.numeric_idx[0],
            NumericColumn::BaseMsrp => self.numeric_idx[1],
            NumericColumn::ModelYear => self.numeric_idx[2],
        }
    }

    fn category_index(&self, col: CategoryColumn) -> usize {
        match col {
            CategoryColumn::Make => self.category_idx[0],
            CategoryColumn::VehicleType => self.category_idx[1],
            CategoryColumn::CafvEligibility => self.category_idx[2],
        }
    }

    /// Per-row values of a coerced numeric column (`None` = missing).
    pub fn numbers(&self, col: NumericColumn) -> impl Iterator<Item = Option<f64>> + '_ {
        let idx = self.numeric_index(col);
        self.rows.iter().map(move |row| row[idx].as_number())
    }

    /// Per-row labels of a categorical column (`None` = missing, so
    /// missing categories drop out of counts and groupings).
    pub fn labels(&self, col: CategoryColumn) -> impl Iterator<Item = Option<String>> + '_ {
        let idx = self.category_index(col);
        self.rows.iter().map(move |row| match &row[idx] {
            CellValue::Empty => None,
            cell => Some(cell.to_string()),
        })
    }

    /// Number of missing cells in a numeric column after coercion.
    pub fn missing_count(&self, col: NumericColumn) -> usize {
        self.numbers(col).filter(Option::is_none).count()
    }
}
