//! In-Memory Tabular Dataset

use crate::error::SummaryError;
use serde::Serialize;
use std::fmt;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use tracing::debug;

/// Tokens read as a missing cell
const MISSING_TOKENS: &[&str] = &["", "NA", "N/A", "NaN", "nan", "null", "NULL", "None"];

/// Column type, named the way pandas names dtypes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DataType {
    Int64,
    Float64,
    Bool,
    Object,
}

impl DataType {
    /// Get string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            DataType::Int64 => "int64",
            DataType::Float64 => "float64",
            DataType::Bool => "bool",
            DataType::Object => "object",
        }
    }

    /// Whether the column supports numeric summaries
    pub fn is_numeric(&self) -> bool {
        matches!(self, DataType::Int64 | DataType::Float64)
    }
}

/// A single present cell
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Int(i64),
    Float(f64),
    Bool(bool),
    Text(String),
}

impl Value {
    /// Parse a CSV field; `None` for missing tokens
    pub fn parse(field: &str) -> Option<Self> {
        let field = field.trim();
        if MISSING_TOKENS.contains(&field) {
            return None;
        }
        if let Ok(v) = field.parse::<i64>() {
            return Some(Value::Int(v));
        }
        if let Ok(v) = field.parse::<f64>() {
            return Some(Value::Float(v));
        }
        match field {
            "true" | "True" | "TRUE" => Some(Value::Bool(true)),
            "false" | "False" | "FALSE" => Some(Value::Bool(false)),
            _ => Some(Value::Text(field.to_string())),
        }
    }

    /// Numeric view of the cell
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int(v) => Some(*v as f64),
            Value::Float(v) => Some(*v),
            Value::Bool(_) | Value::Text(_) => None,
        }
    }

    /// Hashable identity used for distinct counts
    pub(crate) fn key(&self) -> ValueKey {
        match self {
            Value::Int(v) => ValueKey::Int(*v),
            // 0.0 and -0.0 are one value
            Value::Float(v) => ValueKey::Float((v + 0.0).to_bits()),
            Value::Bool(v) => ValueKey::Bool(*v),
            Value::Text(v) => ValueKey::Text(v.clone()),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(v) => write!(f, "{}", v),
            Value::Float(v) => write!(f, "{:?}", v),
            Value::Bool(v) => write!(f, "{}", v),
            Value::Text(v) => write!(f, "{}", v),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub(crate) enum ValueKey {
    Int(i64),
    Float(u64),
    Bool(bool),
    Text(String),
}

/// A named, typed column with missing cells
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    name: String,
    dtype: DataType,
    cells: Vec<Option<Value>>,
}

impl Column {
    /// Build a column, inferring its dtype from the present cells
    ///
    /// Integers mixed with floats are widened to floats. Any other mix is
    /// `object`. A column with no present cells is `float64`.
    pub fn new(name: impl Into<String>, cells: Vec<Option<Value>>) -> Self {
        let dtype = infer_dtype(&cells);
        let cells = if dtype == DataType::Float64 {
            cells
                .into_iter()
                .map(|c| match c {
                    Some(Value::Int(v)) => Some(Value::Float(v as f64)),
                    other => other,
                })
                .collect()
        } else {
            cells
        };
        Self {
            name: name.into(),
            dtype,
            cells,
        }
    }

    /// Integer column
    pub fn ints(name: impl Into<String>, cells: Vec<Option<i64>>) -> Self {
        Self::new(name, cells.into_iter().map(|c| c.map(Value::Int)).collect())
    }

    /// Float column; NaN cells count as missing
    pub fn floats(name: impl Into<String>, cells: Vec<Option<f64>>) -> Self {
        Self::new(
            name,
            cells
                .into_iter()
                .map(|c| c.filter(|v| !v.is_nan()).map(Value::Float))
                .collect(),
        )
    }

    /// Text column
    pub fn texts(name: impl Into<String>, cells: Vec<Option<&str>>) -> Self {
        Self::new(
            name,
            cells
                .into_iter()
                .map(|c| c.map(|s| Value::Text(s.to_string())))
                .collect(),
        )
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn dtype(&self) -> DataType {
        self.dtype
    }

    pub fn cells(&self) -> &[Option<Value>] {
        &self.cells
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Number of missing cells
    pub fn missing(&self) -> usize {
        self.cells.iter().filter(|c| c.is_none()).count()
    }

    /// Present cells
    pub fn present(&self) -> impl Iterator<Item = &Value> {
        self.cells.iter().flatten()
    }

    /// Present cells as numbers, or `NotNumeric`
    pub fn numeric_values(&self) -> Result<Vec<f64>, SummaryError> {
        if !self.dtype.is_numeric() {
            return Err(SummaryError::NotNumeric {
                column: self.name.clone(),
                dtype: self.dtype.as_str(),
            });
        }
        Ok(self.present().filter_map(Value::as_f64).collect())
    }
}

fn infer_dtype(cells: &[Option<Value>]) -> DataType {
    let mut dtype: Option<DataType> = None;
    for value in cells.iter().flatten() {
        let cell = match value {
            Value::Int(_) => DataType::Int64,
            Value::Float(_) => DataType::Float64,
            Value::Bool(_) => DataType::Bool,
            Value::Text(_) => DataType::Object,
        };
        dtype = Some(match (dtype, cell) {
            (None, cell) => cell,
            (Some(a), b) if a == b => a,
            (Some(DataType::Int64), DataType::Float64)
            | (Some(DataType::Float64), DataType::Int64) => DataType::Float64,
            _ => DataType::Object,
        });
    }
    dtype.unwrap_or(DataType::Float64)
}

/// Columns of equal length
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    columns: Vec<Column>,
    rows: usize,
}

impl Dataset {
    /// Assemble a dataset; every column must have the same length
    pub fn new(columns: Vec<Column>) -> Result<Self, SummaryError> {
        let rows = columns.first().map(Column::len).unwrap_or(0);
        if let Some(bad) = columns.iter().find(|c| c.len() != rows) {
            return Err(SummaryError::RaggedColumns {
                column: bad.name.clone(),
                expected: rows,
                actual: bad.len(),
            });
        }
        Ok(Self { columns, rows })
    }

    /// Read a CSV file with a header row
    pub fn from_csv_path(path: impl AsRef<Path>) -> Result<Self, SummaryError> {
        let file = File::open(path.as_ref())?;
        Self::from_csv_reader(BufReader::new(file))
    }

    /// Read CSV data with a header row
    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Self, SummaryError> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let headers: Vec<String> = reader.headers()?.iter().map(String::from).collect();
        let mut cells: Vec<Vec<Option<Value>>> = vec![Vec::new(); headers.len()];

        for result in reader.records() {
            let record = result?;
            for (column, field) in cells.iter_mut().zip(record.iter()) {
                column.push(Value::parse(field));
            }
        }

        let dataset = Self::new(
            headers
                .into_iter()
                .zip(cells)
                .map(|(name, cells)| Column::new(name, cells))
                .collect(),
        )?;
        debug!(
            "Loaded dataset: {} rows, {} columns",
            dataset.rows,
            dataset.columns.len()
        );
        Ok(dataset)
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Look up a column by name
    pub fn column(&self, name: &str) -> Result<&Column, SummaryError> {
        self.columns
            .iter()
            .find(|c| c.name == name)
            .ok_or_else(|| SummaryError::ColumnNotFound(name.to_string()))
    }

    /// Number of rows
    pub fn rows(&self) -> usize {
        self.rows
    }
}
