//! Column-major numeric table for batch analysis
//!
//! Logged runs arrive as tables with named numeric columns (for example
//! `numeric_time`, `total_volume`, `Temperature (C)`). The file loading itself
//! happens outside this crate. This type only holds the columns and pulls
//! time/value pairs out of them, reporting absent columns instead of
//! guessing.
//!
//! ```rust
//! use hydrawatch_ml::{MlError, Table};
//!
//! let table = Table::new()
//!     .with_column("numeric_time", vec![0.0, 1.0, 2.0])?
//!     .with_column("total_volume", vec![10.0, 12.0, 14.0])?;
//!
//! let series = table.series("numeric_time", "total_volume")?;
//! assert_eq!(series.len(), 3);
//!
//! assert_eq!(
//!     table.series("numeric_time", "pressure").unwrap_err(),
//!     MlError::MissingColumn { name: "pressure".into() },
//! );
//! # Ok::<(), MlError>(())
//! ```

#[cfg(not(feature = "std"))]
use alloc::{string::String, vec::Vec};

use crate::{MlError, MlResult, TimeSeriesPoint};

#[derive(Debug, Clone, PartialEq)]
struct Column {
    name: String,
    values: Vec<f64>,
}

/// Named numeric columns of equal length
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Table {
    columns: Vec<Column>,
}

impl Table {
    /// Empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from `(name, values)` pairs
    pub fn from_columns<N, I>(columns: I) -> MlResult<Self>
    where
        N: Into<String>,
        I: IntoIterator<Item = (N, Vec<f64>)>,
    {
        columns
            .into_iter()
            .try_fold(Self::new(), |table, (name, values)| table.with_column(name, values))
    }

    /// Build from a header and rows, as a CSV reader would produce them
    pub fn from_rows<S: AsRef<str>>(header: &[S], rows: &[Vec<f64>]) -> MlResult<Self> {
        let mut columns: Vec<Vec<f64>> = header.iter().map(|_| Vec::with_capacity(rows.len())).collect();

        for (row_index, row) in rows.iter().enumerate() {
            if row.len() != header.len() {
                return Err(MlError::RaggedColumns {
                    column: row_label(row_index),
                    expected: header.len(),
                    found: row.len(),
                });
            }
            for (column, &value) in columns.iter_mut().zip(row) {
                column.push(value);
            }
        }

        Self::from_columns(
            header
                .iter()
                .map(|name| String::from(name.as_ref()))
                .zip(columns),
        )
    }

    /// Add a column; its length must match the columns already present
    pub fn with_column(mut self, name: impl Into<String>, values: Vec<f64>) -> MlResult<Self> {
        let name = name.into();

        if self.columns.iter().any(|c| c.name == name) {
            return Err(MlError::DuplicateColumn { name });
        }

        if let Some(first) = self.columns.first() {
            if first.values.len() != values.len() {
                return Err(MlError::RaggedColumns {
                    column: name,
                    expected: first.values.len(),
                    found: values.len(),
                });
            }
        }

        self.columns.push(Column { name, values });
        Ok(self)
    }

    /// Number of rows (zero for a table without columns)
    pub fn row_count(&self) -> usize {
        self.columns.first().map_or(0, |c| c.values.len())
    }

    /// Column names in insertion order
    pub fn column_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.columns.iter().map(|c| c.name.as_str())
    }

    /// True if a column called `name` exists
    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c.name == name)
    }

    /// Values of one column
    pub fn column(&self, name: &str) -> MlResult<&[f64]> {
        self.columns
            .iter()
            .find(|c| c.name == name)
            .map(|c| c.values.as_slice())
            .ok_or_else(|| MlError::MissingColumn { name: name.into() })
    }

    /// Pair two columns into time series points
    ///
    /// Both columns are looked up before anything is read, so a missing
    /// column is reported without partial work. NaN or infinite cells are
    /// rejected with their position.
    pub fn series(&self, time_column: &str, value_column: &str) -> MlResult<Vec<TimeSeriesPoint>> {
        let times = self.column(time_column)?;
        let values = self.column(value_column)?;

        times
            .iter()
            .zip(values)
            .enumerate()
            .map(|(row, (&time, &value))| {
                if !time.is_finite() {
                    return Err(MlError::InvalidValue {
                        column: time_column.into(),
                        row,
                    });
                }
                if !value.is_finite() {
                    return Err(MlError::InvalidValue {
                        column: value_column.into(),
                        row,
                    });
                }
                Ok(TimeSeriesPoint::new(time, value))
            })
            .collect()
    }
}

fn row_label(row: usize) -> String {
    use core::fmt::Write;

    let mut label = String::new();
    let _ = write!(label, "row {}", row);
    label
}
