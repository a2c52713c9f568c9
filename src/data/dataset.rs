//! Column-oriented dataset

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::category::AqiCategory;
use super::{CATEGORY_COLUMN, DATE_COLUMN, EU_AQI_COLUMN};
use crate::error::{Error, Result};

/// A single named column. `None` marks a missing value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "values", rename_all = "snake_case")]
pub enum Column {
    Timestamp(Vec<Option<DateTime<Utc>>>),
    Numeric(Vec<Option<f64>>),
    Categorical(Vec<Option<String>>),
}

impl Column {
    /// Numeric column with no missing values
    pub fn numeric(values: impl IntoIterator<Item = f64>) -> Self {
        Column::Numeric(values.into_iter().map(Some).collect())
    }

    /// Categorical column with no missing values
    pub fn categorical<S: Into<String>>(values: impl IntoIterator<Item = S>) -> Self {
        Column::Categorical(values.into_iter().map(|v| Some(v.into())).collect())
    }

    /// Timestamp column with no missing values
    pub fn timestamps(values: impl IntoIterator<Item = DateTime<Utc>>) -> Self {
        Column::Timestamp(values.into_iter().map(Some).collect())
    }

    pub fn len(&self) -> usize {
        match self {
            Column::Timestamp(v) => v.len(),
            Column::Numeric(v) => v.len(),
            Column::Categorical(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether the value at `row` is missing. NaN counts as missing.
    pub fn is_null(&self, row: usize) -> bool {
        match self {
            Column::Timestamp(v) => v[row].is_none(),
            Column::Numeric(v) => v[row].map_or(true, f64::is_nan),
            Column::Categorical(v) => v[row].is_none(),
        }
    }

    /// Number of missing values
    pub fn null_count(&self) -> usize {
        (0..self.len()).filter(|&row| self.is_null(row)).count()
    }

    /// Type name used in diagnostics
    pub fn dtype(&self) -> &'static str {
        match self {
            Column::Timestamp(_) => "timestamp",
            Column::Numeric(_) => "numeric",
            Column::Categorical(_) => "categorical",
        }
    }

    pub fn as_numeric(&self) -> Option<&[Option<f64>]> {
        match self {
            Column::Numeric(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_categorical(&self) -> Option<&[Option<String>]> {
        match self {
            Column::Categorical(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_timestamps(&self) -> Option<&[Option<DateTime<Utc>>]> {
        match self {
            Column::Timestamp(v) => Some(v),
            _ => None,
        }
    }

    /// Non-missing numeric values, in row order
    pub fn present_values(&self) -> Vec<f64> {
        match self {
            Column::Numeric(v) => v.iter().flatten().copied().filter(|x| !x.is_nan()).collect(),
            _ => Vec::new(),
        }
    }

    fn take(&self, rows: &[usize]) -> Column {
        match self {
            Column::Timestamp(v) => Column::Timestamp(rows.iter().map(|&i| v[i]).collect()),
            Column::Numeric(v) => Column::Numeric(rows.iter().map(|&i| v[i]).collect()),
            Column::Categorical(v) => {
                Column::Categorical(rows.iter().map(|&i| v[i].clone()).collect())
            }
        }
    }
}

/// Ordered collection of timestamped records stored column-wise.
///
/// All columns have the same length. Column order is by name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    columns: BTreeMap<String, Column>,
    n_rows: usize,
}

impl Dataset {
    /// Create an empty dataset with no columns
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a column, builder style
    pub fn with_column(mut self, name: impl Into<String>, column: Column) -> Result<Self> {
        self.insert_column(name, column)?;
        Ok(self)
    }

    /// Add or replace a column. Its length must match existing columns.
    pub fn insert_column(&mut self, name: impl Into<String>, column: Column) -> Result<()> {
        let name = name.into();
        let others = self.columns.keys().filter(|k| **k != name).count();
        if others > 0 && column.len() != self.n_rows {
            return Err(Error::schema(format!(
                "column '{name}' has {} rows, dataset has {}",
                column.len(),
                self.n_rows
            )));
        }
        self.n_rows = column.len();
        self.columns.insert(name, column);
        Ok(())
    }

    /// Number of records
    pub fn len(&self) -> usize {
        self.n_rows
    }

    pub fn is_empty(&self) -> bool {
        self.n_rows == 0
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.get(name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.columns.contains_key(name)
    }

    /// All column names, sorted
    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.keys().map(String::as_str)
    }

    /// Names of numeric columns, sorted
    pub fn numeric_columns(&self) -> Vec<&str> {
        self.columns
            .iter()
            .filter(|(_, c)| matches!(c, Column::Numeric(_)))
            .map(|(name, _)| name.as_str())
            .collect()
    }

    /// Timestamp key column, if present
    pub fn timestamps(&self) -> Option<&[Option<DateTime<Utc>>]> {
        self.column(DATE_COLUMN).and_then(Column::as_timestamps)
    }

    /// Derive the `category` column from `eu_aqi`. Missing AQI gives a missing category.
    pub fn with_aqi_category(mut self) -> Result<Self> {
        let aqi = self
            .column(EU_AQI_COLUMN)
            .and_then(Column::as_numeric)
            .ok_or_else(|| Error::schema(format!("numeric column '{EU_AQI_COLUMN}' is required")))?;
        let labels = aqi
            .iter()
            .map(|v| {
                v.filter(|x| !x.is_nan())
                    .map(|x| AqiCategory::from_eu_aqi(x).as_str().to_string())
            })
            .collect();
        self.insert_column(CATEGORY_COLUMN, Column::Categorical(labels))?;
        Ok(self)
    }

    /// Select rows by index, in the given order
    pub fn take_rows(&self, rows: &[usize]) -> Dataset {
        let columns = self.columns.iter().map(|(k, c)| (k.clone(), c.take(rows))).collect();
        Dataset { columns, n_rows: rows.len() }
    }

    /// Split into (train, test) keeping time order.
    ///
    /// Rows are sorted by timestamp and the last `max(1, floor(n * test_ratio))`
    /// become the test set.
    pub fn split_chronological(&self, test_ratio: f64) -> Result<(Dataset, Dataset)> {
        if !(test_ratio > 0.0 && test_ratio < 1.0) {
            return Err(Error::config("test_ratio", format!("{test_ratio} is not in (0, 1)")));
        }
        if self.n_rows < 2 {
            return Err(Error::schema(format!(
                "need at least 2 rows to split, dataset has {}",
                self.n_rows
            )));
        }
        let stamps = self
            .timestamps()
            .ok_or_else(|| Error::schema(format!("timestamp column '{DATE_COLUMN}' is required")))?;
        let missing = stamps.iter().filter(|t| t.is_none()).count();
        if missing > 0 {
            return Err(Error::schema(format!("{missing} record(s) have no timestamp")));
        }

        let mut order: Vec<usize> = (0..self.n_rows).collect();
        order.sort_by_key(|&i| stamps[i]);

        let test_size = ((self.n_rows as f64 * test_ratio) as usize).max(1);
        let (train_rows, test_rows) = order.split_at(self.n_rows - test_size);

        Ok((self.take_rows(train_rows), self.take_rows(test_rows)))
    }
}
