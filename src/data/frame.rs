//! Row-aligned model inputs and labels

use std::collections::BTreeMap;

use super::dataset::{Column, Dataset};
use crate::error::{Error, Result};
use crate::model::ModelRole;

/// Feature matrix keyed by feature name. Every column has `n_rows` values.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureFrame {
    columns: BTreeMap<String, Vec<f64>>,
    order: Vec<String>,
    n_rows: usize,
}

impl FeatureFrame {
    /// Build from explicit columns, in the given order
    pub fn from_columns(columns: Vec<(String, Vec<f64>)>) -> Result<Self> {
        let n_rows = columns.first().map_or(0, |(_, v)| v.len());
        let mut map = BTreeMap::new();
        let mut order = Vec::with_capacity(columns.len());
        for (name, values) in columns {
            if values.len() != n_rows {
                return Err(Error::schema(format!(
                    "feature '{name}' has {} rows, expected {n_rows}",
                    values.len()
                )));
            }
            order.push(name.clone());
            map.insert(name, values);
        }
        Ok(Self { columns: map, order, n_rows })
    }

    /// Extract `features` from a dataset.
    ///
    /// Every feature must exist, be numeric and have no missing values.
    pub fn from_dataset<S: AsRef<str>>(dataset: &Dataset, features: &[S]) -> Result<Self> {
        let mut columns = Vec::with_capacity(features.len());
        for feature in features {
            let name = feature.as_ref();
            let column = dataset
                .column(name)
                .ok_or_else(|| Error::schema(format!("missing feature column '{name}'")))?;
            let values = column.as_numeric().ok_or_else(|| {
                Error::schema(format!("feature '{name}' is {}, expected numeric", column.dtype()))
            })?;
            let nulls = column.null_count();
            if nulls > 0 {
                return Err(Error::schema(format!("feature '{name}' has {nulls} missing value(s)")));
            }
            columns.push((name.to_string(), values.iter().flatten().copied().collect()));
        }
        if columns.is_empty() {
            return Ok(Self { columns: BTreeMap::new(), order: Vec::new(), n_rows: dataset.len() });
        }
        Self::from_columns(columns)
    }

    pub fn n_rows(&self) -> usize {
        self.n_rows
    }

    /// Feature names in extraction order
    pub fn feature_names(&self) -> &[String] {
        &self.order
    }

    pub fn get(&self, feature: &str) -> Option<&[f64]> {
        self.columns.get(feature).map(Vec::as_slice)
    }

    /// One row as (feature, value) pairs
    pub fn row(&self, index: usize) -> BTreeMap<String, f64> {
        self.columns.iter().map(|(k, v)| (k.clone(), v[index])).collect()
    }
}

/// Ground-truth labels for one model role
#[derive(Debug, Clone, PartialEq)]
pub enum Target {
    Continuous(Vec<f64>),
    Categorical(Vec<String>),
}

impl Target {
    /// Extract the role's target column. Missing values are a schema error.
    pub fn from_dataset(dataset: &Dataset, role: ModelRole) -> Result<Self> {
        let name = role.target_column();
        let column = dataset
            .column(name)
            .ok_or_else(|| Error::schema(format!("missing target column '{name}'")))?;
        let nulls = column.null_count();
        if nulls > 0 {
            return Err(Error::schema(format!("target '{name}' has {nulls} missing value(s)")));
        }
        match (role, column) {
            (ModelRole::Regression, Column::Numeric(v)) => {
                Ok(Target::Continuous(v.iter().flatten().copied().collect()))
            }
            (ModelRole::Classification, Column::Categorical(v)) => {
                Ok(Target::Categorical(v.iter().flatten().cloned().collect()))
            }
            (_, other) => Err(Error::schema(format!(
                "target '{name}' is {}, {role} needs {}",
                other.dtype(),
                match role {
                    ModelRole::Regression => "numeric",
                    ModelRole::Classification => "categorical",
                }
            ))),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Target::Continuous(v) => v.len(),
            Target::Categorical(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
