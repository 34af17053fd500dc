use crate::models::HourRecord;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// A column whose every non-empty cell is a number. Missing cells are `NaN`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NumericColumn {
    pub name: String,
    pub values: Vec<f64>,
}

/// The loaded dataset. Built once by [`crate::parser::DatasetParser`] and only read afterwards.
#[derive(Debug, Clone)]
pub struct Dataset {
    source: PathBuf,
    records: Vec<HourRecord>,
    numeric_columns: Vec<NumericColumn>,
}

impl Dataset {
    pub fn new(
        source: impl Into<PathBuf>,
        records: Vec<HourRecord>,
        numeric_columns: Vec<NumericColumn>,
    ) -> Self {
        Self {
            source: source.into(),
            records,
            numeric_columns,
        }
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    pub fn records(&self) -> &[HourRecord] {
        &self.records
    }

    /// Numeric columns in header order.
    pub fn numeric_columns(&self) -> &[NumericColumn] {
        &self.numeric_columns
    }

    // Never empty: the parser rejects files without rows.
    pub(crate) fn len(&self) -> usize {
        self.records.len()
    }
}
