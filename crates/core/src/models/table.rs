use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeMap;

use super::column::ColumnId;
use super::point::DataPoint;
use crate::errors::CoreError;

/// One named column of a [`TimeSeriesTable`]. `None` marks a missing value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Column {
    pub id: ColumnId,
    pub values: Vec<Option<f64>>,
}

/// An ordered mapping from calendar date to named numeric columns.
///
/// Invariants (checked by every constructor):
/// - dates are strictly increasing (one row per date, no duplicates)
/// - every column has exactly one value slot per date
/// - each `ColumnId` appears at most once
///
/// Stored column-major: the change calculator and the chart builder both
/// walk one column at a time.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TimeSeriesTable {
    dates: Vec<NaiveDate>,
    columns: Vec<Column>,
}

impl TimeSeriesTable {
    /// Create a table from a date index and a set of columns.
    pub fn new(
        dates: Vec<NaiveDate>,
        columns: Vec<(ColumnId, Vec<Option<f64>>)>,
    ) -> Result<Self, CoreError> {
        if let Some(pair) = dates.windows(2).find(|w| w[0] >= w[1]) {
            return Err(CoreError::InvalidTable(format!(
                "dates must be strictly increasing, found {} followed by {}",
                pair[0], pair[1]
            )));
        }

        let mut table = Self {
            dates,
            columns: Vec::with_capacity(columns.len()),
        };
        for (id, values) in columns {
            table.push_column(id, values)?;
        }
        Ok(table)
    }

    /// Build a single-column table from provider points.
    ///
    /// Points may arrive unsorted. If two points share a date the later one
    /// in the input wins. Non-finite values are dropped.
    pub fn from_points(id: ColumnId, points: impl IntoIterator<Item = DataPoint>) -> Self {
        let by_date: BTreeMap<NaiveDate, f64> = points
            .into_iter()
            .filter(|p| p.value.is_finite())
            .map(|p| (p.date, p.value))
            .collect();

        let (dates, values): (Vec<NaiveDate>, Vec<Option<f64>>) =
            by_date.into_iter().map(|(d, v)| (d, Some(v))).unzip();

        Self {
            dates,
            columns: vec![Column { id, values }],
        }
    }

    /// Append a column. Fails on a duplicate id or a length mismatch.
    pub fn push_column(&mut self, id: ColumnId, values: Vec<Option<f64>>) -> Result<(), CoreError> {
        if self.has_column(id) {
            return Err(CoreError::InvalidTable(format!("duplicate column {id}")));
        }
        if values.len() != self.dates.len() {
            return Err(CoreError::InvalidTable(format!(
                "column {id} has {} values for {} dates",
                values.len(),
                self.dates.len()
            )));
        }
        self.columns.push(Column { id, values });
        Ok(())
    }

    // ── Accessors ───────────────────────────────────────────────────

    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Column ids in insertion order.
    pub fn column_ids(&self) -> Vec<ColumnId> {
        self.columns.iter().map(|c| c.id).collect()
    }

    pub fn has_column(&self, id: ColumnId) -> bool {
        self.columns.iter().any(|c| c.id == id)
    }

    /// Values of one column, aligned with [`dates`](Self::dates).
    pub fn column(&self, id: ColumnId) -> Result<&[Option<f64>], CoreError> {
        self.columns
            .iter()
            .find(|c| c.id == id)
            .map(|c| c.values.as_slice())
            .ok_or_else(|| CoreError::UnknownColumn(id.to_string()))
    }

    /// Value at a specific date. `None` if the date or the value is missing.
    pub fn value(&self, id: ColumnId, date: NaiveDate) -> Option<f64> {
        let idx = self.dates.binary_search(&date).ok()?;
        self.column(id).ok()?.get(idx).copied().flatten()
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    pub fn first_date(&self) -> Option<NaiveDate> {
        self.dates.first().copied()
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.dates.last().copied()
    }

    // ── Derivations (all return new tables) ─────────────────────────

    /// Rows with `date >= from`.
    pub fn slice_from(&self, from: NaiveDate) -> Self {
        let start = self.dates.partition_point(|d| *d < from);
        Self {
            dates: self.dates[start..].to_vec(),
            columns: self
                .columns
                .iter()
                .map(|c| Column {
                    id: c.id,
                    values: c.values[start..].to_vec(),
                })
                .collect(),
        }
    }

    /// Multiply every present value by `factor` (e.g. `1e-9` for billions).
    pub fn scale(&self, factor: f64) -> Self {
        self.map_columns(|values| values.iter().map(|v| v.map(|x| x * factor)).collect())
    }

    /// Rename a column in place of the old one. Fails if `to` already exists.
    pub fn rename_column(mut self, from: ColumnId, to: ColumnId) -> Result<Self, CoreError> {
        if from != to && self.has_column(to) {
            return Err(CoreError::InvalidTable(format!("duplicate column {to}")));
        }
        let column = self
            .columns
            .iter_mut()
            .find(|c| c.id == from)
            .ok_or_else(|| CoreError::UnknownColumn(from.to_string()))?;
        column.id = to;
        Ok(self)
    }

    /// Apply `f` to every column independently; the date index is unchanged.
    pub(crate) fn map_columns<F>(&self, f: F) -> Self
    where
        F: Fn(&[Option<f64>]) -> Vec<Option<f64>>,
    {
        Self {
            dates: self.dates.clone(),
            columns: self
                .columns
                .iter()
                .map(|c| Column {
                    id: c.id,
                    values: f(&c.values),
                })
                .collect(),
        }
    }
}
