use chrono::NaiveDate;
use serde::Serialize;

use super::table::TimeSeriesTable;

/// How a [`ChangeSeries`] relates each value to the base-date value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ChangeKind {
    /// `value / base - 1`
    Percent,
    /// `value - base`, in the table's original units
    Absolute,
}

impl std::fmt::Display for ChangeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ChangeKind::Percent => write!(f, "Percent"),
            ChangeKind::Absolute => write!(f, "Absolute"),
        }
    }
}

/// Cumulative change of every column of a table relative to a base date.
///
/// Ephemeral: recomputed on every render from the read-only source table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChangeSeries {
    pub kind: ChangeKind,
    /// The requested base date (the first row may be later if the base
    /// date itself has no row)
    pub base_date: NaiveDate,
    pub table: TimeSeriesTable,
}
