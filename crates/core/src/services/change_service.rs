use chrono::NaiveDate;

use crate::errors::CoreError;
use crate::models::change::{ChangeKind, ChangeSeries};
use crate::models::table::TimeSeriesTable;

/// Cumulative percent change of every column since `base_date`.
///
/// Rows before `base_date` are dropped; each remaining value becomes
/// `value / first - 1`, where `first` is the column's first remaining value
/// (so the base row is 0.0 and +25% is 0.25).
///
/// A column whose first value is missing, zero, or produces a non-finite
/// ratio yields `None` for the affected cells instead of ±inf/NaN.
///
/// Fails with [`CoreError::InvalidDateSelection`] if no row is on or after
/// `base_date`. The caller is responsible for keeping `base_date` in range.
pub fn percent_change_from_base(
    table: &TimeSeriesTable,
    base_date: NaiveDate,
) -> Result<ChangeSeries, CoreError> {
    change_from_base(table, base_date, ChangeKind::Percent, |value, base| {
        if base == 0.0 {
            return None;
        }
        Some(value / base - 1.0).filter(|r| r.is_finite())
    })
}

/// Cumulative absolute change of every column since `base_date`.
///
/// Each remaining value becomes `value - first`, keeping the table's units
/// (billions of dollars for stablecoin market caps).
pub fn absolute_change_from_base(
    table: &TimeSeriesTable,
    base_date: NaiveDate,
) -> Result<ChangeSeries, CoreError> {
    change_from_base(table, base_date, ChangeKind::Absolute, |value, base| {
        Some(value - base)
    })
}

fn change_from_base<F>(
    table: &TimeSeriesTable,
    base_date: NaiveDate,
    kind: ChangeKind,
    relate: F,
) -> Result<ChangeSeries, CoreError>
where
    F: Fn(f64, f64) -> Option<f64>,
{
    let sliced = table.slice_from(base_date);
    if sliced.is_empty() {
        return Err(CoreError::InvalidDateSelection {
            date: base_date.to_string(),
            min: table
                .first_date()
                .map(|d| d.to_string())
                .unwrap_or_else(|| "-".into()),
            max: table
                .last_date()
                .map(|d| d.to_string())
                .unwrap_or_else(|| "-".into()),
        });
    }

    let changed = sliced.map_columns(|values| {
        // First remaining value, even if missing: a missing base means the
        // whole column is undefined.
        let base = values.first().copied().flatten();
        values
            .iter()
            .map(|v| match (v, base) {
                (Some(v), Some(b)) => relate(*v, b),
                _ => None,
            })
            .collect()
    });

    Ok(ChangeSeries {
        kind,
        base_date,
        table: changed,
    })
}
