use chrono::NaiveDate;
use std::collections::BTreeSet;

use crate::errors::CoreError;
use crate::models::column::{ColumnId, Stablecoin};
use crate::models::table::TimeSeriesTable;

/// Join daily prices with TVL and smooth gaps.
///
/// 1. Inner join on calendar date (tables are already keyed by date, so
///    time-of-day was dropped when the provider points were built).
/// 2. Forward-fill every column independently. Leading gaps stay missing.
///
/// Output columns: price columns in their original order, then TVL.
/// Fails with [`CoreError::Alignment`] if the two tables share no date.
pub fn align_prices_with_tvl(
    prices: &TimeSeriesTable,
    tvl: &TimeSeriesTable,
) -> Result<TimeSeriesTable, CoreError> {
    let joined = inner_join(prices, tvl)?;
    if joined.is_empty() {
        return Err(CoreError::Alignment(format!(
            "no overlapping dates between prices ({}) and TVL ({})",
            describe_range(prices),
            describe_range(tvl)
        )));
    }
    Ok(joined.map_columns(forward_fill))
}

/// Concatenate per-stablecoin market caps column-wise and add "All 3".
///
/// Dates are the union of all inputs; a date missing from one coin leaves
/// only that coin's cell empty. "All 3" is the sum of the coin columns and
/// is missing wherever any of them is missing. Values must already be in
/// billions.
pub fn combine_stablecoin_mcaps(
    per_coin: Vec<(Stablecoin, TimeSeriesTable)>,
) -> Result<TimeSeriesTable, CoreError> {
    if per_coin.is_empty() {
        return Err(CoreError::Alignment("no stablecoin tables to combine".into()));
    }

    let mut renamed = Vec::with_capacity(per_coin.len());
    for (coin, table) in per_coin {
        let ids = table.column_ids();
        let [source] = ids.as_slice() else {
            return Err(CoreError::InvalidTable(format!(
                "expected one market cap column for {coin}, found {}",
                ids.len()
            )));
        };
        renamed.push(table.rename_column(*source, coin.column())?);
    }

    let mut combined = concat_columns(&renamed)?;

    let coin_columns: Vec<&[Option<f64>]> = combined
        .columns()
        .iter()
        .map(|c| c.values.as_slice())
        .collect();
    let total: Vec<Option<f64>> = (0..combined.len())
        .map(|row| coin_columns.iter().map(|col| col[row]).sum::<Option<f64>>())
        .collect();
    combined.push_column(ColumnId::AllThree, total)?;

    Ok(combined)
}

/// Outer join: union of dates, every column of every table, in input order.
pub fn concat_columns(tables: &[TimeSeriesTable]) -> Result<TimeSeriesTable, CoreError> {
    let dates: Vec<NaiveDate> = tables
        .iter()
        .flat_map(|t| t.dates().iter().copied())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();

    let mut columns = Vec::new();
    for table in tables {
        for column in table.columns() {
            let values = dates
                .iter()
                .map(|d| {
                    table
                        .dates()
                        .binary_search(d)
                        .ok()
                        .and_then(|idx| column.values[idx])
                })
                .collect();
            columns.push((column.id, values));
        }
    }

    TimeSeriesTable::new(dates, columns)
}

/// Propagate the last known value forward. No interpolation, no look-ahead:
/// values before the first known one remain `None`.
pub fn forward_fill(values: &[Option<f64>]) -> Vec<Option<f64>> {
    let mut last = None;
    values
        .iter()
        .map(|v| {
            if v.is_some() {
                last = *v;
            }
            last
        })
        .collect()
}

/// Keep only dates present in both tables; columns of `left` then `right`.
fn inner_join(
    left: &TimeSeriesTable,
    right: &TimeSeriesTable,
) -> Result<TimeSeriesTable, CoreError> {
    // Both date indices are sorted, so a merge walk finds the shared rows.
    let (mut i, mut j) = (0, 0);
    let mut rows = Vec::new();
    let (ld, rd) = (left.dates(), right.dates());
    while i < ld.len() && j < rd.len() {
        match ld[i].cmp(&rd[j]) {
            std::cmp::Ordering::Less => i += 1,
            std::cmp::Ordering::Greater => j += 1,
            std::cmp::Ordering::Equal => {
                rows.push((ld[i], i, j));
                i += 1;
                j += 1;
            }
        }
    }

    let dates = rows.iter().map(|(d, _, _)| *d).collect();
    let mut columns = Vec::new();
    for column in left.columns() {
        columns.push((column.id, rows.iter().map(|(_, li, _)| column.values[*li]).collect()));
    }
    for column in right.columns() {
        columns.push((column.id, rows.iter().map(|(_, _, ri)| column.values[*ri]).collect()));
    }

    TimeSeriesTable::new(dates, columns)
}

fn describe_range(table: &TimeSeriesTable) -> String {
    match (table.first_date(), table.last_date()) {
        (Some(first), Some(last)) => format!("{first}..={last}"),
        _ => "empty".to_string(),
    }
}
