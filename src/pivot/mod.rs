//! Series pivoting: parallel time series -> one row per time key.
//!
//! Charts want row-oriented data (`{ key, "Gotham Revenue": 100, ... }`) while
//! the backend sends column-oriented series. `pivot` bridges the two.
//!
//! Row keys come from the first series of the first group only. Keys that
//! appear only in other series are dropped, and a series with no point for a
//! row key contributes 0. The function is total: absent or partial input
//! degrades to zero-filled columns or an empty table.

use std::collections::BTreeMap;

use crate::domain::{PivotedRow, SeriesGroup};

/// Pivot `groups` into rows keyed by the reference series' keys.
///
/// `label` names the output column for a `(group label, series name)` pair.
/// When two pairs map to the same label, the later pair wins.
pub fn pivot<F>(groups: &[SeriesGroup<'_>], label: F) -> Vec<PivotedRow>
where
    F: Fn(&str, &str) -> String,
{
    let Some(reference) = groups.first().and_then(|g| g.series.first()) else {
        return Vec::new();
    };

    // Column labels depend only on the pair, not on the row.
    let label = &label;
    let columns: Vec<_> = groups
        .iter()
        .flat_map(|g| g.series.iter().map(move |s| (label(g.label, &s.name), s)))
        .collect();

    reference
        .data
        .iter()
        .map(|point| {
            let mut values = BTreeMap::new();
            for (column, series) in &columns {
                values.insert(column.clone(), series.value_at(&point.key).unwrap_or(0.0));
            }
            PivotedRow {
                key: point.key.clone(),
                values,
            }
        })
        .collect()
}

/// The `"{series} {group}"` column label used by every trend chart.
pub fn series_then_group(group: &str, series: &str) -> String {
    format!("{series} {group}")
}
