//! Export a pivoted trend chart to CSV or JSON.
//!
//! Both formats carry one row per reference key, with one column per chart
//! line in legend order. The key column is named after the chart's key
//! (`period` or `date`).

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use serde::Serialize;
use serde_json::{Map, Value};

use crate::domain::ExportFormat;
use crate::error::AppError;
use crate::views::LineChart;

/// Write `chart` to `path` in the requested format.
pub fn write_chart(path: &Path, chart: &LineChart, format: ExportFormat) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::new(2, format!("Failed to create export file '{}': {e}", path.display())))?;
    let mut out = BufWriter::new(file);

    match format {
        ExportFormat::Csv => write_chart_csv(&mut out, chart)?,
        ExportFormat::Json => write_chart_json(&mut out, chart)?,
    }

    out.flush()
        .map_err(|e| AppError::new(2, format!("Failed to flush export file '{}': {e}", path.display())))?;
    tracing::info!(path = %path.display(), rows = chart.rows.len(), ?format, "chart exported");
    Ok(())
}

/// CSV with a header row. Missing cells are written as `0`.
pub fn write_chart_csv<W: Write>(out: &mut W, chart: &LineChart) -> Result<(), AppError> {
    let mut header = vec![csv_field(chart.key_label)];
    header.extend(chart.lines.iter().map(|l| csv_field(&l.label)));
    writeln!(out, "{}", header.join(","))
        .map_err(|e| AppError::new(2, format!("Failed to write export CSV header: {e}")))?;

    for row in &chart.rows {
        let mut fields = vec![csv_field(&row.key)];
        fields.extend(
            chart
                .lines
                .iter()
                .map(|l| format!("{}", row.get(&l.label).unwrap_or(0.0))),
        );
        writeln!(out, "{}", fields.join(","))
            .map_err(|e| AppError::new(2, format!("Failed to write export CSV row: {e}")))?;
    }
    Ok(())
}

#[derive(Debug, Serialize)]
struct ChartExport<'a> {
    title: &'a str,
    key: &'a str,
    series: Vec<&'a str>,
    rows: Vec<Map<String, Value>>,
}

/// Pretty-printed JSON: chart metadata plus an array of row objects.
pub fn write_chart_json<W: Write>(out: &mut W, chart: &LineChart) -> Result<(), AppError> {
    let rows = chart
        .rows
        .iter()
        .map(|row| {
            let mut obj = Map::new();
            obj.insert(chart.key_label.to_string(), Value::from(row.key.clone()));
            for line in &chart.lines {
                obj.insert(line.label.clone(), Value::from(row.get(&line.label).unwrap_or(0.0)));
            }
            obj
        })
        .collect();

    let export = ChartExport {
        title: &chart.title,
        key: chart.key_label,
        series: chart.lines.iter().map(|l| l.label.as_str()).collect(),
        rows,
    };

    serde_json::to_writer_pretty(&mut *out, &export)
        .map_err(|e| AppError::new(2, format!("Failed to write export JSON: {e}")))?;
    writeln!(out).map_err(|e| AppError::new(2, format!("Failed to write export JSON: {e}")))?;
    Ok(())
}

fn csv_field(s: &str) -> String {
    if s.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}
