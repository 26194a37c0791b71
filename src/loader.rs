//! Dataset ingestion: delimited-file loading, header normalization, date
//! parsing, and per-chart column projection.
//!
//! The table is materialized once per loader and treated as read-only from
//! then on; every accessor hands out an independent frame.

use polars::prelude::*;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::columns;
use crate::config::DatasetConfig;
use crate::enrich;
use crate::error::{DashboardError, Result};

/// Schema inference window for the CSV reader.
const INFER_SCHEMA_LENGTH: usize = 1000;

/// Loads the transactions table and serves projected copies of it.
///
/// Construction performs the full ingest: read, normalize headers, project to
/// the known columns, parse dates, drop rows without valid dates, and enrich
/// (see [`crate::enrich`]). The result is the one table every chart page
/// works from.
pub struct DataLoader {
    path: PathBuf,
    table: DataFrame,
}

impl DataLoader {
    /// Load and enrich the dataset described by `config`.
    ///
    /// Fails with [`DashboardError::DataUnavailable`] when the source is
    /// missing, unreadable, or lacks a required column. Rows whose order or
    /// ship date fail to parse are dropped, not fatal.
    pub fn open(config: &DatasetConfig) -> Result<Self> {
        let path = config.path.as_path();
        if !path.is_file() {
            return Err(DashboardError::missing_file(path));
        }

        let raw = read_raw(path, config).map_err(|e| DashboardError::data_unavailable(path, &e))?;
        debug!(
            rows = raw.height(),
            columns = raw.width(),
            "raw table read"
        );

        let lf = normalize_column_names(raw.lazy())
            .and_then(|lf| project_known_columns(lf, path))?;
        let lf = parse_date_columns(lf, &config.date_format);
        // Unparsable dates became nulls above; those rows are dropped here.
        let lf = lf.filter(
            col(columns::ORDER_DATE)
                .is_not_null()
                .and(col(columns::SHIP_DATE).is_not_null()),
        );
        let lf = enrich::enrich(lf)?;
        let table = lf
            .collect()
            .map_err(|e| DashboardError::data_unavailable(path, &e))?;

        info!(
            rows = table.height(),
            columns = table.width(),
            path = %path.display(),
            "dataset loaded"
        );

        Ok(Self {
            path: path.to_path_buf(),
            table,
        })
    }

    /// Source path this loader was opened from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The full enriched table.
    pub fn table(&self) -> &DataFrame {
        &self.table
    }

    /// Lazy handle over the enriched table, for the filter/aggregate pipeline.
    pub fn lazy(&self) -> LazyFrame {
        self.table.clone().lazy()
    }

    /// Projected copy containing only `columns` — the per-chart column sets
    /// from [`crate::config::ColumnSets`]. The copy never aliases writable
    /// state back into the loaded table.
    pub fn data_for_metric<S: AsRef<str>>(&self, columns: &[S]) -> Result<DataFrame> {
        Ok(self.table.select(columns.iter().map(|c| c.as_ref()))?)
    }
}

/// Eager CSV read. Legacy single-byte encodings are decoded lossily instead
/// of failing the load, and gzip sources decompress transparently.
fn read_raw(path: &Path, config: &DatasetConfig) -> PolarsResult<DataFrame> {
    let mut options = CsvReadOptions::default();
    options.infer_schema_length = Some(INFER_SCHEMA_LENGTH);
    options = options.map_parse_options(|opts| {
        opts.with_separator(config.delimiter as u8)
            .with_encoding(CsvEncoding::LossyUtf8)
            .with_try_parse_dates(false)
    });
    options
        .try_into_reader_with_file_path(Some(path.into()))?
        .finish()
}

/// Normalize headers to snake_case: trim, lowercase, separators to `_`.
fn normalize_column_names(lf: LazyFrame) -> Result<LazyFrame> {
    let mut lf = lf;
    let schema = lf.collect_schema()?;
    let names: Vec<String> = schema.iter_names().map(|s| s.to_string()).collect();
    let normalized: Vec<String> = names.iter().map(|s| normalize_header(s)).collect();
    if names == normalized {
        return Ok(lf);
    }
    Ok(lf.rename(
        names.iter().map(|s| s.as_str()),
        normalized.iter().map(|s| s.as_str()),
        false,
    ))
}

fn normalize_header(name: &str) -> String {
    name.trim()
        .to_lowercase()
        .chars()
        .map(|c| match c {
            ' ' | '-' | '/' => '_',
            other => other,
        })
        .collect()
}

/// Keep the columns the pipeline knows about, dropping identity columns
/// (row/customer ids, product names) the dashboard never reads. Missing
/// required columns fail the load.
fn project_known_columns(lf: LazyFrame, path: &Path) -> Result<LazyFrame> {
    let mut lf = lf;
    let schema = lf.collect_schema()?;
    for required in columns::REQUIRED {
        if schema.get(required).is_none() {
            return Err(DashboardError::missing_column(path, required));
        }
    }
    let mut keep: Vec<Expr> = columns::REQUIRED.iter().map(|name| col(*name)).collect();
    if schema.get(columns::COUNTRY).is_some() {
        keep.push(col(columns::COUNTRY));
    }
    Ok(lf.select(keep))
}

/// Parse the order/ship date columns from `format` (non-strict: values that
/// do not match become null).
pub(crate) fn parse_date_columns(lf: LazyFrame, format: &str) -> LazyFrame {
    let opts = StrptimeOptions {
        format: Some(PlSmallStr::from(format)),
        strict: false,
        exact: true,
        cache: true,
    };
    lf.with_columns([
        col(columns::ORDER_DATE)
            .str()
            .to_date(opts.clone())
            .alias(columns::ORDER_DATE),
        col(columns::SHIP_DATE)
            .str()
            .to_date(opts)
            .alias(columns::SHIP_DATE),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_normalization() {
        assert_eq!(normalize_header("Order Date"), "order_date");
        assert_eq!(normalize_header("Sub-Category"), "sub_category");
        assert_eq!(normalize_header("  Ship Mode "), "ship_mode");
        assert_eq!(normalize_header("sales"), "sales");
    }

    #[test]
    fn parse_dates_non_strict() {
        let lf = df!(
            "order_date" => &["01-03-2014", "not a date", "15-06-2013"],
            "ship_date" => &["05-03-2014", "02-01-2014", "18-06-2013"]
        )
        .unwrap()
        .lazy();
        let df = parse_date_columns(lf, "%d-%m-%Y").collect().unwrap();
        assert_eq!(df.column("order_date").unwrap().null_count(), 1);
        assert_eq!(df.column("ship_date").unwrap().null_count(), 0);
        assert_eq!(df.column("order_date").unwrap().dtype(), &DataType::Date);
    }
}
