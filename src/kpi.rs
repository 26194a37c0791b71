//! Scalar KPI reduction and current-vs-prior deltas.
//!
//! The caller picks both periods and supplies both frames; nothing here
//! infers "last year". An empty period reports an undefined value (`None`)
//! rather than failing, so a first year of data still renders its KPI tiles.

use polars::prelude::*;

use crate::aggregate::Reducer;

/// One KPI tile: which column to reduce and how to label the result.
#[derive(Clone, Debug)]
pub struct KpiMetric {
    pub label: String,
    pub column: String,
    pub reducer: Reducer,
}

impl KpiMetric {
    pub fn new(label: impl Into<String>, column: impl Into<String>, reducer: Reducer) -> Self {
        Self {
            label: label.into(),
            column: column.into(),
            reducer,
        }
    }
}

/// A computed KPI tile. `delta = current - prior`; either side of the
/// comparison being empty leaves the corresponding value undefined.
#[derive(Clone, Debug, PartialEq)]
pub struct KpiComparison {
    pub label: String,
    pub current: Option<f64>,
    pub delta: Option<f64>,
}

/// Reduce each metric over both period frames and report value + delta.
pub fn compare(
    current: &DataFrame,
    prior: &DataFrame,
    metrics: &[KpiMetric],
) -> PolarsResult<Vec<KpiComparison>> {
    let mut out = Vec::with_capacity(metrics.len());
    for metric in metrics {
        let current_value = reduce_scalar(current, metric)?;
        let prior_value = reduce_scalar(prior, metric)?;
        let delta = match (current_value, prior_value) {
            (Some(c), Some(p)) => Some(c - p),
            _ => None,
        };
        out.push(KpiComparison {
            label: metric.label.clone(),
            current: current_value,
            delta,
        });
    }
    Ok(out)
}

fn reduce_scalar(df: &DataFrame, metric: &KpiMetric) -> PolarsResult<Option<f64>> {
    if df.height() == 0 {
        return Ok(None);
    }
    let schema = df.schema();
    let mut expr = col(metric.column.as_str());
    if matches!(
        schema.get(metric.column.as_str()),
        Some(DataType::Float32 | DataType::Float64)
    ) {
        expr = expr.fill_nan(lit(NULL));
    }
    let reduced = df
        .clone()
        .lazy()
        .select([metric
            .reducer
            .apply(expr)
            .cast(DataType::Float64)
            .alias(metric.column.as_str())])
        .collect()?;
    Ok(reduced
        .column(metric.column.as_str())?
        .f64()?
        .get(0))
}
