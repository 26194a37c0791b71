//! Group-by reduction with undefined ratios treated as missing.
//!
//! NaN sentinels (see [`crate::enrich`]) are converted to nulls before
//! reducing, so an undefined ratio is excluded from means, sums, and counts
//! alike. Output rows are sorted ascending by the group keys; every chart
//! applies its own display order afterwards.

use polars::prelude::*;

/// Aggregation function applied to the metric column per group.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Reducer {
    Mean,
    Sum,
    /// Non-null values of the metric column, consistent with the
    /// NaN-as-missing convention.
    Count,
}

impl Reducer {
    pub fn name(&self) -> &'static str {
        match self {
            Reducer::Mean => "mean",
            Reducer::Sum => "sum",
            Reducer::Count => "count",
        }
    }

    pub(crate) fn apply(&self, expr: Expr) -> Expr {
        match self {
            Reducer::Mean => expr.mean(),
            Reducer::Sum => expr.sum(),
            Reducer::Count => expr.count(),
        }
    }
}

/// Group `lf` by `group_keys` and reduce `metric`. The reduced column keeps
/// the metric's name. A key with a single distinct value produces a
/// single-row result; an empty input produces an empty result. Neither is an
/// error.
pub fn aggregate(
    lf: LazyFrame,
    group_keys: &[&str],
    metric: &str,
    reducer: Reducer,
) -> PolarsResult<DataFrame> {
    let mut lf = lf;
    let schema = lf.collect_schema()?;
    let mut metric_expr = col(metric);
    if matches!(
        schema.get(metric),
        Some(DataType::Float32 | DataType::Float64)
    ) {
        metric_expr = metric_expr.fill_nan(lit(NULL));
    }

    let keys: Vec<Expr> = group_keys.iter().map(|k| col(*k)).collect();
    let by: Vec<PlSmallStr> = group_keys.iter().map(|k| PlSmallStr::from(*k)).collect();
    lf.group_by(keys)
        .agg([reducer.apply(metric_expr).alias(metric)])
        .sort(by, SortMultipleOptions::default())
        .collect()
}
