//! Chart-ready datasets for the dashboard's pages.
//!
//! Each view runs one full recomputation pass over the enriched table:
//! filter, bucket, aggregate, apply the page's documented display order, and
//! hand back a [`ChartSpec`] for the rendering collaborator. A selection that
//! matches zero rows becomes [`DashboardError::EmptyResult`] so the caller
//! can show a warning instead of an empty chart.

use polars::prelude::*;
use std::collections::HashMap;

use crate::aggregate::{aggregate, Reducer};
use crate::catalog::{Category, PerformanceMetric, ShipMode};
use crate::columns::{
    BUCKET, CATEGORY, NET_PROFIT, PROFIT_MARGIN, SALES, SHIPMENT_COUNT, SHIP_MODE, SHIP_YEAR,
    STATE, SUB_CATEGORY, YEAR,
};
use crate::error::{DashboardError, Result};
use crate::filter::{self, Selections};
use crate::geo::{match_regions, RegionReference};
use crate::kpi::{self, KpiComparison, KpiMetric};

/// How the rendering collaborator should draw a dataset.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ChartKind {
    Bar,
    Line,
    Pie,
    Choropleth,
}

/// A chart-ready dataset: the frame plus the bindings and labels the
/// renderer needs. `x`/`y`/`series` name columns in `data`.
#[derive(Clone, Debug)]
pub struct ChartSpec {
    pub kind: ChartKind,
    pub title: String,
    pub x: String,
    pub y: String,
    pub series: Option<String>,
    /// Legend order for the series column; empty means natural order.
    pub series_order: Vec<String>,
    pub x_label: String,
    pub y_label: String,
    pub data: DataFrame,
}

/// A choropleth dataset plus the region names omitted for lack of a boundary
/// match.
#[derive(Clone, Debug)]
pub struct RegionChart {
    pub spec: ChartSpec,
    pub omitted: Vec<String>,
}

/// Mean profit margin by sub-category, grouped and colored by category.
///
/// Display order: categories by their best sub-category margin descending,
/// sub-categories by margin descending within their category. Ties break on
/// name so the chart is stable across runs.
pub fn profit_margin_by_sub_category(
    table: &DataFrame,
    selections: &Selections,
) -> Result<ChartSpec> {
    let lf = filter::apply(table.clone().lazy(), selections);
    let grouped = aggregate(lf, &[CATEGORY, SUB_CATEGORY], PROFIT_MARGIN, Reducer::Mean)?;

    let categories = grouped.column(CATEGORY)?.str()?;
    let sub_categories = grouped.column(SUB_CATEGORY)?.str()?;
    let margins = grouped.column(PROFIT_MARGIN)?.f64()?;

    // Groups whose margins were all undefined reduce to null; they have no
    // drawable value and are left off the chart.
    let mut rows: Vec<(String, String, f64)> = Vec::with_capacity(grouped.height());
    for i in 0..grouped.height() {
        if let (Some(category), Some(sub_category), Some(margin)) =
            (categories.get(i), sub_categories.get(i), margins.get(i))
        {
            rows.push((category.to_string(), sub_category.to_string(), margin));
        }
    }
    if rows.is_empty() {
        return Err(DashboardError::EmptyResult);
    }

    let mut best_margin: HashMap<&str, f64> = HashMap::new();
    for (category, _, margin) in &rows {
        best_margin
            .entry(category.as_str())
            .and_modify(|best| *best = best.max(*margin))
            .or_insert(*margin);
    }
    let mut category_order: Vec<String> =
        best_margin.keys().map(|name| name.to_string()).collect();
    category_order.sort_by(|a, b| {
        best_margin[b.as_str()]
            .total_cmp(&best_margin[a.as_str()])
            .then_with(|| a.cmp(b))
    });
    let rank: HashMap<&str, usize> = category_order
        .iter()
        .enumerate()
        .map(|(i, name)| (name.as_str(), i))
        .collect();

    rows.sort_by(|a, b| {
        rank[a.0.as_str()]
            .cmp(&rank[b.0.as_str()])
            .then_with(|| b.2.total_cmp(&a.2))
            .then_with(|| a.1.cmp(&b.1))
    });

    let data = df!(
        CATEGORY => rows.iter().map(|r| r.0.as_str()).collect::<Vec<_>>(),
        SUB_CATEGORY => rows.iter().map(|r| r.1.as_str()).collect::<Vec<_>>(),
        PROFIT_MARGIN => rows.iter().map(|r| r.2).collect::<Vec<_>>()
    )?;

    Ok(ChartSpec {
        kind: ChartKind::Bar,
        title: "Profit Margin by Sub-Category and Category".to_string(),
        x: PROFIT_MARGIN.to_string(),
        y: SUB_CATEGORY.to_string(),
        series: Some(CATEGORY.to_string()),
        series_order: category_order,
        x_label: "Profit Margin (%)".to_string(),
        y_label: "Sub-Category".to_string(),
        data,
    })
}

/// Total sales per time bucket and category, ordered by bucket.
pub fn sales_over_time(table: &DataFrame, selections: &Selections) -> Result<ChartSpec> {
    let lf = filter::apply(table.clone().lazy(), selections);
    let lf = filter::with_bucket(lf, selections.granularity);
    let data = aggregate(lf, &[BUCKET, CATEGORY], SALES, Reducer::Sum)?;
    if data.height() == 0 {
        return Err(DashboardError::EmptyResult);
    }

    Ok(ChartSpec {
        kind: ChartKind::Line,
        title: format!("Sales Over Time ({})", selections.granularity.label()),
        x: BUCKET.to_string(),
        y: SALES.to_string(),
        series: Some(CATEGORY.to_string()),
        series_order: Category::legend_order(),
        x_label: "Date".to_string(),
        y_label: "Total Sales".to_string(),
        data,
    })
}

/// Shipment counts by ship mode for one ship-date year, optionally narrowed
/// to a category; ordered by count descending. The year's total distribution
/// and a single category's distribution are two calls.
pub fn shipment_mode_distribution(
    table: &DataFrame,
    ship_year: i32,
    category: Option<&str>,
) -> Result<ChartSpec> {
    let mut lf = table
        .clone()
        .lazy()
        .filter(col(SHIP_YEAR).eq(lit(ship_year)));
    if let Some(category) = category {
        lf = lf.filter(col(CATEGORY).eq(lit(category)));
    }

    let mut grouped = aggregate(lf, &[SHIP_MODE], SHIP_YEAR, Reducer::Count)?;
    if grouped.height() == 0 {
        return Err(DashboardError::EmptyResult);
    }
    grouped.rename(SHIP_YEAR, SHIPMENT_COUNT.into())?;
    let data = grouped.sort(
        [SHIPMENT_COUNT],
        SortMultipleOptions::default().with_order_descending(true),
    )?;

    let title = match category {
        Some(category) => format!("Distribution for {}", category),
        None => format!("Total Distribution of Ship Modes ({})", ship_year),
    };

    Ok(ChartSpec {
        kind: ChartKind::Pie,
        title,
        x: SHIP_MODE.to_string(),
        y: SHIPMENT_COUNT.to_string(),
        series: None,
        series_order: ShipMode::legend_order(),
        x_label: "Ship Mode".to_string(),
        y_label: "Shipments".to_string(),
        data,
    })
}

/// Total sales or profit by state, matched against the boundary reference.
/// Unmatched states are omitted from the map and reported on the result.
pub fn performance_by_state(
    table: &DataFrame,
    selections: &Selections,
    metric: PerformanceMetric,
    regions: &RegionReference,
) -> Result<RegionChart> {
    let lf = filter::apply(table.clone().lazy(), selections);
    let grouped = aggregate(lf, &[STATE], metric.column(), Reducer::Sum)?;
    if grouped.height() == 0 {
        return Err(DashboardError::EmptyResult);
    }

    let matched = match_regions(&grouped, STATE, regions)?;
    if matched.matched.height() == 0 {
        return Err(DashboardError::EmptyResult);
    }

    let spec = ChartSpec {
        kind: ChartKind::Choropleth,
        title: format!("Total {} by State", metric.label()),
        x: STATE.to_string(),
        y: metric.column().to_string(),
        series: None,
        series_order: Vec::new(),
        x_label: "State".to_string(),
        y_label: format!("Total {} ($)", metric.label()),
        data: matched.matched,
    };
    Ok(RegionChart {
        spec,
        omitted: matched.omitted,
    })
}

/// The overview page's KPI tiles: totals and average deal size for `year`,
/// with deltas against the year before.
pub fn overview_kpis(table: &DataFrame, year: i32) -> Result<Vec<KpiComparison>> {
    let current = table
        .clone()
        .lazy()
        .filter(col(YEAR).eq(lit(year)))
        .collect()?;
    let prior = table
        .clone()
        .lazy()
        .filter(col(YEAR).eq(lit(year - 1)))
        .collect()?;

    let metrics = [
        KpiMetric::new(format!("Total Sales ({})", year), SALES, Reducer::Sum),
        KpiMetric::new(format!("Total Profit ({})", year), NET_PROFIT, Reducer::Sum),
        KpiMetric::new(
            format!("Average Deal Size ({})", year),
            SALES,
            Reducer::Mean,
        ),
    ];
    Ok(kpi::compare(&current, &prior, &metrics)?)
}
