//! Filter selections and time bucketing applied ahead of aggregation.
//!
//! Selections never raise for an empty result; the filtered frame is simply
//! empty and the caller decides whether that deserves a warning. An empty
//! category (or year) selection means "show nothing" — the source dashboard
//! was inconsistent about this and the silent fall-back to "all" is gone.

use chrono::{Datelike, NaiveDate};
use polars::prelude::*;
use std::collections::BTreeSet;

use crate::columns::{BUCKET, CATEGORY, ORDER_DATE, YEAR};

/// Days between 0001-01-01 (chrono's day 1) and the Unix epoch.
const UNIX_EPOCH_CE_DAYS: i32 = 719_163;

/// Time bucket width for sales-over-time style charts.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Granularity {
    Daily,
    Weekly,
    Monthly,
}

impl Granularity {
    pub fn label(&self) -> &'static str {
        match self {
            Granularity::Daily => "Daily",
            Granularity::Weekly => "Weekly",
            Granularity::Monthly => "Monthly",
        }
    }
}

/// Order-date years to include.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum YearSelection {
    All,
    Only(BTreeSet<i32>),
}

impl YearSelection {
    pub fn only(years: impl IntoIterator<Item = i32>) -> Self {
        YearSelection::Only(years.into_iter().collect())
    }
}

/// Categories to include. `Only` with an empty set selects nothing.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum CategorySelection {
    All,
    Only(BTreeSet<String>),
}

impl CategorySelection {
    pub fn only<S: Into<String>>(categories: impl IntoIterator<Item = S>) -> Self {
        CategorySelection::Only(categories.into_iter().map(Into::into).collect())
    }
}

/// Inclusive date range, compared at day granularity on both ends.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }
}

/// The filter widgets' state for one recomputation pass.
#[derive(Clone, Debug)]
pub struct Selections {
    pub years: YearSelection,
    pub categories: CategorySelection,
    pub date_range: Option<DateRange>,
    pub granularity: Granularity,
}

impl Default for Selections {
    fn default() -> Self {
        Self {
            years: YearSelection::All,
            categories: CategorySelection::All,
            date_range: None,
            granularity: Granularity::Monthly,
        }
    }
}

/// Apply `selections` as row predicates. Bucketing is separate (see
/// [`with_bucket`]) because not every chart buckets by time.
///
/// Year predicates read the enriched `year` column; date ranges read
/// `order_date`. Pages project only the columns their own filters touch, so
/// the two are deliberately independent.
pub fn apply(lf: LazyFrame, selections: &Selections) -> LazyFrame {
    let mut lf = lf;
    if let YearSelection::Only(years) = &selections.years {
        lf = lf.filter(membership(years.iter().map(|y| col(YEAR).eq(lit(*y)))));
    }
    if let CategorySelection::Only(categories) = &selections.categories {
        lf = lf.filter(membership(
            categories.iter().map(|c| col(CATEGORY).eq(lit(c.as_str()))),
        ));
    }
    if let Some(range) = selections.date_range {
        lf = lf.filter(
            col(ORDER_DATE)
                .gt_eq(date_lit(range.start))
                .and(col(ORDER_DATE).lt_eq(date_lit(range.end))),
        );
    }
    lf
}

/// Add the time-bucket column for the selected granularity.
pub fn with_bucket(lf: LazyFrame, granularity: Granularity) -> LazyFrame {
    lf.with_columns([bucket_expr(granularity)])
}

/// Bucket expression over the order date: calendar day, ISO week start
/// (Monday), or first of month. A record exactly on a boundary belongs to the
/// bucket that boundary opens.
pub fn bucket_expr(granularity: Granularity) -> Expr {
    match granularity {
        Granularity::Daily => col(ORDER_DATE).alias(BUCKET),
        Granularity::Weekly => {
            // weekday() is ISO: Monday = 1, so subtracting (weekday - 1) days
            // floors to the Monday that opens the week.
            let ordinal = col(ORDER_DATE).cast(DataType::Int32);
            let offset = col(ORDER_DATE).dt().weekday().cast(DataType::Int32) - lit(1);
            (ordinal - offset).cast(DataType::Date).alias(BUCKET)
        }
        Granularity::Monthly => col(ORDER_DATE).dt().month_start().alias(BUCKET),
    }
}

/// OR-chain of predicates; an empty chain is `false`, so an empty selection
/// set matches nothing.
fn membership(predicates: impl Iterator<Item = Expr>) -> Expr {
    predicates.fold(lit(false), |acc, p| acc.or(p))
}

/// Literal expression for a calendar date.
pub(crate) fn date_lit(date: NaiveDate) -> Expr {
    lit(date.num_days_from_ce() - UNIX_EPOCH_CE_DAYS).cast(DataType::Date)
}
