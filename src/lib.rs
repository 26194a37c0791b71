//! # salesboard
//!
//! Metric aggregation pipeline for a retail sales dashboard built on the
//! Superstore transactions dataset.
//!
//! The crate loads a delimited table once, derives metric columns in a single
//! pass, and serves chart-ready aggregations to a rendering layer:
//!
//! ```text
//! loader -> enrich -> filter (+ bucketing) -> aggregate -> views
//!    |                                                       |
//!  cache                                              kpi / geo join
//! ```
//!
//! Everything downstream of the loader is a pure transformation: identical
//! inputs produce identical frames, and no derived table aliases back into
//! the loaded one. Rendering (how bars, lines, pies, and maps get drawn) is
//! a collaborator concern; this crate stops at [`views::ChartSpec`].

pub mod aggregate;
pub mod cache;
pub mod catalog;
pub mod columns;
pub mod config;
pub mod enrich;
pub mod error;
pub mod filter;
pub mod geo;
pub mod kpi;
pub mod loader;
pub mod views;

pub use cache::DatasetCache;
pub use config::{ConfigManager, DashboardConfig, DatasetConfig};
pub use error::{DashboardError, Result};
pub use filter::{CategorySelection, DateRange, Granularity, Selections, YearSelection};
pub use geo::RegionReference;
pub use kpi::{KpiComparison, KpiMetric};
pub use loader::DataLoader;
pub use views::{ChartKind, ChartSpec, RegionChart};

/// Application name used for the config directory and other app-specific paths
pub const APP_NAME: &str = "salesboard";
