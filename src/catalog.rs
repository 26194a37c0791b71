//! Fixed product-category and ship-mode enumerations.
//!
//! The dashboard's legend order and color assignments are declared here
//! rather than inherited from row insertion order, so charts render
//! identically regardless of how the source file happens to be sorted.

use crate::columns;

/// Product category. Variants are declared in the dashboard's legend order.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Category {
    OfficeSupplies,
    Technology,
    Furniture,
}

impl Category {
    /// All categories in legend order.
    pub const ALL: [Category; 3] = [
        Category::OfficeSupplies,
        Category::Technology,
        Category::Furniture,
    ];

    /// The exact spelling used in the source table.
    pub fn name(&self) -> &'static str {
        match self {
            Category::OfficeSupplies => "Office Supplies",
            Category::Technology => "Technology",
            Category::Furniture => "Furniture",
        }
    }

    /// Chart color for this category.
    pub fn color(&self) -> &'static str {
        match self {
            Category::OfficeSupplies => "#0068c9", // dark blue
            Category::Technology => "#83c9ff",     // light blue
            Category::Furniture => "#ff2a2b",      // red
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.name() == name)
    }

    /// Legend order as owned strings, for chart specs.
    pub fn legend_order() -> Vec<String> {
        Self::ALL.iter().map(|c| c.name().to_string()).collect()
    }
}

/// Shipment mode. Variants are declared fastest-first.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum ShipMode {
    SameDay,
    FirstClass,
    SecondClass,
    StandardClass,
}

impl ShipMode {
    pub const ALL: [ShipMode; 4] = [
        ShipMode::SameDay,
        ShipMode::FirstClass,
        ShipMode::SecondClass,
        ShipMode::StandardClass,
    ];

    /// The exact spelling used in the source table.
    pub fn name(&self) -> &'static str {
        match self {
            ShipMode::SameDay => "Same Day",
            ShipMode::FirstClass => "First Class",
            ShipMode::SecondClass => "Second Class",
            ShipMode::StandardClass => "Standard Class",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|m| m.name() == name)
    }

    /// Declared order as owned strings, for chart specs.
    pub fn legend_order() -> Vec<String> {
        Self::ALL.iter().map(|m| m.name().to_string()).collect()
    }
}

/// Metric selectable on the geographic performance page.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum PerformanceMetric {
    Profit,
    Sales,
}

impl PerformanceMetric {
    /// Column the metric aggregates over.
    pub fn column(&self) -> &'static str {
        match self {
            PerformanceMetric::Profit => columns::NET_PROFIT,
            PerformanceMetric::Sales => columns::SALES,
        }
    }

    /// Display label, e.g. for "Total Profit ($)" axis titles.
    pub fn label(&self) -> &'static str {
        match self {
            PerformanceMetric::Profit => "Profit",
            PerformanceMetric::Sales => "Sales",
        }
    }
}
