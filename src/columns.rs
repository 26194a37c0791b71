//! Column names shared across the pipeline.
//!
//! Raw names are the source table's headers after normalization (trimmed,
//! lowercased, separators replaced with underscores). Derived names are added
//! by [`crate::enrich::enrich`].

// Raw columns
pub const ORDER_DATE: &str = "order_date";
pub const SHIP_DATE: &str = "ship_date";
pub const SHIP_MODE: &str = "ship_mode";
pub const CATEGORY: &str = "category";
pub const SUB_CATEGORY: &str = "sub_category";
pub const STATE: &str = "state";
pub const COUNTRY: &str = "country";
pub const SALES: &str = "sales";
pub const PROFIT: &str = "profit";
pub const QUANTITY: &str = "quantity";
pub const DISCOUNT: &str = "discount";

// Derived columns
pub const NET_PROFIT: &str = "net_profit";
pub const PROFIT_MARGIN: &str = "profit_margin";
pub const SELLING_PRICE: &str = "selling_price";
pub const NET_PROFIT_PER_UNIT: &str = "net_profit_per_unit";
pub const FULFILLMENT_DAYS: &str = "fulfillment_days";
pub const DISCOUNTED_SALES: &str = "discounted_sales";
pub const TOTAL_DISCOUNT: &str = "total_discount";
pub const NET_PROFIT_BEFORE_DISCOUNT: &str = "net_profit_before_discount";
pub const YEAR: &str = "year";
pub const MONTH: &str = "month";
pub const YEAR_MONTH: &str = "year_month";
pub const SHIP_YEAR: &str = "ship_year";

// Pipeline columns
pub const BUCKET: &str = "bucket";
pub const SHIPMENT_COUNT: &str = "shipment_count";

/// Columns the loader requires in every source file. `country` is kept when
/// present but not required.
pub const REQUIRED: &[&str] = &[
    ORDER_DATE,
    SHIP_DATE,
    SHIP_MODE,
    CATEGORY,
    SUB_CATEGORY,
    STATE,
    SALES,
    PROFIT,
    QUANTITY,
    DISCOUNT,
];
