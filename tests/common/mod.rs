//! Shared fixtures: small Superstore-shaped CSV files written to a temp dir.

use std::path::{Path, PathBuf};

/// Header row matching the source dataset, identity columns included so the
/// loader's projection is exercised.
pub const HEADER: &str = "Row ID,Order Date,Ship Date,Ship Mode,Customer Name,Country,State,Category,Sub-Category,Sales,Quantity,Discount,Profit";

pub fn write_csv(dir: &Path, name: &str, rows: &[String]) -> PathBuf {
    let path = dir.join(name);
    let mut contents = String::from(HEADER);
    contents.push('\n');
    for row in rows {
        contents.push_str(row);
        contents.push('\n');
    }
    std::fs::write(&path, contents).unwrap();
    path
}

#[allow(clippy::too_many_arguments)]
pub fn row(
    order_date: &str,
    ship_date: &str,
    ship_mode: &str,
    state: &str,
    category: &str,
    sub_category: &str,
    sales: f64,
    quantity: i64,
    discount: f64,
    profit: f64,
) -> String {
    format!(
        "1,{order_date},{ship_date},{ship_mode},Alice Woods,United States,{state},{category},{sub_category},{sales:.2},{quantity},{discount},{profit:.2}"
    )
}

/// The three-row scenario from the dashboard's acceptance checks, plus a
/// zero-sales row for the undefined-margin path.
pub fn sample_rows() -> Vec<String> {
    vec![
        row(
            "01-03-2014",
            "05-03-2014",
            "First Class",
            "California",
            "Technology",
            "Phones",
            100.0,
            2,
            0.0,
            20.0,
        ),
        row(
            "15-03-2014",
            "17-03-2014",
            "Standard Class",
            "Texas",
            "Technology",
            "Machines",
            200.0,
            4,
            0.1,
            -10.0,
        ),
        row(
            "01-06-2013",
            "04-06-2013",
            "Second Class",
            "Washington",
            "Office Supplies",
            "Paper",
            50.0,
            1,
            0.0,
            10.0,
        ),
    ]
}

pub fn zero_sales_row() -> String {
    row(
        "20-03-2014",
        "22-03-2014",
        "Same Day",
        "California",
        "Technology",
        "Accessories",
        0.0,
        1,
        0.0,
        5.0,
    )
}
