mod common;

use color_eyre::Result;
use polars::prelude::*;
use salesboard::columns;
use salesboard::{DashboardConfig, DashboardError, DataLoader, DatasetCache, DatasetConfig};

#[test]
fn missing_file_is_data_unavailable() {
    let config = DatasetConfig::at("/nonexistent/Superstore.csv");
    let err = DataLoader::open(&config).unwrap_err();
    assert!(matches!(err, DashboardError::DataUnavailable { .. }));
    let msg = err.user_message();
    assert!(msg.contains("Superstore.csv"), "got: {}", msg);
    assert!(msg.starts_with("Failed to load"), "got: {}", msg);
}

#[test]
fn headers_normalized_and_identity_columns_dropped() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let path = common::write_csv(dir.path(), "superstore.csv", &common::sample_rows());
    let loader = DataLoader::open(&DatasetConfig::at(path))?;

    let table = loader.table();
    assert!(table.column(columns::ORDER_DATE).is_ok());
    assert!(table.column(columns::SUB_CATEGORY).is_ok());
    assert!(table.column(columns::NET_PROFIT).is_ok(), "profit renamed");
    assert!(table.column("row_id").is_err(), "identity columns dropped");
    assert!(table.column("customer_name").is_err());
    assert!(
        table.column(columns::COUNTRY).is_ok(),
        "country kept when present"
    );
    assert_eq!(
        table.column(columns::ORDER_DATE)?.dtype(),
        &DataType::Date
    );
    Ok(())
}

#[test]
fn rows_with_unparsable_dates_are_dropped_not_fatal() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let mut rows = common::sample_rows();
    rows.push(common::row(
        "not a date",
        "05-03-2014",
        "First Class",
        "California",
        "Technology",
        "Phones",
        10.0,
        1,
        0.0,
        1.0,
    ));
    let path = common::write_csv(dir.path(), "superstore.csv", &rows);
    let loader = DataLoader::open(&DatasetConfig::at(path))?;
    assert_eq!(loader.table().height(), 3);
    Ok(())
}

#[test]
fn legacy_encoding_does_not_fail_the_load() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let mut contents = String::from(common::HEADER);
    contents.push('\n');
    contents.push_str(&common::sample_rows()[0]);
    contents.push('\n');
    let mut bytes = contents.into_bytes();
    // A latin-1 row: "México" as the country; bare 0xE9 is not valid UTF-8.
    let mut raw = common::sample_rows()[1].clone().into_bytes();
    let pos = raw
        .windows(b"United States".len())
        .position(|w| w == b"United States")
        .unwrap();
    raw.splice(pos..pos + b"United States".len(), *b"M\xE9xico");
    bytes.extend_from_slice(&raw);
    bytes.push(b'\n');
    let path = dir.path().join("latin1.csv");
    std::fs::write(&path, bytes)?;

    let loader = DataLoader::open(&DatasetConfig::at(path))?;
    assert_eq!(loader.table().height(), 2, "lossy decode keeps the row");
    Ok(())
}

#[test]
fn missing_required_column_is_data_unavailable() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("no_sales.csv");
    std::fs::write(
        &path,
        "Order Date,Ship Date,Ship Mode,State,Category,Sub-Category,Quantity,Discount,Profit\n\
         01-03-2014,05-03-2014,First Class,California,Technology,Phones,2,0.0,20.0\n",
    )?;
    let err = DataLoader::open(&DatasetConfig::at(path)).unwrap_err();
    match err {
        DashboardError::DataUnavailable { message, .. } => {
            assert!(message.contains("sales"), "got: {}", message)
        }
        other => panic!("expected DataUnavailable, got {:?}", other),
    }
    Ok(())
}

#[test]
fn per_chart_column_sets_project_cleanly() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let path = common::write_csv(dir.path(), "superstore.csv", &common::sample_rows());
    let loader = DataLoader::open(&DatasetConfig::at(path))?;
    let config = DashboardConfig::default();

    for set in [
        &config.columns.profit_margin,
        &config.columns.sales,
        &config.columns.shipments,
        &config.columns.geography,
        &config.columns.overview,
    ] {
        let projected = loader.data_for_metric(set)?;
        assert_eq!(projected.width(), set.len());
        assert_eq!(projected.height(), loader.table().height());
    }
    Ok(())
}

#[test]
fn cache_loads_once_until_invalidated() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let path = common::write_csv(dir.path(), "superstore.csv", &common::sample_rows());
    let config = DatasetConfig::at(&path);
    let cache = DatasetCache::new();
    let loads = std::cell::Cell::new(0usize);
    let load = || {
        loads.set(loads.get() + 1);
        DataLoader::open(&config)
    };

    let first = cache.get_or_load(&path, load)?;
    let second = cache.get_or_load(&path, load)?;
    assert_eq!(loads.get(), 1, "second request hits the memo");
    assert!(std::sync::Arc::ptr_eq(&first, &second));

    assert!(cache.invalidate(&path));
    let _third = cache.get_or_load(&path, load)?;
    assert_eq!(loads.get(), 2, "invalidation forces a reload");

    cache.clear();
    assert!(cache.is_empty());
    Ok(())
}
