//! Error taxonomy and user-facing message formatting.
//!
//! Uses typed error matching (PolarsError variants, io::ErrorKind) rather than
//! string parsing to produce actionable messages. Only two conditions are
//! surfaced to users as errors: an unreadable source (`DataUnavailable`, fatal
//! to the request) and a selection matching zero rows (`EmptyResult`, a
//! warning). Undefined ratios are NaN sentinels, never errors; geographic
//! name mismatches are omissions, never errors.

use polars::prelude::PolarsError;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, DashboardError>;

#[derive(Debug, Error)]
pub enum DashboardError {
    /// The source table could not be read or is missing required columns.
    /// Fatal to the current request; nothing should render against it.
    #[error("dataset unavailable: {path}: {message}")]
    DataUnavailable { path: PathBuf, message: String },

    /// The current selections match zero rows. Not fatal; the caller renders
    /// a warning instead of a chart.
    #[error("no rows match the current selections")]
    EmptyResult,

    /// The geographic boundary reference could not be read or parsed.
    #[error("geographic reference unavailable: {0}")]
    GeoReference(String),

    /// Configuration file problems (unreadable, malformed TOML).
    #[error("configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Polars(#[from] PolarsError),

    #[error(transparent)]
    Io(#[from] io::Error),
}

impl DashboardError {
    /// Build a `DataUnavailable` from whatever the load attempt produced.
    pub(crate) fn data_unavailable(path: &Path, cause: &PolarsError) -> Self {
        DashboardError::DataUnavailable {
            path: path.to_path_buf(),
            message: user_message_from_polars(cause),
        }
    }

    pub(crate) fn missing_file(path: &Path) -> Self {
        DashboardError::DataUnavailable {
            path: path.to_path_buf(),
            message: "File or directory not found. Please check the file path.".to_string(),
        }
    }

    pub(crate) fn missing_column(path: &Path, column: &str) -> Self {
        DashboardError::DataUnavailable {
            path: path.to_path_buf(),
            message: format!(
                "Required column '{}' not found in the dataset. Check the file's headers.",
                column
            ),
        }
    }

    /// One-line user-facing message, suitable for the dashboard's error and
    /// warning banners.
    pub fn user_message(&self) -> String {
        match self {
            DashboardError::DataUnavailable { path, message } => {
                format!("Failed to load {}: {}", path.display(), message)
            }
            DashboardError::EmptyResult => {
                "No data available for the selected filters. Please adjust your selections."
                    .to_string()
            }
            DashboardError::GeoReference(msg) => {
                format!("Could not load the boundary reference: {}", msg)
            }
            DashboardError::Config(msg) => format!("Configuration problem: {}", msg),
            DashboardError::Polars(err) => user_message_from_polars(err),
            DashboardError::Io(err) => user_message_from_io(err),
        }
    }
}

/// Format a PolarsError as a user-facing message by matching on its variant.
pub fn user_message_from_polars(err: &PolarsError) -> String {
    use polars::prelude::PolarsError as PE;

    match err {
        PE::ColumnNotFound(msg) => format!(
            "Column not found: {}. Check spelling and that the column exists.",
            msg
        ),
        PE::IO { error, msg } => {
            let base = user_message_from_io(error.as_ref());
            match msg {
                Some(context) => format!("{} {}", base, context),
                None => base,
            }
        }
        PE::NoData(msg) => format!("No data: {}", msg),
        PE::SchemaMismatch(msg) => format!("Schema mismatch: {}", msg),
        PE::ShapeMismatch(msg) => format!("Row shape mismatch: {}", msg),
        PE::ComputeError(msg) => msg.to_string(),
        PE::Context { error, msg } => {
            let inner = user_message_from_polars(error);
            format!("{}: {}", msg, inner)
        }
        _ => first_line(&err.to_string()),
    }
}

/// Format an io::Error as a user-facing message by matching on ErrorKind.
pub fn user_message_from_io(err: &io::Error) -> String {
    use std::io::ErrorKind;

    match err.kind() {
        ErrorKind::NotFound => "File or directory not found. Please check the file path.".to_string(),
        ErrorKind::PermissionDenied => "Permission denied. Check read access.".to_string(),
        ErrorKind::InvalidData | ErrorKind::InvalidInput => "Invalid or corrupted data.".to_string(),
        ErrorKind::UnexpectedEof => "Unexpected end of file.".to_string(),
        _ => first_line(&err.to_string()),
    }
}

fn first_line(display: &str) -> String {
    display
        .lines()
        .next()
        .map(str::trim)
        .unwrap_or("An error occurred")
        .to_string()
}
