//! Region-name reference from a GeoJSON boundary document.
//!
//! The choropleth join is on exact region-name equality (case and spelling).
//! A state with no boundary match is a data-quality condition: it is omitted
//! from the map and reported, never an error.

use polars::prelude::*;
use serde::Deserialize;
use std::collections::BTreeSet;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use tracing::warn;

use crate::error::{DashboardError, Result};

#[derive(Deserialize)]
struct GeoDocument {
    features: Vec<GeoFeature>,
}

#[derive(Deserialize)]
struct GeoFeature {
    properties: GeoProperties,
}

#[derive(Deserialize)]
struct GeoProperties {
    name: String,
}

/// The set of region names the boundary document can draw.
#[derive(Clone, Debug)]
pub struct RegionReference {
    names: BTreeSet<String>,
}

impl RegionReference {
    /// Parse region names out of a GeoJSON `FeatureCollection` whose features
    /// carry a `properties.name`.
    pub fn from_geojson(path: &Path) -> Result<Self> {
        let file = File::open(path)
            .map_err(|e| DashboardError::GeoReference(format!("{}: {}", path.display(), e)))?;
        let document: GeoDocument = serde_json::from_reader(BufReader::new(file))
            .map_err(|e| DashboardError::GeoReference(format!("{}: {}", path.display(), e)))?;
        Ok(Self::from_names(
            document.features.into_iter().map(|f| f.properties.name),
        ))
    }

    pub fn from_names<S: Into<String>>(names: impl IntoIterator<Item = S>) -> Self {
        Self {
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// Result of matching aggregate rows against the reference: the drawable rows
/// and the region names that had no boundary entry.
pub struct RegionMatch {
    pub matched: DataFrame,
    pub omitted: Vec<String>,
}

/// Split `df` on whether `key`'s value exists in the reference. Omitted names
/// are deduplicated and sorted; null keys are dropped without being reported.
pub fn match_regions(
    df: &DataFrame,
    key: &str,
    reference: &RegionReference,
) -> PolarsResult<RegionMatch> {
    let names = df.column(key)?.str()?;
    let mut keep = Vec::with_capacity(df.height());
    let mut omitted = BTreeSet::new();
    for name in names.into_iter() {
        match name {
            Some(name) if reference.contains(name) => keep.push(true),
            Some(name) => {
                omitted.insert(name.to_string());
                keep.push(false);
            }
            None => keep.push(false),
        }
    }
    let mask = BooleanChunked::from_slice(PlSmallStr::from_static("keep"), &keep);
    let matched = df.filter(&mask)?;
    let omitted: Vec<String> = omitted.into_iter().collect();
    if !omitted.is_empty() {
        warn!(
            regions = ?omitted,
            "regions missing from the boundary reference, omitted from the map"
        );
    }
    Ok(RegionMatch { matched, omitted })
}
