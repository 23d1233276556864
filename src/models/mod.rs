//! Data models for geoprep.

mod geojson;
mod manifest;

pub use geojson::{Feature, FeatureCollection, Geometry, Point};
pub use manifest::{DatasetRecord, Manifest};
