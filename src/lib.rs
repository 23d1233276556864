//! geoprep - geographic boundary dataset preparation and validation.
//!
//! Manages a directory of GeoJSON boundary datasets: fetches upstream
//! inputs, derives new boundaries (country unions, sea extraction,
//! triangulation), validates everything against the RFC 7946 contract,
//! and tracks provenance in a manifest.

pub mod cli;
pub mod config;
pub mod extract;
pub mod fetch;
pub mod geometry;
pub mod models;
pub mod storage;
pub mod validate;
