//! Storage helpers for GeoJSON datasets on disk.

use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;
use sha2::{Digest, Sha256};
use thiserror::Error;

use crate::models::{Feature, FeatureCollection};

/// Errors reading or writing dataset files.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Compute the SHA-256 of content, hex encoded.
pub fn sha256_hex(content: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content);
    hex::encode(hasher.finalize())
}

fn load_typed<T: DeserializeOwned>(path: &Path) -> Result<T, StorageError> {
    let text = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&text)?)
}

/// Load a dataset as an untyped JSON value (used by validation, which
/// needs to report on malformed documents the typed model would reject).
pub fn load_value(path: &Path) -> Result<serde_json::Value, StorageError> {
    load_typed(path)
}

/// Load a dataset as a typed FeatureCollection.
pub fn load_feature_collection(path: &Path) -> Result<FeatureCollection, StorageError> {
    load_typed(path)
}

/// Load a dataset holding a single Feature (the derived datasets).
pub fn load_feature(path: &Path) -> Result<Feature, StorageError> {
    load_typed(path)
}

/// Write a value as pretty-printed JSON, creating parent directories.
pub fn save_json<T: Serialize>(path: &Path, value: &T) -> Result<(), StorageError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let mut text = serde_json::to_string_pretty(value)?;
    text.push('\n');
    std::fs::write(path, text)?;
    Ok(())
}

/// Find every `.geojson` file under a directory, recursively, sorted.
pub fn list_geojson_files(dir: &Path) -> Result<Vec<PathBuf>, StorageError> {
    let mut files = Vec::new();
    collect_geojson_files(dir, &mut files)?;
    files.sort();
    Ok(files)
}

fn collect_geojson_files(dir: &Path, out: &mut Vec<PathBuf>) -> Result<(), StorageError> {
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_dir() {
            collect_geojson_files(&path, out)?;
        } else if path.extension().is_some_and(|ext| ext == "geojson") {
            out.push(path);
        }
    }
    Ok(())
}
