//! Dataset provenance manifest.
//!
//! `manifest.json` in the data directory records where each dataset came
//! from: upstream URL or derivation method, content hash, and timestamp.

use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::storage::{self, StorageError};

/// Provenance record for one dataset file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetRecord {
    /// Dataset name (its filename by convention).
    pub name: String,
    /// Path relative to the data directory.
    pub path: String,
    /// Upstream URL or input dataset this was derived from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    /// Short description of how the dataset was produced.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,
    /// SHA-256 of the file content, hex encoded.
    pub sha256: String,
    /// When the dataset was last fetched or derived.
    pub updated_at: DateTime<Utc>,
}

impl DatasetRecord {
    /// Build a record for freshly written content.
    pub fn new(name: &str, path: &str, content: &[u8]) -> Self {
        Self {
            name: name.to_string(),
            path: path.to_string(),
            source: None,
            method: None,
            sha256: storage::sha256_hex(content),
            updated_at: Utc::now(),
        }
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    pub fn with_method(mut self, method: impl Into<String>) -> Self {
        self.method = Some(method.into());
        self
    }
}

/// The full manifest: one record per tracked dataset.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Manifest {
    #[serde(default)]
    pub datasets: Vec<DatasetRecord>,
}

impl Manifest {
    /// Load the manifest, returning an empty one if the file does not exist.
    pub fn load(path: &Path) -> Result<Self, StorageError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let text = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }

    pub fn save(&self, path: &Path) -> Result<(), StorageError> {
        storage::save_json(path, self)
    }

    /// Insert or replace the record with the same name.
    pub fn upsert(&mut self, record: DatasetRecord) {
        if let Some(existing) = self.datasets.iter_mut().find(|d| d.name == record.name) {
            *existing = record;
        } else {
            self.datasets.push(record);
        }
    }

    pub fn get(&self, name: &str) -> Option<&DatasetRecord> {
        self.datasets.iter().find(|d| d.name == name)
    }
}
