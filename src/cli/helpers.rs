//! Shared helper functions for CLI commands.

use std::path::Path;

use indicatif::{ProgressBar, ProgressStyle};

use crate::config::Settings;
use crate::models::{DatasetRecord, Manifest};

/// Progress bar for iterating over dataset files.
pub fn file_progress(len: u64) -> ProgressBar {
    let bar = ProgressBar::new(len);
    bar.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:30.cyan/blue}] {pos}/{len} {wide_msg}")
            .unwrap(),
    );
    bar
}

/// Spinner for a single long-running step.
pub fn spinner(message: &str) -> ProgressBar {
    let bar = ProgressBar::new_spinner();
    bar.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap(),
    );
    bar.set_message(message.to_string());
    bar.enable_steady_tick(std::time::Duration::from_millis(100));
    bar
}

/// Manifest name for an output file: its filename, so a custom
/// `--output` gets its own record instead of clobbering the canonical
/// dataset's entry.
pub fn dataset_name(output: &Path, default: &str) -> String {
    output
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| default.to_string())
}

/// Record provenance for a freshly written dataset in the manifest.
pub fn record_dataset(
    settings: &Settings,
    name: &str,
    path: &Path,
    source: Option<String>,
    method: Option<String>,
) -> anyhow::Result<()> {
    let content = std::fs::read(path)?;
    let mut record = DatasetRecord::new(name, &settings.relative_dataset_path(path), &content);
    if let Some(source) = source {
        record = record.with_source(source);
    }
    if let Some(method) = method {
        record = record.with_method(method);
    }

    let manifest_path = settings.manifest_path();
    let mut manifest = Manifest::load(&manifest_path)?;
    manifest.upsert(record);
    manifest.save(&manifest_path)?;
    Ok(())
}
