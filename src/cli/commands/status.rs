//! Status command: dataset inventory and provenance.

use console::style;
use serde_json::Value;

use crate::config::{Settings, BALTIC_DATASET, COUNTRIES_DATASET, UNION_DATASET};
use crate::models::Manifest;
use crate::storage;

/// Feature and vertex counts pulled from a raw document without requiring
/// it to be contract-clean.
fn summarize(doc: &Value) -> (usize, usize) {
    fn count_positions(value: &Value) -> usize {
        match value {
            Value::Array(items) => {
                if items.len() >= 2 && items.iter().all(Value::is_number) {
                    1
                } else {
                    items.iter().map(count_positions).sum()
                }
            }
            _ => 0,
        }
    }

    let features = match doc.get("type").and_then(Value::as_str) {
        Some("FeatureCollection") => doc
            .get("features")
            .and_then(Value::as_array)
            .map_or(0, Vec::len),
        Some("Feature") => 1,
        _ => 0,
    };
    let vertices = count_positions(
        doc.pointer("/geometry/coordinates")
            .or_else(|| doc.get("features"))
            .unwrap_or(&Value::Null),
    );
    (features, vertices)
}

/// List datasets in the data directory with counts and provenance.
pub async fn cmd_status(settings: &Settings) -> anyhow::Result<()> {
    println!("Data directory: {}\n", settings.data_dir.display());

    if !settings.data_dir.exists() {
        println!(
            "{} Data directory does not exist (run `geoprep init`)",
            style("!").yellow()
        );
        return Ok(());
    }

    let manifest = Manifest::load(&settings.manifest_path())?;
    let files = storage::list_geojson_files(&settings.data_dir)?;

    for path in &files {
        let relative = settings.relative_dataset_path(path);
        match storage::load_value(path) {
            Ok(doc) => {
                let (features, vertices) = summarize(&doc);
                println!(
                    "{} {} ({} feature(s), {} vertices)",
                    style("✓").green(),
                    relative,
                    features,
                    vertices
                );
            }
            Err(err) => {
                println!("{} {} (unreadable: {})", style("✗").red(), relative, err);
            }
        }

        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        if let Some(record) = manifest.get(&name) {
            if let Some(source) = &record.source {
                println!("    source: {source}");
            }
            if let Some(method) = &record.method {
                println!("    method: {method}");
            }
            println!(
                "    sha256: {}… updated {}",
                &record.sha256[..12.min(record.sha256.len())],
                record.updated_at.format("%Y-%m-%d %H:%M UTC")
            );
        }
    }

    // The named datasets downstream consumers rely on.
    let expected = [
        settings.countries_path(),
        settings.union_path(),
        settings.baltic_path(),
    ];
    let labels = [COUNTRIES_DATASET, UNION_DATASET, BALTIC_DATASET];
    for (path, label) in expected.iter().zip(labels) {
        if !path.exists() {
            println!("{} Missing expected dataset: {}", style("!").yellow(), label);
        }
    }

    Ok(())
}
