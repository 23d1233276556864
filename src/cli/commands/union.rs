//! Union command: border union of country polygons.

use std::path::PathBuf;

use anyhow::{bail, Context};
use console::style;

use crate::cli::helpers;
use crate::config::{Settings, BALTIC_NEIGHBORS, UNION_DATASET};
use crate::geometry::union::union_features;
use crate::models::Feature;
use crate::storage;

/// Build the border union of the selected countries.
pub async fn cmd_union(
    settings: &Settings,
    countries: &[String],
    input: Option<PathBuf>,
    output: Option<PathBuf>,
    name: &str,
) -> anyhow::Result<()> {
    let input = input.unwrap_or_else(|| settings.countries_path());
    let output = output.unwrap_or_else(|| settings.union_path());

    let wanted: Vec<String> = if countries.is_empty() {
        BALTIC_NEIGHBORS.iter().map(|s| s.to_string()).collect()
    } else {
        countries.to_vec()
    };

    let collection = storage::load_feature_collection(&input)
        .with_context(|| format!("loading countries dataset {}", input.display()))?;

    let selected: Vec<Feature> = collection
        .features
        .into_iter()
        .filter(|feature| {
            feature
                .property_str("NAME")
                .is_some_and(|n| wanted.iter().any(|w| w == n))
        })
        .collect();

    for feature in &selected {
        if let Some(country) = feature.property_str("NAME") {
            println!("  {} Found: {}", style("✓").green(), country);
        }
    }
    if selected.is_empty() {
        bail!(
            "none of the requested countries were found in {}",
            input.display()
        );
    }
    if selected.len() < wanted.len() {
        println!(
            "  {} {} of {} requested countries missing from the dataset",
            style("!").yellow(),
            wanted.len() - selected.len(),
            wanted.len()
        );
    }

    let bar = helpers::spinner(&format!("Unioning {} countries...", selected.len()));
    let result = union_features(&selected);
    bar.finish_and_clear();
    let result = result.context("polygon union failed")?;
    let stats = result.stats;

    let mut feature = Feature::new(result.into_multipolygon());
    feature.set_property("name", name);

    storage::save_json(&output, &feature)?;
    helpers::record_dataset(
        settings,
        &helpers::dataset_name(&output, UNION_DATASET),
        &output,
        Some(input.display().to_string()),
        Some(format!(
            "edge-cancellation union of {} countries",
            selected.len()
        )),
    )?;

    println!(
        "{} Union complete: {} boundary edges of {} total, {} component(s)",
        style("✓").green(),
        stats.boundary_edges,
        stats.total_edges,
        stats.components
    );
    println!("  Saved to {}", output.display());

    Ok(())
}
