//! Extract command: Baltic Sea extraction via polygon closing.

use std::path::PathBuf;

use anyhow::{anyhow, Context};
use console::style;

use crate::cli::helpers;
use crate::config::{Settings, BALTIC_DATASET, UNION_DATASET};
use crate::extract::{extract_sea, GOTEBORG, SKAGEN};
use crate::models::Point;
use crate::storage;

/// Parse a "lon,lat" argument.
fn parse_point(raw: &str) -> anyhow::Result<Point> {
    let (lon, lat) = raw
        .split_once(',')
        .ok_or_else(|| anyhow!("expected \"lon,lat\", got {raw:?}"))?;
    Ok(Point::new(
        lon.trim().parse().context("longitude is not a number")?,
        lat.trim().parse().context("latitude is not a number")?,
    ))
}

/// Extract the enclosed sea polygon from the border union.
pub async fn cmd_extract(
    settings: &Settings,
    input: Option<PathBuf>,
    output: Option<PathBuf>,
    point1: Option<String>,
    point2: Option<String>,
    name: &str,
) -> anyhow::Result<()> {
    let input = input.unwrap_or_else(|| settings.union_path());
    let output = output.unwrap_or_else(|| settings.baltic_path());
    let point1 = point1.as_deref().map(parse_point).transpose()?.unwrap_or(SKAGEN);
    let point2 = point2.as_deref().map(parse_point).transpose()?.unwrap_or(GOTEBORG);

    let union = storage::load_feature(&input)
        .with_context(|| format!("loading union dataset {}", input.display()))?;

    println!("  Closing points:");
    println!("    point 1: [{}, {}]", point1.lon, point1.lat);
    println!("    point 2: [{}, {}]", point2.lon, point2.lat);

    let sea = extract_sea(&union, point1, point2, name)
        .context("sea extraction failed (is the closing chord external?)")?;
    let vertices = sea.geometry.vertex_count();

    storage::save_json(&output, &sea)?;
    let method = sea
        .property_str("method")
        .unwrap_or("polygon closing")
        .to_string();
    helpers::record_dataset(
        settings,
        &helpers::dataset_name(&output, BALTIC_DATASET),
        &output,
        Some(UNION_DATASET.to_string()),
        Some(method),
    )?;

    println!(
        "{} Extracted {} ({} vertices)",
        style("✓").green(),
        name,
        vertices
    );
    println!("  Saved to {}", output.display());

    Ok(())
}
