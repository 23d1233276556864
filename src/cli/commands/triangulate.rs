//! Triangulate command: ear clipping of the union's main component.

use std::path::PathBuf;

use anyhow::{bail, Context};
use console::style;

use crate::cli::helpers;
use crate::config::{Settings, TRIANGULATION_DATASET, UNION_DATASET};
use crate::geometry::{open_ring, ring_area, triangle_area, triangulate::triangulate_ring};
use crate::models::{Feature, FeatureCollection, Geometry};
use crate::storage;

/// Triangulate the largest union component and write the triangles as a
/// FeatureCollection.
pub async fn cmd_triangulate(
    settings: &Settings,
    input: Option<PathBuf>,
    output: Option<PathBuf>,
) -> anyhow::Result<()> {
    let input = input.unwrap_or_else(|| settings.union_path());
    let output = output.unwrap_or_else(|| settings.triangulation_path());

    let union = storage::load_feature(&input)
        .with_context(|| format!("loading union dataset {}", input.display()))?;
    let rings = union.geometry.outer_rings();
    let Some(main_ring) = rings.iter().max_by_key(|ring| ring.len()) else {
        bail!("union dataset has no polygon components");
    };

    let vertex_count = open_ring(main_ring).len();
    println!("  Main component: {vertex_count} vertices");

    let bar = helpers::spinner("Clipping ears...");
    let triangles = triangulate_ring(main_ring);
    bar.finish_and_clear();

    let expected = vertex_count.saturating_sub(2);
    if triangles.len() < expected {
        println!(
            "  {} Produced {} triangles, expected {} (degenerate input?)",
            style("!").yellow(),
            triangles.len(),
            expected
        );
    }

    let triangulated_area: f64 = triangles
        .iter()
        .map(|t| triangle_area(t[0], t[1], t[2]))
        .sum();
    println!(
        "  Area: {:.4} square degrees (shoelace: {:.4})",
        triangulated_area,
        ring_area(main_ring)
    );

    let features = triangles
        .iter()
        .enumerate()
        .map(|(i, triangle)| {
            let mut ring = triangle.to_vec();
            ring.push(triangle[0]);
            let mut feature = Feature::new(Geometry::Polygon {
                coordinates: vec![ring],
            });
            feature.set_property("triangle_id", i);
            feature
        })
        .collect();
    let collection = FeatureCollection::new(features);

    storage::save_json(&output, &collection)?;
    helpers::record_dataset(
        settings,
        &helpers::dataset_name(&output, TRIANGULATION_DATASET),
        &output,
        Some(UNION_DATASET.to_string()),
        Some("ear-clipping triangulation of the largest component".to_string()),
    )?;

    println!(
        "{} Triangulated into {} triangles",
        style("✓").green(),
        collection.features.len()
    );
    println!("  Saved to {}", output.display());

    Ok(())
}
