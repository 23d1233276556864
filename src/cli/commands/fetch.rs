//! Fetch command: globe location extraction.

use std::path::PathBuf;

use anyhow::Context;
use console::style;
use url::Url;

use crate::cli::helpers;
use crate::config::{Settings, LOCATIONS_DATASET};
use crate::fetch::{build_client, fetch_globe_locations};
use crate::storage;

/// Fetch the missions page and store its embedded location array.
pub async fn cmd_fetch(
    settings: &Settings,
    url: Option<String>,
    output: Option<PathBuf>,
) -> anyhow::Result<()> {
    let url = url.unwrap_or_else(|| settings.missions_url.clone());
    let url = Url::parse(&url)
        .with_context(|| format!("invalid missions URL {url:?}"))?
        .to_string();
    let output = output.unwrap_or_else(|| settings.locations_path());

    let client = build_client(settings)?;
    let bar = helpers::spinner(&format!("Fetching {url}..."));
    let locations = fetch_globe_locations(&client, &url).await;
    bar.finish_and_clear();
    let locations = locations.with_context(|| format!("fetching globe locations from {url}"))?;

    storage::save_json(&output, &locations)?;
    helpers::record_dataset(
        settings,
        &helpers::dataset_name(&output, LOCATIONS_DATASET),
        &output,
        Some(url),
        Some("embedded globeLocations array, bracket-delimited".to_string()),
    )?;

    println!(
        "{} Saved {} locations to {}",
        style("✓").green(),
        locations.len(),
        output.display()
    );

    Ok(())
}
