//! Initialize command.

use console::style;

use crate::config::Settings;
use crate::models::Manifest;

/// Initialize the data directory layout and an empty manifest.
pub async fn cmd_init(settings: &Settings) -> anyhow::Result<()> {
    settings.ensure_directories()?;

    let manifest_path = settings.manifest_path();
    if manifest_path.exists() {
        println!(
            "  {} Manifest already present at {}",
            style("!").yellow(),
            manifest_path.display()
        );
    } else {
        Manifest::default().save(&manifest_path)?;
        println!(
            "  {} Created manifest at {}",
            style("✓").green(),
            manifest_path.display()
        );
    }

    if !settings.countries_path().exists() {
        println!(
            "  {} Natural Earth countries dataset not found",
            style("!").yellow()
        );
        println!(
            "    Place the 1:110m admin-0 file at {}",
            settings.countries_path().display()
        );
    }

    println!(
        "{} Initialized geoprep data directory at {}",
        style("✓").green(),
        settings.data_dir.display()
    );

    Ok(())
}
