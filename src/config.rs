//! Configuration management for geoprep.
//!
//! Settings come from built-in defaults, an optional `geoprep.toml`, and
//! CLI overrides, in that order. Paths in the config file may use `~`.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::fetch::DEFAULT_MISSIONS_URL;

/// Natural Earth 1:110m admin-0 countries dataset.
pub const COUNTRIES_DATASET: &str = "ne_110m_admin_0_countries.geojson";
/// Derived union of the Baltic-bordering countries.
pub const UNION_DATASET: &str = "baltic_border_union.geojson";
/// Derived Baltic Sea polygon, kept under the test-data subdirectory.
pub const BALTIC_DATASET: &str = "baltic_sea_extracted.geojson";
/// Derived triangulation of the union's main component.
pub const TRIANGULATION_DATASET: &str = "union_triangulated.geojson";
/// Extracted mission location array.
pub const LOCATIONS_DATASET: &str = "globe_locations.json";

pub const MANIFEST_FILENAME: &str = "manifest.json";
pub const TEST_DATA_SUBDIR: &str = "test-data";
pub const CONFIG_FILENAME: &str = "geoprep.toml";

/// Countries whose union encloses the Baltic Sea.
pub const BALTIC_NEIGHBORS: [&str; 9] = [
    "Sweden",
    "Finland",
    "Russia",
    "Poland",
    "Germany",
    "Denmark",
    "Estonia",
    "Latvia",
    "Lithuania",
];

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("config parse error: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Runtime settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Directory holding the boundary datasets.
    pub data_dir: PathBuf,
    /// User agent for HTTP requests.
    pub user_agent: String,
    /// Request timeout in seconds.
    pub request_timeout: u64,
    /// Page carrying the embedded globe location array.
    pub missions_url: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            // The datasets live in the project's data/ directory by
            // convention, alongside the map scripts that consume them.
            data_dir: PathBuf::from("data"),
            user_agent: "geoprep/0.3 (boundary dataset tooling)".to_string(),
            request_timeout: 30,
            missions_url: DEFAULT_MISSIONS_URL.to_string(),
        }
    }
}

impl Settings {
    /// Subdirectory for derived test outputs.
    pub fn test_data_dir(&self) -> PathBuf {
        self.data_dir.join(TEST_DATA_SUBDIR)
    }

    pub fn countries_path(&self) -> PathBuf {
        self.data_dir.join(COUNTRIES_DATASET)
    }

    pub fn union_path(&self) -> PathBuf {
        self.data_dir.join(UNION_DATASET)
    }

    pub fn baltic_path(&self) -> PathBuf {
        self.test_data_dir().join(BALTIC_DATASET)
    }

    pub fn triangulation_path(&self) -> PathBuf {
        self.test_data_dir().join(TRIANGULATION_DATASET)
    }

    pub fn locations_path(&self) -> PathBuf {
        self.data_dir.join(LOCATIONS_DATASET)
    }

    pub fn manifest_path(&self) -> PathBuf {
        self.data_dir.join(MANIFEST_FILENAME)
    }

    /// Path of a dataset relative to the data directory, for manifest
    /// records; falls back to the full path when outside it.
    pub fn relative_dataset_path(&self, path: &Path) -> String {
        path.strip_prefix(&self.data_dir)
            .unwrap_or(path)
            .to_string_lossy()
            .into_owned()
    }

    pub fn ensure_directories(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(&self.data_dir)?;
        std::fs::create_dir_all(self.test_data_dir())
    }
}

fn expand_path(raw: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(raw).into_owned())
}

/// Fields accepted from `geoprep.toml`; everything is optional.
#[derive(Debug, Default, Deserialize)]
struct FileConfig {
    data_dir: Option<String>,
    user_agent: Option<String>,
    request_timeout: Option<u64>,
    missions_url: Option<String>,
}

fn find_config_file(explicit: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }
    let local = PathBuf::from(CONFIG_FILENAME);
    if local.exists() {
        return Some(local);
    }
    let user = dirs::config_dir()?.join("geoprep").join(CONFIG_FILENAME);
    user.exists().then_some(user)
}

/// Load settings: defaults, then config file, then the data-dir override.
pub fn load_settings(
    config_path: Option<&Path>,
    data_dir_override: Option<&Path>,
) -> Result<Settings, ConfigError> {
    let mut settings = Settings::default();

    if let Some(path) = find_config_file(config_path) {
        debug!(path = %path.display(), "loading config file");
        let text = std::fs::read_to_string(&path)?;
        let file: FileConfig = toml::from_str(&text)?;

        if let Some(dir) = file.data_dir {
            settings.data_dir = expand_path(&dir);
        }
        if let Some(agent) = file.user_agent {
            settings.user_agent = agent;
        }
        if let Some(timeout) = file.request_timeout {
            settings.request_timeout = timeout;
        }
        if let Some(url) = file.missions_url {
            settings.missions_url = url;
        }
    }

    if let Some(dir) = data_dir_override {
        settings.data_dir = dir.to_path_buf();
    }

    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_paths() {
        let settings = Settings::default();
        assert_eq!(settings.countries_path(), PathBuf::from("data/ne_110m_admin_0_countries.geojson"));
        assert_eq!(
            settings.baltic_path(),
            PathBuf::from("data/test-data/baltic_sea_extracted.geojson")
        );
    }

    #[test]
    fn test_relative_dataset_path() {
        let settings = Settings::default();
        assert_eq!(
            settings.relative_dataset_path(&settings.baltic_path()),
            "test-data/baltic_sea_extracted.geojson"
        );
        assert_eq!(
            settings.relative_dataset_path(Path::new("/elsewhere/x.geojson")),
            "/elsewhere/x.geojson"
        );
    }

    #[test]
    fn test_load_settings_from_file() {
        let dir = tempdir().unwrap();
        let config = dir.path().join("geoprep.toml");
        std::fs::write(
            &config,
            "data_dir = \"/srv/boundaries\"\nrequest_timeout = 5\n",
        )
        .unwrap();

        let settings = load_settings(Some(&config), None).unwrap();
        assert_eq!(settings.data_dir, PathBuf::from("/srv/boundaries"));
        assert_eq!(settings.request_timeout, 5);
        assert_eq!(settings.missions_url, DEFAULT_MISSIONS_URL);
    }

    #[test]
    fn test_cli_override_wins() {
        let dir = tempdir().unwrap();
        let config = dir.path().join("geoprep.toml");
        std::fs::write(&config, "data_dir = \"/srv/boundaries\"\n").unwrap();

        let settings = load_settings(Some(&config), Some(Path::new("/override"))).unwrap();
        assert_eq!(settings.data_dir, PathBuf::from("/override"));
    }

    #[test]
    fn test_bad_config_is_an_error() {
        let dir = tempdir().unwrap();
        let config = dir.path().join("geoprep.toml");
        std::fs::write(&config, "data_dir = [1, 2]\n").unwrap();
        assert!(matches!(
            load_settings(Some(&config), None),
            Err(ConfigError::Toml(_))
        ));
    }
}
