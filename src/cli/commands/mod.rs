//! CLI parser and dispatch to command-specific modules.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::load_settings;

mod extract;
mod fetch;
mod init;
mod status;
mod triangulate;
mod union;
mod validate;

#[derive(Parser)]
#[command(name = "geoprep")]
#[command(about = "Geographic boundary dataset preparation and validation toolkit")]
#[command(version)]
pub struct Cli {
    /// Data directory holding the boundary datasets
    #[arg(long, global = true, env = "GEOPREP_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// Config file path (overrides auto-discovery)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Check if verbose mode is enabled (for early logging setup).
pub fn is_verbose() -> bool {
    std::env::args().any(|arg| arg == "-v" || arg == "--verbose")
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize the data directory layout and manifest
    Init,

    /// Fetch the mission location array embedded in the missions page
    Fetch {
        /// Page to fetch (defaults to the configured missions URL)
        #[arg(long)]
        url: Option<String>,
        /// Output file (defaults to globe_locations.json in the data dir)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Union country boundaries into a single border polygon
    Union {
        /// Countries to union, by Natural Earth NAME (defaults to the nine
        /// Baltic-bordering countries)
        #[arg(short = 'C', long = "country")]
        countries: Vec<String>,
        /// Input countries dataset (defaults to the Natural Earth admin-0 file)
        #[arg(short, long)]
        input: Option<PathBuf>,
        /// Output file (defaults to baltic_border_union.geojson)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Name property for the union feature
        #[arg(long, default_value = "Baltic Bordering Countries Union")]
        name: String,
    },

    /// Extract the enclosed sea polygon from the border union
    Extract {
        /// Input union dataset (defaults to baltic_border_union.geojson)
        #[arg(short, long)]
        input: Option<PathBuf>,
        /// Output file (defaults to test-data/baltic_sea_extracted.geojson)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// First closing point as "lon,lat" (default: near Skagen, Denmark)
        #[arg(long)]
        point1: Option<String>,
        /// Second closing point as "lon,lat" (default: near Göteborg, Sweden)
        #[arg(long)]
        point2: Option<String>,
        /// Name property for the extracted feature
        #[arg(long, default_value = "Baltic Sea (Polygon Closing Method)")]
        name: String,
    },

    /// Triangulate the union's main component with ear clipping
    Triangulate {
        /// Input union dataset (defaults to baltic_border_union.geojson)
        #[arg(short, long)]
        input: Option<PathBuf>,
        /// Output file (defaults to test-data/union_triangulated.geojson)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Validate datasets against the GeoJSON format contract
    Validate {
        /// Files to validate (defaults to every .geojson in the data dir)
        files: Vec<PathBuf>,
        /// Also flag tolerated deviations, e.g. elevation members
        #[arg(short, long)]
        strict: bool,
    },

    /// Show datasets, feature counts, and provenance
    Status,
}

/// Parse arguments, load settings, and run the selected command.
pub async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    if cli.verbose {
        tracing::debug!("verbose logging enabled");
    }
    let settings = load_settings(cli.config.as_deref(), cli.data_dir.as_deref())?;

    match cli.command {
        Commands::Init => init::cmd_init(&settings).await,
        Commands::Fetch { url, output } => fetch::cmd_fetch(&settings, url, output).await,
        Commands::Union {
            countries,
            input,
            output,
            name,
        } => union::cmd_union(&settings, &countries, input, output, &name).await,
        Commands::Extract {
            input,
            output,
            point1,
            point2,
            name,
        } => extract::cmd_extract(&settings, input, output, point1, point2, &name).await,
        Commands::Triangulate { input, output } => {
            triangulate::cmd_triangulate(&settings, input, output).await
        }
        Commands::Validate { files, strict } => {
            validate::cmd_validate(&settings, &files, strict).await
        }
        Commands::Status => status::cmd_status(&settings).await,
    }
}
