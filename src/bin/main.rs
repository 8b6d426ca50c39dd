//! mantis-gis CLI - Inspect spatial capability tables
//!
//! Usage:
//!   mantis-gis inspect --server-version <version> [--format text|json]
//!   mantis-gis predicate --server-version <version> <name>
//!   mantis-gis function --connection <name> <name>
//!
//! Examples:
//!   mantis-gis inspect --server-version 5.7.4
//!   mantis-gis predicate --server-version 8.0.32-log equals
//!   mantis-gis function --config mantis-gis.toml --connection legacy Length

use clap::{Args, Parser, Subcommand, ValueEnum};
use mantis_gis::config::Settings;
use mantis_gis::sql::dialect::{CapabilityReport, SpatialBackend};
use mantis_gis::field::GeometryType;
use mantis_gis::SpatialConnection;
use serde::Serialize;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "mantis-gis")]
#[command(about = "mantis-gis - Version-aware spatial capability tables for SQL backends")]
#[command(version)]
struct Cli {
    /// Path to the config file (defaults to MANTIS_GIS_CONFIG or ./mantis-gis.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct Target {
    /// Server version string, e.g. 5.7.22-log
    #[arg(short = 's', long, conflicts_with = "connection")]
    server_version: Option<String>,

    /// Named connection from the config file
    #[arg(short, long)]
    connection: Option<String>,

    /// Database driver when using --server-version
    #[arg(short, long, default_value = "mysql")]
    driver: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the full capability table
    Inspect {
        #[command(flatten)]
        target: Target,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,
    },

    /// Resolve the SQL function for a spatial predicate
    Predicate {
        #[command(flatten)]
        target: Target,

        /// Predicate lookup name (contains, within, equals, ...)
        name: String,
    },

    /// Resolve the SQL name for a spatial function
    Function {
        #[command(flatten)]
        target: Target,

        /// Abstract function name (Length, AsGeoJSON, ...)
        name: String,
    },
}

#[derive(Clone, ValueEnum)]
enum OutputFormat {
    /// Human-readable table
    Text,
    /// JSON document
    Json,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match &cli.command {
        Commands::Inspect { target, format } => {
            open_target(target, cli.config.as_ref()).and_then(|conn| cmd_inspect(&conn, format))
        }
        Commands::Predicate { target, name } => {
            open_target(target, cli.config.as_ref()).and_then(|conn| cmd_predicate(&conn, name))
        }
        Commands::Function { target, name } => {
            open_target(target, cli.config.as_ref()).and_then(|conn| cmd_function(&conn, name))
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("Error: {}", message);
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn open_target(target: &Target, config: Option<&PathBuf>) -> Result<SpatialConnection, String> {
    if let Some(version) = &target.server_version {
        let backend = SpatialBackend::from_str(&target.driver)
            .ok_or_else(|| format!("Unsupported driver: {}", target.driver))?;
        return SpatialConnection::open(version.as_str(), backend).map_err(|e| e.to_string());
    }

    let settings = match config {
        Some(path) => Settings::from_file(path),
        None => Settings::load(),
    }
    .map_err(|e| e.to_string())?;

    let connection = match &target.connection {
        Some(name) => settings.get_connection(name).map_err(|e| e.to_string())?,
        None => settings
            .default_connection()
            .map(|(_, conn)| conn)
            .ok_or("No --server-version given and no connections configured")?,
    };

    settings.open(connection).map_err(|e| e.to_string())
}

/// Capability table plus the connection-level geometry defaults.
#[derive(Serialize)]
struct InspectOutput {
    #[serde(flatten)]
    report: CapabilityReport,
    default_srid: u32,
    geometry_placeholder: String,
}

fn cmd_inspect(conn: &SpatialConnection, format: &OutputFormat) -> Result<(), String> {
    let field = conn.geometry_field("geom", GeometryType::Geometry);
    let output = InspectOutput {
        report: CapabilityReport::from_dialect(conn.ops()),
        default_srid: conn.default_srid(),
        geometry_placeholder: conn.ops().geometry_placeholder(&field),
    };
    match format {
        OutputFormat::Text => {
            println!("{}", output.report);
            println!("Default SRID: {}", output.default_srid);
            println!("Placeholder: {}", output.geometry_placeholder);
        }
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&output).map_err(|e| e.to_string())?;
            println!("{}", json);
        }
    }
    Ok(())
}

fn cmd_predicate(conn: &SpatialConnection, name: &str) -> Result<(), String> {
    let func = conn.ops().predicate_function(name).map_err(|e| e.to_string())?;
    println!("{}", func);
    Ok(())
}

fn cmd_function(conn: &SpatialConnection, name: &str) -> Result<(), String> {
    let resolved = conn.ops().resolve_function_name(name).map_err(|e| e.to_string())?;
    println!("{}", resolved);
    Ok(())
}
