//! # Bulkflow CLI
//!
//! Command line front end for the bulkflow calculation engine.
//!
//! ```text
//! bulkflow list
//! bulkflow run gravity-flow '{"aperture_size_mm": 150, "bulk_density": 50}'
//! bulkflow validate spout_requirements @request.json
//! bulkflow convert 50 bulk_density --to metric
//! bulkflow materials --category food
//! ```
//!
//! Results are printed to stdout as JSON; log output goes to stderr and is
//! raised with `-v` (info), `-vv` (debug) or `-vvv` (trace).

use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use log::{info, LevelFilter};
use serde_json::{json, Value};

use bulkflow_core::materials::{self, Material};
use bulkflow_core::registry;
use bulkflow_core::units::{Measurement, QuantityKind, UnitSystem};
use bulkflow_core::Settings;

#[derive(Parser)]
#[command(name = "bulkflow")]
#[command(about = "Bulk material handling calculators", long_about = None)]
struct Cli {
    /// Settings file (JSON)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Increase log verbosity (repeatable)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List every calculator
    List,

    /// Run a calculator on a JSON request
    Run {
        /// Calculator id (e.g., "gravity_flow" or "gravity-flow")
        calculator: String,

        /// JSON request, or @path to read it from a file
        input: String,
    },

    /// Check a JSON request without computing
    Validate {
        /// Calculator id
        calculator: String,

        /// JSON request, or @path to read it from a file
        input: String,
    },

    /// Convert a value between unit systems
    Convert {
        #[arg(allow_negative_numbers = true)]
        value: f64,

        /// Quantity kind (e.g., length, bulk_density, temperature)
        kind: QuantityKind,

        /// Target unit system; the value is taken to be in the other one
        #[arg(long)]
        to: UnitSystem,
    },

    /// Browse the bulk materials catalog
    Materials {
        /// Only materials in this category
        #[arg(long)]
        category: Option<String>,

        /// Only materials whose name contains this text
        #[arg(long)]
        search: Option<String>,
    },
}

// ============================================================================
// Logging
// ============================================================================

fn level_for(verbose: u8) -> LevelFilter {
    match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

fn logger_builder(verbose: u8) -> env_logger::Builder {
    let mut builder = env_logger::Builder::new();
    builder
        .filter_level(level_for(verbose))
        .target(env_logger::Target::Stderr);
    builder
}

fn init_logging(verbose: u8) {
    logger_builder(verbose).init();
}

// ============================================================================
// Commands
// ============================================================================

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let outcome = load_settings(cli.config.as_deref()).and_then(|settings| match cli.command {
        Commands::List => list_calculators(&settings),
        Commands::Run { calculator, input } => run_calculator(&calculator, &input, &settings),
        Commands::Validate { calculator, input } => validate_request(&calculator, &input, &settings),
        Commands::Convert { value, kind, to } => convert_value(value, kind, to),
        Commands::Materials { category, search } => {
            list_materials(category.as_deref(), search.as_deref(), &settings)
        }
    });

    if let Err(e) = outcome {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn load_settings(path: Option<&Path>) -> Result<Settings, Box<dyn Error>> {
    match path {
        Some(path) => {
            info!("loading settings from {}", path.display());
            Ok(Settings::load(path)?)
        }
        None => Ok(Settings::default()),
    }
}

/// Parse a request given inline or as `@path`
fn read_request(input: &str) -> Result<Value, Box<dyn Error>> {
    let text = match input.strip_prefix('@') {
        Some(path) => fs::read_to_string(path).map_err(|e| format!("cannot read {}: {}", path, e))?,
        None => input.to_string(),
    };
    Ok(serde_json::from_str(&text)?)
}

fn list_calculators(settings: &Settings) -> Result<(), Box<dyn Error>> {
    let calculators = registry::all();
    println!("{}", settings.render(&calculators)?);
    Ok(())
}

fn run_calculator(calculator: &str, input: &str, settings: &Settings) -> Result<(), Box<dyn Error>> {
    let request = read_request(input)?;
    let response = registry::run(calculator, &request, settings)?;
    println!("{}", settings.render(&response)?);
    Ok(())
}

fn validate_request(calculator: &str, input: &str, settings: &Settings) -> Result<(), Box<dyn Error>> {
    let request = read_request(input)?;
    let report = registry::validate(calculator, &request, settings)?;

    let summary = json!({
        "calculator": registry::get(calculator)?.info().id,
        "valid": report.is_valid(),
        "violations": report.violations(),
    });
    println!("{}", settings.render(&summary)?);

    if !report.is_valid() {
        std::process::exit(2);
    }
    Ok(())
}

fn convert_value(value: f64, kind: QuantityKind, to: UnitSystem) -> Result<(), Box<dyn Error>> {
    let from = match to {
        UnitSystem::Metric => UnitSystem::Imperial,
        UnitSystem::Imperial => UnitSystem::Metric,
    };
    let source = Measurement::new(value, from, kind);
    let converted = source.in_system(to)?;
    println!("{} = {}", source, converted);
    Ok(())
}

fn list_materials(category: Option<&str>, search: Option<&str>, settings: &Settings) -> Result<(), Box<dyn Error>> {
    let selected = select_materials(category, search);
    println!("{}", settings.render(&selected)?);
    Ok(())
}

fn select_materials(category: Option<&str>, search: Option<&str>) -> Vec<&'static Material> {
    let mut selected: Vec<&'static Material> = match category {
        Some(category) => materials::by_category(category),
        None => materials::all().iter().collect(),
    };
    if let Some(query) = search {
        let matches = materials::search(query);
        selected.retain(|material| matches.iter().any(|m| m.name == material.name));
    }
    selected
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_run() {
        let cli = Cli::try_parse_from(["bulkflow", "-vv", "run", "drag-slide", "{}"]).unwrap();
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Commands::Run { calculator, input } => {
                assert_eq!(calculator, "drag-slide");
                assert_eq!(input, "{}");
            }
            _ => panic!("expected run"),
        }
    }

    #[test]
    fn test_parse_convert() {
        let cli = Cli::try_parse_from(["bulkflow", "convert", "50", "bulk_density", "--to", "metric"]).unwrap();
        match cli.command {
            Commands::Convert { value, kind, to } => {
                assert_eq!(value, 50.0);
                assert_eq!(kind, QuantityKind::BulkDensity);
                assert_eq!(to, UnitSystem::Metric);
            }
            _ => panic!("expected convert"),
        }
        assert!(Cli::try_parse_from(["bulkflow", "convert", "1", "furlongs", "--to", "metric"]).is_err());
    }

    #[test]
    fn test_read_inline_request() {
        let value = read_request(r#"{"x_value": 3}"#).unwrap();
        assert_eq!(value["x_value"], 3);
        assert!(read_request("not json").is_err());
        assert!(read_request("@/nonexistent/request.json").is_err());
    }

    #[test]
    fn test_verbosity_levels() {
        assert_eq!(level_for(0), LevelFilter::Warn);
        assert_eq!(level_for(1), LevelFilter::Info);
        assert_eq!(level_for(5), LevelFilter::Trace);
    }

    #[test]
    fn test_logger_filter_follows_verbosity() {
        assert_eq!(logger_builder(0).build().filter(), LevelFilter::Warn);
        assert_eq!(logger_builder(2).build().filter(), LevelFilter::Debug);
    }

    #[test]
    fn test_select_materials() {
        let pellets = select_materials(Some("biomass"), Some("pellet"));
        assert_eq!(pellets.len(), 1);
        assert_eq!(pellets[0].name, "Wood Pellets");
        assert_eq!(select_materials(None, None).len(), 20);
    }
}
