//! Command-line front end for the cargo pickup planner.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cargo_planner::config::PlannerConfig;
use cargo_planner::demand::load_demand;
use cargo_planner::index::SupplyFilters;
use cargo_planner::models::Coordinates;
use cargo_planner::planner::{HomeSpec, PlanRequest, Planner};

#[derive(Parser)]
#[command(name = "cargo-planner")]
#[command(about = "Plan capacity-bounded pickup runs for a list of needed goods")]
struct Cli {
    /// JSON configuration file (defaults and CARGO_PLANNER_* variables otherwise)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Path to the system catalog JSON
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    /// Path to the tab-delimited commodity affinity table
    #[arg(long, global = true)]
    affinity: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Plan pickup routes for a demand CSV
    Plan {
        /// CSV with Commodity and QuantityNeeded columns
        #[arg(short, long)]
        needs: PathBuf,

        /// Cargo capacity per load (non-positive values use the default)
        #[arg(short, long, allow_negative_numbers = true)]
        capacity: Option<i64>,

        /// Maximum distance of a single pickup leg (non-positive values use the default)
        #[arg(short, long, allow_negative_numbers = true)]
        max_range: Option<f64>,

        /// Home system name
        #[arg(long, conflicts_with = "coords")]
        home: Option<String>,

        /// Home coordinates
        #[arg(long, num_args = 3, value_names = ["X", "Y", "Z"], allow_negative_numbers = true)]
        coords: Option<Vec<f64>>,

        /// Include carriers and other large-hull-only locations
        #[arg(long)]
        allow_large_hulls: bool,

        /// Include locations without a large landing pad
        #[arg(long)]
        any_pad: bool,

        /// Pretty-print the plan JSON
        #[arg(long)]
        pretty: bool,
    },

    /// Search systems by name
    Search {
        /// Case-insensitive name fragment
        query: String,

        /// Maximum number of results
        #[arg(short, long, default_value = "10")]
        limit: usize,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => PlannerConfig::from_json_file(path)
            .with_context(|| format!("loading configuration from {}", path.display()))?,
        None => PlannerConfig::from_env()?,
    };
    if let Some(path) = cli.catalog {
        config.catalog_path = path;
    }
    if let Some(path) = cli.affinity {
        config.affinity_path = path;
    }

    let planner = Planner::from_config(&config);

    match cli.command {
        Commands::Plan {
            needs,
            capacity,
            max_range,
            home,
            coords,
            allow_large_hulls,
            any_pad,
            pretty,
        } => {
            let demand = load_demand(&needs)?;

            let home = match (coords.as_deref(), home) {
                (Some([x, y, z]), _) => HomeSpec::Coordinates(Coordinates::new(*x, *y, *z)),
                (_, Some(name)) => HomeSpec::Named(name),
                _ => HomeSpec::Default,
            };
            let filters = SupplyFilters::new(
                config.skip_large_hulls_default && !allow_large_hulls,
                config.large_pad_only_default && !any_pad,
            );

            let request = PlanRequest::new(demand, &config)
                .with_capacity(config.cargo_capacity_or_default(capacity))
                .with_max_leg_distance(config.max_leg_distance_or_default(max_range))
                .with_home(home)
                .with_filters(filters);

            let plan = planner.plan(request)?;
            let json = if pretty {
                serde_json::to_string_pretty(&plan)?
            } else {
                serde_json::to_string(&plan)?
            };
            println!("{json}");
        }

        Commands::Search { query, limit } => {
            let matches = planner.search_systems(&query, limit);
            if matches.is_empty() {
                println!("No systems match \"{query}\"");
            }
            for m in matches {
                println!(
                    "{:<30} ({:.2}, {:.2}, {:.2})",
                    m.name, m.coords.x, m.coords.y, m.coords.z
                );
            }
        }
    }

    Ok(())
}
