//! crudforge CLI - Scaffold generator for Laravel CRUD slices
//!
//! Commands:
//! - `crudforge check` - Load and resolve a schema, print a summary
//! - `crudforge show` - Print the resolved schema as JSON
//! - `crudforge routes` - Print the generated route file
//! - `crudforge generate` - Write (or list) every generated file

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, fmt};

mod config;
mod generate;
mod inspect;

use config::CliConfig;

#[derive(Parser)]
#[command(name = "crudforge")]
#[command(author, version, about = "Schema-driven CRUD scaffold generator", long_about = None)]
struct Cli {
    /// Path to crudforge.toml (default: ./crudforge.toml when present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log at debug level unless RUST_LOG is set
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a schema and summarize its tables
    Check {
        /// Root schema file (default: `schema` from crudforge.toml)
        schema: Option<PathBuf>,
    },

    /// Print the resolved schema as JSON
    Show {
        /// Root schema file (default: `schema` from crudforge.toml)
        schema: Option<PathBuf>,
    },

    /// Print the generated route file
    Routes {
        /// Root schema file (default: `schema` from crudforge.toml)
        schema: Option<PathBuf>,
    },

    /// Generate every artifact
    Generate {
        /// Root schema file (default: `schema` from crudforge.toml)
        schema: Option<PathBuf>,

        /// Output directory; without one the files are only listed
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn init_logging(level: &str, verbose: bool) {
    let default = if verbose { "debug" } else { level };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let cwd = std::env::current_dir().context("Failed to read current directory")?;
    let config = CliConfig::discover(cli.config.as_deref(), &cwd)?;
    init_logging(&config.log_level, cli.verbose);

    match cli.command {
        Commands::Check { schema } => {
            inspect::check(&config.schema_path(schema)?)?;
        }
        Commands::Show { schema } => {
            inspect::show(&config.schema_path(schema)?)?;
        }
        Commands::Routes { schema } => {
            inspect::routes(&config.schema_path(schema)?)?;
        }
        Commands::Generate { schema, output } => {
            generate::run(&config.schema_path(schema)?, config.output_dir(output))?;
        }
    }

    Ok(())
}
