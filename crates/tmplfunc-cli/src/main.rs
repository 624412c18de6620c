use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tmplfunc_runtime::Operation;
use tracing_subscriber::EnvFilter;

mod commands;
mod config;

use config::{Config, OutputFormat};

/// Higher-order template functions from the command line.
///
/// Runs map, filter, find and findIndex over an array of JSON values using
/// the built-in demo functions (inc, odd, false).
///
/// EXAMPLES:
///     tmplfunc apply map inc 1 2 3 4        Prints [2, 3, 4, 5]
///     tmplfunc apply filter odd 1 2 3 4     Prints [1, 3]
///     tmplfunc apply findIndex false 1 2    Prints -1
///     tmplfunc list                         Show registered functions
///
/// ENVIRONMENT VARIABLES:
///     TMPLFUNC_OUTPUT   Output format, 'text' or 'json'
///     TMPLFUNC_LOG      Tracing filter (default: warn)
///     TMPLFUNC_UNTYPED  Set to '1' to load input arrays as any[]
#[derive(Parser)]
#[command(name = "tmplfunc")]
#[command(version)]
#[command(propagate_version = true)]
struct Cli {
    /// Path to a configuration file (default: ./tmplfunc.toml if present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Tracing filter directive, e.g. 'debug' or 'tmplfunc_runtime=trace'
    #[arg(long, global = true)]
    log: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Apply an operation to an array
    ///
    /// Builds the input array from the positional values (each parsed as a
    /// JSON literal, falling back to a string) or from a JSON file, then runs
    /// the operation with the named function. Arrays whose items share a type
    /// are typed (e.g. int[]); mixed arrays are any[].
    ///
    /// EXAMPLES:
    ///     tmplfunc apply map odd 1 2 3             Prints [true, false, true]
    ///     tmplfunc apply find odd --data in.json   Read input from a file
    ///     tmplfunc apply map inc 1 2 --json        Prints [2,3]
    ///     tmplfunc apply map inc 1 x --untyped     Fails on item 1
    #[command(visible_alias = "a")]
    Apply {
        /// Operation: map, filter, find or findIndex
        op: Operation,
        /// Function name: inc, odd or false
        func: String,
        /// Input values
        #[arg(conflicts_with = "data", allow_negative_numbers = true)]
        values: Vec<String>,
        /// Read the input from a JSON file
        #[arg(long, short = 'd')]
        data: Option<PathBuf>,
        /// Load input arrays as any[]
        #[arg(long)]
        untyped: bool,
        /// Output the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// List the registered functions and their signatures
    ///
    /// EXAMPLES:
    ///     tmplfunc list           Table of names and signatures
    ///     tmplfunc list --json    Same, as JSON
    #[command(visible_alias = "ls")]
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

fn init_logging(filter: &str) {
    let filter = EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new(config::DEFAULT_LOG));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let mut cli_config = Config::load(cli.config.as_deref()).context("Failed to load configuration")?;

    // Command-line flags override file and environment
    if let Some(log) = cli.log {
        cli_config.log = log;
    }
    init_logging(&cli_config.log);
    tracing::debug!(?cli_config, "configuration loaded");

    match cli.command {
        Commands::Apply {
            op,
            func,
            values,
            data,
            untyped,
            json,
        } => {
            let args = commands::apply::ApplyArgs {
                op,
                func,
                values,
                data,
                untyped: untyped || cli_config.untyped,
                output: if json {
                    OutputFormat::Json
                } else {
                    cli_config.output
                },
            };
            commands::apply::run(&args)?;
        }
        Commands::List { json } => {
            let output = if json {
                OutputFormat::Json
            } else {
                cli_config.output
            };
            commands::list::run(output)?;
        }
    }

    Ok(())
}
