mod commands;
mod progress;
mod render;
mod utils;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use vcal2ics_core::ConverterConfig;

#[derive(Parser)]
#[command(name = "vcal2ics")]
#[command(about = "Convert legacy vCalendar exports into iCalendar files")]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Log instead of drawing a progress bar
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Config file to use instead of ~/.config/vcal2ics/config.toml
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert every event into a single calendar file
    Convert {
        /// vCalendar export to read
        input: PathBuf,

        /// Calendar file to write ("-" for stdout)
        #[arg(short, long, default_value = "output.ics")]
        output: PathBuf,
    },
    /// Write one calendar file per event
    Split {
        /// vCalendar export to read
        input: PathBuf,

        /// Directory for the event files (created if missing)
        #[arg(short, long, default_value = "events")]
        dir: PathBuf,
    },
    /// Show the config file location and effective settings
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.verbose)?;

    let config = ConverterConfig::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Convert { input, output } => {
            commands::convert::run(&config, &input, &output, cli.quiet)
        }
        Commands::Split { input, dir } => commands::split::run(&config, &input, &dir, cli.quiet),
        Commands::Config => commands::config::run(&config, cli.config.as_deref()),
    }
}

/// Log to stderr so `convert -o -` output stays clean. `RUST_LOG` wins over `-v`.
fn init_tracing(verbose: u8) -> Result<()> {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .context("Invalid log filter")?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    Ok(())
}
