use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod config;
mod convert;
mod demo;
mod info;

/// trajflat - Flatten MD trajectory archives into per-timestep tables
#[derive(Parser)]
#[command(name = "trajflat")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Verbosity level (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert every .npz archive in a directory to a CSV table
    Convert {
        /// Directory holding the .npz archives (default: data/rmd17)
        #[arg(short, long, value_name = "DIR")]
        input_dir: Option<PathBuf>,

        /// Directory for the tables, created if missing (default: data/rmd17_cleaned)
        #[arg(short, long, value_name = "DIR")]
        output_dir: Option<PathBuf>,

        /// Drop legacy old_* fields (default)
        #[arg(long, overrides_with = "keep_legacy")]
        drop_legacy: bool,

        /// Keep legacy old_* fields
        #[arg(long, overrides_with = "drop_legacy")]
        keep_legacy: bool,

        /// Drop hydrogen atoms (default)
        #[arg(long, overrides_with = "keep_hydrogen")]
        drop_hydrogen: bool,

        /// Keep hydrogen atoms
        #[arg(long, overrides_with = "drop_hydrogen")]
        keep_hydrogen: bool,

        /// Write tab-separated .tsv tables instead of CSV
        #[arg(long, overrides_with = "csv")]
        tsv: bool,

        /// Write comma-separated .csv tables (default)
        #[arg(long, overrides_with = "tsv")]
        csv: bool,

        /// Load settings from a TOML config file
        #[arg(long, value_name = "FILE")]
        config: Option<PathBuf>,

        /// Write a JSON report of converted and skipped archives
        #[arg(long, value_name = "FILE")]
        report: Option<PathBuf>,
    },

    /// Display information about an .npz archive or a flattened table
    Info {
        /// Input .npz, .csv or .tsv file
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },

    /// Generate a synthetic trajectory archive for testing
    Demo {
        /// Output .npz path
        #[arg(value_name = "OUTPUT", default_value = "demo_ethanol.npz")]
        output: PathBuf,

        /// Number of timesteps to generate
        #[arg(short, long, default_value_t = 10)]
        timesteps: usize,

        /// Omit the legacy old_* fields
        #[arg(long)]
        no_legacy: bool,

        /// Deflate archive members (like numpy.savez_compressed)
        #[arg(long)]
        compressed: bool,
    },
}

impl Cli {
    pub fn verbosity(&self) -> u8 {
        self.verbose
    }
}

pub fn init_logging(verbosity: u8) {
    let log_level = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();
}

/// Collapse an on/off flag pair; `None` when neither was given
fn switch(on: bool, off: bool) -> Option<bool> {
    match (on, off) {
        (true, _) => Some(true),
        (_, true) => Some(false),
        _ => None,
    }
}

pub fn dispatch(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Convert {
            input_dir,
            output_dir,
            drop_legacy,
            keep_legacy,
            drop_hydrogen,
            keep_hydrogen,
            tsv,
            csv,
            config,
            report,
        } => convert::run(convert::ConvertArgs {
            input_dir,
            output_dir,
            drop_legacy: switch(drop_legacy, keep_legacy),
            drop_hydrogen: switch(drop_hydrogen, keep_hydrogen),
            tsv: switch(tsv, csv),
            config,
            report,
        }),
        Commands::Info { file } => info::run(file),
        Commands::Demo {
            output,
            timesteps,
            no_legacy,
            compressed,
        } => demo::run(output, timesteps, !no_legacy, compressed),
    }
}
