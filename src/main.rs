//! # trajflat
//!
//! A command-line tool for flattening molecular-dynamics trajectory archives
//! (`.npz`) into row-per-timestep tables.
//!
//! ## Usage
//!
//! ```bash
//! # Convert data/rmd17/*.npz into data/rmd17_cleaned/*.csv
//! trajflat convert
//!
//! # Keep hydrogens, custom directories
//! trajflat convert -i rmd17/npz_data -o cleaned --keep-hydrogen
//!
//! # Inspect an archive or a converted table
//! trajflat info rmd17_aspirin.npz
//! ```

use anyhow::Result;
use clap::Parser;

mod cli;

use cli::Cli;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    cli::init_logging(cli.verbosity());

    cli::dispatch(cli)
}
