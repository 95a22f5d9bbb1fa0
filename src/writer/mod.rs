//! # Table Writer Module
//!
//! Serializes an [`OutputTable`](crate::table::OutputTable) as delimited text:
//! a header row with the column names, then one line per timestep.
//!
//! ## Cell Format
//!
//! - `timestep` and charges are written as integers
//! - `energy` is written as a float in shortest round-trip form (`-1.0`, `2.5e-07`)
//! - Coordinates and forces are written as one list cell, `[x, y, z]`,
//!   which the CSV layer quotes because it contains the delimiter
//!
//! Output is deterministic: the same table always produces the same bytes.
//!
//! ## Example
//!
//! ```rust,no_run
//! use trajflat::archive::Archive;
//! use trajflat::filter::{FilterOptions, FilteredArchive};
//! use trajflat::table::OutputTable;
//! use trajflat::writer::{TableWriter, WriterConfig};
//!
//! let archive = Archive::open("rmd17_ethanol.npz")?;
//! let filtered = FilteredArchive::new(archive, FilterOptions::default());
//! let table = OutputTable::from_filtered(&filtered);
//!
//! let mut writer = TableWriter::create("rmd17_ethanol.csv", WriterConfig::default())?;
//! let stats = writer.write_table(&table)?;
//! writer.finish()?;
//! println!("{}", stats);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod config;
mod error;
mod format;
mod stats;
mod writer_impl;


pub use config::WriterConfig;
pub use error::WriteError;
pub use format::{format_float, format_vector};
pub use stats::WriterStats;
pub use writer_impl::{write_table_file, TableWriter};
