//! # trajflat - Flat Tables from Molecular-Dynamics Trajectory Archives
//!
//! `trajflat` converts per-molecule trajectory archives (NumPy `.npz` files
//! holding nuclear charges, coordinates, energies and forces, as in the
//! rMD17 benchmark) into wide, row-per-timestep CSV tables.
//!
//! ## Key Features
//!
//! - **Typed Archives**: The four required arrays are validated at load time
//!   into named, strongly typed fields; anything else is kept as an
//!   auxiliary field.
//!
//! - **Legacy Field Filtering**: Deprecated `old_`-prefixed duplicates can
//!   be dropped.
//!
//! - **Hydrogen Filtering**: All per-atom data for atoms with nuclear charge
//!   1 can be removed, consistently across charges, coordinates and forces.
//!
//! - **Deterministic Output**: The same archive and options always produce
//!   byte-identical tables.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use trajflat::pipeline::{ConversionConfig, Converter};
//!
//! let config = ConversionConfig {
//!     input_dir: "data/rmd17".into(),
//!     output_dir: "data/rmd17_cleaned".into(),
//!     ..Default::default()
//! };
//!
//! let summary = Converter::new(config).run()?;
//! println!(
//!     "Converted {} archives, skipped {}",
//!     summary.converted.len(),
//!     summary.skipped.len()
//! );
//! # Ok::<(), trajflat::pipeline::ConfigurationError>(())
//! ```
//!
//! ## Output Format
//!
//! One row per timestep. For a molecule with two surviving atoms:
//!
//! | Column | Type | Description |
//! |--------|------|-------------|
//! | timestep | Int | Timestep index, from 0 |
//! | energy | Float | Energy of the timestep |
//! | atom_0_charge | Int | Nuclear charge of atom 0 |
//! | atom_0_coord | List | `[x, y, z]` coordinate of atom 0 |
//! | atom_0_force | List | `[x, y, z]` force on atom 0 |
//! | atom_1_charge | Int | ... |
//! | atom_1_coord | List | ... |
//! | atom_1_force | List | ... |
//!
//! Atom indices are renumbered from 0 after filtering.
//!
//! Tables can be read back with [`dataset::FlatTableReader`], or from Python:
//!
//! ```python
//! import ast, pandas as pd
//! df = pd.read_csv("rmd17_aspirin.csv")
//! coords = df["atom_0_coord"].map(ast.literal_eval)
//! ```
//!
//! ## Architecture
//!
//! - [`archive`]: typed archive record, `.npz` loading and writing via `ndarray-npy`
//! - [`filter`]: legacy-field and hydrogen filtering
//! - [`table`]: row schema and flattening
//! - [`writer`]: delimited-text table writer
//! - [`dataset`]: reading flattened tables back
//! - [`pipeline`]: directory scan and batch conversion

#![deny(rustdoc::missing_crate_level_docs)]

pub mod archive;
pub mod dataset;
pub mod filter;
pub mod pipeline;
pub mod table;
pub mod writer;

/// Re-export commonly used types for convenience
pub mod prelude {
    pub use crate::archive::{Archive, FieldArray, LoadError, SaveError};
    pub use crate::dataset::{DatasetError, FlatTableReader, TableSummary, TimestepFrame};
    pub use crate::filter::{FilterOptions, FilteredArchive};
    pub use crate::pipeline::{
        BatchSummary, ConfigurationError, ConversionConfig, ConversionError, Converter,
        ProgressEvent,
    };
    pub use crate::table::{OutputTable, Row, RowSchema};
    pub use crate::writer::{TableWriter, WriteError, WriterConfig, WriterStats};
}
