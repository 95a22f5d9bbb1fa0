//! # Flattened Table Reader Module
//!
//! Reads the row-per-timestep tables produced by the
//! [`writer`](crate::writer) back into per-timestep frames, the shape most
//! training pipelines consume:
//!
//! ```text
//! timestep,energy,atom_0_charge,atom_0_coord,atom_0_force,...
//!     ↓
//! TimestepFrame { timestep, energy, nuclear_charges, coords, forces }
//! ```
//!
//! Atom columns are located by their `_charge`, `_coord` and `_force`
//! suffixes, in header order. List cells (`[x, y, z]`) are parsed into
//! `[f64; 3]`; a malformed cell is an error rather than being skipped.

mod error;
mod reader;
mod summary;


pub use error::DatasetError;
pub use reader::{parse_vector_cell, FlatTableReader, TableLayout, TimestepFrame};
pub use summary::TableSummary;
