use std::collections::BTreeMap;
use std::fmt;
use std::io::Read;

use serde::Serialize;

use super::{DatasetError, FlatTableReader};

/// Aggregate view of a flattened table
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableSummary {
    /// Number of data rows
    pub timesteps: usize,
    /// Atoms per row
    pub atom_count: usize,
    /// Atom count per nuclear charge, taken from the first row
    pub composition: BTreeMap<i64, usize>,
    /// Smallest and largest energy
    pub energy_range: Option<(f64, f64)>,
}

impl TableSummary {
    /// Consume `reader`, summarizing every frame
    pub fn from_reader<R: Read>(reader: FlatTableReader<R>) -> Result<Self, DatasetError> {
        let mut summary = Self {
            timesteps: 0,
            atom_count: reader.layout().atom_count(),
            composition: BTreeMap::new(),
            energy_range: None,
        };

        for frame in reader {
            let frame = frame?;
            if summary.timesteps == 0 {
                for &z in &frame.nuclear_charges {
                    *summary.composition.entry(z).or_insert(0) += 1;
                }
            }
            summary.timesteps += 1;
            summary.energy_range = Some(match summary.energy_range {
                Some((lo, hi)) => (lo.min(frame.energy), hi.max(frame.energy)),
                None => (frame.energy, frame.energy),
            });
        }

        Ok(summary)
    }
}

impl fmt::Display for TableSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Timesteps: {}", self.timesteps)?;
        writeln!(f, "Atoms per timestep: {}", self.atom_count)?;
        let composition: Vec<String> = self
            .composition
            .iter()
            .map(|(z, n)| format!("Z={} x{}", z, n))
            .collect();
        writeln!(f, "Composition: {}", composition.join(", "))?;
        match self.energy_range {
            Some((lo, hi)) => write!(f, "Energy range: {} .. {}", lo, hi),
            None => write!(f, "Energy range: n/a"),
        }
    }
}
