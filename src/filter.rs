//! Legacy-field and hydrogen filtering
//!
//! Both filters are independent: legacy filtering looks only at field names,
//! hydrogen filtering only at the `nuclear_charges` contents. Applying them
//! in either order gives the same [`FilteredArchive`].

use log::debug;
use ndarray::Axis;
use serde::Serialize;

use crate::archive::{is_legacy_field, Archive, HYDROGEN_CHARGE};

/// Which parts of an archive to drop before flattening
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FilterOptions {
    /// Drop every field whose name carries the legacy prefix
    pub drop_legacy_fields: bool,
    /// Drop all per-atom data for atoms with nuclear charge 1
    pub drop_hydrogen: bool,
}

impl Default for FilterOptions {
    fn default() -> Self {
        Self {
            drop_legacy_fields: true,
            drop_hydrogen: true,
        }
    }
}

impl FilterOptions {
    /// Keep everything
    pub fn keep_all() -> Self {
        Self {
            drop_legacy_fields: false,
            drop_hydrogen: false,
        }
    }
}

/// An archive after filtering, with the mapping back to original atoms
#[derive(Debug, Clone, PartialEq)]
pub struct FilteredArchive {
    archive: Archive,
    original_indices: Vec<usize>,
    original_atom_count: usize,
    dropped_fields: Vec<String>,
}

impl FilteredArchive {
    /// Apply `options` to `archive`
    pub fn new(archive: Archive, options: FilterOptions) -> Self {
        let mut archive = archive;
        let original_atom_count = archive.atom_count();

        let dropped_fields = if options.drop_legacy_fields {
            drop_legacy_fields(&mut archive)
        } else {
            Vec::new()
        };

        let original_indices = if options.drop_hydrogen {
            drop_hydrogen(&mut archive)
        } else {
            (0..archive.atom_count()).collect()
        };

        debug!(
            "Filtered '{}': {} of {} atoms kept, {} legacy fields dropped",
            archive.name,
            original_indices.len(),
            original_atom_count,
            dropped_fields.len()
        );

        Self {
            archive,
            original_indices,
            original_atom_count,
            dropped_fields,
        }
    }

    pub fn archive(&self) -> &Archive {
        &self.archive
    }

    pub fn into_archive(self) -> Archive {
        self.archive
    }

    /// Index in the unfiltered archive of each surviving atom
    pub fn original_indices(&self) -> &[usize] {
        &self.original_indices
    }

    /// Number of atoms removed by hydrogen filtering
    pub fn dropped_atom_count(&self) -> usize {
        self.original_atom_count - self.original_indices.len()
    }

    /// Names of the legacy fields that were removed
    pub fn dropped_fields(&self) -> &[String] {
        &self.dropped_fields
    }

    pub fn atom_count(&self) -> usize {
        self.archive.atom_count()
    }

    pub fn timestep_count(&self) -> usize {
        self.archive.timestep_count()
    }
}

fn drop_legacy_fields(archive: &mut Archive) -> Vec<String> {
    let legacy: Vec<String> = archive.legacy_fields().map(str::to_string).collect();
    for name in &legacy {
        archive.auxiliary.remove(name);
    }
    legacy
}

/// Re-index the atom axis to non-hydrogen atoms; returns the kept indices
fn drop_hydrogen(archive: &mut Archive) -> Vec<usize> {
    let keep: Vec<usize> = archive
        .nuclear_charges
        .iter()
        .enumerate()
        .filter(|(_, &z)| z != HYDROGEN_CHARGE)
        .map(|(i, _)| i)
        .collect();

    if keep.len() == archive.atom_count() {
        return keep;
    }

    archive.nuclear_charges = archive.nuclear_charges.select(Axis(0), &keep);
    archive.coords = archive.coords.select(Axis(1), &keep);
    archive.forces = archive.forces.select(Axis(1), &keep);
    keep
}
