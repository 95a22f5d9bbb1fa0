//! Wide-format (row-per-timestep) tables
//!
//! A [`RowSchema`] is built once per archive from the surviving atom count:
//!
//! ```text
//! timestep, energy, atom_0_charge, atom_0_coord, atom_0_force, atom_1_charge, ...
//! ```
//!
//! Coordinates and forces stay 3-vectors in a single cell rather than being
//! split into per-axis columns.

use ndarray::{ArrayView1, Axis};

use crate::filter::FilteredArchive;

/// Column of the timestep index
pub const TIMESTEP_COLUMN: &str = "timestep";
/// Column of the per-timestep energy
pub const ENERGY_COLUMN: &str = "energy";
/// Suffix of per-atom charge columns
pub const CHARGE_SUFFIX: &str = "_charge";
/// Suffix of per-atom coordinate columns
pub const COORD_SUFFIX: &str = "_coord";
/// Suffix of per-atom force columns
pub const FORCE_SUFFIX: &str = "_force";

/// Ordered column layout shared by every row of one table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowSchema {
    atom_count: usize,
}

impl RowSchema {
    pub fn new(atom_count: usize) -> Self {
        Self { atom_count }
    }

    pub fn atom_count(&self) -> usize {
        self.atom_count
    }

    pub fn column_count(&self) -> usize {
        2 + 3 * self.atom_count
    }

    /// Column names in output order
    pub fn column_names(&self) -> Vec<String> {
        let mut names = Vec::with_capacity(self.column_count());
        names.push(TIMESTEP_COLUMN.to_string());
        names.push(ENERGY_COLUMN.to_string());
        for i in 0..self.atom_count {
            names.push(format!("atom_{}{}", i, CHARGE_SUFFIX));
            names.push(format!("atom_{}{}", i, COORD_SUFFIX));
            names.push(format!("atom_{}{}", i, FORCE_SUFFIX));
        }
        names
    }
}

/// Per-atom cells of one row
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AtomCells {
    pub charge: i64,
    pub coord: [f64; 3],
    pub force: [f64; 3],
}

/// One timestep of the table
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    pub timestep: usize,
    pub energy: f64,
    pub atoms: Vec<AtomCells>,
}

/// Rows of one archive, in ascending timestep order
#[derive(Debug, Clone, PartialEq)]
pub struct OutputTable {
    pub name: String,
    pub schema: RowSchema,
    pub rows: Vec<Row>,
}

impl OutputTable {
    /// Expand a filtered archive into one row per timestep
    pub fn from_filtered(filtered: &FilteredArchive) -> Self {
        let archive = filtered.archive();
        let schema = RowSchema::new(archive.atom_count());

        let rows = archive
            .energies
            .iter()
            .enumerate()
            .map(|(t, &energy)| {
                let coords = archive.coords.index_axis(Axis(0), t);
                let forces = archive.forces.index_axis(Axis(0), t);
                let atoms = archive
                    .nuclear_charges
                    .iter()
                    .zip(coords.outer_iter().zip(forces.outer_iter()))
                    .map(|(&charge, (coord, force))| AtomCells {
                        charge,
                        coord: vector(coord),
                        force: vector(force),
                    })
                    .collect();
                Row {
                    timestep: t,
                    energy,
                    atoms,
                }
            })
            .collect();

        Self {
            name: archive.name.clone(),
            schema,
            rows,
        }
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}

fn vector(row: ArrayView1<f64>) -> [f64; 3] {
    [row[0], row[1], row[2]]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::archive::tests::sample_archive;
    use crate::filter::FilterOptions;

    fn cell(array: &ndarray::Array3<f64>, t: usize, i: usize) -> [f64; 3] {
        vector(array.index_axis(Axis(0), t).index_axis(Axis(0), i))
    }

    #[test]
    fn test_schema_columns() {
        let schema = RowSchema::new(2);
        assert_eq!(schema.column_count(), 8);
        assert_eq!(
            schema.column_names().join(","),
            "timestep,energy,atom_0_charge,atom_0_coord,atom_0_force,atom_1_charge,atom_1_coord,atom_1_force"
        );
    }

    #[test]
    fn test_empty_schema() {
        let schema = RowSchema::new(0);
        assert_eq!(schema.column_names(), vec!["timestep", "energy"]);
    }

    #[test]
    fn test_rows_follow_timesteps() {
        let archive = sample_archive(&[6, 1, 8], 4);
        let filtered = FilteredArchive::new(archive.clone(), FilterOptions::keep_all());
        let table = OutputTable::from_filtered(&filtered);

        assert_eq!(table.row_count(), 4);
        for (t, row) in table.rows.iter().enumerate() {
            assert_eq!(row.timestep, t);
            assert_eq!(row.energy, archive.energies[t]);
            assert_eq!(row.atoms.len(), 3);
            assert_eq!(row.atoms[2].charge, 8);
            assert_eq!(row.atoms[2].coord, cell(&archive.coords, t, 2));
            assert_eq!(row.atoms[2].force, cell(&archive.forces, t, 2));
        }
    }

    #[test]
    fn test_hydrogen_free_rows() {
        let archive = sample_archive(&[1, 6, 1, 8], 2);
        let filtered = FilteredArchive::new(archive.clone(), FilterOptions::default());
        let table = OutputTable::from_filtered(&filtered);

        assert_eq!(table.schema.atom_count(), 2);
        let row = &table.rows[1];
        assert_eq!(row.atoms[0].charge, 6);
        assert_eq!(row.atoms[0].coord, cell(&archive.coords, 1, 1));
        assert_eq!(row.atoms[1].charge, 8);
        assert_eq!(row.atoms[1].force, cell(&archive.forces, 1, 3));
    }

    #[test]
    fn test_all_hydrogen_rows_keep_energy() {
        let archive = sample_archive(&[1, 1], 3);
        let filtered = FilteredArchive::new(archive, FilterOptions::default());
        let table = OutputTable::from_filtered(&filtered);

        assert_eq!(table.row_count(), 3);
        assert!(table.rows.iter().all(|row| row.atoms.is_empty()));
        assert_eq!(table.schema.column_count(), 2);
    }
}
