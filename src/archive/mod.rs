//! # Trajectory Archive Module
//!
//! Typed access to molecular-dynamics trajectory archives stored as NumPy
//! `.npz` files (ZIP containers of `.npy` members), as distributed with the
//! rMD17 benchmark.
//!
//! ## Archive Layout
//!
//! ```text
//! {molecule}.npz (ZIP archive)
//! ├── nuclear_charges.npy   # (atoms,)            integer
//! ├── coords.npy            # (timesteps, atoms, 3) float
//! ├── energies.npy          # (timesteps,)        float
//! ├── forces.npy            # (timesteps, atoms, 3) float
//! └── old_*.npy             # legacy duplicates (optional)
//! ```
//!
//! Any member besides the four canonical fields is kept in
//! [`Archive::auxiliary`]. Members whose name starts with [`LEGACY_PREFIX`]
//! are legacy fields.
//!
//! ## Example
//!
//! ```rust,no_run
//! use trajflat::archive::Archive;
//!
//! let archive = Archive::open("data/rmd17/rmd17_aspirin.npz")?;
//! println!(
//!     "{}: {} atoms over {} timesteps",
//!     archive.name,
//!     archive.atom_count(),
//!     archive.timestep_count()
//! );
//! # Ok::<(), trajflat::archive::LoadError>(())
//! ```

mod error;
mod field;
mod open;
mod write;


pub use error::{LoadError, SaveError};
pub use field::FieldArray;
pub use open::read_members;

use std::collections::BTreeMap;

use ndarray::{Array1, Array3, Ix3};

/// Name prefix marking deprecated duplicate fields
pub const LEGACY_PREFIX: &str = "old_";

/// Field name of the per-atom nuclear charges
pub const NUCLEAR_CHARGES: &str = "nuclear_charges";
/// Field name of the per-timestep atom coordinates
pub const COORDS: &str = "coords";
/// Field name of the per-timestep energies
pub const ENERGIES: &str = "energies";
/// Field name of the per-timestep atom forces
pub const FORCES: &str = "forces";

/// The fields every archive must contain
pub const REQUIRED_FIELDS: [&str; 4] = [NUCLEAR_CHARGES, COORDS, ENERGIES, FORCES];

/// Nuclear charge of hydrogen
pub const HYDROGEN_CHARGE: i64 = 1;

/// Whether `name` marks a legacy field
pub fn is_legacy_field(name: &str) -> bool {
    name.starts_with(LEGACY_PREFIX)
}

/// One molecule's trajectory, validated at load time
#[derive(Debug, Clone, PartialEq)]
pub struct Archive {
    /// Archive base name (file stem)
    pub name: String,
    /// Nuclear charge of each atom, `(atoms,)`
    pub nuclear_charges: Array1<i64>,
    /// Atom coordinates, `(timesteps, atoms, 3)`
    pub coords: Array3<f64>,
    /// Energy of each timestep, `(timesteps,)`
    pub energies: Array1<f64>,
    /// Atom forces, `(timesteps, atoms, 3)`
    pub forces: Array3<f64>,
    /// Every other member, including legacy fields
    pub auxiliary: BTreeMap<String, FieldArray>,
}

impl Archive {
    pub fn atom_count(&self) -> usize {
        self.nuclear_charges.len()
    }

    pub fn timestep_count(&self) -> usize {
        self.energies.len()
    }

    /// Number of atoms with the hydrogen nuclear charge
    pub fn hydrogen_count(&self) -> usize {
        self.nuclear_charges
            .iter()
            .filter(|&&z| z == HYDROGEN_CHARGE)
            .count()
    }

    /// Names of the auxiliary fields carrying the legacy prefix
    pub fn legacy_fields(&self) -> impl Iterator<Item = &str> {
        self.auxiliary
            .keys()
            .map(String::as_str)
            .filter(|name| is_legacy_field(name))
    }

    /// Canonical field names followed by auxiliary field names
    pub fn field_names(&self) -> Vec<&str> {
        REQUIRED_FIELDS
            .iter()
            .copied()
            .chain(self.auxiliary.keys().map(String::as_str))
            .collect()
    }

    /// Build an archive from decoded members, validating the canonical fields
    pub fn from_fields(
        name: impl Into<String>,
        mut fields: BTreeMap<String, FieldArray>,
    ) -> Result<Self, LoadError> {
        let mut take = |field: &str| {
            fields
                .remove(field)
                .ok_or_else(|| LoadError::MissingField(field.to_string()))
        };
        let charges = take(NUCLEAR_CHARGES)?;
        let coords = take(COORDS)?;
        let energies = take(ENERGIES)?;
        let forces = take(FORCES)?;

        if charges.shape().len() != 1 {
            return Err(shape_mismatch(NUCLEAR_CHARGES, charges.shape(), "(atoms,)"));
        }
        let nuclear_charges: Array1<i64> = match charges {
            FieldArray::Int(array) => array.iter().copied().collect(),
            FieldArray::Float(_) => {
                return Err(LoadError::NotIntegral {
                    field: NUCLEAR_CHARGES.to_string(),
                    dtype: "float64".to_string(),
                })
            }
        };
        let atoms = nuclear_charges.len();

        // Energies are (timesteps,) in rMD17 and (timesteps, 1) in original MD17
        let timesteps = match energies.shape() {
            [t] | [t, 1] => *t,
            shape => return Err(shape_mismatch(ENERGIES, shape, "(timesteps,)")),
        };
        let energies: Array1<f64> = energies.into_floats().iter().copied().collect();

        let coords = vector_series(COORDS, coords, timesteps, atoms)?;
        let forces = vector_series(FORCES, forces, timesteps, atoms)?;

        Ok(Self {
            name: name.into(),
            nuclear_charges,
            coords,
            energies,
            forces,
            auxiliary: fields,
        })
    }
}

fn vector_series(
    field: &str,
    array: FieldArray,
    timesteps: usize,
    atoms: usize,
) -> Result<Array3<f64>, LoadError> {
    if array.shape() != [timesteps, atoms, 3].as_slice() {
        let expected = format!("({}, {}, 3)", timesteps, atoms);
        return Err(shape_mismatch(field, array.shape(), &expected));
    }
    let shape = array.shape().to_vec();
    array
        .into_floats()
        .into_dimensionality::<Ix3>()
        .map_err(|_| shape_mismatch(field, &shape, "a 3-dimensional array"))
}

fn shape_mismatch(field: &str, shape: &[usize], expected: &str) -> LoadError {
    LoadError::ShapeMismatch {
        field: field.to_string(),
        shape: shape.to_vec(),
        expected: expected.to_string(),
    }
}
