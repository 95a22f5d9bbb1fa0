use anyhow::{Context, Result};
use log::info;
use ndarray::{Array1, Array3};
use std::collections::BTreeMap;
use std::path::PathBuf;

use trajflat::archive::{Archive, FieldArray, COORDS, ENERGIES, FORCES, NUCLEAR_CHARGES};

/// Ethanol (C2H6O) reference geometry in Angstrom
const ETHANOL: [(i64, [f64; 3]); 9] = [
    (6, [-0.0017, -0.0014, 0.0000]),
    (6, [1.5110, 0.0043, 0.0000]),
    (8, [1.9796, 1.3381, 0.0000]),
    (1, [-0.3830, 1.0225, 0.0000]),
    (1, [-0.3789, -0.5148, 0.8863]),
    (1, [-0.3789, -0.5148, -0.8863]),
    (1, [1.8828, -0.5122, 0.8878]),
    (1, [1.8828, -0.5122, -0.8878]),
    (1, [2.9356, 1.2910, 0.0000]),
];

/// Harmonic restoring constant, kcal/mol/A^2
const SPRING_CONSTANT: f64 = 50.0;

/// Reference energy, kcal/mol
const REFERENCE_ENERGY: f64 = -97_080.0;

/// Generate a demo trajectory archive
pub fn run(output: PathBuf, timesteps: usize, legacy: bool, compressed: bool) -> Result<()> {
    info!("trajflat - Demo Trajectory Generator");
    info!("====================================");

    let fields = generate_trajectory(timesteps, legacy);
    let name = output
        .file_stem()
        .unwrap_or_default()
        .to_string_lossy()
        .into_owned();
    let archive =
        Archive::from_fields(name, fields).context("Generated trajectory failed validation")?;

    archive
        .save(&output, compressed)
        .with_context(|| format!("Failed to write {}", output.display()))?;

    println!(
        "Wrote {} ({} atoms, {} timesteps, {} legacy fields)",
        output.display(),
        archive.atom_count(),
        archive.timestep_count(),
        archive.legacy_fields().count()
    );

    Ok(())
}

fn displacement(t: usize, i: usize, axis: usize) -> f64 {
    let phase = (t as f64) * 0.3 + (i as f64) * 0.7 + (axis as f64) * 1.1;
    0.02 * phase.sin()
}

/// Small deterministic vibrations around the reference geometry
fn generate_trajectory(timesteps: usize, legacy: bool) -> BTreeMap<String, FieldArray> {
    let atoms = ETHANOL.len();

    let coords = Array3::from_shape_fn((timesteps, atoms, 3), |(t, i, axis)| {
        ETHANOL[i].1[axis] + displacement(t, i, axis)
    });
    let forces = Array3::from_shape_fn((timesteps, atoms, 3), |(t, i, axis)| {
        -2.0 * SPRING_CONSTANT * displacement(t, i, axis)
    });
    let energies = Array1::from_shape_fn(timesteps, |t| {
        let strain: f64 = (0..atoms)
            .flat_map(|i| (0..3).map(move |axis| displacement(t, i, axis).powi(2)))
            .sum();
        REFERENCE_ENERGY + SPRING_CONSTANT * strain
    });
    let charges: Array1<i64> = ETHANOL.iter().map(|(z, _)| *z).collect();

    let mut fields = BTreeMap::new();
    fields.insert(NUCLEAR_CHARGES.to_string(), FieldArray::Int(charges.into_dyn()));
    fields.insert(COORDS.to_string(), FieldArray::Float(coords.clone().into_dyn()));
    fields.insert(ENERGIES.to_string(), FieldArray::Float(energies.clone().into_dyn()));
    fields.insert(FORCES.to_string(), FieldArray::Float(forces.clone().into_dyn()));

    if legacy {
        // rMD17 keeps the original MD17 values and frame indices under old_*
        let indices = Array1::from_shape_fn(timesteps, |t| t as i64);
        fields.insert("old_indices".to_string(), FieldArray::Int(indices.into_dyn()));
        fields.insert("old_energies".to_string(), FieldArray::Float(energies.into_dyn()));
        fields.insert("old_coords".to_string(), FieldArray::Float(coords.into_dyn()));
        fields.insert("old_forces".to_string(), FieldArray::Float(forces.into_dyn()));
    }

    fields
}
