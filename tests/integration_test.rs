//! Integration tests for trajflat
//!
//! These tests write `.npz` archives to a temporary directory, run the batch
//! converter over it and check the produced tables.

use std::collections::BTreeMap;
use std::fs::{self, File};
use std::path::Path;

use ndarray::{arr1, s, Array1, Array3};
use ndarray_npy::NpzWriter;
use tempfile::tempdir;
use trajflat::archive::{Archive, FieldArray};
use trajflat::dataset::{FlatTableReader, TableSummary};
use trajflat::filter::FilterOptions;
use trajflat::pipeline::{ConfigurationError, ConversionConfig, Converter};
use trajflat::writer::WriterConfig;

/// Coordinates `t + 0.5 * i + 0.25 * axis`, forces `-(i + 1) * (axis + 1)`
fn trajectory_fields(charges: &[i64], timesteps: usize) -> BTreeMap<String, FieldArray> {
    let atoms = charges.len();
    let coords = Array3::from_shape_fn((timesteps, atoms, 3), |(t, i, axis)| {
        t as f64 + 0.5 * i as f64 + 0.25 * axis as f64
    });
    let forces =
        Array3::from_shape_fn((timesteps, atoms, 3), |(_, i, axis)| -(((i + 1) * (axis + 1)) as f64));
    let energies = Array1::from_shape_fn(timesteps, |t| -100.0 - 0.5 * t as f64);

    let mut fields = BTreeMap::new();
    fields.insert(
        "nuclear_charges".to_string(),
        FieldArray::Int(arr1(charges).into_dyn()),
    );
    fields.insert("coords".to_string(), FieldArray::Float(coords.into_dyn()));
    fields.insert("energies".to_string(), FieldArray::Float(energies.into_dyn()));
    fields.insert("forces".to_string(), FieldArray::Float(forces.into_dyn()));
    fields
}

fn write_npz(path: &Path, fields: &BTreeMap<String, FieldArray>) {
    let mut npz = NpzWriter::new(File::create(path).unwrap());
    for (name, array) in fields {
        array.write_to(&mut npz, name).unwrap();
    }
    npz.finish().unwrap();
}

fn config(input: &Path, output: &Path) -> ConversionConfig {
    ConversionConfig {
        input_dir: input.to_path_buf(),
        output_dir: output.join("cleaned"),
        ..Default::default()
    }
}

/// Hydrogens at positions 0 and 2 are dropped; carbon and oxygen are renumbered
#[test]
fn test_hydrogen_dropped_and_renumbered() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("npz");
    fs::create_dir(&input).unwrap();
    write_npz(&input.join("mol.npz"), &trajectory_fields(&[1, 6, 1, 8], 2));

    let config = config(&input, dir.path());
    let summary = Converter::new(config.clone()).run().unwrap();
    assert_eq!(summary.converted.len(), 1);
    assert!(!summary.has_failures());
    assert_eq!(summary.converted[0].atoms, 2);
    assert_eq!(summary.converted[0].dropped_atoms, 2);

    let csv = fs::read_to_string(config.output_dir.join("mol.csv")).unwrap();
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(
        lines[0],
        "timestep,energy,atom_0_charge,atom_0_coord,atom_0_force,atom_1_charge,atom_1_coord,atom_1_force"
    );
    assert_eq!(
        lines[1],
        "0,-100.0,6,\"[0.5, 0.75, 1.0]\",\"[-2.0, -4.0, -6.0]\",8,\"[1.5, 1.75, 2.0]\",\"[-4.0, -8.0, -12.0]\""
    );
    assert_eq!(
        lines[2],
        "1,-100.5,6,\"[1.5, 1.75, 2.0]\",\"[-2.0, -4.0, -6.0]\",8,\"[2.5, 2.75, 3.0]\",\"[-4.0, -8.0, -12.0]\""
    );
    assert_eq!(lines.len(), 3);
    assert!(csv.ends_with('\n'));
    assert!(!csv.contains('\r'));
}

#[test]
fn test_legacy_fields_dropped() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("npz");
    fs::create_dir(&input).unwrap();

    let mut fields = trajectory_fields(&[6, 8], 3);
    let old_coords = fields["coords"].clone();
    fields.insert("old_coords".to_string(), old_coords);
    fields.insert(
        "old_energies".to_string(),
        FieldArray::Float(arr1(&[1.0, 2.0, 3.0]).into_dyn()),
    );
    write_npz(&input.join("legacy.npz"), &fields);

    let config = config(&input, dir.path());
    let summary = Converter::new(config.clone()).run().unwrap();
    assert_eq!(
        summary.converted[0].dropped_fields,
        vec!["old_coords", "old_energies"]
    );

    let csv = fs::read_to_string(config.output_dir.join("legacy.csv")).unwrap();
    assert!(!csv.contains("old_"));
    assert_eq!(csv.lines().count(), 4);
}

#[test]
fn test_keep_hydrogen() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("npz");
    fs::create_dir(&input).unwrap();
    write_npz(&input.join("mol.npz"), &trajectory_fields(&[1, 6, 1, 8], 2));

    let mut config = config(&input, dir.path());
    config.filter = FilterOptions::keep_all();
    let summary = Converter::new(config.clone()).run().unwrap();
    assert_eq!(summary.converted[0].atoms, 4);

    let frames = FlatTableReader::open(config.output_dir.join("mol.csv"))
        .unwrap()
        .read_all()
        .unwrap();
    assert_eq!(frames[0].nuclear_charges, vec![1, 6, 1, 8]);
}

#[test]
fn test_all_hydrogen_molecule() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("npz");
    fs::create_dir(&input).unwrap();
    write_npz(&input.join("h2.npz"), &trajectory_fields(&[1, 1], 2));

    let config = config(&input, dir.path());
    Converter::new(config.clone()).run().unwrap();

    let csv = fs::read_to_string(config.output_dir.join("h2.csv")).unwrap();
    assert_eq!(csv, "timestep,energy\n0,-100.0\n1,-100.5\n");
}

#[test]
fn test_empty_input_directory() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("npz");
    fs::create_dir(&input).unwrap();
    fs::write(input.join("notes.txt"), "not an archive").unwrap();

    let config = config(&input, dir.path());
    let summary = Converter::new(config.clone()).run().unwrap();
    assert!(summary.converted.is_empty());
    assert!(summary.skipped.is_empty());
    assert!(config.output_dir.is_dir());
    assert_eq!(fs::read_dir(&config.output_dir).unwrap().count(), 0);
}

#[test]
fn test_missing_input_directory() {
    let dir = tempdir().unwrap();
    let config = config(&dir.path().join("missing"), dir.path());
    let result = Converter::new(config.clone()).run();
    assert!(matches!(result, Err(ConfigurationError::InputMissing(_))));
    assert!(!config.output_dir.exists());
}

#[test]
fn test_bad_archive_is_skipped() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("npz");
    fs::create_dir(&input).unwrap();
    write_npz(&input.join("good.npz"), &trajectory_fields(&[6, 1], 2));
    fs::write(input.join("corrupt.npz"), b"definitely not a zip").unwrap();

    let mut missing_forces = trajectory_fields(&[6], 2);
    missing_forces.remove("forces");
    write_npz(&input.join("incomplete.npz"), &missing_forces);

    let config = config(&input, dir.path());
    let summary = Converter::new(config.clone()).run().unwrap();

    assert!(summary.has_failures());
    assert_eq!(summary.converted.len(), 1);
    assert_eq!(summary.skipped.len(), 2);
    assert!(config.output_dir.join("good.csv").is_file());
    assert!(!config.output_dir.join("corrupt.csv").exists());
    assert!(!config.output_dir.join("incomplete.csv").exists());

    let incomplete = summary
        .skipped
        .iter()
        .find(|s| s.input.ends_with("incomplete.npz"))
        .unwrap();
    assert!(incomplete.reason.contains("forces"));
}

#[test]
fn test_conversion_is_deterministic() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("npz");
    fs::create_dir(&input).unwrap();
    write_npz(&input.join("mol.npz"), &trajectory_fields(&[8, 1, 6, 1, 7], 6));

    let config = config(&input, dir.path());
    let converter = Converter::new(config.clone());
    let output = config.output_dir.join("mol.csv");

    converter.run().unwrap();
    let first = fs::read(&output).unwrap();
    converter.run().unwrap();
    let second = fs::read(&output).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_round_trip_through_reader() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("npz");
    fs::create_dir(&input).unwrap();
    let fields = trajectory_fields(&[6, 1, 8, 1], 4);
    write_npz(&input.join("mol.npz"), &fields);

    let config = config(&input, dir.path());
    Converter::new(config.clone()).run().unwrap();

    let original = Archive::from_fields("mol", fields).unwrap();
    let frames = FlatTableReader::open(config.output_dir.join("mol.csv"))
        .unwrap()
        .read_all()
        .unwrap();

    assert_eq!(frames.len(), 4);
    for (t, frame) in frames.iter().enumerate() {
        assert_eq!(frame.timestep, t);
        assert_eq!(frame.energy, original.energies[t]);
        assert_eq!(frame.nuclear_charges, vec![6, 8]);
        assert_eq!(frame.coords[0].to_vec(), original.coords.slice(s![t, 0, ..]).to_vec());
        assert_eq!(frame.coords[1].to_vec(), original.coords.slice(s![t, 2, ..]).to_vec());
        assert_eq!(frame.forces[1].to_vec(), original.forces.slice(s![t, 2, ..]).to_vec());
    }
}

#[test]
fn test_tsv_output() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("npz");
    fs::create_dir(&input).unwrap();
    write_npz(&input.join("mol.npz"), &trajectory_fields(&[6, 8], 3));

    let mut config = config(&input, dir.path());
    config.writer = WriterConfig::tsv();
    let summary = Converter::new(config.clone()).run().unwrap();

    let output = config.output_dir.join("mol.tsv");
    assert_eq!(summary.converted[0].output, output);

    let reader = FlatTableReader::open_with_delimiter(&output, b'\t').unwrap();
    let table = TableSummary::from_reader(reader).unwrap();
    assert_eq!(table.timesteps, 3);
    assert_eq!(table.atom_count, 2);
    assert_eq!(table.energy_range, Some((-101.0, -100.0)));
}
