//! Property tests for filtering and flattening

use std::collections::BTreeMap;
use std::io::Cursor;

use ndarray::{Array1, Array3};
use proptest::prelude::*;
use trajflat::archive::{Archive, FieldArray};
use trajflat::dataset::FlatTableReader;
use trajflat::filter::{FilterOptions, FilteredArchive};
use trajflat::table::OutputTable;
use trajflat::writer::{TableWriter, WriterConfig};

fn archive(charges: Vec<i64>, timesteps: usize, values: &[f64]) -> Archive {
    let atoms = charges.len();
    let series = Array3::from_shape_fn((timesteps, atoms, 3), |(t, i, axis)| {
        values[((t * atoms + i) * 3 + axis) % values.len()]
    });
    let energies = Array1::from_shape_fn(timesteps, |t| values[t % values.len()]);

    let mut fields = BTreeMap::new();
    fields.insert(
        "nuclear_charges".to_string(),
        FieldArray::Int(Array1::from(charges).into_dyn()),
    );
    fields.insert("coords".to_string(), FieldArray::Float(series.clone().into_dyn()));
    fields.insert("energies".to_string(), FieldArray::Float(energies.into_dyn()));
    fields.insert("forces".to_string(), FieldArray::Float(series.into_dyn()));
    Archive::from_fields("prop", fields).unwrap()
}

fn arb_archive() -> impl Strategy<Value = Archive> {
    (
        prop::collection::vec(1i64..10, 0..12),
        0usize..8,
        prop::collection::vec(-1.0e6f64..1.0e6, 1..16),
    )
        .prop_map(|(charges, timesteps, values)| archive(charges, timesteps, &values))
}

proptest! {
    #[test]
    fn rows_match_timesteps(archive in arb_archive()) {
        let timesteps = archive.timestep_count();
        let filtered = FilteredArchive::new(archive, FilterOptions::default());
        let table = OutputTable::from_filtered(&filtered);
        prop_assert_eq!(table.row_count(), timesteps);
    }

    #[test]
    fn hydrogen_never_survives(archive in arb_archive()) {
        let non_hydrogen = archive.atom_count() - archive.hydrogen_count();
        let filtered = FilteredArchive::new(archive, FilterOptions::default());

        prop_assert_eq!(filtered.atom_count(), non_hydrogen);
        prop_assert!(filtered.archive().nuclear_charges.iter().all(|&z| z != 1));
        prop_assert_eq!(filtered.original_indices().len(), non_hydrogen);
        prop_assert!(filtered.original_indices().windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn written_table_reads_back(archive in arb_archive()) {
        let filtered = FilteredArchive::new(archive, FilterOptions::keep_all());
        let table = OutputTable::from_filtered(&filtered);

        let mut writer = TableWriter::new(Vec::new(), WriterConfig::default());
        writer.write_table(&table).unwrap();
        let bytes = writer.finish().unwrap();

        let frames = FlatTableReader::from_reader(Cursor::new(bytes), b',')
            .unwrap()
            .read_all()
            .unwrap();
        prop_assert_eq!(frames.len(), table.row_count());
        for (frame, row) in frames.iter().zip(&table.rows) {
            prop_assert_eq!(frame.energy, row.energy);
            prop_assert_eq!(frame.atom_count(), row.atoms.len());
            for (coord, cells) in frame.coords.iter().zip(&row.atoms) {
                prop_assert_eq!(*coord, cells.coord);
            }
        }
    }
}
