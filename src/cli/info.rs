use anyhow::{Context, Result};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use trajflat::archive::{read_members, Archive};
use trajflat::dataset::{FlatTableReader, TableSummary};

/// Display information about an archive or a flattened table
pub fn run(file: PathBuf) -> Result<()> {
    if !file.exists() {
        anyhow::bail!("File does not exist: {}", file.display());
    }

    match file.extension().and_then(|e| e.to_str()) {
        Some("npz") => archive_info(&file),
        Some("csv") => table_info(&file, b','),
        Some("tsv") => table_info(&file, b'\t'),
        _ => anyhow::bail!(
            "Unrecognized file type (expected .npz, .csv or .tsv): {}",
            file.display()
        ),
    }
}

fn archive_info(path: &Path) -> Result<()> {
    let handle = File::open(path).context("Failed to open file")?;
    let members = read_members(BufReader::new(handle)).context("Failed to read .npz archive")?;

    println!("Trajectory Archive Information");
    println!("==============================");
    println!("File: {}", path.display());
    println!();

    println!("Members:");
    for (i, (name, array)) in members.iter().enumerate() {
        println!(
            "  {:3}. {} ({}, shape {:?})",
            i + 1,
            name,
            array.dtype(),
            array.shape()
        );
    }
    println!();

    let name = path
        .file_stem()
        .unwrap_or_default()
        .to_string_lossy()
        .into_owned();
    let archive = Archive::from_fields(name, members).context("Not a valid trajectory archive")?;
    let legacy: Vec<&str> = archive.legacy_fields().collect();

    println!("Trajectory:");
    println!("  Timesteps: {}", archive.timestep_count());
    println!("  Atoms: {}", archive.atom_count());
    println!("  Hydrogen atoms: {}", archive.hydrogen_count());
    println!("  Nuclear charges: {:?}", archive.nuclear_charges.to_vec());
    if legacy.is_empty() {
        println!("  Legacy fields: none");
    } else {
        println!("  Legacy fields: {}", legacy.join(", "));
    }

    Ok(())
}

fn table_info(path: &Path, delimiter: u8) -> Result<()> {
    let reader = FlatTableReader::open_with_delimiter(path, delimiter)
        .context("Failed to read table header")?;
    let summary = TableSummary::from_reader(reader).context("Failed to read table rows")?;

    println!("Flattened Table Information");
    println!("===========================");
    println!("File: {}", path.display());
    println!();
    println!("{}", summary);

    Ok(())
}
