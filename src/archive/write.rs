use std::fs::{self, File};
use std::io::{BufWriter, Seek, Write};
use std::path::Path;

use ndarray_npy::{NpzWriter, WriteNpzError};

use super::{Archive, SaveError, COORDS, ENERGIES, FORCES, NUCLEAR_CHARGES};

impl Archive {
    /// Add the canonical and auxiliary fields to `npz`, one `.npy` member each
    pub fn write_npz<W: Write + Seek>(&self, npz: &mut NpzWriter<W>) -> Result<(), WriteNpzError> {
        npz.add_array(NUCLEAR_CHARGES, &self.nuclear_charges)?;
        npz.add_array(COORDS, &self.coords)?;
        npz.add_array(ENERGIES, &self.energies)?;
        npz.add_array(FORCES, &self.forces)?;
        for (name, array) in &self.auxiliary {
            array.write_to(npz, name)?;
        }
        Ok(())
    }

    /// Save as an `.npz` file, creating parent directories as needed.
    /// `compressed` deflates members like `numpy.savez_compressed`.
    pub fn save<P: AsRef<Path>>(&self, path: P, compressed: bool) -> Result<(), SaveError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }
        let file = BufWriter::new(File::create(path)?);
        let mut npz = if compressed {
            NpzWriter::new_compressed(file)
        } else {
            NpzWriter::new(file)
        };
        self.write_npz(&mut npz)?;
        npz.finish()?;
        Ok(())
    }
}
