//! Batch conversion of an archive directory
//!
//! ```text
//! input_dir/*.npz ──► Archive::open ──► FilteredArchive ──► OutputTable ──► output_dir/*.csv
//! ```
//!
//! Archives are processed one at a time. A load or write failure skips that
//! archive and is recorded in the [`BatchSummary`]; only configuration
//! problems abort the run.

use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, info, warn};
use serde::Serialize;

use crate::archive::{Archive, LoadError};
use crate::filter::{FilterOptions, FilteredArchive};
use crate::table::OutputTable;
use crate::writer::{write_table_file, WriteError, WriterConfig};

/// File extension of input archives
pub const ARCHIVE_EXTENSION: &str = "npz";

/// Default input directory
pub const DEFAULT_INPUT_DIR: &str = "data/rmd17";

/// Default output directory
pub const DEFAULT_OUTPUT_DIR: &str = "data/rmd17_cleaned";

/// Problems with the run configuration, detected before any archive is read
#[derive(Debug, thiserror::Error)]
pub enum ConfigurationError {
    /// Input directory does not exist
    #[error("Input directory does not exist: {}", .0.display())]
    InputMissing(PathBuf),

    /// Input path exists but is not a directory
    #[error("Input path is not a directory: {}", .0.display())]
    InputNotDirectory(PathBuf),

    /// Input directory could not be listed
    #[error("Cannot read input directory {}: {source}", .path.display())]
    InputUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Output directory could not be created
    #[error("Cannot create output directory {}: {source}", .path.display())]
    OutputDirectory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Failure converting a single archive
#[derive(Debug, thiserror::Error)]
pub enum ConversionError {
    /// Archive could not be loaded or validated
    #[error("Load error: {0}")]
    LoadError(#[from] LoadError),

    /// Output table could not be written
    #[error("Write error: {0}")]
    WriteError(#[from] WriteError),
}

/// Settings fixed for the whole run
#[derive(Debug, Clone)]
pub struct ConversionConfig {
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
    pub filter: FilterOptions,
    pub writer: WriterConfig,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from(DEFAULT_INPUT_DIR),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            filter: FilterOptions::default(),
            writer: WriterConfig::default(),
        }
    }
}

/// One successfully converted archive
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConvertedArchive {
    pub input: PathBuf,
    pub output: PathBuf,
    pub timesteps: usize,
    pub atoms: usize,
    pub dropped_atoms: usize,
    pub dropped_fields: Vec<String>,
}

/// One archive that was skipped
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkippedArchive {
    pub input: PathBuf,
    pub reason: String,
}

/// Outcome of a batch run
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BatchSummary {
    pub output_dir: PathBuf,
    /// Filters applied to every archive of the run
    pub filter: FilterOptions,
    pub converted: Vec<ConvertedArchive>,
    pub skipped: Vec<SkippedArchive>,
}

impl BatchSummary {
    /// Whether any archive was skipped
    pub fn has_failures(&self) -> bool {
        !self.skipped.is_empty()
    }

    /// Total rows written across all tables
    pub fn rows_written(&self) -> usize {
        self.converted.iter().map(|c| c.timesteps).sum()
    }
}

/// Progress notifications emitted during a batch run
#[derive(Debug)]
pub enum ProgressEvent<'a> {
    /// An archive is about to be loaded
    Started(&'a Path),
    /// An archive's table was written
    Converted(&'a ConvertedArchive),
    /// An archive failed and was skipped
    Skipped(&'a SkippedArchive),
}

/// Enumerate archive files in `input_dir`, in directory order
pub fn scan_archives(input_dir: &Path) -> Result<impl Iterator<Item = PathBuf>, ConfigurationError> {
    if !input_dir.exists() {
        return Err(ConfigurationError::InputMissing(input_dir.to_path_buf()));
    }
    if !input_dir.is_dir() {
        return Err(ConfigurationError::InputNotDirectory(input_dir.to_path_buf()));
    }

    let entries = fs::read_dir(input_dir).map_err(|source| ConfigurationError::InputUnreadable {
        path: input_dir.to_path_buf(),
        source,
    })?;

    Ok(entries.filter_map(|entry| match entry {
        Ok(entry) => {
            let path = entry.path();
            let is_archive = path.extension().map_or(false, |e| e == ARCHIVE_EXTENSION);
            (is_archive && path.is_file()).then_some(path)
        }
        Err(e) => {
            warn!("Skipping unreadable directory entry: {}", e);
            None
        }
    }))
}

/// Create `output_dir` if absent
pub fn ensure_output_dir(output_dir: &Path) -> Result<(), ConfigurationError> {
    fs::create_dir_all(output_dir).map_err(|source| ConfigurationError::OutputDirectory {
        path: output_dir.to_path_buf(),
        source,
    })
}

/// Destination of the table converted from `archive_path`
pub fn output_path(archive_path: &Path, output_dir: &Path, extension: &str) -> PathBuf {
    let mut file_name = archive_path.file_stem().unwrap_or_default().to_os_string();
    file_name.push(".");
    file_name.push(extension);
    output_dir.join(file_name)
}

/// Directory-to-directory archive converter
pub struct Converter {
    config: ConversionConfig,
}

impl Converter {
    pub fn new(config: ConversionConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ConversionConfig {
        &self.config
    }

    /// Load, filter, flatten and write one archive
    pub fn convert_archive(&self, input: &Path) -> Result<ConvertedArchive, ConversionError> {
        let archive = Archive::open(input)?;
        debug!(
            "Loaded '{}': {} atoms, {} timesteps, fields {:?}",
            archive.name,
            archive.atom_count(),
            archive.timestep_count(),
            archive.field_names()
        );

        let filtered = FilteredArchive::new(archive, self.config.filter);
        let table = OutputTable::from_filtered(&filtered);

        let output = output_path(input, &self.config.output_dir, self.config.writer.extension());
        let stats = write_table_file(&table, &output, self.config.writer.clone())?;
        debug!("{}: {}", output.display(), stats);

        Ok(ConvertedArchive {
            input: input.to_path_buf(),
            output,
            timesteps: stats.rows_written,
            atoms: filtered.atom_count(),
            dropped_atoms: filtered.dropped_atom_count(),
            dropped_fields: filtered.dropped_fields().to_vec(),
        })
    }

    /// Convert every archive in the input directory
    pub fn run(&self) -> Result<BatchSummary, ConfigurationError> {
        self.run_with_progress(|_| {})
    }

    /// Convert every archive, reporting each step to `progress`
    pub fn run_with_progress<F>(&self, mut progress: F) -> Result<BatchSummary, ConfigurationError>
    where
        F: FnMut(ProgressEvent<'_>),
    {
        let archives = scan_archives(&self.config.input_dir)?;
        ensure_output_dir(&self.config.output_dir)?;

        info!("Input:  {}", self.config.input_dir.display());
        info!("Output: {}", self.config.output_dir.display());
        info!(
            "Drop legacy fields: {}, drop hydrogen: {}",
            self.config.filter.drop_legacy_fields, self.config.filter.drop_hydrogen
        );

        let mut summary = BatchSummary {
            output_dir: self.config.output_dir.clone(),
            filter: self.config.filter,
            ..Default::default()
        };

        for input in archives {
            progress(ProgressEvent::Started(&input));
            match self.convert_archive(&input) {
                Ok(converted) => {
                    progress(ProgressEvent::Converted(&converted));
                    summary.converted.push(converted);
                }
                Err(e) => {
                    warn!("Skipping {}: {}", input.display(), e);
                    let skipped = SkippedArchive {
                        input,
                        reason: e.to_string(),
                    };
                    progress(ProgressEvent::Skipped(&skipped));
                    summary.skipped.push(skipped);
                }
            }
        }

        info!(
            "Converted {} archives ({} rows), skipped {}",
            summary.converted.len(),
            summary.rows_written(),
            summary.skipped.len()
        );
        Ok(summary)
    }
}
