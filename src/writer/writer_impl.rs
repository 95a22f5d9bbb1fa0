use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::table::{OutputTable, Row};

use super::config::WriterConfig;
use super::error::WriteError;
use super::format::{format_float, format_vector};
use super::stats::WriterStats;

/// Delimited-text writer for flattened trajectory tables
pub struct TableWriter<W: Write> {
    writer: csv::Writer<W>,
    config: WriterConfig,
    rows_written: usize,
}

impl TableWriter<BufWriter<File>> {
    /// Create (or truncate) the destination file
    pub fn create<P: AsRef<Path>>(path: P, config: WriterConfig) -> Result<Self, WriteError> {
        let path = path.as_ref();
        let file = File::create(path).map_err(|source| WriteError::CreateError {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::new(BufWriter::new(file), config))
    }
}

impl<W: Write> TableWriter<W> {
    /// Create a new writer to any Write implementation
    pub fn new(inner: W, config: WriterConfig) -> Self {
        let writer = csv::WriterBuilder::new()
            .delimiter(config.delimiter)
            .terminator(csv::Terminator::Any(b'\n'))
            .has_headers(false)
            .from_writer(inner);

        Self {
            writer,
            config,
            rows_written: 0,
        }
    }

    /// Write the header (if configured) and every row of `table`
    pub fn write_table(&mut self, table: &OutputTable) -> Result<WriterStats, WriteError> {
        if self.config.write_header {
            self.writer.write_record(table.schema.column_names())?;
        }

        let mut record = Vec::with_capacity(table.schema.column_count());
        for row in &table.rows {
            fill_record(&mut record, row);
            self.writer.write_record(&record)?;
            self.rows_written += 1;
        }

        Ok(WriterStats {
            rows_written: table.rows.len(),
            columns: table.schema.column_count(),
        })
    }

    /// Total rows written so far
    pub fn rows_written(&self) -> usize {
        self.rows_written
    }

    /// Flush buffered output and return the inner writer
    pub fn finish(self) -> Result<W, WriteError> {
        let mut inner = self
            .writer
            .into_inner()
            .map_err(|e| WriteError::IoError(e.into_error()))?;
        inner.flush()?;
        Ok(inner)
    }
}

fn fill_record(record: &mut Vec<String>, row: &Row) {
    record.clear();
    record.push(row.timestep.to_string());
    record.push(format_float(row.energy));
    for atom in &row.atoms {
        record.push(atom.charge.to_string());
        record.push(format_vector(&atom.coord));
        record.push(format_vector(&atom.force));
    }
}

/// Write `table` to `path`, overwriting any existing file
pub fn write_table_file<P: AsRef<Path>>(
    table: &OutputTable,
    path: P,
    config: WriterConfig,
) -> Result<WriterStats, WriteError> {
    let mut writer = TableWriter::create(path, config)?;
    let stats = writer.write_table(table)?;
    writer.finish()?;
    Ok(stats)
}
