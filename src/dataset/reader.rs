use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use serde::Serialize;

use super::DatasetError;
use crate::table::{CHARGE_SUFFIX, COORD_SUFFIX, ENERGY_COLUMN, FORCE_SUFFIX, TIMESTEP_COLUMN};

/// One timestep of a flattened table, with per-atom data stacked
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimestepFrame {
    pub timestep: usize,
    pub energy: f64,
    pub nuclear_charges: Vec<i64>,
    pub coords: Vec<[f64; 3]>,
    pub forces: Vec<[f64; 3]>,
}

impl TimestepFrame {
    pub fn atom_count(&self) -> usize {
        self.nuclear_charges.len()
    }
}

/// Column positions resolved from the header row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableLayout {
    names: Vec<String>,
    timestep: usize,
    energy: usize,
    charges: Vec<usize>,
    coords: Vec<usize>,
    forces: Vec<usize>,
}

impl TableLayout {
    /// Resolve columns from header names
    pub fn from_headers<'a, I>(headers: I) -> Result<Self, DatasetError>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let names: Vec<String> = headers.into_iter().map(str::to_string).collect();
        let position = |column: &str| {
            names
                .iter()
                .position(|name| name == column)
                .ok_or_else(|| DatasetError::MissingColumn(column.to_string()))
        };
        let timestep = position(TIMESTEP_COLUMN)?;
        let energy = position(ENERGY_COLUMN)?;

        let with_suffix = |suffix: &str| -> Vec<usize> {
            names
                .iter()
                .enumerate()
                .filter(|(_, name)| name.ends_with(suffix))
                .map(|(i, _)| i)
                .collect()
        };
        let charges = with_suffix(CHARGE_SUFFIX);
        let coords = with_suffix(COORD_SUFFIX);
        let forces = with_suffix(FORCE_SUFFIX);

        if charges.len() != coords.len() || charges.len() != forces.len() {
            return Err(DatasetError::InvalidFormat(format!(
                "{} charge, {} coord and {} force columns",
                charges.len(),
                coords.len(),
                forces.len()
            )));
        }

        Ok(Self {
            names,
            timestep,
            energy,
            charges,
            coords,
            forces,
        })
    }

    pub fn atom_count(&self) -> usize {
        self.charges.len()
    }

    fn name(&self, index: usize) -> &str {
        &self.names[index]
    }
}

/// Reader for flattened trajectory tables
pub struct FlatTableReader<R: Read> {
    reader: csv::Reader<R>,
    layout: TableLayout,
    rows_read: usize,
}

impl FlatTableReader<BufReader<File>> {
    /// Open a comma-separated table
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, DatasetError> {
        Self::open_with_delimiter(path, b',')
    }

    /// Open a table with the given delimiter
    pub fn open_with_delimiter<P: AsRef<Path>>(
        path: P,
        delimiter: u8,
    ) -> Result<Self, DatasetError> {
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file), delimiter)
    }
}

impl<R: Read> FlatTableReader<R> {
    /// Read the header row and resolve the layout
    pub fn from_reader(reader: R, delimiter: u8) -> Result<Self, DatasetError> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(delimiter)
            .has_headers(true)
            .from_reader(reader);
        let layout = TableLayout::from_headers(reader.headers()?.iter())?;

        Ok(Self {
            reader,
            layout,
            rows_read: 0,
        })
    }

    pub fn layout(&self) -> &TableLayout {
        &self.layout
    }

    /// Read the next frame, or `None` at end of input
    pub fn next_frame(&mut self) -> Result<Option<TimestepFrame>, DatasetError> {
        let mut record = csv::StringRecord::new();
        if !self.reader.read_record(&mut record)? {
            return Ok(None);
        }
        self.rows_read += 1;
        let row = self.rows_read;
        let layout = &self.layout;

        let cell = |index: usize| record.get(index).unwrap_or("");
        let parse_error = |index: usize| DatasetError::ParseError {
            row,
            column: layout.name(index).to_string(),
            value: cell(index).to_string(),
        };

        let timestep = cell(layout.timestep)
            .parse::<usize>()
            .map_err(|_| parse_error(layout.timestep))?;
        let energy = cell(layout.energy)
            .parse::<f64>()
            .map_err(|_| parse_error(layout.energy))?;

        let nuclear_charges = layout
            .charges
            .iter()
            .map(|&i| cell(i).parse::<i64>().map_err(|_| parse_error(i)))
            .collect::<Result<Vec<_>, _>>()?;
        let coords = layout
            .coords
            .iter()
            .map(|&i| parse_vector_cell(cell(i)).map_err(|_| parse_error(i)))
            .collect::<Result<Vec<_>, _>>()?;
        let forces = layout
            .forces
            .iter()
            .map(|&i| parse_vector_cell(cell(i)).map_err(|_| parse_error(i)))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Some(TimestepFrame {
            timestep,
            energy,
            nuclear_charges,
            coords,
            forces,
        }))
    }

    /// Read every remaining frame
    pub fn read_all(mut self) -> Result<Vec<TimestepFrame>, DatasetError> {
        let mut frames = Vec::new();
        while let Some(frame) = self.next_frame()? {
            frames.push(frame);
        }
        Ok(frames)
    }
}

impl<R: Read> Iterator for FlatTableReader<R> {
    type Item = Result<TimestepFrame, DatasetError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_frame().transpose()
    }
}

/// Parse a list cell such as `[0.1, -2.0, 3e-05]`
pub fn parse_vector_cell(value: &str) -> Result<[f64; 3], DatasetError> {
    let invalid = || DatasetError::InvalidFormat(format!("not a 3-vector: '{}'", value));

    let inner = value
        .trim()
        .strip_prefix('[')
        .and_then(|s| s.strip_suffix(']'))
        .ok_or_else(invalid)?;

    let mut parts = inner.split(',').map(|s| s.trim().parse::<f64>());
    let mut next = || parts.next().and_then(Result::ok).ok_or_else(invalid);
    let vector = [next()?, next()?, next()?];

    if parts.next().is_some() {
        return Err(invalid());
    }
    Ok(vector)
}
