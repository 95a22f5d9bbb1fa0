/// Configuration for the table writer
#[derive(Debug, Clone)]
pub struct WriterConfig {
    /// Field delimiter (`b','` for CSV, `b'\t'` for TSV)
    pub delimiter: u8,

    /// Whether to write the header row
    pub write_header: bool,
}

impl Default for WriterConfig {
    fn default() -> Self {
        Self {
            delimiter: b',',
            write_header: true,
        }
    }
}

impl WriterConfig {
    /// Tab-separated output
    pub fn tsv() -> Self {
        Self {
            delimiter: b'\t',
            ..Default::default()
        }
    }

    /// File extension matching the delimiter
    pub fn extension(&self) -> &'static str {
        match self.delimiter {
            b'\t' => "tsv",
            _ => "csv",
        }
    }
}
