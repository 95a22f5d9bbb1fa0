/// Errors that can occur while reading a flattened table
#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    /// I/O error during file operations
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Error from the CSV parser
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    /// A required column is absent from the header
    #[error("Missing required column: {0}")]
    MissingColumn(String),

    /// Header layout is inconsistent
    #[error("Invalid table layout: {0}")]
    InvalidFormat(String),

    /// A cell could not be parsed
    #[error("Row {row}, column '{column}': cannot parse '{value}'")]
    ParseError {
        row: usize,
        column: String,
        value: String,
    },
}
