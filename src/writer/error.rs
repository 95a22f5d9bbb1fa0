use std::path::PathBuf;

/// Errors that can occur while writing an output table
#[derive(Debug, thiserror::Error)]
pub enum WriteError {
    /// I/O error during file operations
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Destination file could not be created
    #[error("Cannot create {}: {source}", .path.display())]
    CreateError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Error from the CSV serializer
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),
}
