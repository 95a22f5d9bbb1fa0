use ndarray_npy::ReadNpyError;

/// Errors that can occur while loading a trajectory archive
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// ZIP archive error
    #[error("ZIP error: {0}")]
    ZipError(#[from] zip::result::ZipError),

    /// A `.npy` member could not be decoded
    #[error("Failed to decode member '{member}': {source}")]
    MemberError {
        member: String,
        #[source]
        source: ReadNpyError,
    },

    /// A `.npy` member declares a header longer than the member itself
    #[error("Member '{member}' declares a {declared}-byte header but holds {available} bytes")]
    TruncatedHeader {
        member: String,
        declared: usize,
        available: usize,
    },

    /// A canonical field has a dtype that cannot be widened to int64/float64
    #[error("Field '{0}' has an unsupported dtype")]
    UnsupportedDtype(String),

    /// One of the canonical fields is absent
    #[error("Missing required field: {0}")]
    MissingField(String),

    /// A field has the wrong number of dimensions or axis lengths
    #[error("Field '{field}' has shape {shape:?}, expected {expected}")]
    ShapeMismatch {
        field: String,
        shape: Vec<usize>,
        expected: String,
    },

    /// A field holds floating-point data where integers are required
    #[error("Field '{field}' must hold integer values, found dtype {dtype}")]
    NotIntegral { field: String, dtype: String },
}

/// Errors that can occur while saving an archive to an `.npz` file
#[derive(Debug, thiserror::Error)]
pub enum SaveError {
    /// I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Member encoding or ZIP error
    #[error("NPZ error: {0}")]
    NpzError(#[from] ndarray_npy::WriteNpzError),
}
