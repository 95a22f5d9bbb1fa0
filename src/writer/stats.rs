use std::fmt;

use serde::Serialize;

/// Statistics from a completed table write
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WriterStats {
    /// Number of data rows written (excluding the header)
    pub rows_written: usize,
    /// Number of columns per row
    pub columns: usize,
}

impl fmt::Display for WriterStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Wrote {} rows x {} columns",
            self.rows_written, self.columns
        )
    }
}
