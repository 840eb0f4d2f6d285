//! Error types for colloscope parsing, filtering and export.

/// Result type for colloscope operations
pub type ColloscopeResult<T> = Result<T, ColloscopeError>;

/// Error type for colloscope operations
#[derive(Debug, thiserror::Error)]
pub enum ColloscopeError {
    /// Malformed source table. `row` is the 1-based source line (header = 1).
    #[error("Format error{}: {message}", .row.map(|r| format!(" at row {}", r)).unwrap_or_default())]
    Format { row: Option<usize>, message: String },

    #[error("No session found for group {group}")]
    EmptyResult { group: String },

    #[error("Unknown class: {0}")]
    UnknownClass(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Document rendering error: {0}")]
    Document(#[from] lopdf::Error),
}

impl ColloscopeError {
    /// Format error tied to a source row.
    pub fn format_at(row: usize, message: impl Into<String>) -> Self {
        ColloscopeError::Format {
            row: Some(row),
            message: message.into(),
        }
    }

    /// Format error not tied to a specific row.
    pub fn format(message: impl Into<String>) -> Self {
        ColloscopeError::Format {
            row: None,
            message: message.into(),
        }
    }

    pub fn empty_result(group: impl Into<String>) -> Self {
        ColloscopeError::EmptyResult {
            group: group.into(),
        }
    }

    /// True for errors the caller should turn into a "not found" reply.
    pub fn is_empty_result(&self) -> bool {
        matches!(self, ColloscopeError::EmptyResult { .. })
    }

    /// Source row of a format error, if any.
    pub fn row(&self) -> Option<usize> {
        match self {
            ColloscopeError::Format { row, .. } => *row,
            _ => None,
        }
    }
}
