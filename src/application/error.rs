//! Application-level errors

use thiserror::Error;

/// Application errors add context to grid loading, conversion and rendering.
#[derive(Error, Debug)]
pub enum ApplicationError {
    #[error("failed to fetch data: no outline rows in {source_name}")]
    EmptyGrid { source_name: String },

    #[error("invalid {format} grid in {source_name}: {message}")]
    GridFormat {
        format: String,
        source_name: String,
        message: String,
    },

    #[error("config error: {message}")]
    Config { message: String },

    #[error("cannot render document: {0}")]
    Render(#[from] serde_json::Error),

    #[error("operation failed: {context}")]
    OperationFailed {
        context: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl ApplicationError {
    /// True when the failure came from an input that does not exist.
    pub fn is_missing_input(&self) -> bool {
        match self {
            ApplicationError::OperationFailed { source, .. } => source
                .downcast_ref::<std::io::Error>()
                .is_some_and(|e| e.kind() == std::io::ErrorKind::NotFound),
            _ => false,
        }
    }
}

/// Result type for application layer operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;
