//! Error types for the logger facade
//!
//! Only construction and flushing can fail. Logging calls never return an
//! error; a failed write is reported on stderr and the other outputs still
//! receive the line.

pub type Result<T> = std::result::Result<T, LoggerError>;

#[derive(Debug, thiserror::Error)]
pub enum LoggerError {
    /// An encoded line could not be written to an output
    #[error("Write to output '{output}' failed: {source}")]
    Write {
        output: String,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A configuration document could not be parsed
    #[error("Malformed configuration document: {0}")]
    ConfigDocument(#[from] serde_json::Error),

    #[error("Invalid configuration for {component}: {message}")]
    InvalidConfiguration { component: String, message: String },

    /// An output destination could not be opened
    #[error("Cannot open output '{path}': {message}")]
    OutputPath { path: String, message: String },

    /// Flush failed on one of the outputs
    #[error("Failed to sync output '{output}': {message}")]
    SyncFailed { output: String, message: String },

    #[error("{0}")]
    Other(String),
}

impl LoggerError {
    pub fn write(output: impl Into<String>, source: std::io::Error) -> Self {
        LoggerError::Write {
            output: output.into(),
            source,
        }
    }

    pub fn config(component: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::InvalidConfiguration {
            component: component.into(),
            message: message.into(),
        }
    }

    pub fn output_path(path: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::OutputPath {
            path: path.into(),
            message: message.into(),
        }
    }

    pub fn sync_failed(output: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::SyncFailed {
            output: output.into(),
            message: message.into(),
        }
    }

    pub fn other(msg: impl Into<String>) -> Self {
        LoggerError::Other(msg.into())
    }
}
