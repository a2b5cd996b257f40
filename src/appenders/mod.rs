//! Output destinations for the production writer
//!
//! An appender receives fully encoded lines. Destinations are named by
//! identifiers: `stdout`, `stderr`, `file://<path>` or a plain path.

pub mod console;
pub mod file;

pub use console::ConsoleAppender;
pub use file::FileAppender;

use crate::core::{LoggerError, Result};

pub trait Appender: Send {
    fn append(&mut self, line: &[u8]) -> Result<()>;
    fn flush(&mut self) -> Result<()>;
    fn name(&self) -> &str;
}

/// Open the destination named by `identifier`.
pub fn open(identifier: &str) -> Result<Box<dyn Appender>> {
    match identifier {
        "" => Err(LoggerError::config(
            "output_paths",
            "empty output identifier",
        )),
        "stdout" => Ok(Box::new(ConsoleAppender::stdout())),
        "stderr" => Ok(Box::new(ConsoleAppender::stderr())),
        other => {
            let path = other.strip_prefix("file://").unwrap_or(other);
            Ok(Box::new(FileAppender::new(path)?))
        }
    }
}

/// Open every destination, failing on the first one that cannot be opened.
pub fn open_all(identifiers: &[String]) -> Result<Vec<Box<dyn Appender>>> {
    identifiers.iter().map(|id| open(id)).collect()
}
