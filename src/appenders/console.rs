//! Console appender implementation

use super::Appender;
use crate::core::{LoggerError, Result};
use std::io::Write;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stream {
    Stdout,
    Stderr,
}

/// Writes lines to the process's standard output or standard error.
#[derive(Debug)]
pub struct ConsoleAppender {
    stream: Stream,
}

impl ConsoleAppender {
    pub fn stdout() -> Self {
        Self {
            stream: Stream::Stdout,
        }
    }

    pub fn stderr() -> Self {
        Self {
            stream: Stream::Stderr,
        }
    }
}

impl Default for ConsoleAppender {
    fn default() -> Self {
        Self::stdout()
    }
}

impl Appender for ConsoleAppender {
    fn append(&mut self, line: &[u8]) -> Result<()> {
        let written = match self.stream {
            Stream::Stdout => std::io::stdout().lock().write_all(line),
            Stream::Stderr => std::io::stderr().lock().write_all(line),
        };
        written.map_err(|e| LoggerError::write(self.name(), e))
    }

    fn flush(&mut self) -> Result<()> {
        let flushed = match self.stream {
            Stream::Stdout => std::io::stdout().flush(),
            Stream::Stderr => std::io::stderr().flush(),
        };
        flushed.map_err(|e| LoggerError::sync_failed(self.name(), e.to_string()))
    }

    fn name(&self) -> &str {
        match self.stream {
            Stream::Stdout => "stdout",
            Stream::Stderr => "stderr",
        }
    }
}
