//! Writer that discards everything

use crate::core::{Caller, FieldValue, LogLevel, Result, Writer};
use std::sync::{Arc, LazyLock};

static SHARED: LazyLock<Arc<dyn Writer>> = LazyLock::new(|| Arc::new(NoOpWriter));

/// Discards every entry. Never panics or exits, whatever the level.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpWriter;

impl NoOpWriter {
    /// The process-wide instance used by loggers with no writer bound.
    pub fn shared() -> Arc<dyn Writer> {
        Arc::clone(&SHARED)
    }
}

impl Writer for NoOpWriter {
    fn with(&self, _fields: &[FieldValue]) -> Arc<dyn Writer> {
        Self::shared()
    }

    fn log(&self, _level: LogLevel, _caller: Caller, _args: &[FieldValue]) {}

    fn logf(&self, _level: LogLevel, _caller: Caller, _template: &str, _args: &[FieldValue]) {}

    fn sync(&self) -> Result<()> {
        Ok(())
    }
}
