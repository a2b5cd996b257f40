//! Writer trait for pluggable log sinks

use super::{error::Result, field_value::FieldValue, log_level::LogLevel};
use std::panic::Location;
use std::sync::Arc;

/// Call site of a log statement, captured by the facade.
pub type Caller = &'static Location<'static>;

/// A sink that accepts leveled entries.
///
/// Writers form scope chains: [`Writer::with`] returns a child that carries
/// the parent's fields followed by the new ones and shares the parent's
/// underlying sink.
pub trait Writer: Send + Sync {
    /// Derive a child writer with `fields` bound after the existing ones.
    fn with(&self, fields: &[FieldValue]) -> Arc<dyn Writer>;

    fn log(&self, level: LogLevel, caller: Caller, args: &[FieldValue]);

    fn logf(&self, level: LogLevel, caller: Caller, template: &str, args: &[FieldValue]);

    /// Flush anything buffered by the underlying sink.
    fn sync(&self) -> Result<()>;
}
