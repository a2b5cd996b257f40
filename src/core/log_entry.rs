//! Log entry structure

use super::field_value::FieldValue;
use super::log_level::LogLevel;
use super::template;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A single captured log call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    pub level: LogLevel,
    /// Template of a formatted call, `None` for plain calls
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template: Option<String>,
    pub args: Vec<FieldValue>,
    /// Fields bound on the writer at emission time
    pub fields: Vec<FieldValue>,
}

impl LogEntry {
    pub fn new(level: LogLevel, args: &[FieldValue]) -> Self {
        Self {
            level,
            template: None,
            args: args.to_vec(),
            fields: Vec::new(),
        }
    }

    pub fn formatted(level: LogLevel, template: &str, args: &[FieldValue]) -> Self {
        Self {
            level,
            template: Some(template.to_string()),
            args: args.to_vec(),
            fields: Vec::new(),
        }
    }

    pub fn with_fields(mut self, fields: &[FieldValue]) -> Self {
        self.fields = fields.to_vec();
        self
    }

    /// The template if it is present and non-empty.
    pub fn template(&self) -> Option<&str> {
        self.template.as_deref().filter(|t| !t.is_empty())
    }

    /// Message text: the interpolated template, or the arguments joined by
    /// spaces.
    pub fn message(&self) -> String {
        match self.template() {
            Some(t) => template::render(t, &self.args),
            None => template::join(&self.args, " "),
        }
    }
}

/// Renders `[level  ] message {field, field}` without a trailing newline.
///
/// The level is left-aligned to width 7. A formatted entry shows its
/// interpolated template, a plain entry shows its arguments as `[a, b]`
/// (omitted when there are none).
impl fmt::Display for LogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{:<7}]", self.level)?;

        match self.template() {
            Some(t) => write!(f, " {}", template::render(t, &self.args))?,
            None if !self.args.is_empty() => {
                write!(f, " [{}]", template::join(&self.args, ", "))?
            }
            None => {}
        }

        write!(f, " {{{}}}", template::join(&self.fields, ", "))
    }
}
