//! Line encoders for the production writer
//!
//! - Text: human-readable line with an optionally colorized level
//! - Json: one JSON object per line with fixed leading keys

use super::field_value::FieldValue;
use super::log_level::LogLevel;
use super::writer::Caller;
use chrono::{DateTime, Local};

const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3f%z";

/// Keys every JSON line owns. `logger` is held back for named loggers.
const RESERVED_KEYS: [&str; 6] = ["ts", "level", "logger", "caller", "msg", "stacktrace"];

/// Everything an encoder needs for one line.
#[derive(Debug, Clone)]
pub struct Record<'a> {
    pub timestamp: DateTime<Local>,
    pub level: LogLevel,
    pub caller: Caller,
    pub message: String,
    pub stacktrace: Option<String>,
    /// Process metadata fixed at construction
    pub metadata: &'a [(String, FieldValue)],
    /// Fields bound on the writer
    pub fields: &'a [(String, FieldValue)],
}

/// Output format for encoded lines
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// One line per entry:
    ///
    /// `[2025-01-08T10:30:45.123+0000] [INFO ] src/main.rs:12 - Done user=bob`
    Text { colored: bool },

    /// One object per line:
    ///
    /// `{"ts":"2025-01-08T10:30:45.123+0000","level":"info","caller":"src/main.rs:12",...}`
    Json,
}

impl OutputFormat {
    /// Encode `record` as a single newline-terminated line (the stack trace,
    /// when present, follows on its own lines in text mode).
    pub fn encode(&self, record: &Record<'_>) -> String {
        let mut line = match self {
            OutputFormat::Text { colored } => Self::format_text(record, *colored),
            OutputFormat::Json => Self::format_json(record),
        };
        line.push('\n');
        line
    }

    fn format_text(record: &Record<'_>, colored: bool) -> String {
        let level = format!("{:5}", record.level.label());
        let level = if colored { colorize(level, record.level) } else { level };

        let mut out = format!(
            "[{}] [{}] {}:{} - {}",
            record.timestamp.format(TIMESTAMP_FORMAT),
            level,
            record.caller.file(),
            record.caller.line(),
            sanitize(&record.message)
        );

        for (key, value) in record.metadata.iter().chain(record.fields) {
            out.push(' ');
            out.push_str(&sanitize(key));
            out.push('=');
            out.push_str(&sanitize(&value.to_string()));
        }

        if let Some(ref trace) = record.stacktrace {
            out.push('\n');
            out.push_str(trace.trim_end());
        }

        out
    }

    fn format_json(record: &Record<'_>) -> String {
        let mut json_obj = serde_json::Map::new();

        json_obj.insert(
            "ts".to_string(),
            serde_json::Value::String(record.timestamp.format(TIMESTAMP_FORMAT).to_string()),
        );
        json_obj.insert(
            "level".to_string(),
            serde_json::Value::String(record.level.as_str().to_string()),
        );
        json_obj.insert(
            "caller".to_string(),
            serde_json::Value::String(format!(
                "{}:{}",
                record.caller.file(),
                record.caller.line()
            )),
        );
        json_obj.insert(
            "msg".to_string(),
            serde_json::Value::String(record.message.clone()),
        );
        if let Some(ref trace) = record.stacktrace {
            json_obj.insert(
                "stacktrace".to_string(),
                serde_json::Value::String(trace.clone()),
            );
        }

        for (key, value) in record.metadata {
            json_obj.insert(key.clone(), value.to_json_value());
        }

        // bound fields never replace a reserved or metadata key
        for (key, value) in record.fields {
            let key = if RESERVED_KEYS.contains(&key.as_str())
                || record.metadata.iter().any(|(k, _)| k == key)
            {
                format!("fields.{}", key)
            } else {
                key.clone()
            };
            json_obj.insert(key, value.to_json_value());
        }

        serde_json::to_string(&serde_json::Value::Object(json_obj)).unwrap_or_default()
    }
}

/// Pair a flat field list into `(key, value)` entries.
///
/// Keys use their display form. A dangling final key is paired with `null`.
pub fn pair_fields(flat: &[FieldValue]) -> Vec<(String, FieldValue)> {
    flat.chunks(2)
        .map(|pair| {
            let key = pair[0].to_string();
            let value = pair.get(1).cloned().unwrap_or(FieldValue::Null);
            (key, value)
        })
        .collect()
}

/// Escape line breaks and tabs so one entry stays on one line.
fn sanitize(s: &str) -> String {
    s.replace('\n', "\\n")
        .replace('\r', "\\r")
        .replace('\t', "\\t")
}

#[cfg(feature = "console")]
fn colorize(label: String, level: LogLevel) -> String {
    use colored::Colorize;
    label.color(level.color_code()).to_string()
}

#[cfg(not(feature = "console"))]
fn colorize(label: String, _level: LogLevel) -> String {
    label
}
