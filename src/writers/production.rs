//! Production writer: encodes entries and writes them to the configured outputs
//!
//! Two presets are selected by [`Mode`]:
//!
//! - **Development**: colorized text lines, stack traces from warning up
//! - **Production**: JSON lines carrying `rustVersion`, `pid` and (when it
//!   resolves) `hostname`, stack traces from error up
//!
//! Both presets default to standard output. Every writer derived through
//! [`Writer::with`] shares the same outputs.
//!
//! Panic-level entries panic after they are written; fatal-level entries exit
//! the process with status 1 after the outputs are flushed.

use crate::appenders::{self, Appender};
use crate::core::output_format::{pair_fields, OutputFormat, Record};
use crate::core::{
    secret_mask, template, Caller, Config, FieldValue, LogLevel, Mode, Result, Writer,
};
use chrono::Local;
use parking_lot::Mutex;
use std::backtrace::Backtrace;
use std::sync::Arc;

/// Compiler version recorded at build time.
pub const RUST_VERSION: &str = env!("LOGGER_FACADE_RUSTC_VERSION");

struct Core {
    format: OutputFormat,
    appenders: Mutex<Vec<Box<dyn Appender>>>,
    initial_fields: Vec<(String, FieldValue)>,
    /// Lowest level that carries a stack trace, `None` when disabled
    stacktrace_level: Option<LogLevel>,
    mask_secrets: bool,
}

impl Core {
    fn write(&self, line: &[u8]) {
        let masked;
        let line = if self.mask_secrets {
            masked = secret_mask(line);
            &masked[..]
        } else {
            line
        };

        let mut appenders = self.appenders.lock();
        for appender in appenders.iter_mut() {
            if let Err(e) = appender.append(line) {
                eprintln!("[LOGGER ERROR] Output '{}' failed: {}", appender.name(), e);
            }
        }
    }

    /// Flush every output, reporting the first failure after trying them all.
    fn flush(&self) -> Result<()> {
        let mut first_err = None;
        let mut appenders = self.appenders.lock();
        for appender in appenders.iter_mut() {
            if let Err(e) = appender.flush() {
                first_err.get_or_insert(e);
            }
        }
        match first_err {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

/// Writer backed by the built-in encoders and outputs.
#[derive(Clone)]
pub struct ProductionWriter {
    core: Arc<Core>,
    fields: Vec<FieldValue>,
}

impl ProductionWriter {
    /// Build the writer for `config`, opening every output destination.
    pub fn new(config: &Config) -> Result<Self> {
        let paths = config.output_paths();
        let appenders = appenders::open_all(&paths)?;

        let core = match config.mode {
            Mode::Development => Core {
                format: OutputFormat::Text {
                    colored: cfg!(feature = "console"),
                },
                appenders: Mutex::new(appenders),
                initial_fields: Vec::new(),
                stacktrace_level: (!config.disable_stacktrace).then_some(LogLevel::Warning),
                mask_secrets: config.mask_secrets,
            },
            Mode::Production => Core {
                format: OutputFormat::Json,
                appenders: Mutex::new(appenders),
                initial_fields: process_fields(),
                stacktrace_level: (!config.disable_stacktrace).then_some(LogLevel::Error),
                mask_secrets: config.mask_secrets,
            },
        };

        Ok(Self {
            core: Arc::new(core),
            fields: Vec::new(),
        })
    }

    fn emit(&self, level: LogLevel, caller: Caller, message: String) {
        let stacktrace = self
            .core
            .stacktrace_level
            .filter(|min| level >= *min)
            .map(|_| trim_to_caller(&Backtrace::force_capture().to_string(), caller));

        let fields = pair_fields(&self.fields);
        let record = Record {
            timestamp: Local::now(),
            level,
            caller,
            message,
            stacktrace,
            metadata: &self.core.initial_fields,
            fields: &fields,
        };
        let line = self.core.format.encode(&record);
        self.core.write(line.as_bytes());

        match level {
            LogLevel::Panic => {
                if let Err(e) = self.core.flush() {
                    eprintln!("[LOGGER ERROR] Flush before panic failed: {}", e);
                }
                panic!("{}", record.message);
            }
            LogLevel::Fatal => {
                if let Err(e) = self.core.flush() {
                    eprintln!("[LOGGER ERROR] Flush before exit failed: {}", e);
                }
                std::process::exit(1);
            }
            _ => {}
        }
    }
}

impl Writer for ProductionWriter {
    fn with(&self, fields: &[FieldValue]) -> Arc<dyn Writer> {
        let mut all = Vec::with_capacity(self.fields.len() + fields.len());
        all.extend_from_slice(&self.fields);
        all.extend_from_slice(fields);
        Arc::new(ProductionWriter {
            core: Arc::clone(&self.core),
            fields: all,
        })
    }

    fn log(&self, level: LogLevel, caller: Caller, args: &[FieldValue]) {
        self.emit(level, caller, template::join(args, " "));
    }

    fn logf(&self, level: LogLevel, caller: Caller, template: &str, args: &[FieldValue]) {
        self.emit(level, caller, template::render(template, args));
    }

    fn sync(&self) -> Result<()> {
        self.core.flush()
    }
}

impl std::fmt::Debug for ProductionWriter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProductionWriter")
            .field("format", &self.core.format)
            .field("fields", &self.fields)
            .finish_non_exhaustive()
    }
}

/// Runtime metadata attached to every production-preset entry.
fn process_fields() -> Vec<(String, FieldValue)> {
    let mut fields = vec![
        ("rustVersion".to_string(), FieldValue::from(RUST_VERSION)),
        ("pid".to_string(), FieldValue::from(std::process::id())),
    ];
    // lookup failure just omits the field
    if let Some(host) = hostname::get().ok().and_then(|h| h.into_string().ok()) {
        fields.push(("hostname".to_string(), FieldValue::from(host)));
    }
    fields
}

/// Drops the frames above the logging call site.
///
/// Falls back to the whole trace when no frame resolves to `caller`, which
/// happens in builds without debug info.
fn trim_to_caller(trace: &str, caller: Caller) -> String {
    let site = format!("{}:{}:", caller.file(), caller.line());
    let lines: Vec<&str> = trace.lines().collect();
    let Some(at) = lines
        .iter()
        .position(|l| l.trim_start().starts_with("at ") && l.contains(&site))
    else {
        return trace.to_string();
    };
    // the symbol line sits right above its location
    lines[at.saturating_sub(1)..].join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::panic::Location;
    use tempfile::tempdir;

    fn lines(path: &std::path::Path) -> Vec<serde_json::Value> {
        fs::read_to_string(path)
            .unwrap()
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect()
    }

    #[test]
    fn test_json_preset_metadata() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("app.jsonl");
        let config = Config::new().with_output_paths([path.display().to_string()]);

        let writer = ProductionWriter::new(&config)?;
        writer.log(LogLevel::Info, Location::caller(), &["hello".into(), "world".into()]);
        writer.sync()?;

        let entries = lines(&path);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0]["msg"], "hello world");
        assert_eq!(entries[0]["level"], "info");
        assert_eq!(entries[0]["rustVersion"], RUST_VERSION);
        assert_eq!(entries[0]["pid"], std::process::id());
        assert!(entries[0]["caller"]
            .as_str()
            .unwrap()
            .contains("production.rs:"));
        assert!(entries[0].get("stacktrace").is_none());
        Ok(())
    }

    #[test]
    fn test_children_share_outputs() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("app.jsonl");
        let config = Config::new().with_output_paths([path.display().to_string()]);

        let root = ProductionWriter::new(&config)?;
        let child = root.with(&["request_id".into(), "r-1".into()]);
        child.logf(LogLevel::Warning, Location::caller(), "took {}ms", &[30.into()]);
        root.log(LogLevel::Debug, Location::caller(), &["plain".into()]);
        root.sync()?;

        let entries = lines(&path);
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0]["msg"], "took 30ms");
        assert_eq!(entries[0]["request_id"], "r-1");
        assert!(entries[1].get("request_id").is_none());
        Ok(())
    }

    #[test]
    fn test_stacktrace_threshold() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("app.jsonl");
        let config = Config::new().with_output_paths([path.display().to_string()]);

        let writer = ProductionWriter::new(&config)?;
        writer.log(LogLevel::Warning, Location::caller(), &["warn".into()]);
        writer.log(LogLevel::Error, Location::caller(), &["err".into()]);
        writer.sync()?;

        let entries = lines(&path);
        assert!(entries[0].get("stacktrace").is_none());
        assert!(entries[1]["stacktrace"].is_string());
        Ok(())
    }

    #[test]
    fn test_bound_fields_cannot_forge_reserved_keys() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("app.jsonl");
        let config = Config::new().with_output_paths([path.display().to_string()]);

        let writer = ProductionWriter::new(&config)?.with(&[
            "level".into(),
            "debug".into(),
            "msg".into(),
            "forged".into(),
            "pid".into(),
            0.into(),
        ]);
        writer.log(LogLevel::Error, Location::caller(), &["real message".into()]);
        writer.sync()?;

        let entries = lines(&path);
        assert_eq!(entries[0]["level"], "error");
        assert_eq!(entries[0]["msg"], "real message");
        assert_eq!(entries[0]["pid"], std::process::id());
        assert_eq!(entries[0]["fields.level"], "debug");
        assert_eq!(entries[0]["fields.msg"], "forged");
        assert_eq!(entries[0]["fields.pid"], 0);
        Ok(())
    }

    #[test]
    fn test_trim_to_caller_drops_logger_frames() {
        let caller = Location::caller();
        let trace = format!(
            "   0: std::backtrace::Backtrace::force_capture\n\
             \x20            at /rustc/library/std/src/backtrace.rs:331:13\n\
             \x20  1: logger_facade::writers::production::ProductionWriter::emit\n\
             \x20            at ./src/writers/production.rs:114:20\n\
             \x20  2: app::handler\n\
             \x20            at ./{}:{}:9\n\
             \x20  3: app::main",
            caller.file(),
            caller.line()
        );

        let trimmed = trim_to_caller(&trace, caller);
        assert!(trimmed.starts_with("   2: app::handler"));
        assert!(trimmed.ends_with("   3: app::main"));
        assert!(!trimmed.contains("ProductionWriter::emit"));

        let unrelated = "   0: main\n             at ./src/main.rs:1:1";
        assert_eq!(trim_to_caller(unrelated, caller), unrelated);
    }

    #[test]
    fn test_error_stacktrace_starts_at_caller() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("app.jsonl");
        let config = Config::new().with_output_paths([path.display().to_string()]);

        let writer = ProductionWriter::new(&config)?;
        writer.log(LogLevel::Error, Location::caller(), &["err".into()]);
        writer.sync()?;

        let entries = lines(&path);
        let trace = entries[0]["stacktrace"].as_str().unwrap();
        let site = format!("{}:", entries[0]["caller"].as_str().unwrap());
        // frames only resolve to a line when debug info is present
        if trace.contains(&site) {
            assert!(!trace.contains("ProductionWriter::emit"));
            assert!(!trace.contains("force_capture"));
        }
        Ok(())
    }

    #[test]
    fn test_stacktrace_disabled() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("app.jsonl");
        let config = Config::new()
            .with_output_paths([path.display().to_string()])
            .disable_stacktrace();

        let writer = ProductionWriter::new(&config)?;
        writer.log(LogLevel::Error, Location::caller(), &["err".into()]);
        writer.sync()?;

        assert!(lines(&path)[0].get("stacktrace").is_none());
        Ok(())
    }

    #[test]
    fn test_development_preset_text() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("dev.log");
        let config = Config::development()
            .with_output_paths([path.display().to_string()])
            .disable_stacktrace();

        let writer = ProductionWriter::new(&config)?;
        writer
            .with(&["k".into(), "v".into()])
            .log(LogLevel::Info, Location::caller(), &["started".into()]);
        writer.sync()?;

        let content = fs::read_to_string(&path)?;
        assert_eq!(content.lines().count(), 1);
        assert!(content.contains("INFO"));
        assert!(content.contains(" - started k=v"));
        assert!(!content.contains("pid="));
        Ok(())
    }

    #[test]
    fn test_mask_secrets() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("masked.jsonl");
        let config = Config::new()
            .with_output_paths([path.display().to_string()])
            .mask_secrets();

        let writer = ProductionWriter::new(&config)?;
        writer.log(
            LogLevel::Info,
            Location::caller(),
            &["Authorization: Bearer abctoken123".into()],
        );
        writer.sync()?;

        let content = fs::read_to_string(&path)?;
        assert!(content.contains("Bearer abc*****"));
        assert!(!content.contains("abctoken123"));
        Ok(())
    }

    #[test]
    fn test_panic_level_panics_after_writing() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("panic.jsonl");
        let config = Config::new().with_output_paths([path.display().to_string()]);
        let writer = ProductionWriter::new(&config).unwrap();

        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            writer.log(LogLevel::Panic, Location::caller(), &["boom".into()]);
        }));

        assert!(result.is_err());
        let entries = lines(&path);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0]["level"], "panic");
        assert_eq!(entries[0]["msg"], "boom");
    }

    #[test]
    fn test_bad_output_path() {
        let config = Config::new().with_output_paths(["/nonexistent-dir/for/sure/app.log"]);
        assert!(matches!(
            ProductionWriter::new(&config),
            Err(crate::core::LoggerError::OutputPath { .. })
        ));
    }
}
