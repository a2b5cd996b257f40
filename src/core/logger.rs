//! Logger facade

use super::{
    config::Config,
    error::Result,
    field_value::FieldValue,
    log_context::Context,
    log_level::LogLevel,
    middleware::{default_middlewares, CtxMiddleware},
    writer::Writer,
};
use crate::writers::{NoOpWriter, ProductionWriter};
use std::fmt;
use std::panic::Location;
use std::sync::Arc;

/// Entry point for application logging.
///
/// A `Logger` is an immutable value: every `with*` method returns a new
/// logger and leaves the receiver untouched, so loggers can be cloned and
/// shared across threads freely.
///
/// `Logger::default()` has no writer bound and discards everything.
///
/// # Example
///
/// ```
/// use logger_facade::prelude::*;
///
/// let recorder = Recorder::new();
/// let config = Config::default().with_level(LogLevel::Info);
/// let logger = Logger::from_writer(config, recorder.clone());
///
/// logger.debug(&["filtered out".into()]);
/// logger.infof("processed {} items", &[3.into()]);
///
/// assert_eq!(recorder.entries().len(), 1);
/// ```
#[derive(Clone, Default)]
pub struct Logger {
    writer: Option<Arc<dyn Writer>>,
    level: LogLevel,
    ctx_middlewares: Arc<Vec<CtxMiddleware>>,
}

impl Logger {
    /// Build a logger over the built-in production writer.
    ///
    /// Fails when an output destination cannot be opened.
    pub fn new(config: Config) -> Result<Self> {
        let writer = ProductionWriter::new(&config)?;
        Ok(Self::from_writer(config, writer))
    }

    /// Build a logger around any writer.
    pub fn from_writer<W: Writer + 'static>(config: Config, writer: W) -> Self {
        Self::from_shared_writer(config, Arc::new(writer))
    }

    /// Build a logger around an already shared writer.
    pub fn from_shared_writer(config: Config, writer: Arc<dyn Writer>) -> Self {
        let mut ctx_middlewares = config.ctx_middlewares;
        if !config.skip_default_middlewares {
            ctx_middlewares.extend(default_middlewares());
        }

        Self {
            writer: Some(writer),
            level: config.level,
            ctx_middlewares: Arc::new(ctx_middlewares),
        }
    }

    /// A logger bound to the no-op writer; equivalent to `Logger::default()`
    /// plus the default middlewares.
    pub fn noop() -> Self {
        Self::from_shared_writer(Config::default(), NoOpWriter::shared())
    }

    /// Minimum level that reaches the writer.
    pub fn level(&self) -> LogLevel {
        self.level
    }

    /// Whether an entry at `level` would reach the writer.
    pub fn enabled(&self, level: LogLevel) -> bool {
        level >= self.level
    }

    /// The bound writer, or the shared no-op writer when none is bound.
    pub fn writer(&self) -> Arc<dyn Writer> {
        match self.writer {
            Some(ref writer) => Arc::clone(writer),
            None => NoOpWriter::shared(),
        }
    }

    #[inline]
    #[track_caller]
    pub fn debug(&self, args: &[FieldValue]) {
        self.log(LogLevel::Debug, args);
    }

    #[inline]
    #[track_caller]
    pub fn debugf(&self, template: &str, args: &[FieldValue]) {
        self.logf(LogLevel::Debug, template, args);
    }

    #[inline]
    #[track_caller]
    pub fn info(&self, args: &[FieldValue]) {
        self.log(LogLevel::Info, args);
    }

    #[inline]
    #[track_caller]
    pub fn infof(&self, template: &str, args: &[FieldValue]) {
        self.logf(LogLevel::Info, template, args);
    }

    #[inline]
    #[track_caller]
    pub fn warn(&self, args: &[FieldValue]) {
        self.log(LogLevel::Warning, args);
    }

    #[inline]
    #[track_caller]
    pub fn warnf(&self, template: &str, args: &[FieldValue]) {
        self.logf(LogLevel::Warning, template, args);
    }

    #[inline]
    #[track_caller]
    pub fn error(&self, args: &[FieldValue]) {
        self.log(LogLevel::Error, args);
    }

    #[inline]
    #[track_caller]
    pub fn errorf(&self, template: &str, args: &[FieldValue]) {
        self.logf(LogLevel::Error, template, args);
    }

    /// Log at panic level. The production writer panics after writing.
    #[inline]
    #[track_caller]
    pub fn panic(&self, args: &[FieldValue]) {
        self.log(LogLevel::Panic, args);
    }

    /// Log at panic level. The production writer panics after writing.
    #[inline]
    #[track_caller]
    pub fn panicf(&self, template: &str, args: &[FieldValue]) {
        self.logf(LogLevel::Panic, template, args);
    }

    /// Log at fatal level. The production writer exits the process after
    /// writing.
    #[inline]
    #[track_caller]
    pub fn fatal(&self, args: &[FieldValue]) {
        self.log(LogLevel::Fatal, args);
    }

    /// Log at fatal level. The production writer exits the process after
    /// writing.
    #[inline]
    #[track_caller]
    pub fn fatalf(&self, template: &str, args: &[FieldValue]) {
        self.logf(LogLevel::Fatal, template, args);
    }

    #[track_caller]
    pub fn log(&self, level: LogLevel, args: &[FieldValue]) {
        if level < self.level {
            return;
        }
        let caller = Location::caller();
        match self.writer {
            Some(ref writer) => writer.log(level, caller, args),
            None => NoOpWriter.log(level, caller, args),
        }
    }

    #[track_caller]
    pub fn logf(&self, level: LogLevel, template: &str, args: &[FieldValue]) {
        if level < self.level {
            return;
        }
        let caller = Location::caller();
        match self.writer {
            Some(ref writer) => writer.logf(level, caller, template, args),
            None => NoOpWriter.logf(level, caller, template, args),
        }
    }

    /// Log at `true_level` when `condition` holds, otherwise at `false_level`.
    ///
    /// ```
    /// # use logger_facade::prelude::*;
    /// # let logger = Logger::default();
    /// let result: std::result::Result<u32, String> = Ok(7);
    /// logger.cond(
    ///     result.is_ok(),
    ///     LogLevel::Debug,
    ///     LogLevel::Error,
    ///     &["operation X completed".into()],
    /// );
    /// ```
    #[track_caller]
    pub fn cond(
        &self,
        condition: bool,
        true_level: LogLevel,
        false_level: LogLevel,
        args: &[FieldValue],
    ) {
        self.log(conditional(condition, true_level, false_level), args);
    }

    #[track_caller]
    pub fn condf(
        &self,
        condition: bool,
        true_level: LogLevel,
        false_level: LogLevel,
        template: &str,
        args: &[FieldValue],
    ) {
        self.logf(conditional(condition, true_level, false_level), template, args);
    }

    /// Return a logger whose entries carry `fields` (alternating keys and
    /// values) after any fields already bound.
    #[must_use]
    pub fn with(&self, fields: &[FieldValue]) -> Self {
        let writer = match self.writer {
            Some(ref writer) => writer.with(fields),
            None => NoOpWriter.with(fields),
        };
        self.clone_with(writer)
    }

    /// Return a logger with `middlewares` appended to the existing ones.
    #[must_use]
    pub fn with_middleware<I>(&self, middlewares: I) -> Self
    where
        I: IntoIterator<Item = CtxMiddleware>,
    {
        let mut all = Vec::clone(&self.ctx_middlewares);
        all.extend(middlewares);
        Self {
            writer: self.writer.clone(),
            level: self.level,
            ctx_middlewares: Arc::new(all),
        }
    }

    /// Bind the fields every middleware extracts from `ctx`, in registration
    /// order. When no middleware yields anything the receiver is returned as
    /// is, writer included.
    #[must_use]
    pub fn with_context(&self, ctx: &Context) -> Self {
        let fields: Vec<FieldValue> = self
            .ctx_middlewares
            .iter()
            .flat_map(|middleware| middleware(ctx))
            .collect();

        if fields.is_empty() {
            return self.clone();
        }
        self.with(&fields)
    }

    /// Bind `err` under the `error` key.
    #[must_use]
    pub fn with_error<E>(&self, err: &E) -> Self
    where
        E: std::error::Error + ?Sized,
    {
        self.with(&["error".into(), FieldValue::display(err)])
    }

    /// Flush the bound writer.
    pub fn sync(&self) -> Result<()> {
        match self.writer {
            Some(ref writer) => writer.sync(),
            None => NoOpWriter.sync(),
        }
    }

    fn clone_with(&self, writer: Arc<dyn Writer>) -> Self {
        Self {
            writer: Some(writer),
            level: self.level,
            ctx_middlewares: Arc::clone(&self.ctx_middlewares),
        }
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("bound", &self.writer.is_some())
            .field("level", &self.level)
            .field("ctx_middlewares", &self.ctx_middlewares.len())
            .finish()
    }
}

/// Unwrap a constructor result, panicking on failure.
///
/// ```no_run
/// use logger_facade::{must, Config, Logger};
///
/// let logger = must(Logger::new(Config::default()));
/// logger.info(&["ready".into()]);
/// ```
pub fn must(result: Result<Logger>) -> Logger {
    match result {
        Ok(logger) => logger,
        Err(e) => panic!("failed to build logger: {}", e),
    }
}

fn conditional(condition: bool, true_level: LogLevel, false_level: LogLevel) -> LogLevel {
    if condition {
        true_level
    } else {
        false_level
    }
}
