//! Logging macros for building argument slices at the call site.
//!
//! Every argument goes through `FieldValue::from`, so strings, integers,
//! floats, bools and options can be mixed freely.
//!
//! # Examples
//!
//! ```
//! use logger_facade::prelude::*;
//! use logger_facade::{fields, info, logf};
//!
//! let recorder = Recorder::new();
//! let logger = Logger::from_writer(Config::default(), recorder.clone());
//!
//! // Plain arguments
//! info!(logger, "server started", 8080);
//!
//! // Runtime template
//! let user_id = 42;
//! logf!(logger, LogLevel::Info, "user {} performed {}", user_id, "login");
//!
//! // Bound fields
//! let scoped = logger.with(&fields!["component", "auth"]);
//! info!(scoped, "ready");
//!
//! assert_eq!(recorder.entries().len(), 3);
//! ```

/// Build a `Vec<FieldValue>` from heterogeneous values.
///
/// ```
/// use logger_facade::{fields, FieldValue};
///
/// let f = fields!["retries", 3, "ok", true];
/// assert_eq!(f, vec![
///     FieldValue::from("retries"),
///     FieldValue::from(3),
///     FieldValue::from("ok"),
///     FieldValue::from(true),
/// ]);
/// ```
#[macro_export]
macro_rules! fields {
    () => {
        ::std::vec::Vec::<$crate::FieldValue>::new()
    };
    ($($value:expr),+ $(,)?) => {
        ::std::vec![$($crate::FieldValue::from($value)),+]
    };
}

/// Log plain arguments at the given level.
///
/// ```
/// # use logger_facade::prelude::*;
/// # let logger = Logger::default();
/// use logger_facade::log;
/// log!(logger, LogLevel::Info, "simple message");
/// log!(logger, LogLevel::Error, "error code", 500);
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $level:expr $(, $arg:expr)* $(,)?) => {
        $logger.log($level, &[$($crate::FieldValue::from($arg)),*])
    };
}

/// Log a runtime template at the given level.
///
/// ```
/// # use logger_facade::prelude::*;
/// # let logger = Logger::default();
/// use logger_facade::logf;
/// logf!(logger, LogLevel::Warning, "retry {} of {}", 3, 5);
/// ```
#[macro_export]
macro_rules! logf {
    ($logger:expr, $level:expr, $template:expr $(, $arg:expr)* $(,)?) => {
        $logger.logf($level, $template, &[$($crate::FieldValue::from($arg)),*])
    };
}

/// Log a debug-level entry.
#[macro_export]
macro_rules! debug {
    ($logger:expr $(, $arg:expr)* $(,)?) => {
        $crate::log!($logger, $crate::LogLevel::Debug $(, $arg)*)
    };
}

/// Log an info-level entry.
#[macro_export]
macro_rules! info {
    ($logger:expr $(, $arg:expr)* $(,)?) => {
        $crate::log!($logger, $crate::LogLevel::Info $(, $arg)*)
    };
}

/// Log a warning-level entry.
#[macro_export]
macro_rules! warn {
    ($logger:expr $(, $arg:expr)* $(,)?) => {
        $crate::log!($logger, $crate::LogLevel::Warning $(, $arg)*)
    };
}

/// Log an error-level entry.
#[macro_export]
macro_rules! error {
    ($logger:expr $(, $arg:expr)* $(,)?) => {
        $crate::log!($logger, $crate::LogLevel::Error $(, $arg)*)
    };
}

/// Log a fatal-level entry. With the production writer this exits the
/// process.
#[macro_export]
macro_rules! fatal {
    ($logger:expr $(, $arg:expr)* $(,)?) => {
        $crate::log!($logger, $crate::LogLevel::Fatal $(, $arg)*)
    };
}

#[cfg(test)]
mod tests {
    use crate::core::{Config, FieldValue, LogLevel, Logger};
    use crate::writers::Recorder;

    fn recorded() -> (Logger, Recorder) {
        let recorder = Recorder::new();
        (Logger::from_writer(Config::default(), recorder.clone()), recorder)
    }

    #[test]
    fn test_fields_macro() {
        assert!(fields![].is_empty());
        assert_eq!(
            fields!["a", 1, None::<i32>,],
            vec![FieldValue::from("a"), FieldValue::from(1), FieldValue::Null]
        );
    }

    #[test]
    fn test_log_macro() {
        let (logger, recorder) = recorded();
        log!(logger, LogLevel::Info);
        log!(logger, LogLevel::Info, "Test message", 42);

        let entries = recorder.entries();
        assert!(entries[0].args.is_empty());
        assert_eq!(entries[1].args, vec![FieldValue::from("Test message"), 42.into()]);
    }

    #[test]
    fn test_logf_macro() {
        let (logger, recorder) = recorded();
        logf!(logger, LogLevel::Warning, "Retry {} of {}", 1, 3);

        let entries = recorder.entries();
        assert_eq!(entries[0].message(), "Retry 1 of 3");
    }

    #[test]
    fn test_level_macros() {
        let (logger, recorder) = recorded();
        debug!(logger, "Debug message");
        info!(logger, "Items", 100);
        warn!(logger, "Warning message");
        error!(logger, "Code", 500);
        fatal!(logger, "Fatal message");

        let levels: Vec<LogLevel> = recorder.entries().iter().map(|e| e.level).collect();
        assert_eq!(
            levels,
            vec![
                LogLevel::Debug,
                LogLevel::Info,
                LogLevel::Warning,
                LogLevel::Error,
                LogLevel::Fatal
            ]
        );
    }
}
