//! # Logger Facade
//!
//! A structured-logging facade: application code logs through [`Logger`]
//! without depending on a concrete backend.
//!
//! ## Features
//!
//! - **Pluggable writers**: production (JSON or colorized text), no-op, and
//!   an in-memory [`Recorder`] for tests
//! - **Immutable loggers**: `with*` methods return new loggers, safe to share
//! - **Context middlewares**: derive fields such as `request_id` from a
//!   request [`Context`]
//! - **Secret masking**: redact credentials from encoded output
//!
//! ## Example
//!
//! ```
//! use logger_facade::prelude::*;
//! use logger_facade::info;
//!
//! let recorder = Recorder::new();
//! let logger = Logger::from_writer(Config::default(), recorder.clone());
//!
//! let ctx = new_context(&Context::background(), "abc-123");
//! info!(logger.with_context(&ctx), "request", "handled");
//!
//! assert_eq!(
//!     String::from_utf8(recorder.dump()).unwrap(),
//!     "[info   ] [request, handled] {request_id, abc-123}\n"
//! );
//! ```

pub mod appenders;
pub mod core;
pub mod macros;
pub mod writers;

pub mod prelude {
    pub use crate::core::{
        default_middlewares, from_context, middleware, must, new_context, request_id_middleware,
        secret_mask, Config, Context, CtxMiddleware, FieldValue, LogEntry, LogLevel, Logger,
        LoggerError, Mode, Result, Writer,
    };
    pub use crate::writers::{NoOpWriter, ProductionWriter, Recorder};
}

pub use crate::core::{
    default_middlewares, from_context, middleware, must, new_context, request_id_middleware,
    secret_mask, Config, Context, CtxMiddleware, FieldValue, LogEntry, LogLevel, Logger,
    LoggerError, Mode, Result, Writer,
};
pub use crate::writers::{NoOpWriter, ProductionWriter, Recorder};
