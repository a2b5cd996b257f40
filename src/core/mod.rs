//! Core facade types and traits

pub mod config;
pub mod error;
pub mod field_value;
pub mod log_context;
pub mod log_entry;
pub mod log_level;
pub mod logger;
pub mod middleware;
pub mod output_format;
pub mod secret_mask;
pub mod template;
pub mod writer;

pub use config::{Config, Mode};
pub use error::{LoggerError, Result};
pub use field_value::FieldValue;
pub use log_context::{from_context, new_context, Context};
pub use log_entry::LogEntry;
pub use log_level::LogLevel;
pub use logger::{must, Logger};
pub use middleware::{
    default_middlewares, middleware, request_id_middleware, CtxMiddleware, REQUEST_ID_FIELD,
};
pub use output_format::OutputFormat;
pub use secret_mask::secret_mask;
pub use writer::{Caller, Writer};
