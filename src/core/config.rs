//! Logger construction settings

use super::error::Result;
use super::log_level::LogLevel;
use super::middleware::CtxMiddleware;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Backend preset selected by the `log` setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Mode {
    /// Colorized, human-readable lines
    Development,
    /// One JSON object per line, enriched with process metadata
    #[default]
    Production,
}

impl Mode {
    /// `"Dev"` selects development; anything else selects production.
    pub fn from_setting(setting: &str) -> Self {
        if setting == "Dev" {
            Mode::Development
        } else {
            Mode::Production
        }
    }
}

impl From<String> for Mode {
    fn from(s: String) -> Self {
        Mode::from_setting(&s)
    }
}

impl From<Mode> for String {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::Development => "Dev".to_string(),
            Mode::Production => "Prod".to_string(),
        }
    }
}

/// Settings used to build a [`Logger`](super::Logger).
///
/// Deserializable from any serde format; middlewares are code and can only
/// be supplied programmatically.
///
/// # Example
///
/// ```
/// use logger_facade::prelude::*;
///
/// let config = Config::development()
///     .with_level(LogLevel::Info)
///     .with_output_paths(["stderr"])
///     .disable_stacktrace();
///
/// assert_eq!(config.mode, Mode::Development);
/// assert_eq!(config.output_paths(), vec!["stderr".to_string()]);
/// ```
#[derive(Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Backend preset
    #[serde(rename = "log")]
    pub mode: Mode,

    /// Entries below this level are discarded
    pub level: LogLevel,

    /// Output destinations; `None` means standard output
    pub output_paths: Option<Vec<String>>,

    /// Extra context middlewares, run before the defaults
    #[serde(skip)]
    pub ctx_middlewares: Vec<CtxMiddleware>,

    /// Do not append the default middlewares
    pub skip_default_middlewares: bool,

    /// Never attach stack traces
    pub disable_stacktrace: bool,

    /// Pass every encoded line through the secret mask
    pub mask_secrets: bool,
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a JSON configuration document. Missing keys keep their defaults.
    pub fn from_json(document: &str) -> Result<Self> {
        Ok(serde_json::from_str(document)?)
    }

    /// Start from the development preset.
    pub fn development() -> Self {
        Self {
            mode: Mode::Development,
            ..Self::default()
        }
    }

    #[must_use = "builder methods return a new value"]
    pub fn with_mode(mut self, mode: Mode) -> Self {
        self.mode = mode;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn with_level(mut self, level: LogLevel) -> Self {
        self.level = level;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn with_output_paths<I, S>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.output_paths = Some(paths.into_iter().map(Into::into).collect());
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn with_middleware(mut self, middleware: CtxMiddleware) -> Self {
        self.ctx_middlewares.push(middleware);
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn skip_default_middlewares(mut self) -> Self {
        self.skip_default_middlewares = true;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn disable_stacktrace(mut self) -> Self {
        self.disable_stacktrace = true;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn mask_secrets(mut self) -> Self {
        self.mask_secrets = true;
        self
    }

    /// Effective output destinations.
    pub fn output_paths(&self) -> Vec<String> {
        self.output_paths
            .clone()
            .unwrap_or_else(|| vec!["stdout".to_string()])
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("mode", &self.mode)
            .field("level", &self.level)
            .field("output_paths", &self.output_paths)
            .field("ctx_middlewares", &self.ctx_middlewares.len())
            .field("skip_default_middlewares", &self.skip_default_middlewares)
            .field("disable_stacktrace", &self.disable_stacktrace)
            .field("mask_secrets", &self.mask_secrets)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.mode, Mode::Production);
        assert_eq!(config.level, LogLevel::Debug);
        assert_eq!(config.output_paths, None);
        assert_eq!(config.output_paths(), vec!["stdout".to_string()]);
        assert!(config.ctx_middlewares.is_empty());
        assert!(!config.skip_default_middlewares);
        assert!(!config.disable_stacktrace);
        assert!(!config.mask_secrets);
    }

    #[test]
    fn test_mode_from_setting() {
        assert_eq!(Mode::from_setting("Dev"), Mode::Development);
        assert_eq!(Mode::from_setting("dev"), Mode::Production);
        assert_eq!(Mode::from_setting(""), Mode::Production);
    }

    #[test]
    fn test_empty_output_paths_are_kept() {
        let config = Config::new().with_output_paths(Vec::<String>::new());
        assert!(config.output_paths().is_empty());
    }

    #[test]
    fn test_deserialize() {
        let config: Config = serde_json::from_str(
            r#"{
                "log": "Dev",
                "level": "WARNING",
                "output_paths": ["stderr", "/tmp/app.log"],
                "disable_stacktrace": true
            }"#,
        )
        .unwrap();

        assert_eq!(config.mode, Mode::Development);
        assert_eq!(config.level, LogLevel::Warning);
        assert_eq!(
            config.output_paths(),
            vec!["stderr".to_string(), "/tmp/app.log".to_string()]
        );
        assert!(config.disable_stacktrace);
        assert!(!config.skip_default_middlewares);
    }

    #[test]
    fn test_from_json_empty_document() {
        let config = Config::from_json("{}").unwrap();
        assert_eq!(config.mode, Mode::Production);
        assert_eq!(config.level, LogLevel::Debug);
    }

    #[test]
    fn test_from_json_rejects_malformed_document() {
        assert!(matches!(
            Config::from_json(r#"{"log": "#),
            Err(crate::core::LoggerError::ConfigDocument(_))
        ));
    }
}
