//! Command configuration parsed from environment variables.
//!
//! Logging and loader settings can be overridden via environment variables
//! prefixed with `RSTEST_BDD_DATA_`. Command-line flags take precedence.

use std::env;
use std::str::FromStr;

use rstest_bdd_data::{ConfigurationError, LoaderConfig};

/// Environment variable selecting the log level.
pub(crate) const LOG_LEVEL_ENV: &str = "RSTEST_BDD_DATA_LOG_LEVEL";

/// Log level enumeration matching tracing crate levels.
///
/// Defaults to `Warn` so diagnostics do not clutter command output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) enum LogLevel {
    Trace,
    Debug,
    Info,
    #[default]
    Warn,
    Error,
}

impl FromStr for LogLevel {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "trace" => Ok(Self::Trace),
            "debug" => Ok(Self::Debug),
            "info" => Ok(Self::Info),
            "warn" | "warning" => Ok(Self::Warn),
            "error" => Ok(Self::Error),
            _ => Err(ConfigurationError::new(format!(
                "unknown log level '{s}', expected one of: trace, debug, info, warn, error"
            ))),
        }
    }
}

impl LogLevel {
    /// Convert to a tracing filter directive string.
    pub(crate) fn as_filter_str(self) -> &'static str {
        match self {
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }
}

/// Settings for one invocation of the command.
///
/// # Environment Variables
///
/// - `RSTEST_BDD_DATA_LOG_LEVEL`: trace, debug, info, warn or error
/// - the loader variables read by [`LoaderConfig::from_env`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct CliConfig {
    pub(crate) log_level: LogLevel,
    pub(crate) loader: LoaderConfig,
}

/// Values given on the command line; `None` keeps the environment value.
#[derive(Debug, Clone, Default)]
pub(crate) struct Overrides {
    pub(crate) log_level: Option<LogLevel>,
    pub(crate) delimiter: Option<char>,
    pub(crate) trim_fields: Option<bool>,
    pub(crate) culture: Option<String>,
}

impl CliConfig {
    pub(crate) fn from_env() -> Result<Self, ConfigurationError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub(crate) fn from_lookup<F>(lookup: F) -> Result<Self, ConfigurationError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let log_level = lookup(LOG_LEVEL_ENV)
            .map(|value| value.parse())
            .transpose()?
            .unwrap_or_default();
        let loader = LoaderConfig::from_lookup(lookup)?;
        Ok(Self { log_level, loader })
    }

    #[must_use]
    pub(crate) fn apply_overrides(mut self, overrides: Overrides) -> Self {
        if let Some(level) = overrides.log_level {
            self.log_level = level;
        }
        self.loader = self.loader.apply_overrides(
            overrides.delimiter,
            overrides.trim_fields,
            overrides.culture,
        );
        self
    }
}
