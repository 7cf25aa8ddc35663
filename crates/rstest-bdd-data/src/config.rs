//! Loader configuration parsed from environment variables.
//!
//! Settings can be overridden via environment variables prefixed with
//! `RSTEST_BDD_DATA_`. Hosts that take command-line flags layer them on top
//! with [`LoaderConfig::apply_overrides`].

use std::env;

use crate::csv::{CsvOptions, DEFAULT_DELIMITER};
use crate::error::ConfigurationError;

/// Environment variable selecting the CSV delimiter.
pub const DELIMITER_ENV: &str = "RSTEST_BDD_DATA_DELIMITER";
/// Environment variable enabling whitespace trimming of unquoted fields.
pub const TRIM_ENV: &str = "RSTEST_BDD_DATA_TRIM";
/// Environment variable naming the culture used to pick a list separator.
pub const CULTURE_ENV: &str = "RSTEST_BDD_DATA_CULTURE";

/// Languages whose conventional list separator is a semicolon, typically
/// because they write decimals with a comma.
const SEMICOLON_LANGUAGES: &[&str] = &[
    "bg", "ca", "cs", "da", "de", "el", "es", "et", "eu", "fi", "fr", "gl", "hr", "hu", "id",
    "is", "it", "lt", "lv", "nb", "nl", "nn", "no", "pl", "pt", "ro", "ru", "sk", "sl", "sr",
    "sv", "tr", "uk", "vi",
];

/// Conventional list separator for a culture tag such as `de-DE` or `en_GB`.
///
/// Only the language subtag is consulted; unknown languages use a comma.
///
/// # Examples
/// ```
/// use rstest_bdd_data::list_separator;
/// assert_eq!(list_separator("de-DE"), ';');
/// assert_eq!(list_separator("en-US"), ',');
/// assert_eq!(list_separator("pt_BR"), ';');
/// ```
#[must_use]
pub fn list_separator(culture: &str) -> char {
    let language = culture
        .split(['-', '_'])
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();
    if SEMICOLON_LANGUAGES.contains(&language.as_str()) {
        ';'
    } else {
        DEFAULT_DELIMITER
    }
}

/// Settings controlling how data sources are read.
///
/// # Environment Variables
///
/// - `RSTEST_BDD_DATA_DELIMITER`: a single character, or `tab`
/// - `RSTEST_BDD_DATA_TRIM`: `true`/`false` (also `1`/`0`, `yes`/`no`)
/// - `RSTEST_BDD_DATA_CULTURE`: culture tag such as `de-DE`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoaderConfig {
    /// Explicit delimiter; when unset the culture's list separator is used.
    pub delimiter: Option<char>,
    /// Strip surrounding whitespace from unquoted fields.
    pub trim_fields: bool,
    /// Culture used when no delimiter is configured.
    pub culture: Option<String>,
}

impl LoaderConfig {
    /// Load configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError`] if an environment variable contains an
    /// invalid value.
    pub fn from_env() -> Result<Self, ConfigurationError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through `lookup`, which returns the value of a
    /// variable when it is set.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError`] if a value is invalid.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigurationError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let delimiter = lookup(DELIMITER_ENV)
            .map(|value| parse_delimiter(&value))
            .transpose()?;
        let trim_fields = lookup(TRIM_ENV)
            .map(|value| parse_flag(TRIM_ENV, &value))
            .transpose()?
            .unwrap_or(false);
        let culture = lookup(CULTURE_ENV).filter(|value| !value.trim().is_empty());
        Ok(Self {
            delimiter,
            trim_fields,
            culture,
        })
    }

    /// Apply optional overrides, typically from command-line flags.
    #[must_use]
    pub fn apply_overrides(
        mut self,
        delimiter: Option<char>,
        trim_fields: Option<bool>,
        culture: Option<String>,
    ) -> Self {
        if delimiter.is_some() {
            self.delimiter = delimiter;
        }
        if let Some(trim) = trim_fields {
            self.trim_fields = trim;
        }
        if culture.is_some() {
            self.culture = culture;
        }
        self
    }

    /// Build CSV options, preferring the configured delimiter, then the
    /// list separator of `culture`, then of the configured culture.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError`] when the configured delimiter is
    /// reserved by CSV syntax.
    pub fn csv_options(&self, culture: Option<&str>) -> Result<CsvOptions, ConfigurationError> {
        let delimiter = self.delimiter.unwrap_or_else(|| {
            culture
                .or(self.culture.as_deref())
                .map_or(DEFAULT_DELIMITER, list_separator)
        });
        Ok(CsvOptions::default()
            .with_delimiter(delimiter)?
            .with_trimmed_fields(self.trim_fields))
    }
}

/// Parse a delimiter given as a single character or as the word `tab`.
///
/// # Errors
///
/// Returns [`ConfigurationError`] for empty or multi-character values.
pub fn parse_delimiter(value: &str) -> Result<char, ConfigurationError> {
    if value.eq_ignore_ascii_case("tab") || value == "\\t" {
        return Ok('\t');
    }
    let mut chars = value.chars();
    match (chars.next(), chars.next()) {
        (Some(ch), None) => Ok(ch),
        _ => Err(ConfigurationError::new(format!(
            "invalid delimiter '{value}', expected a single character or 'tab'"
        ))),
    }
}

fn parse_flag(name: &str, value: &str) -> Result<bool, ConfigurationError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigurationError::new(format!(
            "invalid value '{value}' for {name}, expected true or false"
        ))),
    }
}
