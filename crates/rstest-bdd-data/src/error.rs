//! Error types surfaced while resolving external example data.
//!
//! Every failure in the crate is reported through [`ExternalDataError`]. The
//! variants mirror the stages of a resolution: tag parsing, loading the data
//! source, parsing its contents, and projecting the table into the shape the
//! scenario outline requested.

use std::fmt;
use std::io;

use camino::Utf8PathBuf;
use thiserror::Error;

use crate::model::ValueKind;

/// Malformed or contradictory tag syntax.
///
/// # Examples
/// ```
/// use rstest_bdd_data::ConfigurationError;
/// let err = ConfigurationError::for_tag("@DataSource:", "missing data source path");
/// assert_eq!(err.tag.as_deref(), Some("@DataSource:"));
/// assert_eq!(err.to_string(), "missing data source path in tag `@DataSource:`");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigurationError {
    /// Raw tag text that triggered the failure, when one is involved.
    pub tag: Option<String>,
    /// Human-readable description of the problem.
    pub message: String,
}

impl ConfigurationError {
    /// Describe a problem with a specific tag.
    #[must_use]
    pub fn for_tag(tag: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            tag: Some(tag.into()),
            message: message.into(),
        }
    }

    /// Describe a problem that is not tied to a tag, such as an invalid
    /// environment value.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            tag: None,
            message: message.into(),
        }
    }
}

impl fmt::Display for ConfigurationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)?;
        if let Some(tag) = &self.tag {
            write!(f, " in tag `{tag}`")?;
        }
        Ok(())
    }
}

impl std::error::Error for ConfigurationError {}

/// Structural problems found while parsing CSV text.
///
/// Line numbers are 1-based physical lines of the input; `column` values are
/// 1-based character offsets within that line.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum CsvError {
    /// Raised when the input holds no header record.
    #[error("CSV input is empty; a header row is required")]
    Empty,
    /// Raised when the header repeats a column name.
    #[error("CSV header on line {line} contains duplicate column '{column}'")]
    DuplicateHeader {
        /// Line holding the header record.
        line: usize,
        /// Name that appears more than once.
        column: String,
    },
    /// Raised when a data record has more or fewer fields than the header.
    #[error("CSV record on line {line} has {actual} fields but the header has {expected}")]
    UnevenRecord {
        /// Line on which the offending record starts.
        line: usize,
        /// Number of header fields.
        expected: usize,
        /// Number of fields in the offending record.
        actual: usize,
    },
    /// Raised when a quoted field is still open at the end of the input.
    #[error("unterminated quoted field starting on line {line}, column {column}")]
    UnterminatedQuote {
        /// Line of the opening quote.
        line: usize,
        /// Column of the opening quote.
        column: usize,
    },
    /// Raised when a closing quote is followed by something other than a
    /// delimiter or line break.
    #[error("unexpected character '{found}' after closing quote on line {line}, column {column}")]
    TrailingCharacter {
        /// Line of the offending character.
        line: usize,
        /// Column of the offending character.
        column: usize,
        /// Character found after the closing quote.
        found: char,
    },
}

/// Failures raised while projecting a table into the requested shape.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ProjectionError {
    /// Raised when a record has no value for the source of a requested field.
    #[error("record {record} has no field '{source_field}' for example column '{field}'")]
    MissingField {
        /// 1-based position of the record in the source table.
        record: usize,
        /// Output column that could not be filled.
        field: String,
        /// Source field looked up for the column.
        source_field: String,
    },
    /// Raised when the requested header names a column twice.
    #[error("example header contains duplicate column '{column}'")]
    DuplicateColumn {
        /// Repeated column name.
        column: String,
    },
}

/// Errors surfaced to the host when external example data cannot be produced.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ExternalDataError {
    /// Tag or configuration syntax is invalid.
    #[error("invalid external data configuration: {0}")]
    Configuration(ConfigurationError),
    /// The data source was read but its contents are structurally invalid.
    #[error("malformed data: {0}")]
    MalformedData(#[from] CsvError),
    /// The data source could not be read.
    #[error("data source '{path}' is unavailable: {source}")]
    DataSourceUnavailable {
        /// Resolved location of the data source.
        path: Utf8PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },
    /// The loaded table cannot satisfy the requested example columns.
    #[error("cannot project external data: {0}")]
    Projection(#[from] ProjectionError),
    /// A [`DataValue`](crate::DataValue) was accessed as the wrong variant.
    #[error("expected a {expected} value but found a {found}")]
    TypeMismatch {
        /// Variant the caller asked for.
        expected: ValueKind,
        /// Variant actually stored.
        found: ValueKind,
    },
}

impl From<ConfigurationError> for ExternalDataError {
    fn from(value: ConfigurationError) -> Self {
        Self::Configuration(value)
    }
}

pub(crate) fn tag_error(tag: &str, message: &str) -> ExternalDataError {
    ExternalDataError::Configuration(ConfigurationError::for_tag(tag, message))
}
