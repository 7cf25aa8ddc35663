//! The tagged value type shared by records and tables.

use std::fmt;

use super::{DataRecord, DataTable};
use crate::error::ExternalDataError;

/// Discriminant of a [`DataValue`], used in type-mismatch diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    /// A single string value.
    Scalar,
    /// A mapping from field names to values.
    Record,
    /// A header plus an ordered list of records.
    Table,
}

impl ValueKind {
    /// Return the kind as a lowercase string slice.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Scalar => "scalar",
            Self::Record => "record",
            Self::Table => "table",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A value loaded from an external data source.
///
/// Data sources may yield plain strings, records, or whole tables; consumers
/// match on the variant or use the fallible `as_*` accessors.
///
/// # Examples
/// ```
/// use rstest_bdd_data::{DataValue, ValueKind};
/// let value = DataValue::from("2.5");
/// assert_eq!(value.kind(), ValueKind::Scalar);
/// assert_eq!(value.as_scalar().ok(), Some("2.5"));
/// assert!(value.as_table().is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataValue {
    /// A single string value.
    Scalar(String),
    /// A nested record.
    Record(DataRecord),
    /// A nested table.
    Table(DataTable),
}

impl DataValue {
    /// Report which variant is stored.
    #[must_use]
    pub const fn kind(&self) -> ValueKind {
        match self {
            Self::Scalar(_) => ValueKind::Scalar,
            Self::Record(_) => ValueKind::Record,
            Self::Table(_) => ValueKind::Table,
        }
    }

    /// Borrow the scalar string.
    ///
    /// # Errors
    /// Returns [`ExternalDataError::TypeMismatch`] when the value is not a
    /// scalar.
    pub fn as_scalar(&self) -> Result<&str, ExternalDataError> {
        match self {
            Self::Scalar(value) => Ok(value),
            other => Err(other.mismatch(ValueKind::Scalar)),
        }
    }

    /// Borrow the nested record.
    ///
    /// # Errors
    /// Returns [`ExternalDataError::TypeMismatch`] when the value is not a
    /// record.
    pub fn as_record(&self) -> Result<&DataRecord, ExternalDataError> {
        match self {
            Self::Record(record) => Ok(record),
            other => Err(other.mismatch(ValueKind::Record)),
        }
    }

    /// Borrow the nested table.
    ///
    /// # Errors
    /// Returns [`ExternalDataError::TypeMismatch`] when the value is not a
    /// table.
    pub fn as_table(&self) -> Result<&DataTable, ExternalDataError> {
        match self {
            Self::Table(table) => Ok(table),
            other => Err(other.mismatch(ValueKind::Table)),
        }
    }

    /// Consume the value, returning the nested table.
    ///
    /// # Errors
    /// Returns [`ExternalDataError::TypeMismatch`] when the value is not a
    /// table.
    pub fn into_table(self) -> Result<DataTable, ExternalDataError> {
        match self {
            Self::Table(table) => Ok(table),
            other => Err(other.mismatch(ValueKind::Table)),
        }
    }

    fn mismatch(&self, expected: ValueKind) -> ExternalDataError {
        ExternalDataError::TypeMismatch {
            expected,
            found: self.kind(),
        }
    }
}

impl From<String> for DataValue {
    fn from(value: String) -> Self {
        Self::Scalar(value)
    }
}

impl From<&str> for DataValue {
    fn from(value: &str) -> Self {
        Self::Scalar(value.to_string())
    }
}

impl From<DataRecord> for DataValue {
    fn from(value: DataRecord) -> Self {
        Self::Record(value)
    }
}

impl From<DataTable> for DataValue {
    fn from(value: DataTable) -> Self {
        Self::Table(value)
    }
}

/// Renders scalars verbatim. Nested values have no canonical cell text, so
/// records list their fields as `name=value` pairs in name order and tables
/// report their shape.
impl fmt::Display for DataValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scalar(value) => f.write_str(value),
            Self::Record(record) => {
                let mut fields: Vec<_> = record.iter().collect();
                fields.sort_by(|a, b| a.0.cmp(b.0));
                f.write_str("{")?;
                for (index, (name, value)) in fields.into_iter().enumerate() {
                    if index > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{name}={value}")?;
                }
                f.write_str("}")
            }
            Self::Table(table) => write!(
                f,
                "<table {}x{}>",
                table.header().len(),
                table.len()
            ),
        }
    }
}
