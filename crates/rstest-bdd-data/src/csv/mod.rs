//! CSV loading for external example data.
//!
//! The first non-blank record is the header; every later record must have
//! exactly as many fields. Any structural problem aborts the parse with a
//! [`CsvError`], so callers never see a partially filled table.

mod machine;

use log::trace;

use crate::error::{ConfigurationError, CsvError};
use crate::model::{DataRecord, DataTable, first_duplicate};
use machine::{RawField, RecordReader};

/// Delimiter used when neither configuration nor culture selects another.
pub const DEFAULT_DELIMITER: char = ',';

/// Tokenisation options for [`parse_csv`].
///
/// # Examples
/// ```
/// use rstest_bdd_data::CsvOptions;
/// # fn main() -> Result<(), rstest_bdd_data::ConfigurationError> {
/// let options = CsvOptions::default().with_delimiter(';')?;
/// assert_eq!(options.delimiter(), ';');
/// assert!(CsvOptions::default().with_delimiter('"').is_err());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CsvOptions {
    delimiter: char,
    trim_fields: bool,
}

impl Default for CsvOptions {
    fn default() -> Self {
        Self {
            delimiter: DEFAULT_DELIMITER,
            trim_fields: false,
        }
    }
}

impl CsvOptions {
    /// Use `delimiter` to separate fields.
    ///
    /// # Errors
    /// Returns [`ConfigurationError`] when the delimiter is a double quote or
    /// a line break, since those already carry meaning in CSV.
    pub fn with_delimiter(mut self, delimiter: char) -> Result<Self, ConfigurationError> {
        if matches!(delimiter, '"' | '\r' | '\n') {
            return Err(ConfigurationError::new(format!(
                "{delimiter:?} cannot be used as a CSV delimiter"
            )));
        }
        self.delimiter = delimiter;
        Ok(self)
    }

    /// Strip surrounding whitespace from unquoted fields.
    ///
    /// Quoted fields are always kept verbatim.
    #[must_use]
    pub fn with_trimmed_fields(mut self, trim_fields: bool) -> Self {
        self.trim_fields = trim_fields;
        self
    }

    /// Field delimiter.
    #[must_use]
    pub fn delimiter(&self) -> char {
        self.delimiter
    }

    /// Whether unquoted fields are trimmed.
    #[must_use]
    pub fn trims_fields(&self) -> bool {
        self.trim_fields
    }

    fn field_text(&self, field: RawField) -> String {
        if self.trim_fields && !field.quoted {
            field.text.trim().to_string()
        } else {
            field.text
        }
    }
}

/// Parse CSV text into a [`DataTable`].
///
/// Blank lines outside quoted fields are ignored. A leading byte order mark
/// is skipped.
///
/// # Errors
/// Returns [`CsvError`] when the input is empty, the header repeats a name, a
/// record's field count differs from the header's, or quoting is malformed.
///
/// # Examples
/// ```
/// use rstest_bdd_data::{CsvOptions, parse_csv};
/// # fn main() -> Result<(), rstest_bdd_data::CsvError> {
/// let table = parse_csv("product,price\nChocolate,2.5\n", &CsvOptions::default())?;
/// assert_eq!(table.header(), ["product", "price"]);
/// assert_eq!(table.len(), 1);
/// # Ok(())
/// # }
/// ```
pub fn parse_csv(text: &str, options: &CsvOptions) -> Result<DataTable, CsvError> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let mut records = RecordReader::new(text, options.delimiter())
        .filter(|record| !matches!(record, Ok(raw) if raw.is_blank()));

    let header_record = records.next().transpose()?.ok_or(CsvError::Empty)?;
    let header: Vec<String> = header_record
        .fields
        .into_iter()
        .map(|field| options.field_text(field))
        .collect();
    if let Some(column) = first_duplicate(&header) {
        return Err(CsvError::DuplicateHeader {
            line: header_record.line,
            column: column.to_string(),
        });
    }

    let mut items = Vec::new();
    for record in records {
        let record = record?;
        if record.fields.len() != header.len() {
            return Err(CsvError::UnevenRecord {
                line: record.line,
                expected: header.len(),
                actual: record.fields.len(),
            });
        }
        let mut item = DataRecord::with_capacity(header.len());
        for (name, field) in header.iter().zip(record.fields) {
            item.insert(name.as_str(), options.field_text(field));
        }
        items.push(item);
    }

    trace!(
        "parsed CSV with {} columns and {} records",
        header.len(),
        items.len()
    );
    Ok(DataTable::from_parts(header, items))
}

#[cfg(test)]
mod tests;
