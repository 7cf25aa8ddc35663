//! Tables: an ordered header plus ordered records.

use hashbrown::HashSet;

use super::DataRecord;
use crate::error::{ExternalDataError, ProjectionError};

/// Ordered collection of records with an explicit column header.
///
/// The header defines column identity and display order. It is not required
/// to match the keys of every record: projection and rendering consult the
/// header, and records may carry extra fields.
///
/// # Examples
/// ```
/// use rstest_bdd_data::{DataRecord, DataTable};
/// # fn main() -> Result<(), rstest_bdd_data::ExternalDataError> {
/// let mut table = DataTable::new(["product", "price"])?;
/// table.push([("product", "Apple"), ("price", "1.0")].into_iter().collect());
/// assert_eq!(table.header(), ["product", "price"]);
/// assert_eq!(table.to_rows(), vec![vec!["Apple".to_string(), "1.0".to_string()]]);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DataTable {
    header: Vec<String>,
    items: Vec<DataRecord>,
}

impl DataTable {
    /// Create an empty table with the given header.
    ///
    /// # Errors
    /// Returns [`ProjectionError::DuplicateColumn`] when a header name is
    /// repeated.
    pub fn new<I, S>(header: I) -> Result<Self, ExternalDataError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let header: Vec<String> = header.into_iter().map(Into::into).collect();
        if let Some(column) = first_duplicate(&header) {
            return Err(ProjectionError::DuplicateColumn {
                column: column.to_string(),
            }
            .into());
        }
        Ok(Self {
            header,
            items: Vec::new(),
        })
    }

    /// Assemble a table from a header already known to be unique.
    pub(crate) fn from_parts(header: Vec<String>, items: Vec<DataRecord>) -> Self {
        debug_assert!(first_duplicate(&header).is_none(), "header must be unique");
        Self { header, items }
    }

    /// Append a record, preserving insertion order.
    pub fn push(&mut self, record: DataRecord) {
        self.items.push(record);
    }

    /// Column names in display order.
    #[must_use]
    pub fn header(&self) -> &[String] {
        &self.header
    }

    /// Records in source order.
    #[must_use]
    pub fn items(&self) -> &[DataRecord] {
        &self.items
    }

    /// Number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` when the table holds no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterate over the records in order.
    pub fn iter(&self) -> std::slice::Iter<'_, DataRecord> {
        self.items.iter()
    }

    /// Split the table into its header and records.
    #[must_use]
    pub fn into_parts(self) -> (Vec<String>, Vec<DataRecord>) {
        (self.header, self.items)
    }

    /// Render every record as a row of cell strings ordered by the header.
    ///
    /// Fields named by the header but absent from a record render as empty
    /// cells.
    #[must_use]
    pub fn to_rows(&self) -> Vec<Vec<String>> {
        self.items
            .iter()
            .map(|record| {
                self.header
                    .iter()
                    .map(|column| {
                        record
                            .get(column)
                            .map(ToString::to_string)
                            .unwrap_or_default()
                    })
                    .collect()
            })
            .collect()
    }
}

impl<'a> IntoIterator for &'a DataTable {
    type Item = &'a DataRecord;
    type IntoIter = std::slice::Iter<'a, DataRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

/// Return the first name that appears more than once.
pub(crate) fn first_duplicate(names: &[String]) -> Option<&str> {
    let mut seen = HashSet::with_capacity(names.len());
    names
        .iter()
        .find(|name| !seen.insert(name.as_str()))
        .map(String::as_str)
}
