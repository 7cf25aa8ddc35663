//! Records: unordered, uniquely keyed field collections.

use hashbrown::HashMap;
use hashbrown::hash_map::Iter;

use super::DataValue;
use crate::error::ExternalDataError;

/// A single row of external data keyed by field name.
///
/// Field names are case-sensitive and unique; inserting an existing name
/// replaces its value. Display order is owned by the enclosing
/// [`DataTable`](super::DataTable) header, not by the record.
///
/// # Examples
/// ```
/// use rstest_bdd_data::DataRecord;
/// let record: DataRecord = [("product", "Chocolate"), ("price", "2.5")]
///     .into_iter()
///     .collect();
/// assert_eq!(record.scalar("price").ok(), Some(Some("2.5")));
/// assert!(record.get("Price").is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DataRecord {
    fields: HashMap<String, DataValue>,
}

impl DataRecord {
    /// Create an empty record.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty record with room for `capacity` fields.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            fields: HashMap::with_capacity(capacity),
        }
    }

    /// Insert or replace a field, returning the previous value.
    pub fn insert(
        &mut self,
        name: impl Into<String>,
        value: impl Into<DataValue>,
    ) -> Option<DataValue> {
        self.fields.insert(name.into(), value.into())
    }

    /// Look up a field by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&DataValue> {
        self.fields.get(name)
    }

    /// Returns `true` when the record holds a field called `name`.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    /// Look up a field and borrow it as a scalar.
    ///
    /// Returns `Ok(None)` when the field is absent.
    ///
    /// # Errors
    /// Returns [`ExternalDataError::TypeMismatch`] when the field holds a
    /// nested record or table.
    pub fn scalar(&self, name: &str) -> Result<Option<&str>, ExternalDataError> {
        self.fields.get(name).map(DataValue::as_scalar).transpose()
    }

    /// Number of fields in the record.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns `true` when the record has no fields.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Iterate over `(name, value)` pairs in unspecified order.
    pub fn iter(&self) -> Iter<'_, String, DataValue> {
        self.fields.iter()
    }
}

impl<K, V> FromIterator<(K, V)> for DataRecord
where
    K: Into<String>,
    V: Into<DataValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(name, value)| (name.into(), value.into()))
                .collect(),
        }
    }
}

impl<'a> IntoIterator for &'a DataRecord {
    type Item = (&'a String, &'a DataValue);
    type IntoIter = Iter<'a, String, DataValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.iter()
    }
}
