//! The parsed description of how to load and shape one scenario's data.

use camino::{Utf8Path, Utf8PathBuf};
use indexmap::IndexMap;

/// Ordered mapping from example column name to source field name.
///
/// Re-inserting an existing target replaces its source but keeps the
/// target's original position.
///
/// # Examples
/// ```
/// use rstest_bdd_data::FieldMap;
/// let mut map = FieldMap::new();
/// map.insert("x", "y");
/// map.insert("other", "other");
/// map.insert("x", "z");
/// assert_eq!(map.source_for("x"), Some("z"));
/// assert_eq!(map.targets().collect::<Vec<_>>(), ["x", "other"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldMap {
    entries: IndexMap<String, String>,
}

impl FieldMap {
    /// Create an empty field map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Map `target` to `source`, returning the source it previously mapped to.
    pub fn insert(
        &mut self,
        target: impl Into<String>,
        source: impl Into<String>,
    ) -> Option<String> {
        self.entries.insert(target.into(), source.into())
    }

    /// Source field mapped to `target`, if any.
    #[must_use]
    pub fn source_for(&self, target: &str) -> Option<&str> {
        self.entries.get(target).map(String::as_str)
    }

    /// Returns `true` when `target` has a mapping.
    #[must_use]
    pub fn contains_target(&self, target: &str) -> bool {
        self.entries.contains_key(target)
    }

    /// Targets mapped to `source`, in map order.
    pub fn targets_of<'a>(&'a self, source: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.entries
            .iter()
            .filter(move |(_, mapped)| mapped.as_str() == source)
            .map(|(target, _)| target.as_str())
    }

    /// Target names in first-seen order.
    pub fn targets(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// `(target, source)` pairs in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(target, source)| (target.as_str(), source.as_str()))
    }

    /// Number of mapped targets.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` when no field is mapped.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<T, S> FromIterator<(T, S)> for FieldMap
where
    T: Into<String>,
    S: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (T, S)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (target, source) in iter {
            map.insert(target, source);
        }
        map
    }
}

/// External data declared by a scenario's tags.
///
/// The source path is kept exactly as written in the tag; resolving it
/// against the feature file is the job of the
/// [`SourceResolver`](crate::SourceResolver).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Specification {
    source_path: String,
    feature_path: Option<Utf8PathBuf>,
    field_map: FieldMap,
}

impl Specification {
    /// Describe a data source with no field mappings.
    #[must_use]
    pub fn new(source_path: impl Into<String>) -> Self {
        Self {
            source_path: source_path.into(),
            feature_path: None,
            field_map: FieldMap::new(),
        }
    }

    /// Record the file that declared the data source.
    #[must_use]
    pub fn with_feature_path(mut self, feature_path: impl Into<Utf8PathBuf>) -> Self {
        self.feature_path = Some(feature_path.into());
        self
    }

    /// Replace the field map.
    #[must_use]
    pub fn with_field_map(mut self, field_map: FieldMap) -> Self {
        self.field_map = field_map;
        self
    }

    /// Data source path exactly as written in the tag.
    #[must_use]
    pub fn source_path(&self) -> &str {
        &self.source_path
    }

    /// File whose tags declared the data source, used as the base for
    /// relative source paths.
    #[must_use]
    pub fn feature_path(&self) -> Option<&Utf8Path> {
        self.feature_path.as_deref()
    }

    /// Field renames; empty means the source header is used verbatim.
    #[must_use]
    pub fn field_map(&self) -> &FieldMap {
        &self.field_map
    }
}
