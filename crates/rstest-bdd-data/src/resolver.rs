//! Locates, reads and parses the data source named by a specification.
//!
//! Relative source paths are resolved against the directory of the feature
//! file that declared them. Reading is delegated to a [`SourceReader`], so
//! hosts and tests can supply text without touching the file system.

use std::io;

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::ambient_authority;
use cap_std::fs::Dir;
use log::debug;

use crate::config::LoaderConfig;
use crate::csv::parse_csv;
use crate::error::ExternalDataError;
use crate::model::{DataTable, DataValue};
use crate::projection::project;
use crate::tags::Specification;

/// Supplies the raw text of a data source.
pub trait SourceReader {
    /// Read the whole file at `path` as UTF-8 text.
    ///
    /// # Errors
    /// Returns the underlying I/O error when the file cannot be read.
    fn read_to_string(&self, path: &Utf8Path) -> io::Result<String>;
}

impl<F> SourceReader for F
where
    F: Fn(&Utf8Path) -> io::Result<String>,
{
    fn read_to_string(&self, path: &Utf8Path) -> io::Result<String> {
        self(path)
    }
}

/// Reads data sources from the local file system.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileSystemReader;

impl SourceReader for FileSystemReader {
    fn read_to_string(&self, path: &Utf8Path) -> io::Result<String> {
        let file_name = path.file_name().ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("data source path '{path}' does not name a file"),
            )
        })?;
        let parent = path
            .parent()
            .filter(|dir| !dir.as_str().is_empty())
            .unwrap_or_else(|| Utf8Path::new("."));
        let dir = Dir::open_ambient_dir(parent.as_std_path(), ambient_authority())?;
        dir.read_to_string(file_name)
    }
}

/// Resolve `source_path` against the directory containing `feature_path`.
///
/// Absolute source paths, and relative ones without a feature path, are
/// returned unchanged.
///
/// # Examples
/// ```
/// use camino::Utf8Path;
/// use rstest_bdd_data::resolve_source_path;
///
/// let feature = Utf8Path::new("/work/features/Sample.feature");
/// assert_eq!(
///     resolve_source_path("data/products.csv", Some(feature)),
///     Utf8Path::new("/work/features/data/products.csv"),
/// );
/// assert_eq!(
///     resolve_source_path("/srv/products.csv", Some(feature)),
///     Utf8Path::new("/srv/products.csv"),
/// );
/// ```
#[must_use]
pub fn resolve_source_path(source_path: &str, feature_path: Option<&Utf8Path>) -> Utf8PathBuf {
    let source = Utf8Path::new(source_path.trim());
    if source.is_absolute() {
        return source.to_path_buf();
    }
    feature_path
        .and_then(Utf8Path::parent)
        .map_or_else(|| source.to_path_buf(), |dir| dir.join(source))
}

/// Loads data sources and shapes them into example tables.
#[derive(Debug, Clone, Default)]
pub struct SourceResolver<R = FileSystemReader> {
    reader: R,
    config: LoaderConfig,
}

impl SourceResolver<FileSystemReader> {
    /// Create a resolver reading from the local file system.
    #[must_use]
    pub fn new(config: LoaderConfig) -> Self {
        Self::with_reader(FileSystemReader, config)
    }
}

impl<R: SourceReader> SourceResolver<R> {
    /// Create a resolver that obtains source text from `reader`.
    #[must_use]
    pub fn with_reader(reader: R, config: LoaderConfig) -> Self {
        Self { reader, config }
    }

    /// Configuration used when parsing sources.
    #[must_use]
    pub fn config(&self) -> &LoaderConfig {
        &self.config
    }

    /// Read and parse the source at `source_path`.
    ///
    /// `culture` selects the delimiter when none is configured; when it is
    /// `None` the configured culture applies.
    ///
    /// # Errors
    /// Returns [`ExternalDataError::DataSourceUnavailable`] with the resolved
    /// path when the source cannot be read, and propagates parser and
    /// configuration errors unchanged.
    pub fn load_source(
        &self,
        source_path: &str,
        feature_path: Option<&Utf8Path>,
        culture: Option<&str>,
    ) -> Result<DataValue, ExternalDataError> {
        let path = resolve_source_path(source_path, feature_path);
        let options = self.config.csv_options(culture)?;
        let text = self
            .reader
            .read_to_string(&path)
            .map_err(|source| ExternalDataError::DataSourceUnavailable {
                path: path.clone(),
                source,
            })?;
        debug!("loading data source '{path}' ({} bytes)", text.len());
        let table = parse_csv(&text, &options)?;
        Ok(DataValue::Table(table))
    }

    /// Load the data source declared by `specification`.
    ///
    /// # Errors
    /// See [`SourceResolver::load_source`].
    pub fn load(&self, specification: &Specification) -> Result<DataValue, ExternalDataError> {
        self.load_source(
            specification.source_path(),
            specification.feature_path(),
            None,
        )
    }

    /// Load the data source and project it onto `requested_header` through
    /// the specification's field map.
    ///
    /// # Errors
    /// Returns [`ExternalDataError::TypeMismatch`] if the source is not
    /// tabular, and otherwise propagates load and projection errors.
    pub fn examples(
        &self,
        specification: &Specification,
        requested_header: Option<&[String]>,
    ) -> Result<DataTable, ExternalDataError> {
        let table = self.load(specification)?.into_table()?;
        project(table, requested_header, Some(specification.field_map()))
    }
}
