//! Reads external data declarations from scenario tags.
//!
//! A scenario opts in with `@DataSource:<path>` and may rename or select
//! columns with any number of `@DataField:<target>[=<source>]` tags. Tags
//! are accepted with or without the leading `@`.
mod lexer;
mod parser;
mod specification;

use camino::Utf8Path;
use log::{debug, warn};

use crate::error::ExternalDataError;
use parser::{TagDirective, parse_tag};

pub use parser::{DATA_FIELD_MARKER, DATA_SOURCE_MARKER};
pub use specification::{FieldMap, Specification};

/// Build the [`Specification`] declared by `tags`.
///
/// Returns `Ok(None)` when no tag names a data source. When several tags do,
/// the last one wins, so scenario tags listed after inherited feature tags
/// take precedence. Repeated field targets keep their first position and take
/// the last source.
///
/// # Errors
/// Returns [`ExternalDataError::Configuration`] naming the offending tag when
/// a data source tag has no path or a data field tag has no target.
///
/// # Examples
/// ```
/// use rstest_bdd_data::parse_specification;
/// # fn main() -> Result<(), rstest_bdd_data::ExternalDataError> {
/// let tags = ["@DataSource:products.csv", "@DataField:item=product"];
/// let spec = parse_specification(tags, None)?.expect("data source declared");
/// assert_eq!(spec.source_path(), "products.csv");
/// assert_eq!(spec.field_map().source_for("item"), Some("product"));
///
/// assert!(parse_specification(["@wip"], None)?.is_none());
/// # Ok(())
/// # }
/// ```
pub fn parse_specification<I, S>(
    tags: I,
    feature_path: Option<&Utf8Path>,
) -> Result<Option<Specification>, ExternalDataError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut source_path: Option<String> = None;
    let mut field_map = FieldMap::new();

    for tag in tags {
        match parse_tag(tag.as_ref())? {
            TagDirective::DataSource { path } => {
                if let Some(previous) = source_path.replace(path.to_string()) {
                    debug!("data source `{path}` overrides `{previous}`");
                }
            }
            TagDirective::DataField { target, source } => {
                if let Some(previous) = field_map.insert(target, source) {
                    warn!("data field `{target}` remapped from `{previous}` to `{source}`");
                }
            }
            TagDirective::Annotation => {}
        }
    }

    let Some(source_path) = source_path else {
        return Ok(None);
    };
    debug!(
        "external data `{source_path}` declared with {} field mapping(s)",
        field_map.len()
    );
    let mut specification = Specification::new(source_path).with_field_map(field_map);
    if let Some(path) = feature_path {
        specification = specification.with_feature_path(path);
    }
    Ok(Some(specification))
}

#[cfg(test)]
mod tests;
