//! Resolves the external data declared on the scenarios of a parsed feature.

use camino::Utf8Path;
use gherkin::{Feature, Scenario};
use log::debug;

use crate::error::ExternalDataError;
use crate::model::DataTable;
use crate::resolver::{SourceReader, SourceResolver};
use crate::tags::{Specification, parse_specification};

/// Specification declared by one scenario, with the example columns it asks
/// for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScenarioSpecification {
    /// Scenario name as written in the feature file.
    pub scenario: String,
    /// 1-based line of the scenario keyword.
    pub line: usize,
    /// Data source declared by the scenario's inherited and own tags.
    pub specification: Specification,
    /// Header row of the scenario's first Examples table, when present.
    pub requested_header: Option<Vec<String>>,
}

/// Example table produced for one scenario outline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutlineExamples {
    /// Scenario name as written in the feature file.
    pub scenario: String,
    /// 1-based line of the scenario keyword.
    pub line: usize,
    /// Specification the table was built from.
    pub specification: Specification,
    /// Projected example rows.
    pub table: DataTable,
}

/// Collect the specification of every scenario in `feature` that declares a
/// data source, in document order.
///
/// Tags are inherited from the feature and enclosing rule, so a data source
/// declared on the feature applies to every scenario while scenario tags
/// override it.
///
/// # Errors
/// Returns [`ExternalDataError::Configuration`] for the first malformed tag.
pub fn specifications(
    feature: &Feature,
    feature_path: &Utf8Path,
) -> Result<Vec<ScenarioSpecification>, ExternalDataError> {
    let mut found = Vec::new();
    for scenario in &feature.scenarios {
        collect(&mut found, [&feature.tags], scenario, feature_path)?;
    }
    for rule in &feature.rules {
        for scenario in &rule.scenarios {
            collect(
                &mut found,
                [&feature.tags, &rule.tags],
                scenario,
                feature_path,
            )?;
        }
    }
    debug!(
        "feature '{}' declares external data on {} scenario(s)",
        feature.name,
        found.len()
    );
    Ok(found)
}

fn collect<const N: usize>(
    found: &mut Vec<ScenarioSpecification>,
    inherited: [&Vec<String>; N],
    scenario: &Scenario,
    feature_path: &Utf8Path,
) -> Result<(), ExternalDataError> {
    let tags = inherited
        .into_iter()
        .flatten()
        .chain(&scenario.tags)
        .map(String::as_str);
    let Some(specification) = parse_specification(tags, Some(feature_path))? else {
        return Ok(());
    };
    found.push(ScenarioSpecification {
        scenario: scenario.name.clone(),
        line: scenario.position.line,
        specification,
        requested_header: requested_header(scenario),
    });
    Ok(())
}

fn requested_header(scenario: &Scenario) -> Option<Vec<String>> {
    scenario
        .examples
        .first()
        .and_then(|examples| examples.table.as_ref())
        .and_then(|table| table.rows.first())
        .filter(|row| !row.is_empty())
        .cloned()
}

/// Load and project the external data of every scenario in `feature`.
///
/// Scenarios without a data source are skipped. The first failure aborts
/// the whole feature.
///
/// # Errors
/// Propagates tag, load, parse and projection errors.
///
/// # Examples
/// ```no_run
/// use camino::Utf8Path;
/// use gherkin::{Feature, GherkinEnv};
/// use rstest_bdd_data::{LoaderConfig, SourceResolver, resolve_feature};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let path = Utf8Path::new("tests/features/shop.feature");
/// let feature = Feature::parse_path(path, GherkinEnv::default())?;
/// let resolver = SourceResolver::new(LoaderConfig::from_env()?);
/// for outline in resolve_feature(&feature, path, &resolver)? {
///     println!("{}: {} example(s)", outline.scenario, outline.table.len());
/// }
/// # Ok(())
/// # }
/// ```
pub fn resolve_feature<R: SourceReader>(
    feature: &Feature,
    feature_path: &Utf8Path,
    resolver: &SourceResolver<R>,
) -> Result<Vec<OutlineExamples>, ExternalDataError> {
    specifications(feature, feature_path)?
        .into_iter()
        .map(|declared| {
            let table = resolver.examples(
                &declared.specification,
                declared.requested_header.as_deref(),
            )?;
            Ok(OutlineExamples {
                scenario: declared.scenario,
                line: declared.line,
                specification: declared.specification,
                table,
            })
        })
        .collect()
}
