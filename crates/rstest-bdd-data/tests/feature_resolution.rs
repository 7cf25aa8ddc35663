//! End-to-end resolution of external data declared in feature files.

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::{ambient_authority, fs::Dir};
use gherkin::{Feature, GherkinEnv};
use rstest::{fixture, rstest};
use rstest_bdd_data::{
    ExternalDataError, LoaderConfig, OutlineExamples, SourceResolver, resolve_feature,
    specifications,
};
use tempfile::TempDir;

const PRODUCTS: &str = "product,price\nChocolate,2.5\nApple,1.0\n";

/// Scratch directory holding a feature file and its data sources.
struct Workspace {
    _temp: TempDir,
    root: Utf8PathBuf,
    dir: Dir,
}

impl Workspace {
    fn write(&self, relative: &str, contents: &str) {
        let path = Utf8Path::new(relative);
        if let Some(parent) = path.parent().filter(|p| !p.as_str().is_empty()) {
            self.dir
                .create_dir_all(parent.as_std_path())
                .unwrap_or_else(|err| panic!("failed to create {parent}: {err}"));
        }
        self.dir
            .write(path.as_std_path(), contents)
            .unwrap_or_else(|err| panic!("failed to write {relative}: {err}"));
    }

    fn path(&self, relative: &str) -> Utf8PathBuf {
        self.root.join(relative)
    }

    fn resolve(
        &self,
        feature: &str,
        config: LoaderConfig,
    ) -> Result<Vec<OutlineExamples>, ExternalDataError> {
        let path = self.path(feature);
        let text = self
            .dir
            .read_to_string(feature)
            .unwrap_or_else(|err| panic!("failed to read {feature}: {err}"));
        let parsed = Feature::parse(text, GherkinEnv::default())
            .unwrap_or_else(|err| panic!("{feature} should be valid Gherkin: {err}"));
        resolve_feature(&parsed, &path, &SourceResolver::new(config))
    }
}

#[fixture]
fn workspace() -> Workspace {
    let temp = TempDir::new().unwrap_or_else(|err| panic!("failed to create temp dir: {err}"));
    let root = Utf8Path::from_path(temp.path())
        .unwrap_or_else(|| panic!("temp dir path should be UTF-8"))
        .to_path_buf();
    let dir = Dir::open_ambient_dir(root.as_std_path(), ambient_authority())
        .unwrap_or_else(|err| panic!("failed to open temp dir: {err}"));
    Workspace {
        _temp: temp,
        root,
        dir,
    }
}

fn single(outlines: Vec<OutlineExamples>) -> OutlineExamples {
    let mut outlines = outlines.into_iter();
    let outline = outlines
        .next()
        .unwrap_or_else(|| panic!("one outline should resolve"));
    assert!(outlines.next().is_none(), "only one outline should resolve");
    outline
}

#[rstest]
fn projects_requested_columns_through_field_map(workspace: Workspace) {
    workspace.write("features/products.csv", PRODUCTS);
    workspace.write(
        "features/shop.feature",
        "Feature: Shop\n\
         \n\
         \x20 @DataSource:products.csv\n\
         \x20 @DataField:item=product\n\
         \x20 Scenario Outline: buying\n\
         \x20   Given I buy <item> for <price>\n\
         \n\
         \x20   Examples:\n\
         \x20     | item | price |\n",
    );

    let outline = single(
        workspace
            .resolve("features/shop.feature", LoaderConfig::default())
            .unwrap_or_else(|err| panic!("feature should resolve: {err}")),
    );
    assert_eq!(outline.scenario, "buying");
    assert_eq!(outline.line, 5);
    assert_eq!(outline.table.header(), ["item", "price"]);
    assert_eq!(
        outline.table.to_rows(),
        vec![
            vec!["Chocolate".to_string(), "2.5".to_string()],
            vec!["Apple".to_string(), "1.0".to_string()],
        ]
    );
}

#[rstest]
fn feature_tags_apply_to_every_scenario_and_rule(workspace: Workspace) {
    workspace.write("data/products.csv", PRODUCTS);
    workspace.write("data/other.csv", "name\nwidget\n");
    workspace.write(
        "features/shop.feature",
        "@DataSource:../data/products.csv\n\
         Feature: Shop\n\
         \n\
         \x20 Scenario Outline: listing\n\
         \x20   Given <product> is listed\n\
         \n\
         \x20 Rule: overrides\n\
         \n\
         \x20   @DataSource:../data/other.csv\n\
         \x20   Scenario Outline: naming\n\
         \x20     Given <name> exists\n\
         \n\
         \x20 Scenario: plain\n\
         \x20   Given nothing\n",
    );

    let outlines = workspace
        .resolve("features/shop.feature", LoaderConfig::default())
        .unwrap_or_else(|err| panic!("feature should resolve: {err}"));
    let resolved: Vec<_> = outlines
        .iter()
        .map(|outline| (outline.scenario.as_str(), outline.table.header().join(",")))
        .collect();
    assert_eq!(
        resolved,
        [
            ("listing", "product,price".to_string()),
            ("naming", "name".to_string()),
            ("plain", "product,price".to_string()),
        ]
    );
}

#[rstest]
fn missing_data_source_names_resolved_path(workspace: Workspace) {
    workspace.write(
        "features/shop.feature",
        "Feature: Shop\n\
         \n\
         \x20 @DataSource:missing.csv\n\
         \x20 Scenario Outline: buying\n\
         \x20   Given <item>\n",
    );

    let Err(err) = workspace.resolve("features/shop.feature", LoaderConfig::default()) else {
        panic!("missing data source should fail");
    };
    let expected = workspace.path("features/missing.csv");
    assert!(
        matches!(&err, ExternalDataError::DataSourceUnavailable { path, .. } if *path == expected),
        "got: {err}"
    );
}

#[rstest]
fn header_only_source_yields_empty_examples(workspace: Workspace) {
    workspace.write("features/empty.csv", "product,price\n");
    workspace.write(
        "features/shop.feature",
        "Feature: Shop\n\
         \n\
         \x20 @DataSource:empty.csv\n\
         \x20 Scenario Outline: buying\n\
         \x20   Given <product>\n",
    );

    let outline = single(
        workspace
            .resolve("features/shop.feature", LoaderConfig::default())
            .unwrap_or_else(|err| panic!("feature should resolve: {err}")),
    );
    assert_eq!(outline.table.header(), ["product", "price"]);
    assert!(outline.table.is_empty());
}

#[rstest]
fn configured_culture_reads_semicolon_sources(workspace: Workspace) {
    workspace.write("features/prices.csv", "product;price\nChocolate;2,5\n");
    workspace.write(
        "features/shop.feature",
        "Feature: Shop\n\
         \n\
         \x20 @DataSource:prices.csv\n\
         \x20 Scenario Outline: buying\n\
         \x20   Given <product>\n",
    );
    let config = LoaderConfig::default().apply_overrides(None, None, Some("fr-FR".into()));

    let outline = single(
        workspace
            .resolve("features/shop.feature", config)
            .unwrap_or_else(|err| panic!("feature should resolve: {err}")),
    );
    assert_eq!(
        outline.table.to_rows(),
        vec![vec!["Chocolate".to_string(), "2,5".to_string()]]
    );
}

#[rstest]
fn malformed_tags_fail_before_loading(workspace: Workspace) {
    workspace.write(
        "features/shop.feature",
        "Feature: Shop\n\
         \n\
         \x20 @DataSource:products.csv\n\
         \x20 @DataField\n\
         \x20 Scenario Outline: buying\n\
         \x20   Given <item>\n",
    );
    let path = workspace.path("features/shop.feature");
    let text = workspace
        .dir
        .read_to_string("features/shop.feature")
        .unwrap_or_else(|err| panic!("failed to read feature: {err}"));
    let feature = Feature::parse(text, GherkinEnv::default())
        .unwrap_or_else(|err| panic!("feature should be valid Gherkin: {err}"));

    assert!(matches!(
        specifications(&feature, &path),
        Err(ExternalDataError::Configuration(_))
    ));
}
