//! Tests for building specifications from tag sequences.

use camino::Utf8Path;
use rstest::rstest;

use super::{Specification, parse_specification};
use crate::error::ExternalDataError;

const FEATURE: &str = "/work/features/Sample.feature";

fn spec(tags: &[&str]) -> Specification {
    match parse_specification(tags, Some(Utf8Path::new(FEATURE))) {
        Ok(Some(spec)) => spec,
        Ok(None) => panic!("tags {tags:?} should declare a data source"),
        Err(err) => panic!("tags {tags:?} should parse: {err}"),
    }
}

#[test]
fn returns_none_without_data_source_tag() {
    let result = parse_specification(["@other-tag"], Some(Utf8Path::new(FEATURE)));
    assert!(matches!(result, Ok(None)));
}

#[test]
fn returns_none_for_no_tags() {
    let result = parse_specification(Vec::<String>::new(), None);
    assert!(matches!(result, Ok(None)));
}

#[rstest]
#[case("@DataSource:")]
#[case("@DataSource")]
fn rejects_invalid_data_source_tags(#[case] tag: &str) {
    let result = parse_specification([tag], Some(Utf8Path::new(FEATURE)));
    let Err(err) = result else {
        panic!("`{tag}` should be rejected");
    };
    assert!(matches!(err, ExternalDataError::Configuration(_)));
    assert!(err.to_string().contains(tag), "got: {err}");
}

#[rstest]
#[case("@DataField")]
#[case("@DataField:")]
fn rejects_invalid_data_field_tags(#[case] tag: &str) {
    let result = parse_specification(["@DataSource:foo", tag], None);
    assert!(matches!(result, Err(ExternalDataError::Configuration(_))));
}

#[test]
fn keeps_source_path_raw_and_records_feature_path() {
    let spec = spec(&[r"@DataSource:path\to\file.csv"]);
    assert_eq!(spec.source_path(), r"path\to\file.csv");
    assert_eq!(spec.feature_path(), Some(Utf8Path::new(FEATURE)));
    assert!(spec.field_map().is_empty());
}

#[test]
fn collects_field_mappings() {
    let spec = spec(&[
        "@DataSource:products.csv",
        "@DataField:target_field=source_field",
    ]);
    assert_eq!(spec.field_map().source_for("target_field"), Some("source_field"));
}

#[rstest]
#[case("@DataField:target_field")]
#[case("@DataField:target_field=")]
fn defaults_source_to_target(#[case] tag: &str) {
    let spec = spec(&["@DataSource:products.csv", tag]);
    assert_eq!(spec.field_map().source_for("target_field"), Some("target_field"));
}

#[test]
fn last_duplicate_target_wins_and_keeps_position() {
    let spec = spec(&[
        "@DataSource:products.csv",
        "@DataField:x=y",
        "@DataField:other=other",
        "@DataField:x=z",
    ]);
    assert_eq!(spec.field_map().source_for("x"), Some("z"));
    assert_eq!(spec.field_map().targets().collect::<Vec<_>>(), ["x", "other"]);
}

#[test]
fn field_tags_may_precede_data_source() {
    let spec = spec(&["@DataField:item=product", "@wip", "@DataSource:products.csv"]);
    assert_eq!(spec.source_path(), "products.csv");
    assert_eq!(spec.field_map().len(), 1);
}

#[test]
fn last_data_source_wins() {
    let spec = spec(&["@DataSource:feature.csv", "@DataSource:scenario.csv"]);
    assert_eq!(spec.source_path(), "scenario.csv");
}

#[test]
fn accepts_tags_without_at_prefix() {
    let spec = spec(&["DataSource:products.csv", "DataField:item=product"]);
    assert_eq!(spec.source_path(), "products.csv");
    assert_eq!(spec.field_map().source_for("item"), Some("product"));
}
