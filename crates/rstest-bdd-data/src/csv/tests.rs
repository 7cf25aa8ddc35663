//! Tests for CSV header handling, record validation, and quoting policy.

use rstest::rstest;

use super::{CsvOptions, parse_csv};
use crate::error::CsvError;
use crate::model::DataTable;

fn parse_ok(text: &str) -> DataTable {
    parse_csv(text, &CsvOptions::default())
        .unwrap_or_else(|err| panic!("CSV should parse: {err}"))
}

fn parse_err(text: &str) -> CsvError {
    match parse_csv(text, &CsvOptions::default()) {
        Ok(table) => panic!("CSV should fail to parse, got {table:?}"),
        Err(err) => err,
    }
}

fn cell<'a>(table: &'a DataTable, row: usize, column: &str) -> &'a str {
    table
        .items()
        .get(row)
        .and_then(|record| record.scalar(column).ok().flatten())
        .unwrap_or_else(|| panic!("row {row} should have scalar column '{column}'"))
}

#[test]
fn reads_simple_products() {
    let table = parse_ok("product,price\nChocolate,2.5\nApple,1.0\nOrange,1.2\n");
    assert_eq!(table.header(), ["product", "price"]);
    assert_eq!(table.len(), 3);
    assert_eq!(cell(&table, 0, "product"), "Chocolate");
    assert_eq!(cell(&table, 0, "price"), "2.5");
}

#[test]
fn reads_quoted_fields_with_escapes_delimiters_and_line_breaks() {
    let table = parse_ok(concat!(
        "\"product\",price\n",
        "Chocolate,2.5\n",
        "\"One\"\"Two,Three \",1.0\n",
        "\"Orange\nJuice\", 1.2",
    ));
    assert_eq!(table.header(), ["product", "price"]);
    assert_eq!(table.len(), 3);
    assert_eq!(cell(&table, 1, "product"), "One\"Two,Three ");
    assert_eq!(cell(&table, 2, "product"), "Orange\nJuice");
    assert_eq!(cell(&table, 2, "price"), " 1.2");
}

#[test]
fn doubled_quote_becomes_literal_quote() {
    let table = parse_ok("v\n\"a\"\"b\"\n");
    assert_eq!(cell(&table, 0, "v"), "a\"b");
}

#[test]
fn embedded_line_break_does_not_add_rows() {
    let table = parse_ok("name,note\nx,\"line one\r\nline two\"\ny,plain\n");
    assert_eq!(table.len(), 2);
    assert_eq!(cell(&table, 0, "note"), "line one\r\nline two");
}

#[test]
fn every_record_has_every_header_field() {
    let table = parse_ok("a,b,c\n1,2,3\n4,5,6\n7,8,9");
    assert_eq!(table.header().len(), 3);
    assert_eq!(table.len(), 3);
    for record in &table {
        assert_eq!(record.len(), 3);
        for column in table.header() {
            assert!(record.contains(column), "missing {column}");
        }
    }
}

#[rstest]
#[case("product,price\n")]
#[case("product,price")]
#[case("product,price\n\n   \n")]
#[case("product,price\r\n\r\n")]
fn header_only_input_has_no_items(#[case] text: &str) {
    let table = parse_ok(text);
    assert_eq!(table.header(), ["product", "price"]);
    assert!(table.is_empty());
}

#[rstest]
#[case("")]
#[case("\n\n")]
#[case("  \n\t")]
#[case("\u{feff}")]
fn input_without_header_is_malformed(#[case] text: &str) {
    assert_eq!(parse_err(text), CsvError::Empty);
}

#[test]
fn ragged_record_aborts_the_parse() {
    assert_eq!(
        parse_err("a,b,c\n1,2,3\n4,5\n"),
        CsvError::UnevenRecord {
            line: 3,
            expected: 3,
            actual: 2,
        }
    );
}

#[test]
fn record_with_extra_fields_is_malformed() {
    assert!(matches!(
        parse_err("a,b\n1,2,3"),
        CsvError::UnevenRecord {
            expected: 2,
            actual: 3,
            ..
        }
    ));
}

#[test]
fn duplicate_header_is_malformed() {
    assert_eq!(
        parse_err("\nid,name,id\n1,a,2"),
        CsvError::DuplicateHeader {
            line: 2,
            column: "id".to_string(),
        }
    );
}

#[test]
fn header_names_are_case_sensitive() {
    let table = parse_ok("Id,id\n1,2");
    assert_eq!(cell(&table, 0, "Id"), "1");
    assert_eq!(cell(&table, 0, "id"), "2");
}

#[test]
fn unterminated_quote_is_malformed() {
    assert!(matches!(
        parse_err("a,b\n\"open,2\n"),
        CsvError::UnterminatedQuote { line: 2, column: 1 }
    ));
}

#[test]
fn text_after_closing_quote_is_malformed() {
    assert!(matches!(
        parse_err("a\n\"x\"y\n"),
        CsvError::TrailingCharacter { found: 'y', .. }
    ));
}

#[test]
fn skips_blank_lines_between_records() {
    let table = parse_ok("a,b\n1,2\n\n3,4\n");
    assert_eq!(table.len(), 2);
    assert_eq!(cell(&table, 1, "a"), "3");
}

#[test]
fn quoted_empty_field_is_not_a_blank_line() {
    let table = parse_ok("a\n\"\"\n");
    assert_eq!(table.len(), 1);
    assert_eq!(cell(&table, 0, "a"), "");
}

#[test]
fn strips_byte_order_mark() {
    let table = parse_ok("\u{feff}product,price\nApple,1.0");
    assert_eq!(table.header(), ["product", "price"]);
}

#[test]
fn uses_configured_delimiter() {
    let options = CsvOptions::default()
        .with_delimiter(';')
        .unwrap_or_else(|err| panic!("semicolon is a valid delimiter: {err}"));
    let table = parse_csv("product;price\nChocolate;2,5\n", &options)
        .unwrap_or_else(|err| panic!("CSV should parse: {err}"));
    assert_eq!(cell(&table, 0, "price"), "2,5");
}

#[test]
fn trimming_applies_to_unquoted_fields_only() {
    let options = CsvOptions::default().with_trimmed_fields(true);
    let table = parse_csv(" name , note \n x ,\" padded \"\n", &options)
        .unwrap_or_else(|err| panic!("CSV should parse: {err}"));
    assert_eq!(table.header(), ["name", "note"]);
    assert_eq!(cell(&table, 0, "name"), "x");
    assert_eq!(cell(&table, 0, "note"), " padded ");
}

#[rstest]
#[case('"')]
#[case('\n')]
#[case('\r')]
fn rejects_reserved_delimiters(#[case] delimiter: char) {
    assert!(CsvOptions::default().with_delimiter(delimiter).is_err());
}
