//! Helpers for rendering resolved examples and specifications.

use std::io::Write;

use eyre::{Context, Result};
use rstest_bdd_data::{DataTable, OutlineExamples, ScenarioSpecification};
use serde::Serialize;

#[derive(Serialize)]
struct ExamplesReport<'a> {
    scenario: &'a str,
    line: usize,
    source: &'a str,
    header: &'a [String],
    rows: Vec<Vec<String>>,
}

impl<'a> From<&'a OutlineExamples> for ExamplesReport<'a> {
    fn from(outline: &'a OutlineExamples) -> Self {
        Self {
            scenario: &outline.scenario,
            line: outline.line,
            source: outline.specification.source_path(),
            header: outline.table.header(),
            rows: outline.table.to_rows(),
        }
    }
}

#[derive(Serialize)]
struct SpecificationReport<'a> {
    scenario: &'a str,
    line: usize,
    source: &'a str,
    fields: Vec<FieldReport<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    header: Option<&'a [String]>,
}

#[derive(Serialize)]
struct FieldReport<'a> {
    target: &'a str,
    source: &'a str,
}

impl<'a> From<&'a ScenarioSpecification> for SpecificationReport<'a> {
    fn from(declared: &'a ScenarioSpecification) -> Self {
        Self {
            scenario: &declared.scenario,
            line: declared.line,
            source: declared.specification.source_path(),
            fields: declared
                .specification
                .field_map()
                .iter()
                .map(|(target, source)| FieldReport { target, source })
                .collect(),
            header: declared.requested_header.as_deref(),
        }
    }
}

/// Write each outline as a Gherkin `Examples:` block.
pub(crate) fn write_examples(writer: &mut dyn Write, outlines: &[OutlineExamples]) -> Result<()> {
    for (index, outline) in outlines.iter().enumerate() {
        if index > 0 {
            writeln!(writer).wrap_err("failed to separate examples blocks")?;
        }
        writeln!(
            writer,
            "# {} (line {}) <- {}",
            outline.scenario,
            outline.line,
            outline.specification.source_path()
        )
        .wrap_err_with(|| format!("failed to write heading for {}", outline.scenario))?;
        writeln!(writer, "Examples:").wrap_err("failed to write examples keyword")?;
        write_table(writer, &outline.table)
            .wrap_err_with(|| format!("failed to write examples for {}", outline.scenario))?;
    }
    Ok(())
}

pub(crate) fn write_examples_json(
    writer: &mut dyn Write,
    outlines: &[OutlineExamples],
) -> Result<()> {
    let reports: Vec<ExamplesReport<'_>> = outlines.iter().map(ExamplesReport::from).collect();
    serde_json::to_writer_pretty(&mut *writer, &reports)
        .wrap_err("failed to serialise examples to JSON")?;
    writeln!(writer).wrap_err("failed to terminate JSON output")
}

/// Write each declared specification and its field mappings.
pub(crate) fn write_specifications(
    writer: &mut dyn Write,
    declared: &[ScenarioSpecification],
) -> Result<()> {
    for entry in declared {
        writeln!(
            writer,
            "{} (line {}) <- {}",
            entry.scenario,
            entry.line,
            entry.specification.source_path()
        )
        .wrap_err_with(|| format!("failed to write specification for {}", entry.scenario))?;
        for (target, source) in entry.specification.field_map().iter() {
            writeln!(writer, "  {target} = {source}")
                .wrap_err_with(|| format!("failed to write field mapping for {target}"))?;
        }
    }
    Ok(())
}

pub(crate) fn write_specifications_json(
    writer: &mut dyn Write,
    declared: &[ScenarioSpecification],
) -> Result<()> {
    let reports: Vec<SpecificationReport<'_>> =
        declared.iter().map(SpecificationReport::from).collect();
    serde_json::to_writer_pretty(&mut *writer, &reports)
        .wrap_err("failed to serialise specifications to JSON")?;
    writeln!(writer).wrap_err("failed to terminate JSON output")
}

fn write_table(writer: &mut dyn Write, table: &DataTable) -> Result<()> {
    let rows: Vec<Vec<String>> = std::iter::once(table.header().to_vec())
        .chain(table.to_rows())
        .map(|row| row.iter().map(String::as_str).map(escape_cell).collect())
        .collect();
    let mut widths = vec![0_usize; table.header().len()];
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }
    for row in &rows {
        let cells: String = row
            .iter()
            .zip(&widths)
            .map(|(cell, &width)| format!(" {cell:<width$} |"))
            .collect();
        writeln!(writer, "  |{cells}")?;
    }
    Ok(())
}

/// Escape a cell so it survives inside a Gherkin table row.
fn escape_cell(cell: &str) -> String {
    let mut escaped = String::with_capacity(cell.len());
    for ch in cell.chars() {
        match ch {
            '\\' => escaped.push_str("\\\\"),
            '|' => escaped.push_str("\\|"),
            '\n' => escaped.push_str("\\n"),
            '\r' => {}
            other => escaped.push(other),
        }
    }
    escaped
}
