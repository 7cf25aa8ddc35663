//! Shapes a loaded table into the example table a scenario outline consumes.
//!
//! Two choices compose. The output header is either the header requested by
//! the outline or a default view derived from the source table. Each output
//! column is then filled from its mapped source field, or from the source
//! field of the same name when the column is not mapped.

use hashbrown::HashSet;
use log::debug;

use crate::error::{ExternalDataError, ProjectionError};
use crate::model::{DataRecord, DataTable, first_duplicate};
use crate::tags::FieldMap;

/// Project `source` into the requested header through `field_map`.
///
/// Without a requested header the output lists every source column with
/// renames applied in place: a mapped source column is replaced by its
/// target columns (several targets may share one source), and targets whose
/// source column is not in the header are appended. Source columns the
/// output header does not name are dropped. Records keep their order.
///
/// # Errors
/// Returns [`ProjectionError::MissingField`] when any record lacks the
/// source field for an output column, and
/// [`ProjectionError::DuplicateColumn`] when the requested header repeats a
/// name. No partial table is returned.
///
/// # Examples
/// ```
/// use rstest_bdd_data::{CsvOptions, FieldMap, parse_csv, project};
/// # fn main() -> Result<(), rstest_bdd_data::ExternalDataError> {
/// let source = parse_csv("product,price\nChocolate,2.5\n", &CsvOptions::default())?;
/// let map: FieldMap = [("item", "product")].into_iter().collect();
/// let header = ["item".to_string(), "price".to_string()];
/// let table = project(source, Some(header.as_slice()), Some(&map))?;
/// assert_eq!(table.header(), ["item", "price"]);
/// assert_eq!(table.to_rows(), vec![vec!["Chocolate".to_string(), "2.5".to_string()]]);
/// # Ok(())
/// # }
/// ```
pub fn project(
    source: DataTable,
    requested_header: Option<&[String]>,
    field_map: Option<&FieldMap>,
) -> Result<DataTable, ExternalDataError> {
    let empty = FieldMap::new();
    let field_map = field_map.unwrap_or(&empty);

    let header = match requested_header {
        Some(requested) => {
            if let Some(column) = first_duplicate(requested) {
                return Err(ProjectionError::DuplicateColumn {
                    column: column.to_string(),
                }
                .into());
            }
            requested.to_vec()
        }
        None => default_header(source.header(), field_map),
    };

    let columns: Vec<(&str, &str)> = header
        .iter()
        .map(|target| {
            let source_field = field_map.source_for(target).unwrap_or(target.as_str());
            (target.as_str(), source_field)
        })
        .collect();

    let (_, records) = source.into_parts();
    let mut items = Vec::with_capacity(records.len());
    for (index, record) in records.iter().enumerate() {
        items.push(project_record(record, index, &columns)?);
    }
    debug!(
        "projected {} record(s) onto {} example column(s)",
        items.len(),
        header.len()
    );
    Ok(DataTable::from_parts(header, items))
}

fn project_record(
    record: &DataRecord,
    index: usize,
    columns: &[(&str, &str)],
) -> Result<DataRecord, ProjectionError> {
    let mut projected = DataRecord::with_capacity(columns.len());
    for &(target, source_field) in columns {
        let value = record
            .get(source_field)
            .ok_or_else(|| ProjectionError::MissingField {
                record: index + 1,
                field: target.to_string(),
                source_field: source_field.to_string(),
            })?;
        projected.insert(target, value.clone());
    }
    Ok(projected)
}

/// Source header with renames applied in place, followed by any targets
/// whose source column is absent.
fn default_header(source_header: &[String], field_map: &FieldMap) -> Vec<String> {
    let mut header = Vec::with_capacity(source_header.len() + field_map.len());
    let mut emitted: HashSet<String> = HashSet::new();
    let mut push = |name: &str, header: &mut Vec<String>| {
        if emitted.insert(name.to_string()) {
            header.push(name.to_string());
        }
    };

    for column in source_header {
        let mut targets = field_map.targets_of(column).peekable();
        if targets.peek().is_none() {
            if !field_map.contains_target(column) {
                push(column, &mut header);
            }
            continue;
        }
        for target in targets {
            push(target, &mut header);
        }
    }
    for target in field_map.targets() {
        push(target, &mut header);
    }
    header
}
