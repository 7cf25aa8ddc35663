//! External example data for rstest-bdd scenario outlines.
//!
//! A scenario opts in with tags such as:
//!
//! ```gherkin
//! @DataSource:products.csv @DataField:item=product
//! Scenario Outline: buying products
//!   Given I have <item> at <price>
//!
//!   Examples:
//!     | item | price |
//! ```
//!
//! The crate parses those tags into a [`Specification`], reads the CSV file
//! relative to the feature file, and projects its records onto the columns
//! the outline asks for. [`resolve_feature`] performs the whole pipeline for
//! every scenario of a parsed `gherkin` feature.
//!
//! ```
//! use rstest_bdd_data::{CsvOptions, parse_csv, parse_specification, project};
//! # fn main() -> Result<(), rstest_bdd_data::ExternalDataError> {
//! let tags = ["@DataSource:products.csv", "@DataField:item=product"];
//! let spec = parse_specification(tags, None)?.expect("data source declared");
//! let source = parse_csv("product,price\nChocolate,2.5\nApple,1.0\n", &CsvOptions::default())?;
//! let header = ["item".to_string(), "price".to_string()];
//! let table = project(source, Some(header.as_slice()), Some(spec.field_map()))?;
//! assert_eq!(table.to_rows()[1], ["Apple", "1.0"]);
//! # Ok(())
//! # }
//! ```

mod config;
mod csv;
mod error;
mod model;
mod outline;
mod projection;
mod resolver;
mod tags;

pub use config::{
    CULTURE_ENV, DELIMITER_ENV, LoaderConfig, TRIM_ENV, list_separator, parse_delimiter,
};
pub use csv::{CsvOptions, DEFAULT_DELIMITER, parse_csv};
pub use error::{ConfigurationError, CsvError, ExternalDataError, ProjectionError};
pub use model::{DataRecord, DataTable, DataValue, ValueKind};
pub use outline::{OutlineExamples, ScenarioSpecification, resolve_feature, specifications};
pub use projection::project;
pub use resolver::{FileSystemReader, SourceReader, SourceResolver, resolve_source_path};
pub use tags::{
    DATA_FIELD_MARKER, DATA_SOURCE_MARKER, FieldMap, Specification, parse_specification,
};
