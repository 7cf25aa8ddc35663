//! In-memory data model shared by the loaders and the projection engine.

mod record;
mod table;
mod value;

pub use record::DataRecord;
pub use table::DataTable;
pub(crate) use table::first_duplicate;
pub use value::{DataValue, ValueKind};
