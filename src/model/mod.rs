//! Extracted workbook model.
//!
//! Extractors turn workbook XML into these flat records, and renderers turn
//! them into the SQL report or JSON.

mod datasource;
mod query;
mod workbook;
mod worksheet;

pub use datasource::*;
pub use query::*;
pub use workbook::*;
pub use worksheet::*;
