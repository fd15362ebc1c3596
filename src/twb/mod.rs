//! Tableau workbook (.twb / .twbx) extraction.
//!
//! # Example
//!
//! ```no_run
//! use twp::twb::TwbParser;
//!
//! let workbook = TwbParser::open("sales.twbx")?.parse()?;
//!
//! for (name, sheet) in &workbook.worksheets {
//!     println!("{}: {:?}", name, sheet.datasource_captions);
//! }
//! # Ok::<(), twp::Error>(())
//! ```

mod datasources;
mod parser;
mod relations;
mod worksheets;

pub use datasources::{extract_datasources, find_snowflake_connection};
pub use parser::TwbParser;
pub use relations::{extract_queries, normalize_query_text, LINKED_TO_PREFIX};
pub use worksheets::extract_worksheets;
