//! # twp
//!
//! Extract worksheets, data source connections and custom SQL from Tableau
//! workbooks (.twb and .twbx) into a readable, SQL-valid report.
//!
//! ## Quick Start
//!
//! ```no_run
//! // Full report, header stamped with the current user and time
//! let report = twp::convert("sales.twbx")?;
//! std::fs::write("sales.sql", report)?;
//!
//! // Structured access to the extracted records
//! let workbook = twp::parse_file("sales.twbx")?;
//! for query in workbook.queries.values() {
//!     println!("{} -> {}", query.key, query.connection);
//! }
//! # Ok::<(), twp::Error>(())
//! ```
//!
//! ## Reproducible Output
//!
//! ```no_run
//! use twp::render::ReportOptions;
//!
//! let options = ReportOptions::new().with_author("etl-bot");
//! let report = twp::convert_with_options("sales.twb", &options)?;
//! # Ok::<(), twp::Error>(())
//! ```

pub mod container;
pub mod detect;
pub mod error;
pub mod model;
pub mod render;
pub mod twb;
pub mod xml;

// Re-exports
pub use container::TwbxContainer;
pub use detect::{detect_format_from_bytes, detect_format_from_path, WorkbookFormat};
pub use error::{Error, Result};
pub use model::{
    ConnectionField, DatasourceMap, DatasourceRecord, QueryMap, QueryRecord, Workbook,
    WorksheetMap, WorksheetRecord, NO_SNOWFLAKE_CONNECTION,
};
pub use twb::TwbParser;

use std::path::Path;

/// Load a workbook file, ready for [`TwbParser::document`] or
/// [`TwbParser::parse`].
///
/// Packaged workbooks are unpacked and their first `.twb` member is read.
pub fn load_workbook(path: impl AsRef<Path>) -> Result<TwbParser> {
    TwbParser::open(path)
}

/// Parse a workbook file and return the extracted records.
///
/// # Example
///
/// ```no_run
/// let workbook = twp::parse_file("sales.twb")?;
/// println!("Worksheets: {}", workbook.worksheets.len());
/// # Ok::<(), twp::Error>(())
/// ```
pub fn parse_file(path: impl AsRef<Path>) -> Result<Workbook> {
    TwbParser::open(path)?.parse()
}

/// Parse a workbook from the bytes of a .twb or .twbx file.
///
/// # Example
///
/// ```no_run
/// let data = std::fs::read("sales.twbx")?;
/// let workbook = twp::parse_bytes(&data)?;
/// # Ok::<(), twp::Error>(())
/// ```
pub fn parse_bytes(data: &[u8]) -> Result<Workbook> {
    TwbParser::from_bytes(data.to_vec())?.parse()
}

/// Convert a workbook to the SQL report.
///
/// # Example
///
/// ```no_run
/// let report = twp::convert("sales.twbx")?;
/// print!("{}", report);
/// # Ok::<(), twp::Error>(())
/// ```
pub fn convert(path: impl AsRef<Path>) -> Result<String> {
    convert_with_options(path, &render::ReportOptions::default())
}

/// Convert a workbook to the SQL report with options.
pub fn convert_with_options(
    path: impl AsRef<Path>,
    options: &render::ReportOptions,
) -> Result<String> {
    let path = path.as_ref();
    let workbook = parse_file(path)?;
    render::to_report(&workbook, path, options)
}
