//! Output rendering for extracted workbooks.
//!
//! The SQL report is the primary output; JSON exposes the same records for
//! tooling.
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//! use twp::{parse_file, render::*};
//!
//! let workbook = parse_file("sales.twb")?;
//!
//! let report = to_report(&workbook, Path::new("sales.twb"), &ReportOptions::default())?;
//! let json = to_json(&workbook, JsonFormat::Pretty)?;
//! # Ok::<(), twp::Error>(())
//! ```

mod json;
mod options;
mod report;

pub use json::{to_json, to_json_default, JsonFormat};
pub use options::{current_user, passwd_user, ReportOptions};
pub use report::{to_report, LINE_BIG, LINE_SMALL, TIMESTAMP_FORMAT};
