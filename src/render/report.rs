//! SQL report renderer.
//!
//! The layout is a fixed contract: banner widths, indentation and blank
//! line counts are reproduced byte for byte.

use crate::error::Result;
use crate::model::{DatasourceMap, QueryMap, Workbook, WorksheetMap};
use std::path::{Component, Path, PathBuf};

use super::options::ReportOptions;

/// Width of section banners.
pub const LINE_BIG: usize = 77;

/// Width budget of per-query banners.
pub const LINE_SMALL: usize = 50;

/// Timestamp format of the `Created on` line, e.g. `2024-03-05 03:07PM`.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %I:%M%p";

/// Render the extracted workbook as a SQL-comment report.
///
/// `source` is the workbook path shown in the header; relative paths are
/// made absolute against the current directory and `.`/`..` are collapsed.
pub fn to_report(workbook: &Workbook, source: &Path, options: &ReportOptions) -> Result<String> {
    let mut output = String::new();

    output.push_str(&render_header(source, options));
    output.push_str(&render_worksheets(&workbook.worksheets));
    output.push_str(&render_datasources(&workbook.datasources));
    output.push_str(&render_queries(&workbook.queries));

    Ok(output)
}

/// `-- <title> ` padded with dashes to [`LINE_BIG`] characters.
fn section_banner(title: &str) -> String {
    let lead = format!("-- {} ", title);
    let pad = LINE_BIG.saturating_sub(lead.chars().count());
    format!("{}{}\n", lead, "-".repeat(pad))
}

fn or_none(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or("None")
}

/// Absolute form of `path` with `.` and `..` resolved lexically. Symlinks
/// are not followed.
fn absolute_source(path: &Path) -> PathBuf {
    let absolute = std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf());

    let mut normalized = PathBuf::new();
    for component in absolute.components() {
        match component {
            Component::CurDir => {}
            // `pop` on the root is a no-op, so `/..` stays `/`
            Component::ParentDir => {
                normalized.pop();
            }
            other => normalized.push(other.as_os_str()),
        }
    }
    normalized
}

fn render_header(source: &Path, options: &ReportOptions) -> String {
    let source = absolute_source(source);
    let rule = "-".repeat(LINE_BIG);

    let mut output = String::new();
    output.push_str(&rule);
    output.push('\n');
    output.push_str(&format!("-- Created by: {}\n", options.resolve_author()));
    output.push_str(&format!(
        "-- Created on: {}\n",
        options.resolve_created_on().format(TIMESTAMP_FORMAT)
    ));
    output.push_str(&format!("-- Source: {}\n", source.display()));
    output.push_str(&rule);
    output.push_str("\n\n\n");
    output
}

fn render_worksheets(worksheets: &WorksheetMap) -> String {
    let mut output = section_banner("Worksheets w/ Datasources");

    for (name, worksheet) in worksheets {
        output.push_str(&format!("-- {}\n", name));
        for caption in &worksheet.datasource_captions {
            output.push_str(&format!("  -- {}\n", caption));
        }
        output.push('\n');
    }

    output.push_str("\n\n");
    output
}

fn render_datasources(datasources: &DatasourceMap) -> String {
    let mut output = section_banner("Datasources & Connections");

    for (key, source) in datasources {
        output.push_str(&format!("-- {}\n", or_none(key)));
        output.push_str(&format!("  -- Source name: {}\n", or_none(&source.source_name)));
        output.push_str(&format!(
            "  -- Source caption: {}\n",
            or_none(&source.source_caption)
        ));
        output.push_str(&format!("  -- Server: {}\n", source.server));
        output.push_str(&format!("  -- Username: {}\n", source.user));
        output.push_str(&format!("  -- Engine: {}\n", source.engine));
        output.push_str(&format!("  -- Database: {}\n", source.database));
        output.push_str(&format!("  -- Schema: {}\n", source.schema));
        output.push_str("\n\n");
    }

    output
}

fn render_queries(queries: &QueryMap) -> String {
    let mut output = section_banner("Queries");

    for (key, query) in queries {
        // Long names simply get no dashes
        let pad = (LINE_SMALL - 4).saturating_sub(key.chars().count());
        output.push_str(&format!("-- {} {}\n", key, "-".repeat(pad)));
        output.push_str(&format!(" -- Connection: {}\n", query.connection));
        output.push_str(&query.query_text);
        output.push_str("\n;\n\n\n");
    }

    output
}
