//! Format detection for Tableau workbooks.

use crate::error::{Error, Result};
use std::path::Path;

/// ZIP file magic bytes: PK\x03\x04
const ZIP_MAGIC: [u8; 4] = [0x50, 0x4B, 0x03, 0x04];

/// Detected workbook format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkbookFormat {
    /// Plain XML workbook (.twb)
    Twb,
    /// Packaged workbook, a ZIP archive bundling a .twb (.twbx)
    Twbx,
}

impl WorkbookFormat {
    /// Returns a human-readable name for this format.
    pub fn name(&self) -> &'static str {
        match self {
            WorkbookFormat::Twb => "Tableau Workbook",
            WorkbookFormat::Twbx => "Tableau Packaged Workbook",
        }
    }

    /// Map a file extension to a format. Matching is case-sensitive.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext {
            "twb" => Some(WorkbookFormat::Twb),
            "twbx" => Some(WorkbookFormat::Twbx),
            _ => None,
        }
    }
}

impl std::fmt::Display for WorkbookFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Validate a workbook path and return its format.
///
/// The path must name an existing regular file whose extension is `twb` or
/// `twbx`. Nothing is read from the file.
///
/// # Example
///
/// ```no_run
/// use twp::detect::detect_format_from_path;
///
/// let format = detect_format_from_path("sales.twbx")?;
/// println!("Detected format: {}", format);
/// # Ok::<(), twp::Error>(())
/// ```
pub fn detect_format_from_path(path: impl AsRef<Path>) -> Result<WorkbookFormat> {
    let path = path.as_ref();

    if !path.is_file() {
        return Err(Error::InvalidInput(path.to_path_buf()));
    }

    path.extension()
        .and_then(|ext| ext.to_str())
        .and_then(WorkbookFormat::from_extension)
        .ok_or_else(|| Error::InvalidInput(path.to_path_buf()))
}

/// Detect the format from the leading bytes of a workbook.
///
/// Anything that is not a ZIP archive is assumed to be plain XML.
pub fn detect_format_from_bytes(data: &[u8]) -> WorkbookFormat {
    if is_zip_file(data) {
        WorkbookFormat::Twbx
    } else {
        WorkbookFormat::Twb
    }
}

/// Check if data starts with ZIP magic bytes.
pub fn is_zip_file(data: &[u8]) -> bool {
    data.len() >= 4 && data[..4] == ZIP_MAGIC
}
