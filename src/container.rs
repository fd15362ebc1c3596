//! ZIP container abstraction for packaged workbooks (.twbx).

use crate::error::{Error, Result};
use std::cell::RefCell;
use std::fs::File;
use std::io::{BufReader, Cursor, Read};
use std::path::Path;

/// Extension of the workbook member inside a packaged workbook.
pub const WORKBOOK_ENTRY_SUFFIX: &str = ".twb";

/// Decode workbook XML bytes, handling UTF-8 and UTF-16 LE/BE.
///
/// Tableau writes UTF-8, but workbooks that went through other tooling
/// occasionally arrive with a BOM or as UTF-16. The XML parser works on
/// `&str` and ignores the declared encoding, so the prolog is left as is.
/// Bytes that fit none of these encodings are a
/// [`Error::MalformedDocument`].
pub fn decode_xml_bytes(bytes: &[u8]) -> Result<String> {
    if let Some(rest) = bytes.strip_prefix(&[0xEF, 0xBB, 0xBF]) {
        return decode_utf8(rest);
    }
    if let Some(rest) = bytes.strip_prefix(&[0xFF, 0xFE]) {
        return decode_utf16(rest, u16::from_le_bytes);
    }
    if let Some(rest) = bytes.strip_prefix(&[0xFE, 0xFF]) {
        return decode_utf16(rest, u16::from_be_bytes);
    }

    // BOM-less UTF-16: ASCII markup leaves a zero in every other byte
    if bytes.len() >= 4 && bytes[1] == 0 && bytes[3] == 0 {
        decode_utf16(bytes, u16::from_le_bytes)
    } else if bytes.len() >= 4 && bytes[0] == 0 && bytes[2] == 0 {
        decode_utf16(bytes, u16::from_be_bytes)
    } else {
        decode_utf8(bytes)
    }
}

fn decode_utf8(bytes: &[u8]) -> Result<String> {
    String::from_utf8(bytes.to_vec())
        .map_err(|e| Error::malformed(format!("invalid UTF-8: {}", e)))
}

fn decode_utf16(bytes: &[u8], to_unit: fn([u8; 2]) -> u16) -> Result<String> {
    let units = bytes
        .chunks_exact(2)
        .map(|pair| to_unit([pair[0], pair[1]]));

    char::decode_utf16(units)
        .collect::<std::result::Result<String, _>>()
        .map_err(|e| Error::malformed(format!("invalid UTF-16: {}", e)))
}

/// A packaged workbook: a ZIP archive holding the `.twb` plus extracts,
/// images and other assets.
pub struct TwbxContainer {
    archive: RefCell<zip::ZipArchive<Cursor<Vec<u8>>>>,
}

impl TwbxContainer {
    /// Open a packaged workbook from a file path.
    ///
    /// The whole archive is read into memory and the file handle is closed
    /// before this returns.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use twp::container::TwbxContainer;
    ///
    /// let container = TwbxContainer::open("sales.twbx")?;
    /// let xml = container.read_workbook_xml()?;
    /// # Ok::<(), twp::Error>(())
    /// ```
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path.as_ref())?;
        let mut reader = BufReader::new(file);
        let mut data = Vec::new();
        reader.read_to_end(&mut data)?;
        Self::from_bytes(data)
    }

    /// Create a container from a byte vector.
    pub fn from_bytes(data: Vec<u8>) -> Result<Self> {
        let archive = zip::ZipArchive::new(Cursor::new(data))?;
        Ok(Self {
            archive: RefCell::new(archive),
        })
    }

    /// List all member names in central-directory order.
    pub fn list_files(&self) -> Vec<String> {
        let archive = self.archive.borrow();
        archive.file_names().map(String::from).collect()
    }

    /// Name of the first member ending in `.twb`, in archive order.
    pub fn workbook_entry(&self) -> Option<String> {
        let archive = self.archive.borrow();
        let entry = archive
            .file_names()
            .find(|name| name.ends_with(WORKBOOK_ENTRY_SUFFIX))
            .map(String::from);
        entry
    }

    /// Read a member from the archive as decoded XML text.
    pub fn read_xml(&self, path: &str) -> Result<String> {
        let mut archive = self.archive.borrow_mut();
        let mut file = archive
            .by_name(path)
            .map_err(|_| Error::malformed(format!("archive has no member `{}`", path)))?;

        let mut bytes = Vec::new();
        file.read_to_end(&mut bytes)?;

        decode_xml_bytes(&bytes)
    }

    /// Locate and read the bundled workbook XML.
    ///
    /// Fails with [`Error::MalformedDocument`] when the archive holds no
    /// `.twb` member.
    pub fn read_workbook_xml(&self) -> Result<String> {
        let entry = self.workbook_entry().ok_or_else(|| {
            Error::malformed(format!(
                "packaged workbook contains no `{}` member",
                WORKBOOK_ENTRY_SUFFIX
            ))
        })?;
        tracing::debug!(entry = %entry, "reading bundled workbook");
        self.read_xml(&entry)
    }
}

impl std::fmt::Debug for TwbxContainer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TwbxContainer")
            .field("files", &self.list_files().len())
            .finish()
    }
}
