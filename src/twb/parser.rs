//! Workbook loader and extraction entry point.

use crate::container::{decode_xml_bytes, TwbxContainer};
use crate::detect::{detect_format_from_bytes, detect_format_from_path, WorkbookFormat};
use crate::error::Result;
use crate::model::Workbook;
use crate::xml::{child, children_named, descendants_named, parse_document};
use roxmltree::Document;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use super::datasources::extract_datasources;
use super::relations::extract_queries;
use super::worksheets::extract_worksheets;

/// Parser for Tableau workbooks (.twb and .twbx).
///
/// Holds the decoded workbook XML; the document tree borrows from it and is
/// built by [`TwbParser::document`].
#[derive(Debug, Clone)]
pub struct TwbParser {
    xml: String,
}

impl TwbParser {
    /// Open a workbook file for parsing.
    ///
    /// The path is validated before anything is read; packaged workbooks are
    /// unpacked and their first `.twb` member is parsed.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let format = detect_format_from_path(path)?;
        tracing::debug!(path = %path.display(), %format, "loading workbook");

        let xml = match format {
            WorkbookFormat::Twb => {
                let file = File::open(path)?;
                let mut reader = BufReader::new(file);
                let mut data = Vec::new();
                reader.read_to_end(&mut data)?;
                decode_xml_bytes(&data)?
            }
            WorkbookFormat::Twbx => TwbxContainer::open(path)?.read_workbook_xml()?,
        };

        Ok(Self::from_xml(xml))
    }

    /// Create a parser from the bytes of a .twb or .twbx file.
    pub fn from_bytes(data: Vec<u8>) -> Result<Self> {
        let xml = match detect_format_from_bytes(&data) {
            WorkbookFormat::Twb => decode_xml_bytes(&data)?,
            WorkbookFormat::Twbx => TwbxContainer::from_bytes(data)?.read_workbook_xml()?,
        };
        Ok(Self::from_xml(xml))
    }

    /// Create a parser from workbook XML text. Syntax is checked when the
    /// document is built.
    pub fn from_xml(xml: impl Into<String>) -> Self {
        Self { xml: xml.into() }
    }

    /// The decoded workbook XML.
    pub fn xml(&self) -> &str {
        &self.xml
    }

    /// Parse the XML into a document tree whose root is normally
    /// `<workbook>`.
    pub fn document(&self) -> Result<Document<'_>> {
        parse_document(&self.xml)
    }

    /// Run the three extractors over the document.
    pub fn parse(&self) -> Result<Workbook> {
        let doc = self.document()?;
        let root = doc.root_element();

        let worksheets = extract_worksheets(
            child(root, "worksheets")
                .into_iter()
                .flat_map(|c| children_named(c, "worksheet")),
        )?;

        let datasources = extract_datasources(
            child(root, "datasources")
                .into_iter()
                .flat_map(|c| children_named(c, "datasource")),
        );

        let queries = extract_queries(descendants_named(root, "relation"))?;

        Ok(Workbook {
            worksheets,
            datasources,
            queries,
        })
    }
}
