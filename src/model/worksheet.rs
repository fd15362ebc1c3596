//! Worksheet records.

use serde::Serialize;

/// A worksheet and the captions of the data sources its view uses.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct WorksheetRecord {
    /// Worksheet name
    pub name: String,

    /// Captions of referenced data sources, in document order
    pub datasource_captions: Vec<String>,
}

impl WorksheetRecord {
    /// Create a worksheet record.
    pub fn new(name: impl Into<String>, datasource_captions: Vec<String>) -> Self {
        Self {
            name: name.into(),
            datasource_captions,
        }
    }
}
