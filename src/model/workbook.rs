//! Workbook model: the three record maps extracted from one document.

use super::{DatasourceRecord, QueryRecord, WorksheetRecord};
use indexmap::IndexMap;
use serde::{Serialize, Serializer};
use std::hash::Hash;

/// Worksheets keyed by name, in document order.
pub type WorksheetMap = IndexMap<String, WorksheetRecord>;

/// Captioned data sources keyed by their `name` attribute, in document order.
pub type DatasourceMap = IndexMap<Option<String>, DatasourceRecord>;

/// Non-join relations keyed by name, in document order.
pub type QueryMap = IndexMap<String, QueryRecord>;

/// Everything extracted from a workbook document.
///
/// Each map keeps first-seen order; a later record with the same key
/// replaces the earlier value in place.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Workbook {
    /// Worksheets and their data source captions
    #[serde(serialize_with = "serialize_values")]
    pub worksheets: WorksheetMap,

    /// Data sources and their snowflake connection details
    #[serde(serialize_with = "serialize_values")]
    pub datasources: DatasourceMap,

    /// Custom SQL and linked tables
    #[serde(serialize_with = "serialize_values")]
    pub queries: QueryMap,
}

impl Workbook {
    /// Create an empty workbook.
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if nothing was extracted.
    pub fn is_empty(&self) -> bool {
        self.worksheets.is_empty() && self.datasources.is_empty() && self.queries.is_empty()
    }
}

// Records carry their own key, and data source keys may be absent, so maps
// go out as arrays.
fn serialize_values<K, V, S>(map: &IndexMap<K, V>, serializer: S) -> Result<S::Ok, S::Error>
where
    K: Hash + Eq,
    V: Serialize,
    S: Serializer,
{
    serializer.collect_seq(map.values())
}
