//! Data source and connection records.

use serde::{Serialize, Serializer};
use std::fmt;

/// Connection class the extractor looks for.
pub const SNOWFLAKE_CLASS: &str = "snowflake";

/// Placeholder for every connection field of a data source that has no
/// snowflake connection.
pub const NO_SNOWFLAKE_CONNECTION: &str = "No snowflake connection";

/// A connection attribute of a data source.
///
/// `Missing` and `Unsupported` render differently: the first means the
/// chosen connection lacks the attribute, the second that the data source
/// has no snowflake connection at all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectionField {
    /// Attribute value read from the chosen connection
    Value(String),
    /// The chosen connection has no such attribute
    Missing,
    /// No snowflake connection exists in the data source
    Unsupported,
}

impl ConnectionField {
    /// Build a field from an optional attribute value.
    pub fn from_attr(value: Option<&str>) -> Self {
        match value {
            Some(v) => ConnectionField::Value(v.to_string()),
            None => ConnectionField::Missing,
        }
    }

    /// Text of the field, `None` when the attribute is missing.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ConnectionField::Value(v) => Some(v),
            ConnectionField::Missing => None,
            ConnectionField::Unsupported => Some(NO_SNOWFLAKE_CONNECTION),
        }
    }

    /// Check if the data source had no snowflake connection.
    pub fn is_unsupported(&self) -> bool {
        matches!(self, ConnectionField::Unsupported)
    }
}

impl fmt::Display for ConnectionField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str().unwrap_or("None"))
    }
}

impl Serialize for ConnectionField {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.as_str() {
            Some(v) => serializer.serialize_str(v),
            None => serializer.serialize_none(),
        }
    }
}

/// A captioned data source with its representative connection flattened.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DatasourceRecord {
    /// Map key: the data source `name` attribute
    pub key: Option<String>,

    /// Data source `name` attribute
    pub source_name: Option<String>,

    /// Data source `caption` attribute
    pub source_caption: Option<String>,

    /// Connection class
    pub engine: ConnectionField,

    /// Connection `dbname`
    pub database: ConnectionField,

    /// Connection `server`
    pub server: ConnectionField,

    /// Connection `username`
    pub user: ConnectionField,

    /// Connection `schema`
    pub schema: ConnectionField,
}

impl DatasourceRecord {
    /// A record for a data source without any snowflake connection.
    pub fn unsupported(name: Option<String>, caption: Option<String>) -> Self {
        Self {
            key: name.clone(),
            source_name: name,
            source_caption: caption,
            engine: ConnectionField::Unsupported,
            database: ConnectionField::Unsupported,
            server: ConnectionField::Unsupported,
            user: ConnectionField::Unsupported,
            schema: ConnectionField::Unsupported,
        }
    }

    /// Check if the data source had a snowflake connection.
    pub fn has_connection(&self) -> bool {
        !self.engine.is_unsupported()
    }
}
