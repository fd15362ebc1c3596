//! Custom SQL and table relation records.

use serde::Serialize;

/// Query text of a relation, or a placeholder naming the linked table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct QueryRecord {
    /// Relation `name` attribute
    pub key: String,

    /// Custom SQL, or `-- LINKED TO: <table>`
    pub query_text: String,

    /// Relation `connection` attribute, empty when absent
    pub connection: String,
}

impl QueryRecord {
    /// Create a query record.
    pub fn new(
        key: impl Into<String>,
        query_text: impl Into<String>,
        connection: impl Into<String>,
    ) -> Self {
        Self {
            key: key.into(),
            query_text: query_text.into(),
            connection: connection.into(),
        }
    }
}
