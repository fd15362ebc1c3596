//! Custom SQL and table relation extraction.

use crate::error::{Error, Result};
use crate::model::{QueryMap, QueryRecord};
use crate::xml::leading_text;
use roxmltree::Node;

/// Prefix of the placeholder used for relations that point at a table.
pub const LINKED_TO_PREFIX: &str = "-- LINKED TO: ";

/// Relation `type` value marking a join of other relations.
const JOIN_TYPE: &str = "join";

/// Tableau doubles `<` and `>` inside custom SQL; undo that and normalize
/// line endings.
pub fn normalize_query_text(text: &str) -> String {
    text.replace("<<", "<")
        .replace(">>", ">")
        .replace("\r\n", "\n")
}

/// Collect the query text of every non-join relation.
///
/// A relation without leading text is rendered as a `-- LINKED TO: <table>`
/// placeholder and must then carry a `table` attribute. Whitespace-only
/// text counts as text.
pub fn extract_queries<'a, 'input: 'a, I>(relations: I) -> Result<QueryMap>
where
    I: IntoIterator<Item = Node<'a, 'input>>,
{
    let mut results = QueryMap::new();

    for (index, relation) in relations.into_iter().enumerate() {
        if relation.attribute("type") == Some(JOIN_TYPE) {
            tracing::trace!(index, "skipping join relation");
            continue;
        }

        let name = relation.attribute("name").ok_or_else(|| {
            Error::malformed(format!("relation #{} has no `name` attribute", index + 1))
        })?;

        let text = leading_text(&relation);
        let query = if text.is_empty() {
            let table = relation.attribute("table").ok_or_else(|| {
                Error::malformed(format!(
                    "relation `{}` has neither query text nor a `table` attribute",
                    name
                ))
            })?;
            normalize_query_text(&format!("{}{}", LINKED_TO_PREFIX, table))
        } else {
            normalize_query_text(text)
        };

        let connection = relation.attribute("connection").unwrap_or_default();

        results.insert(name.to_string(), QueryRecord::new(name, query, connection));
    }

    tracing::debug!(count = results.len(), "extracted queries");
    Ok(results)
}
