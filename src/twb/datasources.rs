//! Data source and connection extraction.

use crate::model::{ConnectionField, DatasourceMap, DatasourceRecord, SNOWFLAKE_CLASS};
use crate::xml::descendants_named;
use roxmltree::Node;

/// First snowflake connection anywhere below the data source, in document
/// order.
pub fn find_snowflake_connection<'a, 'input: 'a>(
    datasource: Node<'a, 'input>,
) -> Option<Node<'a, 'input>> {
    descendants_named(datasource, "connection")
        .find(|conn| conn.attribute("class") == Some(SNOWFLAKE_CLASS))
}

/// Flatten each captioned data source and its snowflake connection.
///
/// Data sources without a `caption` attribute are dropped.
pub fn extract_datasources<'a, 'input: 'a, I>(datasources: I) -> DatasourceMap
where
    I: IntoIterator<Item = Node<'a, 'input>>,
{
    let mut results = DatasourceMap::new();

    for datasource in datasources {
        if !datasource.has_attribute("caption") {
            tracing::trace!(name = ?datasource.attribute("name"), "skipping uncaptioned datasource");
            continue;
        }

        let name = datasource.attribute("name").map(String::from);
        let caption = datasource.attribute("caption").map(String::from);

        let record = match find_snowflake_connection(datasource) {
            Some(conn) => DatasourceRecord {
                key: name.clone(),
                source_name: name,
                source_caption: caption,
                engine: ConnectionField::from_attr(conn.attribute("class")),
                database: ConnectionField::from_attr(conn.attribute("dbname")),
                server: ConnectionField::from_attr(conn.attribute("server")),
                user: ConnectionField::from_attr(conn.attribute("username")),
                schema: ConnectionField::from_attr(conn.attribute("schema")),
            },
            None => DatasourceRecord::unsupported(name, caption),
        };

        results.insert(record.key.clone(), record);
    }

    tracing::debug!(count = results.len(), "extracted datasources");
    results
}
