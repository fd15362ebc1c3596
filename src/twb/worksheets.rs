//! Worksheet extraction.

use crate::error::{Error, Result};
use crate::model::{WorksheetMap, WorksheetRecord};
use crate::xml::find_path;
use roxmltree::Node;

/// Where a worksheet lists the data sources its view draws on.
const VIEW_DATASOURCES_PATH: &str = "table/view/datasources";

/// Collect worksheet names and the captions of the data sources they use.
///
/// Uncaptioned data source references are skipped. A worksheet without a
/// view data source list gets an empty caption list.
pub fn extract_worksheets<'a, 'input: 'a, I>(worksheets: I) -> Result<WorksheetMap>
where
    I: IntoIterator<Item = Node<'a, 'input>>,
{
    let mut results = WorksheetMap::new();

    for (index, worksheet) in worksheets.into_iter().enumerate() {
        let name = worksheet.attribute("name").ok_or_else(|| {
            Error::malformed(format!(
                "worksheet #{} has no `name` attribute",
                index + 1
            ))
        })?;

        let captions = find_path(worksheet, VIEW_DATASOURCES_PATH)
            .map(|sources| {
                sources
                    .children()
                    .filter(|source| source.is_element())
                    .filter_map(|source| source.attribute("caption"))
                    .map(String::from)
                    .collect()
            })
            .unwrap_or_default();

        results.insert(name.to_string(), WorksheetRecord::new(name, captions));
    }

    tracing::debug!(count = results.len(), "extracted worksheets");
    Ok(results)
}
