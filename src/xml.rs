//! Workbook XML helpers on top of `roxmltree`.
//!
//! Tableau tags carry no namespace prefix, so elements are matched on their
//! local name.

use crate::error::Result;
use roxmltree::{Document, Node, ParsingOptions};

/// Parse workbook XML into a read-only document tree.
///
/// Line endings and attribute whitespace are normalized as XML requires.
/// Any syntax error becomes [`crate::Error::MalformedDocument`].
pub fn parse_document(xml: &str) -> Result<Document<'_>> {
    let options = ParsingOptions {
        allow_dtd: true,
        ..ParsingOptions::default()
    };
    Ok(Document::parse_with_options(xml, options)?)
}

/// Whether the node is an element with the given tag name.
pub fn is_named(node: &Node<'_, '_>, name: &str) -> bool {
    node.is_element() && node.tag_name().name() == name
}

/// Direct child elements with the given tag name, in document order.
pub fn children_named<'a, 'input: 'a>(
    node: Node<'a, 'input>,
    name: &'a str,
) -> impl Iterator<Item = Node<'a, 'input>> + 'a {
    node.children().filter(move |c| is_named(c, name))
}

/// First direct child element with the given tag name.
pub fn child<'a, 'input: 'a>(node: Node<'a, 'input>, name: &str) -> Option<Node<'a, 'input>> {
    node.children().find(|c| is_named(c, name))
}

/// First element reached by a slash-separated path of child tag names,
/// e.g. `"table/view/datasources"`. Every branch is searched, not just the
/// first matching child at each step.
pub fn find_path<'a, 'input: 'a>(node: Node<'a, 'input>, path: &str) -> Option<Node<'a, 'input>> {
    let mut frontier = vec![node];
    for step in path.split('/').filter(|s| !s.is_empty()) {
        frontier = frontier
            .into_iter()
            .flat_map(|n| n.children().filter(|c| is_named(c, step)))
            .collect();
        if frontier.is_empty() {
            return None;
        }
    }
    frontier.into_iter().next()
}

/// Elements below `node` with the given tag name, in document order. The
/// node itself is never included.
pub fn descendants_named<'a, 'input: 'a>(
    node: Node<'a, 'input>,
    name: &'a str,
) -> impl Iterator<Item = Node<'a, 'input>> + 'a {
    node.descendants().skip(1).filter(move |n| is_named(n, name))
}

/// Text before the first child element, empty when there is none.
pub fn leading_text<'a>(node: &Node<'a, '_>) -> &'a str {
    node.text().unwrap_or_default()
}
