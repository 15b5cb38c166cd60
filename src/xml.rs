//! Namespace-agnostic lookups over parsed XML trees
//!
//! Feed documents mix default namespaces and prefixes freely, so every lookup
//! here matches on the local name only.

use roxmltree::{Document, Node, ParsingOptions};

/// Parse a document, allowing a DTD in the prolog
pub fn parse_document(text: &str) -> Result<Document<'_>, roxmltree::Error> {
    let options = ParsingOptions {
        allow_dtd: true,
        ..ParsingOptions::default()
    };
    Document::parse_with_options(text, options)
}

/// All elements at or below `node` whose local name equals `name`, in document order
pub fn descendants_named<'a, 'input: 'a>(
    node: Node<'a, 'input>,
    name: &'a str,
) -> impl Iterator<Item = Node<'a, 'input>> + 'a {
    node.descendants()
        .filter(move |n| n.is_element() && n.tag_name().name() == name)
}

/// Direct child elements whose local name equals `name`
pub fn children_named<'a, 'input: 'a>(
    node: Node<'a, 'input>,
    name: &'a str,
) -> impl Iterator<Item = Node<'a, 'input>> + 'a {
    node.children()
        .filter(move |n| n.is_element() && n.tag_name().name() == name)
}

/// First descendant (excluding `node` itself) with the given local name
pub fn first_descendant<'a, 'input: 'a>(
    node: Node<'a, 'input>,
    name: &'a str,
) -> Option<Node<'a, 'input>> {
    descendants_named(node, name).find(|n| *n != node)
}

/// Attribute value by local name, whatever its namespace prefix
pub fn local_attribute<'a, 'input>(node: Node<'a, 'input>, name: &str) -> Option<&'a str> {
    node.attributes()
        .find(|attr| attr.name() == name)
        .map(|attr| attr.value())
}

/// Concatenated text of all descendant text nodes
pub fn text_content(node: Node<'_, '_>) -> String {
    node.descendants()
        .filter(|n| n.is_text())
        .filter_map(|n| n.text())
        .collect()
}

/// Trimmed text of the first descendant named `name`, or an empty string
pub fn descendant_text(node: Node<'_, '_>, name: &str) -> String {
    first_descendant(node, name)
        .map(|n| text_content(n).trim().to_string())
        .unwrap_or_default()
}
