//! Conversion of a response document into a [`Node`] tree.
//!
//! Names are snake_cased and stripped of namespace prefixes. Children that
//! share a name collapse into a [`Node::List`] only when there are two or
//! more of them; a single occurrence stays a plain node. Elements with no
//! children and no text become an empty [`Node::Map`]. Attributes are not
//! carried over.

use qaaws_model::Node;

use crate::error::Result;
use crate::xml::{XmlElement, parse_document, snake_case};

/// Parse a response document. The result is a one-entry mapping keyed by
/// the snake_cased root name, usually `envelope`.
pub fn parse_response(source: &str) -> Result<Node> {
    let root = parse_document(source)?;
    Ok(Node::Map(vec![(snake_case(&root.name), to_node(&root))]))
}

/// Convert one element and its descendants.
#[must_use]
pub fn to_node(element: &XmlElement) -> Node {
    if element.children.is_empty() {
        return if element.text.trim().is_empty() {
            Node::empty()
        } else {
            Node::Text(element.text.clone())
        };
    }

    let mut entries: Vec<(String, Node)> = Vec::new();
    for child in &element.children {
        let key = snake_case(&child.name);
        let node = to_node(child);
        match entries.iter_mut().find(|(name, _)| *name == key) {
            Some((_, Node::List(items))) => items.push(node),
            Some((_, existing)) => {
                let first = std::mem::replace(existing, Node::empty());
                *existing = Node::List(vec![first, node]);
            }
            None => entries.push((key, node)),
        }
    }
    Node::Map(entries)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_occurrence_stays_single() {
        let tree = parse_response("<table><row><cell>Mets</cell></row></table>").unwrap();
        let row = tree.path(&["table", "row"]).unwrap();
        assert_eq!(row, &Node::map([("cell", Node::text("Mets"))]));
    }

    #[test]
    fn test_repeated_children_become_list_in_order() {
        let tree = parse_response(
            "<table><row><cell>a</cell><cell/><cell>c</cell></row><row><cell>d</cell></row></table>",
        )
        .unwrap();
        let rows = tree.path(&["table", "row"]).unwrap();
        assert_eq!(rows.as_seq().len(), 2);
        let cells = rows.as_seq()[0].get("cell").unwrap();
        assert_eq!(
            cells,
            &Node::List(vec![Node::text("a"), Node::empty(), Node::text("c")])
        );
    }

    #[test]
    fn test_interleaved_siblings_group_by_name() {
        let tree = parse_response("<r><a>1</a><b>x</b><a>2</a></r>").unwrap();
        let root = tree.get("r").unwrap();
        assert_eq!(
            root.get("a"),
            Some(&Node::List(vec![Node::text("1"), Node::text("2")]))
        );
        assert_eq!(root.entries()[0].0, "a");
        assert_eq!(root.entries()[1].0, "b");
    }

    #[test]
    fn test_whitespace_only_element_is_empty() {
        let tree = parse_response("<r><a>   </a></r>").unwrap();
        assert!(tree.path(&["r", "a"]).unwrap().is_empty_map());
    }
}
