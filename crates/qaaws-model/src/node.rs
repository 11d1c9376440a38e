//! Response tree produced from a parsed SOAP response document.

use std::fmt;

/// One node of a parsed response document.
///
/// XML does not distinguish a repeated child that occurs once from a single
/// child, so a conceptual list may arrive as a lone `Map` or `Text`. Empty
/// elements arrive as an empty `Map`, never as a null. Readers must check the
/// actual shape before assuming cardinality; [`Node::as_seq`] is the one
/// place that resolves the single-vs-many case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// Element with text content and no child elements.
    Text(String),
    /// Element with child elements, in document order. Empty when the
    /// element had neither children nor text.
    Map(Vec<(String, Node)>),
    /// A child name that occurred more than once under the same parent.
    List(Vec<Node>),
}

/// Shape tag used in diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Text,
    EmptyMap,
    Map,
    List,
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Text => "text",
            Self::EmptyMap => "empty element",
            Self::Map => "element",
            Self::List => "list",
        };
        f.write_str(label)
    }
}

impl Node {
    /// Create a text node.
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    /// Create a mapping node from `(name, child)` pairs.
    pub fn map<K, I>(entries: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Node)>,
    {
        Self::Map(entries.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    /// An empty mapping, the shape of an empty element.
    #[must_use]
    pub fn empty() -> Self {
        Self::Map(Vec::new())
    }

    #[must_use]
    pub fn kind(&self) -> NodeKind {
        match self {
            Self::Text(_) => NodeKind::Text,
            Self::Map(entries) if entries.is_empty() => NodeKind::EmptyMap,
            Self::Map(_) => NodeKind::Map,
            Self::List(_) => NodeKind::List,
        }
    }

    /// Look up a child by name. Only mappings have children.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Node> {
        match self {
            Self::Map(entries) => entries
                .iter()
                .find(|(name, _)| name == key)
                .map(|(_, node)| node),
            _ => None,
        }
    }

    /// Follow a path of child names from this node.
    #[must_use]
    pub fn path(&self, keys: &[&str]) -> Option<&Node> {
        keys.iter().try_fold(self, |node, key| node.get(key))
    }

    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(value) => Some(value),
            _ => None,
        }
    }

    /// Returns true for an element that had neither children nor text.
    #[must_use]
    pub fn is_empty_map(&self) -> bool {
        matches!(self, Self::Map(entries) if entries.is_empty())
    }

    /// View this node as a sequence.
    ///
    /// A `List` yields its items; any other node is the single-occurrence
    /// collapse of a list and yields itself as a one-element slice.
    #[must_use]
    pub fn as_seq(&self) -> &[Node] {
        match self {
            Self::List(items) => items,
            other => std::slice::from_ref(other),
        }
    }

    /// Child entries of a mapping, empty for any other shape.
    #[must_use]
    pub fn entries(&self) -> &[(String, Node)] {
        match self {
            Self::Map(entries) => entries,
            _ => &[],
        }
    }
}
