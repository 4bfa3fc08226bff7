//! Node normalization: one internal tree for every upstream parse shape.
//!
//! Upstream parsers disagree about what a parsed element looks like: the
//! DOM-style tree from [`crate::xml`] keeps text and element nodes apart,
//! while declarative XML-to-object mappers hand back `serde_json::Value`
//! trees in two different arrangements. Everything downstream consumes only
//! [`NormalizedNode`]; each shape gets its own [`Normalize`] adapter and no
//! other code branches on where a tree came from.

mod dom;
mod object;

/// An element with a lower-cased tag name, its attributes, and its children
/// in document order.
///
/// Rebuilt for every transformation pass and discarded afterwards; nodes are
/// never shared between parents.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedNode {
    pub tag: String,
    /// Attribute names as written, e.g. `xml:lang`, minus any
    /// object-shape marker prefix.
    pub attributes: Vec<(String, String)>,
    pub children: Vec<NormalizedChild>,
}

/// A child slot: character data or a nested element.
#[derive(Debug, Clone, PartialEq)]
pub enum NormalizedChild {
    /// Verbatim character data, whitespace-only runs included.
    Text(String),
    Element(NormalizedNode),
}

impl NormalizedNode {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// First attribute with the given name, if any.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// Child elements in document order, skipping text leaves.
    pub fn child_elements(&self) -> impl Iterator<Item = &NormalizedNode> {
        self.children.iter().filter_map(|child| match child {
            NormalizedChild::Element(node) => Some(node),
            NormalizedChild::Text(_) => None,
        })
    }

    /// First child element with the given tag, case-insensitive.
    pub fn find_child(&self, tag: &str) -> Option<&NormalizedNode> {
        self.child_elements()
            .find(|node| node.tag.eq_ignore_ascii_case(tag))
    }
}

/// Adapter from an upstream parse shape to [`NormalizedNode`].
///
/// Returns `None` when the value cannot be interpreted as an element tree;
/// adapters never panic on malformed input.
pub trait Normalize {
    fn normalize(&self) -> Option<NormalizedNode>;
}
