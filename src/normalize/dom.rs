//! Adapter for the DOM-style tree built by [`crate::xml`].

use super::{Normalize, NormalizedChild, NormalizedNode};
use crate::xml::{XmlElement, XmlNode};

// Normalization from this shape cannot fail; the tree was depth-checked
// when it was parsed.
fn normalize_element(element: &XmlElement) -> NormalizedNode {
    let children = element
        .children
        .iter()
        .map(|child| match child {
            XmlNode::Text(text) => NormalizedChild::Text(text.clone()),
            XmlNode::Element(element) => NormalizedChild::Element(normalize_element(element)),
        })
        .collect();

    NormalizedNode {
        tag: element.name.to_ascii_lowercase(),
        attributes: element.attributes.clone(),
        children,
    }
}

impl Normalize for XmlElement {
    fn normalize(&self) -> Option<NormalizedNode> {
        Some(normalize_element(self))
    }
}

impl Normalize for XmlNode {
    fn normalize(&self) -> Option<NormalizedNode> {
        match self {
            XmlNode::Element(element) => element.normalize(),
            // A bare text node is not an element tree.
            XmlNode::Text(_) => None,
        }
    }
}
