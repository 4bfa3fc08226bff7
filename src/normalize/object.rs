//! Adapter for object trees from declarative XML-to-object mappers.
//!
//! Two arrangements exist in the wild and both are accepted, detected per
//! node rather than declared by the caller:
//!
//! - **preserve-order**: every node is a single-key object inside an array,
//!   attributes live in a `:@` sibling map, text leaves are `{"#text": …}`:
//!   `[{"p": [{"#text": "hi"}, {"lb": []}], ":@": {"@_n": "1"}}]`
//! - **collapsed**: children are keyed by tag on one object, repeated tags
//!   become arrays, attributes sit inline with their marker prefix:
//!   `{"p": {"@_n": "1", "#text": "hi", "lb": ""}}`
//!
//! Attribute keys carry a `@_` (or bare `@`) marker prefix, which is
//! stripped here. Shapes that fit neither arrangement normalize to `None`
//! so the caller can drop that subtree and keep its siblings.

use serde_json::{Map, Value};
use tracing::debug;

use super::{Normalize, NormalizedChild, NormalizedNode};
use crate::error::MAX_DEPTH;

/// Reserved key holding character data.
const TEXT_KEY: &str = "#text";
/// Reserved key holding the attribute map in preserve-order arrangement.
const ATTR_MAP_KEY: &str = ":@";

impl Normalize for Value {
    fn normalize(&self) -> Option<NormalizedNode> {
        match self {
            // A whole preserve-order document: skip the XML declaration and
            // other non-element entries, take the first real element.
            Value::Array(items) => items.iter().find_map(|item| normalize_value(item, 0)),
            _ => normalize_value(self, 0),
        }
    }
}

fn normalize_value(value: &Value, depth: usize) -> Option<NormalizedNode> {
    if depth > MAX_DEPTH {
        debug!(depth, "object tree deeper than cap, dropping subtree");
        return None;
    }
    let map = value.as_object()?;

    // The node's tag is its only key that is neither an attribute, nor a
    // reserved key, nor a processing instruction.
    let mut tags = map
        .keys()
        .filter(|k| !is_reserved_key(k) && !k.starts_with('?'));
    let tag = tags.next()?;
    if tags.next().is_some() {
        debug!(keys = ?map.keys().collect::<Vec<_>>(), "ambiguous object node, dropping subtree");
        return None;
    }

    let mut node = element_from(tag, &map[tag], depth)?;

    // Preserve-order arrangement: attributes in the `:@` sibling map.
    if let Some(Value::Object(attrs)) = map.get(ATTR_MAP_KEY) {
        collect_attributes(attrs, &mut node.attributes);
    }
    // Marker-prefixed attributes can also sit beside the tag key.
    collect_attributes(map, &mut node.attributes);

    Some(node)
}

/// Build a node from a tag name and its content value.
fn element_from(tag: &str, content: &Value, depth: usize) -> Option<NormalizedNode> {
    if depth > MAX_DEPTH {
        debug!(depth, "object tree deeper than cap, dropping subtree");
        return None;
    }
    if tag.starts_with('?') {
        return None;
    }
    let mut node = NormalizedNode::new(tag.to_ascii_lowercase());

    match content {
        // Leaf element with scalar content.
        Value::String(text) => {
            if !text.is_empty() {
                node.children.push(NormalizedChild::Text(text.clone()));
            }
        }
        Value::Number(n) => {
            node.children.push(NormalizedChild::Text(n.to_string()));
        }
        Value::Bool(b) => {
            node.children.push(NormalizedChild::Text(b.to_string()));
        }
        Value::Null => {}

        // Preserve-order content: each item is a text leaf or a child node.
        Value::Array(items) => {
            for item in items {
                push_ordered_child(&mut node, item, depth);
            }
        }

        // Collapsed content: keys are attributes, text, or child tags.
        Value::Object(map) => {
            for (key, value) in map {
                if let Some(name) = strip_attr_marker(key) {
                    node.attributes
                        .push((name.to_string(), scalar_to_string(value)));
                } else if key == TEXT_KEY {
                    push_text_value(&mut node, value);
                } else if key == ATTR_MAP_KEY {
                    if let Value::Object(attrs) = value {
                        collect_attributes(attrs, &mut node.attributes);
                    }
                } else {
                    // A child tag; repeated tags arrive as an array and are
                    // flattened into the child sequence in original order.
                    match value {
                        Value::Array(items) => {
                            for item in items {
                                match element_from(key, item, depth + 1) {
                                    Some(child) => {
                                        node.children.push(NormalizedChild::Element(child));
                                    }
                                    None => {
                                        debug!(tag = %key, "dropping uninterpretable subtree");
                                    }
                                }
                            }
                        }
                        _ => match element_from(key, value, depth + 1) {
                            Some(child) => node.children.push(NormalizedChild::Element(child)),
                            None => debug!(tag = %key, "dropping uninterpretable subtree"),
                        },
                    }
                }
            }
        }
    }

    Some(node)
}

/// Append one preserve-order child item: `{"#text": …}` leaves become text,
/// anything else is treated as a nested node.
fn push_ordered_child(parent: &mut NormalizedNode, item: &Value, depth: usize) {
    match item {
        Value::Object(map) if map.contains_key(TEXT_KEY) && !has_tag_key(map) => {
            push_text_value(parent, &map[TEXT_KEY]);
        }
        Value::Object(_) => match normalize_value(item, depth + 1) {
            Some(child) => parent.children.push(NormalizedChild::Element(child)),
            None => debug!("dropping uninterpretable subtree"),
        },
        Value::String(text) => {
            parent.children.push(NormalizedChild::Text(text.clone()));
        }
        Value::Number(n) => {
            parent.children.push(NormalizedChild::Text(n.to_string()));
        }
        _ => debug!("dropping uninterpretable child item"),
    }
}

fn push_text_value(parent: &mut NormalizedNode, value: &Value) {
    match value {
        Value::Array(items) => {
            for item in items {
                parent
                    .children
                    .push(NormalizedChild::Text(scalar_to_string(item)));
            }
        }
        _ => parent
            .children
            .push(NormalizedChild::Text(scalar_to_string(value))),
    }
}

fn collect_attributes(map: &Map<String, Value>, out: &mut Vec<(String, String)>) {
    for (key, value) in map {
        if let Some(name) = strip_attr_marker(key) {
            out.push((name.to_string(), scalar_to_string(value)));
        }
    }
}

fn has_tag_key(map: &Map<String, Value>) -> bool {
    map.keys()
        .any(|k| !is_reserved_key(k) && !k.starts_with('?'))
}

fn is_reserved_key(key: &str) -> bool {
    key == TEXT_KEY || key == ATTR_MAP_KEY || key.starts_with('@')
}

/// Strip the attribute marker prefix (`@_` or `@`), if present.
fn strip_attr_marker(key: &str) -> Option<&str> {
    key.strip_prefix("@_")
        .or_else(|| key.strip_prefix('@'))
        .filter(|name| !name.is_empty())
}

fn scalar_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
