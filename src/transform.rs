//! The recursive walk from normalized markup to the semantic model.
//!
//! All tag-specific policy lives here; the recursion itself stays generic
//! and consults [`crate::tags::classify`] once per element.

use tracing::trace;

use crate::error::{Error, MAX_DEPTH, Result};
use crate::model::{DateAttrs, DocumentNode, EntityKind, InlineStyle};
use crate::normalize::{NormalizedChild, NormalizedNode};
use crate::tags::{TagRole, classify, rendition_style};

/// Whether transformed content may appear within running text (`Inline`) or
/// occupies its own structural position (`Block`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Context {
    Block,
    Inline,
}

/// Ordered footnote accumulator for one transformation pass.
///
/// Append-only; the index handed out for a note is its 1-based insertion
/// position, so numbering follows document order of first encounter. One
/// accumulator exists per pass and is never shared across documents.
#[derive(Debug, Default)]
pub struct Footnotes {
    notes: Vec<Vec<DocumentNode>>,
}

impl Footnotes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a note, returning its 1-based index.
    pub fn push(&mut self, content: Vec<DocumentNode>) -> usize {
        self.notes.push(content);
        self.notes.len()
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    /// Consume the accumulator once the pass is complete.
    pub fn into_notes(self) -> Vec<Vec<DocumentNode>> {
        self.notes
    }
}

/// Transform one normalized child into a semantic node.
///
/// Returns `Ok(None)` when the subtree contributes nothing (suppressed
/// first page break, empty stack slot); fails only on pathological nesting.
pub fn transform(
    child: &NormalizedChild,
    context: Context,
    footnotes: &mut Footnotes,
) -> Result<Option<DocumentNode>> {
    transform_at(child, context, footnotes, 0)
}

/// Transform all children of a node in the given context.
pub fn transform_children(
    node: &NormalizedNode,
    context: Context,
    footnotes: &mut Footnotes,
) -> Result<Vec<DocumentNode>> {
    transform_children_at(node, context, footnotes, 0)
}

fn transform_at(
    child: &NormalizedChild,
    context: Context,
    footnotes: &mut Footnotes,
    depth: usize,
) -> Result<Option<DocumentNode>> {
    if depth > MAX_DEPTH {
        return Err(Error::StructureTooDeep);
    }
    match child {
        NormalizedChild::Text(text) => Ok(Some(DocumentNode::Text(text.clone()))),
        NormalizedChild::Element(node) => transform_element(node, context, footnotes, depth),
    }
}

fn transform_children_at(
    node: &NormalizedNode,
    context: Context,
    footnotes: &mut Footnotes,
    depth: usize,
) -> Result<Vec<DocumentNode>> {
    let mut out = Vec::with_capacity(node.children.len());
    for child in &node.children {
        if let Some(transformed) = transform_at(child, context, footnotes, depth + 1)? {
            out.push(transformed);
        }
    }
    Ok(out)
}

fn transform_element(
    node: &NormalizedNode,
    context: Context,
    footnotes: &mut Footnotes,
    depth: usize,
) -> Result<Option<DocumentNode>> {
    match classify(&node.tag) {
        TagRole::Paragraph => {
            let children = transform_children_at(node, Context::Inline, footnotes, depth)?;
            Ok(Some(DocumentNode::Paragraph(children)))
        }

        TagRole::Block(kind) => {
            let children = transform_children_at(node, Context::Inline, footnotes, depth)?;
            Ok(Some(DocumentNode::Block { kind, children }))
        }

        TagRole::Entity(kind) => {
            let children = transform_children_at(node, Context::Inline, footnotes, depth)?;
            let subtype = if kind == EntityKind::Reference {
                node.attribute("type")
                    .or_else(|| node.attribute("t"))
                    .or_else(|| node.attribute("subtype"))
                    .map(String::from)
            } else {
                None
            };
            let date = if kind == EntityKind::Date {
                let attrs = DateAttrs {
                    when: node.attribute("when").map(String::from),
                    not_before: node.attribute("notBefore").map(String::from),
                    not_after: node.attribute("notAfter").map(String::from),
                };
                (!attrs.is_empty()).then_some(attrs)
            } else {
                None
            };
            Ok(Some(DocumentNode::Entity {
                kind,
                subtype,
                reference: node.attribute("ref").map(String::from),
                date,
                children,
            }))
        }

        TagRole::Formatting(style) => {
            let children = transform_children_at(node, Context::Inline, footnotes, depth)?;
            let lang = (style == InlineStyle::Foreign)
                .then(|| node.attribute("xml:lang").map(String::from))
                .flatten();
            Ok(Some(DocumentNode::Formatted {
                style,
                lang,
                children,
            }))
        }

        TagRole::Rendition => {
            let children = transform_children_at(node, Context::Inline, footnotes, depth)?;
            let style = rendition_style(
                node.attribute("rend")
                    .or_else(|| node.attribute("rendition")),
            );
            Ok(Some(DocumentNode::Formatted {
                style,
                lang: None,
                children,
            }))
        }

        TagRole::Note => {
            // Containment rule: notes nested inside this note are
            // transformed against a throwaway accumulator and never reach
            // the outer list, so numbering can't recurse or collide.
            let mut inner = Footnotes::new();
            let content = transform_children_at(node, Context::Inline, &mut inner, depth)?;
            let index = footnotes.push(content);
            trace!(index, "registered footnote");
            Ok(Some(DocumentNode::FootnoteRef(index)))
        }

        TagRole::Choice => {
            // expan wins over abbr regardless of child order.
            if let Some(expan) = node.find_child("expan") {
                let children =
                    transform_children_at(expan, Context::Inline, footnotes, depth + 1)?;
                return Ok(Some(DocumentNode::Formatted {
                    style: InlineStyle::Expansion,
                    lang: None,
                    children,
                }));
            }
            if let Some(abbr) = node.find_child("abbr") {
                let children =
                    transform_children_at(abbr, Context::Inline, footnotes, depth + 1)?;
                return Ok(Some(DocumentNode::Formatted {
                    style: InlineStyle::Abbreviation,
                    lang: None,
                    children,
                }));
            }
            let children = transform_children_at(node, Context::Inline, footnotes, depth)?;
            Ok(Some(DocumentNode::Passthrough(children)))
        }

        TagRole::PageBreak => {
            // The first page break is redundant in a single-page-start
            // document.
            match node.attribute("n") {
                Some("1") => Ok(None),
                n => Ok(Some(DocumentNode::PageBreak(n.map(String::from)))),
            }
        }

        TagRole::LineBreak => Ok(Some(DocumentNode::LineBreak)),

        TagRole::Passthrough => {
            let children = transform_children_at(node, context, footnotes, depth)?;
            Ok(Some(DocumentNode::Passthrough(children)))
        }
    }
}
