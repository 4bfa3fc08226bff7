//! The semantic document model.
//!
//! Output of one transformation pass: a display-agnostic tree that a
//! rendering layer can map to typography without re-inspecting TEI markup.
//! The model holds no references back into the parse tree it came from.

use serde::Serialize;

/// Named kind of a block-level division of the letter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum BlockKind {
    /// Opening matter before the letter body (`<opener>`).
    Opener,
    /// Closing matter after the letter body (`<closer>`).
    Closer,
    /// Place/date line (`<dateline>`).
    Dateline,
    /// Salutation (`<salute>`).
    Salute,
    /// Signature block (`<signed>`).
    Signed,
}

/// What a referencing span points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum EntityKind {
    /// Generic referencing string (`<rs>`); the subtype attribute says what.
    Reference,
    /// `<persName>`
    Person,
    /// `<placeName>`
    Place,
    /// `<date>`, with optional calendar attributes in [`DateAttrs`].
    Date,
    /// `<work>`
    Work,
    /// `<organization>`
    Organization,
}

/// Inline presentation semantics for formatted spans.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum InlineStyle {
    /// Quoted speech or citation (`<q>`).
    Quote,
    Underline,
    Italic,
    Bold,
    Monospace,
    /// `<hi>` with no recognized rendition.
    Plain,
    /// Foreign-language span (`<foreign>`); language in `Formatted.lang`.
    Foreign,
    /// Editorial addition (`<add>`).
    Addition,
    /// Editorial deletion (`<del>`).
    Deletion,
    /// Original spelling retained (`<sic>`).
    Sic,
    /// Text supplied by the editor (`<supplied>`).
    Supplied,
    Formula,
    Unclear,
    /// Expanded abbreviation chosen from a `<choice>`.
    Expansion,
    /// Unexpanded abbreviation chosen from a `<choice>`.
    Abbreviation,
}

/// Machine-readable dating attributes carried by `<date>` elements.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DateAttrs {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub when: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub not_before: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub not_after: Option<String>,
}

impl DateAttrs {
    pub fn is_empty(&self) -> bool {
        self.when.is_none() && self.not_before.is_none() && self.not_after.is_none()
    }
}

/// A node in the semantic document tree.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum DocumentNode {
    /// Verbatim character data. Whitespace is preserved; collapsing it is a
    /// presentation concern.
    Text(String),
    /// A paragraph of inline content.
    Paragraph(Vec<DocumentNode>),
    /// A named block-level division (opener, closer, dateline, ...).
    Block {
        kind: BlockKind,
        children: Vec<DocumentNode>,
    },
    /// A span referring to a person, place, work, organization or date.
    Entity {
        kind: EntityKind,
        /// Subtype read from the element's `type`/`t`/`subtype` attribute.
        #[serde(skip_serializing_if = "Option::is_none")]
        subtype: Option<String>,
        /// The `ref` attribute, carried as display metadata only.
        #[serde(skip_serializing_if = "Option::is_none")]
        reference: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        date: Option<DateAttrs>,
        children: Vec<DocumentNode>,
    },
    /// An inline span with presentation semantics.
    Formatted {
        style: InlineStyle,
        /// `xml:lang` of a foreign-language span.
        #[serde(skip_serializing_if = "Option::is_none")]
        lang: Option<String>,
        children: Vec<DocumentNode>,
    },
    /// Marker where a footnote was anchored. The 1-based index points into
    /// [`SemanticDocument::footnotes`]; the note's content is never inlined
    /// here.
    FootnoteRef(usize),
    /// Page boundary; carries the `n` attribute when present.
    PageBreak(Option<String>),
    LineBreak,
    /// Children of an unrecognized tag, kept without wrapper semantics so
    /// unknown TEI extensions never lose content.
    Passthrough(Vec<DocumentNode>),
}

impl DocumentNode {
    /// Child nodes, for walks that don't care about the variant.
    pub fn children(&self) -> &[DocumentNode] {
        match self {
            DocumentNode::Paragraph(children)
            | DocumentNode::Block { children, .. }
            | DocumentNode::Entity { children, .. }
            | DocumentNode::Formatted { children, .. }
            | DocumentNode::Passthrough(children) => children,
            _ => &[],
        }
    }
}

/// A fully transformed letter: title, body, and the footnotes collected
/// along the way.
///
/// `footnotes[i]` is the content of the note anchored by
/// `FootnoteRef(i + 1)`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SemanticDocument {
    pub title: Vec<DocumentNode>,
    pub body: Vec<DocumentNode>,
    pub footnotes: Vec<Vec<DocumentNode>>,
}

impl SemanticDocument {
    pub fn is_empty(&self) -> bool {
        self.title.is_empty() && self.body.is_empty() && self.footnotes.is_empty()
    }
}
