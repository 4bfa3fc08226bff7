//! Maps TEI elements to semantic roles.
//!
//! This table is the single source of truth for tag semantics; the
//! transformer's recursion stays generic and consults it once per element.

use crate::model::{BlockKind, EntityKind, InlineStyle};

/// Semantic role of a TEI element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagRole {
    /// `<p>` - a paragraph of inline content.
    Paragraph,
    /// Block-level letter division with a named kind.
    Block(BlockKind),
    /// Referencing span; the kind fixes which entity it names.
    Entity(EntityKind),
    /// Inline span with a fixed presentation style.
    Formatting(InlineStyle),
    /// `<hi>` - style resolved from its `rend`/`rendition` attribute.
    Rendition,
    /// `<pb>` - page boundary, page number in the `n` attribute.
    PageBreak,
    /// `<lb>` - line break, no content.
    LineBreak,
    /// `<note>` - footnote, registered with the accumulator.
    Note,
    /// `<choice>` - abbreviation disambiguation (`expan` wins over `abbr`).
    Choice,
    /// Anything else: children are kept, the wrapper is not.
    Passthrough,
}

/// Map a TEI element name to its semantic role. Case-insensitive.
pub fn classify(tag: &str) -> TagRole {
    match tag.to_ascii_lowercase().as_str() {
        "p" => TagRole::Paragraph,

        // Letter structure
        "opener" => TagRole::Block(BlockKind::Opener),
        "closer" => TagRole::Block(BlockKind::Closer),
        "dateline" => TagRole::Block(BlockKind::Dateline),
        "salute" => TagRole::Block(BlockKind::Salute),
        "signed" => TagRole::Block(BlockKind::Signed),

        // Referencing spans
        "rs" => TagRole::Entity(EntityKind::Reference),
        "persname" => TagRole::Entity(EntityKind::Person),
        "placename" => TagRole::Entity(EntityKind::Place),
        "date" => TagRole::Entity(EntityKind::Date),
        "work" => TagRole::Entity(EntityKind::Work),
        "organization" => TagRole::Entity(EntityKind::Organization),

        // Inline formatting
        "q" => TagRole::Formatting(InlineStyle::Quote),
        "hi" => TagRole::Rendition,
        "foreign" => TagRole::Formatting(InlineStyle::Foreign),
        "add" => TagRole::Formatting(InlineStyle::Addition),
        "del" => TagRole::Formatting(InlineStyle::Deletion),
        "sic" => TagRole::Formatting(InlineStyle::Sic),
        "supplied" => TagRole::Formatting(InlineStyle::Supplied),
        "formula" => TagRole::Formatting(InlineStyle::Formula),
        "unclear" => TagRole::Formatting(InlineStyle::Unclear),

        // Structural breaks
        "pb" => TagRole::PageBreak,
        "lb" => TagRole::LineBreak,

        // Special constructs
        "note" => TagRole::Note,
        "choice" => TagRole::Choice,

        // Default: keep children, drop the wrapper. This is what makes the
        // transformer robust to <body>, <div>, and arbitrary TEI extensions.
        _ => TagRole::Passthrough,
    }
}

/// Resolve a `<hi>` rendition attribute value to an inline style.
pub fn rendition_style(rend: Option<&str>) -> InlineStyle {
    match rend {
        Some("u") | Some("underline") | Some("uu") => InlineStyle::Underline,
        Some("i") | Some("italic") => InlineStyle::Italic,
        Some("b") | Some("bold") => InlineStyle::Bold,
        Some("aq") => InlineStyle::Monospace,
        _ => InlineStyle::Plain,
    }
}
