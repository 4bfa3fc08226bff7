//! # epistola
//!
//! A library for turning TEI-encoded letter transcriptions into a
//! display-agnostic semantic document model.
//!
//! ## Features
//!
//! - Accepts DOM-style trees and declarative object trees (preserve-order
//!   or collapsed) without the caller saying which shape it has
//! - Resolves TEI's special-cased markup: footnotes, abbreviation choices,
//!   page and line breaks, typed entity references
//! - Numbers footnotes by document order of first encounter in one pass
//! - Degrades gracefully on partial documents instead of failing outright
//!
//! ## Quick Start
//!
//! ```
//! let doc = epistola::letter_from_str(concat!(
//!     "<TEI><teiHeader><fileDesc><titleStmt>",
//!     "<title>To Charlotte von Stein</title>",
//!     "</titleStmt></fileDesc></teiHeader>",
//!     "<text><body><div type=\"writingSession\">",
//!     "<p>Dear friend<note>Written in haste.</note>, hello.</p>",
//!     "</div></body></text></TEI>",
//! ))
//! .unwrap();
//!
//! assert_eq!(doc.body.len(), 1);
//! assert_eq!(doc.footnotes.len(), 1);
//! println!("{}", epistola::render_text(&doc));
//! ```
//!
//! ## Working with the model
//!
//! [`SemanticDocument`] is the central data type: a title inline-sequence,
//! a body block-sequence, and the footnotes collected during the pass.
//! Rendering it to pixels (or text, see [`render_text`]) is a thin mapping
//! over [`DocumentNode`] variants; the model keeps no reference to the
//! parse tree it came from.

pub mod error;
pub mod export;
pub mod extract;
pub mod model;
pub mod normalize;
pub mod tags;
pub mod transform;
pub mod xml;

use std::path::Path;

pub use error::{Error, Result};
pub use export::{plain_text, render_text};
pub use extract::extract;
pub use model::{
    BlockKind, DateAttrs, DocumentNode, EntityKind, InlineStyle, SemanticDocument,
};
pub use normalize::{Normalize, NormalizedChild, NormalizedNode};
pub use transform::{Context, Footnotes, transform};

/// Parse a TEI document from XML text and transform it.
pub fn letter_from_str(content: &str) -> Result<SemanticDocument> {
    let tree = xml::parse(content)?;
    let root = tree.normalize().ok_or(Error::NoRootElement)?;
    extract(&root)
}

/// Transform a TEI document already parsed into an object tree by a
/// declarative XML-to-object mapper.
pub fn letter_from_value(value: &serde_json::Value) -> Result<SemanticDocument> {
    let root = value.normalize().ok_or(Error::NoRootElement)?;
    extract(&root)
}

/// Read, decode, parse, and transform a TEI document from a file.
pub fn read_letter(path: impl AsRef<Path>) -> Result<SemanticDocument> {
    let tree = xml::read_document(path)?;
    let root = tree.normalize().ok_or(Error::NoRootElement)?;
    extract(&root)
}
