//! Error types for epistola operations.

use thiserror::Error;

/// Maximum element nesting depth accepted from untrusted markup.
///
/// Both the XML tree builder and the tree transformer enforce this; a
/// scholarly letter never comes close, so hitting it means the input is
/// pathological rather than merely messy.
pub const MAX_DEPTH: usize = 64;

/// Errors that can occur while parsing or transforming a document.
///
/// Missing sections and uninterpretable subtrees are *not* errors: they
/// degrade to empty output for the affected part of the document and are
/// logged instead (see [`crate::extract`]).
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("XML parsing error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("malformed XML attribute: {0}")]
    XmlAttr(#[from] quick_xml::events::attributes::AttrError),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("document has no root element")]
    NoRootElement,

    #[error("not a TEI document (root element is <{0}>)")]
    NotATeiDocument(String),

    #[error("markup nested deeper than {MAX_DEPTH} levels")]
    StructureTooDeep,
}

pub type Result<T> = std::result::Result<T, Error>;
