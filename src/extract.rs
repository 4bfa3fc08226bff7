//! Locating the title and letter content inside the TEI envelope.
//!
//! Extraction is best-effort: real transcriptions come from several
//! differently configured upstream parsers and are missing pieces more
//! often than not. Only a wrong root element or pathological nesting fails
//! the whole operation; a missing title or body degrades to an empty
//! section and is logged.

use tracing::debug;

use crate::error::{Error, Result};
use crate::model::SemanticDocument;
use crate::normalize::NormalizedNode;
use crate::transform::{Context, Footnotes, transform_children};

/// Transform a normalized TEI document into a [`SemanticDocument`].
///
/// The title and body share one footnote accumulator, so notes are numbered
/// across the whole document in order of first encounter, title first.
pub fn extract(root: &NormalizedNode) -> Result<SemanticDocument> {
    if !root.tag.eq_ignore_ascii_case("tei") {
        return Err(Error::NotATeiDocument(root.tag.clone()));
    }

    let mut footnotes = Footnotes::new();

    let title = match find_title(root) {
        Some(node) => transform_children(node, Context::Inline, &mut footnotes)?,
        None => {
            debug!("no teiHeader/fileDesc/titleStmt/title path, leaving title empty");
            Vec::new()
        }
    };

    let body = match find_letter_content(root) {
        Some(node) => transform_children(node, Context::Block, &mut footnotes)?,
        None => {
            debug!("no text/body path, leaving body empty");
            Vec::new()
        }
    };

    Ok(SemanticDocument {
        title,
        body,
        footnotes: footnotes.into_notes(),
    })
}

/// teiHeader → fileDesc → titleStmt → title; first match per segment.
fn find_title(root: &NormalizedNode) -> Option<&NormalizedNode> {
    root.find_child("teiHeader")?
        .find_child("fileDesc")?
        .find_child("titleStmt")?
        .find_child("title")
}

/// text → body, then the division holding the letter: a div typed
/// `writingSession`, else the first div, else the body itself.
fn find_letter_content(root: &NormalizedNode) -> Option<&NormalizedNode> {
    let body = root.find_child("text")?.find_child("body")?;
    let mut divs = body.child_elements().filter(|n| n.tag == "div").peekable();
    let first = divs.peek().copied();
    divs.find(|d| d.attribute("type") == Some("writingSession"))
        .or(first)
        .or(Some(body))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::DocumentNode;
    use crate::normalize::Normalize;
    use crate::xml::parse;

    fn extract_str(xml: &str) -> Result<SemanticDocument> {
        extract(&parse(xml).unwrap().normalize().unwrap())
    }

    #[test]
    fn test_rejects_non_tei_root() {
        let err = extract_str("<html><body/></html>").unwrap_err();
        assert!(matches!(err, Error::NotATeiDocument(tag) if tag == "html"));
    }

    #[test]
    fn test_title_and_body_found() {
        let doc = extract_str(
            "<TEI><teiHeader><fileDesc><titleStmt><title>To Schiller</title></titleStmt>\
             </fileDesc></teiHeader><text><body><p>Text.</p></body></text></TEI>",
        )
        .unwrap();
        assert_eq!(doc.title, vec![DocumentNode::Text("To Schiller".to_string())]);
        assert_eq!(doc.body.len(), 1);
    }

    #[test]
    fn test_missing_header_degrades_to_empty_title() {
        let doc = extract_str("<TEI><text><body><p>Text.</p></body></text></TEI>").unwrap();
        assert!(doc.title.is_empty());
        assert_eq!(doc.body.len(), 1);
    }

    #[test]
    fn test_missing_body_degrades_to_empty_body() {
        let doc = extract_str("<TEI><teiHeader/></TEI>").unwrap();
        assert!(doc.title.is_empty());
        assert!(doc.body.is_empty());
    }

    #[test]
    fn test_prefers_writing_session_div() {
        let doc = extract_str(
            r#"<TEI><text><body><div type="draft"><p>no</p></div>
               <div type="writingSession"><p>yes</p></div></body></text></TEI>"#,
        )
        .unwrap();
        assert_eq!(
            doc.body,
            vec![DocumentNode::Paragraph(vec![DocumentNode::Text(
                "yes".to_string()
            )])]
        );
    }

    #[test]
    fn test_falls_back_to_first_div() {
        let doc = extract_str(
            r#"<TEI><text><body><div type="draft"><p>first</p></div>
               <div type="copy"><p>second</p></div></body></text></TEI>"#,
        )
        .unwrap();
        assert_eq!(
            doc.body,
            vec![DocumentNode::Paragraph(vec![DocumentNode::Text(
                "first".to_string()
            )])]
        );
    }

    #[test]
    fn test_falls_back_to_body_without_divs() {
        let doc =
            extract_str("<TEI><text><body><p>direct</p></body></text></TEI>").unwrap();
        assert_eq!(doc.body.len(), 1);
    }

    #[test]
    fn test_title_notes_number_before_body_notes() {
        let doc = extract_str(
            "<TEI><teiHeader><fileDesc><titleStmt><title>T<note>title note</note></title>\
             </titleStmt></fileDesc></teiHeader>\
             <text><body><p>x<note>body note</note></p></body></text></TEI>",
        )
        .unwrap();
        assert_eq!(doc.footnotes.len(), 2);
        assert_eq!(
            doc.footnotes[0],
            vec![DocumentNode::Text("title note".to_string())]
        );
        assert_eq!(doc.title[1], DocumentNode::FootnoteRef(1));
    }
}
