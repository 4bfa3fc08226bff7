//! XML parse boundary: decoding raw bytes and building an element tree.
//!
//! The tree built here is one of the upstream shapes the normalizer
//! accepts; nothing downstream of [`crate::normalize`] depends on it.

use std::borrow::Cow;
use std::fs;
use std::path::Path;

use quick_xml::Reader;
use quick_xml::events::Event;

use crate::error::{Error, MAX_DEPTH, Result};

/// An element in the parsed XML tree.
///
/// Names are kept as written (minus any namespace prefix); attribute names
/// are preserved verbatim, including qualified ones like `xml:lang`.
#[derive(Debug, Clone, PartialEq)]
pub struct XmlElement {
    pub name: String,
    pub attributes: Vec<(String, String)>,
    pub children: Vec<XmlNode>,
}

/// A child in the parsed XML tree: element or character data.
#[derive(Debug, Clone, PartialEq)]
pub enum XmlNode {
    Element(XmlElement),
    Text(String),
}

impl XmlElement {
    /// First attribute with the given name, if any.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }
}

/// Parse an XML document into an element tree.
///
/// Comments, processing instructions, and the DTD are skipped. Character
/// data is kept verbatim, including whitespace-only runs; entity and
/// character references are resolved. Nesting beyond [`MAX_DEPTH`] fails
/// with [`Error::StructureTooDeep`].
pub fn parse(content: &str) -> Result<XmlElement> {
    let mut reader = Reader::from_str(content);

    // The partially built ancestors of the current position.
    let mut stack: Vec<XmlElement> = Vec::new();
    let mut root: Option<XmlElement> = None;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => {
                if stack.len() >= MAX_DEPTH {
                    return Err(Error::StructureTooDeep);
                }
                stack.push(open_element(&e)?);
            }
            Ok(Event::Empty(e)) => {
                let element = open_element(&e)?;
                match stack.last_mut() {
                    Some(parent) => parent.children.push(XmlNode::Element(element)),
                    None if root.is_none() => root = Some(element),
                    None => {}
                }
            }
            Ok(Event::End(_)) => {
                if let Some(element) = stack.pop() {
                    match stack.last_mut() {
                        Some(parent) => parent.children.push(XmlNode::Element(element)),
                        None if root.is_none() => root = Some(element),
                        None => {}
                    }
                }
            }
            Ok(Event::Text(e)) => {
                if let Some(parent) = stack.last_mut() {
                    push_text(parent, &String::from_utf8_lossy(e.as_ref()));
                }
            }
            Ok(Event::CData(e)) => {
                if let Some(parent) = stack.last_mut() {
                    push_text(parent, &String::from_utf8_lossy(e.as_ref()));
                }
            }
            Ok(Event::GeneralRef(e)) => {
                if let Some(parent) = stack.last_mut() {
                    let entity = String::from_utf8_lossy(e.as_ref());
                    if let Some(resolved) = resolve_entity(&entity) {
                        push_text(parent, &resolved);
                    }
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(Error::Xml(e)),
            _ => {}
        }
    }

    root.ok_or(Error::NoRootElement)
}

fn open_element(e: &quick_xml::events::BytesStart<'_>) -> Result<XmlElement> {
    let name = e.name();
    let local = local_name(name.as_ref());

    let mut attributes = Vec::new();
    for attr in e.attributes() {
        let attr = attr?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        let value = String::from_utf8_lossy(&attr.value).into_owned();
        attributes.push((key, value));
    }

    Ok(XmlElement {
        name: String::from_utf8_lossy(local).into_owned(),
        attributes,
        children: Vec::new(),
    })
}

/// Append character data, merging with a preceding text child so entity
/// references don't split runs of text.
fn push_text(parent: &mut XmlElement, text: &str) {
    if let Some(XmlNode::Text(existing)) = parent.children.last_mut() {
        existing.push_str(text);
    } else {
        parent.children.push(XmlNode::Text(text.to_string()));
    }
}

fn local_name(name: &[u8]) -> &[u8] {
    name.iter()
        .rposition(|&b| b == b':')
        .map(|i| &name[i + 1..])
        .unwrap_or(name)
}

fn resolve_entity(entity: &str) -> Option<String> {
    match entity {
        "apos" => return Some("'".to_string()),
        "quot" => return Some("\"".to_string()),
        "lt" => return Some("<".to_string()),
        "gt" => return Some(">".to_string()),
        "amp" => return Some("&".to_string()),
        _ => {}
    }

    if let Some(hex) = entity.strip_prefix("#x") {
        if let Ok(code) = u32::from_str_radix(hex, 16)
            && let Some(c) = char::from_u32(code)
        {
            return Some(c.to_string());
        }
    } else if let Some(dec) = entity.strip_prefix('#') {
        if let Ok(code) = dec.parse::<u32>()
            && let Some(c) = char::from_u32(code)
        {
            return Some(c.to_string());
        }
    }

    None
}

/// Decode raw document bytes to a string.
///
/// Tries UTF-8 first (handles a BOM automatically), then the encoding
/// declared in the XML declaration, and falls back to Windows-1252, which
/// is what undeclared legacy transcriptions usually turn out to be.
pub fn decode(bytes: &[u8]) -> Cow<'_, str> {
    let (result, _encoding, malformed) = encoding_rs::UTF_8.decode(bytes);
    if !malformed {
        return result;
    }

    if let Some(name) = declared_encoding(bytes)
        && let Some(encoding) = encoding_rs::Encoding::for_label(name.as_bytes())
    {
        let (result, _, _) = encoding.decode(bytes);
        return result;
    }

    let (result, _, _) = encoding_rs::WINDOWS_1252.decode(bytes);
    result
}

/// Pull the encoding name out of an `<?xml ... encoding="..."?>` declaration.
///
/// The declaration is ASCII by definition, so scanning the raw bytes is
/// safe even when the body is not UTF-8.
fn declared_encoding(bytes: &[u8]) -> Option<String> {
    let head = &bytes[..bytes.len().min(256)];
    let text = String::from_utf8_lossy(head);
    let start = text.find("encoding=")? + "encoding=".len();
    let rest = &text[start..];
    let quote = rest.chars().next().filter(|c| *c == '"' || *c == '\'')?;
    let rest = &rest[1..];
    let end = rest.find(quote)?;
    Some(rest[..end].to_string())
}

/// Read and parse an XML document from a file.
pub fn read_document(path: impl AsRef<Path>) -> Result<XmlElement> {
    let bytes = fs::read(path)?;
    parse(&decode(&bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_tree() {
        let root = parse("<TEI><text><body><p>Hello</p></body></text></TEI>").unwrap();
        assert_eq!(root.name, "TEI");
        let XmlNode::Element(text) = &root.children[0] else {
            panic!("expected element");
        };
        assert_eq!(text.name, "text");
        let XmlNode::Element(body) = &text.children[0] else {
            panic!("expected element");
        };
        let XmlNode::Element(p) = &body.children[0] else {
            panic!("expected element");
        };
        assert_eq!(p.children, vec![XmlNode::Text("Hello".to_string())]);
    }

    #[test]
    fn test_parse_attributes_verbatim() {
        let root = parse(r#"<TEI><foreign xml:lang="la">vale</foreign></TEI>"#).unwrap();
        let XmlNode::Element(foreign) = &root.children[0] else {
            panic!("expected element");
        };
        assert_eq!(foreign.attribute("xml:lang"), Some("la"));
    }

    #[test]
    fn test_parse_strips_namespace_prefix_from_names() {
        let root = parse(r#"<tei:TEI xmlns:tei="http://example.org"><tei:p>x</tei:p></tei:TEI>"#)
            .unwrap();
        assert_eq!(root.name, "TEI");
        let XmlNode::Element(p) = &root.children[0] else {
            panic!("expected element");
        };
        assert_eq!(p.name, "p");
    }

    #[test]
    fn test_parse_preserves_whitespace_and_merges_entities() {
        let root = parse("<p>Mr.&amp;Mrs. <hi>X</hi> </p>").unwrap();
        assert_eq!(root.children.len(), 3);
        assert_eq!(root.children[0], XmlNode::Text("Mr.&Mrs. ".to_string()));
        assert_eq!(root.children[2], XmlNode::Text(" ".to_string()));
    }

    #[test]
    fn test_parse_empty_element_syntax() {
        let root = parse(r#"<body><pb n="2"/><lb/></body>"#).unwrap();
        assert_eq!(root.children.len(), 2);
        let XmlNode::Element(pb) = &root.children[0] else {
            panic!("expected element");
        };
        assert_eq!(pb.attribute("n"), Some("2"));
    }

    #[test]
    fn test_parse_malformed_is_an_error() {
        assert!(parse("<TEI><p>unclosed</TEI>").is_err());
    }

    #[test]
    fn test_parse_depth_cap() {
        let mut doc = String::new();
        for _ in 0..80 {
            doc.push_str("<div>");
        }
        for _ in 0..80 {
            doc.push_str("</div>");
        }
        assert!(matches!(parse(&doc), Err(Error::StructureTooDeep)));
    }

    #[test]
    fn test_decode_utf8_bom() {
        let mut bytes = vec![0xEF, 0xBB, 0xBF];
        bytes.extend_from_slice("<p>ü</p>".as_bytes());
        assert_eq!(decode(&bytes), "<p>ü</p>");
    }

    #[test]
    fn test_decode_windows_1252_fallback() {
        // 0xE9 is é in CP1252 and invalid as a UTF-8 start byte.
        let bytes = b"<p>caf\xE9</p>";
        assert_eq!(decode(bytes), "<p>café</p>");
    }

    #[test]
    fn test_decode_declared_encoding() {
        let bytes = b"<?xml version=\"1.0\" encoding=\"iso-8859-1\"?><p>caf\xE9</p>";
        assert_eq!(
            decode(bytes),
            "<?xml version=\"1.0\" encoding=\"iso-8859-1\"?><p>caf\u{e9}</p>"
        );
    }
}
