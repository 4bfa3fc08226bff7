//! End-to-end tests over a realistic letter transcription.

use epistola::{
    BlockKind, DocumentNode, EntityKind, Error, InlineStyle, letter_from_str, read_letter,
    render_text,
};

const LETTER: &str = "\
<TEI xmlns=\"http://www.tei-c.org/ns/1.0\">\
<teiHeader><fileDesc><titleStmt>\
<title>To <persName>Charlotte von Stein</persName>, <date when=\"1786-09-03\">3 September 1786</date></title>\
</titleStmt></fileDesc></teiHeader>\
<text><body><div type=\"writingSession\">\
<opener><dateline><placeName>Karlsbad</placeName>, den 3. September</dateline>\
<salute>Liebe <persName>Charlotte</persName>,</salute></opener>\
<p>Ich schreibe <hi rend=\"u\">heimlich</hi> an einem Ort, den ich nicht nennen will.\
<note>Goethe departed for Italy in secret.</note></p>\
<p>Der <rs type=\"work\" ref=\"#iphigenie\">Text</rs> ist beinahe fertig; \
<choice><abbr>d.h.</abbr><expan>das heisst</expan></choice> der erste Akt.<pb n=\"2\"/>\
Man sagt <q>ad meliora</q> auf <foreign xml:lang=\"la\">latine</foreign>.\
<note>A second note.</note></p>\
<closer><salute>Lebe wohl,</salute><signed>G.</signed></closer>\
</div></body></text></TEI>";

#[test]
fn test_full_letter_structure() {
    let doc = letter_from_str(LETTER).unwrap();

    assert_eq!(doc.title.len(), 4);
    assert!(matches!(
        &doc.title[1],
        DocumentNode::Entity {
            kind: EntityKind::Person,
            ..
        }
    ));

    // opener, two paragraphs, closer
    assert_eq!(doc.body.len(), 4);
    assert!(matches!(
        &doc.body[0],
        DocumentNode::Block {
            kind: BlockKind::Opener,
            ..
        }
    ));
    assert!(matches!(&doc.body[1], DocumentNode::Paragraph(_)));
    assert!(matches!(
        &doc.body[3],
        DocumentNode::Block {
            kind: BlockKind::Closer,
            ..
        }
    ));
}

#[test]
fn test_footnotes_collected_in_order() {
    let doc = letter_from_str(LETTER).unwrap();
    assert_eq!(doc.footnotes.len(), 2);
    assert_eq!(
        doc.footnotes[0],
        vec![DocumentNode::Text(
            "Goethe departed for Italy in secret.".to_string()
        )]
    );

    let DocumentNode::Paragraph(children) = &doc.body[1] else {
        panic!("expected paragraph");
    };
    assert!(children.contains(&DocumentNode::FootnoteRef(1)));
}

#[test]
fn test_entity_metadata_reaches_the_model() {
    let doc = letter_from_str(LETTER).unwrap();
    let DocumentNode::Paragraph(children) = &doc.body[2] else {
        panic!("expected paragraph");
    };

    let entity = children
        .iter()
        .find_map(|n| match n {
            DocumentNode::Entity {
                kind: EntityKind::Reference,
                subtype,
                reference,
                ..
            } => Some((subtype.clone(), reference.clone())),
            _ => None,
        })
        .expect("rs entity present");
    assert_eq!(entity.0.as_deref(), Some("work"));
    assert_eq!(entity.1.as_deref(), Some("#iphigenie"));

    let foreign = children.iter().find_map(|n| match n {
        DocumentNode::Formatted {
            style: InlineStyle::Foreign,
            lang,
            ..
        } => Some(lang.clone()),
        _ => None,
    });
    assert_eq!(foreign.unwrap().as_deref(), Some("la"));
}

#[test]
fn test_abbreviation_expanded() {
    let doc = letter_from_str(LETTER).unwrap();
    let DocumentNode::Paragraph(children) = &doc.body[2] else {
        panic!("expected paragraph");
    };
    let expansion = children
        .iter()
        .find_map(|n| match n {
            DocumentNode::Formatted {
                style: InlineStyle::Expansion,
                children,
                ..
            } => Some(children.clone()),
            _ => None,
        })
        .expect("choice resolved to expansion");
    assert_eq!(
        expansion,
        vec![DocumentNode::Text("das heisst".to_string())]
    );
}

#[test]
fn test_rendered_text_reads_like_a_letter() {
    let doc = letter_from_str(LETTER).unwrap();
    let text = render_text(&doc);

    assert!(text.starts_with("To Charlotte von Stein, 3 September 1786\n\n"));
    assert!(text.contains("heimlich"));
    assert!(text.contains("[1]"));
    assert!(text.contains("\"ad meliora\""));
    assert!(text.contains("-- page 2 --"));
    assert!(text.contains("Notes\n1. Goethe departed for Italy in secret.\n"));
}

#[test]
fn test_not_a_tei_document() {
    let err = letter_from_str("<letter><p>x</p></letter>").unwrap_err();
    assert!(matches!(err, Error::NotATeiDocument(tag) if tag == "letter"));
}

#[test]
fn test_malformed_xml_is_a_parse_error() {
    assert!(matches!(
        letter_from_str("<TEI><p>oops</TEI>"),
        Err(Error::Xml(_))
    ));
}

#[test]
fn test_read_letter_from_file() {
    use std::io::Write;

    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(LETTER.as_bytes()).unwrap();

    let doc = read_letter(file.path()).unwrap();
    assert_eq!(doc.footnotes.len(), 2);
}

#[test]
fn test_read_letter_windows_1252_file() {
    use std::io::Write;

    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(b"<TEI><text><body><p>caf\xE9</p></body></text></TEI>")
        .unwrap();

    let doc = read_letter(file.path()).unwrap();
    assert_eq!(
        doc.body,
        vec![DocumentNode::Paragraph(vec![DocumentNode::Text(
            "caf\u{e9}".to_string()
        )])]
    );
}
