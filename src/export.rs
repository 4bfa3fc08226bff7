//! Plain-text rendering of the semantic model.
//!
//! A deliberately thin projection used by the CLI: one line of policy-free
//! typography per node variant. Anything smarter (color, tooltips, layout)
//! belongs to a real presentation layer consuming [`SemanticDocument`]
//! directly.

use crate::model::{DocumentNode, InlineStyle, SemanticDocument};

/// Render a document as plain text: title, body blocks separated by blank
/// lines, `[n]` footnote markers, and a trailing Notes section.
pub fn render_text(doc: &SemanticDocument) -> String {
    let mut out = String::new();

    if !doc.title.is_empty() {
        let title = render_inline(&doc.title);
        let title = title.trim();
        if !title.is_empty() {
            out.push_str(title);
            out.push_str("\n\n");
        }
    }

    for block in &doc.body {
        render_block(block, &mut out);
    }

    if !doc.footnotes.is_empty() {
        out.push_str("Notes\n");
        for (i, note) in doc.footnotes.iter().enumerate() {
            let line = render_inline(note);
            out.push_str(&format!("{}. {}\n", i + 1, line.trim()));
        }
    }

    out
}

/// Concatenated character data of an inline sequence, markers included.
pub fn plain_text(nodes: &[DocumentNode]) -> String {
    render_inline(nodes).trim().to_string()
}

fn render_block(node: &DocumentNode, out: &mut String) {
    match node {
        DocumentNode::Paragraph(children) | DocumentNode::Block { children, .. } => {
            let line = render_inline(children);
            let line = line.trim();
            if !line.is_empty() {
                out.push_str(line);
                out.push_str("\n\n");
            }
        }
        DocumentNode::PageBreak(n) => {
            match n {
                Some(n) => out.push_str(&format!("-- page {n} --\n\n")),
                None => out.push_str("-- page break --\n\n"),
            };
        }
        DocumentNode::Passthrough(children) => {
            for child in children {
                render_block(child, out);
            }
        }
        // Stray inline content between blocks gets its own line, except
        // the whitespace runs markup indentation leaves behind.
        other => {
            let line = render_inline(std::slice::from_ref(other));
            let line = line.trim();
            if !line.is_empty() {
                out.push_str(line);
                out.push_str("\n\n");
            }
        }
    }
}

fn render_inline(nodes: &[DocumentNode]) -> String {
    let mut out = String::new();
    for node in nodes {
        render_inline_node(node, &mut out);
    }
    out
}

fn render_inline_node(node: &DocumentNode, out: &mut String) {
    match node {
        DocumentNode::Text(text) => out.push_str(text),
        DocumentNode::FootnoteRef(index) => out.push_str(&format!("[{index}]")),
        DocumentNode::LineBreak => out.push('\n'),
        DocumentNode::PageBreak(n) => {
            match n {
                Some(n) => out.push_str(&format!("\n-- page {n} --\n")),
                None => out.push_str("\n-- page break --\n"),
            };
        }
        DocumentNode::Formatted {
            style: InlineStyle::Quote,
            children,
            ..
        } => {
            out.push('"');
            for child in children {
                render_inline_node(child, out);
            }
            out.push('"');
        }
        // Struck text stays out of the reading text.
        DocumentNode::Formatted {
            style: InlineStyle::Deletion,
            ..
        } => {}
        other => {
            for child in other.children() {
                render_inline_node(child, out);
            }
        }
    }
}
