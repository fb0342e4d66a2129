//! HTML serialization of the document tree.

use std::fmt::Write;

use crate::ast::{Block, Element, Inline};

/// Render blocks to HTML, one block per line.
///
/// Text and attribute values are escaped; [`Block::Html`] and
/// [`Inline::Html`] are emitted verbatim. Wiki-links that no stage replaced
/// are written back as escaped source text.
#[must_use]
pub fn render_html(blocks: &[Block]) -> String {
    let mut out = String::new();
    for (i, block) in blocks.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        render_block(block, &mut out);
    }
    out
}

fn render_block(block: &Block, out: &mut String) {
    match block {
        Block::Paragraph { children } => {
            out.push_str("<p>");
            render_inlines(children, out);
            out.push_str("</p>");
        }
        Block::Heading { level, children } => {
            let level = (*level).clamp(1, 6);
            write!(out, "<h{level}>").unwrap();
            render_inlines(children, out);
            write!(out, "</h{level}>").unwrap();
        }
        Block::Html { value } => out.push_str(value),
        Block::Element(element) => render_element(element, out),
    }
}

fn render_inlines(inlines: &[Inline], out: &mut String) {
    for inline in inlines {
        render_inline(inline, out);
    }
}

fn render_inline(inline: &Inline, out: &mut String) {
    match inline {
        Inline::Text { value } => out.push_str(&escape_html(value)),
        Inline::Link {
            url,
            title,
            children,
        } => {
            write!(out, r#"<a href="{}""#, escape_html(url)).unwrap();
            if let Some(title) = title {
                write!(out, r#" title="{}""#, escape_html(title)).unwrap();
            }
            out.push('>');
            render_inlines(children, out);
            out.push_str("</a>");
        }
        Inline::Image { url, alt, title } => {
            write!(
                out,
                r#"<img src="{}" alt="{}""#,
                escape_html(url),
                escape_html(alt)
            )
            .unwrap();
            if let Some(title) = title {
                write!(out, r#" title="{}""#, escape_html(title)).unwrap();
            }
            out.push_str(" />");
        }
        Inline::WikiLink { raw, .. } => out.push_str(&escape_html(raw)),
        Inline::Element(element) => render_element(element, out),
        Inline::Html { value } => out.push_str(value),
    }
}

fn render_element(element: &Element, out: &mut String) {
    write!(out, "<{}", element.tag).unwrap();
    for (name, value) in &element.attrs {
        match value {
            Some(value) => write!(out, r#" {name}="{}""#, escape_html(value)).unwrap(),
            None => write!(out, " {name}").unwrap(),
        }
    }
    if element.is_void() {
        out.push_str(" />");
        return;
    }
    out.push('>');
    render_inlines(&element.children, out);
    write!(out, "</{}>", element.tag).unwrap();
}

/// Escape HTML special characters.
#[must_use]
pub fn escape_html(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#x27;"),
            _ => result.push(c),
        }
    }
    result
}
