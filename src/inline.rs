//! Inline markup: HTML rendering of inline nodes and the piece analysis that
//! tells prose paragraphs apart from link-only and image-only ones.

use crate::ast::{Node, NodeKind};
use crate::attrs::{self, AttrValue, Attributes};
use crate::media::ImageNode;
use pulldown_cmark_escape::{FmtWriter, escape_href, escape_html};

/// Render inline nodes as an HTML fragment.
pub fn to_html(nodes: &[Node<'_>]) -> String {
    let mut out = String::new();
    nodes.iter().for_each(|node| render_node(node, &mut out));
    out
}

// Writing into a `String` cannot fail, the `fmt::Result`s below are always `Ok`
fn push_text(out: &mut String, text: &str) {
    let _ = escape_html(FmtWriter(&mut *out), text);
}

fn push_href(out: &mut String, href: &str) {
    let _ = escape_href(FmtWriter(&mut *out), href);
}

fn render_node(node: &Node<'_>, out: &mut String) {
    match &node.kind {
        NodeKind::Text(text) => push_text(out, text),
        NodeKind::Code(code) => {
            out.push_str("<code>");
            push_text(out, code);
            out.push_str("</code>");
        }
        NodeKind::Emphasis => wrap(node, "em", out),
        NodeKind::Strong => wrap(node, "strong", out),
        NodeKind::Strikethrough => wrap(node, "del", out),
        NodeKind::Link { dest_url, title } => {
            open_anchor(out, dest_url, title, &Attributes::new());
            node.children.iter().for_each(|c| render_node(c, out));
            out.push_str("</a>");
        }
        NodeKind::Image { dest_url, title } => {
            out.push_str("<img src=\"");
            push_href(out, dest_url);
            out.push_str("\" alt=\"");
            push_text(out, &node.plain_text());
            out.push('"');
            if !title.is_empty() {
                out.push_str(" title=\"");
                push_text(out, title);
                out.push('"');
            }
            out.push_str(" />");
        }
        NodeKind::Html(html) | NodeKind::InlineHtml(html) => out.push_str(html),
        NodeKind::SoftBreak => out.push('\n'),
        NodeKind::HardBreak => out.push_str("<br />"),
        _ => node.children.iter().for_each(|c| render_node(c, out)),
    }
}

fn wrap(node: &Node<'_>, tag: &str, out: &mut String) {
    out.push('<');
    out.push_str(tag);
    out.push('>');
    node.children.iter().for_each(|c| render_node(c, out));
    out.push_str("</");
    out.push_str(tag);
    out.push('>');
}

fn open_anchor(out: &mut String, href: &str, title: &str, attributes: &Attributes) {
    out.push_str("<a href=\"");
    push_href(out, href);
    out.push('"');
    if !title.is_empty() && !attributes.contains_key("title") {
        out.push_str(" title=\"");
        push_text(out, title);
        out.push('"');
    }
    for (key, value) in attributes {
        match value {
            AttrValue::Bool(false) => {}
            AttrValue::Bool(true) => {
                out.push(' ');
                out.push_str(key);
            }
            other => {
                out.push(' ');
                out.push_str(key);
                out.push_str("=\"");
                push_text(out, &other.to_attr_string());
                out.push('"');
            }
        }
    }
    out.push('>');
}

// Pieces
// ====================

/// A link as scanned, before it is promoted or rendered inline.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LinkNode {
    pub href: String,
    pub title: String,
    /// Label with inline markup
    pub label: String,
    pub attributes: Attributes,
}

/// Top-level unit of a paragraph once attribute suffixes are attached.
#[derive(Debug, Clone, PartialEq)]
pub enum Piece<'n> {
    /// Adjacent text events merged together, unescaped
    Text(String),
    Break(&'n Node<'n>),
    Link(LinkNode),
    Image(ImageNode),
    /// Any other inline markup, rendered as is
    Node(&'n Node<'n>),
}

impl Piece<'_> {
    pub fn is_blank(&self) -> bool {
        match self {
            Piece::Text(text) => text.trim().is_empty(),
            Piece::Break(_) => true,
            _ => false,
        }
    }

    /// Whether this piece makes its paragraph ordinary prose.
    pub fn is_prose(&self) -> bool {
        match self {
            Piece::Text(text) => !text.trim().is_empty(),
            Piece::Node(_) => true,
            _ => false,
        }
    }
}

/// Split inline nodes into pieces, attaching `{...}` blocks that directly
/// follow a link or an image.
///
/// The block is read from `source` rather than from the text nodes, so
/// markup inside a quoted value does not break it up. Nodes covered by an
/// attached block are dropped.
pub fn collect_pieces<'n>(nodes: &'n [Node<'n>], source: &str) -> Vec<Piece<'n>> {
    let limit = nodes.last().map_or(0, |n| n.end_byte);
    let mut pieces: Vec<Piece<'n>> = Vec::new();
    // Source offset just past the last attached block
    let mut consumed = 0;
    let mut i = 0;

    while i < nodes.len() {
        let node = &nodes[i];
        if node.end_byte <= consumed {
            i += 1;
            continue;
        }
        match &node.kind {
            NodeKind::Text(_) => {
                let mut text = String::new();
                while let Some(next) = nodes.get(i) {
                    let NodeKind::Text(t) = &next.kind else { break };
                    text.push_str(unconsumed(next, t, source, consumed));
                    i += 1;
                }
                if !text.is_empty() {
                    pieces.push(Piece::Text(text));
                }
                continue;
            }
            NodeKind::Image { dest_url, title } => pieces.push(Piece::Image(ImageNode {
                url: dest_url.to_string(),
                alt: node.plain_text(),
                title: title.to_string(),
                ..Default::default()
            })),
            NodeKind::Link { dest_url, title } => {
                pieces.push(link_piece(node, dest_url, title, source))
            }
            NodeKind::SoftBreak | NodeKind::HardBreak => pieces.push(Piece::Break(node)),
            _ => pieces.push(Piece::Node(node)),
        }
        if let Some(end) = attach_suffix(&mut pieces, node, source, limit) {
            consumed = end;
        }
        i += 1;
    }

    pieces
}

/// Part of a text node that lies after `consumed`.
fn unconsumed<'a>(node: &Node<'_>, text: &'a str, source: &'a str, consumed: usize) -> &'a str {
    if node.start_byte >= consumed {
        text
    } else if node.end_byte <= consumed {
        ""
    } else if node.source(source) == text {
        text.get(consumed - node.start_byte..).unwrap_or_default()
    } else {
        // Escapes or entities: the raw source is the closest we have
        source.get(consumed..node.end_byte).unwrap_or_default()
    }
}

/// Parse the `{...}` block right after `node` into the attributes of the
/// last piece, when that piece is a link or an image. Returns the offset
/// just past the closing brace.
fn attach_suffix(
    pieces: &mut [Piece<'_>],
    node: &Node<'_>,
    source: &str,
    limit: usize,
) -> Option<usize> {
    let target = match pieces.last_mut() {
        Some(Piece::Link(link)) => &mut link.attributes,
        Some(Piece::Image(image)) => &mut image.attributes,
        _ => return None,
    };
    let after = source.get(node.end_byte..limit)?;
    let (parsed, rest) = attrs::split_suffix(after)?;
    target.extend(parsed);
    Some(limit - rest.len())
}

/// A link whose whole label is one image becomes a clickable image.
fn link_piece<'n>(node: &'n Node<'n>, href: &str, title: &str, source: &str) -> Piece<'n> {
    let inner = collect_pieces(&node.children, source);
    let mut meaningful = inner.into_iter().filter(|p| !p.is_blank());
    if let (Some(Piece::Image(image)), None) = (meaningful.next(), meaningful.next()) {
        return Piece::Image(ImageNode {
            href: Some(href.to_string()),
            ..image
        });
    }

    Piece::Link(LinkNode {
        href: href.to_string(),
        title: title.to_string(),
        label: to_html(&node.children).trim().to_string(),
        attributes: Attributes::new(),
    })
}

/// Render prose pieces, leaving images out: they are lifted into the media
/// buckets by the scanner.
pub fn render_prose(pieces: &[Piece<'_>]) -> String {
    let mut out = String::new();
    for piece in pieces {
        match piece {
            Piece::Text(text) => push_text(&mut out, text),
            Piece::Break(node) | Piece::Node(node) => render_node(node, &mut out),
            Piece::Link(link) => {
                open_anchor(&mut out, &link.href, &link.title, &link.attributes);
                out.push_str(&link.label);
                out.push_str("</a>");
            }
            Piece::Image(_) => {}
        }
    }
    out.trim().to_string()
}
