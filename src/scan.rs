//! Block scanner: lower the markdown AST into a flat list of typed blocks.
//!
//! Paragraphs are classified on the way:
//! - link-only: links (and possibly media) with no other text
//! - image-only: media and nothing else
//! - prose: anything else; images are lifted out, links stay inline
//!
//! Constructs outside the supported subset become opaque paragraphs, the
//! scanner itself never fails.

use crate::ast::{Node, NodeKind, Position, Tree};
use crate::attrs::AttrValue;
use crate::config::ParserConfig;
use crate::content::{Link, Media};
use crate::inline::{self, LinkNode, Piece};
use crate::media;
use pulldown_cmark::CodeBlockKind;

#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub kind: BlockKind,
    pub position: Position,
}

#[derive(Debug, Clone, PartialEq)]
pub enum BlockKind {
    Heading { level: u8, text: String },
    /// Prose with inline markup, plus the media lifted out of it
    Paragraph { html: String, media: Vec<Media> },
    /// Link-only paragraph
    Links(Vec<Atom>),
    /// Image-only paragraph
    Images(Vec<Media>),
    List(ListNode),
    Quote(Vec<Block>),
    Code { info: String, code: String },
    Divider,
    Opaque(String),
}

/// Element of a link-only paragraph.
#[derive(Debug, Clone, PartialEq)]
pub enum Atom {
    Link(Link),
    Media(Media),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListNode {
    /// Start number for ordered lists
    pub start: Option<u64>,
    pub items: Vec<Vec<Block>>,
}

impl Block {
    pub fn is_divider(&self) -> bool {
        matches!(self.kind, BlockKind::Divider)
    }
}

pub fn scan(body: &str, config: &ParserConfig) -> Vec<Block> {
    let tree = Tree::new(body);
    let scanner = Scanner {
        source: body,
        config,
    };
    scanner.nodes(&tree.root_node.children, 0)
}

struct Scanner<'s> {
    source: &'s str,
    config: &'s ParserConfig,
}

impl Scanner<'_> {
    /// Scan sibling nodes. Runs of inline nodes (tight list items put their text
    /// directly under the item) are treated as one paragraph.
    ///
    /// `depth` counts the quotes and lists around `nodes`. Past
    /// `config.max_nesting` their contents are spliced into the parent instead.
    fn nodes(&self, nodes: &[Node<'_>], depth: usize) -> Vec<Block> {
        let mut blocks = Vec::new();
        let mut i = 0;

        while i < nodes.len() {
            if nodes[i].kind.is_inline() {
                let start = i;
                while nodes.get(i).is_some_and(|n| n.kind.is_inline()) {
                    i += 1;
                }
                if let Some(kind) = self.paragraph(&nodes[start..i]) {
                    blocks.push(Block {
                        kind,
                        position: nodes[start].start,
                    });
                }
                continue;
            }

            let node = &nodes[i];
            i += 1;
            if depth >= self.config.max_nesting && is_container(node) {
                log::debug!(
                    "{:?} at line {} is nested deeper than {}, flattening it",
                    node.kind,
                    node.start.line,
                    self.config.max_nesting
                );
                blocks.extend(self.flatten(node, depth));
                continue;
            }
            if let Some(kind) = self.block(node, depth) {
                blocks.push(Block {
                    kind,
                    position: node.start,
                });
            }
        }

        blocks
    }

    fn flatten(&self, node: &Node<'_>, depth: usize) -> Vec<Block> {
        match &node.kind {
            NodeKind::List(_) => node
                .children
                .iter()
                .flat_map(|item| self.nodes(&item.children, depth))
                .collect(),
            _ => self.nodes(&node.children, depth),
        }
    }

    fn block(&self, node: &Node<'_>, depth: usize) -> Option<BlockKind> {
        let kind = match &node.kind {
            NodeKind::Heading { level } => BlockKind::Heading {
                level: *level as u8,
                text: inline::to_html(&node.children).trim().to_string(),
            },
            NodeKind::Paragraph => return self.paragraph(&node.children),
            NodeKind::List(start) => BlockKind::List(ListNode {
                start: *start,
                items: node
                    .children
                    .iter()
                    .filter(|item| item.kind == NodeKind::Item)
                    .map(|item| self.nodes(&item.children, depth + 1))
                    .collect(),
            }),
            NodeKind::BlockQuote => BlockKind::Quote(self.nodes(&node.children, depth + 1)),
            NodeKind::CodeBlock(kind) => BlockKind::Code {
                info: match kind {
                    CodeBlockKind::Fenced(info) => info.trim().to_string(),
                    CodeBlockKind::Indented => String::new(),
                },
                code: node.plain_text(),
            },
            NodeKind::Rule => BlockKind::Divider,
            NodeKind::HtmlBlock => {
                let html: String = node
                    .children
                    .iter()
                    .filter_map(|c| match &c.kind {
                        NodeKind::Html(h) | NodeKind::Text(h) => Some(h.as_ref()),
                        _ => None,
                    })
                    .collect();
                opaque(html.trim())?
            }
            _ => {
                log::debug!("passing {:?} through as an opaque paragraph", node.kind);
                opaque(node.source(self.source).trim())?
            }
        };
        Some(kind)
    }

    fn paragraph(&self, nodes: &[Node<'_>]) -> Option<BlockKind> {
        let config = self.config;
        let pieces = inline::collect_pieces(nodes, self.source);

        if pieces.iter().any(Piece::is_prose) {
            let html = inline::render_prose(&pieces);
            let media = pieces
                .into_iter()
                .filter_map(|piece| match piece {
                    Piece::Image(image) => Some(media::resolve(image, config)),
                    _ => None,
                })
                .collect();
            return Some(BlockKind::Paragraph { html, media });
        }

        let atoms: Vec<Atom> = pieces
            .into_iter()
            .filter_map(|piece| match piece {
                Piece::Link(link) => Some(Atom::Link(promote_link(link))),
                Piece::Image(image) => Some(Atom::Media(media::resolve(image, config))),
                _ => None,
            })
            .collect();

        if atoms.is_empty() {
            None
        } else if atoms.iter().all(|a| matches!(a, Atom::Media(_))) {
            let media = atoms
                .into_iter()
                .filter_map(|a| match a {
                    Atom::Media(m) => Some(m),
                    Atom::Link(_) => None,
                })
                .collect();
            Some(BlockKind::Images(media))
        } else {
            Some(BlockKind::Links(atoms))
        }
    }
}

fn is_container(node: &Node<'_>) -> bool {
    matches!(node.kind, NodeKind::BlockQuote | NodeKind::List(_))
}

fn opaque(text: &str) -> Option<BlockKind> {
    (!text.is_empty()).then(|| BlockKind::Opaque(text.to_string()))
}

/// Turn a standalone link into a [`Link`], pulling the well-known keys out
/// of its attributes.
fn promote_link(node: LinkNode) -> Link {
    let LinkNode {
        href,
        title,
        label,
        mut attributes,
    } = node;

    let mut take = |key: &str| match attributes.remove(key) {
        Some(AttrValue::String(s)) => Some(s),
        Some(_) | None => None,
    };
    let role = take("role");
    let target = take("target");
    let download = attributes.remove("download");

    if !title.is_empty() {
        attributes
            .entry("title".to_string())
            .or_insert(AttrValue::String(title));
    }

    Link {
        href,
        label,
        role,
        target,
        download,
        attributes,
        ..Default::default()
    }
}
