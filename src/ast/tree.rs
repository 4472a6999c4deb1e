//! Tree structure and parsing logic for the Markdown AST

use crate::parse::default_opts;
use pulldown_cmark::{Event, Parser};
use std::ops::Range;

use super::node::{Node, NodeKind, Position};

/// A tree that represents the block and inline structure of a markdown body.
#[derive(Clone, Debug, PartialEq)]
pub struct Tree<'a> {
    pub root_node: Node<'a>,
}

impl<'a> Tree<'a> {
    pub fn new(text: &'a str) -> Self {
        let parser = Parser::new_ext(text, default_opts());
        let events_with_offsets = parser.into_offset_iter().collect::<Vec<_>>();
        build_ast(text, events_with_offsets)
    }
}

/// Index for efficiently converting byte offsets to line/column positions
pub struct LineIndex {
    /// Byte offset where each line starts
    line_starts: Vec<usize>,
}

impl LineIndex {
    /// Build a line index from the source text
    pub fn new(text: &str) -> Self {
        let mut line_starts = vec![0];
        for (i, c) in text.char_indices() {
            if c == '\n' {
                line_starts.push(i + 1);
            }
        }
        Self { line_starts }
    }

    /// Convert a byte offset to a 1-based [`Position`]
    pub fn position(&self, text: &str, byte: usize) -> Position {
        // Binary search to find which line contains this byte
        let row = match self.line_starts.binary_search(&byte) {
            Ok(line) => line,
            Err(line) => line.saturating_sub(1),
        };

        let line_start = self.line_starts[row];

        // Count characters from line start to byte position
        let column = text
            .get(line_start..byte.min(text.len()))
            .map(|s| s.chars().count())
            .unwrap_or_default();

        Position {
            line: row + 1,
            column: column + 1,
        }
    }
}

/// Builds an AST from the given text and events.
///
/// While iterating over the events, we keep track of
/// 1. the current parent node (initiated as the root node)
/// 2. the children of the current parent node
/// 3. the previous siblings of the current parent node
///
/// When we encounter a new tag (`Event::Start`), we go one level deeper
/// - We create a new node and set it the current working parent
/// - We create a new empty children vector
///
/// When we encounter an end tag (`Event::End`), we go one level up
/// - The current working parent has collected all its children
/// - It previous siblings and itself will be the children ready to be appended
fn build_ast<'a>(
    text: &str,
    events_with_offset: Vec<(Event<'a>, Range<usize>)>,
) -> Tree<'a> {
    // Build line index for efficient byte-to-point conversion
    let line_index = LineIndex::new(text);

    // Stack to keep track of the things we are working on (excluding the root)
    // Each item in the stack is a tuple containing the current node and its previous
    // siblings.
    let mut stack: Vec<(Node<'a>, Vec<Node<'a>>)> = Vec::new();
    let mut curr_children: Vec<Node<'a>> = Vec::new();

    let doc_start = events_with_offset.first().map_or(0, |(_, r)| r.start);
    let doc_end = events_with_offset.last().map_or(0, |(_, r)| r.end);

    for (event, offset) in events_with_offset {
        match event {
            // for `Event::Start`, pulldown-cmark provides the offset of the
            // span of the entire element, including the start and end tags.
            Event::Start(tag) => {
                let node = Node {
                    children: Vec::new(),
                    start_byte: offset.start,
                    end_byte: offset.end,
                    start: line_index.position(text, offset.start),
                    kind: NodeKind::from_tag(tag),
                };
                stack.push((node, curr_children));
                curr_children = Vec::new();
            }
            Event::End(_tag) => {
                // Wrap up the current node
                if let Some((mut completed_node, siblings)) = stack.pop() {
                    completed_node.children = curr_children;
                    curr_children = siblings;
                    curr_children.push(completed_node);
                }
            }
            inline_event => {
                let Some(kind) = NodeKind::from_event(inline_event) else {
                    continue;
                };
                curr_children.push(Node {
                    children: Vec::new(),
                    start_byte: offset.start,
                    end_byte: offset.end,
                    start: line_index.position(text, offset.start),
                    kind,
                });
            }
        }
    }

    // pulldown-cmark always balances tags; fold anything left open anyway
    while let Some((mut node, siblings)) = stack.pop() {
        node.children = curr_children;
        curr_children = siblings;
        curr_children.push(node);
    }

    let root_node = Node {
        children: curr_children,
        start_byte: doc_start,
        end_byte: doc_end,
        start: line_index.position(text, doc_start),
        kind: NodeKind::Document,
    };

    Tree { root_node }
}
