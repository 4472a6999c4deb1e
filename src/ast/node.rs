//! Node definitions for the Markdown AST

use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::ops::Range;

use pulldown_cmark::{CodeBlockKind, CowStr, Event, HeadingLevel, Tag};

// Position
// ====================

/// Human-facing location in the source, both fields 1-based.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

// Node
// ====================

#[derive(Clone, Debug, PartialEq)]
pub struct Node<'a> {
    pub children: Vec<Node<'a>>,
    // byte range of the inline element or the entire element span
    // for nested elements
    pub start_byte: usize,
    pub end_byte: usize,
    pub start: Position,
    pub kind: NodeKind<'a>,
}

// Node kind
// --------------------

/// Node kind
///
/// pulldown-cmark's `Event` consists of element that can be nested,
/// representing as Event::Start(Tag) and Event::End(Tag), and event that
/// can't be nested. Only the constructs the content parser understands get
/// their own variant, everything else lands in `Unsupported` and is passed
/// through as opaque source text.
#[derive(Clone, Debug, PartialEq)]
pub enum NodeKind<'a> {
    /// Root node
    Document,
    /// Tag
    Paragraph,
    Heading {
        level: HeadingLevel,
    },
    BlockQuote,
    CodeBlock(CodeBlockKind<'a>),
    HtmlBlock,
    List(Option<u64>),
    Item,
    Table,
    TableHead,
    TableRow,
    TableCell,
    Emphasis,
    Strong,
    Strikethrough,
    Link {
        dest_url: CowStr<'a>,
        title: CowStr<'a>,
    },
    Image {
        dest_url: CowStr<'a>,
        title: CowStr<'a>,
    },
    /// inline Events
    Text(CowStr<'a>),
    Code(CowStr<'a>),
    Html(CowStr<'a>),
    InlineHtml(CowStr<'a>),
    SoftBreak,
    HardBreak,
    Rule,
    /// Tags and events outside the supported subset
    Unsupported,
}

impl<'a> NodeKind<'a> {
    pub(crate) fn from_tag(tag: Tag<'a>) -> Self {
        match tag {
            Tag::Paragraph => Self::Paragraph,
            Tag::Heading { level, .. } => Self::Heading { level },
            Tag::BlockQuote(_) => Self::BlockQuote,
            Tag::CodeBlock(x) => Self::CodeBlock(x),
            Tag::HtmlBlock => Self::HtmlBlock,
            Tag::List(x) => Self::List(x),
            Tag::Item => Self::Item,
            Tag::Table(_) => Self::Table,
            Tag::TableHead => Self::TableHead,
            Tag::TableRow => Self::TableRow,
            Tag::TableCell => Self::TableCell,
            Tag::Emphasis => Self::Emphasis,
            Tag::Strong => Self::Strong,
            Tag::Strikethrough => Self::Strikethrough,
            Tag::Link {
                dest_url, title, ..
            } => Self::Link { dest_url, title },
            Tag::Image {
                dest_url, title, ..
            } => Self::Image { dest_url, title },
            _ => Self::Unsupported,
        }
    }

    /// Map a non-nesting event; `None` for `Start`/`End`, which are handled
    /// by the tree builder.
    pub(crate) fn from_event(event: Event<'a>) -> Option<Self> {
        let kind = match event {
            Event::Text(x) => Self::Text(x),
            Event::Code(x) => Self::Code(x),
            Event::Html(x) => Self::Html(x),
            Event::InlineHtml(x) => Self::InlineHtml(x),
            Event::SoftBreak => Self::SoftBreak,
            Event::HardBreak => Self::HardBreak,
            Event::Rule => Self::Rule,
            Event::Start(_) | Event::End(_) => return None,
            _ => Self::Unsupported,
        };
        Some(kind)
    }

    pub fn is_inline(&self) -> bool {
        matches!(
            self,
            Self::Emphasis
                | Self::Strong
                | Self::Strikethrough
                | Self::Link { .. }
                | Self::Image { .. }
                | Self::Text(_)
                | Self::Code(_)
                | Self::InlineHtml(_)
                | Self::SoftBreak
                | Self::HardBreak
        )
    }
}

impl<'a> Display for Node<'a> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.fmt_with_indent(f, 0)
    }
}

impl<'a> Node<'a> {
    fn fmt_with_indent(
        &self,
        f: &mut std::fmt::Formatter<'_>,
        indent: usize,
    ) -> std::fmt::Result {
        // Print indentation
        f.write_str(&" ".repeat(indent))?;

        // Print node kind and range
        writeln!(
            f,
            "{:?} [{}..{}]",
            self.kind, self.start_byte, self.end_byte
        )?;

        for child in self.children.iter() {
            child.fmt_with_indent(f, indent + 2)?;
        }

        Ok(())
    }

    pub fn byte_range(&self) -> Range<usize> {
        self.start_byte..self.end_byte
    }

    /// Slice of the source this node was parsed from.
    pub fn source<'s>(&self, text: &'s str) -> &'s str {
        text.get(self.byte_range()).unwrap_or_default()
    }

    /// Concatenated text of all descendant text-like leaves, markup dropped.
    pub fn plain_text(&self) -> String {
        let mut buf = String::new();
        collect_plain_text(self, &mut buf);
        buf
    }
}

fn collect_plain_text(node: &Node<'_>, buf: &mut String) {
    match &node.kind {
        NodeKind::Text(s) | NodeKind::Code(s) => buf.push_str(s),
        NodeKind::SoftBreak | NodeKind::HardBreak => buf.push(' '),
        _ => node
            .children
            .iter()
            .for_each(|child| collect_plain_text(child, buf)),
    }
}
