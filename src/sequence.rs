//! Document-order projection of a content unit.
//!
//! The buckets of `Content` lose the interleaving of the source; `sequence`
//! keeps one element per block so a renderer can replay the body as written.
//! Elements point into the buckets of the same `Content` by index, items
//! included, so the projection never repeats a value.

use crate::content::{Content, Link, ListBlock, Media, Snippet};
use crate::media::Bucket;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum SequenceElement {
    Heading { level: u8, text: String },
    /// `paragraphs[index]`
    Paragraph { index: usize },
    Link { index: usize },
    Image { index: usize },
    Icon { index: usize },
    Video { index: usize },
    List { index: usize },
    Quote { index: usize },
    /// `snippets[index]`
    Code { index: usize },
    /// `data[tag]`
    Data { tag: String },
    Divider,
    /// `items[index]`, whose own sequence covers its blocks
    Item { index: usize },
}

impl SequenceElement {
    /// Media element for `index` within the bucket the media landed in.
    pub fn media(bucket: Bucket, index: usize) -> Self {
        match bucket {
            Bucket::Images => Self::Image { index },
            Bucket::Icons => Self::Icon { index },
            Bucket::Videos => Self::Video { index },
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Heading { .. } => "heading",
            Self::Paragraph { .. } => "paragraph",
            Self::Link { .. } => "link",
            Self::Image { .. } => "image",
            Self::Icon { .. } => "icon",
            Self::Video { .. } => "video",
            Self::List { .. } => "list",
            Self::Quote { .. } => "quote",
            Self::Code { .. } => "code",
            Self::Data { .. } => "data",
            Self::Divider => "divider",
            Self::Item { .. } => "item",
        }
    }
}

/// A sequence element looked up in its `Content`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Entry<'c> {
    Heading { level: u8, text: &'c str },
    Paragraph(&'c str),
    Link(&'c Link),
    Media(&'c Media),
    List(&'c ListBlock),
    Quote(&'c Content),
    Code(&'c Snippet),
    Data { tag: &'c str, value: &'c JsonValue },
    Divider,
    Item(&'c Content),
}

impl Content {
    /// Borrow the value an element points at; `None` for a dangling index.
    pub fn resolve<'c>(&'c self, element: &'c SequenceElement) -> Option<Entry<'c>> {
        let entry = match element {
            SequenceElement::Heading { level, text } => Entry::Heading {
                level: *level,
                text,
            },
            SequenceElement::Paragraph { index } => Entry::Paragraph(self.paragraphs.get(*index)?),
            SequenceElement::Link { index } => Entry::Link(self.links.get(*index)?),
            SequenceElement::Image { index } => Entry::Media(self.images.get(*index)?),
            SequenceElement::Icon { index } => Entry::Media(self.icons.get(*index)?),
            SequenceElement::Video { index } => Entry::Media(self.videos.get(*index)?),
            SequenceElement::List { index } => Entry::List(self.lists.get(*index)?),
            SequenceElement::Quote { index } => Entry::Quote(self.quotes.get(*index)?),
            SequenceElement::Code { index } => Entry::Code(self.snippets.get(*index)?),
            SequenceElement::Data { tag } => {
                let (tag, value) = self.data.get_key_value(tag)?;
                Entry::Data { tag, value }
            }
            SequenceElement::Divider => Entry::Divider,
            SequenceElement::Item { index } => Entry::Item(self.items.get(*index)?),
        };
        Some(entry)
    }

    /// The sequence with every element resolved, in document order.
    pub fn entries(&self) -> impl Iterator<Item = Entry<'_>> + '_ {
        self.sequence.iter().filter_map(|element| self.resolve(element))
    }
}
