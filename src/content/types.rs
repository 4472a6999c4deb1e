//! The guaranteed-shape content tree handed to presentation components.
//!
//! Every field is always present: missing source material yields an empty
//! string or an empty collection, never a missing key.

use crate::attrs::{AttrValue, Attributes};
use crate::sequence::SequenceElement;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::collections::BTreeMap;

/// Text of a heading slot.
///
/// Serializes as a plain string, or as a list of strings when consecutive
/// same-level headings were merged into one multi-line heading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum HeadingText {
    Single(String),
    Lines(Vec<String>),
}

impl Default for HeadingText {
    fn default() -> Self {
        Self::Single(String::new())
    }
}

impl HeadingText {
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Single(s) => s.is_empty(),
            Self::Lines(lines) => lines.is_empty(),
        }
    }

    /// Append another line, turning a single heading into a multi-line one.
    pub fn push(&mut self, line: String) {
        match self {
            Self::Single(s) if s.is_empty() => *s = line,
            Self::Single(s) => {
                let first = std::mem::take(s);
                *self = Self::Lines(vec![first, line]);
            }
            Self::Lines(lines) => lines.push(line),
        }
    }

    pub fn lines(&self) -> Vec<&str> {
        match self {
            Self::Single(s) if s.is_empty() => vec![],
            Self::Single(s) => vec![s.as_str()],
            Self::Lines(lines) => lines.iter().map(String::as_str).collect(),
        }
    }
}

impl From<&str> for HeadingText {
    fn from(value: &str) -> Self {
        Self::Single(value.to_string())
    }
}

impl From<Vec<&str>> for HeadingText {
    fn from(value: Vec<&str>) -> Self {
        Self::Lines(value.into_iter().map(str::to_string).collect())
    }
}

impl PartialEq<&str> for HeadingText {
    fn eq(&self, other: &&str) -> bool {
        matches!(self, Self::Single(s) if s == other)
    }
}

/// A link promoted out of a link-only paragraph.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Link {
    pub href: String,
    /// Label with inline markup preserved
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub download: Option<AttrValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon_before: Option<Media>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon_after: Option<Media>,
    /// Remaining attributes (`id`, `class`, `title`, custom keys)
    #[serde(default)]
    pub attributes: Attributes,
}

/// An image, icon or video.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Media {
    pub url: String,
    pub alt: String,
    pub role: String,
    #[serde(default)]
    pub attributes: Attributes,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListStyle {
    #[default]
    Bullet,
    Ordered,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ListBlock {
    pub style: ListStyle,
    /// First number of an ordered list
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start: Option<u64>,
    pub items: Vec<Content>,
}

/// Display-only fenced code.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snippet {
    pub language: String,
    pub code: String,
}

/// One parsed content unit, or one item of it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Content {
    pub pretitle: HeadingText,
    pub title: HeadingText,
    pub subtitle: HeadingText,
    pub subtitle2: HeadingText,
    /// Headings beyond the recognized slots
    pub headings: Vec<String>,
    pub paragraphs: Vec<String>,
    pub links: Vec<Link>,
    pub images: Vec<Media>,
    pub icons: Vec<Media>,
    pub videos: Vec<Media>,
    pub lists: Vec<ListBlock>,
    pub quotes: Vec<Content>,
    pub snippets: Vec<Snippet>,
    pub data: BTreeMap<String, JsonValue>,
    pub items: Vec<Content>,
    pub sequence: Vec<SequenceElement>,
}

impl Content {
    pub fn new() -> Self {
        Self::default()
    }
}
