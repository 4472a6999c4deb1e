//! Semantic content parser.
//!
//! Turns one markdown content unit into a [`Content`] tree with a fixed shape:
//! heading slots, prose, links, media, lists, quotes, code, tagged data,
//! items and a document-order `sequence`.
//!
//! ```
//! use mdcontent::{ParserConfig, parse_content};
//!
//! let content = parse_content("### Welcome\n# Acme\n## Tools", "home.md", &ParserConfig::default());
//! assert_eq!(content.pretitle, "Welcome");
//! assert_eq!(content.title, "Acme");
//! assert_eq!(content.subtitle, "Tools");
//! ```

pub mod associate;
pub mod ast;
pub mod attrs;
pub mod classify;
pub mod config;
pub mod content;
pub mod data;
pub mod document;
pub mod error;
pub mod group;
pub mod inline;
pub mod list;
pub mod media;
pub mod parse;
pub mod scan;
pub mod sequence;
pub mod warning;

pub use config::ParserConfig;
pub use content::{Content, HeadingText, Link, ListBlock, ListStyle, Media, Snippet};
pub use document::Document;
pub use error::{Error, Result};
pub use parse::{Parsed, Parser, parse_content};
pub use sequence::{Entry, SequenceElement};
pub use warning::{ParseWarning, WarningKind};
