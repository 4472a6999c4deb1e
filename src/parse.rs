//! Entry points: turn one markdown body into a [`Content`].

use crate::config::ParserConfig;
use crate::content::Content;
use crate::group::{self, Context};
use crate::scan::scan;
use crate::warning::ParseWarning;
use pulldown_cmark::Options;
use serde::Serialize;

/// Options used for every content unit.
///
/// Smart punctuation stays off so quoted attribute values reach the
/// attribute parser intact.
pub fn default_opts() -> Options {
    let mut opts = Options::empty();
    opts.insert(Options::ENABLE_TABLES);
    opts.insert(Options::ENABLE_STRIKETHROUGH);
    opts
}

/// Result of parsing one body.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Parsed {
    pub content: Content,
    pub warnings: Vec<ParseWarning>,
}

/// Content parser bound to one configuration.
///
/// Parsing is pure: the same body always gives the same `Parsed`, and a
/// `Parser` can be shared across threads.
#[derive(Debug, Clone, Default)]
pub struct Parser {
    config: ParserConfig,
}

impl Parser {
    pub fn new(config: ParserConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Parse a markdown body (frontmatter already removed).
    ///
    /// Never fails. Malformed tagged data blocks are dropped and reported in
    /// `warnings`.
    pub fn parse(&self, body: &str, source_path: &str) -> Parsed {
        let blocks = scan(body, &self.config);
        let mut ctx = Context::new(&self.config, source_path);
        let content = group::build_content(&blocks, &mut ctx);
        log::debug!(
            "{source_path}: {} blocks, {} items, {} warnings",
            blocks.len(),
            content.items.len(),
            ctx.warnings.len()
        );
        Parsed {
            content,
            warnings: ctx.warnings,
        }
    }
}

/// Parse with a borrowed configuration, keeping only the content.
///
/// Warnings are still emitted through `log`.
pub fn parse_content(body: &str, source_path: &str, config: &ParserConfig) -> Content {
    let blocks = scan(body, config);
    let mut ctx = Context::new(config, source_path);
    group::build_content(&blocks, &mut ctx)
}
