//! Content builder: splits a block list into main content and items, and
//! assembles each span into a `Content`.

use crate::associate::associate;
use crate::classify::{self, Action, Slot};
use crate::config::ParserConfig;
use crate::content::{Content, HeadingText, Media};
use crate::data::{self, Extracted};
use crate::list;
use crate::media::Bucket;
use crate::scan::{Atom, Block, BlockKind, ListNode};
use crate::sequence::SequenceElement;
use crate::warning::ParseWarning;

/// State shared by every builder call for one content unit.
pub struct Context<'c> {
    pub config: &'c ParserConfig,
    pub source_path: &'c str,
    pub warnings: Vec<ParseWarning>,
}

impl<'c> Context<'c> {
    pub fn new(config: &'c ParserConfig, source_path: &'c str) -> Self {
        Self {
            config,
            source_path,
            warnings: Vec::new(),
        }
    }
}

/// Build a content value with items from `blocks`.
///
/// Blocks before the first boundary form the main content. Each later span,
/// from a boundary heading (or the block after a divider) to the next
/// boundary, becomes one item.
pub fn build_content(blocks: &[Block], ctx: &mut Context<'_>) -> Content {
    let actions = classify::run(blocks);
    let (main, mut rest) = blocks.split_at(actions.len());
    let mut content = assemble(main, &actions, ctx);

    while let Some((first, tail)) = rest.split_first() {
        if first.is_divider() {
            content.sequence.push(SequenceElement::Divider);
            rest = tail;
            continue;
        }

        let actions = classify::run(rest);
        debug_assert!(!actions.is_empty());
        let (span, tail) = rest.split_at(actions.len().max(1));
        let item = assemble(span, &actions, ctx);
        content.sequence.push(SequenceElement::Item {
            index: content.items.len(),
        });
        content.items.push(item);
        rest = tail;
    }

    content
}

/// Assemble one span without grouping. `actions` pairs with `span`.
fn assemble(span: &[Block], actions: &[Action], ctx: &mut Context<'_>) -> Content {
    let mut content = Content::new();

    for (block, action) in span.iter().zip(actions) {
        match (&block.kind, *action) {
            (BlockKind::Heading { level, text }, action) => {
                apply_heading(&mut content, action, text);
                content.sequence.push(SequenceElement::Heading {
                    level: *level,
                    text: text.clone(),
                });
            }
            (kind, _) => push_block(&mut content, kind, block, ctx),
        }
    }

    content
}

fn apply_heading(content: &mut Content, action: Action, text: &str) {
    match action {
        Action::Assign(slot) | Action::Merge(slot) => match slot_mut(content, slot) {
            Some(heading) => heading.push(text.to_string()),
            None => content.headings.push(text.to_string()),
        },
        Action::Promote => {
            content.pretitle = std::mem::take(&mut content.title);
            content.title = HeadingText::from(text);
        }
        Action::Content | Action::Inert | Action::Boundary => {}
    }
}

fn slot_mut(content: &mut Content, slot: Slot) -> Option<&mut HeadingText> {
    match slot {
        Slot::Title => Some(&mut content.title),
        Slot::Subtitle => Some(&mut content.subtitle),
        Slot::Subtitle2 => Some(&mut content.subtitle2),
        Slot::Overflow => None,
    }
}

fn push_block(content: &mut Content, kind: &BlockKind, block: &Block, ctx: &mut Context<'_>) {
    match kind {
        BlockKind::Paragraph { html, media } => {
            if !html.is_empty() {
                push_paragraph(content, html.clone());
            }
            for m in media {
                push_media(content, m.clone());
            }
        }
        BlockKind::Links(atoms) => {
            for atom in associate(atoms.clone()) {
                match atom {
                    Atom::Link(link) => {
                        content.sequence.push(SequenceElement::Link {
                            index: content.links.len(),
                        });
                        content.links.push(link);
                    }
                    Atom::Media(m) => push_media(content, m),
                }
            }
        }
        BlockKind::Images(media) => {
            for m in media {
                push_media(content, m.clone());
            }
        }
        BlockKind::List(node) => push_list(content, node, ctx),
        BlockKind::Quote(blocks) => push_quote(content, blocks, ctx),
        BlockKind::Code { info, code } => {
            match data::extract(info, code, block.position, ctx.source_path) {
                Extracted::Data { tag, value } => {
                    content
                        .sequence
                        .push(SequenceElement::Data { tag: tag.clone() });
                    if content.data.insert(tag.clone(), value).is_some() {
                        log::debug!("{}: data tag `{tag}` redefined", ctx.source_path);
                    }
                }
                Extracted::Snippet(snippet) => {
                    content.sequence.push(SequenceElement::Code {
                        index: content.snippets.len(),
                    });
                    content.snippets.push(snippet);
                }
                Extracted::Dropped(warning) => {
                    log::warn!("{warning}");
                    ctx.warnings.push(warning);
                }
            }
        }
        BlockKind::Opaque(text) => push_paragraph(content, text.clone()),
        BlockKind::Heading { .. } | BlockKind::Divider => {}
    }
}

fn push_list(content: &mut Content, node: &ListNode, ctx: &mut Context<'_>) {
    let list = list::structure(node, ctx);
    content.sequence.push(SequenceElement::List {
        index: content.lists.len(),
    });
    content.lists.push(list);
}

fn push_quote(content: &mut Content, blocks: &[Block], ctx: &mut Context<'_>) {
    let quote = build_content(blocks, ctx);
    content.sequence.push(SequenceElement::Quote {
        index: content.quotes.len(),
    });
    content.quotes.push(quote);
}

fn push_paragraph(content: &mut Content, text: String) {
    content.sequence.push(SequenceElement::Paragraph {
        index: content.paragraphs.len(),
    });
    content.paragraphs.push(text);
}

fn push_media(content: &mut Content, media: Media) {
    let kind = Bucket::of(&media);
    let bucket = match kind {
        Bucket::Images => &mut content.images,
        Bucket::Icons => &mut content.icons,
        Bucket::Videos => &mut content.videos,
    };
    let index = bucket.len();
    bucket.push(media);
    content.sequence.push(SequenceElement::media(kind, index));
}
