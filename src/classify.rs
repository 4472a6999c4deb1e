//! Heading classification by relative importance.
//!
//! A single pass over the blocks of one scope, driven by an explicit state
//! machine: [`step`] takes the current [`Phase`] and the next [`Input`] and
//! returns the next phase with the [`Action`] to apply. No state outlives a
//! call to [`run`].
//!
//! ```text
//! ### Welcome        -> title, then demoted to pretitle
//! # Build faster     -> title (more important than the heading before it)
//! ## With less code  -> subtitle
//! ```

use crate::data;
use crate::scan::{Block, BlockKind};

/// Heading slots in order of decreasing importance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    Title,
    Subtitle,
    Subtitle2,
    /// `headings[]`
    Overflow,
}

impl Slot {
    fn next(self) -> Self {
        match self {
            Slot::Title => Slot::Subtitle,
            Slot::Subtitle => Slot::Subtitle2,
            Slot::Subtitle2 | Slot::Overflow => Slot::Overflow,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Phase {
    /// Nothing seen yet
    #[default]
    Start,
    /// Only headings so far; `level` is that of the most recent slot
    Header {
        slot: Slot,
        level: u8,
        /// The title already pushed an earlier heading into `pretitle`
        promoted: bool,
    },
    /// Body content has been emitted
    Body,
}

/// What the classifier needs to know about a block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    Heading(u8),
    Divider,
    Content,
    /// Tagged data blocks: neither content nor a boundary
    Inert,
}

impl Input {
    pub fn of(block: &Block) -> Self {
        match &block.kind {
            BlockKind::Heading { level, .. } => Input::Heading(*level),
            BlockKind::Divider => Input::Divider,
            BlockKind::Code { info, .. } if data::parse_info(info).is_some() => Input::Inert,
            _ => Input::Content,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Fill a slot with the heading
    Assign(Slot),
    /// Append the heading to the slot it shares a level with
    Merge(Slot),
    /// Move the current title to `pretitle`; the heading becomes the title
    Promote,
    Content,
    Inert,
    /// Start a new item
    Boundary,
}

pub fn step(phase: Phase, input: Input) -> (Phase, Action) {
    match (phase, input) {
        (_, Input::Divider) => (phase, Action::Boundary),
        (_, Input::Inert) => (phase, Action::Inert),
        (Phase::Start, Input::Heading(level)) => (
            Phase::Header {
                slot: Slot::Title,
                level,
                promoted: false,
            },
            Action::Assign(Slot::Title),
        ),
        (
            Phase::Header {
                slot,
                level: current,
                promoted,
            },
            Input::Heading(level),
        ) => {
            if level == current {
                (phase, Action::Merge(slot))
            } else if level < current {
                if slot == Slot::Title && !promoted {
                    (
                        Phase::Header {
                            slot: Slot::Title,
                            level,
                            promoted: true,
                        },
                        Action::Promote,
                    )
                } else {
                    (phase, Action::Boundary)
                }
            } else {
                let slot = slot.next();
                (
                    Phase::Header {
                        slot,
                        level,
                        promoted,
                    },
                    Action::Assign(slot),
                )
            }
        }
        (Phase::Body, Input::Heading(_)) => (phase, Action::Boundary),
        (_, Input::Content) => (Phase::Body, Action::Content),
    }
}

/// Classify blocks up to, not including, the first item boundary.
///
/// The returned actions line up with `blocks`; their count is the index of
/// the boundary (or `blocks.len()` when there is none).
pub fn run(blocks: &[Block]) -> Vec<Action> {
    let mut phase = Phase::Start;
    let mut actions = Vec::with_capacity(blocks.len());
    for block in blocks {
        let (next, action) = step(phase, Input::of(block));
        if action == Action::Boundary {
            log::debug!("item boundary at {}", block.position);
            break;
        }
        phase = next;
        actions.push(action);
    }
    actions
}
