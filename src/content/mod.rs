mod display;
mod types;

pub use types::{Content, HeadingText, Link, ListBlock, ListStyle, Media, Snippet};
