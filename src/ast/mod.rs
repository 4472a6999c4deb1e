//! Define the AST for the Markdown

mod node;
mod tree;


// Re-export public types
pub use node::{Node, NodeKind, Position};
pub use tree::{LineIndex, Tree};
