use crate::ast::Position;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WarningKind {
    /// A `yaml:tag` / `json:tag` block whose payload did not parse
    MalformedDataBlock,
}

/// A recoverable problem found while parsing one content unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParseWarning {
    pub kind: WarningKind,
    pub source_path: String,
    /// Data tag of the offending block
    pub tag: String,
    pub position: Position,
    pub message: String,
}

impl Display for ParseWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}:{}: data block `{}` skipped: {}",
            self.source_path, self.position, self.tag, self.message
        )
    }
}
