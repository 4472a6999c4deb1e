//! Immutable per-invocation parser configuration.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Heading slot names every [`Content`](crate::Content) carries.
pub const HEADING_SLOTS: [&str; 4] = ["pretitle", "title", "subtitle", "subtitle2"];

/// Vocabulary the parser recognizes.
///
/// Loaded from YAML with every key optional:
///
/// ```yaml
/// image-roles: [image, banner, gallery, background, hero]
/// icon-libraries: [lu, fa]
/// max-nesting: 32
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct ParserConfig {
    /// Media roles routed to `images`; `icon` and `video` are built in
    pub image_roles: Vec<String>,
    /// Icon library prefixes, as in `![](lu:house)` or `![](icon:fa-star)`
    pub icon_libraries: Vec<String>,
    /// Quotes and lists nested deeper than this are flattened into their
    /// parent
    pub max_nesting: usize,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            image_roles: ["image", "banner", "gallery", "background"]
                .into_iter()
                .map(String::from)
                .collect(),
            icon_libraries: [
                "ai", "bi", "bs", "fa", "fa6", "fi", "hi", "hi2", "io", "io5",
                "lu", "md", "pi", "ri", "si", "tb",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
            max_nesting: 64,
        }
    }
}

impl ParserConfig {
    pub fn from_yaml(source: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(source)?)
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let source = std::fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml(&source)
    }

    pub fn heading_slots(&self) -> &'static [&'static str] {
        &HEADING_SLOTS
    }

    pub fn is_image_role(&self, role: &str) -> bool {
        self.image_roles.iter().any(|r| r == role)
    }

    pub fn is_icon_library(&self, library: &str) -> bool {
        self.icon_libraries.iter().any(|l| l == library)
    }
}
