//! A content file: YAML frontmatter plus a parsed markdown body.

use crate::config::ParserConfig;
use crate::content::Content;
use crate::data::yaml_to_json;
use crate::error::{Error, Result};
use crate::parse::{Parser, default_opts};
use crate::warning::ParseWarning;
use pulldown_cmark::{Event, MetadataBlockKind, Options, Tag, TagEnd};
use serde::Serialize;
use serde_json::{Map, Value as JsonValue};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Document {
    /// Frontmatter mapping, empty when the file has none
    pub frontmatter: Map<String, JsonValue>,
    pub content: Content,
    pub warnings: Vec<ParseWarning>,
}

impl Document {
    pub fn from_source(source: &str, source_path: &str, config: &ParserConfig) -> Result<Self> {
        let (frontmatter, body) = split_frontmatter(source);
        let frontmatter = match frontmatter {
            Some(yaml) => parse_frontmatter(&yaml, source_path)?,
            None => Map::new(),
        };
        let parsed = Parser::new(config.clone()).parse(body, source_path);
        Ok(Self {
            frontmatter,
            content: parsed.content,
            warnings: parsed.warnings,
        })
    }

    pub fn from_path(path: &Path, config: &ParserConfig) -> Result<Self> {
        let source = std::fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_source(&source, &path.to_string_lossy(), config)
    }
}

/// Split a leading `---` YAML block from the body.
///
/// Returns the YAML text (without fences) and the remaining body.
pub fn split_frontmatter(source: &str) -> (Option<String>, &str) {
    let opts = default_opts() | Options::ENABLE_YAML_STYLE_METADATA_BLOCKS;
    let mut events = pulldown_cmark::Parser::new_ext(source, opts).into_offset_iter();

    let Some((Event::Start(Tag::MetadataBlock(MetadataBlockKind::YamlStyle)), _)) = events.next()
    else {
        return (None, source);
    };

    let mut yaml = String::new();
    for (event, range) in events {
        match event {
            Event::Text(text) => yaml.push_str(&text),
            Event::End(TagEnd::MetadataBlock(_)) => {
                return (Some(yaml), source[range.end..].trim_start_matches(['\r', '\n']));
            }
            _ => {}
        }
    }
    (None, source)
}

fn parse_frontmatter(yaml: &str, source_path: &str) -> Result<Map<String, JsonValue>> {
    let mapping: Option<serde_yaml::Mapping> =
        serde_yaml::from_str(yaml).map_err(|source| Error::Frontmatter {
            path: source_path.to_string(),
            source,
        })?;
    match mapping.map(|m| yaml_to_json(serde_yaml::Value::Mapping(m))) {
        Some(JsonValue::Object(map)) => Ok(map),
        _ => Ok(Map::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_split() {
        let source = "---\ntitle: Home\ntags: [a, b]\n---\n\n# Welcome\n";
        let (yaml, body) = split_frontmatter(source);
        assert_eq!(yaml.as_deref(), Some("title: Home\ntags: [a, b]\n"));
        assert_eq!(body, "# Welcome\n");
    }

    #[test]
    fn test_no_frontmatter() {
        let source = "# Welcome\n\n---\n\nafter: rule\n";
        assert_eq!(split_frontmatter(source), (None, source));
    }

    #[test]
    fn test_document() {
        let source = "---\ntype: hero\ncount: 3\n---\n# Welcome\n\nHello\n";
        let doc = Document::from_source(source, "home.md", &ParserConfig::default()).unwrap();
        assert_eq!(
            JsonValue::Object(doc.frontmatter),
            json!({"type": "hero", "count": 3})
        );
        assert_eq!(doc.content.title, "Welcome");
        assert_eq!(doc.content.paragraphs, vec!["Hello"]);
    }

    #[test]
    fn test_bad_frontmatter() {
        let source = "---\n- just\n- a list\n---\nBody\n";
        let err = Document::from_source(source, "bad.md", &ParserConfig::default()).unwrap_err();
        assert!(matches!(err, Error::Frontmatter { ref path, .. } if path == "bad.md"));
    }

    #[test]
    fn test_missing_file() {
        let err = Document::from_path(Path::new("does/not/exist.md"), &ParserConfig::default())
            .unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
    }
}
