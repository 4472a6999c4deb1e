//! Tagged data blocks: fenced code whose info string is `yaml:<tag>` or
//! `json:<tag>` is parsed into `content.data[tag]`. Other fenced code is kept
//! for display as a snippet.

use crate::ast::Position;
use crate::content::Snippet;
use crate::warning::{ParseWarning, WarningKind};
use serde_json::Value as JsonValue;
use serde_yaml::Value as YamlValue;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataFormat {
    Yaml,
    Json,
}

#[derive(Debug, thiserror::Error)]
pub enum DataBlockError {
    #[error("invalid YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Outcome of looking at one fenced code block.
#[derive(Debug, Clone, PartialEq)]
pub enum Extracted {
    Data { tag: String, value: JsonValue },
    Snippet(Snippet),
    Dropped(ParseWarning),
}

/// `yaml:config` -> (`Yaml`, `config`). Only the first word of the info
/// string is considered.
pub fn parse_info(info: &str) -> Option<(DataFormat, &str)> {
    let word = info.split_whitespace().next()?;
    let (format, tag) = word.split_once(':')?;
    if tag.is_empty() {
        return None;
    }
    let format = match format {
        "yaml" => DataFormat::Yaml,
        "json" => DataFormat::Json,
        _ => return None,
    };
    Some((format, tag))
}

pub fn parse_payload(format: DataFormat, code: &str) -> Result<JsonValue, DataBlockError> {
    let value = match format {
        DataFormat::Yaml => yaml_to_json(serde_yaml::from_str::<YamlValue>(code)?),
        DataFormat::Json => serde_json::from_str(code)?,
    };
    Ok(value)
}

pub fn extract(info: &str, code: &str, position: Position, source_path: &str) -> Extracted {
    let Some((format, tag)) = parse_info(info) else {
        return Extracted::Snippet(Snippet {
            language: info.split_whitespace().next().unwrap_or_default().to_string(),
            code: code.to_string(),
        });
    };

    match parse_payload(format, code) {
        Ok(value) => Extracted::Data {
            tag: tag.to_string(),
            value,
        },
        Err(err) => Extracted::Dropped(ParseWarning {
            kind: WarningKind::MalformedDataBlock,
            source_path: source_path.to_string(),
            tag: tag.to_string(),
            position,
            message: err.to_string(),
        }),
    }
}

/// Convert a YAML value into the JSON value model.
///
/// Non-string mapping keys are stringified and YAML tags are dropped.
pub fn yaml_to_json(value: YamlValue) -> JsonValue {
    match value {
        YamlValue::Null => JsonValue::Null,
        YamlValue::Bool(b) => JsonValue::Bool(b),
        YamlValue::Number(n) => {
            if let Some(u) = n.as_u64() {
                JsonValue::from(u)
            } else if let Some(i) = n.as_i64() {
                JsonValue::from(i)
            } else {
                n.as_f64()
                    .and_then(serde_json::Number::from_f64)
                    .map_or(JsonValue::Null, JsonValue::Number)
            }
        }
        YamlValue::String(s) => JsonValue::String(s),
        YamlValue::Sequence(seq) => JsonValue::Array(seq.into_iter().map(yaml_to_json).collect()),
        YamlValue::Mapping(map) => JsonValue::Object(
            map.into_iter()
                .map(|(k, v)| (key_string(k), yaml_to_json(v)))
                .collect(),
        ),
        YamlValue::Tagged(tagged) => yaml_to_json(tagged.value),
    }
}

fn key_string(key: YamlValue) -> String {
    match key {
        YamlValue::String(s) => s,
        YamlValue::Bool(b) => b.to_string(),
        YamlValue::Number(n) => n.to_string(),
        YamlValue::Null => "null".to_string(),
        other => yaml_to_json(other).to_string(),
    }
}
