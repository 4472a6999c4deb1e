//! Inline attribute blocks: the `{...}` suffix after a link or image.
//!
//! ```text
//! ![Team](team.jpg){role=banner .wide #hero loading=lazy alt="Our team"}
//! ```
//!
//! Tokens are whitespace separated and order independent:
//! - `key=value` and `key="quoted value"` (single quotes work too)
//! - `.name` appends to the `class` list
//! - `#name` sets `id`
//! - a bare word is the boolean `true`
//!
//! Unquoted values stop at the first whitespace, so `{alt=A photo}` yields
//! `alt="A"` and `photo=true`. Malformed tokens are dropped; an unterminated
//! quote discards the whole block.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub type Attributes = BTreeMap<String, AttrValue>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttrValue {
    Bool(bool),
    String(String),
    List(Vec<String>),
}

impl AttrValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Render the value the way it would appear in an HTML attribute.
    pub fn to_attr_string(&self) -> String {
        match self {
            Self::Bool(b) => b.to_string(),
            Self::String(s) => s.clone(),
            Self::List(items) => items.join(" "),
        }
    }
}

impl From<&str> for AttrValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

/// Split an attribute block off the start of `text`.
///
/// Returns the parsed attributes and the text after the closing brace, or
/// `None` when `text` does not open with `{` or the brace is never closed.
pub fn split_suffix(text: &str) -> Option<(Attributes, &str)> {
    let body = text.strip_prefix('{')?;
    let close = find_closing_brace(body)?;
    Some((parse(&body[..close]), &body[close + 1..]))
}

fn find_closing_brace(body: &str) -> Option<usize> {
    let mut quote: Option<char> = None;
    let mut escaped = false;
    for (i, c) in body.char_indices() {
        match (quote, c) {
            (Some(_), _) if escaped => escaped = false,
            (Some(_), '\\') => escaped = true,
            (Some(q), c) if c == q => quote = None,
            (Some(_), _) => {}
            (None, '"' | '\'') => quote = Some(c),
            (None, '}') => return Some(i),
            (None, _) => {}
        }
    }
    None
}

/// Parse the text between the braces of an attribute block.
pub fn parse(input: &str) -> Attributes {
    let mut attrs = Attributes::new();
    let mut classes: Vec<String> = Vec::new();
    let mut chars = input.char_indices().peekable();

    while let Some(&(start, c)) = chars.peek() {
        if c.is_whitespace() {
            chars.next();
            continue;
        }

        match c {
            '.' | '#' => {
                chars.next();
                let name = take_word(input, &mut chars, start + 1);
                if !is_valid_name(name) {
                    continue;
                }
                if c == '.' {
                    classes.push(name.to_string());
                } else {
                    attrs.insert("id".to_string(), AttrValue::from(name));
                }
            }
            _ => {
                let key_end = loop {
                    match chars.peek() {
                        Some(&(i, ch)) if ch.is_whitespace() || ch == '=' => break i,
                        Some(_) => {
                            chars.next();
                        }
                        None => break input.len(),
                    }
                };
                let key = &input[start..key_end];
                let has_value = matches!(chars.peek(), Some((_, '=')));
                let value = if has_value {
                    chars.next();
                    match chars.peek() {
                        Some(&(i, q @ ('"' | '\''))) => {
                            chars.next();
                            match take_quoted(&mut chars, q) {
                                Some(v) => Some(v),
                                // Unterminated quote: the block is unusable
                                None => {
                                    log::debug!("unterminated quote in attribute block at byte {i}");
                                    return Attributes::new();
                                }
                            }
                        }
                        Some(&(i, ch)) if !ch.is_whitespace() => {
                            Some(take_word(input, &mut chars, i).to_string())
                        }
                        // `key=` with nothing after it
                        _ => None,
                    }
                } else {
                    None
                };

                if !is_valid_name(key) || (has_value && value.is_none()) {
                    continue;
                }
                match value {
                    Some(v) if key == "class" => {
                        classes.extend(v.split_whitespace().map(str::to_string))
                    }
                    Some(v) => {
                        attrs.insert(key.to_string(), AttrValue::String(v));
                    }
                    None => {
                        attrs.insert(key.to_string(), AttrValue::Bool(true));
                    }
                }
            }
        }
    }

    if !classes.is_empty() {
        attrs.insert("class".to_string(), AttrValue::List(classes));
    }
    attrs
}

/// Consume up to the next whitespace; `from` is the byte offset of the
/// first character still in `chars`.
fn take_word<'s>(
    input: &'s str,
    chars: &mut std::iter::Peekable<std::str::CharIndices<'_>>,
    from: usize,
) -> &'s str {
    let mut end = input.len();
    while let Some(&(i, ch)) = chars.peek() {
        if ch.is_whitespace() {
            end = i;
            break;
        }
        chars.next();
    }
    input.get(from..end).unwrap_or_default()
}

fn take_quoted(
    chars: &mut std::iter::Peekable<std::str::CharIndices<'_>>,
    quote: char,
) -> Option<String> {
    let mut value = String::new();
    let mut escaped = false;
    for (_, ch) in chars.by_ref() {
        if escaped {
            value.push(ch);
            escaped = false;
        } else if ch == '\\' {
            escaped = true;
        } else if ch == quote {
            return Some(value);
        } else {
            value.push(ch);
        }
    }
    None
}

fn is_valid_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_alphabetic() || first == '_' => chars
            .all(|c| c.is_alphanumeric() || matches!(c, '-' | '_' | ':')),
        _ => false,
    }
}
