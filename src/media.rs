//! Media role resolution: decide whether an image node is an image, an icon
//! or a video.
//!
//! Precedence is explicit `role=` attribute, then the legacy URL prefix
//! (`icon:`, `video:`, or a configured icon library such as `lu:house`),
//! then `image`.

use crate::attrs::{AttrValue, Attributes};
use crate::config::ParserConfig;
use crate::content::Media;

pub const ICON: &str = "icon";
pub const VIDEO: &str = "video";
pub const IMAGE: &str = "image";

/// An image as scanned, before its role is known.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImageNode {
    pub url: String,
    pub alt: String,
    /// Markdown title, `![alt](url "title")`
    pub title: String,
    pub attributes: Attributes,
    /// Set when the image is the whole label of a link
    pub href: Option<String>,
    pub target: Option<String>,
}

/// The `Content` sequence a media node belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bucket {
    Images,
    Icons,
    Videos,
}

impl Bucket {
    pub fn of(media: &Media) -> Self {
        match media.role.as_str() {
            ICON => Self::Icons,
            VIDEO => Self::Videos,
            _ => Self::Images,
        }
    }
}

pub fn resolve(node: ImageNode, config: &ParserConfig) -> Media {
    let ImageNode {
        url,
        alt,
        title,
        mut attributes,
        href,
        target,
    } = node;

    let explicit_role = take_string(&mut attributes, "role");
    let prefixed = split_prefix(&url).map(|(role, rest)| (role, rest.to_string()));
    let (prefix_role, url) = match prefixed {
        Some((role, rest)) => (Some(role), rest),
        None if icon_reference(&url, ':', config).is_some() => (Some(ICON), url),
        None => (None, url),
    };

    let role = match explicit_role {
        Some(role) => role,
        None => prefix_role.unwrap_or(IMAGE).to_string(),
    };
    let role = if role == ICON || role == VIDEO || config.is_image_role(&role) {
        role
    } else {
        log::debug!("unknown media role `{role}` for {url}, treating as image");
        IMAGE.to_string()
    };

    if role == ICON {
        let reference = icon_reference(&url, ':', config)
            .or_else(|| icon_reference(&url, '-', config));
        if let Some((library, name)) = reference {
            attributes
                .entry("library".to_string())
                .or_insert_with(|| AttrValue::from(library));
            attributes
                .entry("name".to_string())
                .or_insert_with(|| AttrValue::from(name));
        }
    }

    if !title.is_empty() {
        attributes
            .entry("title".to_string())
            .or_insert(AttrValue::String(title));
    }

    let alt = take_string(&mut attributes, "alt").unwrap_or(alt);
    let href = take_string(&mut attributes, "href").or(href);
    let target = take_string(&mut attributes, "target").or(target);

    Media {
        url,
        alt,
        role,
        attributes,
        href,
        target,
    }
}

fn take_string(attributes: &mut Attributes, key: &str) -> Option<String> {
    match attributes.remove(key)? {
        AttrValue::String(s) => Some(s),
        other => {
            // `{role}` or `{href}` with no value carries no information
            log::debug!("ignoring non-string `{key}` attribute: {other:?}");
            None
        }
    }
}

fn split_prefix(url: &str) -> Option<(&'static str, &str)> {
    if let Some(rest) = url.strip_prefix("icon:") {
        Some((ICON, rest))
    } else {
        url.strip_prefix("video:").map(|rest| (VIDEO, rest))
    }
}

/// `lu:house` / `lu-house` when `lu` is a configured icon library.
fn icon_reference<'u>(
    url: &'u str,
    separator: char,
    config: &ParserConfig,
) -> Option<(&'u str, &'u str)> {
    let (library, name) = url.split_once(separator)?;
    (config.is_icon_library(library) && !name.is_empty()).then_some((library, name))
}
