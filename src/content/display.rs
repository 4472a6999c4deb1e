use super::types::{Content, HeadingText};
use std::fmt::Display;

impl Display for HeadingText {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.lines().join(" / "))
    }
}

impl Display for Content {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.fmt_with_indent(f, 0)
    }
}

impl Content {
    /// Outline of the non-empty fields, one per line.
    fn fmt_with_indent(&self, f: &mut std::fmt::Formatter<'_>, indent: usize) -> std::fmt::Result {
        let pad = "  ".repeat(indent);

        let slots = [
            ("pretitle", &self.pretitle),
            ("title", &self.title),
            ("subtitle", &self.subtitle),
            ("subtitle2", &self.subtitle2),
        ];
        for (name, text) in slots {
            if !text.is_empty() {
                writeln!(f, "{pad}{name}: {text}")?;
            }
        }
        if !self.headings.is_empty() {
            writeln!(f, "{pad}headings: {}", self.headings.join(" / "))?;
        }

        let counts = [
            ("paragraphs", self.paragraphs.len()),
            ("links", self.links.len()),
            ("images", self.images.len()),
            ("icons", self.icons.len()),
            ("videos", self.videos.len()),
            ("lists", self.lists.len()),
            ("quotes", self.quotes.len()),
            ("snippets", self.snippets.len()),
        ];
        for (name, count) in counts {
            if count > 0 {
                writeln!(f, "{pad}{name}: {count}")?;
            }
        }

        if !self.data.is_empty() {
            let keys: Vec<&str> = self.data.keys().map(String::as_str).collect();
            writeln!(f, "{pad}data: {}", keys.join(", "))?;
        }

        for (i, item) in self.items.iter().enumerate() {
            writeln!(f, "{pad}item {}:", i + 1)?;
            item.fmt_with_indent(f, indent + 1)?;
        }
        Ok(())
    }
}
