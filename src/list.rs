use crate::content::{ListBlock, ListStyle};
use crate::group::{self, Context};
use crate::scan::ListNode;

/// Turn a scanned list into a `ListBlock`, building each item as a full
/// content value. Nested lists recurse through the item builder.
pub fn structure(node: &ListNode, ctx: &mut Context<'_>) -> ListBlock {
    ListBlock {
        style: if node.start.is_some() {
            ListStyle::Ordered
        } else {
            ListStyle::Bullet
        },
        start: node.start,
        items: node
            .items
            .iter()
            .map(|blocks| group::build_content(blocks, ctx))
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ParserConfig;
    use crate::scan::{BlockKind, scan};
    use pretty_assertions::assert_eq;

    fn structure_first(body: &str) -> ListBlock {
        let config = ParserConfig::default();
        let blocks = scan(body, &config);
        let Some(BlockKind::List(node)) = blocks.first().map(|b| &b.kind) else {
            panic!("expected a list");
        };
        let mut ctx = Context::new(&config, "list.md");
        structure(node, &mut ctx)
    }

    #[test]
    fn test_bullet_items() {
        let list = structure_first("- one\n- two *em*\n");
        assert_eq!(list.style, ListStyle::Bullet);
        assert_eq!(list.start, None);
        assert_eq!(list.items.len(), 2);
        assert_eq!(list.items[0].paragraphs, vec!["one"]);
        assert_eq!(list.items[1].paragraphs, vec!["two <em>em</em>"]);
    }

    #[test]
    fn test_ordered_start() {
        let list = structure_first("3. three\n4. four\n");
        assert_eq!(list.style, ListStyle::Ordered);
        assert_eq!(list.start, Some(3));
        assert_eq!(list.items.len(), 2);
    }

    #[test]
    fn test_nested_list() {
        let list = structure_first("- outer\n  - inner a\n  - inner b\n");
        assert_eq!(list.items.len(), 1);
        let outer = &list.items[0];
        assert_eq!(outer.paragraphs, vec!["outer"]);
        assert_eq!(outer.lists.len(), 1);
        assert_eq!(outer.lists[0].items.len(), 2);
        assert_eq!(outer.lists[0].items[1].paragraphs, vec!["inner b"]);
    }

    #[test]
    fn test_item_with_link() {
        let list = structure_first("- [Docs](/docs)\n");
        let item = &list.items[0];
        assert!(item.paragraphs.is_empty());
        assert_eq!(item.links[0].href, "/docs");
    }
}
