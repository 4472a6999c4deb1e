//! Behavioural properties of the content parser.

use mdcontent::{
    Content, Entry, HeadingText, Link, ListStyle, ParserConfig, Parser, SequenceElement,
    parse_content,
};
use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::{Value, json};

fn parse(body: &str) -> Content {
    parse_content(body, "test.md", &ParserConfig::default())
}

const FIELDS: [&str; 16] = [
    "pretitle",
    "title",
    "subtitle",
    "subtitle2",
    "headings",
    "paragraphs",
    "links",
    "images",
    "icons",
    "videos",
    "lists",
    "quotes",
    "snippets",
    "data",
    "items",
    "sequence",
];

fn assert_complete(value: &Value) {
    let object = value.as_object().expect("content serializes as an object");
    for field in FIELDS {
        let field_value = &object[field];
        assert!(!field_value.is_null(), "`{field}` is null in {value}");
    }
    for item in object["items"].as_array().unwrap() {
        assert_complete(item);
    }
}

// Totality and determinism
// ====================

#[rstest]
#[case::empty("")]
#[case::whitespace("   \n\n\t\n")]
#[case::only_divider("---")]
#[case::unclosed_fence("```yaml:x\na: [1,\n")]
#[case::broken_attrs("![](a.png){alt=\"oops [x](/y){.")]
#[case::deep_headings("###### a\n##### b\n#### c\n### d\n## e\n# f")]
#[case::html("<div>\n  raw\n</div>\n\n<span>inline</span> text")]
#[case::table("| a |\n|---|\n| 1 |")]
#[case::nested_quotes("> > > deep\n> back\n")]
fn test_every_field_is_present(#[case] body: &str) {
    let value = serde_json::to_value(parse(body)).unwrap();
    assert_complete(&value);
}

#[test]
fn test_empty_input_gives_empty_content() {
    let content = parse("");
    assert_eq!(content, Content::new());
    assert_eq!(content.title, "");
}

#[test]
fn test_parsing_is_deterministic() {
    let body = std::fs::read_to_string("tests/data/content/landing.md").unwrap();
    let first = serde_json::to_string(&parse(&body)).unwrap();
    let second = serde_json::to_string(&parse(&body)).unwrap();
    assert_eq!(first, second);
}

// Headings
// ====================

#[test]
fn test_pretitle_rule() {
    let content = parse("### A\n# B\n## C");
    assert_eq!(content.pretitle, "A");
    assert_eq!(content.title, "B");
    assert_eq!(content.subtitle, "C");
    assert!(content.items.is_empty());
}

#[test]
fn test_pretitle_needs_more_important_heading() {
    let content = parse("# A\n## B");
    assert_eq!(content.pretitle, "");
    assert_eq!(content.title, "A");
    assert_eq!(content.subtitle, "B");
}

#[test]
fn test_multi_line_heading_merge() {
    let content = parse("# Build the future\n# with confidence");
    assert_eq!(
        content.title,
        HeadingText::from(vec!["Build the future", "with confidence"])
    );
    assert_eq!(
        serde_json::to_value(&content.title).unwrap(),
        json!(["Build the future", "with confidence"])
    );
}

#[test]
fn test_same_level_after_subtitle_starts_item() {
    let content = parse("# A\n## B\n# C");
    assert_eq!(content.title, "A");
    assert_eq!(content.subtitle, "B");
    assert_eq!(content.items.len(), 1);
    assert_eq!(content.items[0].title, "C");
}

// Items
// ====================

#[test]
fn test_item_boundary_after_content() {
    let content = parse(
        "# Title\n\nBody.\n\n### Card One\nText one.\n\n### Card Two\nText two.",
    );
    assert_eq!(content.title, "Title");
    assert_eq!(content.paragraphs, vec!["Body."]);
    assert_eq!(content.items.len(), 2);
    assert_eq!(content.items[0].title, "Card One");
    assert_eq!(content.items[0].paragraphs, vec!["Text one."]);
    assert_eq!(content.items[1].title, "Card Two");
    assert_eq!(content.items[1].paragraphs, vec!["Text two."]);
}

#[test]
fn test_divider_based_items() {
    let content = parse("# Team\n\n---\n\n**Sarah**\n\n---\n\n**Alex**");
    assert_eq!(content.title, "Team");
    assert_eq!(content.items.len(), 2);
    for (item, name) in content.items.iter().zip(["Sarah", "Alex"]) {
        assert!(item.title.is_empty());
        assert_eq!(item.paragraphs, vec![format!("<strong>{name}</strong>")]);
    }
}

#[test]
fn test_trailing_and_repeated_dividers_make_no_items() {
    let content = parse("# Team\n\n---\n\n---\n\nOnly\n\n---\n");
    assert_eq!(content.items.len(), 1);
    assert_eq!(content.items[0].paragraphs, vec!["Only"]);
}

// Links and media
// ====================

#[test]
fn test_link_only_paragraph_is_promoted() {
    let content = parse("[Get Started](/signup)");
    assert_eq!(
        content.links,
        vec![Link {
            href: "/signup".to_string(),
            label: "Get Started".to_string(),
            ..Default::default()
        }]
    );
    assert!(content.paragraphs.is_empty());
}

#[test]
fn test_inline_link_stays_in_paragraph() {
    let content = parse("Visit our [about](/about) page.");
    assert!(content.links.is_empty());
    assert_eq!(content.paragraphs.len(), 1);
    assert!(
        content.paragraphs[0].contains(r#"<a href="/about">about</a>"#),
        "{}",
        content.paragraphs[0]
    );
}

#[test]
fn test_icon_attaches_to_single_link() {
    let content = parse("![](icon.svg){role=icon} [Home](/)");
    assert!(content.icons.is_empty());
    assert_eq!(content.links.len(), 1);
    let icon = content.links[0].icon_before.as_ref().unwrap();
    assert_eq!(icon.url, "icon.svg");
    assert_eq!(icon.role, "icon");
}

#[test]
fn test_icon_stays_put_beside_two_links() {
    let content = parse("![](icon.svg){role=icon} [Home](/) [About](/about)");
    assert_eq!(content.icons.len(), 1);
    assert_eq!(content.links.len(), 2);
    assert!(
        content
            .links
            .iter()
            .all(|l| l.icon_before.is_none() && l.icon_after.is_none())
    );
}

#[test]
fn test_linked_image_keeps_href() {
    let content = parse("[![Logo](logo.png)](/ \"Home\"){target=_blank}");
    assert_eq!(content.images.len(), 1);
    assert_eq!(content.images[0].href.as_deref(), Some("/"));
    assert!(content.links.is_empty());
}

#[test]
fn test_unquoted_value_stops_at_whitespace() {
    let content = parse("![](a.png){alt=A photo}");
    let image = &content.images[0];
    assert_eq!(image.alt, "A");
    assert_eq!(image.attributes["photo"], mdcontent::attrs::AttrValue::Bool(true));
}

#[test]
fn test_video_role_from_prefix() {
    let content = parse("![Intro](video:/media/intro.mp4)");
    assert_eq!(content.videos.len(), 1);
    assert_eq!(content.videos[0].url, "/media/intro.mp4");
}

// Lists, quotes and code
// ====================

#[test]
fn test_ordered_list_items_are_content() {
    let content = parse("1. **One**\n2. [Two](/two)\n");
    let list = &content.lists[0];
    assert_eq!(list.style, ListStyle::Ordered);
    assert_eq!(list.start, Some(1));
    assert_eq!(list.items[0].paragraphs, vec!["<strong>One</strong>"]);
    assert_eq!(list.items[1].links[0].href, "/two");
}

#[test]
fn test_tagged_data_round_trip() {
    let yaml = parse("```yaml:config\nfoo: 1\n```\n");
    let json = parse("```json:config\n{\"foo\": 1}\n```\n");
    assert_eq!(yaml.data["config"], json!({"foo": 1}));
    assert_eq!(yaml.data, json.data);
    assert!(yaml.snippets.is_empty());
}

#[test]
fn test_malformed_data_block_is_reported() {
    let parsed = Parser::default().parse(
        "# T\n\n```json:broken\n{\"a\":\n```\n\nStill parsed.\n",
        "pages/t.md",
    );
    assert!(parsed.content.data.is_empty());
    assert_eq!(parsed.content.paragraphs, vec!["Still parsed."]);
    assert_eq!(parsed.warnings.len(), 1);
    let warning = &parsed.warnings[0];
    assert_eq!(warning.tag, "broken");
    assert_eq!(warning.source_path, "pages/t.md");
    assert_eq!(warning.position.line, 3);
}

// Sequence
// ====================

#[test]
fn test_sequence_covers_items() {
    let body = std::fs::read_to_string("tests/data/content/landing.md").unwrap();
    let doc = mdcontent::Document::from_source(&body, "landing.md", &ParserConfig::default())
        .unwrap();
    let content = &doc.content;

    assert_eq!(doc.frontmatter["type"], "hero");
    assert_eq!(content.pretitle, "Introducing");
    assert_eq!(
        content.title,
        HeadingText::from(vec!["Build the future", "with confidence"])
    );
    assert_eq!(content.subtitle, "Tools for teams that ship");
    assert_eq!(content.links[0].label, "Get Started");
    assert_eq!(content.links[0].role.as_deref(), Some("primary"));
    assert_eq!(
        content.links[0].icon_before.as_ref().map(|i| i.url.as_str()),
        Some("lu:rocket")
    );
    assert_eq!(content.images[0].role, "banner");
    assert_eq!(content.data["stats"], json!({"users": 1200, "uptime": 99.9}));
    assert_eq!(content.items.len(), 2);
    assert_eq!(content.items[1].lists[0].items.len(), 2);

    let types: Vec<&str> = content.sequence.iter().map(SequenceElement::type_name).collect();
    assert_eq!(
        types,
        vec![
            "heading", "heading", "heading", "heading", "paragraph", "link", "image", "data",
            "divider", "item", "item",
        ]
    );
    assert_eq!(content.sequence[9], SequenceElement::Item { index: 0 });
    assert_eq!(content.sequence[10], SequenceElement::Item { index: 1 });
    let item_types: Vec<&str> =
        content.items[1].sequence.iter().map(SequenceElement::type_name).collect();
    assert_eq!(item_types, vec!["heading", "list"]);

    let entries: Vec<Entry<'_>> = content.entries().collect();
    assert_eq!(entries.len(), content.sequence.len());
    assert_eq!(entries[5], Entry::Link(&content.links[0]));
    assert_eq!(entries[6], Entry::Media(&content.images[0]));
    assert_eq!(entries[10], Entry::Item(&content.items[1]));
}

#[test]
fn test_sequence_does_not_copy_nested_content() {
    let body = "> > > > > > > > > > > > > > > > quoted\n\n- a\n  - b\n    - c\n";
    let content = parse(body);
    let types: Vec<&str> = content.sequence.iter().map(SequenceElement::type_name).collect();
    assert_eq!(types, vec!["quote", "list"]);
    assert_eq!(
        serde_json::to_value(&content.sequence).unwrap(),
        json!([{"type": "quote", "index": 0}, {"type": "list", "index": 0}])
    );
}

// Nesting
// ====================

fn nested_list(depth: usize) -> String {
    (0..depth)
        .map(|d| format!("{}- level {d}\n", "  ".repeat(d)))
        .collect()
}

fn nested_quote(depth: usize) -> String {
    format!("{} deep\n", ">".repeat(depth))
}

#[test]
fn test_deeply_nested_list_keeps_its_levels() {
    let content = parse(&nested_list(40));
    let mut level = &content.lists[0];
    for d in 1..40 {
        let item = &level.items[0];
        assert_eq!(item.paragraphs, vec![format!("level {}", d - 1)]);
        level = &item.lists[0];
    }
    assert_eq!(level.items[0].paragraphs, vec!["level 39"]);
}

#[test]
fn test_very_deep_quotes_do_not_overflow() {
    let content = parse(&nested_quote(500));
    let json = serde_json::to_string(&content).unwrap();
    assert!(json.contains("deep"));
    assert_complete(&serde_json::to_value(&content).unwrap());
}

#[test]
fn test_nesting_past_limit_is_flattened() {
    let config = ParserConfig {
        max_nesting: 2,
        ..Default::default()
    };
    let content = parse_content(&nested_quote(6), "test.md", &config);
    let inner = &content.quotes[0].quotes[0];
    assert!(inner.quotes.is_empty());
    assert_eq!(inner.paragraphs, vec!["deep"]);
}

#[rstest]
#[case::list(nested_list as fn(usize) -> String)]
#[case::quote(nested_quote as fn(usize) -> String)]
fn test_output_grows_linearly_with_depth(#[case] body: fn(usize) -> String) {
    let size = |depth: usize| serde_json::to_string(&parse(&body(depth))).unwrap().len();
    let (ten, twenty, forty) = (size(10), size(20), size(40));
    assert!(twenty < 3 * ten, "depth 10: {ten} bytes, depth 20: {twenty} bytes");
    assert!(forty < 3 * twenty, "depth 20: {twenty} bytes, depth 40: {forty} bytes");
}

#[test]
fn test_icon_suffix_with_emphasis_in_alt() {
    let content = parse("![](a.png){alt=\"*nice* photo\" role=icon}");
    assert!(content.paragraphs.is_empty(), "{:?}", content.paragraphs);
    assert_eq!(content.icons.len(), 1);
    assert_eq!(content.icons[0].alt, "*nice* photo");
}

#[test]
fn test_content_outline() {
    let body = std::fs::read_to_string("tests/data/content/landing.md").unwrap();
    let doc = mdcontent::Document::from_source(&body, "landing.md", &ParserConfig::default())
        .unwrap();
    insta::assert_snapshot!(doc.content.to_string().trim_end(), @r"
    pretitle: Introducing
    title: Build the future / with confidence
    subtitle: Tools for teams that ship
    paragraphs: 1
    links: 1
    images: 1
    data: stats
    item 1:
      title: Fast
      paragraphs: 1
    item 2:
      title: Safe
      lists: 1
    ");
}
