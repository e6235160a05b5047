//! Owned HTML element tree built from the tree-sitter HTML grammar.
//!
//! The grammar gives a concrete syntax tree (`element` → `start_tag`,
//! children, `end_tag`). This module walks it once and keeps only what the
//! extractors query: tag names, attributes, text and raw script bodies.

use ast_grep_core::Node;
use ast_grep_language::{LanguageExt, SupportLang};

/// An HTML attribute: `(name, optional_value)`.
type HtmlAttr = (String, Option<String>);

/// A parsed HTML document. The root is a synthetic `#document` element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HtmlDocument {
    root: Element,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    tag: String,
    attrs: Vec<HtmlAttr>,
    children: Vec<HtmlNode>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum HtmlNode {
    Element(Element),
    /// Entity-decoded text, padded with a single space on each side where
    /// the source had whitespace.
    Text(String),
    /// Verbatim body of a `<script>` or `<style>` element.
    Raw(String),
}

impl HtmlDocument {
    #[must_use]
    pub fn parse(source: &str) -> Self {
        let tree = SupportLang::Html.ast_grep(source);
        let mut root = Element {
            tag: "#document".to_string(),
            attrs: Vec::new(),
            children: Vec::new(),
        };
        collect_children(&tree.root(), source, &mut root.children);
        Self { root }
    }

    #[must_use]
    pub const fn root(&self) -> &Element {
        &self.root
    }

    /// Whitespace-normalized text of the whole document.
    #[must_use]
    pub fn text_content(&self) -> String {
        self.root.text_content()
    }
}

impl Element {
    #[must_use]
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Value of attribute `name`. Valueless attributes yield `None`.
    #[must_use]
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .and_then(|(_, v)| v.as_deref())
    }

    /// Whether attribute `name` is present, with or without a value.
    #[must_use]
    pub fn has_attr(&self, name: &str) -> bool {
        self.attrs.iter().any(|(n, _)| n.eq_ignore_ascii_case(name))
    }

    pub fn classes(&self) -> impl Iterator<Item = &str> {
        self.attr("class").unwrap_or_default().split_whitespace()
    }

    #[must_use]
    pub fn has_class(&self, class: &str) -> bool {
        self.classes().any(|c| c == class)
    }

    /// Direct child elements, in document order.
    pub fn child_elements(&self) -> impl Iterator<Item = &Self> {
        self.children.iter().filter_map(|child| match child {
            HtmlNode::Element(element) => Some(element),
            _ => None,
        })
    }

    /// All descendant elements matching `predicate`, in document order.
    pub fn find_all<P>(&self, predicate: P) -> Vec<&Self>
    where
        P: Fn(&Self) -> bool,
    {
        let mut found = Vec::new();
        self.walk(&predicate, &mut found);
        found
    }

    /// First descendant element matching `predicate`.
    pub fn find_first<P>(&self, predicate: P) -> Option<&Self>
    where
        P: Fn(&Self) -> bool,
    {
        self.first_match(&predicate)
    }

    /// Descendants carrying `class` among their class tokens.
    #[must_use]
    pub fn by_class(&self, class: &str) -> Vec<&Self> {
        self.find_all(|el| el.has_class(class))
    }

    /// Descendants with tag name `tag` (lowercase).
    #[must_use]
    pub fn by_tag(&self, tag: &str) -> Vec<&Self> {
        self.find_all(|el| el.tag == tag)
    }

    /// Text of this element and its descendants with runs of whitespace
    /// collapsed and the ends trimmed. Script and style bodies are skipped.
    #[must_use]
    pub fn text_content(&self) -> String {
        let mut raw = String::new();
        self.push_text(&mut raw);
        raw.split_whitespace().collect::<Vec<_>>().join(" ")
    }

    /// Verbatim script/style body. Empty for other elements.
    #[must_use]
    pub fn raw_text(&self) -> String {
        self.children
            .iter()
            .filter_map(|child| match child {
                HtmlNode::Raw(text) => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    fn walk<'a, P>(&'a self, predicate: &P, found: &mut Vec<&'a Self>)
    where
        P: Fn(&Self) -> bool,
    {
        for child in self.child_elements() {
            if predicate(child) {
                found.push(child);
            }
            child.walk(predicate, found);
        }
    }

    fn first_match<P>(&self, predicate: &P) -> Option<&Self>
    where
        P: Fn(&Self) -> bool,
    {
        self.child_elements().find_map(|child| {
            if predicate(child) {
                Some(child)
            } else {
                child.first_match(predicate)
            }
        })
    }

    fn push_text(&self, out: &mut String) {
        for child in &self.children {
            match child {
                HtmlNode::Element(element) => element.push_text(out),
                HtmlNode::Text(text) => out.push_str(text),
                HtmlNode::Raw(_) => {}
            }
        }
    }
}

// ── tree conversion ────────────────────────────────────────────────

fn collect_children<D: ast_grep_core::Doc>(node: &Node<D>, source: &str, out: &mut Vec<HtmlNode>) {
    for child in node.children() {
        match child.kind().as_ref() {
            "element" | "script_element" | "style_element" => {
                if let Some(element) = build_element(&child, source) {
                    out.push(HtmlNode::Element(element));
                }
            }
            "raw_text" => out.push(HtmlNode::Raw(child.text().to_string())),
            "text" | "entity" => out.push(HtmlNode::Text(padded_text(&child, source))),
            "start_tag" | "end_tag" | "self_closing_tag" | "erroneous_end_tag" | "comment"
            | "doctype" => {}
            // ERROR recovery nodes and any wrapper we do not model
            _ => collect_children(&child, source, out),
        }
    }
}

fn build_element<D: ast_grep_core::Doc>(node: &Node<D>, source: &str) -> Option<Element> {
    let (tag, attrs) = extract_tag_info(node)?;
    let mut children = Vec::new();
    collect_children(node, source, &mut children);
    Some(Element {
        tag: tag.to_ascii_lowercase(),
        attrs,
        children,
    })
}

/// Extract tag name and attributes from an element's `start_tag`.
fn extract_tag_info<D: ast_grep_core::Doc>(node: &Node<D>) -> Option<(String, Vec<HtmlAttr>)> {
    let tag = node
        .children()
        .find(|c| matches!(c.kind().as_ref(), "start_tag" | "self_closing_tag"))?;
    let tag_name = tag
        .children()
        .find(|c| c.kind().as_ref() == "tag_name")?
        .text()
        .to_string();
    Some((tag_name, extract_attrs_from_tag(&tag)))
}

/// Extract all attributes from a tag node, quoted or not.
fn extract_attrs_from_tag<D: ast_grep_core::Doc>(tag_node: &Node<D>) -> Vec<HtmlAttr> {
    tag_node
        .children()
        .filter(|c| c.kind().as_ref() == "attribute")
        .filter_map(|attr| {
            let name = attr
                .children()
                .find(|c| c.kind().as_ref() == "attribute_name")?;
            let value = attr.children().find_map(|c| match c.kind().as_ref() {
                "attribute_value" => Some(decode_entities(&c.text())),
                "quoted_attribute_value" => Some(
                    c.children()
                        .find(|v| v.kind().as_ref() == "attribute_value")
                        .map(|v| decode_entities(&v.text()))
                        .unwrap_or_default(),
                ),
                _ => None,
            });
            Some((name.text().to_ascii_lowercase(), value))
        })
        .collect()
}

/// Decoded node text with a space on each side the source had whitespace.
///
/// The grammar drops inter-token whitespace, so without this
/// `<b>3</b> spots` would read as `3spots`.
fn padded_text<D: ast_grep_core::Doc>(node: &Node<D>, source: &str) -> String {
    let range = node.range();
    let bytes = source.as_bytes();
    let space_before = range.start > 0
        && bytes
            .get(range.start - 1)
            .is_some_and(u8::is_ascii_whitespace);
    let space_after = bytes.get(range.end).is_some_and(u8::is_ascii_whitespace);

    let mut text = String::new();
    if space_before {
        text.push(' ');
    }
    text.push_str(&decode_entities(&node.text()));
    if space_after {
        text.push(' ');
    }
    text
}

/// Decode the handful of character references the widget pages use.
///
/// Unknown references are kept verbatim.
#[must_use]
pub fn decode_entities(input: &str) -> String {
    if !input.contains('&') {
        return input.to_string();
    }

    let mut out = String::with_capacity(input.len());
    let mut rest = input;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        rest = &rest[amp..];

        let decoded = rest
            .find(';')
            .filter(|end| *end <= 10)
            .and_then(|end| decode_reference(&rest[1..end]).map(|ch| (ch, end)));

        match decoded {
            Some((ch, end)) => {
                out.push(ch);
                rest = &rest[end + 1..];
            }
            None => {
                out.push('&');
                rest = &rest[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

fn decode_reference(name: &str) -> Option<char> {
    match name {
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        "nbsp" => Some(' '),
        _ => {
            let number = name.strip_prefix('#')?;
            let code = match number.strip_prefix(['x', 'X']) {
                Some(hex) => u32::from_str_radix(hex, 16).ok()?,
                None => number.parse().ok()?,
            };
            char::from_u32(code)
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn finds_elements_by_class_in_document_order() {
        let doc = HtmlDocument::parse(
            r#"<div class="a first"><span class="a">x</span></div><p class="a">y</p>"#,
        );
        let tags: Vec<&str> = doc.root().by_class("a").iter().map(|e| e.tag()).collect();
        assert_eq!(tags, vec!["div", "span", "p"]);
    }

    #[test]
    fn class_match_is_by_whole_token() {
        let doc = HtmlDocument::parse(r#"<div class="bw-session__time"></div><div class="bw-session"></div>"#);
        assert_eq!(doc.root().by_class("bw-session").len(), 1);
    }

    #[test]
    fn reads_quoted_and_unquoted_attributes() {
        let doc = HtmlDocument::parse(r#"<a href="/x?a=1&amp;b=2" data-id=42 hidden>go</a>"#);
        let link = doc.root().find_first(|e| e.tag() == "a").unwrap();
        assert_eq!(link.attr("href"), Some("/x?a=1&b=2"));
        assert_eq!(link.attr("data-id"), Some("42"));
        assert_eq!(link.attr("hidden"), None);
        assert!(link.has_attr("hidden"));
        assert_eq!(link.attr("missing"), None);
    }

    #[test]
    fn text_content_keeps_source_spacing() {
        let doc = HtmlDocument::parse("<p><b>3</b> spots   left</p><p><i>x</i>y</p>");
        let paragraphs = doc.root().by_tag("p");
        assert_eq!(paragraphs[0].text_content(), "3 spots left");
        assert_eq!(paragraphs[1].text_content(), "xy");
    }

    #[test]
    fn text_content_decodes_entities() {
        let doc = HtmlDocument::parse("<span>Strength &amp; Conditioning</span>");
        assert_eq!(doc.text_content(), "Strength & Conditioning");
    }

    #[test]
    fn script_body_is_raw_and_not_text() {
        let doc = HtmlDocument::parse("<div>hi<script>var a = 1 < 2;</script></div>");
        let script = doc.root().find_first(|e| e.tag() == "script").unwrap();
        assert_eq!(script.raw_text(), "var a = 1 < 2;");
        assert_eq!(doc.text_content(), "hi");
    }

    #[test]
    fn child_elements_are_direct_only() {
        let doc = HtmlDocument::parse("<div id=\"o\"><span><b>x</b></span><em>y</em></div>");
        let outer = doc.root().find_first(|e| e.attr("id") == Some("o")).unwrap();
        let tags: Vec<&str> = outer.child_elements().map(Element::tag).collect();
        assert_eq!(tags, vec!["span", "em"]);
    }

    #[test]
    fn decode_entities_handles_numeric_and_unknown() {
        assert_eq!(decode_entities("caf&#233; &#x41;"), "café A");
        assert_eq!(decode_entities("Tom & Jerry &bogus;"), "Tom & Jerry &bogus;");
        assert_eq!(decode_entities("a&nbsp;b"), "a b");
    }
}
