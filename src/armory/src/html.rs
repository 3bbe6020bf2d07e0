//! Minimal HTML document walker.
//!
//! Builds a loose element tree from armory markup and answers descendant
//! selectors such as `.item-model a` or `.profskills .text`. Unclosed tags
//! are closed implicitly by their parent, stray closing tags are ignored,
//! and `<script>`/`<style>` bodies and comments are dropped.

use regex::Regex;
use std::sync::OnceLock;

const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];

fn tag_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"<(/?)([A-Za-z][A-Za-z0-9-]*)((?:\s+[^\s"'>/=]+(?:\s*=\s*(?:"[^"]*"|'[^']*'|[^\s"'>]+))?)*)\s*(/?)>"#)
            .expect("tag pattern is valid")
    })
}

fn attr_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"([^\s"'>/=]+)(?:\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s"'>]+)))?"#)
            .expect("attribute pattern is valid")
    })
}

fn noise_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?is)<!--.*?-->|<script\b.*?</script\s*>|<style\b.*?</style\s*>|<![^>]*>|<\?[^>]*>")
            .expect("noise pattern is valid")
    })
}

/// Decode the entities that show up in armory markup
pub fn decode_entities(s: &str) -> String {
    if !s.contains('&') {
        return s.to_string();
    }

    let mut out = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let tail = &rest[amp..];
        let decoded = tail.find(';').filter(|end| *end <= 10).and_then(|end| {
            let entity = &tail[1..end];
            let ch = match entity {
                "amp" => Some('&'),
                "lt" => Some('<'),
                "gt" => Some('>'),
                "quot" => Some('"'),
                "apos" => Some('\''),
                "nbsp" => Some(' '),
                _ if entity.starts_with("#x") || entity.starts_with("#X") => {
                    u32::from_str_radix(&entity[2..], 16).ok().and_then(char::from_u32)
                }
                _ if entity.starts_with('#') => {
                    entity[1..].parse::<u32>().ok().and_then(char::from_u32)
                }
                _ => None,
            };
            ch.map(|c| (c, end + 1))
        });

        match decoded {
            Some((c, len)) => {
                out.push(c);
                rest = &tail[len..];
            }
            None => {
                out.push('&');
                rest = &tail[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

/// Collapse whitespace runs into single spaces and trim
pub fn normalize_ws(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[derive(Debug)]
enum Child {
    Element(usize),
    Text(String),
}

#[derive(Debug)]
struct Node {
    tag: String,
    attrs: Vec<(String, String)>,
    parent: Option<usize>,
    children: Vec<Child>,
}

/// Parsed document
#[derive(Debug)]
pub struct Document {
    nodes: Vec<Node>,
}

/// One step of a descendant selector: `tag`, `.class`, `#id` or combinations
#[derive(Debug, Default, PartialEq)]
struct Compound {
    tag: Option<String>,
    id: Option<String>,
    classes: Vec<String>,
}

impl Compound {
    fn parse(part: &str) -> Compound {
        let mut compound = Compound::default();
        let mut current = String::new();
        let mut kind = ' ';

        let flush = |kind: char, value: &mut String, c: &mut Compound| {
            if value.is_empty() {
                return;
            }
            let v = std::mem::take(value);
            match kind {
                '.' => c.classes.push(v),
                '#' => c.id = Some(v),
                _ => c.tag = Some(v.to_ascii_lowercase()),
            }
        };

        for ch in part.chars() {
            if ch == '.' || ch == '#' {
                flush(kind, &mut current, &mut compound);
                kind = ch;
            } else {
                current.push(ch);
            }
        }
        flush(kind, &mut current, &mut compound);
        compound
    }
}

impl Document {
    pub fn parse(html: &str) -> Document {
        let cleaned = noise_re().replace_all(html, "");
        let mut nodes = vec![Node {
            tag: "#root".to_string(),
            attrs: Vec::new(),
            parent: None,
            children: Vec::new(),
        }];
        let mut stack: Vec<usize> = vec![0];
        let mut last = 0;

        for cap in tag_re().captures_iter(&cleaned) {
            let Some(whole) = cap.get(0) else { continue };
            let current = *stack.last().unwrap_or(&0);
            push_text(&mut nodes[current], &cleaned[last..whole.start()]);
            last = whole.end();

            let tag = cap[2].to_ascii_lowercase();
            if !cap[1].is_empty() {
                // Close the nearest open element with this tag, if any
                if let Some(pos) = stack.iter().rposition(|&id| nodes[id].tag == tag) {
                    if pos > 0 {
                        stack.truncate(pos);
                    }
                }
                continue;
            }

            let attrs = cap
                .get(3)
                .map(|m| parse_attrs(m.as_str()))
                .unwrap_or_default();
            let id = nodes.len();
            nodes.push(Node {
                tag: tag.clone(),
                attrs,
                parent: Some(current),
                children: Vec::new(),
            });
            nodes[current].children.push(Child::Element(id));

            let self_closing = !cap[4].is_empty() || VOID_ELEMENTS.contains(&tag.as_str());
            if !self_closing {
                stack.push(id);
            }
        }

        let current = *stack.last().unwrap_or(&0);
        push_text(&mut nodes[current], &cleaned[last..]);
        Document { nodes }
    }

    /// Document root
    pub fn root(&self) -> ElementRef<'_> {
        ElementRef { doc: self, id: 0 }
    }

    /// All elements matching a descendant selector, in document order
    pub fn select(&self, selector: &str) -> Vec<ElementRef<'_>> {
        self.root().select(selector)
    }

    fn matches(&self, id: usize, compound: &Compound) -> bool {
        let node = &self.nodes[id];
        if id == 0 {
            return false;
        }
        if let Some(tag) = &compound.tag {
            if node.tag != *tag {
                return false;
            }
        }
        if let Some(want) = &compound.id {
            if attr(node, "id") != Some(want.as_str()) {
                return false;
            }
        }
        compound.classes.iter().all(|c| has_class(node, c))
    }

    /// Whether `id` matches the last compound and its ancestors (below
    /// `scope`) match the preceding ones in order
    fn matches_chain(&self, id: usize, chain: &[Compound], scope: usize) -> bool {
        let Some((last, rest)) = chain.split_last() else {
            return false;
        };
        if !self.matches(id, last) {
            return false;
        }

        let mut remaining = rest;
        let mut ancestor = self.nodes[id].parent;
        while let Some((want, before)) = remaining.split_last() {
            loop {
                match ancestor {
                    Some(a) if a != scope => {
                        ancestor = self.nodes[a].parent;
                        if self.matches(a, want) {
                            break;
                        }
                    }
                    _ => return false,
                }
            }
            remaining = before;
        }
        true
    }

    /// Element ids below `id` in document order. Walks with an explicit
    /// stack since remote markup can nest arbitrarily deep.
    fn descendants(&self, id: usize) -> Vec<usize> {
        let mut out = Vec::new();
        let mut stack: Vec<&Child> = self.nodes[id].children.iter().rev().collect();
        while let Some(child) = stack.pop() {
            if let Child::Element(c) = child {
                out.push(*c);
                stack.extend(self.nodes[*c].children.iter().rev());
            }
        }
        out
    }

    fn collect_text(&self, id: usize) -> String {
        let mut out = String::new();
        let mut stack: Vec<&Child> = self.nodes[id].children.iter().rev().collect();
        while let Some(child) = stack.pop() {
            match child {
                Child::Text(t) => out.push_str(t),
                Child::Element(c) => stack.extend(self.nodes[*c].children.iter().rev()),
            }
        }
        out
    }
}

fn push_text(node: &mut Node, raw: &str) {
    if raw.is_empty() {
        return;
    }
    node.children.push(Child::Text(decode_entities(raw)));
}

fn parse_attrs(raw: &str) -> Vec<(String, String)> {
    attr_re()
        .captures_iter(raw)
        .map(|cap| {
            let name = cap[1].to_ascii_lowercase();
            let value = cap
                .get(2)
                .or_else(|| cap.get(3))
                .or_else(|| cap.get(4))
                .map(|m| decode_entities(m.as_str()))
                .unwrap_or_default();
            (name, value)
        })
        .collect()
}

fn attr<'a>(node: &'a Node, name: &str) -> Option<&'a str> {
    node.attrs
        .iter()
        .find(|(k, _)| k == name)
        .map(|(_, v)| v.as_str())
}

fn has_class(node: &Node, class: &str) -> bool {
    attr(node, "class").is_some_and(|c| c.split_whitespace().any(|c| c == class))
}

/// Borrowed handle to an element
#[derive(Debug, Clone, Copy)]
pub struct ElementRef<'a> {
    doc: &'a Document,
    id: usize,
}

impl<'a> ElementRef<'a> {
    pub fn attr(&self, name: &str) -> Option<&'a str> {
        attr(&self.doc.nodes[self.id], name)
    }

    /// All text below this element
    pub fn text(&self) -> String {
        self.doc.collect_text(self.id)
    }

    /// Text of this element only, without the text of child elements
    pub fn own_text(&self) -> String {
        self.doc.nodes[self.id]
            .children
            .iter()
            .filter_map(|c| match c {
                Child::Text(t) => Some(t.as_str()),
                Child::Element(_) => None,
            })
            .collect()
    }

    /// Descendants of this element matching a selector
    pub fn select(&self, selector: &str) -> Vec<ElementRef<'a>> {
        let chain: Vec<Compound> = selector.split_whitespace().map(Compound::parse).collect();
        if chain.is_empty() {
            return Vec::new();
        }

        self.doc
            .descendants(self.id)
            .into_iter()
            .filter(|&id| self.doc.matches_chain(id, &chain, self.id))
            .map(|id| ElementRef { doc: self.doc, id })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_entities() {
        assert_eq!(decode_entities("a &amp; b"), "a & b");
        assert_eq!(decode_entities("&lt;b&gt;&#39;&#x41;"), "<b>'A");
        assert_eq!(decode_entities("fish & chips"), "fish & chips");
        assert_eq!(decode_entities("&bogus;"), "&bogus;");
    }

    #[test]
    fn test_descendant_selector() {
        let doc = Document::parse(
            r#"<div class="item-model"><a href="x" rel="item=1">one</a></div>
               <div class="other"><a rel="item=2">two</a></div>
               <div class="item-model wide"><span><a rel="item=3">three</a></span></div>"#,
        );
        let links = doc.select(".item-model a");
        let rels: Vec<_> = links.iter().filter_map(|a| a.attr("rel")).collect();
        assert_eq!(rels, vec!["item=1", "item=3"]);
    }

    #[test]
    fn test_attribute_entities_are_decoded() {
        let doc = Document::parse(r#"<a rel="item=1&amp;ench=3817&amp;gems=1:0:0">x</a>"#);
        assert_eq!(doc.select("a")[0].attr("rel"), Some("item=1&ench=3817&gems=1:0:0"));
    }

    #[test]
    fn test_own_text_skips_children() {
        let doc = Document::parse(
            r#"<div class="profskills"><div class="text">Enchanting <span class="value">450</span></div></div>"#,
        );
        let texts = doc.select(".profskills .text");
        assert_eq!(texts.len(), 1);
        assert_eq!(texts[0].own_text().trim(), "Enchanting");
        assert_eq!(normalize_ws(&texts[0].text()), "Enchanting 450");
    }

    #[test]
    fn test_void_and_unclosed_elements() {
        let doc = Document::parse(
            r#"<div id="a"><img src="x"><p>first<p>second</div><div id="b">after</div>"#,
        );
        assert_eq!(doc.select("#b").len(), 1);
        assert_eq!(doc.select("#a p").len(), 2);
        assert_eq!(doc.select("#b")[0].text(), "after");
    }

    #[test]
    fn test_scripts_and_comments_dropped() {
        let doc = Document::parse(
            r#"<!DOCTYPE html><script>var s = "<div class='x'>";</script><!-- <div class="x"> --><div class="x">real</div>"#,
        );
        let found = doc.select(".x");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].text(), "real");
    }

    #[test]
    fn test_deeply_nested_markup() {
        let depth = 100_000;
        let html = format!(
            "{}<div class=\"item-model\"><a rel=\"item=1\">x</a></div>",
            "<span>".repeat(depth)
        );
        let doc = Document::parse(&html);
        let links = doc.select(".item-model a");
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].attr("rel"), Some("item=1"));
        assert_eq!(doc.root().text(), "x");
    }

    #[test]
    fn test_compound_selector() {
        let doc = Document::parse(
            r#"<div class="achievement" id="ach4597"><span class="date">1/2/2011</span></div>
               <div class="achievement" id="ach4530"></div>"#,
        );
        assert_eq!(doc.select("div.achievement").len(), 2);
        assert_eq!(doc.select("#ach4597 .date").len(), 1);
        assert!(doc.select("#ach4530 .date").is_empty());
        assert!(doc.select("").is_empty());
    }
}
