//! Discussion markup parsing.
//!
//! The extractor serializes a symbol's discussion as one XML element whose
//! children are the top-level discussion nodes. The tree is built eagerly in
//! one streaming pass and never mutated afterwards. Anything that is not one
//! well-formed element (parse errors, unbalanced tags, no root) folds to
//! `None`, which downstream treats as "no discussion content".

use quick_xml::escape::unescape;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

/// One node of the discussion tree. Text runs between elements are nodes
/// without a tag.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Element(Element),
    Text(String),
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Element {
    pub tag: String,
    pub attrs: Vec<(String, String)>,
    pub children: Vec<Node>,
}

impl Node {
    /// Flattened text of the whole subtree.
    pub fn string_value(&self) -> String {
        match self {
            Node::Text(text) => text.clone(),
            Node::Element(el) => el.children.iter().map(Node::string_value).collect(),
        }
    }

    /// Serialized form, emitted verbatim when a node carries markup outside
    /// the discussion vocabulary.
    pub fn description(&self) -> String {
        match self {
            Node::Text(text) => text.clone(),
            Node::Element(el) => {
                let mut out = String::new();
                out.push('<');
                out.push_str(&el.tag);
                for (key, value) in &el.attrs {
                    out.push(' ');
                    out.push_str(key);
                    out.push_str("=\"");
                    out.push_str(&escape_attr(value));
                    out.push('"');
                }
                if el.children.is_empty() {
                    out.push_str("/>");
                } else {
                    out.push('>');
                    for child in &el.children {
                        match child {
                            Node::Text(text) => out.push_str(&escape_text(text)),
                            element => out.push_str(&element.description()),
                        }
                    }
                    out.push_str("</");
                    out.push_str(&el.tag);
                    out.push('>');
                }
                out
            }
        }
    }
}

impl Element {
    /// Flattened text of this element's subtree.
    pub fn string_value(&self) -> String {
        self.children.iter().map(Node::string_value).collect()
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// First element child, skipping interleaved text.
    pub fn first_element(&self) -> Option<&Element> {
        self.children.iter().find_map(|child| match child {
            Node::Element(el) => Some(el),
            Node::Text(_) => None,
        })
    }
}

/// Parse the serialized discussion into its top-level node list: the
/// children of the single root element.
pub fn parse(xml: &str) -> Option<Vec<Node>> {
    let mut reader = Reader::from_str(xml);
    let mut stack: Vec<Element> = Vec::new();
    let mut root: Option<Element> = None;

    loop {
        match reader.read_event() {
            Ok(Event::Start(start)) => {
                stack.push(open_element(&start)?);
            }
            Ok(Event::Empty(start)) => {
                let element = open_element(&start)?;
                attach(&mut stack, &mut root, Node::Element(element))?;
            }
            Ok(Event::End(_)) => {
                let element = stack.pop()?;
                attach(&mut stack, &mut root, Node::Element(element))?;
            }
            Ok(Event::Text(text)) => {
                let raw = String::from_utf8_lossy(text.as_ref()).into_owned();
                let decoded = unescape(&raw)
                    .map(|value| value.into_owned())
                    .unwrap_or_else(|_| raw.clone());
                if let Some(parent) = stack.last_mut() {
                    push_text(parent, &decoded);
                }
            }
            Ok(Event::CData(data)) => {
                let text = String::from_utf8_lossy(&data).into_owned();
                if let Some(parent) = stack.last_mut() {
                    push_text(parent, &text);
                }
            }
            Ok(Event::GeneralRef(entity)) => {
                let name = String::from_utf8_lossy(entity.as_ref()).into_owned();
                if let (Some(parent), Some(resolved)) =
                    (stack.last_mut(), resolve_entity(&name))
                {
                    push_text(parent, &resolved);
                }
            }
            Ok(Event::Eof) => break,
            // Comments, processing instructions and declarations carry no
            // discussion content.
            Ok(_) => {}
            Err(_) => return None,
        }
    }

    if !stack.is_empty() {
        return None;
    }
    // Indentation whitespace between top-level blocks is not content.
    root.map(|el| {
        el.children
            .into_iter()
            .filter(|node| match node {
                Node::Text(text) => !text.trim().is_empty(),
                Node::Element(_) => true,
            })
            .collect()
    })
}

fn open_element(start: &BytesStart) -> Option<Element> {
    let tag = String::from_utf8_lossy(start.name().as_ref()).into_owned();
    let mut attrs = Vec::new();
    for attr in start.attributes() {
        let attr = attr.ok()?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        let raw = String::from_utf8_lossy(&attr.value).into_owned();
        let value = unescape(&raw)
            .map(|decoded| decoded.into_owned())
            .unwrap_or_else(|_| raw.clone());
        attrs.push((key, value));
    }
    Some(Element {
        tag,
        attrs,
        children: Vec::new(),
    })
}

/// Place a completed node under the current parent, or install it as the
/// root. A second root element makes the document malformed.
fn attach(stack: &mut Vec<Element>, root: &mut Option<Element>, node: Node) -> Option<()> {
    if let Some(parent) = stack.last_mut() {
        parent.children.push(node);
        return Some(());
    }
    match node {
        Node::Element(el) if root.is_none() => {
            *root = Some(el);
            Some(())
        }
        _ => None,
    }
}

fn push_text(parent: &mut Element, text: &str) {
    if text.is_empty() {
        return;
    }
    if let Some(Node::Text(last)) = parent.children.last_mut() {
        last.push_str(text);
    } else {
        parent.children.push(Node::Text(text.to_string()));
    }
}

/// Escape text for XML content.
fn escape_text(text: &str) -> String {
    escape_xml(text, false)
}

/// Escape text for XML attribute values.
fn escape_attr(text: &str) -> String {
    escape_xml(text, true)
}

fn escape_xml(text: &str, escape_quotes: bool) -> String {
    let mut result = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' if escape_quotes => result.push_str("&quot;"),
            '\'' if escape_quotes => result.push_str("&apos;"),
            _ => result.push(ch),
        }
    }
    result
}

fn resolve_entity(name: &str) -> Option<String> {
    let resolved = match name {
        "amp" => "&",
        "lt" => "<",
        "gt" => ">",
        "quot" => "\"",
        "apos" => "'",
        _ => {
            let digits = name.strip_prefix('#')?;
            let code = match digits.strip_prefix(['x', 'X']) {
                Some(hex) => u32::from_str_radix(hex, 16).ok()?,
                None => digits.parse().ok()?,
            };
            return char::from_u32(code).map(String::from);
        }
    };
    Some(resolved.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn element(node: &Node) -> &Element {
        match node {
            Node::Element(el) => el,
            Node::Text(text) => panic!("expected element, got text {text:?}"),
        }
    }

    #[test]
    fn two_paragraphs() {
        let nodes = parse("<Discussion><Paragraph>one</Paragraph><Paragraph>two</Paragraph></Discussion>")
            .unwrap();
        assert_eq!(nodes.len(), 2);
        assert_eq!(element(&nodes[0]).tag, "Paragraph");
        assert_eq!(nodes[0].string_value(), "one");
        assert_eq!(nodes[1].string_value(), "two");
    }

    #[test]
    fn whitespace_between_elements_is_dropped() {
        let nodes = parse("<Discussion>\n  <Paragraph>a</Paragraph>\n</Discussion>").unwrap();
        assert_eq!(nodes.len(), 1);
    }

    #[test]
    fn attributes_and_empty_elements() {
        let nodes = parse(r#"<Discussion><Paragraph><Image src="i.png" alt="pic"/></Paragraph></Discussion>"#)
            .unwrap();
        let image = element(&nodes[0]).first_element().unwrap();
        assert_eq!(image.tag, "Image");
        assert_eq!(image.attr("src"), Some("i.png"));
        assert_eq!(image.attr("alt"), Some("pic"));
        assert_eq!(image.attr("href"), None);
    }

    #[test]
    fn string_value_flattens_nested_markup() {
        let nodes = parse("<Discussion><Paragraph>see <Link href=\"x\">docs</Link> here</Paragraph></Discussion>")
            .unwrap();
        assert_eq!(nodes[0].string_value(), "see docs here");
    }

    #[test]
    fn entities_are_resolved() {
        let nodes = parse("<Discussion><Paragraph>a &amp; b &#33;</Paragraph></Discussion>").unwrap();
        assert_eq!(nodes[0].string_value(), "a & b !");
    }

    #[test]
    fn cdata_is_literal() {
        let nodes = parse("<Discussion><CodeListing><![CDATA[if a < b {}]]></CodeListing></Discussion>")
            .unwrap();
        assert_eq!(nodes[0].string_value(), "if a < b {}");
    }

    #[test]
    fn description_reserializes_markup() {
        let nodes = parse(r#"<Discussion><rawHTML attr="v">x &amp; y</rawHTML></Discussion>"#).unwrap();
        assert_eq!(nodes[0].description(), r#"<rawHTML attr="v">x &amp; y</rawHTML>"#);
    }

    #[test]
    fn malformed_documents_fold_to_none() {
        assert!(parse("").is_none());
        assert!(parse("just text").is_none());
        assert!(parse("<a>truncated").is_none());
        assert!(parse("<a><b></a></b>").is_none());
    }

    #[test]
    fn top_level_text_survives() {
        let nodes = parse("<Discussion>loose text<Paragraph>a</Paragraph></Discussion>").unwrap();
        assert_eq!(nodes.len(), 2);
        assert_eq!(nodes[0], Node::Text("loose text".to_string()));
    }

    #[test]
    fn comments_are_skipped() {
        let nodes = parse("<Discussion><!-- note --><Paragraph>a</Paragraph></Discussion>").unwrap();
        assert_eq!(nodes.len(), 1);
        assert_eq!(element(&nodes[0]).tag, "Paragraph");
    }
}
