//! Symbol comment assembly.
//!
//! Turns one documentation record into its Markdown pieces: display name,
//! declaration block, and the comment body. The body is assembled from the
//! abstract, the linearized discussion tree, and the callout blocks collected
//! from the flattened discussion stream, joined by blank lines. A record may
//! lack any of them; whatever is missing contributes nothing.

use crate::keys;
use crate::markdown;
use crate::model::{fields, SymbolInfo, SymbolSource, UNNAMED};
use crate::parser::discussion::{self, Element, Node};

/// Display name of a symbol.
pub fn name(record: &impl SymbolSource) -> String {
    record.field(fields::NAME).unwrap_or(UNNAMED).to_string()
}

/// Markdown declaration block; empty when the record resolves to no
/// declaration text.
pub fn declaration(record: &impl SymbolSource, language: &str) -> String {
    match resolved_declaration(record) {
        Some(text) if !text.is_empty() => markdown::fenced_block(text, language),
        _ => String::new(),
    }
}

/// The full comment body: whichever of abstract, discussion and callouts
/// exist for this record.
pub fn comment(record: &impl SymbolSource, language: &str) -> String {
    let mut sections: Vec<String> = Vec::new();
    if let Some(text) = record.field(fields::DOC_ABSTRACT) {
        if !text.is_empty() {
            sections.push(text.to_string());
        }
    }
    if let Some(discussion) = discussion_section(record, language) {
        sections.push(discussion);
    }
    if let Some(callouts) = callout_blocks(record) {
        sections.push(callouts);
    }
    sections.join("\n\n")
}

/// Introspection view of a record for the JSON output format. `strip_prefix`
/// is removed from the source location when present.
pub fn info(record: &impl SymbolSource, language: &str, strip_prefix: &str) -> SymbolInfo {
    let path = record.field(fields::FILE_PATH).unwrap_or("");
    let path = path.strip_prefix(strip_prefix).unwrap_or(path);
    SymbolInfo {
        name: name(record),
        declaration: resolved_declaration(record).unwrap_or("").to_string(),
        file_path: path.to_string(),
        has_documentation: !comment(record, language).is_empty(),
    }
}

/// The documented declaration wins over the parsed one unless it is empty.
/// Emptiness, not absence, triggers the fallback.
fn resolved_declaration<'a>(record: &'a impl SymbolSource) -> Option<&'a str> {
    match record.field(fields::DOC_DECLARATION) {
        Some(doc) if !doc.is_empty() => Some(doc),
        _ => record.field(fields::PARSED_DECLARATION),
    }
}

// -- Discussion tree linearization --------------------------------------------

/// Linearized discussion body from the markup tree. Absent when the tree is
/// missing, malformed, or yields no fragments.
fn discussion_section(record: &impl SymbolSource, language: &str) -> Option<String> {
    let xml = record.field(fields::DOC_DISCUSSION_XML)?;
    let nodes = discussion::parse(xml)?;
    let fragments: Vec<String> = linearize(&nodes, language).collect();
    if fragments.is_empty() {
        None
    } else {
        Some(fragments.join("\n\n"))
    }
}

/// Walk the top-level nodes in document order, yielding Markdown fragments.
fn linearize<'a>(nodes: &'a [Node], language: &'a str) -> impl Iterator<Item = String> + 'a {
    nodes.iter().flat_map(move |node| fragments(node, language))
}

fn fragments(node: &Node, language: &str) -> Vec<String> {
    let el = match node {
        Node::Element(el) if keys::is_discussion_key(&el.tag) => el,
        // Markup outside the discussion vocabulary passes through verbatim.
        other => return vec![other.description()],
    };

    match el.tag.as_str() {
        "CodeListing" => {
            let code = el
                .children
                .iter()
                .map(Node::string_value)
                .filter(|line| !line.trim().is_empty())
                .collect::<Vec<_>>()
                .join("\n");
            vec![markdown::fenced_block(
                &code,
                el.attr("language").unwrap_or(language),
            )]
        }
        "ListBullet" => el
            .children
            .iter()
            .map(Node::string_value)
            .filter(|text| !text.trim().is_empty())
            .map(|text| format!("- {}", text.trim()))
            .collect(),
        _ => structural_fragment(el),
    }
}

/// Paragraphs, items and callout markers: dispatch on the first inline
/// element. Shapes that miss an expected attribute degrade to plain text.
fn structural_fragment(el: &Element) -> Vec<String> {
    let text = el.string_value();
    let text = text.trim();

    let Some(first) = el.first_element() else {
        return text_fragment(text);
    };

    match first.tag.as_str() {
        "Link" => match first.attr("href") {
            Some(href) if !text.is_empty() => vec![format!("[{}]({})", text, href)],
            _ => text_fragment(text),
        },
        "Image" => match first.attr("src") {
            Some(src) => vec![format!("![{}]({})", first.attr("alt").unwrap_or(""), src)],
            None => text_fragment(text),
        },
        // Callouts render from the flattened stream, never inline.
        _ if keys::is_callout_key(&el.tag) => Vec::new(),
        _ => match el.children.first() {
            Some(child) => vec![child.description()],
            None => Vec::new(),
        },
    }
}

fn text_fragment(text: &str) -> Vec<String> {
    if text.is_empty() {
        Vec::new()
    } else {
        vec![text.to_string()]
    }
}

// -- Callout collection -------------------------------------------------------

/// Render every callout with content as a collapsible block, in declared key
/// order regardless of where each callout sits in the stream.
fn callout_blocks(record: &impl SymbolSource) -> Option<String> {
    let entries = record.discussion_entries();
    if entries.is_empty() {
        return None;
    }
    let blocks: Vec<String> = keys::CALLOUT_KEYS
        .iter()
        .filter_map(|key| {
            let text = collect_callout(entries, key);
            let text = text.trim();
            if text.is_empty() {
                None
            } else {
                Some(markdown::collapsible(keys::display_name(key), text))
            }
        })
        .collect();
    if blocks.is_empty() {
        None
    } else {
        Some(blocks.join("\n\n"))
    }
}

/// One linear scan per callout key. Collection starts at the first entry
/// keyed by `key` and continues over entries keyed by `key` or `Paragraph`;
/// any other key ends the run. Later runs of the same key are ignored.
fn collect_callout(entries: &[(String, String)], key: &str) -> String {
    let mut text = String::new();
    let mut collecting = false;
    for (entry_key, value) in entries {
        if entry_key == key {
            collecting = true;
            text.push_str("\n\n");
            text.push_str(value);
        } else if collecting && entry_key == "Paragraph" {
            text.push_str("\n\n");
            text.push_str(value);
        } else if collecting {
            break;
        }
    }
    text
}
