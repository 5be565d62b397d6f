//! Markdown renderer — one documentation page per module.

use crate::comment;
use crate::markdown;
use crate::model::{Document, SymbolRecord};
use crate::render::{RenderOptions, Renderer};

pub struct MarkdownRenderer {
    options: RenderOptions,
}

impl MarkdownRenderer {
    pub fn new(options: RenderOptions) -> Self {
        Self { options }
    }
}

impl Renderer for MarkdownRenderer {
    fn render(&self, doc: &Document) -> String {
        let mut output = String::new();

        if let Some(ref name) = doc.name {
            output.push_str(&format!("# {}\n\n", name));
        }

        let names: Vec<String> = doc.symbols.iter().map(|r| comment::name(r)).collect();

        if !names.is_empty() {
            output.push_str("## Index\n\n");
            for name in &names {
                output.push_str(&format!("* {}\n", markdown::anchor_link(name)));
            }
            output.push('\n');
        }

        for (record, name) in doc.symbols.iter().zip(&names) {
            output.push_str(&render_symbol(record, name, &self.options.language));
            output.push('\n');
        }

        output
    }

    fn file_extension(&self) -> &str {
        "md"
    }
}

/// One symbol: heading, declaration block, comment body.
fn render_symbol(record: &SymbolRecord, name: &str, language: &str) -> String {
    let mut lines: Vec<String> = Vec::new();

    lines.push(format!("### {}\n", name));

    let declaration = comment::declaration(record, language);
    if !declaration.is_empty() {
        lines.push(declaration);
        lines.push(String::new());
    }

    let body = comment::comment(record, language);
    if !body.is_empty() {
        lines.push(body);
        lines.push(String::new());
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::SymbolRecord;
    use serde_json::json;

    fn renderer() -> MarkdownRenderer {
        MarkdownRenderer::new(RenderOptions {
            language: "swift".to_string(),
            strip_prefix: String::new(),
        })
    }

    #[test]
    fn page_has_index_and_symbol_sections() {
        let doc = Document {
            name: Some("Greeter".to_string()),
            symbols: vec![SymbolRecord::new(json!({
                "name": "greet(_:)",
                "parsedDeclaration": "func greet(_ name: String)",
                "docAbstract": "Says hello."
            }))],
        };
        assert_eq!(
            renderer().render(&doc),
            "# Greeter\n\n\
             ## Index\n\n\
             * [greet(_:)](#greet)\n\n\
             ### greet(_:)\n\n\
             ```swift\nfunc greet(_ name: String)\n```\n\n\
             Says hello.\n\n"
        );
    }

    #[test]
    fn undocumented_symbol_is_heading_only() {
        let doc = Document {
            name: None,
            symbols: vec![SymbolRecord::new(json!({"name": "x"}))],
        };
        assert_eq!(renderer().render(&doc), "## Index\n\n* [x](#x)\n\n### x\n\n");
    }

    #[test]
    fn empty_document_renders_empty_page() {
        let doc = Document::default();
        assert_eq!(renderer().render(&doc), "");
    }
}
