//! JSON renderer — introspection records for tooling integration.
//!
//! Serializes the per-symbol debug view instead of the rendered page: name,
//! raw declaration, source location, and whether any documentation exists.

use crate::comment;
use crate::model::{Document, SymbolInfo};
use crate::render::{RenderOptions, Renderer};

pub struct JsonRenderer {
    options: RenderOptions,
}

impl JsonRenderer {
    pub fn new(options: RenderOptions) -> Self {
        Self { options }
    }
}

impl Renderer for JsonRenderer {
    fn render(&self, doc: &Document) -> String {
        let infos: Vec<SymbolInfo> = doc
            .symbols
            .iter()
            .map(|record| {
                comment::info(record, &self.options.language, &self.options.strip_prefix)
            })
            .collect();
        let mut out = serde_json::to_string_pretty(&infos).unwrap_or_else(|_| String::from("[]"));
        out.push('\n');
        out
    }

    fn file_extension(&self) -> &str {
        "json"
    }
}
