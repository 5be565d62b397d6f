//! Renderer module — trait-based format dispatch.

pub mod json;
pub mod markdown;

use crate::model::Document;
use anyhow::{anyhow, Result};

/// Options shared by all output formats.
#[derive(Debug, Clone, Default)]
pub struct RenderOptions {
    /// Fence tag for declaration and code listing blocks.
    pub language: String,
    /// Path prefix stripped from source locations in json output.
    pub strip_prefix: String,
}

/// Trait for rendering a Document into a specific output format.
pub trait Renderer {
    fn render(&self, doc: &Document) -> String;
    fn file_extension(&self) -> &str;
}

/// Create a renderer for the given format name.
pub fn create_renderer(format: &str, options: RenderOptions) -> Result<Box<dyn Renderer>> {
    match format {
        "markdown" | "md" => Ok(Box::new(markdown::MarkdownRenderer::new(options))),
        "json" => Ok(Box::new(json::JsonRenderer::new(options))),
        _ => Err(anyhow!("unknown format: {}. Use markdown or json", format)),
    }
}
