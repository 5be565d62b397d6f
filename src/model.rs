//! Data model for extracted symbol records — format-agnostic.

use serde::Serialize;
use serde_json::Value;

/// Record fields emitted by the upstream extractor. All optional.
pub mod fields {
    pub const NAME: &str = "name";
    pub const PARSED_DECLARATION: &str = "parsedDeclaration";
    pub const DOC_DECLARATION: &str = "docDeclaration";
    pub const DOC_ABSTRACT: &str = "docAbstract";
    pub const DOC_DISCUSSION_XML: &str = "docDiscussionXML";
    pub const DOC_DISCUSSION: &str = "docDiscussion";
    pub const FILE_PATH: &str = "filePath";
}

/// Placeholder for symbols the extractor could not name.
pub const UNNAMED: &str = "Unknown";

/// Read-only view of one documentation record.
///
/// Every derived value (name, declaration, comment, debug view) is a free
/// function over this interface, so tests can substitute any data holder for
/// the JSON-backed record.
pub trait SymbolSource {
    /// Optional string field lookup. Missing and wrong-typed fields are both
    /// absent, never an error.
    fn field(&self, key: &str) -> Option<&str>;

    /// The flattened callout/paragraph stream, one key/text pair per entry,
    /// in document order.
    fn discussion_entries(&self) -> &[(String, String)];
}

/// A record backed by one JSON object from the extractor.
#[derive(Debug)]
pub struct SymbolRecord {
    value: Value,
    entries: Vec<(String, String)>,
}

impl SymbolRecord {
    pub fn new(value: Value) -> Self {
        let entries = flatten_discussion(&value);
        Self { value, entries }
    }
}

impl SymbolSource for SymbolRecord {
    fn field(&self, key: &str) -> Option<&str> {
        self.value.get(key)?.as_str()
    }

    fn discussion_entries(&self) -> &[(String, String)] {
        &self.entries
    }
}

/// Pull the `docDiscussion` array of single-entry objects into key/text
/// pairs. Entries of any other shape are dropped.
fn flatten_discussion(value: &Value) -> Vec<(String, String)> {
    let Some(items) = value.get(fields::DOC_DISCUSSION).and_then(Value::as_array) else {
        return Vec::new();
    };
    items
        .iter()
        .filter_map(|item| {
            let (key, text) = item.as_object()?.iter().next()?;
            Some((key.clone(), text.as_str()?.to_string()))
        })
        .collect()
}

/// One parsed module: every record from a single extractor output file.
#[derive(Debug, Default)]
pub struct Document {
    /// Module name, when the records came from a named file.
    pub name: Option<String>,
    pub symbols: Vec<SymbolRecord>,
}

/// Introspection view of a record, for the JSON output format.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SymbolInfo {
    pub name: String,
    pub declaration: String,
    pub file_path: String,
    pub has_documentation: bool,
}
