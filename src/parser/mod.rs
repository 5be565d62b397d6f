//! Extractor-output parsing.
//!
//! One input file is one module: a JSON array of symbol records in
//! declaration order.

pub mod discussion;

use crate::model::{Document, SymbolRecord};
use anyhow::{Context, Result};
use serde_json::Value;

/// Parse one extractor output file into a Document. Array entries that are
/// not objects are dropped rather than failing the whole file.
pub fn parse_records(content: &str) -> Result<Document> {
    let value: Value = serde_json::from_str(content).context("invalid JSON")?;
    let Value::Array(items) = value else {
        anyhow::bail!("expected a top-level JSON array of symbol records");
    };
    let symbols = items
        .into_iter()
        .filter(|item| item.is_object())
        .map(SymbolRecord::new)
        .collect();
    Ok(Document {
        name: None,
        symbols,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::SymbolSource;

    #[test]
    fn array_of_records() {
        let doc = parse_records(r#"[{"name": "a"}, {"name": "b"}]"#).unwrap();
        assert_eq!(doc.symbols.len(), 2);
        assert_eq!(doc.symbols[1].field("name"), Some("b"));
    }

    #[test]
    fn non_object_entries_are_dropped() {
        let doc = parse_records(r#"[{"name": "a"}, 42, "stray"]"#).unwrap();
        assert_eq!(doc.symbols.len(), 1);
    }

    #[test]
    fn top_level_object_is_rejected() {
        assert!(parse_records(r#"{"name": "a"}"#).is_err());
    }

    #[test]
    fn invalid_json_is_rejected() {
        assert!(parse_records("not json").is_err());
    }
}
