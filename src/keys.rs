//! Discussion key classification.
//!
//! The extractor tags discussion content with keys from two disjoint closed
//! sets: callout keys become labeled collapsible blocks, structural keys
//! shape the discussion body itself. Matching is exact and case-sensitive;
//! anything else falls through to generic text handling.

/// Callout keys in declared order. Callout blocks render in this order, not
/// the order they appear in a record.
pub const CALLOUT_KEYS: [&str; 20] = [
    "Attention",
    "Author",
    "Authors",
    "Bug",
    "Complexity",
    "Copyright",
    "Date",
    "Example",
    "Experiment",
    "Important",
    "Invariant",
    "Note",
    "Precondition",
    "Postcondition",
    "Remark",
    "Requires",
    "SeeAlso",
    "Since",
    "Version",
    "Warning",
];

pub fn is_callout_key(tag: &str) -> bool {
    matches!(
        tag,
        "Attention"
            | "Author"
            | "Authors"
            | "Bug"
            | "Complexity"
            | "Copyright"
            | "Date"
            | "Example"
            | "Experiment"
            | "Important"
            | "Invariant"
            | "Note"
            | "Precondition"
            | "Postcondition"
            | "Remark"
            | "Requires"
            | "SeeAlso"
            | "Since"
            | "Version"
            | "Warning"
    )
}

/// A callout key or one of the structural keys (Paragraph, CodeListing,
/// ListBullet, Item).
pub fn is_discussion_key(tag: &str) -> bool {
    is_callout_key(tag) || matches!(tag, "Paragraph" | "CodeListing" | "ListBullet" | "Item")
}

/// Human form of a callout key for block summaries.
pub fn display_name(key: &str) -> &str {
    match key {
        "SeeAlso" => "See Also",
        _ => key,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn callout_membership() {
        assert!(is_callout_key("Note"));
        assert!(is_callout_key("SeeAlso"));
        assert!(!is_callout_key("Paragraph"));
        assert!(!is_callout_key("note"));
        assert!(!is_callout_key(""));
    }

    #[test]
    fn discussion_membership() {
        assert!(is_discussion_key("Warning"));
        assert!(is_discussion_key("CodeListing"));
        assert!(is_discussion_key("Item"));
        assert!(!is_discussion_key("Link"));
        assert!(!is_discussion_key("Discussion"));
    }

    #[test]
    fn declared_order_puts_note_before_warning() {
        let note = CALLOUT_KEYS.iter().position(|k| *k == "Note").unwrap();
        let warning = CALLOUT_KEYS.iter().position(|k| *k == "Warning").unwrap();
        assert!(note < warning);
    }

    #[test]
    fn every_declared_key_is_a_callout() {
        for key in CALLOUT_KEYS {
            assert!(is_callout_key(key), "{key} missing from membership check");
        }
    }

    #[test]
    fn display_names() {
        assert_eq!(display_name("Note"), "Note");
        assert_eq!(display_name("SeeAlso"), "See Also");
    }
}
