//! Markdown formatting primitives shared by the renderers.

/// Wrap text in a fenced code block. An empty `language` leaves the fence
/// untagged.
pub fn fenced_block(text: &str, language: &str) -> String {
    format!("```{}\n{}\n```", language, text)
}

/// A collapsible block: `summary` on the toggle line, `body` inside.
pub fn collapsible(summary: &str, body: &str) -> String {
    format!(
        "<details>\n<summary>{}</summary>\n\n{}\n\n</details>",
        summary, body
    )
}

/// Link to a heading elsewhere in the same document.
pub fn anchor_link(text: &str) -> String {
    format!("[{}](#{})", text, heading_anchor(text))
}

/// GitHub heading anchor slug: lowercase, keep alphanumerics, spaces and
/// hyphens, then turn spaces into hyphens.
fn heading_anchor(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    for c in text.to_lowercase().chars() {
        if c.is_alphanumeric() || c == ' ' || c == '-' {
            slug.push(c);
        }
    }
    slug.replace(' ', "-")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fenced() {
        assert_eq!(fenced_block("let x = 1", "swift"), "```swift\nlet x = 1\n```");
        assert_eq!(fenced_block("", "swift"), "```swift\n\n```");
        assert_eq!(fenced_block("a", ""), "```\na\n```");
    }

    #[test]
    fn collapsible_block() {
        assert_eq!(
            collapsible("Note", "first\n\nsecond"),
            "<details>\n<summary>Note</summary>\n\nfirst\n\nsecond\n\n</details>"
        );
    }

    #[test]
    fn anchor_simple() {
        assert_eq!(anchor_link("hello world"), "[hello world](#hello-world)");
    }

    #[test]
    fn anchor_strips_punctuation() {
        assert_eq!(anchor_link("greet(_:)"), "[greet(_:)](#greet)");
        assert_eq!(anchor_link("Foo.Bar"), "[Foo.Bar](#foobar)");
    }
}
