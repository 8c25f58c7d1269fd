//! Plain-text derivations of generated content: copy text without
//! markdown, list previews, and per-variation copy text.

use std::sync::LazyLock;

use regex::Regex;

use postcraft_types::parsed::VariationBlock;

use crate::parse::{self, line};

static HEADING_LINE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^#{2,3}(\s|$)").expect("heading regex is valid"));

static BOLD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*\*(.+?)\*\*").expect("bold regex is valid"));

static BLANK_RUN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n{3,}").expect("blank-run regex is valid"));

/// Strip markdown from generated text so it can be pasted as a post.
///
/// Heading lines are dropped, a leading `**Label:**` is dropped with its
/// label, remaining bold markers keep their inner text, and runs of blank
/// lines collapse to one.
pub fn to_plain_text(text: &str) -> String {
    let text = parse::normalize_line_endings(text);
    let kept: Vec<String> = text
        .split('\n')
        .filter(|l| !HEADING_LINE_RE.is_match(l))
        .map(|l| {
            let l = match line::split_label(l) {
                Some((_, rest)) => rest.trim_start(),
                None => l,
            };
            BOLD_RE.replace_all(l, "$1").trim_end().to_string()
        })
        .collect();
    let joined = kept.join("\n");
    BLANK_RUN_RE.replace_all(&joined, "\n\n").trim().to_string()
}

/// First non-empty line of `content` with heading and bold markers
/// removed. Used for saved-output listings.
pub fn preview_line(content: &str) -> Option<String> {
    let cleaned = content.replace("###", "").replace("##", "").replace("**", "");
    parse::normalize_line_endings(&cleaned)
        .split('\n')
        .map(str::trim)
        .find(|l| !l.is_empty())
        .map(str::to_string)
}

/// Copy text for one variation: its title, a blank line, then its body.
pub fn variation_copy_text(variation: &VariationBlock) -> String {
    format!("{}\n\n{}", variation.title, variation.body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_example() {
        assert_eq!(to_plain_text("## A\n**Hook:** Hi\n\n\n\nBye"), "Hi\n\nBye");
    }

    #[test]
    fn test_plain_text_keeps_inline_bold_content() {
        assert_eq!(
            to_plain_text("Our **best** lamp yet\n**CTA:** Shop **now**"),
            "Our best lamp yet\nShop now"
        );
    }

    #[test]
    fn test_plain_text_drops_variation_headings() {
        let text = "## Instagram\r\n### Variation 1\r\n**Hook:** One\r\n### Variation 2\r\n**Hook:** Two\r\n";
        assert_eq!(to_plain_text(text), "One\nTwo");
    }

    #[test]
    fn test_plain_text_keeps_hashtags() {
        assert_eq!(
            to_plain_text("**Hashtags:** #Lamp #Decor\n#NoSpace"),
            "#Lamp #Decor\n#NoSpace"
        );
    }

    #[test]
    fn test_plain_text_whitespace_only_lines_collapse() {
        assert_eq!(to_plain_text("a\n  \n \t\n\nb"), "a\n\nb");
        assert_eq!(to_plain_text("   "), "");
    }

    #[test]
    fn test_preview_line() {
        let content = "\n## Instagram\n### Variation 1\n**Hook:** Hi";
        assert_eq!(preview_line(content).as_deref(), Some("Instagram"));
        assert_eq!(preview_line("**Hook:** Glow"), Some("Hook: Glow".to_string()));
        assert_eq!(preview_line("  \n\n"), None);
    }

    #[test]
    fn test_variation_copy_text() {
        let v = VariationBlock {
            title: "Variation 2".to_string(),
            body: "**Hook:** Hi\nBye".to_string(),
            lines: vec![],
        };
        assert_eq!(variation_copy_text(&v), "Variation 2\n\n**Hook:** Hi\nBye");
    }
}
