//! Classification of variation body lines.

use std::sync::LazyLock;

use regex::Regex;

use postcraft_types::parsed::BodyLine;

use super::inline;

static LABEL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\*\*([\w\s]+):\*\*(.*)$").expect("label regex is valid")
});

/// Label that receives distinguished emphasis, compared case-insensitively.
pub const CTA_LABEL: &str = "cta";

/// Classify one line of a variation body.
pub fn classify(line: &str) -> BodyLine {
    if line.trim().is_empty() {
        return BodyLine::Spacer;
    }
    if let Some((label, rest)) = split_label(line) {
        return BodyLine::Field {
            emphasis: label.eq_ignore_ascii_case(CTA_LABEL),
            label: label.to_string(),
            spans: inline::spans(rest.trim()),
        };
    }
    BodyLine::Paragraph {
        spans: inline::spans(line),
    }
}

/// Split a `**Label:** rest` line into its label and the untrimmed rest.
pub fn split_label(line: &str) -> Option<(&str, &str)> {
    let caps = LABEL_RE.captures(line)?;
    let label = caps.get(1)?.as_str();
    let rest = caps.get(2).map_or("", |m| m.as_str());
    Some((label, rest))
}

#[cfg(test)]
mod tests {
    use super::*;
    use postcraft_types::parsed::Span;

    #[test]
    fn test_blank_line_is_spacer() {
        assert_eq!(classify(""), BodyLine::Spacer);
        assert_eq!(classify("   \t"), BodyLine::Spacer);
    }

    #[test]
    fn test_labeled_field() {
        let line = classify("**Hook:** Buy now");
        assert_eq!(
            line,
            BodyLine::Field {
                label: "Hook".into(),
                emphasis: false,
                spans: vec![Span::Text("Buy now".into())],
            }
        );
    }

    #[test]
    fn test_cta_gets_emphasis_case_insensitive() {
        for text in ["**CTA:** Shop", "**cta:** Shop", "**Cta:** Shop"] {
            match classify(text) {
                BodyLine::Field { emphasis, .. } => assert!(emphasis, "{text}"),
                other => panic!("expected field, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_multi_word_label() {
        let (label, rest) = split_label("**First Comment:**Nice").unwrap();
        assert_eq!(label, "First Comment");
        assert_eq!(rest, "Nice");
    }

    #[test]
    fn test_bold_without_colon_is_paragraph() {
        assert!(matches!(classify("**Bold** words"), BodyLine::Paragraph { .. }));
        assert!(matches!(classify("text **Hook:** later"), BodyLine::Paragraph { .. }));
    }

    #[test]
    fn test_field_value_recognizes_tokens() {
        match classify("**Hashtags:** #Lamp #Decor") {
            BodyLine::Field { spans, .. } => {
                assert_eq!(spans[0], Span::Hashtag("#Lamp".into()));
                assert_eq!(spans[2], Span::Hashtag("#Decor".into()));
            }
            other => panic!("expected field, got {other:?}"),
        }
    }
}
