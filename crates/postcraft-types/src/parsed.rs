//! Parsed display record derived from generated text.
//!
//! Never persisted: it is recomputed from the stored content whenever a
//! generated or saved output is displayed.

use serde::{Deserialize, Serialize};

/// Generated text split into platform and variation blocks.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedOutput {
    pub platforms: Vec<PlatformBlock>,
}

impl ParsedOutput {
    pub fn is_empty(&self) -> bool {
        self.platforms.is_empty()
    }

    /// Total number of variations across all platform blocks.
    pub fn variation_count(&self) -> usize {
        self.platforms.iter().map(|p| p.variations.len()).sum()
    }

    /// Every variation in display order, paired with its platform block.
    pub fn variations(&self) -> impl Iterator<Item = (&PlatformBlock, &VariationBlock)> {
        self.platforms
            .iter()
            .flat_map(|p| p.variations.iter().map(move |v| (p, v)))
    }
}

/// Everything under one `## ` heading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlatformBlock {
    pub title: String,
    pub variations: Vec<VariationBlock>,
}

/// One `### ` sub-block within a platform block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariationBlock {
    pub title: String,
    /// Trimmed body text, markdown markers intact.
    pub body: String,
    /// The body classified line by line.
    pub lines: Vec<BodyLine>,
}

/// A classified body line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BodyLine {
    /// Blank line, rendered as vertical spacing.
    Spacer,
    /// A `**Label:** value` line.
    Field {
        label: String,
        /// Set for the call-to-action label.
        emphasis: bool,
        spans: Vec<Span>,
    },
    Paragraph { spans: Vec<Span> },
}

/// An inline piece of rendered text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "text", rename_all = "snake_case")]
pub enum Span {
    Text(String),
    Url(String),
    Hashtag(String),
}

impl Span {
    pub fn as_str(&self) -> &str {
        match self {
            Span::Text(s) | Span::Url(s) | Span::Hashtag(s) => s,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_variation_count() {
        let parsed = ParsedOutput {
            platforms: vec![
                PlatformBlock {
                    title: "Instagram".to_string(),
                    variations: vec![
                        VariationBlock {
                            title: "Variation 1".to_string(),
                            body: "Hi".to_string(),
                            lines: vec![],
                        };
                        2
                    ],
                },
                PlatformBlock {
                    title: "X".to_string(),
                    variations: vec![],
                },
            ],
        };
        assert_eq!(parsed.variation_count(), 2);
        assert!(!parsed.is_empty());
    }

    #[test]
    fn test_span_serde_shape() {
        let json = serde_json::to_value(Span::Hashtag("#Sale".to_string())).unwrap();
        assert_eq!(json["type"], "hashtag");
        assert_eq!(json["text"], "#Sale");
    }
}
