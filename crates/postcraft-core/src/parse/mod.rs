//! Output parser: generated markdown-convention text into a [`ParsedOutput`].
//!
//! The text is split into platform blocks at `## ` lines and into
//! variation blocks at `### ` lines. Each variation body is classified line
//! by line into labeled fields, paragraphs and spacers, and every span of
//! text is scanned for URLs and hashtags. Parsing never fails: text without
//! the heading convention still yields one implicit block.

pub mod blocks;
pub mod inline;
pub mod line;

use postcraft_types::parsed::{ParsedOutput, PlatformBlock, VariationBlock};

pub use blocks::{DEFAULT_PLATFORM_TITLE, SYNTHESIZED_VARIATION_TITLE};

/// Convert `\r\n` and lone `\r` line endings to `\n`.
pub fn normalize_line_endings(text: &str) -> String {
    text.replace("\r\n", "\n").replace('\r', "\n")
}

/// Parse generated text into platform and variation blocks.
///
/// Empty or whitespace-only text yields an empty record.
pub fn parse(text: &str) -> ParsedOutput {
    let text = normalize_line_endings(text);
    if text.trim().is_empty() {
        return ParsedOutput::default();
    }

    let lines: Vec<&str> = text.split('\n').collect();
    let platforms = blocks::platform_blocks(&lines)
        .into_iter()
        .map(|block| PlatformBlock {
            title: block
                .title
                .filter(|t| !t.is_empty())
                .unwrap_or(DEFAULT_PLATFORM_TITLE)
                .to_string(),
            variations: blocks::variations(&block.lines)
                .into_iter()
                .map(|(title, body)| VariationBlock {
                    lines: body.split('\n').map(line::classify).collect(),
                    title,
                    body,
                })
                .collect(),
        })
        .collect();

    ParsedOutput { platforms }
}
