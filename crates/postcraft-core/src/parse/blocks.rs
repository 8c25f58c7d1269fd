//! Splitting text into platform and variation blocks.

/// Title used for text that has no `## ` heading.
pub const DEFAULT_PLATFORM_TITLE: &str = "Untitled Output";

/// Title of the single variation synthesized when a block has no `### `.
pub const SYNTHESIZED_VARIATION_TITLE: &str = "Variant 1";

pub const PLATFORM_MARKER: &str = "## ";
pub const VARIATION_MARKER: &str = "### ";

/// A titled run of lines, borrowed from the source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawBlock<'a> {
    pub title: Option<&'a str>,
    pub lines: Vec<&'a str>,
}

impl RawBlock<'_> {
    /// The block's lines joined and trimmed.
    pub fn body(&self) -> String {
        self.lines.join("\n").trim().to_string()
    }
}

/// Split `lines` at every line starting with `marker`.
///
/// Lines before the first marker form a leading untitled block, returned
/// only when it contains non-blank text. Returns `None` when no line
/// carries the marker.
pub fn split_at_marker<'a>(lines: &[&'a str], marker: &str) -> Option<(RawBlock<'a>, Vec<RawBlock<'a>>)> {
    let first = lines.iter().position(|l| l.starts_with(marker))?;
    let preamble = RawBlock {
        title: None,
        lines: lines[..first].to_vec(),
    };

    let mut blocks: Vec<RawBlock<'a>> = Vec::new();
    for &line in &lines[first..] {
        if let Some(title) = line.strip_prefix(marker) {
            blocks.push(RawBlock {
                title: Some(title.trim()),
                lines: Vec::new(),
            });
        } else if let Some(current) = blocks.last_mut() {
            current.lines.push(line);
        }
    }
    Some((preamble, blocks))
}

/// Split the whole text into platform blocks.
pub fn platform_blocks<'a>(lines: &[&'a str]) -> Vec<RawBlock<'a>> {
    match split_at_marker(lines, PLATFORM_MARKER) {
        None => vec![RawBlock {
            title: None,
            lines: lines.to_vec(),
        }],
        Some((preamble, blocks)) => {
            let mut out = Vec::with_capacity(blocks.len() + 1);
            if !preamble.body().is_empty() {
                out.push(preamble);
            }
            out.extend(blocks);
            out
        }
    }
}

/// A variation as (title, trimmed body).
pub type RawVariation = (String, String);

/// Split a platform block body into its variations.
///
/// Explicit variations with an empty title or body are dropped. Text before
/// the first `### ` is ignored when explicit variations exist.
pub fn variations(block_lines: &[&str]) -> Vec<RawVariation> {
    match split_at_marker(block_lines, VARIATION_MARKER) {
        None => {
            let body = block_lines.join("\n").trim().to_string();
            if body.is_empty() {
                Vec::new()
            } else {
                vec![(SYNTHESIZED_VARIATION_TITLE.to_string(), body)]
            }
        }
        Some((_, blocks)) => blocks
            .into_iter()
            .filter_map(|b| {
                let title = b.title.unwrap_or_default().to_string();
                let body = b.body();
                (!title.is_empty() && !body.is_empty()).then_some((title, body))
            })
            .collect(),
    }
}
