//! Normalizes every generator answer into markdown-convention text.
//!
//! The generation contract is markdown, but a generator can still answer
//! with the structured JSON schema, either natively or as JSON inside its
//! text (often fenced). Those answers are rendered to markdown here so the
//! parser and storage only ever see one shape.

use std::collections::BTreeMap;
use std::fmt::Write as _;

use postcraft_types::output::GenerationResponse;
use postcraft_types::structured::{StructuredOutput, Variant};

use crate::parse::blocks::{PLATFORM_MARKER, VARIATION_MARKER};

/// Collapse a generator response into markdown-convention text.
pub fn normalize(response: GenerationResponse) -> String {
    match response {
        GenerationResponse::Structured(structured) => to_markdown(&structured),
        GenerationResponse::Text(text) => match detect_structured(&text) {
            Some(structured) => {
                tracing::debug!(
                    platforms = structured.platforms.len(),
                    "response text was structured JSON, converting to markdown"
                );
                to_markdown(&structured)
            }
            None => text.trim().to_string(),
        },
    }
}

/// Recognize structured JSON in a text answer.
///
/// Accepts an optional ```` ```json ```` fence and documents that omit the
/// top-level `platforms` wrapper.
pub fn detect_structured(text: &str) -> Option<StructuredOutput> {
    let body = strip_code_fence(text.trim());
    if !body.starts_with('{') {
        return None;
    }

    if let Ok(structured) = serde_json::from_str::<StructuredOutput>(body) {
        if !structured.platforms.is_empty() {
            return Some(structured);
        }
    }
    serde_json::from_str::<BTreeMap<String, Vec<Variant>>>(body)
        .ok()
        .filter(|platforms| !platforms.is_empty())
        .map(|platforms| StructuredOutput {
            product: None,
            platforms,
        })
}

fn strip_code_fence(text: &str) -> &str {
    let Some(rest) = text.strip_prefix("```") else {
        return text;
    };
    // Drop the info string ("json") on the opening fence line.
    let rest = rest.split_once('\n').map_or("", |(_, body)| body);
    rest.trim_end().strip_suffix("```").unwrap_or(rest).trim()
}

/// Render structured variants as `## Platform` / `### Variant X` blocks.
pub fn to_markdown(output: &StructuredOutput) -> String {
    let mut out = String::new();
    for (platform, variants) in &output.platforms {
        let _ = writeln!(out, "{PLATFORM_MARKER}{}", single_line(platform));
        for (index, variant) in variants.iter().enumerate() {
            out.push('\n');
            write_variant(&mut out, index, variant);
        }
        out.push('\n');
    }
    out.trim().to_string()
}

fn write_variant(out: &mut String, index: usize, variant: &Variant) {
    let id = match single_line(&variant.variant) {
        id if id.is_empty() => (index + 1).to_string(),
        id => id,
    };
    match variant.title.as_deref().map(single_line).filter(|t| !t.is_empty()) {
        Some(title) => {
            let _ = writeln!(out, "### Variant {id}: {title}");
        }
        None => {
            let _ = writeln!(out, "### Variant {id}");
        }
    }

    let hashtags = variant
        .hashtags
        .iter()
        .map(|h| h.trim())
        .filter(|h| !h.is_empty())
        .map(|h| {
            if h.starts_with('#') {
                h.to_string()
            } else {
                format!("#{h}")
            }
        })
        .collect::<Vec<_>>()
        .join(" ");

    let fields: [(&str, Option<&str>); 11] = [
        ("Caption", variant.body()),
        ("Hashtags", Some(hashtags.as_str())),
        ("CTA", Some(variant.cta.as_str())),
        ("First Comment", variant.first_comment.as_deref()),
        ("Image", Some(variant.image_suggest.as_str())),
        ("Alt Text", Some(variant.alt_text.as_str())),
        ("Meta Title", Some(variant.meta_title.as_str())),
        ("Meta Description", Some(variant.meta_description.as_str())),
        ("Best Time", Some(variant.suggested_post_time.as_str())),
        ("Length Notes", Some(variant.length_limit_notes.as_str())),
        ("Video Script", variant.video_script.as_deref()),
    ];
    for (label, value) in fields {
        if let Some(value) = value.map(str::trim).filter(|v| !v.is_empty()) {
            let _ = writeln!(out, "**{label}:** {}", without_headings(value));
        }
    }
}

/// Collapse a heading's text onto one line.
fn single_line(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Strip the marker from value lines that would open a new block.
fn without_headings(value: &str) -> String {
    value
        .split('\n')
        .map(|line| {
            if line.starts_with(PLATFORM_MARKER) || line.starts_with(VARIATION_MARKER) {
                line.trim_start_matches('#').trim_start()
            } else {
                line
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}
