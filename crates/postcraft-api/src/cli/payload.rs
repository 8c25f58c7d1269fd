//! `pcraft payload`: build a request payload without sending it.

use anyhow::{Context, Result, bail};
use console::style;

use postcraft_core::input;
use postcraft_core::payload::PayloadBuilder;
use postcraft_types::input::CampaignInput;
use postcraft_types::payload::{GenerationPayload, PayloadPart};

use crate::cli::read_source;

/// Validate an input file and print the payload it would produce.
pub async fn show_payload(source: &str, json: bool) -> Result<()> {
    let raw = read_source(source).await?;
    let campaign: CampaignInput =
        serde_json::from_str(&raw).context("input is not a valid campaign JSON document")?;

    let problems = input::problems(&campaign);
    if !problems.is_empty() {
        for p in &problems {
            eprintln!("  {} {p}", style("✗").red().bold());
        }
        bail!("input has {} problem(s)", problems.len());
    }

    let payload = PayloadBuilder::build(&campaign);

    if json {
        println!("{}", serde_json::to_string_pretty(&payload)?);
        return Ok(());
    }

    println!();
    for line in describe_parts(&payload) {
        println!("  {line}");
    }
    println!();
    if let Some(text) = payload.instruction_text() {
        println!("{text}");
    }
    Ok(())
}

/// One summary line per payload part; image data is not echoed.
pub fn describe_parts(payload: &GenerationPayload) -> Vec<String> {
    payload
        .parts
        .iter()
        .enumerate()
        .map(|(i, part)| match part {
            PayloadPart::Text { text } => {
                let first = text.lines().next().unwrap_or_default();
                format!("[{i}] text ({} chars) {first}", text.chars().count())
            }
            PayloadPart::InlineImage { mime_type, data } => {
                format!("[{i}] image {mime_type} ({} base64 chars)", data.len())
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_describe_parts() {
        let payload = GenerationPayload {
            parts: vec![
                PayloadPart::text("This is the selected image for the X platform:"),
                PayloadPart::InlineImage {
                    mime_type: "image/png".into(),
                    data: "aGVsbG8=".into(),
                },
                PayloadPart::text("line one\nline two"),
            ],
        };

        assert_eq!(
            describe_parts(&payload),
            vec![
                "[0] text (46 chars) This is the selected image for the X platform:",
                "[1] image image/png (8 base64 chars)",
                "[2] text (17 chars) line one",
            ]
        );
    }
}
