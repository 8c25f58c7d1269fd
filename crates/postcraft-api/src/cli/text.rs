//! Offline text commands: parse and plain.

use anyhow::Result;
use console::style;

use postcraft_core::{parse, plain};

use crate::cli::read_source;
use crate::cli::render::{RenderContext, render_parsed};

/// Parse generated text and show its platform and variation blocks.
pub async fn parse_text(source: &str, json: bool) -> Result<()> {
    let text = read_source(source).await?;
    let parsed = parse::parse(&text);

    if json {
        println!("{}", serde_json::to_string_pretty(&parsed)?);
        return Ok(());
    }

    if parsed.is_empty() {
        println!();
        println!("  {} Nothing to parse.", style("i").blue().bold());
        println!();
        return Ok(());
    }

    print!("{}", render_parsed(&parsed, &RenderContext::detect()));
    println!(
        "  {}",
        style(format!(
            "{} platform(s), {} variation(s)",
            parsed.platforms.len(),
            parsed.variation_count()
        ))
        .dim()
    );
    Ok(())
}

/// Print generated text with markdown removed.
pub async fn plain_text(source: &str, json: bool) -> Result<()> {
    let text = read_source(source).await?;
    let plain = plain::to_plain_text(&text);

    if json {
        println!("{}", serde_json::json!({ "text": plain }));
    } else {
        println!("{plain}");
    }
    Ok(())
}
