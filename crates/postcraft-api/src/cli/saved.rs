//! Saved output library commands: list, show, delete.

use anyhow::{Result, anyhow};
use chrono::{DateTime, Utc};
use comfy_table::{Cell, Color, ContentArrangement, Table, presets};
use console::style;
use dialoguer::Confirm;

use postcraft_core::{parse, plain};
use postcraft_types::output::SavedOutput;
use postcraft_types::parsed::ParsedOutput;

use crate::cli::parse_id;
use crate::cli::render::{RenderContext, render_parsed, render_sources};
use crate::state::AppState;

const PREVIEW_WIDTH: usize = 60;

/// List saved outputs, newest first.
pub async fn list_saved(state: &AppState, json: bool) -> Result<()> {
    let saved = state.service.list_saved().await?;

    if json {
        let rows: Vec<serde_json::Value> = saved
            .iter()
            .map(|s| {
                serde_json::json!({
                    "id": s.id,
                    "saved_at": s.saved_at,
                    "platforms": s.platforms,
                    "preview": plain::preview_line(&s.content),
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    if saved.is_empty() {
        println!();
        println!(
            "  {} No saved outputs. Keep one with: {}",
            style("i").blue().bold(),
            style("pcraft generate --save").yellow()
        );
        println!();
        return Ok(());
    }

    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        Cell::new("ID").fg(Color::White),
        Cell::new("Saved").fg(Color::White),
        Cell::new("Platforms").fg(Color::White),
        Cell::new("Preview").fg(Color::White),
    ]);

    let now = Utc::now();
    for s in &saved {
        table.add_row(vec![
            Cell::new(s.id.to_string()).fg(Color::DarkGrey),
            Cell::new(format_relative_time(&s.saved_at, &now)),
            Cell::new(platform_list(s)).fg(Color::Cyan),
            Cell::new(preview(s)),
        ]);
    }

    println!();
    println!("{table}");
    println!();
    println!("  {} saved output(s)", saved.len());
    println!();
    Ok(())
}

/// Show one saved output, or the copy text of one of its variations.
pub async fn show_saved(
    state: &AppState,
    id: &str,
    plain_text: bool,
    variation: Option<usize>,
    json: bool,
) -> Result<()> {
    let id = parse_id(id)?;
    let saved = state.service.get_saved(&id).await?;

    if let Some(number) = variation {
        let text = variation_copy(&parse::parse(&saved.content), number)?;
        if json {
            println!("{}", serde_json::json!({ "variation": number, "copy_text": text }));
        } else {
            println!("{text}");
        }
        return Ok(());
    }

    if json {
        let value = serde_json::json!({
            "saved": saved,
            "parsed": parse::parse(&saved.content),
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    if plain_text {
        println!("{}", plain::to_plain_text(&saved.content));
        return Ok(());
    }

    let ctx = RenderContext::detect();
    println!();
    println!(
        "  {} {}",
        style("Saved").bold(),
        style(saved.saved_at.format("%Y-%m-%d %H:%M UTC").to_string()).dim()
    );
    println!();
    print!("{}", render_parsed(&parse::parse(&saved.content), &ctx));
    print!("{}", render_sources(&saved.sources, &ctx));
    println!();
    Ok(())
}

/// Delete a saved output, confirming first unless `force` or `json`.
pub async fn delete_saved(state: &AppState, id: &str, force: bool, json: bool) -> Result<()> {
    let id = parse_id(id)?;
    let saved = state.service.get_saved(&id).await?;

    if !force && !json {
        let confirmed = Confirm::new()
            .with_prompt(format!(
                "Delete saved output '{}'?",
                style(preview(&saved)).red().bold()
            ))
            .default(false)
            .interact()?;

        if !confirmed {
            println!("  Cancelled.");
            return Ok(());
        }
    }

    state.service.delete_saved(&id).await?;

    if json {
        println!("{}", serde_json::json!({"deleted": true, "id": id}));
    } else {
        println!("  {} Saved output deleted.", style("✓").red().bold());
    }
    Ok(())
}

fn preview(saved: &SavedOutput) -> String {
    let line = plain::preview_line(&saved.content).unwrap_or_else(|| "(empty)".to_string());
    console::truncate_str(&line, PREVIEW_WIDTH, "...").into_owned()
}

/// Copy text of the `number`th variation, counting from 1 across all platforms.
fn variation_copy(parsed: &ParsedOutput, number: usize) -> Result<String> {
    number
        .checked_sub(1)
        .and_then(|index| parsed.variations().nth(index))
        .map(|(_, variation)| plain::variation_copy_text(variation))
        .ok_or_else(|| {
            anyhow!(
                "variation {number} does not exist (output has {})",
                parsed.variation_count()
            )
        })
}

fn platform_list(saved: &SavedOutput) -> String {
    saved
        .platforms
        .iter()
        .map(|p| p.name())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Human-friendly relative time ("3m ago", "2d ago").
fn format_relative_time(dt: &DateTime<Utc>, now: &DateTime<Utc>) -> String {
    let diff = now.signed_duration_since(*dt);

    if diff.num_seconds() < 60 {
        "just now".to_string()
    } else if diff.num_minutes() < 60 {
        format!("{}m ago", diff.num_minutes())
    } else if diff.num_hours() < 24 {
        format!("{}h ago", diff.num_hours())
    } else if diff.num_days() < 30 {
        format!("{}d ago", diff.num_days())
    } else {
        dt.format("%Y-%m-%d").to_string()
    }
}
