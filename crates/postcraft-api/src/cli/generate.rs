//! `pcraft generate`: assemble a campaign input, run one generation and
//! show the result.
//!
//! # Examples
//!
//! ```bash
//! # One-shot with flags
//! pcraft generate --niche "handmade soap" -p instagram,linkedin --save
//!
//! # From an input file, attaching an image to Instagram
//! pcraft generate --input campaign.json --image instagram=./bar.jpg
//! ```

use std::path::Path;

use anyhow::{Context, Result, anyhow};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use postcraft_core::{input, parse, plain};
use postcraft_infra::image;
use postcraft_types::input::{CampaignInput, ImageSelection, SettingValue};
use postcraft_types::platform::Platform;

use crate::cli::render::{RenderContext, render_parsed, render_sources};
use crate::cli::{GenerateArgs, read_source};
use crate::state::AppState;

const DEFAULT_AUDIENCE: &str = "general";
const DEFAULT_STYLE: &str = "friendly";
const DEFAULT_CTA_STYLE: &str = "soft";

pub async fn generate(state: &AppState, args: GenerateArgs, json: bool, quiet: bool) -> Result<()> {
    let campaign = build_input(&args).await?;

    let spinner = if json || quiet {
        ProgressBar::hidden()
    } else {
        ProgressBar::new_spinner()
    };
    spinner.set_style(ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}")?);
    spinner.set_message(format!(
        "Writing copy for {}...",
        campaign
            .platforms
            .iter()
            .map(Platform::name)
            .collect::<Vec<_>>()
            .join(", ")
    ));
    spinner.enable_steady_tick(std::time::Duration::from_millis(80));

    let result = state.service.generate(&campaign).await;
    spinner.finish_and_clear();
    let output = result?;

    let saved = if args.save {
        let platforms = campaign.platforms.iter().copied().collect();
        Some(state.service.save(output.clone(), platforms).await?)
    } else {
        None
    };

    if json {
        let value = serde_json::json!({
            "output": output,
            "parsed": parse::parse(&output.content),
            "saved": saved.is_some(),
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    if args.plain {
        println!("{}", plain::to_plain_text(&output.content));
        return Ok(());
    }

    let ctx = RenderContext::detect();
    println!();
    print!("{}", render_parsed(&parse::parse(&output.content), &ctx));
    print!("{}", render_sources(&output.sources, &ctx));

    if quiet {
        return Ok(());
    }
    println!();
    match saved {
        Some(s) => println!(
            "  {} Saved as {}",
            style("✓").green().bold(),
            style(s.id.to_string()).dim()
        ),
        None => println!(
            "  {}",
            style(format!("Output {} (rerun with --save to keep it)", output.id)).dim()
        ),
    }
    println!();
    Ok(())
}

/// Assemble the campaign input from an optional input file and flags.
///
/// Flag values override the file's scalar fields; platforms, images and
/// settings are applied through the editing operations so the result stays
/// consistent.
pub async fn build_input(args: &GenerateArgs) -> Result<CampaignInput> {
    let mut campaign = match &args.input {
        Some(source) => serde_json::from_str(&read_source(source).await?)
            .context("input is not a valid campaign JSON document")?,
        None => CampaignInput {
            audience: DEFAULT_AUDIENCE.to_string(),
            style: DEFAULT_STYLE.to_string(),
            cta_style: DEFAULT_CTA_STYLE.to_string(),
            ..Default::default()
        },
    };

    if let Some(niche) = &args.niche {
        campaign.niche = niche.clone();
    }
    if let Some(audience) = &args.audience {
        campaign.audience = audience.clone();
    }
    if let Some(style) = &args.style {
        campaign.style = style.clone();
    }
    if let Some(cta) = &args.cta {
        campaign.cta_style = cta.clone();
    }
    if let Some(link) = &args.link {
        campaign.product_link = Some(link.clone());
    }
    if let Some(hashtags) = &args.hashtags {
        campaign.custom_hashtags = Some(hashtags.clone());
    }

    for name in &args.platforms {
        input::select_platform(&mut campaign, parse_platform(name)?);
    }

    for assignment in &args.images {
        let (platform, path) = split_assignment(assignment)?;
        let platform = parse_platform(platform)?;
        let data_url = image::read_data_url(Path::new(path))
            .await
            .with_context(|| format!("failed to attach image {path}"))?;
        input::add_images(&mut campaign, platform, [data_url])?;
    }

    for assignment in &args.image_selection {
        let (platform, selection) = split_assignment(assignment)?;
        let selection: ImageSelection = selection.parse().map_err(|e: String| anyhow!(e))?;
        input::select_image(&mut campaign, parse_platform(platform)?, selection)?;
    }

    for assignment in &args.settings {
        let (key, value) = split_assignment(assignment)?;
        let (platform, id) = key
            .split_once('.')
            .ok_or_else(|| anyhow!("setting '{assignment}' must look like PLATFORM.ID=VALUE"))?;
        input::set_setting(
            &mut campaign,
            parse_platform(platform)?,
            id.trim(),
            SettingValue::from(value),
        )?;
    }

    Ok(campaign)
}

fn parse_platform(name: &str) -> Result<Platform> {
    name.parse::<Platform>().map_err(|e| anyhow!(e))
}

fn split_assignment(assignment: &str) -> Result<(&str, &str)> {
    assignment
        .split_once('=')
        .map(|(k, v)| (k.trim(), v.trim()))
        .ok_or_else(|| anyhow!("expected KEY=VALUE, got '{assignment}'"))
}
