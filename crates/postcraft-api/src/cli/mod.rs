//! CLI command definitions for the `pcraft` binary.
//!
//! Uses clap derive macros for argument parsing. Text commands (`parse`,
//! `plain`, `payload`, `platforms`) work offline without touching the data
//! directory; the rest go through [`crate::state::AppState`].

pub mod generate;
pub mod payload;
pub mod platforms;
pub mod render;
pub mod saved;
pub mod text;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;
use tokio::io::AsyncReadExt;

/// Generate platform-tailored social media copy.
#[derive(Parser)]
#[command(name = "pcraft", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output machine-readable JSON instead of styled text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress all output except errors.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for verbose, -vv for debug/trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Write logs to stderr as JSON lines.
    #[arg(long, global = true)]
    pub log_json: bool,

    /// Export spans to stdout through OpenTelemetry.
    #[arg(long, global = true, env = "POSTCRAFT_OTEL", hide = true)]
    pub otel: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate copy for the selected platforms.
    #[command(alias = "gen")]
    Generate(GenerateArgs),

    /// Parse generated text into platform and variation blocks.
    Parse {
        /// File with generated text, or `-` for stdin.
        file: String,
    },

    /// Strip markdown from generated text.
    Plain {
        /// File with generated text, or `-` for stdin.
        file: String,
    },

    /// Build the request payload for an input file without sending it.
    Payload {
        /// Campaign input JSON file, or `-` for stdin.
        input: String,
    },

    /// List the supported platforms and their settings.
    Platforms,

    /// Manage saved outputs.
    Saved {
        #[command(subcommand)]
        action: SavedCommand,
    },

    /// Start the REST API server.
    Serve {
        /// Port to listen on (defaults to the configured port).
        #[arg(short, long)]
        port: Option<u16>,

        /// Host to bind to (defaults to the configured host).
        #[arg(long)]
        host: Option<String>,
    },

    /// Generate shell completions.
    Completions {
        /// Shell to generate completions for.
        shell: Shell,
    },
}

/// Inputs for `pcraft generate`.
///
/// With `--input`, the file is the starting point and flags override or add
/// to it. Without it, `--niche` and at least one `--platform` are required.
#[derive(Args, Debug, Default)]
pub struct GenerateArgs {
    /// Campaign input JSON file, or `-` for stdin.
    #[arg(short, long)]
    pub input: Option<String>,

    /// Niche or product description.
    #[arg(short, long)]
    pub niche: Option<String>,

    /// Target audience (e.g. general, professionals, parents).
    #[arg(long)]
    pub audience: Option<String>,

    /// Content style (e.g. friendly, professional, humorous).
    #[arg(long)]
    pub style: Option<String>,

    /// Call-to-action style (e.g. soft, direct, urgent).
    #[arg(long)]
    pub cta: Option<String>,

    /// Platform to write for (repeatable or comma-separated).
    #[arg(short, long = "platform", value_delimiter = ',')]
    pub platforms: Vec<String>,

    /// Product or landing page link.
    #[arg(long)]
    pub link: Option<String>,

    /// Hashtags every post must include, e.g. "#MyBrand #Sale".
    #[arg(long)]
    pub hashtags: Option<String>,

    /// Attach an image: PLATFORM=PATH (repeatable).
    #[arg(long = "image", value_name = "PLATFORM=PATH")]
    pub images: Vec<String>,

    /// Pick the attached image to use: PLATFORM=INDEX or PLATFORM=auto.
    #[arg(long = "use-image", value_name = "PLATFORM=INDEX")]
    pub image_selection: Vec<String>,

    /// Platform setting: PLATFORM.ID=VALUE (repeatable).
    #[arg(long = "setting", value_name = "PLATFORM.ID=VALUE")]
    pub settings: Vec<String>,

    /// Save the output to the library.
    #[arg(long)]
    pub save: bool,

    /// Print plain text instead of the formatted view.
    #[arg(long)]
    pub plain: bool,
}

#[derive(Subcommand)]
pub enum SavedCommand {
    /// List saved outputs, newest first.
    #[command(alias = "ls")]
    List,

    /// Show a saved output.
    Show {
        /// Saved output ID.
        id: String,

        /// Print plain text instead of the formatted view.
        #[arg(long)]
        plain: bool,

        /// Print the copy text of one variation, numbered from 1 in display order.
        #[arg(long, value_name = "N", conflicts_with = "plain")]
        variation: Option<usize>,
    },

    /// Delete a saved output.
    #[command(alias = "rm")]
    Delete {
        /// Saved output ID.
        id: String,

        /// Skip the confirmation prompt.
        #[arg(long)]
        force: bool,
    },
}

/// Read a whole file, or stdin when `source` is `-`.
pub async fn read_source(source: &str) -> Result<String> {
    if source == "-" {
        let mut buf = String::new();
        tokio::io::stdin()
            .read_to_string(&mut buf)
            .await
            .context("failed to read stdin")?;
        return Ok(buf);
    }

    let path = PathBuf::from(source);
    tokio::fs::read_to_string(&path)
        .await
        .with_context(|| format!("failed to read {}", path.display()))
}

/// Parse a saved-output ID argument.
pub fn parse_id(id: &str) -> Result<uuid::Uuid> {
    id.trim()
        .parse()
        .with_context(|| format!("'{id}' is not a valid output ID"))
}
