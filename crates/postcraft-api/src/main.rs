//! Postcraft CLI and REST API entry point.
//!
//! Binary name: `pcraft`
//!
//! Parses CLI arguments, sets up tracing, then dispatches to the matching
//! command handler or starts the REST API server.

mod cli;
mod http;
mod state;

use anyhow::Context;
use clap::Parser;
use clap_complete::generate;

use postcraft_observe::{TracingOptions, init_tracing, shutdown_tracing};

use cli::{Cli, Commands, SavedCommand};
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_filter = match cli.verbose {
        0 if cli.quiet => "error",
        0 => "warn",
        1 => "info,postcraft=debug",
        _ => "trace",
    };
    init_tracing(TracingOptions {
        default_filter: default_filter.to_string(),
        json: cli.log_json,
        enable_otel: cli.otel,
    })
    .map_err(|e| anyhow::anyhow!("failed to initialize tracing: {e}"))?;

    let result = run(cli).await;
    shutdown_tracing();
    result
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    // Offline commands don't need app state
    match &cli.command {
        Commands::Completions { shell } => {
            let mut cmd = <Cli as clap::CommandFactory>::command();
            generate(*shell, &mut cmd, "pcraft", &mut std::io::stdout());
            return Ok(());
        }
        Commands::Parse { file } => return cli::text::parse_text(file, cli.json).await,
        Commands::Plain { file } => return cli::text::plain_text(file, cli.json).await,
        Commands::Payload { input } => return cli::payload::show_payload(input, cli.json).await,
        Commands::Platforms => return cli::platforms::list_platforms(cli.json),
        _ => {}
    }

    let state = AppState::init().await?;

    match cli.command {
        Commands::Generate(args) => {
            cli::generate::generate(&state, args, cli.json, cli.quiet).await?;
        }

        Commands::Saved { action } => match action {
            SavedCommand::List => cli::saved::list_saved(&state, cli.json).await?,
            SavedCommand::Show { id, plain, variation } => {
                cli::saved::show_saved(&state, &id, plain, variation, cli.json).await?;
            }
            SavedCommand::Delete { id, force } => {
                cli::saved::delete_saved(&state, &id, force, cli.json).await?;
            }
        },

        Commands::Serve { port, host } => {
            let host = host.unwrap_or_else(|| state.config.server.host.clone());
            let port = port.unwrap_or(state.config.server.port);
            let addr = format!("{host}:{port}");
            let listener = tokio::net::TcpListener::bind(&addr)
                .await
                .with_context(|| format!("failed to bind {addr}"))?;

            tracing::info!(
                %addr,
                model = %state.config.model,
                data_dir = %state.data_dir.display(),
                "starting API server"
            );
            if !cli.quiet {
                println!(
                    "  {} Postcraft API listening on {}",
                    console::style("⚡").bold(),
                    console::style(format!("http://{addr}")).cyan()
                );
                if !state.service.generator().has_api_key() {
                    println!(
                        "  {} No API key set; /api/v1/generate will fail until GEMINI_API_KEY is exported.",
                        console::style("!").yellow().bold()
                    );
                }
                println!("  {}", console::style("Press Ctrl+C to stop").dim());
            }

            let router = http::router::build_router(state);
            axum::serve(listener, router)
                .with_graceful_shutdown(shutdown_signal())
                .await?;

            if !cli.quiet {
                println!("\n  Server stopped.");
            }
        }

        Commands::Completions { .. }
        | Commands::Parse { .. }
        | Commands::Plain { .. }
        | Commands::Payload { .. }
        | Commands::Platforms => unreachable!("handled above"),
    }

    Ok(())
}

/// Wait for Ctrl+C or SIGTERM for graceful shutdown.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
