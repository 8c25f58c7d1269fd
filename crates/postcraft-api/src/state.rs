//! Application state wiring the generation service to its infrastructure.
//!
//! The service is generic over its generator and repository; AppState pins
//! it to the Gemini client and the SQLite store.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;

use postcraft_core::service::GenerationService;
use postcraft_infra::config::load_global_config;
use postcraft_infra::filesystem::{database_url, ensure_data_dir, resolve_data_dir};
use postcraft_infra::gemini::GeminiGenerator;
use postcraft_infra::secret::resolve_api_key;
use postcraft_infra::sqlite::pool::DatabasePool;
use postcraft_infra::sqlite::saved::SqliteSavedOutputRepository;
use postcraft_types::config::GlobalConfig;

pub type ConcreteGenerationService = GenerationService<GeminiGenerator, SqliteSavedOutputRepository>;

/// Shared state for CLI commands and REST handlers.
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<ConcreteGenerationService>,
    pub config: Arc<GlobalConfig>,
    pub data_dir: PathBuf,
}

impl AppState {
    /// Resolve the data directory, load config, open the database and
    /// build the generator.
    pub async fn init() -> anyhow::Result<Self> {
        let data_dir = resolve_data_dir();
        ensure_data_dir(&data_dir)
            .await
            .with_context(|| format!("failed to create data directory {}", data_dir.display()))?;

        let config = load_global_config(&data_dir).await;
        let db_pool = DatabasePool::new(&database_url(&data_dir), &config.database)
            .await
            .context("failed to open saved-output database")?;

        let api_key = resolve_api_key();
        if api_key.is_none() {
            tracing::debug!("no API key configured; generation is unavailable");
        }
        let generator = GeminiGenerator::new(api_key, &config)?;

        Ok(Self::from_parts(
            generator,
            SqliteSavedOutputRepository::new(db_pool),
            config,
            data_dir,
        ))
    }

    pub fn from_parts(
        generator: GeminiGenerator,
        repo: SqliteSavedOutputRepository,
        config: GlobalConfig,
        data_dir: PathBuf,
    ) -> Self {
        Self {
            service: Arc::new(GenerationService::new(generator, repo)),
            config: Arc::new(config),
            data_dir,
        }
    }
}
