//! Generation service: the end-to-end use cases.
//!
//! Validates input, builds the payload, calls the generator, normalizes the
//! answer and manages saved outputs. Depends on traits (ports), never on
//! concrete infrastructure.

use chrono::Utc;
use tracing::Instrument;
use uuid::Uuid;

use postcraft_types::error::{InputError, RepositoryError, ServiceError};
use postcraft_types::input::CampaignInput;
use postcraft_types::output::{GeneratedOutput, GroundingSource, RawSource, SavedOutput};
use postcraft_types::payload::GenerationPayload;
use postcraft_types::platform::Platform;

use crate::generator::ContentGenerator;
use crate::input;
use crate::normalize;
use crate::payload::PayloadBuilder;
use crate::repository::SavedOutputRepository;

/// Service orchestrating generation and the saved-output library.
pub struct GenerationService<G: ContentGenerator, R: SavedOutputRepository> {
    generator: G,
    repo: R,
}

impl<G: ContentGenerator, R: SavedOutputRepository> GenerationService<G, R> {
    pub fn new(generator: G, repo: R) -> Self {
        Self { generator, repo }
    }

    pub fn generator(&self) -> &G {
        &self.generator
    }

    /// Validate `input` and build its payload without sending it.
    pub fn preview_payload(&self, input: &CampaignInput) -> Result<GenerationPayload, InputError> {
        input::validate(input)?;
        Ok(PayloadBuilder::build(input))
    }

    /// Run one generation request.
    pub async fn generate(&self, input: &CampaignInput) -> Result<GeneratedOutput, ServiceError> {
        let payload = self.preview_payload(input)?;
        tracing::info!(
            generator = self.generator.name(),
            model = self.generator.model(),
            platforms = input.platforms.len(),
            images = payload.image_count(),
            "requesting generation"
        );

        let span = tracing::info_span!(
            "gen_ai.generate",
            gen_ai.system = self.generator.name(),
            gen_ai.request.model = self.generator.model(),
            gen_ai.request.parts = payload.parts.len(),
        );
        let result = self
            .generator
            .generate(&payload)
            .instrument(span)
            .await
            .inspect_err(|e| {
                tracing::warn!(error = %e, "generation failed");
            })?;

        let content = normalize::normalize(result.response);
        let sources = complete_sources(result.sources);
        let output = GeneratedOutput {
            id: Uuid::now_v7(),
            content,
            sources,
            created_at: Utc::now(),
        };
        tracing::info!(
            id = %output.id,
            model = %result.model,
            chars = output.content.len(),
            sources = output.sources.len(),
            "generation complete"
        );
        Ok(output)
    }

    /// Keep a generated output in the library.
    pub async fn save(
        &self,
        output: GeneratedOutput,
        platforms: Vec<Platform>,
    ) -> Result<SavedOutput, ServiceError> {
        let saved = SavedOutput::from_generated(output, platforms, Utc::now());
        self.repo.save(&saved).await.map_err(|e| match e {
            RepositoryError::Conflict(_) => ServiceError::AlreadySaved(saved.id),
            other => ServiceError::Storage(other),
        })?;
        tracing::info!(id = %saved.id, "saved output");
        Ok(saved)
    }

    /// Saved outputs, most recently saved first.
    pub async fn list_saved(&self) -> Result<Vec<SavedOutput>, ServiceError> {
        Ok(self.repo.list().await?)
    }

    pub async fn get_saved(&self, id: &Uuid) -> Result<SavedOutput, ServiceError> {
        self.repo.get(id).await?.ok_or(ServiceError::NotFound)
    }

    pub async fn delete_saved(&self, id: &Uuid) -> Result<(), ServiceError> {
        self.repo.delete(id).await.map_err(|e| match e {
            RepositoryError::NotFound => ServiceError::NotFound,
            other => ServiceError::Storage(other),
        })?;
        tracing::info!(%id, "deleted saved output");
        Ok(())
    }

    pub async fn count_saved(&self) -> Result<u64, ServiceError> {
        Ok(self.repo.count().await?)
    }
}

/// Keep only sources that carry both a uri and a title, in order.
pub fn complete_sources(raw: Vec<RawSource>) -> Vec<GroundingSource> {
    raw.into_iter()
        .filter_map(|s| match (s.uri, s.title) {
            (Some(uri), Some(title)) if !uri.is_empty() && !title.is_empty() => {
                Some(GroundingSource { uri, title })
            }
            _ => None,
        })
        .collect()
}
