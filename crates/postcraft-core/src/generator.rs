//! ContentGenerator trait definition.
//!
//! The generation API collaborator. Implementations live in
//! postcraft-infra (e.g., `GeminiGenerator`).

use postcraft_types::error::GenerationError;
use postcraft_types::output::GenerationResult;
use postcraft_types::payload::GenerationPayload;

/// A backend that turns a payload into generated marketing copy.
///
/// Uses native async fn in traits (RPITIT, Rust 2024 edition).
/// One call is one request: no retries, no dedup.
pub trait ContentGenerator: Send + Sync {
    /// Backend name (e.g., "gemini").
    fn name(&self) -> &str;

    /// Model identifier requests are sent to.
    fn model(&self) -> &str;

    /// Send the payload and wait for the full answer.
    fn generate(
        &self,
        payload: &GenerationPayload,
    ) -> impl std::future::Future<Output = Result<GenerationResult, GenerationError>> + Send;
}
