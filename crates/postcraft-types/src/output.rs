//! Generated and saved output records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::platform::Platform;
use crate::structured::StructuredOutput;

/// A web source the generator cited while grounding its answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroundingSource {
    pub uri: String,
    pub title: String,
}

/// The raw answer shape returned by a generator.
///
/// The markdown convention is the system's contract, but a generator may
/// still answer with the structured JSON schema. Both are normalized into
/// markdown-convention text before anything is parsed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "body", rename_all = "snake_case")]
pub enum GenerationResponse {
    Text(String),
    Structured(StructuredOutput),
}

/// What a generator returns for one request.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationResult {
    pub response: GenerationResponse,
    /// Sources in the order the generator reported them; may include entries
    /// with a missing uri or title.
    pub sources: Vec<RawSource>,
    pub model: String,
}

/// A grounding source as reported, before filtering incomplete entries.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawSource {
    pub uri: Option<String>,
    pub title: Option<String>,
}

/// One completed generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratedOutput {
    pub id: Uuid,
    /// Markdown-convention text.
    pub content: String,
    #[serde(default)]
    pub sources: Vec<GroundingSource>,
    pub created_at: DateTime<Utc>,
}

/// A generated output the user chose to keep.
///
/// Saved records are immutable: created on save, removed on delete.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedOutput {
    pub id: Uuid,
    pub content: String,
    #[serde(default)]
    pub sources: Vec<GroundingSource>,
    pub created_at: DateTime<Utc>,
    pub saved_at: DateTime<Utc>,
    /// Platforms that were selected when the output was generated.
    #[serde(default)]
    pub platforms: Vec<Platform>,
}

impl SavedOutput {
    /// Build a saved record from a generated output.
    pub fn from_generated(
        output: GeneratedOutput,
        platforms: Vec<Platform>,
        saved_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: output.id,
            content: output.content,
            sources: output.sources,
            created_at: output.created_at,
            saved_at,
            platforms,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_saved_from_generated_keeps_identity() {
        let generated = GeneratedOutput {
            id: Uuid::now_v7(),
            content: "## Instagram".to_string(),
            sources: vec![GroundingSource {
                uri: "https://example.com".to_string(),
                title: "Example".to_string(),
            }],
            created_at: Utc::now(),
        };
        let saved_at = Utc::now();
        let saved = SavedOutput::from_generated(
            generated.clone(),
            vec![Platform::Instagram],
            saved_at,
        );
        assert_eq!(saved.id, generated.id);
        assert_eq!(saved.content, generated.content);
        assert_eq!(saved.sources, generated.sources);
        assert_eq!(saved.saved_at, saved_at);
        assert_eq!(saved.platforms, vec![Platform::Instagram]);
    }

    #[test]
    fn test_generation_response_serde_tag() {
        let resp = GenerationResponse::Text("hi".to_string());
        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["kind"], "text");
        assert_eq!(json["body"], "hi");
    }
}
