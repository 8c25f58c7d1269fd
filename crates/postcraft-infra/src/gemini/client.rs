//! GeminiGenerator -- concrete [`ContentGenerator`] for the Gemini API.
//!
//! Sends one `generateContent` request per call with the web-search
//! grounding tool attached, and returns the answer text plus the grounding
//! sources the model cited.
//!
//! The API key is wrapped in [`secrecy::SecretString`] and is never logged
//! or included in `Debug` output.

use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};

use postcraft_core::generator::ContentGenerator;
use postcraft_types::config::GlobalConfig;
use postcraft_types::error::GenerationError;
use postcraft_types::output::{GenerationResponse, GenerationResult, RawSource};
use postcraft_types::payload::{GenerationPayload, PayloadPart};

use super::types::{
    GeminiContent, GeminiErrorEnvelope, GeminiPart, GeminiRequest, GeminiResponse, GeminiTool,
    GenerationConfig, GoogleSearch, InlineData,
};

/// Finish reasons that mean the answer was withheld.
const BLOCKING_FINISH_REASONS: &[&str] = &[
    "SAFETY",
    "RECITATION",
    "BLOCKLIST",
    "PROHIBITED_CONTENT",
    "SPII",
];

/// Gemini content generator.
///
/// Constructed without a key when none is configured so that commands that
/// never generate still work; `generate` then fails with
/// [`GenerationError::MissingApiKey`].
pub struct GeminiGenerator {
    client: reqwest::Client,
    api_key: Option<SecretString>,
    base_url: String,
    model: String,
    temperature: f32,
    google_search: bool,
}

impl GeminiGenerator {
    pub fn new(api_key: Option<SecretString>, config: &GlobalConfig) -> Result<Self, GenerationError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| GenerationError::Http(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            api_key,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            temperature: config.temperature,
            google_search: config.google_search,
        })
    }

    /// Whether an API key is available.
    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    fn url(&self) -> String {
        format!("{}/v1beta/models/{}:generateContent", self.base_url, self.model)
    }

    /// Convert a [`GenerationPayload`] into a Gemini request body.
    pub fn to_gemini_request(&self, payload: &GenerationPayload) -> GeminiRequest {
        let parts = payload
            .parts
            .iter()
            .map(|part| match part {
                PayloadPart::Text { text } => GeminiPart {
                    text: Some(text.clone()),
                    ..Default::default()
                },
                PayloadPart::InlineImage { mime_type, data } => GeminiPart {
                    inline_data: Some(InlineData {
                        mime_type: mime_type.clone(),
                        data: data.clone(),
                    }),
                    ..Default::default()
                },
            })
            .collect();

        let tools = if self.google_search {
            vec![GeminiTool {
                google_search: GoogleSearch::default(),
            }]
        } else {
            Vec::new()
        };

        GeminiRequest {
            contents: vec![GeminiContent {
                role: Some("user".to_string()),
                parts,
            }],
            tools,
            generation_config: GenerationConfig {
                temperature: self.temperature,
            },
        }
    }

    /// Extract the answer text and grounding sources from a response.
    pub fn into_result(&self, response: GeminiResponse) -> Result<GenerationResult, GenerationError> {
        if let Some(reason) = response
            .prompt_feedback
            .as_ref()
            .and_then(|f| f.block_reason.clone())
        {
            return Err(GenerationError::Blocked(reason));
        }

        let model = response.model_version.unwrap_or_else(|| self.model.clone());
        let candidate = response
            .candidates
            .into_iter()
            .next()
            .ok_or(GenerationError::EmptyResponse)?;

        let text = candidate
            .content
            .map(|c| {
                c.parts
                    .into_iter()
                    .filter(|p| !p.thought.unwrap_or(false))
                    .filter_map(|p| p.text)
                    .collect::<String>()
            })
            .unwrap_or_default();

        if text.trim().is_empty() {
            return Err(match candidate.finish_reason {
                Some(reason) if BLOCKING_FINISH_REASONS.contains(&reason.as_str()) => {
                    GenerationError::Blocked(reason)
                }
                _ => GenerationError::EmptyResponse,
            });
        }

        let sources = candidate
            .grounding_metadata
            .map(|m| m.grounding_chunks)
            .unwrap_or_default()
            .into_iter()
            .map(|chunk| {
                let web = chunk.web.unwrap_or_default();
                RawSource {
                    uri: web.uri,
                    title: web.title,
                }
            })
            .collect();

        Ok(GenerationResult {
            response: GenerationResponse::Text(text),
            sources,
            model,
        })
    }
}

// GeminiGenerator does NOT derive Debug; the key stays out of any output.

impl ContentGenerator for GeminiGenerator {
    fn name(&self) -> &str {
        "gemini"
    }

    fn model(&self) -> &str {
        &self.model
    }

    async fn generate(&self, payload: &GenerationPayload) -> Result<GenerationResult, GenerationError> {
        let api_key = self.api_key.as_ref().ok_or(GenerationError::MissingApiKey)?;
        let body = self.to_gemini_request(payload);

        tracing::debug!(model = %self.model, parts = payload.parts.len(), "sending generateContent request");

        let response = self
            .client
            .post(self.url())
            .header("x-goog-api-key", api_key.expose_secret())
            .header("content-type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| GenerationError::Http(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            return Err(match status.as_u16() {
                401 | 403 => GenerationError::AuthenticationFailed,
                code => GenerationError::Api {
                    status: code,
                    body: error_message(&error_body),
                },
            });
        }

        let gemini_resp: GeminiResponse = response.json().await.map_err(|e| {
            GenerationError::Deserialization(format!("failed to parse response: {e}"))
        })?;

        self.into_result(gemini_resp)
    }
}

/// The `error.message` of an API error body, or the raw body.
fn error_message(body: &str) -> String {
    serde_json::from_str::<GeminiErrorEnvelope>(body)
        .map(|e| match e.error.status {
            Some(status) if !status.is_empty() => format!("{status}: {}", e.error.message),
            _ => e.error.message,
        })
        .unwrap_or_else(|_| body.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_generator(key: Option<&str>) -> GeminiGenerator {
        GeminiGenerator::new(key.map(SecretString::from), &GlobalConfig::default()).unwrap()
    }

    fn payload() -> GenerationPayload {
        GenerationPayload {
            parts: vec![
                PayloadPart::text("This is the selected image for the X platform:"),
                PayloadPart::InlineImage {
                    mime_type: "image/png".to_string(),
                    data: "aGVsbG8=".to_string(),
                },
                PayloadPart::text("instructions"),
            ],
        }
    }

    #[test]
    fn test_generator_identity() {
        let generator = make_generator(Some("test-key-not-real"));
        assert_eq!(generator.name(), "gemini");
        assert_eq!(generator.model(), "gemini-2.5-flash");
        assert!(generator.has_api_key());
        assert_eq!(
            generator.url(),
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.5-flash:generateContent"
        );
    }

    #[test]
    fn test_request_shape() {
        let generator = make_generator(Some("k"));
        let json = serde_json::to_value(generator.to_gemini_request(&payload())).unwrap();

        assert_eq!(json["contents"][0]["role"], "user");
        let parts = json["contents"][0]["parts"].as_array().unwrap();
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0]["text"], "This is the selected image for the X platform:");
        assert_eq!(parts[1]["inlineData"]["mimeType"], "image/png");
        assert_eq!(parts[1]["inlineData"]["data"], "aGVsbG8=");
        assert!(parts[1].get("text").is_none());
        assert_eq!(json["tools"][0]["google_search"], serde_json::json!({}));
        assert!((json["generationConfig"]["temperature"].as_f64().unwrap() - 0.3).abs() < 1e-6);
    }

    #[test]
    fn test_request_without_search_tool() {
        let config = GlobalConfig {
            google_search: false,
            ..Default::default()
        };
        let generator = GeminiGenerator::new(None, &config).unwrap();
        let json = serde_json::to_value(generator.to_gemini_request(&payload())).unwrap();
        assert!(json.get("tools").is_none());
    }

    #[test]
    fn test_parse_response_with_sources() {
        let body = r####"{
            "candidates": [{
                "content": {"role": "model", "parts": [
                    {"text": "thinking...", "thought": true},
                    {"text": "## Instagram\n"},
                    {"text": "### Variation 1\nHi"}
                ]},
                "finishReason": "STOP",
                "groundingMetadata": {"groundingChunks": [
                    {"web": {"uri": "https://a.com", "title": "A"}},
                    {"web": {"uri": "https://b.com"}},
                    {}
                ]}
            }],
            "modelVersion": "gemini-2.5-flash-001"
        }"####;
        let response: GeminiResponse = serde_json::from_str(body).unwrap();
        let result = make_generator(None).into_result(response).unwrap();

        assert_eq!(
            result.response,
            GenerationResponse::Text("## Instagram\n### Variation 1\nHi".to_string())
        );
        assert_eq!(result.model, "gemini-2.5-flash-001");
        assert_eq!(result.sources.len(), 3);
        assert_eq!(result.sources[0].title.as_deref(), Some("A"));
        assert!(result.sources[1].title.is_none());
        assert!(result.sources[2].uri.is_none());
    }

    #[test]
    fn test_blocked_prompt() {
        let body = r#"{"promptFeedback": {"blockReason": "SAFETY"}}"#;
        let response: GeminiResponse = serde_json::from_str(body).unwrap();
        let err = make_generator(None).into_result(response).unwrap_err();
        assert!(matches!(err, GenerationError::Blocked(ref r) if r == "SAFETY"));
    }

    #[test]
    fn test_empty_candidate_text() {
        let response: GeminiResponse =
            serde_json::from_str(r#"{"candidates": [{"finishReason": "MAX_TOKENS"}]}"#).unwrap();
        assert!(matches!(
            make_generator(None).into_result(response),
            Err(GenerationError::EmptyResponse)
        ));

        let response: GeminiResponse =
            serde_json::from_str(r#"{"candidates": [{"finishReason": "RECITATION"}]}"#).unwrap();
        assert!(matches!(
            make_generator(None).into_result(response),
            Err(GenerationError::Blocked(_))
        ));

        assert!(matches!(
            make_generator(None).into_result(GeminiResponse::default()),
            Err(GenerationError::EmptyResponse)
        ));
    }

    #[test]
    fn test_error_message_extraction() {
        let body = r#"{"error": {"code": 400, "message": "API key not valid", "status": "INVALID_ARGUMENT"}}"#;
        assert_eq!(error_message(body), "INVALID_ARGUMENT: API key not valid");
        assert_eq!(error_message(" plain failure "), "plain failure");
    }

    #[tokio::test]
    async fn test_generate_without_key_fails_fast() {
        let generator = make_generator(None);
        let err = generator.generate(&payload()).await.unwrap_err();
        assert!(matches!(err, GenerationError::MissingApiKey));
    }
}
