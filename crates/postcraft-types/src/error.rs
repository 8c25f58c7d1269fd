use thiserror::Error;

use crate::platform::Platform;

/// Problems found when validating a campaign input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("no platform selected")]
    NoPlatforms,

    #[error("niche or product description is required")]
    MissingNiche,

    #[error("{0} is not selected")]
    PlatformNotSelected(Platform),

    #[error("{platform} has {what} but is not selected")]
    UnselectedPlatform { platform: Platform, what: &'static str },

    #[error("{0} does not accept image attachments")]
    ImagesNotAccepted(Platform),

    #[error("image index {index} out of range for {platform} ({count} attached)")]
    ImageIndexOutOfRange {
        platform: Platform,
        index: usize,
        count: usize,
    },

    #[error("unknown setting '{id}' for {platform}")]
    UnknownSetting { platform: Platform, id: String },
}

/// Failures of a generation request.
///
/// Every variant renders with the same leading sentence so callers can show
/// the message as-is.
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("Failed to generate content. Details: no API key configured (set GEMINI_API_KEY)")]
    MissingApiKey,

    #[error("Failed to generate content. Details: authentication failed")]
    AuthenticationFailed,

    #[error("Failed to generate content. Details: HTTP error: {0}")]
    Http(String),

    #[error("Failed to generate content. Details: API returned {status}: {body}")]
    Api { status: u16, body: String },

    #[error("Failed to generate content. Details: response was blocked ({0})")]
    Blocked(String),

    #[error("Failed to generate content. Details: response contained no text")]
    EmptyResponse,

    #[error("Failed to generate content. Details: deserialization error: {0}")]
    Deserialization(String),

    #[error("invalid input: {0}")]
    Input(#[from] InputError),
}

/// Errors from repository operations (used by trait definitions in postcraft-core).
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("query error: {0}")]
    Query(String),

    #[error("entity not found")]
    NotFound,

    #[error("conflict: {0}")]
    Conflict(String),
}

/// Errors surfaced by the generation service.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Generation(#[from] GenerationError),

    #[error("storage error: {0}")]
    Storage(#[from] RepositoryError),

    #[error("saved output not found")]
    NotFound,

    #[error("output '{0}' is already saved")]
    AlreadySaved(uuid::Uuid),
}

impl From<InputError> for ServiceError {
    fn from(err: InputError) -> Self {
        ServiceError::Generation(GenerationError::Input(err))
    }
}
