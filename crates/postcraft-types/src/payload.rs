//! The generation request payload.

use serde::{Deserialize, Serialize};

/// Ordered parts sent to the generator as one user turn.
///
/// Image parts come first, the instruction text part is always last.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationPayload {
    pub parts: Vec<PayloadPart>,
}

impl GenerationPayload {
    /// Number of inline image parts.
    pub fn image_count(&self) -> usize {
        self.parts
            .iter()
            .filter(|p| matches!(p, PayloadPart::InlineImage { .. }))
            .count()
    }

    /// The final instruction text, if the payload has one.
    pub fn instruction_text(&self) -> Option<&str> {
        match self.parts.last() {
            Some(PayloadPart::Text { text }) => Some(text),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PayloadPart {
    Text { text: String },
    /// Base64 image bytes, without the data-URL header.
    InlineImage { mime_type: String, data: String },
}

impl PayloadPart {
    pub fn text(text: impl Into<String>) -> Self {
        PayloadPart::Text { text: text.into() }
    }
}
