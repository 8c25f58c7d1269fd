//! Structured (JSON schema) generation contract.
//!
//! Earlier prompt revisions asked the generator for a strict JSON document
//! instead of markdown. Those documents are still understood: they map each
//! platform to an array of A/B/C variants, and `postcraft-core::normalize`
//! turns them into markdown-convention text.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A structured generation answer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StructuredOutput {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product: Option<String>,
    /// Platform name to its variants. Keys are kept as the generator wrote
    /// them, so an unknown platform name still renders.
    #[serde(default)]
    pub platforms: BTreeMap<String, Vec<Variant>>,
}

/// One post variant in the structured contract.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Variant {
    /// Variant identifier: "A", "B" or "C".
    pub variant: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    pub hashtags: Vec<String>,
    pub hashtag_reasoning: String,
    pub image_suggest: String,
    pub alt_text: String,
    pub meta_title: String,
    pub meta_description: String,
    pub cta: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_comment: Option<String>,
    pub length_limit_notes: String,
    pub suggested_post_time: String,
    #[serde(rename = "video_script_15s", skip_serializing_if = "Option::is_none")]
    pub video_script: Option<String>,
}

impl Variant {
    /// Caption if present and non-blank, else the plain text body.
    pub fn body(&self) -> Option<&str> {
        [self.caption.as_deref(), self.text.as_deref()]
            .into_iter()
            .flatten()
            .find(|s| !s.trim().is_empty())
    }
}
