//! Assembles the generation payload from a campaign input.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use postcraft_types::input::{CampaignInput, ImageSelection, SettingValue};
use postcraft_types::payload::{GenerationPayload, PayloadPart};
use postcraft_types::platform::Platform;

use super::data_url;
use super::instructions::{self, PROMPT_INSTRUCTIONS, USER_INPUT_HEADER};

/// Builds the ordered parts of a generation request.
///
/// Layout:
/// ```text
/// [intro text, image, image, ...]   per platform with attachments
/// [intro text, image]               per platform with an explicit selection
/// PROMPT_INSTRUCTIONS
///
/// User Input:
/// { pretty JSON of the input, images replaced by summaries }
/// ```
pub struct PayloadBuilder;

/// The input record as the generator sees it.
///
/// Image data is replaced by a per-platform summary, the selection map is
/// dropped, and empty settings are filtered out.
#[derive(Debug, Serialize)]
pub struct PromptInput<'a> {
    pub niche: &'a str,
    pub audience: &'a str,
    pub style: &'a str,
    pub cta_style: &'a str,
    pub platforms: &'a BTreeSet<Platform>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_link: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_hashtags: Option<&'a str>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub platform_images: BTreeMap<Platform, String>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub platform_settings: BTreeMap<Platform, BTreeMap<&'a str, &'a SettingValue>>,
}

impl PayloadBuilder {
    /// Build the full payload. Malformed images are skipped, never fatal.
    pub fn build(input: &CampaignInput) -> GenerationPayload {
        let mut parts = Vec::new();
        let mut summaries = BTreeMap::new();

        for (&platform, images) in &input.platform_images {
            if images.is_empty() {
                continue;
            }
            match input.selection_for(platform) {
                ImageSelection::Auto => {
                    summaries.insert(platform, instructions::auto_selection_summary(images.len()));
                    parts.push(PayloadPart::text(instructions::auto_selection_intro(
                        platform.name(),
                    )));
                    for (index, data_url) in images.iter().enumerate() {
                        if let Some(part) = image_part(platform, index, data_url) {
                            parts.push(part);
                        }
                    }
                }
                ImageSelection::Index(index) => {
                    let Some(data_url) = images.get(index) else {
                        tracing::debug!(
                            %platform,
                            index,
                            count = images.len(),
                            "selected image index out of range, skipping"
                        );
                        continue;
                    };
                    summaries.insert(platform, instructions::selected_image_summary(images.len()));
                    if let Some(part) = image_part(platform, index, data_url) {
                        parts.push(PayloadPart::text(instructions::selected_image_intro(
                            platform.name(),
                        )));
                        parts.push(part);
                    }
                }
            }
        }

        let prompt_input = Self::prompt_input(input, summaries);
        let serialized = serde_json::to_string_pretty(&prompt_input).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "failed to serialize prompt input");
            "{}".to_string()
        });
        parts.push(PayloadPart::text(format!(
            "{PROMPT_INSTRUCTIONS}\n\n{USER_INPUT_HEADER}\n{serialized}"
        )));

        tracing::debug!(
            parts = parts.len(),
            platforms = input.platforms.len(),
            "built generation payload"
        );
        GenerationPayload { parts }
    }

    /// The serializable view of `input` appended after the instructions.
    pub fn prompt_input(
        input: &CampaignInput,
        image_summaries: BTreeMap<Platform, String>,
    ) -> PromptInput<'_> {
        let platform_settings = input
            .platform_settings
            .iter()
            .filter_map(|(&platform, settings)| {
                let kept: BTreeMap<&str, &SettingValue> = settings
                    .iter()
                    .filter(|(_, value)| !value.is_empty())
                    .map(|(id, value)| (id.as_str(), value))
                    .collect();
                (!kept.is_empty()).then_some((platform, kept))
            })
            .collect();

        PromptInput {
            niche: &input.niche,
            audience: &input.audience,
            style: &input.style,
            cta_style: &input.cta_style,
            platforms: &input.platforms,
            product_link: non_blank(input.product_link.as_deref()),
            custom_hashtags: non_blank(input.custom_hashtags.as_deref()),
            platform_images: image_summaries,
            platform_settings,
        }
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

fn image_part(platform: Platform, index: usize, data_url: &str) -> Option<PayloadPart> {
    match data_url::decode(data_url) {
        Ok(img) => Some(PayloadPart::InlineImage {
            mime_type: img.mime_type.to_string(),
            data: img.data.to_string(),
        }),
        Err(e) => {
            tracing::debug!(%platform, index, error = %e, "skipping undecodable image");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PNG: &str = "data:image/png;base64,aGVsbG8=";
    const GIF: &str = "data:image/gif;base64,R0lGODlh";

    fn input(platforms: &[Platform]) -> CampaignInput {
        CampaignInput {
            niche: "handmade wooden lamps".to_string(),
            audience: "general".to_string(),
            style: "friendly".to_string(),
            cta_style: "direct".to_string(),
            platforms: platforms.iter().copied().collect(),
            ..Default::default()
        }
    }

    fn user_input_json(payload: &GenerationPayload) -> serde_json::Value {
        let text = payload.instruction_text().unwrap();
        let (_, json) = text.split_once("User Input:\n").unwrap();
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_text_only_payload() {
        let payload = PayloadBuilder::build(&input(&[Platform::Instagram, Platform::X]));
        assert_eq!(payload.parts.len(), 1);
        let text = payload.instruction_text().unwrap();
        assert!(text.starts_with(PROMPT_INSTRUCTIONS));
        let json = user_input_json(&payload);
        assert_eq!(json["niche"], "handmade wooden lamps");
        assert_eq!(json["platforms"], serde_json::json!(["Instagram", "X"]));
        assert!(json.get("platform_images").is_none());
        assert!(json.get("platform_settings").is_none());
        assert!(json.get("platform_image_selection").is_none());
        assert!(json.get("product_link").is_none());
    }

    #[test]
    fn test_auto_selection_includes_all_images() {
        let mut input = input(&[Platform::Instagram]);
        input
            .platform_images
            .insert(Platform::Instagram, vec![PNG.to_string(), GIF.to_string()]);

        let payload = PayloadBuilder::build(&input);
        assert_eq!(payload.parts.len(), 4);
        assert_eq!(
            payload.parts[0],
            PayloadPart::text(instructions::auto_selection_intro("Instagram"))
        );
        assert_eq!(
            payload.parts[1],
            PayloadPart::InlineImage {
                mime_type: "image/png".to_string(),
                data: "aGVsbG8=".to_string(),
            }
        );
        assert!(matches!(
            &payload.parts[2],
            PayloadPart::InlineImage { mime_type, .. } if mime_type == "image/gif"
        ));
        let json = user_input_json(&payload);
        assert_eq!(
            json["platform_images"]["Instagram"],
            "2 image(s) attached for AI selection."
        );
    }

    #[test]
    fn test_explicit_selection_sends_one_image() {
        let mut input = input(&[Platform::X]);
        input
            .platform_images
            .insert(Platform::X, vec![PNG.to_string(), GIF.to_string()]);
        input
            .platform_image_selection
            .insert(Platform::X, ImageSelection::Index(1));

        let payload = PayloadBuilder::build(&input);
        assert_eq!(payload.parts.len(), 3);
        assert_eq!(
            payload.parts[0],
            PayloadPart::text(instructions::selected_image_intro("X"))
        );
        assert!(matches!(
            &payload.parts[1],
            PayloadPart::InlineImage { data, .. } if data == "R0lGODlh"
        ));
        let json = user_input_json(&payload);
        assert_eq!(json["platform_images"]["X"], "1 specific image selected out of 2.");
    }

    #[test]
    fn test_out_of_range_selection_contributes_nothing() {
        let mut input = input(&[Platform::X]);
        input.platform_images.insert(Platform::X, vec![PNG.to_string()]);
        input
            .platform_image_selection
            .insert(Platform::X, ImageSelection::Index(5));

        let payload = PayloadBuilder::build(&input);
        assert_eq!(payload.parts.len(), 1);
        assert_eq!(payload.image_count(), 0);
        assert!(user_input_json(&payload).get("platform_images").is_none());
    }

    #[test]
    fn test_malformed_images_are_skipped() {
        let mut input = input(&[Platform::Facebook]);
        input.platform_images.insert(
            Platform::Facebook,
            vec![
                "not-a-data-url".to_string(),
                PNG.to_string(),
                "data:image/png;base64,@@@".to_string(),
            ],
        );

        let payload = PayloadBuilder::build(&input);
        assert_eq!(payload.image_count(), 1);
        // intro + 1 image + instructions
        assert_eq!(payload.parts.len(), 3);
        assert_eq!(
            user_input_json(&payload)["platform_images"]["Facebook"],
            "3 image(s) attached for AI selection."
        );
    }

    #[test]
    fn test_images_precede_instruction_part() {
        let mut input = input(&[Platform::Instagram, Platform::Pinterest]);
        input.platform_images.insert(Platform::Instagram, vec![PNG.to_string()]);
        input.platform_images.insert(Platform::Pinterest, vec![GIF.to_string()]);

        let payload = PayloadBuilder::build(&input);
        let last = payload.parts.len() - 1;
        for part in &payload.parts[..last] {
            if let PayloadPart::Text { text } = part {
                assert!(!text.contains(PROMPT_INSTRUCTIONS));
            }
        }
        assert!(payload.instruction_text().unwrap().contains(USER_INPUT_HEADER));
    }

    #[test]
    fn test_empty_settings_are_omitted() {
        let mut input = input(&[Platform::X, Platform::LinkedIn, Platform::Instagram]);
        input.platform_settings.insert(
            Platform::X,
            BTreeMap::from([("char_limit".to_string(), SettingValue::Empty)]),
        );
        input.platform_settings.insert(
            Platform::LinkedIn,
            BTreeMap::from([("tone".to_string(), SettingValue::Text(String::new()))]),
        );
        input.platform_settings.insert(
            Platform::Instagram,
            BTreeMap::from([
                ("hashtag_count".to_string(), SettingValue::Number(12.0)),
                ("other".to_string(), SettingValue::Empty),
            ]),
        );

        let json = user_input_json(&PayloadBuilder::build(&input));
        let settings = json["platform_settings"].as_object().unwrap();
        assert_eq!(settings.len(), 1);
        assert_eq!(settings["Instagram"], serde_json::json!({ "hashtag_count": 12 }));
    }

    #[test]
    fn test_whitespace_setting_is_kept() {
        let mut input = input(&[Platform::LinkedIn]);
        input.platform_settings.insert(
            Platform::LinkedIn,
            BTreeMap::from([("tone".to_string(), SettingValue::Text(" ".into()))]),
        );
        let json = user_input_json(&PayloadBuilder::build(&input));
        assert_eq!(json["platform_settings"]["LinkedIn"]["tone"], " ");
    }

    #[test]
    fn test_all_empty_settings_drop_the_key() {
        let mut input = input(&[Platform::X]);
        input.platform_settings.insert(
            Platform::X,
            BTreeMap::from([("char_limit".to_string(), SettingValue::Number(f64::NAN))]),
        );
        let json = user_input_json(&PayloadBuilder::build(&input));
        assert!(json.get("platform_settings").is_none());
    }

    #[test]
    fn test_optional_fields_are_forwarded() {
        let mut input = input(&[Platform::Facebook]);
        input.product_link = Some("https://shop.example.com/lamp".to_string());
        input.custom_hashtags = Some("#WoodLamp #Handmade".to_string());
        let json = user_input_json(&PayloadBuilder::build(&input));
        assert_eq!(json["product_link"], "https://shop.example.com/lamp");
        assert_eq!(json["custom_hashtags"], "#WoodLamp #Handmade");
    }

    #[test]
    fn test_build_does_not_mutate_input() {
        let mut input = input(&[Platform::Instagram]);
        input.platform_images.insert(Platform::Instagram, vec![PNG.to_string()]);
        let before = input.clone();
        let _ = PayloadBuilder::build(&input);
        assert_eq!(input, before);
    }
}
