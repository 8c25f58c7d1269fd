//! The fixed catalog of social platforms Postcraft writes for.
//!
//! Every platform name that appears in an input record must be one of the
//! [`Platform`] variants. The catalog also carries per-platform metadata
//! (link support, recommended image size, customizable settings) that
//! front-ends use to build their forms.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A social platform from the fixed catalog.
///
/// Ordering follows catalog order, so a `BTreeSet<Platform>` iterates in
/// the same order the catalog is displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Platform {
    Instagram,
    Facebook,
    X,
    LinkedIn,
    TikTok,
    Pinterest,
    YouTube,
}

impl Platform {
    /// All platforms in catalog order.
    pub const ALL: [Platform; 7] = [
        Platform::Instagram,
        Platform::Facebook,
        Platform::X,
        Platform::LinkedIn,
        Platform::TikTok,
        Platform::Pinterest,
        Platform::YouTube,
    ];

    /// Display name, identical to the serialized form.
    pub fn name(&self) -> &'static str {
        match self {
            Platform::Instagram => "Instagram",
            Platform::Facebook => "Facebook",
            Platform::X => "X",
            Platform::LinkedIn => "LinkedIn",
            Platform::TikTok => "TikTok",
            Platform::Pinterest => "Pinterest",
            Platform::YouTube => "YouTube",
        }
    }

    /// Catalog metadata for this platform.
    pub fn spec(&self) -> &'static PlatformSpec {
        // CATALOG is declared in the same order as the enum.
        &CATALOG[*self as usize]
    }

    /// Whether image attachments are accepted for this platform.
    pub fn accepts_images(&self) -> bool {
        self.spec().recommended_image_size.is_some()
    }

    /// Look up a setting descriptor by id.
    pub fn setting(&self, id: &str) -> Option<&'static SettingDescriptor> {
        self.spec().settings.iter().find(|s| s.id == id)
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Platform {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "instagram" => Ok(Platform::Instagram),
            "facebook" => Ok(Platform::Facebook),
            "x" | "twitter" => Ok(Platform::X),
            "linkedin" => Ok(Platform::LinkedIn),
            "tiktok" => Ok(Platform::TikTok),
            "pinterest" => Ok(Platform::Pinterest),
            "youtube" | "youtubeshort" | "youtube shorts" => Ok(Platform::YouTube),
            other => Err(format!("unknown platform: '{other}'")),
        }
    }
}

/// Static metadata describing one platform in the catalog.
#[derive(Debug, Serialize)]
pub struct PlatformSpec {
    pub platform: Platform,
    pub allows_links: bool,
    /// `None` means the platform takes no image attachments.
    pub recommended_image_size: Option<&'static str>,
    pub guideline: &'static str,
    pub settings: &'static [SettingDescriptor],
}

/// A customizable per-platform setting shown in the settings panel.
#[derive(Debug, Serialize)]
pub struct SettingDescriptor {
    pub id: &'static str,
    pub label: &'static str,
    pub kind: SettingKind,
}

/// Input widget kind for a setting.
#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum SettingKind {
    Number {
        unit: Option<&'static str>,
        placeholder: Option<&'static str>,
    },
    Select {
        options: &'static [&'static str],
        default: &'static str,
    },
}

/// The platform catalog, in [`Platform`] declaration order.
pub static CATALOG: [PlatformSpec; 7] = [
    PlatformSpec {
        platform: Platform::Instagram,
        allows_links: false,
        recommended_image_size: Some("1080x1080"),
        guideline: "Visual-first captions, line breaks, up to 30 hashtags.",
        settings: &[SettingDescriptor {
            id: "hashtag_count",
            label: "Number of hashtags",
            kind: SettingKind::Number {
                unit: Some("hashtags"),
                placeholder: Some("15"),
            },
        }],
    },
    PlatformSpec {
        platform: Platform::Facebook,
        allows_links: true,
        recommended_image_size: Some("1200x630"),
        guideline: "Conversational posts that invite comments and shares.",
        settings: &[],
    },
    PlatformSpec {
        platform: Platform::X,
        allows_links: true,
        recommended_image_size: Some("1600x900"),
        guideline: "Short, punchy posts within the character limit.",
        settings: &[SettingDescriptor {
            id: "char_limit",
            label: "Character limit",
            kind: SettingKind::Number {
                unit: Some("chars"),
                placeholder: Some("280"),
            },
        }],
    },
    PlatformSpec {
        platform: Platform::LinkedIn,
        allows_links: true,
        recommended_image_size: Some("1200x627"),
        guideline: "Professional insight, value-led storytelling.",
        settings: &[SettingDescriptor {
            id: "tone",
            label: "Tone",
            kind: SettingKind::Select {
                options: &[
                    "professional",
                    "conversational",
                    "inspirational",
                    "thought_leadership",
                ],
                default: "professional",
            },
        }],
    },
    PlatformSpec {
        platform: Platform::TikTok,
        allows_links: false,
        recommended_image_size: None,
        guideline: "Hook in the first second, trend-aware short video captions.",
        settings: &[SettingDescriptor {
            id: "video_length",
            label: "Video length",
            kind: SettingKind::Number {
                unit: Some("seconds"),
                placeholder: Some("15"),
            },
        }],
    },
    PlatformSpec {
        platform: Platform::Pinterest,
        allows_links: true,
        recommended_image_size: Some("1000x1500"),
        guideline: "Keyword-rich pin titles and descriptions.",
        settings: &[],
    },
    PlatformSpec {
        platform: Platform::YouTube,
        allows_links: true,
        recommended_image_size: Some("1280x720"),
        guideline: "Searchable titles, descriptions with timestamps and links.",
        settings: &[SettingDescriptor {
            id: "video_length",
            label: "Video length",
            kind: SettingKind::Number {
                unit: Some("seconds"),
                placeholder: Some("60"),
            },
        }],
    },
];

/// Suggested target audiences for front-end pickers.
pub const TARGET_AUDIENCES: &[&str] = &[
    "general",
    "young_adults",
    "professionals",
    "parents",
    "small_business_owners",
    "students",
];

/// Suggested content styles for front-end pickers.
pub const CONTENT_STYLES: &[&str] = &[
    "professional",
    "friendly",
    "humorous",
    "inspirational",
    "educational",
    "luxury",
];

/// Suggested call-to-action styles for front-end pickers.
pub const CTA_STYLES: &[&str] = &["direct", "soft", "urgent", "curiosity", "community"];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_matches_enum_order() {
        for platform in Platform::ALL {
            assert_eq!(platform.spec().platform, platform);
        }
    }

    #[test]
    fn test_platform_roundtrip() {
        for platform in Platform::ALL {
            let parsed: Platform = platform.to_string().parse().unwrap();
            assert_eq!(parsed, platform);
        }
    }

    #[test]
    fn test_platform_aliases() {
        assert_eq!("twitter".parse::<Platform>().unwrap(), Platform::X);
        assert_eq!("YouTubeShort".parse::<Platform>().unwrap(), Platform::YouTube);
        assert!("myspace".parse::<Platform>().is_err());
    }

    #[test]
    fn test_platform_serde_uses_display_name() {
        let json = serde_json::to_string(&Platform::LinkedIn).unwrap();
        assert_eq!(json, "\"LinkedIn\"");
        let parsed: Platform = serde_json::from_str("\"TikTok\"").unwrap();
        assert_eq!(parsed, Platform::TikTok);
    }

    #[test]
    fn test_tiktok_takes_no_images() {
        assert!(!Platform::TikTok.accepts_images());
        assert!(Platform::Instagram.accepts_images());
    }

    #[test]
    fn test_setting_lookup() {
        assert!(Platform::LinkedIn.setting("tone").is_some());
        assert!(Platform::LinkedIn.setting("char_limit").is_none());
        assert!(Platform::Facebook.spec().settings.is_empty());
    }

    #[test]
    fn test_catalog_serializes() {
        let json = serde_json::to_value(Platform::LinkedIn.spec()).unwrap();
        assert_eq!(json["platform"], "LinkedIn");
        assert_eq!(json["settings"][0]["kind"]["type"], "select");
        assert_eq!(json["settings"][0]["kind"]["default"], "professional");
    }
}
