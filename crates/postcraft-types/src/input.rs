//! The campaign input record collected from the user.
//!
//! `CampaignInput` is what a front-end submits for generation. Image
//! attachments, image selections and platform settings are sparse maps keyed
//! by [`Platform`]; editing operations that keep those maps consistent with
//! the selected platform set live in `postcraft-core::input`.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::de::{self, Deserializer, Visitor};
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};

use crate::platform::Platform;

/// Parameters for one generation request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CampaignInput {
    /// Niche or product description.
    pub niche: String,
    pub audience: String,
    pub style: String,
    pub cta_style: String,

    /// Selected platforms. A set, so duplicates cannot be represented.
    #[serde(default)]
    pub platforms: BTreeSet<Platform>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_link: Option<String>,

    /// Free-form hashtags the generator must include (e.g. "#MyBrand #Sale").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_hashtags: Option<String>,

    /// Image data URLs per platform, in upload order.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub platform_images: BTreeMap<Platform, Vec<String>>,

    /// Which attached image the generator should use, per platform.
    /// A missing entry means [`ImageSelection::Auto`].
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub platform_image_selection: BTreeMap<Platform, ImageSelection>,

    /// Sparse setting-id to value mapping, per platform.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub platform_settings: BTreeMap<Platform, BTreeMap<String, SettingValue>>,
}

impl CampaignInput {
    /// Effective image selection for a platform.
    pub fn selection_for(&self, platform: Platform) -> ImageSelection {
        self.platform_image_selection
            .get(&platform)
            .copied()
            .unwrap_or_default()
    }

    /// Images attached to a platform (empty slice when none).
    pub fn images_for(&self, platform: Platform) -> &[String] {
        self.platform_images
            .get(&platform)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

/// Image selection marker for a platform with attachments.
///
/// Serialized as the string `"auto"` or as a bare index number.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ImageSelection {
    /// Let the generator pick the most compelling image.
    #[default]
    Auto,
    /// Use exactly the image at this index.
    Index(usize),
}

impl fmt::Display for ImageSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImageSelection::Auto => write!(f, "auto"),
            ImageSelection::Index(i) => write!(f, "{i}"),
        }
    }
}

impl std::str::FromStr for ImageSelection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("auto") {
            return Ok(ImageSelection::Auto);
        }
        s.parse::<usize>()
            .map(ImageSelection::Index)
            .map_err(|_| format!("invalid image selection: '{s}' (expected 'auto' or an index)"))
    }
}

impl Serialize for ImageSelection {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            ImageSelection::Auto => serializer.serialize_str("auto"),
            ImageSelection::Index(i) => serializer.serialize_u64(*i as u64),
        }
    }
}

impl<'de> Deserialize<'de> for ImageSelection {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct SelectionVisitor;

        impl Visitor<'_> for SelectionVisitor {
            type Value = ImageSelection;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("\"auto\" or a non-negative image index")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
                v.parse().map_err(E::custom)
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
                Ok(ImageSelection::Index(v as usize))
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
                usize::try_from(v)
                    .map(ImageSelection::Index)
                    .map_err(|_| E::custom(format!("negative image index: {v}")))
            }
        }

        deserializer.deserialize_any(SelectionVisitor)
    }
}

/// Value of a per-platform setting.
///
/// Form fields may be left blank, so the empty case is representable and
/// deserializes from JSON `null`. Integral numbers serialize without a
/// fractional part.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum SettingValue {
    Number(f64),
    Text(String),
    Empty,
}

impl SettingValue {
    /// Empty means blank: null, the empty string, or a non-finite number
    /// (a cleared numeric input). Whitespace-only text is a value.
    pub fn is_empty(&self) -> bool {
        match self {
            SettingValue::Empty => true,
            SettingValue::Text(s) => s.is_empty(),
            SettingValue::Number(n) => !n.is_finite(),
        }
    }

    fn as_integer(&self) -> Option<i64> {
        match *self {
            SettingValue::Number(n)
                if n.is_finite() && n.fract() == 0.0 && n.abs() < i64::MAX as f64 =>
            {
                Some(n as i64)
            }
            _ => None,
        }
    }
}

impl Serialize for SettingValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if let Some(n) = self.as_integer() {
            return serializer.serialize_i64(n);
        }
        match self {
            SettingValue::Number(n) => serializer.serialize_f64(*n),
            SettingValue::Text(s) => serializer.serialize_str(s),
            SettingValue::Empty => serializer.serialize_unit(),
        }
    }
}

impl fmt::Display for SettingValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self, self.as_integer()) {
            (_, Some(n)) => write!(f, "{n}"),
            (SettingValue::Number(n), None) => write!(f, "{n}"),
            (SettingValue::Text(s), None) => f.write_str(s),
            (SettingValue::Empty, None) => Ok(()),
        }
    }
}

impl From<&str> for SettingValue {
    fn from(s: &str) -> Self {
        if s.trim().is_empty() {
            return SettingValue::Empty;
        }
        match s.trim().parse::<f64>() {
            Ok(n) if n.is_finite() => SettingValue::Number(n),
            _ => SettingValue::Text(s.to_string()),
        }
    }
}
