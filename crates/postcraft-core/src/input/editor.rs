//! Editing operations that keep a [`CampaignInput`] internally consistent.
//!
//! Image, selection and settings maps are keyed by platform and may only
//! carry entries for selected platforms. Every mutation here preserves that.

use postcraft_types::error::InputError;
use postcraft_types::input::{CampaignInput, ImageSelection, SettingValue};
use postcraft_types::platform::Platform;

/// Add a platform to the selection. Returns `false` if already selected.
pub fn select_platform(input: &mut CampaignInput, platform: Platform) -> bool {
    input.platforms.insert(platform)
}

/// Remove a platform and everything attached to it.
///
/// Returns `false` if the platform was not selected.
pub fn deselect_platform(input: &mut CampaignInput, platform: Platform) -> bool {
    let removed = input.platforms.remove(&platform);
    input.platform_images.remove(&platform);
    input.platform_image_selection.remove(&platform);
    input.platform_settings.remove(&platform);
    removed
}

/// Append image data URLs to a platform. Returns the new image count.
pub fn add_images<I>(
    input: &mut CampaignInput,
    platform: Platform,
    data_urls: I,
) -> Result<usize, InputError>
where
    I: IntoIterator<Item = String>,
{
    ensure_selected(input, platform)?;
    if !platform.accepts_images() {
        return Err(InputError::ImagesNotAccepted(platform));
    }
    let images = input.platform_images.entry(platform).or_default();
    images.extend(data_urls);
    let count = images.len();
    if count == 0 {
        input.platform_images.remove(&platform);
    }
    Ok(count)
}

/// Remove the image at `index`, returning its data URL.
///
/// A selection pointing at the removed image resets to auto; a selection
/// past it shifts down by one. Removing the last image clears both the
/// platform's images and its selection.
pub fn remove_image(
    input: &mut CampaignInput,
    platform: Platform,
    index: usize,
) -> Result<String, InputError> {
    let count = input.images_for(platform).len();
    let images = input
        .platform_images
        .get_mut(&platform)
        .filter(|images| index < images.len())
        .ok_or(InputError::ImageIndexOutOfRange {
            platform,
            index,
            count,
        })?;
    let removed = images.remove(index);

    if images.is_empty() {
        input.platform_images.remove(&platform);
        input.platform_image_selection.remove(&platform);
        return Ok(removed);
    }

    match input.selection_for(platform) {
        ImageSelection::Index(selected) if selected == index => {
            input.platform_image_selection.remove(&platform);
        }
        ImageSelection::Index(selected) if selected > index => {
            input
                .platform_image_selection
                .insert(platform, ImageSelection::Index(selected - 1));
        }
        _ => {}
    }
    Ok(removed)
}

/// Choose which attached image the generator uses.
pub fn select_image(
    input: &mut CampaignInput,
    platform: Platform,
    selection: ImageSelection,
) -> Result<(), InputError> {
    ensure_selected(input, platform)?;
    match selection {
        ImageSelection::Auto => {
            input.platform_image_selection.remove(&platform);
        }
        ImageSelection::Index(index) => {
            let count = input.images_for(platform).len();
            if index >= count {
                return Err(InputError::ImageIndexOutOfRange {
                    platform,
                    index,
                    count,
                });
            }
            input.platform_image_selection.insert(platform, selection);
        }
    }
    Ok(())
}

/// Set a platform setting. An empty value clears it.
pub fn set_setting(
    input: &mut CampaignInput,
    platform: Platform,
    id: &str,
    value: SettingValue,
) -> Result<(), InputError> {
    ensure_selected(input, platform)?;
    if platform.setting(id).is_none() {
        return Err(InputError::UnknownSetting {
            platform,
            id: id.to_string(),
        });
    }

    if value.is_empty() {
        if let Some(settings) = input.platform_settings.get_mut(&platform) {
            settings.remove(id);
            if settings.is_empty() {
                input.platform_settings.remove(&platform);
            }
        }
    } else {
        input
            .platform_settings
            .entry(platform)
            .or_default()
            .insert(id.to_string(), value);
    }
    Ok(())
}

/// Every consistency problem in `input`, in a stable order.
pub fn problems(input: &CampaignInput) -> Vec<InputError> {
    let mut found = Vec::new();
    if input.platforms.is_empty() {
        found.push(InputError::NoPlatforms);
    }
    if input.niche.trim().is_empty() {
        found.push(InputError::MissingNiche);
    }

    for (&platform, images) in &input.platform_images {
        if !input.platforms.contains(&platform) {
            found.push(InputError::UnselectedPlatform {
                platform,
                what: "images",
            });
        } else if !images.is_empty() && !platform.accepts_images() {
            found.push(InputError::ImagesNotAccepted(platform));
        }
    }

    for (&platform, selection) in &input.platform_image_selection {
        if !input.platforms.contains(&platform) {
            found.push(InputError::UnselectedPlatform {
                platform,
                what: "an image selection",
            });
            continue;
        }
        if let ImageSelection::Index(index) = *selection {
            let count = input.images_for(platform).len();
            if index >= count {
                found.push(InputError::ImageIndexOutOfRange {
                    platform,
                    index,
                    count,
                });
            }
        }
    }

    for (&platform, settings) in &input.platform_settings {
        if !input.platforms.contains(&platform) {
            found.push(InputError::UnselectedPlatform {
                platform,
                what: "settings",
            });
            continue;
        }
        for id in settings.keys() {
            if platform.setting(id).is_none() {
                found.push(InputError::UnknownSetting {
                    platform,
                    id: id.clone(),
                });
            }
        }
    }

    found
}

/// Check `input` before generation, reporting the first problem.
pub fn validate(input: &CampaignInput) -> Result<(), InputError> {
    match problems(input).into_iter().next() {
        Some(problem) => Err(problem),
        None => Ok(()),
    }
}

fn ensure_selected(input: &CampaignInput, platform: Platform) -> Result<(), InputError> {
    if input.platforms.contains(&platform) {
        Ok(())
    } else {
        Err(InputError::PlatformNotSelected(platform))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const IMG: &str = "data:image/png;base64,aGVsbG8=";

    fn input_with(platform: Platform, images: usize) -> CampaignInput {
        let mut input = CampaignInput {
            niche: "candles".to_string(),
            ..Default::default()
        };
        select_platform(&mut input, platform);
        if images > 0 {
            add_images(&mut input, platform, (0..images).map(|i| format!("{IMG}#{i}"))).unwrap();
        }
        input
    }

    #[test]
    fn test_deselect_cascades() {
        let mut input = input_with(Platform::Instagram, 2);
        select_image(&mut input, Platform::Instagram, ImageSelection::Index(1)).unwrap();
        set_setting(
            &mut input,
            Platform::Instagram,
            "hashtag_count",
            SettingValue::Number(10.0),
        )
        .unwrap();

        assert!(deselect_platform(&mut input, Platform::Instagram));
        assert!(input.platform_images.is_empty());
        assert!(input.platform_image_selection.is_empty());
        assert!(input.platform_settings.is_empty());
        assert!(!deselect_platform(&mut input, Platform::Instagram));
    }

    #[test]
    fn test_add_images_requires_selection_and_support() {
        let mut input = input_with(Platform::TikTok, 0);
        assert_eq!(
            add_images(&mut input, Platform::TikTok, [IMG.to_string()]),
            Err(InputError::ImagesNotAccepted(Platform::TikTok))
        );
        assert_eq!(
            add_images(&mut input, Platform::X, [IMG.to_string()]),
            Err(InputError::PlatformNotSelected(Platform::X))
        );
        assert!(input.platform_images.is_empty());
    }

    #[test]
    fn test_remove_selected_image_resets_to_auto() {
        let mut input = input_with(Platform::X, 3);
        select_image(&mut input, Platform::X, ImageSelection::Index(1)).unwrap();
        remove_image(&mut input, Platform::X, 1).unwrap();
        assert_eq!(input.selection_for(Platform::X), ImageSelection::Auto);
        assert_eq!(input.images_for(Platform::X).len(), 2);
    }

    #[test]
    fn test_remove_earlier_image_shifts_selection() {
        let mut input = input_with(Platform::X, 3);
        select_image(&mut input, Platform::X, ImageSelection::Index(2)).unwrap();
        let removed = remove_image(&mut input, Platform::X, 0).unwrap();
        assert!(removed.ends_with("#0"));
        assert_eq!(input.selection_for(Platform::X), ImageSelection::Index(1));
        assert!(input.images_for(Platform::X)[1].ends_with("#2"));
    }

    #[test]
    fn test_remove_later_image_keeps_selection() {
        let mut input = input_with(Platform::X, 3);
        select_image(&mut input, Platform::X, ImageSelection::Index(0)).unwrap();
        remove_image(&mut input, Platform::X, 2).unwrap();
        assert_eq!(input.selection_for(Platform::X), ImageSelection::Index(0));
    }

    #[test]
    fn test_remove_last_image_clears_entries() {
        let mut input = input_with(Platform::Pinterest, 1);
        select_image(&mut input, Platform::Pinterest, ImageSelection::Index(0)).unwrap();
        remove_image(&mut input, Platform::Pinterest, 0).unwrap();
        assert!(!input.platform_images.contains_key(&Platform::Pinterest));
        assert!(!input.platform_image_selection.contains_key(&Platform::Pinterest));
    }

    #[test]
    fn test_remove_out_of_range() {
        let mut input = input_with(Platform::X, 1);
        assert_eq!(
            remove_image(&mut input, Platform::X, 4),
            Err(InputError::ImageIndexOutOfRange {
                platform: Platform::X,
                index: 4,
                count: 1,
            })
        );
    }

    #[test]
    fn test_select_image_bounds() {
        let mut input = input_with(Platform::Facebook, 2);
        assert!(select_image(&mut input, Platform::Facebook, ImageSelection::Index(2)).is_err());
        select_image(&mut input, Platform::Facebook, ImageSelection::Index(1)).unwrap();
        select_image(&mut input, Platform::Facebook, ImageSelection::Auto).unwrap();
        assert!(input.platform_image_selection.is_empty());
    }

    #[test]
    fn test_set_setting_and_clear() {
        let mut input = input_with(Platform::LinkedIn, 0);
        set_setting(&mut input, Platform::LinkedIn, "tone", "conversational".into()).unwrap();
        assert_eq!(
            input.platform_settings[&Platform::LinkedIn]["tone"],
            SettingValue::Text("conversational".into())
        );
        set_setting(&mut input, Platform::LinkedIn, "tone", SettingValue::Empty).unwrap();
        assert!(input.platform_settings.is_empty());

        assert!(matches!(
            set_setting(&mut input, Platform::LinkedIn, "char_limit", SettingValue::Number(1.0)),
            Err(InputError::UnknownSetting { .. })
        ));
    }

    #[test]
    fn test_validate_reports_problems() {
        let empty = CampaignInput::default();
        assert_eq!(
            problems(&empty),
            vec![InputError::NoPlatforms, InputError::MissingNiche]
        );

        let mut input = input_with(Platform::X, 1);
        assert_eq!(validate(&input), Ok(()));

        input
            .platform_image_selection
            .insert(Platform::X, ImageSelection::Index(3));
        input
            .platform_images
            .insert(Platform::Instagram, vec![IMG.to_string()]);
        let found = problems(&input);
        assert!(found.contains(&InputError::UnselectedPlatform {
            platform: Platform::Instagram,
            what: "images",
        }));
        assert!(found.contains(&InputError::ImageIndexOutOfRange {
            platform: Platform::X,
            index: 3,
            count: 1,
        }));
        assert!(validate(&input).is_err());
    }
}
