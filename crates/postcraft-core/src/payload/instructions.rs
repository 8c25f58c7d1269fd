//! The fixed instruction block sent with every generation request.

/// Output conventions the generator must follow.
///
/// The headings and bold labels named here are exactly what
/// [`crate::parse`] splits on, so the two must change together.
pub const PROMPT_INSTRUCTIONS: &str = "\
You are a professional content generation assistant specialized in SEO-driven marketing content. \
You create fully optimized, engaging, and professional posts for all social media platforms \
(Facebook, Instagram, TikTok, Pinterest, YouTube, LinkedIn, X).

Your Task:
1. Based on the user's input (niche, audience, style, platforms), research and integrate the most searched keywords in the US and European markets related to the provided niche.
2. Generate SEO-friendly content using these keywords naturally.
3. Adapt the content format automatically to fit each chosen platform.
4. For each platform selected by the user, generate 3-5 variations.
5. If images are provided for specific platforms, analyze them and generate content that is highly relevant to the provided visuals. If multiple image options are provided for a platform, choose the most compelling one and create the post based on it.
6. Adhere to any platform-specific settings provided in the input, such as tone for LinkedIn or character limits for X.
7. Integrate relevant emojis professionally. The style of emojis should match the platform's tone (more professional for LinkedIn, more playful for TikTok).

Content for each variation MUST include:
- A strong hook at the beginning.
- A value-driven body (educational, emotional, or promotional).
- A clear call-to-action (CTA) tailored to the platform AND the user's selected 'cta_style'. If a 'product_link' is provided in the input, incorporate it into the CTA for platforms that support links.
- Relevant trending hashtags/keywords for reach. If 'custom_hashtags' are provided in the input, you MUST include them along with the ones you generate.

Output Format Rules:
- Use Markdown for structuring the entire output.
- Start with a top-level heading for each platform (e.g., '## Instagram').
- Use a sub-heading for each variation (e.g., '### Variation 1').
- Use bold markdown for labels (e.g., '**Hook:**', '**Body:**', '**CTA:**', '**Hashtags:**').
- DO NOT output JSON.";

/// Header placed between the instructions and the serialized input.
pub const USER_INPUT_HEADER: &str = "User Input:";

/// Intro part preceding every image of a platform in auto-selection mode.
pub fn auto_selection_intro(platform: &str) -> String {
    format!(
        "For the {platform} platform, multiple images have been provided. \
         Please choose the most suitable one to base the content on:"
    )
}

/// Intro part preceding an explicitly selected image.
pub fn selected_image_intro(platform: &str) -> String {
    format!("This is the selected image for the {platform} platform:")
}

/// Summary that replaces image data for an auto-selection platform.
pub fn auto_selection_summary(count: usize) -> String {
    format!("{count} image(s) attached for AI selection.")
}

/// Summary that replaces image data for an explicitly selected image.
pub fn selected_image_summary(count: usize) -> String {
    format!("1 specific image selected out of {count}.")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_instructions_name_the_conventions() {
        for marker in ["## Instagram", "### Variation 1", "**CTA:**", "DO NOT output JSON", "3-5 variations"] {
            assert!(PROMPT_INSTRUCTIONS.contains(marker), "missing {marker}");
        }
    }

    #[test]
    fn test_summaries() {
        assert_eq!(auto_selection_summary(3), "3 image(s) attached for AI selection.");
        assert_eq!(selected_image_summary(2), "1 specific image selected out of 2.");
    }
}
