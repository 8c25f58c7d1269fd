//! Generation API key resolution.
//!
//! The key is read from the environment only and held as a
//! [`SecretString`] so it never appears in Debug output or logs.

use secrecy::SecretString;

/// Checked in order; the first non-blank value wins.
pub const API_KEY_VARS: [&str; 2] = ["GEMINI_API_KEY", "API_KEY"];

/// Resolve the API key from the environment.
pub fn resolve_api_key() -> Option<SecretString> {
    resolve_with(|name| std::env::var(name).ok())
}

/// Resolve using a custom lookup (tests, embedding).
pub fn resolve_with<F>(lookup: F) -> Option<SecretString>
where
    F: Fn(&str) -> Option<String>,
{
    API_KEY_VARS.iter().find_map(|name| {
        let value = lookup(name)?;
        let value = value.trim();
        if value.is_empty() {
            return None;
        }
        tracing::debug!(source = name, "resolved generation API key");
        Some(SecretString::from(value.to_string()))
    })
}
