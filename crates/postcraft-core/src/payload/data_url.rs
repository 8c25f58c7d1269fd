//! Decoding of `data:<mime>;base64,<payload>` image references.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

const DEFAULT_MIME: &str = "image/jpeg";

/// A decoded image reference, borrowing from the original string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InlineImage<'a> {
    pub mime_type: &'a str,
    /// Base64 payload, verified to decode.
    pub data: &'a str,
}

/// Why an image reference was rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DataUrlError {
    #[error("missing ',' separator")]
    MissingSeparator,

    #[error("empty payload")]
    EmptyPayload,

    #[error("invalid base64: {0}")]
    InvalidBase64(String),
}

/// Split a data URL into its MIME type and base64 payload.
///
/// The MIME type is the text between the first `:` and the next `;` in the
/// header, falling back to `image/jpeg` when that is absent or empty.
pub fn decode(data_url: &str) -> Result<InlineImage<'_>, DataUrlError> {
    let (meta, data) = data_url
        .split_once(',')
        .ok_or(DataUrlError::MissingSeparator)?;
    let data = data.trim();
    if data.is_empty() {
        return Err(DataUrlError::EmptyPayload);
    }
    STANDARD
        .decode(data)
        .map_err(|e| DataUrlError::InvalidBase64(e.to_string()))?;

    Ok(InlineImage {
        mime_type: mime_from_meta(meta).unwrap_or(DEFAULT_MIME),
        data,
    })
}

fn mime_from_meta(meta: &str) -> Option<&str> {
    let (_, after_colon) = meta.split_once(':')?;
    let (mime, _) = after_colon.split_once(';')?;
    let mime = mime.trim();
    (!mime.is_empty()).then_some(mime)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_png() {
        let img = decode("data:image/png;base64,aGVsbG8=").unwrap();
        assert_eq!(img.mime_type, "image/png");
        assert_eq!(img.data, "aGVsbG8=");
    }

    #[test]
    fn test_decode_defaults_mime() {
        assert_eq!(decode("aGVsbG8=,aGVsbG8=").unwrap().mime_type, "image/jpeg");
        assert_eq!(decode("data:;base64,aGVsbG8=").unwrap().mime_type, "image/jpeg");
        assert_eq!(decode("data:image/webp,aGVsbG8=").unwrap().mime_type, "image/jpeg");
    }

    #[test]
    fn test_decode_rejects_malformed() {
        assert_eq!(decode("no-comma-here"), Err(DataUrlError::MissingSeparator));
        assert_eq!(decode("data:image/png;base64,"), Err(DataUrlError::EmptyPayload));
        assert!(matches!(
            decode("data:image/png;base64,!!!not base64!!!"),
            Err(DataUrlError::InvalidBase64(_))
        ));
    }
}
