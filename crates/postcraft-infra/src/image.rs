//! Image attachments read from disk as data URLs.

use std::path::Path;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

/// Image MIME type for a file name, by extension.
pub fn detect_image_mime(path: &Path) -> Option<&'static str> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    match ext.as_str() {
        "png" => Some("image/png"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        "webp" => Some("image/webp"),
        "gif" => Some("image/gif"),
        "heic" => Some("image/heic"),
        "heif" => Some("image/heif"),
        _ => None,
    }
}

/// Encode raw image bytes as a `data:` URL.
pub fn to_data_url(mime_type: &str, bytes: &[u8]) -> String {
    format!("data:{mime_type};base64,{}", STANDARD.encode(bytes))
}

/// Read an image file and encode it as a `data:` URL.
pub async fn read_data_url(path: &Path) -> std::io::Result<String> {
    let mime_type = detect_image_mime(path).ok_or_else(|| {
        std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            format!("unsupported image type: {}", path.display()),
        )
    })?;
    let bytes = tokio::fs::read(path).await?;
    tracing::debug!(path = %path.display(), bytes = bytes.len(), "read image attachment");
    Ok(to_data_url(mime_type, &bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_image_mime() {
        assert_eq!(detect_image_mime(Path::new("a/photo.PNG")), Some("image/png"));
        assert_eq!(detect_image_mime(Path::new("shot.jpeg")), Some("image/jpeg"));
        assert_eq!(detect_image_mime(Path::new("notes.txt")), None);
        assert_eq!(detect_image_mime(Path::new("no_extension")), None);
    }

    #[test]
    fn test_to_data_url() {
        assert_eq!(to_data_url("image/png", b"hello"), "data:image/png;base64,aGVsbG8=");
    }

    #[tokio::test]
    async fn test_read_data_url() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pixel.gif");
        tokio::fs::write(&path, b"GIF89a").await.unwrap();

        let url = read_data_url(&path).await.unwrap();
        assert_eq!(url, "data:image/gif;base64,R0lGODlh");

        let bad = dir.path().join("doc.pdf");
        tokio::fs::write(&bad, b"%PDF").await.unwrap();
        let err = read_data_url(&bad).await.unwrap_err();
        assert_eq!(err.kind(), std::io::ErrorKind::InvalidInput);
    }
}
