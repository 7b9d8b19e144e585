//! Reading inputs and writing generated media.

use anyhow::{Context, Result};
use likeness::{DataUri, IdentityEmbedding};
use std::path::Path;

/// Load a data URI verbatim, or read a file and guess its MIME type.
pub async fn load_media(input: &str) -> Result<DataUri> {
    if input.starts_with("data:") {
        return input
            .parse()
            .with_context(|| "Failed to parse data URI argument".to_string());
    }
    let path = Path::new(input);
    let bytes = tokio::fs::read(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))?;
    Ok(DataUri::new(mime_for_path(path), bytes))
}

/// MIME type from a file extension.
pub fn mime_for_path(path: &Path) -> &'static str {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();
    match extension.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "webp" => "image/webp",
        "gif" => "image/gif",
        "mp4" => "video/mp4",
        "mov" => "video/quicktime",
        "webm" => "video/webm",
        "avi" => "video/x-msvideo",
        _ => "application/octet-stream",
    }
}

/// File extension for a MIME type.
pub fn extension_for_mime(mime: &str) -> &'static str {
    match mime {
        "image/png" => "png",
        "image/jpeg" => "jpg",
        "image/webp" => "webp",
        "image/gif" => "gif",
        "video/quicktime" => "mov",
        "video/webm" => "webm",
        "video/x-msvideo" => "avi",
        m if m.starts_with("video/") => "mp4",
        _ => "bin",
    }
}

/// Write decoded media bytes to `path`.
pub async fn write_media(uri: &DataUri, path: &Path) -> Result<()> {
    tokio::fs::write(path, uri.data())
        .await
        .with_context(|| format!("Failed to write {}", path.display()))
}

/// Read an identity embedding from either an [`IdentityEmbedding`] document
/// or a bare JSON array of floats.
pub async fn load_identity(path: &Path) -> Result<(Vec<f32>, Option<String>)> {
    let text = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))?;
    if let Ok(identity) = serde_json::from_str::<IdentityEmbedding>(&text) {
        return Ok((identity.embedding, Some(identity.face_description)));
    }
    let embedding: Vec<f32> = serde_json::from_str(&text)
        .with_context(|| format!("{} is not an identity embedding", path.display()))?;
    Ok((embedding, None))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mime_guessing_is_case_insensitive() {
        assert_eq!(mime_for_path(Path::new("clip.MP4")), "video/mp4");
        assert_eq!(mime_for_path(Path::new("face.jpeg")), "image/jpeg");
        assert_eq!(mime_for_path(Path::new("notes")), "application/octet-stream");
    }

    #[test]
    fn extensions_round_trip_common_types() {
        assert_eq!(extension_for_mime(mime_for_path(Path::new("a.png"))), "png");
        assert_eq!(extension_for_mime("video/mpeg"), "mp4");
    }
}
