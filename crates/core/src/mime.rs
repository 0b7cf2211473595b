//! Extension-based MIME lookup and media classification.

use std::path::Path;

const TABLE: &[(&str, &str)] = &[
    ("mp4", "video/mp4"),
    ("mov", "video/quicktime"),
    ("avi", "video/x-msvideo"),
    ("webm", "video/webm"),
    ("mkv", "video/x-matroska"),
    ("jpg", "image/jpeg"),
    ("jpeg", "image/jpeg"),
    ("png", "image/png"),
    ("gif", "image/gif"),
    ("webp", "image/webp"),
];

const IMAGE_TYPES: &[&str] = &["image/jpeg", "image/jpg", "image/png", "image/webp", "image/gif"];

const VIDEO_TYPES: &[&str] = &[
    "video/mp4",
    "video/quicktime",
    "video/x-msvideo",
    "video/webm",
    "video/x-matroska",
];

/// Generic fallback for byte uploads whose type cannot be determined.
pub const OCTET_STREAM: &str = "application/octet-stream";

/// Look up the content type for a file path by its extension.
///
/// Returns `None` for unknown or missing extensions; each protocol picks its
/// own default in that case.
pub fn content_type_for(path: impl AsRef<Path>) -> Option<&'static str> {
    let ext = path.as_ref().extension()?.to_str()?.to_ascii_lowercase();
    TABLE
        .iter()
        .find(|(known, _)| *known == ext)
        .map(|(_, mime)| *mime)
}

/// Reverse lookup: the canonical extension for a content type.
pub fn extension_for(content_type: &str) -> Option<&'static str> {
    let essence = essence(content_type);
    TABLE
        .iter()
        .find(|(_, mime)| *mime == essence)
        .map(|(ext, _)| *ext)
}

pub fn is_image(content_type: &str) -> bool {
    IMAGE_TYPES.contains(&essence(content_type).as_str())
}

pub fn is_video(content_type: &str) -> bool {
    VIDEO_TYPES.contains(&essence(content_type).as_str())
}

/// Strip parameters (`; charset=...`) and normalise case.
fn essence(content_type: &str) -> String {
    content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_extensions_resolve() {
        assert_eq!(content_type_for("clip.mp4"), Some("video/mp4"));
        assert_eq!(content_type_for("/tmp/a/b.MOV"), Some("video/quicktime"));
        assert_eq!(content_type_for("photo.jpeg"), Some("image/jpeg"));
        assert_eq!(content_type_for("photo.webp"), Some("image/webp"));
    }

    #[test]
    fn unknown_or_missing_extension_is_none() {
        assert_eq!(content_type_for("archive.zip"), None);
        assert_eq!(content_type_for("README"), None);
    }

    #[test]
    fn extension_reverse_lookup_ignores_parameters() {
        assert_eq!(extension_for("image/png; charset=binary"), Some("png"));
        assert_eq!(extension_for("video/mp4"), Some("mp4"));
        assert_eq!(extension_for("text/html"), None);
    }

    #[test]
    fn classification() {
        assert!(is_image("image/jpg"));
        assert!(is_image("IMAGE/PNG"));
        assert!(!is_image("video/mp4"));
        assert!(is_video("video/x-matroska"));
        assert!(!is_video("application/pdf"));
    }
}
