//! Stored-file naming rules for generation output.
//!
//! Filenames follow the convention `{type}_{random-hex}{ext}`, so concurrent
//! generation requests never contend on a storage path.

use crate::media::MediaType;

/// Longest extension (including the dot) still treated as a real extension.
/// Anything longer is assumed to be a dot inside an opaque name.
const MAX_EXTENSION_LEN: usize = 8;

/// Derive the stored-file extension from the original path or URL reported
/// by a generation service.
///
/// Query strings and fragments are stripped before looking at the last path
/// segment. Falls back to the per-type default (`.png` / `.mp3` / `.mp4`)
/// when the source is absent or has no usable extension.
pub fn extension_for(source: Option<&str>, media_type: MediaType) -> String {
    if let Some(source) = source {
        let path = source
            .split(['?', '#'])
            .next()
            .unwrap_or(source);
        let base = path.rsplit('/').next().unwrap_or(path);
        if let Some(idx) = base.rfind('.') {
            let ext = &base[idx..];
            if ext.len() > 1
                && ext.len() <= MAX_EXTENSION_LEN
                && ext[1..].chars().all(|c| c.is_ascii_alphanumeric())
            {
                return ext.to_ascii_lowercase();
            }
        }
    }
    media_type.default_extension().to_string()
}

/// Generate a unique stored filename: `{type}_{random-hex}{ext}`.
pub fn generated_filename(media_type: MediaType, ext: &str) -> String {
    let hex = uuid::Uuid::new_v4().simple().to_string();
    format!("{}_{}{}", media_type.name(), hex, ext)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extension_from_local_path() {
        assert_eq!(extension_for(Some("/tmp/out/result.PNG"), MediaType::Image), ".png");
        assert_eq!(extension_for(Some("clip.wav"), MediaType::Audio), ".wav");
    }

    #[test]
    fn extension_from_url_strips_query() {
        assert_eq!(
            extension_for(Some("https://cdn.example.com/a/b.mp3?token=abc#t=1"), MediaType::Audio),
            ".mp3"
        );
    }

    #[test]
    fn extension_defaults_when_source_missing() {
        assert_eq!(extension_for(None, MediaType::Image), ".png");
        assert_eq!(extension_for(None, MediaType::Audio), ".mp3");
        assert_eq!(extension_for(None, MediaType::Video), ".mp4");
    }

    #[test]
    fn extension_defaults_when_source_has_none() {
        assert_eq!(extension_for(Some("https://example.com/render"), MediaType::Video), ".mp4");
        assert_eq!(extension_for(Some("/tmp/output"), MediaType::Image), ".png");
    }

    #[test]
    fn extension_rejects_implausible_suffixes() {
        // A dot inside an opaque name is not an extension.
        assert_eq!(
            extension_for(Some("/tmp/archive.tar.supercalifragilistic"), MediaType::Video),
            ".mp4"
        );
        assert_eq!(extension_for(Some("/tmp/file."), MediaType::Image), ".png");
    }

    #[test]
    fn generated_filenames_are_unique() {
        let a = generated_filename(MediaType::Image, ".png");
        let b = generated_filename(MediaType::Image, ".png");
        assert!(a.starts_with("image_"));
        assert!(a.ends_with(".png"));
        assert_ne!(a, b);
    }
}
