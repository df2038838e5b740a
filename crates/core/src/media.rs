//! Media type enum and validation.
//!
//! The catalog stores `media_type` as text; this enum is the canonical
//! source for the allowed values and their per-type defaults.

use crate::error::CoreError;

/// Valid media type values, matching the `media_records.media_type` column.
pub const VALID_MEDIA_TYPES: &[&str] = &["image", "audio", "video"];

/// The kind of media a record holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaType {
    Image,
    Audio,
    Video,
}

impl MediaType {
    /// Parse from the client-supplied / database `media_type` value.
    pub fn from_name(name: &str) -> Result<Self, CoreError> {
        match name {
            "image" => Ok(Self::Image),
            "audio" => Ok(Self::Audio),
            "video" => Ok(Self::Video),
            other => Err(CoreError::Validation(format!(
                "Invalid media_type '{other}'. Must be one of: {VALID_MEDIA_TYPES:?}"
            ))),
        }
    }

    /// Canonical string value.
    pub fn name(self) -> &'static str {
        match self {
            Self::Image => "image",
            Self::Audio => "audio",
            Self::Video => "video",
        }
    }

    /// Extension used for stored files when the generation service does not
    /// report a source path or URL to derive one from.
    pub fn default_extension(self) -> &'static str {
        match self {
            Self::Image => ".png",
            Self::Audio => ".mp3",
            Self::Video => ".mp4",
        }
    }
}

impl std::fmt::Display for MediaType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
