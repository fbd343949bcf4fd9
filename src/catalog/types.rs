//! Catalog record types
//!
//! Core value types flowing through the aggregation pipeline. All of them
//! are constructed fresh for one listing request and discarded afterwards.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Extensions a browser can display inline as an image
const DISPLAYABLE_IMAGE_EXTENSIONS: &[&str] = &[
    ".jpg", ".jpeg", ".png", ".gif", ".webp", ".svg", ".avif", ".bmp",
];

/// Coarse media classification
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    /// Images, including raw/HDR formats that browsers cannot display
    Image,
    /// Videos
    Video,
    /// Audio files
    Audio,
    /// PDF documents
    Pdf,
    /// Plain-text and markup documents
    Text,
    /// Everything else
    Other,
}

impl MediaKind {
    /// Total mapping from a lowercased, dot-prefixed extension to a kind
    pub fn from_extension(extension: &str) -> Self {
        match extension {
            ".jpg" | ".jpeg" | ".png" | ".gif" | ".webp" | ".svg" | ".avif" | ".bmp"
            | ".tif" | ".tiff" | ".exr" | ".hdr" | ".psd" | ".tga" => MediaKind::Image,
            ".mp4" | ".mov" | ".avi" | ".mkv" | ".webm" => MediaKind::Video,
            ".mp3" | ".wav" | ".flac" | ".ogg" | ".m4a" => MediaKind::Audio,
            ".pdf" => MediaKind::Pdf,
            ".txt" | ".md" | ".json" | ".xml" | ".csv" | ".toml" | ".yaml" | ".yml" => {
                MediaKind::Text
            }
            _ => MediaKind::Other,
        }
    }
}

/// Check whether an extension is browser-displayable image data
pub fn is_displayable_image(extension: &str) -> bool {
    DISPLAYABLE_IMAGE_EXTENSIONS.contains(&extension)
}

/// One physical file in a directory
///
/// Read-only once constructed from a filesystem entry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FileRecord {
    /// Filename without path
    pub name: String,

    /// File extension (lowercase, with leading dot; empty if none)
    pub extension: String,

    /// File size in bytes
    pub size_bytes: u64,

    /// Modification time (UTC)
    pub modified_at: DateTime<Utc>,

    /// Coarse media category
    pub media: MediaKind,

    /// Whether a browser can display this file inline as an image
    pub displayable: bool,

    /// Whether the filename carries a preview/thumbnail marker word
    pub preview_marked: bool,

    /// Tags extracted from the filename (ordered, unique)
    pub tags: Vec<String>,
}

impl FileRecord {
    /// The filename without its extension
    pub fn stem(&self) -> &str {
        crate::core::utils::stem_of(&self.name)
    }
}

/// A logical asset: all variants of one normalized key
#[derive(Debug, Clone, Serialize)]
pub struct AssetGroup {
    /// Normalized grouping key (may be empty when every stem token is noise)
    pub key: String,

    /// Variants in enumeration order
    pub variants: Vec<FileRecord>,

    /// The canonical representative file
    pub primary: FileRecord,

    /// A web-displayable preview image, when one exists
    pub thumbnail: Option<FileRecord>,

    /// Coarse kind of the group, derived from the primary
    pub kind: MediaKind,

    /// Union of all variants' tags (deduplicated case-insensitively)
    pub tags: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_media_kind_mapping_is_total() {
        assert_eq!(MediaKind::from_extension(".exr"), MediaKind::Image);
        assert_eq!(MediaKind::from_extension(".mp4"), MediaKind::Video);
        assert_eq!(MediaKind::from_extension(".flac"), MediaKind::Audio);
        assert_eq!(MediaKind::from_extension(".pdf"), MediaKind::Pdf);
        assert_eq!(MediaKind::from_extension(".md"), MediaKind::Text);
        assert_eq!(MediaKind::from_extension(".blend"), MediaKind::Other);
        assert_eq!(MediaKind::from_extension(""), MediaKind::Other);
    }

    #[test]
    fn test_displayable_allow_list() {
        assert!(is_displayable_image(".png"));
        assert!(is_displayable_image(".webp"));
        // Image data, but not browser-displayable
        assert!(!is_displayable_image(".exr"));
        assert!(!is_displayable_image(".psd"));
        assert!(!is_displayable_image(""));
    }
}
