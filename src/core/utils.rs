//! Utility functions for assetshelf
//!
//! Filename helpers shared by the catalog pipeline and the HTTP layer.

/// Extract the extension from a filename, lowercased with a leading dot.
///
/// Returns an empty string when the name has no extension. A leading dot
/// alone (`.DS_Store`) is not treated as an extension separator.
pub fn extension_of(name: &str) -> String {
    match name.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() && !ext.is_empty() => {
            format!(".{}", ext.to_lowercase())
        }
        _ => String::new(),
    }
}

/// Extract the stem (filename without extension) from a filename.
pub fn stem_of(name: &str) -> &str {
    match name.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() && !ext.is_empty() => stem,
        _ => name,
    }
}
