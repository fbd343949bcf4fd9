//! Asset grouping
//!
//! Partitions a directory's file records into logical asset groups by
//! normalized key and derives each group's primary, thumbnail, kind, and
//! union tag set.

use std::collections::HashMap;

use super::normalize::normalize_stem;
use super::ruleset::Ruleset;
use super::types::{is_displayable_image, AssetGroup, FileRecord, MediaKind};

/// Raw/HDR formats preferred as a group's primary, in priority order
const RAW_PRIORITY_EXTENSIONS: &[&str] = &[".exr", ".hdr", ".tif", ".tiff"];

/// Raw high-dynamic-range formats a browser cannot display; groups whose
/// primary is one of these are forced to `Other`
const HDR_EXTENSIONS: &[&str] = &[".exr", ".hdr"];

/// Extensions safe to hand to a browser as a thumbnail
const WEB_SAFE_EXTENSIONS: &[&str] = &[".jpg", ".jpeg", ".png", ".gif", ".webp"];

/// Partition records into asset groups.
///
/// Input order matters: keys are emitted in first-seen order and the
/// last-resort primary/thumbnail fallback is the first record encountered,
/// so callers must pass records in enumeration order for reproducible
/// results.
pub fn group_records(rules: &Ruleset, records: Vec<FileRecord>) -> Vec<AssetGroup> {
    // Fold into an insertion-ordered key -> variants map, local to this call.
    let mut order: Vec<String> = Vec::new();
    let mut by_key: HashMap<String, Vec<FileRecord>> = HashMap::new();

    for record in records {
        let key = normalize_stem(rules, record.stem());
        match by_key.get_mut(&key) {
            Some(variants) => variants.push(record),
            None => {
                order.push(key.clone());
                by_key.insert(key, vec![record]);
            }
        }
    }

    order
        .into_iter()
        .map(|key| {
            let variants = by_key.remove(&key).unwrap_or_default();
            build_group(key, variants)
        })
        .collect()
}

fn build_group(key: String, variants: Vec<FileRecord>) -> AssetGroup {
    let primary = select_primary(&variants).clone();
    let thumbnail = select_thumbnail(&variants).cloned();
    let kind = classify(&primary);
    let tags = union_tags(&variants);

    AssetGroup {
        key,
        variants,
        primary,
        thumbnail,
        kind,
        tags,
    }
}

/// First variant matching the raw/HDR priority list, else the first variant
/// in insertion order.
fn select_primary(variants: &[FileRecord]) -> &FileRecord {
    for ext in RAW_PRIORITY_EXTENSIONS {
        if let Some(record) = variants.iter().find(|r| r.extension == *ext) {
            return record;
        }
    }
    &variants[0]
}

/// First preview-marked web-safe image, else the first web-safe image, else
/// none. Only web-displayable records are ever considered.
fn select_thumbnail(variants: &[FileRecord]) -> Option<&FileRecord> {
    let web_safe = |r: &&FileRecord| {
        r.displayable
            && is_displayable_image(&r.extension)
            && WEB_SAFE_EXTENSIONS.contains(&r.extension.as_str())
    };

    variants
        .iter()
        .find(|r| web_safe(r) && r.preview_marked)
        .or_else(|| variants.iter().find(web_safe))
}

/// Base kind from the primary's media category, with the HDR override
/// applied as an explicit post-processing step.
fn classify(primary: &FileRecord) -> MediaKind {
    let base = primary.media;
    if HDR_EXTENSIONS.contains(&primary.extension.as_str()) {
        return MediaKind::Other;
    }
    base
}

/// Union of all variants' tags, deduplicated case-insensitively, preserving
/// first-seen order.
fn union_tags(variants: &[FileRecord]) -> Vec<String> {
    let mut seen: Vec<String> = Vec::new();
    let mut tags: Vec<String> = Vec::new();
    for record in variants {
        for tag in &record.tags {
            let folded = tag.to_lowercase();
            if !seen.contains(&folded) {
                seen.push(folded);
                tags.push(tag.clone());
            }
        }
    }
    tags
}
