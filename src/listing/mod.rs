//! Directory listing
//!
//! Orchestrates one single-level directory scan: enumerate children, drop
//! OS metadata noise, build file records in enumeration order, group them
//! into assets, sort subdirectories ahead of groups, and aggregate tag
//! counts. Every listing is recomputed fresh from the filesystem; nothing
//! is cached between requests.

#[cfg(test)]
mod tests;

use std::cmp::Ordering;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use serde::Serialize;
use tokio::fs;

use crate::catalog::{self, AssetGroup, FileRecord, MediaKind, Ruleset};
use crate::core::error::ListingError;
use crate::core::utils::{extension_of, stem_of};

/// OS metadata files never shown in listings (compared case-insensitively)
const OS_NOISE_FILENAMES: &[&str] = &["thumbs.db", "desktop.ini", ".ds_store"];

/// Characters percent-encoded inside URL paths ('/' is kept as a separator)
const URL_PATH_ENCODE_SET: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'\\')
    .add(b'^')
    .add(b'`')
    .add(b'{')
    .add(b'|')
    .add(b'}');

/// One variant of an asset group as rendered to the client
#[derive(Debug, Clone, Serialize)]
pub struct VariantItem {
    /// Public URL of the file
    pub url: String,

    #[serde(flatten)]
    pub file: FileRecord,
}

/// One browsable entry: a subdirectory or an asset group
///
/// Both share the display fields (name, path, tags) so clients can treat
/// them uniformly.
#[derive(Debug, Clone, Serialize)]
pub struct DirectoryItem {
    /// Display name
    pub name: String,

    /// Path relative to the asset root
    pub path: String,

    /// Whether this entry is a subdirectory
    pub is_dir: bool,

    /// Byte size of the primary file (null for directories)
    pub size_bytes: Option<u64>,

    /// Modification time (UTC)
    pub modified_at: DateTime<Utc>,

    /// Public URL of the primary file (null for directories)
    pub url: Option<String>,

    /// URL of the group's thumbnail, when one exists
    pub thumbnail_url: Option<String>,

    /// Coarse kind of the group (null for directories)
    pub kind: Option<MediaKind>,

    /// Normalized grouping key (null for directories)
    pub key: Option<String>,

    /// All variants of the group (empty for directories)
    pub variants: Vec<VariantItem>,

    /// Union tag set of the group (empty for directories)
    pub tags: Vec<String>,
}

/// A tag with the number of asset groups carrying it
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct TagCount {
    pub tag: String,
    pub count: usize,
}

/// The assembled response for one directory
#[derive(Debug, Clone, Serialize)]
pub struct DirectoryListing {
    /// Current path relative to the asset root
    pub path: String,

    /// Subdirectories first, then asset groups; natural name order within
    /// each class
    pub items: Vec<DirectoryItem>,

    /// Tag counts, descending by occurrence with alphabetical tie-break
    pub tags: Vec<TagCount>,
}

/// Lists one directory at a time under a fixed root
///
/// Holds only read-only state; safe to share across requests. Callers are
/// responsible for confining the relative path to the root before calling
/// (`server::paths::resolve_under_root`).
pub struct DirectoryLister {
    root: PathBuf,
    rules: Arc<Ruleset>,
}

impl DirectoryLister {
    /// Create a lister over `root` with an explicit ruleset
    pub fn new(root: PathBuf, rules: Arc<Ruleset>) -> Self {
        Self { root, rules }
    }

    /// Create a lister over `root` with the default ruleset
    pub fn with_default_rules(root: PathBuf) -> Self {
        Self::new(root, Arc::new(Ruleset::default()))
    }

    /// List the immediate children of `rel_path` (empty means the root).
    ///
    /// Fails with a scoped error if the resolved location cannot be read;
    /// a nonexistent directory is never conflated with an empty one.
    pub async fn list(&self, rel_path: &str) -> Result<DirectoryListing, ListingError> {
        let dir = if rel_path.is_empty() {
            self.root.clone()
        } else {
            self.root.join(rel_path)
        };

        let meta = fs::metadata(&dir)
            .await
            .map_err(|e| io_error(rel_path, e))?;
        if !meta.is_dir() {
            return Err(ListingError::NotADirectory {
                path: rel_path.to_string(),
            });
        }

        let mut entries = fs::read_dir(&dir)
            .await
            .map_err(|e| io_error(rel_path, e))?;

        let mut subdirs: Vec<DirectoryItem> = Vec::new();
        let mut records: Vec<FileRecord> = Vec::new();

        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| io_error(rel_path, e))?
        {
            let name = entry.file_name().to_string_lossy().into_owned();
            let entry_meta = entry
                .metadata()
                .await
                .map_err(|e| io_error(rel_path, e))?;

            if entry_meta.is_dir() {
                subdirs.push(subdirectory_item(
                    name.clone(),
                    join_rel(rel_path, &name),
                    mtime_of(&entry_meta),
                ));
            } else {
                if is_os_noise(&name) {
                    continue;
                }
                records.push(build_record(&self.rules, name, &entry_meta));
            }
        }

        // Records stay in enumeration order: the grouper's last-resort
        // primary/thumbnail fallback is "first record encountered".
        let groups = catalog::group_records(&self.rules, records);

        let mut items = subdirs;
        items.extend(groups.into_iter().map(|g| group_item(rel_path, g)));
        sort_items(&mut items);

        let tags = count_tags(&items);

        Ok(DirectoryListing {
            path: rel_path.to_string(),
            items,
            tags,
        })
    }
}

/// Map a filesystem error to a listing error
fn io_error(rel_path: &str, source: std::io::Error) -> ListingError {
    match source.kind() {
        std::io::ErrorKind::NotFound => ListingError::NotFound {
            path: rel_path.to_string(),
        },
        _ => ListingError::Io {
            path: rel_path.to_string(),
            source,
        },
    }
}

/// Check a filename against the OS noise set
fn is_os_noise(name: &str) -> bool {
    let lowered = name.to_lowercase();
    OS_NOISE_FILENAMES.contains(&lowered.as_str())
}

fn mtime_of(meta: &std::fs::Metadata) -> DateTime<Utc> {
    meta.modified()
        .map(DateTime::<Utc>::from)
        .unwrap_or(DateTime::<Utc>::UNIX_EPOCH)
}

/// Build a file record from one directory entry
fn build_record(rules: &Ruleset, name: String, meta: &std::fs::Metadata) -> FileRecord {
    let extension = extension_of(&name);
    let media = MediaKind::from_extension(&extension);
    let displayable = media == MediaKind::Image && catalog::is_displayable_image(&extension);
    let preview_marked = rules.is_preview_marked(stem_of(&name));
    let tags = catalog::extract_tags(rules, &name);

    FileRecord {
        extension,
        size_bytes: meta.len(),
        modified_at: mtime_of(meta),
        media,
        displayable,
        preview_marked,
        tags,
        name,
    }
}

/// Join two relative path fragments with '/'
fn join_rel(base: &str, name: &str) -> String {
    if base.is_empty() {
        name.to_string()
    } else {
        format!("{}/{}", base, name)
    }
}

/// Public URL for a file, with path characters percent-encoded
fn file_url(rel_path: &str) -> String {
    format!(
        "/files/{}",
        utf8_percent_encode(rel_path, URL_PATH_ENCODE_SET)
    )
}

fn subdirectory_item(name: String, path: String, modified_at: DateTime<Utc>) -> DirectoryItem {
    DirectoryItem {
        name,
        path,
        is_dir: true,
        size_bytes: None,
        modified_at,
        url: None,
        thumbnail_url: None,
        kind: None,
        key: None,
        variants: Vec::new(),
        tags: Vec::new(),
    }
}

/// Render an asset group as a browsable item
fn group_item(rel_path: &str, group: AssetGroup) -> DirectoryItem {
    let primary_rel = join_rel(rel_path, &group.primary.name);
    let thumbnail_url = group
        .thumbnail
        .as_ref()
        .map(|t| file_url(&join_rel(rel_path, &t.name)));

    let variants = group
        .variants
        .into_iter()
        .map(|file| VariantItem {
            url: file_url(&join_rel(rel_path, &file.name)),
            file,
        })
        .collect();

    DirectoryItem {
        name: group.primary.stem().to_string(),
        path: primary_rel.clone(),
        is_dir: false,
        size_bytes: Some(group.primary.size_bytes),
        modified_at: group.primary.modified_at,
        url: Some(file_url(&primary_rel)),
        thumbnail_url,
        kind: Some(group.kind),
        key: Some(group.key),
        variants,
        tags: group.tags,
    }
}

/// Subdirectories before asset groups; natural, case-insensitive name order
/// within each class
fn sort_items(items: &mut [DirectoryItem]) {
    items.sort_by(|a, b| match (a.is_dir, b.is_dir) {
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        _ => alphanumeric_sort::compare_str(a.name.to_lowercase(), b.name.to_lowercase()),
    });
}

/// Count each tag once per asset group, then order by count descending with
/// alphabetical tie-break
fn count_tags(items: &[DirectoryItem]) -> Vec<TagCount> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for item in items.iter().filter(|i| !i.is_dir) {
        for tag in &item.tags {
            *counts.entry(tag.as_str()).or_insert(0) += 1;
        }
    }

    let mut tags: Vec<TagCount> = counts
        .into_iter()
        .map(|(tag, count)| TagCount {
            tag: tag.to_string(),
            count,
        })
        .collect();
    tags.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.tag.cmp(&b.tag)));
    tags
}
