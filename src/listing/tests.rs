//! Tests for the directory lister
//!
//! Uses real temporary directories; listings are recomputed from the
//! filesystem on every call.

use std::fs;
use std::path::Path;

use super::*;
use crate::core::error::ListingError;

fn touch(dir: &Path, name: &str) {
    fs::write(dir.join(name), b"data").unwrap();
}

fn lister(root: &Path) -> DirectoryLister {
    DirectoryLister::with_default_rules(root.to_path_buf())
}

#[tokio::test]
async fn test_missing_directory_is_an_error_not_an_empty_listing() {
    let tmp = tempfile::tempdir().unwrap();
    let lister = lister(tmp.path());

    let err = lister.list("does/not/exist").await.unwrap_err();
    assert!(matches!(err, ListingError::NotFound { .. }));
}

#[tokio::test]
async fn test_file_target_is_not_a_directory() {
    let tmp = tempfile::tempdir().unwrap();
    touch(tmp.path(), "wood.exr");
    let lister = lister(tmp.path());

    let err = lister.list("wood.exr").await.unwrap_err();
    assert!(matches!(err, ListingError::NotADirectory { .. }));
}

#[tokio::test]
async fn test_os_noise_files_are_invisible() {
    let tmp = tempfile::tempdir().unwrap();
    touch(tmp.path(), "Thumbs.db");
    touch(tmp.path(), "desktop.ini");
    let lister = lister(tmp.path());

    let listing = lister.list("").await.unwrap();
    assert!(listing.items.is_empty());
    assert!(listing.tags.is_empty());
}

#[tokio::test]
async fn test_directories_sort_before_groups_with_natural_order() {
    let tmp = tempfile::tempdir().unwrap();
    fs::create_dir(tmp.path().join("Folder2")).unwrap();
    fs::create_dir(tmp.path().join("folder10")).unwrap();
    touch(tmp.path(), "aardvark.png");
    let lister = lister(tmp.path());

    let listing = lister.list("").await.unwrap();
    let names: Vec<&str> = listing.items.iter().map(|i| i.name.as_str()).collect();
    // All subdirectories precede all asset groups; "Folder2" before
    // "folder10" under numeric-aware comparison.
    assert_eq!(names, vec!["Folder2", "folder10", "aardvark"]);
    assert!(listing.items[0].is_dir);
    assert!(listing.items[1].is_dir);
    assert!(!listing.items[2].is_dir);
}

#[tokio::test]
async fn test_variants_collapse_and_primary_thumbnail_derive() {
    let tmp = tempfile::tempdir().unwrap();
    touch(tmp.path(), "rock.exr");
    touch(tmp.path(), "rock_preview.jpg");
    touch(tmp.path(), "rock_thumb.png");
    let lister = lister(tmp.path());

    let listing = lister.list("").await.unwrap();
    assert_eq!(listing.items.len(), 1);

    let item = &listing.items[0];
    assert_eq!(item.key.as_deref(), Some("rock"));
    assert_eq!(item.variants.len(), 3);
    assert_eq!(item.path, "rock.exr");
    assert_eq!(item.url.as_deref(), Some("/files/rock.exr"));
    // The preview-marked web-safe image wins the thumbnail tie-break; both
    // JPEG and PNG qualify.
    let thumb = item.thumbnail_url.as_deref().unwrap();
    assert!(
        thumb == "/files/rock_preview.jpg" || thumb == "/files/rock_thumb.png",
        "unexpected thumbnail: {thumb}"
    );
}

#[tokio::test]
async fn test_tag_counts_are_per_group_not_per_variant() {
    let tmp = tempfile::tempdir().unwrap();
    touch(tmp.path(), "wood_oak_4k.exr");
    touch(tmp.path(), "wood_oak_2k.exr");
    touch(tmp.path(), "wood_oak_preview.jpg");
    touch(tmp.path(), "marble_white.jpg");
    let lister = lister(tmp.path());

    let listing = lister.list("").await.unwrap();
    assert_eq!(listing.items.len(), 2);

    let wood = listing
        .tags
        .iter()
        .find(|t| t.tag == "wood")
        .expect("wood tag present");
    // Three variants, one group, one count.
    assert_eq!(wood.count, 1);
}

#[tokio::test]
async fn test_tag_counts_sort_by_count_then_name() {
    let tmp = tempfile::tempdir().unwrap();
    touch(tmp.path(), "wood_oak.jpg");
    touch(tmp.path(), "stone_oak.jpg");
    touch(tmp.path(), "brick_red.jpg");
    let lister = lister(tmp.path());

    let listing = lister.list("").await.unwrap();
    assert_eq!(listing.tags[0].tag, "oak");
    assert_eq!(listing.tags[0].count, 2);
    // Ties are alphabetical
    let rest: Vec<&str> = listing.tags[1..].iter().map(|t| t.tag.as_str()).collect();
    let mut sorted = rest.clone();
    sorted.sort();
    assert_eq!(rest, sorted);
}

#[tokio::test]
async fn test_nested_path_listing_builds_nested_urls() {
    let tmp = tempfile::tempdir().unwrap();
    let sub = tmp.path().join("hdris");
    fs::create_dir(&sub).unwrap();
    touch(&sub, "studio_4k.hdr");
    let lister = lister(tmp.path());

    let listing = lister.list("hdris").await.unwrap();
    assert_eq!(listing.path, "hdris");
    assert_eq!(listing.items.len(), 1);
    assert_eq!(
        listing.items[0].url.as_deref(),
        Some("/files/hdris/studio_4k.hdr")
    );
}

#[tokio::test]
async fn test_urls_are_percent_encoded() {
    let tmp = tempfile::tempdir().unwrap();
    touch(tmp.path(), "old planks.png");
    let lister = lister(tmp.path());

    let listing = lister.list("").await.unwrap();
    assert_eq!(
        listing.items[0].url.as_deref(),
        Some("/files/old%20planks.png")
    );
}

#[tokio::test]
async fn test_empty_key_group_is_listed() {
    let tmp = tempfile::tempdir().unwrap();
    touch(tmp.path(), "preview_4k.jpg");
    touch(tmp.path(), "thumb_v2.png");
    let lister = lister(tmp.path());

    let listing = lister.list("").await.unwrap();
    // Every stem is noise: the files collapse into one empty-key group.
    assert_eq!(listing.items.len(), 1);
    assert_eq!(listing.items[0].key.as_deref(), Some(""));
    assert_eq!(listing.items[0].variants.len(), 2);
}
