//! Asset aggregation pipeline
//!
//! Turns one directory's raw file listing into logical asset groups:
//! - `ruleset`: static noise-token tables (preview words, resolution and
//!   version patterns, stopwords), injectable so the pipeline stays a pure
//!   function of (input, ruleset)
//! - `normalize`: reduces a filename stem to a grouping key
//! - `tags`: extracts deduplicated semantic tags from a filename
//! - `group`: partitions file records by key and derives
//!   primary/thumbnail/kind per group
//!
//! All of this is pure and total; no component holds state across calls.

mod group;
mod normalize;
mod ruleset;
mod tags;
mod types;


pub use group::group_records;
pub use normalize::normalize_stem;
pub use ruleset::{Ruleset, DEFAULT_RULESET};
pub use tags::extract_tags;
pub use types::{is_displayable_image, AssetGroup, FileRecord, MediaKind};
