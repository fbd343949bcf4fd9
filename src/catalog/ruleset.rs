//! Noise-token rule tables
//!
//! The normalizer and tag extractor are pure functions of (input, ruleset).
//! The tables here are static configuration: marker words, junk substrings,
//! stopwords, and the resolution/version token patterns, compiled once into
//! regexes. `DEFAULT_RULESET` is the shared read-only instance.

use std::collections::HashSet;

use lazy_static::lazy_static;
use regex::Regex;

/// Separator characters recognized inside filename stems
const SEPARATOR_CLASS: &str = r"[\s._()-]";

/// Resolution token families, without boundary anchors:
/// `<1-32>k`, `WIDTHxHEIGHT`, video height + `p`, bare power-of-two
const RESOLUTION_FAMILIES: &str = r"(?:[1-9]|[12][0-9]|3[0-2])k|[0-9]{1,5}x[0-9]{1,5}|(?:240|360|480|576|720|1080|1440|2160|4320)p|(?:128|256|512|1024|2048|4096|8192|16384)";

/// Version token family, without boundary anchors: `v` + 1-4 digits
const VERSION_FAMILY: &str = r"v[0-9]{1,4}";

/// Words marking a file as a preview/thumbnail rendition
const PREVIEW_WORDS: &[&str] = &["preview", "thumbnail", "thumb", "prev"];

/// Known-useless substrings removed from grouping keys: texture-map
/// designators and raw-color-space suffixes. Ordered longest-first so the
/// alternation prefers the most specific removal.
const JUNK_SUBSTRINGS: &[&str] = &[
    "ambientocclusion",
    "displacement",
    "glossiness",
    "basecolor",
    "metalness",
    "roughness",
    "emission",
    "emissive",
    "metallic",
    "specular",
    "diffuse",
    "opacity",
    "acescg",
    "albedo",
    "height",
    "linear",
    "normal",
    "rec709",
    "gloss",
    "rough",
    "bump",
    "diff",
    "disp",
    "srgb",
];

/// Format/process words never worth keeping as tags
const STOPWORDS: &[&str] = &[
    "preview", "thumbnail", "thumb", "prev", "raw", "img", "image", "file",
    "files", "final", "copy", "edit", "export", "render", "srgb", "linear",
    "aces", "acescg", "rec709", "jpg", "jpeg", "png", "webp", "gif", "bmp",
    "tif", "tiff", "exr", "hdr", "hdri", "psd", "svg", "avif",
];

/// Static lookup tables and compiled patterns for filename heuristics
pub struct Ruleset {
    stopwords: HashSet<String>,
    /// Separator-bounded preview words, for stripping and the preview flag
    pub(crate) preview_re: Regex,
    /// Separator-bounded resolution tokens, for stripping
    pub(crate) resolution_re: Regex,
    /// Separator-bounded version tokens, for stripping
    pub(crate) version_re: Regex,
    /// Whole-token resolution pattern, for tag classification
    pub(crate) resolution_token_re: Regex,
    /// Whole-token version pattern, for tag filtering
    pub(crate) version_token_re: Regex,
    /// Runs of stem separators
    pub(crate) separator_run_re: Regex,
    /// Tag tokenization split class (stem separators plus brackets and comma)
    pub(crate) tag_split_re: Regex,
    /// Alternation of junk substrings; `None` when the list is empty
    pub(crate) junk_re: Option<Regex>,
}

impl Ruleset {
    /// Build a ruleset from explicit word tables
    pub fn new(
        preview_words: Vec<String>,
        junk_substrings: Vec<String>,
        stopwords: Vec<String>,
    ) -> Self {
        let preview_re = Regex::new(&format!(
            "(?:^|{sep})(?:{words})(?:{sep}|$)",
            sep = SEPARATOR_CLASS,
            words = alternation(&preview_words),
        ))
        .expect("preview pattern is valid");

        let resolution_re = Regex::new(&format!(
            "(?:^|{sep})(?:{fam})(?:{sep}|$)",
            sep = SEPARATOR_CLASS,
            fam = RESOLUTION_FAMILIES,
        ))
        .expect("resolution pattern is valid");

        let version_re = Regex::new(&format!(
            "(?:^|{sep})(?:{fam})(?:{sep}|$)",
            sep = SEPARATOR_CLASS,
            fam = VERSION_FAMILY,
        ))
        .expect("version pattern is valid");

        let resolution_token_re =
            Regex::new(&format!("^(?:{})$", RESOLUTION_FAMILIES)).expect("resolution token pattern is valid");
        let version_token_re =
            Regex::new(&format!("^(?:{})$", VERSION_FAMILY)).expect("version token pattern is valid");

        let separator_run_re =
            Regex::new(&format!("{}+", SEPARATOR_CLASS)).expect("separator pattern is valid");
        let tag_split_re = Regex::new(r"[\s._()\[\],-]+").expect("tag split pattern is valid");

        let junk_re = if junk_substrings.is_empty() {
            None
        } else {
            Some(
                Regex::new(&alternation(&junk_substrings)).expect("junk pattern is valid"),
            )
        };

        Self {
            stopwords: stopwords.into_iter().collect(),
            preview_re,
            resolution_re,
            version_re,
            resolution_token_re,
            version_token_re,
            separator_run_re,
            tag_split_re,
            junk_re,
        }
    }

    /// Check whether a lowercased token is a stopword
    pub fn is_stopword(&self, token: &str) -> bool {
        self.stopwords.contains(token)
    }

    /// Check whether a filename stem carries a preview/thumbnail marker word
    pub fn is_preview_marked(&self, stem: &str) -> bool {
        self.preview_re.is_match(&stem.to_lowercase())
    }
}

impl Default for Ruleset {
    fn default() -> Self {
        Self::new(
            PREVIEW_WORDS.iter().map(|s| s.to_string()).collect(),
            JUNK_SUBSTRINGS.iter().map(|s| s.to_string()).collect(),
            STOPWORDS.iter().map(|s| s.to_string()).collect(),
        )
    }
}

/// Join words into a regex alternation, escaping each one
fn alternation(words: &[String]) -> String {
    words
        .iter()
        .map(|w| regex::escape(w))
        .collect::<Vec<_>>()
        .join("|")
}

lazy_static! {
    /// Shared default ruleset; read-only, safe across requests
    pub static ref DEFAULT_RULESET: Ruleset = Ruleset::default();
}
