//! Tag extraction
//!
//! Tokenizes a filename into a deduplicated, ordered set of semantic tags
//! for search and filtering.

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

use super::ruleset::Ruleset;
use crate::core::utils::stem_of;

/// Extract tags from a filename.
///
/// The extension is stripped, the stem is split on the separator class, and
/// each token is folded to base-letter lowercase. Version tokens, stopwords,
/// bare numbers, and tokens shorter than three characters are dropped;
/// resolution tokens are kept unconditionally. First-seen order is
/// preserved; duplicates are dropped.
pub fn extract_tags(rules: &Ruleset, filename: &str) -> Vec<String> {
    let stem = stem_of(filename);

    let mut tags = Vec::new();
    for raw in rules.tag_split_re.split(stem) {
        if raw.is_empty() {
            continue;
        }
        let token = fold_token(raw);
        if token.is_empty() {
            continue;
        }
        if rules.version_token_re.is_match(&token) {
            continue;
        }
        if rules.is_stopword(&token) {
            continue;
        }
        // Resolution tokens are useful search terms even though they are
        // numeric and stripped from grouping keys.
        if !rules.resolution_token_re.is_match(&token) {
            if token.chars().all(|c| c.is_ascii_digit()) {
                continue;
            }
            if token.chars().count() < 3 {
                continue;
            }
        }
        if !tags.contains(&token) {
            tags.push(token);
        }
    }
    tags
}

/// Fold a token to base-letter lowercase: NFD decomposition with combining
/// marks stripped, then lowercased.
fn fold_token(token: &str) -> String {
    token
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect::<String>()
        .to_lowercase()
}
