//! Filename normalization
//!
//! Reduces a filename stem to the key used to group resolution, version,
//! preview, and map variants of one logical asset. Equal keys mean the same
//! asset, by construction.

use super::ruleset::Ruleset;

/// Normalize a filename stem to its grouping key.
///
/// Lowercases the stem, strips separator-bounded preview words, resolution
/// tokens (`4k`, `2048x2048`, `1080p`, bare power-of-two counts) and version
/// tokens (`v1`..`v9999`), collapses separator runs, joins the surviving
/// fragments, and removes junk substrings.
///
/// The stripping pass is iterated to a fixpoint: joining fragments can
/// synthesize a fresh noise token (`10_24` becomes `1024`), so a single pass
/// would not be idempotent. With the fixpoint,
/// `normalize_stem(r, &normalize_stem(r, s)) == normalize_stem(r, s)` holds
/// for every input.
pub fn normalize_stem(rules: &Ruleset, stem: &str) -> String {
    let mut key = stem.to_lowercase();
    loop {
        let next = strip_pass(rules, &key);
        if next == key {
            return key;
        }
        key = next;
    }
}

/// One stripping pass: bounded noise tokens, separator collapse, join,
/// junk-substring removal.
fn strip_pass(rules: &Ruleset, input: &str) -> String {
    // Replace each bounded noise token (with its boundary separators) by a
    // single separator so neighbours stay apart until the join.
    let stripped = rules.preview_re.replace_all(input, " ");
    let stripped = rules.resolution_re.replace_all(&stripped, " ");
    let stripped = rules.version_re.replace_all(&stripped, " ");

    // Collapse separator runs, trim, then drop all remaining whitespace.
    let collapsed = rules.separator_run_re.replace_all(&stripped, " ");
    let mut key: String = collapsed
        .trim()
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect();

    // Junk substrings are removed after the join; removal itself can expose
    // new occurrences, so it also runs to a fixpoint.
    if let Some(junk_re) = &rules.junk_re {
        loop {
            let next = junk_re.replace_all(&key, "").into_owned();
            if next == key {
                break;
            }
            key = next;
        }
    }

    key
}
