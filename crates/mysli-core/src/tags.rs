//! `#tag` and `@mention` extraction.

use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;

static HASHTAG_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"#(\w+)").expect("Failed to compile hashtag pattern"));

static MENTION_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"@(\w+)").expect("Failed to compile mention pattern"));

/// Extract `#tags` and `@mentions` with the marker stripped.
///
/// Hashtags come first, then mentions, each in order of first occurrence.
/// Duplicates are dropped. Text without markers yields an empty vector.
pub fn extract_tags(text: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut tags = Vec::new();

    let hashtags = HASHTAG_PATTERN.captures_iter(text);
    let mentions = MENTION_PATTERN.captures_iter(text);

    for caps in hashtags.chain(mentions) {
        if let Some(m) = caps.get(1) {
            if seen.insert(m.as_str()) {
                tags.push(m.as_str().to_string());
            }
        }
    }

    tags
}
