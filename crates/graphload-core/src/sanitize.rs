//! Sanitization of untrusted text into Cypher schema identifiers.
//!
//! Labels, relationship types, and property keys cannot be passed as query
//! parameters, so they end up spliced into Cypher text. Everything produced
//! here contains only letters (general category `L`), numbers (`N`),
//! underscores, whitespace, and hyphens, and never a backtick, so it is safe
//! inside a backtick-quoted identifier.
//!
//! Whitespace includes the information separators U+001C..U+001F, which
//! Unicode's `White_Space` property leaves out.

use std::sync::LazyLock;

use regex::Regex;

/// Relationship type used when a predicate is missing or sanitizes to nothing.
pub const DEFAULT_RELATIONSHIP_TYPE: &str = "RELATED_TO";

/// Node label used when an entity has no usable label.
pub const DEFAULT_LABEL: &str = "Entity";

static UNSAFE_CHARS: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"[^\p{L}\p{N}_\s\x{1C}-\x{1F}\-]").ok());
static SEPARATOR_RUN: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"[\s\x{1C}-\x{1F}\-]+").ok());
static NON_WORD_CHAR: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"[^\p{L}\p{N}_]").ok());

/// Replace every match of `pattern` in `text`.
///
/// A pattern that failed to compile yields an empty string, which callers
/// treat as "nothing usable".
fn replace_all(pattern: &LazyLock<Option<Regex>>, text: &str, with: &str) -> String {
    match &**pattern {
        Some(re) => re.replace_all(text, with).into_owned(),
        None => String::new(),
    }
}

fn is_space(c: char) -> bool {
    c.is_whitespace() || ('\u{1C}'..='\u{1F}').contains(&c)
}

/// Strip backticks and unsafe characters, then trim surrounding whitespace.
///
/// Letters and numbers are judged by Unicode general category, so non-ASCII
/// names survive while combining marks are dropped.
pub fn sanitize_identifier(raw: &str) -> String {
    let kept = replace_all(&UNSAFE_CHARS, &raw.replace('`', ""), "");
    kept.trim_matches(is_space).to_string()
}

/// Derive a relationship type from a free-text predicate.
///
/// Runs of whitespace and hyphens collapse to a single `_` and the result is
/// uppercased. Falls back to [`DEFAULT_RELATIONSHIP_TYPE`] when nothing is left.
pub fn relationship_type(predicate: Option<&str>) -> String {
    let Some(raw) = predicate else {
        return DEFAULT_RELATIONSHIP_TYPE.to_string();
    };

    let joined = replace_all(&SEPARATOR_RUN, &sanitize_identifier(raw), "_");
    let out = replace_all(&NON_WORD_CHAR, &joined, "_").to_uppercase();

    if out.is_empty() {
        DEFAULT_RELATIONSHIP_TYPE.to_string()
    } else {
        out
    }
}

/// Sanitize a node label. Returns `None` if nothing usable remains.
pub fn label(raw: &str) -> Option<String> {
    let cleaned = sanitize_identifier(raw);
    (!cleaned.is_empty()).then_some(cleaned)
}

/// Sanitize a property key. Every whitespace character and hyphen becomes `_`.
///
/// Returns `None` if nothing usable remains, in which case the property is skipped.
pub fn property_key(raw: &str) -> Option<String> {
    let key: String = sanitize_identifier(raw)
        .chars()
        .map(|c| if is_space(c) || c == '-' { '_' } else { c })
        .collect();
    (!key.is_empty()).then_some(key)
}
