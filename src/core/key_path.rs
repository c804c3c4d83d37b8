//! Dotted key paths and safe value previews for error messages.

use crate::error::{ConfigError, Result};

/// Separator between namespace segments.
pub const SEPARATOR: char = '.';

/// Separator between tokens of an indexer value.
pub const INDEX_SEPARATOR: &str = " ";

/// Longest value preview embedded in an error message.
const PREVIEW_LIMIT: usize = 32;

/// Leading characters of a masked value that are kept visible.
const MASK_VISIBLE: usize = 4;

/// Join a namespace and a relative key into a fully qualified dotted path.
///
/// ```rust
/// use layered_config::core::key_path::full_key;
///
/// assert_eq!(full_key(Some("a.b"), "c"), "a.b.c");
/// assert_eq!(full_key(None, "c"), "c");
/// ```
pub fn full_key(namespace: Option<&str>, key: &str) -> String {
    match namespace {
        Some(ns) if !ns.is_empty() => format!("{ns}{SEPARATOR}{key}"),
        _ => key.to_string(),
    }
}

/// The key prefix (`ns + "."`) that every key under `namespace` starts with.
pub(crate) fn namespace_criteria(namespace: &str) -> String {
    format!("{namespace}{SEPARATOR}")
}

/// Reject an empty key, namespace or indexer name.
pub(crate) fn require_non_empty(value: &str, argument: &'static str) -> Result<()> {
    if value.is_empty() {
        return Err(ConfigError::InvalidArgument(argument));
    }
    Ok(())
}

/// Truncate a value so an error message never carries it in full.
pub(crate) fn preview(value: &str) -> String {
    match value.char_indices().nth(PREVIEW_LIMIT) {
        Some((cut, _)) => format!("{}...", &value[..cut]),
        None => value.to_string(),
    }
}

/// Mask a value that may be secret, keeping only its first few characters.
pub(crate) fn masked_preview(value: &str) -> String {
    let visible: String = value.chars().take(MASK_VISIBLE).collect();
    format!("{visible}...({} chars)", value.chars().count())
}
