//! Centralized slug parsing for the slash-separated path convention.
//!
//! Every document is addressed by a slug like `notes/rust/ownership`. A
//! trailing *index segment* (`index` by default) marks a document that
//! represents its parent folder rather than a leaf:
//!
//! - `notes/rust/ownership` → leaf document at `notes/rust/ownership`
//! - `notes/rust/index`     → the `notes/rust` folder's own document
//! - `index`                → the root folder's own document
//!
//! ## Display Names
//!
//! A node's label is its document's title, unless that title is just the
//! index segment (an untitled index page); otherwise it is the raw segment.

/// Separator between path segments.
pub const SEPARATOR: char = '/';

/// Split a slug into its non-empty segments.
///
/// - `"a/b/c"` → `["a", "b", "c"]`
/// - `"/a//b/"` → `["a", "b"]`
/// - `""` → `[]`
pub fn split_slug(slug: &str) -> Vec<&str> {
    slug.split(SEPARATOR).filter(|s| !s.is_empty()).collect()
}

/// Slug of a child segment under `parent` (`""` is the root).
pub fn child_slug(parent: &str, segment: &str) -> String {
    if parent.is_empty() {
        segment.to_string()
    } else {
        format!("{parent}{SEPARATOR}{segment}")
    }
}

/// Strip a trailing index segment, yielding the folder the slug represents.
///
/// - `"notes/index"` → `"notes"`
/// - `"index"` → `""`
/// - `"notes/page"` → `"notes/page"`
pub fn folder_slug<'a>(slug: &'a str, index_segment: &str) -> &'a str {
    let trimmed = slug.trim_matches(SEPARATOR);
    if trimmed == index_segment {
        return "";
    }
    trimmed
        .strip_suffix(index_segment)
        .and_then(|rest| rest.strip_suffix(SEPARATOR))
        .unwrap_or(trimmed)
}

/// Last segment of a slug, or the whole slug if it has none.
pub fn last_segment(slug: &str) -> &str {
    split_slug(slug).last().copied().unwrap_or(slug)
}

/// Resolve a node label: document title unless it equals the index segment.
pub fn display_name(title: Option<&str>, segment: &str, index_segment: &str) -> String {
    match title {
        Some(t) if !t.is_empty() && t != index_segment => t.to_string(),
        _ => segment.to_string(),
    }
}
