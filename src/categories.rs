//! Category grid entries.
//!
//! A category is a direct sub-folder of the current folder that has its own
//! index document. Folders without one never appear here (they still show up
//! in the listing as synthetic entries). Configured prefixes are excluded
//! together with everything beneath them.

use crate::config::CategoriesConfig;
use crate::naming;
use crate::trie::{NodeId, Trie};

/// One card of the category grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    /// Index document title, falling back to the folder's last segment.
    pub title: String,
    pub icon: String,
    /// Folder slug (without the index segment).
    pub slug: String,
}

impl Category {
    /// Icons given as absolute URLs render as images instead of text.
    pub fn icon_is_url(&self) -> bool {
        is_url(&self.icon)
    }
}

fn is_url(icon: &str) -> bool {
    icon.starts_with("http://") || icon.starts_with("https://")
}

/// True when `slug` is one of `prefixes` or lies beneath one of them.
pub fn is_excluded(slug: &str, prefixes: &[String]) -> bool {
    prefixes.iter().any(|prefix| {
        let prefix = prefix.trim_matches(naming::SEPARATOR);
        slug == prefix
            || slug
                .strip_prefix(prefix)
                .is_some_and(|rest| rest.starts_with(naming::SEPARATOR))
    })
}

/// Categories under `folder`, in child insertion order.
///
/// Returns an empty list when the grid is disabled.
pub fn collect(trie: &Trie, folder: NodeId, config: &CategoriesConfig) -> Vec<Category> {
    if !config.enabled {
        return Vec::new();
    }
    trie.children(folder)
        .iter()
        .filter_map(|&child| {
            let node = trie.node(child);
            if !node.has_index() || is_excluded(node.slug(), &config.exclude) {
                return None;
            }
            let document = trie.data(child)?;
            let title = document
                .title
                .as_deref()
                .filter(|t| !t.is_empty())
                .unwrap_or_else(|| naming::last_segment(node.slug()));
            let icon = document
                .icon
                .as_deref()
                .filter(|i| !i.is_empty())
                .unwrap_or(&config.default_icon);
            Some(Category {
                title: title.to_string(),
                icon: icon.to_string(),
                slug: node.slug().to_string(),
            })
        })
        .collect()
}
