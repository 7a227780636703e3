//! Folder listing assembly.
//!
//! Turns a resolved trie node into the ordered list of entries shown on its
//! folder page:
//!
//! 1. Each direct child that carries a document becomes a document entry.
//! 2. Each child folder without a document becomes a [`SyntheticFolder`]
//!    (when `show_subfolders` is on) whose dates are the field-wise maximum
//!    over the documents of its immediate children. Grandchildren are not
//!    visited. Fields no child sets get "now".
//! 3. Entries are sorted with a stable sort (default: `modified`, newest first).
//! 4. A hard `limit` keeps the first N; otherwise the full list is kept and
//!    `items_per_page` is passed through for client-side pagination.
//!
//! The total count before truncation is kept so the page can say
//! "12 items under this folder, showing the 5 most recent".

use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::ListingConfig;
use crate::pagination;
use crate::trie::{NodeId, Trie, TrieNode};
use crate::types::{Dates, Document};

/// Stand-in entry for a sub-folder that has no document of its own.
#[derive(Debug, Clone, PartialEq)]
pub struct SyntheticFolder {
    pub slug: String,
    pub title: String,
    /// Always fully populated.
    pub dates: Dates,
    /// Always empty; kept so entries expose a uniform shape to renderers.
    pub tags: Vec<String>,
}

/// One row of a folder listing.
#[derive(Debug, Clone)]
pub enum ListingEntry<'a> {
    /// A child node that carries a document (leaf or index-backed folder).
    Document {
        document: &'a Document,
        node: &'a TrieNode,
    },
    Folder(SyntheticFolder),
}

impl ListingEntry<'_> {
    /// Slug of the node this entry links to.
    pub fn slug(&self) -> &str {
        match self {
            Self::Document { node, .. } => node.slug(),
            Self::Folder(f) => &f.slug,
        }
    }

    pub fn title(&self) -> &str {
        match self {
            Self::Document { node, .. } => node.display_name(),
            Self::Folder(f) => &f.title,
        }
    }

    pub fn dates(&self) -> Dates {
        match self {
            Self::Document { document, .. } => document.dates,
            Self::Folder(f) => f.dates,
        }
    }

    pub fn tags(&self) -> &[String] {
        match self {
            Self::Document { document, .. } => &document.tags,
            Self::Folder(f) => &f.tags,
        }
    }

    /// True for synthetic folders and for documents that back a folder.
    pub fn is_folder(&self) -> bool {
        match self {
            Self::Document { node, .. } => node.is_folder(),
            Self::Folder(_) => true,
        }
    }
}

/// Sort order applied to the assembled entries. All orders are stable.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    /// Most recently modified first; missing dates sort last.
    #[default]
    Modified,
    /// Most recently created first.
    Created,
    /// Most recently published first.
    Published,
    /// Title A→Z, case-insensitive.
    Title,
}

impl SortOrder {
    /// Name as written in `config.toml`.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Modified => "modified",
            Self::Created => "created",
            Self::Published => "published",
            Self::Title => "title",
        }
    }

    pub fn compare(self, a: &ListingEntry<'_>, b: &ListingEntry<'_>) -> Ordering {
        fn millis(d: Option<DateTime<Utc>>) -> i64 {
            d.map(|d| d.timestamp_millis()).unwrap_or(0)
        }
        match self {
            Self::Modified => millis(b.dates().modified).cmp(&millis(a.dates().modified)),
            Self::Created => millis(b.dates().created).cmp(&millis(a.dates().created)),
            Self::Published => millis(b.dates().published).cmp(&millis(a.dates().published)),
            Self::Title => a.title().to_lowercase().cmp(&b.title().to_lowercase()),
        }
    }
}

/// Assembled entries of one folder plus truncation bookkeeping.
#[derive(Debug, Clone)]
pub struct Listing<'a> {
    folder: NodeId,
    entries: Vec<ListingEntry<'a>>,
    shown: usize,
    items_per_page: usize,
}

impl<'a> Listing<'a> {
    pub fn folder(&self) -> NodeId {
        self.folder
    }

    /// Every eligible entry, sorted, before truncation.
    pub fn entries(&self) -> &[ListingEntry<'a>] {
        &self.entries
    }

    /// Entries that end up in the markup.
    pub fn shown(&self) -> &[ListingEntry<'a>] {
        &self.entries[..self.shown]
    }

    pub fn total_count(&self) -> usize {
        self.entries.len()
    }

    pub fn shown_count(&self) -> usize {
        self.shown
    }

    /// True when a hard limit dropped entries.
    pub fn is_truncated(&self) -> bool {
        self.shown < self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Client-side page size; 0 when pagination is off.
    pub fn items_per_page(&self) -> usize {
        self.items_per_page
    }

    pub fn total_pages(&self) -> usize {
        pagination::total_pages(self.shown, self.items_per_page)
    }
}

/// Assemble the listing for `folder`.
///
/// `now` fills dates of sub-folders whose children carry no dates.
pub fn assemble<'a>(
    trie: &'a Trie,
    folder: NodeId,
    config: &ListingConfig,
    now: DateTime<Utc>,
) -> Listing<'a> {
    let mut entries: Vec<ListingEntry<'a>> = trie
        .children(folder)
        .iter()
        .filter_map(|&child| {
            let node = trie.node(child);
            if let Some(document) = trie.data(child) {
                return Some(ListingEntry::Document { document, node });
            }
            if node.is_folder() && config.show_subfolders {
                return Some(ListingEntry::Folder(SyntheticFolder {
                    slug: node.slug().to_string(),
                    title: node.display_name().to_string(),
                    dates: aggregate_dates(trie, child).or_now(now),
                    tags: Vec::new(),
                }));
            }
            None
        })
        .collect();

    entries.sort_by(|a, b| config.sort.compare(a, b));

    let (shown, items_per_page) = if config.limit > 0 {
        (config.limit.min(entries.len()), 0)
    } else {
        (entries.len(), config.items_per_page)
    };

    tracing::debug!(
        folder = %trie.node(folder).slug(),
        total = entries.len(),
        shown,
        "assembled folder listing"
    );

    Listing {
        folder,
        entries,
        shown,
        items_per_page,
    }
}

/// Resolve `slug` and assemble its listing.
///
/// Returns `None` when the folder does not exist; the caller renders
/// nothing for the listing block and carries on with the rest of the page.
pub fn assemble_slug<'a>(
    trie: &'a Trie,
    slug: &str,
    config: &ListingConfig,
    now: DateTime<Utc>,
) -> Option<Listing<'a>> {
    let Some(folder) = trie.find_slug(slug) else {
        tracing::debug!(slug, "folder not found, skipping listing");
        return None;
    };
    Some(assemble(trie, folder, config, now))
}

/// Field-wise maximum of the dates of the documents directly under `node`.
///
/// Only immediate children count: neither the node's own document nor
/// anything deeper is visited. Fields no child sets stay `None`.
pub fn aggregate_dates(trie: &Trie, node: NodeId) -> Dates {
    trie.children(node)
        .iter()
        .filter_map(|&child| trie.data(child))
        .fold(Dates::default(), |acc, doc| acc.max(doc.dates))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::*;

    fn config() -> ListingConfig {
        ListingConfig {
            limit: 0,
            items_per_page: 0,
            ..ListingConfig::default()
        }
    }

    fn now() -> DateTime<Utc> {
        at(2030, 6, 1)
    }

    #[test]
    fn documents_become_entries_sorted_by_modified() {
        let docs = vec![
            doc("f/old", Some(at(2024, 1, 1))),
            doc("f/new", Some(at(2024, 3, 1))),
            doc("f/mid", Some(at(2024, 2, 1))),
        ];
        let trie = Trie::build(&docs, "index");
        let listing = assemble_slug(&trie, "f", &config(), now()).unwrap();
        assert_eq!(entry_slugs(&listing), vec!["f/new", "f/mid", "f/old"]);
    }

    #[test]
    fn undated_entries_sort_last() {
        let docs = vec![doc("f/none", None), doc("f/dated", Some(at(2024, 1, 1)))];
        let trie = Trie::build(&docs, "index");
        let listing = assemble_slug(&trie, "f", &config(), now()).unwrap();
        assert_eq!(entry_slugs(&listing), vec!["f/dated", "f/none"]);
    }

    #[test]
    fn equal_dates_keep_child_order() {
        let same = Some(at(2024, 1, 1));
        let docs = vec![doc("f/c", same), doc("f/a", same), doc("f/b", same)];
        let trie = Trie::build(&docs, "index");
        let listing = assemble_slug(&trie, "f", &config(), now()).unwrap();
        assert_eq!(entry_slugs(&listing), vec!["f/c", "f/a", "f/b"]);
    }

    #[test]
    fn subfolder_gets_synthetic_entry_with_max_dates() {
        let docs = vec![
            dated(
                "f/sub/a",
                Dates {
                    created: Some(at(2024, 5, 1)),
                    modified: Some(at(2024, 1, 1)),
                    published: None,
                },
            ),
            dated(
                "f/sub/b",
                Dates {
                    created: Some(at(2023, 1, 1)),
                    modified: Some(at(2024, 2, 1)),
                    published: Some(at(2022, 1, 1)),
                },
            ),
        ];
        let trie = Trie::build(&docs, "index");
        let listing = assemble_slug(&trie, "f", &config(), now()).unwrap();

        let ListingEntry::Folder(folder) = &listing.entries()[0] else {
            panic!("expected synthetic folder entry");
        };
        assert_eq!(folder.slug, "f/sub");
        assert_eq!(folder.title, "sub");
        assert!(folder.tags.is_empty());
        assert_eq!(folder.dates.created, Some(at(2024, 5, 1)));
        assert_eq!(folder.dates.modified, Some(at(2024, 2, 1)));
        assert_eq!(folder.dates.published, Some(at(2022, 1, 1)));
    }

    #[test]
    fn synthetic_dates_only_look_at_immediate_children() {
        let docs = vec![
            doc("f/sub/a", Some(at(2024, 1, 1))),
            doc("f/sub/deep/b", Some(at(2025, 1, 1))),
        ];
        let trie = Trie::build(&docs, "index");
        let listing = assemble_slug(&trie, "f", &config(), now()).unwrap();
        assert_eq!(listing.entries()[0].slug(), "f/sub");
        assert_eq!(listing.entries()[0].dates().modified, Some(at(2024, 1, 1)));
    }

    #[test]
    fn folder_with_only_nested_documents_defaults_to_now() {
        let docs = vec![doc("f/sub/deep/b", Some(at(2025, 1, 1)))];
        let trie = Trie::build(&docs, "index");
        let listing = assemble_slug(&trie, "f", &config(), now()).unwrap();
        assert_eq!(listing.entries()[0].dates(), Dates::all(now()));
    }

    #[test]
    fn index_backed_child_folder_counts_toward_parent_dates() {
        let docs = vec![
            doc("f/sub/deep/index", Some(at(2025, 1, 1))),
            doc("f/sub/deep/b", Some(at(2026, 1, 1))),
        ];
        let trie = Trie::build(&docs, "index");
        let sub = trie.find_slug("f/sub").unwrap();
        assert_eq!(aggregate_dates(&trie, sub).modified, Some(at(2025, 1, 1)));
    }

    #[test]
    fn folder_without_dated_descendants_defaults_to_now() {
        let docs = vec![doc("f/sub/a", None), doc("f/sub/b", None)];
        let trie = Trie::build(&docs, "index");
        let listing = assemble_slug(&trie, "f", &config(), now()).unwrap();
        assert_eq!(listing.entries()[0].dates(), Dates::all(now()));
    }

    #[test]
    fn missing_published_falls_back_to_now() {
        let docs = vec![doc("f/sub/a", Some(at(2024, 1, 1)))];
        let trie = Trie::build(&docs, "index");
        let listing = assemble_slug(&trie, "f", &config(), now()).unwrap();
        let dates = listing.entries()[0].dates();
        assert_eq!(dates.modified, Some(at(2024, 1, 1)));
        assert_eq!(dates.published, Some(now()));
    }

    #[test]
    fn subfolders_hidden_when_disabled() {
        let docs = vec![doc("f/sub/a", None), doc("f/other/b", None)];
        let trie = Trie::build(&docs, "index");
        let cfg = ListingConfig {
            show_subfolders: false,
            ..config()
        };
        let listing = assemble_slug(&trie, "f", &cfg, now()).unwrap();
        assert!(listing.is_empty());
        assert_eq!(listing.total_count(), 0);
    }

    #[test]
    fn index_backed_subfolder_is_a_document_entry() {
        let docs = vec![titled("f/sub/index", "Sub Notes"), doc("f/sub/a", None)];
        let trie = Trie::build(&docs, "index");
        let cfg = ListingConfig {
            show_subfolders: false,
            ..config()
        };
        let listing = assemble_slug(&trie, "f", &cfg, now()).unwrap();
        assert_eq!(listing.total_count(), 1);
        let entry = &listing.entries()[0];
        assert!(matches!(entry, ListingEntry::Document { .. }));
        assert!(entry.is_folder());
        assert_eq!(entry.slug(), "f/sub");
        assert_eq!(entry.title(), "Sub Notes");
    }

    #[test]
    fn limit_truncates_but_keeps_total() {
        let docs: Vec<_> = (1..=8)
            .map(|d| doc(&format!("f/{d}"), Some(at(2024, 1, d))))
            .collect();
        let trie = Trie::build(&docs, "index");
        let cfg = ListingConfig {
            limit: 5,
            ..config()
        };
        let listing = assemble_slug(&trie, "f", &cfg, now()).unwrap();
        assert_eq!(listing.total_count(), 8);
        assert_eq!(listing.shown_count(), 5);
        assert!(listing.is_truncated());
        assert_eq!(listing.items_per_page(), 0);
        assert_eq!(shown_titles(&listing), vec!["8", "7", "6", "5", "4"]);
    }

    #[test]
    fn limit_larger_than_list_shows_all() {
        let docs = vec![doc("f/a", None)];
        let trie = Trie::build(&docs, "index");
        let cfg = ListingConfig {
            limit: 5,
            ..config()
        };
        let listing = assemble_slug(&trie, "f", &cfg, now()).unwrap();
        assert_eq!(listing.shown_count(), 1);
        assert!(!listing.is_truncated());
    }

    #[test]
    fn pagination_keeps_full_list() {
        let docs: Vec<_> = (1..=12).map(|d| doc(&format!("f/{d}"), None)).collect();
        let trie = Trie::build(&docs, "index");
        let cfg = ListingConfig {
            items_per_page: 5,
            ..config()
        };
        let listing = assemble_slug(&trie, "f", &cfg, now()).unwrap();
        assert_eq!(listing.shown_count(), 12);
        assert_eq!(listing.items_per_page(), 5);
        assert_eq!(listing.total_pages(), 3);
    }

    #[test]
    fn unknown_folder_is_none() {
        let trie = Trie::build(&[doc("f/a", None)], "index");
        assert!(assemble_slug(&trie, "g", &config(), now()).is_none());
    }

    #[test]
    fn leaf_node_has_empty_listing() {
        let trie = Trie::build(&[doc("f/a", None)], "index");
        let listing = assemble_slug(&trie, "f/a", &config(), now()).unwrap();
        assert!(listing.is_empty());
    }

    #[test]
    fn folder_page_slug_resolves_its_folder() {
        let docs = vec![titled("f/index", "F"), doc("f/a", None)];
        let trie = Trie::build(&docs, "index");
        let listing = assemble_slug(&trie, "f/index", &config(), now()).unwrap();
        assert_eq!(entry_slugs(&listing), vec!["f/a"]);
    }

    #[test]
    fn title_sort_is_case_insensitive() {
        let docs = vec![titled("f/1", "banana"), titled("f/2", "Apple"), titled("f/3", "cherry")];
        let trie = Trie::build(&docs, "index");
        let cfg = ListingConfig {
            sort: SortOrder::Title,
            ..config()
        };
        let listing = assemble_slug(&trie, "f", &cfg, now()).unwrap();
        assert_eq!(shown_titles(&listing), vec!["Apple", "banana", "cherry"]);
    }

    #[test]
    fn created_sort_uses_created_dates() {
        let docs = vec![
            dated("f/a", Dates { created: Some(at(2020, 1, 1)), ..Dates::default() }),
            dated("f/b", Dates { created: Some(at(2021, 1, 1)), ..Dates::default() }),
        ];
        let trie = Trie::build(&docs, "index");
        let cfg = ListingConfig {
            sort: SortOrder::Created,
            ..config()
        };
        let listing = assemble_slug(&trie, "f", &cfg, now()).unwrap();
        assert_eq!(entry_slugs(&listing), vec!["f/b", "f/a"]);
    }

    #[test]
    fn aggregate_ignores_the_nodes_own_document() {
        let docs = vec![doc("f/index", Some(at(2029, 1, 1))), doc("f/a", Some(at(2024, 1, 1)))];
        let trie = Trie::build(&docs, "index");
        let f = trie.find_slug("f").unwrap();
        assert_eq!(aggregate_dates(&trie, f).modified, Some(at(2024, 1, 1)));
    }
}
