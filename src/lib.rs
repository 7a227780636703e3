//! # Folder Index
//!
//! Folder index pages for static content sites. Given a flat collection of
//! documents addressed by slash-separated slugs, this crate reconstructs the
//! implied folder tree and renders one listing page per folder.
//!
//! # Architecture: Snapshot → Trie → Listing → Markup
//!
//! ```text
//! 1. Load      documents.json + config.toml  →  Corpus       (immutable snapshot)
//! 2. Index     Corpus                        →  Trie         (once per render session)
//! 3. Assemble  Trie + folder                 →  Listing      (entries, counts)
//! 4. Render    Listing                       →  HTML         (maud)
//! ```
//!
//! The browser half lives in [`pagination`]: a pure state machine that the
//! host environment drives with load/navigation signals and clicks, applying
//! the side effects it returns.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`types`] | `Document` and `Dates` records shared by every stage |
//! | [`naming`] | Slug splitting and joining, index-segment handling, display names |
//! | [`trie`] | Arena path trie: construction, lookup, traversal |
//! | [`listing`] | Folder listing assembly: synthetic folders, date aggregation, sort, limit |
//! | [`categories`] | Category grid of indexed sub-folders |
//! | [`pagination`] | Client-side pagination state machine and host runtime |
//! | [`cache`] | Render-session memoization of the trie |
//! | [`corpus`] | Document manifest loading |
//! | [`render`] | Maud HTML for listing blocks, category grids and folder pages |
//! | [`generate`] | Parallel rendering of every folder page to an output directory |
//! | [`config`] | `config.toml` loading, validation and merging |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Arena Trie
//!
//! Nodes live in one `Vec` and point at each other by index, with a
//! `(parent, segment)` edge map for child lookup. There are no `Rc` cycles
//! and no interior mutability, and a finished trie is `Send + Sync`. Child
//! order is insertion order, which is also the tie-break for the stable
//! listing sort.
//!
//! ## Index Documents
//!
//! A slug ending in the index segment (`notes/index`) is the folder's own
//! document, not a leaf called `index`. Its title names the folder and its
//! presence makes the folder eligible for the category grid. Lookup follows
//! the same rule, so a folder page's own slug resolves to its folder.
//!
//! ## Synthetic Folders
//!
//! A sub-folder without an index document still deserves a row in its
//! parent's listing. [`listing::ListingEntry`] models that row as an explicit
//! variant whose dates are the newest among its immediate children.
//!
//! ## Pagination as Data
//!
//! Pagination never touches a DOM directly. [`pagination::Pager::transition`]
//! maps a state and an event to a new state plus a list of
//! [`pagination::Effect`]s. Hosts (a browser binding, a test double)
//! implement [`pagination::PaginationHost`] to apply them.
//!
//! ## Render Sessions
//!
//! Every component on a page needs the same trie. A [`cache::SessionCache`]
//! hands out one [`cache::RenderSession`] per corpus snapshot, which builds
//! its trie lazily on first use and shares it with every worker.

pub mod cache;
pub mod categories;
pub mod config;
pub mod corpus;
pub mod generate;
pub mod listing;
pub mod naming;
pub mod output;
pub mod pagination;
pub mod render;
pub mod trie;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
