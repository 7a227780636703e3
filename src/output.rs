//! CLI output formatting for every command.
//!
//! # Information-First Display
//!
//! Output is **information-centric, not file-centric**. The primary display
//! for every entity (folder, document, page) is its semantic identity:
//! display name and positional index among its siblings. Slugs and output
//! paths are secondary context.
//!
//! # Output Format
//!
//! ## Tree
//!
//! ```text
//! Home (3 items)
//!     001 Notes (2 items)
//!         001 a
//!         002 rust (folder, 1 item)
//!             001 Ownership
//!     002 Recipes (0 items)
//!     003 loose
//!
//! 5 documents, 3 folders
//! ```
//!
//! ## Render
//!
//! ```text
//! Notes → notes/index.html
//!     12 items under this folder, showing 5
//!     001 Ownership  2024-03-01
//!     002 rust/      2024-02-01
//! ```
//!
//! ## Build
//!
//! ```text
//! Home → index.html
//!     Notes → notes/index.html (12 items, showing 5)
//!         rust → notes/rust/index.html (1 item)
//!
//! Generated 3 folder pages from 5 documents
//! ```
//!
//! # Architecture
//!
//! Each command has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure: no I/O, no side effects.

use crate::corpus::Corpus;
use crate::generate::{self, GenerateReport};
use crate::listing::{Listing, ListingEntry};
use crate::trie::{NodeId, Trie};

// ============================================================================
// Shared entity display helpers
// ============================================================================

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// "1 item" / "N items".
fn items(n: usize) -> String {
    if n == 1 {
        "1 item".to_string()
    } else {
        format!("{} items", n)
    }
}

/// "12 items" or "12 items, showing 5" when truncated.
fn count_detail(total: usize, shown: usize) -> String {
    if shown < total {
        format!("{}, showing {}", items(total), shown)
    } else {
        items(total)
    }
}

/// One trie node as a tree line.
///
/// ```text
/// 001 Notes (2 items)           // folder with an index document
/// 002 rust (folder, 1 item)     // implicit folder
/// 003 Ownership                 // leaf document
/// ```
fn node_line(trie: &Trie, id: NodeId, position: usize) -> String {
    let node = trie.node(id);
    let label = format!("{} {}", format_index(position), node.display_name());
    if !node.is_folder() {
        return label;
    }
    let count = node.children().len();
    if trie.data(id).is_some() {
        format!("{} ({})", label, items(count))
    } else {
        format!("{} (folder, {})", label, items(count))
    }
}

// ============================================================================
// Tree output
// ============================================================================

/// Format the whole trie, root first, children indented under their parent.
pub fn format_tree_output(trie: &Trie, root_title: &str) -> Vec<String> {
    let mut lines = Vec::new();
    let mut folders = 0;

    for (id, depth) in trie.walk() {
        if id == trie.root() {
            lines.push(format!(
                "{} ({})",
                root_title,
                items(trie.children(id).len())
            ));
            continue;
        }
        let node = trie.node(id);
        if node.is_folder() {
            folders += 1;
        }
        let position = node
            .parent()
            .and_then(|p| trie.children(p).iter().position(|&c| c == id))
            .map_or(1, |i| i + 1);
        lines.push(format!("{}{}", indent(depth), node_line(trie, id, position)));
    }

    lines.push(String::new());
    lines.push(format!(
        "{} documents, {} folders",
        trie.documents().len(),
        folders
    ));
    lines
}

/// Print tree output to stdout.
pub fn print_tree_output(trie: &Trie, root_title: &str) {
    for line in format_tree_output(trie, root_title) {
        println!("{}", line);
    }
}

// ============================================================================
// Render output
// ============================================================================

/// Format a folder listing: header, count summary, one line per shown entry.
pub fn format_listing_summary(trie: &Trie, listing: &Listing<'_>, root_title: &str) -> Vec<String> {
    let node = trie.node(listing.folder());
    let title = if listing.folder() == trie.root() {
        root_title
    } else {
        node.display_name()
    };
    let path = generate::page_path(node.slug());

    let mut lines = vec![format!("{} \u{2192} {}", title, path.display())];
    let mut count = format!("    {} under this folder", items(listing.total_count()));
    if listing.is_truncated() {
        count.push_str(&format!(", showing {}", listing.shown_count()));
    }
    lines.push(count);
    if listing.total_pages() > 1 {
        lines.push(format!(
            "    {} pages of {}",
            listing.total_pages(),
            listing.items_per_page()
        ));
    }

    for (i, entry) in listing.shown().iter().enumerate() {
        let marker = match entry {
            ListingEntry::Folder(_) => "/",
            ListingEntry::Document { .. } => "",
        };
        let date = entry
            .dates()
            .modified
            .map(|d| format!("  {}", d.format("%Y-%m-%d")))
            .unwrap_or_default();
        lines.push(format!(
            "    {} {}{}{}",
            format_index(i + 1),
            entry.title(),
            marker,
            date
        ));
    }
    lines
}

/// Print listing summary to stdout.
pub fn print_listing_summary(trie: &Trie, listing: &Listing<'_>, root_title: &str) {
    for line in format_listing_summary(trie, listing, root_title) {
        println!("{}", line);
    }
}

// ============================================================================
// Build output
// ============================================================================

/// Format build output: every generated page with its output path.
pub fn format_build_output(report: &GenerateReport) -> Vec<String> {
    let mut lines = Vec::new();

    for page in &report.pages {
        lines.push(format!(
            "{}{} \u{2192} {} ({})",
            indent(page.depth),
            page.title,
            page.path,
            count_detail(page.total, page.shown)
        ));
    }

    lines.push(String::new());
    let noun = if report.pages.len() == 1 { "page" } else { "pages" };
    lines.push(format!(
        "Generated {} folder {} from {} documents",
        report.pages.len(),
        noun,
        report.documents
    ));
    lines
}

/// Print build output to stdout.
pub fn print_build_output(report: &GenerateReport) {
    for line in format_build_output(report) {
        println!("{}", line);
    }
}

// ============================================================================
// Check output
// ============================================================================

/// Format check output: corpus and config summary.
pub fn format_check_output(corpus: &Corpus, trie: &Trie) -> Vec<String> {
    let listing = &corpus.config.listing;
    let truncation = if listing.limit > 0 {
        format!("limit {}", listing.limit)
    } else if listing.items_per_page > 0 {
        format!("{} per page", listing.items_per_page)
    } else {
        "show all".to_string()
    };
    vec![
        format!("Documents: {}", corpus.len()),
        format!("Folders: {}", trie.folders().len()),
        format!("Index segment: {}", trie.index_segment()),
        format!("Listing: sort {}, {}", listing.sort.as_str(), truncation),
    ]
}

/// Print check output to stdout.
pub fn print_check_output(corpus: &Corpus, trie: &Trie) {
    for line in format_check_output(corpus, trie) {
        println!("{}", line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ListingConfig, SiteConfig};
    use crate::generate::GeneratedPage;
    use crate::listing::assemble;
    use crate::test_helpers::*;

    fn trie() -> Trie {
        Trie::build(
            &[
                titled("notes/index", "Notes"),
                doc("notes/a", Some(at(2024, 1, 1))),
                titled("notes/rust/ownership", "Ownership"),
                titled("recipes/index", "Recipes"),
                doc("loose", None),
            ],
            "index",
        )
    }

    // =========================================================================
    // Helpers
    // =========================================================================

    #[test]
    fn format_index_pads() {
        assert_eq!(format_index(1), "001");
        assert_eq!(format_index(42), "042");
        assert_eq!(format_index(1000), "1000");
    }

    #[test]
    fn count_detail_mentions_truncation() {
        assert_eq!(count_detail(1, 1), "1 item");
        assert_eq!(count_detail(12, 12), "12 items");
        assert_eq!(count_detail(12, 5), "12 items, showing 5");
    }

    // =========================================================================
    // Tree
    // =========================================================================

    #[test]
    fn tree_output_structure() {
        let lines = format_tree_output(&trie(), "Home");
        assert_eq!(
            lines,
            vec![
                "Home (3 items)",
                "    001 Notes (2 items)",
                "        001 a",
                "        002 rust (folder, 1 item)",
                "            001 Ownership",
                "    002 Recipes (0 items)",
                "    003 loose",
                "",
                "5 documents, 3 folders",
            ]
        );
    }

    #[test]
    fn tree_output_empty_trie() {
        let lines = format_tree_output(&Trie::build(&[], "index"), "Home");
        assert_eq!(lines, vec!["Home (0 items)", "", "0 documents, 0 folders"]);
    }

    // =========================================================================
    // Listing summary
    // =========================================================================

    #[test]
    fn listing_summary_lists_entries() {
        let trie = trie();
        let cfg = ListingConfig {
            items_per_page: 0,
            ..ListingConfig::default()
        };
        let listing = assemble(&trie, trie.find_slug("notes").unwrap(), &cfg, at(2030, 1, 1));
        let lines = format_listing_summary(&trie, &listing, "Home");
        assert_eq!(lines[0], "Notes \u{2192} notes/index.html");
        assert_eq!(lines[1], "    2 items under this folder");
        // synthetic folder dated "now" sorts first
        assert_eq!(lines[2], "    001 rust/  2030-01-01");
        assert_eq!(lines[3], "    002 a  2024-01-01");
    }

    #[test]
    fn listing_summary_reports_limit_and_pages() {
        let docs: Vec<_> = (1..=12).map(|d| doc(&format!("f/{d}"), None)).collect();
        let trie = Trie::build(&docs, "index");
        let folder = trie.find_slug("f").unwrap();

        let limited = ListingConfig {
            limit: 5,
            items_per_page: 0,
            ..ListingConfig::default()
        };
        let listing = assemble(&trie, folder, &limited, at(2030, 1, 1));
        let lines = format_listing_summary(&trie, &listing, "Home");
        assert_eq!(lines[1], "    12 items under this folder, showing 5");
        assert_eq!(lines.len(), 2 + 5);

        let paged = ListingConfig {
            items_per_page: 5,
            ..ListingConfig::default()
        };
        let listing = assemble(&trie, folder, &paged, at(2030, 1, 1));
        let lines = format_listing_summary(&trie, &listing, "Home");
        assert_eq!(lines[2], "    3 pages of 5");
    }

    #[test]
    fn listing_summary_root_uses_site_title() {
        let trie = trie();
        let listing = assemble(&trie, trie.root(), &ListingConfig::default(), at(2030, 1, 1));
        let lines = format_listing_summary(&trie, &listing, "Garden");
        assert_eq!(lines[0], "Garden \u{2192} index.html");
    }

    // =========================================================================
    // Build
    // =========================================================================

    fn page(slug: &str, title: &str, depth: usize, total: usize, shown: usize) -> GeneratedPage {
        GeneratedPage {
            slug: slug.to_string(),
            title: title.to_string(),
            path: generate::page_path(slug).to_string_lossy().into_owned(),
            depth,
            total,
            shown,
            categories: 0,
        }
    }

    #[test]
    fn build_output_indents_by_depth() {
        let report = GenerateReport {
            session: "abc".into(),
            documents: 5,
            pages: vec![
                page("", "Home", 0, 3, 3),
                page("notes", "Notes", 1, 12, 5),
                page("notes/rust", "rust", 2, 1, 1),
            ],
        };
        let lines = format_build_output(&report);
        assert_eq!(
            lines,
            vec![
                "Home \u{2192} index.html (3 items)",
                "    Notes \u{2192} notes/index.html (12 items, showing 5)",
                "        rust \u{2192} notes/rust/index.html (1 item)",
                "",
                "Generated 3 folder pages from 5 documents",
            ]
        );
    }

    #[test]
    fn build_output_singular_page() {
        let report = GenerateReport {
            session: "abc".into(),
            documents: 0,
            pages: vec![page("", "Home", 0, 0, 0)],
        };
        let lines = format_build_output(&report);
        assert_eq!(lines.last().unwrap(), "Generated 1 folder page from 0 documents");
    }

    // =========================================================================
    // Check
    // =========================================================================

    #[test]
    fn check_output_summarizes_corpus() {
        let trie = trie();
        let corpus = Corpus::new(trie.documents().to_vec(), SiteConfig::default());
        let lines = format_check_output(&corpus, &trie);
        assert_eq!(lines[0], "Documents: 5");
        assert_eq!(lines[1], "Folders: 4");
        assert_eq!(lines[2], "Index segment: index");
        assert_eq!(lines[3], "Listing: sort modified, 10 per page");
    }
}
