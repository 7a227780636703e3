//! HTML rendering of folder pages.
//!
//! Uses [maud](https://maud.lambda.xyz/) for compile-time HTML templating,
//! so all interpolated titles and slugs are escaped.
//!
//! ## Page Layout
//!
//! ```text
//! header.site-header   breadcrumb from the root to this folder
//! main.folder-page
//!   h1                 folder display name
//!   section            category grid (indexed sub-folders)
//!   div.page-listing
//!     p.folder-count   "12 items under this folder. Showing the 5 most recent."
//!     div.page-listing-wrapper[data-items-per-page][data-total-items]
//!       ul.paginated-content > li.section-li*
//!       nav.pagination  (only when there is more than one page)
//! ```
//!
//! The listing wrapper carries everything the pagination runtime needs: the
//! page size and item count as data attributes, one `.section-li` per entry,
//! and the prev/next/numbers controls. Every item is visible in the static
//! markup; hiding happens client-side. Pages with more than one listing page
//! embed `static/pagination.js`, the browser host for [`crate::pagination`].

use chrono::{DateTime, Utc};
use maud::{DOCTYPE, Markup, PreEscaped, html};

use crate::categories::{self, Category};
use crate::config::SiteConfig;
use crate::listing::{self, Listing, ListingEntry};
use crate::pagination::selectors;
use crate::trie::{NodeId, Trie};

const CSS: &str = include_str!("../static/style.css");
const JS: &str = include_str!("../static/pagination.js");

/// "1 item under this folder." / "N items under this folder."
pub fn items_under_folder(count: usize) -> String {
    if count == 1 {
        "1 item under this folder.".to_string()
    } else {
        format!("{count} items under this folder.")
    }
}

/// Suffix shown when a hard limit dropped entries.
pub fn showing_recent(shown: usize) -> String {
    format!(" Showing the {shown} most recent.")
}

/// Link target of a listing entry or category: folders end in `/`.
pub fn href(slug: &str, is_folder: bool) -> String {
    match (slug.is_empty(), is_folder) {
        (true, _) => "/".to_string(),
        (false, true) => format!("/{slug}/"),
        (false, false) => format!("/{slug}"),
    }
}

// ============================================================================
// HTML Components
// ============================================================================

/// Renders the base HTML document structure
fn base_document(title: &str, body_class: Option<&str>, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) }
                style { (CSS) }
            }
            body class=[body_class] {
                (content)
            }
        }
    }
}

/// Breadcrumb links from the root down to `folder`.
pub fn render_breadcrumb(trie: &Trie, folder: NodeId, root_title: &str) -> Markup {
    let mut chain = Vec::new();
    let mut current = Some(folder);
    while let Some(id) = current {
        chain.push(id);
        current = trie.node(id).parent();
    }
    chain.reverse();

    html! {
        nav.breadcrumb {
            @for (i, &id) in chain.iter().enumerate() {
                @let node = trie.node(id);
                @if i > 0 { " › " }
                @if id == folder {
                    span.current {
                        @if id == trie.root() { (root_title) } @else { (node.display_name()) }
                    }
                } @else if id == trie.root() {
                    a href="/" { (root_title) }
                } @else {
                    a href=(href(node.slug(), true)) { (node.display_name()) }
                }
            }
        }
    }
}

/// Category grid; renders nothing when there are no categories.
pub fn render_categories(categories: &[Category], heading: &str) -> Markup {
    html! {
        @if !categories.is_empty() {
            section.categories {
                h2.section-title { (heading) }
                div.category-grid {
                    @for cat in categories {
                        a.category-card href=(href(&cat.slug, true)) {
                            div.category-icon {
                                @if cat.icon_is_url() {
                                    img src=(cat.icon) alt=(cat.title);
                                } @else {
                                    (cat.icon)
                                }
                            }
                            div.category-title { (cat.title) }
                        }
                    }
                }
            }
        }
    }
}

fn render_entry(entry: &ListingEntry<'_>) -> Markup {
    let modified = entry.dates().modified;
    html! {
        li.section-li {
            div.section {
                @if let Some(date) = modified {
                    time datetime=(date.to_rfc3339()) { (date.format("%Y-%m-%d").to_string()) }
                }
                a.internal href=(href(entry.slug(), entry.is_folder())) { (entry.title()) }
                @if !entry.tags().is_empty() {
                    ul.tags {
                        @for tag in entry.tags() {
                            li { a.tag-link href={ "/tags/" (tag) } { (tag) } }
                        }
                    }
                }
            }
        }
    }
}

/// The listing block: count summary plus the paginatable list.
pub fn render_listing(listing: &Listing<'_>, show_folder_count: bool) -> Markup {
    let per_page = listing.items_per_page();
    html! {
        div.page-listing {
            @if show_folder_count {
                p.folder-count {
                    (items_under_folder(listing.total_count()))
                    @if listing.is_truncated() {
                        span { (showing_recent(listing.shown_count())) }
                    }
                }
            }
            div.page-listing-wrapper
                data-items-per-page=(per_page)
                data-total-items=(listing.shown_count()) {
                ul.paginated-content {
                    @for entry in listing.shown() {
                        (render_entry(entry))
                    }
                }
                @if listing.total_pages() > 1 {
                    nav.pagination aria-label="Pagination" {
                        button.pagination-prev type="button" disabled { "‹" }
                        div.pagination-numbers {}
                        button.pagination-next type="button" { "›" }
                    }
                }
            }
        }
    }
}

/// Full folder page for an assembled listing.
pub fn render_folder_page(trie: &Trie, listing: &Listing<'_>, config: &SiteConfig) -> Markup {
    let folder = listing.folder();
    let node = trie.node(folder);
    let heading = if folder == trie.root() {
        config.site.title.as_str()
    } else {
        node.display_name()
    };
    let page_title = if folder == trie.root() {
        config.site.title.clone()
    } else {
        format!("{} · {}", heading, config.site.title)
    };

    let cats = categories::collect(trie, folder, &config.categories);

    let content = html! {
        header.site-header {
            (render_breadcrumb(trie, folder, &config.site.title))
        }
        main.folder-page {
            h1 { (heading) }
            (render_categories(&cats, &config.categories.heading))
            (render_listing(listing, config.listing.show_folder_count))
        }
        @if listing.total_pages() > 1 {
            script { (PreEscaped(JS)) }
        }
    };

    base_document(&page_title, Some("folder"), content)
}

/// Render the folder page for `slug`, or `None` when it does not resolve.
pub fn render_folder_slug(
    trie: &Trie,
    slug: &str,
    config: &SiteConfig,
    now: DateTime<Utc>,
) -> Option<Markup> {
    let Some(folder) = trie.find_slug(slug) else {
        tracing::debug!(slug, "folder not found, nothing to render");
        return None;
    };
    let listing = listing::assemble(trie, folder, &config.listing, now);
    Some(render_folder_page(trie, &listing, config))
}
