//! Shared test utilities for the folder-index test suite.
//!
//! Provides document builders, fixture setup, and listing extractors.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let docs = vec![doc("notes/a", Some(at(2024, 1, 1))), titled("notes/index", "Notes")];
//! let trie = Trie::build(&docs, "index");
//! let listing = assemble(&trie, trie.find_slug("notes").unwrap(), &opts, at(2030, 1, 1));
//! assert_eq!(entry_slugs(&listing), vec!["notes/a"]);
//! ```

use std::path::Path;

use chrono::{DateTime, TimeZone, Utc};
use tempfile::TempDir;

use crate::listing::Listing;
use crate::types::{Dates, Document};

// =========================================================================
// Builders
// =========================================================================

/// Midnight UTC on the given day.
pub fn at(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, 0, 0, 0)
        .single()
        .unwrap_or_else(|| panic!("invalid test date {year}-{month}-{day}"))
}

/// Document with an optional `modified` date (created/published unset).
pub fn doc(slug: &str, modified: Option<DateTime<Utc>>) -> Document {
    Document {
        dates: Dates {
            modified,
            ..Dates::default()
        },
        ..Document::new(slug)
    }
}

/// Document with a title and no dates.
pub fn titled(slug: &str, title: &str) -> Document {
    Document {
        title: Some(title.to_string()),
        ..Document::new(slug)
    }
}

/// Document with all three dates set.
pub fn dated(slug: &str, dates: Dates) -> Document {
    Document {
        dates,
        ..Document::new(slug)
    }
}

// =========================================================================
// Fixture setup
// =========================================================================

/// Copy `fixtures/site/` to a temp directory and return it.
pub fn setup_fixtures() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let fixtures = Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/site");
    for entry in std::fs::read_dir(&fixtures).unwrap() {
        let entry = entry.unwrap();
        std::fs::copy(entry.path(), tmp.path().join(entry.file_name())).unwrap();
    }
    tmp
}

// =========================================================================
// Extractors
// =========================================================================

/// Slugs of every assembled entry, in listing order.
pub fn entry_slugs<'a>(listing: &'a Listing<'_>) -> Vec<&'a str> {
    listing.entries().iter().map(|e| e.slug()).collect()
}

/// Titles of the entries currently shown, in listing order.
pub fn shown_titles(listing: &Listing<'_>) -> Vec<String> {
    listing.shown().iter().map(|e| e.title().to_string()).collect()
}
