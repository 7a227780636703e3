//! Shared types used across all stages.
//!
//! These records arrive from the document manifest (`documents.json`) and
//! flow unchanged through the trie, the listing assembler and the renderer.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::naming;

/// A document in the corpus.
///
/// The core only looks at these fields; everything else about a document
/// (its body, its frontmatter) belongs to the pipeline that produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Slash-separated path, e.g. `notes/rust/ownership` or `notes/index`.
    pub slug: String,
    /// Title from frontmatter, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Dates::is_empty")]
    pub dates: Dates,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    /// Emoji or image URL shown on the category grid.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

impl Document {
    pub fn new(slug: impl Into<String>) -> Self {
        Self {
            slug: slug.into(),
            title: None,
            dates: Dates::default(),
            tags: Vec::new(),
            icon: None,
        }
    }

    /// Non-empty path segments of the slug.
    pub fn segments(&self) -> Vec<&str> {
        naming::split_slug(&self.slug)
    }
}

/// Already-computed timestamps of a document. Each one may be missing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dates {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modified: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published: Option<DateTime<Utc>>,
}

impl Dates {
    /// All three fields set to the same instant.
    pub fn all(at: DateTime<Utc>) -> Self {
        Self {
            created: Some(at),
            modified: Some(at),
            published: Some(at),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.created.is_none() && self.modified.is_none() && self.published.is_none()
    }

    /// Field-wise maximum. A field missing on one side takes the other side's value.
    pub fn max(self, other: Dates) -> Dates {
        Dates {
            created: later(self.created, other.created),
            modified: later(self.modified, other.modified),
            published: later(self.published, other.published),
        }
    }

    /// Fill every missing field with `now`.
    pub fn or_now(self, now: DateTime<Utc>) -> Dates {
        Dates {
            created: self.created.or(Some(now)),
            modified: self.modified.or(Some(now)),
            published: self.published.or(Some(now)),
        }
    }
}

fn later(a: Option<DateTime<Utc>>, b: Option<DateTime<Utc>>) -> Option<DateTime<Utc>> {
    match (a, b) {
        (Some(a), Some(b)) => Some(a.max(b)),
        (a, b) => a.or(b),
    }
}
