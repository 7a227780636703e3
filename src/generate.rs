//! Static folder-page generation.
//!
//! Renders one HTML page per folder node of the corpus trie.
//!
//! ## Output Structure
//!
//! ```text
//! dist/
//! ├── index.html                 # Root folder
//! ├── pages.json                 # Record of every generated page
//! ├── notes/
//! │   ├── index.html             # notes/ folder page
//! │   └── rust/
//! │       └── index.html
//! └── recipes/
//!     └── index.html
//! ```
//!
//! Leaf documents get no page here; their HTML belongs to whatever pipeline
//! renders document bodies. Listing links point at `/<slug>` for them.
//!
//! ## Parallel Rendering
//!
//! Pages are rendered in parallel using [rayon](https://docs.rs/rayon). All
//! workers share the single trie of one [`RenderSession`]; the trie is
//! read-only after construction, so no locking is involved.

use chrono::{DateTime, Utc};
use rayon::prelude::*;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::cache::{RenderSession, SessionCache};
use crate::config::SiteConfig;
use crate::corpus::{self, Corpus, CorpusError};
use crate::categories;
use crate::listing;
use crate::render;
use crate::trie::NodeId;

/// File name of the generated page record inside the output directory.
pub const PAGES_FILENAME: &str = "pages.json";

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Corpus error: {0}")]
    Corpus(#[from] CorpusError),
}

/// One written folder page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeneratedPage {
    /// Folder slug (`""` for the root).
    pub slug: String,
    pub title: String,
    /// Output path relative to the output directory.
    pub path: String,
    /// Depth below the root (root = 0).
    pub depth: usize,
    /// Entries before truncation.
    pub total: usize,
    /// Entries written to the page.
    pub shown: usize,
    pub categories: usize,
}

/// Result of a full build.
#[derive(Debug, Clone, Serialize)]
pub struct GenerateReport {
    pub session: String,
    pub documents: usize,
    pub pages: Vec<GeneratedPage>,
}

/// Output path of a folder page, relative to the output directory.
pub fn page_path(slug: &str) -> PathBuf {
    if slug.is_empty() {
        PathBuf::from("index.html")
    } else {
        Path::new(slug).join("index.html")
    }
}

/// Load the corpus at `source` and render every folder page into `output_dir`.
pub fn generate(
    source: &Path,
    output_dir: &Path,
    now: DateTime<Utc>,
) -> Result<GenerateReport, GenerateError> {
    let corpus = corpus::load(source)?;
    generate_corpus(&corpus, output_dir, now)
}

/// Render every folder page of an already-loaded corpus.
pub fn generate_corpus(
    corpus: &Corpus,
    output_dir: &Path,
    now: DateTime<Utc>,
) -> Result<GenerateReport, GenerateError> {
    let mut sessions = SessionCache::new();
    let session = sessions.session(&corpus.documents, &corpus.config.paths.index_segment);
    let report = generate_session(&session, &corpus.config, output_dir, now)?;
    sessions.end(session.id());
    Ok(report)
}

/// Render every folder page of one render session.
pub fn generate_session(
    session: &RenderSession,
    config: &SiteConfig,
    output_dir: &Path,
    now: DateTime<Utc>,
) -> Result<GenerateReport, GenerateError> {
    let trie = session.trie();
    fs::create_dir_all(output_dir)?;

    let depths: std::collections::HashMap<NodeId, usize> = trie.walk().into_iter().collect();
    let folders = trie.folders();

    let pages = folders
        .par_iter()
        .map(|&folder| -> Result<GeneratedPage, GenerateError> {
            let node = trie.node(folder);
            let listing = listing::assemble(trie, folder, &config.listing, now);
            let cats = categories::collect(trie, folder, &config.categories);
            let html = render::render_folder_page(trie, &listing, config);

            let rel = page_path(node.slug());
            let dest = output_dir.join(&rel);
            if let Some(parent) = dest.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(&dest, html.into_string())?;
            tracing::debug!(folder = %node.slug(), path = %rel.display(), "wrote folder page");

            Ok(GeneratedPage {
                slug: node.slug().to_string(),
                title: if folder == trie.root() {
                    config.site.title.clone()
                } else {
                    node.display_name().to_string()
                },
                path: rel.to_string_lossy().replace('\\', "/"),
                depth: depths.get(&folder).copied().unwrap_or(0),
                total: listing.total_count(),
                shown: listing.shown_count(),
                categories: cats.len(),
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let report = GenerateReport {
        session: session.id().to_string(),
        documents: session.documents().len(),
        pages,
    };
    let json = serde_json::to_string_pretty(&report)?;
    fs::write(output_dir.join(PAGES_FILENAME), json)?;

    tracing::info!(
        pages = report.pages.len(),
        output = %output_dir.display(),
        "site generated"
    );
    Ok(report)
}
