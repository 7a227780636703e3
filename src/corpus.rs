//! Corpus loading.
//!
//! A corpus directory holds the document manifest and an optional site
//! config:
//!
//! ```text
//! site/
//! ├── documents.json     # array of Document records
//! └── config.toml        # optional, see crate::config
//! ```
//!
//! `documents.json` is produced by whatever pipeline parses the content
//! (frontmatter, git history, file times). This crate only reads slugs,
//! titles, dates, tags and icons from it:
//!
//! ```json
//! [
//!   {"slug": "notes/index", "title": "Notes"},
//!   {"slug": "notes/rust/ownership", "title": "Ownership",
//!    "dates": {"modified": "2024-03-01T00:00:00Z"}, "tags": ["rust"]}
//! ]
//! ```

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use thiserror::Error;

use crate::config::{self, SiteConfig};
use crate::types::Document;

/// File name of the document manifest inside a corpus directory.
pub const DOCUMENTS_FILENAME: &str = "documents.json";

#[derive(Error, Debug)]
pub enum CorpusError {
    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("JSON error in {path}: {source}")]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
}

/// Documents plus the config that governs how they are rendered.
#[derive(Debug, Clone)]
pub struct Corpus {
    /// Immutable snapshot in manifest order.
    pub documents: Arc<[Document]>,
    pub config: SiteConfig,
}

impl Corpus {
    pub fn new(documents: Vec<Document>, config: SiteConfig) -> Self {
        Self {
            documents: documents.into(),
            config,
        }
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

/// Load `documents.json` and `config.toml` from `root`.
pub fn load(root: &Path) -> Result<Corpus, CorpusError> {
    let config = config::load_config(root)?;
    let documents = load_documents(&root.join(DOCUMENTS_FILENAME))?;
    tracing::info!(
        root = %root.display(),
        documents = documents.len(),
        "loaded corpus"
    );
    Ok(Corpus::new(documents, config))
}

/// Parse a document manifest file.
pub fn load_documents(path: &Path) -> Result<Vec<Document>, CorpusError> {
    let content = fs::read_to_string(path).map_err(|source| CorpusError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_documents(&content).map_err(|source| CorpusError::Json {
        path: path.to_path_buf(),
        source,
    })
}

/// Parse a document manifest from a JSON string.
pub fn parse_documents(json: &str) -> Result<Vec<Document>, serde_json::Error> {
    serde_json::from_str(json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::*;
    use tempfile::TempDir;

    #[test]
    fn parse_minimal_document() {
        let docs = parse_documents(r#"[{"slug": "a/b"}]"#).unwrap();
        assert_eq!(docs, vec![Document::new("a/b")]);
    }

    #[test]
    fn parse_full_document() {
        let docs = parse_documents(
            r#"[{
                "slug": "notes/rust/ownership",
                "title": "Ownership",
                "dates": {"created": "2024-01-01T00:00:00Z", "modified": "2024-03-01T00:00:00Z"},
                "tags": ["rust", "memory"],
                "icon": "🦀"
            }]"#,
        )
        .unwrap();
        let d = &docs[0];
        assert_eq!(d.title.as_deref(), Some("Ownership"));
        assert_eq!(d.dates.created, Some(at(2024, 1, 1)));
        assert_eq!(d.dates.modified, Some(at(2024, 3, 1)));
        assert_eq!(d.dates.published, None);
        assert_eq!(d.tags, vec!["rust", "memory"]);
        assert_eq!(d.icon.as_deref(), Some("🦀"));
    }

    #[test]
    fn parse_rejects_missing_slug() {
        assert!(parse_documents(r#"[{"title": "x"}]"#).is_err());
    }

    #[test]
    fn parse_rejects_bad_date() {
        assert!(parse_documents(r#"[{"slug": "a", "dates": {"modified": "yesterday"}}]"#).is_err());
    }

    #[test]
    fn load_fixture_corpus() {
        let tmp = setup_fixtures();
        let corpus = load(tmp.path()).unwrap();
        assert!(!corpus.is_empty());
        assert_eq!(corpus.config.site.title, "Garden");
        assert!(corpus.documents.iter().any(|d| d.slug == "notes/index"));
    }

    #[test]
    fn load_without_config_uses_defaults() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(DOCUMENTS_FILENAME), r#"[{"slug": "a"}]"#).unwrap();
        let corpus = load(tmp.path()).unwrap();
        assert_eq!(corpus.len(), 1);
        assert_eq!(corpus.config, SiteConfig::default());
    }

    #[test]
    fn load_missing_manifest_is_io_error() {
        let tmp = TempDir::new().unwrap();
        let err = load(tmp.path()).unwrap_err();
        assert!(matches!(err, CorpusError::Io { .. }));
        assert!(err.to_string().contains(DOCUMENTS_FILENAME));
    }

    #[test]
    fn load_invalid_json_is_json_error() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(DOCUMENTS_FILENAME), "{not json").unwrap();
        assert!(matches!(load(tmp.path()), Err(CorpusError::Json { .. })));
    }

    #[test]
    fn load_invalid_config_is_config_error() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(DOCUMENTS_FILENAME), "[]").unwrap();
        fs::write(tmp.path().join("config.toml"), "[listing]\nbogus = 1\n").unwrap();
        assert!(matches!(load(tmp.path()), Err(CorpusError::Config(_))));
    }
}
