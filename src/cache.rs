//! Render-session memoization of the path trie.
//!
//! Several components on one folder page (the listing block, the category
//! grid, breadcrumbs) all need the same trie. Building it is O(total path
//! segments) and the corpus is the same for the whole render, so the trie is
//! built at most once per session and shared by reference.
//!
//! # Design
//!
//! ## Session keys
//!
//! The cache is **content-addressed**: a [`SessionId`] is the SHA-256 of the
//! serialized corpus snapshot plus the index segment. Two renders over the
//! same documents land in the same session; any change to a slug, title or
//! date yields a new id. Stale sessions are never consulted again.
//!
//! ## Lifetime
//!
//! A [`SessionCache`] is an ordinary value owned by whoever drives the render
//! (the `build` command, a test). There is no process-wide instance. Each
//! [`RenderSession`] holds an immutable `Arc<[Document]>` snapshot and a
//! `OnceLock<Trie>` that is filled on first use, so parallel workers that
//! race on the first access still construct exactly one trie.

use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, OnceLock};

use crate::trie::Trie;
use crate::types::Document;

/// Content hash identifying one corpus snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SessionId(String);

impl SessionId {
    /// Hash `documents` (in order) together with the index segment.
    pub fn of(documents: &[Document], index_segment: &str) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(b"session\0");
        hasher.update(index_segment.as_bytes());
        hasher.update(b"\0");
        for doc in documents {
            let bytes = serde_json::to_vec(doc).expect("document must serialize");
            hasher.update(&bytes);
            hasher.update(b"\n");
        }
        Self(format!("{:x}", hasher.finalize()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// First 12 hex characters, for log lines.
    pub fn short(&self) -> &str {
        &self.0[..12]
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One render over an immutable corpus snapshot.
#[derive(Debug)]
pub struct RenderSession {
    id: SessionId,
    index_segment: String,
    documents: Arc<[Document]>,
    trie: OnceLock<Trie>,
}

impl RenderSession {
    pub fn new(documents: Arc<[Document]>, index_segment: &str) -> Self {
        Self {
            id: SessionId::of(&documents, index_segment),
            index_segment: index_segment.to_string(),
            documents,
            trie: OnceLock::new(),
        }
    }

    pub fn id(&self) -> &SessionId {
        &self.id
    }

    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    /// The session's trie, built on first access.
    pub fn trie(&self) -> &Trie {
        self.trie.get_or_init(|| {
            tracing::debug!(session = %self.id.short(), "building trie for render session");
            Trie::build(&self.documents, &self.index_segment)
        })
    }

    /// True once [`trie`](Self::trie) has been called.
    pub fn is_built(&self) -> bool {
        self.trie.get().is_some()
    }
}

/// Sessions keyed by corpus hash.
#[derive(Debug, Default)]
pub struct SessionCache {
    sessions: HashMap<SessionId, Arc<RenderSession>>,
    stats: CacheStats,
}

impl SessionCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the session for this snapshot, creating it on a miss.
    ///
    /// The trie itself is not built here; the first caller of
    /// [`RenderSession::trie`] pays for it.
    pub fn session(&mut self, documents: &[Document], index_segment: &str) -> Arc<RenderSession> {
        let id = SessionId::of(documents, index_segment);
        if let Some(existing) = self.sessions.get(&id) {
            self.stats.hit();
            tracing::debug!(session = %id.short(), "render session cache hit");
            return Arc::clone(existing);
        }
        self.stats.miss();
        let session = Arc::new(RenderSession::new(Arc::from(documents), index_segment));
        self.sessions.insert(id, Arc::clone(&session));
        session
    }

    /// Drop a finished session.
    pub fn end(&mut self, id: &SessionId) -> bool {
        self.sessions.remove(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    pub fn stats(&self) -> &CacheStats {
        &self.stats
    }
}

/// Session lookups over the cache's lifetime.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u32,
    pub misses: u32,
}

impl CacheStats {
    pub fn hit(&mut self) {
        self.hits += 1;
    }

    pub fn miss(&mut self) {
        self.misses += 1;
    }

    pub fn total(&self) -> u32 {
        self.hits + self.misses
    }
}

impl fmt::Display for CacheStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.hits > 0 {
            write!(
                f,
                "{} reused, {} built ({} total)",
                self.hits,
                self.misses,
                self.total()
            )
        } else {
            write!(f, "{} built", self.misses)
        }
    }
}
