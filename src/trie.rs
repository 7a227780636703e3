//! Path trie over the document corpus.
//!
//! Mirrors the folder structure implied by document slugs. Built once per
//! render session from an immutable snapshot of the corpus and never
//! mutated afterwards, so a `&Trie` can be shared freely across threads.
//!
//! # Architecture
//!
//! Nodes live in a flat `Vec<TrieNode>` and refer to each other by
//! [`NodeId`]. Child lookup goes through an edge map keyed by
//! `(parent id, segment)`. This gives:
//! - no reference cycles or interior mutability
//! - O(d) lookup where d is the path depth
//! - stable child order (insertion order) for deterministic listings
//!
//! # Construction Rules
//!
//! - Missing intermediate folders are created on demand (`data = None`).
//! - A slug ending in the index segment attaches its document to the
//!   parent folder node: `notes/index` becomes the `notes` node's data.
//! - Duplicate slugs overwrite earlier data; last write wins in input order.
//! - Any node with at least one child is a folder, as is any node that
//!   received an index document.

use std::collections::HashMap;

use crate::naming;
use crate::types::Document;

/// Index of a node inside its [`Trie`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    /// The root node; present in every trie.
    pub const ROOT: NodeId = NodeId(0);

    pub fn index(self) -> usize {
        self.0
    }
}

/// A vertex of the trie: a folder, a document, or both.
#[derive(Debug, Clone)]
pub struct TrieNode {
    segment: String,
    slug: String,
    display_name: String,
    is_folder: bool,
    has_index: bool,
    data: Option<usize>,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

impl TrieNode {
    fn new(segment: &str, slug: String, parent: Option<NodeId>) -> Self {
        Self {
            segment: segment.to_string(),
            display_name: segment.to_string(),
            slug,
            is_folder: false,
            has_index: false,
            data: None,
            parent,
            children: Vec::new(),
        }
    }

    /// Raw path segment (`""` for the root).
    pub fn segment(&self) -> &str {
        &self.segment
    }

    /// Full slug reconstructed from the root (`""` for the root).
    pub fn slug(&self) -> &str {
        &self.slug
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn is_folder(&self) -> bool {
        self.is_folder
    }

    /// True when the node's data came from an index document.
    pub fn has_index(&self) -> bool {
        self.has_index
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }
}

/// Immutable tree of path segments built from a corpus snapshot.
#[derive(Debug, Clone)]
pub struct Trie {
    documents: Vec<Document>,
    nodes: Vec<TrieNode>,
    edges: HashMap<(NodeId, String), NodeId>,
    index_segment: String,
}

impl Trie {
    /// Build a trie from documents in input order.
    ///
    /// Never fails: empty slugs address the root, duplicates overwrite.
    pub fn build(documents: &[Document], index_segment: &str) -> Self {
        let mut trie = Self {
            documents: documents.to_vec(),
            nodes: vec![TrieNode::new("", String::new(), None)],
            edges: HashMap::new(),
            index_segment: index_segment.to_string(),
        };

        for (doc_idx, doc) in documents.iter().enumerate() {
            let mut segments = doc.segments();
            let is_index = segments.last() == Some(&index_segment);
            if is_index {
                segments.pop();
            }

            let mut current = NodeId::ROOT;
            for segment in &segments {
                current = trie.child_or_insert(current, segment);
            }

            let node = &mut trie.nodes[current.0];
            if let Some(previous) = node.data {
                tracing::debug!(
                    slug = %doc.slug,
                    previous = %documents[previous].slug,
                    "duplicate document path, last write wins"
                );
            }
            node.data = Some(doc_idx);
            node.has_index = is_index;
            if is_index {
                node.is_folder = true;
            }
        }

        for node in &mut trie.nodes {
            let title = node
                .data
                .and_then(|i| trie.documents[i].title.as_deref());
            node.display_name = naming::display_name(title, &node.segment, &trie.index_segment);
        }

        tracing::debug!(
            documents = trie.documents.len(),
            nodes = trie.nodes.len(),
            "trie built"
        );
        trie
    }

    fn child_or_insert(&mut self, parent: NodeId, segment: &str) -> NodeId {
        if let Some(&id) = self.edges.get(&(parent, segment.to_string())) {
            return id;
        }
        let id = NodeId(self.nodes.len());
        let slug = naming::child_slug(&self.nodes[parent.0].slug, segment);
        self.nodes.push(TrieNode::new(segment, slug, Some(parent)));
        self.edges.insert((parent, segment.to_string()), id);

        let parent_node = &mut self.nodes[parent.0];
        parent_node.children.push(id);
        parent_node.is_folder = true;
        id
    }

    pub fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    /// Segment that marks a folder's own document.
    pub fn index_segment(&self) -> &str {
        &self.index_segment
    }

    /// Number of nodes, root included. Never zero.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn node(&self, id: NodeId) -> &TrieNode {
        &self.nodes[id.0]
    }

    /// Document attached to this exact node, if any.
    pub fn data(&self, id: NodeId) -> Option<&Document> {
        self.nodes[id.0].data.map(|i| &self.documents[i])
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id.0].children
    }

    pub fn child(&self, parent: NodeId, segment: &str) -> Option<NodeId> {
        self.edges.get(&(parent, segment.to_string())).copied()
    }

    /// Documents the trie was built from, in input order.
    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    /// Follow `path` from the root without creating anything.
    ///
    /// The empty path is the root. A trailing index segment resolves to the
    /// folder it belongs to, so a folder page's own slug finds its folder.
    pub fn find_node<S: AsRef<str>>(&self, path: &[S]) -> Option<NodeId> {
        let mut current = NodeId::ROOT;
        for (i, segment) in path.iter().enumerate() {
            let segment = segment.as_ref();
            if i + 1 == path.len() && segment == self.index_segment {
                return Some(current);
            }
            current = self.child(current, segment)?;
        }
        Some(current)
    }

    /// [`find_node`](Self::find_node) on a slash-separated slug.
    pub fn find_slug(&self, slug: &str) -> Option<NodeId> {
        self.find_node(&naming::split_slug(slug))
    }

    /// Pre-order walk with depth, root first.
    pub fn walk(&self) -> Vec<(NodeId, usize)> {
        let mut out = Vec::with_capacity(self.nodes.len());
        let mut stack = vec![(NodeId::ROOT, 0)];
        while let Some((id, depth)) = stack.pop() {
            out.push((id, depth));
            for &child in self.children(id).iter().rev() {
                stack.push((child, depth + 1));
            }
        }
        out
    }

    /// All folder nodes in pre-order, root first (the root is always a folder page).
    pub fn folders(&self) -> Vec<NodeId> {
        self.walk()
            .into_iter()
            .map(|(id, _)| id)
            .filter(|&id| id == NodeId::ROOT || self.node(id).is_folder)
            .collect()
    }
}
