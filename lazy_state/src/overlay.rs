// Copyright 2025 the Lazy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Applying persisted state onto live nodes.
//!
//! A [`StateOverlay`] indexes a [`PersistedDocument`] by path. When the registry creates a node
//! the overlay copies the matching entry's fields onto it. Entries of the wrong class and
//! fields that fail to parse are logged as [`OverlayParseError`]s and skipped; one bad entry
//! never fails the whole load.

use std::path::Path;

use hashbrown::HashMap;

use lazy_tree::{Fields, Node, NodeInitializer};

use crate::document::{NodeEntry, PersistedDocument};
use crate::error::{OverlayParseError, StateError};

#[derive(Clone, Debug)]
struct IndexedEntry {
    class_name: String,
    fields: Fields,
}

/// Persisted state indexed by node path.
#[derive(Clone, Debug, Default)]
pub struct StateOverlay {
    document: PersistedDocument,
    index: HashMap<String, IndexedEntry>,
}

impl StateOverlay {
    /// An overlay that applies nothing.
    pub fn new() -> Self {
        Self::default()
    }

    /// Index `document`.
    pub fn from_document(document: PersistedDocument) -> Self {
        let mut overlay = Self::new();
        overlay.set_document(document);
        overlay
    }

    /// Read the document at `path`.
    ///
    /// A missing or unreadable file yields an empty overlay.
    pub fn load(path: &Path) -> Self {
        match read_document(path) {
            Ok(document) => Self::from_document(document),
            Err(err) if err.is_not_found() => {
                log::debug!("no saved state at {}", path.display());
                Self::new()
            }
            Err(err) => {
                log::warn!("ignoring saved state: {err}");
                Self::new()
            }
        }
    }

    /// The indexed document.
    pub fn document(&self) -> &PersistedDocument {
        &self.document
    }

    /// Replace the indexed document.
    pub fn set_document(&mut self, document: PersistedDocument) {
        self.index = index_entries(&document, |entry| Some(entry.path.clone()));
        self.document = document;
    }

    /// True if an entry exists at `path`.
    pub fn contains(&self, path: &str) -> bool {
        self.index.contains_key(path)
    }

    /// Copy the entry at the node's path onto the node.
    ///
    /// Returns true if an entry of the node's class was found.
    pub fn apply_to_node(&self, node: &Node) -> bool {
        match self.index.get(node.path()) {
            Some(entry) => apply_entry(entry, node),
            None => false,
        }
    }

    /// Capture the live tree under `root`.
    pub fn save(root: &Node) -> PersistedDocument {
        PersistedDocument::capture(root)
    }

    /// Apply `document` to every live node under `root` by path. Nodes without an entry are
    /// left as they are. Returns the number of nodes updated.
    pub fn apply_document(document: &PersistedDocument, root: &Node) -> usize {
        let index = index_entries(document, |entry| Some(entry.path.clone()));
        apply_index(&index, root, root.path())
    }

    /// Capture the subtree under `node`, for copying between folders.
    pub fn capture_subtree(node: &Node) -> Option<NodeEntry> {
        NodeEntry::capture(node)
    }

    /// Apply a captured subtree onto `node`, matching entries by path relative to the
    /// captured and the target roots. Returns the number of nodes updated.
    pub fn apply_subtree(entry: &NodeEntry, node: &Node) -> usize {
        let base = entry.path.clone();
        let source = PersistedDocument {
            root: Some(entry.clone()),
        };
        let index = index_entries(&source, |e| relative(&e.path, &base).map(str::to_string));
        apply_index(&index, node, node.path())
    }
}

impl NodeInitializer for StateOverlay {
    fn initialize(&self, node: &Node) {
        self.apply_to_node(node);
    }
}

fn read_document(path: &Path) -> Result<PersistedDocument, StateError> {
    let text = std::fs::read_to_string(path).map_err(|e| StateError::io(path, e))?;
    PersistedDocument::from_json(&text).map_err(|e| StateError::json(path, e))
}

fn index_entries(
    document: &PersistedDocument,
    key: impl Fn(&NodeEntry) -> Option<String>,
) -> HashMap<String, IndexedEntry> {
    document
        .entries()
        .into_iter()
        .filter_map(|entry| {
            let key = key(entry)?;
            Some((
                key,
                IndexedEntry {
                    class_name: entry.class_name.clone(),
                    fields: entry.fields.clone(),
                },
            ))
        })
        .collect()
}

fn apply_index(index: &HashMap<String, IndexedEntry>, node: &Node, base: &str) -> usize {
    let mut applied = 0;
    if let Some(key) = relative(node.path(), base)
        && let Some(entry) = index.get(key)
        && apply_entry(entry, node)
    {
        applied += 1;
    }
    for child in node.children().iter() {
        applied += apply_index(index, child, base);
    }
    applied
}

fn apply_entry(entry: &IndexedEntry, node: &Node) -> bool {
    let expected = node.class().class_name();
    if entry.class_name != expected {
        let err = OverlayParseError::ClassMismatch {
            path: node.path().to_string(),
            expected: expected.to_string(),
            found: entry.class_name.clone(),
        };
        log::warn!("{err}");
        return false;
    }
    for field in node.apply_fields(&entry.fields) {
        let err = OverlayParseError::Field {
            path: node.path().to_string(),
            field,
        };
        log::warn!("{err}");
    }
    true
}

/// `path` relative to `base`: `""` for `base` itself, `None` outside it.
fn relative<'p>(path: &'p str, base: &str) -> Option<&'p str> {
    if base.is_empty() {
        return Some(path);
    }
    if path == base {
        return Some("");
    }
    path.strip_prefix(base)?.strip_prefix(lazy_path::SEPARATOR)
}
