// Copyright 2025 the Lazy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The persisted document: a JSON tree mirroring the node tree by path.
//!
//! ```json
//! {
//!   "root": {
//!     "className": "FolderNode",
//!     "path": "",
//!     "type": "FOLDER",
//!     "closed": false, "posX": 0.0, "posY": 0.0,
//!     "children": [
//!       { "className": "SliderNode", "path": "speed", "type": "VALUE",
//!         "valueFloat": 1.5, "currentPrecisionIndex": 3, "valueFloatPrecision": 0.1 }
//!     ]
//!   }
//! }
//! ```
//!
//! Exposed fields are flattened into each entry. Transient nodes are not written.

use serde::{Deserialize, Serialize};

use lazy_tree::{Fields, Node, NodeType};

/// Persistence category recorded with each entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EntryType {
    /// A folder.
    Folder,
    /// A value node.
    Value,
}

/// One node's persisted state.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NodeEntry {
    /// Type discriminator, the node's class name.
    #[serde(rename = "className")]
    pub class_name: String,
    /// Node path.
    pub path: String,
    /// Persistence category.
    #[serde(rename = "type")]
    pub entry_type: EntryType,
    /// Exposed fields.
    #[serde(flatten)]
    pub fields: Fields,
    /// Children in display order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Self>,
}

impl NodeEntry {
    /// Capture `node` and its persisted descendants, in child order.
    ///
    /// Returns `None` for transient nodes.
    pub fn capture(node: &Node) -> Option<Self> {
        let entry_type = match node.node_type() {
            NodeType::Folder => EntryType::Folder,
            NodeType::Value => EntryType::Value,
            NodeType::Transient => return None,
        };
        Some(Self {
            class_name: node.class().class_name().to_string(),
            path: node.path().to_string(),
            entry_type,
            fields: node.expose_fields(),
            children: node
                .children()
                .iter()
                .filter_map(|child| Self::capture(child))
                .collect(),
        })
    }

    fn find_mut(&mut self, path: &str) -> Option<&mut Self> {
        if self.path == path {
            return Some(self);
        }
        self.children.iter_mut().find_map(|child| child.find_mut(path))
    }

    /// This entry and all descendants, depth first.
    pub fn walk(&self) -> Vec<&Self> {
        let mut out = Vec::new();
        let mut stack = vec![self];
        while let Some(entry) = stack.pop() {
            out.push(entry);
            stack.extend(entry.children.iter().rev());
        }
        out
    }
}

/// A whole saved tree.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PersistedDocument {
    /// Root entry, absent in an empty document.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub root: Option<NodeEntry>,
}

impl PersistedDocument {
    /// A document with no entries.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Capture the tree under `root`.
    pub fn capture(root: &Node) -> Self {
        Self {
            root: NodeEntry::capture(root),
        }
    }

    /// True if there are no entries.
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Every entry, depth first.
    pub fn entries(&self) -> Vec<&NodeEntry> {
        self.root.as_ref().map(NodeEntry::walk).unwrap_or_default()
    }

    /// The entry at `path`.
    pub fn find(&self, path: &str) -> Option<&NodeEntry> {
        self.entries().into_iter().find(|e| e.path == path)
    }

    /// Add `entry` as the last child of the entry at its parent path.
    ///
    /// Returns false, leaving the document unchanged, when the path already has an entry or
    /// the parent has none.
    pub fn insert(&mut self, entry: NodeEntry) -> bool {
        if self.find(&entry.path).is_some() {
            return false;
        }
        let parent = lazy_path::parent_of(&entry.path).unwrap_or_default();
        match self.root.as_mut().and_then(|root| root.find_mut(&parent)) {
            Some(parent) => {
                parent.children.push(entry);
                true
            }
            None => false,
        }
    }

    /// Parse a document.
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    /// Pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn entry_fields_are_flattened() {
        let text = json!({
            "root": {
                "className": "FolderNode",
                "path": "",
                "type": "FOLDER",
                "closed": true,
                "children": [
                    { "className": "ToggleNode", "path": "on", "type": "VALUE", "valueBoolean": true }
                ]
            }
        })
        .to_string();
        let doc = PersistedDocument::from_json(&text).unwrap();
        let on = doc.find("on").unwrap();
        assert_eq!(on.class_name, "ToggleNode");
        assert_eq!(on.entry_type, EntryType::Value);
        assert_eq!(on.fields.get("valueBoolean"), Some(&json!(true)));
        assert!(!on.fields.contains_key("children"));
        assert_eq!(doc.entries().len(), 2);

        let again = PersistedDocument::from_json(&doc.to_json().unwrap()).unwrap();
        assert_eq!(again, doc);
    }

    #[test]
    fn insert_places_entry_under_its_parent() {
        let text = json!({
            "root": {
                "className": "FolderNode", "path": "", "type": "FOLDER",
                "children": [ { "className": "FolderNode", "path": "scene", "type": "FOLDER" } ]
            }
        })
        .to_string();
        let mut doc = PersistedDocument::from_json(&text).unwrap();
        let entry = |path: &str| NodeEntry {
            class_name: "ToggleNode".into(),
            path: path.into(),
            entry_type: EntryType::Value,
            fields: Fields::new(),
            children: Vec::new(),
        };
        assert!(doc.insert(entry("scene/on")));
        assert!(!doc.insert(entry("scene/on")));
        assert!(!doc.insert(entry("missing/on")));
        assert_eq!(doc.find("scene").unwrap().children[0].path, "scene/on");
        assert!(!PersistedDocument::empty().insert(entry("on")));
    }

    #[test]
    fn empty_document_has_no_entries() {
        let doc = PersistedDocument::from_json("{}").unwrap();
        assert!(doc.is_empty());
        assert!(doc.entries().is_empty());
        assert_eq!(doc.to_json().unwrap(), "{}");
    }
}
