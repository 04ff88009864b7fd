// Copyright 2025 the Lazy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Whole-tree undo and redo at explicit action boundaries.
//!
//! The store keeps a baseline snapshot of the tree as it was after the last boundary. When a
//! new boundary is marked, the baseline (the state before the edit) goes onto the undo stack
//! and the current tree becomes the new baseline. Intermediate changes between boundaries,
//! such as every step of a drag, never produce entries.
//!
//! Undo and redo only ever change value fields of live nodes. Nodes are never created or
//! destroyed, and nodes missing from a snapshot are left as they are.

use std::collections::VecDeque;

use lazy_tree::Node;

use crate::document::{NodeEntry, PersistedDocument};
use crate::overlay::StateOverlay;

/// Default maximum number of undo entries.
pub const DEFAULT_UNDO_DEPTH: usize = 100;

/// A snapshot with its position in the edit history.
#[derive(Clone, Debug, PartialEq)]
pub struct UndoEntry {
    /// Tree state.
    pub snapshot: PersistedDocument,
    /// Monotonic sequence number.
    pub sequence: u64,
}

/// Bounded undo and redo stacks.
#[derive(Clone, Debug)]
pub struct UndoRedoStore {
    undo: VecDeque<UndoEntry>,
    redo: VecDeque<UndoEntry>,
    baseline: Option<PersistedDocument>,
    depth: usize,
    sequence: u64,
}

impl Default for UndoRedoStore {
    fn default() -> Self {
        Self::new(DEFAULT_UNDO_DEPTH)
    }
}

impl UndoRedoStore {
    /// Create a store keeping at most `depth` entries per stack.
    pub fn new(depth: usize) -> Self {
        Self {
            undo: VecDeque::new(),
            redo: VecDeque::new(),
            baseline: None,
            depth: depth.max(1),
            sequence: 0,
        }
    }

    /// Number of undo entries.
    pub fn undo_len(&self) -> usize {
        self.undo.len()
    }

    /// Number of redo entries.
    pub fn redo_len(&self) -> usize {
        self.redo.len()
    }

    /// True if [`undo`](Self::undo) would change anything.
    pub fn can_undo(&self) -> bool {
        !self.undo.is_empty()
    }

    /// True if [`redo`](Self::redo) would change anything.
    pub fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }

    /// True once a baseline has been recorded.
    pub fn has_baseline(&self) -> bool {
        self.baseline.is_some()
    }

    /// Record the state edits will be undone back to, without creating an entry.
    pub fn set_baseline(&mut self, snapshot: PersistedDocument) {
        self.baseline = Some(snapshot);
    }

    /// Add the state of a node created after the baseline was taken, so the first edit to it
    /// can be undone. Returns false when there is no baseline or it already covers the path.
    pub fn fold_into_baseline(&mut self, entry: NodeEntry) -> bool {
        self.baseline
            .as_mut()
            .is_some_and(|baseline| baseline.insert(entry))
    }

    /// Forget all history.
    pub fn clear(&mut self) {
        self.undo.clear();
        self.redo.clear();
        self.baseline = None;
    }

    /// Snapshot the tree under `root` and mark a completed edit.
    pub fn mark_action_boundary(&mut self, root: &Node) {
        self.push_boundary(StateOverlay::save(root));
    }

    /// Mark a completed edit whose resulting state is `current`.
    ///
    /// The previous baseline is pushed onto the undo stack, dropping the oldest entry when
    /// full, and the redo stack is cleared. A boundary that changed nothing is ignored.
    pub fn push_boundary(&mut self, current: PersistedDocument) {
        let Some(before) = self.baseline.replace(current) else {
            return;
        };
        if Some(&before) == self.baseline.as_ref() {
            return;
        }
        let entry = self.next_entry(before);
        push_bounded(&mut self.undo, entry, self.depth);
        self.redo.clear();
        log::trace!("action boundary, {} undo entries", self.undo.len());
    }

    /// Restore the tree under `root` to the state before the last edit.
    ///
    /// Returns false, changing nothing, when there is nothing to undo.
    pub fn undo(&mut self, root: &Node) -> bool {
        match self.undo_document(StateOverlay::save(root)) {
            Some(snapshot) => {
                StateOverlay::apply_document(&snapshot, root);
                true
            }
            None => false,
        }
    }

    /// Re-apply the last undone edit to the tree under `root`.
    ///
    /// Returns false, changing nothing, when there is nothing to redo.
    pub fn redo(&mut self, root: &Node) -> bool {
        match self.redo_document(StateOverlay::save(root)) {
            Some(snapshot) => {
                StateOverlay::apply_document(&snapshot, root);
                true
            }
            None => false,
        }
    }

    /// Pop an undo entry, saving `current` for redo. Returns the snapshot to apply.
    pub fn undo_document(&mut self, current: PersistedDocument) -> Option<PersistedDocument> {
        let entry = self.undo.pop_back()?;
        let saved = self.next_entry(current);
        push_bounded(&mut self.redo, saved, self.depth);
        self.baseline = Some(entry.snapshot.clone());
        log::debug!("undo to entry {}", entry.sequence);
        Some(entry.snapshot)
    }

    /// Pop a redo entry, saving `current` for undo. Returns the snapshot to apply.
    pub fn redo_document(&mut self, current: PersistedDocument) -> Option<PersistedDocument> {
        let entry = self.redo.pop_back()?;
        let saved = self.next_entry(current);
        push_bounded(&mut self.undo, saved, self.depth);
        self.baseline = Some(entry.snapshot.clone());
        log::debug!("redo to entry {}", entry.sequence);
        Some(entry.snapshot)
    }

    fn next_entry(&mut self, snapshot: PersistedDocument) -> UndoEntry {
        self.sequence += 1;
        UndoEntry {
            snapshot,
            sequence: self.sequence,
        }
    }
}

fn push_bounded(stack: &mut VecDeque<UndoEntry>, entry: UndoEntry, depth: usize) {
    stack.push_back(entry);
    while stack.len() > depth {
        stack.pop_front();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lazy_event_state::NumericInput;
    use lazy_tree::kinds::{Slider, Toggle};
    use lazy_tree::{NoInitializer, NodeClass, NodeKind, NodeRegistry};
    use std::sync::Arc;

    fn setup() -> (NodeRegistry, Arc<Node>, Arc<Node>) {
        let registry = NodeRegistry::new("App");
        let s = registry
            .get_or_create(
                "s",
                NodeClass::Slider,
                || NodeKind::Slider(Slider::new(NumericInput::new(1.0))),
                &NoInitializer,
            )
            .unwrap();
        let t = registry
            .get_or_create(
                "t",
                NodeClass::Toggle,
                || NodeKind::Toggle(Toggle::new(false)),
                &NoInitializer,
            )
            .unwrap();
        (registry, s, t)
    }

    fn set_slider(node: &Node, v: f32) {
        node.with_kind(|k| {
            k.as_slider_mut().unwrap().input_mut().set_value(v);
        });
    }

    fn slider_value(node: &Node) -> f32 {
        node.with_kind(|k| k.as_slider().unwrap().value())
    }

    #[test]
    fn undo_then_redo_restores_fields() {
        let (registry, s, t) = setup();
        let root = registry.root();
        let mut store = UndoRedoStore::new(10);
        store.set_baseline(StateOverlay::save(root));

        set_slider(&s, 2.0);
        store.mark_action_boundary(root);
        set_slider(&s, 3.0);
        t.with_kind(|k| k.as_toggle_mut().unwrap().value = true);
        store.mark_action_boundary(root);
        let before_undo = StateOverlay::save(root);

        assert!(store.undo(root));
        assert_eq!(slider_value(&s), 2.0);
        assert_eq!(t.printable_value(), "false");

        assert!(store.redo(root));
        assert_eq!(StateOverlay::save(root), before_undo);

        assert!(store.undo(root));
        assert!(store.undo(root));
        assert_eq!(slider_value(&s), 1.0);
        assert!(!store.undo(root));
        assert_eq!(slider_value(&s), 1.0);
    }

    #[test]
    fn new_boundary_clears_redo() {
        let (registry, s, _) = setup();
        let root = registry.root();
        let mut store = UndoRedoStore::new(10);
        store.set_baseline(StateOverlay::save(root));
        set_slider(&s, 2.0);
        store.mark_action_boundary(root);
        store.undo(root);
        assert!(store.can_redo());

        set_slider(&s, 5.0);
        store.mark_action_boundary(root);
        assert!(!store.can_redo());
        assert!(!store.redo(root));
        assert_eq!(slider_value(&s), 5.0);
    }

    #[test]
    fn unchanged_boundary_adds_nothing() {
        let (registry, _, _) = setup();
        let root = registry.root();
        let mut store = UndoRedoStore::new(10);
        store.set_baseline(StateOverlay::save(root));
        store.mark_action_boundary(root);
        assert_eq!(store.undo_len(), 0);
    }

    #[test]
    fn depth_is_bounded() {
        let mut store = UndoRedoStore::new(3);
        let docs: Vec<PersistedDocument> = (0..6)
            .map(|i| {
                PersistedDocument::from_json(&format!(
                    r#"{{"root":{{"className":"FolderNode","path":"","type":"FOLDER","n":{i}}}}}"#
                ))
                .unwrap()
            })
            .collect();
        store.set_baseline(docs[0].clone());
        for doc in &docs[1..] {
            store.push_boundary(doc.clone());
        }
        assert_eq!(store.undo_len(), 3);
        let mut sequences = Vec::new();
        let mut current = docs[5].clone();
        while let Some(prev) = store.undo_document(current.clone()) {
            sequences.push(prev.clone());
            current = prev;
        }
        assert_eq!(sequences, vec![docs[4].clone(), docs[3].clone(), docs[2].clone()]);
    }

    #[test]
    fn folded_node_undoes_its_first_edit() {
        let (registry, _, _) = setup();
        let root = registry.root();
        let mut store = UndoRedoStore::new(10);
        store.set_baseline(StateOverlay::save(root));

        let late = registry
            .get_or_create(
                "late",
                NodeClass::Slider,
                || NodeKind::Slider(Slider::new(NumericInput::new(0.0))),
                &NoInitializer,
            )
            .unwrap();
        let entry = NodeEntry::capture(&late).unwrap();
        assert!(store.fold_into_baseline(entry.clone()));
        assert!(!store.fold_into_baseline(entry));
        store.mark_action_boundary(root);
        assert_eq!(store.undo_len(), 0);

        set_slider(&late, 5.0);
        store.mark_action_boundary(root);
        assert!(store.undo(root));
        assert_eq!(slider_value(&late), 0.0);
    }

    #[test]
    fn nodes_created_after_snapshot_are_kept() {
        let (registry, s, _) = setup();
        let root = registry.root();
        let mut store = UndoRedoStore::new(10);
        store.set_baseline(StateOverlay::save(root));
        set_slider(&s, 9.0);
        store.mark_action_boundary(root);

        let late = registry
            .get_or_create(
                "late",
                NodeClass::Slider,
                || NodeKind::Slider(Slider::new(NumericInput::new(4.0))),
                &NoInitializer,
            )
            .unwrap();
        assert!(store.undo(root));
        assert_eq!(slider_value(&s), 1.0);
        assert_eq!(slider_value(&late), 4.0);
        assert!(Arc::ptr_eq(&registry.get("late").unwrap(), &late));
    }
}
