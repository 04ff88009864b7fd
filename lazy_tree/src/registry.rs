// Copyright 2025 the Lazy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The authoritative path to node map.
//!
//! ## Get or create
//!
//! [`NodeRegistry::get_or_create`] returns the live node at a path, or builds one with the
//! caller's factory, hands it to a [`NodeInitializer`] (typically the persisted state overlay)
//! and links it under its parent. The factory runs at most once per path.
//!
//! ## Liveness
//!
//! Every declaration stamps the node and its ancestors with the current frame. When a pruning
//! window is configured, [`NodeRegistry::sweep`] removes nodes whose stamp lags the current
//! frame by more than the window. The root is never pruned.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use hashbrown::HashMap;

use crate::error::TreeError;
use crate::kinds::{Folder, NodeKind};
use crate::node::{Node, NodeClass, NodeHeader, NodeId};

/// Called once for every newly created node, before it becomes visible in the tree.
pub trait NodeInitializer {
    /// Apply initial state to `node`.
    fn initialize(&self, node: &Node);
}

/// An initializer that leaves constructor defaults in place.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoInitializer;

impl NodeInitializer for NoInitializer {
    fn initialize(&self, _node: &Node) {}
}

/// Path-addressed registry of live nodes.
#[derive(Debug)]
pub struct NodeRegistry {
    root: Arc<Node>,
    nodes: Mutex<HashMap<String, Arc<Node>>>,
    frame: AtomicU64,
    next_id: AtomicU64,
    prune_after_frames: Option<u64>,
}

impl NodeRegistry {
    /// Create a registry holding only the root folder, named after `app_identifier`.
    pub fn new(app_identifier: &str) -> Self {
        let header = NodeHeader {
            id: NodeId(0),
            path: String::new(),
            name: lazy_path::humanize_identifier(app_identifier),
            class: NodeClass::Folder,
        };
        let root = Arc::new(Node::new(
            header,
            std::sync::Weak::new(),
            NodeKind::Folder(Folder::default()),
            0,
        ));
        let mut nodes = HashMap::new();
        nodes.insert(String::new(), Arc::clone(&root));
        Self {
            root,
            nodes: Mutex::new(nodes),
            frame: AtomicU64::new(0),
            next_id: AtomicU64::new(1),
            prune_after_frames: None,
        }
    }

    /// Prune nodes not declared for more than `frames` frames. `None` never prunes.
    pub fn with_pruning(mut self, frames: Option<u64>) -> Self {
        self.prune_after_frames = frames;
        self
    }

    /// The root folder.
    pub fn root(&self) -> &Arc<Node> {
        &self.root
    }

    /// Current frame counter.
    pub fn frame(&self) -> u64 {
        self.frame.load(Ordering::Acquire)
    }

    /// Start the next frame and return its number.
    pub fn advance_frame(&self) -> u64 {
        self.frame.fetch_add(1, Ordering::AcqRel) + 1
    }

    /// Number of live nodes, root included.
    pub fn node_count(&self) -> usize {
        self.lock_nodes().len()
    }

    /// The live node at `path`.
    pub fn get(&self, path: &str) -> Option<Arc<Node>> {
        self.lock_nodes().get(&lazy_path::normalize(path)).cloned()
    }

    /// The live node at `path`, created with `factory` if absent.
    ///
    /// The returned node is marked as declared in the current frame. `factory` is not called
    /// when the node exists. `init` runs on the new node while the registry is locked, so it
    /// must not call back into the registry.
    pub fn get_or_create(
        &self,
        path: &str,
        class: NodeClass,
        factory: impl FnOnce() -> NodeKind,
        init: &dyn NodeInitializer,
    ) -> Result<Arc<Node>, TreeError> {
        let path = lazy_path::normalize(path);
        let frame = self.frame();
        let mut nodes = self.lock_nodes();

        if let Some(existing) = nodes.get(&path) {
            if existing.class() != class {
                return Err(TreeError::PathConflict {
                    path,
                    existing: existing.class(),
                    requested: class,
                });
            }
            touch_with_ancestors(existing, frame);
            return Ok(Arc::clone(existing));
        }

        let parent_path = lazy_path::parent_of(&path).unwrap_or_default();
        let Some(parent) = nodes.get(&parent_path).cloned() else {
            return Err(TreeError::OrphanNode {
                path,
                parent: parent_path,
            });
        };
        if !parent.class().accepts_children() {
            return Err(TreeError::NotAContainer {
                path,
                parent: parent_path,
                class: parent.class(),
            });
        }

        let kind = factory();
        if kind.class() != class {
            return Err(TreeError::PathConflict {
                path,
                existing: kind.class(),
                requested: class,
            });
        }

        let header = NodeHeader {
            id: NodeId(self.next_id.fetch_add(1, Ordering::Relaxed)),
            name: lazy_path::name_of(&path),
            path: path.clone(),
            class,
        };
        let node = Arc::new(Node::new(header, Arc::downgrade(&parent), kind, frame));
        init.initialize(&node);
        parent.child_list().push(Arc::clone(&node));
        nodes.insert(path, Arc::clone(&node));
        drop(nodes);

        touch_with_ancestors(&node, frame);
        log::debug!("created {} at {:?}", class.class_name(), node.path());
        Ok(node)
    }

    /// Make sure every proper ancestor of `path` exists, creating missing ones as folders.
    pub fn ensure_ancestors(
        &self,
        path: &str,
        init: &dyn NodeInitializer,
    ) -> Result<(), TreeError> {
        for ancestor in lazy_path::ancestors(path).iter().skip(1) {
            if let Some(existing) = self.get(ancestor)
                && existing.class().accepts_children()
            {
                touch_with_ancestors(&existing, self.frame());
                continue;
            }
            self.get_or_create(
                ancestor,
                NodeClass::Folder,
                || NodeKind::Folder(Folder::default()),
                init,
            )?;
        }
        Ok(())
    }

    /// Mark the node at `path` and its ancestors as declared this frame.
    pub fn touch(&self, path: &str) -> bool {
        match self.get(path) {
            Some(node) => {
                touch_with_ancestors(&node, self.frame());
                true
            }
            None => false,
        }
    }

    /// Remove the node at `path` and its whole subtree. Returns the removed nodes.
    ///
    /// The root cannot be removed.
    pub fn remove(&self, path: &str) -> Vec<Arc<Node>> {
        let mut nodes = self.lock_nodes();
        let mut removed = Vec::new();
        if let Some(node) = nodes.get(&lazy_path::normalize(path)).cloned()
            && !node.is_root()
        {
            remove_subtree(&mut nodes, &node, &mut removed);
        }
        removed
    }

    /// Remove nodes that have not been declared within the pruning window.
    ///
    /// Call after all declarations of the frame. Returns the removed nodes.
    pub fn sweep(&self) -> Vec<Arc<Node>> {
        let Some(window) = self.prune_after_frames else {
            return Vec::new();
        };
        let frame = self.frame();
        let mut nodes = self.lock_nodes();
        let mut stale: Vec<Arc<Node>> = nodes
            .values()
            .filter(|n| !n.is_root() && frame.saturating_sub(n.touched_frame()) > window)
            .cloned()
            .collect();
        stale.sort_by(|a, b| a.path().cmp(b.path()));

        let mut removed = Vec::new();
        for node in &stale {
            if nodes.contains_key(node.path()) {
                remove_subtree(&mut nodes, node, &mut removed);
            }
        }
        if !removed.is_empty() {
            log::debug!("pruned {} nodes at frame {frame}", removed.len());
        }
        removed
    }

    /// Every live node in depth-first child order, root first.
    pub fn all_nodes(&self) -> Vec<Arc<Node>> {
        let mut out = Vec::new();
        collect(&self.root, &mut out);
        out
    }

    /// An indented dump of the tree with each node's value.
    ///
    /// Nodes with children are marked `+ `, others `- `; each level is indented by `|   `.
    pub fn pretty_print(&self) -> String {
        let mut out = String::new();
        write_tree(&self.root, 0, &mut out);
        out
    }

    fn lock_nodes(&self) -> MutexGuard<'_, HashMap<String, Arc<Node>>> {
        self.nodes.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn touch_with_ancestors(node: &Arc<Node>, frame: u64) {
    node.touch(frame);
    let mut next = node.parent();
    while let Some(ancestor) = next {
        ancestor.touch(frame);
        next = ancestor.parent();
    }
}

fn remove_subtree(
    nodes: &mut HashMap<String, Arc<Node>>,
    node: &Arc<Node>,
    removed: &mut Vec<Arc<Node>>,
) {
    for child in node.children().iter() {
        remove_subtree(nodes, child, removed);
    }
    if let Some(parent) = node.parent() {
        parent.child_list().retain(|c| !Arc::ptr_eq(c, node));
    }
    if nodes.remove(node.path()).is_some() {
        log::trace!("removed {:?}", node.path());
        removed.push(Arc::clone(node));
    }
}

fn collect(node: &Arc<Node>, out: &mut Vec<Arc<Node>>) {
    out.push(Arc::clone(node));
    for child in node.children().iter() {
        collect(child, out);
    }
}

fn write_tree(node: &Node, depth: usize, out: &mut String) {
    for _ in 0..depth {
        out.push_str("|   ");
    }
    let children = node.children();
    out.push_str(if children.is_empty() { "- " } else { "+ " });
    out.push_str(node.name());
    let value = node.printable_value();
    if !value.is_empty() {
        out.push_str(": ");
        out.push_str(&value);
    }
    out.push('\n');
    for child in children.iter() {
        write_tree(child, depth + 1, out);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kinds::{Slider, Toggle};
    use lazy_event_state::NumericInput;
    use std::cell::Cell;
    use std::sync::Barrier;
    use std::thread;

    fn folder() -> NodeKind {
        NodeKind::Folder(Folder::default())
    }

    fn slider(v: f32) -> NodeKind {
        NodeKind::Slider(Slider::new(NumericInput::new(v)))
    }

    #[derive(Default)]
    struct Recorder(Mutex<Vec<String>>);

    impl NodeInitializer for Recorder {
        fn initialize(&self, node: &Node) {
            self.0.lock().unwrap().push(node.path().to_string());
        }
    }

    #[test]
    fn get_or_create_returns_same_node_without_rebuilding() {
        let registry = NodeRegistry::new("Test");
        let calls = Cell::new(0);
        let factory = || {
            calls.set(calls.get() + 1);
            slider(1.0)
        };
        let a = registry
            .get_or_create("speed", NodeClass::Slider, factory, &NoInitializer)
            .unwrap();
        a.with_kind(|k| k.as_slider_mut().unwrap().input_mut().set_value(9.0));

        let b = registry
            .get_or_create(
                "speed",
                NodeClass::Slider,
                || {
                    calls.set(calls.get() + 1);
                    slider(1.0)
                },
                &NoInitializer,
            )
            .unwrap();
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(calls.get(), 1);
        assert_eq!(b.printable_value(), "9");
    }

    #[test]
    fn conflicting_class_is_reported() {
        let registry = NodeRegistry::new("Test");
        registry
            .get_or_create("x", NodeClass::Slider, || slider(0.0), &NoInitializer)
            .unwrap();
        let err = registry
            .get_or_create(
                "x",
                NodeClass::Toggle,
                || NodeKind::Toggle(Toggle::new(false)),
                &NoInitializer,
            )
            .unwrap_err();
        assert!(matches!(
            err,
            TreeError::PathConflict {
                existing: NodeClass::Slider,
                requested: NodeClass::Toggle,
                ..
            }
        ));
    }

    #[test]
    fn missing_parent_is_an_orphan() {
        let registry = NodeRegistry::new("Test");
        let err = registry
            .get_or_create("a/b", NodeClass::Slider, || slider(0.0), &NoInitializer)
            .unwrap_err();
        assert_eq!(
            err,
            TreeError::OrphanNode {
                path: "a/b".into(),
                parent: "a".into()
            }
        );
        registry.ensure_ancestors("a/b", &NoInitializer).unwrap();
        assert!(
            registry
                .get_or_create("a/b", NodeClass::Slider, || slider(0.0), &NoInitializer)
                .is_ok()
        );
    }

    #[test]
    fn value_nodes_hold_no_children() {
        let registry = NodeRegistry::new("Test");
        registry
            .get_or_create("v", NodeClass::Slider, || slider(0.0), &NoInitializer)
            .unwrap();
        let err = registry
            .get_or_create("v/w", NodeClass::Slider, || slider(0.0), &NoInitializer)
            .unwrap_err();
        assert!(matches!(err, TreeError::NotAContainer { .. }));
    }

    #[test]
    fn initializer_runs_once_per_node() {
        let registry = NodeRegistry::new("Test");
        let recorder = Recorder::default();
        registry.ensure_ancestors("a/b/c", &recorder).unwrap();
        registry.ensure_ancestors("a/b/c", &recorder).unwrap();
        registry
            .get_or_create("a/b/c", NodeClass::Slider, || slider(0.0), &recorder)
            .unwrap();
        assert_eq!(*recorder.0.lock().unwrap(), vec!["a", "a/b", "a/b/c"]);
    }

    #[test]
    fn paths_are_normalized_and_names_unescaped() {
        let registry = NodeRegistry::new("Test");
        let node = registry
            .get_or_create("/m\\/s/", NodeClass::Slider, || slider(0.0), &NoInitializer)
            .unwrap();
        assert_eq!(node.path(), "m\\/s");
        assert_eq!(node.name(), "m/s");
        assert!(registry.get("m\\/s").is_some());
    }

    #[test]
    fn stale_nodes_are_pruned_after_window() {
        let registry = NodeRegistry::new("Test").with_pruning(Some(2));
        registry.ensure_ancestors("a/b", &NoInitializer).unwrap();
        registry
            .get_or_create("a/b", NodeClass::Slider, || slider(0.0), &NoInitializer)
            .unwrap();
        registry
            .get_or_create("a/keep", NodeClass::Slider, || slider(0.0), &NoInitializer)
            .unwrap();

        for _ in 0..2 {
            registry.advance_frame();
            registry.touch("a/keep");
            assert!(registry.sweep().is_empty());
        }
        registry.advance_frame();
        registry.touch("a/keep");
        let pruned = registry.sweep();
        assert_eq!(pruned.len(), 1);
        assert_eq!(pruned[0].path(), "a/b");
        assert!(registry.get("a/b").is_none());
        assert!(registry.get("a").is_some());
        let names: Vec<String> = registry
            .get("a")
            .unwrap()
            .children()
            .iter()
            .map(|c| c.name().to_string())
            .collect();
        assert_eq!(names, vec!["keep"]);
    }

    #[test]
    fn declaring_late_in_frame_prevents_pruning() {
        let registry = NodeRegistry::new("Test").with_pruning(Some(0));
        registry
            .get_or_create("late", NodeClass::Slider, || slider(0.0), &NoInitializer)
            .unwrap();
        registry.advance_frame();
        registry
            .get_or_create("late", NodeClass::Slider, || slider(0.0), &NoInitializer)
            .unwrap();
        assert!(registry.sweep().is_empty());
        registry.advance_frame();
        let pruned = registry.sweep();
        assert_eq!(pruned.len(), 1);
        assert_eq!(registry.node_count(), 1);
    }

    #[test]
    fn without_window_nothing_is_pruned() {
        let registry = NodeRegistry::new("Test");
        registry
            .get_or_create("x", NodeClass::Slider, || slider(0.0), &NoInitializer)
            .unwrap();
        for _ in 0..100 {
            registry.advance_frame();
        }
        assert!(registry.sweep().is_empty());
        assert!(registry.get("x").is_some());
    }

    #[test]
    fn remove_drops_subtree() {
        let registry = NodeRegistry::new("Test");
        registry.ensure_ancestors("a/b/c", &NoInitializer).unwrap();
        registry
            .get_or_create("a/b/c", NodeClass::Slider, || slider(0.0), &NoInitializer)
            .unwrap();
        let removed = registry.remove("a/b");
        assert_eq!(removed.len(), 2);
        assert!(registry.get("a/b/c").is_none());
        assert!(registry.get("a").unwrap().children().is_empty());
        assert!(registry.remove("").is_empty());
    }

    #[test]
    fn pretty_print_and_all_nodes() {
        let registry = NodeRegistry::new("MyTestSketch");
        registry.ensure_ancestors("scene/x", &NoInitializer).unwrap();
        registry
            .get_or_create("scene/x", NodeClass::Slider, || slider(1.5), &NoInitializer)
            .unwrap();
        registry
            .get_or_create(
                "on",
                NodeClass::Toggle,
                || NodeKind::Toggle(Toggle::new(true)),
                &NoInitializer,
            )
            .unwrap();
        assert_eq!(
            registry.pretty_print(),
            "+ my test sketch\n|   + scene\n|   |   - x: 1.5\n|   - on: true\n"
        );
        let paths: Vec<String> = registry
            .all_nodes()
            .iter()
            .map(|n| n.path().to_string())
            .collect();
        assert_eq!(paths, vec!["", "scene", "scene/x", "on"]);
        assert_eq!(
            registry.root().find_child_by_name("scene").unwrap().path(),
            "scene"
        );
    }

    #[test]
    fn children_iterate_while_another_thread_creates_nodes() {
        let registry = Arc::new(NodeRegistry::new("Test"));
        for name in ["a", "b", "c"] {
            registry
                .get_or_create(name, NodeClass::Slider, || slider(0.0), &NoInitializer)
                .unwrap();
        }
        let mid_iteration = Arc::new(Barrier::new(2));
        let appended = Arc::new(Barrier::new(2));

        let writer = {
            let registry = Arc::clone(&registry);
            let mid_iteration = Arc::clone(&mid_iteration);
            let appended = Arc::clone(&appended);
            thread::spawn(move || {
                mid_iteration.wait();
                registry
                    .get_or_create("d", NodeClass::Slider, || slider(0.0), &NoInitializer)
                    .unwrap();
                appended.wait();
            })
        };

        let mut seen = Vec::new();
        for (i, child) in registry.root().children().iter().enumerate() {
            if i == 0 {
                mid_iteration.wait();
                appended.wait();
            }
            seen.push(child.name().to_string());
        }
        writer.join().unwrap();

        assert_eq!(seen, vec!["a", "b", "c"]);
        assert_eq!(registry.root().children().len(), 4);
    }
}
