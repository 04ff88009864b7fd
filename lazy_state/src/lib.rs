// Copyright 2025 the Lazy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Lazy State: persistence and history for a Lazy GUI node tree.
//!
//! - [`document`]: the JSON [`PersistedDocument`] mirroring the tree by path.
//! - [`overlay`]: [`StateOverlay`], which applies saved entries to nodes as they are created
//!   and captures the live tree back into a document.
//! - [`store`]: [`SaveStore`], a directory of named save files.
//! - [`undo`]: [`UndoRedoStore`], whole-tree snapshots taken at action boundaries.
//!
//! ## Example
//!
//! ```rust
//! use lazy_event_state::NumericInput;
//! use lazy_state::{StateOverlay, UndoRedoStore};
//! use lazy_tree::kinds::{NodeKind, Slider};
//! use lazy_tree::{NoInitializer, NodeClass, NodeRegistry};
//!
//! let registry = NodeRegistry::new("Demo");
//! let gain = registry
//!     .get_or_create(
//!         "gain",
//!         NodeClass::Slider,
//!         || NodeKind::Slider(Slider::new(NumericInput::new(1.0))),
//!         &NoInitializer,
//!     )
//!     .unwrap();
//!
//! let mut history = UndoRedoStore::default();
//! history.set_baseline(StateOverlay::save(registry.root()));
//! gain.with_kind(|k| k.as_slider_mut().unwrap().input_mut().set_value(3.0));
//! history.mark_action_boundary(registry.root());
//!
//! history.undo(registry.root());
//! assert_eq!(gain.printable_value(), "1");
//! history.redo(registry.root());
//! assert_eq!(gain.printable_value(), "3");
//! ```
//!
//! Saving and undo are single-writer operations; callers serialize them.

pub mod document;
pub mod error;
pub mod overlay;
pub mod store;
pub mod undo;

pub use document::{EntryType, NodeEntry, PersistedDocument};
pub use error::{OverlayParseError, StateError};
pub use overlay::StateOverlay;
pub use store::SaveStore;
pub use undo::{UndoEntry, UndoRedoStore};
