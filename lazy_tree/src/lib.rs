// Copyright 2025 the Lazy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Lazy Tree: the retained node tree behind a declarative GUI.
//!
//! ## Overview
//!
//! Client code declares controls by path every frame. The [`NodeRegistry`] returns the live
//! [`Node`] at that path or creates it exactly once, so values survive across frames without
//! the caller storing anything.
//!
//! - [`node`]: node identity ([`NodeHeader`]), classes and the weak parent link.
//! - [`kinds`]: the closed set of node kinds behind the [`Control`] capability trait.
//! - [`cow`]: copy-on-write child lists that can be iterated while other threads edit them.
//! - [`registry`]: get-or-create, per-frame liveness and pruning, tree dumps.
//! - [`render`]: the [`Surface`] drawing collaborator, colors and hover-aware paint helpers.
//! - [`clipboard`]: the [`Clipboard`] collaborator.
//!
//! ## Example
//!
//! ```rust
//! use lazy_event_state::NumericInput;
//! use lazy_tree::kinds::{NodeKind, Slider};
//! use lazy_tree::{NoInitializer, NodeClass, NodeRegistry};
//!
//! let registry = NodeRegistry::new("MySketch");
//! registry.ensure_ancestors("scene/speed", &NoInitializer).unwrap();
//! let make = || NodeKind::Slider(Slider::new(NumericInput::new(1.0)));
//! let speed = registry
//!     .get_or_create("scene/speed", NodeClass::Slider, make, &NoInitializer)
//!     .unwrap();
//!
//! assert_eq!(speed.name(), "speed");
//! assert_eq!(speed.parent().unwrap().path(), "scene");
//! assert_eq!(registry.root().name(), "my sketch");
//! ```
//!
//! Parent links are weak; ownership only runs from parents to children.

pub mod clipboard;
pub mod cow;
pub mod error;
pub mod kinds;
pub mod node;
pub mod registry;
pub mod render;

pub use clipboard::{Clipboard, InMemoryClipboard};
pub use cow::CowList;
pub use error::TreeError;
pub use kinds::{Control, EventCx, Fields, NodeKind};
pub use node::{Node, NodeClass, NodeHeader, NodeId, NodeType};
pub use registry::{NoInitializer, NodeInitializer, NodeRegistry};
pub use render::{Argb, DrawCx, RecordingSurface, Surface, TextAlign, Theme};
