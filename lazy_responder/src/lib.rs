// Copyright 2025 the Lazy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Lazy Responder: exclusive hover and pointer capture for a flat list of node regions.
//!
//! ## Overview
//!
//! Every frame the host reports where each visible node was drawn, in draw order, as a
//! [`Region`]. The [`InputDispatcher`] resolves at most one hovered node from those regions
//! and decides which single node receives each [`InputEvent`](lazy_event_state::InputEvent).
//! It does not know anything about the nodes themselves; keys are opaque `Copy + Eq` values.
//!
//! ## Ordering
//!
//! Regions are hit in reverse draw order: when bounds overlap, the region added last (drawn
//! on top) wins. Two nodes are never hovered at the same time.
//!
//! ## Routing
//!
//! - Pointer moves and wheel events update hover; wheel and key events go to the hovered node.
//! - A press captures the hovered node. Drags and the matching release go to the captured
//!   node even if the pointer has left its bounds.
//! - While a node is captured it stays the hovered node.
//!
//! ## Example
//!
//! ```rust
//! use kurbo::{Point, Rect};
//! use lazy_event_state::{InputEvent, PointerButton};
//! use lazy_responder::InputDispatcher;
//!
//! let mut d = InputDispatcher::new();
//! d.add_region(1_u32, Rect::new(0.0, 0.0, 100.0, 20.0));
//! d.add_region(2_u32, Rect::new(0.0, 10.0, 100.0, 30.0));
//! d.end_frame();
//!
//! // Overlap: the later region wins.
//! let press = InputEvent::PointerPressed {
//!     position: Point::new(5.0, 15.0),
//!     button: PointerButton::Primary,
//! };
//! assert_eq!(d.route(&press).target, Some(2));
//!
//! // The drag stays with the captured node outside its bounds.
//! let drag = InputEvent::PointerDragged {
//!     position: Point::new(500.0, 500.0),
//!     previous: Point::new(5.0, 15.0),
//! };
//! assert_eq!(d.route(&drag).target, Some(2));
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod dispatcher;
pub mod region;

pub use dispatcher::{HoverChange, InputDispatcher, Routed};
pub use region::{Region, topmost};
