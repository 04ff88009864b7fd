// Copyright 2025 the Lazy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Lazy Event State: input vocabulary and per-control input state machines.
//!
//! This crate holds the pieces of input handling that do not need the node tree:
//!
//! - [`event`]: normalized pointer, wheel and key events produced by a host windowing layer,
//!   plus [`Modifiers`] and the [`Response`] flags a control reports back.
//! - [`precision`]: the [`PrecisionLadder`] of step sizes a numeric control walks through.
//! - [`numpad`]: the [`NumpadBuffer`] that accumulates typed digits until a timeout elapses.
//! - [`numeric`]: [`NumericInput`], the slider state machine combining dragging, wheel
//!   precision changes and buffered keyboard entry.
//!
//! Time is always supplied by the caller in milliseconds, so every state machine here is
//! deterministic and testable without a clock.
//!
//! ## Example
//!
//! ```rust
//! use lazy_event_state::{KeyEvent, NumericInput};
//!
//! let mut slider = NumericInput::new(0.0);
//! for (t, key) in [(0, '1'), (100, '2'), (200, '3')] {
//!     slider.key(&KeyEvent::char(key), t);
//! }
//! // Nothing is committed while the buffer is still active.
//! slider.update(300);
//! assert_eq!(slider.value(), 0.0);
//! // Once the keyboard buffer delay has elapsed the typed number is committed.
//! slider.update(800);
//! assert_eq!(slider.value(), 123.0);
//! assert_eq!(slider.step(), 1.0);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod event;
pub mod numeric;
pub mod numpad;
pub mod precision;

pub use event::{InputEvent, KeyCode, KeyEvent, Modifiers, PointerButton, Response};
pub use numeric::{InputState, NumericInput, ParseNumberError};
pub use numpad::{DEFAULT_BUFFER_DELAY_MS, NumpadBuffer};
pub use precision::PrecisionLadder;
