// Copyright 2025 the Lazy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Lazy GUI: declarative, path-addressed controls for creative coding.
//!
//! Call a getter such as [`Gui::slider`] with a path every frame and use the value it returns.
//! The control is created on first use, seeded from the latest save, and keeps its state
//! between frames. Input is routed to the single hovered control, finished edits are
//! undoable, and the whole tree can be saved and restored.
//!
//! - [`Gui`]: the context object. It owns the node tree, persisted state, undo history, the
//!   save directory and input routing.
//! - [`GuiConfig`]: settings, loadable from a partial JSON file.
//! - [`saves`]: the save-file operations and the folder that lists them.
//!
//! The host supplies geometry through [`Gui::set_bounds`] and paints through a
//! [`Surface`](lazy_tree::Surface); there is no window or layout engine here.
//!
//! ## Example
//!
//! ```rust
//! use kurbo::{Point, Rect};
//! use lazy_event_state::{InputEvent, KeyEvent};
//! use lazy_gui::{Gui, GuiConfig};
//!
//! let dir = std::env::temp_dir().join("lazy_gui_doc_example");
//! let mut gui = Gui::headless(GuiConfig::default().with_save_dir(&dir).with_load_latest_save(false));
//!
//! gui.begin_frame(0);
//! gui.slider("speed").unwrap();
//! gui.set_bounds("speed", Rect::new(0.0, 0.0, 200.0, 20.0));
//! gui.end_frame();
//!
//! // Hover the slider and type a number.
//! gui.handle_event(InputEvent::PointerMoved { position: Point::new(10.0, 10.0) });
//! for ch in ['4', '2'] {
//!     gui.handle_event(InputEvent::Key(KeyEvent::char(ch)));
//! }
//!
//! // The entry commits once the keyboard buffer delay has passed.
//! gui.begin_frame(1_000);
//! gui.end_frame();
//! assert_eq!(gui.slider("speed").unwrap(), 42.0);
//!
//! gui.undo();
//! assert_eq!(gui.slider("speed").unwrap(), 0.0);
//! ```

pub mod config;
pub mod gui;
pub mod saves;

pub use config::GuiConfig;
pub use gui::{COLOR_PREVIEW_NAME, Gui, SliderOptions};
pub use saves::{AUTOSAVE_ON_EXIT, CREATE_NEW_SAVE, SAVES_FOLDER};
