// Copyright 2025 the Lazy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The context object threaded through every frame.

use std::fmt;
use std::sync::Arc;

use hashbrown::HashMap;
use kurbo::{Rect, Vec2};
use lazy_event_state::{InputEvent, KeyEvent, NumericInput, Response};
use lazy_responder::InputDispatcher;
use lazy_state::{NodeEntry, SaveStore, StateOverlay, UndoRedoStore};
use lazy_tree::kinds::{
    Button, ColorPicker, ColorPreview, Folder, PLOT_AXES, Plot, Radio, Slider, Text, Toggle,
};
use lazy_tree::{
    Argb, Clipboard, DrawCx, EventCx, InMemoryClipboard, Node, NodeClass, NodeId, NodeKind,
    NodeRegistry, NodeType, Surface, Theme, TreeError,
};

use crate::config::GuiConfig;

/// Name of the child that previews a color node.
pub const COLOR_PREVIEW_NAME: &str = "preview";

/// Construction options of a float slider.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SliderOptions {
    /// Value before any edit or persisted state.
    pub default: f32,
    /// Lower bound.
    pub min: Option<f32>,
    /// Upper bound.
    pub max: Option<f32>,
    /// Drag along the vertical axis.
    pub vertical: bool,
}

impl SliderOptions {
    /// Unbounded options with `default`.
    pub fn new(default: f32) -> Self {
        Self {
            default,
            ..Self::default()
        }
    }

    /// Clamp the value to `[min, max]`.
    pub fn with_range(mut self, min: f32, max: f32) -> Self {
        self.min = Some(min);
        self.max = Some(max);
        self
    }

    /// Drag vertically.
    pub fn vertical(mut self) -> Self {
        self.vertical = true;
        self
    }

    fn build(self, config: &GuiConfig) -> NumericInput {
        let mut input = NumericInput::new(self.default)
            .with_ladder(config.ladder())
            .with_buffer_delay(config.keyboard_buffer_delay_ms);
        if self.min.is_some() || self.max.is_some() {
            input = input.with_bounds(
                self.min.unwrap_or(f32::NEG_INFINITY),
                self.max.unwrap_or(f32::INFINITY),
            );
        }
        input.vertical = self.vertical;
        input
    }
}

/// Declarative GUI context.
///
/// Owns the node tree, the persisted-state overlay, undo history, the save directory, and
/// input routing. The host drives it once per frame:
///
/// 1. [`begin_frame`](Self::begin_frame) with the current time,
/// 2. [`handle_event`](Self::handle_event) for each input event,
/// 3. declarations such as [`slider`](Self::slider) and [`set_bounds`](Self::set_bounds),
/// 4. [`end_frame`](Self::end_frame), then [`draw`](Self::draw).
pub struct Gui {
    pub(crate) config: GuiConfig,
    pub(crate) registry: NodeRegistry,
    pub(crate) overlay: StateOverlay,
    pub(crate) history: UndoRedoStore,
    pub(crate) saves: SaveStore,
    pub(crate) current_save: Option<String>,
    dispatcher: InputDispatcher<NodeId>,
    by_id: HashMap<NodeId, Arc<Node>>,
    /// Paths declared for the first time since the undo baseline was last extended.
    created: Vec<String>,
    clipboard: Box<dyn Clipboard>,
    theme: Theme,
    folders: Vec<String>,
    now_ms: u64,
}

impl fmt::Debug for Gui {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Gui")
            .field("app_name", &self.config.app_name)
            .field("frame", &self.registry.frame())
            .field("nodes", &self.registry.node_count())
            .field("current_save", &self.current_save)
            .field("now_ms", &self.now_ms)
            .finish_non_exhaustive()
    }
}

impl Gui {
    /// Create a context using `clipboard` for copy and paste.
    ///
    /// When [`GuiConfig::load_latest_save`] is set, the most recent save becomes the overlay
    /// that seeds every node created afterwards.
    pub fn new(config: GuiConfig, clipboard: impl Clipboard + 'static) -> Self {
        let registry =
            NodeRegistry::new(&config.app_name).with_pruning(config.prune_after_frames);
        let saves = SaveStore::new(config.save_dir.clone());
        let latest = if config.load_latest_save {
            saves.load_latest()
        } else {
            None
        };
        let (overlay, current_save) = match latest {
            Some((name, document)) => {
                log::debug!("seeding state from save {name:?}");
                (StateOverlay::from_document(document), Some(name))
            }
            None => (StateOverlay::new(), None),
        };
        overlay.apply_to_node(registry.root());

        let mut gui = Self {
            history: UndoRedoStore::new(config.undo_depth),
            config,
            registry,
            overlay,
            saves,
            current_save,
            dispatcher: InputDispatcher::new(),
            by_id: HashMap::new(),
            created: Vec::new(),
            clipboard: Box::new(clipboard),
            theme: Theme::default(),
            folders: Vec::new(),
            now_ms: 0,
        };
        gui.refresh_saves();
        gui
    }

    /// Create a context with a process-local clipboard.
    pub fn headless(config: GuiConfig) -> Self {
        Self::new(config, InMemoryClipboard::new())
    }

    /// The configuration this context was built with.
    pub fn config(&self) -> &GuiConfig {
        &self.config
    }

    /// The node tree.
    pub fn registry(&self) -> &NodeRegistry {
        &self.registry
    }

    /// Undo history.
    pub fn history(&self) -> &UndoRedoStore {
        &self.history
    }

    /// Colors used by [`draw`](Self::draw).
    pub fn theme_mut(&mut self) -> &mut Theme {
        &mut self.theme
    }

    /// Time of the current frame.
    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    /// Path of the hovered node.
    pub fn hovered_path(&self) -> Option<&str> {
        let id = self.dispatcher.hovered()?;
        self.by_id.get(&id).map(|n| n.path())
    }

    /// Name of the save the current state came from, if any.
    pub fn current_save(&self) -> Option<&str> {
        self.current_save.as_deref()
    }

    /// Start a frame at `now_ms`.
    pub fn begin_frame(&mut self, now_ms: u64) {
        self.now_ms = now_ms;
        self.registry.advance_frame();
        if !self.folders.is_empty() {
            log::warn!("{} folders left pushed at frame start", self.folders.len());
            self.folders.clear();
        }
    }

    /// Finish the frame: tick every node, record commits for undo, prune undeclared nodes and
    /// publish this frame's geometry for hit testing.
    pub fn end_frame(&mut self) {
        self.baseline_created_nodes();
        let mut committed = false;
        for node in self.registry.all_nodes() {
            committed |= node.update(self.now_ms).contains(Response::ACTION_ENDED);
        }
        self.touch_saves();
        if committed {
            self.history.mark_action_boundary(self.registry.root());
        } else if !self.history.has_baseline() {
            self.history
                .set_baseline(StateOverlay::save(self.registry.root()));
        }
        for node in self.registry.sweep() {
            self.forget(&node);
        }
        self.dispatcher.end_frame();
    }

    /// Prefix later declarations with `name` until the matching [`pop_folder`](Self::pop_folder).
    pub fn push_folder(&mut self, name: &str) {
        let path = self.resolve(name);
        self.folders.push(path);
    }

    /// End the innermost [`push_folder`](Self::push_folder).
    pub fn pop_folder(&mut self) {
        if self.folders.pop().is_none() {
            log::warn!("pop_folder without matching push_folder");
        }
    }

    /// Declare a folder and return whether it is open.
    pub fn folder(&mut self, path: &str) -> Result<bool, TreeError> {
        let node = self.declare(path, NodeClass::Folder, || {
            NodeKind::Folder(Folder::default())
        })?;
        Ok(node.with_kind(|k| k.as_folder_mut().is_some_and(|f| !f.closed)))
    }

    /// Declare a float slider starting at zero and return its value.
    pub fn slider(&mut self, path: &str) -> Result<f32, TreeError> {
        self.slider_with(path, SliderOptions::default())
    }

    /// Declare a float slider and return its value.
    ///
    /// `options` only matter when the node is created.
    pub fn slider_with(&mut self, path: &str, options: SliderOptions) -> Result<f32, TreeError> {
        let input = options.build(&self.config);
        let node = self.declare(path, NodeClass::Slider, || {
            NodeKind::Slider(Slider::new(input))
        })?;
        Ok(node.with_kind(|k| k.as_slider().map_or(0.0, Slider::value)))
    }

    /// Declare a whole-number slider and return its value.
    pub fn slider_int(&mut self, path: &str, default: i32) -> Result<i32, TreeError> {
        let input = SliderOptions::new(default as f32).build(&self.config).integral();
        let node = self.declare(path, NodeClass::SliderInt, || {
            NodeKind::Slider(Slider::new(input))
        })?;
        Ok(node.with_kind(|k| k.as_slider().map_or(0, |s| s.input().int_value())))
    }

    /// Overwrite a float slider's value, declaring it if needed.
    pub fn slider_set(&mut self, path: &str, value: f32) -> Result<(), TreeError> {
        let input = SliderOptions::new(value).build(&self.config);
        let node = self.declare(path, NodeClass::Slider, || {
            NodeKind::Slider(Slider::new(input))
        })?;
        node.with_kind(|k| {
            if let Some(slider) = k.as_slider_mut() {
                slider.input_mut().set_value(value);
            }
        });
        Ok(())
    }

    /// Declare a toggle and return its state.
    pub fn toggle(&mut self, path: &str, default: bool) -> Result<bool, TreeError> {
        let node = self.declare(path, NodeClass::Toggle, || {
            NodeKind::Toggle(Toggle::new(default))
        })?;
        Ok(node.with_kind(|k| k.as_toggle_mut().is_some_and(|t| t.value)))
    }

    /// Overwrite a toggle's state, declaring it if needed.
    pub fn toggle_set(&mut self, path: &str, value: bool) -> Result<(), TreeError> {
        let node = self.declare(path, NodeClass::Toggle, || {
            NodeKind::Toggle(Toggle::new(value))
        })?;
        node.with_kind(|k| {
            if let Some(toggle) = k.as_toggle_mut() {
                toggle.value = value;
            }
        });
        Ok(())
    }

    /// Declare a button and return whether it was pressed since the last call.
    pub fn button(&mut self, path: &str) -> Result<bool, TreeError> {
        let node = self.declare(path, NodeClass::Button, || {
            NodeKind::Button(Button::default())
        })?;
        Ok(node.with_kind(|k| k.as_button_mut().is_some_and(|b| b.take_clicked())))
    }

    /// Declare a text field and return its content.
    ///
    /// Typing ends as one undoable action once no key arrives for the keyboard buffer delay.
    pub fn text(&mut self, path: &str, default: &str) -> Result<String, TreeError> {
        let delay_ms = self.config.keyboard_buffer_delay_ms;
        let node = self.declare(path, NodeClass::Text, || {
            NodeKind::Text(Text::new(default).with_delay(delay_ms))
        })?;
        Ok(node.with_kind(|k| k.as_text_mut().map(|t| t.content.clone()).unwrap_or_default()))
    }

    /// Overwrite a text field's content, declaring it if needed.
    pub fn text_set(&mut self, path: &str, content: &str) -> Result<(), TreeError> {
        let delay_ms = self.config.keyboard_buffer_delay_ms;
        let node = self.declare(path, NodeClass::Text, || {
            NodeKind::Text(Text::new(content).with_delay(delay_ms))
        })?;
        node.with_kind(|k| {
            if let Some(text) = k.as_text_mut() {
                text.content = content.into();
            }
        });
        Ok(())
    }

    /// Declare a color with a preview child and return its value.
    pub fn color(&mut self, path: &str, default: Argb) -> Result<Argb, TreeError> {
        let node = self.declare(path, NodeClass::Color, || {
            NodeKind::Color(ColorPicker::new(default))
        })?;
        let preview = lazy_path::join(node.path(), COLOR_PREVIEW_NAME);
        let preview = self.registry.get_or_create(
            &preview,
            NodeClass::ColorPreview,
            || NodeKind::ColorPreview(ColorPreview),
            &self.overlay,
        )?;
        self.by_id.entry(preview.id()).or_insert(preview);
        Ok(node.with_kind(|k| k.color()).unwrap_or(default))
    }

    /// Declare a choice between `options` and return the selected one.
    pub fn radio(
        &mut self,
        path: &str,
        options: &[&str],
        default: &str,
    ) -> Result<String, TreeError> {
        let node = self.declare(path, NodeClass::Radio, || {
            NodeKind::Radio(Radio::new(
                options.iter().map(|o| (*o).to_owned()).collect(),
                default,
            ))
        })?;
        Ok(node.with_kind(|k| k.as_radio_mut().map(|r| r.value().to_owned()).unwrap_or_default()))
    }

    /// Declare a 2D vector and return its value.
    ///
    /// The plot is a folder owning unbounded `x` and `y` sliders. `default` only matters when
    /// they are created. Keys typed over the plot reach every axis.
    pub fn plot(&mut self, path: &str, default: Vec2) -> Result<Vec2, TreeError> {
        let [x, y] = self.declare_plot(path, to_f32([default.x, default.y]), false)?;
        Ok(Vec2::new(f64::from(x), f64::from(y)))
    }

    /// Overwrite a 2D vector, declaring it if needed.
    pub fn plot_set(&mut self, path: &str, value: Vec2) -> Result<(), TreeError> {
        self.declare_plot(path, to_f32([value.x, value.y]), true)?;
        Ok(())
    }

    /// Declare a 3D vector with `x`, `y` and `z` sliders and return its value.
    pub fn plot_xyz(&mut self, path: &str, default: [f32; 3]) -> Result<[f32; 3], TreeError> {
        self.declare_plot(path, default, false)
    }

    /// Place the node at `path` for this frame. Later calls draw on top.
    pub fn set_bounds(&mut self, path: &str, bounds: Rect) -> bool {
        let Some(node) = self.registry.get(&self.resolve(path)) else {
            return false;
        };
        node.set_bounds(bounds);
        self.dispatcher.add_region(node.id(), bounds);
        true
    }

    /// Route one input event to the hovered or captured node.
    ///
    /// ctrl+z and ctrl+y undo and redo regardless of hover. ctrl+c and ctrl+v over a folder
    /// or plot copy and paste the state of its whole subtree. Other keys over a plot go to each
    /// of its axis sliders.
    pub fn handle_event(&mut self, event: InputEvent) -> Response {
        if !self.history.has_baseline() {
            self.history
                .set_baseline(StateOverlay::save(self.registry.root()));
        }
        self.baseline_created_nodes();
        if let InputEvent::Key(key) = &event {
            if key.is_shortcut('z') {
                self.undo();
                return Response::CONSUMED;
            }
            if key.is_shortcut('y') {
                self.redo();
                return Response::CONSUMED;
            }
        }

        let routed = self.dispatcher.route(&event);
        let Some(node) = routed.target.and_then(|id| self.by_id.get(&id).cloned()) else {
            return Response::empty();
        };

        if let InputEvent::Key(key) = &event
            && node.node_type() == NodeType::Folder
        {
            let response = self.folder_key(&node, key);
            if !response.is_empty() {
                return response;
            }
        }

        let mut cx = EventCx {
            now_ms: self.now_ms,
            clipboard: &mut *self.clipboard,
        };
        let response = match event {
            InputEvent::PointerMoved { .. } | InputEvent::PointerLeft => Response::empty(),
            InputEvent::PointerPressed { .. } => node.press(&mut cx),
            InputEvent::PointerReleased { .. } => node.release(&mut cx),
            InputEvent::PointerDragged { .. } => {
                node.drag(event.drag_movement().unwrap_or_default(), &mut cx)
            }
            InputEvent::Wheel { notches, .. } => node.wheel(notches, &mut cx),
            InputEvent::Key(key) if node.class() == NodeClass::Plot => {
                forward_to_axes(&node, &key, &mut cx)
            }
            InputEvent::Key(key) => node.key(&key, &mut cx),
        };

        if response.contains(Response::ACTION_ENDED) {
            self.history.mark_action_boundary(self.registry.root());
        }
        if node.class() == NodeClass::Button && matches!(event, InputEvent::PointerPressed { .. })
        {
            self.on_save_button(&node);
        }
        response
    }

    /// Draw every placed node in tree order, skipping the content of closed folders.
    pub fn draw(&self, surface: &mut dyn Surface) {
        let cx = DrawCx::new(&self.theme, self.now_ms, self.dispatcher.hovered());
        draw_subtree(self.registry.root(), &cx, surface);
    }

    /// Restore the state before the last action. Returns `false` when there is nothing to undo.
    pub fn undo(&mut self) -> bool {
        let undone = self.history.undo(self.registry.root());
        log::debug!("undo: {undone}");
        undone
    }

    /// Reapply the last undone action. Returns `false` when there is nothing to redo.
    pub fn redo(&mut self) -> bool {
        let redone = self.history.redo(self.registry.root());
        log::debug!("redo: {redone}");
        redone
    }

    /// The indented tree dump of [`NodeRegistry::pretty_print`].
    pub fn pretty_print(&self) -> String {
        self.registry.pretty_print()
    }

    /// Full path of `path` under the innermost pushed folder.
    pub(crate) fn resolve(&self, path: &str) -> String {
        match self.folders.last() {
            Some(prefix) => {
                lazy_path::normalize(&format!("{prefix}{}{path}", lazy_path::SEPARATOR))
            }
            None => lazy_path::normalize(path),
        }
    }

    pub(crate) fn declare(
        &mut self,
        path: &str,
        class: NodeClass,
        factory: impl FnOnce() -> NodeKind,
    ) -> Result<Arc<Node>, TreeError> {
        let path = self.resolve(path);
        self.declare_at(&path, class, factory)
    }

    /// Like [`declare`](Self::declare) for a full path, ignoring pushed folders.
    pub(crate) fn declare_at(
        &mut self,
        path: &str,
        class: NodeClass,
        factory: impl FnOnce() -> NodeKind,
    ) -> Result<Arc<Node>, TreeError> {
        self.registry.ensure_ancestors(path, &self.overlay)?;
        let node = self
            .registry
            .get_or_create(path, class, factory, &self.overlay)?;
        if !self.by_id.contains_key(&node.id()) {
            for ancestor in lazy_path::ancestors(path) {
                if let Some(folder) = self.registry.get(&ancestor) {
                    self.by_id.entry(folder.id()).or_insert(folder);
                }
            }
            self.by_id.insert(node.id(), Arc::clone(&node));
            self.created.push(node.path().to_owned());
        }
        Ok(node)
    }

    /// Add nodes declared since the last call to the undo baseline, outermost first, so that
    /// undoing their first edit restores the state they were created with.
    fn baseline_created_nodes(&mut self) {
        let mut created = core::mem::take(&mut self.created);
        if created.is_empty() || !self.history.has_baseline() {
            return;
        }
        created.sort();
        for path in &created {
            let entry = self
                .registry
                .get(path)
                .and_then(|node| NodeEntry::capture(&node));
            if let Some(entry) = entry
                && self.history.fold_into_baseline(entry)
            {
                log::trace!("added {path:?} to the undo baseline");
            }
        }
    }

    fn declare_plot<const N: usize>(
        &mut self,
        path: &str,
        mut values: [f32; N],
        overwrite: bool,
    ) -> Result<[f32; N], TreeError> {
        let plot = self.declare(path, NodeClass::Plot, || NodeKind::Plot(Plot::default()))?;
        let now_ms = self.now_ms;
        let mut shown = Vec::with_capacity(N);
        for (axis, value) in PLOT_AXES.iter().zip(values.iter_mut()) {
            let input = SliderOptions::new(*value).build(&self.config);
            let slider = self.declare_at(
                &lazy_path::join(plot.path(), axis),
                NodeClass::Slider,
                || NodeKind::Slider(Slider::new(input)),
            )?;
            slider.with_kind(|k| {
                if let Some(slider) = k.as_slider_mut() {
                    if overwrite {
                        slider.input_mut().set_value(*value);
                    }
                    *value = slider.value();
                    shown.push(slider.input().display_value(now_ms));
                }
            });
        }
        plot.with_kind(|k| {
            if let Some(plot) = k.as_plot_mut() {
                plot.set_summary(&shown);
            }
        });
        Ok(values)
    }

    pub(crate) fn forget(&mut self, node: &Node) {
        self.dispatcher.forget(node.id());
        self.by_id.remove(&node.id());
    }

    fn folder_key(&mut self, folder: &Arc<Node>, key: &KeyEvent) -> Response {
        if key.is_shortcut('c') {
            if let Some(entry) = StateOverlay::capture_subtree(folder) {
                match serde_json::to_string_pretty(&entry) {
                    Ok(json) => self.clipboard.set_string(json),
                    Err(err) => log::warn!("could not copy {:?}: {err}", folder.path()),
                }
            }
            return Response::CONSUMED;
        }
        if key.is_shortcut('v') {
            let Some(text) = self.clipboard.get_string() else {
                return Response::CONSUMED;
            };
            let entry: NodeEntry = match serde_json::from_str(&text) {
                Ok(entry) => entry,
                Err(err) => {
                    log::warn!("paste into {:?} ignored: {err}", folder.path());
                    return Response::CONSUMED;
                }
            };
            let applied = StateOverlay::apply_subtree(&entry, folder);
            log::debug!("pasted {applied} entries into {:?}", folder.path());
            self.history.mark_action_boundary(self.registry.root());
            return Response::CONSUMED | Response::VALUE_CHANGED | Response::ACTION_ENDED;
        }
        Response::empty()
    }
}

fn forward_to_axes(plot: &Node, key: &KeyEvent, cx: &mut EventCx<'_>) -> Response {
    let mut response = Response::empty();
    for axis in PLOT_AXES {
        if let Some(slider) = plot.find_child_by_name(axis) {
            response |= slider.key(key, cx);
        }
    }
    response
}

#[allow(
    clippy::cast_possible_truncation,
    reason = "Axis sliders hold f32 like every other slider."
)]
fn to_f32<const N: usize>(values: [f64; N]) -> [f32; N] {
    values.map(|v| v as f32)
}

fn draw_subtree(node: &Node, cx: &DrawCx<'_>, surface: &mut dyn Surface) {
    if !node.is_root() && node.bounds().area() > 0.0 {
        node.draw(cx, surface);
    }
    if node.with_kind(|k| k.is_closed()) {
        return;
    }
    for child in node.children().iter() {
        draw_subtree(child, cx, surface);
    }
}
