// Copyright 2025 the Lazy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Node kinds and the capability interface they share.
//!
//! Each kind is a plain state struct implementing [`Control`]. Every method has a default, so a
//! kind only overrides what it reacts to. Behavior common to all kinds, such as hover-based
//! colors, lives in free functions in [`render`](crate::render) that take the node header.
//!
//! Fields are exposed as a flat name to JSON value map. A kind writes every persisted field in
//! [`Control::expose_fields`] and reads them back in [`Control::apply_fields`], where a missing
//! key is silently skipped and a present but unusable value is reported as rejected.

use std::fmt;

use kurbo::Vec2;
use lazy_event_state::{KeyEvent, Response};
use serde_json::Value;

use crate::clipboard::Clipboard;
use crate::node::{NodeClass, NodeHeader};
use crate::render::{Argb, DrawCx, Surface, draw_name, draw_row_background, draw_value_right};

mod button;
mod color;
mod folder;
mod plot;
mod radio;
mod slider;
mod text;
mod toggle;

pub use button::Button;
pub use color::{ColorPicker, ColorPreview};
pub use folder::Folder;
pub use plot::{PLOT_AXES, Plot};
pub use radio::Radio;
pub use slider::Slider;
pub use text::Text;
pub use toggle::Toggle;

/// Exposed fields of one node.
pub type Fields = serde_json::Map<String, Value>;

/// Collaborators available while a node handles an event.
pub struct EventCx<'a> {
    /// Event time in milliseconds.
    pub now_ms: u64,
    /// Host clipboard.
    pub clipboard: &'a mut dyn Clipboard,
}

impl fmt::Debug for EventCx<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventCx")
            .field("now_ms", &self.now_ms)
            .finish_non_exhaustive()
    }
}

/// Capabilities of a node kind.
pub trait Control {
    /// Paint behind the content.
    fn draw_background(&self, header: &NodeHeader, cx: &DrawCx<'_>, surface: &mut dyn Surface) {
        draw_row_background(header, cx, surface);
    }

    /// Paint the name and value.
    fn draw_foreground(&self, header: &NodeHeader, cx: &DrawCx<'_>, surface: &mut dyn Surface) {
        draw_name(header, cx, surface);
        let value = self.display_value(cx.now_ms);
        if !value.is_empty() {
            draw_value_right(header, cx, surface, &value);
        }
    }

    /// Value text shown in the row.
    fn display_value(&self, _now_ms: u64) -> String {
        self.printable_value()
    }

    /// Pointer pressed.
    fn on_press(&mut self, _cx: &mut EventCx<'_>) -> Response {
        Response::empty()
    }

    /// Pointer released.
    fn on_release(&mut self, _cx: &mut EventCx<'_>) -> Response {
        Response::empty()
    }

    /// Pointer dragged by `movement` while pressed.
    fn on_drag(&mut self, _movement: Vec2, _cx: &mut EventCx<'_>) -> Response {
        Response::empty()
    }

    /// Key pressed while hovered.
    fn on_key(&mut self, _key: &KeyEvent, _cx: &mut EventCx<'_>) -> Response {
        Response::empty()
    }

    /// Wheel turned while hovered.
    fn on_wheel(&mut self, _notches: i32, _cx: &mut EventCx<'_>) -> Response {
        Response::empty()
    }

    /// Per-frame tick.
    fn update(&mut self, _now_ms: u64) -> Response {
        Response::empty()
    }

    /// Write persisted fields.
    fn expose_fields(&self, _fields: &mut Fields) {}

    /// Read persisted fields, pushing the names of unusable ones onto `rejected`.
    fn apply_fields(&mut self, _fields: &Fields, _rejected: &mut Vec<String>) {}

    /// Short value text for tree dumps. Empty for kinds without a value.
    fn printable_value(&self) -> String {
        String::new()
    }
}

/// Kind-specific state of a node.
#[derive(Clone, Debug)]
pub enum NodeKind {
    /// A folder.
    Folder(Folder),
    /// A float or whole-number slider.
    Slider(Slider),
    /// A boolean switch.
    Toggle(Toggle),
    /// A momentary button.
    Button(Button),
    /// A line of text.
    Text(Text),
    /// A color.
    Color(ColorPicker),
    /// A choice between options.
    Radio(Radio),
    /// A preview of the parent's color.
    ColorPreview(ColorPreview),
    /// A vector edited through axis sliders.
    Plot(Plot),
}

impl NodeKind {
    /// The class this state belongs to.
    pub fn class(&self) -> NodeClass {
        match self {
            Self::Folder(_) => NodeClass::Folder,
            Self::Slider(s) if s.input().is_integral() => NodeClass::SliderInt,
            Self::Slider(_) => NodeClass::Slider,
            Self::Toggle(_) => NodeClass::Toggle,
            Self::Button(_) => NodeClass::Button,
            Self::Text(_) => NodeClass::Text,
            Self::Color(_) => NodeClass::Color,
            Self::Radio(_) => NodeClass::Radio,
            Self::ColorPreview(_) => NodeClass::ColorPreview,
            Self::Plot(_) => NodeClass::Plot,
        }
    }

    /// The shared capability interface.
    pub fn control(&self) -> &dyn Control {
        match self {
            Self::Folder(k) => k,
            Self::Slider(k) => k,
            Self::Toggle(k) => k,
            Self::Button(k) => k,
            Self::Text(k) => k,
            Self::Color(k) => k,
            Self::Radio(k) => k,
            Self::ColorPreview(k) => k,
            Self::Plot(k) => k,
        }
    }

    /// The shared capability interface, mutably.
    pub fn control_mut(&mut self) -> &mut dyn Control {
        match self {
            Self::Folder(k) => k,
            Self::Slider(k) => k,
            Self::Toggle(k) => k,
            Self::Button(k) => k,
            Self::Text(k) => k,
            Self::Color(k) => k,
            Self::Radio(k) => k,
            Self::ColorPreview(k) => k,
            Self::Plot(k) => k,
        }
    }

    /// Folder state.
    pub fn as_folder_mut(&mut self) -> Option<&mut Folder> {
        match self {
            Self::Folder(k) => Some(k),
            _ => None,
        }
    }

    /// Plot state, mutably.
    pub fn as_plot_mut(&mut self) -> Option<&mut Plot> {
        match self {
            Self::Plot(k) => Some(k),
            _ => None,
        }
    }

    /// True for a collapsed folder or plot.
    pub fn is_closed(&self) -> bool {
        match self {
            Self::Folder(k) => k.closed,
            Self::Plot(k) => k.window.closed,
            _ => false,
        }
    }

    /// Slider state.
    pub fn as_slider(&self) -> Option<&Slider> {
        match self {
            Self::Slider(k) => Some(k),
            _ => None,
        }
    }

    /// Slider state, mutably.
    pub fn as_slider_mut(&mut self) -> Option<&mut Slider> {
        match self {
            Self::Slider(k) => Some(k),
            _ => None,
        }
    }

    /// Toggle state, mutably.
    pub fn as_toggle_mut(&mut self) -> Option<&mut Toggle> {
        match self {
            Self::Toggle(k) => Some(k),
            _ => None,
        }
    }

    /// Button state, mutably.
    pub fn as_button_mut(&mut self) -> Option<&mut Button> {
        match self {
            Self::Button(k) => Some(k),
            _ => None,
        }
    }

    /// Text state, mutably.
    pub fn as_text_mut(&mut self) -> Option<&mut Text> {
        match self {
            Self::Text(k) => Some(k),
            _ => None,
        }
    }

    /// Color picker state, mutably.
    pub fn as_color_mut(&mut self) -> Option<&mut ColorPicker> {
        match self {
            Self::Color(k) => Some(k),
            _ => None,
        }
    }

    /// Radio state, mutably.
    pub fn as_radio_mut(&mut self) -> Option<&mut Radio> {
        match self {
            Self::Radio(k) => Some(k),
            _ => None,
        }
    }

    /// The color held by a color picker.
    pub fn color(&self) -> Option<Argb> {
        match self {
            Self::Color(k) => Some(k.color),
            _ => None,
        }
    }
}

fn read<'f>(fields: &'f Fields, key: &str) -> Option<&'f Value> {
    fields.get(key)
}

fn reject<T>(key: &str, rejected: &mut Vec<String>) -> Option<T> {
    rejected.push(key.to_string());
    None
}

pub(crate) fn read_f64(fields: &Fields, key: &str, rejected: &mut Vec<String>) -> Option<f64> {
    let value = read(fields, key)?;
    value.as_f64().or_else(|| reject(key, rejected))
}

pub(crate) fn read_u64(fields: &Fields, key: &str, rejected: &mut Vec<String>) -> Option<u64> {
    let value = read(fields, key)?;
    value.as_u64().or_else(|| reject(key, rejected))
}

pub(crate) fn read_bool(fields: &Fields, key: &str, rejected: &mut Vec<String>) -> Option<bool> {
    let value = read(fields, key)?;
    value.as_bool().or_else(|| reject(key, rejected))
}

pub(crate) fn read_str<'f>(
    fields: &'f Fields,
    key: &str,
    rejected: &mut Vec<String>,
) -> Option<&'f str> {
    let value = read(fields, key)?;
    value.as_str().or_else(|| reject(key, rejected))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fields(value: Value) -> Fields {
        match value {
            Value::Object(map) => map,
            _ => unreachable!("test fields are objects"),
        }
    }

    #[test]
    fn readers_skip_missing_and_reject_mismatched() {
        let f = fields(json!({ "a": 1.5, "b": "text", "c": true }));
        let mut rejected = Vec::new();
        assert_eq!(read_f64(&f, "a", &mut rejected), Some(1.5));
        assert_eq!(read_f64(&f, "missing", &mut rejected), None);
        assert!(rejected.is_empty());
        assert_eq!(read_bool(&f, "b", &mut rejected), None);
        assert_eq!(read_str(&f, "b", &mut rejected), Some("text"));
        assert_eq!(read_u64(&f, "a", &mut rejected), None);
        assert_eq!(rejected, vec!["b".to_string(), "a".to_string()]);
    }

    #[test]
    fn kind_reports_its_class() {
        let int = NodeKind::Slider(Slider::new(lazy_event_state::NumericInput::new(1.0).integral()));
        assert_eq!(int.class(), NodeClass::SliderInt);
        let float = NodeKind::Slider(Slider::new(lazy_event_state::NumericInput::new(1.0)));
        assert_eq!(float.class(), NodeClass::Slider);
        assert_eq!(NodeKind::Folder(Folder::default()).class(), NodeClass::Folder);
        let plot = NodeKind::Plot(Plot::default());
        assert_eq!(plot.class(), NodeClass::Plot);
        assert!(plot.class().accepts_children());
        assert!(!plot.is_closed());
    }
}
