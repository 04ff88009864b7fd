// Copyright 2025 the Lazy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::Rect;
use lazy_event_state::{KeyEvent, Response};

use super::{Control, EventCx, Fields, read_str};
use crate::node::NodeHeader;
use crate::render::{
    Argb, DrawCx, Surface, background_fill, draw_name, draw_row_background, foreground_fill,
};

/// An ARGB color value, persisted as `AARRGGBB` hex.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ColorPicker {
    /// Current color.
    pub color: Argb,
}

impl ColorPicker {
    /// Create a picker holding `color`.
    pub fn new(color: Argb) -> Self {
        Self { color }
    }
}

impl Control for ColorPicker {
    fn draw_foreground(&self, header: &NodeHeader, cx: &DrawCx<'_>, surface: &mut dyn Surface) {
        draw_name(header, cx, surface);
        let side = cx.size.height * 0.6;
        let x1 = cx.size.width - cx.theme.padding;
        let y0 = (cx.size.height - side) * 0.5;
        let swatch = Rect::new(x1 - side, y0, x1, y0 + side);
        surface.fill_rect(swatch, self.color);
        surface.stroke_rect(swatch, foreground_fill(header, cx), 1.0);
    }

    fn on_key(&mut self, key: &KeyEvent, cx: &mut EventCx<'_>) -> Response {
        if key.is_shortcut('c') {
            cx.clipboard.set_string(self.color.to_hex());
            return Response::CONSUMED;
        }
        if key.is_shortcut('v') {
            let Some(text) = cx.clipboard.get_string() else {
                return Response::CONSUMED;
            };
            return match Argb::from_hex(&text) {
                Some(color) => {
                    self.color = color;
                    Response::CONSUMED | Response::VALUE_CHANGED | Response::ACTION_ENDED
                }
                None => {
                    log::warn!("paste ignored: {text:?} is not a hex color");
                    Response::CONSUMED
                }
            };
        }
        Response::empty()
    }

    fn expose_fields(&self, fields: &mut Fields) {
        fields.insert("hex".into(), self.color.to_hex().into());
    }

    fn apply_fields(&mut self, fields: &Fields, rejected: &mut Vec<String>) {
        if let Some(hex) = read_str(fields, "hex", rejected) {
            match Argb::from_hex(hex) {
                Some(color) => self.color = color,
                None => rejected.push("hex".into()),
            }
        }
    }

    fn printable_value(&self) -> String {
        self.color.to_hex()
    }
}

/// A swatch filled with its parent's color.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ColorPreview;

impl Control for ColorPreview {
    fn draw_background(&self, header: &NodeHeader, cx: &DrawCx<'_>, surface: &mut dyn Surface) {
        match cx.parent_color {
            Some(color) => surface.fill_rect(cx.local_rect(), color),
            None => draw_row_background(header, cx, surface),
        }
    }

    fn draw_foreground(&self, header: &NodeHeader, cx: &DrawCx<'_>, surface: &mut dyn Surface) {
        surface.stroke_rect(cx.local_rect(), background_fill(header, cx), 1.0);
    }
}
