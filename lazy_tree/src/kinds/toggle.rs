// Copyright 2025 the Lazy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::Rect;
use lazy_event_state::Response;

use super::{Control, EventCx, Fields, read_bool};
use crate::node::NodeHeader;
use crate::render::{DrawCx, Surface, content_fill, draw_name, foreground_fill};

/// A boolean switch flipped by a click.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Toggle {
    /// Current state.
    pub value: bool,
}

impl Toggle {
    /// Create a switch in the given state.
    pub fn new(value: bool) -> Self {
        Self { value }
    }
}

impl Control for Toggle {
    fn draw_foreground(&self, header: &NodeHeader, cx: &DrawCx<'_>, surface: &mut dyn Surface) {
        draw_name(header, cx, surface);
        let side = cx.size.height * 0.5;
        let x1 = cx.size.width - cx.theme.padding;
        let y0 = (cx.size.height - side) * 0.5;
        let knob = Rect::new(x1 - side, y0, x1, y0 + side);
        if self.value {
            surface.fill_rect(knob, content_fill(header, cx));
        }
        surface.stroke_rect(knob, foreground_fill(header, cx), 1.0);
    }

    fn on_press(&mut self, _cx: &mut EventCx<'_>) -> Response {
        self.value = !self.value;
        Response::CONSUMED | Response::VALUE_CHANGED | Response::ACTION_ENDED
    }

    fn expose_fields(&self, fields: &mut Fields) {
        fields.insert("valueBoolean".into(), self.value.into());
    }

    fn apply_fields(&mut self, fields: &Fields, rejected: &mut Vec<String>) {
        if let Some(value) = read_bool(fields, "valueBoolean", rejected) {
            self.value = value;
        }
    }

    fn printable_value(&self) -> String {
        self.value.to_string()
    }
}
