// Copyright 2025 the Lazy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::Point;
use lazy_event_state::Response;

use super::{Control, EventCx, Fields, read_bool, read_f64};
use crate::node::NodeHeader;
use crate::render::{DrawCx, Surface, draw_name, draw_value_right};

/// Window state of a folder.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Folder {
    /// Collapsed.
    pub closed: bool,
    /// Window position.
    pub position: Point,
}

impl Control for Folder {
    fn draw_foreground(&self, header: &NodeHeader, cx: &DrawCx<'_>, surface: &mut dyn Surface) {
        draw_name(header, cx, surface);
        draw_value_right(header, cx, surface, if self.closed { "+" } else { "-" });
    }

    fn on_press(&mut self, _cx: &mut EventCx<'_>) -> Response {
        self.closed = !self.closed;
        Response::CONSUMED | Response::VALUE_CHANGED
    }

    fn expose_fields(&self, fields: &mut Fields) {
        fields.insert("closed".into(), self.closed.into());
        fields.insert("posX".into(), self.position.x.into());
        fields.insert("posY".into(), self.position.y.into());
    }

    fn apply_fields(&mut self, fields: &Fields, rejected: &mut Vec<String>) {
        if let Some(closed) = read_bool(fields, "closed", rejected) {
            self.closed = closed;
        }
        if let Some(x) = read_f64(fields, "posX", rejected) {
            self.position.x = x;
        }
        if let Some(y) = read_f64(fields, "posY", rejected) {
            self.position.y = y;
        }
    }
}
