// Copyright 2025 the Lazy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use lazy_event_state::Response;

use super::{Control, EventCx, Fields, Folder};
use crate::node::NodeHeader;
use crate::render::{DrawCx, Surface, draw_name, draw_value_right};

/// Names of the axis sliders a plot owns, in order.
pub const PLOT_AXES: [&str; 3] = ["x", "y", "z"];

/// A folder whose axis sliders together hold one vector.
///
/// The values live in the child sliders named by [`PLOT_AXES`]; the plot keeps its window
/// state and the text it shows for the vector.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Plot {
    /// Window state, persisted like a plain folder.
    pub window: Folder,
    summary: String,
}

impl Plot {
    /// Show `values`, one per declared axis.
    pub fn set_summary<S: AsRef<str>>(&mut self, values: &[S]) {
        self.summary.clear();
        for (i, value) in values.iter().enumerate() {
            if i > 0 {
                self.summary.push(',');
            }
            self.summary.push_str(value.as_ref());
        }
    }

    /// The vector as shown in the row.
    pub fn summary(&self) -> &str {
        &self.summary
    }
}

impl Control for Plot {
    fn draw_foreground(&self, header: &NodeHeader, cx: &DrawCx<'_>, surface: &mut dyn Surface) {
        draw_name(header, cx, surface);
        if !self.summary.is_empty() {
            draw_value_right(header, cx, surface, &self.summary);
        }
    }

    fn on_press(&mut self, cx: &mut EventCx<'_>) -> Response {
        self.window.on_press(cx)
    }

    fn expose_fields(&self, fields: &mut Fields) {
        self.window.expose_fields(fields);
    }

    fn apply_fields(&mut self, fields: &Fields, rejected: &mut Vec<String>) {
        self.window.apply_fields(fields, rejected);
    }
}
