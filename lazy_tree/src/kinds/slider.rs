// Copyright 2025 the Lazy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Rect, Vec2};
use lazy_event_state::numeric::format_value;
use lazy_event_state::{KeyEvent, NumericInput, Response};

use super::{Control, EventCx, Fields, read_f64, read_u64};
use crate::node::NodeHeader;
use crate::render::{DrawCx, Surface, content_fill, draw_row_background};

/// A numeric slider, float or whole-number depending on its input.
#[derive(Clone, Debug)]
pub struct Slider {
    input: NumericInput,
}

impl Slider {
    /// Wrap a configured input.
    pub fn new(input: NumericInput) -> Self {
        Self { input }
    }

    /// The input state machine.
    pub fn input(&self) -> &NumericInput {
        &self.input
    }

    /// The input state machine, mutably.
    pub fn input_mut(&mut self) -> &mut NumericInput {
        &mut self.input
    }

    /// Current value.
    pub fn value(&self) -> f32 {
        self.input.value()
    }
}

impl Control for Slider {
    fn draw_background(&self, header: &NodeHeader, cx: &DrawCx<'_>, surface: &mut dyn Surface) {
        draw_row_background(header, cx, surface);
        if let Some(t) = self.input.normalized() {
            let width = cx.size.width * f64::from(t);
            surface.fill_rect(
                Rect::new(0.0, 0.0, width, cx.size.height),
                content_fill(header, cx),
            );
        }
    }

    fn display_value(&self, now_ms: u64) -> String {
        self.input.display_with_cursor(now_ms)
    }

    fn on_press(&mut self, _cx: &mut EventCx<'_>) -> Response {
        self.input.press()
    }

    fn on_release(&mut self, _cx: &mut EventCx<'_>) -> Response {
        self.input.release()
    }

    fn on_drag(&mut self, movement: Vec2, _cx: &mut EventCx<'_>) -> Response {
        self.input.drag(movement)
    }

    fn on_key(&mut self, key: &KeyEvent, cx: &mut EventCx<'_>) -> Response {
        if key.is_shortcut('c') {
            cx.clipboard.set_string(self.input.copy_text(cx.now_ms));
            return Response::CONSUMED;
        }
        if key.is_shortcut('v') {
            let Some(text) = cx.clipboard.get_string() else {
                return Response::CONSUMED;
            };
            return match self.input.paste(&text) {
                Ok(response) => response,
                Err(err) => {
                    log::warn!("paste ignored: {err}");
                    Response::CONSUMED
                }
            };
        }
        self.input.key(key, cx.now_ms)
    }

    fn on_wheel(&mut self, notches: i32, _cx: &mut EventCx<'_>) -> Response {
        self.input.wheel(notches)
    }

    fn update(&mut self, now_ms: u64) -> Response {
        self.input.update(now_ms)
    }

    fn expose_fields(&self, fields: &mut Fields) {
        fields.insert("valueFloat".into(), f64::from(self.input.value()).into());
        fields.insert(
            "currentPrecisionIndex".into(),
            (self.input.precision_index() as u64).into(),
        );
        fields.insert(
            "valueFloatPrecision".into(),
            f64::from(self.input.step()).into(),
        );
    }

    #[allow(
        clippy::cast_possible_truncation,
        reason = "Persisted values were written from f32."
    )]
    fn apply_fields(&mut self, fields: &Fields, rejected: &mut Vec<String>) {
        if let Some(index) = read_u64(fields, "currentPrecisionIndex", rejected) {
            let index = usize::try_from(index).unwrap_or(usize::MAX);
            self.input.set_precision_index(index);
        } else if let Some(step) = read_f64(fields, "valueFloatPrecision", rejected) {
            match self.input.ladder().index_of(step as f32) {
                Some(index) => self.input.set_precision_index(index),
                None => rejected.push("valueFloatPrecision".into()),
            }
        }
        if let Some(value) = read_f64(fields, "valueFloat", rejected) {
            self.input.set_value(value as f32);
        }
    }

    fn printable_value(&self) -> String {
        format_value(
            self.input.value(),
            self.input.step(),
            self.input.is_integral(),
        )
    }
}
