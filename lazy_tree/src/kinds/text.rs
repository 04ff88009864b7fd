// Copyright 2025 the Lazy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use lazy_event_state::{KeyCode, KeyEvent, NumpadBuffer, Response};

use super::{Control, EventCx, Fields, read_str};

/// A single line of editable text.
///
/// Printable keys append, backspace removes the last character and delete clears the line.
/// Typing is one action: it ends once no key has arrived for the keyboard buffer delay.
#[derive(Clone, Debug, Default)]
pub struct Text {
    /// Current content.
    pub content: String,
    typing: NumpadBuffer,
}

impl Text {
    /// Create a text field.
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            typing: NumpadBuffer::default(),
        }
    }

    /// Quiet time after the last key before typing counts as finished.
    pub fn with_delay(mut self, delay_ms: u64) -> Self {
        self.typing.delay_ms = delay_ms;
        self
    }

    /// True while keys are still arriving within the delay.
    pub fn is_typing(&self, now_ms: u64) -> bool {
        self.typing.is_active(now_ms)
    }

    fn edited(&mut self, now_ms: u64) -> Response {
        self.typing.touch(now_ms);
        Response::CONSUMED | Response::VALUE_CHANGED
    }
}

impl Control for Text {
    fn on_key(&mut self, key: &KeyEvent, cx: &mut EventCx<'_>) -> Response {
        if key.is_shortcut('c') {
            cx.clipboard.set_string(self.content.clone());
            return Response::CONSUMED;
        }
        if key.is_shortcut('v') {
            return match cx.clipboard.get_string() {
                Some(text) => {
                    self.content = text;
                    self.typing.cancel();
                    Response::CONSUMED | Response::VALUE_CHANGED | Response::ACTION_ENDED
                }
                None => Response::CONSUMED,
            };
        }
        match key.code {
            KeyCode::Backspace => {
                if self.content.pop().is_some() {
                    self.edited(cx.now_ms)
                } else {
                    Response::CONSUMED
                }
            }
            KeyCode::Delete => {
                self.content.clear();
                self.edited(cx.now_ms)
            }
            _ => match key.typed_char() {
                Some(ch) if !ch.is_control() => {
                    self.content.push(ch);
                    self.edited(cx.now_ms)
                }
                _ => Response::empty(),
            },
        }
    }

    fn update(&mut self, now_ms: u64) -> Response {
        if !self.typing.is_ready_to_commit(now_ms) {
            return Response::empty();
        }
        self.typing.take_for_commit();
        Response::ACTION_ENDED
    }

    fn expose_fields(&self, fields: &mut Fields) {
        fields.insert("content".into(), self.content.clone().into());
    }

    fn apply_fields(&mut self, fields: &Fields, rejected: &mut Vec<String>) {
        if let Some(content) = read_str(fields, "content", rejected) {
            self.content = content.to_string();
        }
    }

    fn printable_value(&self) -> String {
        self.content.clone()
    }
}
