// Copyright 2025 the Lazy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use lazy_event_state::Response;

use super::{Control, EventCx};

/// A momentary button. Holds no persisted state.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Button {
    clicked: bool,
}

impl Button {
    /// Return whether the button was pressed since the last call, and reset it.
    pub fn take_clicked(&mut self) -> bool {
        core::mem::take(&mut self.clicked)
    }
}

impl Control for Button {
    fn on_press(&mut self, _cx: &mut EventCx<'_>) -> Response {
        self.clicked = true;
        Response::CONSUMED
    }
}
