// Copyright 2025 the Lazy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use lazy_event_state::Response;

use super::{Control, EventCx, Fields, read_str};

/// One string chosen from a fixed list. Each click selects the next option.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Radio {
    options: Vec<String>,
    selected: usize,
}

impl Radio {
    /// Create a radio over `options`, selecting `default` if it is one of them.
    pub fn new(options: Vec<String>, default: &str) -> Self {
        let selected = options.iter().position(|o| o == default).unwrap_or(0);
        Self { options, selected }
    }

    /// Available options.
    pub fn options(&self) -> &[String] {
        &self.options
    }

    /// The selected option, or an empty string when there are no options.
    pub fn value(&self) -> &str {
        self.options.get(self.selected).map_or("", String::as_str)
    }

    /// Select `value`. Returns false if it is not an option.
    pub fn select(&mut self, value: &str) -> bool {
        match self.options.iter().position(|o| o == value) {
            Some(index) => {
                self.selected = index;
                true
            }
            None => false,
        }
    }
}

impl Control for Radio {
    fn on_press(&mut self, _cx: &mut EventCx<'_>) -> Response {
        if self.options.len() < 2 {
            return Response::CONSUMED;
        }
        self.selected = (self.selected + 1) % self.options.len();
        Response::CONSUMED | Response::VALUE_CHANGED | Response::ACTION_ENDED
    }

    fn expose_fields(&self, fields: &mut Fields) {
        fields.insert("valueString".into(), self.value().into());
    }

    fn apply_fields(&mut self, fields: &Fields, rejected: &mut Vec<String>) {
        if let Some(value) = read_str(fields, "valueString", rejected)
            && !self.select(value)
        {
            rejected.push("valueString".into());
        }
    }

    fn printable_value(&self) -> String {
        self.value().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clipboard::InMemoryClipboard;

    #[test]
    fn clicks_cycle_and_unknown_values_are_rejected() {
        let mut radio = Radio::new(vec!["a".into(), "b".into(), "c".into()], "b");
        let mut clipboard = InMemoryClipboard::new();
        let mut cx = EventCx {
            now_ms: 0,
            clipboard: &mut clipboard,
        };
        radio.on_press(&mut cx);
        assert_eq!(radio.value(), "c");
        radio.on_press(&mut cx);
        assert_eq!(radio.value(), "a");

        let mut fields = Fields::new();
        fields.insert("valueString".into(), "zzz".into());
        let mut rejected = Vec::new();
        radio.apply_fields(&fields, &mut rejected);
        assert_eq!(radio.value(), "a");
        assert_eq!(rejected, vec!["valueString".to_string()]);
    }
}
