// Copyright 2025 the Lazy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Keyboard number entry buffer.
//!
//! Typed digits accumulate in a [`NumpadBuffer`] instead of changing a control's value on
//! every keystroke. The buffer is *active* while the time since the last accepted key is
//! below the configured delay. A key arriving after the delay starts a fresh entry
//! (*replace mode*); a key arriving within it appends.

use alloc::string::String;

/// Default keyboard buffer delay in milliseconds.
pub const DEFAULT_BUFFER_DELAY_MS: u64 = 500;

/// Transient text accumulator for direct numeric entry.
#[derive(Clone, Debug)]
pub struct NumpadBuffer {
    text: String,
    last_input_ms: Option<u64>,
    /// Time after the last accepted key during which further keys append.
    pub delay_ms: u64,
    /// Set by input, cleared once the entry has been committed.
    pending: bool,
}

impl Default for NumpadBuffer {
    fn default() -> Self {
        Self::new(DEFAULT_BUFFER_DELAY_MS)
    }
}

impl NumpadBuffer {
    /// Create an empty buffer with the given delay.
    pub fn new(delay_ms: u64) -> Self {
        Self {
            text: String::new(),
            last_input_ms: None,
            delay_ms,
            pending: false,
        }
    }

    /// Current buffer contents.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// True while the last accepted key is younger than the delay.
    pub fn is_active(&self, now_ms: u64) -> bool {
        self.last_input_ms
            .is_some_and(|last| now_ms.saturating_sub(last) < self.delay_ms)
    }

    /// True when the next key should start a fresh entry.
    pub fn is_replace_mode(&self, now_ms: u64) -> bool {
        !self.is_active(now_ms)
    }

    /// True once the buffer went quiet with an uncommitted entry.
    pub fn is_ready_to_commit(&self, now_ms: u64) -> bool {
        self.pending && !self.is_active(now_ms)
    }

    /// Record an accepted key at `now_ms`.
    pub fn touch(&mut self, now_ms: u64) {
        self.last_input_ms = Some(now_ms);
        self.pending = true;
    }

    /// Replace the contents with a single character.
    pub fn replace(&mut self, ch: char) {
        self.text.clear();
        self.text.push(ch);
    }

    /// Append a character.
    pub fn push(&mut self, ch: char) {
        self.text.push(ch);
    }

    /// Append a decimal point unless one is already present, prefixing `0` on an empty buffer.
    pub fn push_decimal_separator(&mut self) {
        if self.text.is_empty() {
            self.text.push('0');
        }
        if !self.text.contains('.') {
            self.text.push('.');
        }
    }

    /// Drop the contents.
    pub fn clear(&mut self) {
        self.text.clear();
    }

    /// Finish the entry and return the text to parse.
    ///
    /// A dangling decimal point gets a trailing `0`.
    pub fn take_for_commit(&mut self) -> String {
        self.pending = false;
        if self.text.ends_with('.') {
            self.text.push('0');
        }
        self.text.clone()
    }

    /// Forget any entry in progress without committing it.
    pub fn cancel(&mut self) {
        self.pending = false;
        self.last_input_ms = None;
        self.text.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn activity_follows_delay() {
        let mut buf = NumpadBuffer::new(500);
        assert!(!buf.is_active(0));
        assert!(buf.is_replace_mode(0));
        buf.touch(1000);
        assert!(buf.is_active(1499));
        assert!(!buf.is_active(1500));
        assert!(buf.is_replace_mode(1600));
    }

    #[test]
    fn decimal_separator_only_once() {
        let mut buf = NumpadBuffer::default();
        buf.push_decimal_separator();
        buf.push('5');
        buf.push_decimal_separator();
        assert_eq!(buf.text(), "0.5");
    }

    #[test]
    fn commit_clears_pending_and_completes_fraction() {
        let mut buf = NumpadBuffer::new(100);
        buf.touch(0);
        buf.replace('7');
        buf.push_decimal_separator();
        assert!(!buf.is_ready_to_commit(50));
        assert!(buf.is_ready_to_commit(100));
        assert_eq!(buf.take_for_commit(), "7.0");
        assert!(!buf.is_ready_to_commit(200));
    }
}
