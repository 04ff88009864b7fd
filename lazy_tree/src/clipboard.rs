// Copyright 2025 the Lazy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Clipboard collaborator used by copy and paste key bindings.

/// Text clipboard provided by the host.
pub trait Clipboard {
    /// Current clipboard text, if any.
    fn get_string(&mut self) -> Option<String>;
    /// Replace the clipboard text.
    fn set_string(&mut self, text: String);
}

/// A process-local clipboard for tests and headless hosts.
#[derive(Clone, Debug, Default)]
pub struct InMemoryClipboard {
    content: Option<String>,
}

impl InMemoryClipboard {
    /// Create an empty clipboard.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current content without consuming it.
    pub fn peek(&self) -> Option<&str> {
        self.content.as_deref()
    }
}

impl Clipboard for InMemoryClipboard {
    fn get_string(&mut self) -> Option<String> {
        self.content.clone()
    }

    fn set_string(&mut self, text: String) {
        self.content = Some(text);
    }
}
