// Copyright 2025 the Lazy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Lazy Path: slash-delimited node addresses.
//!
//! Every node of a Lazy GUI tree is addressed by a path such as `"scene/light/intensity"`.
//! Segments are separated by an unescaped `/`. A backslash escapes the next character, so a
//! segment may contain a literal separator: `"units/m\/s"` has the two segments `units` and
//! `m/s`.
//!
//! The empty path denotes the root node. The root has no parent and its display name is
//! derived from the host application's identifier with [`humanize_identifier`].
//!
//! ```rust
//! use lazy_path::{name_of, parent_of, split};
//!
//! assert_eq!(split("scene/light/intensity"), vec!["scene", "light", "intensity"]);
//! assert_eq!(name_of("units/m\\/s"), "m/s");
//! assert_eq!(parent_of("scene/light/intensity").as_deref(), Some("scene/light"));
//! assert_eq!(parent_of("scene").as_deref(), Some(""));
//! assert_eq!(parent_of(""), None);
//! ```
//!
//! All functions are pure. Degenerate input such as `"/"` or `"//"` yields no segments and is
//! treated like the root path.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

/// Separates path segments.
pub const SEPARATOR: char = '/';

/// Escapes the character that follows it.
pub const ESCAPE: char = '\\';

/// Split a path into its raw segments.
///
/// Segments keep their escapes, so joining them with [`SEPARATOR`] reproduces the
/// normalized path. Empty segments (leading, trailing, or doubled separators) are dropped.
pub fn split(path: &str) -> Vec<&str> {
    let mut segments = Vec::new();
    let mut start = 0;
    let mut escaped = false;
    for (i, ch) in path.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        if ch == ESCAPE {
            escaped = true;
        } else if ch == SEPARATOR {
            if i > start {
                segments.push(&path[start..i]);
            }
            start = i + ch.len_utf8();
        }
    }
    if start < path.len() {
        segments.push(&path[start..]);
    }
    segments
}

/// Split a path into display segments with escapes removed.
pub fn segments(path: &str) -> Vec<String> {
    split(path).into_iter().map(unescape).collect()
}

/// Canonical form of `path`: raw segments joined by single separators.
pub fn normalize(path: &str) -> String {
    join_raw(&split(path))
}

/// The unescaped last segment of `path`, or an empty string for the root.
pub fn name_of(path: &str) -> String {
    split(path).last().map(|s| unescape(s)).unwrap_or_default()
}

/// The path with its last segment removed.
///
/// Returns `None` for the root path, and `Some("")` for a top-level path.
pub fn parent_of(path: &str) -> Option<String> {
    let segments = split(path);
    let (_, parent) = segments.split_last()?;
    Some(join_raw(parent))
}

/// Every proper ancestor of `path`, root first.
///
/// ```rust
/// assert_eq!(lazy_path::ancestors("a/b/c"), vec!["", "a", "a/b"]);
/// assert!(lazy_path::ancestors("").is_empty());
/// ```
pub fn ancestors(path: &str) -> Vec<String> {
    let segments = split(path);
    (0..segments.len())
        .map(|len| join_raw(&segments[..len]))
        .collect()
}

/// Append a display name to `parent`, escaping reserved characters in `name`.
pub fn join(parent: &str, name: &str) -> String {
    let escaped = escape_segment(name);
    let parent = normalize(parent);
    if parent.is_empty() {
        escaped
    } else {
        let mut out = parent;
        out.push(SEPARATOR);
        out.push_str(&escaped);
        out
    }
}

/// Escape `/` and `\` so `name` survives [`split`] as a single segment.
pub fn escape_segment(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    for ch in name.chars() {
        if ch == SEPARATOR || ch == ESCAPE {
            out.push(ESCAPE);
        }
        out.push(ch);
    }
    out
}

/// Remove escapes from a single raw segment.
///
/// A trailing lone escape character is dropped.
pub fn unescape(segment: &str) -> String {
    let mut out = String::with_capacity(segment.len());
    let mut chars = segment.chars();
    while let Some(ch) = chars.next() {
        if ch == ESCAPE {
            if let Some(next) = chars.next() {
                out.push(next);
            }
        } else {
            out.push(ch);
        }
    }
    out
}

/// Turn a type-style identifier into a lowercase, space-separated display name.
///
/// A space is inserted before every uppercase letter that is not the first character.
///
/// ```rust
/// assert_eq!(lazy_path::humanize_identifier("MyTestSketch"), "my test sketch");
/// assert_eq!(lazy_path::humanize_identifier("  "), "");
/// ```
pub fn humanize_identifier(identifier: &str) -> String {
    let identifier = identifier.trim();
    let mut out = String::with_capacity(identifier.len() + 4);
    for (i, ch) in identifier.chars().enumerate() {
        if i > 0 && ch.is_uppercase() && !out.ends_with(' ') {
            out.push(' ');
        }
        out.extend(ch.to_lowercase());
    }
    out
}

fn join_raw(segments: &[&str]) -> String {
    let mut out = String::new();
    for (i, segment) in segments.iter().enumerate() {
        if i > 0 {
            out.push(SEPARATOR);
        }
        out.push_str(segment);
    }
    out
}
