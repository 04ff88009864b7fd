// Copyright 2025 the Lazy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Persistence errors and per-entry overlay diagnostics.

use std::fmt;
use std::path::PathBuf;

/// A save file could not be read or written.
///
/// In-memory state is never touched when this is returned.
#[derive(Debug)]
pub enum StateError {
    /// File system failure.
    Io {
        /// File or directory involved.
        path: PathBuf,
        /// Underlying error.
        source: std::io::Error,
    },
    /// The file is not a valid document.
    Json {
        /// File involved.
        path: PathBuf,
        /// Underlying error.
        source: serde_json::Error,
    },
}

impl StateError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn json(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        Self::Json {
            path: path.into(),
            source,
        }
    }

    /// True if the error is a missing file or directory.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Io { source, .. } if source.kind() == std::io::ErrorKind::NotFound)
    }
}

impl fmt::Display for StateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "I/O error on {}: {source}", path.display()),
            Self::Json { path, source } => {
                write!(f, "invalid save file {}: {source}", path.display())
            }
        }
    }
}

impl std::error::Error for StateError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Json { source, .. } => Some(source),
        }
    }
}

/// A persisted entry that could not be applied to its node.
///
/// These are logged and skipped; the node keeps its constructor defaults for the affected
/// fields.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum OverlayParseError {
    /// The entry was written by a different node class.
    ClassMismatch {
        /// Node path.
        path: String,
        /// Class of the live node.
        expected: String,
        /// Class recorded in the entry.
        found: String,
    },
    /// A field is present but its value is unusable.
    Field {
        /// Node path.
        path: String,
        /// Field name.
        field: String,
    },
}

impl fmt::Display for OverlayParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ClassMismatch {
                path,
                expected,
                found,
            } => write!(
                f,
                "saved entry at {path:?} is a {found}, the node is a {expected}"
            ),
            Self::Field { path, field } => {
                write!(f, "saved field {field:?} at {path:?} could not be applied")
            }
        }
    }
}

impl std::error::Error for OverlayParseError {}
