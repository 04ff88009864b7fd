// Copyright 2025 the Lazy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Errors reported to the code declaring a node.

use std::fmt;

use crate::node::NodeClass;

/// A declaration that could not be satisfied.
///
/// Each error aborts only the one declaration that caused it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TreeError {
    /// A node of a different class already lives at the path.
    PathConflict {
        /// Normalized path of the declaration.
        path: String,
        /// Class of the live node.
        existing: NodeClass,
        /// Class that was requested.
        requested: NodeClass,
    },
    /// No node exists at the parent path.
    OrphanNode {
        /// Normalized path of the declaration.
        path: String,
        /// The missing parent path.
        parent: String,
    },
    /// The node at the parent path cannot hold children.
    NotAContainer {
        /// Normalized path of the declaration.
        path: String,
        /// Path of the parent node.
        parent: String,
        /// Class of the parent node.
        class: NodeClass,
    },
}

impl fmt::Display for TreeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PathConflict {
                path,
                existing,
                requested,
            } => write!(
                f,
                "path conflict at {path:?}: a {} exists, a {} was declared",
                existing.class_name(),
                requested.class_name()
            ),
            Self::OrphanNode { path, parent } => {
                write!(f, "cannot create {path:?}: parent {parent:?} does not exist")
            }
            Self::NotAContainer {
                path,
                parent,
                class,
            } => write!(
                f,
                "cannot create {path:?}: parent {parent:?} is a {} and holds no children",
                class.class_name()
            ),
        }
    }
}

impl std::error::Error for TreeError {}
