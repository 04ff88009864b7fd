// Copyright 2025 the Lazy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Copy-on-write lists.
//!
//! A [`CowList`] keeps its items in an immutable `Arc<Vec<T>>`. Readers take a
//! [`snapshot`](CowList::snapshot) once and iterate it without holding any lock; writers build
//! a new vector and swap it in. An iteration that started before a write keeps seeing the
//! items it started with.
//!
//! The lock around the pointer is held only to clone or swap the `Arc`. Writers copy and edit
//! outside it, then publish only if no other write landed in between, retrying otherwise.
//!
//! ```rust
//! use lazy_tree::CowList;
//!
//! let list = CowList::new();
//! list.push(1);
//! list.push(2);
//!
//! let snapshot = list.snapshot();
//! list.push(3);
//! assert_eq!(*snapshot, vec![1, 2]);
//! assert_eq!(*list.snapshot(), vec![1, 2, 3]);
//! ```

use std::sync::{Arc, PoisonError, RwLock};

/// A list whose mutations replace the backing vector instead of editing it in place.
#[derive(Debug)]
pub struct CowList<T> {
    items: RwLock<Arc<Vec<T>>>,
}

impl<T> Default for CowList<T> {
    fn default() -> Self {
        Self {
            items: RwLock::new(Arc::new(Vec::new())),
        }
    }
}

impl<T: Clone> CowList<T> {
    /// Create an empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// The current items. The returned vector never changes.
    pub fn snapshot(&self) -> Arc<Vec<T>> {
        Arc::clone(&self.items.read().unwrap_or_else(PoisonError::into_inner))
    }

    /// Publish `next` if the list still holds `base`. Returns false if another write won.
    fn publish(&self, base: &Arc<Vec<T>>, next: Vec<T>) -> bool {
        let mut slot = self.items.write().unwrap_or_else(PoisonError::into_inner);
        if !Arc::ptr_eq(&slot, base) {
            return false;
        }
        let previous = core::mem::replace(&mut *slot, Arc::new(next));
        drop(slot);
        drop(previous);
        true
    }

    /// Number of items in the current snapshot.
    pub fn len(&self) -> usize {
        self.snapshot().len()
    }

    /// True if the current snapshot is empty.
    pub fn is_empty(&self) -> bool {
        self.snapshot().is_empty()
    }

    /// Append an item.
    pub fn push(&self, item: T) {
        self.update(|items| items.push(item.clone()));
    }

    /// Keep only the items matching `keep`. Returns the removed items.
    pub fn retain(&self, mut keep: impl FnMut(&T) -> bool) -> Vec<T> {
        let mut removed = Vec::new();
        self.update(|items| {
            let (kept, dropped): (Vec<T>, Vec<T>) = items.drain(..).partition(|item| keep(item));
            *items = kept;
            removed = dropped;
        });
        removed
    }

    /// Replace every item.
    pub fn replace(&self, items: Vec<T>) {
        let previous = core::mem::replace(
            &mut *self.items.write().unwrap_or_else(PoisonError::into_inner),
            Arc::new(items),
        );
        drop(previous);
    }

    /// Clone the current items, let `edit` change the copy, and publish it.
    ///
    /// `edit` runs again on a fresh copy if another write was published meanwhile, so it
    /// should only touch the vector it is given.
    pub fn update<R>(&self, mut edit: impl FnMut(&mut Vec<T>) -> R) -> R {
        loop {
            let base = self.snapshot();
            let mut next = Vec::clone(&base);
            let out = edit(&mut next);
            if self.publish(&base, next) {
                return out;
            }
        }
    }
}
