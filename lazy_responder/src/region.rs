// Copyright 2025 the Lazy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Node regions and topmost hit selection.

use kurbo::{Point, Rect};

/// Screen bounds of one node, as drawn this frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Region<K> {
    /// Node key.
    pub node: K,
    /// Bounds in window coordinates.
    pub bounds: Rect,
}

impl<K> Region<K> {
    /// Create a region.
    pub fn new(node: K, bounds: Rect) -> Self {
        Self { node, bounds }
    }
}

/// The topmost region containing `point`.
///
/// Regions are given in draw order, so the last containing region wins.
pub fn topmost<K: Copy>(regions: &[Region<K>], point: Point) -> Option<K> {
    regions
        .iter()
        .rev()
        .find(|r| r.bounds.contains(point))
        .map(|r| r.node)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn later_region_wins_on_overlap() {
        let regions = [
            Region::new('a', Rect::new(0.0, 0.0, 10.0, 10.0)),
            Region::new('b', Rect::new(5.0, 5.0, 15.0, 15.0)),
        ];
        assert_eq!(topmost(&regions, Point::new(1.0, 1.0)), Some('a'));
        assert_eq!(topmost(&regions, Point::new(7.0, 7.0)), Some('b'));
        assert_eq!(topmost(&regions, Point::new(20.0, 20.0)), None);
    }

    #[test]
    fn empty_regions_never_hit() {
        let regions: [Region<u8>; 0] = [];
        assert_eq!(topmost(&regions, Point::ZERO), None);
    }
}
