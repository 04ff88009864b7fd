// Copyright 2025 the Lazy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Hover resolution and event routing.
//!
//! Regions are double buffered: the host adds regions while drawing a frame and
//! [`InputDispatcher::end_frame`] publishes them. Events arriving before the next
//! `end_frame` are resolved against the last published frame.

use alloc::vec::Vec;

use kurbo::Point;
use lazy_event_state::InputEvent;

use crate::region::{Region, topmost};

/// Hover transition produced while routing an event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HoverChange<K> {
    /// Node that stopped being hovered.
    pub left: Option<K>,
    /// Node that became hovered.
    pub entered: Option<K>,
}

impl<K> HoverChange<K> {
    /// No transition.
    pub fn none() -> Self {
        Self {
            left: None,
            entered: None,
        }
    }

    /// True if hover did not change.
    pub fn is_none(&self) -> bool {
        self.left.is_none() && self.entered.is_none()
    }
}

/// Result of routing one event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Routed<K> {
    /// The single node that should handle the event, if any.
    pub target: Option<K>,
    /// Hover transition caused by the event.
    pub hover: HoverChange<K>,
}

/// Resolves exclusive hover and routes events to one node.
#[derive(Clone, Debug)]
pub struct InputDispatcher<K> {
    current: Vec<Region<K>>,
    next: Vec<Region<K>>,
    pointer: Option<Point>,
    hovered: Option<K>,
    captured: Option<K>,
}

impl<K> Default for InputDispatcher<K> {
    fn default() -> Self {
        Self {
            current: Vec::new(),
            next: Vec::new(),
            pointer: None,
            hovered: None,
            captured: None,
        }
    }
}

impl<K: Copy + Eq> InputDispatcher<K> {
    /// Create a dispatcher with no regions.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a node's bounds for the frame being drawn, in draw order.
    pub fn add_region(&mut self, node: K, bounds: kurbo::Rect) {
        self.next.push(Region::new(node, bounds));
    }

    /// Publish the regions added since the last call and re-resolve hover against them.
    pub fn end_frame(&mut self) -> HoverChange<K> {
        core::mem::swap(&mut self.current, &mut self.next);
        self.next.clear();
        self.refresh_hover()
    }

    /// Regions of the last published frame.
    pub fn regions(&self) -> &[Region<K>] {
        &self.current
    }

    /// Last known pointer position.
    pub fn pointer(&self) -> Option<Point> {
        self.pointer
    }

    /// The hovered node.
    pub fn hovered(&self) -> Option<K> {
        self.hovered
    }

    /// The node capturing the pointer.
    pub fn captured(&self) -> Option<K> {
        self.captured
    }

    /// True if `node` is hovered.
    pub fn is_hovered(&self, node: K) -> bool {
        self.hovered == Some(node)
    }

    /// The pointer left the window. A captured node keeps its hover until release.
    pub fn pointer_left(&mut self) -> HoverChange<K> {
        self.pointer = None;
        self.refresh_hover()
    }

    /// Drop any hover or capture held by a node that no longer exists.
    pub fn forget(&mut self, node: K) {
        if self.captured == Some(node) {
            self.captured = None;
        }
        if self.hovered == Some(node) {
            self.hovered = None;
        }
        self.current.retain(|r| r.node != node);
        self.next.retain(|r| r.node != node);
    }

    /// Decide which node receives `event` and update hover and capture.
    pub fn route(&mut self, event: &InputEvent) -> Routed<K> {
        if let Some(position) = event.position() {
            self.pointer = Some(position);
        }
        match event {
            InputEvent::PointerMoved { .. } | InputEvent::Wheel { .. } => {
                let hover = self.refresh_hover();
                Routed {
                    target: self.hovered,
                    hover,
                }
            }
            InputEvent::PointerPressed { .. } => {
                let hover = self.refresh_hover();
                self.captured = self.hovered;
                Routed {
                    target: self.hovered,
                    hover,
                }
            }
            InputEvent::PointerDragged { .. } => {
                let hover = self.refresh_hover();
                Routed {
                    target: self.captured,
                    hover,
                }
            }
            InputEvent::PointerReleased { .. } => {
                let target = self.captured.take();
                let hover = self.refresh_hover();
                Routed { target, hover }
            }
            InputEvent::PointerLeft => Routed {
                target: None,
                hover: self.pointer_left(),
            },
            InputEvent::Key(_) => Routed {
                target: self.hovered,
                hover: HoverChange::none(),
            },
        }
    }

    fn refresh_hover(&mut self) -> HoverChange<K> {
        let hovered = match self.captured {
            Some(node) => Some(node),
            None => self.pointer.and_then(|p| topmost(&self.current, p)),
        };
        if hovered == self.hovered {
            return HoverChange::none();
        }
        let change = HoverChange {
            left: self.hovered,
            entered: hovered,
        };
        self.hovered = hovered;
        change
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::Rect;
    use lazy_event_state::{KeyEvent, PointerButton};

    fn moved(x: f64, y: f64) -> InputEvent {
        InputEvent::PointerMoved {
            position: Point::new(x, y),
        }
    }

    fn pressed(x: f64, y: f64) -> InputEvent {
        InputEvent::PointerPressed {
            position: Point::new(x, y),
            button: PointerButton::Primary,
        }
    }

    fn released(x: f64, y: f64) -> InputEvent {
        InputEvent::PointerReleased {
            position: Point::new(x, y),
            button: PointerButton::Primary,
        }
    }

    fn two_rows() -> InputDispatcher<u32> {
        let mut d = InputDispatcher::new();
        d.add_region(1, Rect::new(0.0, 0.0, 100.0, 20.0));
        d.add_region(2, Rect::new(0.0, 20.0, 100.0, 40.0));
        d.end_frame();
        d
    }

    #[test]
    fn hover_follows_pointer_and_reports_transitions() {
        let mut d = two_rows();
        let r = d.route(&moved(10.0, 5.0));
        assert_eq!(r.target, Some(1));
        assert_eq!(
            r.hover,
            HoverChange {
                left: None,
                entered: Some(1)
            }
        );
        assert!(d.route(&moved(12.0, 6.0)).hover.is_none());
        let r = d.route(&moved(10.0, 25.0));
        assert_eq!(r.hover.left, Some(1));
        assert_eq!(r.hover.entered, Some(2));
        assert!(d.is_hovered(2));
        assert!(!d.is_hovered(1));

        assert_eq!(d.pointer_left().left, Some(2));
        assert_eq!(d.hovered(), None);
    }

    #[test]
    fn keys_and_wheel_go_to_hovered_only() {
        let mut d = two_rows();
        assert_eq!(d.route(&InputEvent::Key(KeyEvent::char('1'))).target, None);
        d.route(&moved(10.0, 25.0));
        assert_eq!(
            d.route(&InputEvent::Key(KeyEvent::char('1'))).target,
            Some(2)
        );
        let wheel = InputEvent::Wheel {
            position: Point::new(10.0, 5.0),
            notches: 1,
        };
        assert_eq!(d.route(&wheel).target, Some(1));
    }

    #[test]
    fn capture_holds_until_release() {
        let mut d = two_rows();
        assert_eq!(d.route(&pressed(10.0, 5.0)).target, Some(1));
        assert_eq!(d.captured(), Some(1));

        let drag = InputEvent::PointerDragged {
            position: Point::new(10.0, 30.0),
            previous: Point::new(10.0, 5.0),
        };
        let r = d.route(&drag);
        assert_eq!(r.target, Some(1));
        assert!(d.is_hovered(1));
        // Keys go to the captured node too, since it stays hovered.
        assert_eq!(
            d.route(&InputEvent::Key(KeyEvent::char('x'))).target,
            Some(1)
        );

        let r = d.route(&released(10.0, 30.0));
        assert_eq!(r.target, Some(1));
        assert_eq!(r.hover.entered, Some(2));
        assert_eq!(d.captured(), None);
    }

    #[test]
    fn drag_without_capture_goes_nowhere() {
        let mut d = two_rows();
        d.route(&pressed(500.0, 500.0));
        let drag = InputEvent::PointerDragged {
            position: Point::new(10.0, 5.0),
            previous: Point::new(500.0, 500.0),
        };
        assert_eq!(d.route(&drag).target, None);
        assert_eq!(d.route(&released(10.0, 5.0)).target, None);
    }

    #[test]
    fn events_use_last_published_frame() {
        let mut d = two_rows();
        d.add_region(3, Rect::new(0.0, 0.0, 100.0, 40.0));
        assert_eq!(d.route(&moved(10.0, 5.0)).target, Some(1));
        d.end_frame();
        assert_eq!(d.hovered(), Some(3));
        assert_eq!(d.regions().len(), 1);
    }

    #[test]
    fn leaving_the_window_clears_hover() {
        let mut d = two_rows();
        d.route(&moved(10.0, 5.0));
        let r = d.route(&InputEvent::PointerLeft);
        assert_eq!(r.target, None);
        assert_eq!(r.hover.left, Some(1));
        assert_eq!(d.pointer(), None);
        assert_eq!(d.route(&InputEvent::Key(KeyEvent::char('1'))).target, None);

        d.route(&pressed(10.0, 25.0));
        d.route(&InputEvent::PointerLeft);
        assert_eq!(d.hovered(), Some(2));
    }

    #[test]
    fn forgotten_node_loses_hover_and_capture() {
        let mut d = two_rows();
        d.route(&pressed(10.0, 5.0));
        d.forget(1);
        assert_eq!(d.captured(), None);
        assert_eq!(d.hovered(), None);
        assert_eq!(d.route(&moved(10.0, 5.0)).target, None);
    }
}
