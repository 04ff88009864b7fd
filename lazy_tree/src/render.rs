// Copyright 2025 the Lazy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The drawing surface collaborator, colors and the hover-aware paint helpers shared by all
//! node kinds.
//!
//! Nodes never rasterize anything themselves. They issue rect and text primitives to a
//! [`Surface`] whose origin has already been moved to the node's top-left corner.

use kurbo::{Point, Rect, Size, Vec2};

use crate::node::{NodeHeader, NodeId};

/// A 32-bit ARGB color.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Argb(pub u32);

impl Argb {
    /// Opaque black.
    pub const BLACK: Self = Self(0xFF00_0000);
    /// Opaque white.
    pub const WHITE: Self = Self(0xFFFF_FFFF);

    /// Build a color from channels.
    pub const fn new(a: u8, r: u8, g: u8, b: u8) -> Self {
        Self(u32::from_be_bytes([a, r, g, b]))
    }

    /// Alpha channel.
    pub const fn alpha(self) -> u8 {
        self.0.to_be_bytes()[0]
    }

    /// Red channel.
    pub const fn red(self) -> u8 {
        self.0.to_be_bytes()[1]
    }

    /// Green channel.
    pub const fn green(self) -> u8 {
        self.0.to_be_bytes()[2]
    }

    /// Blue channel.
    pub const fn blue(self) -> u8 {
        self.0.to_be_bytes()[3]
    }

    /// Same color with a different alpha.
    pub const fn with_alpha(self, alpha: u8) -> Self {
        let [_, r, g, b] = self.0.to_be_bytes();
        Self::new(alpha, r, g, b)
    }

    /// Parse `AARRGGBB` or `RRGGBB` hex digits, with an optional leading `#`.
    ///
    /// ```rust
    /// use lazy_tree::Argb;
    /// assert_eq!(Argb::from_hex("#ff102030"), Some(Argb(0xFF10_2030)));
    /// assert_eq!(Argb::from_hex("102030"), Some(Argb(0xFF10_2030)));
    /// assert_eq!(Argb::from_hex("nope"), None);
    /// ```
    pub fn from_hex(text: &str) -> Option<Self> {
        let digits = text.trim().trim_start_matches('#');
        let value = u32::from_str_radix(digits, 16).ok()?;
        match digits.len() {
            8 => Some(Self(value)),
            6 => Some(Self(0xFF00_0000 | value)),
            _ => None,
        }
    }

    /// `AARRGGBB` in upper case.
    pub fn to_hex(self) -> String {
        format!("{:08X}", self.0)
    }
}

/// Horizontal text anchoring.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TextAlign {
    /// Anchor at the left edge.
    #[default]
    Left,
    /// Anchor at the right edge.
    Right,
}

/// A 2D drawing surface.
pub trait Surface {
    /// Fill a rectangle.
    fn fill_rect(&mut self, rect: Rect, color: Argb);
    /// Outline a rectangle.
    fn stroke_rect(&mut self, rect: Rect, color: Argb, width: f64);
    /// Draw a single line of text with its baseline-left (or baseline-right) at `origin`.
    fn text(&mut self, origin: Point, text: &str, color: Argb, align: TextAlign);
    /// Push the current transform.
    fn save(&mut self);
    /// Pop the transform pushed by the matching [`save`](Self::save).
    fn restore(&mut self);
    /// Move the origin.
    fn translate(&mut self, offset: Vec2);
}

/// A primitive recorded by [`RecordingSurface`], in absolute coordinates.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawOp {
    /// A filled rectangle.
    Fill(Rect, Argb),
    /// An outlined rectangle.
    Stroke(Rect, Argb),
    /// A text run.
    Text(Point, String, Argb),
}

/// A [`Surface`] that records primitives instead of drawing them.
#[derive(Clone, Debug, Default)]
pub struct RecordingSurface {
    /// Recorded primitives in draw order.
    pub ops: Vec<DrawOp>,
    offset: Vec2,
    stack: Vec<Vec2>,
}

impl RecordingSurface {
    /// Create an empty recording.
    pub fn new() -> Self {
        Self::default()
    }

    /// Every recorded text run.
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Text(_, text, _) => Some(text.as_str()),
            _ => None,
        })
    }
}

impl Surface for RecordingSurface {
    fn fill_rect(&mut self, rect: Rect, color: Argb) {
        self.ops.push(DrawOp::Fill(rect + self.offset, color));
    }

    fn stroke_rect(&mut self, rect: Rect, color: Argb, _width: f64) {
        self.ops.push(DrawOp::Stroke(rect + self.offset, color));
    }

    fn text(&mut self, origin: Point, text: &str, color: Argb, _align: TextAlign) {
        self.ops
            .push(DrawOp::Text(origin + self.offset, text.to_string(), color));
    }

    fn save(&mut self) {
        self.stack.push(self.offset);
    }

    fn restore(&mut self) {
        if let Some(offset) = self.stack.pop() {
            self.offset = offset;
        }
    }

    fn translate(&mut self, offset: Vec2) {
        self.offset += offset;
    }
}

/// Colors used by node drawing.
#[derive(Clone, Debug, PartialEq)]
pub struct Theme {
    /// Row background.
    pub background: Argb,
    /// Row background under the pointer.
    pub focus_background: Argb,
    /// Text and outlines.
    pub foreground: Argb,
    /// Text and outlines under the pointer.
    pub focus_foreground: Argb,
    /// Value fill, such as a slider's bounded range.
    pub content: Argb,
    /// Value fill under the pointer.
    pub focus_content: Argb,
    /// Horizontal text inset.
    pub padding: f64,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            background: Argb(0xFF20_2020),
            focus_background: Argb(0xFF40_4040),
            foreground: Argb(0xFFB0_B0B0),
            focus_foreground: Argb::WHITE,
            content: Argb(0xFF30_5080),
            focus_content: Argb(0xFF40_70B0),
            padding: 4.0,
        }
    }
}

/// Per-node drawing context.
#[derive(Clone, Copy, Debug)]
pub struct DrawCx<'a> {
    /// Colors.
    pub theme: &'a Theme,
    /// Frame time in milliseconds.
    pub now_ms: u64,
    /// The single hovered node, if any.
    pub hovered: Option<NodeId>,
    /// Size of the node being drawn.
    pub size: Size,
    /// Color of the parent node, for previews.
    pub parent_color: Option<Argb>,
}

impl<'a> DrawCx<'a> {
    /// Context for a frame, before a node is selected.
    pub fn new(theme: &'a Theme, now_ms: u64, hovered: Option<NodeId>) -> Self {
        Self {
            theme,
            now_ms,
            hovered,
            size: Size::ZERO,
            parent_color: None,
        }
    }

    /// The node's local bounds.
    pub fn local_rect(&self) -> Rect {
        self.size.to_rect()
    }

    /// Text baseline for a row of this height.
    pub fn baseline(&self) -> f64 {
        self.size.height * 0.75
    }
}

/// True if `header` is the hovered node.
pub fn is_hovered(header: &NodeHeader, cx: &DrawCx<'_>) -> bool {
    cx.hovered == Some(header.id)
}

/// Background fill for a row.
pub fn background_fill(header: &NodeHeader, cx: &DrawCx<'_>) -> Argb {
    if is_hovered(header, cx) {
        cx.theme.focus_background
    } else {
        cx.theme.background
    }
}

/// Text and outline color for a row.
pub fn foreground_fill(header: &NodeHeader, cx: &DrawCx<'_>) -> Argb {
    if is_hovered(header, cx) {
        cx.theme.focus_foreground
    } else {
        cx.theme.foreground
    }
}

/// Value fill for a row.
pub fn content_fill(header: &NodeHeader, cx: &DrawCx<'_>) -> Argb {
    if is_hovered(header, cx) {
        cx.theme.focus_content
    } else {
        cx.theme.content
    }
}

/// Fill the whole row with its hover-dependent background.
pub fn draw_row_background(header: &NodeHeader, cx: &DrawCx<'_>, surface: &mut dyn Surface) {
    surface.fill_rect(cx.local_rect(), background_fill(header, cx));
}

/// Draw the node name at the left of the row.
pub fn draw_name(header: &NodeHeader, cx: &DrawCx<'_>, surface: &mut dyn Surface) {
    surface.text(
        Point::new(cx.theme.padding, cx.baseline()),
        &header.name,
        foreground_fill(header, cx),
        TextAlign::Left,
    );
}

/// Draw a value at the right of the row.
pub fn draw_value_right(
    header: &NodeHeader,
    cx: &DrawCx<'_>,
    surface: &mut dyn Surface,
    text: &str,
) {
    surface.text(
        Point::new(cx.size.width - cx.theme.padding, cx.baseline()),
        text,
        foreground_fill(header, cx),
        TextAlign::Right,
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn argb_channels_and_hex() {
        let c = Argb::new(0x80, 0x10, 0x20, 0x30);
        assert_eq!(c.alpha(), 0x80);
        assert_eq!(c.red(), 0x10);
        assert_eq!(c.green(), 0x20);
        assert_eq!(c.blue(), 0x30);
        assert_eq!(c.to_hex(), "80102030");
        assert_eq!(Argb::from_hex(&c.to_hex()), Some(c));
        assert_eq!(c.with_alpha(0xFF).alpha(), 0xFF);
    }

    #[test]
    fn recording_surface_applies_translation() {
        let mut s = RecordingSurface::new();
        s.save();
        s.translate(Vec2::new(10.0, 20.0));
        s.fill_rect(Rect::new(0.0, 0.0, 5.0, 5.0), Argb::BLACK);
        s.restore();
        s.fill_rect(Rect::new(0.0, 0.0, 5.0, 5.0), Argb::WHITE);
        assert_eq!(
            s.ops,
            vec![
                DrawOp::Fill(Rect::new(10.0, 20.0, 15.0, 25.0), Argb::BLACK),
                DrawOp::Fill(Rect::new(0.0, 0.0, 5.0, 5.0), Argb::WHITE),
            ]
        );
    }
}
