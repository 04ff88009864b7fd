// Copyright 2025 the Lazy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Nodes: identity, hierarchy and the per-node lock around kind-specific state.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError, Weak};

use kurbo::{Rect, Vec2};
use lazy_event_state::{KeyEvent, Response};

use crate::cow::CowList;
use crate::kinds::{EventCx, Fields, NodeKind};
use crate::render::{DrawCx, Surface};

/// Process-unique node identifier, stable for the life of the node.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(pub(crate) u64);

impl NodeId {
    /// Raw value.
    pub const fn get(self) -> u64 {
        self.0
    }
}

/// Persistence category of a node.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NodeType {
    /// Holds children.
    Folder,
    /// Holds a persisted value.
    Value,
    /// Pure display; nothing is persisted.
    Transient,
}

/// The closed set of node kinds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NodeClass {
    /// A group of child nodes.
    Folder,
    /// A float slider.
    Slider,
    /// A whole-number slider.
    SliderInt,
    /// A boolean switch.
    Toggle,
    /// A momentary button.
    Button,
    /// An editable line of text.
    Text,
    /// An ARGB color.
    Color,
    /// A choice between string options.
    Radio,
    /// A swatch showing its parent's color.
    ColorPreview,
    /// A folder of axis sliders edited together as one vector.
    Plot,
}

impl NodeClass {
    /// Every class.
    pub const ALL: [Self; 10] = [
        Self::Folder,
        Self::Slider,
        Self::SliderInt,
        Self::Toggle,
        Self::Button,
        Self::Text,
        Self::Color,
        Self::Radio,
        Self::ColorPreview,
        Self::Plot,
    ];

    /// Type discriminator written to persisted documents.
    pub const fn class_name(self) -> &'static str {
        match self {
            Self::Folder => "FolderNode",
            Self::Slider => "SliderNode",
            Self::SliderInt => "SliderIntNode",
            Self::Toggle => "ToggleNode",
            Self::Button => "ButtonNode",
            Self::Text => "TextNode",
            Self::Color => "ColorPickerFolderNode",
            Self::Radio => "RadioFolderNode",
            Self::ColorPreview => "ColorPreviewNode",
            Self::Plot => "PlotFolderNode",
        }
    }

    /// Inverse of [`class_name`](Self::class_name).
    pub fn from_class_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.class_name() == name)
    }

    /// Persistence category.
    pub const fn node_type(self) -> NodeType {
        match self {
            Self::Folder | Self::Plot => NodeType::Folder,
            Self::Button | Self::ColorPreview => NodeType::Transient,
            _ => NodeType::Value,
        }
    }

    /// True if nodes of this class may have children.
    pub const fn accepts_children(self) -> bool {
        matches!(self, Self::Folder | Self::Color | Self::Plot)
    }
}

/// The immutable part of a node.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NodeHeader {
    /// Identifier.
    pub id: NodeId,
    /// Normalized path.
    pub path: String,
    /// Unescaped display name.
    pub name: String,
    /// Kind.
    pub class: NodeClass,
}

/// One element of the retained tree.
///
/// Path, class and parent never change after construction. Kind-specific state lives behind a
/// mutex; children live in a [`CowList`] so they can be iterated while another thread adds or
/// removes entries.
#[derive(Debug)]
pub struct Node {
    header: NodeHeader,
    parent: Weak<Self>,
    children: CowList<Arc<Self>>,
    kind: Mutex<NodeKind>,
    bounds: Mutex<Rect>,
    touched_frame: AtomicU64,
}

impl Node {
    pub(crate) fn new(header: NodeHeader, parent: Weak<Self>, kind: NodeKind, frame: u64) -> Self {
        Self {
            header,
            parent,
            children: CowList::new(),
            kind: Mutex::new(kind),
            bounds: Mutex::new(Rect::ZERO),
            touched_frame: AtomicU64::new(frame),
        }
    }

    /// Immutable identity.
    pub fn header(&self) -> &NodeHeader {
        &self.header
    }

    /// Identifier.
    pub fn id(&self) -> NodeId {
        self.header.id
    }

    /// Normalized path.
    pub fn path(&self) -> &str {
        &self.header.path
    }

    /// Display name.
    pub fn name(&self) -> &str {
        &self.header.name
    }

    /// Kind.
    pub fn class(&self) -> NodeClass {
        self.header.class
    }

    /// Persistence category.
    pub fn node_type(&self) -> NodeType {
        self.header.class.node_type()
    }

    /// True for the root node.
    pub fn is_root(&self) -> bool {
        self.header.path.is_empty()
    }

    /// The parent, unless this is the root or the parent has been dropped.
    pub fn parent(&self) -> Option<Arc<Self>> {
        self.parent.upgrade()
    }

    /// A stable snapshot of the children in display order.
    pub fn children(&self) -> Arc<Vec<Arc<Self>>> {
        self.children.snapshot()
    }

    /// The copy-on-write child list.
    pub fn child_list(&self) -> &CowList<Arc<Self>> {
        &self.children
    }

    /// First child with the given display name.
    pub fn find_child_by_name(&self, name: &str) -> Option<Arc<Self>> {
        self.children().iter().find(|c| c.name() == name).cloned()
    }

    /// Run `f` with exclusive access to the kind-specific state.
    pub fn with_kind<R>(&self, f: impl FnOnce(&mut NodeKind) -> R) -> R {
        let mut kind = self.kind.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut kind)
    }

    /// Bounds assigned by the host layout, in window coordinates.
    pub fn bounds(&self) -> Rect {
        *self.bounds.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Assign bounds.
    pub fn set_bounds(&self, bounds: Rect) {
        *self.bounds.lock().unwrap_or_else(PoisonError::into_inner) = bounds;
    }

    /// Frame at which the node was last declared.
    pub fn touched_frame(&self) -> u64 {
        self.touched_frame.load(Ordering::Acquire)
    }

    pub(crate) fn touch(&self, frame: u64) {
        self.touched_frame.fetch_max(frame, Ordering::AcqRel);
    }

    /// Field name to value mapping for persistence.
    pub fn expose_fields(&self) -> Fields {
        let mut fields = Fields::new();
        self.with_kind(|k| k.control().expose_fields(&mut fields));
        fields
    }

    /// Copy matching fields onto the node. Returns the names of fields that were present but
    /// could not be applied.
    pub fn apply_fields(&self, fields: &Fields) -> Vec<String> {
        let mut rejected = Vec::new();
        self.with_kind(|k| k.control_mut().apply_fields(fields, &mut rejected));
        rejected
    }

    /// Short value text for tree dumps.
    pub fn printable_value(&self) -> String {
        self.with_kind(|k| k.control().printable_value())
    }

    /// Pointer pressed on this node.
    pub fn press(&self, cx: &mut EventCx<'_>) -> Response {
        self.with_kind(|k| k.control_mut().on_press(cx))
    }

    /// Pointer released after a press on this node.
    pub fn release(&self, cx: &mut EventCx<'_>) -> Response {
        self.with_kind(|k| k.control_mut().on_release(cx))
    }

    /// Pointer dragged after a press on this node.
    pub fn drag(&self, movement: Vec2, cx: &mut EventCx<'_>) -> Response {
        self.with_kind(|k| k.control_mut().on_drag(movement, cx))
    }

    /// Key pressed while hovered.
    pub fn key(&self, key: &KeyEvent, cx: &mut EventCx<'_>) -> Response {
        self.with_kind(|k| k.control_mut().on_key(key, cx))
    }

    /// Wheel turned while hovered.
    pub fn wheel(&self, notches: i32, cx: &mut EventCx<'_>) -> Response {
        self.with_kind(|k| k.control_mut().on_wheel(notches, cx))
    }

    /// Per-frame tick.
    pub fn update(&self, now_ms: u64) -> Response {
        self.with_kind(|k| k.control_mut().update(now_ms))
    }

    /// Draw the node at its bounds.
    pub fn draw(&self, cx: &DrawCx<'_>, surface: &mut dyn Surface) {
        let bounds = self.bounds();
        let parent_color = match self.class() {
            NodeClass::ColorPreview => self.parent().and_then(|p| p.with_kind(|k| k.color())),
            _ => None,
        };
        let local = DrawCx {
            size: bounds.size(),
            parent_color,
            ..*cx
        };
        surface.save();
        surface.translate(bounds.origin().to_vec2());
        self.with_kind(|k| {
            let control = k.control();
            control.draw_background(&self.header, &local, surface);
            control.draw_foreground(&self.header, &local, surface);
        });
        surface.restore();
    }
}
