//! Core types for canvas-slides.
//!
//! The caller-built box tree, the positioned tree produced by layout, and the
//! small geometry values passed between the layout and pagination stages.
//! Everything here serializes to the JSON interchange shape used at component
//! boundaries (camelCase keys, `children` omitted when empty).

use std::ops::{Add, Sub};

use serde::{Deserialize, Serialize};

// =============================================================================
// GEOMETRY
// =============================================================================

/// A point or offset in canvas pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    /// The origin.
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    /// Create a new point.
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

impl Add for Point {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// A width/height pair in canvas pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    /// Create a new size.
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// True unless both axes are strictly positive.
    ///
    /// NaN counts as degenerate.
    pub fn is_degenerate(&self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
    }
}

/// An axis-aligned rectangle as reported by the layout oracle.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    /// Create a new rectangle.
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Top-left corner.
    pub const fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub const fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Bottom edge (`y + height`).
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Offset of this rectangle's origin from `reference`'s origin.
    pub fn offset_from(&self, reference: &Rect) -> Point {
        self.origin() - reference.origin()
    }
}

// =============================================================================
// BOX TREE (INPUT)
// =============================================================================

/// How a box's size is decided.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DimensionConstraint {
    /// Declared width/height are passed to the oracle as hard constraints.
    Fixed,
    /// Size comes entirely from the oracle's measurement.
    #[default]
    Variable,
}

/// A content block to be positioned.
///
/// Child order is significant: it is the order the oracle emits rows and
/// columns in, and it is preserved through every later stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentBox {
    /// Unique within one layout call.
    pub id: String,

    pub dimension_constraint: DimensionConstraint,

    /// Required when `fixed`, advisory otherwise.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f32>,

    /// Required when `fixed`, advisory otherwise.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f32>,

    /// Opaque to this crate; only the oracle reads it.
    #[serde(default)]
    pub style_descriptor: String,

    /// Style of an interposed wrapper grouping this box's children.
    ///
    /// When set, the children are laid out inside an extra container that never
    /// shows up as a node of its own in the positioned tree.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub child_group_style: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<ContentBox>,
}

impl ContentBox {
    /// A box with a declared size.
    pub fn fixed(id: impl Into<String>, width: f32, height: f32, style: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            dimension_constraint: DimensionConstraint::Fixed,
            width: Some(width),
            height: Some(height),
            style_descriptor: style.into(),
            child_group_style: None,
            children: Vec::new(),
        }
    }

    /// A box sized by the oracle.
    pub fn variable(id: impl Into<String>, style: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            dimension_constraint: DimensionConstraint::Variable,
            width: None,
            height: None,
            style_descriptor: style.into(),
            child_group_style: None,
            children: Vec::new(),
        }
    }

    /// Append a child, keeping authored order.
    pub fn with_child(mut self, child: ContentBox) -> Self {
        self.children.push(child);
        self
    }

    pub fn with_children(mut self, children: impl IntoIterator<Item = ContentBox>) -> Self {
        self.children.extend(children);
        self
    }

    /// Group the children inside a wrapper styled with `style`.
    pub fn with_child_group(mut self, style: impl Into<String>) -> Self {
        self.child_group_style = Some(style.into());
        self
    }

    /// Declared size, if this box is `fixed` and both axes are present.
    pub fn fixed_size(&self) -> Option<Size> {
        match (self.dimension_constraint, self.width, self.height) {
            (DimensionConstraint::Fixed, Some(w), Some(h)) => Some(Size::new(w, h)),
            _ => None,
        }
    }

    /// Number of nodes in this subtree, including `self`.
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(ContentBox::node_count).sum::<usize>()
    }
}

// =============================================================================
// POSITIONED TREE (OUTPUT)
// =============================================================================

/// A box after layout.
///
/// `x`/`y` are relative to the node's logical parent, which may differ from
/// its physical container when a child-group wrapper was interposed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionedBox {
    pub id: String,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<PositionedBox>,
}

impl PositionedBox {
    /// Position and size as a rectangle in the parent's space.
    pub const fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    /// Bottom edge in the parent's space.
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Shift this node by `delta`. Children keep their parent-relative positions.
    pub fn translate(&mut self, delta: Point) {
        self.x += delta.x;
        self.y += delta.y;
    }

    /// Number of nodes in this subtree, including `self`.
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(PositionedBox::node_count).sum::<usize>()
    }

    /// Find a node by id anywhere in this subtree (depth-first).
    pub fn find(&self, id: &str) -> Option<&PositionedBox> {
        if self.id == id {
            return Some(self);
        }
        self.children.iter().find_map(|child| child.find(id))
    }

    /// Same ids, same shape, same child order as `source`, at every depth.
    pub fn mirrors(&self, source: &ContentBox) -> bool {
        self.id == source.id
            && self.children.len() == source.children.len()
            && self
                .children
                .iter()
                .zip(&source.children)
                .all(|(positioned, source)| positioned.mirrors(source))
    }
}
