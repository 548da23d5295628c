//! Document elements and the element store.

use crate::geometry::stroked_bounds;
use crate::selection::MIN_RESIZE_SIZE;
use kurbo::{Affine, BezPath, Point, Rect, Vec2};
use peniko::Color;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

/// Unique identifier for elements.
pub type ElementId = Uuid;

/// Unique identifier for frames (artboards that own elements and guides).
pub type FrameId = Uuid;

/// Serializable color representation (RGBA8).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SerializableColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl SerializableColor {
    pub fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub fn black() -> Self {
        Self::new(0, 0, 0, 255)
    }

    pub fn white() -> Self {
        Self::new(255, 255, 255, 255)
    }

    /// Relative luminance on a 0..255 scale (Rec. 601 weights).
    pub fn luminance(&self) -> f64 {
        0.299 * self.r as f64 + 0.587 * self.g as f64 + 0.114 * self.b as f64
    }
}

impl From<Color> for SerializableColor {
    fn from(color: Color) -> Self {
        let rgba = color.to_rgba8();
        Self {
            r: rgba.r,
            g: rgba.g,
            b: rgba.b,
            a: rgba.a,
        }
    }
}

impl From<SerializableColor> for Color {
    fn from(color: SerializableColor) -> Self {
        Color::from_rgba8(color.r, color.g, color.b, color.a)
    }
}

/// Paint properties of an element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElementStyle {
    /// Stroke color.
    pub stroke_color: SerializableColor,
    /// Stroke width (0 = no stroke).
    pub stroke_width: f64,
    /// Fill color (None = no fill).
    pub fill_color: Option<SerializableColor>,
}

impl Default for ElementStyle {
    fn default() -> Self {
        Self {
            stroke_color: SerializableColor::black(),
            stroke_width: 1.0,
            fill_color: None,
        }
    }
}

impl ElementStyle {
    /// Style with only a fill.
    pub fn filled(color: SerializableColor) -> Self {
        Self {
            stroke_color: color,
            stroke_width: 0.0,
            fill_color: Some(color),
        }
    }

    /// Get the fill color as a peniko Color.
    pub fn fill(&self) -> Option<Color> {
        self.fill_color.map(|c| c.into())
    }

    /// Get the stroke color as a peniko Color.
    pub fn stroke(&self) -> Color {
        self.stroke_color.into()
    }
}

/// A vector element on the canvas.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Element {
    pub(crate) id: ElementId,
    /// Path geometry in document coordinates. May hold several sub-paths.
    pub path: BezPath,
    /// Paint properties.
    pub style: ElementStyle,
    /// Frame owning this element, if any.
    #[serde(default)]
    pub frame_id: Option<FrameId>,
    /// Hidden elements are not drawn and never act as snap targets.
    #[serde(default = "default_visible")]
    pub visible: bool,
    /// Locked elements cannot be dragged.
    #[serde(default)]
    pub locked: bool,
}

fn default_visible() -> bool {
    true
}

impl Element {
    /// Create a new element from path geometry.
    pub fn new(path: BezPath, style: ElementStyle) -> Self {
        Self {
            id: Uuid::new_v4(),
            path,
            style,
            frame_id: None,
            visible: true,
            locked: false,
        }
    }

    /// Create a rectangle element.
    pub fn rect(rect: Rect, style: ElementStyle) -> Self {
        Self::new(kurbo::Shape::to_path(&rect, 0.1), style)
    }

    /// Get the unique identifier.
    pub fn id(&self) -> ElementId {
        self.id
    }

    /// Bounds of the stroked geometry in document coordinates.
    pub fn bounds(&self) -> Rect {
        stroked_bounds(&self.path, self.style.stroke_width)
    }

    /// Translate the element's geometry.
    pub fn translate(&mut self, delta: Vec2) {
        self.path.apply_affine(Affine::translate(delta));
    }

    /// Map the element's geometry from one bounding box onto another.
    pub fn fit_to(&mut self, from: Rect, to: Rect) {
        if from.width().abs() < f64::EPSILON || from.height().abs() < f64::EPSILON {
            self.translate(to.origin() - from.origin());
            return;
        }
        let sx = to.width() / from.width();
        let sy = to.height() / from.height();
        let affine = Affine::translate(to.origin().to_vec2())
            * Affine::scale_non_uniform(sx, sy)
            * Affine::translate(-from.origin().to_vec2());
        self.path.apply_affine(affine);
    }

    /// Scale and move the geometry so that [`Element::bounds`] becomes `to`.
    ///
    /// The geometry inside the stroke keeps at least [`MIN_RESIZE_SIZE`] per
    /// axis, centered on `to`, so a target thinner than the stroke grows to
    /// fit it instead of mirroring the path.
    pub fn resize_to(&mut self, to: Rect) {
        let half = (self.style.stroke_width / 2.0).max(0.0);
        let from = self.bounds();
        let shrink = |r: Rect| Rect::new(r.x0 + half, r.y0 + half, r.x1 - half, r.y1 - half);
        let mut inner = shrink(to);
        if inner.width() < MIN_RESIZE_SIZE {
            let cx = to.center().x;
            inner.x0 = cx - MIN_RESIZE_SIZE / 2.0;
            inner.x1 = cx + MIN_RESIZE_SIZE / 2.0;
        }
        if inner.height() < MIN_RESIZE_SIZE {
            let cy = to.center().y;
            inner.y0 = cy - MIN_RESIZE_SIZE / 2.0;
            inner.y1 = cy + MIN_RESIZE_SIZE / 2.0;
        }
        self.fit_to(shrink(from), inner);
    }

    /// Check if a point lies within this element's bounds.
    pub fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        self.bounds().inflate(tolerance, tolerance).contains(point)
    }
}

/// Element storage with back-to-front ordering.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ElementStore {
    elements: HashMap<ElementId, Element>,
    /// Z-order of elements (back to front).
    z_order: Vec<ElementId>,
}

impl ElementStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an element on top of the z-order. Returns its id.
    pub fn add(&mut self, element: Element) -> ElementId {
        let id = element.id();
        self.z_order.push(id);
        self.elements.insert(id, element);
        id
    }

    /// Remove an element.
    pub fn remove(&mut self, id: ElementId) -> Option<Element> {
        self.z_order.retain(|&element_id| element_id != id);
        self.elements.remove(&id)
    }

    /// Get an element by ID.
    pub fn get(&self, id: ElementId) -> Option<&Element> {
        self.elements.get(&id)
    }

    pub(crate) fn get_mut(&mut self, id: ElementId) -> Option<&mut Element> {
        self.elements.get_mut(&id)
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        self.z_order.len()
    }

    /// Check if the store holds no elements.
    pub fn is_empty(&self) -> bool {
        self.z_order.is_empty()
    }

    /// Elements in z-order (back to front).
    pub fn ordered(&self) -> impl Iterator<Item = &Element> {
        self.z_order.iter().filter_map(|id| self.elements.get(id))
    }

    /// Bounds of an element, if it exists.
    pub fn bounds_of(&self, id: ElementId) -> Option<Rect> {
        self.get(id).map(Element::bounds)
    }

    /// Topmost visible element under a point.
    pub fn element_at(&self, point: Point, tolerance: f64) -> Option<ElementId> {
        self.z_order
            .iter()
            .rev()
            .filter_map(|id| self.elements.get(id))
            .find(|el| el.visible && el.hit_test(point, tolerance))
            .map(Element::id)
    }
}
