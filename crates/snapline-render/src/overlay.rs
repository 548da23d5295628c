//! Overlay geometry for guides, distances, measurements and the grid.
//!
//! Everything is produced in document coordinates. Widths and dash lengths are
//! divided by the zoom so they keep a constant size on screen.

use kurbo::{BezPath, Point, Rect};
use peniko::Color;
use snapline_core::geometry::{Axis, overlaps_on};
use snapline_core::grid::grid_lines;
use snapline_core::guidelines::{DistanceGuidelineMatch, GapSpan, GuidelineMatch, MatchSource};
use snapline_core::measure::Measurement;
use snapline_core::plugin::{GuidelinesState, MeasureState};
use snapline_core::state::AppState;

/// Colors and sizes of overlay elements, in screen pixels.
#[derive(Debug, Clone, PartialEq)]
pub struct OverlayStyle {
    pub guide_color: Color,
    pub manual_guide_color: Color,
    pub measure_color: Color,
    pub grid_color: Color,
    pub line_width: f64,
    /// Length of the end caps on distance segments.
    pub cap_size: f64,
    pub dash_length: f64,
    /// How far alignment lines reach past the aligned elements.
    pub overshoot: f64,
}

impl Default for OverlayStyle {
    fn default() -> Self {
        Self {
            guide_color: Color::from_rgba8(236, 72, 153, 180), // Magenta
            manual_guide_color: Color::from_rgba8(59, 130, 246, 255), // Blue
            measure_color: Color::from_rgba8(249, 115, 22, 255), // Orange
            grid_color: Color::from_rgba8(200, 200, 200, 255),
            line_width: 1.0,
            cap_size: 4.0,
            dash_length: 4.0,
            overshoot: 8.0,
        }
    }
}

/// One thing to draw.
#[derive(Debug, Clone, PartialEq)]
pub enum OverlayPrimitive {
    Line {
        path: BezPath,
        color: Color,
        /// Width in document units.
        width: f64,
        /// Dash length in document units, for dashed lines.
        dash: Option<f64>,
    },
    Label {
        text: String,
        anchor: Point,
        color: Color,
    },
}

impl OverlayPrimitive {
    pub fn is_line(&self) -> bool {
        matches!(self, OverlayPrimitive::Line { .. })
    }
}

/// Format a distance for display, rounded to whole units.
pub fn format_distance(distance: f64) -> String {
    format!("{}", distance.round() as i64)
}

fn segment(axis: Axis, position: f64, from: f64, to: f64) -> BezPath {
    let mut path = BezPath::new();
    match axis {
        // A line at a fixed x runs vertically
        Axis::Horizontal => {
            path.move_to((position, from));
            path.line_to((position, to));
        }
        Axis::Vertical => {
            path.move_to((from, position));
            path.line_to((to, position));
        }
    }
    path
}

/// Builds overlay primitives for one frame.
struct Builder<'a> {
    state: &'a AppState,
    style: &'a OverlayStyle,
    zoom: f64,
    visible: Option<Rect>,
    out: Vec<OverlayPrimitive>,
}

impl<'a> Builder<'a> {
    fn px(&self, pixels: f64) -> f64 {
        pixels / self.zoom
    }

    fn line(&mut self, path: BezPath, color: Color, dashed: bool) {
        let width = self.px(self.style.line_width);
        let dash = dashed.then(|| self.px(self.style.dash_length));
        self.out.push(OverlayPrimitive::Line {
            path,
            color,
            width,
            dash,
        });
    }

    fn label(&mut self, text: String, anchor: Point, color: Color) {
        self.out.push(OverlayPrimitive::Label { text, anchor, color });
    }

    /// Full-viewport line at `position`, perpendicular to `axis`.
    fn across_view(&mut self, axis: Axis, position: f64, color: Color, dashed: bool) {
        if let Some(view) = self.visible {
            let cross = axis.perpendicular();
            self.line(segment(axis, position, cross.min(view), cross.max(view)), color, dashed);
        }
    }

    fn grid(&mut self) {
        let grid = &self.state.settings.grid;
        let Some(view) = self.visible.filter(|_| grid.visible) else {
            return;
        };
        let (xs, ys) = grid_lines(view, grid.size);
        let color = self.style.grid_color;
        let width = self.px(0.5);
        for (axis, coords) in [(Axis::Horizontal, xs), (Axis::Vertical, ys)] {
            let cross = axis.perpendicular();
            for c in coords {
                self.out.push(OverlayPrimitive::Line {
                    path: segment(axis, c, cross.min(view), cross.max(view)),
                    color,
                    width,
                    dash: None,
                });
            }
        }
    }

    fn manual_guides(&mut self) {
        let color = self.style.manual_guide_color;
        for guide in self.state.guides().iter() {
            self.across_view(guide.orientation.constrained_axis(), guide.position, color, guide.locked);
        }
    }

    fn alignment(&mut self, moved: Rect, m: &GuidelineMatch) {
        let axis = m.kind.axis();
        let color = self.style.guide_color;
        match &m.source {
            MatchSource::Elements(ids) => {
                let cross = axis.perpendicular();
                let extent = ids
                    .iter()
                    .filter_map(|id| self.state.bounds_of(*id))
                    .fold(moved, |acc, b| acc.union(b));
                let overshoot = self.px(self.style.overshoot);
                let path = segment(
                    axis,
                    m.position,
                    cross.min(extent) - overshoot,
                    cross.max(extent) + overshoot,
                );
                self.line(path, color, false);
            }
            MatchSource::Guide(_) => self.across_view(axis, m.position, color, false),
            MatchSource::ViewportCenter => self.across_view(axis, m.position, color, true),
        }
    }

    /// A measured span with end caps, drawn at `cross` on the other axis.
    fn span(&mut self, axis: Axis, span: GapSpan, cross: f64, color: Color) {
        let cap = self.px(self.style.cap_size) / 2.0;
        let perpendicular = axis.perpendicular();
        self.line(segment(perpendicular, cross, span.start, span.end), color, false);
        for end in [span.start, span.end] {
            self.line(segment(axis, end, cross - cap, cross + cap), color, false);
        }
        let mid = (span.start + span.end) / 2.0;
        let anchor = match axis {
            Axis::Horizontal => Point::new(mid, cross),
            Axis::Vertical => Point::new(cross, mid),
        };
        self.label(format_distance(span.length()), anchor, color);
    }

    fn distance(&mut self, moved: Rect, d: &DistanceGuidelineMatch) {
        let color = self.style.guide_color;
        let (a, b) = d.reference_ids;
        if let (Some(a), Some(b)) = (self.state.bounds_of(a), self.state.bounds_of(b)) {
            self.span(d.axis, d.reference, cross_between(d.axis, a, b), color);
        }
        if let Some(neighbor) = self.state.bounds_of(d.neighbor_id) {
            self.span(d.axis, d.current, cross_between(d.axis, moved, neighbor), color);
        }
    }

    fn guidelines(&mut self, slice: &GuidelinesState) {
        let Some(moved) = slice.active.and_then(|id| self.state.bounds_of(id)) else {
            return;
        };
        for m in slice.matches.iter() {
            self.alignment(moved, m);
        }
        for d in &slice.distances {
            self.distance(moved, d);
        }
        if let Some(resize) = slice.resize {
            let color = self.style.guide_color;
            if let Some(x) = resize.snapped_x {
                self.across_view(Axis::Horizontal, x, color, false);
            }
            if let Some(y) = resize.snapped_y {
                self.across_view(Axis::Vertical, y, color, false);
            }
        }
    }

    fn measurement(&mut self, m: &Measurement) {
        let color = self.style.measure_color;
        for s in &m.segments {
            self.span(s.axis, s.span, s.cross, color);
        }
    }
}

/// Coordinate across `axis` at which a gap between `a` and `b` is drawn: the
/// middle of their shared band, or the midpoint of their centers.
fn cross_between(axis: Axis, a: Rect, b: Rect) -> f64 {
    let cross = axis.perpendicular();
    if overlaps_on(cross, a, b) {
        let lo = cross.min(a).max(cross.min(b));
        let hi = cross.max(a).min(cross.max(b));
        (lo + hi) / 2.0
    } else {
        (cross.center(a) + cross.center(b)) / 2.0
    }
}

/// Everything to draw over the document for the current state, back to front:
/// grid, manual guides, smart guides, measurements.
pub fn build_overlay(state: &AppState, style: &OverlayStyle) -> Vec<OverlayPrimitive> {
    let mut builder = Builder {
        state,
        style,
        zoom: state.viewport.zoom,
        visible: state.viewport.visible_rect(),
        out: Vec::new(),
    };
    builder.grid();
    builder.manual_guides();
    if let Some(slice) = state.plugin_state::<GuidelinesState>() {
        builder.guidelines(slice);
    }
    if let Some(m) = state
        .plugin_state::<MeasureState>()
        .and_then(|s| s.measurement.as_ref())
    {
        builder.measurement(m);
    }
    builder.out
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::{PathEl, Size};
    use snapline_core::elements::{Element, ElementStyle, SerializableColor};
    use snapline_core::guides::GuideOrientation;
    use snapline_core::input::{Modifiers, MouseButton, PointerEvent};
    use snapline_core::plugin::PluginRegistry;

    fn endpoints(path: &BezPath) -> Vec<Point> {
        path.elements()
            .iter()
            .filter_map(|el| match *el {
                PathEl::MoveTo(p) | PathEl::LineTo(p) => Some(p),
                _ => None,
            })
            .collect()
    }

    fn lines(prims: &[OverlayPrimitive]) -> Vec<(Vec<Point>, Option<f64>)> {
        prims
            .iter()
            .filter_map(|p| match p {
                OverlayPrimitive::Line { path, dash, .. } => Some((endpoints(path), *dash)),
                _ => None,
            })
            .collect()
    }

    fn labels(prims: &[OverlayPrimitive]) -> Vec<String> {
        prims
            .iter()
            .filter_map(|p| match p {
                OverlayPrimitive::Label { text, .. } => Some(text.clone()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_format_distance() {
        assert_eq!(format_distance(9.6), "10");
        assert_eq!(format_distance(10.0), "10");
    }

    #[test]
    fn test_manual_guides_span_view() {
        let mut state = AppState::new();
        state.viewport.size = Size::new(200.0, 100.0);
        state.viewport.zoom = 2.0;
        state.add_guide(GuideOrientation::Vertical, 30.0, None);

        let prims = build_overlay(&state, &OverlayStyle::default());
        let lines = lines(&prims);
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].0, vec![Point::new(30.0, 0.0), Point::new(30.0, 50.0)]);
        match &prims[0] {
            OverlayPrimitive::Line { width, .. } => assert_eq!(*width, 0.5),
            _ => panic!("expected a line"),
        }
    }

    #[test]
    fn test_drag_overlay_shows_alignment_and_distance() {
        let mut state = AppState::new();
        let mut registry = PluginRegistry::with_defaults(&mut state);
        let style = ElementStyle::filled(SerializableColor::black());
        state.add_element(Element::rect(Rect::new(0.0, 0.0, 20.0, 20.0), style.clone()));
        state.add_element(Element::rect(Rect::new(30.0, 0.0, 50.0, 20.0), style.clone()));
        state.add_element(Element::rect(Rect::new(100.0, 40.0, 120.0, 60.0), style));

        registry.dispatch_pointer(
            &mut state,
            &PointerEvent::Down {
                position: Point::new(110.0, 50.0),
                button: MouseButton::Left,
                modifiers: Modifiers::NONE,
            },
        );
        // Lands at x = 60, y = 2: 10 from the row, top 2 below it
        registry.dispatch_pointer(
            &mut state,
            &PointerEvent::Move {
                position: Point::new(70.0, 12.0),
                modifiers: Modifiers::NONE,
            },
        );

        let prims = build_overlay(&state, &OverlayStyle::default());
        let lines = lines(&prims);
        // Top alignment across all three elements, with overshoot
        assert!(lines.contains(&(vec![Point::new(-8.0, 0.0), Point::new(88.0, 0.0)], None)));
        assert!(labels(&prims).iter().all(|l| l == "10"));
        assert_eq!(labels(&prims).len(), 2);
    }

    #[test]
    fn test_grid_only_when_visible() {
        let mut state = AppState::new();
        state.viewport.size = Size::new(40.0, 40.0);
        state.settings.grid.size = 10.0;
        assert!(build_overlay(&state, &OverlayStyle::default()).is_empty());

        state.settings.grid.visible = true;
        // 0, 10, 20, 30, 40 on each axis
        assert_eq!(build_overlay(&state, &OverlayStyle::default()).len(), 10);
    }
}
