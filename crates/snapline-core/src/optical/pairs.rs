//! Container/content pair detection.

use crate::elements::{Element, ElementId};
use crate::geometry::{contains_rect, is_degenerate};
use crate::state::AppState;
use kurbo::Rect;
use serde::{Deserialize, Serialize};

/// Content element nested inside a larger container element.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ContainerPair {
    pub container: ElementId,
    pub content: ElementId,
}

fn area(r: Rect) -> f64 {
    r.width() * r.height()
}

fn usable(el: &Element) -> bool {
    el.visible && !is_degenerate(el.bounds())
}

/// Smallest visible element that contains `content` and is at least
/// `min_area_ratio` times its area.
pub fn find_container(state: &AppState, content: ElementId, min_area_ratio: f64) -> Option<ElementId> {
    let inner = state.element(content).filter(|el| usable(el))?.bounds();
    state
        .elements()
        .ordered()
        .filter(|el| el.id() != content && usable(el))
        .map(|el| (el.id(), el.bounds()))
        .filter(|(_, outer)| contains_rect(*outer, inner) && area(*outer) >= min_area_ratio * area(inner))
        .min_by(|a, b| area(a.1).total_cmp(&area(b.1)))
        .map(|(id, _)| id)
}

/// Pair every element that sits inside another with its smallest container.
///
/// Pairs come out outermost first, see [`sort_outermost_first`].
pub fn detect_pairs(state: &AppState, min_area_ratio: f64) -> Vec<ContainerPair> {
    let mut pairs: Vec<ContainerPair> = state
        .elements()
        .ordered()
        .filter_map(|el| {
            find_container(state, el.id(), min_area_ratio).map(|container| ContainerPair {
                container,
                content: el.id(),
            })
        })
        .collect();
    sort_outermost_first(state, &mut pairs);
    pairs
}

/// Order pairs by descending container area, keeping z-order among equals.
///
/// A container is always larger than its content, so a button is centered in
/// its panel before the icon inside it is centered in the button.
pub fn sort_outermost_first(state: &AppState, pairs: &mut [ContainerPair]) {
    let container_area = |pair: &ContainerPair| state.bounds_of(pair.container).map_or(0.0, area);
    pairs.sort_by(|a, b| container_area(b).total_cmp(&container_area(a)));
}
