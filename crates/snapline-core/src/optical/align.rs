//! Offsets that center content optically, and applying them to the store.

use super::OpticalError;
use super::pairs::{ContainerPair, detect_pairs, find_container, sort_outermost_first};
use super::raster::rasterize;
use super::visual_center::visual_center;
use crate::elements::SerializableColor;
use crate::geometry::EPSILON;
use crate::settings::{OpticalMode, OpticalSettings};
use crate::state::AppState;
use kurbo::{Point, Rect, Vec2};
use serde::{Deserialize, Serialize};

/// An applied optical alignment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpticalResult {
    pub pair: ContainerPair,
    /// Translation applied to the content.
    pub offset: Vec2,
    pub mode: OpticalMode,
    /// Normalised visual center of the content, in visual mode.
    pub visual_center: Option<Point>,
}

/// Clamp one axis of an offset so `[min, max]` moved by it stays inside
/// `[lo_limit, hi_limit]`. An empty range resolves to its midpoint.
fn clamp_axis(raw: f64, min: f64, max: f64, lo_limit: f64, hi_limit: f64) -> f64 {
    let lo = lo_limit - min;
    let hi = hi_limit - max;
    if lo > hi {
        (lo + hi) / 2.0
    } else {
        raw.clamp(lo, hi)
    }
}

/// Offset that moves the point at normalised `visual` within `content` onto
/// the center of `container`, keeping the content `padding` inside the
/// container's edges.
pub fn compute_offset(container: Rect, content: Rect, visual: Point, padding: f64) -> Vec2 {
    let target = container.center();
    let point = Point::new(
        content.x0 + visual.x * content.width(),
        content.y0 + visual.y * content.height(),
    );
    let raw = target - point;
    Vec2::new(
        clamp_axis(raw.x, content.x0, content.x1, container.x0 + padding, container.x1 - padding),
        clamp_axis(raw.y, content.y0, content.y1, container.y0 + padding, container.y1 - padding),
    )
}

fn measure_visual_center(
    state: &AppState,
    pair: ContainerPair,
    settings: &OpticalSettings,
) -> Result<Point, OpticalError> {
    let content = state
        .element(pair.content)
        .ok_or_else(|| OpticalError::InvalidPair(format!("content {} not found", pair.content)))?;
    let container = state
        .element(pair.container)
        .ok_or_else(|| OpticalError::InvalidPair(format!("container {} not found", pair.container)))?;

    let raster = rasterize(&content.path, content.bounds(), &content.style, settings.raster_size)?;
    let background = container.style.fill_color.unwrap_or_else(SerializableColor::white);
    visual_center(&raster, background).ok_or(OpticalError::EmptySignal)
}

/// Offset that would center the pair's content, without applying it.
///
/// Returns the offset and, in visual mode, the normalised visual center.
/// Failures are logged and give `None`.
pub fn optical_offset(
    state: &AppState,
    pair: ContainerPair,
    settings: &OpticalSettings,
) -> Option<(Vec2, Option<Point>)> {
    let content = state.bounds_of(pair.content)?;
    let container = state.bounds_of(pair.container)?;

    match settings.mode {
        OpticalMode::Mathematical => {
            let offset = compute_offset(container, content, Point::new(0.5, 0.5), settings.protection_padding);
            Some((offset, None))
        }
        OpticalMode::Visual => match measure_visual_center(state, pair, settings) {
            Ok(center) => {
                let offset = compute_offset(container, content, center, settings.protection_padding);
                Some((offset, Some(center)))
            }
            Err(OpticalError::EmptySignal) => {
                log::debug!("No visual signal for {}, leaving it in place", pair.content);
                None
            }
            Err(e) => {
                log::warn!("Optical alignment of {} failed: {}", pair.content, e);
                None
            }
        },
    }
}

/// Center one pair's content and write the move to the store.
pub fn align_pair(state: &mut AppState, pair: ContainerPair) -> Option<OpticalResult> {
    let settings = state.settings.optical.clone();
    let (offset, visual_center) = optical_offset(state, pair, &settings)?;

    if offset.hypot() > EPSILON {
        if let Err(e) = state.translate_element(pair.content, offset) {
            log::warn!("Cannot move {}: {}", pair.content, e);
            return None;
        }
    }
    log::info!(
        "Optically aligned {} in {} by ({:.2}, {:.2})",
        pair.content,
        pair.container,
        offset.x,
        offset.y
    );
    Some(OpticalResult {
        pair,
        offset,
        mode: settings.mode,
        visual_center,
    })
}

/// Align the selected elements inside their containers.
///
/// A selected element that has a container is centered in it; a selected
/// element that is itself a container gets its contents centered.
pub fn align_selection(state: &mut AppState) -> Vec<OpticalResult> {
    let ratio = state.settings.optical.min_area_ratio;
    let selection = state.selection().to_vec();
    let all_pairs = detect_pairs(state, ratio);

    let mut pairs: Vec<ContainerPair> = Vec::new();
    for id in selection {
        if let Some(container) = find_container(state, id, ratio) {
            pairs.push(ContainerPair { container, content: id });
        }
        pairs.extend(all_pairs.iter().filter(|p| p.container == id).copied());
    }
    let mut seen = Vec::new();
    pairs.retain(|p| {
        let fresh = !seen.contains(&p.content);
        seen.push(p.content);
        fresh
    });
    sort_outermost_first(state, &mut pairs);

    pairs.into_iter().filter_map(|pair| align_pair(state, pair)).collect()
}

/// Align every detected pair in the document, outermost containers first.
pub fn align_all(state: &mut AppState) -> Vec<OpticalResult> {
    let pairs = detect_pairs(state, state.settings.optical.min_area_ratio);
    pairs.into_iter().filter_map(|pair| align_pair(state, pair)).collect()
}
