//! Renderer trait and a tiny-skia backed implementation.

use crate::overlay::{OverlayPrimitive, OverlayStyle, build_overlay};
use kurbo::{Affine, Point};
use peniko::Color;
use snapline_core::optical::to_skia_path;
use snapline_core::state::AppState;
use thiserror::Error;
use tiny_skia::{Paint, Pixmap, Stroke, StrokeDash, Transform};

/// Renderer errors.
#[derive(Debug, Error)]
pub enum RendererError {
    #[error("Initialization failed: {0}")]
    InitFailed(String),
    #[error("PNG encoding failed: {0}")]
    Encode(String),
}

/// Context for a single overlay frame.
pub struct RenderContext<'a> {
    pub state: &'a AppState,
    pub style: OverlayStyle,
    /// Device pixel ratio (for HiDPI).
    pub scale_factor: f64,
}

impl<'a> RenderContext<'a> {
    pub fn new(state: &'a AppState) -> Self {
        Self {
            state,
            style: OverlayStyle::default(),
            scale_factor: 1.0,
        }
    }

    /// Set the scale factor for HiDPI.
    pub fn with_scale_factor(mut self, scale_factor: f64) -> Self {
        self.scale_factor = scale_factor;
        self
    }

    pub fn with_style(mut self, style: OverlayStyle) -> Self {
        self.style = style;
        self
    }

    /// Document to device pixel transform.
    pub fn transform(&self) -> Affine {
        Affine::scale(self.scale_factor) * self.state.viewport.transform()
    }
}

/// Trait for overlay backends.
pub trait Renderer {
    /// Draw the overlay for a frame.
    fn build_scene(&mut self, ctx: &RenderContext);
}

/// A label placed in device pixels, for the host to draw text at.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedLabel {
    pub text: String,
    pub position: Point,
    pub color: Color,
}

/// Draws overlay lines into a transparent pixmap.
///
/// tiny-skia has no text shaping, so labels are collected in
/// [`PixmapRenderer::labels`] for the host to draw.
pub struct PixmapRenderer {
    pixmap: Pixmap,
    labels: Vec<PlacedLabel>,
}

impl std::fmt::Debug for PixmapRenderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PixmapRenderer")
            .field("width", &self.pixmap.width())
            .field("height", &self.pixmap.height())
            .field("labels", &self.labels.len())
            .finish()
    }
}

fn skia_color(color: Color) -> tiny_skia::Color {
    let c = color.to_rgba8();
    tiny_skia::Color::from_rgba8(c.r, c.g, c.b, c.a)
}

fn skia_transform(affine: Affine) -> Transform {
    let [a, b, c, d, e, f] = affine.as_coeffs();
    Transform::from_row(a as f32, b as f32, c as f32, d as f32, e as f32, f as f32)
}

impl PixmapRenderer {
    pub fn new(width: u32, height: u32) -> Result<Self, RendererError> {
        let pixmap = Pixmap::new(width, height)
            .ok_or_else(|| RendererError::InitFailed(format!("cannot allocate {width}x{height} pixmap")))?;
        Ok(Self {
            pixmap,
            labels: Vec::new(),
        })
    }

    pub fn pixmap(&self) -> &Pixmap {
        &self.pixmap
    }

    pub fn labels(&self) -> &[PlacedLabel] {
        &self.labels
    }

    /// Encode the current frame as PNG.
    pub fn encode_png(&self) -> Result<Vec<u8>, RendererError> {
        self.pixmap
            .encode_png()
            .map_err(|e| RendererError::Encode(e.to_string()))
    }
}

impl Renderer for PixmapRenderer {
    fn build_scene(&mut self, ctx: &RenderContext) {
        self.pixmap.fill(tiny_skia::Color::TRANSPARENT);
        self.labels.clear();

        let affine = ctx.transform();
        let transform = skia_transform(affine);
        let mut paint = Paint::default();
        paint.anti_alias = true;

        for primitive in build_overlay(ctx.state, &ctx.style) {
            match primitive {
                OverlayPrimitive::Line {
                    path,
                    color,
                    width,
                    dash,
                } => {
                    let Some(path) = to_skia_path(&path) else {
                        continue;
                    };
                    paint.set_color(skia_color(color));
                    let stroke = Stroke {
                        width: width as f32,
                        dash: dash.and_then(|d| StrokeDash::new(vec![d as f32, d as f32], 0.0)),
                        ..Default::default()
                    };
                    self.pixmap.stroke_path(&path, &paint, &stroke, transform, None);
                }
                OverlayPrimitive::Label {
                    text,
                    anchor,
                    color,
                } => self.labels.push(PlacedLabel {
                    text,
                    position: affine * anchor,
                    color,
                }),
            }
        }
        log::trace!("Overlay frame: {} labels", self.labels.len());
    }
}
