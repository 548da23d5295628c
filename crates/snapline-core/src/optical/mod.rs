//! Optical alignment: center content inside its container by how it looks.
//!
//! Icons and glyphs rarely look centered when their bounding boxes are. The
//! content is rasterized, its contrast-weighted center of mass is estimated, and
//! the content is moved so that point sits on the container's center.

mod align;
mod pairs;
mod raster;
mod visual_center;

pub use align::{OpticalResult, align_all, align_pair, align_selection, compute_offset, optical_offset};
pub use pairs::{ContainerPair, detect_pairs, find_container};
pub use raster::{Raster, rasterize, to_skia_path};
pub use visual_center::visual_center;

use thiserror::Error;

/// Optical alignment errors.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum OpticalError {
    #[error("Raster failed: {0}")]
    Raster(String),
    #[error("Content has no visible pixels")]
    EmptySignal,
    #[error("Invalid pair: {0}")]
    InvalidPair(String),
}
