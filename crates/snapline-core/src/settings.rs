//! Editor settings for guidelines, grid and optical alignment.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Settings errors.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("IO error: {0}")]
    Io(String),
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Default snap threshold in screen pixels.
pub const DEFAULT_SNAP_THRESHOLD_PX: f64 = 5.0;

/// Multiple of the snap threshold the pointer must push past a sticky snap
/// before it releases.
pub const DEFAULT_STICKY_BREAK_FACTOR: f64 = 2.0;

/// Guideline and smart-snap settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GuidelineSettings {
    /// Master switch for alignment guidelines.
    pub enabled: bool,
    /// Snap threshold in screen pixels (divided by zoom before matching).
    pub threshold_px: f64,
    pub snap_to_edges: bool,
    pub snap_to_centers: bool,
    pub snap_to_manual_guides: bool,
    pub snap_to_viewport_center: bool,
    /// Compute and show equal-spacing distance guides.
    pub show_distances: bool,
    /// Hold snapped positions until the pointer pushes through.
    pub sticky: bool,
    /// Break-out distance as a multiple of the threshold.
    pub sticky_break_factor: f64,
}

impl Default for GuidelineSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            threshold_px: DEFAULT_SNAP_THRESHOLD_PX,
            snap_to_edges: true,
            snap_to_centers: true,
            snap_to_manual_guides: true,
            snap_to_viewport_center: true,
            show_distances: true,
            sticky: true,
            sticky_break_factor: DEFAULT_STICKY_BREAK_FACTOR,
        }
    }
}

/// Grid display and snapping settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridSettings {
    /// Grid cell size in document units.
    pub size: f64,
    pub visible: bool,
    /// Snap dragged elements to grid lines when no guideline matched.
    pub snap: bool,
}

impl Default for GridSettings {
    fn default() -> Self {
        Self {
            size: 8.0,
            visible: false,
            snap: false,
        }
    }
}

/// How content is centered inside its container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum OpticalMode {
    /// Center the perceived (rendered) center of mass.
    #[default]
    Visual,
    /// Center the bounding boxes.
    Mathematical,
}

/// Optical alignment settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OpticalSettings {
    pub mode: OpticalMode,
    /// Longest side of the raster used for visual center estimation, in pixels.
    pub raster_size: u32,
    /// Margin inside the container edges that content may not cross.
    pub protection_padding: f64,
    /// Minimum container/content area ratio for a pair.
    pub min_area_ratio: f64,
}

impl Default for OpticalSettings {
    fn default() -> Self {
        Self {
            mode: OpticalMode::Visual,
            raster_size: 128,
            protection_padding: 2.0,
            min_area_ratio: 1.05,
        }
    }
}

/// All editor settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorSettings {
    pub guidelines: GuidelineSettings,
    pub grid: GridSettings,
    pub optical: OpticalSettings,
}

impl EditorSettings {
    /// Parse settings from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        serde_json::from_str(json).map_err(|e| SettingsError::Serialization(e.to_string()))
    }

    /// Serialize settings to pretty JSON.
    pub fn to_json(&self) -> Result<String, SettingsError> {
        serde_json::to_string_pretty(self).map_err(|e| SettingsError::Serialization(e.to_string()))
    }

    /// Load settings from a JSON file.
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path).map_err(|e| SettingsError::Io(e.to_string()))?;
        Self::from_json(&json)
    }

    /// Save settings to a JSON file.
    pub fn save(&self, path: &Path) -> Result<(), SettingsError> {
        let json = self.to_json()?;
        std::fs::write(path, json).map_err(|e| SettingsError::Io(e.to_string()))?;
        log::debug!("Saved settings to {:?}", path);
        Ok(())
    }
}
