//! Interaction points and heatmap results.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use image::{ImageFormat, RgbImage};
use serde::{Deserialize, Serialize};
use std::io::Cursor;
use std::path::PathBuf;

use crate::core::errors::{VisualError, VisualResult};

fn default_weight() -> f64 {
    1.0
}

/// A recorded user interaction on a capture.
///
/// Coordinates are signed so that off-screen events can be passed through;
/// they are skipped during compositing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InteractionPoint {
    pub x: i64,
    pub y: i64,
    /// Scales both the disc radius and its intensity. Defaults to `1.0`.
    #[serde(default = "default_weight")]
    pub weight: f64,
}

impl InteractionPoint {
    /// Creates a point with the default weight of `1.0`.
    pub fn new(x: i64, y: i64) -> Self {
        Self { x, y, weight: 1.0 }
    }

    /// Creates a point with an explicit weight.
    pub fn weighted(x: i64, y: i64, weight: f64) -> Self {
        Self { x, y, weight }
    }
}

/// Outcome of heatmap generation.
#[derive(Debug, Clone, Serialize)]
pub struct HeatmapResult {
    /// The capture the heatmap was composited over.
    pub base_raster_path: PathBuf,
    /// Where the composite was written.
    pub output_path: PathBuf,
    /// The composited raster.
    #[serde(skip)]
    pub overlay_raster: RgbImage,
    /// Number of interaction points supplied, including skipped ones.
    pub interaction_count: usize,
}

impl HeatmapResult {
    /// Encodes the composite as PNG and returns it as standard base64.
    pub fn to_png_base64(&self) -> VisualResult<String> {
        let mut buffer = Cursor::new(Vec::new());
        self.overlay_raster
            .write_to(&mut buffer, ImageFormat::Png)
            .map_err(|e| VisualError::image_encode(&self.output_path, e))?;
        Ok(STANDARD.encode(buffer.into_inner()))
    }
}
