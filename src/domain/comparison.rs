//! Results of screenshot comparison and analysis.

use image::RgbImage;
use serde::Serialize;
use std::path::PathBuf;

use crate::domain::element::UIElement;
use crate::processors::BoundingBox;

/// Outcome of comparing a baseline capture against a current capture.
///
/// `similarity_score == 1.0` and `difference_region_count == 0` exactly when
/// the two captures are pixel-identical after alignment.
#[derive(Debug, Clone, Serialize)]
pub struct DiffResult {
    /// Mean structural similarity, in `[0, 1]`.
    pub similarity_score: f64,
    /// Number of retained difference regions.
    pub difference_region_count: usize,
    /// Share of pixels classified as different, in `[0, 100]`.
    pub different_pixel_percentage: f64,
    /// Bounding boxes of the retained difference regions.
    pub difference_regions: Vec<BoundingBox>,
    /// The aligned current capture with each region outlined.
    #[serde(skip)]
    pub annotated_raster: RgbImage,
}

impl DiffResult {
    /// Returns true if no difference region was retained.
    pub fn is_identical(&self) -> bool {
        self.difference_region_count == 0
    }
}

/// Structured analysis of a single capture.
#[derive(Debug, Clone, Serialize)]
pub struct ScreenshotAnalysis {
    /// The analysed capture.
    pub screenshot_path: PathBuf,
    /// Human-readable summary of the capture and its elements.
    pub description: String,
    /// Classified UI elements in discovery order.
    pub elements: Vec<UIElement>,
    /// Text recognized over the whole capture.
    pub recognized_text: String,
}

/// A single comparison in a batch.
#[derive(Debug, Clone)]
pub struct ComparisonJob {
    /// Baseline capture.
    pub baseline: PathBuf,
    /// Current capture.
    pub current: PathBuf,
    /// Where the annotated diff is written.
    pub diff_output: PathBuf,
}

impl ComparisonJob {
    /// Creates a new comparison job.
    pub fn new(
        baseline: impl Into<PathBuf>,
        current: impl Into<PathBuf>,
        diff_output: impl Into<PathBuf>,
    ) -> Self {
        Self {
            baseline: baseline.into(),
            current: current.into(),
            diff_output: diff_output.into(),
        }
    }
}
