//! Screenshot comparison.
//!
//! The comparison runs in four stages:
//!
//! 1. Align: a current capture of a different size is resampled to the
//!    baseline size (or rejected, see [`SizeMismatchPolicy`]). Resampling is
//!    lossy, so comparisons across resolutions are approximate.
//! 2. Score: structural similarity of the grayscale captures.
//! 3. Localise: the 8-bit similarity map is binarised with an automatic
//!    threshold, inverted so dissimilar pixels are foreground, and the
//!    external contours of the foreground become difference regions.
//! 4. Annotate: the regions are outlined on a copy of the aligned capture.

use image::RgbImage;
use imageproc::contours::find_contours;
use std::sync::Arc;
use tracing::{debug, info};

use crate::core::config::{DiffConfig, SizeMismatchPolicy};
use crate::core::constants::GRAY_DATA_RANGE;
use crate::core::errors::{VisualError, VisualResult};
use crate::domain::DiffResult;
use crate::processors::geometry::{BoundingBox, contour_area};
use crate::processors::ssim::{SsimParams, structural_similarity};
use crate::processors::threshold::{
    OtsuThreshold, Polarity, ThresholdStrategy, binarize, count_foreground,
};
use crate::utils::image::{Raster, resample};
use crate::utils::visualization::{DIFF_OUTLINE_COLOR, draw_region_outlines};

/// Compares a baseline capture against a current capture.
#[derive(Debug, Clone)]
pub struct DiffEngine {
    config: DiffConfig,
    threshold: Arc<dyn ThresholdStrategy>,
}

impl Default for DiffEngine {
    fn default() -> Self {
        Self::new(DiffConfig::default())
    }
}

impl DiffEngine {
    /// Creates an engine using Otsu thresholding.
    pub fn new(config: DiffConfig) -> Self {
        Self {
            config,
            threshold: Arc::new(OtsuThreshold),
        }
    }

    /// Replaces the threshold selection strategy.
    pub fn with_threshold_strategy(mut self, strategy: Arc<dyn ThresholdStrategy>) -> Self {
        self.threshold = strategy;
        self
    }

    pub fn config(&self) -> &DiffConfig {
        &self.config
    }

    /// Compares `current` against `baseline`.
    ///
    /// # Errors
    ///
    /// * `VisualError::DimensionMismatch` if sizes differ and the policy is
    ///   [`SizeMismatchPolicy::Reject`].
    /// * `VisualError::InvalidInput` if the baseline is smaller than the
    ///   similarity window.
    pub fn compare(&self, baseline: &Raster, current: &Raster) -> VisualResult<DiffResult> {
        let aligned = self.align(baseline, current)?;

        let baseline_gray = baseline.to_luma8();
        let current_gray = Raster::from_rgb(aligned.clone()).to_luma8();

        let params = SsimParams {
            window_size: self.config.window_size,
            k1: self.config.k1,
            k2: self.config.k2,
            data_range: GRAY_DATA_RANGE,
        };
        let ssim = structural_similarity(&baseline_gray, &current_gray, &params)?;
        debug!("Structural similarity: {:.6}", ssim.mean);

        let mask = binarize(&ssim.to_gray(), self.threshold.as_ref(), Polarity::Inverted);
        let total_pixels = mask.width() as u64 * mask.height() as u64;
        let different_pixel_percentage =
            100.0 * count_foreground(&mask) as f64 / total_pixels as f64;

        let difference_regions: Vec<BoundingBox> = find_contours::<u32>(&mask)
            .iter()
            .filter(|contour| contour.parent.is_none())
            .filter(|contour| contour_area(contour) >= self.config.min_region_area)
            .filter_map(BoundingBox::from_contour)
            .collect();

        let annotated_raster = draw_region_outlines(
            &aligned,
            &difference_regions,
            self.config.outline_thickness,
            DIFF_OUTLINE_COLOR,
        );

        info!(
            "Comparison finished: similarity {:.4}, {} regions, {:.2}% different",
            ssim.mean,
            difference_regions.len(),
            different_pixel_percentage
        );

        Ok(DiffResult {
            similarity_score: ssim.mean,
            difference_region_count: difference_regions.len(),
            different_pixel_percentage,
            difference_regions,
            annotated_raster,
        })
    }

    /// Returns `current` as RGB at the baseline size.
    fn align(&self, baseline: &Raster, current: &Raster) -> VisualResult<RgbImage> {
        let current_rgb = current.to_rgb8();
        if baseline.dimensions() == current.dimensions() {
            return Ok(current_rgb);
        }
        match self.config.size_mismatch {
            SizeMismatchPolicy::Reject => Err(VisualError::DimensionMismatch {
                baseline: baseline.dimensions(),
                current: current.dimensions(),
            }),
            SizeMismatchPolicy::Resample => {
                let (w, h) = baseline.dimensions();
                info!(
                    "Resampling current capture from {}x{} to {}x{}",
                    current.width(),
                    current.height(),
                    w,
                    h
                );
                Ok(resample(&current_rgb, w, h))
            }
        }
    }
}
