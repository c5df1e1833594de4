//! The visual analysis entry point.
//!
//! [`VisualAnalyzer`] owns one instance of each processing stage and exposes
//! the operations callers use: analysing a capture, comparing two captures,
//! and compositing an interaction heatmap. Every operation reads its inputs
//! from disk and writes at most one output artifact.

use image::GrayImage;
use imageproc::distance_transform::Norm;
use imageproc::morphology;
use rayon::prelude::*;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info};

use crate::analysis::description::{CaptureInfo, describe_screenshot};
use crate::core::config::{ConfigValidator, VisualAnalysisConfig};
use crate::core::errors::VisualResult;
use crate::core::traits::{NoopRecognizer, TextRecognizer};
use crate::domain::{
    ComparisonJob, DiffResult, HeatmapResult, InteractionPoint, ScreenshotAnalysis, UIElement,
};
use crate::processors::threshold::{OtsuThreshold, Polarity, ThresholdStrategy, binarize};
use crate::processors::{
    BoundingBox, DiffEngine, ElementClassifier, HeatmapCompositor, RegionSegmenter,
};
use crate::utils::image::{
    Raster, crop_region, ensure_output_dir, file_size, load_raster, save_image,
};

/// Screenshot analysis, comparison and heatmap generation.
///
/// The analyzer holds no mutable state. It is `Send + Sync` whenever its
/// recognizer is, so one instance can serve concurrent callers as long as
/// they write to distinct output paths.
///
/// # Example
///
/// ```rust,no_run
/// use qa_visual::prelude::*;
///
/// let analyzer = VisualAnalyzer::new();
/// let diff = analyzer.compare_screenshots("baseline.png", "current.png", "diff.png")?;
/// println!("similarity {:.3}, {} regions", diff.similarity_score, diff.difference_region_count);
/// # Ok::<(), qa_visual::core::VisualError>(())
/// ```
#[derive(Debug, Clone)]
pub struct VisualAnalyzer<R = NoopRecognizer> {
    config: VisualAnalysisConfig,
    diff: DiffEngine,
    segmenter: RegionSegmenter,
    classifier: ElementClassifier,
    heatmap: HeatmapCompositor,
    recognizer: R,
}

impl VisualAnalyzer<NoopRecognizer> {
    /// Creates an analyzer with default settings and no text recognition.
    pub fn new() -> Self {
        Self::with_recognizer(NoopRecognizer)
    }
}

impl Default for VisualAnalyzer<NoopRecognizer> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: TextRecognizer> VisualAnalyzer<R> {
    /// Creates an analyzer with default settings and the given recognizer.
    pub fn with_recognizer(recognizer: R) -> Self {
        Self::build(VisualAnalysisConfig::default(), recognizer)
    }

    /// Creates an analyzer from a configuration.
    ///
    /// # Errors
    ///
    /// Returns `VisualError::Config` if the configuration is invalid.
    pub fn with_config(config: VisualAnalysisConfig, recognizer: R) -> VisualResult<Self> {
        config.validate()?;
        Ok(Self::build(config, recognizer))
    }

    fn build(config: VisualAnalysisConfig, recognizer: R) -> Self {
        Self {
            diff: DiffEngine::new(config.diff.clone()),
            segmenter: RegionSegmenter::new(config.segmentation.clone()),
            classifier: ElementClassifier::new(),
            heatmap: HeatmapCompositor::new(config.heatmap.clone()),
            config,
            recognizer,
        }
    }

    /// Replaces the threshold strategy used by comparison and segmentation.
    pub fn with_threshold_strategy(mut self, strategy: Arc<dyn ThresholdStrategy>) -> Self {
        self.diff = self.diff.with_threshold_strategy(strategy.clone());
        self.segmenter = self.segmenter.with_threshold_strategy(strategy);
        self
    }

    pub fn config(&self) -> &VisualAnalysisConfig {
        &self.config
    }

    pub fn recognizer(&self) -> &R {
        &self.recognizer
    }

    /// Segments a capture into classified UI elements and describes it.
    ///
    /// Each candidate region is binarised and passed to the recognizer; the
    /// recognized text, if any, refines its classification. The whole capture
    /// is recognized separately after speckle removal.
    ///
    /// # Errors
    ///
    /// * `VisualError::ImageNotFound` if `path` does not exist.
    /// * `VisualError::ImageDecode` if it cannot be decoded.
    pub fn analyze_screenshot(&self, path: impl AsRef<Path>) -> VisualResult<ScreenshotAnalysis> {
        let path = path.as_ref();
        let raster = load_raster(path)?;
        let size_bytes = file_size(path)?;

        let boxes = self.segmenter.segment(&raster);
        let elements = self.classify_regions(&raster, &boxes);
        let recognized_text = self.recognizer.recognize(&prepare_page(&raster.to_luma8()));

        let info = CaptureInfo::from_path(path, size_bytes, raster.dimensions(), raster.channels());
        let description = describe_screenshot(
            &info,
            &recognized_text,
            &elements,
            self.config.description_element_limit,
        );

        info!(
            "Analyzed {}: {} elements, {} characters of text",
            path.display(),
            elements.len(),
            recognized_text.chars().count()
        );

        Ok(ScreenshotAnalysis {
            screenshot_path: path.to_path_buf(),
            description,
            elements,
            recognized_text,
        })
    }

    /// Compares two captures and writes the annotated diff.
    ///
    /// # Errors
    ///
    /// * `VisualError::ImageNotFound` / `VisualError::ImageDecode` for either input.
    /// * `VisualError::OutputPath` if the directory of `diff_output` does not exist.
    /// * `VisualError::DimensionMismatch` if the sizes differ and resampling is disabled.
    /// * `VisualError::InvalidInput` if either side of a capture is smaller than
    ///   the similarity window (7 px by default).
    ///
    /// Nothing is written unless every step succeeds.
    pub fn compare_screenshots(
        &self,
        baseline: impl AsRef<Path>,
        current: impl AsRef<Path>,
        diff_output: impl AsRef<Path>,
    ) -> VisualResult<DiffResult> {
        let (baseline, current, diff_output) =
            (baseline.as_ref(), current.as_ref(), diff_output.as_ref());
        let baseline_raster = load_raster(baseline)?;
        let current_raster = load_raster(current)?;
        ensure_output_dir(diff_output)?;

        let result = self.diff.compare(&baseline_raster, &current_raster)?;
        save_image(&result.annotated_raster, diff_output)?;

        info!(
            "Compared {} against {}: diff written to {}",
            current.display(),
            baseline.display(),
            diff_output.display()
        );
        Ok(result)
    }

    /// Runs independent comparisons, in parallel above the configured threshold.
    ///
    /// Results are returned in job order; one failing job does not affect the
    /// others.
    pub fn compare_batch(&self, jobs: &[ComparisonJob]) -> Vec<VisualResult<DiffResult>> {
        let run = |job: &ComparisonJob| {
            self.compare_screenshots(&job.baseline, &job.current, &job.diff_output)
        };
        if jobs.len() > self.config.parallel_threshold {
            debug!("Running {} comparisons in parallel", jobs.len());
            jobs.par_iter().map(run).collect()
        } else {
            jobs.iter().map(run).collect()
        }
    }

    /// Composites interaction points over a capture and writes the result.
    ///
    /// Points outside the capture are skipped; if none remain the output is
    /// a copy of the capture.
    ///
    /// # Errors
    ///
    /// * `VisualError::ImageNotFound` / `VisualError::ImageDecode` for `base`.
    /// * `VisualError::OutputPath` if the directory of `output` does not exist.
    pub fn generate_heatmap(
        &self,
        base: impl AsRef<Path>,
        points: &[InteractionPoint],
        output: impl AsRef<Path>,
    ) -> VisualResult<HeatmapResult> {
        let (base, output) = (base.as_ref(), output.as_ref());
        let raster = load_raster(base)?;
        ensure_output_dir(output)?;

        let overlay = self.heatmap.composite(&raster, points);
        save_image(&overlay, output)?;

        info!(
            "Heatmap of {} interactions written to {}",
            points.len(),
            output.display()
        );
        Ok(HeatmapResult {
            base_raster_path: base.to_path_buf(),
            output_path: output.to_path_buf(),
            overlay_raster: overlay,
            interaction_count: points.len(),
        })
    }

    fn classify_regions(&self, raster: &Raster, boxes: &[BoundingBox]) -> Vec<UIElement> {
        let rgb = raster.to_rgb8();
        let classify = |bbox: &BoundingBox| {
            let region = Raster::from_rgb(crop_region(&rgb, bbox)).to_luma8();
            let text = self.recognizer.recognize(&prepare_region(&region));
            self.classifier.classify(bbox, &text)
        };
        if boxes.len() > self.config.parallel_threshold {
            boxes.par_iter().map(classify).collect()
        } else {
            boxes.iter().map(classify).collect()
        }
    }
}

/// Binarises a region for recognition, keeping light pixels as foreground.
fn prepare_region(region: &GrayImage) -> GrayImage {
    binarize(region, &OtsuThreshold, Polarity::Normal)
}

/// Binarises a whole capture and strips isolated speckles.
fn prepare_page(page: &GrayImage) -> GrayImage {
    morphology::open(&prepare_region(page), Norm::LInf, 1)
}
