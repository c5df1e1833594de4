//! Image processing stages of the visual analysis engine.
//!
//! This module provides the algorithms behind every engine operation. Each
//! stage is a pure function of its inputs and configuration.
//!
//! # Modules
//!
//! * `classification` - Rule-based UI-element classification
//! * `colormap` - Colour ramps for density fields
//! * `diff` - Screenshot comparison (similarity, regions, annotation)
//! * `filter` - Floating-point planes and window filters
//! * `geometry` - Bounding boxes and contour measurements
//! * `heatmap` - Interaction heatmap compositing
//! * `segmentation` - Candidate UI-element segmentation
//! * `ssim` - Structural similarity
//! * `threshold` - Histograms, threshold selection and binarisation

pub mod classification;
pub mod colormap;
pub mod diff;
pub mod filter;
mod geometry;
pub mod heatmap;
pub mod segmentation;
pub mod ssim;
pub mod threshold;

pub use classification::{ElementClassifier, classify_by_geometry, classify_by_text};
pub use colormap::jet;
pub use diff::DiffEngine;
pub use filter::{DensityPlane, FloatPlane, gaussian_blur, normalize, uniform_filter};
pub use geometry::*;
pub use heatmap::HeatmapCompositor;
pub use segmentation::RegionSegmenter;
pub use ssim::{SsimMap, SsimParams, structural_similarity};
pub use threshold::{
    FixedThreshold, OtsuThreshold, Polarity, ThresholdStrategy, apply_threshold, binarize,
    histogram, otsu_threshold,
};
