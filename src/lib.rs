//! # QA Visual
//!
//! A Rust library for screenshot-driven visual QA. Given one or two screen
//! captures it measures structural differences, segments and classifies UI
//! elements, and renders interaction heatmaps.
//!
//! ## Features
//!
//! - Structural-similarity comparison with localised difference regions
//! - Annotated diff images with each region outlined
//! - UI-element segmentation and rule-based classification
//! - Pluggable text recognition through the [`TextRecognizer`](core::TextRecognizer) trait
//! - Interaction heatmaps blended over the base capture
//! - Batch loading and comparison with `rayon`
//!
//! ## Modules
//!
//! * [`analysis`] - The [`VisualAnalyzer`](analysis::VisualAnalyzer) entry point
//! * [`core`] - Configuration, constants, error handling and traits
//! * [`domain`] - Result types (elements, comparisons, heatmaps)
//! * [`processors`] - Similarity, thresholding, segmentation, classification and heatmaps
//! * [`utils`] - Image access, outline drawing and logging setup
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use qa_visual::prelude::*;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! qa_visual::utils::init_tracing();
//!
//! let analyzer = VisualAnalyzer::new();
//!
//! let diff = analyzer.compare_screenshots("baseline.png", "current.png", "diff.png")?;
//! for region in &diff.difference_regions {
//!     println!("changed: {region:?}");
//! }
//!
//! let analysis = analyzer.analyze_screenshot("current.png")?;
//! println!("{}", analysis.description);
//!
//! let clicks = [InteractionPoint::new(120, 40), InteractionPoint::weighted(300, 200, 2.0)];
//! let heatmap = analyzer.generate_heatmap("current.png", &clicks, "heatmap.png")?;
//! println!("{} interactions", heatmap.interaction_count);
//! # Ok(())
//! # }
//! ```
//!
//! ### JSON Configuration
//!
//! ```rust,no_run
//! use qa_visual::prelude::*;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = VisualAnalysisConfig::from_json_str(r#"
//! {
//!   "diff": { "min_region_area": 25.0, "size_mismatch": "reject" },
//!   "heatmap": { "accumulation": "max" }
//! }
//! "#)?;
//! let analyzer = VisualAnalyzer::with_config(config, NoopRecognizer)?;
//! # Ok(())
//! # }
//! ```

// Core modules
pub mod analysis;
pub mod core;
pub mod domain;
pub mod processors;
pub mod utils;

/// Prelude module for convenient imports.
///
/// ```rust
/// use qa_visual::prelude::*;
/// ```
///
/// Included items cover the common workflow:
/// - The analyzer and its configuration (`VisualAnalyzer`, `VisualAnalysisConfig`)
/// - Text recognition (`TextRecognizer`, `NoopRecognizer`)
/// - Results (`DiffResult`, `ScreenshotAnalysis`, `HeatmapResult`, `UIElement`)
/// - Essential error and result types (`VisualError`, `VisualResult`)
/// - Basic image loading (`load_raster`, `load_rasters`)
///
/// For the individual processing stages, import from [`crate::processors`].
pub mod prelude {
    // Entry point
    pub use crate::analysis::VisualAnalyzer;
    pub use crate::core::{NoopRecognizer, TextRecognizer, VisualAnalysisConfig};

    // Results
    pub use crate::domain::{
        ComparisonJob, DiffResult, ElementType, HeatmapResult, InteractionPoint,
        ScreenshotAnalysis, UIElement,
    };
    pub use crate::processors::BoundingBox;

    // Error Handling (essential)
    pub use crate::core::{VisualError, VisualResult};

    // Image Utility (minimal)
    pub use crate::utils::{Raster, load_raster, load_rasters};
}
