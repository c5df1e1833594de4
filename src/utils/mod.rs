//! Utility functions for the visual analysis engine.
//!
//! This module provides image access (loading, saving, cropping, resampling),
//! outline drawing for annotated outputs, and logging setup.

pub mod image;
pub mod visualization;

// Re-export image access functions
pub use image::{
    Raster, crop_region, ensure_output_dir, load_raster, load_rasters,
    load_rasters_with_threshold, resample, save_image,
};

pub use visualization::{DIFF_OUTLINE_COLOR, draw_region_outlines};

/// Initializes the tracing subscriber for logging.
///
/// This function sets up the tracing subscriber with environment filter and formatting layer.
/// It's typically called at the start of an application to enable logging.
pub fn init_tracing() {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer())
        .init();
}
