//! The core module of the visual analysis engine.
//!
//! This module contains the fundamental components shared by every operation:
//! - Configuration management
//! - Constants used throughout the engine
//! - Error handling
//! - Traits for external collaborators (text recognition)

pub mod config;
pub mod constants;
pub mod errors;
pub mod traits;

pub use crate::utils::{Raster, load_raster, load_rasters};
pub use config::{
    Accumulation, ConfigError, ConfigValidator, DiffConfig, HeatmapConfig, PolarityMode,
    SegmentationConfig, SizeMismatchPolicy, VisualAnalysisConfig,
};
pub use constants::*;
pub use errors::{RecognitionUnavailable, VisualError, VisualResult};
pub use traits::{NoopRecognizer, TextRecognizer};
