//! Configuration for the visual analysis engine.
//!
//! Each engine component has its own serde-derived configuration struct with
//! defaults that reproduce the reference behavior. [`VisualAnalysisConfig`]
//! aggregates them and can be loaded from JSON; missing fields fall back to
//! their defaults.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::core::constants::{
    DEFAULT_DESCRIPTION_ELEMENT_LIMIT, DEFAULT_HEATMAP_KERNEL_SIZE, DEFAULT_HEATMAP_RADIUS_SCALE,
    DEFAULT_MIN_ELEMENT_AREA, DEFAULT_MIN_ELEMENT_SIDE, DEFAULT_OUTLINE_THICKNESS,
    DEFAULT_OVERLAY_ALPHA, DEFAULT_PARALLEL_THRESHOLD, DEFAULT_SSIM_K1, DEFAULT_SSIM_K2,
    DEFAULT_SSIM_WINDOW,
};

/// Errors that can occur while loading or validating configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// A configuration value is out of its allowed range.
    #[error("invalid configuration: {message}")]
    InvalidConfig { message: String },

    /// Validation of a composite configuration failed.
    #[error("validation failed: {message}")]
    ValidationFailed { message: String },

    /// The configuration file does not exist.
    #[error("configuration file does not exist: {}", path.display())]
    FileNotFound { path: PathBuf },

    /// The configuration could not be parsed as JSON.
    #[error("failed to parse configuration")]
    Parse(#[from] serde_json::Error),

    /// The configuration file could not be read.
    #[error("failed to read configuration")]
    Io(#[from] std::io::Error),
}

/// A trait for validating configuration parameters.
pub trait ConfigValidator {
    /// Validates the configuration.
    fn validate(&self) -> Result<(), ConfigError>;

    /// Returns the default configuration.
    fn get_defaults() -> Self
    where
        Self: Sized;

    /// Validates that a value lies within `[0, 1]`.
    fn validate_unit_interval(&self, name: &str, value: f64) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&value) {
            return Err(ConfigError::InvalidConfig {
                message: format!("{name} must be within [0, 1], got {value}"),
            });
        }
        Ok(())
    }

    /// Validates that a kernel or window size is odd and at least `min`.
    fn validate_odd_size(&self, name: &str, value: usize, min: usize) -> Result<(), ConfigError> {
        if value < min || value % 2 == 0 {
            return Err(ConfigError::InvalidConfig {
                message: format!("{name} must be an odd number >= {min}, got {value}"),
            });
        }
        Ok(())
    }

    /// Validates that a value is finite and non-negative.
    fn validate_non_negative(&self, name: &str, value: f64) -> Result<(), ConfigError> {
        if !value.is_finite() || value < 0.0 {
            return Err(ConfigError::InvalidConfig {
                message: format!("{name} must be a finite non-negative number, got {value}"),
            });
        }
        Ok(())
    }
}

/// What to do when baseline and current captures differ in size.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SizeMismatchPolicy {
    /// Resample the current capture to the baseline dimensions (lossy).
    #[default]
    Resample,
    /// Fail the comparison with [`crate::core::VisualError::DimensionMismatch`].
    Reject,
}

/// Configuration for screenshot comparison.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiffConfig {
    /// Side of the square structural-similarity window. Must be odd.
    pub window_size: usize,
    /// Luminance stabilisation constant.
    pub k1: f64,
    /// Contrast stabilisation constant.
    pub k2: f64,
    /// Difference contours with a smaller area are discarded as noise.
    /// The default of 0 keeps every contour.
    pub min_region_area: f64,
    /// Thickness of the outlines drawn on the annotated raster.
    pub outline_thickness: u32,
    /// Behavior for captures of different dimensions.
    pub size_mismatch: SizeMismatchPolicy,
}

impl Default for DiffConfig {
    fn default() -> Self {
        Self {
            window_size: DEFAULT_SSIM_WINDOW,
            k1: DEFAULT_SSIM_K1,
            k2: DEFAULT_SSIM_K2,
            min_region_area: 0.0,
            outline_thickness: DEFAULT_OUTLINE_THICKNESS,
            size_mismatch: SizeMismatchPolicy::Resample,
        }
    }
}

impl ConfigValidator for DiffConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        self.validate_odd_size("window_size", self.window_size, 3)?;
        self.validate_non_negative("k1", self.k1)?;
        self.validate_non_negative("k2", self.k2)?;
        self.validate_non_negative("min_region_area", self.min_region_area)?;
        if self.outline_thickness == 0 {
            return Err(ConfigError::InvalidConfig {
                message: "outline_thickness must be greater than 0".to_string(),
            });
        }
        Ok(())
    }

    fn get_defaults() -> Self {
        Self::default()
    }
}

/// Which pixels count as UI structure when binarising a capture.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PolarityMode {
    /// Pick the polarity that keeps the dominant population as background.
    #[default]
    Auto,
    /// Dark structures on a light background.
    DarkOnLight,
    /// Light structures on a dark background.
    LightOnDark,
}

/// Configuration for UI-element segmentation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SegmentationConfig {
    /// Contours whose area is at or below this value are discarded.
    pub min_area: f64,
    /// Boxes narrower or shorter than this are discarded.
    pub min_side: u32,
    /// Foreground polarity.
    pub polarity: PolarityMode,
}

impl Default for SegmentationConfig {
    fn default() -> Self {
        Self {
            min_area: DEFAULT_MIN_ELEMENT_AREA,
            min_side: DEFAULT_MIN_ELEMENT_SIDE,
            polarity: PolarityMode::Auto,
        }
    }
}

impl ConfigValidator for SegmentationConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        self.validate_non_negative("min_area", self.min_area)
    }

    fn get_defaults() -> Self {
        Self::default()
    }
}

/// How overlapping interaction discs combine in the accumulator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Accumulation {
    /// Overlapping discs add up before normalisation.
    #[default]
    Additive,
    /// Each accumulator cell keeps the largest disc value covering it.
    Max,
}

/// Configuration for heatmap compositing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeatmapConfig {
    /// Disc radius per unit of interaction weight, in pixels.
    pub radius_scale: f64,
    /// Side of the Gaussian smoothing kernel. Must be odd.
    pub kernel_size: usize,
    /// Share of the colour-mapped overlay in the blend.
    pub overlay_alpha: f64,
    /// Accumulation rule for overlapping discs.
    pub accumulation: Accumulation,
}

impl Default for HeatmapConfig {
    fn default() -> Self {
        Self {
            radius_scale: DEFAULT_HEATMAP_RADIUS_SCALE,
            kernel_size: DEFAULT_HEATMAP_KERNEL_SIZE,
            overlay_alpha: DEFAULT_OVERLAY_ALPHA,
            accumulation: Accumulation::Additive,
        }
    }
}

impl ConfigValidator for HeatmapConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        self.validate_non_negative("radius_scale", self.radius_scale)?;
        self.validate_odd_size("kernel_size", self.kernel_size, 1)?;
        self.validate_unit_interval("overlay_alpha", self.overlay_alpha)
    }

    fn get_defaults() -> Self {
        Self::default()
    }
}

/// Configuration for [`crate::analysis::VisualAnalyzer`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VisualAnalysisConfig {
    /// Screenshot comparison settings.
    pub diff: DiffConfig,
    /// UI-element segmentation settings.
    pub segmentation: SegmentationConfig,
    /// Heatmap compositing settings.
    pub heatmap: HeatmapConfig,
    /// Number of elements listed individually in a screenshot description.
    pub description_element_limit: usize,
    /// Minimum batch length before batch operations run in parallel.
    pub parallel_threshold: usize,
}

impl Default for VisualAnalysisConfig {
    fn default() -> Self {
        Self {
            diff: DiffConfig::default(),
            segmentation: SegmentationConfig::default(),
            heatmap: HeatmapConfig::default(),
            description_element_limit: DEFAULT_DESCRIPTION_ELEMENT_LIMIT,
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
        }
    }
}

impl ConfigValidator for VisualAnalysisConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        self.diff.validate()?;
        self.segmentation.validate()?;
        self.heatmap.validate()?;
        if self.parallel_threshold == 0 {
            return Err(ConfigError::ValidationFailed {
                message: "parallel_threshold must be greater than 0".to_string(),
            });
        }
        Ok(())
    }

    fn get_defaults() -> Self {
        Self::default()
    }
}

impl VisualAnalysisConfig {
    /// Parses and validates a configuration from a JSON string.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a configuration file.
    pub fn from_json_file(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::FileNotFound {
                path: path.to_path_buf(),
            });
        }
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }
}
