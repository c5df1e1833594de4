//! Constants used throughout the visual analysis engine.

/// The default threshold for parallel processing.
///
/// Batch operations with more items than this run on the rayon pool.
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 4;

/// Side of the structural-similarity window.
pub const DEFAULT_SSIM_WINDOW: usize = 7;

/// Luminance stabilisation constant for structural similarity.
pub const DEFAULT_SSIM_K1: f64 = 0.01;

/// Contrast stabilisation constant for structural similarity.
pub const DEFAULT_SSIM_K2: f64 = 0.03;

/// Dynamic range of 8-bit grayscale input.
pub const GRAY_DATA_RANGE: f64 = 255.0;

/// Thickness of difference outlines on the annotated raster.
pub const DEFAULT_OUTLINE_THICKNESS: u32 = 2;

/// Contours at or below this area are not UI elements.
pub const DEFAULT_MIN_ELEMENT_AREA: f64 = 100.0;

/// Boxes narrower or shorter than this are not UI elements.
pub const DEFAULT_MIN_ELEMENT_SIDE: u32 = 10;

/// Disc radius per unit of interaction weight.
pub const DEFAULT_HEATMAP_RADIUS_SCALE: f64 = 50.0;

/// Side of the heatmap smoothing kernel.
pub const DEFAULT_HEATMAP_KERNEL_SIZE: usize = 51;

/// Share of the colour-mapped overlay when blending a heatmap.
pub const DEFAULT_OVERLAY_ALPHA: f64 = 0.3;

/// Elements listed individually in a screenshot description.
pub const DEFAULT_DESCRIPTION_ELEMENT_LIMIT: usize = 10;
