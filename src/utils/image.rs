//! Utility functions for image access.
//!
//! This module loads captures into [`Raster`]s, writes output artifacts, and
//! provides the small set of raster transformations the engine needs
//! (grayscale, crop, resample). Transformations always produce new buffers.

use image::imageops::FilterType;
use image::{ColorType, DynamicImage, GrayImage, RgbImage};
use std::path::Path;
use tracing::debug;

use crate::core::constants::DEFAULT_PARALLEL_THRESHOLD;
use crate::core::errors::{VisualError, VisualResult};
use crate::processors::BoundingBox;

/// A decoded capture.
///
/// Holds either an 8-bit RGB or an 8-bit grayscale buffer. Inputs with an
/// alpha channel or a higher bit depth are normalised on load.
#[derive(Debug, Clone)]
pub struct Raster {
    image: DynamicImage,
}

impl Raster {
    /// Wraps a colour buffer.
    pub fn from_rgb(image: RgbImage) -> Self {
        Self {
            image: DynamicImage::ImageRgb8(image),
        }
    }

    /// Wraps a grayscale buffer.
    pub fn from_gray(image: GrayImage) -> Self {
        Self {
            image: DynamicImage::ImageLuma8(image),
        }
    }

    fn from_dynamic(image: DynamicImage) -> Self {
        match image.color() {
            ColorType::L8 | ColorType::La8 | ColorType::L16 | ColorType::La16 => {
                Self::from_gray(image.to_luma8())
            }
            _ => Self::from_rgb(image.to_rgb8()),
        }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width(), self.height())
    }

    /// Number of channels: 3 for colour, 1 for grayscale.
    pub fn channels(&self) -> u8 {
        self.image.color().channel_count()
    }

    /// Returns a new single-channel raster.
    pub fn to_grayscale(&self) -> Raster {
        Self::from_gray(self.to_luma8())
    }

    /// Returns the pixels as an RGB buffer, expanding grayscale if needed.
    pub fn to_rgb8(&self) -> RgbImage {
        self.image.to_rgb8()
    }

    /// Returns the pixels as a grayscale buffer.
    pub fn to_luma8(&self) -> GrayImage {
        self.image.to_luma8()
    }

    /// Returns the underlying decoded image.
    pub fn as_dynamic(&self) -> &DynamicImage {
        &self.image
    }
}

/// Loads a capture from disk.
///
/// # Errors
///
/// * `VisualError::ImageNotFound` if `path` does not exist.
/// * `VisualError::ImageDecode` if it exists but is not a supported raster.
pub fn load_raster(path: &Path) -> VisualResult<Raster> {
    if !path.exists() {
        return Err(VisualError::image_not_found(path));
    }
    let image = image::open(path).map_err(|e| VisualError::image_decode(path, e))?;
    let raster = Raster::from_dynamic(image);
    debug!(
        "Loaded {} ({}x{}, {} channels)",
        path.display(),
        raster.width(),
        raster.height(),
        raster.channels()
    );
    Ok(raster)
}

/// Size of the file at `path` in bytes.
pub fn file_size(path: &Path) -> VisualResult<u64> {
    std::fs::metadata(path)
        .map(|meta| meta.len())
        .map_err(|e| VisualError::file_metadata(path, e))
}

/// Loads a batch of captures, in parallel above the default threshold.
///
/// Fails with the first error encountered.
pub fn load_rasters<P: AsRef<Path> + Send + Sync>(paths: &[P]) -> VisualResult<Vec<Raster>> {
    load_rasters_with_threshold(paths, None)
}

/// Loads a batch of captures with a custom parallel threshold.
///
/// `None` uses [`DEFAULT_PARALLEL_THRESHOLD`].
pub fn load_rasters_with_threshold<P: AsRef<Path> + Send + Sync>(
    paths: &[P],
    parallel_threshold: Option<usize>,
) -> VisualResult<Vec<Raster>> {
    let threshold = parallel_threshold.unwrap_or(DEFAULT_PARALLEL_THRESHOLD);

    if paths.len() > threshold {
        use rayon::prelude::*;
        paths.par_iter().map(|p| load_raster(p.as_ref())).collect()
    } else {
        paths.iter().map(|p| load_raster(p.as_ref())).collect()
    }
}

/// Checks that the directory an artifact will be written to exists.
///
/// Directories are never created implicitly.
pub fn ensure_output_dir(path: &Path) -> VisualResult<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() && !parent.is_dir() => {
            Err(VisualError::output_path(path))
        }
        _ => Ok(()),
    }
}

/// Writes an RGB buffer to `path`, inferring the format from its extension.
///
/// # Errors
///
/// * `VisualError::OutputPath` if the parent directory does not exist.
/// * `VisualError::ImageEncode` if the buffer cannot be encoded or written.
pub fn save_image(image: &RgbImage, path: &Path) -> VisualResult<()> {
    ensure_output_dir(path)?;
    image
        .save(path)
        .map_err(|e| VisualError::image_encode(path, e))?;
    debug!("Wrote {}", path.display());
    Ok(())
}

/// Copies the pixels under `bbox` into a new buffer.
///
/// The box must lie within the image.
pub fn crop_region(image: &RgbImage, bbox: &BoundingBox) -> RgbImage {
    image::imageops::crop_imm(image, bbox.x, bbox.y, bbox.width, bbox.height).to_image()
}

/// Bilinearly resamples an image to the given dimensions.
pub fn resample(image: &RgbImage, width: u32, height: u32) -> RgbImage {
    image::imageops::resize(image, width, height, FilterType::Triangle)
}
