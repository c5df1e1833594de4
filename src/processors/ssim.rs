//! Structural similarity between two grayscale captures.
//!
//! Local luminance, contrast and structure are compared inside a sliding
//! square window using uniform weights and sample covariance. The per-pixel
//! index is clamped to `[0, 1]`. Window means pad by continuity at the
//! image edge; the reported mean excludes that band.

use image::{GrayImage, Luma};

use crate::core::constants::GRAY_DATA_RANGE;
use crate::core::errors::{VisualError, VisualResult};
use crate::processors::filter::{FloatPlane, to_float_plane, uniform_filter, zip_map};

/// Parameters of the structural-similarity index.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SsimParams {
    /// Side of the square window. Must be odd and at least 3.
    pub window_size: usize,
    pub k1: f64,
    pub k2: f64,
    /// Dynamic range of the input samples.
    pub data_range: f64,
}

impl Default for SsimParams {
    fn default() -> Self {
        Self {
            window_size: 7,
            k1: 0.01,
            k2: 0.03,
            data_range: GRAY_DATA_RANGE,
        }
    }
}

/// Per-pixel similarity and its mean.
#[derive(Debug, Clone)]
pub struct SsimMap {
    /// Per-pixel similarity in `[0, 1]`.
    pub map: FloatPlane,
    /// Mean similarity over pixels whose window lies fully inside the image.
    pub mean: f64,
}

impl SsimMap {
    /// Rescales the map to 8-bit intensity, truncating `s * 255`.
    pub fn to_gray(&self) -> GrayImage {
        GrayImage::from_fn(self.map.width(), self.map.height(), |x, y| {
            Luma([(self.map.get_pixel(x, y).0[0] * 255.0) as u8])
        })
    }
}

/// Computes the structural similarity of two equally sized images.
///
/// The index is symmetric in its arguments and equals exactly `1.0` for
/// identical inputs.
///
/// # Errors
///
/// `VisualError::InvalidInput` if the images differ in size, the window is
/// not an odd size of at least 3, or either side is smaller than the window.
pub fn structural_similarity(
    a: &GrayImage,
    b: &GrayImage,
    params: &SsimParams,
) -> VisualResult<SsimMap> {
    if a.dimensions() != b.dimensions() {
        return Err(VisualError::invalid_input(format!(
            "structural similarity needs equal sizes, got {:?} and {:?}",
            a.dimensions(),
            b.dimensions()
        )));
    }
    let win = params.window_size;
    if win < 3 || win % 2 == 0 {
        return Err(VisualError::invalid_input(format!(
            "window size must be odd and >= 3, got {win}"
        )));
    }
    let (w, h) = (a.width() as usize, a.height() as usize);
    if w < win || h < win {
        return Err(VisualError::invalid_input(format!(
            "image {w}x{h} is smaller than the {win}x{win} similarity window"
        )));
    }

    let x = to_float_plane(a);
    let y = to_float_plane(b);

    let ux = uniform_filter(&x, win);
    let uy = uniform_filter(&y, win);
    let uxx = uniform_filter(&zip_map(&x, &x, |p, q| p * q), win);
    let uyy = uniform_filter(&zip_map(&y, &y, |p, q| p * q), win);
    let uxy = uniform_filter(&zip_map(&x, &y, |p, q| p * q), win);

    let samples = (win * win) as f64;
    let cov_norm = samples / (samples - 1.0);
    let c1 = (params.k1 * params.data_range).powi(2);
    let c2 = (params.k2 * params.data_range).powi(2);

    let sample = |plane: &FloatPlane, x: u32, y: u32| plane.get_pixel(x, y).0[0];
    let map = FloatPlane::from_fn(a.width(), a.height(), |xx, yy| {
        let (mx, my) = (sample(&ux, xx, yy), sample(&uy, xx, yy));
        let vx = cov_norm * (sample(&uxx, xx, yy) - mx * mx);
        let vy = cov_norm * (sample(&uyy, xx, yy) - my * my);
        let vxy = cov_norm * (sample(&uxy, xx, yy) - mx * my);

        let numerator = (2.0 * (mx * my) + c1) * (2.0 * vxy + c2);
        let denominator = (mx * mx + my * my + c1) * (vx + vy + c2);
        let s = if denominator == 0.0 {
            1.0
        } else {
            numerator / denominator
        };
        Luma([s.clamp(0.0, 1.0)])
    });

    let pad = (win - 1) / 2;
    let mut sum = 0.0;
    let mut count = 0usize;
    for yy in pad..h - pad {
        for xx in pad..w - pad {
            sum += sample(&map, xx as u32, yy as u32);
            count += 1;
        }
    }
    let mean = sum / count as f64;

    Ok(SsimMap { map, mean })
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Luma;

    fn gradient(w: u32, h: u32) -> GrayImage {
        GrayImage::from_fn(w, h, |x, y| Luma([((x * 7 + y * 3) % 256) as u8]))
    }

    #[test]
    fn test_identical_images_score_exactly_one() {
        let img = gradient(64, 48);
        let result = structural_similarity(&img, &img, &SsimParams::default()).unwrap();
        assert_eq!(result.mean, 1.0);
        assert!(result.map.pixels().all(|p| p.0[0] == 1.0));
        assert!(result.to_gray().pixels().all(|p| p.0[0] == 255));
    }

    #[test]
    fn test_similarity_is_symmetric() {
        let a = gradient(40, 30);
        let mut b = a.clone();
        for x in 5..20 {
            b.put_pixel(x, 10, Luma([0]));
        }
        let ab = structural_similarity(&a, &b, &SsimParams::default()).unwrap();
        let ba = structural_similarity(&b, &a, &SsimParams::default()).unwrap();
        assert_eq!(ab.mean, ba.mean);
        assert!(ab.mean < 1.0);
    }

    #[test]
    fn test_local_change_only_affects_nearby_windows() {
        let a = GrayImage::from_pixel(40, 40, Luma([255]));
        let mut b = a.clone();
        b.put_pixel(20, 20, Luma([0]));
        let result = structural_similarity(&a, &b, &SsimParams::default()).unwrap();
        assert!(result.map.get_pixel(20, 20).0[0] < 0.5);
        assert!(result.map.get_pixel(17, 23).0[0] < 1.0);
        assert_eq!(result.map.get_pixel(16, 20).0[0], 1.0);
        assert_eq!(result.map.get_pixel(5, 5).0[0], 1.0);
    }

    #[test]
    fn test_rejects_invalid_inputs() {
        let small = GrayImage::new(5, 5);
        assert!(structural_similarity(&small, &small, &SsimParams::default()).is_err());

        let a = GrayImage::new(10, 10);
        let b = GrayImage::new(10, 11);
        assert!(structural_similarity(&a, &b, &SsimParams::default()).is_err());

        let even = SsimParams {
            window_size: 4,
            ..SsimParams::default()
        };
        assert!(structural_similarity(&a, &a, &even).is_err());
    }
}
