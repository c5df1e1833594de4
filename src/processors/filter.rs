//! Floating-point planes and window filters.
//!
//! Backs both the structural-similarity window means (uniform kernel) and
//! heatmap smoothing (Gaussian kernel). Convolution runs through
//! `imageproc::filter`, which pads by continuity at the image edge.

use image::{GrayImage, ImageBuffer, Luma};
use imageproc::filter::separable_filter_equal;

/// Double-precision single-channel plane used for similarity statistics.
pub type FloatPlane = ImageBuffer<Luma<f64>, Vec<f64>>;

/// Single-precision single-channel plane used for interaction density.
pub type DensityPlane = ImageBuffer<Luma<f32>, Vec<f32>>;

/// Converts an 8-bit image to samples in `[0, 255]`.
pub fn to_float_plane(image: &GrayImage) -> FloatPlane {
    FloatPlane::from_fn(image.width(), image.height(), |x, y| {
        Luma([image.get_pixel(x, y).0[0] as f64])
    })
}

/// Combines two planes of equal size sample by sample.
pub fn zip_map(a: &FloatPlane, b: &FloatPlane, f: impl Fn(f64, f64) -> f64) -> FloatPlane {
    debug_assert_eq!(a.dimensions(), b.dimensions());
    FloatPlane::from_fn(a.width(), a.height(), |x, y| {
        Luma([f(a.get_pixel(x, y).0[0], b.get_pixel(x, y).0[0])])
    })
}

/// Mean over a `size x size` window.
pub fn uniform_filter(plane: &FloatPlane, size: usize) -> FloatPlane {
    let kernel = vec![1.0 / size as f64; size];
    separable_filter_equal(plane, &kernel)
}

/// Normalised 1-D Gaussian kernel of exactly `size` taps.
///
/// A non-positive `sigma` is derived from the kernel size as
/// `0.3 * ((size - 1) / 2 - 1) + 0.8`.
pub fn gaussian_kernel(size: usize, sigma: f32) -> Vec<f32> {
    let sigma = if sigma > 0.0 {
        sigma
    } else {
        0.3 * ((size as f32 - 1.0) * 0.5 - 1.0) + 0.8
    };
    let center = (size / 2) as f32;
    let mut kernel: Vec<f32> = (0..size)
        .map(|i| {
            let d = i as f32 - center;
            (-(d * d) / (2.0 * sigma * sigma)).exp()
        })
        .collect();
    let sum: f32 = kernel.iter().sum();
    kernel.iter_mut().for_each(|v| *v /= sum);
    kernel
}

/// Gaussian smoothing with a `size`-tap kernel.
pub fn gaussian_blur(plane: &DensityPlane, size: usize, sigma: f32) -> DensityPlane {
    separable_filter_equal(plane, &gaussian_kernel(size, sigma))
}

/// Smallest and largest sample, or `None` for an empty plane.
pub fn value_range(plane: &DensityPlane) -> Option<(f32, f32)> {
    plane.pixels().fold(None, |acc, p| {
        let v = p.0[0];
        match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        }
    })
}

/// Rescales samples linearly onto `[0, 1]`.
///
/// A flat plane maps to all zeros.
pub fn normalize(plane: &DensityPlane) -> DensityPlane {
    let (w, h) = plane.dimensions();
    let Some((lo, hi)) = value_range(plane) else {
        return plane.clone();
    };
    let span = hi - lo;
    if span <= f32::EPSILON {
        return DensityPlane::new(w, h);
    }
    DensityPlane::from_fn(w, h, |x, y| {
        Luma([(plane.get_pixel(x, y).0[0] - lo) / span])
    })
}
