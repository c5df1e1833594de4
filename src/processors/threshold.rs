//! Global threshold selection and binarisation.
//!
//! Threshold selection is a pure function from a 256-bin histogram to a
//! threshold. It sits behind [`ThresholdStrategy`] so tests can swap the
//! automatic Otsu selection for a fixed value.

use image::{GrayImage, Luma};
use std::fmt::Debug;

/// Pixel counts per 8-bit intensity.
pub type Histogram = [u64; 256];

/// Foreground value in a binary mask.
pub const FOREGROUND: u8 = 255;

/// Background value in a binary mask.
pub const BACKGROUND: u8 = 0;

/// Counts the pixels at each intensity.
pub fn histogram(image: &GrayImage) -> Histogram {
    let mut bins = [0u64; 256];
    for pixel in image.pixels() {
        bins[pixel.0[0] as usize] += 1;
    }
    bins
}

/// Chooses a global threshold from a histogram.
pub trait ThresholdStrategy: Send + Sync + Debug {
    /// Returns the threshold, or `None` if the histogram does not contain two
    /// separable populations. A `None` threshold binarises to all background.
    fn select(&self, histogram: &Histogram) -> Option<u8>;
}

/// Maximises the between-class variance of the two populations.
#[derive(Debug, Clone, Copy, Default)]
pub struct OtsuThreshold;

impl ThresholdStrategy for OtsuThreshold {
    fn select(&self, histogram: &Histogram) -> Option<u8> {
        otsu_threshold(histogram)
    }
}

/// Always returns the same threshold.
#[derive(Debug, Clone, Copy)]
pub struct FixedThreshold(pub u8);

impl ThresholdStrategy for FixedThreshold {
    fn select(&self, _histogram: &Histogram) -> Option<u8> {
        Some(self.0)
    }
}

/// Otsu's threshold over a histogram.
///
/// Pixels `<= t` form the lower class. The smallest `t` with the largest
/// between-class variance wins. Returns `None` when fewer than two bins are
/// populated.
pub fn otsu_threshold(histogram: &Histogram) -> Option<u8> {
    if histogram.iter().filter(|&&count| count > 0).count() < 2 {
        return None;
    }

    let total: f64 = histogram.iter().map(|&c| c as f64).sum();
    let sum_total: f64 = histogram
        .iter()
        .enumerate()
        .map(|(value, &count)| value as f64 * count as f64)
        .sum();

    let mut weight_low = 0.0;
    let mut sum_low = 0.0;
    let mut best_variance = 0.0;
    let mut threshold = 0u8;

    for (value, &count) in histogram.iter().enumerate() {
        weight_low += count as f64;
        if weight_low == 0.0 {
            continue;
        }
        let weight_high = total - weight_low;
        if weight_high == 0.0 {
            break;
        }

        sum_low += value as f64 * count as f64;
        let mean_low = sum_low / weight_low;
        let mean_high = (sum_total - sum_low) / weight_high;
        let variance = weight_low * weight_high * (mean_low - mean_high).powi(2);

        if variance > best_variance {
            best_variance = variance;
            threshold = value as u8;
        }
    }

    Some(threshold)
}

/// Which side of the threshold becomes foreground.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Polarity {
    /// Pixels above the threshold are foreground.
    Normal,
    /// Pixels at or below the threshold are foreground.
    Inverted,
}

/// Applies a known threshold.
pub fn apply_threshold(image: &GrayImage, threshold: Option<u8>, polarity: Polarity) -> GrayImage {
    let Some(t) = threshold else {
        return GrayImage::new(image.width(), image.height());
    };
    let mut mask = GrayImage::new(image.width(), image.height());
    for (x, y, pixel) in image.enumerate_pixels() {
        let above = pixel.0[0] > t;
        let foreground = match polarity {
            Polarity::Normal => above,
            Polarity::Inverted => !above,
        };
        if foreground {
            mask.put_pixel(x, y, Luma([FOREGROUND]));
        }
    }
    mask
}

/// Selects a threshold with `strategy` and binarises `image`.
pub fn binarize(
    image: &GrayImage,
    strategy: &dyn ThresholdStrategy,
    polarity: Polarity,
) -> GrayImage {
    let threshold = strategy.select(&histogram(image));
    apply_threshold(image, threshold, polarity)
}

/// Counts foreground pixels in a mask.
pub fn count_foreground(mask: &GrayImage) -> u64 {
    mask.pixels().filter(|p| p.0[0] != BACKGROUND).count() as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bimodal(low: u8, low_count: u64, high: u8, high_count: u64) -> Histogram {
        let mut bins = [0u64; 256];
        bins[low as usize] = low_count;
        bins[high as usize] = high_count;
        bins
    }

    #[test]
    fn test_otsu_separates_two_populations() {
        assert_eq!(otsu_threshold(&bimodal(0, 10, 255, 90)), Some(0));
        assert_eq!(otsu_threshold(&bimodal(40, 500, 200, 500)), Some(40));
    }

    #[test]
    fn test_otsu_picks_gap_between_clusters() {
        let mut bins = [0u64; 256];
        for v in 10..20 {
            bins[v] = 100;
        }
        for v in 200..210 {
            bins[v] = 100;
        }
        let t = otsu_threshold(&bins).unwrap();
        assert!((19..200).contains(&(t as usize)), "threshold {t}");
    }

    #[test]
    fn test_uniform_histogram_has_no_threshold() {
        assert_eq!(otsu_threshold(&bimodal(128, 1000, 128, 1000)), None);
        assert_eq!(otsu_threshold(&[0u64; 256]), None);

        let uniform_black = GrayImage::new(8, 8);
        let mask = binarize(&uniform_black, &OtsuThreshold, Polarity::Inverted);
        assert_eq!(count_foreground(&mask), 0);
    }

    #[test]
    fn test_polarity_and_fixed_strategy() {
        let mut image = GrayImage::from_pixel(4, 1, Luma([200]));
        image.put_pixel(0, 0, Luma([10]));
        image.put_pixel(1, 0, Luma([100]));

        let inverted = binarize(&image, &FixedThreshold(100), Polarity::Inverted);
        assert_eq!(inverted.as_raw(), &vec![255, 255, 0, 0]);

        let normal = binarize(&image, &FixedThreshold(100), Polarity::Normal);
        assert_eq!(normal.as_raw(), &vec![0, 0, 255, 255]);
        assert_eq!(count_foreground(&normal), 2);
    }

    #[test]
    fn test_histogram_counts() {
        let mut image = GrayImage::from_pixel(3, 3, Luma([7]));
        image.put_pixel(2, 2, Luma([250]));
        let bins = histogram(&image);
        assert_eq!(bins[7], 8);
        assert_eq!(bins[250], 1);
    }
}
