//! Interaction heatmap compositing.
//!
//! Each interaction stamps a filled disc into a single-channel accumulator.
//! The accumulator is smoothed with a large Gaussian kernel, normalised,
//! colour-mapped and alpha-blended over the base capture.

use image::{Luma, Rgb, RgbImage};
use imageproc::drawing::draw_filled_circle_mut;
use tracing::{debug, warn};

use crate::core::config::{Accumulation, HeatmapConfig};
use crate::domain::InteractionPoint;
use crate::processors::colormap::jet;
use crate::processors::filter::{DensityPlane, gaussian_blur, normalize, value_range};
use crate::utils::image::Raster;

/// Composites weighted interaction points over a capture.
#[derive(Debug, Clone, Default)]
pub struct HeatmapCompositor {
    config: HeatmapConfig,
}

impl HeatmapCompositor {
    pub fn new(config: HeatmapConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &HeatmapConfig {
        &self.config
    }

    /// Renders the heatmap over `base`.
    ///
    /// Points outside the capture are skipped. If nothing lands on the
    /// capture (including an empty point list) the base pixels are returned
    /// unchanged.
    pub fn composite(&self, base: &Raster, points: &[InteractionPoint]) -> RgbImage {
        let base_rgb = base.to_rgb8();
        let Some(accumulator) = self.accumulate(base.width(), base.height(), points) else {
            debug!("No interaction landed on the capture; returning base unchanged");
            return base_rgb;
        };

        let smoothed = gaussian_blur(&accumulator, self.config.kernel_size, 0.0);
        let field = normalize(&smoothed);
        blend(&base_rgb, &field, self.config.overlay_alpha)
    }

    /// Stamps every in-bounds point into a fresh accumulator.
    ///
    /// Returns `None` if the accumulator stays empty.
    pub(crate) fn accumulate(
        &self,
        width: u32,
        height: u32,
        points: &[InteractionPoint],
    ) -> Option<DensityPlane> {
        let (w, h) = (width as i64, height as i64);
        // A disc this wide already covers the whole capture from any point on it.
        let max_radius = w + h;
        let mut accumulator = DensityPlane::new(width, height);
        let mut stamped = 0usize;

        for point in points {
            if point.x < 0 || point.x >= w || point.y < 0 || point.y >= h {
                continue;
            }
            let value = point.weight as f32;
            if !value.is_finite() || value < 0.0 {
                warn!(
                    "Skipping interaction at ({}, {}) with invalid weight {}",
                    point.x, point.y, point.weight
                );
                continue;
            }
            let radius = ((self.config.radius_scale * point.weight) as i64).min(max_radius);
            self.stamp_disc(&mut accumulator, (point.x, point.y), radius, value);
            stamped += 1;
        }

        debug!("Stamped {stamped} of {} interactions", points.len());
        match value_range(&accumulator) {
            Some((_, max)) if max > 0.0 => Some(accumulator),
            _ => None,
        }
    }

    /// Draws a filled disc on a stamp clipped to the capture, then merges it.
    fn stamp_disc(
        &self,
        accumulator: &mut DensityPlane,
        (cx, cy): (i64, i64),
        radius: i64,
        value: f32,
    ) {
        let (w, h) = (accumulator.width() as i64, accumulator.height() as i64);
        let (x0, y0) = ((cx - radius).max(0), (cy - radius).max(0));
        let (x1, y1) = ((cx + radius).min(w - 1), (cy + radius).min(h - 1));

        let mut stamp = DensityPlane::new((x1 - x0 + 1) as u32, (y1 - y0 + 1) as u32);
        draw_filled_circle_mut(
            &mut stamp,
            ((cx - x0) as i32, (cy - y0) as i32),
            radius as i32,
            Luma([value]),
        );

        for (sx, sy, pixel) in stamp.enumerate_pixels() {
            let cell = &mut accumulator.get_pixel_mut(x0 as u32 + sx, y0 as u32 + sy).0[0];
            match self.config.accumulation {
                Accumulation::Additive => *cell += pixel.0[0],
                Accumulation::Max => *cell = cell.max(pixel.0[0]),
            }
        }
    }
}

/// Blends the jet-mapped field over `base` with the given overlay share.
fn blend(base: &RgbImage, field: &DensityPlane, alpha: f64) -> RgbImage {
    RgbImage::from_fn(base.width(), base.height(), |x, y| {
        let intensity = (field.get_pixel(x, y).0[0] * 255.0) as u8;
        let overlay = jet(intensity);
        let under = base.get_pixel(x, y);
        let mix = |b: u8, o: u8| {
            ((1.0 - alpha) * b as f64 + alpha * o as f64)
                .round()
                .clamp(0.0, 255.0) as u8
        };
        Rgb([
            mix(under.0[0], overlay.0[0]),
            mix(under.0[1], overlay.0[1]),
            mix(under.0[2], overlay.0[2]),
        ])
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn white_base() -> Raster {
        Raster::from_rgb(RgbImage::from_pixel(400, 300, Rgb([255, 255, 255])))
    }

    #[test]
    fn test_empty_points_return_base() {
        let base = white_base();
        let out = HeatmapCompositor::default().composite(&base, &[]);
        assert_eq!(out, base.to_rgb8());
    }

    #[test]
    fn test_out_of_bounds_points_are_skipped() {
        let base = white_base();
        let compositor = HeatmapCompositor::default();
        let points = [
            InteractionPoint::weighted(-5, 0, 1.0),
            InteractionPoint::new(400, 10),
            InteractionPoint::new(10, 300),
        ];
        assert_eq!(
            compositor.composite(&base, &points),
            compositor.composite(&base, &[])
        );
    }

    #[test]
    fn test_hot_spot_is_red_and_background_blue() {
        let base = white_base();
        let out = HeatmapCompositor::default().composite(&base, &[InteractionPoint::new(200, 150)]);
        assert_eq!(out.dimensions(), (400, 300));

        let hot = out.get_pixel(200, 150);
        assert!(hot.0[0] > hot.0[2], "{hot:?}");
        let cold = out.get_pixel(5, 5);
        assert!(cold.0[2] > cold.0[0], "{cold:?}");
        assert_ne!(hot, &Rgb([255, 255, 255]));
    }

    #[test]
    fn test_accumulation_rules() {
        let points = [InteractionPoint::new(50, 50), InteractionPoint::new(52, 50)];

        let additive = HeatmapCompositor::default()
            .accumulate(100, 100, &points)
            .unwrap();
        assert_eq!(additive.get_pixel(51, 50).0[0], 2.0);

        let max = HeatmapCompositor::new(HeatmapConfig {
            accumulation: Accumulation::Max,
            ..HeatmapConfig::default()
        })
        .accumulate(100, 100, &points)
        .unwrap();
        assert_eq!(max.get_pixel(51, 50).0[0], 1.0);
    }

    #[test]
    fn test_weight_scales_radius_and_value() {
        let compositor = HeatmapCompositor::default();
        let half = compositor
            .accumulate(200, 200, &[InteractionPoint::weighted(100, 100, 0.5)])
            .unwrap();
        assert_eq!(half.get_pixel(100, 100).0[0], 0.5);
        assert_eq!(half.get_pixel(125, 100).0[0], 0.5);
        assert_eq!(half.get_pixel(130, 100).0[0], 0.0);

        let full = compositor
            .accumulate(200, 200, &[InteractionPoint::new(100, 100)])
            .unwrap();
        assert_eq!(full.get_pixel(130, 100).0[0], 1.0);
        assert_eq!(full.get_pixel(151, 100).0[0], 0.0);
    }

    #[test]
    fn test_zero_and_invalid_weights_leave_base_unchanged() {
        let base = white_base();
        let compositor = HeatmapCompositor::default();
        let points = [
            InteractionPoint::weighted(10, 10, 0.0),
            InteractionPoint::weighted(20, 20, -1.0),
            InteractionPoint::weighted(30, 30, f64::NAN),
        ];
        assert_eq!(compositor.composite(&base, &points), base.to_rgb8());
    }

    #[test]
    fn test_blend_uses_thirty_percent_overlay() {
        let base = RgbImage::from_pixel(2, 1, Rgb([200, 100, 50]));
        let mut field = DensityPlane::new(2, 1);
        field.put_pixel(1, 0, Luma([1.0]));
        let alpha = HeatmapConfig::default().overlay_alpha;
        assert_eq!(alpha, 0.3);

        let out = blend(&base, &field, alpha);
        // Cold end of the ramp is (0, 0, 128), hot end is (128, 0, 0).
        assert_eq!(out.get_pixel(0, 0), &Rgb([140, 70, 73]));
        assert_eq!(out.get_pixel(1, 0), &Rgb([178, 70, 35]));
    }

    #[test]
    fn test_huge_weight_covers_whole_capture() {
        let compositor = HeatmapCompositor::default();
        let point = [InteractionPoint::weighted(50, 40, 1e8)];

        let accumulator = compositor.accumulate(100, 80, &point).unwrap();
        assert!(accumulator.pixels().all(|p| p.0[0] == 1e8));

        let base = Raster::from_rgb(RgbImage::from_pixel(100, 80, Rgb([255, 255, 255])));
        let out = compositor.composite(&base, &point);
        assert_eq!(out.dimensions(), (100, 80));
        let first = *out.get_pixel(0, 0);
        assert!(out.pixels().all(|p| *p == first));
    }
}
