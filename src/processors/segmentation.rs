//! Candidate UI-element segmentation.
//!
//! A capture is binarised with an automatic global threshold so that UI
//! structure, not background, is foreground. Every contour of the mask (outer
//! borders and hole borders alike) yields a candidate box; small or thin
//! candidates are dropped as noise.

use image::GrayImage;
use imageproc::contours::find_contours;
use std::sync::Arc;
use tracing::debug;

use crate::core::config::{PolarityMode, SegmentationConfig};
use crate::processors::geometry::{BoundingBox, contour_area};
use crate::processors::threshold::{
    OtsuThreshold, Polarity, ThresholdStrategy, apply_threshold, histogram,
};
use crate::utils::image::Raster;

/// Finds candidate UI-element boxes in a capture.
#[derive(Debug, Clone)]
pub struct RegionSegmenter {
    config: SegmentationConfig,
    threshold: Arc<dyn ThresholdStrategy>,
}

impl Default for RegionSegmenter {
    fn default() -> Self {
        Self::new(SegmentationConfig::default())
    }
}

impl RegionSegmenter {
    /// Creates a segmenter using Otsu thresholding.
    pub fn new(config: SegmentationConfig) -> Self {
        Self {
            config,
            threshold: Arc::new(OtsuThreshold),
        }
    }

    /// Replaces the threshold selection strategy.
    pub fn with_threshold_strategy(mut self, strategy: Arc<dyn ThresholdStrategy>) -> Self {
        self.threshold = strategy;
        self
    }

    pub fn config(&self) -> &SegmentationConfig {
        &self.config
    }

    /// Segments `raster` using the configured minimum area.
    pub fn segment(&self, raster: &Raster) -> Vec<BoundingBox> {
        self.segment_with_min_area(raster, self.config.min_area)
    }

    /// Segments `raster`, discarding contours with area `<= min_area`.
    ///
    /// Boxes are returned in contour discovery order (raster scan, top to
    /// bottom, left to right), which is stable for a given input.
    pub fn segment_with_min_area(&self, raster: &Raster, min_area: f64) -> Vec<BoundingBox> {
        let mask = self.foreground_mask(&raster.to_luma8());
        let min_side = self.config.min_side;

        let boxes: Vec<BoundingBox> = find_contours::<u32>(&mask)
            .iter()
            .filter(|contour| contour_area(contour) > min_area)
            .filter_map(BoundingBox::from_contour)
            .filter(|bbox| bbox.width >= min_side && bbox.height >= min_side)
            .collect();

        debug!("Segmented {} candidate regions", boxes.len());
        boxes
    }

    /// Binarises `gray` so that UI structure is foreground.
    pub fn foreground_mask(&self, gray: &GrayImage) -> GrayImage {
        let bins = histogram(gray);
        let threshold = self.threshold.select(&bins);
        let polarity = match self.config.polarity {
            PolarityMode::DarkOnLight => Polarity::Inverted,
            PolarityMode::LightOnDark => Polarity::Normal,
            PolarityMode::Auto => auto_polarity(&bins, threshold),
        };
        apply_threshold(gray, threshold, polarity)
    }
}

/// Keeps the larger population as background.
///
/// Dark-on-light is assumed unless more than half of the pixels sit at or
/// below the threshold.
fn auto_polarity(bins: &[u64; 256], threshold: Option<u8>) -> Polarity {
    let Some(t) = threshold else {
        return Polarity::Inverted;
    };
    let total: u64 = bins.iter().sum();
    let dark: u64 = bins[..=t as usize].iter().sum();
    if dark * 2 > total {
        Polarity::Normal
    } else {
        Polarity::Inverted
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processors::threshold::FixedThreshold;
    use image::{Rgb, RgbImage};

    const WHITE: Rgb<u8> = Rgb([255, 255, 255]);
    const INK: Rgb<u8> = Rgb([30, 30, 30]);

    fn fill(image: &mut RgbImage, bbox: BoundingBox, color: Rgb<u8>) {
        for y in bbox.y..bbox.bottom() {
            for x in bbox.x..bbox.right() {
                image.put_pixel(x, y, color);
            }
        }
    }

    fn frame(image: &mut RgbImage, bbox: BoundingBox, thickness: u32, color: Rgb<u8>) {
        for y in bbox.y..bbox.bottom() {
            for x in bbox.x..bbox.right() {
                let inner = x >= bbox.x + thickness
                    && x < bbox.right() - thickness
                    && y >= bbox.y + thickness
                    && y < bbox.bottom() - thickness;
                if !inner {
                    image.put_pixel(x, y, color);
                }
            }
        }
    }

    fn mock_screen() -> RgbImage {
        let mut screen = RgbImage::from_pixel(400, 300, WHITE);
        fill(&mut screen, BoundingBox::new(50, 40, 60, 30), INK);
        frame(&mut screen, BoundingBox::new(200, 100, 100, 80), 3, INK);
        fill(&mut screen, BoundingBox::new(20, 250, 4, 4), INK);
        fill(&mut screen, BoundingBox::new(330, 20, 5, 200), INK);
        screen
    }

    #[test]
    fn test_blank_capture_has_no_regions() {
        let blank = Raster::from_rgb(RgbImage::from_pixel(400, 300, Rgb([200, 200, 200])));
        assert!(RegionSegmenter::default().segment(&blank).is_empty());
    }

    #[test]
    fn test_segments_blocks_frames_and_holes() {
        let raster = Raster::from_rgb(mock_screen());
        let boxes = RegionSegmenter::default().segment(&raster);

        // Filled block, frame outer border, frame hole border. The speck is
        // too small and the bar too thin.
        assert_eq!(boxes.len(), 3, "{boxes:?}");
        assert_eq!(boxes[0], BoundingBox::new(50, 40, 60, 30));
        assert_eq!(boxes[1], BoundingBox::new(200, 100, 100, 80));
        let hole = boxes[2];
        assert!(hole.x > 200 && hole.right() < 300, "{hole:?}");
        assert!(hole.y > 100 && hole.bottom() < 180, "{hole:?}");
    }

    #[test]
    fn test_boxes_stay_within_raster() {
        let mut screen = mock_screen();
        fill(&mut screen, BoundingBox::new(0, 0, 400, 12), INK);
        fill(&mut screen, BoundingBox::new(370, 260, 30, 40), INK);
        let raster = Raster::from_rgb(screen);

        let boxes = RegionSegmenter::default().segment(&raster);
        assert!(!boxes.is_empty());
        for bbox in &boxes {
            assert!(bbox.fits_within(raster.width(), raster.height()), "{bbox:?}");
        }
    }

    #[test]
    fn test_output_is_deterministic() {
        let raster = Raster::from_rgb(mock_screen());
        let segmenter = RegionSegmenter::default();
        assert_eq!(segmenter.segment(&raster), segmenter.segment(&raster));
    }

    #[test]
    fn test_min_area_is_exclusive() {
        let mut screen = RgbImage::from_pixel(100, 100, WHITE);
        fill(&mut screen, BoundingBox::new(10, 10, 11, 11), INK);
        let raster = Raster::from_rgb(screen);
        let segmenter = RegionSegmenter::default();

        // An 11x11 block traces an area of exactly 100.
        assert!(segmenter.segment_with_min_area(&raster, 100.0).is_empty());
        assert_eq!(segmenter.segment_with_min_area(&raster, 99.0).len(), 1);
    }

    #[test]
    fn test_light_on_dark_capture() {
        let mut screen = RgbImage::from_pixel(200, 150, Rgb([20, 20, 20]));
        fill(&mut screen, BoundingBox::new(30, 30, 40, 40), Rgb([240, 240, 240]));
        let boxes = RegionSegmenter::default().segment(&Raster::from_rgb(screen));
        assert_eq!(boxes, vec![BoundingBox::new(30, 30, 40, 40)]);
    }

    #[test]
    fn test_fixed_threshold_strategy() {
        let mut screen = RgbImage::from_pixel(100, 100, WHITE);
        fill(&mut screen, BoundingBox::new(10, 10, 30, 30), Rgb([100, 100, 100]));
        fill(&mut screen, BoundingBox::new(60, 60, 30, 30), Rgb([200, 200, 200]));
        let segmenter = RegionSegmenter::new(SegmentationConfig {
            polarity: PolarityMode::DarkOnLight,
            ..SegmentationConfig::default()
        })
        .with_threshold_strategy(Arc::new(FixedThreshold(150)));

        let boxes = segmenter.segment(&Raster::from_rgb(screen));
        assert_eq!(boxes, vec![BoundingBox::new(10, 10, 30, 30)]);
    }
}
