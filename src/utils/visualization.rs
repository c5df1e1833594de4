//! Visualization utilities for analysis results.
//!
//! Draws region outlines onto copies of captures. Used for the annotated
//! output of a screenshot comparison.

use image::{Rgb, RgbImage};
use imageproc::drawing::draw_hollow_rect_mut;
use imageproc::rect::Rect;
use tracing::debug;

use crate::processors::BoundingBox;

/// Outline colour for difference regions.
pub const DIFF_OUTLINE_COLOR: Rgb<u8> = Rgb([255, 0, 0]);

/// Returns a copy of `image` with every box outlined.
///
/// Outlines grow inward from the box edge so they always stay within the
/// image, regardless of thickness.
pub fn draw_region_outlines(
    image: &RgbImage,
    boxes: &[BoundingBox],
    thickness: u32,
    color: Rgb<u8>,
) -> RgbImage {
    let mut canvas = image.clone();
    for bbox in boxes {
        draw_outline(&mut canvas, bbox, thickness, color);
    }
    debug!("Outlined {} regions", boxes.len());
    canvas
}

fn draw_outline(img: &mut RgbImage, bbox: &BoundingBox, thickness: u32, color: Rgb<u8>) {
    for inset in 0..thickness {
        let Some(width) = bbox.width.checked_sub(2 * inset) else {
            break;
        };
        let Some(height) = bbox.height.checked_sub(2 * inset) else {
            break;
        };
        if width == 0 || height == 0 {
            break;
        }
        let rect = Rect::at((bbox.x + inset) as i32, (bbox.y + inset) as i32).of_size(width, height);
        draw_hollow_rect_mut(img, rect, color);
    }
}
