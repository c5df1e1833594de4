//! Geometric primitives for region analysis.
//!
//! Axis-aligned bounding boxes in pixel coordinates, and the contour measures
//! (enclosed area, bounding rectangle) used to filter segmentation output.

use imageproc::contours::Contour;
use imageproc::point::Point;
use serde::{Deserialize, Serialize};

/// An axis-aligned box in pixel coordinates.
///
/// `width` and `height` count pixels, so a box covers columns
/// `x..x + width` and rows `y..y + height`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BoundingBox {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl BoundingBox {
    /// Creates a new bounding box.
    #[inline]
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Computes the tightest box around a set of pixel coordinates.
    ///
    /// Returns `None` for an empty set.
    pub fn from_points(points: &[Point<u32>]) -> Option<Self> {
        let first = points.first()?;
        let (mut min_x, mut min_y, mut max_x, mut max_y) = (first.x, first.y, first.x, first.y);
        for p in &points[1..] {
            min_x = min_x.min(p.x);
            min_y = min_y.min(p.y);
            max_x = max_x.max(p.x);
            max_y = max_y.max(p.y);
        }
        Some(Self::new(min_x, min_y, max_x - min_x + 1, max_y - min_y + 1))
    }

    /// Computes the bounding box of a contour.
    pub fn from_contour(contour: &Contour<u32>) -> Option<Self> {
        Self::from_points(&contour.points)
    }

    /// Exclusive right edge.
    #[inline]
    pub fn right(&self) -> u32 {
        self.x + self.width
    }

    /// Exclusive bottom edge.
    #[inline]
    pub fn bottom(&self) -> u32 {
        self.y + self.height
    }

    /// Number of pixels covered by the box.
    pub fn area(&self) -> u64 {
        self.width as u64 * self.height as u64
    }

    /// Width divided by height.
    pub fn aspect_ratio(&self) -> f64 {
        self.width as f64 / self.height as f64
    }

    /// Returns true if the box lies entirely inside an image of the given size.
    pub fn fits_within(&self, width: u32, height: u32) -> bool {
        self.width > 0 && self.height > 0 && self.right() <= width && self.bottom() <= height
    }
}

/// Area enclosed by a closed polygon, via the shoelace formula.
///
/// Contours trace pixel centres, so a filled `w x h` block encloses
/// `(w - 1) * (h - 1)` and single-pixel-wide shapes enclose nothing.
pub fn polygon_area(points: &[Point<u32>]) -> f64 {
    if points.len() < 3 {
        return 0.0;
    }
    let twice_area: i64 = points
        .iter()
        .zip(points.iter().cycle().skip(1))
        .map(|(a, b)| a.x as i64 * b.y as i64 - b.x as i64 * a.y as i64)
        .sum();
    twice_area.abs() as f64 / 2.0
}

/// Area enclosed by a contour.
pub fn contour_area(contour: &Contour<u32>) -> f64 {
    polygon_area(&contour.points)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect_outline(x: u32, y: u32, w: u32, h: u32) -> Vec<Point<u32>> {
        let (r, b) = (x + w - 1, y + h - 1);
        let mut points = Vec::new();
        for px in x..=r {
            points.push(Point::new(px, y));
        }
        for py in y + 1..=b {
            points.push(Point::new(r, py));
        }
        for px in (x..r).rev() {
            points.push(Point::new(px, b));
        }
        for py in (y + 1..b).rev() {
            points.push(Point::new(x, py));
        }
        points
    }

    #[test]
    fn test_bounding_box_from_points_is_inclusive() {
        let points = rect_outline(100, 100, 50, 50);
        let bbox = BoundingBox::from_points(&points).unwrap();
        assert_eq!(bbox, BoundingBox::new(100, 100, 50, 50));
        assert_eq!(bbox.right(), 150);
        assert_eq!(bbox.area(), 2500);
        assert!(BoundingBox::from_points(&[]).is_none());
    }

    #[test]
    fn test_polygon_area_of_traced_block() {
        assert_eq!(polygon_area(&rect_outline(0, 0, 11, 21)), 200.0);
        assert_eq!(polygon_area(&[Point::new(3, 3)]), 0.0);
        assert_eq!(polygon_area(&rect_outline(5, 5, 1, 8)), 0.0);
    }

    #[test]
    fn test_fits_within_and_aspect_ratio() {
        let bbox = BoundingBox::new(360, 280, 40, 20);
        assert!(bbox.fits_within(400, 300));
        assert!(!bbox.fits_within(399, 300));
        assert_eq!(bbox.aspect_ratio(), 2.0);
    }
}
