use geo::Area;
use geo_types::{Coord, LineString, Polygon};
use image::{GrayImage, Luma};
use imageproc::contours::find_contours;
use imageproc::drawing::draw_polygon_mut;
use imageproc::point::Point;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SegmentationError};
use crate::traits::MaskRefiner;

/// Keeps only the largest connected foreground region.
///
/// Outermost boundary contours are traced, the one enclosing maximum area
/// wins (strictly greater, so the first encountered keeps ties and zero-area
/// contours never win), and its interior is rasterized as a fresh filled
/// mask. A mask with no qualifying contour is an error.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct LargestRegionFilter;

impl MaskRefiner for LargestRegionFilter {
    fn refine(&self, mask: &GrayImage) -> Result<GrayImage> {
        let contours = find_contours::<i32>(mask);

        let mut best: Option<&[Point<i32>]> = None;
        let mut best_area = 0.0f64;
        // Outer contours only; nested boundaries are discarded
        for contour in contours.iter().filter(|c| c.parent.is_none()) {
            let area = contour_area(&contour.points);
            if area > best_area {
                best_area = area;
                best = Some(&contour.points);
            }
        }
        let winner = best.ok_or(SegmentationError::NoForegroundFound)?;

        let mut filled = GrayImage::new(mask.width(), mask.height());
        let mut points = winner.to_vec();
        if points.len() > 1 && points.first() == points.last() {
            points.pop();
        }
        draw_polygon_mut(&mut filled, &points, Luma([255]));
        Ok(filled)
    }
}

/// Area enclosed by a boundary, by the shoelace formula.
fn contour_area(points: &[Point<i32>]) -> f64 {
    if points.len() < 3 {
        return 0.0;
    }
    let coords: Vec<Coord<f64>> = points
        .iter()
        .map(|p| Coord {
            x: p.x as f64,
            y: p.y as f64,
        })
        .collect();
    Polygon::new(LineString::new(coords), vec![]).unsigned_area()
}
