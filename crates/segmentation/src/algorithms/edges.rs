use image::{GrayImage, Luma};
use imageproc::gradients::{horizontal_sobel, vertical_sobel};
use serde::{Deserialize, Serialize};

use crate::error::{Result, SegmentationError};

/// Sobel edge response, combined per pixel as the maximum of the absolute
/// horizontal and vertical gradients, saturated to 8 bits.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct SobelEdgeDetector;

impl SobelEdgeDetector {
    pub fn edges(&self, gray: &GrayImage) -> GrayImage {
        let gx = horizontal_sobel(gray);
        let gy = vertical_sobel(gray);
        let mut edges = GrayImage::new(gray.width(), gray.height());
        for (x, y, pixel) in edges.enumerate_pixels_mut() {
            let hx = gx.get_pixel(x, y).0[0].unsigned_abs();
            let hy = gy.get_pixel(x, y).0[0].unsigned_abs();
            *pixel = Luma([hx.max(hy).min(255) as u8]);
        }
        edges
    }

    /// Edge response restricted to the mask's foreground.
    pub fn edges_within(&self, gray: &GrayImage, mask: &GrayImage) -> Result<GrayImage> {
        if gray.dimensions() != mask.dimensions() {
            return Err(SegmentationError::DimensionMismatch {
                mask_width: mask.width(),
                mask_height: mask.height(),
                image_width: gray.width(),
                image_height: gray.height(),
            });
        }
        let mut edges = self.edges(gray);
        for (dst, m) in edges.pixels_mut().zip(mask.pixels()) {
            if m.0[0] == 0 {
                dst.0[0] = 0;
            }
        }
        Ok(edges)
    }
}
