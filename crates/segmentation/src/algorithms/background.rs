use image::{GrayImage, Rgb, RgbImage};

use crate::error::{Result, SegmentationError};

/// Separate the region of interest from its background: every pixel where
/// the mask is zero is zeroed in all channels, masked pixels pass through.
pub fn separate_background(image: &RgbImage, mask: &GrayImage) -> Result<RgbImage> {
    if image.dimensions() != mask.dimensions() {
        return Err(SegmentationError::DimensionMismatch {
            mask_width: mask.width(),
            mask_height: mask.height(),
            image_width: image.width(),
            image_height: image.height(),
        });
    }

    let mut foreground = image.clone();
    for (dst, m) in foreground.pixels_mut().zip(mask.pixels()) {
        if m.0[0] == 0 {
            *dst = Rgb([0, 0, 0]);
        }
    }
    Ok(foreground)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Luma;

    #[test]
    fn zeroes_exactly_the_complement_of_the_mask() {
        let img = RgbImage::from_pixel(4, 4, Rgb([10, 20, 30]));
        let mut mask = GrayImage::new(4, 4);
        mask.put_pixel(1, 1, Luma([255]));
        mask.put_pixel(2, 3, Luma([255]));

        let out = separate_background(&img, &mask).unwrap();
        for (x, y, pixel) in out.enumerate_pixels() {
            if (x, y) == (1, 1) || (x, y) == (2, 3) {
                assert_eq!(pixel.0, [10, 20, 30]);
            } else {
                assert_eq!(pixel.0, [0, 0, 0]);
            }
        }
    }

    #[test]
    fn mismatched_dimensions_are_an_error() {
        let img = RgbImage::new(4, 4);
        let mask = GrayImage::new(5, 4);
        assert!(matches!(
            separate_background(&img, &mask),
            Err(SegmentationError::DimensionMismatch { .. })
        ));
    }
}
