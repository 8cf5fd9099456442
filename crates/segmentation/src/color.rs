//! RGB to HSV conversion with the 8-bit scaling used throughout the pipeline:
//! hue in [0, 179] (degrees halved), saturation and value in [0, 255]. The
//! halved hue keeps the green interval constants meaningful.

use image::{Rgb, RgbImage};

/// Convert a single RGB pixel to (hue, saturation, value).
pub fn rgb_to_hsv_pixel(rgb: Rgb<u8>) -> (u8, u8, u8) {
    let r = rgb.0[0] as f32;
    let g = rgb.0[1] as f32;
    let b = rgb.0[2] as f32;

    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let chroma = max - min;

    let value = max;
    let saturation = if max == 0.0 {
        0.0
    } else {
        255.0 * chroma / max
    };

    let hue_degrees = if chroma == 0.0 {
        0.0
    } else if max == r {
        60.0 * (g - b) / chroma
    } else if max == g {
        120.0 + 60.0 * (b - r) / chroma
    } else {
        240.0 + 60.0 * (r - g) / chroma
    };
    let hue_degrees = if hue_degrees < 0.0 {
        hue_degrees + 360.0
    } else {
        hue_degrees
    };

    (
        ((hue_degrees / 2.0).round() as u16 % 180) as u8,
        saturation.round() as u8,
        value.round() as u8,
    )
}

/// Convert a whole image. The result reuses the three-channel buffer type;
/// channel order is hue, saturation, value.
pub fn rgb_to_hsv(image: &RgbImage) -> RgbImage {
    let mut hsv = RgbImage::new(image.width(), image.height());
    for (src, dst) in image.pixels().zip(hsv.pixels_mut()) {
        let (h, s, v) = rgb_to_hsv_pixel(*src);
        *dst = Rgb([h, s, v]);
    }
    hsv
}

/// 256-bin histogram of the value plane of an HSV image.
pub fn value_histogram(hsv: &RgbImage) -> [u32; 256] {
    let mut histogram = [0u32; 256];
    for pixel in hsv.pixels() {
        histogram[pixel.0[2] as usize] += 1;
    }
    histogram
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn primary_colors_match_reference() {
        assert_eq!(rgb_to_hsv_pixel(Rgb([255, 0, 0])), (0, 255, 255));
        assert_eq!(rgb_to_hsv_pixel(Rgb([0, 255, 0])), (60, 255, 255));
        assert_eq!(rgb_to_hsv_pixel(Rgb([0, 0, 255])), (120, 255, 255));
    }

    #[test]
    fn achromatic_pixels_have_zero_hue_and_saturation() {
        assert_eq!(rgb_to_hsv_pixel(Rgb([0, 0, 0])), (0, 0, 0));
        assert_eq!(rgb_to_hsv_pixel(Rgb([255, 255, 255])), (0, 0, 255));
        assert_eq!(rgb_to_hsv_pixel(Rgb([128, 128, 128])), (0, 0, 128));
    }

    #[test]
    fn mixed_color_matches_reference() {
        // max channel is blue: h = (240 + 60*(r-g)/chroma) / 2
        assert_eq!(rgb_to_hsv_pixel(Rgb([100, 50, 150])), (135, 170, 150));
    }

    #[test]
    fn value_histogram_counts_every_pixel() {
        let mut img = RgbImage::new(4, 4);
        for pixel in img.pixels_mut() {
            *pixel = Rgb([0, 0, 200]);
        }
        let hsv = rgb_to_hsv(&img);
        let hist = value_histogram(&hsv);
        assert_eq!(hist[200], 16);
        assert_eq!(hist.iter().sum::<u32>(), 16);
    }
}
