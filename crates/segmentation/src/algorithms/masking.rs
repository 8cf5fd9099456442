use image::{GrayImage, RgbImage};
use imageproc::distance_transform::Norm;
use serde::{Deserialize, Serialize};

use crate::color::rgb_to_hsv;
use crate::error::Result;
use crate::traits::{MaskRefiner, RegionMasker};

/// Thresholds a color image into a binary foreground mask by an inclusive
/// hue/saturation/value interval. Defaults cover green vegetation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HsvRangeMasker {
    /// Inclusive hue bounds, halved-degree scale [0, 179]
    pub hue: (u8, u8),
    /// Inclusive saturation bounds [0, 255]
    pub saturation: (u8, u8),
    /// Inclusive value bounds [0, 255]
    pub value: (u8, u8),
}

impl Default for HsvRangeMasker {
    fn default() -> Self {
        Self {
            hue: (30, 100),
            saturation: (20, 255),
            value: (35, 255),
        }
    }
}

impl RegionMasker for HsvRangeMasker {
    fn mask(&self, image: &RgbImage) -> Result<GrayImage> {
        let hsv = rgb_to_hsv(image);
        let mut mask = GrayImage::new(image.width(), image.height());
        for (src, dst) in hsv.pixels().zip(mask.pixels_mut()) {
            let [h, s, v] = src.0;
            let inside = self.hue.0 <= h
                && h <= self.hue.1
                && self.saturation.0 <= s
                && s <= self.saturation.1
                && self.value.0 <= v
                && v <= self.value.1;
            dst.0[0] = if inside { 255 } else { 0 };
        }
        Ok(mask)
    }
}

/// Morphological closing: dilate then erode with a 3x3 square element,
/// `iterations` times each. Merges nearby foreground blobs and fills small
/// holes; it does not remove noise.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MorphologicalCloser {
    pub iterations: u8,
}

impl Default for MorphologicalCloser {
    fn default() -> Self {
        Self { iterations: 2 }
    }
}

impl MaskRefiner for MorphologicalCloser {
    fn refine(&self, mask: &GrayImage) -> Result<GrayImage> {
        Ok(imageproc::morphology::close(
            mask,
            Norm::LInf,
            self.iterations,
        ))
    }
}

/// Morphological opening: erode then dilate with a 3x3 square element,
/// `iterations` times each. Removes specks smaller than the element.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MorphologicalOpener {
    pub iterations: u8,
}

impl Default for MorphologicalOpener {
    fn default() -> Self {
        Self { iterations: 3 }
    }
}

impl MaskRefiner for MorphologicalOpener {
    fn refine(&self, mask: &GrayImage) -> Result<GrayImage> {
        Ok(imageproc::morphology::open(
            mask,
            Norm::LInf,
            self.iterations,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Luma, Rgb};

    #[test]
    fn green_pixels_are_foreground() {
        let mut img = RgbImage::from_pixel(4, 1, Rgb([200, 30, 30]));
        img.put_pixel(2, 0, Rgb([40, 180, 60]));
        let mask = HsvRangeMasker::default().mask(&img).unwrap();
        assert_eq!(mask.get_pixel(2, 0).0[0], 255);
        assert_eq!(mask.get_pixel(0, 0).0[0], 0);
        assert_eq!(mask.get_pixel(1, 0).0[0], 0);
    }

    #[test]
    fn mask_values_are_binary() {
        let mut img = RgbImage::new(8, 8);
        for (x, y, p) in img.enumerate_pixels_mut() {
            *p = Rgb([(x * 30) as u8, (y * 30) as u8, 90]);
        }
        let mask = HsvRangeMasker::default().mask(&img).unwrap();
        assert!(mask.pixels().all(|p| p.0[0] == 0 || p.0[0] == 255));
    }

    #[test]
    fn closing_fills_small_hole() {
        let mut mask = GrayImage::from_pixel(9, 9, Luma([255]));
        mask.put_pixel(4, 4, Luma([0]));
        let closed = MorphologicalCloser::default().refine(&mask).unwrap();
        assert_eq!(closed.get_pixel(4, 4).0[0], 255);
    }

    #[test]
    fn opening_removes_lone_speck() {
        let mut mask = GrayImage::new(9, 9);
        mask.put_pixel(4, 4, Luma([255]));
        let opened = MorphologicalOpener::default().refine(&mask).unwrap();
        assert!(opened.pixels().all(|p| p.0[0] == 0));
    }
}
