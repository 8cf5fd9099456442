use image::{GrayImage, RgbImage};

/// Result bundle of one pipeline run over a single photograph.
#[derive(Debug, Clone)]
pub struct Segmentation {
    /// Filled binary mask of the selected leaf region ({0, 255})
    pub mask: GrayImage,
    /// Source image (after contrast normalization) with the background zeroed
    pub foreground: RgbImage,
    /// Per-pixel local binary pattern codes of the masked region
    pub texture: GrayImage,
}

impl Segmentation {
    /// Width of the processed frame
    pub fn width(&self) -> u32 {
        self.mask.width()
    }

    /// Height of the processed frame
    pub fn height(&self) -> u32 {
        self.mask.height()
    }

    /// Number of foreground pixels in the mask
    pub fn foreground_area(&self) -> usize {
        self.mask.pixels().filter(|p| p.0[0] != 0).count()
    }
}
