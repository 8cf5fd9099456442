use image::{GrayImage, RgbImage};

use crate::error::Result;

/// Trait for color-image preprocessing algorithms
pub trait ImagePreprocessor: Send + Sync {
    /// Preprocess the input image (e.g., contrast enhancement, blur)
    fn preprocess(&self, image: &RgbImage) -> Result<RgbImage>;
}

/// Trait for foreground masking algorithms
pub trait RegionMasker: Send + Sync {
    /// Produce a binary mask (0 background, 255 foreground) from a color image
    fn mask(&self, image: &RgbImage) -> Result<GrayImage>;
}

/// Trait for binary-mask refinement algorithms
pub trait MaskRefiner: Send + Sync {
    /// Refine a binary mask (e.g., morphology, component selection)
    fn refine(&self, mask: &GrayImage) -> Result<GrayImage>;
}

/// Trait for texture encoding algorithms
pub trait TextureEncoder: Send + Sync {
    /// Encode a per-pixel texture descriptor of a color image
    fn encode(&self, image: &RgbImage) -> Result<GrayImage>;
}
