use std::path::{Path, PathBuf};

use image::RgbImage;

use crate::{error::Result, types::Segmentation};

/// Decode an image file into the pipeline's RGB working format.
pub fn open_rgb<P: AsRef<Path>>(path: P) -> Result<RgbImage> {
    Ok(image::open(path)?.to_rgb8())
}

/// Deterministic output name for the n-th mask of a run.
pub fn mask_output_path(dir: &Path, index: usize) -> PathBuf {
    dir.join(format!("binarized_{index}.png"))
}

/// Companion name for the n-th masked foreground image.
pub fn foreground_output_path(dir: &Path, index: usize) -> PathBuf {
    dir.join(format!("foreground_{index}.png"))
}

/// Companion name for the n-th texture image.
pub fn texture_output_path(dir: &Path, index: usize) -> PathBuf {
    dir.join(format!("lbp_{index}.png"))
}

impl Segmentation {
    /// Save the filled binary mask as a single-channel PNG
    pub fn save_mask<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        self.mask.save(path)?;
        Ok(())
    }

    /// Save the background-separated image
    pub fn save_foreground<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        self.foreground.save(path)?;
        Ok(())
    }

    /// Save the texture codes as a single-channel PNG
    pub fn save_texture<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        self.texture.save(path)?;
        Ok(())
    }
}
