pub mod builder;

use image::RgbImage;
use tracing::debug;

use crate::{
    algorithms::background::separate_background,
    error::Result,
    traits::{ImagePreprocessor, MaskRefiner, RegionMasker, TextureEncoder},
    types::Segmentation,
};

/// A flexible segmentation pipeline with multiple processing stages
pub struct Pipeline {
    enhancers: Vec<Box<dyn ImagePreprocessor>>,
    mask_filters: Vec<Box<dyn ImagePreprocessor>>,
    masker: Box<dyn RegionMasker>,
    refiners: Vec<Box<dyn MaskRefiner>>,
    encoder: Box<dyn TextureEncoder>,
}

impl Pipeline {
    /// Create a new pipeline builder
    pub fn builder() -> builder::PipelineBuilder {
        builder::PipelineBuilder::new()
    }

    /// Create a new pipeline with the given components
    pub fn new(
        enhancers: Vec<Box<dyn ImagePreprocessor>>,
        mask_filters: Vec<Box<dyn ImagePreprocessor>>,
        masker: Box<dyn RegionMasker>,
        refiners: Vec<Box<dyn MaskRefiner>>,
        encoder: Box<dyn TextureEncoder>,
    ) -> Self {
        Self {
            enhancers,
            mask_filters,
            masker,
            refiners,
            encoder,
        }
    }

    /// Process an image through the entire pipeline.
    ///
    /// Enhancers feed both the mask and the final foreground; mask filters
    /// (noise reduction) feed only the masking path, so the separated
    /// foreground is never blurred.
    pub fn process(&self, image: &RgbImage) -> Result<Segmentation> {
        let mut base = image.clone();
        for enhancer in &self.enhancers {
            base = enhancer.preprocess(&base)?;
        }

        let mut mask_input = base.clone();
        for filter in &self.mask_filters {
            mask_input = filter.preprocess(&mask_input)?;
        }

        let mut mask = self.masker.mask(&mask_input)?;
        for refiner in &self.refiners {
            mask = refiner.refine(&mask)?;
        }
        debug!(
            foreground_pixels = mask.pixels().filter(|p| p.0[0] != 0).count(),
            "mask refined"
        );

        let foreground = separate_background(&base, &mask)?;
        let texture = self.encoder.encode(&foreground)?;

        Ok(Segmentation {
            mask,
            foreground,
            texture,
        })
    }

    /// Get information about the pipeline configuration
    pub fn info(&self) -> String {
        format!(
            "Pipeline: {} enhancers, {} mask filters, 1 masker, {} refiners",
            self.enhancers.len(),
            self.mask_filters.len(),
            self.refiners.len()
        )
    }
}
