use crate::{
    algorithms::{
        ContrastNormalizer, GaussianBlurPreprocessor, HsvRangeMasker, LargestRegionFilter,
        LbpEncoder, MorphologicalCloser,
    },
    pipeline::Pipeline,
    traits::{ImagePreprocessor, MaskRefiner, RegionMasker, TextureEncoder},
};

/// Builder for creating segmentation pipelines with a fluent API
pub struct PipelineBuilder {
    enhancers: Vec<Box<dyn ImagePreprocessor>>,
    mask_filters: Vec<Box<dyn ImagePreprocessor>>,
    masker: Option<Box<dyn RegionMasker>>,
    refiners: Vec<Box<dyn MaskRefiner>>,
    encoder: Option<Box<dyn TextureEncoder>>,
}

impl PipelineBuilder {
    /// Create a new pipeline builder
    pub fn new() -> Self {
        Self {
            enhancers: Vec::new(),
            mask_filters: Vec::new(),
            masker: None,
            refiners: Vec::new(),
            encoder: None,
        }
    }

    /// Add a preprocessor applied to the image itself (kept in the output)
    pub fn add_enhancer<P>(mut self, enhancer: P) -> Self
    where
        P: ImagePreprocessor + 'static,
    {
        self.enhancers.push(Box::new(enhancer));
        self
    }

    /// Add a preprocessor applied only on the masking path
    pub fn add_mask_filter<P>(mut self, filter: P) -> Self
    where
        P: ImagePreprocessor + 'static,
    {
        self.mask_filters.push(Box::new(filter));
        self
    }

    /// Set the region masker (replaces any existing one)
    pub fn set_masker<M>(mut self, masker: M) -> Self
    where
        M: RegionMasker + 'static,
    {
        self.masker = Some(Box::new(masker));
        self
    }

    /// Add a mask refiner to the pipeline
    pub fn add_refiner<R>(mut self, refiner: R) -> Self
    where
        R: MaskRefiner + 'static,
    {
        self.refiners.push(Box::new(refiner));
        self
    }

    /// Set the texture encoder (replaces any existing one)
    pub fn set_encoder<E>(mut self, encoder: E) -> Self
    where
        E: TextureEncoder + 'static,
    {
        self.encoder = Some(Box::new(encoder));
        self
    }

    /// Add morphological closing as a refinement step
    pub fn with_closing(self, iterations: u8) -> Self {
        self.add_refiner(MorphologicalCloser { iterations })
    }

    /// Add largest-region selection as a refinement step
    pub fn with_largest_region(self) -> Self {
        self.add_refiner(LargestRegionFilter)
    }

    /// Build the pipeline with default components if not specified
    pub fn build(self) -> Pipeline {
        let masker = self
            .masker
            .unwrap_or_else(|| Box::new(HsvRangeMasker::default()));
        let encoder = self.encoder.unwrap_or_else(|| Box::new(LbpEncoder));

        Pipeline::new(
            self.enhancers,
            self.mask_filters,
            masker,
            self.refiners,
            encoder,
        )
    }

    /// Build the standard leaf pipeline: conditional contrast normalization,
    /// blur on the masking path, green-interval masking, closing, largest
    /// region, and LBP texture encoding.
    pub fn build_standard() -> Pipeline {
        Self::new()
            .add_enhancer(ContrastNormalizer::default())
            .add_mask_filter(GaussianBlurPreprocessor::default())
            .set_masker(HsvRangeMasker::default())
            .with_closing(MorphologicalCloser::default().iterations)
            .with_largest_region()
            .build()
    }
}

impl Default for PipelineBuilder {
    fn default() -> Self {
        Self::new()
    }
}
