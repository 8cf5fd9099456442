use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use segmentation::algorithms::{
    ContrastNormalizer, GaussianBlurPreprocessor, HsvRangeMasker, MorphologicalCloser,
};
use segmentation::{Pipeline, PipelineBuilder};

use crate::LeafKitError;

/// Tuning knobs of the standard pipeline, all optional in a job file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineOptions {
    pub contrast: ContrastNormalizer,
    pub blur: GaussianBlurPreprocessor,
    pub mask: HsvRangeMasker,
    pub closing: MorphologicalCloser,
}

impl PipelineOptions {
    /// Assemble the standard pipeline from these options.
    pub fn build_pipeline(&self) -> Pipeline {
        PipelineBuilder::new()
            .add_enhancer(self.contrast.clone())
            .add_mask_filter(self.blur.clone())
            .set_masker(self.mask.clone())
            .add_refiner(self.closing.clone())
            .with_largest_region()
            .build()
    }
}

/// A segmentation batch: where to read images, where to write masks, and
/// which pipeline constants to use.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SegmentationJob {
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
    #[serde(default)]
    pub options: PipelineOptions,
}

impl SegmentationJob {
    /// Load a job configuration from a TOML file
    pub fn from_toml_file<P: AsRef<Path>>(path: P) -> Result<Self, LeafKitError> {
        let content = fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Load a job configuration from a TOML string
    pub fn from_toml(content: &str) -> Result<Self, LeafKitError> {
        Ok(toml::from_str(content)?)
    }

    /// Load a job configuration from a JSON file
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, LeafKitError> {
        let content = fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Load a job configuration from a JSON string
    pub fn from_json(content: &str) -> Result<Self, LeafKitError> {
        Ok(serde_json::from_str(content)?)
    }

    /// Auto-detect file format and load the configuration
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, LeafKitError> {
        let path_ref = path.as_ref();
        match path_ref.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => Self::from_toml_file(path),
            Some("json") => Self::from_json_file(path),
            _ => Err(LeafKitError::UnsupportedFileFormat),
        }
    }

    /// Save the job configuration to a TOML file
    pub fn to_toml_file<P: AsRef<Path>>(&self, path: P) -> Result<(), LeafKitError> {
        fs::write(path, toml::to_string_pretty(&self)?)?;
        Ok(())
    }

    /// Save the job configuration to a JSON file
    pub fn to_json_file<P: AsRef<Path>>(&self, path: P) -> Result<(), LeafKitError> {
        fs::write(path, serde_json::to_string_pretty(&self)?)?;
        Ok(())
    }
}
