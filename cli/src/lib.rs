//! Batch front end for the leaf segmentation and validation toolkit: job
//! configuration files, folder runs, and evaluation against manual masks.

use thiserror::Error;

pub mod batch;
pub mod config;

pub use batch::{RunSummary, run_evaluation, run_segmentation};
pub use config::{PipelineOptions, SegmentationJob};

#[derive(Error, Debug)]
pub enum LeafKitError {
    #[error(transparent)]
    SerdeError(#[from] serde_json::Error),
    #[error(transparent)]
    TomlDeError(#[from] toml::de::Error),
    #[error(transparent)]
    TomlSerError(#[from] toml::ser::Error),
    #[error(transparent)]
    IoError(#[from] std::io::Error),
    #[error(transparent)]
    Segmentation(#[from] segmentation::SegmentationError),
    #[error(transparent)]
    Metrics(#[from] metrics::MetricsError),
    #[error("Unsupported file format. Please use .toml or .json files")]
    UnsupportedFileFormat,
}
