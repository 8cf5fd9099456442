//! # Leaf Segmentation Library
//!
//! A trait-based library for separating plant leaves from their background
//! in photographs. Supports conditional contrast normalization, HSV-interval
//! masking, morphological cleanup, largest-region extraction and local
//! binary pattern texture encoding, composed through a flexible pipeline.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use segmentation::PipelineBuilder;
//!
//! // The standard leaf pipeline
//! let pipeline = PipelineBuilder::build_standard();
//!
//! // Process an image
//! let image = segmentation::io::open_rgb("leaf.jpg")?;
//! let result = pipeline.process(&image)?;
//!
//! // Persist the filled mask
//! result.save_mask("binarized_0.png")?;
//! # Ok::<(), segmentation::SegmentationError>(())
//! ```
//!
//! ## Custom Pipeline
//!
//! ```rust,no_run
//! use segmentation::{Pipeline, algorithms::*};
//!
//! let pipeline = Pipeline::builder()
//!     .add_mask_filter(GaussianBlurPreprocessor { sigma: 1.2 })
//!     .set_masker(HsvRangeMasker {
//!         hue: (25, 95),
//!         ..HsvRangeMasker::default()
//!     })
//!     .with_closing(3)
//!     .with_largest_region()
//!     .build();
//! ```

// Core modules
pub mod algorithms;
pub mod color;
pub mod error;
pub mod io;
pub mod pipeline;
pub mod traits;
pub mod types;

// Re-exports for convenience
pub use algorithms::*;
pub use error::{Result, SegmentationError};
pub use pipeline::{Pipeline, builder::PipelineBuilder};
pub use traits::*;
pub use types::Segmentation;
