//! # Segmentation Metrics Library
//!
//! Scores a candidate binary mask against a manual reference with four
//! agreement metrics (Dice, Fit, Size, Position), summarizes batches of
//! scores per group, and persists the summaries in an append-only JSON
//! report.
//!
//! ```rust,no_run
//! use metrics::{aggregate, append_record, score_pair};
//! use std::path::Path;
//!
//! let candidate = image::open("binarized_0.png")?.to_luma8();
//! let reference = image::open("manual_0.png")?.to_luma8();
//! let scores = score_pair(&candidate, &reference)?;
//!
//! let record = aggregate("Blueberry__healthy", &[scores])?;
//! append_record(Path::new("resultados.json"), &record)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod aggregate;
pub mod error;
pub mod report;
pub mod scores;

pub use aggregate::{AggregateRecord, aggregate};
pub use error::{MetricsError, Result};
pub use report::{append_record, finalize_report, read_report};
pub use scores::{
    Metric, MetricScores, dice_similarity, fit_adjust, position_adjust, score_pair, size_adjust,
};
