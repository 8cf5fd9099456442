use image::GrayImage;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use crate::error::{MetricsError, Result};

/// The four agreement metrics of a scored comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, EnumString)]
pub enum Metric {
    Dice,
    Fit,
    Size,
    Position,
}

/// One scored comparison between a candidate mask and a reference mask.
/// Field names serialize in PascalCase: that spelling is the report contract.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct MetricScores {
    pub dice: f64,
    pub fit: f64,
    pub size: f64,
    pub position: f64,
}

impl MetricScores {
    pub fn get(&self, metric: Metric) -> f64 {
        match metric {
            Metric::Dice => self.dice,
            Metric::Fit => self.fit,
            Metric::Size => self.size,
            Metric::Position => self.position,
        }
    }
}

fn check_dimensions(candidate: &GrayImage, reference: &GrayImage) -> Result<()> {
    if candidate.dimensions() != reference.dimensions() {
        return Err(MetricsError::DimensionMismatch {
            candidate_width: candidate.width(),
            candidate_height: candidate.height(),
            reference_width: reference.width(),
            reference_height: reference.height(),
        });
    }
    Ok(())
}

/// Intersection over union of the raw pixel values:
/// `sum(candidate AND reference) / sum(candidate OR reference)`.
pub fn fit_adjust(candidate: &GrayImage, reference: &GrayImage) -> Result<f64> {
    check_dimensions(candidate, reference)?;
    let mut and_sum = 0u64;
    let mut or_sum = 0u64;
    for (c, r) in candidate.as_raw().iter().zip(reference.as_raw()) {
        and_sum += (c & r) as u64;
        or_sum += (c | r) as u64;
    }
    if or_sum == 0 {
        return Err(MetricsError::EmptyForeground);
    }
    Ok(and_sum as f64 / or_sum as f64)
}

/// Foreground-area agreement:
/// `1 - |nonzero(reference) - nonzero(candidate)| / (nonzero(reference) + nonzero(candidate))`.
pub fn size_adjust(candidate: &GrayImage, reference: &GrayImage) -> Result<f64> {
    check_dimensions(candidate, reference)?;
    let count = |mask: &GrayImage| mask.as_raw().iter().filter(|&&v| v != 0).count() as f64;
    let candidate_area = count(candidate);
    let reference_area = count(reference);
    let total = candidate_area + reference_area;
    if total == 0.0 {
        return Err(MetricsError::EmptyForeground);
    }
    Ok(1.0 - (reference_area - candidate_area).abs() / total)
}

/// Centroid agreement. Row and column distances between the centroids of the
/// two foregrounds are normalized by the reference height and width:
/// `1 - (row_diff + col_diff) / 3`. Asymmetric in the reference shape.
pub fn position_adjust(candidate: &GrayImage, reference: &GrayImage) -> Result<f64> {
    check_dimensions(candidate, reference)?;
    let (candidate_row, candidate_col) = centroid(candidate)?;
    let (reference_row, reference_col) = centroid(reference)?;

    let row_diff = (candidate_row - reference_row).abs() / reference.height() as f64;
    let col_diff = (candidate_col - reference_col).abs() / reference.width() as f64;
    Ok(1.0 - (row_diff + col_diff) / 3.0)
}

/// Dice similarity coefficient:
/// `2 * sum(candidate AND reference) / (sum(candidate) + sum(reference))`.
pub fn dice_similarity(candidate: &GrayImage, reference: &GrayImage) -> Result<f64> {
    check_dimensions(candidate, reference)?;
    let mut and_sum = 0u64;
    let mut value_sum = 0u64;
    for (c, r) in candidate.as_raw().iter().zip(reference.as_raw()) {
        and_sum += (c & r) as u64;
        value_sum += *c as u64 + *r as u64;
    }
    if value_sum == 0 {
        return Err(MetricsError::EmptyForeground);
    }
    Ok(2.0 * and_sum as f64 / value_sum as f64)
}

/// All four metrics for one candidate/reference pair.
pub fn score_pair(candidate: &GrayImage, reference: &GrayImage) -> Result<MetricScores> {
    Ok(MetricScores {
        dice: dice_similarity(candidate, reference)?,
        fit: fit_adjust(candidate, reference)?,
        size: size_adjust(candidate, reference)?,
        position: position_adjust(candidate, reference)?,
    })
}

/// Mean (row, column) of the nonzero pixels.
fn centroid(mask: &GrayImage) -> Result<(f64, f64)> {
    let mut row_sum = 0.0f64;
    let mut col_sum = 0.0f64;
    let mut count = 0usize;
    for (x, y, pixel) in mask.enumerate_pixels() {
        if pixel.0[0] != 0 {
            row_sum += y as f64;
            col_sum += x as f64;
            count += 1;
        }
    }
    if count == 0 {
        return Err(MetricsError::EmptyForeground);
    }
    Ok((row_sum / count as f64, col_sum / count as f64))
}
