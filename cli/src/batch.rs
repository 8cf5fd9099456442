use std::fs;
use std::path::{Path, PathBuf};

use image::GrayImage;
use tracing::{info, warn};

use metrics::{AggregateRecord, MetricScores, MetricsError};
use segmentation::io::{foreground_output_path, mask_output_path, open_rgb, texture_output_path};

use crate::LeafKitError;
use crate::config::SegmentationJob;

const IMAGE_EXTENSIONS: [&str; 3] = ["jpg", "jpeg", "png"];

/// Counts of one folder run.
#[derive(Debug, Default, Clone, Copy)]
pub struct RunSummary {
    pub processed: usize,
    pub skipped: usize,
}

/// Candidate image files of a folder, sorted by name so output indices are
/// reproducible across runs.
fn image_files(dir: &Path) -> Result<Vec<PathBuf>, LeafKitError> {
    let mut files: Vec<PathBuf> = fs::read_dir(dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| {
            path.extension()
                .and_then(|ext| ext.to_str())
                .map(|ext| IMAGE_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
                .unwrap_or(false)
        })
        .collect();
    files.sort();
    Ok(files)
}

/// Segment every image of the job's input folder and write the filled masks.
///
/// Undecodable files and frames without any foreground are logged and
/// skipped; they still consume their output index.
pub fn run_segmentation(
    job: &SegmentationJob,
    clean: bool,
    debug_images: bool,
) -> Result<RunSummary, LeafKitError> {
    if clean {
        clean_output_dir(&job.output_dir)?;
    }
    fs::create_dir_all(&job.output_dir)?;

    let pipeline = job.options.build_pipeline();
    info!("{}", pipeline.info());

    let mut summary = RunSummary::default();
    for (index, path) in image_files(&job.input_dir)?.iter().enumerate() {
        let image = match open_rgb(path) {
            Ok(image) => image,
            Err(err) => {
                warn!(path = %path.display(), error = %err, "failed to decode, skipping");
                summary.skipped += 1;
                continue;
            }
        };

        let result = match pipeline.process(&image) {
            Ok(result) => result,
            Err(err) => {
                warn!(path = %path.display(), error = %err, "segmentation failed, skipping");
                summary.skipped += 1;
                continue;
            }
        };

        result.save_mask(mask_output_path(&job.output_dir, index))?;
        if debug_images {
            result.save_foreground(foreground_output_path(&job.output_dir, index))?;
            result.save_texture(texture_output_path(&job.output_dir, index))?;
        }
        info!(path = %path.display(), index, "segmented");
        summary.processed += 1;
    }

    Ok(summary)
}

fn clean_output_dir(dir: &Path) -> Result<(), LeafKitError> {
    if !dir.exists() {
        return Ok(());
    }
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() {
            fs::remove_file(path)?;
        }
    }
    Ok(())
}

/// Score every automatic mask against its manual reference, summarize the
/// group, and append the summary to the report.
///
/// Both folders are paired in sorted order and must hold the same number of
/// files; a mismatch aborts before anything is written. Pairs that fail to
/// decode or have no foreground are logged and skipped.
pub fn run_evaluation(
    manual_dir: &Path,
    automatic_dir: &Path,
    group: &str,
    report: &Path,
) -> Result<AggregateRecord, LeafKitError> {
    let manual = image_files(manual_dir)?;
    let automatic = image_files(automatic_dir)?;
    if manual.len() != automatic.len() {
        return Err(MetricsError::FolderSizeMismatch {
            manual: manual.len(),
            automatic: automatic.len(),
        }
        .into());
    }

    let mut scores: Vec<MetricScores> = Vec::with_capacity(manual.len());
    for (manual_path, automatic_path) in manual.iter().zip(&automatic) {
        let (Some(reference), Some(candidate)) = (open_mask(manual_path), open_mask(automatic_path))
        else {
            continue;
        };
        match metrics::score_pair(&candidate, &reference) {
            Ok(pair_scores) => scores.push(pair_scores),
            Err(err @ (MetricsError::EmptyForeground | MetricsError::DimensionMismatch { .. })) => {
                warn!(
                    manual = %manual_path.display(),
                    automatic = %automatic_path.display(),
                    error = %err,
                    "pair not scorable, skipping"
                );
            }
            Err(err) => return Err(err.into()),
        }
    }

    let record = metrics::aggregate(group, &scores)?;
    metrics::append_record(report, &record)?;
    info!(group, pairs = scores.len(), "summary appended");
    Ok(record)
}

fn open_mask(path: &Path) -> Option<GrayImage> {
    match image::open(path) {
        Ok(img) => Some(img.to_luma8()),
        Err(err) => {
            warn!(path = %path.display(), error = %err, "failed to decode mask, skipping pair");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PipelineOptions;
    use image::{Luma, Rgb, RgbImage};

    fn leaf_image() -> RgbImage {
        let mut img = RgbImage::from_pixel(40, 40, Rgb([120, 0, 0]));
        for y in 10..30 {
            for x in 10..30 {
                img.put_pixel(x, y, Rgb([40, 180, 60]));
            }
        }
        img
    }

    fn rect_mask(x0: u32, y0: u32, x1: u32, y1: u32) -> GrayImage {
        let mut mask = GrayImage::new(32, 32);
        for y in y0..=y1 {
            for x in x0..=x1 {
                mask.put_pixel(x, y, Luma([255]));
            }
        }
        mask
    }

    #[test]
    fn segmentation_run_writes_sequentially_named_masks() {
        let dir = tempfile::tempdir().unwrap();
        let input_dir = dir.path().join("input");
        fs::create_dir(&input_dir).unwrap();
        leaf_image().save(input_dir.join("a.png")).unwrap();
        leaf_image().save(input_dir.join("b.png")).unwrap();

        let job = SegmentationJob {
            input_dir,
            output_dir: dir.path().join("output"),
            options: PipelineOptions::default(),
        };
        let summary = run_segmentation(&job, false, false).unwrap();

        assert_eq!(summary.processed, 2);
        assert_eq!(summary.skipped, 0);
        assert!(job.output_dir.join("binarized_0.png").exists());
        assert!(job.output_dir.join("binarized_1.png").exists());
    }

    #[test]
    fn undecodable_file_is_skipped_but_consumes_its_index() {
        let dir = tempfile::tempdir().unwrap();
        let input_dir = dir.path().join("input");
        fs::create_dir(&input_dir).unwrap();
        // sorts first, fails to decode
        fs::write(input_dir.join("a.png"), b"not an image").unwrap();
        leaf_image().save(input_dir.join("b.png")).unwrap();

        let job = SegmentationJob {
            input_dir,
            output_dir: dir.path().join("output"),
            options: PipelineOptions::default(),
        };
        let summary = run_segmentation(&job, false, false).unwrap();

        assert_eq!(summary.processed, 1);
        assert_eq!(summary.skipped, 1);
        assert!(!job.output_dir.join("binarized_0.png").exists());
        assert!(job.output_dir.join("binarized_1.png").exists());
    }

    #[test]
    fn evaluation_appends_one_record_per_group() {
        let dir = tempfile::tempdir().unwrap();
        let manual_dir = dir.path().join("manual");
        let automatic_dir = dir.path().join("automatic");
        fs::create_dir(&manual_dir).unwrap();
        fs::create_dir(&automatic_dir).unwrap();
        for i in 0..2 {
            rect_mask(4, 4, 20, 20)
                .save(manual_dir.join(format!("m_{i}.png")))
                .unwrap();
            rect_mask(5, 5, 21, 21)
                .save(automatic_dir.join(format!("a_{i}.png")))
                .unwrap();
        }
        let report = dir.path().join("resultados.json");

        let record = run_evaluation(&manual_dir, &automatic_dir, "group_a", &report).unwrap();
        assert_eq!(record.group, "group_a");
        assert!(record.mean.dice > 0.0 && record.mean.dice <= 1.0);

        let records = metrics::read_report(&report).unwrap();
        assert_eq!(records.len(), 1);
    }

    #[test]
    fn folder_mismatch_aborts_without_writing() {
        let dir = tempfile::tempdir().unwrap();
        let manual_dir = dir.path().join("manual");
        let automatic_dir = dir.path().join("automatic");
        fs::create_dir(&manual_dir).unwrap();
        fs::create_dir(&automatic_dir).unwrap();
        for i in 0..3 {
            rect_mask(4, 4, 20, 20)
                .save(manual_dir.join(format!("m_{i}.png")))
                .unwrap();
        }
        for i in 0..2 {
            rect_mask(4, 4, 20, 20)
                .save(automatic_dir.join(format!("a_{i}.png")))
                .unwrap();
        }
        let report = dir.path().join("resultados.json");

        let result = run_evaluation(&manual_dir, &automatic_dir, "group_a", &report);
        assert!(matches!(
            result,
            Err(LeafKitError::Metrics(MetricsError::FolderSizeMismatch {
                manual: 3,
                automatic: 2
            }))
        ));
        assert!(!report.exists());
    }
}
