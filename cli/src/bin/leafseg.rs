use std::path::PathBuf;

use clap::{Parser, Subcommand};
use cli::{PipelineOptions, SegmentationJob, run_evaluation, run_segmentation};
use color_eyre::eyre::Result;
use tracing::info;
use tracing_subscriber::{self, EnvFilter};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Segment every image in a folder and write the filled masks
    Segment {
        /// Path to a TOML or JSON job configuration file
        #[arg(short, long, conflicts_with_all = ["input_dir", "output_dir"])]
        config: Option<PathBuf>,
        /// Folder of images to segment
        #[arg(short, long)]
        input_dir: Option<PathBuf>,
        /// Folder receiving the binarized masks
        #[arg(short, long)]
        output_dir: Option<PathBuf>,
        /// Empty the output folder before the run
        #[arg(long)]
        clean: bool,
        /// Also write the masked foreground and texture images
        #[arg(long)]
        debug_images: bool,
    },
    /// Score automatic masks against manual references and append the summary
    Evaluate {
        /// Folder of manually segmented reference masks
        #[arg(short, long)]
        manual_dir: PathBuf,
        /// Folder of automatically produced masks
        #[arg(short, long)]
        automatic_dir: PathBuf,
        /// Group label recorded with the summary
        #[arg(short, long)]
        group: String,
        /// Report file receiving the appended record
        #[arg(short, long, default_value = "resultados.json")]
        report: PathBuf,
    },
    /// Write the report's closing bracket so it parses as plain JSON
    Finalize {
        #[arg(short, long, default_value = "resultados.json")]
        report: PathBuf,
    },
}

fn main() -> Result<()> {
    color_eyre::install()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Segment {
            config,
            input_dir,
            output_dir,
            clean,
            debug_images,
        } => {
            let job = match (config, input_dir, output_dir) {
                (Some(path), _, _) => SegmentationJob::from_file(path)?,
                (None, Some(input_dir), Some(output_dir)) => SegmentationJob {
                    input_dir,
                    output_dir,
                    options: PipelineOptions::default(),
                },
                _ => {
                    return Err(color_eyre::eyre::eyre!(
                        "provide --config or both --input-dir and --output-dir"
                    ));
                }
            };
            let summary = run_segmentation(&job, clean, debug_images)?;
            info!(
                "Segmented {} images into {:?} ({} skipped)",
                summary.processed, job.output_dir, summary.skipped
            );
        }
        Commands::Evaluate {
            manual_dir,
            automatic_dir,
            group,
            report,
        } => {
            let record = run_evaluation(&manual_dir, &automatic_dir, &group, &report)?;
            info!("Appended summary for group '{}' to {:?}", record.group, report);
        }
        Commands::Finalize { report } => {
            metrics::finalize_report(&report)?;
            info!("Report finalized: {:?}", report);
        }
    }

    Ok(())
}
