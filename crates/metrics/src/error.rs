use thiserror::Error;

#[derive(Error, Debug)]
pub enum MetricsError {
    #[error("Failed to load image: {0}")]
    ImageLoad(#[from] image::ImageError),

    #[error(
        "Mask dimensions differ: candidate {candidate_width}x{candidate_height}, \
         reference {reference_width}x{reference_height}"
    )]
    DimensionMismatch {
        candidate_width: u32,
        candidate_height: u32,
        reference_width: u32,
        reference_height: u32,
    },

    #[error("Mask has no foreground pixels")]
    EmptyForeground,

    #[error("Folder sizes differ: {manual} manual vs {automatic} automatic files")]
    FolderSizeMismatch { manual: usize, automatic: usize },

    #[error("No scores to aggregate")]
    EmptyGroup,

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, MetricsError>;
