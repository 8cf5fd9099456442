use thiserror::Error;

#[derive(Error, Debug)]
pub enum SegmentationError {
    #[error("Failed to load image: {0}")]
    ImageLoad(#[from] image::ImageError),

    #[error("No foreground region found in mask")]
    NoForegroundFound,

    #[error("Mask is {mask_width}x{mask_height} but image is {image_width}x{image_height}")]
    DimensionMismatch {
        mask_width: u32,
        mask_height: u32,
        image_width: u32,
        image_height: u32,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, SegmentationError>;
