use image::{GrayImage, RgbImage};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::traits::TextureEncoder;

/// Neighbor offsets as (row, col), clockwise from the top-left. The bit
/// weight of a neighbor is `1 << index`.
const NEIGHBOR_OFFSETS: [(i32, i32); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
    (1, 0),
    (1, -1),
    (0, -1),
];

/// Local binary pattern texture encoder.
///
/// Each pixel of the grayscale image, borders included, is encoded as the
/// weighted sum of eight neighbor comparisons: a neighbor whose value is at
/// least the center's contributes its bit, a neighbor outside the image
/// contributes nothing. Rows are independent and encoded in parallel.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct LbpEncoder;

impl LbpEncoder {
    /// Encode a single grayscale plane.
    pub fn encode_plane(&self, gray: &GrayImage) -> GrayImage {
        let width = gray.width() as usize;
        let height = gray.height() as usize;
        if width == 0 || height == 0 {
            return gray.clone();
        }

        let src = gray.as_raw();
        let mut codes = vec![0u8; width * height];
        codes
            .par_chunks_mut(width)
            .enumerate()
            .for_each(|(row, out_row)| {
                for col in 0..width {
                    let center = src[row * width + col];
                    let mut code = 0u8;
                    for (bit, (dr, dc)) in NEIGHBOR_OFFSETS.iter().enumerate() {
                        let r = row as i32 + dr;
                        let c = col as i32 + dc;
                        if r < 0 || c < 0 || r >= height as i32 || c >= width as i32 {
                            continue;
                        }
                        if src[r as usize * width + c as usize] >= center {
                            code |= 1 << bit;
                        }
                    }
                    out_row[col] = code;
                }
            });

        GrayImage::from_raw(gray.width(), gray.height(), codes)
            .expect("code buffer length matches image dimensions")
    }
}

impl TextureEncoder for LbpEncoder {
    fn encode(&self, image: &RgbImage) -> Result<GrayImage> {
        let gray = image::imageops::grayscale(image);
        Ok(self.encode_plane(&gray))
    }
}
