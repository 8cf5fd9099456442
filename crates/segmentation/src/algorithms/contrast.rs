use image::{GrayImage, Luma, Rgb, RgbImage};
use imageproc::map::{blue_channel, green_channel, red_channel};
use serde::{Deserialize, Serialize};

use crate::color::{rgb_to_hsv, value_histogram};
use crate::error::Result;
use crate::traits::ImagePreprocessor;

/// Conditional contrast enhancement.
///
/// Measures the spread of the value-channel histogram of the image's HSV
/// representation; when `max(bin) - min(bin)` reaches `dispersion_limit`,
/// contrast-limited adaptive histogram equalization is applied to each color
/// channel independently. Below the limit the image passes through unchanged.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContrastNormalizer {
    pub dispersion_limit: u32,
    pub clip_limit: f32,
    pub tile_grid: (u32, u32),
}

impl Default for ContrastNormalizer {
    fn default() -> Self {
        Self {
            dispersion_limit: 10_000,
            clip_limit: 1.0,
            tile_grid: (3, 3),
        }
    }
}

impl ContrastNormalizer {
    fn equalize(&self, image: &RgbImage) -> RgbImage {
        let (width, height) = image.dimensions();
        let planes = [
            red_channel(image),
            green_channel(image),
            blue_channel(image),
        ];
        let equalized =
            planes.map(|plane| clahe_plane(&plane, self.clip_limit, self.tile_grid));

        let mut merged = RgbImage::new(width, height);
        for (x, y, pixel) in merged.enumerate_pixels_mut() {
            *pixel = Rgb([
                equalized[0].get_pixel(x, y).0[0],
                equalized[1].get_pixel(x, y).0[0],
                equalized[2].get_pixel(x, y).0[0],
            ]);
        }
        merged
    }
}

impl ImagePreprocessor for ContrastNormalizer {
    fn preprocess(&self, image: &RgbImage) -> Result<RgbImage> {
        let hsv = rgb_to_hsv(image);
        let histogram = value_histogram(&hsv);
        let max = histogram.iter().copied().max().unwrap_or(0);
        let min = histogram.iter().copied().min().unwrap_or(0);
        let dispersion = max - min;

        if dispersion >= self.dispersion_limit {
            Ok(self.equalize(image))
        } else {
            Ok(image.clone())
        }
    }
}

/// Gaussian blur preprocessor for noise reduction ahead of masking
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GaussianBlurPreprocessor {
    pub sigma: f32,
}

impl Default for GaussianBlurPreprocessor {
    fn default() -> Self {
        // the sigma a 3x3 kernel corresponds to
        Self { sigma: 0.8 }
    }
}

impl ImagePreprocessor for GaussianBlurPreprocessor {
    fn preprocess(&self, image: &RgbImage) -> Result<RgbImage> {
        Ok(imageproc::filter::gaussian_blur_f32(image, self.sigma))
    }
}

/// Contrast-limited adaptive histogram equalization of one 8-bit plane.
///
/// Per-tile histograms are clipped at `clip_limit * tile_area / 256` (at
/// least one count per bin) with the excess redistributed uniformly, turned
/// into CDF lookup tables, and blended bilinearly between the four
/// surrounding tiles for each output pixel. Tile indices clamp at the image
/// edges, which also covers dimensions that do not divide the grid.
fn clahe_plane(plane: &GrayImage, clip_limit: f32, tile_grid: (u32, u32)) -> GrayImage {
    let width = plane.width() as usize;
    let height = plane.height() as usize;
    if width == 0 || height == 0 {
        return plane.clone();
    }

    let grid_x = tile_grid.0.max(1) as usize;
    let grid_y = tile_grid.1.max(1) as usize;
    let tile_width = width.div_ceil(grid_x);
    let tile_height = height.div_ceil(grid_y);

    let mut luts = vec![[0u8; 256]; grid_x * grid_y];
    for tile_y in 0..grid_y {
        for tile_x in 0..grid_x {
            let x0 = (tile_x * tile_width).min(width);
            let x1 = ((tile_x + 1) * tile_width).min(width);
            let y0 = (tile_y * tile_height).min(height);
            let y1 = ((tile_y + 1) * tile_height).min(height);
            luts[tile_y * grid_x + tile_x] = if x0 == x1 || y0 == y1 {
                identity_lut()
            } else {
                tile_lut(plane, (x0, x1, y0, y1), clip_limit)
            };
        }
    }

    let mut output = GrayImage::new(plane.width(), plane.height());
    let max_ty = (grid_y - 1) as f32;
    let max_tx = (grid_x - 1) as f32;
    for y in 0..height {
        let ty = y as f32 / tile_height as f32 - 0.5;
        let fy = ty - ty.floor();
        // clamping both indices replicates the edge tiles
        let ty0 = ty.floor().clamp(0.0, max_ty) as usize;
        let ty1 = (ty.floor() + 1.0).clamp(0.0, max_ty) as usize;

        for x in 0..width {
            let tx = x as f32 / tile_width as f32 - 0.5;
            let fx = tx - tx.floor();
            let tx0 = tx.floor().clamp(0.0, max_tx) as usize;
            let tx1 = (tx.floor() + 1.0).clamp(0.0, max_tx) as usize;

            let value = plane.get_pixel(x as u32, y as u32).0[0] as usize;
            let top_left = luts[ty0 * grid_x + tx0][value] as f32;
            let top_right = luts[ty0 * grid_x + tx1][value] as f32;
            let bottom_left = luts[ty1 * grid_x + tx0][value] as f32;
            let bottom_right = luts[ty1 * grid_x + tx1][value] as f32;

            let top = top_left * (1.0 - fx) + top_right * fx;
            let bottom = bottom_left * (1.0 - fx) + bottom_right * fx;
            let blended = top * (1.0 - fy) + bottom * fy;
            output.put_pixel(
                x as u32,
                y as u32,
                Luma([blended.round().clamp(0.0, 255.0) as u8]),
            );
        }
    }

    output
}

fn identity_lut() -> [u8; 256] {
    let mut lut = [0u8; 256];
    for (i, entry) in lut.iter_mut().enumerate() {
        *entry = i as u8;
    }
    lut
}

fn tile_lut(
    plane: &GrayImage,
    (x0, x1, y0, y1): (usize, usize, usize, usize),
    clip_limit: f32,
) -> [u8; 256] {
    let area = (x1 - x0) * (y1 - y0);
    let mut histogram = [0usize; 256];
    for y in y0..y1 {
        for x in x0..x1 {
            histogram[plane.get_pixel(x as u32, y as u32).0[0] as usize] += 1;
        }
    }

    // Clip and redistribute the excess uniformly across all bins.
    let clip = ((clip_limit * area as f32 / 256.0).max(1.0)).floor() as usize;
    let mut excess = 0usize;
    for bin in histogram.iter_mut() {
        if *bin > clip {
            excess += *bin - clip;
            *bin = clip;
        }
    }
    let batch = excess / 256;
    let remainder = excess % 256;
    for (i, bin) in histogram.iter_mut().enumerate() {
        *bin += batch;
        if i < remainder {
            *bin += 1;
        }
    }

    let mut lut = [0u8; 256];
    let mut cumulative = 0usize;
    let scale = 255.0 / area as f32;
    for (i, &count) in histogram.iter().enumerate() {
        cumulative += count;
        lut[i] = (cumulative as f32 * scale).round().clamp(0.0, 255.0) as u8;
    }
    lut
}
