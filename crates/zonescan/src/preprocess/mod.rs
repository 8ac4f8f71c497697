//! Image enhancement applied once per plate photograph.
//!
//! Uneven illumination masks the growth/no-growth step, so the grayscale
//! image is equalized locally (CLAHE) and then median-blurred to suppress
//! colony texture before any radial sampling.

mod equalize;

use image::GrayImage;

pub use equalize::clahe;

/// Enhancement parameters. These change the radial profile shape directly.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct EnhanceConfig {
    /// CLAHE clip limit (multiple of the mean bin height). `0` disables clipping.
    pub clip_limit: f32,
    /// CLAHE tile grid as `[columns, rows]`.
    pub tile_grid: [u32; 2],
    /// Odd median-blur kernel size in pixels. `1` disables the blur.
    pub median_kernel: u32,
}

impl Default for EnhanceConfig {
    fn default() -> Self {
        Self {
            clip_limit: 4.0,
            tile_grid: [12, 12],
            median_kernel: 11,
        }
    }
}

/// Median blur with an odd square kernel.
pub fn median_blur(img: &GrayImage, kernel: u32) -> GrayImage {
    let radius = kernel / 2;
    if radius == 0 {
        return img.clone();
    }
    imageproc::filter::median_filter(img, radius, radius)
}

/// CLAHE followed by median blur.
pub fn enhance(gray: &GrayImage, cfg: &EnhanceConfig) -> GrayImage {
    let (w, h) = gray.dimensions();
    tracing::debug!(
        "enhancing {}x{} image (clip_limit={}, tiles={}x{}, median={})",
        w,
        h,
        cfg.clip_limit,
        cfg.tile_grid[0],
        cfg.tile_grid[1],
        cfg.median_kernel,
    );
    let equalized = clahe(gray, cfg.clip_limit, cfg.tile_grid);
    median_blur(&equalized, cfg.median_kernel)
}

#[cfg(test)]
mod tests {
    use image::Luma;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    use super::*;

    #[test]
    fn median_blur_removes_salt_noise() {
        let mut img = GrayImage::from_pixel(40, 40, Luma([100]));
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..20 {
            let x = rng.gen_range(2..38);
            let y = rng.gen_range(2..38);
            img.put_pixel(x, y, Luma([255]));
        }
        let out = median_blur(&img, 5);
        assert!(out.pixels().all(|p| p[0] == 100));
    }

    #[test]
    fn unit_kernel_is_identity() {
        let img = GrayImage::from_fn(9, 9, |x, y| Luma([(x * 20 + y) as u8]));
        assert_eq!(median_blur(&img, 1), img);
    }

    #[test]
    fn enhance_keeps_dimensions() {
        let img = GrayImage::from_fn(64, 48, |x, y| Luma([((x + y) * 2) as u8]));
        let out = enhance(&img, &EnhanceConfig::default());
        assert_eq!(out.dimensions(), (64, 48));
    }
}
