//! Shared synthetic renderers for image-based unit tests.

use image::{GrayImage, Luma};

/// Intensity of a rendered antibiotic disk.
pub(crate) const DISK_PIX: u8 = 235;
/// Intensity of a rendered clear inhibition zone.
pub(crate) const ZONE_PIX: u8 = 60;
/// Intensity of the rendered bacterial lawn.
pub(crate) const LAWN_PIX: u8 = 170;

/// Render a synthetic plate.
///
/// Each entry is `(center, disk_radius, zone_radius)`. Pixels at distance `d`
/// from a center are disk when `d <= disk_radius`, zone when
/// `d <= zone_radius`, lawn otherwise. Earlier entries win on overlap.
pub(crate) fn draw_plate_image(w: u32, h: u32, disks: &[([f32; 2], f32, f32)]) -> GrayImage {
    let mut img = GrayImage::new(w, h);
    for y in 0..h {
        for x in 0..w {
            let mut pix = LAWN_PIX;
            for &(center, disk_r, zone_r) in disks {
                let dx = x as f32 - center[0];
                let dy = y as f32 - center[1];
                let d = (dx * dx + dy * dy).sqrt();
                if d <= disk_r {
                    pix = DISK_PIX;
                    break;
                }
                if d <= zone_r {
                    pix = ZONE_PIX;
                    break;
                }
            }
            img.put_pixel(x, y, Luma([pix]));
        }
    }
    img
}

/// Gaussian-blur a `GrayImage` via `imageproc`.
pub(crate) fn blur_gray(img: &GrayImage, sigma: f32) -> GrayImage {
    imageproc::filter::gaussian_blur_f32(img, sigma)
}
