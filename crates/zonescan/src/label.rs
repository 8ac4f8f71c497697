//! Disk label reading through a pluggable text recognizer.
//!
//! Antibiotic disks carry a printed code. The crate does not ship an OCR
//! engine; callers plug one in through [`TextRecognizer`]. Any failure to
//! read a label, including an empty crop, yields [`NO_TEXT`].

use image::GrayImage;

use crate::disk::Disk;

/// Label reported when no text could be read for a disk.
pub const NO_TEXT: &str = "No text";

/// Label cropping parameters.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct LabelConfig {
    /// Crop half-size as a multiple of the disk radius.
    pub crop_factor: f32,
}

impl Default for LabelConfig {
    fn default() -> Self {
        Self { crop_factor: 1.5 }
    }
}

/// OCR engine seam.
pub trait TextRecognizer {
    /// Best-effort text for a grayscale crop; `None` if nothing readable.
    fn recognize(&self, crop: &GrayImage) -> Option<String>;
}

/// Recognizer that never reads anything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoTextRecognizer;

impl TextRecognizer for NoTextRecognizer {
    fn recognize(&self, _crop: &GrayImage) -> Option<String> {
        None
    }
}

/// Square crop around a disk, clamped to the image. `None` if empty.
pub fn disk_crop(gray: &GrayImage, disk: &Disk, crop_factor: f32) -> Option<GrayImage> {
    let (w, h) = gray.dimensions();
    let half = (disk.radius_px * crop_factor).max(0.0).floor() as u32;
    let [cx, cy] = disk.center;
    let x0 = cx.saturating_sub(half).min(w);
    let y0 = cy.saturating_sub(half).min(h);
    let x1 = cx.saturating_add(half).min(w);
    let y1 = cy.saturating_add(half).min(h);
    if x1 <= x0 || y1 <= y0 {
        return None;
    }
    Some(image::imageops::crop_imm(gray, x0, y0, x1 - x0, y1 - y0).to_image())
}

/// Read the label printed on `disk`, falling back to [`NO_TEXT`].
pub fn read_disk_label(
    gray: &GrayImage,
    disk: &Disk,
    recognizer: &dyn TextRecognizer,
    cfg: &LabelConfig,
) -> String {
    let Some(crop) = disk_crop(gray, disk, cfg.crop_factor) else {
        return NO_TEXT.to_string();
    };
    match recognizer.recognize(&crop) {
        Some(text) if !text.trim().is_empty() => text.trim().to_string(),
        _ => NO_TEXT.to_string(),
    }
}
