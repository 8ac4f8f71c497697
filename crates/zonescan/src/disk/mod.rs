//! Antibiotic disk localization.
//!
//! The measurement core only needs `(center, radius)` per disk and accepts
//! them from any [`DiskDetector`]. [`GradientDiskDetector`] is the built-in
//! implementation:
//!
//! 1. **Pre-blur** – Gaussian blur to suppress colony texture.
//! 2. **Proposal** – gradient-voting radial symmetry with min-distance NMS.
//! 3. **Radius** – median-aggregated ray derivatives locate the disk rim.

mod proposal;
mod radius;

use image::GrayImage;

use crate::ring::EdgePolarity;

pub use proposal::{find_center_candidates, CenterCandidate};
pub use radius::{estimate_disk_radius, RadiusEstimate};

/// A detected circular antibiotic disk.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Disk {
    /// Center in image pixel coordinates.
    pub center: [u32; 2],
    /// Disk radius in pixels.
    pub radius_px: f32,
}

/// Source of disks for a plate image.
pub trait DiskDetector {
    /// Detect disks in a grayscale image.
    fn detect(&self, gray: &GrayImage) -> Vec<Disk>;
}

/// Largest disk radius the built-in detector accepts (pixels).
pub const MAX_DISK_RADIUS_PX: f32 = 1024.0;

/// Configuration for the built-in gradient-voting disk detector.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct DiskDetectConfig {
    /// Smallest accepted disk radius (pixels).
    pub min_radius_px: f32,
    /// Largest accepted disk radius (pixels).
    pub max_radius_px: f32,
    /// Minimum distance between two disk centers (pixels).
    pub min_distance_px: f32,
    /// Gaussian sigma applied before voting. `0` disables the blur.
    pub pre_blur_sigma: f32,
    /// Gradient magnitude threshold (fraction of max gradient).
    pub grad_threshold: f32,
    /// Minimum accumulator value for a candidate (fraction of max).
    pub min_vote_frac: f32,
    /// Gaussian sigma for accumulator smoothing.
    pub accum_sigma: f32,
    /// Number of rays cast for radius estimation.
    pub n_rays: usize,
    /// Radial step along each ray (pixels).
    pub radius_step_px: f32,
    /// Minimum fraction of rays that must stay inside the image.
    pub min_ray_coverage: f32,
    /// Minimum aggregated rim response (intensity in [0, 1] per pixel).
    pub min_edge_strength: f32,
    /// Minimum fraction of rays whose own peak agrees with the rim radius.
    pub min_ray_consistency: f32,
    /// Sign of `dI/dr` across the rim. Disks are brighter than their surroundings.
    pub polarity: EdgePolarity,
    /// Optional cap on the number of disks returned (strongest first).
    pub max_disks: Option<usize>,
}

impl Default for DiskDetectConfig {
    fn default() -> Self {
        Self {
            min_radius_px: 8.0,
            max_radius_px: 25.0,
            min_distance_px: 30.0,
            pre_blur_sigma: 2.0,
            grad_threshold: 0.1,
            min_vote_frac: 0.2,
            accum_sigma: 2.0,
            n_rays: 48,
            radius_step_px: 0.5,
            min_ray_coverage: 0.6,
            min_edge_strength: 0.03,
            min_ray_consistency: 0.5,
            polarity: EdgePolarity::LightToDark,
            max_disks: None,
        }
    }
}

/// Built-in disk detector: gradient voting followed by rim-radius estimation.
#[derive(Debug, Clone, Default)]
pub struct GradientDiskDetector {
    config: DiskDetectConfig,
}

impl GradientDiskDetector {
    /// Create a detector with explicit configuration.
    pub fn new(config: DiskDetectConfig) -> Self {
        Self { config }
    }

    /// Access the current configuration.
    pub fn config(&self) -> &DiskDetectConfig {
        &self.config
    }
}

impl DiskDetector for GradientDiskDetector {
    fn detect(&self, gray: &GrayImage) -> Vec<Disk> {
        let cfg = &self.config;
        let blurred;
        let work = if cfg.pre_blur_sigma > 0.0 {
            blurred = imageproc::filter::gaussian_blur_f32(gray, cfg.pre_blur_sigma);
            &blurred
        } else {
            gray
        };

        let candidates = find_center_candidates(work, cfg);
        tracing::info!("{} disk center candidates", candidates.len());

        let mut disks = Vec::new();
        for c in &candidates {
            let Some(est) = estimate_disk_radius(work, [c.x, c.y], cfg) else {
                tracing::trace!("candidate ({:.0}, {:.0}) rejected: no disk rim", c.x, c.y);
                continue;
            };
            disks.push(Disk {
                center: [c.x.round() as u32, c.y.round() as u32],
                radius_px: est.radius_px,
            });
            if cfg.max_disks.is_some_and(|max| disks.len() >= max) {
                break;
            }
        }
        tracing::info!("{} disks detected", disks.len());
        disks
    }
}
