//! Zone assembly: sample -> length gate -> smooth -> locate, once per disk.

use image::GrayImage;

use crate::config::MeasureConfig;
use crate::disk::Disk;
use crate::error::ZoneSkipReason;
use crate::ring::{locate_edge, sample_radial_profile, smooth_intensities, EdgeHit};

/// Measured inhibition zone around one disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct InhibitionZone {
    /// Index of the originating disk in the detector output.
    pub disk_index: usize,
    /// Disk center in image pixel coordinates.
    pub center: [u32; 2],
    /// Measured zone radius in pixels.
    pub zone_radius_px: u32,
}

/// A disk for which no zone could be measured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SkippedDisk {
    pub disk_index: usize,
    pub center: [u32; 2],
    pub reason: ZoneSkipReason,
}

/// Outcome of assembling zones for a set of disks.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct ZoneBatch {
    /// Zones in disk order.
    pub zones: Vec<InhibitionZone>,
    /// Disks without a zone, in disk order.
    pub skipped: Vec<SkippedDisk>,
}

/// Locate the zone boundary around a single center.
pub fn measure_zone(
    enhanced: &GrayImage,
    center: [u32; 2],
    cfg: &MeasureConfig,
) -> Result<EdgeHit, ZoneSkipReason> {
    let profile = sample_radial_profile(enhanced, center, &cfg.sampling);
    let needed = cfg.edge.min_profile_samples;
    if profile.len() < needed {
        return Err(ZoneSkipReason::InsufficientProfileSamples {
            needed,
            got: profile.len(),
        });
    }
    let smoothed = smooth_intensities(&profile.intensities(), &cfg.smoothing);
    locate_edge(&profile.radii(), &smoothed, &cfg.edge)
}

/// Measure a zone around every disk. Disks are independent; a failure on one
/// never affects the others.
pub fn assemble_zones(enhanced: &GrayImage, disks: &[Disk], cfg: &MeasureConfig) -> ZoneBatch {
    let mut batch = ZoneBatch::default();
    for (disk_index, disk) in disks.iter().enumerate() {
        match measure_zone(enhanced, disk.center, cfg) {
            Ok(hit) => {
                tracing::trace!(
                    "disk {} zone radius {} px (step {:.1} > {:.1})",
                    disk_index,
                    hit.radius_px,
                    hit.max_change,
                    hit.threshold
                );
                batch.zones.push(InhibitionZone {
                    disk_index,
                    center: disk.center,
                    zone_radius_px: hit.radius_px,
                });
            }
            Err(reason) => {
                tracing::debug!(
                    "disk {} at ({}, {}) skipped: {}",
                    disk_index,
                    disk.center[0],
                    disk.center[1],
                    reason
                );
                batch.skipped.push(SkippedDisk {
                    disk_index,
                    center: disk.center,
                    reason,
                });
            }
        }
    }
    batch
}
