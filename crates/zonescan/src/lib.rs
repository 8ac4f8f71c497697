//! zonescan — inhibition-zone measurement for antibiotic disk-diffusion plates.
//!
//! Given a grayscale photograph of an agar plate, locates each antibiotic
//! disk, walks outward from its center and reports where the clear zone ends.
//! The pipeline stages are:
//!
//! 1. **Preprocess** – CLAHE followed by a median blur.
//! 2. **Disk** – disk centers and radii, from any [`DiskDetector`].
//! 3. **Scale** – mm/px from the known physical disk diameter.
//! 4. **Ring** – ring-median radial profile → smoothing → first strong rise.
//! 5. **Review** – per-zone radius multipliers applied on top of the
//!    measured radii, never overwriting them.
//!
//! # Public API
//! - [`ZoneMeter`] as the primary entry point
//! - [`MeasureConfig`] for tuning
//! - [`DiskDetector`] and [`TextRecognizer`] seams for external detectors and OCR
//! - [`Measurement`], [`ReviewSession`] and [`ZoneRecord`] for results
//!
//! The per-stage functions are public as well, for callers that only need
//! one step (e.g. sampling a profile around a known center).

mod api;
mod config;
mod disk;
mod error;
mod label;
mod pipeline;
mod preprocess;
mod review;
mod ring;
mod scale;

#[cfg(test)]
mod test_utils;

pub use api::ZoneMeter;
pub use config::MeasureConfig;
pub use disk::{
    estimate_disk_radius, find_center_candidates, CenterCandidate, Disk, DiskDetectConfig,
    DiskDetector, GradientDiskDetector, RadiusEstimate, MAX_DISK_RADIUS_PX,
};
pub use error::{MeasureError, ReviewError, ZoneSkipReason};
pub use label::{disk_crop, read_disk_label, LabelConfig, NoTextRecognizer, TextRecognizer, NO_TEXT};
pub use pipeline::{
    assemble_zones, measure_zone, InhibitionZone, Measurement, SkippedDisk, ZoneBatch, ZoneRecord,
};
pub use preprocess::{clahe, enhance, median_blur, EnhanceConfig};
pub use review::{ReviewSession, ZoneAdjustment};
pub use ring::{
    locate_edge, oriented_gradient, sample_radial_profile, smooth_intensities, EdgeConfig,
    EdgeHit, EdgePolarity, ProfileSample, RadialProfile, RadialSamplingConfig, SmoothingConfig,
};
pub use scale::{estimate_scale, ScaleFactor, DEFAULT_DISK_DIAMETER_MM};
