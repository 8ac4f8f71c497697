//! Top-level pipeline orchestrator: detect → scale → enhance → assemble → label.

use image::GrayImage;

use crate::config::MeasureConfig;
use crate::disk::{Disk, DiskDetector};
use crate::error::MeasureError;
use crate::label::{read_disk_label, TextRecognizer};
use crate::preprocess::enhance;
use crate::scale::estimate_scale;

use super::assemble::assemble_zones;
use super::result::Measurement;

/// Detect disks on the raw image, then measure around them.
pub(crate) fn measure_detected(
    gray: &GrayImage,
    config: &MeasureConfig,
    detector: &dyn DiskDetector,
    recognizer: &dyn TextRecognizer,
) -> Result<Measurement, MeasureError> {
    config.validate().map_err(MeasureError::InvalidConfig)?;
    let disks = detector.detect(gray);
    measure_with_disks(gray, disks, config, recognizer)
}

/// Measure zones around caller-provided disks.
pub(crate) fn measure_with_disks(
    gray: &GrayImage,
    disks: Vec<Disk>,
    config: &MeasureConfig,
    recognizer: &dyn TextRecognizer,
) -> Result<Measurement, MeasureError> {
    config.validate().map_err(MeasureError::InvalidConfig)?;
    if disks.is_empty() {
        tracing::warn!("no disks found");
        return Err(MeasureError::NoDisksFound);
    }

    let scale = estimate_scale(
        disks.iter().map(|d| d.radius_px),
        config.reference_disk_diameter_mm,
    )
    .ok_or(MeasureError::UndeterminedScale)?;
    tracing::info!(
        "{} disks, scale {:.4} mm/px",
        disks.len(),
        scale.mm_per_px
    );

    let enhanced = enhance(gray, &config.enhance);
    let batch = assemble_zones(&enhanced, &disks, config);
    if !batch.skipped.is_empty() {
        tracing::warn!(
            "{} of {} disks have no measurable zone",
            batch.skipped.len(),
            disks.len()
        );
    }
    tracing::info!("{} zones measured", batch.zones.len());

    let labels = disks
        .iter()
        .map(|d| read_disk_label(gray, d, recognizer, &config.label))
        .collect();

    let (w, h) = gray.dimensions();
    Ok(Measurement {
        image_size: [w, h],
        disks,
        scale,
        zones: batch.zones,
        skipped: batch.skipped,
        labels,
    })
}
