//! High-level measurement API.
//!
//! [`ZoneMeter`] is the primary entry point. It wraps a [`MeasureConfig`]
//! and runs the whole pipeline on a grayscale plate image.

use image::GrayImage;
use std::path::Path;

use crate::config::MeasureConfig;
use crate::disk::{Disk, DiskDetector, GradientDiskDetector};
use crate::error::MeasureError;
use crate::label::{NoTextRecognizer, TextRecognizer};
use crate::pipeline::{self, Measurement};
use crate::preprocess;

/// Primary measurement interface.
///
/// Create once, measure many images.
///
/// # Examples
///
/// ```no_run
/// use zonescan::ZoneMeter;
/// use image::GrayImage;
///
/// let meter = ZoneMeter::new();
/// let image = GrayImage::new(640, 480);
/// let measurement = meter.measure(&image).unwrap();
/// let session = measurement.review_session();
/// for record in measurement.records(&session) {
///     println!("disk {}: {:.1} mm", record.disk_index, record.diameter_mm);
/// }
/// ```
#[derive(Debug, Clone, Default)]
pub struct ZoneMeter {
    config: MeasureConfig,
}

impl ZoneMeter {
    /// Create a meter with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create with full config control.
    pub fn with_config(config: MeasureConfig) -> Self {
        Self { config }
    }

    /// Load a JSON config file and create a meter in one step.
    pub fn from_config_json_file(path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        Ok(Self::with_config(MeasureConfig::from_json_file(path)?))
    }

    /// Access the current configuration.
    pub fn config(&self) -> &MeasureConfig {
        &self.config
    }

    /// Mutable access to configuration for post-construction tuning.
    pub fn config_mut(&mut self) -> &mut MeasureConfig {
        &mut self.config
    }

    /// The enhanced image zone boundaries are searched on.
    pub fn enhance(&self, image: &GrayImage) -> GrayImage {
        preprocess::enhance(image, &self.config.enhance)
    }

    /// Measure with the built-in disk detector and no label reading.
    pub fn measure(&self, image: &GrayImage) -> Result<Measurement, MeasureError> {
        let detector = GradientDiskDetector::new(self.config.disk_detect.clone());
        self.measure_with(image, &detector, &NoTextRecognizer)
    }

    /// Measure with a custom disk detector and text recognizer.
    pub fn measure_with(
        &self,
        image: &GrayImage,
        detector: &dyn DiskDetector,
        recognizer: &dyn TextRecognizer,
    ) -> Result<Measurement, MeasureError> {
        pipeline::measure_detected(image, &self.config, detector, recognizer)
    }

    /// Measure around disks located elsewhere.
    pub fn measure_disks(
        &self,
        image: &GrayImage,
        disks: Vec<Disk>,
        recognizer: &dyn TextRecognizer,
    ) -> Result<Measurement, MeasureError> {
        pipeline::measure_with_disks(image, disks, &self.config, recognizer)
    }
}
