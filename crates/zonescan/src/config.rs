//! Top-level measurement configuration.
//!
//! Every field has a default, so a JSON config file only needs the values it
//! changes.

use std::path::Path;

use crate::disk::{DiskDetectConfig, MAX_DISK_RADIUS_PX};
use crate::label::LabelConfig;
use crate::preprocess::EnhanceConfig;
use crate::ring::{EdgeConfig, RadialSamplingConfig, SmoothingConfig};
use crate::scale::DEFAULT_DISK_DIAMETER_MM;

/// Full measurement configuration.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct MeasureConfig {
    /// Physical diameter of an antibiotic disk (mm), used to derive mm/px.
    pub reference_disk_diameter_mm: f64,
    /// Local contrast enhancement applied before sampling.
    pub enhance: EnhanceConfig,
    /// Radial ring sampling.
    pub sampling: RadialSamplingConfig,
    /// Profile smoothing.
    pub smoothing: SmoothingConfig,
    /// Zone-boundary search.
    pub edge: EdgeConfig,
    /// Built-in disk detector.
    pub disk_detect: DiskDetectConfig,
    /// Disk label cropping.
    pub label: LabelConfig,
}

impl Default for MeasureConfig {
    fn default() -> Self {
        Self {
            reference_disk_diameter_mm: DEFAULT_DISK_DIAMETER_MM,
            enhance: EnhanceConfig::default(),
            sampling: RadialSamplingConfig::default(),
            smoothing: SmoothingConfig::default(),
            edge: EdgeConfig::default(),
            disk_detect: DiskDetectConfig::default(),
            label: LabelConfig::default(),
        }
    }
}

impl MeasureConfig {
    /// Load a configuration from a JSON file. Missing fields take defaults.
    pub fn from_json_file(path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        let data = std::fs::read_to_string(path)?;
        let cfg: Self = serde_json::from_str(&data)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Check value ranges. Returns a description of the first invalid field.
    pub fn validate(&self) -> Result<(), String> {
        let d = self.reference_disk_diameter_mm;
        if !(d.is_finite() && d > 0.0) {
            return Err(format!(
                "reference_disk_diameter_mm must be positive, got {}",
                d
            ));
        }
        if !(self.enhance.clip_limit.is_finite() && self.enhance.clip_limit >= 0.0) {
            return Err(format!(
                "enhance.clip_limit must be non-negative, got {}",
                self.enhance.clip_limit
            ));
        }
        if self.enhance.tile_grid.contains(&0) {
            return Err("enhance.tile_grid entries must be at least 1".to_string());
        }
        if self.enhance.median_kernel % 2 == 0 {
            return Err(format!(
                "enhance.median_kernel must be odd, got {}",
                self.enhance.median_kernel
            ));
        }
        if self.sampling.radius_step_px == 0 {
            return Err("sampling.radius_step_px must be at least 1".to_string());
        }
        if self.smoothing.kernel_size % 2 == 0 {
            return Err(format!(
                "smoothing.kernel_size must be odd, got {}",
                self.smoothing.kernel_size
            ));
        }
        if self.edge.min_profile_samples < 2 {
            return Err("edge.min_profile_samples must be at least 2".to_string());
        }
        let f = self.edge.threshold_fraction;
        if !(f.is_finite() && f > 0.0 && f <= 1.0) {
            return Err(format!("edge.threshold_fraction must be in (0, 1], got {}", f));
        }
        let dd = &self.disk_detect;
        if !(dd.min_radius_px > 0.0
            && dd.max_radius_px >= dd.min_radius_px
            && dd.max_radius_px <= MAX_DISK_RADIUS_PX)
        {
            return Err(format!(
                "disk_detect radius range [{}, {}] is invalid (max {})",
                dd.min_radius_px, dd.max_radius_px, MAX_DISK_RADIUS_PX
            ));
        }
        if !(dd.radius_step_px.is_finite() && dd.radius_step_px >= 0.1) {
            return Err(format!(
                "disk_detect.radius_step_px must be at least 0.1, got {}",
                dd.radius_step_px
            ));
        }
        if dd.accum_sigma <= 0.0 {
            return Err("disk_detect.accum_sigma must be positive".to_string());
        }
        if !(self.label.crop_factor.is_finite() && self.label.crop_factor >= 0.0) {
            return Err("label.crop_factor must be non-negative".to_string());
        }
        Ok(())
    }
}
