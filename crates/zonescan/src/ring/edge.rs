//! Zone-boundary location on a smoothed radial profile.
//!
//! The boundary is the *first* radius at which the profile rises by more than
//! `threshold_fraction` of its steepest rise. Taking the first qualifying step
//! instead of the global maximum keeps the search on the innermost clearing
//! edge when a stronger unrelated jump (plate rim, neighbouring colony) shows
//! up further out.

use crate::error::ZoneSkipReason;

use super::radial_profile::EdgePolarity;

/// Configuration for the boundary search.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct EdgeConfig {
    /// Minimum number of profile samples required to attempt a search.
    pub min_profile_samples: usize,
    /// Fraction of the peak change a step must exceed to qualify.
    pub threshold_fraction: f32,
    /// Direction of the intensity change at the zone boundary.
    ///
    /// Must match the contrast of the enhanced image: with the default
    /// enhancement the clear zone is darker than the lawn.
    pub polarity: EdgePolarity,
}

impl Default for EdgeConfig {
    fn default() -> Self {
        Self {
            min_profile_samples: 11,
            threshold_fraction: 0.8,
            polarity: EdgePolarity::DarkToLight,
        }
    }
}

/// A located boundary.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct EdgeHit {
    /// Index into the profile of the qualifying step.
    pub index: usize,
    /// Radius (pixels) of the sample at `index`.
    pub radius_px: u32,
    /// Largest oriented step along the profile.
    pub max_change: f32,
    /// Threshold a step had to exceed.
    pub threshold: f32,
}

/// Forward difference `s[i + 1] - s[i]`, oriented for `polarity`.
pub fn oriented_gradient(smoothed: &[f32], polarity: EdgePolarity) -> Vec<f32> {
    smoothed
        .windows(2)
        .map(|w| polarity.oriented(w[1] - w[0]))
        .collect()
}

/// Locate the zone boundary on a smoothed profile.
///
/// `radii` and `smoothed` must have equal length. A profile whose steepest
/// oriented step is not strictly positive has no edge in the configured
/// direction and is rejected before thresholding.
pub fn locate_edge(
    radii: &[u32],
    smoothed: &[f32],
    cfg: &EdgeConfig,
) -> Result<EdgeHit, ZoneSkipReason> {
    debug_assert_eq!(radii.len(), smoothed.len());
    let gradient = oriented_gradient(smoothed, cfg.polarity);
    if gradient.is_empty() {
        return Err(ZoneSkipReason::NoBoundaryFound);
    }

    let max_change = gradient.iter().copied().fold(f32::NEG_INFINITY, f32::max);
    if !max_change.is_finite() || max_change <= 0.0 {
        return Err(ZoneSkipReason::NonPositivePeak);
    }

    let threshold = cfg.threshold_fraction * max_change;
    let index = gradient
        .iter()
        .position(|&g| g > threshold)
        .ok_or(ZoneSkipReason::NoBoundaryFound)?;

    Ok(EdgeHit {
        index,
        radius_px: radii[index],
        max_change,
        threshold,
    })
}
