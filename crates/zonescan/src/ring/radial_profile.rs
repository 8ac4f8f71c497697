//! Radial-profile types and the median/peak helpers shared with disk radius
//! estimation.

/// Expected direction of the intensity change `dI/dr` at a boundary.
///
/// The zone-boundary locator searches for the steepest change in this
/// direction. With the default enhancement the clear inhibition zone is
/// darker than the surrounding lawn, so the boundary is a dark-to-light rise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgePolarity {
    /// Intensity increases as radius increases (dark → light).
    DarkToLight,
    /// Intensity decreases as radius increases (light → dark).
    LightToDark,
}

impl EdgePolarity {
    /// Map a signed change so that "larger is better" for this polarity.
    #[inline]
    pub fn oriented(self, delta: f32) -> f32 {
        match self {
            Self::DarkToLight => delta,
            Self::LightToDark => -delta,
        }
    }
}

/// One sample of a radial profile.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ProfileSample {
    /// Ring radius in pixels.
    pub radius_px: u32,
    /// Representative (median) ring intensity.
    pub intensity: f32,
}

/// Intensity sampled along concentric rings, ordered by increasing radius.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RadialProfile {
    samples: Vec<ProfileSample>,
}

impl RadialProfile {
    /// Build a profile from samples, which must be strictly increasing in radius.
    pub fn from_samples(samples: Vec<ProfileSample>) -> Self {
        debug_assert!(samples.windows(2).all(|w| w[0].radius_px < w[1].radius_px));
        Self { samples }
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// `true` when no ring produced a sample.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Borrow the samples.
    pub fn samples(&self) -> &[ProfileSample] {
        &self.samples
    }

    /// Sampled radii in order.
    pub fn radii(&self) -> Vec<u32> {
        self.samples.iter().map(|s| s.radius_px).collect()
    }

    /// Sampled intensities in radius order.
    pub fn intensities(&self) -> Vec<f32> {
        self.samples.iter().map(|s| s.intensity).collect()
    }
}

/// Median of a set of values (mean of the two middle values for even counts).
///
/// Returns `None` for an empty slice. The slice is reordered.
pub fn median(values: &mut [f32]) -> Option<f32> {
    let n = values.len();
    if n == 0 {
        return None;
    }
    let mid = n / 2;
    let (lower, upper_mid, _) = values.select_nth_unstable_by(mid, |a, b| a.total_cmp(b));
    let upper_mid = *upper_mid;
    if n % 2 == 1 {
        return Some(upper_mid);
    }
    let lower_mid = lower.iter().copied().fold(f32::NEG_INFINITY, f32::max);
    Some(0.5 * (lower_mid + upper_mid))
}

/// Index of the strongest response in the given polarity.
pub fn peak_idx(values: &[f32], pol: EdgePolarity) -> Option<usize> {
    values
        .iter()
        .enumerate()
        .max_by(|a, b| pol.oriented(*a.1).total_cmp(&pol.oriented(*b.1)))
        .map(|(i, _)| i)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn median_odd_and_even_counts() {
        let mut odd = [5.0, 1.0, 3.0];
        assert_eq!(median(&mut odd), Some(3.0));

        let mut even = [10.0, 2.0, 4.0, 8.0];
        assert_eq!(median(&mut even), Some(6.0));

        assert_eq!(median(&mut []), None);
    }

    #[test]
    fn median_ignores_single_outlier() {
        let mut vals = [100.0, 101.0, 99.0, 100.0, 255.0];
        assert_eq!(median(&mut vals), Some(100.0));
    }

    #[test]
    fn peak_idx_respects_polarity() {
        let vals = [0.0, 3.0, -5.0, 1.0];
        assert_eq!(peak_idx(&vals, EdgePolarity::DarkToLight), Some(1));
        assert_eq!(peak_idx(&vals, EdgePolarity::LightToDark), Some(2));
        assert_eq!(peak_idx(&[], EdgePolarity::DarkToLight), None);
    }
}
