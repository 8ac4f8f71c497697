//! Gaussian smoothing of radial intensity profiles.

/// Configuration for 1-D profile smoothing.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SmoothingConfig {
    /// Odd kernel length in samples. `1` disables smoothing.
    pub kernel_size: usize,
    /// Gaussian sigma in samples. Non-positive derives it from `kernel_size`.
    pub sigma: f32,
}

impl Default for SmoothingConfig {
    fn default() -> Self {
        Self {
            kernel_size: 5,
            sigma: 0.0,
        }
    }
}

impl SmoothingConfig {
    /// Sigma actually used, deriving `0.3 * ((k - 1) * 0.5 - 1) + 0.8` when unset.
    pub fn effective_sigma(&self) -> f32 {
        if self.sigma > 0.0 {
            self.sigma
        } else {
            0.3 * ((self.kernel_size as f32 - 1.0) * 0.5 - 1.0) + 0.8
        }
    }
}

/// Normalized Gaussian taps of length `kernel_size` (forced odd, at least 1).
pub(crate) fn gaussian_kernel(cfg: &SmoothingConfig) -> Vec<f32> {
    let k = cfg.kernel_size.max(1) | 1;
    let half = (k / 2) as i32;
    let sigma = cfg.effective_sigma().max(1e-3);
    let denom = 2.0 * sigma * sigma;
    let mut taps: Vec<f32> = (-half..=half)
        .map(|i| (-((i * i) as f32) / denom).exp())
        .collect();
    let sum: f32 = taps.iter().sum();
    for t in &mut taps {
        *t /= sum;
    }
    taps
}

/// Reflect-101 index into `0..n` (`gfedcb|abcdefgh|gfedcba`).
#[inline]
fn reflect_101(i: isize, n: usize) -> usize {
    if n == 1 {
        return 0;
    }
    let period = 2 * (n as isize - 1);
    let mut j = i.rem_euclid(period);
    if j >= n as isize {
        j = period - j;
    }
    j as usize
}

/// Smooth an intensity sequence with a Gaussian-weighted moving average.
///
/// Output has the same length as the input. Only intensities are touched; the
/// caller keeps the radius axis as is.
pub fn smooth_intensities(values: &[f32], cfg: &SmoothingConfig) -> Vec<f32> {
    let n = values.len();
    let taps = gaussian_kernel(cfg);
    if n == 0 || taps.len() == 1 {
        return values.to_vec();
    }
    let half = (taps.len() / 2) as isize;

    (0..n)
        .map(|i| {
            taps.iter()
                .enumerate()
                .map(|(k, &w)| {
                    let j = reflect_101(i as isize + k as isize - half, n);
                    w * values[j]
                })
                .sum()
        })
        .collect()
}
