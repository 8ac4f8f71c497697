//! Disk radius estimation around a candidate center.
//!
//! Intensity is sampled along rays, differentiated in `r` and aggregated over
//! rays with a median. The disk rim is the strongest aggregated response in
//! the configured polarity; per-ray peaks must agree with it for the
//! candidate to count as a disk.

use image::GrayImage;

use crate::ring::radial_profile::{median, peak_idx};

use super::DiskDetectConfig;

/// Accepted radius estimate for one candidate.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RadiusEstimate {
    /// Rim radius in pixels.
    pub radius_px: f32,
    /// Aggregated oriented derivative at the rim (intensity in [0, 1] per pixel).
    pub edge_strength: f32,
    /// Fraction of rays whose own peak agrees with `radius_px`.
    pub ray_consistency: f32,
}

/// Bilinear intensity in [0, 1] at sub-pixel `xy`; `None` unless all four
/// neighbours are inside the image.
#[inline]
pub(crate) fn sample_bilinear(img: &GrayImage, xy: [f32; 2]) -> Option<f32> {
    let (w, h) = img.dimensions();
    let [x, y] = xy;
    if x < 0.0 || y < 0.0 {
        return None;
    }
    let (x0, y0) = (x.floor() as u32, y.floor() as u32);
    if x0 + 1 >= w || y0 + 1 >= h {
        return None;
    }
    let (fx, fy) = (x - x0 as f32, y - y0 as f32);
    let px = |dx: u32, dy: u32| img.get_pixel(x0 + dx, y0 + dy)[0] as f32 / 255.0;
    let top = px(0, 0) + fx * (px(1, 0) - px(0, 0));
    let bottom = px(0, 1) + fx * (px(1, 1) - px(0, 1));
    Some(top + fy * (bottom - top))
}

/// `dI/dr` along one ray, followed by a 3-tap box average on the interior.
///
/// Central differences inside, one-sided at the ends. Rays shorter than five
/// samples are left unaveraged.
fn rim_slope(intensity: &[f32], step: f32) -> Vec<f32> {
    let n = intensity.len();
    if n < 2 {
        return vec![0.0; n];
    }
    let slope: Vec<f32> = (0..n)
        .map(|i| {
            let lo = i.saturating_sub(1);
            let hi = (i + 1).min(n - 1);
            (intensity[hi] - intensity[lo]) / ((hi - lo) as f32 * step)
        })
        .collect();
    if n < 5 {
        return slope;
    }
    let mut averaged = slope.clone();
    for (out, w) in averaged[1..n - 1].iter_mut().zip(slope.windows(3)) {
        *out = (w[0] + w[1] + w[2]) / 3.0;
    }
    averaged
}

/// Fraction of per-ray rim radii within `tolerance` of `rim_radius`.
fn rim_agreement(per_ray_rims: &[f32], rim_radius: f32, tolerance: f32) -> f32 {
    if per_ray_rims.is_empty() {
        return 0.0;
    }
    let agreeing = per_ray_rims
        .iter()
        .filter(|r| (*r - rim_radius).abs() <= tolerance)
        .count();
    agreeing as f32 / per_ray_rims.len() as f32
}

/// Estimate the rim radius of a disk centered near `center`.
///
/// Returns `None` when too few rays stay inside the image, the rim response
/// is weak, rays disagree, or the radius falls outside the configured range.
pub fn estimate_disk_radius(
    gray: &GrayImage,
    center: [f32; 2],
    cfg: &DiskDetectConfig,
) -> Option<RadiusEstimate> {
    let r_step = cfg.radius_step_px.max(0.1);
    let r_lo = (0.5 * cfg.min_radius_px).max(1.0);
    let r_hi = 1.25 * cfg.max_radius_px;
    if r_hi <= r_lo + 2.0 * r_step {
        return None;
    }
    let n_r = ((r_hi - r_lo) / r_step).floor() as usize + 1;
    let r_samples: Vec<f32> = (0..n_r).map(|i| r_lo + i as f32 * r_step).collect();

    let n_rays = cfg.n_rays.max(8);
    let mut slopes: Vec<Vec<f32>> = Vec::with_capacity(n_rays);
    let mut per_ray_rims = Vec::with_capacity(n_rays);
    let mut ray = Vec::with_capacity(n_r);

    for k in 0..n_rays {
        let theta = 2.0 * std::f32::consts::PI * k as f32 / n_rays as f32;
        let (st, ct) = theta.sin_cos();
        ray.clear();
        for &r in &r_samples {
            match sample_bilinear(gray, [center[0] + ct * r, center[1] + st * r]) {
                Some(v) => ray.push(v),
                None => break,
            }
        }
        // Rays that leave the image are dropped whole.
        if ray.len() < n_r {
            continue;
        }
        let slope = rim_slope(&ray, r_step);
        if let Some(pi) = peak_idx(&slope, cfg.polarity) {
            per_ray_rims.push(r_samples[pi]);
        }
        slopes.push(slope);
    }

    let coverage = slopes.len() as f32 / n_rays as f32;
    if slopes.is_empty() || coverage < cfg.min_ray_coverage {
        return None;
    }

    let mut scratch = Vec::with_capacity(slopes.len());
    let agg: Vec<f32> = (0..n_r)
        .map(|ri| {
            scratch.clear();
            scratch.extend(slopes.iter().map(|c| c[ri]));
            median(&mut scratch).unwrap_or(0.0)
        })
        .collect();

    let idx = peak_idx(&agg, cfg.polarity)?;
    if idx == 0 || idx + 1 == n_r {
        return None;
    }
    let edge_strength = cfg.polarity.oriented(agg[idx]);
    if edge_strength < cfg.min_edge_strength {
        return None;
    }
    let radius_px = r_samples[idx];
    if radius_px < cfg.min_radius_px || radius_px > cfg.max_radius_px {
        return None;
    }
    let ray_consistency = rim_agreement(&per_ray_rims, radius_px, (4.0 * r_step).max(1.0));
    if ray_consistency < cfg.min_ray_consistency {
        return None;
    }

    Some(RadiusEstimate {
        radius_px,
        edge_strength,
        ray_consistency,
    })
}
