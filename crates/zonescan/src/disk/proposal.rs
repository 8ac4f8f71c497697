//! Gradient-voting radial symmetry for candidate disk centers.
//!
//! Every strong-gradient pixel votes for the points lying `min_radius ..=
//! max_radius` away on the side a disk center would be. For a disk brighter
//! than its surroundings the intensity gradient on the rim points inward, so
//! rim votes pile up on the center while the outward-facing gradient of a
//! zone boundary votes away from it.

use image::GrayImage;

use crate::ring::EdgePolarity;

use super::DiskDetectConfig;

/// A proposed disk center with its vote score.
#[derive(Debug, Clone, Copy, serde::Serialize, serde::Deserialize)]
pub struct CenterCandidate {
    /// X coordinate (pixels).
    pub x: f32,
    /// Y coordinate (pixels).
    pub y: f32,
    /// Accumulator peak score.
    pub score: f32,
}

/// Spread one vote over the four pixels around `xy`.
///
/// `xy` must satisfy `0 <= x < w - 1` and `0 <= y < h - 1`.
#[inline]
fn deposit_vote(accum: &mut [f32], width: usize, xy: [f32; 2], weight: f32) {
    let (xi, yi) = (xy[0] as usize, xy[1] as usize);
    let (fx, fy) = (xy[0] - xi as f32, xy[1] - yi as f32);
    let at = yi * width + xi;
    let (top, bottom) = (weight * (1.0 - fy), weight * fy);
    accum[at] += top * (1.0 - fx);
    accum[at + 1] += top * fx;
    accum[at + width] += bottom * (1.0 - fx);
    accum[at + width + 1] += bottom * fx;
}

/// Detect candidate disk centers via gradient-based radial symmetry voting.
///
/// Returns candidates sorted by score (highest first). Peaks closer than
/// `min_distance_px` to a stronger peak are suppressed.
pub fn find_center_candidates(gray: &GrayImage, cfg: &DiskDetectConfig) -> Vec<CenterCandidate> {
    let (w, h) = gray.dimensions();
    if w < 4 || h < 4 || !(cfg.max_radius_px >= cfg.min_radius_px.max(1.0)) {
        return Vec::new();
    }

    let gx = imageproc::gradients::horizontal_scharr(gray);
    let gy = imageproc::gradients::vertical_scharr(gray);
    let gx_raw = gx.as_raw();
    let gy_raw = gy.as_raw();

    let max_mag_sq = gx_raw
        .iter()
        .zip(gy_raw.iter())
        .map(|(&a, &b)| {
            let (a, b) = (a as f32, b as f32);
            a * a + b * b
        })
        .fold(0.0f32, f32::max);
    let max_mag = max_mag_sq.sqrt();
    if max_mag < 1e-6 {
        return Vec::new();
    }
    let threshold = cfg.grad_threshold * max_mag;
    let threshold_sq = threshold * threshold;

    let width = w as usize;
    let mut accum = vec![0.0f32; width * h as usize];
    let r_min = cfg.min_radius_px.max(1.0);
    let n_radii = (cfg.max_radius_px - r_min).floor() as usize + 1;
    let radii: Vec<f32> = (0..n_radii).map(|i| r_min + i as f32).collect();
    // Unit gradient times this sign points from the rim toward the center.
    let toward_center = match cfg.polarity {
        EdgePolarity::LightToDark => 1.0f32,
        EdgePolarity::DarkToLight => -1.0f32,
    };
    let (x_max, y_max) = ((w - 1) as f32, (h - 1) as f32);

    for (idx, (&gxv, &gyv)) in gx_raw.iter().zip(gy_raw.iter()).enumerate() {
        let (gxv, gyv) = (gxv as f32, gyv as f32);
        let mag_sq = gxv * gxv + gyv * gyv;
        if mag_sq < threshold_sq {
            continue;
        }
        let mag = mag_sq.sqrt();
        let dir = [toward_center * gxv / mag, toward_center * gyv / mag];
        let origin = [(idx % width) as f32, (idx / width) as f32];
        for &r in &radii {
            let vote = [origin[0] + dir[0] * r, origin[1] + dir[1] * r];
            if vote[0] >= 0.0 && vote[0] < x_max && vote[1] >= 0.0 && vote[1] < y_max {
                deposit_vote(&mut accum, width, vote, mag);
            }
        }
    }

    let Some(accum_img) = image::ImageBuffer::<image::Luma<f32>, Vec<f32>>::from_raw(w, h, accum)
    else {
        return Vec::new();
    };
    let smoothed = imageproc::filter::gaussian_blur_f32(&accum_img, cfg.accum_sigma);
    let smoothed_data = smoothed.as_raw();
    let max_val = smoothed_data.iter().cloned().fold(0.0f32, f32::max);
    if max_val < 1e-6 {
        return Vec::new();
    }
    let vote_threshold = cfg.min_vote_frac * max_val;

    let nms_r = cfg.min_distance_px.ceil().max(1.0) as i32;
    let nms_r_sq = cfg.min_distance_px * cfg.min_distance_px;
    let mut nms_offsets = Vec::new();
    for dy in -nms_r..=nms_r {
        for dx in -nms_r..=nms_r {
            if (dx == 0 && dy == 0) || (dx * dx + dy * dy) as f32 > nms_r_sq {
                continue;
            }
            nms_offsets.push((dx, dy));
        }
    }

    // Non-maximum suppression; neighbours outside the image are ignored so
    // disks near the plate border still qualify.
    let (wi, hi) = (w as i32, h as i32);
    let mut candidates = Vec::new();
    for y in 0..hi {
        for x in 0..wi {
            let idx = y as usize * width + x as usize;
            let val = smoothed_data[idx];
            if val < vote_threshold {
                continue;
            }
            let is_max = nms_offsets.iter().all(|&(dx, dy)| {
                let (nx, ny) = (x + dx, y + dy);
                if nx < 0 || ny < 0 || nx >= wi || ny >= hi {
                    return true;
                }
                let nidx = ny as usize * width + nx as usize;
                !(smoothed_data[nidx] > val || (smoothed_data[nidx] == val && nidx < idx))
            });
            if is_max {
                candidates.push(CenterCandidate {
                    x: x as f32,
                    y: y as f32,
                    score: val,
                });
            }
        }
    }

    candidates.sort_by(|a, b| b.score.total_cmp(&a.score));
    candidates
}
