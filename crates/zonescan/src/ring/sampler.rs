//! Ring-median radial sampling around a disk center.
//!
//! Each ring is the single-pixel-wide midpoint-circle outline of one radius.
//! Rasterization is delegated to `imageproc`, drawing into a canvas that
//! records which image pixels the outline touches instead of painting them.

use image::{GrayImage, Luma};
use imageproc::drawing::{draw_hollow_circle_mut, Canvas};

use super::radial_profile::{median, ProfileSample, RadialProfile};

/// Configuration for radial ring sampling.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct RadialSamplingConfig {
    /// Ceiling for the sampled radius (pixels).
    pub max_search_radius_px: u32,
    /// Stride between consecutive rings (pixels).
    pub radius_step_px: u32,
}

impl Default for RadialSamplingConfig {
    fn default() -> Self {
        Self {
            max_search_radius_px: 150,
            radius_step_px: 2,
        }
    }
}

impl RadialSamplingConfig {
    /// Effective radius bound for an image: `min(max_search, w/2, h/2)`.
    ///
    /// Sampled radii are strictly below this value.
    pub fn radius_limit(&self, width: u32, height: u32) -> u32 {
        self.max_search_radius_px.min(width / 2).min(height / 2)
    }
}

/// Canvas that records the in-bounds pixel positions an outline touches.
struct RingCollector<'a> {
    img: &'a GrayImage,
    hits: Vec<(u32, u32)>,
}

impl Canvas for RingCollector<'_> {
    type Pixel = Luma<u8>;

    fn dimensions(&self) -> (u32, u32) {
        self.img.dimensions()
    }

    fn get_pixel(&self, x: u32, y: u32) -> Self::Pixel {
        *self.img.get_pixel(x, y)
    }

    fn draw_pixel(&mut self, x: u32, y: u32, _color: Self::Pixel) {
        self.hits.push((x, y));
    }
}

/// Collect the intensities of every image pixel on the ring of radius `r`.
///
/// Octant symmetry makes the midpoint rasterizer emit some positions twice;
/// those are deduplicated so each pixel contributes once.
fn ring_intensities(img: &GrayImage, center: [u32; 2], r: u32, out: &mut Vec<f32>) {
    let mut collector = RingCollector {
        img,
        hits: Vec::with_capacity(8 * (r as usize + 1)),
    };
    draw_hollow_circle_mut(
        &mut collector,
        (center[0] as i32, center[1] as i32),
        r as i32,
        Luma([255]),
    );
    let mut hits = collector.hits;
    hits.sort_unstable();
    hits.dedup();

    out.clear();
    out.extend(hits.iter().map(|&(x, y)| img.get_pixel(x, y)[0] as f32));
}

/// Sample the median ring intensity at `0, step, 2*step, ...` around `center`.
///
/// Radii whose ring has no pixel inside the image are skipped rather than
/// zero-filled, so the profile never contains artificial samples.
pub fn sample_radial_profile(
    img: &GrayImage,
    center: [u32; 2],
    cfg: &RadialSamplingConfig,
) -> RadialProfile {
    let (w, h) = img.dimensions();
    let r_limit = cfg.radius_limit(w, h);
    let step = cfg.radius_step_px.max(1);

    let mut samples = Vec::with_capacity((r_limit / step) as usize + 1);
    let mut ring = Vec::new();
    for r in (0..r_limit).step_by(step as usize) {
        ring_intensities(img, center, r, &mut ring);
        if let Some(intensity) = median(&mut ring) {
            samples.push(ProfileSample {
                radius_px: r,
                intensity,
            });
        }
    }
    RadialProfile::from_samples(samples)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::draw_plate_image;

    #[test]
    fn radii_follow_stride_and_stay_below_limit() {
        let img = GrayImage::from_pixel(120, 80, Luma([90]));
        let cfg = RadialSamplingConfig {
            max_search_radius_px: 150,
            radius_step_px: 3,
        };
        let profile = sample_radial_profile(&img, [60, 40], &cfg);

        let radii = profile.radii();
        assert_eq!(radii.first(), Some(&0));
        assert!(radii.windows(2).all(|w| w[1] > w[0]));
        assert!(radii.iter().all(|r| r % 3 == 0 && *r < 40));
        assert_eq!(radii.len(), 14);
        assert!(profile.intensities().iter().all(|&v| v == 90.0));
    }

    #[test]
    fn search_ceiling_caps_radius() {
        let img = GrayImage::from_pixel(400, 400, Luma([10]));
        let cfg = RadialSamplingConfig {
            max_search_radius_px: 20,
            radius_step_px: 2,
        };
        let profile = sample_radial_profile(&img, [200, 200], &cfg);
        assert_eq!(profile.radii(), (0..20).step_by(2).collect::<Vec<u32>>());
    }

    #[test]
    fn rings_outside_the_image_are_skipped() {
        let img = GrayImage::from_pixel(100, 100, Luma([50]));
        let cfg = RadialSamplingConfig::default();
        // A corner center still has partial rings for every radius below the limit.
        let corner = sample_radial_profile(&img, [0, 0], &cfg);
        assert_eq!(corner.len(), 25);

        // A center far outside the image sees no ring pixels at all.
        let outside = sample_radial_profile(&img, [5000, 5000], &cfg);
        assert!(outside.is_empty());
    }

    #[test]
    fn ring_median_tracks_plate_structure() {
        let img = draw_plate_image(200, 200, &[([100.0, 100.0], 12.0, 40.0)]);
        let profile = sample_radial_profile(&img, [100, 100], &RadialSamplingConfig::default());
        let s = profile.samples();

        let at = |r: u32| s.iter().find(|p| p.radius_px == r).unwrap().intensity;
        assert_eq!(at(4), crate::test_utils::DISK_PIX as f32);
        assert_eq!(at(24), crate::test_utils::ZONE_PIX as f32);
        assert_eq!(at(60), crate::test_utils::LAWN_PIX as f32);
    }

    #[test]
    fn median_rejects_sparse_bright_artifact() {
        let mut img = GrayImage::from_pixel(80, 80, Luma([60]));
        // A short bright streak crossing the r=10 ring.
        for y in 28..33 {
            img.put_pixel(50, y, Luma([250]));
        }
        let profile = sample_radial_profile(&img, [40, 30], &RadialSamplingConfig::default());
        let r10 = profile.samples().iter().find(|p| p.radius_px == 10).unwrap();
        assert_eq!(r10.intensity, 60.0);
    }
}
