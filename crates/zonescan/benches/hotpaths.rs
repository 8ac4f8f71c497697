use criterion::{black_box, criterion_group, criterion_main, Criterion};
use image::GrayImage;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use zonescan::{
    enhance, estimate_disk_radius, find_center_candidates, locate_edge, sample_radial_profile,
    smooth_intensities, DiskDetectConfig, EdgeConfig, EnhanceConfig, RadialSamplingConfig,
    SmoothingConfig,
};

/// Plate fixture: textured lawn, a grid of bright disks with dark clear zones.
/// Returns the image and the disk centers.
fn make_plate_fixture(width: u32, height: u32, seed: u64) -> (GrayImage, Vec<[u32; 2]>) {
    let mut img = GrayImage::new(width, height);
    let buf = img.as_mut();
    let mut rng = StdRng::seed_from_u64(seed);

    for y in 0..height {
        for x in 0..width {
            let idx = (y * width + x) as usize;
            let v = 165.0
                + 20.0 * ((x as f32 * 0.005).sin() + (y as f32 * 0.008).cos())
                + rng.gen_range(-12.0f32..12.0f32);
            buf[idx] = v.clamp(0.0, 255.0) as u8;
        }
    }

    let cols = 4u32;
    let rows = 3u32;
    let pitch_x = width as f32 / (cols as f32 + 1.0);
    let pitch_y = height as f32 / (rows as f32 + 1.0);
    let disk_r = 14.0f32;
    let mut centers = Vec::new();

    for r in 0..rows {
        for c in 0..cols {
            let cx = pitch_x * (c as f32 + 1.0);
            let cy = pitch_y * (r as f32 + 1.0);
            let zone_r = rng.gen_range(30.0f32..60.0f32);
            let x0 = (cx - zone_r).floor().max(0.0) as u32;
            let x1 = (cx + zone_r).ceil().min((width - 1) as f32) as u32;
            let y0 = (cy - zone_r).floor().max(0.0) as u32;
            let y1 = (cy + zone_r).ceil().min((height - 1) as f32) as u32;

            for y in y0..=y1 {
                for x in x0..=x1 {
                    let dx = x as f32 - cx;
                    let dy = y as f32 - cy;
                    let d = (dx * dx + dy * dy).sqrt();
                    let idx = (y * width + x) as usize;
                    if d <= disk_r {
                        buf[idx] = 235;
                    } else if d <= zone_r {
                        buf[idx] = 60u8.saturating_add(rng.gen_range(0..10));
                    }
                }
            }
            centers.push([cx.round() as u32, cy.round() as u32]);
        }
    }

    (img, centers)
}

fn bench_enhance(c: &mut Criterion) {
    let (img, _) = make_plate_fixture(1280, 960, 7);
    let cfg = EnhanceConfig::default();

    c.bench_function("enhance_1280x960", |b| {
        b.iter(|| black_box(enhance(black_box(&img), black_box(&cfg))))
    });
}

fn bench_zone_profile(c: &mut Criterion) {
    let (img, centers) = make_plate_fixture(1280, 960, 11);
    let enhanced = enhance(&img, &EnhanceConfig::default());
    let sampling = RadialSamplingConfig::default();
    let smoothing = SmoothingConfig::default();
    let edge = EdgeConfig::default();

    c.bench_function("sample_radial_profile_150r", |b| {
        b.iter(|| {
            let profile =
                sample_radial_profile(black_box(&enhanced), black_box(centers[0]), &sampling);
            black_box(profile.len())
        })
    });

    c.bench_function("zone_edge_12_disks", |b| {
        b.iter(|| {
            let mut n = 0usize;
            for &center in &centers {
                let profile = sample_radial_profile(&enhanced, center, &sampling);
                let smoothed = smooth_intensities(&profile.intensities(), &smoothing);
                if locate_edge(&profile.radii(), &smoothed, &edge).is_ok() {
                    n += 1;
                }
            }
            black_box(n)
        })
    });
}

fn bench_disk_detect(c: &mut Criterion) {
    let (img, centers) = make_plate_fixture(1280, 960, 13);
    let cfg = DiskDetectConfig::default();
    let blurred = imageproc::filter::gaussian_blur_f32(&img, cfg.pre_blur_sigma);

    c.bench_function("disk_center_candidates_1280x960", |b| {
        b.iter(|| {
            let candidates = find_center_candidates(black_box(&blurred), black_box(&cfg));
            black_box(candidates.len())
        })
    });

    let center = [centers[0][0] as f32, centers[0][1] as f32];
    c.bench_function("disk_radius_48rays", |b| {
        b.iter(|| black_box(estimate_disk_radius(black_box(&blurred), center, &cfg)))
    });
}

criterion_group!(hotpaths, bench_enhance, bench_zone_profile, bench_disk_detect);
criterion_main!(hotpaths);
