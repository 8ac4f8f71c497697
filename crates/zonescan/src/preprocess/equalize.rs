//! Contrast-limited adaptive histogram equalization (CLAHE).
//!
//! The image is split into a grid of tiles. Each tile gets its own
//! equalization lookup table built from a clipped histogram; the excess above
//! the clip limit is spread back over all bins. Output pixels blend the four
//! nearest tile tables bilinearly so tile seams do not show.

use image::{GrayImage, Luma};

const BINS: usize = 256;

/// Integer tile boundaries `[0, .., len]` splitting `len` into `n` parts.
fn tile_bounds(len: u32, n: u32) -> Vec<u32> {
    (0..=n).map(|i| (i as u64 * len as u64 / n as u64) as u32).collect()
}

/// Clip a histogram at `limit` and redistribute the excess uniformly.
fn clip_histogram(hist: &mut [u32; BINS], limit: u32) {
    let mut excess = 0u32;
    for h in hist.iter_mut() {
        if *h > limit {
            excess += *h - limit;
            *h = limit;
        }
    }
    if excess == 0 {
        return;
    }
    let per_bin = excess / BINS as u32;
    let residual = (excess % BINS as u32) as usize;
    for h in hist.iter_mut() {
        *h += per_bin;
    }
    if residual > 0 {
        let step = (BINS / residual).max(1);
        for h in hist.iter_mut().step_by(step).take(residual) {
            *h += 1;
        }
    }
}

/// Equalization LUT for one tile.
fn tile_lut(img: &GrayImage, x0: u32, x1: u32, y0: u32, y1: u32, clip_limit: f32) -> [u8; BINS] {
    let mut hist = [0u32; BINS];
    for y in y0..y1 {
        for x in x0..x1 {
            hist[img.get_pixel(x, y)[0] as usize] += 1;
        }
    }
    let area = ((x1 - x0) * (y1 - y0)).max(1);
    if clip_limit > 0.0 {
        let limit = ((clip_limit * area as f32 / BINS as f32) as u32).max(1);
        clip_histogram(&mut hist, limit);
    }

    let scale = (BINS - 1) as f32 / area as f32;
    let mut lut = [0u8; BINS];
    let mut cdf = 0u32;
    for (v, out) in lut.iter_mut().enumerate() {
        cdf += hist[v];
        *out = (cdf as f32 * scale).round().clamp(0.0, 255.0) as u8;
    }
    lut
}

/// Neighbouring tile indices and blend weight for one axis coordinate.
#[inline]
fn axis_blend(pos: u32, tile_len: f32, n_tiles: u32) -> (usize, usize, f32) {
    let f = pos as f32 / tile_len - 0.5;
    let lo = f.floor();
    let w = f - lo;
    let last = n_tiles as i64 - 1;
    let i1 = (lo as i64).clamp(0, last) as usize;
    let i2 = (lo as i64 + 1).clamp(0, last) as usize;
    (i1, i2, w)
}

/// Apply CLAHE with the given clip limit and `[columns, rows]` tile grid.
///
/// A non-positive clip limit disables clipping (plain adaptive equalization).
/// The grid is clamped so every tile holds at least one pixel.
pub fn clahe(img: &GrayImage, clip_limit: f32, tile_grid: [u32; 2]) -> GrayImage {
    let (w, h) = img.dimensions();
    if w == 0 || h == 0 {
        return img.clone();
    }
    let nx = tile_grid[0].clamp(1, w);
    let ny = tile_grid[1].clamp(1, h);
    let xb = tile_bounds(w, nx);
    let yb = tile_bounds(h, ny);

    let mut luts = Vec::with_capacity((nx * ny) as usize);
    for ty in 0..ny as usize {
        for tx in 0..nx as usize {
            luts.push(tile_lut(
                img,
                xb[tx],
                xb[tx + 1],
                yb[ty],
                yb[ty + 1],
                clip_limit,
            ));
        }
    }
    let lut_at = |tx: usize, ty: usize| &luts[ty * nx as usize + tx];

    let tile_w = w as f32 / nx as f32;
    let tile_h = h as f32 / ny as f32;
    let x_blend: Vec<(usize, usize, f32)> = (0..w).map(|x| axis_blend(x, tile_w, nx)).collect();

    let mut out = GrayImage::new(w, h);
    for y in 0..h {
        let (ty1, ty2, ya) = axis_blend(y, tile_h, ny);
        for x in 0..w {
            let (tx1, tx2, xa) = x_blend[x as usize];
            let v = img.get_pixel(x, y)[0] as usize;
            let top = lut_at(tx1, ty1)[v] as f32 * (1.0 - xa) + lut_at(tx2, ty1)[v] as f32 * xa;
            let bottom = lut_at(tx1, ty2)[v] as f32 * (1.0 - xa) + lut_at(tx2, ty2)[v] as f32 * xa;
            let res = top * (1.0 - ya) + bottom * ya;
            out.put_pixel(x, y, Luma([res.round().clamp(0.0, 255.0) as u8]));
        }
    }
    out
}
