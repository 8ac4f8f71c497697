//! Physical scale (mm per pixel) from the known antibiotic disk diameter.
//!
//! All disks on a plate share one physical size, so a single global scale is
//! derived from their mean pixel radius.

/// Default physical diameter of a standard antibiotic disk.
pub const DEFAULT_DISK_DIAMETER_MM: f64 = 6.0;

/// Millimetres per pixel.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ScaleFactor {
    /// Scale in mm/px.
    pub mm_per_px: f64,
}

impl ScaleFactor {
    /// Convert a pixel length into millimetres.
    #[inline]
    pub fn to_mm(self, px: f64) -> f64 {
        px * self.mm_per_px
    }

    /// Physical diameter (mm) of a circle with radius `radius_px`.
    #[inline]
    pub fn diameter_mm(self, radius_px: f64) -> f64 {
        self.to_mm(2.0 * radius_px)
    }
}

/// Estimate `reference_diameter_mm / (2 * mean(radii))`.
///
/// Non-finite or non-positive radii are ignored. Returns `None` when no radius
/// is usable or the reference diameter is not a positive finite number.
pub fn estimate_scale<I>(radii_px: I, reference_diameter_mm: f64) -> Option<ScaleFactor>
where
    I: IntoIterator<Item = f32>,
{
    if !(reference_diameter_mm.is_finite() && reference_diameter_mm > 0.0) {
        return None;
    }
    let (sum, n) = radii_px
        .into_iter()
        .filter(|r| r.is_finite() && *r > 0.0)
        .fold((0.0f64, 0usize), |(s, n), r| (s + r as f64, n + 1));
    if n == 0 {
        return None;
    }
    let mean = sum / n as f64;
    Some(ScaleFactor {
        mm_per_px: reference_diameter_mm / (2.0 * mean),
    })
}
