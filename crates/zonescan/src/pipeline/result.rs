use crate::disk::Disk;
use crate::label::NO_TEXT;
use crate::review::ReviewSession;
use crate::scale::ScaleFactor;

use super::assemble::{InhibitionZone, SkippedDisk};

/// Full measurement result for a single plate image.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct Measurement {
    /// Image dimensions [width, height].
    pub image_size: [u32; 2],
    /// Disks the zones were measured around, in detector order.
    pub disks: Vec<Disk>,
    /// Plate scale derived from the disk radii.
    pub scale: ScaleFactor,
    /// Measured zones, in disk order.
    pub zones: Vec<InhibitionZone>,
    /// Disks without a measurable zone.
    pub skipped: Vec<SkippedDisk>,
    /// Label text per disk (parallel to `disks`).
    pub labels: Vec<String>,
}

/// One reported zone, with review adjustments applied.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ZoneRecord {
    pub disk_index: usize,
    pub center: [u32; 2],
    /// Radius as measured, before adjustment.
    pub zone_radius_px: u32,
    pub adjustment_factor: f32,
    /// `zone_radius_px * adjustment_factor`.
    pub adjusted_radius_px: f32,
    /// `2 * adjusted_radius_px * mm_per_px`.
    pub diameter_mm: f64,
    pub label: String,
}

impl Measurement {
    /// Fresh review session covering every zone.
    pub fn review_session(&self) -> ReviewSession {
        ReviewSession::new(self.zones.len())
    }

    /// Label of the disk at `disk_index`, or the "no text" sentinel.
    pub fn label_for(&self, disk_index: usize) -> &str {
        self.labels
            .get(disk_index)
            .map(String::as_str)
            .unwrap_or(NO_TEXT)
    }

    /// Build output records. Zones the session does not cover keep factor 1.0.
    pub fn records(&self, session: &ReviewSession) -> Vec<ZoneRecord> {
        self.zones
            .iter()
            .enumerate()
            .map(|(i, zone)| {
                let adjustment_factor = session.factor(i).unwrap_or(1.0);
                let adjusted_radius_px = zone.zone_radius_px as f32 * adjustment_factor;
                ZoneRecord {
                    disk_index: zone.disk_index,
                    center: zone.center,
                    zone_radius_px: zone.zone_radius_px,
                    adjustment_factor,
                    adjusted_radius_px,
                    diameter_mm: self.scale.diameter_mm(adjusted_radius_px as f64),
                    label: self.label_for(zone.disk_index).to_string(),
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::error::ZoneSkipReason;

    fn measurement() -> Measurement {
        Measurement {
            image_size: [400, 200],
            disks: vec![
                Disk {
                    center: [100, 100],
                    radius_px: 10.0,
                },
                Disk {
                    center: [200, 100],
                    radius_px: 12.0,
                },
                Disk {
                    center: [300, 100],
                    radius_px: 11.0,
                },
            ],
            scale: ScaleFactor {
                mm_per_px: 6.0 / 22.0,
            },
            zones: vec![
                InhibitionZone {
                    disk_index: 0,
                    center: [100, 100],
                    zone_radius_px: 40,
                },
                InhibitionZone {
                    disk_index: 2,
                    center: [300, 100],
                    zone_radius_px: 30,
                },
            ],
            skipped: vec![SkippedDisk {
                disk_index: 1,
                center: [200, 100],
                reason: ZoneSkipReason::NoBoundaryFound,
            }],
            labels: vec!["AMP10".into(), "CIP5".into(), "GEN10".into()],
        }
    }

    #[test]
    fn records_pair_labels_by_disk_index() {
        let m = measurement();
        let records = m.records(&m.review_session());
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].label, "AMP10");
        // Disk 1 was skipped; zone 1 belongs to disk 2.
        assert_eq!(records[1].disk_index, 2);
        assert_eq!(records[1].label, "GEN10");
    }

    #[test]
    fn unadjusted_diameter_is_twice_radius_times_scale() {
        let m = measurement();
        let records = m.records(&m.review_session());
        assert_relative_eq!(records[0].diameter_mm, 2.0 * 40.0 * 6.0 / 22.0, epsilon = 1e-9);
        assert_relative_eq!(records[0].diameter_mm, 21.818, epsilon = 1e-3);
        assert_eq!(records[0].adjustment_factor, 1.0);
        assert_eq!(records[0].adjusted_radius_px, 40.0);
    }

    #[test]
    fn records_carry_adjusted_values() {
        let m = measurement();
        let mut session = m.review_session();
        session.set_factor(0, 1.5).unwrap();
        let records = m.records(&session);

        assert_eq!(records[0].zone_radius_px, 40);
        assert_eq!(records[0].adjusted_radius_px, 60.0);
        assert_relative_eq!(records[0].diameter_mm, 2.0 * 60.0 * 6.0 / 22.0, epsilon = 1e-9);
        assert_eq!(records[1].adjustment_factor, 1.0);
        assert_eq!(records[1].adjusted_radius_px, 30.0);
    }

    #[test]
    fn missing_label_falls_back_to_sentinel() {
        let mut m = measurement();
        m.labels.clear();
        assert_eq!(m.label_for(0), NO_TEXT);
        assert!(m.records(&m.review_session()).iter().all(|r| r.label == NO_TEXT));
    }

    #[test]
    fn serializes_to_json() {
        let m = measurement();
        let json = serde_json::to_string(&m).unwrap();
        assert!(json.contains("\"zone_radius_px\":40"));
        assert!(json.contains("\"kind\":\"no_boundary_found\""));
        let back: Measurement = serde_json::from_str(&json).unwrap();
        assert_eq!(back.zones, m.zones);
    }
}
