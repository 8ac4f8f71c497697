//! High-level measurement pipeline.
//!
//! Glue layer wiring the stages together:
//! detect disks (raw image) -> scale -> enhance -> per-disk zone assembly
//! (enhanced image) -> labels (raw image).
//!
//! Algorithmic primitives live in `crate::preprocess`, `crate::disk`,
//! `crate::ring` and `crate::scale`. This module owns stage order and data
//! flow only.

mod assemble;
mod result;
mod run;

pub use assemble::{assemble_zones, measure_zone, InhibitionZone, SkippedDisk, ZoneBatch};
pub use result::{Measurement, ZoneRecord};

pub(crate) use run::{measure_detected, measure_with_disks};
