//! Error and skip-reason types.

// ── Fatal (whole-image) errors ─────────────────────────────────────────────

/// Errors that stop a whole-image measurement.
#[derive(Debug, Clone, PartialEq)]
pub enum MeasureError {
    /// Configuration failed validation.
    InvalidConfig(String),
    /// The disk detector found no disks, so neither scale nor zones exist.
    NoDisksFound,
    /// No disk carried a usable radius, so mm/px cannot be derived.
    UndeterminedScale,
}

impl std::fmt::Display for MeasureError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidConfig(msg) => write!(f, "invalid configuration: {}", msg),
            Self::NoDisksFound => f.write_str("no disks found in the image"),
            Self::UndeterminedScale => {
                f.write_str("could not determine scale: no disk has a usable radius")
            }
        }
    }
}

impl std::error::Error for MeasureError {}

// ── Per-disk skip reasons ──────────────────────────────────────────────────

/// Why a disk produced no inhibition zone. Never fatal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ZoneSkipReason {
    /// The radial profile is too short to expose a single dominant edge.
    InsufficientProfileSamples {
        /// Required minimum number of samples.
        needed: usize,
        /// Samples actually collected.
        got: usize,
    },
    /// No gradient step exceeded the threshold.
    NoBoundaryFound,
    /// The steepest step in the configured direction is not positive.
    NonPositivePeak,
}

impl ZoneSkipReason {
    /// Stable snake_case code.
    pub const fn code(self) -> &'static str {
        match self {
            Self::InsufficientProfileSamples { .. } => "insufficient_profile_samples",
            Self::NoBoundaryFound => "no_boundary_found",
            Self::NonPositivePeak => "non_positive_peak",
        }
    }
}

impl std::fmt::Display for ZoneSkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InsufficientProfileSamples { needed, got } => {
                write!(f, "{}: need {}, got {}", self.code(), needed, got)
            }
            _ => f.write_str(self.code()),
        }
    }
}

// ── Review errors ──────────────────────────────────────────────────────────

/// Errors from mutating a review session.
#[derive(Debug, Clone, PartialEq)]
pub enum ReviewError {
    /// The zone index does not exist.
    ZoneIndexOutOfRange {
        /// Requested index.
        index: usize,
        /// Number of zones in the session.
        len: usize,
    },
    /// The factor is NaN or infinite.
    NonFiniteFactor,
}

impl std::fmt::Display for ReviewError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ZoneIndexOutOfRange { index, len } => {
                write!(f, "zone index {} out of range ({} zones)", index, len)
            }
            Self::NonFiniteFactor => f.write_str("adjustment factor must be finite"),
        }
    }
}

impl std::error::Error for ReviewError {}
