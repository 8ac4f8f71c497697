//! Zone-boundary detection around a single disk center.
//!
//! Stages:
//! 1. **Sampling** – ring-median intensities at a fixed radial stride.
//! 2. **Smoothing** – Gaussian moving average along the intensity axis.
//! 3. **Edge** – first near-maximal oriented step of the smoothed profile.
//!
//! `radial_profile` holds the profile type and the derivative/aggregation
//! helpers shared with disk radius estimation.

pub(crate) mod edge;
pub(crate) mod radial_profile;
pub(crate) mod sampler;
pub(crate) mod smooth;

pub use edge::{locate_edge, oriented_gradient, EdgeConfig, EdgeHit};
pub use radial_profile::{EdgePolarity, ProfileSample, RadialProfile};
pub use sampler::{sample_radial_profile, RadialSamplingConfig};
pub use smooth::{smooth_intensities, SmoothingConfig};
