//! Frame clock helpers
//!
//! Damping and smoothing factors are tuned per frame at a 60 Hz reference
//! cadence. These helpers rescale them to the actual frame delta.

use crate::tunables::ClockTunables;

/// Cadence the per-frame factors were tuned at
pub const REFERENCE_HZ: f32 = 60.0;

/// Fraction of a quantity kept after `dt` seconds, given the fraction kept
/// per reference frame
#[inline]
pub fn per_frame_decay(factor: f32, dt: f32) -> f32 {
    factor.powf(dt * REFERENCE_HZ)
}

/// Fraction of the remaining distance covered after `dt` seconds, given the
/// fraction covered per reference frame
#[inline]
pub fn per_frame_ease(fraction: f32, dt: f32) -> f32 {
    1.0 - (1.0 - fraction).powf(dt * REFERENCE_HZ)
}

/// Accept a wall-clock frame delta, or substitute the fallback when the
/// delta is non-positive, non-finite or longer than a camera stall allows
pub fn sanitize_dt(raw: f32, clock: &ClockTunables) -> f32 {
    if raw.is_finite() && raw > 0.0 && raw <= clock.max_dt {
        raw
    } else {
        log::trace!("Frame delta {} rejected, using {}", raw, clock.fallback_dt);
        clock.fallback_dt
    }
}
