//! Color intensity mapping
//!
//! Maps raw cell values to a normalized [0, 1] intensity relative to the
//! maximum observed value. Banding into discrete color steps is a
//! presentation concern; the helper here only guarantees monotonicity and
//! that a value of 0 always lands in the lowest band.

/// Normalized intensity of `value` against `max_value`.
///
/// Defined as 0 when either side is 0, so there is no division by zero
/// and empty days never light up. Clamped to 1 for values above the max.
pub fn intensity(value: f64, max_value: f64) -> f64 {
    if value <= 0.0 || max_value <= 0.0 {
        return 0.0;
    }
    (value / max_value).min(1.0)
}

/// Bucket an intensity into one of `steps` discrete bands (0-based).
///
/// Intensity 0 maps to band 0; intensity 1 maps to the highest band.
pub fn band(intensity_value: f64, steps: u32) -> u32 {
    if steps == 0 {
        return 0;
    }
    let clamped = intensity_value.clamp(0.0, 1.0);
    let idx = (clamped * (steps - 1) as f64).ceil() as u32;
    idx.min(steps - 1)
}
