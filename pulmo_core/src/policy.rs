//! Generation-gated resistance scaling.
//!
//! Both compromise models narrow the lumen of the most distal generations
//! only, and scale resistance with the inverse square of the remaining area:
//!
//! ```text
//! gated open:  gen > 4 * n_gen / 5        (integer division)
//! area       = (100 - compromise) / 100
//! R_new      = R_old / area²
//! ```
//!
//! A compromise of 100 leaves no lumen. Resistance then saturates at
//! [`OCCLUDED_RESISTANCE`] instead of becoming infinite, and a finite result
//! that overflows is capped at the same value. A non-finite resistance passes
//! through untouched.

use crate::SegmentContext;

/// Resistance of a fully occluded segment
pub const OCCLUDED_RESISTANCE: f64 = f64::MAX;

/// Highest generation left untouched for a tree of `n_gen` generations
pub fn gate_threshold(n_gen: u32) -> u32 {
    // Fits back in u32 since the result never exceeds n_gen
    (u64::from(n_gen) * 4 / 5) as u32
}

/// True if `gen` falls in the distal band the policy perturbs
pub fn is_distal(gen: u32, n_gen: u32) -> bool {
    gen > gate_threshold(n_gen)
}

/// Fraction of lumen area remaining after `compromise` percent is lost
pub fn remaining_area(compromise: f64) -> f64 {
    (100.0 - compromise) / 100.0
}

/// Resistance after losing `compromise` percent of lumen area
///
/// Saturates at [`OCCLUDED_RESISTANCE`] when no area remains or the scaled
/// value overflows. A non-finite `resistance` is returned as is.
pub fn compromised_resistance(resistance: f64, compromise: f64) -> f64 {
    if !resistance.is_finite() {
        return resistance;
    }
    let area = remaining_area(compromise);
    if area <= 0.0 {
        return OCCLUDED_RESISTANCE;
    }
    let scaled = resistance / area / area;
    if scaled.is_infinite() {
        OCCLUDED_RESISTANCE.copysign(scaled)
    } else {
        scaled
    }
}

/// Apply the gated policy to one segment's resistance
///
/// Returns `false` and leaves `resistance` alone for proximal segments, for a
/// non-finite `compromise` and for a non-finite `resistance`.
pub fn scale_distal_resistance(
    compromise: f64,
    ctx: &SegmentContext<'_>,
    resistance: &mut f64,
) -> bool {
    if !compromise.is_finite() || !resistance.is_finite() || !is_distal(ctx.gen, ctx.n_gen) {
        return false;
    }

    *resistance = compromised_resistance(*resistance, compromise);
    true
}
