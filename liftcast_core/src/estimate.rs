//! Rep-max estimation from submaximal sets.
//!
//! Uses the Epley model `1RM = weight * (1 + reps / 30)`, rounded to the
//! nearest whole unit. Sets above the rep ceiling drift too far from a
//! linear max-strength model and are reported as unusable (0).

/// Highest rep count considered usable by default
pub const EPLEY_MAX_REPS: u32 = 12;

/// Estimate a one-rep max using the default rep ceiling
///
/// Returns 0 when `reps` is 0 or above [`EPLEY_MAX_REPS`].
pub fn estimate_one_rep_max(weight: f64, reps: u32) -> f64 {
    estimate_one_rep_max_capped(weight, reps, EPLEY_MAX_REPS)
}

/// Estimate a one-rep max, treating sets above `max_reps` as unusable
pub fn estimate_one_rep_max_capped(weight: f64, reps: u32, max_reps: u32) -> f64 {
    if reps == 0 || reps > max_reps {
        return 0.0;
    }

    (weight * (1.0 + f64::from(reps) / 30.0)).round()
}
