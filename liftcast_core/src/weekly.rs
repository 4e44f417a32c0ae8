//! Weekly aggregation of logged sets.
//!
//! Filters the log down to one lift, estimates a 1RM for every usable set,
//! and keeps the best estimate per training week.

use crate::catalog::exercise_ids_named;
use crate::estimate::estimate_one_rep_max_capped;
use crate::{Day, ForecastPolicy, InsufficientData, SetLogEntry};
use std::collections::BTreeMap;

/// Best estimated 1RM keyed by week id
pub type WeeklyMaxima = BTreeMap<String, f64>;

/// Reduce the log to one maximum 1RM estimate per week for a lift
///
/// Fails with [`InsufficientData`] when the lift is not in the catalog or
/// fewer than `policy.min_qualifying_sets` sets were logged for it. The
/// set count is taken before unusable (out of rep range) sets are dropped.
/// The result may still hold fewer weeks than a trend needs.
pub fn aggregate_weekly_maxima(
    logs: &[SetLogEntry],
    catalog: &[Day],
    exercise_name: &str,
    policy: &ForecastPolicy,
) -> Result<WeeklyMaxima, InsufficientData> {
    let exercise_ids = exercise_ids_named(catalog, exercise_name);
    if exercise_ids.is_empty() {
        tracing::debug!("No catalog exercise named '{}'", exercise_name);
        return Err(InsufficientData::UnknownExercise(exercise_name.to_string()));
    }

    let qualifying: Vec<&SetLogEntry> = logs
        .iter()
        .filter(|entry| exercise_ids.contains(entry.exercise_id.as_str()))
        .collect();

    if qualifying.len() < policy.min_qualifying_sets {
        tracing::debug!(
            "Only {} sets logged for '{}' (need {})",
            qualifying.len(),
            exercise_name,
            policy.min_qualifying_sets
        );
        return Err(InsufficientData::TooFewSets {
            found: qualifying.len(),
            required: policy.min_qualifying_sets,
        });
    }

    let mut weekly = WeeklyMaxima::new();
    let mut skipped = 0;
    for entry in qualifying {
        let estimate = estimate_one_rep_max_capped(entry.weight, entry.reps, policy.max_reps);
        if estimate <= 0.0 {
            skipped += 1;
            continue;
        }

        let best = weekly.entry(entry.week_id.clone()).or_insert(estimate);
        if estimate > *best {
            *best = estimate;
        }
    }

    tracing::debug!(
        "Aggregated '{}' into {} weeks ({} sets outside 1-{} reps skipped)",
        exercise_name,
        weekly.len(),
        skipped,
        policy.max_reps
    );

    Ok(weekly)
}
