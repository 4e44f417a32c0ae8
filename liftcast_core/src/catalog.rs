//! Exercise catalog: the default split and name resolution.
//!
//! The catalog is read-only here. It is only consulted to find which
//! exercise ids belong to a lift name.

use crate::types::{Day, Exercise};
use once_cell::sync::Lazy;
use std::collections::HashSet;

/// Cached default split - built once and reused across all operations
static DEFAULT_CATALOG: Lazy<Vec<Day>> = Lazy::new(build_default_catalog);

/// Get a reference to the cached default split
pub fn get_default_catalog() -> &'static [Day] {
    &DEFAULT_CATALOG
}

/// Builds the default Push/Pull/Legs split
pub fn build_default_catalog() -> Vec<Day> {
    fn day(id: &str, name: &str, exercises: &[(&str, &str)]) -> Day {
        Day {
            id: id.into(),
            name: name.into(),
            exercises: exercises
                .iter()
                .map(|(id, name)| Exercise {
                    id: (*id).into(),
                    name: (*name).into(),
                })
                .collect(),
        }
    }

    vec![
        day(
            "push",
            "Push",
            &[
                ("bench_press", "Bench Press"),
                ("incline_db_press", "Incline DB Press"),
            ],
        ),
        day(
            "pull",
            "Pull",
            &[
                ("barbell_row", "Barbell Row"),
                ("lat_pulldown", "Lat Pulldown"),
            ],
        ),
        day(
            "legs",
            "Legs",
            &[("back_squat", "Back Squat"), ("rdl", "Romanian Deadlift")],
        ),
    ]
}

/// Ids of every exercise whose name matches `name`, ignoring case
///
/// The same lift may appear on several days under different ids; all of
/// them are returned.
pub fn exercise_ids_named<'a>(catalog: &'a [Day], name: &str) -> HashSet<&'a str> {
    let wanted = name.to_lowercase();
    catalog
        .iter()
        .flat_map(|day| day.exercises.iter())
        .filter(|exercise| exercise.name.to_lowercase() == wanted)
        .map(|exercise| exercise.id.as_str())
        .collect()
}

/// Check the catalog for structural problems
///
/// Returns a list of human-readable problems; empty means valid.
pub fn validate(catalog: &[Day]) -> Vec<String> {
    let mut errors = Vec::new();
    let mut day_ids = HashSet::new();
    let mut exercise_ids = HashSet::new();

    for day in catalog {
        if day.id.is_empty() {
            errors.push(format!("Day '{}' has empty ID", day.name));
        } else if !day_ids.insert(day.id.as_str()) {
            errors.push(format!("Duplicate day ID '{}'", day.id));
        }
        if day.name.trim().is_empty() {
            errors.push(format!("Day '{}' has empty name", day.id));
        }

        for exercise in &day.exercises {
            if exercise.id.is_empty() {
                errors.push(format!(
                    "Exercise '{}' in day '{}' has empty ID",
                    exercise.name, day.id
                ));
            } else if !exercise_ids.insert(exercise.id.as_str()) {
                errors.push(format!("Duplicate exercise ID '{}'", exercise.id));
            }
            if exercise.name.trim().is_empty() {
                errors.push(format!("Exercise '{}' has empty name", exercise.id));
            }
        }
    }

    errors
}
