//! Core domain types for the PR forecasting engine.
//!
//! This module defines:
//! - Logged sets and the exercise catalog (inputs)
//! - Weekly maxima and the fitted trend (intermediate values)
//! - The forecast outcome (output)
//!
//! Input records use camelCase field names so snapshots exported by the
//! data-entry app load without translation.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Input Types
// ============================================================================

/// A single logged working set
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SetLogEntry {
    pub id: String,
    pub week_id: String,
    pub date: NaiveDate,
    pub day_id: String,
    pub exercise_id: String,
    pub reps: u32,
    /// Load in pounds
    pub weight: f64,
}

/// An exercise within a training day
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Exercise {
    pub id: String,
    pub name: String,
}

/// A training day (e.g. "Push") and its exercises, in display order
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Day {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub exercises: Vec<Exercise>,
}

/// A training week that was closed out by the data-entry app
///
/// The order of a list of submitted weeks is their creation order.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SubmittedWeek {
    pub id: String,
    pub submitted_at: DateTime<Utc>,
}

// ============================================================================
// Derived Types
// ============================================================================

/// Best estimated 1RM of one training week, positioned on the week axis
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct WeeklyMaxPoint {
    pub week_index: u32,
    pub week_id: String,
    pub estimated_1rm: f64,
}

/// Ordinary least-squares line: 1RM = slope * week_index + intercept
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RegressionModel {
    /// 1RM change per week
    pub slope: f64,
    pub intercept: f64,
}

impl RegressionModel {
    /// Evaluate the line at a week index
    pub fn predict(&self, week_index: f64) -> f64 {
        self.slope * week_index + self.intercept
    }
}

/// Result of fitting the weekly series
#[derive(Clone, Debug, PartialEq)]
pub struct TrendFit {
    pub model: RegressionModel,
    /// Highest weekly maximum in the series
    pub current_max_1rm: f64,
    /// Coefficient of determination; `None` when every week has the same max
    pub r_squared: Option<f64>,
    pub points: Vec<WeeklyMaxPoint>,
}

// ============================================================================
// Outcome Types
// ============================================================================

/// Why a forecast could not be produced
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InsufficientData {
    /// No catalog exercise carries the requested name
    UnknownExercise(String),
    /// Too few logged sets for the exercise
    TooFewSets { found: usize, required: usize },
    /// Too few distinct weeks with a usable estimate
    TooFewWeeks { found: usize, required: usize },
}

impl fmt::Display for InsufficientData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownExercise(name) => write!(f, "no exercise named '{}'", name),
            Self::TooFewSets { found, required } => {
                write!(f, "{} sets logged, {} required", found, required)
            }
            Self::TooFewWeeks { found, required } => {
                write!(f, "{} weeks with usable sets, {} required", found, required)
            }
        }
    }
}

/// What the forecaster tells the lifter
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PrOutcome {
    InsufficientData(InsufficientData),
    /// Best estimate is already at or above the target
    AlreadyAchieved,
    /// Trend too flat to extrapolate; `weeks` is a floor, not a projection
    ///
    /// Saturates at `u32::MAX` for gaps too large to count.
    Unreliable { weeks: u32 },
    /// Weeks until the fitted line reaches the target, saturating at
    /// `u32::MAX`
    Forecast { weeks: u32 },
}

impl PrOutcome {
    /// Week count carried by the outcome (0 when already achieved)
    pub fn weeks(&self) -> Option<u32> {
        match self {
            Self::InsufficientData(_) => None,
            Self::AlreadyAchieved => Some(0),
            Self::Unreliable { weeks } | Self::Forecast { weeks } => Some(*weeks),
        }
    }

    pub fn is_insufficient(&self) -> bool {
        matches!(self, Self::InsufficientData(_))
    }
}

impl fmt::Display for PrOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InsufficientData(_) => write!(f, "Not enough data"),
            Self::AlreadyAchieved => write!(f, "Already achieved"),
            Self::Unreliable { weeks } => write!(f, "> {} weeks (unreliable)", weeks),
            Self::Forecast { weeks } => write!(f, "{} weeks", weeks),
        }
    }
}
