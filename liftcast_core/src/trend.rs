//! Linear trend fitting over weekly maxima.
//!
//! Week ids are placed on an integer axis `0..k-1` and an ordinary
//! least-squares line is fitted through `(week_index, max 1RM)`.

use crate::weekly::WeeklyMaxima;
use crate::{InsufficientData, RegressionModel, SubmittedWeek, TrendFit, WeeklyMaxPoint};
use std::collections::HashMap;

/// How distinct week ids are ordered before indexing
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub enum WeekOrder {
    /// Plain string order. Chronological only while every id has the same
    /// width.
    #[default]
    Lexicographic,
    /// Shorter ids first, then string order. Chronological for unpadded
    /// numeric tokens such as base-36 timestamps.
    Shortlex,
    /// Ids in the given sequence first; unlisted ids follow in string order.
    Explicit(Vec<String>),
}

impl WeekOrder {
    /// Explicit order taken from the submission history
    pub fn from_submitted(weeks: &[SubmittedWeek]) -> Self {
        Self::Explicit(weeks.iter().map(|w| w.id.clone()).collect())
    }

    /// Sort week ids into axis order
    pub fn sort(&self, ids: &mut [&str]) {
        match self {
            Self::Lexicographic => ids.sort_unstable(),
            Self::Shortlex => ids.sort_unstable_by(|a, b| a.len().cmp(&b.len()).then(a.cmp(b))),
            Self::Explicit(sequence) => {
                let mut position = HashMap::new();
                for (idx, id) in sequence.iter().enumerate() {
                    position.entry(id.as_str()).or_insert(idx);
                }
                ids.sort_unstable_by_key(|id| {
                    (position.get(id).copied().unwrap_or(usize::MAX), *id)
                });
            }
        }
    }
}

/// Fit a line through the weekly maxima
///
/// Fails when fewer than `min_weeks` weeks (never fewer than 2) are present.
pub fn fit_trend(
    weekly: &WeeklyMaxima,
    order: &WeekOrder,
    min_weeks: usize,
) -> Result<TrendFit, InsufficientData> {
    let required = min_weeks.max(2);

    let mut week_ids: Vec<&str> = weekly
        .iter()
        .filter(|(_, max)| **max > 0.0)
        .map(|(id, _)| id.as_str())
        .collect();

    if week_ids.len() < required {
        return Err(InsufficientData::TooFewWeeks {
            found: week_ids.len(),
            required,
        });
    }

    order.sort(&mut week_ids);

    let points: Vec<WeeklyMaxPoint> = week_ids
        .into_iter()
        .enumerate()
        .map(|(idx, id)| WeeklyMaxPoint {
            week_index: idx as u32,
            week_id: id.to_string(),
            estimated_1rm: weekly[id],
        })
        .collect();

    let model = least_squares(&points);
    let current_max_1rm = points
        .iter()
        .map(|p| p.estimated_1rm)
        .fold(f64::MIN, f64::max);
    let r_squared = coefficient_of_determination(&points, &model);

    tracing::debug!(
        "Fitted {} weeks: slope {:.3}/week, intercept {:.2}, best {}",
        points.len(),
        model.slope,
        model.intercept,
        current_max_1rm
    );

    Ok(TrendFit {
        model,
        current_max_1rm,
        r_squared,
        points,
    })
}

/// Ordinary least squares over at least two points with distinct x
fn least_squares(points: &[WeeklyMaxPoint]) -> RegressionModel {
    let n = points.len() as f64;
    let (mut sum_x, mut sum_y, mut sum_xx, mut sum_xy) = (0.0, 0.0, 0.0, 0.0);
    for p in points {
        let x = f64::from(p.week_index);
        let y = p.estimated_1rm;
        sum_x += x;
        sum_y += y;
        sum_xx += x * x;
        sum_xy += x * y;
    }

    let slope = (n * sum_xy - sum_x * sum_y) / (n * sum_xx - sum_x * sum_x);
    let intercept = (sum_y - slope * sum_x) / n;

    RegressionModel { slope, intercept }
}

fn coefficient_of_determination(
    points: &[WeeklyMaxPoint],
    model: &RegressionModel,
) -> Option<f64> {
    let mean = points.iter().map(|p| p.estimated_1rm).sum::<f64>() / points.len() as f64;
    let ss_tot: f64 = points
        .iter()
        .map(|p| (p.estimated_1rm - mean).powi(2))
        .sum();
    if ss_tot == 0.0 {
        return None;
    }

    let ss_res: f64 = points
        .iter()
        .map(|p| (p.estimated_1rm - model.predict(f64::from(p.week_index))).powi(2))
        .sum();
    Some(1.0 - ss_res / ss_tot)
}
