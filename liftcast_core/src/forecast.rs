//! PR forecasting: turn a fitted trend and a target into weeks-to-go.
//!
//! ## Policy
//!
//! 1. **Already there**: target at or below the best weekly estimate.
//! 2. **Unreliable**: slope at or below `unreliable_slope` (flat, falling or
//!    too slow). Reports a floor of `ceil(gap / unreliable_slope)` weeks.
//! 3. **Forecast**: solve `target = slope * x + intercept` for `x`, rounded
//!    up and clamped at zero.
//!
//! Every call is a pure function of its inputs.

use crate::trend::{fit_trend, WeekOrder};
use crate::weekly::aggregate_weekly_maxima;
use crate::{Day, ForecastPolicy, PrOutcome, RegressionModel, SetLogEntry, TrendFit};

/// Outcome together with the trend it was derived from
#[derive(Clone, Debug, PartialEq)]
pub struct PrAnalysis {
    pub outcome: PrOutcome,
    /// `None` when the data ran out before a trend could be fitted
    pub trend: Option<TrendFit>,
}

/// Weeks until a fitted trend reaches `target_weight`
///
/// `target_weight` must be positive; callers validate it.
pub fn forecast_weeks(
    model: &RegressionModel,
    current_max_1rm: f64,
    target_weight: f64,
    unreliable_slope: f64,
) -> PrOutcome {
    if target_weight <= current_max_1rm {
        return PrOutcome::AlreadyAchieved;
    }

    if model.slope <= unreliable_slope {
        let floor = ((target_weight - current_max_1rm) / unreliable_slope).ceil();
        return PrOutcome::Unreliable {
            weeks: whole_weeks(floor),
        };
    }

    let predicted = ((target_weight - model.intercept) / model.slope).ceil();
    PrOutcome::Forecast {
        weeks: whole_weeks(predicted),
    }
}

/// Clamp a rounded-up week count into `0..=u32::MAX`
fn whole_weeks(weeks: f64) -> u32 {
    // Float-to-int `as` saturates and maps NaN to 0
    weeks.max(0.0) as u32
}

/// Run the full pipeline for one lift and keep the intermediate trend
pub fn analyze_pr(
    logs: &[SetLogEntry],
    catalog: &[Day],
    exercise_name: &str,
    target_weight: f64,
    policy: &ForecastPolicy,
    order: &WeekOrder,
) -> PrAnalysis {
    let trend = aggregate_weekly_maxima(logs, catalog, exercise_name, policy)
        .and_then(|weekly| fit_trend(&weekly, order, policy.min_weeks));

    match trend {
        Ok(trend) => {
            let outcome = forecast_weeks(
                &trend.model,
                trend.current_max_1rm,
                target_weight,
                policy.unreliable_slope,
            );
            tracing::info!(
                "{} to {} lbs: {} (best estimate {}, {:+.2} lbs/week)",
                exercise_name,
                target_weight,
                outcome,
                trend.current_max_1rm,
                trend.model.slope
            );
            PrAnalysis {
                outcome,
                trend: Some(trend),
            }
        }
        Err(reason) => {
            tracing::info!(
                "{} to {} lbs: not enough data ({})",
                exercise_name,
                target_weight,
                reason
            );
            PrAnalysis {
                outcome: PrOutcome::InsufficientData(reason),
                trend: None,
            }
        }
    }
}

/// Weeks until `exercise_name` reaches a `target_weight` 1RM
///
/// Week ids are ordered per `policy.week_order`; the submitted order has no
/// submission history here and falls back to string order.
pub fn predict_pr_weeks(
    logs: &[SetLogEntry],
    catalog: &[Day],
    exercise_name: &str,
    target_weight: f64,
    policy: &ForecastPolicy,
) -> PrOutcome {
    let order = policy.week_order.resolve(&[]);
    analyze_pr(logs, catalog, exercise_name, target_weight, policy, &order).outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::build_default_catalog;
    use crate::test_support::set;
    use crate::InsufficientData;

    fn model(slope: f64, intercept: f64) -> RegressionModel {
        RegressionModel { slope, intercept }
    }

    #[test]
    fn test_already_achieved_at_or_below_max() {
        assert_eq!(
            forecast_weeks(&model(5.0, 185.0), 195.0, 195.0, 0.5),
            PrOutcome::AlreadyAchieved
        );
        assert_eq!(
            forecast_weeks(&model(-3.0, 185.0), 195.0, 150.0, 0.5),
            PrOutcome::AlreadyAchieved
        );
    }

    #[test]
    fn test_flat_trend_is_unreliable_floor() {
        assert_eq!(
            forecast_weeks(&model(-5.0, 190.0), 185.0, 205.0, 0.5),
            PrOutcome::Unreliable { weeks: 40 }
        );
    }

    #[test]
    fn test_slow_positive_trend_is_still_unreliable() {
        assert_eq!(
            forecast_weeks(&model(0.5, 180.0), 185.0, 205.0, 0.5),
            PrOutcome::Unreliable { weeks: 40 }
        );
        assert_eq!(
            forecast_weeks(&model(0.25, 180.0), 185.0, 186.0, 0.5),
            PrOutcome::Unreliable { weeks: 2 }
        );
    }

    #[test]
    fn test_steady_trend_forecast() {
        assert_eq!(
            forecast_weeks(&model(5.0, 185.0), 195.0, 225.0, 0.5),
            PrOutcome::Forecast { weeks: 8 }
        );
        assert_eq!(
            forecast_weeks(&model(5.0, 185.0), 195.0, 226.0, 0.5),
            PrOutcome::Forecast { weeks: 9 }
        );
    }

    #[test]
    fn test_forecast_clamped_at_zero() {
        // Best week sits well above the fitted line's intercept region
        assert_eq!(
            forecast_weeks(&model(10.0, 300.0), 200.0, 250.0, 0.5),
            PrOutcome::Forecast { weeks: 0 }
        );
    }

    #[test]
    fn test_huge_gap_saturates_week_count() {
        assert_eq!(
            forecast_weeks(&model(0.0, 185.0), 185.0, 1e12, 0.5),
            PrOutcome::Unreliable { weeks: u32::MAX }
        );
        assert_eq!(
            forecast_weeks(&model(1.0, 185.0), 185.0, 1e12, 0.5),
            PrOutcome::Forecast { weeks: u32::MAX }
        );
    }

    #[test]
    fn test_scenario_already_achieved() {
        let logs = vec![
            set("a0", "bench_press", 135.0, 5),
            set("a0", "bench_press", 145.0, 3),
            set("a0", "bench_press", 150.0, 2),
            set("a0", "bench_press", 155.0, 1),
            set("a1", "bench_press", 160.0, 3),
        ];
        let catalog = build_default_catalog();
        let policy = ForecastPolicy::default();

        let analysis = analyze_pr(
            &logs,
            &catalog,
            "Bench Press",
            176.0,
            &policy,
            &WeekOrder::Lexicographic,
        );
        let trend = analysis.trend.unwrap();
        assert_eq!(trend.current_max_1rm, 176.0);
        assert!((trend.model.slope - 16.0).abs() < 1e-9);
        assert_eq!(analysis.outcome, PrOutcome::AlreadyAchieved);

        assert_eq!(
            predict_pr_weeks(&logs, &catalog, "Bench Press", 165.0, &policy),
            PrOutcome::AlreadyAchieved
        );
    }

    #[test]
    fn test_scenario_unreliable() {
        // Weekly maxima 185 then 180: negative slope
        let logs = vec![
            set("a0", "bench_press", 150.0, 7),
            set("a0", "bench_press", 135.0, 5),
            set("a0", "bench_press", 140.0, 5),
            set("a1", "bench_press", 150.0, 6),
            set("a1", "bench_press", 135.0, 6),
        ];
        let outcome = predict_pr_weeks(
            &logs,
            &build_default_catalog(),
            "Bench Press",
            205.0,
            &ForecastPolicy::default(),
        );
        assert_eq!(outcome, PrOutcome::Unreliable { weeks: 40 });
    }

    #[test]
    fn test_scenario_forecast() {
        // Weekly maxima 185, 190, 195
        let logs = vec![
            set("a0", "bench_press", 150.0, 7),
            set("a0", "bench_press", 135.0, 5),
            set("a1", "bench_press", 142.5, 10),
            set("a1", "bench_press", 135.0, 5),
            set("a2", "bench_press", 150.0, 9),
        ];
        let outcome = predict_pr_weeks(
            &logs,
            &build_default_catalog(),
            "Bench Press",
            225.0,
            &ForecastPolicy::default(),
        );
        assert_eq!(outcome, PrOutcome::Forecast { weeks: 8 });
    }

    #[test]
    fn test_too_few_sets_regardless_of_target() {
        let logs = vec![
            set("a0", "bench_press", 135.0, 5),
            set("a1", "bench_press", 145.0, 5),
            set("a2", "bench_press", 155.0, 5),
            set("a3", "bench_press", 165.0, 5),
        ];
        for target in [1.0, 100.0, 500.0] {
            let outcome = predict_pr_weeks(
                &logs,
                &build_default_catalog(),
                "Bench Press",
                target,
                &ForecastPolicy::default(),
            );
            assert_eq!(
                outcome,
                PrOutcome::InsufficientData(InsufficientData::TooFewSets {
                    found: 4,
                    required: 5
                })
            );
        }
    }

    #[test]
    fn test_single_week_is_insufficient() {
        let logs = vec![set("a0", "bench_press", 135.0, 5); 8];
        let analysis = analyze_pr(
            &logs,
            &build_default_catalog(),
            "Bench Press",
            100.0,
            &ForecastPolicy::default(),
            &WeekOrder::Lexicographic,
        );
        assert!(analysis.outcome.is_insufficient());
        assert!(analysis.trend.is_none());
    }

    #[test]
    fn test_identical_inputs_identical_results() {
        let logs = vec![
            set("a0", "bench_press", 185.0, 1),
            set("a1", "bench_press", 190.0, 1),
            set("a2", "bench_press", 195.0, 1),
            set("a2", "bench_press", 135.0, 8),
            set("a3", "bench_press", 200.0, 2),
        ];
        let catalog = build_default_catalog();
        let policy = ForecastPolicy::default();

        let first = predict_pr_weeks(&logs, &catalog, "Bench Press", 250.0, &policy);
        for _ in 0..5 {
            assert_eq!(
                predict_pr_weeks(&logs, &catalog, "Bench Press", 250.0, &policy),
                first
            );
        }
    }

    #[test]
    fn test_custom_threshold_changes_policy() {
        let policy = ForecastPolicy {
            unreliable_slope: 10.0,
            ..ForecastPolicy::default()
        };
        let logs = vec![
            set("a0", "bench_press", 150.0, 7),
            set("a0", "bench_press", 135.0, 5),
            set("a1", "bench_press", 142.5, 10),
            set("a1", "bench_press", 135.0, 5),
            set("a2", "bench_press", 150.0, 9),
        ];
        let outcome =
            predict_pr_weeks(&logs, &build_default_catalog(), "Bench Press", 225.0, &policy);
        // gap of 30 at an assumed 10 lbs/week
        assert_eq!(outcome, PrOutcome::Unreliable { weeks: 3 });
    }
}
