#![forbid(unsafe_code)]

//! Core domain model and forecasting logic for Liftcast.
//!
//! This crate provides:
//! - Domain types (logged sets, split catalog, forecast outcomes)
//! - Rep-max estimation, weekly aggregation, trend fitting, forecasting
//! - Read-only snapshot loading (JSON export, JSONL set log)
//! - Configuration, logging setup, CSV export

pub mod types;
pub mod error;
pub mod catalog;
pub mod config;
pub mod logging;
pub mod estimate;
pub mod weekly;
pub mod trend;
pub mod forecast;
pub mod set_log;
pub mod snapshot;
pub mod export;

// Re-export commonly used types
pub use error::{Error, Result};
pub use types::*;
pub use catalog::{build_default_catalog, get_default_catalog};
pub use config::{Config, ForecastPolicy, WeekOrderPolicy};
pub use estimate::estimate_one_rep_max;
pub use weekly::{aggregate_weekly_maxima, WeeklyMaxima};
pub use trend::{fit_trend, WeekOrder};
pub use forecast::{analyze_pr, forecast_weeks, predict_pr_weeks, PrAnalysis};
pub use snapshot::TrainingSnapshot;
pub use export::export_weekly_maxima;
