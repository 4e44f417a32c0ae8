//! Training snapshots: the inputs of one forecast, loaded from disk.
//!
//! A snapshot is either a single JSON export (`{split, logs, weeks}`) or a
//! data directory holding:
//! - `catalog.json`: the split (default split if absent)
//! - `sets.jsonl`: the set log (empty if absent)
//! - `weeks.json`: submitted weeks (empty if absent)
//!
//! Loading never writes anything.

use crate::catalog::get_default_catalog;
use crate::forecast::{analyze_pr, PrAnalysis};
use crate::set_log::read_set_log;
use crate::trend::fit_trend;
use crate::weekly::aggregate_weekly_maxima;
use crate::{
    Day, Error, ForecastPolicy, InsufficientData, Result, SetLogEntry, SubmittedWeek, TrendFit,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const CATALOG_FILE: &str = "catalog.json";
pub const SETS_FILE: &str = "sets.jsonl";
pub const WEEKS_FILE: &str = "weeks.json";

/// One internally consistent view of the training data
///
/// When deserialized, a missing `split` key means the default split. An
/// explicit empty split stays empty.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(from = "SnapshotFile")]
pub struct TrainingSnapshot {
    pub split: Vec<Day>,
    pub logs: Vec<SetLogEntry>,
    pub weeks: Vec<SubmittedWeek>,
}

/// On-disk shape of a snapshot export
#[derive(Deserialize)]
struct SnapshotFile {
    split: Option<Vec<Day>>,
    #[serde(default)]
    logs: Vec<SetLogEntry>,
    #[serde(default)]
    weeks: Vec<SubmittedWeek>,
}

impl From<SnapshotFile> for TrainingSnapshot {
    fn from(file: SnapshotFile) -> Self {
        let split = file.split.unwrap_or_else(|| {
            tracing::info!("Snapshot has no split, using default catalog");
            get_default_catalog().to_vec()
        });
        Self {
            split,
            logs: file.logs,
            weeks: file.weeks,
        }
    }
}

impl TrainingSnapshot {
    /// Load a single-file JSON export
    pub fn load_from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::Snapshot(format!(
                "snapshot file {} does not exist",
                path.display()
            )));
        }

        let contents = std::fs::read_to_string(path)?;
        let snapshot: TrainingSnapshot = serde_json::from_str(&contents)?;

        tracing::info!(
            "Loaded snapshot from {:?}: {} sets, {} submitted weeks",
            path,
            snapshot.logs.len(),
            snapshot.weeks.len()
        );
        Ok(snapshot)
    }

    /// Load from a data directory
    pub fn load_from_dir(dir: &Path) -> Result<Self> {
        let split = load_catalog(&dir.join(CATALOG_FILE))?;
        let logs = read_set_log(&dir.join(SETS_FILE))?;
        let weeks = load_submitted_weeks(&dir.join(WEEKS_FILE));

        tracing::info!(
            "Loaded data from {:?}: {} sets, {} submitted weeks",
            dir,
            logs.len(),
            weeks.len()
        );
        Ok(Self { split, logs, weeks })
    }

    /// Forecast weeks to `target_weight` for `exercise`
    ///
    /// A `submitted` week order uses this snapshot's week history.
    pub fn analyze(
        &self,
        exercise: &str,
        target_weight: f64,
        policy: &ForecastPolicy,
    ) -> PrAnalysis {
        let order = policy.week_order.resolve(&self.weeks);
        analyze_pr(
            &self.logs,
            &self.split,
            exercise,
            target_weight,
            policy,
            &order,
        )
    }

    /// Weekly maxima and fitted trend for `exercise`, without a target
    pub fn trend(
        &self,
        exercise: &str,
        policy: &ForecastPolicy,
    ) -> std::result::Result<TrendFit, InsufficientData> {
        let order = policy.week_order.resolve(&self.weeks);
        aggregate_weekly_maxima(&self.logs, &self.split, exercise, policy)
            .and_then(|weekly| fit_trend(&weekly, &order, policy.min_weeks))
    }
}

fn load_catalog(path: &Path) -> Result<Vec<Day>> {
    if !path.exists() {
        tracing::debug!("No catalog at {:?}, using default split", path);
        return Ok(get_default_catalog().to_vec());
    }

    let contents = std::fs::read_to_string(path)?;
    let split: Vec<Day> = serde_json::from_str(&contents)?;
    tracing::debug!("Loaded {} days from {:?}", split.len(), path);
    Ok(split)
}

/// Submitted weeks only refine ordering, so an unreadable file is ignored
fn load_submitted_weeks(path: &Path) -> Vec<SubmittedWeek> {
    if !path.exists() {
        return Vec::new();
    }

    let contents = match std::fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) => {
            tracing::warn!("Failed to read weeks at {:?}: {}. Ignoring.", path, e);
            return Vec::new();
        }
    };

    match serde_json::from_str(&contents) {
        Ok(weeks) => weeks,
        Err(e) => {
            tracing::warn!("Failed to parse weeks at {:?}: {}. Ignoring.", path, e);
            Vec::new()
        }
    }
}
