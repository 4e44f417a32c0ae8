//! CSV export of the weekly 1RM series.
//!
//! Writes the indexed weekly maxima a forecast was fitted on, so the series
//! can be charted or checked elsewhere.

use crate::{Result, WeeklyMaxPoint};
use std::fs::File;
use std::path::Path;

/// A row in the CSV output
#[derive(Debug, serde::Serialize)]
struct CsvRow<'a> {
    week_index: u32,
    week_id: &'a str,
    estimated_1rm: f64,
}

impl<'a> From<&'a WeeklyMaxPoint> for CsvRow<'a> {
    fn from(point: &'a WeeklyMaxPoint) -> Self {
        CsvRow {
            week_index: point.week_index,
            week_id: &point.week_id,
            estimated_1rm: point.estimated_1rm,
        }
    }
}

/// Write weekly maxima to `path`, replacing any existing file
///
/// Returns the number of rows written. The file is synced before returning.
pub fn export_weekly_maxima(points: &[WeeklyMaxPoint], path: &Path) -> Result<usize> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let file = File::create(path)?;
    let mut writer = csv::WriterBuilder::new()
        .has_headers(true)
        .from_writer(file);

    for point in points {
        writer.serialize(CsvRow::from(point))?;
    }

    writer.flush()?;
    let file = writer
        .into_inner()
        .map_err(|e| std::io::Error::other(e.to_string()))?;
    file.sync_all()?;

    tracing::info!("Exported {} weeks to {:?}", points.len(), path);
    Ok(points.len())
}
