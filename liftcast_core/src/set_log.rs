//! Reader for the JSONL set log.
//!
//! The data-entry app appends one JSON object per logged set. Reads take a
//! shared lock so a concurrent appender cannot hand us a half-written line.

use crate::{Result, SetLogEntry};
use fs2::FileExt;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Read all sets from a JSONL log
///
/// A missing file is an empty log. Lines that fail to parse are skipped
/// with a warning.
pub fn read_set_log(path: &Path) -> Result<Vec<SetLogEntry>> {
    if !path.exists() {
        tracing::debug!("No set log found at {:?}", path);
        return Ok(Vec::new());
    }

    let file = File::open(path)?;
    file.lock_shared()?;

    let reader = BufReader::new(&file);
    let mut entries = Vec::new();

    for (line_num, line_result) in reader.lines().enumerate() {
        let line = match line_result {
            Ok(line) => line,
            Err(e) => {
                let _ = file.unlock();
                return Err(e.into());
            }
        };
        if line.trim().is_empty() {
            continue;
        }

        match serde_json::from_str::<SetLogEntry>(&line) {
            Ok(entry) => entries.push(entry),
            Err(e) => {
                tracing::warn!("Skipping set at line {}: {}", line_num + 1, e);
            }
        }
    }

    file.unlock()?;
    tracing::debug!("Read {} sets from {:?}", entries.len(), path);
    Ok(entries)
}
