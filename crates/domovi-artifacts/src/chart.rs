//! The availability chart: one entry per calendar day.
//!
//! Entries are held in a map keyed by the `YYYY-MM-DD` date string and only
//! flattened into a sorted array when saved. Lexicographic order on that
//! format is chronological order.

use std::collections::BTreeMap;
use std::path::Path;

use chrono::NaiveDate;
use domovi_core::ChartEntry;
use serde_json::{Number, Value};

use crate::artifact::{read_json, split_artifact, write_json};
use crate::error::ArtifactError;

const FREE_SPOTS_POINTER: &str = "/data/grandTotals/allApplications/freeSpots";
const ACTIVE_POINTER: &str = "/data/grandTotals/allApplications/active";

/// What [`ChartStore::upsert`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Upsert {
    Inserted,
    Replaced,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChartStore {
    entries: BTreeMap<String, ChartEntry>,
}

impl ChartStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from entries in file order. A later entry for a date
    /// replaces an earlier one.
    pub fn from_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = ChartEntry>,
    {
        let mut store = Self::new();
        for entry in entries {
            store.upsert(entry);
        }
        store
    }

    /// Load the chart file. A missing file is an empty chart.
    ///
    /// # Errors
    ///
    /// Returns [`ArtifactError::Io`] if the file exists but cannot be read,
    /// or [`ArtifactError::Json`] if it is not an array of chart entries.
    pub fn load(path: &Path) -> Result<Self, ArtifactError> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no chart file yet; starting empty");
            return Ok(Self::new());
        }
        let entries: Vec<ChartEntry> = read_json(path)?;
        Ok(Self::from_entries(entries))
    }

    /// Insert `entry`, replacing any existing entry for the same date.
    pub fn upsert(&mut self, entry: ChartEntry) -> Upsert {
        match self.entries.insert(entry.date.clone(), entry) {
            Some(_) => Upsert::Replaced,
            None => Upsert::Inserted,
        }
    }

    #[must_use]
    pub fn get(&self, date: &str) -> Option<&ChartEntry> {
        self.entries.get(date)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries sorted ascending by date.
    #[must_use]
    pub fn to_vec(&self) -> Vec<ChartEntry> {
        self.entries.values().cloned().collect()
    }

    /// Write the chart as a sorted JSON array, replacing the file.
    ///
    /// # Errors
    ///
    /// Returns [`ArtifactError`] if the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<(), ArtifactError> {
        write_json(path, &self.to_vec())
    }
}

/// Derive the chart point for `date` from an availability extraction.
///
/// Reads `data.grandTotals.allApplications.freeSpots` and `.active` and
/// copies both numbers through as given.
///
/// # Errors
///
/// Returns [`ArtifactError::MissingField`] if either value is absent or not
/// a JSON number.
pub fn chart_entry_from_extraction(date: &str, extracted: &Value) -> Result<ChartEntry, ArtifactError> {
    Ok(ChartEntry {
        date: date.to_owned(),
        free_spots: Some(number_at(extracted, FREE_SPOTS_POINTER)?),
        active_applications: Some(number_at(extracted, ACTIVE_POINTER)?),
    })
}

fn number_at(value: &Value, pointer: &str) -> Result<Number, ArtifactError> {
    match value.pointer(pointer) {
        Some(Value::Number(n)) => Ok(n.clone()),
        _ => Err(ArtifactError::MissingField {
            path: pointer.trim_start_matches('/').replace('/', "."),
        }),
    }
}

/// Outcome of [`rebuild_from_artifacts`].
#[derive(Debug, Default)]
pub struct RebuildReport {
    pub store: ChartStore,
    /// Dated artifact files that could not produce a chart entry.
    pub skipped: Vec<String>,
}

/// Re-derive the chart from every `YYYY-MM-DD.json` artifact in `data_dir`.
///
/// Files whose stem is not a valid date are ignored. Dated files that cannot
/// be read or lack the grand totals are reported in
/// [`RebuildReport::skipped`].
///
/// # Errors
///
/// Returns [`ArtifactError::Io`] if the directory cannot be listed.
pub fn rebuild_from_artifacts(data_dir: &Path) -> Result<RebuildReport, ArtifactError> {
    let io_err = |e| ArtifactError::Io {
        path: data_dir.display().to_string(),
        source: e,
    };

    let mut report = RebuildReport::default();

    for dir_entry in std::fs::read_dir(data_dir).map_err(io_err)? {
        let path = dir_entry.map_err(io_err)?.path();
        if path.extension().and_then(|e| e.to_str()) != Some("json") {
            continue;
        }
        let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
            continue;
        };
        let Ok(date) = NaiveDate::parse_from_str(stem, "%Y-%m-%d") else {
            continue;
        };
        // Only canonical names: `2026-3-1.json` parses but is not ours.
        let date = crate::artifact::format_date(date);
        if date != stem {
            continue;
        }

        let derived = read_json::<Value>(&path).and_then(|artifact| {
            let (data, _) = split_artifact(artifact);
            chart_entry_from_extraction(&date, &data)
        });

        match derived {
            Ok(entry) => {
                report.store.upsert(entry);
            }
            Err(e) => {
                tracing::warn!(file = %path.display(), error = %e, "skipping artifact");
                report.skipped.push(path.display().to_string());
            }
        }
    }

    report.skipped.sort();
    Ok(report)
}

#[cfg(test)]
#[path = "chart_test.rs"]
mod tests;
