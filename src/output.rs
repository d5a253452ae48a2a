//! Output formatting and persistence for the computed aggregates.
//!
//! Writes the three two-column CSVs, the plain-text summary, and an optional
//! pretty-JSON dump of the summary to the log.

use anyhow::{Context, Result};
use serde::Serialize;
use std::fmt::Write as _;
use std::fs;
use std::path::Path;
use tracing::{debug, info};

use crate::analyzers::types::{AgeDistribution, CrimeSummary, HourlyCounts, NightAreaCounts};

pub const HOURLY_CSV: &str = "hourly_crime_counts.csv";
pub const NIGHT_AREA_CSV: &str = "night_crime_by_area.csv";
pub const AGE_GROUPS_CSV: &str = "victim_age_groups.csv";
pub const SUMMARY_TXT: &str = "summary.txt";

#[derive(Serialize)]
struct HourRow {
    hour: u32,
    count: u64,
}

#[derive(Serialize)]
struct AreaRow<'a> {
    area: &'a str,
    count: u64,
}

#[derive(Serialize)]
struct AgeGroupRow {
    age_group: &'static str,
    count: u64,
}

fn write_rows<S: Serialize>(path: &Path, rows: impl IntoIterator<Item = S>) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("failed to create {}", path.display()))?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    debug!(path = %path.display(), "CSV written");
    Ok(())
}

/// Writes `hourly_crime_counts.csv`: 24 rows in ascending hour order.
pub fn write_hourly_csv(output_dir: &Path, hourly: &HourlyCounts) -> Result<()> {
    let rows = hourly
        .counts
        .iter()
        .enumerate()
        .map(|(hour, &count)| HourRow {
            hour: hour as u32,
            count,
        });
    write_rows(&output_dir.join(HOURLY_CSV), rows)
}

/// Writes `night_crime_by_area.csv` in descending count order.
pub fn write_night_area_csv(output_dir: &Path, night: &NightAreaCounts) -> Result<()> {
    let rows = night.counts.iter().map(|(area, count)| AreaRow {
        area: area.as_str(),
        count: *count,
    });
    write_rows(&output_dir.join(NIGHT_AREA_CSV), rows)
}

/// Writes `victim_age_groups.csv`: the 7 canonical brackets in order.
pub fn write_age_groups_csv(output_dir: &Path, ages: &AgeDistribution) -> Result<()> {
    let rows = ages.iter().map(|(bracket, count)| AgeGroupRow {
        age_group: bracket.label(),
        count,
    });
    write_rows(&output_dir.join(AGE_GROUPS_CSV), rows)
}

/// Renders the human-readable summary text.
pub fn format_summary(summary: &CrimeSummary) -> String {
    let mut text = String::new();
    text.push_str("Los Angeles Crime Analysis Summary\n");
    text.push_str("----------------------------------\n\n");
    let _ = writeln!(text, "Peak crime hour: {}", summary.peak_hour);
    let _ = writeln!(
        text,
        "Peak night-crime location: {}",
        summary.peak_night_area.as_deref().unwrap_or("(none)")
    );
    text.push_str("\nVictim age distribution:\n");
    for group in &summary.age_groups {
        let _ = writeln!(text, "  {}: {}", group.age_group, group.count);
    }
    text
}

/// Writes `summary.txt`.
pub fn write_summary(output_dir: &Path, summary: &CrimeSummary) -> Result<()> {
    let path = output_dir.join(SUMMARY_TXT);
    fs::write(&path, format_summary(summary))
        .with_context(|| format!("failed to write {}", path.display()))?;
    debug!(path = %path.display(), "Summary written");
    Ok(())
}

/// Logs the summary as pretty-printed JSON.
pub fn print_json(summary: &CrimeSummary) -> Result<()> {
    info!("{}", serde_json::to_string_pretty(summary)?);
    Ok(())
}
