//! CSV loader for crime-incident exports.
//!
//! Reads the LAPD-style incident export into memory. The occurrence-time
//! column is kept as literal text so leading zeros survive ("0130" must not
//! become "130").

use anyhow::{Context, Result};
use serde::{Deserialize, Deserializer};
use std::path::Path;
use tracing::debug;

/// One row of the incident export. Columns not listed here are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct Incident {
    /// Occurrence time as fixed-width "HHMM" text.
    #[serde(rename = "TIME OCC")]
    pub time_occ: String,

    #[serde(rename = "AREA NAME")]
    pub area_name: String,

    /// Victim age. Blank and non-numeric cells become `None`.
    #[serde(rename = "Vict Age", deserialize_with = "lenient_age")]
    pub victim_age: Option<i32>,
}

/// Ages arrive as free text in some exports; anything that does not parse as
/// an integer is treated as missing rather than failing the whole load.
fn lenient_age<'de, D>(deserializer: D) -> Result<Option<i32>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.and_then(|s| s.trim().parse().ok()))
}

/// Loads every incident row from a delimited file with a header row.
///
/// # Errors
///
/// Returns an error if the file cannot be opened or any row fails to
/// deserialize (e.g. a required column is missing).
pub fn load_incidents(path: &Path) -> Result<Vec<Incident>> {
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("failed to open incident file {}", path.display()))?;

    let mut incidents = Vec::new();
    for row in reader.deserialize() {
        let incident: Incident =
            row.with_context(|| format!("malformed row in {}", path.display()))?;
        incidents.push(incident);
    }

    debug!(count = incidents.len(), path = %path.display(), "Incident file loaded");
    Ok(incidents)
}
