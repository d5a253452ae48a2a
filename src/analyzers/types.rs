//! Data types produced by the aggregation pipeline.

use serde::Serialize;

use crate::features::AgeBracket;

/// Crime counts per hour of day, dense over all 24 hours.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HourlyCounts {
    pub counts: [u64; 24],
}

impl HourlyCounts {
    /// Hour with the highest count. Ties break to the lowest hour.
    pub fn peak_hour(&self) -> u32 {
        let mut peak = 0usize;
        for (hour, &count) in self.counts.iter().enumerate() {
            if count > self.counts[peak] {
                peak = hour;
            }
        }
        peak as u32
    }

    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }
}

/// Per-area crime counts over the night window, sorted descending by count
/// with ascending area-name tie-break.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NightAreaCounts {
    pub counts: Vec<(String, u64)>,
}

impl NightAreaCounts {
    /// Area with the highest night-time count, `None` when no incidents fell
    /// inside the night window.
    pub fn peak_area(&self) -> Option<&str> {
        self.counts.first().map(|(area, _)| area.as_str())
    }

    pub fn total(&self) -> u64 {
        self.counts.iter().map(|(_, count)| count).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}

/// Crime counts per victim age bracket, dense over the seven canonical
/// brackets plus a tally of records whose age could not be classified.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AgeDistribution {
    pub counts: [u64; 7],
    /// Records with a missing or negative age, excluded from the brackets.
    pub unclassified: u64,
}

impl AgeDistribution {
    /// Iterates brackets with their counts in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (AgeBracket, u64)> + '_ {
        AgeBracket::ALL
            .iter()
            .map(|&bracket| (bracket, self.counts[bracket.index()]))
    }

    /// Number of records that landed in one of the seven brackets.
    pub fn classified_total(&self) -> u64 {
        self.counts.iter().sum()
    }
}

/// Bracket label and count as written to the summary outputs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AgeGroupCount {
    pub age_group: &'static str,
    pub count: u64,
}

/// Headline figures reported in `summary.txt`, assembled from the three
/// aggregates.
#[derive(Debug, Clone, Serialize)]
pub struct CrimeSummary {
    pub total_incidents: u64,
    pub peak_hour: u32,
    pub peak_night_area: Option<String>,
    pub night_incidents: u64,
    pub age_groups: Vec<AgeGroupCount>,
    pub unclassified_ages: u64,
}

impl CrimeSummary {
    pub fn new(hourly: &HourlyCounts, night: &NightAreaCounts, ages: &AgeDistribution) -> Self {
        CrimeSummary {
            total_incidents: hourly.total(),
            peak_hour: hourly.peak_hour(),
            peak_night_area: night.peak_area().map(str::to_string),
            night_incidents: night.total(),
            age_groups: ages
                .iter()
                .map(|(bracket, count)| AgeGroupCount {
                    age_group: bracket.label(),
                    count,
                })
                .collect(),
            unclassified_ages: ages.unclassified,
        }
    }
}
