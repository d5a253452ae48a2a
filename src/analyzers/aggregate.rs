//! The three group-by/count reductions over the incident table.

use std::collections::HashMap;

use crate::analyzers::types::{AgeDistribution, HourlyCounts, NightAreaCounts};
use crate::features::AgeBracket;
use crate::loader::Incident;

/// Hours belonging to the night window, 22:00 through 03:59.
pub const NIGHT_HOURS: [u32; 6] = [22, 23, 0, 1, 2, 3];

/// Counts incidents per hour of day. Every hour appears, zero-filled.
///
/// `hours` is the derived hour column, one entry per incident in row order.
pub fn hourly_counts(hours: &[u32]) -> HourlyCounts {
    let mut counts = [0u64; 24];
    for &hour in hours {
        counts[hour as usize] += 1;
    }
    HourlyCounts { counts }
}

/// Counts incidents per area name, restricted to the night window.
///
/// The result is sorted descending by count; areas with equal counts are
/// ordered alphabetically so the peak is deterministic.
pub fn night_area_counts(incidents: &[Incident], hours: &[u32]) -> NightAreaCounts {
    let mut by_area: HashMap<&str, u64> = HashMap::new();
    for (incident, &hour) in incidents.iter().zip(hours) {
        if NIGHT_HOURS.contains(&hour) {
            *by_area.entry(incident.area_name.as_str()).or_default() += 1;
        }
    }

    let mut counts: Vec<(String, u64)> = by_area
        .into_iter()
        .map(|(area, count)| (area.to_string(), count))
        .collect();
    counts.sort_by(|(area_a, count_a), (area_b, count_b)| {
        count_b.cmp(count_a).then_with(|| area_a.cmp(area_b))
    });

    NightAreaCounts { counts }
}

/// Counts incidents per victim age bracket. All seven brackets appear,
/// zero-filled; records with a missing or negative age are tallied as
/// unclassified instead.
pub fn age_distribution(incidents: &[Incident]) -> AgeDistribution {
    let mut counts = [0u64; 7];
    let mut unclassified = 0u64;

    for incident in incidents {
        match incident.victim_age.and_then(AgeBracket::from_age) {
            Some(bracket) => counts[bracket.index()] += 1,
            None => unclassified += 1,
        }
    }

    AgeDistribution {
        counts,
        unclassified,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn incident(time_occ: &str, area: &str, age: Option<i32>) -> Incident {
        Incident {
            time_occ: time_occ.to_string(),
            area_name: area.to_string(),
            victim_age: age,
        }
    }

    #[test]
    fn test_hourly_counts_dense_and_total() {
        // Records at hours [22, 22, 23, 1] and no others.
        let hours = vec![22, 22, 23, 1];
        let hourly = hourly_counts(&hours);

        assert_eq!(hourly.counts[1], 1);
        assert_eq!(hourly.counts[22], 2);
        assert_eq!(hourly.counts[23], 1);
        assert_eq!(hourly.counts.iter().filter(|&&c| c == 0).count(), 21);
        assert_eq!(hourly.total(), 4);
    }

    #[test]
    fn test_night_window_filter() {
        let incidents = vec![
            incident("2215", "Central", None),
            incident("2330", "Central", None),
            incident("0145", "Rampart", None),
            incident("1200", "Central", None), // daytime, excluded
            incident("0400", "Rampart", None), // just past the window
        ];
        let hours = vec![22, 23, 1, 12, 4];

        let night = night_area_counts(&incidents, &hours);

        assert_eq!(night.total(), 3);
        assert_eq!(night.peak_area(), Some("Central"));
        assert_eq!(
            night.counts,
            vec![("Central".to_string(), 2), ("Rampart".to_string(), 1)]
        );
    }

    #[test]
    fn test_night_area_ties_break_alphabetically() {
        let incidents = vec![
            incident("2200", "Wilshire", None),
            incident("2300", "Central", None),
        ];
        let hours = vec![22, 23];

        let night = night_area_counts(&incidents, &hours);

        assert_eq!(night.peak_area(), Some("Central"));
        assert_eq!(night.counts[1].0, "Wilshire");
    }

    #[test]
    fn test_night_counts_match_spanning_midnight_example() {
        // The window spans midnight: {22, 23, 0, 1, 2, 3}.
        let incidents = vec![
            incident("2200", "Central", None),
            incident("2200", "Central", None),
            incident("2300", "Central", None),
            incident("0100", "Central", None),
        ];
        let hours = vec![22, 22, 23, 1];

        let night = night_area_counts(&incidents, &hours);
        assert_eq!(night.total(), 4);
    }

    #[test]
    fn test_age_distribution_zero_fills_brackets() {
        let incidents = vec![
            incident("0900", "Central", Some(70)),
            incident("0900", "Central", Some(18)),
            incident("0900", "Central", Some(18)),
        ];

        let ages = age_distribution(&incidents);

        assert_eq!(ages.counts, [0, 2, 0, 0, 0, 0, 1]);
        assert_eq!(ages.classified_total(), 3);
        assert_eq!(ages.unclassified, 0);
    }

    #[test]
    fn test_age_distribution_unclassified_policy() {
        let incidents = vec![
            incident("0900", "Central", Some(30)),
            incident("0900", "Central", None),
            incident("0900", "Central", Some(-5)),
        ];

        let ages = age_distribution(&incidents);

        assert_eq!(ages.classified_total(), 1);
        assert_eq!(ages.unclassified, 2);
    }
}
