use std::env;
use std::fs;
use std::path::PathBuf;

use crime_stats::analyzers::aggregate::{age_distribution, hourly_counts, night_area_counts};
use crime_stats::analyzers::types::CrimeSummary;
use crime_stats::features::derive_hours;
use crime_stats::loader::load_incidents;
use crime_stats::output;

const FIXTURE: &str = "\
DR_NO,TIME OCC,AREA NAME,Vict Age
1,2215,Central,34
2,2240,Central,18
3,2330,Hollywood,70
4,0130,Central,
5,1200,Rampart,45
6,0345,Hollywood,-2
7,0400,Rampart,12
";

fn setup(name: &str) -> (PathBuf, PathBuf) {
    let dir = env::temp_dir().join(name);
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).unwrap();

    let input = dir.join("crimes.csv");
    fs::write(&input, FIXTURE).unwrap();

    let output_dir = dir.join("outputs");
    fs::create_dir_all(&output_dir).unwrap();

    (dir, output_dir)
}

#[test]
fn test_full_pipeline() {
    let (dir, output_dir) = setup("crime_stats_it_pipeline");

    let incidents = load_incidents(&dir.join("crimes.csv")).expect("failed to load fixture");
    assert_eq!(incidents.len(), 7);

    let hours = derive_hours(&incidents).unwrap();
    assert_eq!(hours, vec![22, 22, 23, 1, 12, 3, 4]);

    let hourly = hourly_counts(&hours);
    let night = night_area_counts(&incidents, &hours);
    let ages = age_distribution(&incidents);

    // Sum of hourly counts equals total record count.
    assert_eq!(hourly.total(), 7);

    // Night window {22,23,0,1,2,3}: rows 1,2,3,4,6 qualify; hour 4 does not.
    assert_eq!(night.total(), 5);
    assert_eq!(night.peak_area(), Some("Central"));

    // Bracket counts sum to records with a valid age; blank and negative ages
    // are tallied separately.
    assert_eq!(ages.classified_total(), 5);
    assert_eq!(ages.unclassified, 2);

    output::write_hourly_csv(&output_dir, &hourly).unwrap();
    output::write_night_area_csv(&output_dir, &night).unwrap();
    output::write_age_groups_csv(&output_dir, &ages).unwrap();

    let summary = CrimeSummary::new(&hourly, &night, &ages);
    output::write_summary(&output_dir, &summary).unwrap();

    let hourly_csv = fs::read_to_string(output_dir.join(output::HOURLY_CSV)).unwrap();
    assert_eq!(hourly_csv.lines().count(), 25);
    assert!(hourly_csv.lines().any(|l| l == "22,2"));

    let night_csv = fs::read_to_string(output_dir.join(output::NIGHT_AREA_CSV)).unwrap();
    assert_eq!(
        night_csv.lines().collect::<Vec<_>>(),
        ["area,count", "Central,3", "Hollywood,2"]
    );

    let ages_csv = fs::read_to_string(output_dir.join(output::AGE_GROUPS_CSV)).unwrap();
    assert_eq!(ages_csv.lines().count(), 8);
    assert!(ages_csv.lines().any(|l| l == "65+,1"));

    let summary_txt = fs::read_to_string(output_dir.join(output::SUMMARY_TXT)).unwrap();
    assert!(summary_txt.contains("Peak crime hour: 22"));
    assert!(summary_txt.contains("Peak night-crime location: Central"));
    assert!(summary_txt.contains("  0-17: 1"));
    assert!(summary_txt.contains("  65+: 1"));

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn test_pipeline_outputs_are_idempotent() {
    let (dir, output_dir) = setup("crime_stats_it_idempotent");

    let run = || {
        let incidents = load_incidents(&dir.join("crimes.csv")).unwrap();
        let hours = derive_hours(&incidents).unwrap();
        let hourly = hourly_counts(&hours);
        let night = night_area_counts(&incidents, &hours);
        let ages = age_distribution(&incidents);

        output::write_hourly_csv(&output_dir, &hourly).unwrap();
        output::write_night_area_csv(&output_dir, &night).unwrap();
        output::write_age_groups_csv(&output_dir, &ages).unwrap();
        output::write_summary(&output_dir, &CrimeSummary::new(&hourly, &night, &ages)).unwrap();
    };

    let snapshot = |name: &str| fs::read(output_dir.join(name)).unwrap();

    run();
    let first: Vec<Vec<u8>> = [
        output::HOURLY_CSV,
        output::NIGHT_AREA_CSV,
        output::AGE_GROUPS_CSV,
        output::SUMMARY_TXT,
    ]
    .iter()
    .map(|name| snapshot(name))
    .collect();

    run();
    let second: Vec<Vec<u8>> = [
        output::HOURLY_CSV,
        output::NIGHT_AREA_CSV,
        output::AGE_GROUPS_CSV,
        output::SUMMARY_TXT,
    ]
    .iter()
    .map(|name| snapshot(name))
    .collect();

    assert_eq!(first, second);

    let _ = fs::remove_dir_all(&dir);
}
