//! Bar-chart rendering for the computed aggregates.
//!
//! Charts are drawn with the [`plotters`] bitmap backend and saved as PNG
//! files under the output directory. Fonts are rasterized by the backend, so
//! rendering works in headless environments.

use plotters::prelude::*;
use std::path::Path;
use thiserror::Error;

use crate::analyzers::types::{AgeDistribution, HourlyCounts, NightAreaCounts};
use crate::features::AgeBracket;

pub const HOURLY_PNG: &str = "crime_by_hour.png";
pub const NIGHT_AREA_PNG: &str = "night_crime_by_area.png";
pub const AGE_GROUPS_PNG: &str = "victim_age_groups.png";

/// Errors that can occur during chart generation.
#[derive(Error, Debug)]
pub enum ChartError {
    #[error("failed to prepare drawing area: {0}")]
    DrawingArea(String),

    #[error("failed to configure chart: {0}")]
    ChartConfig(String),

    #[error("failed to draw chart elements: {0}")]
    Drawing(String),

    #[error("invalid chart data: {0}")]
    InvalidData(String),
}

type Result<T> = core::result::Result<T, ChartError>;

/// Leaves headroom above the tallest bar so it does not touch the frame.
fn padded_axis_max(max_count: u64) -> u64 {
    let max_count = max_count.max(1);
    max_count + 1 + max_count / 10
}

/// Renders `crime_by_hour.png`: a vertical bar per hour of day, 0 through 23.
pub fn render_hourly_chart(hourly: &HourlyCounts, output_dir: &Path) -> Result<()> {
    let output_path = output_dir.join(HOURLY_PNG);
    let y_max = padded_axis_max(hourly.counts.iter().copied().max().unwrap_or(0));

    let root = BitMapBackend::new(&output_path, (1200, 500)).into_drawing_area();
    root.fill(&WHITE)
        .map_err(|e| ChartError::DrawingArea(e.to_string()))?;

    let mut chart = ChartBuilder::on(&root)
        .caption("Crime Frequency by Hour of Day", ("sans-serif", 30))
        .margin(15)
        .x_label_area_size(50)
        .y_label_area_size(60)
        .build_cartesian_2d((0u32..24u32).into_segmented(), 0u64..y_max)
        .map_err(|e| ChartError::ChartConfig(e.to_string()))?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_desc("Hour (0-23)")
        .y_desc("Crime Count")
        .axis_desc_style(("sans-serif", 20))
        .label_style(("sans-serif", 15))
        .draw()
        .map_err(|e| ChartError::Drawing(e.to_string()))?;

    chart
        .draw_series(
            Histogram::vertical(&chart)
                .style(BLUE.filled())
                .margin(3)
                .data(
                    hourly
                        .counts
                        .iter()
                        .enumerate()
                        .map(|(hour, &count)| (hour as u32, count)),
                ),
        )
        .map_err(|e| ChartError::Drawing(e.to_string()))?;

    root.present()
        .map_err(|e| ChartError::Drawing(e.to_string()))?;
    Ok(())
}

/// Renders `night_crime_by_area.png`: a horizontal bar per area, ordered with
/// the busiest area at the top.
pub fn render_night_area_chart(night: &NightAreaCounts, output_dir: &Path) -> Result<()> {
    if night.is_empty() {
        return Err(ChartError::InvalidData(
            "no incidents fell inside the night window".to_string(),
        ));
    }

    let output_path = output_dir.join(NIGHT_AREA_PNG);
    let rows = night.counts.len() as u32;
    let x_max = padded_axis_max(night.counts.iter().map(|(_, count)| *count).max().unwrap_or(0));

    let root = BitMapBackend::new(&output_path, (1200, 600)).into_drawing_area();
    root.fill(&WHITE)
        .map_err(|e| ChartError::DrawingArea(e.to_string()))?;

    let mut chart = ChartBuilder::on(&root)
        .caption("Night Crime Frequency by Area (10pm-3:59am)", ("sans-serif", 30))
        .margin(15)
        .x_label_area_size(50)
        .y_label_area_size(140)
        .build_cartesian_2d(0u64..x_max, (0u32..rows).into_segmented())
        .map_err(|e| ChartError::ChartConfig(e.to_string()))?;

    // Row 0 of the sorted counts (the peak area) is drawn at the top, so
    // segment positions are reversed relative to the vector order.
    let area_label = |position: u32| -> String {
        night
            .counts
            .get((rows - 1 - position) as usize)
            .map(|(area, _)| area.clone())
            .unwrap_or_default()
    };

    chart
        .configure_mesh()
        .disable_y_mesh()
        .x_desc("Crime Count")
        .y_desc("Area Name")
        .y_labels(night.counts.len())
        .y_label_formatter(&move |position| match position {
            SegmentValue::CenterOf(row) => area_label(*row),
            _ => String::new(),
        })
        .axis_desc_style(("sans-serif", 20))
        .label_style(("sans-serif", 15))
        .draw()
        .map_err(|e| ChartError::Drawing(e.to_string()))?;

    chart
        .draw_series(
            Histogram::horizontal(&chart)
                .style(BLUE.filled())
                .margin(3)
                .data(
                    night
                        .counts
                        .iter()
                        .enumerate()
                        .map(|(row, (_, count))| (rows - 1 - row as u32, *count)),
                ),
        )
        .map_err(|e| ChartError::Drawing(e.to_string()))?;

    root.present()
        .map_err(|e| ChartError::Drawing(e.to_string()))?;
    Ok(())
}

/// Renders `victim_age_groups.png`: a vertical bar per canonical age bracket.
pub fn render_age_groups_chart(ages: &AgeDistribution, output_dir: &Path) -> Result<()> {
    let output_path = output_dir.join(AGE_GROUPS_PNG);
    let y_max = padded_axis_max(ages.counts.iter().copied().max().unwrap_or(0));
    let brackets = AgeBracket::ALL.len() as u32;

    let root = BitMapBackend::new(&output_path, (1000, 500)).into_drawing_area();
    root.fill(&WHITE)
        .map_err(|e| ChartError::DrawingArea(e.to_string()))?;

    let mut chart = ChartBuilder::on(&root)
        .caption("Crimes by Victim Age Group", ("sans-serif", 30))
        .margin(15)
        .x_label_area_size(50)
        .y_label_area_size(60)
        .build_cartesian_2d((0u32..brackets).into_segmented(), 0u64..y_max)
        .map_err(|e| ChartError::ChartConfig(e.to_string()))?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_desc("Age Group")
        .y_desc("Number of Crimes")
        .x_labels(AgeBracket::ALL.len())
        .x_label_formatter(&|position| match position {
            SegmentValue::CenterOf(index) => AgeBracket::ALL
                .get(*index as usize)
                .map(|bracket| bracket.label().to_string())
                .unwrap_or_default(),
            _ => String::new(),
        })
        .axis_desc_style(("sans-serif", 20))
        .label_style(("sans-serif", 15))
        .draw()
        .map_err(|e| ChartError::Drawing(e.to_string()))?;

    chart
        .draw_series(
            Histogram::vertical(&chart)
                .style(BLUE.filled())
                .margin(5)
                .data(
                    ages.counts
                        .iter()
                        .enumerate()
                        .map(|(index, &count)| (index as u32, count)),
                ),
        )
        .map_err(|e| ChartError::Drawing(e.to_string()))?;

    root.present()
        .map_err(|e| ChartError::Drawing(e.to_string()))?;
    Ok(())
}
