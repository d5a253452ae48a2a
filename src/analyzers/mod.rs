//! Incident aggregation.
//!
//! This module runs the three group-by/count reductions over the loaded
//! incident table: crimes per hour of day, crimes per area within the night
//! window, and crimes per victim age bracket.

pub mod aggregate;
pub mod types;
