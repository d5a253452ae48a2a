//! Derived fields: hour of occurrence and victim age bracket.

use anyhow::{Context, Result, ensure};

use crate::loader::Incident;

/// The seven canonical age brackets, in report order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AgeBracket {
    Under18,
    From18To25,
    From26To34,
    From35To44,
    From45To54,
    From55To64,
    Over64,
}

impl AgeBracket {
    /// All brackets in canonical report order.
    pub const ALL: [AgeBracket; 7] = [
        AgeBracket::Under18,
        AgeBracket::From18To25,
        AgeBracket::From26To34,
        AgeBracket::From35To44,
        AgeBracket::From45To54,
        AgeBracket::From55To64,
        AgeBracket::Over64,
    ];

    /// Buckets a victim age. Upper bounds are inclusive, the final bracket is
    /// unbounded above. Negative ages belong to no bracket.
    pub fn from_age(age: i32) -> Option<Self> {
        match age {
            i32::MIN..=-1 => None,
            0..=17 => Some(AgeBracket::Under18),
            18..=25 => Some(AgeBracket::From18To25),
            26..=34 => Some(AgeBracket::From26To34),
            35..=44 => Some(AgeBracket::From35To44),
            45..=54 => Some(AgeBracket::From45To54),
            55..=64 => Some(AgeBracket::From55To64),
            _ => Some(AgeBracket::Over64),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            AgeBracket::Under18 => "0-17",
            AgeBracket::From18To25 => "18-25",
            AgeBracket::From26To34 => "26-34",
            AgeBracket::From35To44 => "35-44",
            AgeBracket::From45To54 => "45-54",
            AgeBracket::From55To64 => "55-64",
            AgeBracket::Over64 => "65+",
        }
    }

    /// Position within [`AgeBracket::ALL`].
    pub fn index(self) -> usize {
        self as usize
    }
}

/// Parses the hour of day from fixed-width "HHMM" occurrence-time text.
///
/// # Errors
///
/// Returns an error if the text is shorter than two characters, the leading
/// characters are not digits, or the resulting hour falls outside 0-23.
pub fn hour_of_occurrence(time_occ: &str) -> Result<u32> {
    let prefix = time_occ
        .get(..2)
        .with_context(|| format!("occurrence time {time_occ:?} is shorter than two characters"))?;
    let hour: u32 = prefix
        .parse()
        .with_context(|| format!("occurrence time {time_occ:?} does not start with an hour"))?;
    ensure!(hour < 24, "occurrence time {time_occ:?} has hour {hour} outside 0-23");
    Ok(hour)
}

/// Derives the hour field for every incident, in row order.
pub fn derive_hours(incidents: &[Incident]) -> Result<Vec<u32>> {
    incidents
        .iter()
        .map(|incident| hour_of_occurrence(&incident.time_occ))
        .collect()
}
