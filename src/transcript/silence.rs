use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SilenceUnit {
    Second,
    Minute,
    Hour,
    Day,
}

impl SilenceUnit {
    pub fn seconds(&self) -> f64 {
        match self {
            SilenceUnit::Second => 1.0,
            SilenceUnit::Minute => 60.0,
            SilenceUnit::Hour => 3_600.0,
            SilenceUnit::Day => 86_400.0,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SilenceUnit::Second => "second",
            SilenceUnit::Minute => "minute",
            SilenceUnit::Hour => "hour",
            SilenceUnit::Day => "day",
        }
    }

    fn for_gap(gap: f64) -> Self {
        if gap < 60.0 {
            SilenceUnit::Second
        } else if gap < 3_600.0 {
            SilenceUnit::Minute
        } else if gap < 86_400.0 {
            SilenceUnit::Hour
        } else {
            SilenceUnit::Day
        }
    }
}

/// A rounded, human-readable silence duration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SilencePhrase {
    pub magnitude: u64,
    pub unit: SilenceUnit,
    /// The unrounded gap in seconds.
    pub gap: f64,
}

impl fmt::Display for SilencePhrase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let plural = if self.magnitude == 1 { "" } else { "s" };
        write!(
            f,
            "(No vocalizations, {} {}{})",
            self.magnitude,
            self.unit.label(),
            plural
        )
    }
}

pub struct SilenceFormatter;

impl SilenceFormatter {
    /// Whole units below 5 are kept as is, larger values snap to the nearest multiple of 5.
    pub fn format(gap: f64) -> SilencePhrase {
        let gap = gap.max(0.0);
        let unit = SilenceUnit::for_gap(gap);
        let units = (gap / unit.seconds()).floor();
        let magnitude = if units < 5.0 {
            units
        } else {
            5.0 * (units / 5.0).round()
        };
        SilencePhrase {
            magnitude: magnitude as u64,
            unit,
            gap,
        }
    }
}
