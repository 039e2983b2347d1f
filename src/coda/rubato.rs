use serde::{Deserialize, Serialize};

use super::event::CodaEvent;
use crate::config::TranscriptConfig;

/// Direction of a duration change between two comparable codas of one actor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RubatoMarker {
    Decreasing,
    Constant,
    Increasing,
}

impl RubatoMarker {
    pub fn as_char(&self) -> char {
        match self {
            RubatoMarker::Decreasing => '\\',
            RubatoMarker::Constant => '-',
            RubatoMarker::Increasing => '/',
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RubatoClassifier {
    pub pause_threshold: f64,
    pub low: f64,
    pub high: f64,
}

impl Default for RubatoClassifier {
    fn default() -> Self {
        Self::from_config(&TranscriptConfig::default())
    }
}

impl RubatoClassifier {
    pub fn from_config(config: &TranscriptConfig) -> Self {
        Self {
            pause_threshold: config.pause_threshold,
            low: config.rubato_low,
            high: config.rubato_high,
        }
    }

    /// Ornament-free duration difference against the actor's previous coda.
    ///
    /// `None` when there is no previous coda, the two are separated by a long
    /// pause, or they differ in rhythm or tempo class.
    pub fn delta(&self, previous: Option<&CodaEvent>, event: &CodaEvent) -> Option<f64> {
        let previous = previous?;
        if event.start_time - previous.start_time > self.pause_threshold {
            return None;
        }
        if event.rhythm_class != previous.rhythm_class || event.tempo_class != previous.tempo_class {
            return None;
        }
        Some(event.ornament_free_duration() - previous.ornament_free_duration())
    }

    pub fn categorize(&self, delta: f64) -> RubatoMarker {
        if delta < self.low {
            RubatoMarker::Decreasing
        } else if delta < self.high {
            RubatoMarker::Constant
        } else {
            RubatoMarker::Increasing
        }
    }

    pub fn classify(&self, previous: Option<&CodaEvent>, event: &CodaEvent) -> Option<RubatoMarker> {
        self.delta(previous, event).map(|delta| self.categorize(delta))
    }
}
