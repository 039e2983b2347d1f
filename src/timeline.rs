use std::cmp::Ordering;
use std::collections::HashMap;

use tracing::debug;

use crate::coda::{ActorId, CodaEvent, RawRow, Symbol, SymbolEncoder};
use crate::config::TranscriptConfig;
use crate::error::Result;

/// Grouping key of a recording: its first `key_len` characters.
pub fn recording_key(recording_id: &str, key_len: usize) -> String {
    recording_id.chars().take(key_len).collect()
}

/// Splits table rows into recordings, keeping first-appearance order of the keys
/// and input order of the rows within each key.
pub fn group_rows(rows: Vec<RawRow>, key_len: usize) -> Vec<(String, Vec<RawRow>)> {
    let mut groups: Vec<(String, Vec<RawRow>)> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();
    for row in rows {
        let key = recording_key(&row.recording_id, key_len);
        match index.get(&key).copied() {
            Some(slot) => groups[slot].1.push(row),
            None => {
                index.insert(key.clone(), groups.len());
                groups.push((key, vec![row]));
            }
        }
    }
    groups
}

#[derive(Debug, Clone, PartialEq)]
pub struct TimelineEntry {
    pub event: CodaEvent,
    pub symbol: Symbol,
}

/// Chronologically ordered codas of one recording.
#[derive(Debug, Clone, PartialEq)]
pub struct Timeline {
    pub recording_id: String,
    entries: Vec<TimelineEntry>,
}

impl Timeline {
    /// Encodes and sorts events by start time. Equal start times keep input order.
    pub fn from_events(recording_id: impl Into<String>, events: Vec<CodaEvent>) -> Result<Self> {
        let mut entries = events
            .into_iter()
            .map(|event| {
                let symbol = SymbolEncoder::encode(&event)?;
                Ok(TimelineEntry { event, symbol })
            })
            .collect::<Result<Vec<_>>>()?;
        // Start times are finite; -0.0 and 0.0 compare equal and keep input order.
        entries.sort_by(|a, b| {
            a.event
                .start_time
                .partial_cmp(&b.event.start_time)
                .unwrap_or(Ordering::Equal)
        });

        let recording_id = recording_id.into();
        debug!(recording = %recording_id, codas = entries.len(), "timeline built");
        Ok(Self {
            recording_id,
            entries,
        })
    }

    /// Parses every row of one recording. A single bad row fails the whole recording.
    pub fn from_rows(
        recording_id: impl Into<String>,
        rows: &[RawRow],
        config: &TranscriptConfig,
    ) -> Result<Self> {
        let events = rows
            .iter()
            .map(|row| CodaEvent::from_raw(row, config.noise_threshold))
            .collect::<Result<Vec<_>>>()?;
        Self::from_events(recording_id, events)
    }

    pub fn entries(&self) -> &[TimelineEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn context(&self) -> RecordingContext<'_> {
        RecordingContext::new(self)
    }

    /// Index of the next coda if it starts while coda `i` is still sounding.
    pub fn interrupted_by(&self, i: usize) -> Option<usize> {
        let current = &self.entries.get(i)?.event;
        let next = self.entries.get(i + 1)?;
        let start = next.event.start_time;
        (start >= current.start_time && start <= current.end_time()).then_some(i + 1)
    }
}

/// Per-recording lookups over a timeline, anchored at the recording's first coda.
#[derive(Debug, Clone, Copy)]
pub struct RecordingContext<'a> {
    timeline: &'a Timeline,
    pub time_origin: f64,
}

impl<'a> RecordingContext<'a> {
    pub fn new(timeline: &'a Timeline) -> Self {
        let time_origin = timeline
            .entries
            .first()
            .map(|entry| entry.event.start_time)
            .unwrap_or(0.0);
        Self {
            timeline,
            time_origin,
        }
    }

    fn actor_at(&self, i: usize) -> Option<ActorId> {
        self.timeline.entries.get(i).map(|entry| entry.event.actor_id)
    }

    /// Seconds since the first coda of the recording.
    pub fn relative_time(&self, i: usize) -> Option<f64> {
        self.timeline
            .entries
            .get(i)
            .map(|entry| entry.event.start_time - self.time_origin)
    }

    /// Index of the closest earlier coda from the same actor.
    pub fn previous_from_actor(&self, i: usize) -> Option<usize> {
        let actor = self.actor_at(i)?;
        (0..i).rev().find(|&j| self.actor_at(j) == Some(actor))
    }

    /// Index of the closest later coda from the same actor.
    pub fn next_from_actor(&self, i: usize) -> Option<usize> {
        let actor = self.actor_at(i)?;
        (i + 1..self.timeline.len()).find(|&j| self.actor_at(j) == Some(actor))
    }
}
