//! Read-only counters over a rendered recording.
//!
//! Nothing here is consulted while rendering; the snapshot is computed after
//! the fact for logging and for re-deriving the rubato quantiles offline.

use serde::{Deserialize, Serialize};

use super::line::TranscriptLine;
use crate::coda::RubatoMarker;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TranscriptSnapshot {
    pub codas: usize,
    pub line_stats: LineStats,
    pub silence_stats: SilenceStats,
    pub rubato_stats: RubatoStats,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LineStats {
    pub utterances: u64,
    pub choruses: u64,
    pub silences: u64,
    pub chorus_voices: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SilenceStats {
    pub total_seconds: f64,
    pub longest_seconds: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RubatoStats {
    pub decreasing: u64,
    pub constant: u64,
    pub increasing: u64,
    /// Every classified duration delta, in timeline order.
    pub deltas: Vec<f64>,
}

/// A rubato classification made while building cues.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RubatoSample {
    pub marker: RubatoMarker,
    pub delta: f64,
}

pub fn compute_snapshot(codas: usize, lines: &[TranscriptLine], rubato: &[RubatoSample]) -> TranscriptSnapshot {
    let mut snap = TranscriptSnapshot {
        codas,
        ..Default::default()
    };

    for line in lines {
        match line {
            TranscriptLine::Utterance { .. } => snap.line_stats.utterances += 1,
            TranscriptLine::Chorus { voices } => {
                snap.line_stats.choruses += 1;
                snap.line_stats.chorus_voices += voices.len() as u64;
            }
            TranscriptLine::Silence(phrase) => {
                snap.line_stats.silences += 1;
                snap.silence_stats.total_seconds += phrase.gap;
                snap.silence_stats.longest_seconds = snap.silence_stats.longest_seconds.max(phrase.gap);
            }
        }
    }

    for sample in rubato {
        match sample.marker {
            RubatoMarker::Decreasing => snap.rubato_stats.decreasing += 1,
            RubatoMarker::Constant => snap.rubato_stats.constant += 1,
            RubatoMarker::Increasing => snap.rubato_stats.increasing += 1,
        }
        snap.rubato_stats.deltas.push(sample.delta);
    }

    snap
}
