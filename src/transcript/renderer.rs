use tracing::{debug, info};

use super::line::{RecordingTranscript, TranscriptLine};
use super::metrics::{compute_snapshot, RubatoSample, TranscriptSnapshot};
use super::state::{Cue, TranscriptState};
use crate::coda::RubatoClassifier;
use crate::config::TranscriptConfig;
use crate::error::Result;
use crate::timeline::Timeline;

#[derive(Debug, Clone, PartialEq)]
pub struct RenderedRecording {
    pub transcript: RecordingTranscript,
    pub snapshot: TranscriptSnapshot,
}

/// Turns a sorted timeline into transcript lines.
#[derive(Debug, Clone)]
pub struct TranscriptRenderer {
    config: TranscriptConfig,
    classifier: RubatoClassifier,
}

impl Default for TranscriptRenderer {
    fn default() -> Self {
        Self::new(TranscriptConfig::default())
    }
}

impl TranscriptRenderer {
    pub fn new(config: TranscriptConfig) -> Self {
        let classifier = RubatoClassifier::from_config(&config);
        Self { config, classifier }
    }

    pub fn config(&self) -> &TranscriptConfig {
        &self.config
    }

    /// Final tokens for every coda, rubato marker included, plus the classifications made.
    pub fn cues(&self, timeline: &Timeline) -> (Vec<Cue>, Vec<RubatoSample>) {
        let context = timeline.context();
        let entries = timeline.entries();
        let mut samples = Vec::new();

        let cues = entries
            .iter()
            .enumerate()
            .map(|(i, entry)| {
                let previous = context.previous_from_actor(i).map(|j| &entries[j].event);
                let delta = self.classifier.delta(previous, &entry.event);
                let marker = delta.map(|delta| {
                    let marker = self.classifier.categorize(delta);
                    samples.push(RubatoSample { marker, delta });
                    marker
                });
                Cue::new(
                    entry.event.actor_id,
                    entry.symbol.with_rubato(marker),
                    entry.event.start_time,
                )
            })
            .collect();

        (cues, samples)
    }

    /// Folds cues through a fresh [`TranscriptState`].
    pub fn render_cues(&self, recording_id: &str, cues: Vec<Cue>) -> Result<Vec<TranscriptLine>> {
        let initial = (TranscriptState::new(recording_id), Vec::new());
        let (state, mut lines) = cues.into_iter().try_fold(initial, |(state, mut lines), cue| {
            let (state, emitted) = state.step(cue, &self.config)?;
            lines.extend(emitted);
            Ok::<_, crate::error::TranscriptError>((state, lines))
        })?;
        lines.extend(state.finish());
        Ok(lines)
    }

    pub fn render(&self, timeline: &Timeline) -> Result<RenderedRecording> {
        let (cues, samples) = self.cues(timeline);
        let lines = self.render_cues(&timeline.recording_id, cues)?;
        let snapshot = compute_snapshot(timeline.len(), &lines, &samples);

        debug!(recording = %timeline.recording_id, ?snapshot, "rendered");
        info!(
            recording = %timeline.recording_id,
            codas = snapshot.codas,
            lines = lines.len(),
            choruses = snapshot.line_stats.choruses,
            silences = snapshot.line_stats.silences,
            "transcript ready"
        );

        Ok(RenderedRecording {
            transcript: RecordingTranscript {
                recording_id: timeline.recording_id.clone(),
                lines,
            },
            snapshot,
        })
    }
}
