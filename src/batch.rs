use std::sync::Arc;

use tokio::task::JoinSet;
use tracing::{error, info, warn};

use crate::coda::RawRow;
use crate::error::{Result, TranscriptError};
use crate::timeline::{group_rows, Timeline};
use crate::transcript::{RenderedRecording, TranscriptRenderer};

#[derive(Debug, Clone, PartialEq)]
pub struct RecordingOutcome {
    pub recording_id: String,
    pub result: Result<RenderedRecording>,
}

pub fn render_recording(
    recording_id: &str,
    rows: &[RawRow],
    renderer: &TranscriptRenderer,
) -> Result<RenderedRecording> {
    let timeline = Timeline::from_rows(recording_id, rows, renderer.config())?;
    renderer.render(&timeline)
}

fn log_outcome(outcome: &RecordingOutcome) {
    if let Err(e) = &outcome.result {
        warn!(recording = %outcome.recording_id, error = %e, "recording skipped");
    }
}

/// Renders every recording in the table, one after another.
pub fn render_batch(rows: Vec<RawRow>, renderer: &TranscriptRenderer) -> Vec<RecordingOutcome> {
    let groups = group_rows(rows, renderer.config().recording_key_len);
    info!(recordings = groups.len(), "rendering batch");
    groups
        .into_iter()
        .map(|(recording_id, rows)| {
            let result = render_recording(&recording_id, &rows, renderer);
            let outcome = RecordingOutcome {
                recording_id,
                result,
            };
            log_outcome(&outcome);
            outcome
        })
        .collect()
}

/// Renders recordings on blocking worker threads. Output keeps the table's recording order.
pub async fn render_batch_concurrent(
    rows: Vec<RawRow>,
    renderer: TranscriptRenderer,
) -> Vec<RecordingOutcome> {
    let groups = group_rows(rows, renderer.config().recording_key_len);
    info!(recordings = groups.len(), "rendering batch concurrently");

    let renderer = Arc::new(renderer);
    run_concurrent(groups, move |recording_id, rows| {
        render_recording(recording_id, rows, &renderer)
    })
    .await
}

/// Runs `job` once per recording on blocking worker threads.
///
/// A worker that dies without returning still yields an outcome for its
/// recording, carrying [`TranscriptError::WorkerFailed`].
pub async fn run_concurrent<F>(groups: Vec<(String, Vec<RawRow>)>, job: F) -> Vec<RecordingOutcome>
where
    F: Fn(&str, &[RawRow]) -> Result<RenderedRecording> + Send + Sync + 'static,
{
    let job = Arc::new(job);
    let mut pending: Vec<Option<String>> = Vec::with_capacity(groups.len());
    let mut tasks = JoinSet::new();
    for (ordinal, (recording_id, rows)) in groups.into_iter().enumerate() {
        pending.push(Some(recording_id.clone()));
        let job = Arc::clone(&job);
        tasks.spawn_blocking(move || {
            let result = job(&recording_id, &rows);
            (ordinal, RecordingOutcome { recording_id, result })
        });
    }

    let mut slots: Vec<Option<RecordingOutcome>> = vec![None; pending.len()];
    let mut failures = Vec::new();
    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok((ordinal, outcome)) => {
                pending[ordinal] = None;
                slots[ordinal] = Some(outcome);
            }
            Err(e) => {
                error!("render worker failed: {}", e);
                failures.push(e.to_string());
            }
        }
    }

    // Join errors carry no ordinal; every recording still pending belongs to a failed worker.
    let reason = failures.join("; ");
    slots
        .into_iter()
        .zip(pending)
        .map(|(slot, pending)| {
            let outcome = match (slot, pending) {
                (Some(outcome), _) => outcome,
                (None, recording_id) => RecordingOutcome {
                    result: Err(TranscriptError::WorkerFailed {
                        recording_id: recording_id.clone().unwrap_or_default(),
                        reason: reason.clone(),
                    }),
                    recording_id: recording_id.unwrap_or_default(),
                },
            };
            log_outcome(&outcome);
            outcome
        })
        .collect()
}

/// Transcript text of the successful recordings, blocks separated by a blank line.
pub fn transcript_text(outcomes: &[RecordingOutcome]) -> String {
    outcomes
        .iter()
        .filter_map(|outcome| outcome.result.as_ref().ok())
        .map(|rendered| rendered.transcript.to_string())
        .collect::<Vec<_>>()
        .join("\n")
}
