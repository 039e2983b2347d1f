use thiserror::Error;

/// Failures of the transcript pipeline.
///
/// Every variant is fatal for the recording it occurs in and never for its siblings.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TranscriptError {
    #[error("invalid category: rhythm {rhythm_class} (0-16), tempo {tempo_class} (0-4)")]
    InvalidCategory { rhythm_class: u8, tempo_class: u8 },

    #[error("malformed row {row}: field `{field}` has value {value:?}")]
    MalformedRow {
        row: usize,
        field: String,
        value: String,
    },

    #[error("ordering violation in {recording_id}: {current} follows {previous}")]
    OrderingViolation {
        recording_id: String,
        previous: f64,
        current: f64,
    },

    #[error("invalid click offsets in {recording_id}: {offsets:?}")]
    InvalidClickOffsets {
        recording_id: String,
        offsets: Vec<f64>,
    },

    #[error("invalid start time in {recording_id}: {start_time}")]
    InvalidStartTime { recording_id: String, start_time: f64 },

    #[error("render worker for {recording_id} failed: {reason}")]
    WorkerFailed { recording_id: String, reason: String },

    #[error("missing column: {0}")]
    MissingColumn(String),
}

impl TranscriptError {
    pub fn malformed(row: usize, field: &str, value: &str) -> Self {
        TranscriptError::MalformedRow {
            row,
            field: field.to_string(),
            value: value.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, TranscriptError>;
