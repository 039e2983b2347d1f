use std::fmt;

use serde::{Deserialize, Serialize};

use super::silence::SilencePhrase;
use crate::coda::ActorId;

/// One rendered line of a recording's transcript.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TranscriptLine {
    /// Consecutive codas of one actor.
    Utterance { actor: ActorId, tokens: Vec<String> },
    /// Codas of several actors inside one chorus window, sorted by actor.
    Chorus { voices: Vec<(ActorId, String)> },
    Silence(SilencePhrase),
}

impl fmt::Display for TranscriptLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TranscriptLine::Utterance { actor, tokens } => {
                write!(f, "Actor {}: {}.", actor, tokens.join(" "))
            }
            TranscriptLine::Chorus { voices } => {
                let actors = voices
                    .iter()
                    .map(|(actor, _)| actor.to_string())
                    .collect::<Vec<_>>()
                    .join(", ");
                let tokens = voices
                    .iter()
                    .map(|(_, token)| token.as_str())
                    .collect::<Vec<_>>()
                    .join(" ");
                write!(f, "In chorus, actors {}: {}.", actors, tokens)
            }
            TranscriptLine::Silence(phrase) => write!(f, "{}", phrase),
        }
    }
}

/// All lines rendered for one recording.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordingTranscript {
    pub recording_id: String,
    pub lines: Vec<TranscriptLine>,
}

impl fmt::Display for RecordingTranscript {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "File: {}", self.recording_id)?;
        for line in &self.lines {
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}
