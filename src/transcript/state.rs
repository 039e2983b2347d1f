use std::collections::BTreeMap;

use tracing::trace;

use super::line::TranscriptLine;
use super::silence::SilenceFormatter;
use crate::coda::ActorId;
use crate::config::TranscriptConfig;
use crate::error::{Result, TranscriptError};

/// One coda as seen by the renderer: who, what token, and when.
#[derive(Debug, Clone, PartialEq)]
pub struct Cue {
    pub actor: ActorId,
    pub token: String,
    pub timestamp: f64,
}

impl Cue {
    pub fn new(actor: ActorId, token: impl Into<String>, timestamp: f64) -> Self {
        Self {
            actor,
            token: token.into(),
            timestamp,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Accumulating(ActorId),
    Chorus,
}

#[derive(Debug, Clone, PartialEq)]
struct Utterance {
    actor: ActorId,
    tokens: Vec<String>,
}

impl Utterance {
    fn into_line(self) -> TranscriptLine {
        TranscriptLine::Utterance {
            actor: self.actor,
            tokens: self.tokens,
        }
    }
}

/// Renderer state for one recording. Consumed and returned by every [`TranscriptState::step`].
#[derive(Debug, Clone, PartialEq)]
pub struct TranscriptState {
    recording_id: String,
    buffer: Option<Utterance>,
    chorus: BTreeMap<ActorId, String>,
    in_chorus: bool,
    last_timestamp: Option<f64>,
    last_actor: Option<ActorId>,
    last_token: Option<String>,
}

impl TranscriptState {
    pub fn new(recording_id: impl Into<String>) -> Self {
        Self {
            recording_id: recording_id.into(),
            buffer: None,
            chorus: BTreeMap::new(),
            in_chorus: false,
            last_timestamp: None,
            last_actor: None,
            last_token: None,
        }
    }

    pub fn phase(&self) -> Phase {
        if self.in_chorus {
            Phase::Chorus
        } else if let Some(utterance) = &self.buffer {
            Phase::Accumulating(utterance.actor)
        } else {
            Phase::Idle
        }
    }

    pub fn last_timestamp(&self) -> Option<f64> {
        self.last_timestamp
    }

    fn take_chorus(&mut self) -> Option<TranscriptLine> {
        if self.chorus.is_empty() {
            return None;
        }
        let voices = std::mem::take(&mut self.chorus).into_iter().collect();
        Some(TranscriptLine::Chorus { voices })
    }

    /// Advances the state by one cue, returning the lines completed by it.
    pub fn step(mut self, cue: Cue, config: &TranscriptConfig) -> Result<(Self, Vec<TranscriptLine>)> {
        let gap = match self.last_timestamp {
            Some(previous) if cue.timestamp < previous => {
                return Err(TranscriptError::OrderingViolation {
                    recording_id: self.recording_id,
                    previous,
                    current: cue.timestamp,
                });
            }
            Some(previous) => cue.timestamp - previous,
            None => f64::INFINITY,
        };

        let mut lines = Vec::new();
        let joins_chorus = gap < config.chorus_window
            && self.last_actor.is_some_and(|actor| actor != cue.actor);

        if joins_chorus {
            // The previous actor's latest token moves into the chorus.
            if let Some(mut utterance) = self.buffer.take() {
                if !self.in_chorus {
                    utterance.tokens.pop();
                    if !utterance.tokens.is_empty() {
                        lines.push(utterance.into_line());
                    }
                }
            }
            if let (Some(actor), Some(token)) = (self.last_actor, self.last_token.take()) {
                self.chorus.insert(actor, token);
            }
            self.chorus.insert(cue.actor, cue.token.clone());
            self.in_chorus = true;
            trace!(actor = cue.actor, gap, voices = self.chorus.len(), "chorus");
        } else {
            let long_pause = gap.is_finite() && gap > config.pause_threshold;
            let mut continued = false;

            if self.in_chorus {
                lines.extend(self.take_chorus());
            } else if self.last_actor == Some(cue.actor) && !long_pause {
                if let Some(utterance) = self.buffer.as_mut() {
                    utterance.tokens.push(cue.token.clone());
                    continued = true;
                }
            }

            if !continued {
                if let Some(utterance) = self.buffer.take() {
                    lines.push(utterance.into_line());
                }
            }
            if long_pause {
                trace!(gap, "long silence");
                lines.push(TranscriptLine::Silence(SilenceFormatter::format(gap)));
            }
            if !continued {
                self.buffer = Some(Utterance {
                    actor: cue.actor,
                    tokens: vec![cue.token.clone()],
                });
            }
            self.in_chorus = false;
            trace!(actor = cue.actor, gap, continued, "utterance");
        }

        self.last_actor = Some(cue.actor);
        self.last_token = Some(cue.token);
        self.last_timestamp = Some(cue.timestamp);
        Ok((self, lines))
    }

    /// Flushes whatever is still open at the end of the recording.
    pub fn finish(mut self) -> Vec<TranscriptLine> {
        let mut lines = Vec::new();
        lines.extend(self.take_chorus());
        if let Some(utterance) = self.buffer.take() {
            lines.push(utterance.into_line());
        }
        lines
    }
}
