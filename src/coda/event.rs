use serde::{Deserialize, Serialize};

use crate::config::NOISE_THRESHOLD;
use crate::error::{Result, TranscriptError};

pub type ActorId = u32;

pub const RHYTHM_CLASSES: u8 = 17;
pub const TEMPO_CLASSES: u8 = 5;

/// Upper bounds (exclusive) of tempo classes 0-3; anything longer is class 4.
pub const TEMPO_BREAKPOINTS: [f64; 4] = [0.45, 0.61, 0.93, 1.08];

/// Tempo class of a coda from its total duration in seconds.
pub fn tempo_class_for_duration(duration: f64) -> u8 {
    TEMPO_BREAKPOINTS
        .iter()
        .position(|&bound| duration < bound)
        .unwrap_or(TEMPO_BREAKPOINTS.len()) as u8
}

/// Converts inter-click intervals into offsets from the first click.
///
/// The list ends at the first zero interval. Intervals at or below `noise_threshold`
/// do not produce a click, but their duration still counts toward later offsets.
pub fn click_offsets_from_icis(icis: &[f64], noise_threshold: f64) -> Vec<f64> {
    let mut offsets = vec![0.0];
    let mut elapsed = 0.0;
    for &ici in icis.iter().take_while(|&&ici| ici != 0.0) {
        elapsed += ici;
        if ici > noise_threshold {
            offsets.push(elapsed);
        }
    }
    offsets
}

/// One table row before numeric parsing. All values are kept as text so that a
/// failure can name the offending field.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawRow {
    pub row: usize,
    pub recording_id: String,
    pub duration: String,
    pub icis: Vec<String>,
    pub ornament: String,
    pub rhythm: String,
    pub actor: String,
    pub start_time: String,
}

fn parse_field<T: std::str::FromStr>(row: usize, field: &str, value: &str) -> Result<T> {
    value
        .trim()
        .parse::<T>()
        .map_err(|_| TranscriptError::malformed(row, field, value))
}

/// Integers in the source tables are sometimes written as floats ("3.0").
fn parse_integral(row: usize, field: &str, value: &str) -> Result<i64> {
    let number: f64 = parse_field(row, field, value)?;
    if !number.is_finite() || number.fract() != 0.0 {
        return Err(TranscriptError::malformed(row, field, value));
    }
    Ok(number as i64)
}

/// Durations and intervals must be finite and non-negative.
fn parse_span(row: usize, field: &str, value: &str) -> Result<f64> {
    let number: f64 = parse_field(row, field, value)?;
    if !number.is_finite() || number < 0.0 {
        return Err(TranscriptError::malformed(row, field, value));
    }
    Ok(number)
}

fn parse_flag(row: usize, field: &str, value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "1.0" | "true" => Ok(true),
        "0" | "0.0" | "false" => Ok(false),
        _ => Err(TranscriptError::malformed(row, field, value)),
    }
}

/// One detected coda.
///
/// Click offsets start at 0, never decrease, and keep no noise clicks.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CodaEvent {
    pub recording_id: String,
    pub actor_id: ActorId,
    pub start_time: f64,
    click_offsets: Vec<f64>,
    pub rhythm_class: u8,
    pub ornamented: bool,
    pub tempo_class: u8,
}

impl CodaEvent {
    /// Builds an event with the default noise threshold.
    pub fn new(
        recording_id: impl Into<String>,
        actor_id: ActorId,
        start_time: f64,
        click_offsets: Vec<f64>,
        rhythm_class: u8,
        ornamented: bool,
        tempo_class: u8,
    ) -> Result<Self> {
        Self::with_noise_threshold(
            recording_id,
            actor_id,
            start_time,
            click_offsets,
            rhythm_class,
            ornamented,
            tempo_class,
            NOISE_THRESHOLD,
        )
    }

    /// Validates categories, start time and offsets. Offsets closer than
    /// `noise_threshold` to the previous kept click are dropped.
    #[allow(clippy::too_many_arguments)]
    pub fn with_noise_threshold(
        recording_id: impl Into<String>,
        actor_id: ActorId,
        start_time: f64,
        click_offsets: Vec<f64>,
        rhythm_class: u8,
        ornamented: bool,
        tempo_class: u8,
        noise_threshold: f64,
    ) -> Result<Self> {
        if rhythm_class >= RHYTHM_CLASSES || tempo_class >= TEMPO_CLASSES {
            return Err(TranscriptError::InvalidCategory {
                rhythm_class,
                tempo_class,
            });
        }
        let recording_id = recording_id.into();
        if !start_time.is_finite() {
            return Err(TranscriptError::InvalidStartTime {
                recording_id,
                start_time,
            });
        }

        let valid = click_offsets.first().map_or(true, |&first| first == 0.0)
            && click_offsets.iter().all(|offset| offset.is_finite())
            && click_offsets.windows(2).all(|pair| pair[0] <= pair[1]);
        if !valid {
            return Err(TranscriptError::InvalidClickOffsets {
                recording_id,
                offsets: click_offsets,
            });
        }

        let mut kept = vec![0.0];
        for offset in click_offsets.into_iter().skip(1) {
            let previous = kept.last().copied().unwrap_or(0.0);
            if offset - previous > noise_threshold {
                kept.push(offset);
            }
        }

        Ok(Self {
            recording_id,
            actor_id,
            start_time,
            click_offsets: kept,
            rhythm_class,
            ornamented,
            tempo_class,
        })
    }

    pub fn from_raw(raw: &RawRow, noise_threshold: f64) -> Result<Self> {
        let row = raw.row;
        let duration = parse_span(row, "Duration", &raw.duration)?;
        let start_time: f64 = parse_field(row, "TsTo", &raw.start_time)?;
        if !start_time.is_finite() {
            return Err(TranscriptError::malformed(row, "TsTo", &raw.start_time));
        }
        let actor = parse_integral(row, "Whale", &raw.actor)?;
        let actor_id =
            ActorId::try_from(actor).map_err(|_| TranscriptError::malformed(row, "Whale", &raw.actor))?;
        let rhythm = parse_integral(row, "Rhythm", &raw.rhythm)?;
        let ornamented = parse_flag(row, "Ornament", &raw.ornament)?;

        let icis = raw
            .icis
            .iter()
            .enumerate()
            .map(|(i, v)| parse_span(row, &format!("ICI{}", i + 1), v))
            .collect::<Result<Vec<_>>>()?;

        let rhythm_class =
            u8::try_from(rhythm).map_err(|_| TranscriptError::malformed(row, "Rhythm", &raw.rhythm))?;
        Self::with_noise_threshold(
            raw.recording_id.clone(),
            actor_id,
            start_time,
            click_offsets_from_icis(&icis, noise_threshold),
            rhythm_class,
            ornamented,
            tempo_class_for_duration(duration),
            noise_threshold,
        )
    }

    pub fn click_offsets(&self) -> &[f64] {
        &self.click_offsets
    }

    /// Duration up to the last canonical click; an ornament click is excluded.
    pub fn ornament_free_duration(&self) -> f64 {
        let trailing = if self.ornamented { 2 } else { 1 };
        let index = self.click_offsets.len().saturating_sub(trailing);
        self.click_offsets.get(index).copied().unwrap_or(0.0)
    }

    pub fn end_time(&self) -> f64 {
        self.start_time + self.click_offsets.last().copied().unwrap_or(0.0)
    }
}
