use serde::{Deserialize, Serialize};
use std::path::Path;

use anyhow::Context;

pub const CHORUS_WINDOW: f64 = 0.5;
pub const PAUSE_THRESHOLD: f64 = 10.0;
pub const NOISE_THRESHOLD: f64 = 0.0002;

/// 25th and 75th percentiles of historical same-category duration deltas.
pub const RUBATO_LOW: f64 = -0.021416925;
pub const RUBATO_HIGH: f64 = 0.018462550;

pub const RECORDING_KEY_LEN: usize = 9;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TranscriptConfig {
    /// Seconds within which codas from different actors form a chorus.
    pub chorus_window: f64,
    /// Gaps strictly longer than this produce a silence line and block rubato comparison.
    pub pause_threshold: f64,
    /// Inter-click intervals at or below this are annotation noise.
    pub noise_threshold: f64,
    pub rubato_low: f64,
    pub rubato_high: f64,
    /// Number of leading characters of the recording id used as the grouping key.
    pub recording_key_len: usize,
}

impl Default for TranscriptConfig {
    fn default() -> Self {
        Self {
            chorus_window: CHORUS_WINDOW,
            pause_threshold: PAUSE_THRESHOLD,
            noise_threshold: NOISE_THRESHOLD,
            rubato_low: RUBATO_LOW,
            rubato_high: RUBATO_HIGH,
            recording_key_len: RECORDING_KEY_LEN,
        }
    }
}

impl TranscriptConfig {
    pub fn from_json_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let config = serde_json::from_str(&content)
            .with_context(|| format!("parsing config {}", path.display()))?;
        Ok(config)
    }
}
