pub mod line;
pub mod metrics;
pub mod renderer;
pub mod silence;
pub mod state;

pub use line::{RecordingTranscript, TranscriptLine};
pub use metrics::TranscriptSnapshot;
pub use renderer::{RenderedRecording, TranscriptRenderer};
pub use silence::{SilenceFormatter, SilencePhrase, SilenceUnit};
pub use state::{Cue, Phase, TranscriptState};
