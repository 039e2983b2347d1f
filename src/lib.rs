pub mod batch;
pub mod coda;
pub mod config;
pub mod dataset;
pub mod error;
pub mod timeline;
pub mod transcript;

pub use config::TranscriptConfig;
pub use error::TranscriptError;
pub use timeline::Timeline;
pub use transcript::TranscriptRenderer;
