use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use coda_transcript::batch::{render_batch, render_batch_concurrent, transcript_text};
use coda_transcript::dataset::load_table;
use coda_transcript::{TranscriptConfig, TranscriptRenderer};

#[derive(Parser)]
#[command(name = "coda-transcript", about = "Render coda tables as chorus-aware transcripts")]
struct Cli {
    /// Augmented coda table (CSV with header)
    #[arg(long)]
    table: PathBuf,

    /// JSON file overriding default thresholds
    #[arg(long)]
    config: Option<PathBuf>,

    /// Characters of the recording id used to group codas
    #[arg(long)]
    key_len: Option<usize>,

    /// Seconds of silence that produce a pause line
    #[arg(long)]
    pause_threshold: Option<f64>,

    /// Write the transcript here instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Render recordings on worker threads
    #[arg(long)]
    concurrent: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber).context("installing log subscriber")?;

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => TranscriptConfig::from_json_file(path)?,
        None => TranscriptConfig::default(),
    };
    if let Some(key_len) = cli.key_len {
        config.recording_key_len = key_len;
    }
    if let Some(pause) = cli.pause_threshold {
        config.pause_threshold = pause;
    }
    tracing::info!(?config, "configuration");

    let rows = load_table(&cli.table)?;
    let renderer = TranscriptRenderer::new(config);
    let outcomes = if cli.concurrent {
        render_batch_concurrent(rows, renderer).await
    } else {
        render_batch(rows, &renderer)
    };

    let failed = outcomes.iter().filter(|o| o.result.is_err()).count();
    tracing::info!(recordings = outcomes.len(), failed, "batch complete");

    let text = transcript_text(&outcomes);
    match &cli.output {
        Some(path) => std::fs::write(path, text)
            .with_context(|| format!("writing {}", path.display()))?,
        None => print!("{}", text),
    }
    Ok(())
}
