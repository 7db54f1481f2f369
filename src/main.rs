use anyhow::{Context, Result};
use std::io::{self, BufRead, Write};

use transcript_polish::config::Config;
use transcript_polish::dictionary::DictionaryStore;
use transcript_polish::pipeline::Pipeline;

/// Reads raw transcripts from stdin, one per line, and writes the polished
/// form of each to stdout.
fn main() -> Result<()> {
    let config = Config::load()?;
    transcript_polish::telemetry::init(config.telemetry.enabled, &config.telemetry.log_path)?;
    tracing::info!("transcript-polish starting");

    let dictionary_path = Config::expand_path(&config.dictionary.path)?;
    let store = DictionaryStore::open(dictionary_path);
    tracing::info!(entries = store.len(), "dictionary loaded");

    let pipeline = Pipeline::new(store, config.pipeline);

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = stdout.lock();
    for line in stdin.lock().lines() {
        let line = line.context("failed to read from stdin")?;
        writeln!(out, "{}", pipeline.polish(&line)).context("failed to write to stdout")?;
    }

    Ok(())
}
