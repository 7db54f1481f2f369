//! End-to-end text polishing pipeline.
//!
//! Chains the correction engine and the number normalizer in fixed order:
//! corrections first, so dictionary entries match the raw spoken forms,
//! then number conversion over the corrected text.

use crate::config::PipelineConfig;
use crate::correction::CorrectionEngine;
use crate::dictionary::DictionaryStore;
use crate::numbers::convert_number_words;
use tracing::debug;

/// The full transcript-polishing pipeline.
pub struct Pipeline {
    engine: CorrectionEngine,
    config: PipelineConfig,
}

impl Pipeline {
    /// Builds a pipeline over the given dictionary with the given stage
    /// toggles.
    #[must_use]
    pub const fn new(store: DictionaryStore, config: PipelineConfig) -> Self {
        Self {
            engine: CorrectionEngine::new(store),
            config,
        }
    }

    /// Polishes one raw transcript: corrections, then number conversion.
    /// Stages disabled in the config are skipped.
    #[must_use]
    pub fn polish(&self, raw: &str) -> String {
        let mut text = if self.config.corrections {
            self.engine.apply_corrections(raw)
        } else {
            raw.to_owned()
        };
        if self.config.numbers {
            text = convert_number_words(&text);
        }
        debug!(input_len = raw.len(), output_len = text.len(), "polished transcript");
        text
    }

    /// The correction engine, for direct access to its dictionary.
    #[must_use]
    pub const fn engine(&self) -> &CorrectionEngine {
        &self.engine
    }

    /// Mutable access to the engine, for training new dictionary entries.
    pub fn engine_mut(&mut self) -> &mut CorrectionEngine {
        &mut self.engine
    }
}
