macro_rules! die {
    ($result:expr, $($arg:tt)*) => {
        $result.unwrap_or_else(|e| {
            eprintln!($($arg)*, e);
            std::process::exit(1);
        })
    };
}

pub mod complete_ops;
pub mod config_ops;
pub mod eval_ops;

use std::path::Path;
use std::time::{Duration, Instant};

use serde::Serialize;
use t9_core::{Model, ModelConfig};
use tracing::debug;

use crate::corpus_io::read_text;

/// Model parameters shared by the completion and evaluation commands.
#[derive(Debug, Clone, Default)]
pub struct ModelOptions {
    pub ngram_length: Option<usize>,
    pub beam_width: Option<usize>,
    pub train_limit: u64,
}

impl ModelOptions {
    /// Settings-derived configuration with command-line overrides applied.
    pub fn config(&self) -> ModelConfig {
        let mut config = ModelConfig::from_settings();
        if let Some(n) = self.ngram_length {
            config.ngram_length = n;
        }
        if let Some(k) = self.beam_width {
            config.beam_width = k;
        }
        config
    }
}

#[derive(Debug, Default, Serialize)]
pub struct Timings {
    pub load_ms: f64,
    pub build_ms: f64,
    pub run_ms: f64,
}

pub(crate) fn millis(d: Duration) -> f64 {
    d.as_secs_f64() * 1000.0
}

/// Load the training text and train a model, exiting on failure.
pub(crate) fn load_model(train_file: &str, opts: &ModelOptions, timings: &mut Timings) -> Model {
    let start = Instant::now();
    let text = die!(
        read_text(Path::new(train_file), opts.train_limit),
        "Error loading training text: {}"
    );
    timings.load_ms = millis(start.elapsed());

    let start = Instant::now();
    let model = die!(Model::new(&text, opts.config()), "Error building model: {}");
    timings.build_ms = millis(start.elapsed());
    debug!(
        train_file,
        bytes = text.len(),
        trie_nodes = model.corpus().node_count(),
        load_ms = timings.load_ms,
        build_ms = timings.build_ms,
        "model loaded"
    );

    eprintln!(
        "[corpus] {} bytes, {} trie nodes (N={}, K={}), load {:.2} ms, build {:.2} ms",
        text.len(),
        model.corpus().node_count(),
        model.config().ngram_length,
        model.config().beam_width,
        timings.load_ms,
        timings.build_ms,
    );
    model
}
