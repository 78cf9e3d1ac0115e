use std::path::Path;
use std::time::Instant;

use serde::Serialize;
use t9_core::Evaluation;
use tracing::{debug, info_span};

use super::{load_model, millis, ModelOptions, Timings};
use crate::corpus_io::read_text;

#[derive(Debug, Serialize)]
struct EvalReport {
    suggestion: String,
    error_rate: f64,
    compared: usize,
    mismatches: usize,
    test_bytes: usize,
    timings: Timings,
}

fn eval_report(eval: &Evaluation, test_bytes: usize, timings: Timings) -> EvalReport {
    EvalReport {
        suggestion: String::from_utf8_lossy(&eval.suggestion).into_owned(),
        error_rate: eval.error_rate,
        compared: eval.compared,
        mismatches: eval.mismatches,
        test_bytes,
        timings,
    }
}

/// Train on `train_file`, then type the key presses for the first
/// `test_limit` bytes of `test_file` and compare the completion with the text.
pub fn evaluate(
    train_file: &str,
    test_file: &str,
    test_limit: u64,
    opts: &ModelOptions,
    json: bool,
) {
    let _span = info_span!("evaluate", test_limit).entered();
    let mut timings = Timings::default();
    let mut model = load_model(train_file, opts, &mut timings);

    let test_text = die!(
        read_text(Path::new(test_file), test_limit),
        "Error loading test text: {}"
    );

    let start = Instant::now();
    let eval = die!(model.evaluate(&test_text), "Error during evaluation: {}");
    timings.run_ms = millis(start.elapsed());
    debug!(run_ms = timings.run_ms, error_rate = eval.error_rate);

    if json {
        let report = eval_report(&eval, test_text.len(), timings);
        println!(
            "{}",
            serde_json::to_string_pretty(&report).expect("JSON serialization failed")
        );
        return;
    }

    println!("Suggestion: \"{}\"", String::from_utf8_lossy(&eval.suggestion));
    println!(
        "Error: {:.3} ({} of {} symbols differ), {:.2} ms",
        eval.error_rate, eval.mismatches, eval.compared, timings.run_ms
    );
}
