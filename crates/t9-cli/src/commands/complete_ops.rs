use std::time::Instant;

use serde::Serialize;
use t9_core::{Model, Suggestion};
use tracing::{debug, info_span};

use super::{load_model, millis, ModelOptions, Timings};

#[derive(Debug, Serialize)]
struct SuggestionEntry {
    rank: usize,
    text: String,
    /// `None` when the cost is infinite.
    cost: Option<f64>,
}

#[derive(Debug, Serialize)]
struct CompleteReport {
    keys: String,
    suggestion: String,
    candidates: Vec<SuggestionEntry>,
    depth: usize,
    tree_nodes: usize,
    timings: Timings,
}

fn complete_report(keys: &str, best: &[u8], model: &Model, timings: Timings) -> CompleteReport {
    CompleteReport {
        keys: keys.to_string(),
        suggestion: String::from_utf8_lossy(best).into_owned(),
        candidates: entries(&model.suggestions()),
        depth: model.depth(),
        tree_nodes: model.node_count(),
        timings,
    }
}

fn entries(suggestions: &[Suggestion]) -> Vec<SuggestionEntry> {
    suggestions
        .iter()
        .enumerate()
        .map(|(i, s)| SuggestionEntry {
            rank: i + 1,
            text: s.text_lossy(),
            cost: s.cost.is_finite().then(|| s.cost.value()),
        })
        .collect()
}

/// Train on `train_file`, type `keys` and print the ranked completions.
pub fn complete(train_file: &str, keys: &str, opts: &ModelOptions, json: bool) {
    let _span = info_span!("complete", keys = keys.len()).entered();
    let mut timings = Timings::default();
    let mut model = load_model(train_file, opts, &mut timings);

    let start = Instant::now();
    let best = die!(model.autocomplete(keys.as_bytes()), "Error completing {keys:?}: {}");
    timings.run_ms = millis(start.elapsed());
    debug!(run_ms = timings.run_ms, tree_nodes = model.node_count());

    if json {
        let report = complete_report(keys, &best, &model, timings);
        println!(
            "{}",
            serde_json::to_string_pretty(&report).expect("JSON serialization failed")
        );
        return;
    }

    println!("Suggested: \"{}\"", String::from_utf8_lossy(&best));
    for (i, s) in model.suggestions().iter().enumerate() {
        println!("#{:>2}: {:<8} \"{}\"", i + 1, s.cost.to_string(), s.text_lossy());
    }
    eprintln!(
        "[complete] {} keys, {} tree nodes, {:.2} ms",
        keys.len(),
        model.node_count(),
        timings.run_ms
    );
}
