//! Keystroke-driven completion model.
//!
//! Owns the corpus model and one typing session: the candidate tree (created
//! on the first keystroke) and the kept candidate list. Each keystroke runs
//! insert, then search, then prune once the tree is deep enough.

use tracing::{debug, debug_span};

use crate::corpus::{until_nul, CorpusModel};
use crate::keypad::{self, KeypadError, Symbol};
use crate::search::{
    prune, search_best_paths, Candidate, CandidateTree, Cost, DefaultCostFunction,
};
use crate::settings::settings;

#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    #[error(transparent)]
    Keypad(#[from] KeypadError),
    #[error("no suggestion available")]
    NoSuggestion,
    #[error("input too long: depth {depth} + {requested} keys exceeds limit {limit}")]
    InputTooLong {
        depth: usize,
        requested: usize,
        limit: usize,
    },
    #[error("invalid model configuration for {field}: {reason}")]
    InvalidConfig { field: &'static str, reason: String },
}

/// Construction-time configuration of a [`Model`].
#[derive(Debug, Clone, PartialEq)]
pub struct ModelConfig {
    /// N: n-gram window length.
    pub ngram_length: usize,
    /// K: number of kept candidates.
    pub beam_width: usize,
    pub press_probability: f64,
    /// Maximum tree depth a session may reach.
    pub max_input_len: usize,
    /// Depth at which pruning starts; `None` means `ngram_length`.
    pub prune_min_depth: Option<usize>,
}

impl ModelConfig {
    /// Configuration taken entirely from the global settings.
    pub fn from_settings() -> Self {
        let s = settings();
        Self {
            ngram_length: s.model.ngram_length,
            beam_width: s.model.beam_width,
            press_probability: s.model.press_probability,
            max_input_len: s.model.max_input_len,
            prune_min_depth: s.pruning.min_depth,
        }
    }

    /// Explicit N and K; everything else from the global settings.
    pub fn new(ngram_length: usize, beam_width: usize) -> Self {
        Self {
            ngram_length,
            beam_width,
            ..Self::from_settings()
        }
    }

    pub fn prune_depth(&self) -> usize {
        self.prune_min_depth.unwrap_or(self.ngram_length)
    }

    fn validate(&self) -> Result<(), ModelError> {
        let invalid = |field, reason: &str| ModelError::InvalidConfig {
            field,
            reason: reason.to_string(),
        };
        if self.ngram_length == 0 {
            return Err(invalid("ngram_length", "must be positive"));
        }
        if self.beam_width == 0 {
            return Err(invalid("beam_width", "must be positive"));
        }
        if !(0.0..=1.0).contains(&self.press_probability) {
            return Err(invalid("press_probability", "must lie in [0, 1]"));
        }
        if self.max_input_len == 0 {
            return Err(invalid("max_input_len", "must be positive"));
        }
        if self.prune_min_depth == Some(0) {
            return Err(invalid("prune_min_depth", "must be positive when set"));
        }
        Ok(())
    }
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self::from_settings()
    }
}

/// One entry of the ranked candidate list.
#[derive(Debug, Clone, PartialEq)]
pub struct Suggestion {
    pub text: Vec<Symbol>,
    pub cost: Cost,
}

impl Suggestion {
    /// Text as UTF-8, lossily.
    pub fn text_lossy(&self) -> String {
        String::from_utf8_lossy(&self.text).into_owned()
    }
}

/// Outcome of [`Model::evaluate`].
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    pub suggestion: Vec<Symbol>,
    /// `mismatches / compared`, 0 when nothing was compared.
    pub error_rate: f64,
    /// Positions compared: the shorter of suggestion and test text.
    pub compared: usize,
    pub mismatches: usize,
}

pub struct Model {
    corpus: CorpusModel,
    tree: Option<CandidateTree>,
    kept: Vec<Candidate>,
    config: ModelConfig,
}

impl Model {
    /// Train a model on `training_text`. A zero byte ends the text.
    pub fn new(training_text: &[u8], config: ModelConfig) -> Result<Self, ModelError> {
        config.validate()?;
        let _span = debug_span!(
            "model_new",
            ngram_length = config.ngram_length,
            beam_width = config.beam_width
        )
        .entered();
        let corpus = CorpusModel::build(training_text, config.ngram_length);
        Ok(Self {
            corpus,
            tree: None,
            kept: Vec::new(),
            config,
        })
    }

    pub fn config(&self) -> &ModelConfig {
        &self.config
    }

    pub fn corpus(&self) -> &CorpusModel {
        &self.corpus
    }

    /// The current candidate tree, if anything has been typed.
    pub fn tree(&self) -> Option<&CandidateTree> {
        self.tree.as_ref()
    }

    /// Kept candidates, best first.
    pub fn candidates(&self) -> &[Candidate] {
        &self.kept
    }

    /// Keystrokes processed in this session.
    pub fn depth(&self) -> usize {
        self.tree.as_ref().map_or(0, CandidateTree::depth)
    }

    /// Live candidate-tree nodes, root included; 0 before the first keystroke.
    pub fn node_count(&self) -> usize {
        self.tree.as_ref().map_or(0, CandidateTree::node_count)
    }

    /// Feed `keys` to the session.
    ///
    /// The whole sequence is validated, and checked against the depth limit,
    /// before anything changes.
    pub fn type_sequence(&mut self, keys: &[u8]) -> Result<(), ModelError> {
        let parsed = keypad::parse_keys(keys)?;
        let depth = self.depth();
        let limit = self.config.max_input_len;
        if depth.saturating_add(parsed.len()) > limit {
            return Err(ModelError::InputTooLong {
                depth,
                requested: parsed.len(),
                limit,
            });
        }
        if parsed.is_empty() {
            return Ok(());
        }

        let _span = debug_span!("type_sequence", keys = parsed.len(), depth).entered();
        let cost_fn = DefaultCostFunction::new(&self.corpus, self.config.press_probability);
        let tree = self.tree.get_or_insert_with(CandidateTree::new);
        let n = self.config.ngram_length;
        let prune_depth = self.config.prune_depth();

        for key in parsed {
            let depth = tree.insert_level(key, &cost_fn, n);
            self.kept = search_best_paths(tree, self.config.beam_width);
            if depth >= prune_depth {
                prune(tree, &self.kept);
            }
        }

        debug!(
            depth = tree.depth(),
            nodes = tree.node_count(),
            kept = self.kept.len(),
            best_cost = self.kept.first().map(|c| c.cost().value())
        );
        Ok(())
    }

    /// Type `keys` and return the best completion of the session so far.
    pub fn autocomplete(&mut self, keys: &[u8]) -> Result<Vec<Symbol>, ModelError> {
        self.type_sequence(keys)?;
        self.best()
    }

    /// Symbols of the cheapest kept candidate.
    pub fn best(&self) -> Result<Vec<Symbol>, ModelError> {
        let (Some(tree), Some(best)) = (self.tree.as_ref(), self.kept.first()) else {
            return Err(ModelError::NoSuggestion);
        };
        Ok(tree.flatten(best.nodes()))
    }

    /// The whole kept list, best first.
    pub fn suggestions(&self) -> Vec<Suggestion> {
        let Some(tree) = self.tree.as_ref() else {
            return Vec::new();
        };
        self.kept
            .iter()
            .map(|c| Suggestion {
                text: tree.flatten(c.nodes()),
                cost: c.cost(),
            })
            .collect()
    }

    /// Complete the key presses that would type `test_text` in a fresh
    /// session and compare the result with the text itself.
    pub fn evaluate(&mut self, test_text: &[u8]) -> Result<Evaluation, ModelError> {
        let test_text = until_nul(test_text);
        let _span = debug_span!("evaluate", len = test_text.len()).entered();
        let keys: Vec<u8> = keypad::keys_for_text(test_text)?
            .into_iter()
            .map(|k| k.as_byte())
            .collect();

        // A fresh session starts at depth 0; reject before discarding this one.
        let limit = self.config.max_input_len;
        if keys.len() > limit {
            return Err(ModelError::InputTooLong {
                depth: 0,
                requested: keys.len(),
                limit,
            });
        }
        if keys.is_empty() {
            return Err(ModelError::NoSuggestion);
        }

        self.reset();
        let suggestion = self.autocomplete(&keys)?;
        let compared = suggestion.len().min(test_text.len());
        let mismatches = suggestion
            .iter()
            .zip(test_text)
            .filter(|(a, b)| a != b)
            .count();
        let error_rate = if compared == 0 {
            0.0
        } else {
            mismatches as f64 / compared as f64
        };

        debug!(compared, mismatches, error_rate);
        Ok(Evaluation {
            suggestion,
            error_rate,
            compared,
            mismatches,
        })
    }

    /// Forget the typing session; the trained corpus stays.
    pub fn reset(&mut self) {
        self.tree = None;
        self.kept.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model(text: &[u8], n: usize, k: usize) -> Model {
        Model::new(text, ModelConfig::new(n, k)).unwrap()
    }

    #[test]
    fn test_config_from_settings() {
        let config = ModelConfig::from_settings();
        assert_eq!(config.ngram_length, 3);
        assert_eq!(config.beam_width, 15);
        assert_eq!(config.prune_depth(), 3);
        let explicit = ModelConfig::new(2, 4);
        assert_eq!(explicit.ngram_length, 2);
        assert_eq!(explicit.beam_width, 4);
        assert_eq!(explicit.max_input_len, config.max_input_len);
    }

    #[test]
    fn test_invalid_config() {
        let err = Model::new(b"abc", ModelConfig::new(0, 3)).err().unwrap();
        assert!(matches!(err, ModelError::InvalidConfig { field: "ngram_length", .. }));
        let err = Model::new(b"abc", ModelConfig::new(2, 0)).err().unwrap();
        assert!(matches!(err, ModelError::InvalidConfig { field: "beam_width", .. }));
        let config = ModelConfig {
            press_probability: -0.1,
            ..ModelConfig::new(2, 3)
        };
        assert!(Model::new(b"abc", config).is_err());
    }

    #[test]
    fn test_banana_autocomplete() {
        let mut m = model(b"banana", 2, 3);
        assert_eq!(m.autocomplete(b"26").unwrap(), b"an".to_vec());
        let s = m.suggestions();
        assert_eq!(s.len(), 3);
        assert_eq!(s[0].text_lossy(), "an");
        assert!(s[0].cost.is_finite());
        assert!(s[1..].iter().all(|x| x.cost == Cost::INFINITY));
    }

    #[test]
    fn test_sessions_continue_until_reset() {
        let mut m = model(b"banana", 2, 3);
        m.type_sequence(b"2").unwrap();
        assert_eq!(m.autocomplete(b"6").unwrap(), b"an".to_vec());
        assert_eq!(m.depth(), 2);
        m.reset();
        assert_eq!(m.depth(), 0);
        assert_eq!(m.node_count(), 0);
        assert!(matches!(m.best(), Err(ModelError::NoSuggestion)));
    }

    #[test]
    fn test_invalid_key_leaves_model_unchanged() {
        let mut m = model(b"banana", 2, 3);
        m.type_sequence(b"2").unwrap();
        let nodes = m.node_count();
        let before = m.suggestions();

        let err = m.autocomplete(b"5X9").unwrap_err();
        assert!(matches!(
            err,
            ModelError::Keypad(KeypadError::InvalidKeySequence { position: 1, byte: b'X' })
        ));
        assert_eq!(m.depth(), 1);
        assert_eq!(m.node_count(), nodes);
        assert_eq!(m.suggestions(), before);
    }

    #[test]
    fn test_invalid_key_on_fresh_model_creates_no_tree() {
        let mut m = model(b"banana", 2, 3);
        assert!(m.type_sequence(b"5X9").is_err());
        assert!(m.tree().is_none());
    }

    #[test]
    fn test_empty_input_has_no_suggestion() {
        let mut m = model(b"banana", 2, 3);
        assert!(matches!(m.autocomplete(b""), Err(ModelError::NoSuggestion)));
        assert!(m.suggestions().is_empty());
    }

    #[test]
    fn test_input_too_long() {
        let config = ModelConfig {
            max_input_len: 3,
            ..ModelConfig::new(2, 2)
        };
        let mut m = Model::new(b"banana", config).unwrap();
        m.type_sequence(b"22").unwrap();
        let err = m.type_sequence(b"26").unwrap_err();
        assert!(matches!(
            err,
            ModelError::InputTooLong { depth: 2, requested: 2, limit: 3 }
        ));
        assert_eq!(m.depth(), 2);
        m.type_sequence(b"6").unwrap();
        assert_eq!(m.depth(), 3);
    }

    #[test]
    fn test_evaluate_too_long_keeps_session() {
        let config = ModelConfig {
            max_input_len: 3,
            ..ModelConfig::new(2, 3)
        };
        let mut m = Model::new(b"banana", config).unwrap();
        m.type_sequence(b"26").unwrap();
        let before = m.suggestions();

        let err = m.evaluate(b"banana").unwrap_err();
        assert!(matches!(
            err,
            ModelError::InputTooLong { depth: 0, requested: 6, limit: 3 }
        ));
        assert_eq!(m.depth(), 2);
        assert_eq!(m.suggestions(), before);

        let err = m.evaluate(b"").unwrap_err();
        assert!(matches!(err, ModelError::NoSuggestion));
        assert_eq!(m.depth(), 2);
    }

    #[test]
    fn test_prune_min_depth_override() {
        let eager = ModelConfig {
            prune_min_depth: Some(1),
            ..ModelConfig::new(3, 2)
        };
        let mut m = Model::new(b"banana", eager).unwrap();
        m.type_sequence(b"2").unwrap();
        // Pruned straight away: root plus the two kept leaves.
        assert_eq!(m.node_count(), 3);

        let mut lazy = model(b"banana", 3, 2);
        lazy.type_sequence(b"2").unwrap();
        assert_eq!(lazy.node_count(), 1 + keypad::alphabet().len());
    }

    #[test]
    fn test_evaluate_reproducible_text() {
        let mut m = model(b"the cat sat on the mat", 3, 5);
        let eval = m.evaluate(b"the cat").unwrap();
        assert_eq!(eval.suggestion, b"the cat".to_vec());
        assert_eq!(eval.error_rate, 0.0);
        assert_eq!(eval.compared, 7);
        assert_eq!(eval.mismatches, 0);
    }

    #[test]
    fn test_evaluate_counts_mismatches() {
        // "ba" is the only observed bigram typed by 2-2; "ab" is never seen.
        let mut m = model(b"banana", 2, 3);
        let eval = m.evaluate(b"ab").unwrap();
        assert_eq!(eval.suggestion, b"ba".to_vec());
        assert_eq!(eval.mismatches, 2);
        assert_eq!(eval.error_rate, 1.0);
    }

    #[test]
    fn test_evaluate_unmapped_symbol() {
        let mut m = model(b"banana", 2, 3);
        let err = m.evaluate(b"ok!").unwrap_err();
        assert!(matches!(
            err,
            ModelError::Keypad(KeypadError::UnmappedSymbol { position: 2, symbol: b'!' })
        ));
    }

    #[test]
    fn test_evaluate_stops_at_zero_byte() {
        let mut m = model(b"banana", 2, 3);
        let eval = m.evaluate(b"an\0!!").unwrap();
        assert_eq!(eval.suggestion, b"an".to_vec());
        assert_eq!(eval.compared, 2);
    }
}
