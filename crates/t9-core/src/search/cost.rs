use std::cmp::Ordering;
use std::fmt;
use std::ops::Add;

use crate::corpus::CorpusModel;
use crate::keypad::{Key, Symbol};

/// Cumulative negative log-probability. Lower is more probable.
///
/// Probability 0 maps to `+inf`. Values are normalised on construction
/// (`-0.0` becomes `0.0`, NaN becomes `+inf`) so the total order agrees with
/// numeric order and all infinities compare equal.
#[derive(Debug, Clone, Copy, Default)]
pub struct Cost(f64);

impl Cost {
    pub const ZERO: Cost = Cost(0.0);
    pub const INFINITY: Cost = Cost(f64::INFINITY);

    pub fn new(value: f64) -> Self {
        if value.is_nan() {
            Self::INFINITY
        } else if value == 0.0 {
            Self::ZERO
        } else {
            Cost(value)
        }
    }

    /// `-ln(p)`, with `p <= 0` mapped to `+inf`.
    pub fn from_probability(p: f64) -> Self {
        if p > 0.0 {
            Self::new(-p.ln())
        } else {
            Self::INFINITY
        }
    }

    pub fn value(self) -> f64 {
        self.0
    }

    pub fn is_finite(self) -> bool {
        self.0.is_finite()
    }
}

impl Add for Cost {
    type Output = Cost;

    fn add(self, rhs: Cost) -> Cost {
        Cost::new(self.0 + rhs.0)
    }
}

impl PartialEq for Cost {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Cost {}

impl PartialOrd for Cost {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Cost {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl fmt::Display for Cost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_infinite() {
            f.write_str("inf")
        } else {
            write!(f, "{:.4}", self.0)
        }
    }
}

/// Scores one step of the candidate tree.
///
/// `word` is the context (up to N-1 symbols along the path) followed by the
/// symbol being scored as its last element.
pub trait CostFunction {
    fn transition_cost(&self, key: Key, word: &[Symbol]) -> Cost;
}

/// Keypad likelihood plus n-gram likelihood:
/// `-ln(press(key, s)) - ln(P(s | context))`.
pub struct DefaultCostFunction<'a> {
    corpus: &'a CorpusModel,
    press_probability: f64,
}

impl<'a> DefaultCostFunction<'a> {
    pub fn new(corpus: &'a CorpusModel, press_probability: f64) -> Self {
        Self {
            corpus,
            press_probability,
        }
    }
}

impl CostFunction for DefaultCostFunction<'_> {
    fn transition_cost(&self, key: Key, word: &[Symbol]) -> Cost {
        let Some(&symbol) = word.last() else {
            return Cost::INFINITY;
        };
        let press = Cost::from_probability(key.press_probability(symbol, self.press_probability));
        if !press.is_finite() {
            return Cost::INFINITY;
        }
        press + Cost::from_probability(self.corpus.conditional_probability(word))
    }
}
