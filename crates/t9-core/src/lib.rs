pub mod corpus;
pub mod keypad;
pub mod model;
pub mod search;
pub mod settings;

pub use model::{Evaluation, Model, ModelConfig, ModelError, Suggestion};
