//! Global settings loaded from TOML.
//!
//! - `init_custom(toml_content)` sets a custom TOML before first `settings()` call
//! - `settings()` returns `&'static Settings` (lazy-init singleton)
//! - Default values are embedded via `include_str!("default_settings.toml")`

use std::sync::OnceLock;

use serde::Deserialize;

pub const DEFAULT_SETTINGS_TOML: &str = include_str!("default_settings.toml");

static CUSTOM_TOML: OnceLock<String> = OnceLock::new();

/// Set custom TOML before first `settings()` call.
pub fn init_custom(toml_content: String) -> Result<(), SettingsError> {
    parse_settings_toml(&toml_content)?;
    CUSTOM_TOML
        .set(toml_content)
        .map_err(|_| SettingsError::AlreadyInitialized)
}

/// Get or initialize the global settings singleton.
pub fn settings() -> &'static Settings {
    static INSTANCE: OnceLock<Settings> = OnceLock::new();
    INSTANCE.get_or_init(|| {
        let toml_str = CUSTOM_TOML
            .get()
            .map(|s| s.as_str())
            .unwrap_or(DEFAULT_SETTINGS_TOML);
        parse_settings_toml(toml_str).expect("settings TOML must be valid")
    })
}

/// Returns the embedded default settings TOML content.
pub fn default_toml() -> &'static str {
    DEFAULT_SETTINGS_TOML
}

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("TOML parse error: {0}")]
    Parse(String),
    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },
    #[error("settings already initialized")]
    AlreadyInitialized,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub model: ModelSettings,
    #[serde(default)]
    pub pruning: PruningSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ModelSettings {
    pub ngram_length: usize,
    pub beam_width: usize,
    pub press_probability: f64,
    pub max_input_len: usize,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PruningSettings {
    /// Minimum candidate-tree depth before pruning runs; `None` means N.
    #[serde(default)]
    pub min_depth: Option<usize>,
}

pub fn parse_settings_toml(toml_str: &str) -> Result<Settings, SettingsError> {
    let s: Settings = toml::from_str(toml_str).map_err(|e| SettingsError::Parse(e.to_string()))?;
    validate(&s)?;
    Ok(s)
}

fn validate(s: &Settings) -> Result<(), SettingsError> {
    macro_rules! check_positive_usize {
        ($section:ident . $field:ident) => {
            if s.$section.$field == 0 {
                return Err(SettingsError::InvalidValue {
                    field: concat!(stringify!($section), ".", stringify!($field)).to_string(),
                    reason: "must be positive".to_string(),
                });
            }
        };
    }

    check_positive_usize!(model.ngram_length);
    check_positive_usize!(model.beam_width);
    check_positive_usize!(model.max_input_len);

    let p = s.model.press_probability;
    if !(0.0..=1.0).contains(&p) {
        return Err(SettingsError::InvalidValue {
            field: "model.press_probability".to_string(),
            reason: "must lie in [0, 1]".to_string(),
        });
    }

    if s.pruning.min_depth == Some(0) {
        return Err(SettingsError::InvalidValue {
            field: "pruning.min_depth".to_string(),
            reason: "must be positive when set".to_string(),
        });
    }

    Ok(())
}
