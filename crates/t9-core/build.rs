const SETTINGS_PATH: &str = "src/default_settings.toml";
const POSITIVE_MODEL_KEYS: [&str; 3] = ["ngram_length", "beam_width", "max_input_len"];

fn main() {
    println!("cargo:rerun-if-changed={SETTINGS_PATH}");
    if let Err(msg) = check_settings(include_str!("src/default_settings.toml")) {
        panic!("{SETTINGS_PATH}: {msg}");
    }
}

/// `settings()` parses these defaults with `expect`, so they must pass the
/// same rules as `settings::validate`.
fn check_settings(content: &str) -> Result<(), String> {
    let value: toml::Value = content
        .parse()
        .map_err(|e| format!("invalid TOML: {e}"))?;
    let model = value
        .get("model")
        .and_then(toml::Value::as_table)
        .ok_or("missing [model] table")?;

    for key in POSITIVE_MODEL_KEYS {
        match model.get(key).and_then(toml::Value::as_integer) {
            Some(v) if v > 0 => {}
            Some(_) => return Err(format!("model.{key} must be positive")),
            None => return Err(format!("model.{key} must be an integer")),
        }
    }

    let p = match model.get("press_probability") {
        Some(toml::Value::Float(f)) => *f,
        Some(toml::Value::Integer(i)) => *i as f64,
        _ => return Err("model.press_probability must be a number".to_string()),
    };
    if !(0.0..=1.0).contains(&p) {
        return Err("model.press_probability must lie in [0, 1]".to_string());
    }

    if let Some(min_depth) = value.get("pruning").and_then(|t| t.get("min_depth")) {
        match min_depth.as_integer() {
            Some(v) if v > 0 => {}
            _ => return Err("pruning.min_depth must be a positive integer when set".to_string()),
        }
    }
    Ok(())
}
