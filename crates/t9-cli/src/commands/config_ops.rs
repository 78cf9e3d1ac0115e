use std::fs;

pub fn settings_export() {
    print!("{}", t9_core::settings::default_toml());
}

pub fn settings_validate(file: &str) {
    let content = die!(fs::read_to_string(file), "Error reading {file}: {}");
    let s = die!(
        t9_core::settings::parse_settings_toml(&content),
        "Error: {}"
    );
    let prune = s
        .pruning
        .min_depth
        .map_or_else(|| "ngram_length".to_string(), |d| d.to_string());
    println!(
        "OK: model.ngram_length={}, model.beam_width={}, model.press_probability={}, pruning.min_depth={}",
        s.model.ngram_length, s.model.beam_width, s.model.press_probability, prune
    );
}

/// Install a custom settings file before the first `settings()` call.
pub fn load_settings(file: &str) {
    let content = die!(fs::read_to_string(file), "Error reading {file}: {}");
    die!(
        t9_core::settings::init_custom(content),
        "Error in settings {file}: {}"
    );
}
