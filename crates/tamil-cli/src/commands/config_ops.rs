use std::fs;

pub fn settings_export() {
    print!("{}", tamil_core::settings::default_toml());
}

pub fn settings_validate(file: &str) {
    let content = die!(fs::read_to_string(file), "Error reading {file}: {}");
    let s = die!(
        tamil_core::settings::parse_settings_toml(&content),
        "Error: {}"
    );
    println!(
        "OK: input.max_text_len={}, ranking.result_floor={}, ranking.result_ceiling={}, runner={}",
        s.input.max_text_len,
        s.ranking.result_floor,
        s.ranking.result_ceiling,
        if s.runner.is_enabled() {
            s.runner.base_url.as_str()
        } else {
            "disabled"
        }
    );
}

pub fn scheme_export() {
    print!("{}", tamil_core::translit::default_toml());
}

pub fn scheme_validate(file: &str) {
    let content = die!(fs::read_to_string(file), "Error reading {file}: {}");
    let table = die!(
        tamil_core::translit::parse_scheme_toml(&content),
        "Error: {}"
    );
    println!(
        "OK: {} consonants, {} vowels, {} initial rules",
        table.consonants.len(),
        table.vowels.len(),
        table.initial.len()
    );
}
