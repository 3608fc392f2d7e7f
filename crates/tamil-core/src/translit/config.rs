use std::collections::BTreeMap;

use serde::Deserialize;

#[derive(Deserialize)]
struct SchemeConfig {
    consonants: BTreeMap<String, String>,
    vowels: BTreeMap<String, (String, String)>,
    #[serde(default)]
    initial: BTreeMap<String, String>,
}

/// Parsed conversion table. Keys are lowercase ASCII.
#[derive(Debug, Clone)]
pub struct SchemeTable {
    pub consonants: BTreeMap<String, String>,
    /// key → (independent vowel, dependent sign)
    pub vowels: BTreeMap<String, (String, String)>,
    /// Consonant overrides at the start of a word.
    pub initial: BTreeMap<String, String>,
}

#[derive(Debug, thiserror::Error)]
pub enum SchemeConfigError {
    #[error("TOML parse error: {0}")]
    Parse(String),
    #[error("[{0}] table is empty")]
    Empty(&'static str),
    #[error("key must be lowercase ASCII: {0}")]
    InvalidKey(String),
    #[error("empty value for key: {0}")]
    EmptyValue(String),
    #[error("initial override without a matching consonant: {0}")]
    UnknownInitial(String),
    #[error("conversion table already initialized")]
    AlreadyInitialized,
}

fn check_key(key: &str) -> Result<(), SchemeConfigError> {
    if key.is_empty() || !key.bytes().all(|b| b.is_ascii_lowercase()) {
        return Err(SchemeConfigError::InvalidKey(key.to_string()));
    }
    Ok(())
}

/// Parse TOML text into a [`SchemeTable`].
pub fn parse_scheme_toml(toml_str: &str) -> Result<SchemeTable, SchemeConfigError> {
    let config: SchemeConfig =
        toml::from_str(toml_str).map_err(|e| SchemeConfigError::Parse(e.to_string()))?;

    if config.consonants.is_empty() {
        return Err(SchemeConfigError::Empty("consonants"));
    }
    if config.vowels.is_empty() {
        return Err(SchemeConfigError::Empty("vowels"));
    }

    for (key, value) in config.consonants.iter().chain(config.initial.iter()) {
        check_key(key)?;
        if value.is_empty() {
            return Err(SchemeConfigError::EmptyValue(key.clone()));
        }
    }
    for (key, (independent, _sign)) in &config.vowels {
        check_key(key)?;
        // The sign may be empty (inherent vowel); the independent form may not.
        if independent.is_empty() {
            return Err(SchemeConfigError::EmptyValue(key.clone()));
        }
    }
    if let Some(key) = config
        .initial
        .keys()
        .find(|k| !config.consonants.contains_key(*k))
    {
        return Err(SchemeConfigError::UnknownInitial(key.clone()));
    }

    Ok(SchemeTable {
        consonants: config.consonants,
        vowels: config.vowels,
        initial: config.initial,
    })
}
