//! Settings loaded from TOML.
//!
//! - `init_custom(toml_content)` sets a custom TOML before first `settings()` call
//! - `settings()` returns `&'static Settings` (lazy-init singleton, for binaries)
//! - Library types take a `&Settings` at construction instead of reading the global
//! - Default values are embedded via `include_str!("default_settings.toml")`

use std::sync::OnceLock;
use std::time::Duration;

use serde::Deserialize;

use crate::filter::FilterConfig;
use crate::scorer::ScorerWeights;

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
    pub input: InputSettings,
    pub cache: CacheSettings,
    pub generation: GenerationSettings,
    pub ranking: RankingSettings,
    pub filter: FilterConfig,
    pub scorer: ScorerWeights,
    pub runner: RunnerSettings,
}

impl Default for Settings {
    fn default() -> Self {
        settings().clone()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct InputSettings {
    pub max_text_len: usize,
    pub default_limit: usize,
    pub min_limit: usize,
    pub max_limit: usize,
    pub default_mode: String,
}

impl InputSettings {
    /// 0 means "use the default"; anything else clamps to `[min, max]`.
    pub fn normalize_limit(&self, limit: usize) -> usize {
        let limit = if limit == 0 { self.default_limit } else { limit };
        limit.clamp(self.min_limit, self.max_limit)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CacheSettings {
    pub response: CacheRoleSettings,
    pub token: CacheRoleSettings,
    pub general: CacheRoleSettings,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct CacheRoleSettings {
    pub max_size: usize,
    pub ttl_secs: u64,
}

impl CacheRoleSettings {
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_secs)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct GenerationSettings {
    pub max_variants: usize,
    pub max_native_forms: usize,
    /// Run local generation even when the runner produced candidates.
    pub supplement_local: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RankingSettings {
    pub result_floor: usize,
    pub result_ceiling: usize,
}

impl RankingSettings {
    /// Size of the ranked pool: `max(floor, min(limit, ceiling))`.
    ///
    /// The pipeline then returns at most the normalized `limit` entries of
    /// this pool, so the visible count is `min(limit, ceiling)` (or fewer if
    /// fewer candidates survive). `result_floor` only changes the output when
    /// it exceeds `result_ceiling`; with the defaults it has no effect.
    pub fn pool_size(&self, limit: usize) -> usize {
        self.result_floor.max(limit.min(self.result_ceiling))
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct RunnerSettings {
    pub base_url: String,
    pub path: String,
    pub timeout_secs: u64,
}

impl RunnerSettings {
    pub fn is_enabled(&self) -> bool {
        !self.base_url.trim().is_empty()
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

pub fn parse_settings_toml(toml_str: &str) -> Result<Settings, SettingsError> {
    let s: Settings = toml::from_str(toml_str).map_err(|e| SettingsError::Parse(e.to_string()))?;
    validate(&s)?;
    Ok(s)
}

fn invalid(field: &str, reason: &str) -> SettingsError {
    SettingsError::InvalidValue {
        field: field.to_string(),
        reason: reason.to_string(),
    }
}

fn validate(s: &Settings) -> Result<(), SettingsError> {
    macro_rules! check_positive {
        ($section:ident . $field:ident) => {
            if s.$section.$field == 0 {
                return Err(invalid(
                    concat!(stringify!($section), ".", stringify!($field)),
                    "must be positive",
                ));
            }
        };
    }
    macro_rules! check_weight {
        ($field:ident) => {
            let w = s.scorer.$field;
            if !w.is_finite() || !(0.0..=1.0).contains(&w) {
                return Err(invalid(
                    concat!("scorer.", stringify!($field)),
                    "must be within [0, 1]",
                ));
            }
        };
    }

    check_positive!(input.max_text_len);
    check_positive!(input.min_limit);
    check_positive!(input.max_limit);
    if s.input.min_limit > s.input.max_limit {
        return Err(invalid("input.min_limit", "must not exceed input.max_limit"));
    }
    if !(s.input.min_limit..=s.input.max_limit).contains(&s.input.default_limit) {
        return Err(invalid(
            "input.default_limit",
            "must be within [min_limit, max_limit]",
        ));
    }

    check_positive!(generation.max_variants);
    check_positive!(generation.max_native_forms);

    check_positive!(ranking.result_floor);
    check_positive!(ranking.result_ceiling);

    check_weight!(frequency);
    check_weight!(phonetic);
    check_weight!(form);
    check_weight!(length);
    check_weight!(runner_score);

    check_positive!(runner.timeout_secs);
    if s.runner.is_enabled() && !s.runner.path.starts_with('/') {
        return Err(invalid("runner.path", "must start with '/'"));
    }

    Ok(())
}
