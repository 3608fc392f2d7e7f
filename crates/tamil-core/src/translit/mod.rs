//! Script conversion: romanized Latin text → Tamil script.
//!
//! The pipeline only sees the [`ScriptConverter`] trait, a black box that
//! returns zero or more converted strings. [`TableConverter`] is the built-in
//! implementation: a greedy longest-match over a TOML consonant/vowel table.

mod config;
mod convert;

pub use config::{parse_scheme_toml, SchemeConfigError, SchemeTable};
pub use convert::TableConverter;

pub const DEFAULT_SCHEME_TOML: &str = include_str!("default_scheme.toml");

/// Source scheme used by the pipeline.
pub const SOURCE_SCHEME: &str = "ISO";
/// Target script used by the pipeline.
pub const TARGET_SCRIPT: &str = "Tamil";

/// Returns the embedded default conversion table.
pub fn default_toml() -> &'static str {
    DEFAULT_SCHEME_TOML
}

#[derive(Debug, thiserror::Error)]
pub enum ConvertError {
    #[error("unsupported conversion: {source_scheme} → {target_script}")]
    Unsupported {
        source_scheme: String,
        target_script: String,
    },
    #[error("converter unavailable: {0}")]
    Unavailable(String),
}

/// The script-conversion primitive.
///
/// Implementations may be slow and are called from many request threads at
/// once. Callers must not rely on the order or number of outputs.
pub trait ScriptConverter: Send + Sync {
    fn convert(
        &self,
        source_scheme: &str,
        target_script: &str,
        text: &str,
    ) -> Result<Vec<String>, ConvertError>;
}

impl<T: ScriptConverter + ?Sized> ScriptConverter for &T {
    fn convert(
        &self,
        source_scheme: &str,
        target_script: &str,
        text: &str,
    ) -> Result<Vec<String>, ConvertError> {
        (**self).convert(source_scheme, target_script, text)
    }
}
