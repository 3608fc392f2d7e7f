use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::Args;

use tamil_core::freq::FrequencyOracle;
use tamil_core::settings::{self, Settings, SettingsError};
use tamil_core::translit::{SchemeConfigError, TableConverter};
use tamil_suggest::Pipeline;

macro_rules! die {
    ($result:expr, $($arg:tt)*) => {
        $result.unwrap_or_else(|e| {
            eprintln!($($arg)*, e);
            std::process::exit(1);
        })
    };
}

pub mod config_ops;
pub mod suggest_ops;

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("failed to read {path}: {source}")]
    Read { path: String, source: io::Error },
    #[error(transparent)]
    Settings(#[from] SettingsError),
    #[error(transparent)]
    Scheme(#[from] SchemeConfigError),
    #[error("{0} must be positive")]
    NotPositive(&'static str),
}

/// Options shared by every command that builds a pipeline.
#[derive(Debug, Default, Args)]
pub struct PipelineArgs {
    /// Word frequency TSV (`word<TAB>count`); missing file means no
    /// frequency signal
    #[arg(long)]
    pub freq: Option<PathBuf>,
    /// Remote runner base URL; enables the runner stage
    #[arg(long, env = "TRANSLITERATOR_BASE_URL")]
    pub runner_url: Option<String>,
    /// Remote runner timeout in seconds
    #[arg(long, env = "TRANSLITERATOR_TIMEOUT_SECONDS")]
    pub runner_timeout: Option<u64>,
    /// Maximum accepted input length in characters
    #[arg(long, env = "MAX_TEXT_LEN")]
    pub max_text_len: Option<usize>,
}

fn read_file(path: &Path) -> Result<String, CliError> {
    fs::read_to_string(path).map_err(|source| CliError::Read {
        path: path.display().to_string(),
        source,
    })
}

/// Install custom settings and conversion table before anything reads the
/// global `settings()` or `TableConverter::global()`.
pub fn init_globals(
    settings_file: Option<&Path>,
    scheme_file: Option<&Path>,
) -> Result<(), CliError> {
    if let Some(path) = settings_file {
        settings::init_custom(read_file(path)?)?;
    }
    if let Some(path) = scheme_file {
        TableConverter::init_custom(read_file(path)?)?;
    }
    Ok(())
}

/// Global settings with command-line and environment overrides applied.
pub fn load_settings(args: &PipelineArgs) -> Result<Settings, CliError> {
    let mut settings = Settings::default();

    if let Some(url) = &args.runner_url {
        settings.runner.base_url = url.trim().to_string();
    }
    if let Some(secs) = args.runner_timeout {
        if secs == 0 {
            return Err(CliError::NotPositive("runner timeout"));
        }
        settings.runner.timeout_secs = secs;
    }
    if let Some(len) = args.max_text_len {
        if len == 0 {
            return Err(CliError::NotPositive("max text length"));
        }
        settings.input.max_text_len = len;
    }
    Ok(settings)
}

pub fn build_pipeline(args: &PipelineArgs) -> Result<Pipeline, CliError> {
    let settings = load_settings(args)?;
    let oracle = match &args.freq {
        Some(path) => FrequencyOracle::open_or_empty(path),
        None => FrequencyOracle::empty(),
    };
    Ok(Pipeline::from_settings(&settings, Arc::new(oracle)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_without_overrides() {
        let s = load_settings(&PipelineArgs::default()).unwrap();
        assert_eq!(s.input.max_text_len, 64);
        assert!(!s.runner.is_enabled());
    }

    #[test]
    fn test_overrides_applied() {
        let args = PipelineArgs {
            runner_url: Some(" http://127.0.0.1:9000 ".into()),
            runner_timeout: Some(2),
            max_text_len: Some(32),
            ..Default::default()
        };
        let s = load_settings(&args).unwrap();
        assert_eq!(s.runner.base_url, "http://127.0.0.1:9000");
        assert_eq!(s.runner.timeout_secs, 2);
        assert_eq!(s.input.max_text_len, 32);
        assert!(s.runner.is_enabled());
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let args = PipelineArgs {
            runner_timeout: Some(0),
            ..Default::default()
        };
        assert!(matches!(
            load_settings(&args),
            Err(CliError::NotPositive(_))
        ));
    }

    #[test]
    fn test_init_globals_missing_file() {
        let missing = Path::new("/nonexistent/settings.toml");
        assert!(matches!(
            init_globals(Some(missing), None),
            Err(CliError::Read { .. })
        ));
        assert!(matches!(
            init_globals(None, Some(missing)),
            Err(CliError::Read { .. })
        ));
    }

    // Rejected files never reach the globals, so these leave the defaults
    // in place for the other tests.
    #[test]
    fn test_init_globals_invalid_files() {
        let dir = tempfile::tempdir().unwrap();
        let settings = dir.path().join("settings.toml");
        fs::write(&settings, "[input]\nmax_text_len = \"many\"\n").unwrap();
        assert!(matches!(
            init_globals(Some(&settings), None),
            Err(CliError::Settings(_))
        ));

        let scheme = dir.path().join("scheme.toml");
        fs::write(&scheme, "[consonants]\n").unwrap();
        assert!(matches!(
            init_globals(None, Some(&scheme)),
            Err(CliError::Scheme(_))
        ));
    }
}
