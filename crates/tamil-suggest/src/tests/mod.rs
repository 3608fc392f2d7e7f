mod caching;
mod concurrency;

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use tamil_core::freq::FrequencyOracle;
use tamil_core::settings::{parse_settings_toml, Settings, DEFAULT_SETTINGS_TOML};
use tamil_core::translit::{ConvertError, ScriptConverter, TableConverter};

use super::{Pipeline, Runner, RunnerError, RunnerSuggestion};
use crate::types::{GenerationRequest, PipelineResult};

pub(super) fn test_settings() -> Settings {
    parse_settings_toml(DEFAULT_SETTINGS_TOML).unwrap()
}

pub(super) fn settings_with(from: &str, to: &str) -> Settings {
    let toml = DEFAULT_SETTINGS_TOML.replace(from, to);
    assert_ne!(toml, DEFAULT_SETTINGS_TOML, "replacement {from:?} not found");
    parse_settings_toml(&toml).unwrap()
}

pub(super) fn test_oracle() -> Arc<FrequencyOracle> {
    let counts: HashMap<String, u64> = [
        ("எனது", 5000),
        ("அன்பு", 9000),
        ("நான்", 20000),
        ("வீடு", 3000),
        ("கண்", 1500),
    ]
    .into_iter()
    .map(|(w, c)| (w.to_string(), c))
    .collect();
    Arc::new(FrequencyOracle::from_counts(counts))
}

/// Pipeline over the built-in table converter, no runner.
pub(super) fn make_pipeline() -> Pipeline {
    Pipeline::new(
        &test_settings(),
        test_oracle(),
        Arc::new(TableConverter::global()),
    )
}

pub(super) fn suggest(p: &Pipeline, text: &str, mode: &str, limit: usize) -> PipelineResult {
    p.suggest(&GenerationRequest::new(text, mode, limit))
}

pub(super) fn words(r: &PipelineResult) -> Vec<&str> {
    r.suggestions.iter().map(|s| s.word.as_str()).collect()
}

/// Wraps the table converter and counts calls.
#[derive(Default)]
pub(super) struct CountingConverter {
    pub calls: AtomicUsize,
}

impl ScriptConverter for CountingConverter {
    fn convert(&self, source: &str, target: &str, text: &str) -> Result<Vec<String>, ConvertError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        TableConverter::global().convert(source, target, text)
    }
}

/// Returns the same 40 two-letter words (consonant + sign) for any input.
pub(super) struct ManyOutputConverter;

impl ScriptConverter for ManyOutputConverter {
    fn convert(&self, _: &str, _: &str, _: &str) -> Result<Vec<String>, ConvertError> {
        let consonants = ['க', 'ங', 'ச', 'ஞ', 'ட', 'ண', 'த', 'ந', 'ப', 'ம'];
        let signs = ['ா', 'ி', 'ு', 'ை'];
        Ok(consonants
            .iter()
            .flat_map(|c| signs.iter().map(move |s| format!("{c}{s}")))
            .collect())
    }
}

/// Always fails, like a missing conversion library.
pub(super) struct FailingConverter;

impl ScriptConverter for FailingConverter {
    fn convert(&self, _: &str, _: &str, _: &str) -> Result<Vec<String>, ConvertError> {
        Err(ConvertError::Unavailable("library missing".into()))
    }
}

pub(super) enum FakeReply {
    Words(Vec<&'static str>),
    Status(u16),
}

pub(super) struct FakeRunner {
    reply: FakeReply,
    pub calls: AtomicUsize,
}

impl FakeRunner {
    pub fn words(words: &[&'static str]) -> Arc<Self> {
        Arc::new(Self {
            reply: FakeReply::Words(words.to_vec()),
            calls: AtomicUsize::new(0),
        })
    }

    pub fn failing(status: u16) -> Arc<Self> {
        Arc::new(Self {
            reply: FakeReply::Status(status),
            calls: AtomicUsize::new(0),
        })
    }
}

impl Runner for FakeRunner {
    fn suggest(&self, _text: &str) -> Result<Vec<RunnerSuggestion>, RunnerError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.reply {
            FakeReply::Words(words) => Ok(words
                .iter()
                .map(|w| RunnerSuggestion {
                    word: w.to_string(),
                })
                .collect()),
            FakeReply::Status(code) => Err(RunnerError::Status(*code)),
        }
    }
}
