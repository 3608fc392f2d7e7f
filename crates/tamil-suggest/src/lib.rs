//! Suggestion pipeline for Tamil transliteration input.
//!
//! `Pipeline::suggest` turns a romanized token into a ranked, deduplicated,
//! validity-filtered list of Tamil words:
//!
//! 1. validate and normalize the request
//! 2. response-cache lookup (returns immediately on a hit)
//! 3. generation strategies in order (remote runner if configured, then
//!    local variant conversion) until one produces candidates
//! 4. merge by word, re-filter, rank, cap
//! 5. store non-empty answers in the response cache
//!
//! No stage error escapes: failures are logged and degrade to fewer or no
//! suggestions. A `Pipeline` is `Send + Sync` and meant to be shared by all
//! request threads behind an `Arc`.

mod cancel;
mod local;
pub mod rank;
pub mod runner;
pub mod strategy;
mod types;

#[cfg(test)]
mod tests;

use std::sync::Arc;

use tracing::{debug, debug_span, warn};

use tamil_core::cache::{cache_key, TtlCache};
use tamil_core::freq::FrequencyOracle;
use tamil_core::scorer::Scorer;
use tamil_core::settings::Settings;
use tamil_core::translit::{ScriptConverter, TableConverter};

pub use cancel::CancelToken;
pub use runner::{HttpRunner, Runner, RunnerError, RunnerSuggestion};
pub use strategy::{GenerationStrategy, StageOutcome};
pub use types::{
    CacheReport, CacheStatus, Candidate, GenerationPath, GenerationRequest, HealthReport,
    PipelineResult, SuggestResponse, Suggestion,
};

use types::CachedAnswer;

/// The three process-lifetime caches.
pub struct CacheSet {
    /// Final answers keyed by `(text, mode, limit)`.
    pub(crate) response: TtlCache<CachedAnswer>,
    /// Conversion outputs keyed by `(tier, token)`.
    pub(crate) token: TtlCache<Vec<String>>,
    /// General-purpose instance for embedders.
    pub general: TtlCache<Vec<Suggestion>>,
}

impl CacheSet {
    pub fn new(settings: &Settings) -> Self {
        let c = &settings.cache;
        Self {
            response: TtlCache::new(c.response.max_size, c.response.ttl()),
            token: TtlCache::new(c.token.max_size, c.token.ttl()),
            general: TtlCache::new(c.general.max_size, c.general.ttl()),
        }
    }

    pub fn clear(&self) {
        self.response.clear();
        self.token.clear();
        self.general.clear();
    }

    pub fn report(&self) -> CacheReport {
        CacheReport {
            response: self.response.stats(),
            token: self.token.stats(),
            general: self.general.stats(),
        }
    }
}

/// Per-invocation inputs shared by the generation stages.
pub(crate) struct GenerationContext<'a> {
    /// Trimmed request text, as sent to the runner.
    pub text: &'a str,
    /// Lowercased text, the source token for local generation and scoring.
    pub token: String,
    /// Length of `text` in chars; selects the filter's length cap.
    pub input_len: usize,
    pub cancel: &'a CancelToken,
}

pub struct Pipeline {
    settings: Settings,
    scorer: Scorer,
    converter: Arc<dyn ScriptConverter>,
    runner: Option<Arc<dyn Runner>>,
    strategies: Vec<GenerationStrategy>,
    caches: CacheSet,
}

impl Pipeline {
    pub fn new(
        settings: &Settings,
        oracle: Arc<FrequencyOracle>,
        converter: Arc<dyn ScriptConverter>,
    ) -> Self {
        Self {
            settings: settings.clone(),
            scorer: Scorer::new(oracle, settings.scorer),
            converter,
            runner: None,
            strategies: vec![GenerationStrategy::Local],
            caches: CacheSet::new(settings),
        }
    }

    /// Built-in table converter, plus an HTTP runner when `runner.base_url`
    /// is set.
    pub fn from_settings(settings: &Settings, oracle: Arc<FrequencyOracle>) -> Self {
        let pipeline = Self::new(settings, oracle, Arc::new(TableConverter::global()));
        match HttpRunner::from_settings(&settings.runner) {
            Some(runner) => pipeline.with_runner(Arc::new(runner)),
            None => pipeline,
        }
    }

    /// Enable the remote runner stage, tried before local generation.
    pub fn with_runner(mut self, runner: Arc<dyn Runner>) -> Self {
        self.runner = Some(runner);
        self.strategies = vec![GenerationStrategy::Runner, GenerationStrategy::Local];
        self
    }

    pub fn strategies(&self) -> &[GenerationStrategy] {
        &self.strategies
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn caches(&self) -> &CacheSet {
        &self.caches
    }

    /// Operator action: drop every cached entry and reset counters.
    pub fn clear_caches(&self) {
        self.caches.clear();
    }

    pub fn health(&self) -> HealthReport {
        HealthReport {
            ok: true,
            cache_init: true,
            runner_configured: self.runner.is_some(),
            caches: self.caches.report(),
        }
    }

    pub(crate) fn is_valid(&self, word: &str, input_len: usize) -> bool {
        self.settings.filter.is_valid(word, input_len)
    }

    pub fn suggest(&self, req: &GenerationRequest) -> PipelineResult {
        self.suggest_with_cancel(req, &CancelToken::new())
    }

    pub fn suggest_with_cancel(&self, req: &GenerationRequest, cancel: &CancelToken) -> PipelineResult {
        let input = &self.settings.input;
        let text = req.text.trim();
        let input_len = text.chars().count();
        let _span = debug_span!(
            "suggest",
            request_id = req.request_id(),
            text,
            limit = req.limit
        )
        .entered();

        if text.is_empty() || input_len > input.max_text_len {
            warn!(len = input_len, max = input.max_text_len, "invalid input");
            return PipelineResult::empty(CacheStatus::None);
        }
        let limit = input.normalize_limit(req.limit);
        let mode = match req.mode.trim() {
            "" => input.default_mode.as_str(),
            m => m,
        };

        let key = cache_key(&[text, mode, &limit.to_string()]);
        if let Some(cached) = self.caches.response.get(&key) {
            debug!(key = key.as_str(), count = cached.suggestions.len(), "response cache hit");
            return PipelineResult {
                suggestions: cached.suggestions,
                used_runner: true,
                cache_status: CacheStatus::Hit,
                generated_by: cached.generated_by,
            };
        }

        let ctx = GenerationContext {
            text,
            token: text.to_lowercase(),
            input_len,
            cancel,
        };
        let mut candidates = Vec::new();
        let mut generated_by = GenerationPath::None;
        for &strategy in &self.strategies {
            if cancel.is_cancelled() {
                break;
            }
            match strategy.run(self, &ctx) {
                StageOutcome::Produced(found) => {
                    debug!(stage = strategy.name(), count = found.len(), "stage produced");
                    candidates.extend(found);
                    generated_by = generated_by.add(strategy.path());
                    if !self.settings.generation.supplement_local {
                        break;
                    }
                }
                StageOutcome::Empty => debug!(stage = strategy.name(), "stage empty"),
                StageOutcome::Failed(reason) => {
                    warn!(stage = strategy.name(), reason = %reason, "stage failed")
                }
            }
        }
        if cancel.is_cancelled() {
            debug!("cancelled");
            return PipelineResult::empty(CacheStatus::Miss);
        }

        let pool = self.settings.ranking.pool_size(limit);
        let mut suggestions =
            rank::rank_candidates(candidates, |w| self.is_valid(w, input_len), pool);
        suggestions.truncate(limit);
        if suggestions.is_empty() {
            generated_by = GenerationPath::None;
        } else {
            self.caches.response.set(
                key,
                CachedAnswer {
                    suggestions: suggestions.clone(),
                    generated_by,
                },
            );
        }
        debug!(count = suggestions.len(), generated_by = ?generated_by, "suggest done");

        PipelineResult {
            suggestions,
            used_runner: generated_by.includes_runner(),
            cache_status: CacheStatus::Miss,
            generated_by,
        }
    }
}
